//! Combat constants configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use super::ConfigError;

/// Global combat constants instance
static COMBAT_CONSTANTS: OnceLock<CombatConstants> = OnceLock::new();

/// Served by `constants()` until the global is initialized
static DEFAULT_CONSTANTS: OnceLock<CombatConstants> = OnceLock::new();

/// Initialize the global combat constants from a TOML file
///
/// Returns error if already initialized or if loading fails.
pub fn init_constants(path: &Path) -> Result<(), ConfigError> {
    let constants = CombatConstants::load_from_path(path)?;
    COMBAT_CONSTANTS
        .set(constants)
        .map_err(|_| ConfigError::ValidationError("CombatConstants already initialized".to_string()))
}

/// Initialize the global combat constants with default values
pub fn init_constants_default() -> Result<(), ConfigError> {
    COMBAT_CONSTANTS
        .set(CombatConstants::default())
        .map_err(|_| ConfigError::ValidationError("CombatConstants already initialized".to_string()))
}

/// Get a reference to the global combat constants
///
/// Reads before initialization see the defaults without claiming the
/// global, so `init_constants` still succeeds afterwards. Characters built
/// before that call keep the values they read; initialize before spawning.
pub fn constants() -> &'static CombatConstants {
    COMBAT_CONSTANTS
        .get()
        .unwrap_or_else(|| DEFAULT_CONSTANTS.get_or_init(CombatConstants::default))
}

/// Check if constants have been initialized
pub fn constants_initialized() -> bool {
    COMBAT_CONSTANTS.get().is_some()
}

/// Ensure constants are initialized with defaults (idempotent, useful for tests)
pub fn ensure_constants_initialized() {
    COMBAT_CONSTANTS.get_or_init(CombatConstants::default);
}

/// Tunable combat constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    #[serde(default)]
    pub melee: MeleeConstants,
    #[serde(default)]
    pub movement: MovementConstants,
    /// Health values below this snap to zero
    #[serde(default = "default_health_epsilon")]
    pub health_epsilon: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            melee: MeleeConstants::default(),
            movement: MovementConstants::default(),
            health_epsilon: default_health_epsilon(),
        }
    }
}

impl CombatConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let constants: CombatConstants = toml::from_str(&content)?;
        constants.validate()?;
        Ok(constants)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.melee.range <= 0.0 || self.melee.radius <= 0.0 {
            return Err(ConfigError::ValidationError(
                "melee range and radius must be positive".to_string(),
            ));
        }
        if self.health_epsilon < 0.0 {
            return Err(ConfigError::ValidationError(
                "health_epsilon must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_health_epsilon() -> f64 {
    1.0e-4
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeleeConstants {
    /// Sweep length along the attacker's forward axis
    #[serde(default = "default_melee_range")]
    pub range: f32,
    /// Sweep sphere radius
    #[serde(default = "default_melee_radius")]
    pub radius: f32,
}

impl Default for MeleeConstants {
    fn default() -> Self {
        MeleeConstants {
            range: 100.0,
            radius: 20.0,
        }
    }
}

fn default_melee_range() -> f32 {
    100.0
}
fn default_melee_radius() -> f32 {
    20.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementConstants {
    /// Seconds the jumped flag stays raised after a jump request
    #[serde(default = "default_jump_debounce")]
    pub jump_debounce: f64,
    /// Collision capsule radius of a character
    #[serde(default = "default_capsule_radius")]
    pub capsule_radius: f32,
}

impl Default for MovementConstants {
    fn default() -> Self {
        MovementConstants {
            jump_debounce: 0.1,
            capsule_radius: 30.0,
        }
    }
}

fn default_jump_debounce() -> f64 {
    0.1
}
fn default_capsule_radius() -> f32 {
    30.0
}
