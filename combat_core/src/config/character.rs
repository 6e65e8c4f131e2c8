//! Per-character data tables

use super::{load_table, parse_toml, ConfigError};
use crate::skill::{ActivatableType, Skill, SkillInfo, UNLIMITED_ACTIVATIONS};
use crate::stat::CharacterStat;
use crate::weapon::Weapon;
use pool_core::PooledObjectSpec;
use serde::{Deserialize, Serialize};
use sim_core::{AttackerKind, DamageResponse, DamageType};
use std::collections::HashSet;
use std::path::Path;

/// Resolved static data for one character
///
/// ```toml
/// name = "knight"
/// kind = "player_sourced"
///
/// [stat]
/// max_health_point = 120.0
///
/// [hit_effect]
/// object_name = "hit_spark"
/// template = "fx/hit_spark"
/// pool_size = 8
/// lifespan = 0.5
///
/// [[skills]]
/// id = "whirlwind"
/// activatable_type = "ground"
/// duration = 2.0
/// cooldown = 5.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterConfig {
    pub name: String,
    #[serde(default)]
    pub kind: AttackerKind,
    #[serde(default)]
    pub stat: CharacterStat,
    #[serde(default)]
    pub melee: MeleeProfile,
    /// Pool spawned at the impact point of accepted melee hits
    #[serde(default)]
    pub hit_effect: Option<PooledObjectSpec>,
    /// Extra pools registered at construction
    #[serde(default)]
    pub pools: Vec<PooledObjectSpec>,
    #[serde(default)]
    pub skills: Vec<SkillConfig>,
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    /// Seed for critical hit rolls
    #[serde(default)]
    pub rng_seed: u64,
}

impl CharacterConfig {
    /// Minimal config with default stats and no skills
    pub fn new(name: impl Into<String>, kind: AttackerKind) -> Self {
        CharacterConfig {
            name: name.into(),
            kind,
            stat: CharacterStat::default(),
            melee: MeleeProfile::default(),
            hit_effect: None,
            pools: Vec::new(),
            skills: Vec::new(),
            weapons: Vec::new(),
            rng_seed: 0,
        }
    }

    /// Load from a `.toml` or `.json` data table
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: CharacterConfig = load_table(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: CharacterConfig = parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::ValidationError(message));

        if !(self.stat.max_health_point.is_finite() && self.stat.max_health_point > 0.0) {
            return invalid(format!("{}: max_health_point must be positive", self.name));
        }
        if !(self.melee.amount >= 0.0) {
            return invalid(format!("{}: melee amount must not be negative", self.name));
        }

        let mut ids = HashSet::new();
        for skill in &self.skills {
            if !ids.insert(skill.id.as_str()) {
                return invalid(format!("{}: duplicate skill '{}'", self.name, skill.id));
            }
            if !(skill.duration >= 0.0) || !(skill.cooldown >= 0.0) {
                return invalid(format!(
                    "{}: skill '{}' needs non-negative duration and cooldown",
                    self.name, skill.id
                ));
            }
            if skill.activatable_count < UNLIMITED_ACTIVATIONS {
                return invalid(format!(
                    "{}: skill '{}' activatable_count must be -1 or more",
                    self.name, skill.id
                ));
            }
        }
        Ok(())
    }
}

/// Static data for one skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillConfig {
    pub id: String,
    #[serde(default)]
    pub activatable_type: ActivatableType,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub cooldown: f64,
    /// Successful activations allowed; -1 for unlimited
    #[serde(default = "default_activatable_count")]
    pub activatable_count: i32,
    #[serde(default)]
    pub object_infos: Vec<PooledObjectSpec>,
}

fn default_activatable_count() -> i32 {
    UNLIMITED_ACTIVATIONS
}

impl SkillConfig {
    pub fn info(&self) -> SkillInfo {
        SkillInfo {
            activatable_type: self.activatable_type,
            duration: self.duration,
            cooldown: self.cooldown,
            object_infos: self.object_infos.clone(),
        }
    }

    /// Build an unowned skill instance
    pub fn build(&self) -> Skill {
        Skill::new(self.id.clone(), self.info()).with_activatable_count(self.activatable_count)
    }
}

/// How a character's basic melee attack deals damage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeleeProfile {
    #[serde(default = "default_melee_amount")]
    pub amount: f64,
    #[serde(default)]
    pub damage_type: DamageType,
    #[serde(default = "default_melee_response")]
    pub damage_response: DamageResponse,
    /// Fraction of the attack stat added to `amount`
    #[serde(default)]
    pub attack_scaling: f64,
    /// Roll critical hits from critical_rate / critical_damage
    #[serde(default)]
    pub allow_critical: bool,
}

impl Default for MeleeProfile {
    fn default() -> Self {
        MeleeProfile {
            amount: default_melee_amount(),
            damage_type: DamageType::Melee,
            damage_response: default_melee_response(),
            attack_scaling: 0.0,
            allow_critical: false,
        }
    }
}

fn default_melee_amount() -> f64 {
    10.0
}

fn default_melee_response() -> DamageResponse {
    DamageResponse::HitReaction
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const KNIGHT: &str = r#"
name = "knight"
kind = "player_sourced"
rng_seed = 7

[stat]
max_health_point = 120.0
attack = 15.0

[melee]
attack_scaling = 0.5

[hit_effect]
object_name = "hit_spark"
template = "fx/hit_spark"
pool_size = 8
lifespan = 0.5

[[weapons]]
name = "longsword"
template = "mesh/longsword"

[[skills]]
id = "whirlwind"
activatable_type = "ground"
duration = 2.0
cooldown = 5.0

[[skills.object_infos]]
object_name = "wind"
pool_size = 2

[[skills]]
id = "leap"
activatable_type = "in_air"
activatable_count = 1
"#;

    #[test]
    fn test_parse_character() {
        let config = CharacterConfig::parse(KNIGHT).unwrap();

        assert_eq!(config.name, "knight");
        assert_eq!(config.kind, AttackerKind::PlayerSourced);
        assert!((config.stat.max_health_point - 120.0).abs() < f64::EPSILON);
        assert!((config.melee.amount - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.melee.damage_response, DamageResponse::HitReaction);
        assert_eq!(config.hit_effect.as_ref().unwrap().pool_size, 8);
        assert_eq!(config.weapons.len(), 1);

        let whirlwind = &config.skills[0];
        assert_eq!(whirlwind.activatable_type, ActivatableType::Ground);
        assert_eq!(whirlwind.activatable_count, UNLIMITED_ACTIVATIONS);
        assert_eq!(whirlwind.object_infos[0].object_name, "wind");
        assert_eq!(config.skills[1].activatable_count, 1);
    }

    #[test]
    fn test_build_skill() {
        let config = CharacterConfig::parse(KNIGHT).unwrap();
        let leap = config.skills[1].build();

        assert_eq!(leap.id(), "leap");
        assert_eq!(leap.activatable_count(), 1);
        assert!(leap.owner().is_none());
    }

    #[test]
    fn test_duplicate_skill_rejected() {
        let toml = r#"
name = "twin"

[[skills]]
id = "slash"

[[skills]]
id = "slash"
"#;
        assert!(matches!(
            CharacterConfig::parse(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_non_positive_health_rejected() {
        let mut config = CharacterConfig::new("ghost", AttackerKind::Other);
        config.stat.max_health_point = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("goblin.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(
            br#"{
                "name": "goblin",
                "kind": "ai_sourced",
                "stat": { "max_health_point": 40.0 },
                "skills": [{ "id": "bite", "duration": 0.5 }]
            }"#,
        )
        .unwrap();

        let config = CharacterConfig::load(&path).unwrap();
        assert_eq!(config.kind, AttackerKind::AiSourced);
        assert!((config.skills[0].duration - 0.5).abs() < f64::EPSILON);
        assert!(config.hit_effect.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = CharacterConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
