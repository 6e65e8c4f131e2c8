//! Character attributes and the health ledger

mod ledger;

pub use ledger::{StatEvent, StatLedger};

use serde::{Deserialize, Serialize};
use sim_core::ElementType;
use std::collections::HashMap;

/// Numeric attributes of a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterStat {
    /// Current health; reset to max by `StatLedger::initialize`
    #[serde(default)]
    pub health_point: f64,
    pub max_health_point: f64,
    #[serde(default)]
    pub attack: f64,
    #[serde(default)]
    pub defence: f64,
    /// Chance to crit, in percent
    #[serde(default)]
    pub critical_rate: f64,
    /// Extra damage on crit, in percent
    #[serde(default)]
    pub critical_damage: f64,
    /// Percent damage bonus per element
    #[serde(default)]
    pub elemental_bonus: HashMap<ElementType, f64>,
}

impl CharacterStat {
    /// Stat block with only health set
    pub fn with_max_health(max_health_point: f64) -> Self {
        CharacterStat {
            health_point: max_health_point,
            max_health_point,
            ..Default::default()
        }
    }

    /// Damage bonus for an element (0 if none)
    pub fn elemental_bonus(&self, element: ElementType) -> f64 {
        self.elemental_bonus.get(&element).copied().unwrap_or(0.0)
    }

    /// Current health as a 0..=1 fraction of max
    pub fn health_ratio(&self) -> f64 {
        if self.max_health_point <= 0.0 {
            return 0.0;
        }
        self.health_point / self.max_health_point
    }
}

impl Default for CharacterStat {
    fn default() -> Self {
        CharacterStat {
            health_point: 100.0,
            max_health_point: 100.0,
            attack: 0.0,
            defence: 0.0,
            critical_rate: 0.0,
            critical_damage: 0.0,
            elemental_bonus: HashMap::new(),
        }
    }
}
