//! combat_core - Skill and combat engine for action characters
//!
//! This library provides:
//! - StatLedger: clamped health with edge-triggered zero notifications
//! - StateFlags: dead/invincible/hit flags and the actionable gate
//! - Skill: activation state machine with duration windows and pluggable cooldowns
//! - Melee resolution: sphere sweep, per-target dedup, hit effects from the pool
//! - Character / Arena: explicit owners that wire the pieces together
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use combat_core::prelude::*;
//! use std::path::Path;
//!
//! let knight = CharacterConfig::load(Path::new("data/knight.toml")).unwrap();
//! let goblin = CharacterConfig::load(Path::new("data/goblin.json")).unwrap();
//!
//! let mut arena = Arena::new();
//! let hero = arena.spawn(&knight, Transform::default()).unwrap();
//! let foe = arena.spawn(&goblin, Transform::at(Vec3::new(50.0, 0.0, 0.0))).unwrap();
//!
//! arena.get_mut(hero).unwrap().activate_skill("whirlwind").unwrap();
//! let report = arena.melee_attack(hero).unwrap();
//! println!("Hit {} targets", report.hit_count());
//!
//! arena.tick(1.0 / 60.0);
//! for cue in arena.get_mut(hero).unwrap().drain_cues() {
//!     // hand to presentation
//! }
//! ```

pub mod arena;
pub mod character;
pub mod config;
pub mod damage;
pub mod prelude;
pub mod skill;
pub mod stat;
pub mod state;
pub mod weapon;

// Core API
pub use arena::Arena;
pub use character::{Character, CharacterError, Cue};
pub use damage::{resolve_melee_hit, DamageInfo, Damageable, HitInstigator, HitWorld, MeleeHitReport};
pub use skill::{Skill, SkillError, SkillEvent, SkillInfo, SkillPhase, SkillSet};
pub use stat::{CharacterStat, StatEvent, StatLedger};
pub use state::StateFlags;
pub use weapon::{Weapon, WeaponInventory};

// Configuration
pub use config::{init_constants, init_constants_default, CharacterConfig, SkillConfig};

// Re-export commonly needed shared types
pub use pool_core::{ObjectPool, PoolError, PooledObjectSpec};
pub use sim_core::{AttackerKind, DamageResponse, DamageType, EntityId, MovementState, Transform, Vec3};
