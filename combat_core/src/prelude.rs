//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Owners
pub use crate::arena::Arena;
pub use crate::character::{Character, Cue};

// Subsystems
pub use crate::skill::{ActivatableType, CooldownPolicy, Skill, SkillError, SkillInfo};
pub use crate::stat::{CharacterStat, StatLedger};
pub use crate::state::StateFlags;

// Damage
pub use crate::damage::{DamageInfo, Damageable, HitWorld, MeleeHitReport};

// Config
pub use crate::config::{CharacterConfig, SkillConfig, init_constants, init_constants_default};

// Shared types
pub use pool_core::ObjectPool;
pub use sim_core::{Action, AttackerKind, DamageResponse, DamageType, Direction, EntityId, MovementState, Transform, Vec3};
