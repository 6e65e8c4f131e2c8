//! sim_core - Shared vocabulary for the combat simulation
//!
//! This library provides:
//! - Entity ids, damage/movement/action enums and spatial transforms
//! - Scheduler: a single-threaded, tick-driven timer queue with cancellable handles

pub mod scheduler;
pub mod types;

pub use scheduler::{Scheduler, TimerHandle, TIME_EPSILON};
pub use types::{
    Action, AttackerKind, CollisionCategory, DamageResponse, DamageType, Direction, ElementType,
    EntityId, MovementState, Transform,
};

pub use glam::Vec3;
