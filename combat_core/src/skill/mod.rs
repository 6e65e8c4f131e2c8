//! Skill activation state machine
//!
//! A skill moves through Idle -> Active -> CoolingDown -> Idle. Activation
//! is gated on an owner being bound, the cooldown policy and the owner's
//! movement state. The duration window runs on the caller's scheduler so
//! that cancelling it and letting it expire share one timer queue.

mod cooldown;
mod set;

pub use cooldown::{policy_for, CooldownPolicy, NoCooldown, TimedCooldown};
pub use set::SkillSet;

use pool_core::{ObjectPool, PoolError, PooledObjectId, PooledObjectSpec};
use serde::{Deserialize, Serialize};
use sim_core::{EntityId, MovementState, Scheduler, TimerHandle, Transform};
use thiserror::Error;

/// Unlimited activations
pub const UNLIMITED_ACTIVATIONS: i32 = -1;

/// Movement context a skill may be used in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivatableType {
    Ground,
    InAir,
    #[default]
    All,
}

/// Static configuration of a skill
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SkillInfo {
    #[serde(default)]
    pub activatable_type: ActivatableType,
    /// Seconds the sustained effect lasts; 0 ends it on activation
    #[serde(default)]
    pub duration: f64,
    /// Seconds before the skill can be used again; 0 means never cooling down
    #[serde(default)]
    pub cooldown: f64,
    /// Pooled objects the skill spawns on activation
    #[serde(default)]
    pub object_infos: Vec<PooledObjectSpec>,
}

/// Lifecycle phase derived from the skill's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillPhase {
    Idle,
    Active,
    CoolingDown,
}

/// Notifications raised by a skill for its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillEvent {
    /// The owner's normal attack combo should restart
    ResetAttackIndex,
    DurationEffectStarted,
    DurationEffectEnded,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkillError {
    #[error("Skill '{0}' cannot be activated")]
    NotActivatable(String),
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),
}

/// One skill instance owned by a character
#[derive(Debug)]
pub struct Skill {
    id: String,
    info: SkillInfo,
    owner: Option<EntityId>,
    active: bool,
    activatable_count: i32,
    cooldown: Box<dyn CooldownPolicy>,
    duration_timer: Option<TimerHandle>,
    spawned: Vec<PooledObjectId>,
    events: Vec<SkillEvent>,
}

impl Skill {
    /// Create an unowned skill; the cooldown policy follows `info.cooldown`
    pub fn new(id: impl Into<String>, info: SkillInfo) -> Self {
        let cooldown = policy_for(info.cooldown);
        Skill {
            id: id.into(),
            info,
            owner: None,
            active: false,
            activatable_count: UNLIMITED_ACTIVATIONS,
            cooldown,
            duration_timer: None,
            spawned: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Replace the cooldown policy
    pub fn with_cooldown(mut self, cooldown: Box<dyn CooldownPolicy>) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Limit the number of successful activations (-1 = unlimited)
    pub fn with_activatable_count(mut self, count: i32) -> Self {
        self.activatable_count = count.max(UNLIMITED_ACTIVATIONS);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn info(&self) -> &SkillInfo {
        &self.info
    }

    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    /// Bind the owning character; a skill is bound at most once
    pub fn bind_owner(&mut self, owner: EntityId) -> bool {
        if self.owner.is_some() {
            return false;
        }
        self.owner = Some(owner);
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activatable_count(&self) -> i32 {
        self.activatable_count
    }

    pub fn cooldown(&self) -> &dyn CooldownPolicy {
        self.cooldown.as_ref()
    }

    pub fn phase(&self, now: f64) -> SkillPhase {
        if self.active {
            SkillPhase::Active
        } else if self.cooldown.is_cooldown(now) {
            SkillPhase::CoolingDown
        } else {
            SkillPhase::Idle
        }
    }

    /// Whether the configured movement context matches the owner's
    pub fn is_can_activatable_type(&self, movement: MovementState) -> bool {
        match self.info.activatable_type {
            ActivatableType::Ground => movement == MovementState::Grounded,
            ActivatableType::InAir => movement == MovementState::InAir,
            ActivatableType::All => true,
        }
    }

    pub fn can_activate(&self, movement: MovementState, now: f64) -> bool {
        self.owner.is_some()
            && self.activatable_count != 0
            && !self.cooldown.is_cooldown(now)
            && self.is_can_activatable_type(movement)
    }

    /// Start the skill
    ///
    /// On success the skill is active, `ResetAttackIndex` and
    /// `DurationEffectStarted` are queued, the cooldown policy is started and
    /// `expiry` is parked on `timers` until the duration ends. A zero
    /// duration ends the effect within this call. Fails without touching any
    /// state when `can_activate` is false.
    pub fn activate<T>(
        &mut self,
        movement: MovementState,
        timers: &mut Scheduler<T>,
        expiry: T,
    ) -> Result<(), SkillError> {
        let now = timers.now();
        if !self.can_activate(movement, now) {
            tracing::debug!("Skill '{}' not activatable ({:?})", self.id, self.phase(now));
            return Err(SkillError::NotActivatable(self.id.clone()));
        }

        // Restarting while active replaces the running window
        if let Some(handle) = self.duration_timer.take() {
            timers.cancel(handle);
        }

        if self.activatable_count > 0 {
            self.activatable_count -= 1;
        }
        self.active = true;
        self.events.push(SkillEvent::ResetAttackIndex);
        self.cooldown.start(now);
        self.events.push(SkillEvent::DurationEffectStarted);
        tracing::debug!("Skill '{}' activated at {:.3}", self.id, now);

        if self.info.duration > 0.0 {
            self.duration_timer = Some(timers.schedule(self.info.duration, expiry));
        } else {
            self.end_duration();
        }
        Ok(())
    }

    /// Called when the duration timer fires
    pub fn on_duration_expired(&mut self) {
        self.duration_timer = None;
        self.end_duration();
    }

    /// End the duration early, cancelling its timer
    ///
    /// Returns false if the skill was already inactive.
    pub fn deactivate<T>(&mut self, timers: &mut Scheduler<T>) -> bool {
        if let Some(handle) = self.duration_timer.take() {
            timers.cancel(handle);
        }
        self.end_duration()
    }

    fn end_duration(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.events.push(SkillEvent::DurationEffectEnded);
        tracing::debug!("Skill '{}' duration ended", self.id);
        true
    }

    /// Seconds left in the running duration window
    pub fn remaining_duration<T>(&self, timers: &Scheduler<T>) -> f64 {
        self.duration_timer
            .and_then(|handle| timers.remaining(handle))
            .unwrap_or(0.0)
    }

    /// Register every object spec the owner's pool does not know yet
    ///
    /// Returns how many pools were registered by this call.
    pub fn initialize_skill(&self, pool: &mut ObjectPool) -> Result<usize, PoolError> {
        let mut registered = 0;
        for spec in &self.info.object_infos {
            if !pool.is_registered(&spec.object_name) {
                pool.register_spec(spec)?;
                registered += 1;
            }
        }
        Ok(registered)
    }

    /// Acquire one of each configured object at `transform`
    ///
    /// Exhausted or missing pools are skipped.
    pub fn spawn_objects(&mut self, pool: &mut ObjectPool, transform: Transform) -> Vec<PooledObjectId> {
        let mut ids = Vec::new();
        for spec in &self.info.object_infos {
            match pool.acquire(&spec.object_name, self.owner, transform) {
                Ok(id) => ids.push(id),
                Err(e) => tracing::warn!("Skill '{}' spawn skipped: {}", self.id, e),
            }
        }
        self.spawned.extend(ids.iter().copied());
        ids
    }

    /// Pooled objects this skill spawned that are still alive
    pub fn spawned(&self) -> &[PooledObjectId] {
        &self.spawned
    }

    /// Drop the reference to a deactivated pooled object
    pub fn forget_object(&mut self, id: PooledObjectId) -> bool {
        let before = self.spawned.len();
        self.spawned.retain(|&spawned| spawned != id);
        self.spawned.len() != before
    }

    /// Take all notifications raised since the last drain
    pub fn drain_events(&mut self) -> Vec<SkillEvent> {
        std::mem::take(&mut self.events)
    }
}
