//! The character: single owner of every combat subsystem
//!
//! A `Character` holds its stat ledger, state flags, skills, object pool,
//! weapons and one scheduler for its own deferred work. Commands enter
//! through the methods below; presentation side effects leave as queued
//! `Cue`s that the caller drains each frame.

use crate::config::{constants, CharacterConfig, ConfigError, MeleeProfile};
use crate::damage::{resolve_melee_hit, DamageInfo, Damageable, HitInstigator, HitWorld, MeleeHitReport};
use crate::skill::{SkillError, SkillEvent, SkillSet};
use crate::stat::{CharacterStat, StatEvent, StatLedger};
use crate::state::StateFlags;
use crate::weapon::WeaponInventory;
use pool_core::{ObjectPool, PoolError, PoolEvent, PooledObjectId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sim_core::{
    Action, AttackerKind, DamageResponse, Direction, EntityId, MovementState, Scheduler,
    TimerHandle, Transform, Vec3,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CharacterError {
    #[error("Invalid character config: {0}")]
    Config(#[from] ConfigError),
    #[error("Pool setup failed: {0}")]
    Pool(#[from] PoolError),
}

/// Fire-and-forget request to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    /// Play a hit reaction facing `direction`
    HitReaction {
        direction: Vec3,
        response: DamageResponse,
    },
    SpawnEffect {
        name: String,
        location: Vec3,
    },
    SustainedEffect {
        skill: String,
    },
    EndEffect {
        skill: String,
    },
    Dodge {
        direction: Direction,
        aerial: bool,
    },
    WeaponDrawn {
        weapon: String,
    },
    WeaponSheathed {
        weapon: String,
    },
    Death,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharacterTimer {
    SkillDuration(usize),
    JumpDebounce,
}

#[derive(Debug)]
pub struct Character {
    id: EntityId,
    name: String,
    kind: AttackerKind,
    transform: Transform,
    collision_enabled: bool,
    ledger: StatLedger,
    state: StateFlags,
    skills: SkillSet,
    pool: ObjectPool,
    weapons: WeaponInventory,
    timers: Scheduler<CharacterTimer>,
    jump_timer: Option<TimerHandle>,
    jumped: bool,
    melee: MeleeProfile,
    hit_effect: Option<String>,
    rng: ChaCha8Rng,
    combo_count: u32,
    normal_attack_index: u32,
    stat_events: Vec<StatEvent>,
    cues: Vec<Cue>,
}

impl Character {
    /// Build a character from its data table
    ///
    /// Registers the hit effect and extra pools, then every skill's object
    /// pools. A pool name configured twice is a fatal setup error.
    pub fn new(id: EntityId, config: &CharacterConfig) -> Result<Self, CharacterError> {
        config.validate()?;

        let mut pool = ObjectPool::new();
        if let Some(spec) = &config.hit_effect {
            pool.register_spec(spec)?;
        }
        for spec in &config.pools {
            pool.register_spec(spec)?;
        }

        let mut skills = SkillSet::new();
        for skill_config in &config.skills {
            let mut skill = skill_config.build();
            skill.bind_owner(id);
            skill.initialize_skill(&mut pool)?;
            skills.insert(skill);
        }

        let mut ledger = StatLedger::new(config.stat.clone());
        ledger.drain_events();

        tracing::debug!(
            "Spawned {} '{}' with {} skills",
            id,
            config.name,
            skills.len()
        );

        Ok(Character {
            id,
            name: config.name.clone(),
            kind: config.kind,
            transform: Transform::default(),
            collision_enabled: true,
            ledger,
            state: StateFlags::new(),
            skills,
            pool,
            weapons: WeaponInventory::new(config.weapons.clone()),
            timers: Scheduler::new(),
            jump_timer: None,
            jumped: false,
            melee: config.melee.clone(),
            hit_effect: config.hit_effect.as_ref().map(|s| s.object_name.clone()),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            combo_count: 0,
            normal_attack_index: 0,
            stat_events: Vec::new(),
            cues: Vec::new(),
        })
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttackerKind {
        self.kind
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Whether sweeps may still find this character
    pub fn is_collision_enabled(&self) -> bool {
        self.collision_enabled
    }

    pub fn stat(&self) -> &CharacterStat {
        self.ledger.stat()
    }

    pub fn ledger(&self) -> &StatLedger {
        &self.ledger
    }

    pub fn state(&self) -> &StateFlags {
        &self.state
    }

    /// Flags the movement subsystem and gameplay scripts write to
    pub fn state_mut(&mut self) -> &mut StateFlags {
        &mut self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state.is_dead()
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn pool(&self) -> &ObjectPool {
        &self.pool
    }

    pub fn weapons(&self) -> &WeaponInventory {
        &self.weapons
    }

    /// Local simulation time
    pub fn now(&self) -> f64 {
        self.timers.now()
    }

    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }

    pub fn normal_attack_index(&self) -> u32 {
        self.normal_attack_index
    }

    pub fn is_jump_debounced(&self) -> bool {
        self.jumped
    }

    // ---- commands ----

    /// Activate a skill by id
    pub fn activate_skill(&mut self, id: &str) -> Result<(), SkillError> {
        if !self.state.is_actionable(Action::Skill) {
            return Err(SkillError::NotActivatable(id.to_string()));
        }
        let index = self
            .skills
            .index_of(id)
            .ok_or_else(|| SkillError::UnknownSkill(id.to_string()))?;
        let skill = self
            .skills
            .by_index_mut(index)
            .ok_or_else(|| SkillError::UnknownSkill(id.to_string()))?;

        skill.activate(
            self.state.movement_state(),
            &mut self.timers,
            CharacterTimer::SkillDuration(index),
        )?;
        skill.spawn_objects(&mut self.pool, self.transform);
        self.dispatch_skill_events();
        Ok(())
    }

    /// End a skill's duration early
    pub fn deactivate_skill(&mut self, id: &str) -> bool {
        let ended = match self.skills.get_mut(id) {
            Some(skill) => skill.deactivate(&mut self.timers),
            None => false,
        };
        self.dispatch_skill_events();
        ended
    }

    /// Seconds left in a skill's duration window
    pub fn skill_remaining_duration(&self, id: &str) -> f64 {
        self.skills
            .get(id)
            .map_or(0.0, |skill| skill.remaining_duration(&self.timers))
    }

    /// Jump if movement is allowed and no jump was requested in the debounce window
    pub fn request_jump(&mut self) -> bool {
        if self.jumped
            || !self.state.is_actionable(Action::Move)
            || self.state.is_movement_state(MovementState::InAir)
        {
            return false;
        }

        self.jumped = true;
        let debounce = constants().movement.jump_debounce;
        self.jump_timer = Some(self.timers.schedule(debounce, CharacterTimer::JumpDebounce));
        tracing::trace!("{} jumped", self.id);
        true
    }

    /// Movement reports touching the ground
    pub fn landed(&mut self) {
        self.state.set_movement_state(MovementState::Grounded);
        if let Some(handle) = self.jump_timer.take() {
            self.timers.cancel(handle);
        }
        self.jumped = false;
    }

    /// Dodge toward `direction`; airborne dodges use the aerial variant
    pub fn request_dodge(&mut self, direction: Direction) -> bool {
        if !self.state.is_actionable(Action::Dodge) {
            return false;
        }
        let aerial = self.state.is_movement_state(MovementState::InAir);
        self.cues.push(Cue::Dodge { direction, aerial });
        true
    }

    /// Swing the basic melee attack
    ///
    /// Returns None if attacking is not currently allowed.
    pub fn request_melee_attack<W: HitWorld + ?Sized>(&mut self, world: &mut W) -> Option<MeleeHitReport> {
        if !self.state.is_actionable(Action::Attack) {
            return None;
        }
        self.normal_attack_index += 1;
        Some(resolve_melee_hit(self, world))
    }

    pub fn draw_weapon(&mut self) -> bool {
        match self.weapons.draw_equipped_weapon() {
            Some(weapon) => {
                let weapon = weapon.name.clone();
                self.cues.push(Cue::WeaponDrawn { weapon });
                true
            }
            None => false,
        }
    }

    pub fn sheath_weapon(&mut self) -> bool {
        match self.weapons.sheath_equipped_weapon() {
            Some(weapon) => {
                let weapon = weapon.name.clone();
                self.cues.push(Cue::WeaponSheathed { weapon });
                true
            }
            None => false,
        }
    }

    /// Advance this character's timers and pool by `delta` seconds
    pub fn tick(&mut self, delta: f64) {
        for timer in self.timers.advance(delta) {
            match timer {
                CharacterTimer::SkillDuration(index) => {
                    if let Some(skill) = self.skills.by_index_mut(index) {
                        skill.on_duration_expired();
                    }
                }
                CharacterTimer::JumpDebounce => {
                    self.jump_timer = None;
                    self.jumped = false;
                }
            }
        }

        self.pool.tick(delta);
        self.forward_pool_events();
        self.dispatch_skill_events();
    }

    /// Return a pooled object before its lifespan runs out
    ///
    /// The lifespan timer is cancelled and the owning skill drops the object
    /// immediately. Returns false if the object was not active.
    pub fn release_object(&mut self, id: PooledObjectId) -> bool {
        let released = self.pool.release(id);
        self.forward_pool_events();
        released
    }

    /// Take all presentation cues raised since the last drain
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Take all health notifications raised since the last drain
    pub fn drain_stat_events(&mut self) -> Vec<StatEvent> {
        std::mem::take(&mut self.stat_events)
    }

    // ---- damage intake ----

    /// React to being struck by `instigator`
    ///
    /// Player-sourced hits turn the receiver and cue the reaction only while
    /// time is not frozen. AI-sourced hits always do.
    pub fn apply_incoming_hit(&mut self, instigator: &HitInstigator, response: DamageResponse) {
        self.state.set_hit(true);

        let react = match instigator.kind {
            AttackerKind::PlayerSourced => !instigator.time_frozen,
            AttackerKind::AiSourced => true,
            AttackerKind::Other => false,
        };
        if !react {
            return;
        }

        self.transform = Transform::new(self.transform.location, -instigator.forward);
        self.cues.push(Cue::HitReaction {
            direction: self.transform.forward,
            response,
        });
    }

    /// Terminal transition; repeated calls do nothing
    pub fn die(&mut self) {
        if self.state.is_dead() {
            return;
        }
        self.state.set_dead();
        self.collision_enabled = false;

        for skill in self.skills.iter_mut() {
            skill.deactivate(&mut self.timers);
        }
        if let Some(handle) = self.jump_timer.take() {
            self.timers.cancel(handle);
        }
        self.jumped = false;

        tracing::debug!("{} '{}' died", self.id, self.name);
        self.cues.push(Cue::Death);
        self.dispatch_skill_events();
    }

    /// Credit one landed hit to this attacker's combo
    pub fn activate_combo_count(&mut self) {
        self.combo_count += 1;
    }

    // ---- internals used by the damage pipeline ----

    /// Build one melee hit from the melee profile, rolling for a critical
    pub(crate) fn roll_melee_damage(&mut self) -> DamageInfo {
        let stat = self.ledger.stat();
        let mut amount = self.melee.amount + stat.attack * self.melee.attack_scaling;

        let critical = self.melee.allow_critical
            && stat.critical_rate > 0.0
            && self.rng.gen::<f64>() * 100.0 < stat.critical_rate;
        if critical {
            amount *= 1.0 + stat.critical_damage / 100.0;
        }

        let mut info = DamageInfo::new(amount, self.melee.damage_type, self.melee.damage_response);
        info.critical = critical;
        info
    }

    /// Acquire a hit effect at `location`; None when unconfigured or exhausted
    pub(crate) fn spawn_hit_effect(&mut self, location: Vec3) -> Option<PooledObjectId> {
        let name = self.hit_effect.as_ref()?;
        let transform = Transform::new(location, self.transform.forward);
        match self.pool.acquire(name, Some(self.id), transform) {
            Ok(id) => {
                self.cues.push(Cue::SpawnEffect {
                    name: name.clone(),
                    location,
                });
                Some(id)
            }
            Err(e) => {
                tracing::warn!("{} hit effect skipped: {}", self.id, e);
                None
            }
        }
    }

    fn dispatch_skill_events(&mut self) {
        for skill in self.skills.iter_mut() {
            for event in skill.drain_events() {
                match event {
                    SkillEvent::ResetAttackIndex => self.normal_attack_index = 0,
                    SkillEvent::DurationEffectStarted => self.cues.push(Cue::SustainedEffect {
                        skill: skill.id().to_string(),
                    }),
                    SkillEvent::DurationEffectEnded => self.cues.push(Cue::EndEffect {
                        skill: skill.id().to_string(),
                    }),
                }
            }
        }
    }

    fn forward_pool_events(&mut self) {
        for event in self.pool.drain_events() {
            let PoolEvent::Deactivated { id, .. } = event;
            for skill in self.skills.iter_mut() {
                skill.forget_object(id);
            }
        }
    }

    fn dispatch_stat_events(&mut self) {
        for event in self.ledger.drain_events() {
            self.stat_events.push(event);
            if event == StatEvent::HealthZero {
                self.die();
            }
        }
    }
}

impl Damageable for Character {
    fn current_health(&self) -> f64 {
        self.ledger.health_point()
    }

    fn max_health(&self) -> f64 {
        self.ledger.max_health_point()
    }

    fn heal(&mut self, amount: f64) -> f64 {
        if self.state.is_dead() {
            return 0.0;
        }
        let healed = self.ledger.heal(amount);
        self.dispatch_stat_events();
        healed
    }

    /// Refused while dead or invincible
    fn take_damage(&mut self, info: &DamageInfo) -> bool {
        if self.state.is_dead() || self.state.is_invincible() {
            tracing::trace!("{} refused {:.1} damage", self.id, info.amount);
            return false;
        }

        if let Some(instigator) = &info.instigator {
            self.apply_incoming_hit(instigator, info.damage_response);
        }
        self.ledger.apply_damage(info.amount);
        self.dispatch_stat_events();
        true
    }
}
