//! Melee hit resolution
//!
//! One call sweeps a sphere along the attacker's forward axis, hands each
//! distinct damageable target exactly one `DamageInfo` and spawns a hit
//! effect for every accepted hit. All target mutations finish before the
//! call returns.

use super::{Damageable, HitInstigator};
use crate::character::Character;
use crate::config::constants;
use pool_core::PooledObjectId;
use sim_core::{AttackerKind, CollisionCategory, EntityId, Vec3};
use std::collections::HashSet;

/// One raw result of a sweep query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub target: EntityId,
    /// Impact point on the sweep path
    pub location: Vec3,
}

/// The world as seen by the damage pipeline
pub trait HitWorld {
    /// Entities of `category` touched by a sphere of `radius` moved from
    /// `start` to `end`, nearest first. May report an entity more than once.
    fn sweep_sphere(
        &self,
        start: Vec3,
        end: Vec3,
        radius: f32,
        category: CollisionCategory,
        ignore: EntityId,
    ) -> Vec<SweepHit>;

    /// Damage intake of an entity, if it has one
    fn damageable_mut(&mut self, id: EntityId) -> Option<&mut dyn Damageable>;

    /// Whether a global time freeze is in effect
    fn is_time_frozen(&self) -> bool {
        false
    }
}

/// What one melee resolution did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeleeHitReport {
    /// Targets that took the hit
    pub damaged: Vec<EntityId>,
    /// Targets that refused it (dead or invincible)
    pub rejected: Vec<EntityId>,
    /// Hits on entities without damage intake
    pub invalid: Vec<EntityId>,
    /// Raw hits dropped as repeats of an earlier target
    pub duplicates: usize,
    /// Hit effects acquired from the attacker's pool
    pub effects: Vec<PooledObjectId>,
}

impl MeleeHitReport {
    pub fn hit_count(&self) -> usize {
        self.damaged.len()
    }
}

/// Resolve the attacker's basic melee swing against `world`
///
/// Does nothing for a dead attacker. Player-sourced attackers gain combo
/// credit for every accepted hit.
pub fn resolve_melee_hit<W: HitWorld + ?Sized>(attacker: &mut Character, world: &mut W) -> MeleeHitReport {
    let mut report = MeleeHitReport::default();
    if attacker.is_dead() {
        tracing::trace!("{} is dead, melee skipped", attacker.id());
        return report;
    }

    let melee = &constants().melee;
    let transform = attacker.transform();
    let start = transform.location;
    let end = start + transform.forward * melee.range;
    let hits = world.sweep_sphere(start, end, melee.radius, CollisionCategory::Pawn, attacker.id());

    let instigator = HitInstigator {
        id: attacker.id(),
        kind: attacker.kind(),
        forward: transform.forward,
        time_frozen: world.is_time_frozen(),
    };

    let mut seen = HashSet::new();
    for hit in hits {
        if hit.target == attacker.id() {
            continue;
        }
        if !seen.insert(hit.target) {
            report.duplicates += 1;
            continue;
        }

        let Some(target) = world.damageable_mut(hit.target) else {
            tracing::trace!("{} has no damage intake, skipped", hit.target);
            report.invalid.push(hit.target);
            continue;
        };

        let info = attacker.roll_melee_damage().with_instigator(instigator);
        if !target.take_damage(&info) {
            report.rejected.push(hit.target);
            continue;
        }

        tracing::debug!(
            "{} hit {} for {:.1}{}",
            attacker.id(),
            hit.target,
            info.amount,
            if info.critical { " (critical)" } else { "" }
        );
        report.damaged.push(hit.target);
        if instigator.kind == AttackerKind::PlayerSourced {
            attacker.activate_combo_count();
        }
        if let Some(effect) = attacker.spawn_hit_effect(hit.location) {
            report.effects.push(effect);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CharacterConfig;
    use crate::damage::DamageInfo;
    use pool_core::PooledObjectSpec;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct Dummy {
        health: f64,
        invincible: bool,
        hits: Vec<DamageInfo>,
    }

    impl Damageable for Dummy {
        fn current_health(&self) -> f64 {
            self.health
        }

        fn max_health(&self) -> f64 {
            100.0
        }

        fn heal(&mut self, amount: f64) -> f64 {
            self.health += amount;
            amount
        }

        fn take_damage(&mut self, info: &DamageInfo) -> bool {
            if self.invincible {
                return false;
            }
            self.health -= info.amount;
            self.hits.push(*info);
            true
        }
    }

    /// World that replays a fixed raw hit list
    #[derive(Default)]
    struct ScriptedWorld {
        raw_hits: Vec<SweepHit>,
        targets: HashMap<EntityId, Dummy>,
        frozen: bool,
    }

    impl HitWorld for ScriptedWorld {
        fn sweep_sphere(&self, _: Vec3, _: Vec3, _: f32, _: CollisionCategory, _: EntityId) -> Vec<SweepHit> {
            self.raw_hits.clone()
        }

        fn damageable_mut(&mut self, id: EntityId) -> Option<&mut dyn Damageable> {
            self.targets.get_mut(&id).map(|d| d as &mut dyn Damageable)
        }

        fn is_time_frozen(&self) -> bool {
            self.frozen
        }
    }

    fn hit(id: u32) -> SweepHit {
        SweepHit {
            target: EntityId(id),
            location: Vec3::new(50.0, 0.0, 0.0),
        }
    }

    fn attacker(kind: AttackerKind) -> Character {
        let mut config = CharacterConfig::new("attacker", kind);
        config.hit_effect = Some(PooledObjectSpec::new("hit_spark", "fx/hit_spark", 4));
        Character::new(EntityId(1), &config).unwrap()
    }

    fn dummy(health: f64) -> Dummy {
        Dummy {
            health,
            ..Default::default()
        }
    }

    #[test]
    fn test_duplicate_hits_damage_once() {
        let mut world = ScriptedWorld {
            raw_hits: vec![hit(2), hit(2)],
            ..Default::default()
        };
        world.targets.insert(EntityId(2), dummy(100.0));
        let mut attacker = attacker(AttackerKind::AiSourced);

        let report = resolve_melee_hit(&mut attacker, &mut world);

        assert_eq!(report.damaged, vec![EntityId(2)]);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.effects.len(), 1);
        assert_eq!(attacker.pool().active_count("hit_spark"), 1);

        let target = &world.targets[&EntityId(2)];
        assert_eq!(target.hits.len(), 1);
        assert!((target.health - 90.0).abs() < f64::EPSILON);

        let spawned = attacker
            .drain_cues()
            .into_iter()
            .filter(|c| matches!(c, crate::character::Cue::SpawnEffect { .. }))
            .count();
        assert_eq!(spawned, 1);
    }

    #[test]
    fn test_hit_carries_instigator() {
        let mut world = ScriptedWorld {
            raw_hits: vec![hit(2)],
            frozen: true,
            ..Default::default()
        };
        world.targets.insert(EntityId(2), dummy(100.0));
        let mut attacker = attacker(AttackerKind::PlayerSourced);

        resolve_melee_hit(&mut attacker, &mut world);

        let info = world.targets[&EntityId(2)].hits[0];
        let instigator = info.instigator.unwrap();
        assert_eq!(instigator.id, EntityId(1));
        assert_eq!(instigator.kind, AttackerKind::PlayerSourced);
        assert!(instigator.time_frozen);
        assert_eq!(info.damage_response, sim_core::DamageResponse::HitReaction);
    }

    #[test]
    fn test_rejected_and_invalid_targets() {
        let mut world = ScriptedWorld {
            raw_hits: vec![hit(2), hit(3), hit(4)],
            ..Default::default()
        };
        world.targets.insert(
            EntityId(2),
            Dummy {
                invincible: true,
                ..dummy(100.0)
            },
        );
        world.targets.insert(EntityId(4), dummy(100.0));
        let mut attacker = attacker(AttackerKind::PlayerSourced);

        let report = resolve_melee_hit(&mut attacker, &mut world);

        assert_eq!(report.rejected, vec![EntityId(2)]);
        assert_eq!(report.invalid, vec![EntityId(3)]);
        assert_eq!(report.damaged, vec![EntityId(4)]);
        assert_eq!(report.effects.len(), 1);
        assert_eq!(attacker.combo_count(), 1);
    }

    #[test]
    fn test_ai_attacker_gets_no_combo_credit() {
        let mut world = ScriptedWorld {
            raw_hits: vec![hit(2)],
            ..Default::default()
        };
        world.targets.insert(EntityId(2), dummy(100.0));
        let mut attacker = attacker(AttackerKind::AiSourced);

        resolve_melee_hit(&mut attacker, &mut world);
        assert_eq!(attacker.combo_count(), 0);
    }

    #[test]
    fn test_exhausted_effect_pool_is_tolerated() {
        let mut world = ScriptedWorld {
            raw_hits: (2..8).map(hit).collect(),
            ..Default::default()
        };
        for id in 2..8 {
            world.targets.insert(EntityId(id), dummy(100.0));
        }
        let mut attacker = attacker(AttackerKind::AiSourced);

        let report = resolve_melee_hit(&mut attacker, &mut world);
        assert_eq!(report.hit_count(), 6);
        assert_eq!(report.effects.len(), 4);
    }

    #[test]
    fn test_dead_attacker_does_nothing() {
        let mut world = ScriptedWorld {
            raw_hits: vec![hit(2)],
            ..Default::default()
        };
        world.targets.insert(EntityId(2), dummy(100.0));
        let mut attacker = attacker(AttackerKind::AiSourced);
        attacker.die();

        let report = resolve_melee_hit(&mut attacker, &mut world);
        assert_eq!(report, MeleeHitReport::default());
        assert!(world.targets[&EntityId(2)].hits.is_empty());
    }
}
