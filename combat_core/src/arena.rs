//! A world of characters that answers sweep queries

use crate::character::{Character, CharacterError};
use crate::config::{constants, CharacterConfig};
use crate::damage::{segment_hits_sphere, DamageInfo, Damageable, HitWorld, MeleeHitReport, SweepHit};
use sim_core::{CollisionCategory, EntityId, Transform, Vec3};
use std::collections::BTreeMap;

/// All characters in play plus the global time-freeze flag
#[derive(Debug, Default)]
pub struct Arena {
    characters: BTreeMap<EntityId, Character>,
    next_id: u32,
    time_frozen: bool,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a character from `config` and place it at `transform`
    pub fn spawn(&mut self, config: &CharacterConfig, transform: Transform) -> Result<EntityId, CharacterError> {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        let character = Character::new(id, config)?.with_transform(transform);
        self.characters.insert(id, character);
        Ok(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    pub fn set_time_frozen(&mut self, frozen: bool) {
        self.time_frozen = frozen;
    }

    /// Let `id` swing its melee attack at everyone else
    pub fn melee_attack(&mut self, id: EntityId) -> Option<MeleeHitReport> {
        let mut attacker = self.characters.remove(&id)?;
        let report = attacker.request_melee_attack(self);
        self.characters.insert(id, attacker);
        report
    }

    /// Apply damage from outside any attack (falls, traps)
    pub fn apply_damage(&mut self, target: EntityId, info: &DamageInfo) -> bool {
        self.characters
            .get_mut(&target)
            .is_some_and(|character| character.take_damage(info))
    }

    /// Advance every character by `delta` seconds
    pub fn tick(&mut self, delta: f64) {
        for character in self.characters.values_mut() {
            character.tick(delta);
        }
    }
}

impl HitWorld for Arena {
    fn sweep_sphere(
        &self,
        start: Vec3,
        end: Vec3,
        radius: f32,
        category: CollisionCategory,
        ignore: EntityId,
    ) -> Vec<SweepHit> {
        // Characters are the only pawns in the arena
        if category != CollisionCategory::Pawn {
            return Vec::new();
        }

        let reach = radius + constants().movement.capsule_radius;
        let mut hits: Vec<(f32, SweepHit)> = self
            .characters
            .iter()
            .filter(|&(&id, character)| id != ignore && character.is_collision_enabled())
            .filter_map(|(&id, character)| {
                let center = character.transform().location;
                segment_hits_sphere(start, end, center, reach).map(|t| {
                    let hit = SweepHit {
                        target: id,
                        location: start.lerp(end, t),
                    };
                    (t, hit)
                })
            })
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits.into_iter().map(|(_, hit)| hit).collect()
    }

    fn damageable_mut(&mut self, id: EntityId) -> Option<&mut dyn Damageable> {
        self.characters
            .get_mut(&id)
            .map(|character| character as &mut dyn Damageable)
    }

    fn is_time_frozen(&self) -> bool {
        self.time_frozen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Cue;
    use pool_core::PooledObjectSpec;
    use sim_core::{AttackerKind, DamageResponse, DamageType};

    fn fighter(kind: AttackerKind) -> CharacterConfig {
        let mut config = CharacterConfig::new("fighter", kind);
        config.hit_effect = Some(PooledObjectSpec::new("hit_spark", "fx/hit_spark", 2).with_lifespan(0.5));
        config
    }

    fn at(x: f32) -> Transform {
        Transform::new(Vec3::new(x, 0.0, 0.0), Vec3::X)
    }

    #[test]
    fn test_sweep_orders_and_filters() {
        let mut arena = Arena::new();
        let hero = arena.spawn(&fighter(AttackerKind::PlayerSourced), at(0.0)).unwrap();
        let far = arena.spawn(&fighter(AttackerKind::AiSourced), at(90.0)).unwrap();
        let near = arena.spawn(&fighter(AttackerKind::AiSourced), at(40.0)).unwrap();
        arena.spawn(&fighter(AttackerKind::AiSourced), at(-200.0)).unwrap();

        let hits = arena.sweep_sphere(
            Vec3::ZERO,
            Vec3::new(100.0, 0.0, 0.0),
            20.0,
            CollisionCategory::Pawn,
            hero,
        );
        let targets: Vec<EntityId> = hits.iter().map(|h| h.target).collect();
        assert_eq!(targets, vec![near, far]);

        let none = arena.sweep_sphere(Vec3::ZERO, Vec3::X, 20.0, CollisionCategory::WorldStatic, hero);
        assert!(none.is_empty());
    }

    #[test]
    fn test_melee_attack_in_arena() {
        let mut arena = Arena::new();
        let hero = arena.spawn(&fighter(AttackerKind::PlayerSourced), at(0.0)).unwrap();
        let goblin = arena.spawn(&fighter(AttackerKind::AiSourced), at(50.0)).unwrap();

        let report = arena.melee_attack(hero).unwrap();
        assert_eq!(report.damaged, vec![goblin]);
        assert_eq!(arena.len(), 2);

        let goblin_ref = arena.get(goblin).unwrap();
        assert!((goblin_ref.current_health() - 90.0).abs() < f64::EPSILON);
        assert!(goblin_ref.state().is_hit());
        assert_eq!(arena.get(hero).unwrap().combo_count(), 1);
        assert_eq!(arena.get(hero).unwrap().pool().active_count("hit_spark"), 1);

        // The effect lives for half a second
        arena.tick(0.5);
        assert_eq!(arena.get(hero).unwrap().pool().active_count("hit_spark"), 0);
    }

    #[test]
    fn test_time_freeze_asymmetry() {
        let mut arena = Arena::new();
        let hero = arena.spawn(&fighter(AttackerKind::PlayerSourced), at(0.0)).unwrap();
        let goblin = arena.spawn(
            &fighter(AttackerKind::AiSourced),
            Transform::new(Vec3::new(50.0, 0.0, 0.0), -Vec3::X),
        )
        .unwrap();
        arena.set_time_frozen(true);

        // Player hit while frozen: no turn, no reaction cue
        arena.melee_attack(hero);
        let goblin_cues = arena.get_mut(goblin).unwrap().drain_cues();
        assert!(!goblin_cues.iter().any(|c| matches!(c, Cue::HitReaction { .. })));

        // AI hit while frozen still turns the player around
        arena.get_mut(hero).unwrap().set_transform(Transform::new(Vec3::ZERO, Vec3::Y));
        arena.melee_attack(goblin);
        let hero_ref = arena.get_mut(hero).unwrap();
        assert_eq!(hero_ref.transform().forward, Vec3::X);
        assert!(hero_ref
            .drain_cues()
            .iter()
            .any(|c| matches!(c, Cue::HitReaction { .. })));
    }

    #[test]
    fn test_dead_characters_are_not_targeted() {
        let mut arena = Arena::new();
        let hero = arena.spawn(&fighter(AttackerKind::PlayerSourced), at(0.0)).unwrap();
        let goblin = arena.spawn(&fighter(AttackerKind::AiSourced), at(50.0)).unwrap();

        let lethal = DamageInfo::new(1000.0, DamageType::Environment, DamageResponse::None);
        assert!(arena.apply_damage(goblin, &lethal));
        assert!(arena.get(goblin).unwrap().is_dead());

        let report = arena.melee_attack(hero).unwrap();
        assert!(report.damaged.is_empty());
        assert!(report.rejected.is_empty());
        assert!(!arena.apply_damage(goblin, &lethal));
    }

    #[test]
    fn test_dead_attacker_cannot_swing() {
        let mut arena = Arena::new();
        let hero = arena.spawn(&fighter(AttackerKind::PlayerSourced), at(0.0)).unwrap();
        arena.spawn(&fighter(AttackerKind::AiSourced), at(50.0)).unwrap();

        arena.get_mut(hero).unwrap().die();
        assert!(arena.melee_attack(hero).is_none());
        assert!(arena.melee_attack(EntityId(99)).is_none());
    }
}
