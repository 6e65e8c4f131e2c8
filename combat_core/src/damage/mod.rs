//! Damage values, the damageable capability and melee hit resolution

mod pipeline;
mod sweep;

pub use pipeline::{resolve_melee_hit, HitWorld, MeleeHitReport, SweepHit};
pub use sweep::{closest_point_on_segment, segment_hits_sphere};

use sim_core::{AttackerKind, DamageResponse, DamageType, EntityId, Vec3};

/// Snapshot of the attacker taken when a hit is built
///
/// The receiver reacts to this instead of looking the attacker up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInstigator {
    pub id: EntityId,
    pub kind: AttackerKind,
    /// Attacker's facing at the moment of the hit
    pub forward: Vec3,
    /// Global time freeze was in effect when the hit was resolved
    pub time_frozen: bool,
}

/// One hit worth of damage, consumed by a single `take_damage` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageInfo {
    pub amount: f64,
    pub damage_type: DamageType,
    pub damage_response: DamageResponse,
    pub critical: bool,
    pub instigator: Option<HitInstigator>,
}

impl DamageInfo {
    /// Anonymous damage; negative amounts become 0
    pub fn new(amount: f64, damage_type: DamageType, damage_response: DamageResponse) -> Self {
        DamageInfo {
            amount: amount.max(0.0),
            damage_type,
            damage_response,
            critical: false,
            instigator: None,
        }
    }

    pub fn with_instigator(mut self, instigator: HitInstigator) -> Self {
        self.instigator = Some(instigator);
        self
    }
}

impl Default for DamageInfo {
    fn default() -> Self {
        DamageInfo::new(0.0, DamageType::Melee, DamageResponse::None)
    }
}

/// Anything that can take part in damage resolution
pub trait Damageable {
    fn current_health(&self) -> f64;

    fn max_health(&self) -> f64;

    /// Restore health; returns the amount actually healed
    fn heal(&mut self, amount: f64) -> f64;

    /// Apply a hit; returns false if the target refused it
    fn take_damage(&mut self, info: &DamageInfo) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_amount_clamps() {
        let info = DamageInfo::new(-5.0, DamageType::Environment, DamageResponse::None);
        assert!((info.amount - 0.0).abs() < f64::EPSILON);
        assert!(info.instigator.is_none());
    }

    #[test]
    fn test_with_instigator() {
        let instigator = HitInstigator {
            id: EntityId(3),
            kind: AttackerKind::AiSourced,
            forward: Vec3::X,
            time_frozen: false,
        };
        let info = DamageInfo::new(10.0, DamageType::Melee, DamageResponse::Stagger)
            .with_instigator(instigator);
        assert_eq!(info.instigator.unwrap().id, EntityId(3));
    }
}
