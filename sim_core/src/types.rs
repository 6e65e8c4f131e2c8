use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a world entity (character, prop, pooled object owner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a hit was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    #[default]
    Melee,
    Projectile,
    Explosion,
    /// Ambient sources such as burning grass
    Environment,
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageType::Melee => write!(f, "Melee"),
            DamageType::Projectile => write!(f, "Projectile"),
            DamageType::Explosion => write!(f, "Explosion"),
            DamageType::Environment => write!(f, "Environment"),
        }
    }
}

/// Reaction a hit asks the receiver to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DamageResponse {
    #[default]
    None,
    HitReaction,
    Stagger,
    Stun,
    KnockBack,
}

impl fmt::Display for DamageResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageResponse::None => write!(f, "None"),
            DamageResponse::HitReaction => write!(f, "HitReaction"),
            DamageResponse::Stagger => write!(f, "Stagger"),
            DamageResponse::Stun => write!(f, "Stun"),
            DamageResponse::KnockBack => write!(f, "KnockBack"),
        }
    }
}

/// Elemental affinity used by stat bonuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Physio,
    Pyro,
    Hydro,
    Cryo,
    Anemo,
    Electro,
    Geo,
    Photo,
    Erebo,
}

impl ElementType {
    /// Get all element variants
    pub fn all() -> &'static [ElementType] {
        &[
            ElementType::Physio,
            ElementType::Pyro,
            ElementType::Hydro,
            ElementType::Cryo,
            ElementType::Anemo,
            ElementType::Electro,
            ElementType::Geo,
            ElementType::Photo,
            ElementType::Erebo,
        ]
    }
}

/// Coarse locomotion state reported by the movement collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MovementState {
    #[default]
    None,
    Grounded,
    InAir,
}

/// Action tags gated by the state flags authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Move,
    Dodge,
    Attack,
    Skill,
}

impl Action {
    /// Get all action tags
    pub fn all() -> &'static [Action] {
        &[Action::Move, Action::Dodge, Action::Attack, Action::Skill]
    }
}

/// Input direction used for dodges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    None,
    Forward,
    Backward,
    Left,
    Right,
    ForwardLeft,
    ForwardRight,
    BackwardLeft,
    BackwardRight,
}

/// Who is behind an attack
///
/// Replaces runtime class inspection of the damage causer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttackerKind {
    PlayerSourced,
    AiSourced,
    #[default]
    Other,
}

/// Collision object category used to filter shape queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionCategory {
    /// Characters; the damageable category for melee sweeps
    #[default]
    Pawn,
    WorldStatic,
    WorldDynamic,
}

/// Location plus facing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub location: Vec3,
    /// Unit forward axis
    pub forward: Vec3,
}

impl Transform {
    pub fn new(location: Vec3, forward: Vec3) -> Self {
        Transform {
            location,
            forward: forward.normalize_or(Vec3::X),
        }
    }

    pub fn at(location: Vec3) -> Self {
        Transform::new(location, Vec3::X)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            location: Vec3::ZERO,
            forward: Vec3::X,
        }
    }
}
