//! Character state flags and the actionable gate

use sim_core::{Action, MovementState};
use std::collections::HashSet;

/// Boolean and enum state of one character
///
/// `is_dead` is terminal: there is no way to clear it short of building a
/// new character.
#[derive(Debug, Clone)]
pub struct StateFlags {
    is_dead: bool,
    is_invincible: bool,
    is_hit: bool,
    movement_state: MovementState,
    actionable: HashSet<Action>,
}

impl Default for StateFlags {
    fn default() -> Self {
        StateFlags {
            is_dead: false,
            is_invincible: false,
            is_hit: false,
            movement_state: MovementState::Grounded,
            actionable: Action::all().iter().copied().collect(),
        }
    }
}

impl StateFlags {
    /// Grounded, alive, every action permitted
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Mark the character dead; irreversible
    pub fn set_dead(&mut self) {
        self.is_dead = true;
    }

    pub fn is_invincible(&self) -> bool {
        self.is_invincible
    }

    pub fn set_invincible(&mut self, invincible: bool) {
        self.is_invincible = invincible;
    }

    pub fn is_hit(&self) -> bool {
        self.is_hit
    }

    pub fn set_hit(&mut self, hit: bool) {
        self.is_hit = hit;
    }

    pub fn movement_state(&self) -> MovementState {
        self.movement_state
    }

    pub fn set_movement_state(&mut self, state: MovementState) {
        self.movement_state = state;
    }

    pub fn is_movement_state(&self, state: MovementState) -> bool {
        self.movement_state == state
    }

    /// Permit an action
    pub fn allow(&mut self, action: Action) {
        self.actionable.insert(action);
    }

    /// Deny an action until it is allowed again
    pub fn forbid(&mut self, action: Action) {
        self.actionable.remove(&action);
    }

    /// True only for permitted actions on a living character
    pub fn is_actionable(&self, action: Action) -> bool {
        !self.is_dead && self.actionable.contains(&action)
    }
}
