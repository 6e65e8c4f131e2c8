//! Health bookkeeping with change notifications

use super::CharacterStat;
use crate::config::constants;

/// Notifications raised by the ledger
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatEvent {
    /// Any write to the health point
    HealthChanged { previous: f64, current: f64 },
    /// Health crossed down to zero
    HealthZero,
}

/// Owns a character's stat block and applies health deltas
///
/// Health is always kept in `[0, max_health_point]`. Notifications are
/// queued and taken with `drain_events`.
#[derive(Debug, Clone)]
pub struct StatLedger {
    stat: CharacterStat,
    health_epsilon: f64,
    events: Vec<StatEvent>,
}

impl Default for StatLedger {
    fn default() -> Self {
        StatLedger::new(CharacterStat::default())
    }
}

impl StatLedger {
    /// Create a ledger at full health
    pub fn new(stat: CharacterStat) -> Self {
        let mut ledger = StatLedger {
            stat: CharacterStat::default(),
            health_epsilon: constants().health_epsilon,
            events: Vec::new(),
        };
        ledger.initialize(stat);
        ledger
    }

    /// Replace the stat block and refill health to max
    pub fn initialize(&mut self, stat: CharacterStat) {
        self.stat = stat;
        self.set_health_point(self.stat.max_health_point);
    }

    pub fn stat(&self) -> &CharacterStat {
        &self.stat
    }

    pub fn health_point(&self) -> f64 {
        self.stat.health_point
    }

    pub fn max_health_point(&self) -> f64 {
        self.stat.max_health_point
    }

    pub fn is_zero(&self) -> bool {
        self.stat.health_point == 0.0
    }

    /// Subtract `amount` from health, clamped to `[0, max]`
    ///
    /// Raises `HealthZero` only when this call takes health from above zero
    /// to zero. Negative or NaN amounts are treated as zero.
    pub fn apply_damage(&mut self, amount: f64) {
        let amount = if amount.is_nan() { 0.0 } else { amount.max(0.0) };
        let was_alive = self.stat.health_point > 0.0;

        let target = (self.stat.health_point - amount).clamp(0.0, self.stat.max_health_point);
        self.set_health_point(target);

        if was_alive && self.is_zero() {
            tracing::debug!("Health reached zero");
            self.events.push(StatEvent::HealthZero);
        }
    }

    /// Add `amount` to health, clamped to max; returns the amount actually healed
    pub fn heal(&mut self, amount: f64) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let previous = self.stat.health_point;
        self.set_health_point(previous + amount);
        self.stat.health_point - previous
    }

    /// Write health directly
    ///
    /// Values above max clamp to max, values under the health epsilon snap to 0.
    pub fn set_health_point(&mut self, value: f64) {
        let previous = self.stat.health_point;

        self.stat.health_point = if value > self.stat.max_health_point {
            self.stat.max_health_point
        } else if value < self.health_epsilon || value.is_nan() {
            0.0
        } else {
            value
        };

        self.events.push(StatEvent::HealthChanged {
            previous,
            current: self.stat.health_point,
        });
    }

    /// Take all notifications raised since the last drain
    pub fn drain_events(&mut self) -> Vec<StatEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ledger(max: f64) -> StatLedger {
        let mut ledger = StatLedger::new(CharacterStat::with_max_health(max));
        ledger.drain_events();
        ledger
    }

    fn count_zero(events: &[StatEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, StatEvent::HealthZero))
            .count()
    }

    #[test]
    fn test_initialize_fills_health() {
        let mut stat = CharacterStat::with_max_health(80.0);
        stat.health_point = 3.0;
        let mut ledger = StatLedger::new(stat);

        assert!((ledger.health_point() - 80.0).abs() < f64::EPSILON);
        assert_eq!(ledger.drain_events().len(), 1);
    }

    #[test]
    fn test_damage_and_clamp() {
        let mut ledger = ledger(100.0);

        ledger.apply_damage(30.0);
        assert!((ledger.health_point() - 70.0).abs() < f64::EPSILON);
        let events = ledger.drain_events();
        assert_eq!(
            events,
            vec![StatEvent::HealthChanged {
                previous: 100.0,
                current: 70.0
            }]
        );

        ledger.apply_damage(80.0);
        assert!((ledger.health_point() - 0.0).abs() < f64::EPSILON);
        let events = ledger.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(count_zero(&events), 1);
    }

    #[test]
    fn test_health_zero_is_edge_triggered() {
        let mut ledger = ledger(10.0);
        ledger.apply_damage(50.0);
        assert_eq!(count_zero(&ledger.drain_events()), 1);

        ledger.apply_damage(5.0);
        ledger.apply_damage(0.0);
        assert_eq!(count_zero(&ledger.drain_events()), 0);
    }

    #[test]
    fn test_heal_rearms_zero_edge() {
        let mut ledger = ledger(10.0);
        ledger.apply_damage(10.0);
        assert!((ledger.heal(4.0) - 4.0).abs() < f64::EPSILON);
        ledger.drain_events();

        ledger.apply_damage(4.0);
        assert_eq!(count_zero(&ledger.drain_events()), 1);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut ledger = ledger(100.0);
        ledger.apply_damage(10.0);

        assert!((ledger.heal(50.0) - 10.0).abs() < f64::EPSILON);
        assert!((ledger.heal(-5.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_health_snaps_tiny_values() {
        let mut ledger = ledger(100.0);
        ledger.set_health_point(1.0e-6);
        assert!(ledger.is_zero());

        ledger.set_health_point(500.0);
        assert!((ledger.health_point() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_damage_is_ignored() {
        let mut ledger = ledger(100.0);
        ledger.apply_damage(-25.0);
        assert!((ledger.health_point() - 100.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_range(
            max in 1.0f64..10_000.0,
            hits in proptest::collection::vec(0.0f64..5_000.0, 0..20),
        ) {
            let mut ledger = ledger(max);
            for amount in hits {
                ledger.apply_damage(amount);
                prop_assert!(ledger.health_point() >= 0.0);
                prop_assert!(ledger.health_point() <= max);
            }
        }

        #[test]
        fn prop_zero_fires_at_most_once(
            hits in proptest::collection::vec(0.0f64..200.0, 1..30),
        ) {
            let mut ledger = ledger(100.0);
            for amount in hits {
                ledger.apply_damage(amount);
            }
            prop_assert!(count_zero(&ledger.drain_events()) <= 1);
        }
    }
}
