//! Cooldown policies injected into skills

use sim_core::TIME_EPSILON;
use std::fmt;

/// Cooldown behaviour of a skill
///
/// The default methods describe a skill that never cools down.
pub trait CooldownPolicy: fmt::Debug {
    /// Called on every successful activation
    fn start(&mut self, _now: f64) {}

    fn is_cooldown(&self, _now: f64) -> bool {
        false
    }

    /// Seconds until the skill is ready again
    fn remaining(&self, _now: f64) -> f64 {
        0.0
    }

    fn remaining_ratio(&self, _now: f64) -> f64 {
        0.0
    }

    /// Seconds since the running cooldown started
    fn elapsed(&self, _now: f64) -> f64 {
        0.0
    }

    fn elapsed_ratio(&self, _now: f64) -> f64 {
        0.0
    }
}

/// Always immediately re-activatable
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCooldown;

impl CooldownPolicy for NoCooldown {}

/// Fixed-length cooldown started at activation
#[derive(Debug, Clone, Copy)]
pub struct TimedCooldown {
    duration: f64,
    started_at: Option<f64>,
}

impl TimedCooldown {
    pub fn new(duration: f64) -> Self {
        TimedCooldown {
            duration: duration.max(0.0),
            started_at: None,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    fn ends_at(&self) -> Option<f64> {
        self.started_at.map(|start| start + self.duration)
    }
}

impl CooldownPolicy for TimedCooldown {
    fn start(&mut self, now: f64) {
        self.started_at = Some(now);
    }

    fn is_cooldown(&self, now: f64) -> bool {
        self.remaining(now) > 0.0
    }

    /// Within `TIME_EPSILON` of the end counts as finished, matching the scheduler
    fn remaining(&self, now: f64) -> f64 {
        match self.ends_at() {
            Some(end) if end - now > TIME_EPSILON => end - now,
            _ => 0.0,
        }
    }

    fn remaining_ratio(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        self.remaining(now) / self.duration
    }

    fn elapsed(&self, now: f64) -> f64 {
        match self.started_at {
            Some(start) if self.is_cooldown(now) => now - start,
            _ => 0.0,
        }
    }

    fn elapsed_ratio(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        self.elapsed(now) / self.duration
    }
}

/// Pick the policy for a configured cooldown length
pub fn policy_for(cooldown: f64) -> Box<dyn CooldownPolicy> {
    if cooldown > 0.0 {
        Box::new(TimedCooldown::new(cooldown))
    } else {
        Box::new(NoCooldown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_cooldown_reports_ready() {
        let mut policy = NoCooldown;
        policy.start(0.0);
        assert!(!policy.is_cooldown(0.0));
        assert!((policy.remaining(0.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_timed_cooldown_queries() {
        let mut policy = TimedCooldown::new(4.0);
        assert!(!policy.is_cooldown(0.0));

        policy.start(1.0);
        assert!(policy.is_cooldown(2.0));
        assert!((policy.remaining(2.0) - 3.0).abs() < 1e-9);
        assert!((policy.remaining_ratio(2.0) - 0.75).abs() < 1e-9);
        assert!((policy.elapsed(2.0) - 1.0).abs() < 1e-9);
        assert!((policy.elapsed_ratio(2.0) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_timed_cooldown_finishes() {
        let mut policy = TimedCooldown::new(1.0);
        policy.start(0.0);

        assert!(!policy.is_cooldown(1.0));
        assert!((policy.remaining(5.0) - 0.0).abs() < f64::EPSILON);
        assert!((policy.elapsed(5.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_timed_cooldown_ends_with_accumulated_ticks() {
        let mut policy = TimedCooldown::new(1.0);
        policy.start(0.0);

        let mut now = 0.0;
        for _ in 0..10 {
            now += 0.1;
        }
        assert!(now < 1.0);
        assert!(!policy.is_cooldown(now));
        assert!((policy.remaining(now) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_policy_for() {
        assert!(!policy_for(0.0).is_cooldown(0.0));

        let mut timed = policy_for(2.0);
        timed.start(0.0);
        assert!(timed.is_cooldown(1.0));
    }
}
