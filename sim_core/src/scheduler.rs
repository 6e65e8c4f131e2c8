//! Tick-driven timer queue
//!
//! All deferred work in the simulation (skill durations, pooled object
//! lifespans, input debounce) is a payload parked here until the clock
//! reaches its deadline. Handles are never reused, so a stale handle can
//! never cancel or inspect a newer timer.

use serde::{Deserialize, Serialize};

/// Deadlines within this distance of `now` are treated as reached
pub const TIME_EPSILON: f64 = 1e-9;

/// Opaque handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct PendingTimer<T> {
    handle: TimerHandle,
    started_at: f64,
    deadline: f64,
    payload: T,
}

/// Single-threaded timer queue advanced by the simulation tick
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: f64,
    next_handle: u64,
    pending: Vec<PendingTimer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Scheduler {
            now: 0.0,
            next_handle: 1,
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at t = 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Park `payload` until `delay` seconds from now
    ///
    /// Negative delays are treated as zero; a zero delay fires on the next advance.
    pub fn schedule(&mut self, delay: f64, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(PendingTimer {
            handle,
            started_at: self.now,
            deadline: self.now + delay.max(0.0),
            payload,
        });
        handle
    }

    /// Cancel a pending timer
    ///
    /// Returns true if the timer was still pending. Cancelling a fired or
    /// already cancelled timer is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.pending.iter().position(|t| t.handle == handle) {
            Some(index) => {
                self.pending.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether the timer is still waiting to fire
    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    /// Seconds until the timer fires, or None if it is not pending
    pub fn remaining(&self, handle: TimerHandle) -> Option<f64> {
        self.find(handle).map(|t| (t.deadline - self.now).max(0.0))
    }

    /// Seconds since the timer was scheduled, or None if it is not pending
    pub fn elapsed(&self, handle: TimerHandle) -> Option<f64> {
        self.find(handle).map(|t| self.now - t.started_at)
    }

    /// Number of timers waiting to fire
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drop every pending timer without firing it
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Advance the clock by `delta` seconds and return the payloads that came due
    ///
    /// Payloads are returned in deadline order (ties broken by scheduling
    /// order). Each timer fires exactly once and is removed before returning.
    pub fn advance(&mut self, delta: f64) -> Vec<T> {
        self.now += delta.max(0.0);

        let now = self.now;
        let mut due = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].deadline <= now + TIME_EPSILON {
                due.push(self.pending.swap_remove(index));
            } else {
                index += 1;
            }
        }

        due.sort_by(|a, b| {
            a.deadline
                .total_cmp(&b.deadline)
                .then_with(|| a.handle.0.cmp(&b.handle.0))
        });
        due.into_iter().map(|t| t.payload).collect()
    }

    fn find(&self, handle: TimerHandle) -> Option<&PendingTimer<T>> {
        self.pending.iter().find(|t| t.handle == handle)
    }
}
