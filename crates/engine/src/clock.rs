//! Fall timer bookkeeping for the engine loop.
//!
//! The clock only tracks a deadline; the loop sleeps on it. It is armed while
//! the session is `Running` and restarts from a full interval whenever the
//! session starts or resumes, a new piece spawns, or the level changes. The
//! loop also calls [`FallClock::restart`] after every accepted player command.

use tokio::time::{Duration, Instant};

use crate::types::Phase;

/// Session facts the countdown depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub session_id: u32,
    pub piece_id: u32,
    pub level: u32,
    pub interval_ms: u32,
}

#[derive(Debug, Clone, Default)]
pub struct FallClock {
    deadline: Option<Instant>,
    cadence: Option<Cadence>,
}

impl FallClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Reconcile with the session after any state change.
    pub fn sync(&mut self, phase: Phase, cadence: Cadence, now: Instant) {
        if phase != Phase::Running {
            self.deadline = None;
            self.cadence = None;
            return;
        }

        if self.deadline.is_none() || self.cadence != Some(cadence) {
            self.cadence = Some(cadence);
            self.deadline = Some(now + interval(cadence));
        }
    }

    /// Start a full interval from `now` if armed.
    pub fn restart(&mut self, now: Instant) {
        if let Some(cadence) = self.cadence {
            self.deadline = Some(now + interval(cadence));
        }
    }

    /// Called when the deadline elapsed; schedules the following step.
    pub fn fired(&mut self, now: Instant) {
        self.restart(now);
    }
}

fn interval(cadence: Cadence) -> Duration {
    Duration::from_millis(cadence.interval_ms as u64)
}
