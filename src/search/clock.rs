use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Source of elapsed time for cooperative deadline polling.
pub trait Clock {
    /// Time elapsed since the clock was started.
    fn elapsed(&self) -> Duration;
}

/// Wall clock started at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn start() -> Self { Self { start: Instant::now() } }
}

impl Default for SystemClock {
    fn default() -> Self { Self::start() }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration { self.start.elapsed() }
}

/// Deterministic clock for tests and benches.
///
/// Every poll returns the current reading and then advances it by `step`,
/// so a zero step freezes time and a non-zero step expires a deadline after
/// a known number of polls.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
    step: Duration,
    polls: Cell<u64>,
}

impl ManualClock {
    pub fn frozen() -> Self { Self::default() }

    pub fn stepping(step: Duration) -> Self {
        Self { step, ..Self::default() }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn polls(&self) -> u64 { self.polls.get() }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.step);
        self.polls.set(self.polls.get() + 1);
        now
    }
}

/// Hard stop for one search, polled before every cell, line and recursive step.
#[derive(Clone, Copy)]
pub struct Deadline<'c> {
    clock: &'c dyn Clock,
    limit: Duration,
}

impl<'c> Deadline<'c> {
    pub fn new(clock: &'c dyn Clock, limit: Duration) -> Self {
        Self { clock, limit }
    }

    /// Keeps `fraction` of `budget_ms` for searching and leaves the rest as headroom.
    pub fn from_budget(clock: &'c dyn Clock, budget_ms: i64, fraction: f64) -> Result<Self> {
        if budget_ms <= 0 {
            return Err(Error::InvalidTimeBudget { ms: budget_ms });
        }
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(Error::InvalidParams(format!("deadline fraction {fraction} not in (0, 1]")));
        }
        let limit = Duration::from_micros((budget_ms as f64 * fraction * 1000.0).round() as u64);
        Ok(Self::new(clock, limit))
    }

    pub fn expired(&self) -> bool {
        self.clock.elapsed() >= self.limit
    }

    pub fn limit(&self) -> Duration { self.limit }

    pub fn elapsed(&self) -> Duration { self.clock.elapsed() }
}
