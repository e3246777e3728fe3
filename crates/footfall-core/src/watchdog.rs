//! Fixed-threshold failure watchdog.
//!
//! Counts consecutive fetch failures. Any success clears the count; the
//! failure that brings it to the limit asks for a device restart. There is
//! no backoff and no distinction between error kinds.

use tracing::debug;

/// Consecutive failures tolerated before a restart, unless configured otherwise.
pub const DEFAULT_FAILURE_LIMIT: u32 = 5;

/// What the caller should do after recording a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Keep polling.
    Continue,
    /// The limit was reached: clear the sign and restart.
    Reset,
}

/// Consecutive-failure counter with a fixed limit.
#[derive(Debug, Clone)]
pub struct Watchdog {
    failures: u32,
    limit: u32,
}

impl Watchdog {
    /// Create a watchdog that trips on the `limit`-th consecutive failure.
    ///
    /// A limit of zero is treated as one; configuration rejects zero before
    /// it gets here.
    pub fn new(limit: u32) -> Self {
        Self {
            failures: 0,
            limit: limit.max(1),
        }
    }

    /// Current consecutive failure count.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// A fetch succeeded.
    pub fn record_success(&mut self) {
        if self.failures > 0 {
            debug!(previous_failures = self.failures, "watchdog cleared");
        }
        self.failures = 0;
    }

    /// A fetch failed. Saturates at the limit: once tripped, every further
    /// failure keeps answering [`Verdict::Reset`].
    pub fn record_failure(&mut self) -> Verdict {
        self.failures = (self.failures + 1).min(self.limit);
        debug!(failures = self.failures, limit = self.limit, "watchdog failure");
        if self.failures >= self.limit {
            Verdict::Reset
        } else {
            Verdict::Continue
        }
    }
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_LIMIT)
    }
}
