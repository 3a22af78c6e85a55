//! Time budgets and search limits.
//!
//! A move request carries a millisecond budget. Search works against a
//! fixed fraction of it so that an iteration in progress can be abandoned
//! and the result still delivered inside the caller's window.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Share of the allotted budget that search may spend, in percent.
pub const SEARCH_BUDGET_PERCENT: u64 = 85;

/// Nodes between clock reads. Must be a power of two.
pub const CHECK_INTERVAL: u64 = 1024;

/// Converts a caller budget into the time search is allowed to use.
pub fn search_share(budget_ms: u64) -> Duration {
    Duration::from_millis(budget_ms.saturating_mul(SEARCH_BUDGET_PERCENT) / 100)
}

/// What an engine is allowed to spend on one move: a depth cap and,
/// optionally, a clock. Whichever runs out first ends the search.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Deepest iteration to attempt, in plies.
    pub max_depth: u8,
    /// The caller's budget for this move, before [`search_share`].
    pub move_time: Option<Duration>,
    pub time_control: TimeControl,
}

impl SearchLimits {
    /// No clock; stop at `max_depth`.
    pub fn depth(max_depth: u8) -> Self {
        Self::build(max_depth, None, None)
    }

    /// Searches for exactly `move_time`, with no reserve held back.
    pub fn with_move_time(max_depth: u8, move_time: Duration) -> Self {
        Self::build(max_depth, Some(move_time), Some(move_time))
    }

    /// The caller allows `budget_ms`; search itself gets
    /// [`SEARCH_BUDGET_PERCENT`] of that.
    pub fn budget(max_depth: u8, budget_ms: u64) -> Self {
        Self::build(
            max_depth,
            Some(Duration::from_millis(budget_ms)),
            Some(search_share(budget_ms)),
        )
    }

    fn build(max_depth: u8, move_time: Option<Duration>, limit: Option<Duration>) -> Self {
        Self {
            max_depth,
            move_time,
            time_control: TimeControl::new(limit),
        }
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.time_control.is_stopped()
    }

    /// Resets the clock to now.
    pub fn start(&mut self) {
        self.time_control.start();
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Clock for one search.
///
/// Clones share the stop flag: once any clone observes expiry, all of
/// them report stopped. The limit is the only way to end a search early.
#[derive(Debug, Clone)]
pub struct TimeControl {
    stop_flag: Arc<AtomicBool>,
    started: Instant,
    limit: Option<Duration>,
}

impl TimeControl {
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            stop_flag: Arc::new(AtomicBool::new(false)),
            started: Instant::now(),
            limit,
        }
    }

    pub fn start(&mut self) {
        self.started = Instant::now();
        self.stop_flag.store(false, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }

    /// Reads the clock; latches the stop flag once the limit has passed.
    pub fn check_time(&self) -> bool {
        if !self.is_stopped() && self.is_expired() {
            self.stop();
        }
        self.is_stopped()
    }

    /// Whether the limit has passed. Does not set the stop flag.
    pub fn is_expired(&self) -> bool {
        matches!(self.remaining(), Some(left) if left.is_zero())
    }

    /// True on every [`CHECK_INTERVAL`]th node.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes & (CHECK_INTERVAL - 1) == 0
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.limit
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.limit.map(|limit| limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
