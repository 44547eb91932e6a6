//! Double-click debounce checker
//!
//! Tracks the timestamp of the last accepted event and reports whether a
//! new event arrives within a minimum interval. Used as a click guard by
//! instrumented UI handlers.

use crate::clock::Clock;
use tracing::trace;

/// Default minimum interval between accepted events (milliseconds)
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 500;

/// Debounce state for a stream of click events
///
/// The stored timestamp is overwritten on every check, so a burst of rapid
/// clicks keeps extending the suppression window.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Minimum interval between accepted events (milliseconds)
    min_interval_ms: u64,
    /// Timestamp of the last checked event (ms since epoch, 0 = never)
    last_event_ms: u64,
}

impl Debouncer {
    /// Create a debouncer with the default 500ms window
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_MIN_INTERVAL_MS)
    }

    /// Create a debouncer with a custom minimum interval
    pub fn with_interval(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_event_ms: 0,
        }
    }

    /// Check whether this event is a fast double-click
    ///
    /// Compares against the previous event's timestamp, then unconditionally
    /// records the current one. Returns true when the elapsed gap is shorter
    /// than the minimum interval.
    ///
    /// The initial timestamp is 0, so the first call after process start
    /// returns false (the elapsed gap is the full epoch offset). The only
    /// exception is a clock within the interval of the epoch itself, which
    /// does not occur on real systems.
    pub fn is_fast_double_click(&mut self, clock: &impl Clock) -> bool {
        let now = clock.now_millis();
        let elapsed = now.saturating_sub(self.last_event_ms);
        self.last_event_ms = now;

        let fast = elapsed < self.min_interval_ms;
        trace!(elapsed_ms = elapsed, fast, "debounce check");
        fast
    }

    /// Timestamp of the last checked event (ms since epoch)
    pub fn last_event_ms(&self) -> u64 {
        self.last_event_ms
    }

    /// Minimum interval between accepted events (milliseconds)
    pub fn min_interval_ms(&self) -> u64 {
        self.min_interval_ms
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
