//! Method enter/exit timing hooks
//!
//! The instrumentation host injects calls to the two entry points at the
//! boundaries of matched methods, passing the index of the rule that
//! matched the call site. Each index selects one behavior:
//!
//! - 0: time the method ("create timing")
//! - 1: report elapsed time on exit only ("activity method timing")
//! - 2: run the debounce check on entry
//!
//! The start timestamp and debounce state live in an explicit
//! [`MethodHooks`] context owned by the host rather than process-wide
//! statics, so concurrent hosts each thread their own.

use crate::clock::Clock;
use crate::debounce::Debouncer;
use crate::report::ReportSink;
use tracing::debug;

/// Behavior selected by a configuration index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum HookAction {
    /// Capture a start timestamp on entry, report elapsed on exit
    TimedCreate = 0,
    /// Report elapsed on exit only, against the last-set start timestamp
    TimedActivity = 1,
    /// Run the debounce check on entry; nothing on exit
    DebounceGuard = 2,
}

impl HookAction {
    /// Map a raw configuration index to an action
    ///
    /// Unknown indices mean the call site matched a rule this runtime has
    /// no behavior for, and are ignored by the indexed entry points.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::TimedCreate),
            1 => Some(Self::TimedActivity),
            2 => Some(Self::DebounceGuard),
            _ => None,
        }
    }

    /// Report label for the exit-side report, if this action emits one
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::TimedCreate => Some("create timing"),
            Self::TimedActivity => Some("activity method timing"),
            Self::DebounceGuard => None,
        }
    }
}

/// Per-host hook state: one start timestamp and one debounce guard
///
/// Enter/exit pairs for a given context must run sequentially; hosts that
/// instrument concurrent methods use one context per thread.
#[derive(Debug, Clone, Default)]
pub struct MethodHooks {
    /// Start timestamp set by the last TimedCreate entry (ms since epoch)
    start_ms: u64,
    /// Shared click guard for DebounceGuard call sites
    debouncer: Debouncer,
}

impl MethodHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom debounce window instead of the 500ms default
    pub fn with_debouncer(debouncer: Debouncer) -> Self {
        Self {
            start_ms: 0,
            debouncer,
        }
    }

    /// Entry hook for an instrumented method
    pub fn on_method_enter(&mut self, action: HookAction, clock: &impl Clock) {
        match action {
            HookAction::TimedCreate => {
                self.start_ms = clock.now_millis();
                debug!(start_ms = self.start_ms, "timing started");
            }
            HookAction::DebounceGuard => {
                // Side effect only: refresh the last-event timestamp
                let _ = self.debouncer.is_fast_double_click(clock);
            }
            HookAction::TimedActivity => {}
        }
    }

    /// Exit hook for an instrumented method
    ///
    /// `TimedActivity` has no entry-side capture: its report measures
    /// against whatever start timestamp a prior `TimedCreate` entry set,
    /// possibly from an unrelated method. The two actions share one
    /// timing scope.
    pub fn on_method_exit(&mut self, action: HookAction, clock: &impl Clock, sink: &mut impl ReportSink) {
        let Some(label) = action.label() else {
            return;
        };
        let elapsed_ms = clock.now_millis().saturating_sub(self.start_ms);
        debug!(label, elapsed_ms, "timing reported");
        sink.emit(label, elapsed_ms);
    }

    /// Entry hook taking the raw configuration index from the host
    ///
    /// Unknown indices are a no-op.
    pub fn on_method_enter_indexed(&mut self, config_index: i64, clock: &impl Clock) {
        if let Some(action) = HookAction::from_index(config_index) {
            self.on_method_enter(action, clock);
        }
    }

    /// Exit hook taking the raw configuration index from the host
    ///
    /// Unknown indices are a no-op.
    pub fn on_method_exit_indexed(
        &mut self,
        config_index: i64,
        clock: &impl Clock,
        sink: &mut impl ReportSink,
    ) {
        if let Some(action) = HookAction::from_index(config_index) {
            self.on_method_exit(action, clock, sink);
        }
    }

    /// Start timestamp set by the last TimedCreate entry (ms since epoch)
    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    /// The debounce guard backing DebounceGuard call sites
    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, SystemClock};
    use crate::report::MemorySink;

    #[test]
    fn test_action_index_mapping() {
        assert_eq!(HookAction::from_index(0), Some(HookAction::TimedCreate));
        assert_eq!(HookAction::from_index(1), Some(HookAction::TimedActivity));
        assert_eq!(HookAction::from_index(2), Some(HookAction::DebounceGuard));
        assert_eq!(HookAction::from_index(3), None);
        assert_eq!(HookAction::from_index(-1), None);
    }

    #[test]
    fn test_timed_create_reports_elapsed() {
        let clock = ManualClock::new(1_700_000_000_000);
        let mut hooks = MethodHooks::new();
        let mut sink = MemorySink::new();

        hooks.on_method_enter(HookAction::TimedCreate, &clock);
        clock.advance(120);
        hooks.on_method_exit(HookAction::TimedCreate, &clock, &mut sink);

        assert_eq!(sink.reports(), &[("create timing".to_string(), 120)]);
    }

    #[test]
    fn test_immediate_exit_reports_zero_with_real_clock() {
        let clock = SystemClock;
        let mut hooks = MethodHooks::new();
        let mut sink = MemorySink::new();

        hooks.on_method_enter(HookAction::TimedCreate, &clock);
        hooks.on_method_exit(HookAction::TimedCreate, &clock, &mut sink);

        // Approximately zero, and saturating_sub keeps it non-negative
        // even if the realtime clock steps backwards in between.
        let (_, elapsed) = &sink.reports()[0];
        assert!(*elapsed < 100);
    }

    #[test]
    fn test_activity_exit_reads_last_set_start() {
        let clock = ManualClock::new(1_700_000_000_000);
        let mut hooks = MethodHooks::new();
        let mut sink = MemorySink::new();

        // A prior TimedCreate entry sets the shared start timestamp.
        hooks.on_method_enter(HookAction::TimedCreate, &clock);
        clock.advance(50);

        // TimedActivity has no entry-side capture: entry is a no-op and
        // the exit measures against the timestamp above.
        hooks.on_method_enter(HookAction::TimedActivity, &clock);
        clock.advance(30);
        hooks.on_method_exit(HookAction::TimedActivity, &clock, &mut sink);

        assert_eq!(
            sink.reports(),
            &[("activity method timing".to_string(), 80)]
        );
    }

    #[test]
    fn test_activity_exit_with_no_capture_measures_from_epoch() {
        let clock = ManualClock::new(1_000_000);
        let mut hooks = MethodHooks::new();
        let mut sink = MemorySink::new();

        hooks.on_method_exit(HookAction::TimedActivity, &clock, &mut sink);

        // Nothing ever set the start timestamp, so the report spans the
        // whole epoch offset.
        assert_eq!(
            sink.reports(),
            &[("activity method timing".to_string(), 1_000_000)]
        );
    }

    #[test]
    fn test_debounce_guard_matches_direct_check() {
        let clock = ManualClock::new(1_700_000_000_000);

        let mut hooks = MethodHooks::new();
        hooks.on_method_enter(HookAction::DebounceGuard, &clock);

        let mut direct = Debouncer::new();
        direct.is_fast_double_click(&clock);

        assert_eq!(hooks.debouncer().last_event_ms(), direct.last_event_ms());
    }

    #[test]
    fn test_debounce_guard_exit_is_silent() {
        let clock = ManualClock::new(1_700_000_000_000);
        let mut hooks = MethodHooks::new();
        let mut sink = MemorySink::new();

        hooks.on_method_enter(HookAction::DebounceGuard, &clock);
        hooks.on_method_exit(HookAction::DebounceGuard, &clock, &mut sink);

        assert!(sink.reports().is_empty());
    }

    #[test]
    fn test_unknown_index_is_a_no_op() {
        let clock = ManualClock::new(1_700_000_000_000);
        let mut hooks = MethodHooks::new();
        let mut sink = MemorySink::new();

        hooks.on_method_enter_indexed(7, &clock);
        hooks.on_method_exit_indexed(7, &clock, &mut sink);

        assert_eq!(hooks.start_ms(), 0);
        assert_eq!(hooks.debouncer().last_event_ms(), 0);
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn test_indexed_wrappers_match_actions() {
        let clock = ManualClock::new(1_700_000_000_000);
        let mut hooks = MethodHooks::new();
        let mut sink = MemorySink::new();

        hooks.on_method_enter_indexed(0, &clock);
        clock.advance(42);
        hooks.on_method_exit_indexed(0, &clock, &mut sink);

        assert_eq!(sink.reports(), &[("create timing".to_string(), 42)]);
    }
}
