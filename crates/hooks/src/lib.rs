//! Injected runtime hooks for ByteLego instrumentation
//!
//! This crate provides:
//! - Wall-clock abstraction (system + manual clocks)
//! - Double-click debounce checker (500ms default window)
//! - Method enter/exit timing hooks keyed by a configuration index
//! - Report sinks for elapsed-time output
//!
//! The bytecode injection host is an external collaborator: at build time
//! it rewrites target methods to call [`MethodHooks::on_method_enter_indexed`]
//! and [`MethodHooks::on_method_exit_indexed`] with the index of the rule
//! that matched the call site.

pub mod clock;
pub mod debounce;
pub mod hook;
pub mod report;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::Debouncer;
pub use hook::{HookAction, MethodHooks};
pub use report::{MemorySink, ReportSink, StdoutSink};
