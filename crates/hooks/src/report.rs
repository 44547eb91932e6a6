//! Elapsed-time report sinks
//!
//! The exit hook emits one `"<label> = <elapsed_ms>"` line per qualifying
//! call. The sink is a collaborator supplied by the host so instrumented
//! builds can route reports to stdout, a logger, or a test buffer.

/// Destination for elapsed-time reports
pub trait ReportSink {
    /// Emit one report line for a completed timing
    fn emit(&mut self, label: &str, elapsed_ms: u64);
}

/// Prints reports to stdout, one line per report
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&mut self, label: &str, elapsed_ms: u64) {
        println!("{} = {}", label, elapsed_ms);
    }
}

/// Collects reports in memory (tests, trace simulation)
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Vec<(String, u64)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports emitted so far, in order
    pub fn reports(&self) -> &[(String, u64)] {
        &self.reports
    }

    /// Reports rendered in the stdout line format
    pub fn lines(&self) -> Vec<String> {
        self.reports
            .iter()
            .map(|(label, elapsed)| format!("{} = {}", label, elapsed))
            .collect()
    }
}

impl ReportSink for MemorySink {
    fn emit(&mut self, label: &str, elapsed_ms: u64) {
        self.reports.push((label.to_string(), elapsed_ms));
    }
}
