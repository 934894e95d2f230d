//! In-memory and discarding sinks

use super::DiagnosticSink;
use crate::types::{IterationCount, IterationRecord, RunSummary};

/// Sink that keeps everything it is given
///
/// Used for convergence analysis and JSON reports, and by tests to observe
/// exactly which diagnostics a run produced.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    headers: Vec<IterationCount>,
    records: Vec<IterationRecord>,
    summary: Option<RunSummary>,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Iteration counts announced by headers
    pub fn headers(&self) -> &[IterationCount] {
        &self.headers
    }

    /// Per-iteration records in arrival order
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    /// Footer of the last run, if one finished
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// Total number of events received
    pub fn event_count(&self) -> usize {
        self.headers.len() + self.records.len() + usize::from(self.summary.is_some())
    }

    /// True if nothing was ever received
    pub fn is_empty(&self) -> bool {
        self.event_count() == 0
    }
}

impl DiagnosticSink for RecordingSink {
    fn header(&mut self, iterations: IterationCount) {
        self.headers.push(iterations);
    }

    fn iteration(&mut self, record: &IterationRecord) {
        self.records.push(*record);
    }

    fn footer(&mut self, summary: &RunSummary) {
        self.summary = Some(*summary);
    }
}

/// Sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn header(&mut self, _iterations: IterationCount) {}

    fn iteration(&mut self, _record: &IterationRecord) {}

    fn footer(&mut self, _summary: &RunSummary) {}
}
