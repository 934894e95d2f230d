//! Diagnostic output for estimator runs
//!
//! The estimator never prints directly. A verbose run pushes a header, one
//! record per iteration and a footer into a [`DiagnosticSink`]; the sink
//! decides where (and whether) that ends up. Quiet runs never touch the sink.

pub mod recording;
pub mod text;

pub use recording::{NullSink, RecordingSink};
pub use text::TextSink;

use crate::types::{IterationCount, IterationRecord, RunSummary};

/// Separator line written between iteration blocks
pub const SEPARATOR: &str = "-----------------------------------------------------------------";

/// Receiver of diagnostic events from a verbose run
///
/// Calls arrive in order: one `header`, zero or more `iteration`, one
/// `footer`. Sinks must not fail the run; output problems are the sink's own
/// business.
pub trait DiagnosticSink {
    /// Run is about to start
    fn header(&mut self, iterations: IterationCount);

    /// A term has been added to the running estimate
    fn iteration(&mut self, record: &IterationRecord);

    /// Run has finished
    fn footer(&mut self, summary: &RunSummary);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn header(&mut self, iterations: IterationCount) {
        (**self).header(iterations);
    }

    fn iteration(&mut self, record: &IterationRecord) {
        (**self).iteration(record);
    }

    fn footer(&mut self, summary: &RunSummary) {
        (**self).footer(summary);
    }
}

/// Fan out to two sinks, first one first
impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for (A, B) {
    fn header(&mut self, iterations: IterationCount) {
        self.0.header(iterations);
        self.1.header(iterations);
    }

    fn iteration(&mut self, record: &IterationRecord) {
        self.0.iteration(record);
        self.1.iteration(record);
    }

    fn footer(&mut self, summary: &RunSummary) {
        self.0.footer(summary);
        self.1.footer(summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_forwards_to_both() {
        let mut left = RecordingSink::new();
        let mut right = RecordingSink::new();
        {
            let mut pair = (&mut left, &mut right);
            pair.header(IterationCount::new(1));
            pair.iteration(&IterationRecord::new(1, 4.0));
            pair.footer(&RunSummary::new(IterationCount::new(1), 4.0));
        }
        assert_eq!(left.event_count(), 3);
        assert_eq!(right.event_count(), 3);
    }
}
