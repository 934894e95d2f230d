//! Plain-text diagnostic stream
//!
//! Renders the classic per-iteration block:
//!
//! ```text
//! Iteration 3:
//!   Estimate: 3.466666666666667
//!   Error:    0.32507401307687367
//! -----------------------------------------------------------------
//! ```

use super::{DiagnosticSink, SEPARATOR};
use crate::types::{IterationCount, IterationRecord, RunSummary};
use colored::*;
use std::io::{self, Write};

/// Sink that writes human-readable diagnostics to any writer
///
/// The first write failure is logged and kept; after that the sink goes
/// silent so the run itself can finish undisturbed.
pub struct TextSink<W: Write> {
    writer: W,
    color: bool,
    error: Option<io::Error>,
}

impl<W: Write> TextSink<W> {
    /// Create a text sink over a writer
    pub fn new(writer: W, color: bool) -> Self {
        Self {
            writer,
            color,
            error: None,
        }
    }

    /// Take the first write error, if any
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// True once a write has failed
    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_block(&mut self, lines: &[String]) {
        if self.error.is_some() {
            return;
        }

        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.writer, "{}", line))
            .and_then(|_| self.writer.flush());

        if let Err(e) = result {
            tracing::warn!(error = %e, "diagnostic output failed, suppressing further output");
            self.error = Some(e);
        }
    }

    fn separator(&self) -> String {
        if self.color {
            SEPARATOR.dimmed().to_string()
        } else {
            SEPARATOR.to_string()
        }
    }

    fn label(&self, text: String) -> String {
        if self.color {
            text.bold().cyan().to_string()
        } else {
            text
        }
    }

    fn error_value(&self, error: f64) -> String {
        if self.color {
            error.to_string().yellow().to_string()
        } else {
            error.to_string()
        }
    }
}

impl<W: Write> DiagnosticSink for TextSink<W> {
    fn header(&mut self, iterations: IterationCount) {
        let lines = [
            self.label(format!(
                "Estimating pi using the Leibniz series over {} iterations:",
                iterations
            )),
            self.separator(),
        ];
        self.write_block(&lines);
    }

    fn iteration(&mut self, record: &IterationRecord) {
        let lines = [
            self.label(format!("Iteration {}:", record.iteration)),
            format!("  Estimate: {}", record.estimate),
            format!("  Error:    {}", self.error_value(record.error)),
            self.separator(),
        ];
        self.write_block(&lines);
    }

    fn footer(&mut self, summary: &RunSummary) {
        let lines = [
            format!(
                "Final estimate of pi after {} iterations: {}",
                summary.iterations, summary.estimate
            ),
            format!("Final error: {}", self.error_value(summary.error)),
        ];
        self.write_block(&lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn render<F: FnOnce(&mut TextSink<Vec<u8>>)>(f: F) -> String {
        let mut sink = TextSink::new(Vec::new(), false);
        f(&mut sink);
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_header_names_method_and_count() {
        let out = render(|s| s.header(IterationCount::new(20)));
        assert!(out.starts_with("Estimating pi using the Leibniz series over 20 iterations:\n"));
        assert!(out.contains(SEPARATOR));
    }

    #[test]
    fn test_iteration_block_shape() {
        let out = render(|s| s.iteration(&IterationRecord::new(1, 4.0)));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Iteration 1:");
        assert_eq!(lines[1], "  Estimate: 4");
        assert!(lines[2].starts_with("  Error:    0.858"));
        assert_eq!(lines[3], SEPARATOR);
    }

    #[test]
    fn test_footer_reports_estimate_and_error() {
        let out = render(|s| s.footer(&RunSummary::new(IterationCount::new(0), 0.0)));
        assert!(out.contains("Final estimate of pi after 0 iterations: 0"));
        assert!(out.contains(&format!("Final error: {}", std::f64::consts::PI)));
    }

    #[test]
    fn test_write_failure_is_kept_not_raised() {
        let mut sink = TextSink::new(BrokenPipe, false);
        sink.header(IterationCount::new(3));
        sink.iteration(&IterationRecord::new(1, 4.0));
        assert!(sink.has_failed());
        let err = sink.take_error().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
