//! A [`DiagnosticSink`] that forwards lines to `tracing`.

use knockdog_core::DiagnosticSink;

/// Forwards every diagnostic line to the `tracing` subscriber at `debug`
/// level, under the `knockdog_io::diagnostics` target.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, line: &str) {
        tracing::debug!(target: "knockdog_io::diagnostics", "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_does_not_panic() {
        let mut sink = TracingSink::new();
        sink.emit("peak accepted height=120 width=9");
    }
}
