//! Diagnostic sink contract gated by the `DISP_*` [`crate::Flags`] bits.
//!
//! An explicit, object-safe trait passed into [`crate::Analyzer::process`]
//! instead of a global print hook — no sink, no text, and the per-sample
//! hot path never has to check.

/// A line-oriented diagnostic sink. `emit` is best-effort: a full or slow
/// sink must never stall processing, so implementations should not block.
pub trait DiagnosticSink {
    /// Consume one line of diagnostic text (no trailing newline).
    fn emit(&mut self, line: &str);
}

#[cfg(feature = "std")]
mod format {
    use crate::SAMPLE_RATE;

    /// Render a sample index as `HH:MM:SS.mmm` at [`SAMPLE_RATE`].
    ///
    /// A pure function returning an owned `String` — no shared buffer, so
    /// concurrent callers never race.
    #[must_use]
    pub fn time_format(sample_index: u32) -> String {
        let total_ms = u64::from(sample_index) * 1000 / u64::from(SAMPLE_RATE);
        let milliseconds = total_ms % 1000;
        let total_seconds = total_ms / 1000;
        let seconds = total_seconds % 60;
        let total_minutes = total_seconds / 60;
        let minutes = total_minutes % 60;
        let hours = total_minutes / 60;
        format!("{hours:02}:{minutes:02}:{seconds:02}.{milliseconds:03}")
    }
}

#[cfg(feature = "std")]
pub use format::time_format;
