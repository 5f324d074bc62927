//! Flag words for [`crate::Analyzer::process`]: the sensitivity/diagnostic/
//! output-selection bitfield taken by the call, and the detection bitmask
//! it returns.

use bitflags::bitflags;

bitflags! {
    /// Behavior-selecting bitfield passed to [`crate::Analyzer::process`].
    ///
    /// Mirrors the `SCAN_*` macros of the original C implementation
    /// one-for-one (`spec.md` §6).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        /// Use the high-sensitivity knock/ring tuning (`R=1.2, S=1.25, K=0.75`)
        /// instead of the low-sensitivity default (`R=1.1, S=1.5, K=0.5`).
        const HIGH_SENSITIVITY = 0x001;
        /// Emit a diagnostic line with the current peak thresholds every 10 s.
        const DISP_THRESHOLDS  = 0x002;
        /// Emit a diagnostic line on detections, buffer-full, and overflow.
        const DISP_EVENTS      = 0x004;
        /// Emit a diagnostic line for every peak accepted into the buffer.
        const DISP_PEAKS       = 0x008;
        /// Append the decorrelated sample to the output buffer.
        const OUT_DECORR_AUDIO = 0x010;
        /// Append the rounded magnitude-tracker level to the output buffer.
        const OUT_DECORR_LEVEL = 0x020;
        /// Append the (clipped) normalized sample to the output buffer.
        const OUT_NORMAL_AUDIO = 0x040;
        /// Append the signed window-energy level to the output buffer.
        const OUT_WINDOW_LEVEL = 0x080;
        /// Append the (clipped) bell-biquad output to the output buffer.
        const OUT_FILTER_AUDIO = 0x100;
        /// Append the rounded bell filtered-level average to the output buffer.
        const OUT_FILTER_LEVEL = 0x200;
    }
}

impl Flags {
    /// Count of output streams selected by the `OUT_*` bits — the caller
    /// must size `out` to `num_samples * output_stream_count()`.
    #[must_use]
    pub fn output_stream_count(self) -> usize {
        (self & Self::ALL_OUTPUTS).bits().count_ones() as usize
    }

    /// Union of every `OUT_*` bit.
    pub const ALL_OUTPUTS: Self = Self::OUT_DECORR_AUDIO
        .union(Self::OUT_DECORR_LEVEL)
        .union(Self::OUT_NORMAL_AUDIO)
        .union(Self::OUT_WINDOW_LEVEL)
        .union(Self::OUT_FILTER_AUDIO)
        .union(Self::OUT_FILTER_LEVEL);
}

bitflags! {
    /// Detection mask returned by [`crate::Analyzer::process`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Detections: u32 {
        /// A door-knock triplet was detected in this block.
        const KNOCK = 0x1;
        /// A doorbell ring was detected in this block.
        const RING  = 0x2;
    }
}
