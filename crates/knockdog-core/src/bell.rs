//! Bell resonator (`spec.md` §4.5).
//!
//! A narrow bandpass biquad tuned to the doorbell's fundamental frequency,
//! feeding its own exponentially-averaged magnitude. A true bell keeps this
//! level elevated for hundreds of milliseconds after the initial transient;
//! a broadband bang does not, which is what [`crate::decision`]'s ring rule
//! relies on.

use crate::biquad::Biquad;

/// Default coefficients: 770 Hz fundamental, Q ≈ 100, gain 4 pre-multiplied
/// into `b0`/`b2` (`spec.md` §4.5). Measured from a real doorbell's "ding"
/// by the original implementation; a 785 Hz wireless-doorbell variant was
/// also measured but is not wired up here (no caller ever selected it).
pub const DEFAULT_B0: f32 = 0.005_946_974;
pub const DEFAULT_B1: f32 = 0.0;
pub const DEFAULT_B2: f32 = -0.005_946_974;
pub const DEFAULT_A1: f32 = -1.906_423_326;
pub const DEFAULT_A2: f32 = 0.997_026_513;

/// Coefficients for a 785 Hz wireless doorbell "ding", Q = 100, gain 4
/// pre-multiplied — measured from a second unit and carried in the original
/// scanner as a commented-out alternative, never wired to a caller.
pub const WIRELESS_785_B0: f32 = 0.006_058_998;
pub const WIRELESS_785_B1: f32 = 0.0;
pub const WIRELESS_785_B2: f32 = -0.006_058_998;
pub const WIRELESS_785_A1: f32 = -1.902_833_843_596_374_5;
pub const WIRELESS_785_A2: f32 = 0.996_970_501_089_755_4;

/// Clip bound applied when the biquad output is requested as a diagnostic stream.
const CLIP: f32 = 32760.0;

/// Selects which doorbell fundamental the resonator is tuned to.
///
/// The original scanner only ever measured and wired up the 770 Hz "ding";
/// the 785 Hz wireless-doorbell variant is carried here as a selectable
/// alternative, configurable via `knockdog-config` presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BellTuning {
    /// 770 Hz fundamental, Q ≈ 100 (wired doorbell "ding").
    #[default]
    Default770,
    /// 785 Hz fundamental, Q ≈ 100 (wireless doorbell "ding").
    Wireless785,
}

impl BellTuning {
    /// The biquad coefficients `(b0, b1, b2, a1, a2)` for this tuning.
    #[must_use]
    pub fn coefficients(self) -> (f32, f32, f32, f32, f32) {
        match self {
            BellTuning::Default770 => (DEFAULT_B0, DEFAULT_B1, DEFAULT_B2, DEFAULT_A1, DEFAULT_A2),
            BellTuning::Wireless785 => (WIRELESS_785_B0, WIRELESS_785_B1, WIRELESS_785_B2, WIRELESS_785_A1, WIRELESS_785_A2),
        }
    }
}

/// Bandpass resonator + its own exponential magnitude average.
#[derive(Debug, Clone, Copy)]
pub struct BellResonator {
    biquad: Biquad,
    filtered_level: f32,
}

impl BellResonator {
    /// Create a resonator tuned to the default 770 Hz bell fundamental.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tuning(BellTuning::Default770)
    }

    /// Create a resonator tuned to the given bell fundamental.
    #[must_use]
    pub fn with_tuning(tuning: BellTuning) -> Self {
        let (b0, b1, b2, a1, a2) = tuning.coefficients();
        Self {
            biquad: Biquad::with_coefficients(b0, b1, b2, a1, a2),
            filtered_level: 0.0,
        }
    }

    /// Reset filter state and level average to the initial state.
    pub fn reset(&mut self) {
        self.biquad.clear();
        self.filtered_level = 0.0;
    }

    /// Filter a normalized sample and update the bell-band level average.
    /// Returns the raw (unclipped) biquad output.
    #[inline]
    pub fn process(&mut self, normalized: f32) -> f32 {
        let y = self.biquad.process(normalized);
        self.filtered_level = self.filtered_level * (255.0 / 256.0) + y.abs() * (1.0 / 256.0);
        y
    }

    /// Current bell-band level average.
    #[must_use]
    pub fn filtered_level(&self) -> f32 {
        self.filtered_level
    }

    /// Clip the raw biquad output for diagnostic output (`OUT_FILTER_AUDIO`).
    #[must_use]
    pub fn clip_output(y: f32) -> f32 {
        y.clamp(-CLIP, CLIP)
    }
}

impl Default for BellResonator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::TAU;

    #[test]
    fn silence_leaves_level_at_zero() {
        let mut bell = BellResonator::new();
        for _ in 0..5000 {
            bell.process(0.0);
        }
        assert_eq!(bell.filtered_level(), 0.0);
    }

    #[test]
    fn resonates_more_at_770hz_than_off_band() {
        let mut on_band = BellResonator::new();
        let mut off_band = BellResonator::new();

        let sample_rate = 16_000.0;
        for i in 0..8000 {
            let t = i as f32 / sample_rate;
            let tone = 12000.0 * libm::sinf(TAU * 770.0 * t);
            let other = 12000.0 * libm::sinf(TAU * 3000.0 * t);
            on_band.process(tone);
            off_band.process(other);
        }

        assert!(
            on_band.filtered_level() > off_band.filtered_level() * 2.0,
            "on-band level {} should be well above off-band level {}",
            on_band.filtered_level(),
            off_band.filtered_level()
        );
    }

    #[test]
    fn reset_clears_level_and_filter_state() {
        let mut bell = BellResonator::new();
        for i in 0..1000 {
            bell.process((i as f32).sin() * 1000.0);
        }
        bell.reset();
        assert_eq!(bell.filtered_level(), 0.0);
    }

    #[test]
    fn clip_output_bounds_extreme_values() {
        assert_eq!(BellResonator::clip_output(1e9), 32760.0);
        assert_eq!(BellResonator::clip_output(-1e9), -32760.0);
        assert_eq!(BellResonator::clip_output(10.0), 10.0);
    }

    #[test]
    fn wireless_785_tuning_resonates_more_at_785hz_than_770hz() {
        let mut tuned = BellResonator::with_tuning(BellTuning::Wireless785);
        let mut off_band = BellResonator::with_tuning(BellTuning::Wireless785);

        let sample_rate = 16_000.0;
        for i in 0..8000 {
            let t = i as f32 / sample_rate;
            let on = 12000.0 * libm::sinf(TAU * 785.0 * t);
            let off = 12000.0 * libm::sinf(TAU * 3000.0 * t);
            tuned.process(on);
            off_band.process(off);
        }

        assert!(tuned.filtered_level() > off_band.filtered_level() * 2.0);
    }

    #[test]
    fn default_tuning_is_770hz() {
        assert_eq!(BellTuning::default(), BellTuning::Default770);
    }
}
