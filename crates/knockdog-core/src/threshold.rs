//! Adaptive peak-acceptance threshold (`spec.md` §4.6 "Acceptance on
//! close", glossary "Adaptive threshold").
//!
//! Self-calibrates toward roughly one accepted peak per second: every
//! accepted peak bumps the floor up 1%, and every 100 ms decision pass
//! decays it down about 1%, regardless of ambient noise level.

use crate::decision::Sensitivity;
use crate::peak::PeakRecord;

/// Starting floor (`spec.md` §3).
const INITIAL_THRESHOLD: f32 = 30.0;
/// Per-accepted-peak bump.
const BUMP: f32 = 1.01;
/// Per-decision-pass decay.
const DECAY: f32 = 0.999;

/// The self-tuning acceptance floor for closed-out peaks.
#[derive(Debug, Clone, Copy)]
pub struct PeakThreshold {
    value: f32,
}

impl PeakThreshold {
    /// Create a threshold at its initial value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: INITIAL_THRESHOLD,
        }
    }

    /// Reset to the initial value.
    pub fn reset(&mut self) {
        self.value = INITIAL_THRESHOLD;
    }

    /// Current floor value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Apply the ~1%/s decay step run once per decision pass.
    pub fn decay(&mut self) {
        self.value *= DECAY;
    }

    /// Test a closed-out peak against the floor. Bumps the floor 1% if the
    /// peak clears the base floor (regardless of whether it goes on to
    /// clear the sensitivity-scaled floor too — `spec.md` §4.6). Returns
    /// `Some` with `width` filled in iff the peak is accepted into the
    /// buffer.
    #[inline]
    #[must_use]
    pub fn try_accept(&mut self, mut peak: PeakRecord, sensitivity: Sensitivity) -> Option<PeakRecord> {
        let height = peak.height as f32;
        if height <= self.value {
            return None;
        }
        self.value *= BUMP;
        if height <= self.value * sensitivity.threshold_scaling() {
            return None;
        }
        peak.width = peak.area / peak.height;
        Some(peak)
    }
}

impl Default for PeakThreshold {
    fn default() -> Self {
        Self::new()
    }
}
