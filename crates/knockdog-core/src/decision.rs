//! Knock and ring decision rules (`spec.md` §4.8), evaluated once per 100 ms
//! decision pass by [`crate::analyzer::Analyzer`].

use crate::peak_buffer::PeakBuffer;
use crate::{KNOCK_MAX_SPAN, KNOCK_MIN_SPAN};

/// Sensitivity mode, bundling the three constants the decision rules scale
/// by — grounded on how small config types (rather than inline magic
/// numbers) bundle related tuning constants elsewhere in this pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sensitivity {
    /// `R=1.1, S=1.5, K=0.5` — `spec.md` §6 default (flag bit clear).
    #[default]
    Low,
    /// `R=1.2, S=1.25, K=0.75` — `spec.md` §6 `HIGH_SENSITIVITY` flag set.
    High,
}

impl Sensitivity {
    /// Select from the `HIGH_SENSITIVITY` bit of [`crate::Flags`].
    #[must_use]
    pub fn from_high_sensitivity_bit(high: bool) -> Self {
        if high {
            Sensitivity::High
        } else {
            Sensitivity::Low
        }
    }

    /// Maximum allowed ratio between a knock triplet's two inter-peak
    /// spacings.
    #[must_use]
    pub fn ratio_max(self) -> f32 {
        match self {
            Sensitivity::Low => 1.1,
            Sensitivity::High => 1.2,
        }
    }

    /// Scaling applied to the base adaptive threshold a peak must also
    /// clear to be accepted into the buffer (`spec.md` §4.6).
    #[must_use]
    pub fn threshold_scaling(self) -> f32 {
        match self {
            Sensitivity::Low => 1.5,
            Sensitivity::High => 1.25,
        }
    }

    /// Fraction of a knock triplet's minimum height that a neighboring peak
    /// must exceed within the guard window to reject the triplet.
    #[must_use]
    pub fn spurious_rejection_ratio(self) -> f32 {
        match self {
            Sensitivity::Low => 0.5,
            Sensitivity::High => 0.75,
        }
    }
}

/// Widths at or above this reject a candidate knock peak (`spec.md` §4.8).
const KNOCK_MAX_WIDTH: i32 = 512;
/// `filter_hits` required for the ring rule to fire.
const RING_HITS_REQUIRED: u8 = 5;
/// A peak older than this (in samples) relative to `sample_index` is no
/// longer eligible for a ring hit.
const RING_AGE_LIMIT: i32 = 16_000;
/// Additive margin in the ring confirmation comparison.
const RING_MARGIN: f32 = 50.0;

/// Evaluate the knock-triplet rule over the buffer. Returns `true` on the
/// first qualifying ordered triple found; the caller is responsible for
/// clearing the buffer and setting `Detections::KNOCK`.
#[must_use]
pub fn detect_knock(buffer: &PeakBuffer, sample_index: i32, sensitivity: Sensitivity) -> bool {
    let len = buffer.len();
    for p1 in 0..len {
        for p2 in (p1 + 1)..len {
            for p3 in (p2 + 1)..len {
                if triplet_qualifies(buffer, p1, p2, p3, sample_index, sensitivity) {
                    return true;
                }
            }
        }
    }
    false
}

fn triplet_qualifies(
    buffer: &PeakBuffer,
    p1: usize,
    p2: usize,
    p3: usize,
    sample_index: i32,
    sensitivity: Sensitivity,
) -> bool {
    let a = buffer.get(p1);
    let b = buffer.get(p2);
    let c = buffer.get(p3);

    let span = c.time - a.time;
    if !(KNOCK_MIN_SPAN < span && span < KNOCK_MAX_SPAN) {
        return false;
    }
    if a.width >= KNOCK_MAX_WIDTH || b.width >= KNOCK_MAX_WIDTH || c.width >= KNOCK_MAX_WIDTH {
        return false;
    }
    if !(c.time + span / 2 < sample_index) {
        return false;
    }

    let d1 = b.time - a.time;
    let d2 = c.time - b.time;
    let (larger, smaller) = if d1 > d2 { (d1, d2) } else { (d2, d1) };
    if smaller <= 0 {
        return false;
    }
    let ratio = larger as f32 / smaller as f32;
    if !(ratio < sensitivity.ratio_max()) {
        return false;
    }

    let min_height = a.height.min(b.height).min(c.height) as f32 * sensitivity.spurious_rejection_ratio();
    let guard_lo = a.time - span / 3;
    let guard_hi = c.time + span / 3;
    for i in 0..buffer.len() {
        if i == p1 || i == p2 || i == p3 {
            continue;
        }
        let other = buffer.get(i);
        if other.time > guard_lo && other.time < guard_hi && other.height as f32 > min_height {
            return false;
        }
    }

    true
}

/// Evaluate the ring rule: for each sufficiently recent peak whose bell-band
/// level has since climbed well above its own baseline, bump `filter_hits`.
/// Returns `true` as soon as any peak's hit count reaches
/// [`RING_HITS_REQUIRED`]; caller clears the buffer and sets
/// `Detections::RING`.
#[must_use]
pub fn detect_ring(buffer: &mut PeakBuffer, sample_index: i32, current_filtered_level: f32) -> bool {
    for i in 0..buffer.len() {
        let peak = buffer.get_mut(i);
        let recent = peak.time + RING_AGE_LIMIT > sample_index;
        let elevated = current_filtered_level > peak.filtered_level * 2.0 + RING_MARGIN;
        if recent && elevated {
            peak.filter_hits += 1;
            if peak.filter_hits >= RING_HITS_REQUIRED {
                return true;
            }
        }
    }
    false
}
