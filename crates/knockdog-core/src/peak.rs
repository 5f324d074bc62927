//! Peak extractor state machine (`spec.md` §4.6).
//!
//! Integrates contiguous positive window-level regions into [`PeakRecord`]s.
//! This module only tracks region extent (open/grow/close); acceptance
//! against the adaptive threshold is [`crate::threshold::PeakThreshold`]'s
//! job, and insertion into the bounded history is
//! [`crate::peak_buffer::PeakBuffer`]'s.

/// A candidate or accepted transient region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakRecord {
    /// Sample index at which the region's maximum occurred.
    pub time: i32,
    /// Sum of positive window-level values accumulated across the region.
    pub area: i32,
    /// Maximum window-level value seen in the region.
    pub height: i32,
    /// `area / height`, filled in at acceptance (`0` until then).
    pub width: i32,
    /// Bell-band `filtered_level` sampled at region start.
    pub filtered_level: f32,
    /// Ring-confirmation hit counter, `0..=5`.
    pub filter_hits: u8,
}

impl Default for PeakRecord {
    fn default() -> Self {
        Self {
            time: 0,
            area: 0,
            height: 0,
            width: 0,
            filtered_level: 0.0,
            filter_hits: 0,
        }
    }
}

/// Outcome of feeding one sample to the [`PeakExtractor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeakEvent {
    /// The region stayed closed, or stayed/became open: nothing closed.
    None,
    /// A region closed this sample. `width` and `filter_hits` are not yet
    /// finalized — the caller runs the closed record through
    /// [`crate::threshold::PeakThreshold::try_accept`].
    Closed(PeakRecord),
}

/// CLOSED/OPEN state machine tracking the currently-open positive region, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeakExtractor {
    in_progress: bool,
    current: PeakRecord,
}

impl PeakExtractor {
    /// Create an extractor with no region in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the no-region-in-progress state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether a region is currently open.
    #[must_use]
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Advance the state machine by one sample.
    #[inline]
    pub fn process(&mut self, sample_index: i32, window_level: i32, filtered_level: f32) -> PeakEvent {
        if self.in_progress {
            if window_level <= 0 {
                self.in_progress = false;
                return PeakEvent::Closed(self.current);
            }
            if window_level > self.current.height {
                // New max: time/height move, but area is NOT incremented —
                // matches the reference implementation (spec.md §9 open question).
                self.current.time = sample_index;
                self.current.height = window_level;
            } else {
                self.current.area += window_level;
            }
            PeakEvent::None
        } else {
            if window_level > 0 {
                self.in_progress = true;
                self.current = PeakRecord {
                    time: sample_index,
                    area: window_level,
                    height: window_level,
                    width: 0,
                    filtered_level,
                    filter_hits: 0,
                };
            }
            PeakEvent::None
        }
    }
}
