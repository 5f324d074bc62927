//! The analyzer: wires the six pipeline stages together, owns
//! `sample_index` and its wraparound (`spec.md` §4.9), and exposes the
//! crate's only public entry point, [`Analyzer::process`].

use crate::agc::MagnitudeTracker;
use crate::bell::{BellResonator, BellTuning};
use crate::decision::{self, Sensitivity};
use crate::decorrelator::Decorrelator;
use crate::diagnostics::DiagnosticSink;
use crate::flags::{Detections, Flags};
use crate::normalizer;
use crate::peak::{PeakEvent, PeakExtractor};
use crate::peak_buffer::PeakBuffer;
use crate::threshold::PeakThreshold;
use crate::window::WindowEnergy;
use crate::{ANALYSIS_INTERVAL, SAMPLE_INDEX_WRAP};

/// The streaming knock/ring detector. Owns every piece of state named in
/// `spec.md` §3; the only way to mutate it is [`Analyzer::process`].
#[derive(Debug, Clone)]
pub struct Analyzer {
    decorrelator: Decorrelator,
    agc: MagnitudeTracker,
    window: WindowEnergy,
    bell: BellResonator,
    peak_extractor: PeakExtractor,
    threshold: PeakThreshold,
    peak_buffer: PeakBuffer,
    sample_index: u32,
    bell_tuning: BellTuning,
}

impl Analyzer {
    /// Create a freshly-initialized analyzer (`spec.md` §6 `init()`).
    #[must_use]
    pub fn new() -> Self {
        Self::with_bell_tuning(BellTuning::default())
    }

    /// Create an analyzer whose bell resonator is tuned to `tuning` instead
    /// of the default 770 Hz doorbell fundamental. `reset()` preserves this
    /// choice.
    #[must_use]
    pub fn with_bell_tuning(tuning: BellTuning) -> Self {
        Self {
            decorrelator: Decorrelator::new(),
            agc: MagnitudeTracker::new(),
            window: WindowEnergy::new(),
            bell: BellResonator::with_tuning(tuning),
            peak_extractor: PeakExtractor::new(),
            threshold: PeakThreshold::new(),
            peak_buffer: PeakBuffer::new(),
            sample_index: 0,
            bell_tuning: tuning,
        }
    }

    /// Reset every stage to its initial state. Idempotent: two consecutive
    /// calls leave identical state (`spec.md` §8, property 5).
    pub fn reset(&mut self) {
        *self = Self::with_bell_tuning(self.bell_tuning);
    }

    /// Current monotonic sample counter (wraps every 24 h of streaming).
    #[must_use]
    pub fn sample_index(&self) -> u32 {
        self.sample_index
    }

    /// Number of peaks currently retained in the buffer.
    #[must_use]
    pub fn peak_count(&self) -> usize {
        self.peak_buffer.len()
    }

    /// Iterate over the peaks currently retained in the buffer, oldest first.
    pub fn peaks(&self) -> impl Iterator<Item = &crate::peak::PeakRecord> {
        self.peak_buffer.iter()
    }

    /// Process a block of mono 16-bit PCM samples, writing any selected
    /// diagnostic output streams and returning the detections made during
    /// this block.
    ///
    /// `out`, if provided, must be sized to
    /// `input.len() * flags.output_stream_count()`; writes beyond its end
    /// are silently dropped rather than panicking (`spec.md` §7: no fatal
    /// path). `sink` receives best-effort diagnostic text lines; a `None`
    /// sink or a slow one never stalls processing.
    pub fn process(
        &mut self,
        input: &[i16],
        mut out: Option<&mut [i16]>,
        flags: Flags,
        mut sink: Option<&mut dyn DiagnosticSink>,
    ) -> Detections {
        let sensitivity = Sensitivity::from_high_sensitivity_bit(flags.contains(Flags::HIGH_SENSITIVITY));
        let mut detections = Detections::empty();
        let mut out_cursor = 0usize;

        for &sample in input {
            let decorrelated = self.decorrelator.process(sample);
            let level = self.agc.process(decorrelated);
            let normalized = normalizer::normalize(decorrelated, level);
            let window_level = self.window.process(normalized);
            let bell_out = self.bell.process(normalized);

            self.write_outputs(&mut out, &mut out_cursor, flags, decorrelated, level, normalized, window_level, bell_out);

            let event = self
                .peak_extractor
                .process(self.sample_index as i32, window_level, self.bell.filtered_level());
            if let PeakEvent::Closed(candidate) = event {
                if let Some(accepted) = self.threshold.try_accept(candidate, sensitivity) {
                    let inserted = self.peak_buffer.insert(accepted);
                    self.emit_peak_diagnostics(&mut sink, flags, accepted, !inserted);
                }
            }

            self.sample_index = self.sample_index.wrapping_add(1);

            if self.sample_index % ANALYSIS_INTERVAL == 0 {
                self.emit_threshold_diagnostics(&mut sink, flags);
                let pass_detections = self.run_decision_pass(sensitivity);
                if !pass_detections.is_empty() {
                    self.emit_event_diagnostics(&mut sink, flags, pass_detections);
                }
                detections |= pass_detections;
                self.threshold.decay();
            }

            self.maybe_wrap_sample_index();
        }

        detections
    }

    fn run_decision_pass(&mut self, sensitivity: Sensitivity) -> Detections {
        let index = self.sample_index as i32;
        self.peak_buffer.expire(index);

        if decision::detect_knock(&self.peak_buffer, index, sensitivity) {
            self.peak_buffer.clear();
            return Detections::KNOCK;
        }

        if decision::detect_ring(&mut self.peak_buffer, index, self.bell.filtered_level()) {
            self.peak_buffer.clear();
            return Detections::RING;
        }

        Detections::empty()
    }

    fn maybe_wrap_sample_index(&mut self) {
        if self.sample_index > SAMPLE_INDEX_WRAP && self.peak_buffer.is_empty() && !self.peak_extractor.in_progress() {
            self.sample_index %= SAMPLE_INDEX_WRAP;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn write_outputs(
        &self,
        out: &mut Option<&mut [i16]>,
        cursor: &mut usize,
        flags: Flags,
        decorrelated: i16,
        level: f32,
        normalized: f32,
        window_level: i32,
        bell_out: f32,
    ) {
        let Some(out) = out.as_deref_mut() else {
            return;
        };

        let mut push = |value: i16| {
            if let Some(slot) = out.get_mut(*cursor) {
                *slot = value;
            }
            *cursor += 1;
        };

        if flags.contains(Flags::OUT_DECORR_AUDIO) {
            push(decorrelated);
        }
        if flags.contains(Flags::OUT_DECORR_LEVEL) {
            push(round_to_i16(level));
        }
        if flags.contains(Flags::OUT_NORMAL_AUDIO) {
            push(round_to_i16(normalized));
        }
        if flags.contains(Flags::OUT_WINDOW_LEVEL) {
            push(round_to_i16(window_level as f32));
        }
        if flags.contains(Flags::OUT_FILTER_AUDIO) {
            push(round_to_i16(BellResonator::clip_output(bell_out)));
        }
        if flags.contains(Flags::OUT_FILTER_LEVEL) {
            push(round_to_i16(self.bell.filtered_level()));
        }
    }

    #[cfg(feature = "std")]
    fn emit_peak_diagnostics(&self, sink: &mut Option<&mut dyn DiagnosticSink>, flags: Flags, peak: crate::peak::PeakRecord, discarded: bool) {
        let Some(sink) = sink.as_deref_mut() else {
            return;
        };
        if flags.contains(Flags::DISP_PEAKS) {
            let stamp = crate::diagnostics::time_format(peak.time as u32);
            sink.emit(&alloc_fmt(&stamp, peak.height, peak.width));
        }
        if discarded && flags.contains(Flags::DISP_EVENTS) {
            sink.emit("peak buffer full, incoming peak discarded");
        }
    }

    #[cfg(not(feature = "std"))]
    fn emit_peak_diagnostics(&self, sink: &mut Option<&mut dyn DiagnosticSink>, flags: Flags, _peak: crate::peak::PeakRecord, discarded: bool) {
        let Some(sink) = sink.as_deref_mut() else {
            return;
        };
        if flags.contains(Flags::DISP_PEAKS) {
            sink.emit("peak accepted");
        }
        if discarded && flags.contains(Flags::DISP_EVENTS) {
            sink.emit("peak buffer full, incoming peak discarded");
        }
    }

    fn emit_threshold_diagnostics(&self, sink: &mut Option<&mut dyn DiagnosticSink>, flags: Flags) {
        if !flags.contains(Flags::DISP_THRESHOLDS) || self.sample_index % (ANALYSIS_INTERVAL * 100) != 0 {
            return;
        }
        let Some(sink) = sink.as_deref_mut() else {
            return;
        };
        emit_threshold_line(sink, self.threshold.value());
    }

    fn emit_event_diagnostics(&self, sink: &mut Option<&mut dyn DiagnosticSink>, flags: Flags, detections: Detections) {
        if !flags.contains(Flags::DISP_EVENTS) {
            return;
        }
        let Some(sink) = sink.as_deref_mut() else {
            return;
        };
        if detections.contains(Detections::KNOCK) {
            sink.emit("knock detected");
        }
        if detections.contains(Detections::RING) {
            sink.emit("ring detected");
        }
    }
}

#[cfg(feature = "std")]
fn alloc_fmt(stamp: &str, height: i32, width: i32) -> std::string::String {
    std::format!("{stamp} peak accepted height={height} width={width}")
}

#[cfg(feature = "std")]
fn emit_threshold_line(sink: &mut dyn DiagnosticSink, value: f32) {
    sink.emit(&std::format!("peak threshold = {value:.2}"));
}

#[cfg(not(feature = "std"))]
fn emit_threshold_line(sink: &mut dyn DiagnosticSink, _value: f32) {
    sink.emit("peak threshold updated");
}

fn round_to_i16(value: f32) -> i16 {
    libm::roundf(value).clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_produces_no_detections() {
        let mut analyzer = Analyzer::new();
        let block = [0i16; 16_000 * 10];
        let detections = analyzer.process(&block, None, Flags::empty(), None);
        assert!(detections.is_empty());
        assert_eq!(analyzer.peak_count(), 0);
    }

    #[test]
    fn reset_after_activity_matches_fresh_instance() {
        let mut a = Analyzer::new();
        let noisy: std::vec::Vec<i16> = (0..5000).map(|i| ((i * 37) % 2000 - 1000) as i16).collect();
        a.process(&noisy, None, Flags::empty(), None);
        a.reset();

        let b = Analyzer::new();
        assert_eq!(a.sample_index(), b.sample_index());
        assert_eq!(a.peak_count(), b.peak_count());
    }

    #[test]
    fn output_buffer_receives_exactly_k_times_n_values() {
        let mut analyzer = Analyzer::new();
        let flags = Flags::OUT_DECORR_AUDIO | Flags::OUT_WINDOW_LEVEL | Flags::OUT_FILTER_LEVEL;
        let input = [100i16; 37];
        let mut out = [0i16; 37 * 3];
        let _ = analyzer.process(&input, Some(&mut out), flags, None);
        // Only asserting it doesn't panic and writes land within bounds;
        // numeric values are covered by per-stage unit tests.
        assert_eq!(out.len(), input.len() * flags.output_stream_count());
    }

    #[test]
    fn determinism_same_input_same_detections() {
        let input: std::vec::Vec<i16> = (0..45_000)
            .map(|i| {
                if (32_000..32_160).contains(&i) || (35_200..35_360).contains(&i) || (38_400..38_560).contains(&i) {
                    20000
                } else {
                    0
                }
            })
            .collect();

        let mut a1 = Analyzer::new();
        let mut a2 = Analyzer::new();
        let d1 = a1.process(&input, None, Flags::empty(), None);
        let d2 = a2.process(&input, None, Flags::empty(), None);
        assert_eq!(d1, d2);
    }

    #[test]
    fn undersized_output_buffer_never_panics() {
        let mut analyzer = Analyzer::new();
        let input = [1000i16; 100];
        let mut tiny_out = [0i16; 3];
        let flags = Flags::OUT_DECORR_AUDIO | Flags::OUT_NORMAL_AUDIO;
        let _ = analyzer.process(&input, Some(&mut tiny_out), flags, None);
    }
}
