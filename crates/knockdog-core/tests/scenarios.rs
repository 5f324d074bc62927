//! Literal scenario tests S1–S6 (`spec.md` §8).

use knockdog_core::{Analyzer, Detections, Flags};

/// Deterministic pseudo-random noise generator in `[-amplitude, amplitude]`
/// (no external `rand` dependency needed for a bounded test fixture).
struct Noise {
    state: u32,
}

impl Noise {
    fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn next(&mut self, amplitude: i16) -> i16 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let unit = (self.state >> 16) % (2 * amplitude as u32 + 1);
        unit as i16 - amplitude
    }
}

fn quiet_noise(len: usize, amplitude: i16, seed: u32) -> Vec<i16> {
    let mut noise = Noise::new(seed);
    (0..len).map(|_| noise.next(amplitude)).collect()
}

fn burst(len: usize, amplitude: i16) -> Vec<i16> {
    (0..len).map(|i| if i % 2 == 0 { amplitude } else { -amplitude }).collect()
}

fn tone(len: usize, freq: f32, amplitude: f32) -> Vec<i16> {
    (0..len)
        .map(|i| {
            let t = i as f32 / 16_000.0;
            (amplitude * libm::sinf(2.0 * core::f32::consts::PI * freq * t)) as i16
        })
        .collect()
}

/// Build a stream of quiet noise with three 10 ms ±20000 bursts injected at
/// the given sample offsets.
fn knock_candidate_stream(total_len: usize, burst_starts: &[usize]) -> Vec<i16> {
    let mut stream = quiet_noise(total_len, 200, 0xC0FF_EE01);
    let burst_samples = burst(160, 20_000); // 10 ms at 16 kHz
    for &start in burst_starts {
        stream[start..start + burst_samples.len()].copy_from_slice(&burst_samples);
    }
    stream
}

#[test]
fn s1_out_of_range_span_is_rejected() {
    let stream = knock_candidate_stream(60_000, &[32_000, 40_000, 48_000]); // span 16000
    let mut analyzer = Analyzer::new();
    let detections = analyzer.process(&stream, None, Flags::empty(), None);
    assert!(!detections.contains(Detections::KNOCK));
}

#[test]
fn s2_valid_evenly_spaced_triplet_is_detected_once() {
    let stream = knock_candidate_stream(60_000, &[32_000, 35_200, 38_400]); // span 6400, ratio 1.0
    let mut analyzer = Analyzer::new();
    let detections = analyzer.process(&stream, None, Flags::empty(), None);
    assert!(detections.contains(Detections::KNOCK));
    assert_eq!(analyzer.peak_count(), 0, "buffer must be cleared after a knock fires");
}

#[test]
fn s3_uneven_spacing_ratio_is_rejected() {
    // d1 = 1600, d2 = 4800, ratio = 3.0.
    let stream = knock_candidate_stream(60_000, &[32_000, 33_600, 38_400]);
    let mut analyzer = Analyzer::new();
    let detections = analyzer.process(&stream, None, Flags::empty(), None);
    assert!(!detections.contains(Detections::KNOCK));
}

/// 2 s quiet noise, then a 50 ms burst at `amplitude_burst`/`freq_burst`,
/// then 500 ms sustained at `amplitude_sustain`/`freq_sustain`.
fn ring_candidate_stream(
    freq_burst: Option<f32>,
    amplitude_burst: f32,
    freq_sustain: Option<f32>,
    amplitude_sustain: f32,
) -> Vec<i16> {
    let mut stream = quiet_noise(32_000, 50, 0xDEAD_BEEF);
    let burst_len = 800; // 50 ms
    let sustain_len = 8_000; // 500 ms
    stream.extend(match freq_burst {
        Some(freq) => tone(burst_len, freq, amplitude_burst),
        None => quiet_noise(burst_len, amplitude_burst as i16, 0x1234_5678),
    });
    stream.extend(match freq_sustain {
        Some(freq) => tone(sustain_len, freq, amplitude_sustain),
        None => quiet_noise(sustain_len, amplitude_sustain as i16, 0x8765_4321),
    });
    // Padding so the 5th 100 ms decision pass after burst onset has run.
    stream.extend(quiet_noise(8_000, 50, 0x1111_1111));
    stream
}

#[test]
fn s4_bell_tone_is_detected_as_ring() {
    let stream = ring_candidate_stream(Some(770.0), 15_000.0, Some(770.0), 8_000.0);
    let mut analyzer = Analyzer::new();
    let detections = analyzer.process(&stream, None, Flags::empty(), None);
    assert!(detections.contains(Detections::RING));
}

#[test]
fn s5_broadband_bang_is_not_a_ring() {
    let stream = ring_candidate_stream(None, 15_000.0, None, 8_000.0);
    let mut analyzer = Analyzer::new();
    let detections = analyzer.process(&stream, None, Flags::empty(), None);
    assert!(!detections.contains(Detections::RING));
}

#[test]
fn s6_buffer_eviction_keeps_only_the_loudest_peaks() {
    // 20 transients spaced 300 ms (4800 samples) apart. Each is a long
    // (600-sample) burst, so every accepted peak's width clears the
    // knock-triplet width rejection (>= 512) and no triplet can qualify;
    // amplitude increases monotonically so eviction always drops the
    // oldest (smallest-height) survivor.
    let mut stream = quiet_noise(2_000, 50, 0x2222_2222);
    for i in 0..20u32 {
        stream.extend(burst(600, 10_000 + i as i16 * 1000));
        stream.extend(quiet_noise(4_200, 50, 0x3333_3333 + i));
    }
    stream.extend(quiet_noise(20_000, 50, 0x4444_4444));

    let mut analyzer = Analyzer::new();
    let detections = analyzer.process(&stream, None, Flags::empty(), None);
    assert!(!detections.contains(Detections::KNOCK));

    assert_eq!(analyzer.peak_count(), 16);
    let heights: Vec<i32> = analyzer.peaks().map(|p| p.height).collect();
    for window in heights.windows(2) {
        assert!(window[0] <= window[1], "surviving peaks should be in increasing height order: {heights:?}");
    }
}
