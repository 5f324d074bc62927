//! Integration tests for knockdog-io: WAV round-trips and an end-to-end
//! WAV-in/detections-out pass through `Analyzer`.

use knockdog_core::{Analyzer, Detections, Flags};
use knockdog_io::{Error, read_wav, write_diagnostic_wav};
use tempfile::NamedTempFile;

fn tone(len: usize, freq: f32, amplitude: f32) -> Vec<i16> {
    (0..len)
        .map(|i| {
            let t = i as f32 / 16_000.0;
            (amplitude * (2.0 * std::f32::consts::PI * freq * t).sin()) as i16
        })
        .collect()
}

#[test]
fn wav_roundtrip_mono_16khz_i16() {
    let samples = tone(16_000, 440.0, 12_000.0);

    let file = NamedTempFile::new().unwrap();
    write_diagnostic_wav(file.path(), &samples, 1).unwrap();

    let loaded = read_wav(file.path()).unwrap();
    assert_eq!(loaded, samples);
}

#[test]
fn wav_read_rejects_non_16khz_mono_pcm() {
    // Write a stereo file; reading it through knockdog-io must fail loudly
    // rather than silently mixing channels, since the pipeline has no
    // mixdown stage.
    let file = NamedTempFile::new().unwrap();
    write_diagnostic_wav(file.path(), &[0, 0, 0, 0], 2).unwrap();

    let result = read_wav(file.path());
    assert!(matches!(result, Err(Error::UnsupportedWavFormat { channels: 2, .. })));
}

#[test]
fn diagnostic_wav_carries_multiple_streams() {
    let mut analyzer = Analyzer::new();
    let flags = Flags::OUT_DECORR_AUDIO | Flags::OUT_WINDOW_LEVEL | Flags::OUT_FILTER_LEVEL;
    let input = tone(1_000, 300.0, 8_000.0);
    let mut out = vec![0i16; input.len() * flags.output_stream_count()];
    analyzer.process(&input, Some(&mut out), flags, None);

    let file = NamedTempFile::new().unwrap();
    write_diagnostic_wav(file.path(), &out, flags.output_stream_count()).unwrap();

    let reader = hound::WavReader::open(file.path()).unwrap();
    assert_eq!(reader.spec().channels as usize, flags.output_stream_count());
    assert_eq!(reader.spec().sample_rate, 16_000);
}

#[test]
fn end_to_end_wav_in_detections_out() {
    // Three evenly-spaced short bursts on a quiet floor: a valid knock
    // triplet per the span/ratio/width rules.
    let mut samples = vec![0i16; 60_000];
    for &start in &[32_000usize, 35_200, 38_400] {
        for (i, slot) in samples[start..start + 160].iter_mut().enumerate() {
            *slot = if i % 2 == 0 { 20_000 } else { -20_000 };
        }
    }

    let file = NamedTempFile::new().unwrap();
    write_diagnostic_wav(file.path(), &samples, 1).unwrap();

    let loaded = read_wav(file.path()).unwrap();
    let mut analyzer = Analyzer::new();
    let detections = analyzer.process(&loaded, None, Flags::empty(), None);
    assert!(detections.contains(Detections::KNOCK));
}
