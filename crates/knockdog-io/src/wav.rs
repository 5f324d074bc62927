//! WAV file reading and writing for the detector's mono 16 kHz PCM input
//! and multi-channel diagnostic output streams.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

use knockdog_core::SAMPLE_RATE;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data or enforcing the mono
/// 16 kHz format [`read_wav`] requires — used by `knockdog-cli info` to
/// describe any WAV file, including ones the detector can't consume.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len());
    let num_frames = total_samples / u64::from(spec.channels);
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// Read a WAV file as mono 16 kHz 16-bit PCM samples.
///
/// Returns [`Error::UnsupportedWavFormat`] for anything else: the detector
/// has no resampling or channel-mixing stage, so the input must already
/// match the pipeline's assumed format.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<Vec<i16>> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();

    if spec.channels != 1 || spec.sample_rate != SAMPLE_RATE || spec.bits_per_sample != 16 || spec.sample_format != SampleFormat::Int {
        return Err(Error::UnsupportedWavFormat {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        });
    }

    reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Write `num_streams` interleaved diagnostic channels to a WAV file.
///
/// `samples` must have a length that is a multiple of `num_streams`; this
/// mirrors the layout [`knockdog_core::Analyzer::process`] writes into its
/// `out` buffer when `flags` selects `num_streams` output streams.
pub fn write_diagnostic_wav<P: AsRef<Path>>(path: P, samples: &[i16], num_streams: usize) -> Result<()> {
    let spec = WavSpec {
        channels: num_streams as u16,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
