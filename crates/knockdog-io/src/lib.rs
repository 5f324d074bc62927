//! Audio I/O layer for knockdog: WAV file access and live-device capture
//! wired to [`knockdog_core::Analyzer`].
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] for loading mono 16 kHz PCM,
//!   [`read_wav_info`] for inspecting any WAV file's metadata without that
//!   restriction, and [`write_diagnostic_wav`] for saving the analyzer's
//!   selected output streams as a multi-channel file.
//! - **Live capture**: [`AudioStream`] drives `Analyzer::process` from a
//!   cpal input callback.
//! - **Diagnostics**: [`TracingSink`] forwards `Analyzer`'s diagnostic
//!   lines to `tracing`.

mod stream;
mod tracing_sink;
mod wav;

pub use stream::{AudioDevice, AudioStream, StreamConfig, default_input_device, list_devices};
pub use tracing_sink::TracingSink;
pub use wav::{read_wav, read_wav_info, write_diagnostic_wav, WavFormat, WavInfo};

/// Error type for `knockdog-io` operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("audio stream error: {0}")]
    Stream(String),

    /// No audio input device available on the system.
    #[error("no audio input device available")]
    NoDevice,

    /// A WAV file was not mono 16 kHz PCM.
    #[error("expected mono 16 kHz 16-bit PCM, got {channels} channel(s) at {sample_rate} Hz / {bits_per_sample} bits")]
    UnsupportedWavFormat {
        /// Channel count found in the file.
        channels: u16,
        /// Sample rate found in the file.
        sample_rate: u32,
        /// Bit depth found in the file.
        bits_per_sample: u16,
    },

    /// The requested audio device was not found.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// No input device configuration supports mono 16 kHz capture.
    #[error("device {0:?} has no mono 16 kHz input configuration")]
    UnsupportedDeviceRate(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for `knockdog-io` operations.
pub type Result<T> = std::result::Result<T, Error>;
