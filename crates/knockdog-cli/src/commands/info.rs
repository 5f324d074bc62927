//! Display WAV file metadata.

use clap::Args;
use knockdog_io::{read_wav_info, WavFormat};
use std::path::PathBuf;

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: PathBuf,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;

    let format_str = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };

    println!("File:        {}", args.file.display());
    println!("Format:      {format_str} {}-bit", info.bits_per_sample);
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!("Duration:    {:.3}s ({} frames)", info.duration_secs, info.num_frames);

    let usable = info.channels == 1 && info.sample_rate == knockdog_core::SAMPLE_RATE && info.bits_per_sample == 16 && info.format == WavFormat::Pcm;
    println!("Detector:    {}", if usable { "compatible (mono 16 kHz 16-bit PCM)" } else { "needs conversion before `process`/`analyze`" });

    let file_size = std::fs::metadata(&args.file)?.len();
    println!("File Size:   {}", format_bytes(file_size));

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
