//! File-based detector processing: run a WAV file through the pipeline and
//! report every knock/ring decision, optionally saving diagnostic streams.

use clap::Args;
use knockdog_core::{time_format, Analyzer, Flags, ANALYSIS_INTERVAL};
use knockdog_io::{read_wav, write_diagnostic_wav};
use std::path::PathBuf;

use crate::commands::load_preset;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono, 16 kHz, 16-bit PCM)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Preset name or path (factory preset, user preset, or file)
    #[arg(short, long)]
    preset: Option<String>,

    /// Use the high-sensitivity acceptance curve instead of the default
    #[arg(long, conflicts_with = "preset")]
    high_sensitivity: bool,

    /// Write the selected diagnostic streams to this WAV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include decorrelated audio in the diagnostic output
    #[arg(long, conflicts_with = "preset")]
    decorr_audio: bool,

    /// Include window energy level in the diagnostic output
    #[arg(long, conflicts_with = "preset")]
    window_level: bool,

    /// Include bell-filtered audio in the diagnostic output
    #[arg(long, conflicts_with = "preset")]
    filter_audio: bool,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let samples = read_wav(&args.input)?;
    println!("  {} samples, {:.2}s", samples.len(), samples.len() as f32 / knockdog_core::SAMPLE_RATE as f32);

    let (mut analyzer, flags) = if let Some(preset_name) = &args.preset {
        let preset = load_preset(preset_name)?;
        println!("Loading preset: {}", preset.name);
        (preset.analyzer(), preset.flags())
    } else {
        let mut flags = Flags::empty();
        if args.high_sensitivity {
            flags |= Flags::HIGH_SENSITIVITY;
        }
        if args.decorr_audio {
            flags |= Flags::OUT_DECORR_AUDIO;
        }
        if args.window_level {
            flags |= Flags::OUT_WINDOW_LEVEL;
        }
        if args.filter_audio {
            flags |= Flags::OUT_FILTER_AUDIO;
        }
        (Analyzer::new(), flags)
    };

    let num_streams = flags.output_stream_count();
    let mut diagnostic_audio = Vec::new();

    println!("Processing...\n");
    let mut any_detection = false;

    for chunk in samples.chunks(ANALYSIS_INTERVAL as usize) {
        let mut out = if num_streams > 0 { vec![0i16; chunk.len() * num_streams] } else { Vec::new() };
        let detections = analyzer.process(chunk, if num_streams > 0 { Some(&mut out) } else { None }, flags, None);

        if num_streams > 0 {
            diagnostic_audio.extend_from_slice(&out);
        }

        if !detections.is_empty() {
            any_detection = true;
            let stamp = time_format(analyzer.sample_index());
            if detections.contains(knockdog_core::Detections::KNOCK) {
                println!("  [{stamp}] KNOCK");
            }
            if detections.contains(knockdog_core::Detections::RING) {
                println!("  [{stamp}] RING");
            }
        }
    }

    if !any_detection {
        println!("  (no detections)");
    }

    if let Some(output_path) = args.output {
        if num_streams == 0 {
            anyhow::bail!("--output requires at least one OUT_* diagnostic flag (or a preset that enables one)");
        }
        write_diagnostic_wav(&output_path, &diagnostic_audio, num_streams)?;
        println!("\nWrote {num_streams} diagnostic stream(s) to {}", output_path.display());
    }

    Ok(())
}
