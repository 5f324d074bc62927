//! Live microphone capture.

use clap::Args;
use knockdog_core::{Detections, Flags};
use knockdog_io::{default_input_device, AudioStream, StreamConfig};

use crate::commands::load_preset;

#[derive(Args)]
pub struct RealtimeArgs {
    /// Preset name or path (factory preset, user preset, or file)
    #[arg(short, long)]
    preset: Option<String>,

    /// Use the high-sensitivity acceptance curve instead of the default
    #[arg(long, conflicts_with = "preset")]
    high_sensitivity: bool,

    /// Input device (exact name); defaults to the host default
    #[arg(short, long)]
    input: Option<String>,
}

pub fn run(args: RealtimeArgs) -> anyhow::Result<()> {
    let flags = if let Some(preset_name) = &args.preset {
        let preset = load_preset(preset_name)?;
        println!("Loading preset: {}", preset.name);
        preset.flags()
    } else if args.high_sensitivity {
        Flags::HIGH_SENSITIVITY
    } else {
        Flags::empty()
    };

    let input_name = args.input.clone().or_else(|| default_input_device().ok());
    println!("Listening for knocks/rings");
    println!("  Input: {}", input_name.as_deref().unwrap_or("<default>"));
    println!("\nPress Ctrl+C to stop...\n");

    // The detector has no notion of wall-clock time (only a wrapping sample
    // index reset per session), so a live session reports detections
    // relative to when capture started rather than `time_format`'s
    // file-relative HH:MM:SS.mmm.
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        std::process::exit(0);
    })?;

    let config = StreamConfig { input_device: args.input, flags };
    let mut stream = AudioStream::new(config)?;

    stream.run(move |detections: Detections| {
        if detections.contains(Detections::KNOCK) {
            println!("KNOCK");
        }
        if detections.contains(Detections::RING) {
            println!("RING");
        }
    })?;

    println!("Done!");
    Ok(())
}
