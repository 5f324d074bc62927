//! Verbose diagnostic pass over a WAV file: prints every threshold/event/peak
//! line the analyzer would emit, plus a final summary. Unlike `process`,
//! this never writes an output file — it's for listening in on what the
//! detector is doing, not producing artifacts.

use clap::Args;
use knockdog_core::{Analyzer, DiagnosticSink, Flags, ANALYSIS_INTERVAL};
use knockdog_io::read_wav;
use std::path::PathBuf;

use crate::commands::load_preset;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file (mono, 16 kHz, 16-bit PCM)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Preset name or path; defaults to low sensitivity / 770 Hz bell tuning
    #[arg(short, long)]
    preset: Option<String>,

    /// Suppress threshold/event/peak lines and print only the summary
    #[arg(short, long)]
    quiet: bool,
}

struct PrintSink;

impl DiagnosticSink for PrintSink {
    fn emit(&mut self, line: &str) {
        println!("  {line}");
    }
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    println!("Analyzing {}...", args.input.display());
    let samples = read_wav(&args.input)?;
    println!("  {} samples, {:.2}s\n", samples.len(), samples.len() as f32 / knockdog_core::SAMPLE_RATE as f32);

    let mut analyzer = match &args.preset {
        Some(name) => load_preset(name)?.analyzer(),
        None => Analyzer::new(),
    };

    let flags = Flags::DISP_THRESHOLDS | Flags::DISP_EVENTS | Flags::DISP_PEAKS;
    let mut sink = PrintSink;

    let mut knock_count = 0u32;
    let mut ring_count = 0u32;

    for chunk in samples.chunks(ANALYSIS_INTERVAL as usize) {
        let detections = if args.quiet {
            analyzer.process(chunk, None, Flags::empty(), None)
        } else {
            analyzer.process(chunk, None, flags, Some(&mut sink))
        };

        if detections.contains(knockdog_core::Detections::KNOCK) {
            knock_count += 1;
        }
        if detections.contains(knockdog_core::Detections::RING) {
            ring_count += 1;
        }
    }

    println!("\nSummary:");
    println!("  Knocks detected: {knock_count}");
    println!("  Rings detected:  {ring_count}");
    println!("  Peaks pending at end of file: {}", analyzer.peak_count());

    Ok(())
}
