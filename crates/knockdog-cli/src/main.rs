//! knockdog CLI - offline and live audio tools for the knock/ring detector.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "knockdog")]
#[command(author, version, about = "Acoustic knock/ring detector CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the detector over a WAV file, optionally writing diagnostic streams
    Process(commands::process::ProcessArgs),

    /// Run the detector against a live input device
    Realtime(commands::realtime::RealtimeArgs),

    /// Print a verbose per-decision-pass summary of a WAV file
    Analyze(commands::analyze::AnalyzeArgs),

    /// List and inspect audio input devices
    Devices(commands::devices::DevicesArgs),

    /// Display WAV file metadata
    Info(commands::info::InfoArgs),

    /// Manage detector presets (list, show, save, delete, copy, paths)
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    tracing::debug!(command = ?std::mem::discriminant(&cli.command), "dispatching command");

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Realtime(args) => commands::realtime::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
