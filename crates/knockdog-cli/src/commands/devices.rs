//! Audio input device listing.

use clap::{Args, Subcommand};
use knockdog_io::{default_input_device, list_devices};

#[derive(Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Subcommand)]
enum DevicesCommand {
    /// List all available input devices
    List,

    /// Show the default input device
    Info,
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(DevicesCommand::List) {
        DevicesCommand::List => {
            let devices = list_devices()?;

            if devices.is_empty() {
                println!("No input devices found.");
                return Ok(());
            }

            println!("Available Input Devices");
            println!("========================\n");
            for (idx, device) in devices.iter().enumerate() {
                let mono16k = if device.supports_mono_16k { "" } else { " (no mono 16 kHz config)" };
                println!("  [{idx}] {}{mono16k}", device.name);
            }
            println!();
            println!("Tip: select a device with --input <index or name>:");
            println!("  knockdog realtime --input 0");
        }

        DevicesCommand::Info => {
            let name = default_input_device()?;
            println!("Default Input Device");
            println!("=====================\n");
            println!("  Name: {name}");
        }
    }

    Ok(())
}
