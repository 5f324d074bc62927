//! Preset management commands.

use clap::{Args, Subcommand};
use knockdog_config::{ensure_user_presets_dir, factory_presets, get_factory_preset, list_user_presets, user_presets_dir, DetectorPreset};

use crate::commands::load_preset;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a new preset built from sensitivity/bell-tuning flags
    Save {
        /// Name for the new preset
        name: String,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Use the high-sensitivity acceptance curve
        #[arg(long)]
        high_sensitivity: bool,

        /// Tune the bell resonator for a 785 Hz wireless doorbell chime
        #[arg(long)]
        wireless: bool,

        /// Overwrite if a preset with this name already exists
        #[arg(long)]
        force: bool,
    },

    /// Delete a user preset
    Delete {
        /// Preset name to delete
        name: String,

        /// Don't ask for confirmation
        #[arg(long)]
        force: bool,
    },

    /// Copy a factory preset to user presets for customization
    Copy {
        /// Factory preset name
        source: String,

        /// New preset name (uses the source name if not specified)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Save { name, description, high_sensitivity, wireless, force } => {
            save_preset(&name, description.as_deref(), high_sensitivity, wireless, force)
        }
        PresetsCommand::Delete { name, force } => delete_preset(&name, force),
        PresetsCommand::Copy { source, name } => copy_preset(&source, name.as_deref()),
        PresetsCommand::Paths => show_paths(),
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    let show_factory = !user_only;
    let show_user = !factory_only;

    if show_factory {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:20} - {desc}", preset.name);
        }
        println!();
    }

    if show_user {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: knockdog presets save <name>\n");
        } else {
            for path in user_presets {
                let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("unknown");
                match DetectorPreset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {name:20} - {desc}");
                    }
                    Err(_) => println!("  {name:20} - (error loading)"),
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
        println!();
    }

    println!("Sensitivity: {:?}", preset.sensitivity);
    println!("Bell tuning: {:?}", preset.bell_tuning);
    println!(
        "Diagnostics: thresholds={} events={} peaks={}",
        preset.diagnostics.thresholds, preset.diagnostics.events, preset.diagnostics.peaks
    );
    println!(
        "Output streams: decorr_audio={} decorr_level={} normal_audio={} window_level={} filter_audio={} filter_level={}",
        preset.outputs.decorr_audio,
        preset.outputs.decorr_level,
        preset.outputs.normal_audio,
        preset.outputs.window_level,
        preset.outputs.filter_audio,
        preset.outputs.filter_level,
    );

    Ok(())
}

fn save_preset(name: &str, description: Option<&str>, high_sensitivity: bool, wireless: bool, force: bool) -> anyhow::Result<()> {
    ensure_user_presets_dir()?;

    let preset_path = user_presets_dir().join(format!("{name}.toml"));
    if preset_path.exists() && !force {
        anyhow::bail!("Preset '{name}' already exists. Use --force to overwrite.");
    }

    let mut preset = DetectorPreset::new(name);
    if let Some(desc) = description {
        preset = preset.with_description(desc);
    }
    if high_sensitivity {
        preset = preset.with_sensitivity(knockdog_config::Sensitivity::High);
    }
    if wireless {
        preset = preset.with_bell_tuning(knockdog_config::BellTuning::Wireless785);
    }

    preset.save(&preset_path)?;
    println!("Saved preset '{name}' to {}", preset_path.display());
    Ok(())
}

fn delete_preset(name: &str, force: bool) -> anyhow::Result<()> {
    if get_factory_preset(name).is_some() {
        anyhow::bail!("Cannot delete factory preset '{name}'. Factory presets are built-in.");
    }

    let preset_path = user_presets_dir().join(format!("{name}.toml"));
    if !preset_path.exists() {
        anyhow::bail!("User preset '{name}' not found.");
    }

    if !force {
        anyhow::bail!("Use --force to confirm deletion of preset '{name}'.");
    }

    std::fs::remove_file(&preset_path)?;
    println!("Deleted preset '{name}'.");
    Ok(())
}

fn copy_preset(source: &str, new_name: Option<&str>) -> anyhow::Result<()> {
    let preset = get_factory_preset(source).ok_or_else(|| anyhow::anyhow!("Factory preset '{source}' not found."))?;

    let target_name = new_name.unwrap_or(source);
    ensure_user_presets_dir()?;

    let preset_path = user_presets_dir().join(format!("{target_name}.toml"));
    if preset_path.exists() {
        anyhow::bail!("Preset '{target_name}' already exists in user presets. Choose a different name with --name.");
    }

    let mut new_preset = DetectorPreset::new(target_name);
    if let Some(desc) = &preset.description {
        new_preset = new_preset.with_description(format!("{desc} (copy)"));
    }
    new_preset = new_preset.with_sensitivity(preset.sensitivity).with_bell_tuning(preset.bell_tuning).with_diagnostics(preset.diagnostics).with_outputs(preset.outputs);

    new_preset.save(&preset_path)?;
    println!("Copied factory preset '{source}' to user preset '{target_name}'");
    println!("Path: {}", preset_path.display());
    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("Preset Directories:");
    println!("====================");
    println!();
    println!("User presets:   {}", user_presets_dir().display());
    println!("System presets: {}", knockdog_config::system_presets_dir().display());
    println!("Config dir:     {}", knockdog_config::user_config_dir().display());
    Ok(())
}
