//! One module per subcommand, mirroring `main.rs`'s `Commands` enum.

pub mod analyze;
pub mod devices;
pub mod info;
pub mod presets;
pub mod process;
pub mod realtime;

/// Load a preset by name or path.
///
/// Searches in this order: factory presets, user presets, system presets,
/// then a direct file path.
pub fn load_preset(name: &str) -> anyhow::Result<knockdog_config::DetectorPreset> {
    if let Some(preset) = knockdog_config::get_factory_preset(name) {
        return Ok(preset);
    }

    if let Some(path) = knockdog_config::find_preset(name) {
        return knockdog_config::DetectorPreset::load(&path).map_err(|e| anyhow::anyhow!("{e}"));
    }

    let path = std::path::PathBuf::from(name);
    if path.exists() {
        return knockdog_config::DetectorPreset::load(&path).map_err(|e| anyhow::anyhow!("{e}"));
    }

    anyhow::bail!("preset '{name}' not found. Use 'knockdog presets list' to see available presets.")
}
