//! Platform-specific paths for detector presets and configuration.
//!
//! # Directory Structure
//!
//! - **User presets**: `~/.config/knockdog/presets/` (Linux),
//!   `~/Library/Application Support/knockdog/presets/` (macOS),
//!   `%APPDATA%\knockdog\presets\` (Windows)
//! - **System presets**: `/usr/share/knockdog/presets/` (Linux)

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "knockdog";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
#[must_use]
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_NAME).join(PRESETS_SUBDIR)
}

/// Returns the user-specific configuration directory.
#[must_use]
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_NAME)
}

/// Returns the system-wide presets directory (read-only, factory presets).
#[must_use]
pub fn system_presets_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/usr/share").join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Application Support").join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(target_os = "windows")]
    {
        dirs::data_dir().unwrap_or_else(|| PathBuf::from("C:\\ProgramData")).join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_NAME).join(PRESETS_SUBDIR)
    }
}

/// Find a preset file by name or path.
///
/// Searches, in order: the name as a direct file path, the user presets
/// directory, then the system presets directory.
#[must_use]
pub fn find_preset(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") { name.to_string() } else { format!("{name}.toml") };

    let user_path = user_presets_dir().join(&filename);
    if user_path.is_file() {
        return Some(user_path);
    }

    let system_path = system_presets_dir().join(&filename);
    if system_path.is_file() {
        return Some(system_path);
    }

    None
}

/// Ensure the user presets directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_presets_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// List all preset files (`*.toml`) in the user presets directory.
#[must_use]
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// List all preset files (`*.toml`) in the system presets directory.
#[must_use]
pub fn list_system_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&system_presets_dir())
}

fn list_presets_in_dir(dir: &PathBuf) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect()
}

/// Extract a preset name (file stem) from a path.
#[must_use]
pub fn preset_name_from_path(path: &std::path::Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(std::string::ToString::to_string)
}
