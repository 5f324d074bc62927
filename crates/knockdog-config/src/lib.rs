//! Detector presets, validation, and platform paths for `knockdog`.
//!
//! `knockdog-core`'s `Analyzer::process` takes a raw `Flags` bitfield plus a
//! `BellTuning` selection. This crate wraps that into a named,
//! TOML-persisted [`DetectorPreset`] — sensitivity mode, bell tuning, and
//! diagnostic/output stream selection in one file a user can hand-edit —
//! the way `sonido-config::Preset` wraps an effect chain's parameters.
//!
//! # Example
//!
//! ```rust,no_run
//! use knockdog_config::{DetectorPreset, Sensitivity, user_presets_dir};
//!
//! let preset = DetectorPreset::new("hallway")
//!     .with_description("tuned for the front hallway sensor")
//!     .with_sensitivity(Sensitivity::High);
//!
//! preset.save(user_presets_dir().join("hallway.toml")).unwrap();
//!
//! let mut analyzer = preset.analyzer();
//! let flags = preset.flags();
//! let _ = analyzer.process(&[0i16; 1600], None, flags, None);
//! ```

mod error;
mod preset;

/// Platform-specific paths for presets and configuration.
pub mod paths;

/// Preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{factory_preset_names, factory_presets, get_factory_preset, is_factory_preset, FACTORY_PRESET_NAMES};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_system_presets, list_user_presets, preset_name_from_path, system_presets_dir,
    user_config_dir, user_presets_dir,
};
pub use preset::{BellTuning, Diagnostics, DetectorPreset, OutputStreams, Sensitivity};
pub use validation::{validate_preset, validate_preset_name, ValidationError, ValidationResult};
