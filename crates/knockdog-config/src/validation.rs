//! Preset validation.
//!
//! Presets are mostly closed-world enums that `serde` already rejects if
//! malformed; what's left to validate is the one free-form field — the
//! preset name — since it doubles as a filesystem file stem when saved
//! under [`crate::paths::user_presets_dir`].

use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The preset name was empty.
    #[error("preset name must not be empty")]
    EmptyName,

    /// The preset name contains characters unsafe for use as a filename.
    #[error("preset name '{0}' contains path separators or '..'")]
    UnsafeName(String),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a [`crate::DetectorPreset`]'s name.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] or [`ValidationError::UnsafeName`].
pub fn validate_preset(preset: &crate::DetectorPreset) -> ValidationResult<()> {
    validate_preset_name(&preset.name)
}

/// Validate a preset name in isolation (used before it is even wrapped in
/// a [`crate::DetectorPreset`], e.g. by the `presets save` CLI command).
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] if `name` is empty, or
/// [`ValidationError::UnsafeName`] if it contains `/`, `\`, or `..`.
pub fn validate_preset_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ValidationError::UnsafeName(name.to_string()));
    }
    Ok(())
}
