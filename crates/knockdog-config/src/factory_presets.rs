//! Built-in presets bundled with the library, covering the common tuning
//! choices surfaced in `spec.md` §6: the two sensitivity modes, the two
//! bell tunings, and a diagnostics-heavy preset for bring-up on new
//! hardware.

use crate::preset::{BellTuning, Diagnostics, OutputStreams, Sensitivity};
use crate::DetectorPreset;

/// Names of every factory preset, in the order [`factory_presets`] returns them.
pub const FACTORY_PRESET_NAMES: &[&str] = &["default", "high_sensitivity", "wireless_doorbell", "diagnostic"];

/// The full list of factory presets.
#[must_use]
pub fn factory_presets() -> Vec<DetectorPreset> {
    vec![
        DetectorPreset::new("default").with_description("Low-sensitivity knock/ring detection for a 770 Hz wired doorbell."),
        DetectorPreset::new("high_sensitivity")
            .with_description("More permissive knock/ring acceptance; wakes up for quieter taps.")
            .with_sensitivity(Sensitivity::High),
        DetectorPreset::new("wireless_doorbell")
            .with_description("Tuned to a 785 Hz wireless doorbell chime instead of the wired 770 Hz default.")
            .with_bell_tuning(BellTuning::Wireless785),
        DetectorPreset::new("diagnostic")
            .with_description("Verbose text diagnostics plus window-energy and bell-level output streams, for bring-up.")
            .with_diagnostics(Diagnostics { thresholds: true, events: true, peaks: true })
            .with_outputs(OutputStreams { window_level: true, filter_level: true, ..OutputStreams::default() }),
    ]
}

/// Look up a factory preset by name.
#[must_use]
pub fn get_factory_preset(name: &str) -> Option<DetectorPreset> {
    factory_presets().into_iter().find(|p| p.name == name)
}

/// Whether `name` names a factory preset.
#[must_use]
pub fn is_factory_preset(name: &str) -> bool {
    FACTORY_PRESET_NAMES.contains(&name)
}

/// Names of every factory preset.
#[must_use]
pub fn factory_preset_names() -> &'static [&'static str] {
    FACTORY_PRESET_NAMES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_presets_match_declared_names() {
        let presets = factory_presets();
        let names: Vec<&str> = presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, FACTORY_PRESET_NAMES);
    }

    #[test]
    fn get_factory_preset_finds_by_name() {
        let preset = get_factory_preset("high_sensitivity").expect("should exist");
        assert_eq!(preset.sensitivity, Sensitivity::High);
    }

    #[test]
    fn get_factory_preset_returns_none_for_unknown() {
        assert!(get_factory_preset("not_a_real_preset").is_none());
    }

    #[test]
    fn is_factory_preset_recognizes_known_names() {
        assert!(is_factory_preset("default"));
        assert!(!is_factory_preset("my_custom_preset"));
    }

    #[test]
    fn wireless_doorbell_preset_uses_785hz_tuning() {
        let preset = get_factory_preset("wireless_doorbell").unwrap();
        assert_eq!(preset.bell_tuning, BellTuning::Wireless785);
    }

    #[test]
    fn diagnostic_preset_enables_all_disp_flags() {
        let preset = get_factory_preset("diagnostic").unwrap();
        assert!(preset.diagnostics.thresholds);
        assert!(preset.diagnostics.events);
        assert!(preset.diagnostics.peaks);
    }
}
