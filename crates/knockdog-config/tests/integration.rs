//! End-to-end preset round-trips through the filesystem and into an
//! `Analyzer`.

use knockdog_config::{factory_presets, get_factory_preset, DetectorPreset, Sensitivity};
use tempfile::TempDir;

#[test]
fn saved_preset_loads_back_identically() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mine.toml");

    let original = DetectorPreset::new("mine").with_description("test preset").with_sensitivity(Sensitivity::High);
    original.save(&path).unwrap();

    let loaded = DetectorPreset::load(&path).unwrap();
    assert_eq!(original, loaded);
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("mine.toml");

    let preset = DetectorPreset::new("mine");
    preset.save(&path).unwrap();

    assert!(path.exists());
}

#[test]
fn all_factory_presets_round_trip_through_toml() {
    for preset in factory_presets() {
        let toml = preset.to_toml().unwrap();
        let parsed = DetectorPreset::from_toml(&toml).unwrap();
        assert_eq!(preset, parsed);
    }
}

#[test]
fn factory_preset_flags_drive_a_real_analyzer() {
    let preset = get_factory_preset("high_sensitivity").unwrap();
    let mut analyzer = preset.analyzer();
    let flags = preset.flags();
    assert!(flags.contains(knockdog_core::Flags::HIGH_SENSITIVITY));

    let detections = analyzer.process(&[0i16; 16_000], None, flags, None);
    assert!(detections.is_empty());
}

#[test]
fn save_rejects_unsafe_preset_name() {
    let dir = TempDir::new().unwrap();
    let preset = DetectorPreset::new("../escape");
    let result = preset.save(dir.path().join("whatever.toml"));
    assert!(result.is_err());
}
