//! Builds a preset programmatically, saves it, reloads it, and runs it
//! through a real `Analyzer`.

use knockdog_config::{DetectorPreset, OutputStreams, Sensitivity};

fn main() {
    let preset = DetectorPreset::new("demo")
        .with_description("printed from knockdog-config's example")
        .with_sensitivity(Sensitivity::High)
        .with_outputs(OutputStreams { window_level: true, ..OutputStreams::default() });

    println!("{}", preset.to_toml().unwrap());

    let mut analyzer = preset.analyzer();
    let flags = preset.flags();
    let silence = [0i16; 1600];
    let mut out = vec![0i16; silence.len() * flags.output_stream_count()];
    let detections = analyzer.process(&silence, Some(&mut out), flags, None);

    println!("detections: {detections:?}");
}
