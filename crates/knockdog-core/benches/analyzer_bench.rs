//! Criterion benchmarks for the knockdog-core pipeline stages.
//!
//! Run with: cargo bench -p knockdog-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use knockdog_core::{Analyzer, BellResonator, Decorrelator, Flags, MagnitudeTracker, WindowEnergy};

const BLOCK_SIZES: &[usize] = &[64, 256, 1024, 4096];

fn generate_test_signal(size: usize) -> Vec<i16> {
    (0..size)
        .map(|i| {
            let t = i as f32 / 16_000.0;
            (8000.0 * (2.0 * std::f32::consts::PI * 440.0 * t).sin()) as i16
        })
        .collect()
}

fn bench_decorrelator(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decorrelator");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(BenchmarkId::from_parameter(block_size), &block_size, |b, _| {
            let mut decorrelator = Decorrelator::new();
            b.iter(|| {
                for &sample in &input {
                    black_box(decorrelator.process(black_box(sample)));
                }
            });
        });
    }

    group.finish();
}

fn bench_magnitude_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("MagnitudeTracker");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(BenchmarkId::from_parameter(block_size), &block_size, |b, _| {
            let mut tracker = MagnitudeTracker::new();
            b.iter(|| {
                for &sample in &input {
                    black_box(tracker.process(black_box(sample)));
                }
            });
        });
    }

    group.finish();
}

fn bench_window_energy(c: &mut Criterion) {
    let mut group = c.benchmark_group("WindowEnergy");

    for &block_size in BLOCK_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(block_size), &block_size, |b, &size| {
            let mut window = WindowEnergy::new();
            b.iter(|| {
                for i in 0..size {
                    black_box(window.process(black_box((i % 200) as f32)));
                }
            });
        });
    }

    group.finish();
}

fn bench_bell_resonator(c: &mut Criterion) {
    let mut group = c.benchmark_group("BellResonator");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(BenchmarkId::from_parameter(block_size), &block_size, |b, _| {
            let mut bell = BellResonator::new();
            b.iter(|| {
                for &sample in &input {
                    black_box(bell.process(black_box(f32::from(sample))));
                }
            });
        });
    }

    group.finish();
}

fn bench_analyzer_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("Analyzer::process");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(BenchmarkId::from_parameter(block_size), &block_size, |b, _| {
            let mut analyzer = Analyzer::new();
            b.iter(|| {
                black_box(analyzer.process(black_box(&input), None, Flags::empty(), None));
            });
        });
    }

    // Every output stream enabled — the worst case for the per-sample write path.
    group.bench_function("all_output_streams", |b| {
        let input = generate_test_signal(1024);
        let flags = Flags::ALL_OUTPUTS;
        let mut out = vec![0i16; input.len() * flags.output_stream_count()];
        let mut analyzer = Analyzer::new();
        b.iter(|| {
            black_box(analyzer.process(black_box(&input), Some(&mut out), flags, None));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_decorrelator,
    bench_magnitude_tracker,
    bench_window_energy,
    bench_bell_resonator,
    bench_analyzer_process,
);

criterion_main!(benches);
