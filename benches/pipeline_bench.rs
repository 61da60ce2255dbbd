// ABOUTME: Criterion benchmarks for the step counting pipeline
// ABOUTME: Measures per-sample throughput of each topology over synthetic walks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

//! Criterion benchmarks for the step counting pipeline.
//!
//! Measures the cost of pushing readings through each topology and the
//! cost of the windowed stages in isolation.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stepwise::pipeline::{CalorieAccumulator, ScoringStage, SmoothingFilter, Stage};
use stepwise::{
    AccelReading, PipelineTopology, Sample, StepCounter, SyntheticWalk, TuningConfig, UserProfile,
};

/// One minute of 50 Hz readings
fn walk_readings() -> Vec<AccelReading> {
    SyntheticWalk::sinusoidal(20, 500, 1000, 1800, 60_000)
        .readings()
        .collect()
}

fn bench_topologies(c: &mut Criterion) {
    let readings = walk_readings();
    let mut group = c.benchmark_group("topology");
    group.throughput(Throughput::Elements(readings.len() as u64));

    for topology in [
        PipelineTopology::Direct,
        PipelineTopology::Filtered,
        PipelineTopology::MotionGated,
    ] {
        let tuning = TuningConfig {
            topology,
            ..TuningConfig::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(topology),
            &readings,
            |b, readings| {
                b.iter(|| {
                    let Ok(mut counter) = StepCounter::new(UserProfile::default(), tuning.clone())
                    else {
                        return 0;
                    };
                    for reading in readings {
                        counter.process_reading(black_box(*reading));
                    }
                    counter.steps()
                });
            },
        );
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let samples: Vec<Sample> = walk_readings()
        .iter()
        .map(|r| Sample::new(r.time_ms, r.z, 0))
        .collect();
    let mut group = c.benchmark_group("stage");
    group.throughput(Throughput::Elements(samples.len() as u64));

    group.bench_function("fir_filter", |b| {
        b.iter(|| {
            let mut filter = SmoothingFilter::new();
            let mut calories = CalorieAccumulator::default();
            samples
                .iter()
                .filter_map(|s| filter.deliver(black_box(*s), &mut calories))
                .count()
        });
    });

    for window_size in [10_usize, 32, 64] {
        group.bench_with_input(
            BenchmarkId::new("scoring", window_size),
            &window_size,
            |b, &window_size| {
                b.iter(|| {
                    let Ok(mut scoring) = ScoringStage::new(window_size) else {
                        return 0;
                    };
                    let mut calories = CalorieAccumulator::default();
                    samples
                        .iter()
                        .filter_map(|s| scoring.deliver(black_box(*s), &mut calories))
                        .count()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_topologies, bench_stages);
criterion_main!(benches);
