// ABOUTME: Tests for the preprocessing, motion gate, FIR smoothing and scoring stages
// ABOUTME: Validates magnitudes, gating and resting calories, filter gain and window scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use stepwise::pipeline::filter::FILTER_TAPS;
use stepwise::pipeline::{
    CalorieAccumulator, MotionGate, PreprocessStage, ScoringStage, SmoothingFilter, Stage,
};
use stepwise::{AccelReading, ConfigError, Sample};

fn sample(time_ms: u64, magnitude: i32) -> Sample {
    Sample::new(time_ms, magnitude, 0)
}

// ============================================================================
// Preprocessing
// ============================================================================

#[test]
fn test_preprocess_magnitudes() {
    let mut stage = PreprocessStage::default();
    let mut calories = CalorieAccumulator::default();

    let rest = stage
        .deliver(AccelReading::new(0, 0, 0, 1000), &mut calories)
        .unwrap();
    assert_eq!(rest.magnitude, 1000);
    assert_eq!(rest.raw_magnitude, 0);

    let spike = stage
        .deliver(AccelReading::new(20, 0, 0, 3000), &mut calories)
        .unwrap();
    assert_eq!(spike.magnitude, 3000);
    // |3000 - 1000| counts = 2 g = 19.6 m/s²
    assert_eq!(spike.raw_magnitude, 20);

    let diagonal = stage
        .deliver(AccelReading::new(40, 3, -4, 0), &mut calories)
        .unwrap();
    assert_eq!(diagonal.magnitude, 5);
    assert_eq!(diagonal.time_ms, 40);
}

#[test]
fn test_preprocess_floors_norm() {
    let mut stage = PreprocessStage::default();
    let mut calories = CalorieAccumulator::default();
    let out = stage
        .deliver(AccelReading::new(0, 1, 1, 1), &mut calories)
        .unwrap();
    assert_eq!(out.magnitude, 1);
}

#[test]
fn test_preprocess_elapsed_never_decreases() {
    let mut stage = PreprocessStage::default();
    let mut calories = CalorieAccumulator::default();
    for time_ms in [100, 300, 200] {
        stage.deliver(AccelReading::new(time_ms, 0, 0, 1000), &mut calories);
    }
    assert_eq!(stage.elapsed_ms(), 200);

    stage.reset();
    assert_eq!(stage.elapsed_ms(), 0);
}

// ============================================================================
// Motion gate
// ============================================================================

#[test]
fn test_motion_gate_waits_for_fifteen_samples() {
    let mut gate = MotionGate::new(150);
    let mut calories = CalorieAccumulator::new(1.0);
    for index in 0..14 {
        let magnitude = if index % 2 == 0 { 0 } else { 1000 };
        assert!(gate.deliver(sample(index * 20, magnitude), &mut calories).is_none());
    }
    assert_eq!(gate.buffered(), 14);
    assert_eq!(calories.total_kcal(), 0.0);

    let forwarded = gate.deliver(sample(280, 1000), &mut calories).unwrap();
    assert_eq!(forwarded.time_ms, 0);
    assert_eq!(gate.buffered(), 14);
}

#[test]
fn test_motion_gate_bills_motionless_gaps_once() {
    let mut gate = MotionGate::new(150);
    let mut calories = CalorieAccumulator::new(1.0);
    for index in 0..20 {
        assert!(gate.deliver(sample(index * 20, 1000), &mut calories).is_none());
    }
    // Six decisions below threshold, each billing one 20 ms gap
    assert_eq!(calories.total_kcal(), 120.0);
    assert!(gate.buffered() < 15);
}

#[test]
fn test_motion_gate_threshold_is_exclusive() {
    let mut gate = MotionGate::new(150);
    let mut calories = CalorieAccumulator::default();
    for index in 0..14 {
        let magnitude = if index == 3 { 1150 } else { 1000 };
        gate.deliver(sample(index * 20, magnitude), &mut calories);
    }
    assert!(gate.deliver(sample(280, 1000), &mut calories).is_none());

    gate.reset();
    gate.set_threshold(149);
    for index in 0..14 {
        let magnitude = if index == 3 { 1150 } else { 1000 };
        gate.deliver(sample(index * 20, magnitude), &mut calories);
    }
    assert!(gate.deliver(sample(280, 1000), &mut calories).is_some());
}

// ============================================================================
// FIR smoothing
// ============================================================================

#[test]
fn test_filter_constant_input_gain() {
    let tap_sum: i64 = FILTER_TAPS.iter().copied().map(i64::from).sum();
    assert_eq!(tap_sum, 2_642_553_922);

    let mut filter = SmoothingFilter::new();
    let mut calories = CalorieAccumulator::default();
    for index in 0..16 {
        assert!(filter.deliver(sample(index, 1000), &mut calories).is_none());
    }
    let out = filter.deliver(sample(16, 1000), &mut calories).unwrap();
    assert_eq!(out.magnitude, 40_322_172);
    assert_eq!(i64::from(out.magnitude), (1000 * tap_sum) >> 16);
}

#[test]
fn test_filter_fires_on_every_sample_once_full() {
    let mut filter = SmoothingFilter::new();
    let mut calories = CalorieAccumulator::default();
    let outputs: Vec<Sample> = (0..30)
        .filter_map(|index| {
            filter.deliver(Sample::new(index * 20, 100, 7), &mut calories)
        })
        .collect();
    assert_eq!(outputs.len(), 14);
    assert!(outputs.iter().all(|s| s.magnitude == 4_032_217));
    // Stamped with the newest input
    assert_eq!(outputs[0].time_ms, 16 * 20);
    assert_eq!(outputs[0].raw_magnitude, 7);
}

#[test]
fn test_filter_reset_requires_refill() {
    let mut filter = SmoothingFilter::new();
    let mut calories = CalorieAccumulator::default();
    for index in 0..17 {
        filter.deliver(sample(index, 10), &mut calories);
    }
    filter.reset();
    for index in 0..16 {
        assert!(filter.deliver(sample(index, 10), &mut calories).is_none());
    }
}

// ============================================================================
// Scoring
// ============================================================================

#[test]
fn test_scoring_symmetric_peak() {
    let mut scoring = ScoringStage::new(10).unwrap();
    let mut calories = CalorieAccumulator::default();
    for index in 0..9 {
        let magnitude = if index == 5 { 90 } else { 0 };
        assert!(scoring
            .deliver(Sample::new(index * 20, magnitude, 4), &mut calories)
            .is_none());
    }
    let score = scoring.deliver(sample(180, 0), &mut calories).unwrap();
    // (5·90 + 4·90) / 9
    assert_eq!(score.magnitude, 90);
    assert_eq!(score.time_ms, 100);
    assert_eq!(score.raw_magnitude, 4);
    assert_eq!(scoring.buffered(), 9);
}

#[test]
fn test_scoring_removes_midpoint_only() {
    let mut scoring = ScoringStage::new(4).unwrap();
    let mut calories = CalorieAccumulator::default();
    for (time_ms, magnitude) in [(0, 0), (1, 0), (2, 40), (3, 0)] {
        scoring.deliver(sample(time_ms, magnitude), &mut calories);
    }
    // Window is now [0@0, 0@1, 0@3]; the next score is centred on time 3
    let next = scoring.deliver(sample(4, 0), &mut calories).unwrap();
    assert_eq!(next.time_ms, 3);
    assert_eq!(next.magnitude, 0);
}

#[test]
fn test_scoring_saturates_instead_of_wrapping() {
    let mut calories = CalorieAccumulator::default();
    let mut scoring = ScoringStage::new(10).unwrap();
    let mut last = None;
    for index in 0..10 {
        let magnitude = if index == 5 { i32::MAX } else { 0 };
        last = scoring.deliver(sample(index, magnitude), &mut calories);
    }
    assert_eq!(last.unwrap().magnitude, i32::MAX / 9);

    let mut scoring = ScoringStage::new(10).unwrap();
    let mut last = None;
    for index in 0..10 {
        let magnitude = if index == 5 { i32::MIN } else { i32::MAX };
        last = scoring.deliver(sample(index, magnitude), &mut calories);
    }
    assert_eq!(last.unwrap().magnitude, i32::MIN / 9);
}

#[test]
fn test_scoring_window_validation() {
    assert!(matches!(
        ScoringStage::new(1),
        Err(ConfigError::InvalidWindowSize { size: 1, .. })
    ));
    assert!(matches!(
        ScoringStage::new(65),
        Err(ConfigError::InvalidWindowSize { size: 65, .. })
    ));
    assert!(ScoringStage::new(2).is_ok());
    assert!(ScoringStage::new(64).is_ok());
}

#[test]
fn test_scoring_shrink_drops_oldest() {
    let mut scoring = ScoringStage::new(10).unwrap();
    let mut calories = CalorieAccumulator::default();
    for index in 0..8 {
        scoring.deliver(sample(index, 0), &mut calories);
    }
    scoring.set_window_size(4).unwrap();
    assert_eq!(scoring.buffered(), 3);
    assert_eq!(scoring.midpoint(), 2);

    let out = scoring.deliver(sample(8, 0), &mut calories).unwrap();
    // Oldest five dropped: window was [5, 6, 7, 8], midpoint at time 7
    assert_eq!(out.time_ms, 7);

    assert!(scoring.set_window_size(0).is_err());
    assert_eq!(scoring.window_size(), 4);
}
