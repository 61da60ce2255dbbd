// ABOUTME: Constants for the step counting pipeline organized by domain
// ABOUTME: Tuning defaults, buffer capacities, physiology coefficients and MET breakpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

//! Pipeline constants.
//!
//! Defaults here are the values the engine starts with; the runtime
//! `TuningConfig` can override every entry under [`tuning`].

/// Default tuning values behind `TuningConfig::default`
pub mod tuning {
    /// Scoring window length in samples
    pub const DEFAULT_WINDOW_SIZE: usize = 10;

    /// Smallest scoring window (score divides by `window_size - 1`)
    pub const MIN_WINDOW_SIZE: usize = 2;

    /// Largest scoring window, equal to the scoring buffer capacity
    pub const MAX_WINDOW_SIZE: usize = 64;

    /// Whole standard-deviation multiplier of the detection threshold
    pub const DEFAULT_THRESHOLD_INT: i32 = 0;

    /// Standard-deviation divisor of the detection threshold
    pub const DEFAULT_THRESHOLD_FRAC: i32 = 6;

    /// Minimum time between two counted steps (ms); 3 steps/s is a reasonable maximum
    pub const DEFAULT_TIME_THRESHOLD_MS: u64 = 300;

    /// Peak-to-peak magnitude range above which the motion gate opens
    pub const DEFAULT_MOTION_THRESHOLD: i32 = 150;

    /// Accelerometer counts per 1 g (milli-g input)
    pub const DEFAULT_COUNTS_PER_G: i32 = 1000;

    /// Cadence separating short and long steps (steps per second)
    pub const DEFAULT_REFERENCE_CADENCE_HZ: f64 = 1.6;
}

/// Stage geometry: window lengths and fixed buffer capacities
pub mod stages {
    /// Samples the motion gate waits for before deciding
    pub const MOTION_GATE_MIN_BUFFERED: usize = 15;

    /// Oldest samples inspected for the peak-to-peak range
    pub const MOTION_GATE_WINDOW: usize = 12;

    /// Motion gate buffer capacity
    pub const MOTION_GATE_CAPACITY: usize = 16;

    /// FIR filter length
    pub const FILTER_TAP_COUNT: usize = 17;

    /// Fixed-point scale of the FIR coefficients
    pub const FILTER_SHIFT: u32 = 16;

    /// Score samples required before peaks may be flagged
    pub const DETECTION_WARMUP: u64 = 15;
}

/// Physiology coefficients for BMR and stride estimation
///
/// References:
/// - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
///   *American Journal of Clinical Nutrition*, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
pub mod physiology {
    /// Mifflin-St Jeor weight coefficient
    pub const MSJ_WEIGHT_COEF: f64 = 10.0;

    /// Mifflin-St Jeor height coefficient
    pub const MSJ_HEIGHT_COEF: f64 = 6.25;

    /// Mifflin-St Jeor age coefficient
    pub const MSJ_AGE_COEF: f64 = -5.0;

    /// Mifflin-St Jeor male constant
    pub const MSJ_MALE_CONSTANT: f64 = 5.0;

    /// Mifflin-St Jeor female constant
    pub const MSJ_FEMALE_CONSTANT: f64 = -161.0;

    /// Lower bound on daily BMR (kcal/day)
    pub const MIN_BMR_KCAL_PER_DAY: f64 = 1000.0;

    /// Stride length as a fraction of height, men
    pub const MALE_STRIDE_FACTOR: f64 = 0.415;

    /// Stride length as a fraction of height, women
    pub const FEMALE_STRIDE_FACTOR: f64 = 0.413;

    /// Minutes per day
    pub const MINUTES_PER_DAY: f64 = 1440.0;

    /// Milliseconds per day
    pub const MS_PER_DAY: f64 = 86_400_000.0;

    /// Milliseconds per minute
    pub const MS_PER_MINUTE: f64 = 60_000.0;

    /// Standard gravity (m/s²)
    pub const STANDARD_GRAVITY: f64 = 9.806_65;
}

/// MET breakpoints as `(exclusive upper bound, MET)` pairs, first match wins
pub mod met {
    /// Detection stage: score magnitude to MET
    pub const SCORE_BREAKPOINTS: [(i32, u8); 7] = [
        (200, 1),
        (500, 2),
        (800, 5),
        (1000, 10),
        (1500, 13),
        (2000, 15),
        (2500, 17),
    ];

    /// Detection stage MET at or above the last breakpoint
    pub const SCORE_CEILING_MET: u8 = 23;

    /// Post-processing stage: raw dynamic acceleration (m/s²) to MET
    pub const RAW_BREAKPOINTS: [(i32, u8); 5] = [(5, 2), (10, 4), (15, 9), (20, 12), (25, 17)];

    /// Post-processing stage MET at or above the last breakpoint
    pub const RAW_CEILING_MET: u8 = 23;
}
