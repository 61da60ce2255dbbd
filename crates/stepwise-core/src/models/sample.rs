// ABOUTME: Sample records threaded stage-to-stage through the step counting pipeline
// ABOUTME: Defines raw accelerometer readings, per-stage samples, step weights and step events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

use serde::{Deserialize, Serialize};

/// One raw 3-axis accelerometer reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccelReading {
    /// Timestamp in milliseconds
    pub time_ms: u64,
    /// X axis in sensor counts
    pub x: i32,
    /// Y axis in sensor counts
    pub y: i32,
    /// Z axis in sensor counts
    pub z: i32,
}

impl AccelReading {
    /// Create a reading
    #[must_use]
    pub const fn new(time_ms: u64, x: i32, y: i32, z: i32) -> Self {
        Self { time_ms, x, y, z }
    }
}

/// A value passed from stage to stage
///
/// Each stage populates only the fields it owns: preprocessing sets the two
/// magnitudes, filtering and scoring rewrite `magnitude`, detection sets
/// `peak_interval_ms` and `met`, post-processing sets `step_weight` and
/// overwrites `met` with the step-level class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Timestamp in milliseconds
    pub time_ms: u64,
    /// Working magnitude (norm, filtered value or peak score depending on stage)
    pub magnitude: i32,
    /// Dynamic acceleration in m/s², carried unfiltered for MET classification
    pub raw_magnitude: i32,
    /// Time since the previous peak (ms)
    pub peak_interval_ms: u64,
    /// Metabolic equivalent class
    pub met: u8,
    /// Step weighting factor
    pub step_weight: f32,
}

impl Sample {
    /// Create a sample carrying only time and magnitudes
    #[must_use]
    pub const fn new(time_ms: u64, magnitude: i32, raw_magnitude: i32) -> Self {
        Self {
            time_ms,
            magnitude,
            raw_magnitude,
            peak_interval_ms: 0,
            met: 0,
            step_weight: 0.0,
        }
    }
}

/// Step weighting derived from cadence against a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepWeight {
    /// Slower than the reference cadence
    Short,
    /// Exactly at the reference cadence
    Normal,
    /// Faster than the reference cadence
    Long,
}

impl StepWeight {
    /// Numeric weighting factor
    #[must_use]
    pub const fn factor(self) -> f32 {
        match self {
            Self::Short => 0.5,
            Self::Normal => 1.0,
            Self::Long => 1.5,
        }
    }
}

/// Emitted once per counted step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepEvent {
    /// Time of the peak that completed the step (ms)
    pub time_ms: u64,
    /// Time since the previous counted step or candidate (ms)
    pub interval_ms: u64,
    /// Mean step interval since the last reset (ms)
    pub mean_interval_ms: f64,
    /// Peak score magnitude
    pub magnitude: i32,
    /// Dynamic acceleration at the peak (m/s²)
    pub raw_magnitude: i32,
    /// Step-level MET class
    pub met: u8,
    /// Cadence weighting
    pub weight: StepWeight,
}
