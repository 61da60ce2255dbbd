// ABOUTME: Calorie accumulator shared by the motion gate and the detection stage
// ABOUTME: Converts MET-weighted intervals into kilocalories using the per-millisecond BMR
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

use serde::{Deserialize, Serialize};

/// Monotonically non-decreasing calorie total
///
/// The total only grows between explicit [`CalorieAccumulator::clear`] calls:
/// every contribution is a non-negative rate times a non-negative duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalorieAccumulator {
    total_kcal: f64,
    bmr_per_ms: f64,
}

impl CalorieAccumulator {
    /// Create an empty accumulator for the given basal rate
    #[must_use]
    pub fn new(bmr_per_ms: f64) -> Self {
        Self {
            total_kcal: 0.0,
            bmr_per_ms: bmr_per_ms.max(0.0),
        }
    }

    /// Replace the basal rate, keeping the accumulated total
    pub fn set_bmr_per_ms(&mut self, bmr_per_ms: f64) {
        self.bmr_per_ms = bmr_per_ms.max(0.0);
    }

    /// Basal rate in kcal per millisecond
    #[must_use]
    pub const fn bmr_per_ms(&self) -> f64 {
        self.bmr_per_ms
    }

    /// Add activity energy: `bmr_per_ms × met × interval_ms`
    #[allow(clippy::cast_precision_loss)] // Safe: step intervals are far below 2^52 ms
    pub fn add_active(&mut self, met: u8, interval_ms: u64) {
        self.total_kcal += self.bmr_per_ms * f64::from(met) * interval_ms as f64;
    }

    /// Add resting energy (MET 1) for motionless time
    #[allow(clippy::cast_precision_loss)] // Safe: sample gaps are far below 2^52 ms
    pub fn add_resting(&mut self, elapsed_ms: u64) {
        self.total_kcal += self.bmr_per_ms * elapsed_ms as f64;
    }

    /// Accumulated kilocalories
    #[must_use]
    pub const fn total_kcal(&self) -> f64 {
        self.total_kcal
    }

    /// Reset the total to zero
    pub fn clear(&mut self) {
        self.total_kcal = 0.0;
    }
}
