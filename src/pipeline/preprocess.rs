// ABOUTME: Preprocessing stage reducing 3-axis accelerometer readings to scalar magnitudes
// ABOUTME: Computes the vector norm, the gravity-removed raw magnitude, and tracks elapsed time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

use super::energy::CalorieAccumulator;
use super::Stage;
use stepwise_core::constants::{physiology::STANDARD_GRAVITY, tuning::DEFAULT_COUNTS_PER_G};
use stepwise_core::{AccelReading, Sample};

/// Derives magnitudes from raw readings
///
/// - `magnitude = floor(sqrt(x² + y² + z²))`, saturated to `i32`
/// - `raw_magnitude = round(|norm - counts_per_g| × g / counts_per_g)`, the
///   dynamic acceleration in m/s² with gravity removed
///
/// The stage keeps no per-sample state apart from the elapsed-time counter.
#[derive(Debug, Clone)]
pub struct PreprocessStage {
    counts_per_g: i32,
    first_time_ms: Option<u64>,
    last_time_ms: u64,
}

impl Default for PreprocessStage {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTS_PER_G)
    }
}

impl PreprocessStage {
    /// Create a stage for a sensor reporting `counts_per_g` counts per 1 g
    #[must_use]
    pub fn new(counts_per_g: i32) -> Self {
        Self {
            counts_per_g: counts_per_g.max(1),
            first_time_ms: None,
            last_time_ms: 0,
        }
    }

    /// Milliseconds between the first and the latest reading since reset
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.first_time_ms
            .map_or(0, |first| self.last_time_ms.saturating_sub(first))
    }

    /// Vector norm of a reading
    #[must_use]
    pub fn norm(reading: &AccelReading) -> f64 {
        let (x, y, z) = (
            f64::from(reading.x),
            f64::from(reading.y),
            f64::from(reading.z),
        );
        z.mul_add(z, x.mul_add(x, y * y)).sqrt()
    }

    #[allow(clippy::cast_possible_truncation)] // Safe: clamped to the i32 range first
    fn saturate(value: f64) -> i32 {
        value.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    }
}

impl Stage for PreprocessStage {
    type Input = AccelReading;
    type Output = Sample;

    fn deliver(
        &mut self,
        reading: AccelReading,
        _calories: &mut CalorieAccumulator,
    ) -> Option<Sample> {
        if self.first_time_ms.is_none() {
            self.first_time_ms = Some(reading.time_ms);
        }
        self.last_time_ms = self.last_time_ms.max(reading.time_ms);

        let norm = Self::norm(&reading);
        let counts_per_g = f64::from(self.counts_per_g);
        let dynamic = (norm - counts_per_g).abs() * STANDARD_GRAVITY / counts_per_g;

        Some(Sample::new(
            reading.time_ms,
            Self::saturate(norm.floor()),
            Self::saturate(dynamic.round()),
        ))
    }

    fn reset(&mut self) {
        self.first_time_ms = None;
        self.last_time_ms = 0;
    }
}
