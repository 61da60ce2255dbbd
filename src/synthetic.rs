// ABOUTME: Synthetic accelerometer signals for replaying deterministic walks
// ABOUTME: Periodic spike trains and smooth gait waves along the vertical axis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use stepwise_core::constants::tuning::DEFAULT_COUNTS_PER_G;
use stepwise_core::AccelReading;

/// Shape of the vertical signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    /// `spike` on every positive multiple of the step period, `baseline` elsewhere
    Spike,
    /// `baseline + amplitude·sin(2π·t / step_period)`
    Sine,
}

/// Deterministic walking signal along z
///
/// ```
/// use stepwise::SyntheticWalk;
///
/// let walk = SyntheticWalk::spikes(20, 500, 1000, 3000, 1000);
/// let spikes = walk.readings().filter(|r| r.z == 3000).count();
/// assert_eq!(spikes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticWalk {
    /// Time between readings (ms)
    pub sample_period_ms: u64,
    /// Time between steps (ms)
    pub step_period_ms: u64,
    /// Resting z value
    pub baseline: i32,
    /// Peak z value (spike) or crest (sine)
    pub spike: i32,
    /// Length of the walk (ms), inclusive
    pub duration_ms: u64,
    /// Signal shape
    pub waveform: Waveform,
}

impl Default for SyntheticWalk {
    fn default() -> Self {
        Self::spikes(20, 500, DEFAULT_COUNTS_PER_G, 3 * DEFAULT_COUNTS_PER_G, 60_000)
    }
}

impl SyntheticWalk {
    /// Spike train with one spike per step period
    #[must_use]
    pub const fn spikes(
        sample_period_ms: u64,
        step_period_ms: u64,
        baseline: i32,
        spike: i32,
        duration_ms: u64,
    ) -> Self {
        Self {
            sample_period_ms,
            step_period_ms,
            baseline,
            spike,
            duration_ms,
            waveform: Waveform::Spike,
        }
    }

    /// Smooth gait wave oscillating between `2·baseline - crest` and `crest`
    #[must_use]
    pub const fn sinusoidal(
        sample_period_ms: u64,
        step_period_ms: u64,
        baseline: i32,
        crest: i32,
        duration_ms: u64,
    ) -> Self {
        Self {
            sample_period_ms,
            step_period_ms,
            baseline,
            spike: crest,
            duration_ms,
            waveform: Waveform::Sine,
        }
    }

    /// Number of readings the walk produces
    #[must_use]
    pub const fn len(&self) -> u64 {
        if self.sample_period_ms == 0 {
            return 0;
        }
        self.duration_ms / self.sample_period_ms + 1
    }

    /// Whether the walk produces no readings
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reading at `time_ms`
    #[must_use]
    pub fn reading_at(&self, time_ms: u64) -> AccelReading {
        AccelReading::new(time_ms, 0, 0, self.z_at(time_ms))
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)] // Safe: bounded by baseline ± amplitude
    fn z_at(&self, time_ms: u64) -> i32 {
        if self.step_period_ms == 0 {
            return self.baseline;
        }
        match self.waveform {
            Waveform::Spike => {
                if time_ms > 0 && time_ms % self.step_period_ms == 0 {
                    self.spike
                } else {
                    self.baseline
                }
            }
            Waveform::Sine => {
                let amplitude = f64::from(self.spike) - f64::from(self.baseline);
                let phase = TAU * time_ms as f64 / self.step_period_ms as f64;
                amplitude.mul_add(phase.sin(), f64::from(self.baseline)).round() as i32
            }
        }
    }

    /// Iterate over the readings in time order
    pub fn readings(&self) -> impl Iterator<Item = AccelReading> + '_ {
        (0..self.len()).map(move |index| self.reading_at(index * self.sample_period_ms))
    }
}
