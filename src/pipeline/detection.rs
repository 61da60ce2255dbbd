// ABOUTME: Detection stage flagging step peaks against an adaptive mean/std threshold
// ABOUTME: Maintains single-pass running statistics, classifies MET and accrues activity calories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors
#![allow(clippy::cast_precision_loss)] // Safe: sample counts stay far below 2^52

//! Peak detection.
//!
//! Every score sample updates [`RunningStats`]. After the warm-up period a
//! sample is a peak when it rises above the running mean by more than
//! `std × threshold_int + std / threshold_frac`.

use super::energy::CalorieAccumulator;
use super::Stage;
use serde::{Deserialize, Serialize};
use stepwise_core::constants::met::{SCORE_BREAKPOINTS, SCORE_CEILING_MET};
use stepwise_core::constants::stages::DETECTION_WARMUP;
use stepwise_core::constants::tuning::{DEFAULT_THRESHOLD_FRAC, DEFAULT_THRESHOLD_INT};
use stepwise_core::{ConfigError, ConfigResult, Sample};

/// Incrementally maintained statistics of the score stream
///
/// Updated with a fixed single-pass recurrence, never by revisiting history:
///
/// - `n = 1`: `mean = x`, `std = 0`
/// - `n = 2`: `mean = (mean' + x) / 2`, `std = sqrt((x - mean)² + (mean' - mean)²) / 2`
/// - `n > 2`: `mean = (x + (n - 1)·mean') / n`,
///   `std = sqrt(std'²/(n - 1)·(n - 2) + (mean' - mean)² + (x - mean)²/n)`
///
/// `raw_mean` follows the same mean recurrence over `raw_magnitude`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningStats {
    /// Number of samples folded in
    pub count: u64,
    /// Running mean of the score
    pub mean: f64,
    /// Running spread of the score
    pub std_dev: f64,
    /// Running mean of the raw dynamic magnitude
    pub raw_mean: f64,
}

impl RunningStats {
    /// Fold one sample into the statistics
    pub fn update(&mut self, value: f64, raw: f64) {
        let old_mean = self.mean;
        self.count += 1;
        let n = self.count as f64;

        match self.count {
            1 => {
                self.mean = value;
                self.std_dev = 0.0;
                self.raw_mean = raw;
            }
            2 => {
                self.mean = (old_mean + value) / 2.0;
                self.raw_mean = (self.raw_mean + raw) / 2.0;
                let spread = (value - self.mean).powi(2) + (old_mean - self.mean).powi(2);
                self.std_dev = spread.sqrt() / 2.0;
            }
            _ => {
                self.mean = (n - 1.0).mul_add(old_mean, value) / n;
                self.raw_mean = (n - 1.0).mul_add(self.raw_mean, raw) / n;
                let carried = self.std_dev.powi(2) / (n - 1.0) * (n - 2.0);
                let shift = (old_mean - self.mean).powi(2);
                let fresh = (value - self.mean).powi(2) / n;
                self.std_dev = (carried + shift + fresh).sqrt();
            }
        }
    }

    /// Forget all samples
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Map a peak score to a MET class, first matching breakpoint wins
///
/// Scores at or above the last breakpoint (2500) map to 23.
#[must_use]
pub fn classify_score_met(magnitude: i32) -> u8 {
    SCORE_BREAKPOINTS
        .iter()
        .find(|(bound, _)| magnitude < *bound)
        .map_or(SCORE_CEILING_MET, |(_, met)| *met)
}

/// Adaptive-threshold peak detector
#[derive(Debug, Clone)]
pub struct DetectionStage {
    stats: RunningStats,
    threshold_int: i32,
    threshold_frac: i32,
    last_peak_ms: Option<u64>,
}

impl Default for DetectionStage {
    fn default() -> Self {
        Self {
            stats: RunningStats::default(),
            threshold_int: DEFAULT_THRESHOLD_INT,
            threshold_frac: DEFAULT_THRESHOLD_FRAC,
            last_peak_ms: None,
        }
    }
}

impl DetectionStage {
    /// Create a detector with the given threshold pair
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidThreshold` if the pair is rejected by
    /// [`DetectionStage::validate_threshold`]
    pub fn new(threshold_int: i32, threshold_frac: i32) -> ConfigResult<Self> {
        let mut stage = Self::default();
        stage.set_threshold(threshold_int, threshold_frac)?;
        Ok(stage)
    }

    /// Check a threshold pair
    ///
    /// The whole multiplier must be non-negative and the divisor strictly
    /// positive.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidThreshold` describing the violation
    pub const fn validate_threshold(threshold_int: i32, threshold_frac: i32) -> ConfigResult<()> {
        if threshold_int < 0 {
            return Err(ConfigError::InvalidThreshold {
                whole: threshold_int,
                frac: threshold_frac,
                reason: "whole multiplier must not be negative",
            });
        }
        if threshold_frac <= 0 {
            return Err(ConfigError::InvalidThreshold {
                whole: threshold_int,
                frac: threshold_frac,
                reason: "divisor must be positive",
            });
        }
        Ok(())
    }

    /// Replace the threshold pair
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidThreshold`; the previous pair stays active
    pub fn set_threshold(&mut self, threshold_int: i32, threshold_frac: i32) -> ConfigResult<()> {
        Self::validate_threshold(threshold_int, threshold_frac)?;
        self.threshold_int = threshold_int;
        self.threshold_frac = threshold_frac;
        Ok(())
    }

    /// Active threshold pair `(whole, frac)`
    #[must_use]
    pub const fn threshold(&self) -> (i32, i32) {
        (self.threshold_int, self.threshold_frac)
    }

    /// Snapshot of the running statistics
    #[must_use]
    pub const fn stats(&self) -> RunningStats {
        self.stats
    }

    /// Margin above the mean a score must exceed
    fn margin(&self) -> f64 {
        let std_dev = self.stats.std_dev;
        std_dev.mul_add(
            f64::from(self.threshold_int),
            std_dev / f64::from(self.threshold_frac),
        )
    }
}

impl Stage for DetectionStage {
    type Input = Sample;
    type Output = Sample;

    fn deliver(&mut self, sample: Sample, calories: &mut CalorieAccumulator) -> Option<Sample> {
        let value = f64::from(sample.magnitude);
        self.stats.update(value, f64::from(sample.raw_magnitude));

        if self.stats.count <= DETECTION_WARMUP || value - self.stats.mean <= self.margin() {
            return None;
        }

        let mut peak = sample;
        peak.peak_interval_ms = self
            .last_peak_ms
            .map_or(0, |last| peak.time_ms.saturating_sub(last));
        peak.met = classify_score_met(peak.magnitude);
        calories.add_active(peak.met, peak.peak_interval_ms);
        self.last_peak_ms = Some(peak.time_ms);
        Some(peak)
    }

    fn reset(&mut self) {
        self.stats.clear();
        self.last_peak_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_sample_spread() {
        let mut stats = RunningStats::default();
        stats.update(0.0, 0.0);
        stats.update(2.0, 4.0);
        assert!((stats.mean - 1.0).abs() < 1e-12);
        assert!((stats.raw_mean - 2.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0_f64.sqrt() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_margin_uses_both_terms() {
        let mut stage = DetectionStage::new(1, 2).unwrap_or_default();
        stage.stats.std_dev = 6.0;
        assert!((stage.margin() - 9.0).abs() < 1e-12);
    }
}
