// ABOUTME: Scoring stage turning the smoothed magnitude stream into a per-sample peakness score
// ABOUTME: Symmetric-window difference statistic with saturating 32-bit accumulation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

use super::energy::CalorieAccumulator;
use super::queue::BoundedQueue;
use super::Stage;
use std::ops::Range;
use stepwise_core::constants::tuning::{DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE, MIN_WINDOW_SIZE};
use stepwise_core::{ConfigError, ConfigResult, Sample};

/// Peakness score over a symmetric window
///
/// Once exactly `window_size` samples are buffered, the score of the element
/// at `midpoint = window_size / 2` is
///
/// ```text
/// (Σ_{i < mid} (m - s_i) + Σ_{i > mid} (m - s_i)) / (window_size - 1)
/// ```
///
/// with every partial sum clamped to the `i32` range. The midpoint element
/// itself is then removed from the window; its neighbours stay buffered.
#[derive(Debug, Clone)]
pub struct ScoringStage {
    window: BoundedQueue<Sample, MAX_WINDOW_SIZE>,
    window_size: usize,
    midpoint: usize,
}

impl Default for ScoringStage {
    fn default() -> Self {
        Self {
            window: BoundedQueue::new(),
            window_size: DEFAULT_WINDOW_SIZE,
            midpoint: DEFAULT_WINDOW_SIZE / 2,
        }
    }
}

impl ScoringStage {
    /// Create a stage with the given window size
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWindowSize` outside 2..=64
    pub fn new(window_size: usize) -> ConfigResult<Self> {
        let mut stage = Self::default();
        stage.set_window_size(window_size)?;
        Ok(stage)
    }

    /// Check a window size against the supported range
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWindowSize` outside 2..=64
    pub const fn validate_window_size(window_size: usize) -> ConfigResult<()> {
        if window_size < MIN_WINDOW_SIZE || window_size > MAX_WINDOW_SIZE {
            return Err(ConfigError::InvalidWindowSize {
                size: window_size,
                min: MIN_WINDOW_SIZE,
                max: MAX_WINDOW_SIZE,
            });
        }
        Ok(())
    }

    /// Resize the window and recompute the midpoint
    ///
    /// When shrinking, the oldest buffered samples are dropped until fewer
    /// than `window_size` remain, so the next sample can fire the stage.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWindowSize` outside 2..=64
    pub fn set_window_size(&mut self, window_size: usize) -> ConfigResult<()> {
        Self::validate_window_size(window_size)?;
        self.window_size = window_size;
        self.midpoint = window_size / 2;
        while self.window.len() >= window_size {
            self.window.dequeue();
        }
        Ok(())
    }

    /// Current window size
    #[must_use]
    pub const fn window_size(&self) -> usize {
        self.window_size
    }

    /// Index of the scored element inside the window
    #[must_use]
    pub const fn midpoint(&self) -> usize {
        self.midpoint
    }

    /// Samples currently buffered
    #[must_use]
    pub const fn buffered(&self) -> usize {
        self.window.len()
    }

    /// Clamp an `i64` into the `i32` range
    #[allow(clippy::cast_possible_truncation)] // Safe: clamped to the i32 range first
    fn saturate(value: i64) -> i32 {
        value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Saturating sum of `(mid - s_i)` over `range`
    fn difference_sum(&self, mid: i32, range: Range<usize>) -> i32 {
        range.fold(0_i32, |acc, offset| {
            let diff = i64::from(mid) - i64::from(self.window.peek(offset).magnitude);
            Self::saturate(i64::from(acc) + diff)
        })
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // Safe: window_size <= 64
    fn score(&self) -> (Sample, i32) {
        let mid = *self.window.peek(self.midpoint);
        let left = self.difference_sum(mid.magnitude, 0..self.midpoint);
        let right = self.difference_sum(mid.magnitude, self.midpoint + 1..self.window_size);
        let total = left.saturating_add(right);
        (mid, total / (self.window_size as i32 - 1))
    }
}

impl Stage for ScoringStage {
    type Input = Sample;
    type Output = Sample;

    fn deliver(&mut self, sample: Sample, _calories: &mut CalorieAccumulator) -> Option<Sample> {
        self.window.enqueue(sample);
        if self.window.len() != self.window_size {
            return None;
        }

        let (mid, score) = self.score();
        self.window.remove(self.midpoint);
        Some(Sample::new(mid.time_ms, score, mid.raw_magnitude))
    }

    fn reset(&mut self) {
        self.window.clear();
    }
}
