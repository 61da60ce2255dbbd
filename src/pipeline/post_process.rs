// ABOUTME: Post-processing stage debouncing candidate peaks into counted steps
// ABOUTME: Enforces the minimum inter-step time, weights steps by cadence and classifies step MET
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

use super::energy::CalorieAccumulator;
use super::Stage;
use stepwise_core::constants::met::{RAW_BREAKPOINTS, RAW_CEILING_MET};
use stepwise_core::constants::tuning::{DEFAULT_REFERENCE_CADENCE_HZ, DEFAULT_TIME_THRESHOLD_MS};
use stepwise_core::{Sample, StepEvent, StepWeight};

/// Map a raw dynamic magnitude (m/s²) to a step MET class
///
/// First matching breakpoint wins; 25 and above map to 23.
#[must_use]
pub fn classify_raw_met(raw_magnitude: i32) -> u8 {
    RAW_BREAKPOINTS
        .iter()
        .find(|(bound, _)| raw_magnitude < *bound)
        .map_or(RAW_CEILING_MET, |(_, met)| *met)
}

/// Weight a step by the cadence its interval implies
#[must_use]
#[allow(clippy::cast_precision_loss)] // Safe: step intervals are far below 2^52 ms
pub fn classify_weight(interval_ms: u64, reference_cadence_hz: f64) -> StepWeight {
    let cadence = 1000.0 / interval_ms.max(1) as f64;
    if (cadence - reference_cadence_hz).abs() < f64::EPSILON {
        StepWeight::Normal
    } else if cadence < reference_cadence_hz {
        StepWeight::Short
    } else {
        StepWeight::Long
    }
}

/// Debounces peaks into steps
///
/// The first peak after a reset only becomes the candidate. Each later peak
/// either completes a step (more than `time_threshold_ms` after the
/// candidate) or competes with the candidate, replacing it only when its
/// magnitude is larger.
#[derive(Debug, Clone)]
pub struct PostProcessStage {
    time_threshold_ms: u64,
    reference_cadence_hz: f64,
    candidate: Option<Sample>,
    step_count: u64,
    mean_interval_ms: f64,
}

impl Default for PostProcessStage {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_THRESHOLD_MS, DEFAULT_REFERENCE_CADENCE_HZ)
    }
}

impl PostProcessStage {
    /// Create a stage with a debounce interval and a reference cadence
    #[must_use]
    pub const fn new(time_threshold_ms: u64, reference_cadence_hz: f64) -> Self {
        Self {
            time_threshold_ms,
            reference_cadence_hz,
            candidate: None,
            step_count: 0,
            mean_interval_ms: 0.0,
        }
    }

    /// Minimum time between two steps (ms)
    #[must_use]
    pub const fn time_threshold_ms(&self) -> u64 {
        self.time_threshold_ms
    }

    /// Change the debounce interval
    pub fn set_time_threshold_ms(&mut self, time_threshold_ms: u64) {
        self.time_threshold_ms = time_threshold_ms;
    }

    /// Steps counted since reset
    #[must_use]
    pub const fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Mean step interval since reset (ms)
    #[must_use]
    pub const fn mean_interval_ms(&self) -> f64 {
        self.mean_interval_ms
    }

    /// Current candidate peak, if any
    #[must_use]
    pub const fn candidate(&self) -> Option<&Sample> {
        self.candidate.as_ref()
    }

    #[allow(clippy::cast_precision_loss)] // Safe: counts and intervals stay far below 2^52
    fn fold_interval(&mut self, interval_ms: u64) {
        let n = self.step_count as f64;
        self.mean_interval_ms = if self.step_count == 1 {
            interval_ms as f64
        } else {
            (n - 1.0).mul_add(self.mean_interval_ms, interval_ms as f64) / n
        };
    }
}

impl Stage for PostProcessStage {
    type Input = Sample;
    type Output = StepEvent;

    fn deliver(&mut self, peak: Sample, _calories: &mut CalorieAccumulator) -> Option<StepEvent> {
        let Some(candidate) = self.candidate else {
            self.candidate = Some(peak);
            return None;
        };

        let gap = peak.time_ms.saturating_sub(candidate.time_ms);
        if gap <= self.time_threshold_ms {
            if peak.magnitude > candidate.magnitude {
                self.candidate = Some(peak);
            }
            return None;
        }

        self.step_count += 1;
        self.fold_interval(gap);

        let weight = classify_weight(gap, self.reference_cadence_hz);
        let mut step = peak;
        step.peak_interval_ms = gap;
        step.met = classify_raw_met(step.raw_magnitude);
        step.step_weight = weight.factor();
        self.candidate = Some(step);

        Some(StepEvent {
            time_ms: step.time_ms,
            interval_ms: gap,
            mean_interval_ms: self.mean_interval_ms,
            magnitude: step.magnitude,
            raw_magnitude: step.raw_magnitude,
            met: step.met,
            weight,
        })
    }

    fn reset(&mut self) {
        self.candidate = None;
        self.step_count = 0;
        self.mean_interval_ms = 0.0;
    }
}
