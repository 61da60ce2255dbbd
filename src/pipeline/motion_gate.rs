// ABOUTME: Motion gate forwarding samples only while the signal shows enough peak-to-peak range
// ABOUTME: Accrues resting calories for motionless gaps and retires samples to keep memory bounded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

use super::energy::CalorieAccumulator;
use super::queue::BoundedQueue;
use super::Stage;
use stepwise_core::constants::stages::{
    MOTION_GATE_CAPACITY, MOTION_GATE_MIN_BUFFERED, MOTION_GATE_WINDOW,
};
use stepwise_core::constants::tuning::DEFAULT_MOTION_THRESHOLD;
use stepwise_core::Sample;

/// Peak-to-peak motion gate
///
/// Waits until [`MOTION_GATE_MIN_BUFFERED`] samples are buffered, then looks
/// at the range of the oldest [`MOTION_GATE_WINDOW`] magnitudes. Above the
/// threshold the oldest sample moves on downstream. Below it, the gap
/// between the two oldest samples is billed as resting time and the oldest
/// sample is dropped, so each gap is counted once and the buffer never
/// exceeds `MOTION_GATE_MIN_BUFFERED` entries.
#[derive(Debug, Clone)]
pub struct MotionGate {
    window: BoundedQueue<Sample, MOTION_GATE_CAPACITY>,
    threshold: i32,
}

impl Default for MotionGate {
    fn default() -> Self {
        Self::new(DEFAULT_MOTION_THRESHOLD)
    }
}

impl MotionGate {
    /// Create a gate with the given peak-to-peak threshold
    #[must_use]
    pub fn new(threshold: i32) -> Self {
        Self {
            window: BoundedQueue::new(),
            threshold,
        }
    }

    /// Peak-to-peak threshold
    #[must_use]
    pub const fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Change the peak-to-peak threshold
    pub fn set_threshold(&mut self, threshold: i32) {
        self.threshold = threshold;
    }

    /// Samples currently buffered
    #[must_use]
    pub const fn buffered(&self) -> usize {
        self.window.len()
    }

    fn peak_to_peak(&self) -> i64 {
        let (min, max) = self
            .window
            .iter()
            .take(MOTION_GATE_WINDOW)
            .fold((i32::MAX, i32::MIN), |(min, max), sample| {
                (min.min(sample.magnitude), max.max(sample.magnitude))
            });
        i64::from(max) - i64::from(min)
    }
}

impl Stage for MotionGate {
    type Input = Sample;
    type Output = Sample;

    fn deliver(&mut self, sample: Sample, calories: &mut CalorieAccumulator) -> Option<Sample> {
        self.window.enqueue(sample);
        if self.window.len() < MOTION_GATE_MIN_BUFFERED {
            return None;
        }

        if self.peak_to_peak() > i64::from(self.threshold) {
            return Some(self.window.dequeue());
        }

        let motionless_ms = self
            .window
            .peek(1)
            .time_ms
            .saturating_sub(self.window.peek(0).time_ms);
        calories.add_resting(motionless_ms);
        self.window.dequeue();
        None
    }

    fn reset(&mut self) {
        self.window.clear();
    }
}
