// ABOUTME: 17-tap fixed-point FIR low-pass filter smoothing the magnitude stream
// ABOUTME: Sliding window convolution with integer coefficients and a 16-bit output shift
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

//! FIR smoothing stage.
//!
//! Coefficients were designed for a 50 Hz sampling rate with a 0-3 Hz pass
//! band (gain 1, 5 dB ripple) and a 4-25 Hz stop band (-10 dB). They are
//! applied in fixed-point integer arithmetic: products are summed in
//! `i128`, shifted right by [`FILTER_SHIFT`] and saturated back to `i32`.

use super::energy::CalorieAccumulator;
use super::queue::BoundedQueue;
use super::Stage;
use stepwise_core::constants::stages::{FILTER_SHIFT, FILTER_TAP_COUNT};
use stepwise_core::Sample;

/// Fixed-point FIR coefficients, oldest sample first
pub const FILTER_TAPS: [i32; FILTER_TAP_COUNT] = [
    -281_468_814,
    106_520_334,
    127_255_214,
    162_830_244,
    205_727_178,
    248_615_023,
    284_705_529,
    308_612_275,
    316_959_956,
    308_612_275,
    284_705_529,
    248_615_023,
    205_727_178,
    162_830_244,
    127_255_214,
    106_520_334,
    -281_468_814,
];

/// Sliding-window FIR filter
///
/// Fires once exactly [`FILTER_TAP_COUNT`] samples are buffered, emits one
/// filtered sample stamped with the newest input's time and raw magnitude,
/// then drops the oldest input.
#[derive(Debug, Clone, Default)]
pub struct SmoothingFilter {
    window: BoundedQueue<Sample, FILTER_TAP_COUNT>,
}

impl SmoothingFilter {
    /// Create an empty filter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convolve the full window with the taps
    #[allow(clippy::cast_possible_truncation)] // Safe: clamped to the i32 range first
    fn convolve(&self) -> i32 {
        let acc: i128 = self
            .window
            .iter()
            .zip(FILTER_TAPS)
            .map(|(sample, tap)| i128::from(sample.magnitude) * i128::from(tap))
            .sum();
        (acc >> FILTER_SHIFT).clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
    }
}

impl Stage for SmoothingFilter {
    type Input = Sample;
    type Output = Sample;

    fn deliver(&mut self, sample: Sample, _calories: &mut CalorieAccumulator) -> Option<Sample> {
        self.window.enqueue(sample);
        if self.window.len() != FILTER_TAP_COUNT {
            return None;
        }

        let newest = *self.window.peek(FILTER_TAP_COUNT - 1);
        let filtered = Sample::new(newest.time_ms, self.convolve(), newest.raw_magnitude);
        self.window.dequeue();
        Some(filtered)
    }

    fn reset(&mut self) {
        self.window.clear();
    }
}
