// ABOUTME: Diagnostic side channel receiving every stage output and every counted step
// ABOUTME: Provides the observer trait, a no-op implementation and a tracing-backed implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

//! Pipeline observers.
//!
//! Observers are notified synchronously from inside
//! [`crate::StepCounter::process_sample`]. They receive shared references only
//! and cannot influence detection.

use crate::pipeline::StageKind;
use stepwise_core::{Sample, StepEvent};
use tracing::{debug, trace};

/// Receives intermediate records from the pipeline
pub trait PipelineObserver: Send {
    /// Called each time a stage emits a sample
    fn on_stage_output(&mut self, _stage: StageKind, _sample: &Sample) {}

    /// Called each time a step is counted
    fn on_step(&mut self, _step: &StepEvent) {}
}

/// Observer that ignores every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer forwarding records to `tracing`
///
/// Stage outputs are emitted at `trace` level, steps at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage_output(&mut self, stage: StageKind, sample: &Sample) {
        trace!(
            stage = stage.name(),
            time_ms = sample.time_ms,
            magnitude = sample.magnitude,
            raw_magnitude = sample.raw_magnitude,
            peak_interval_ms = sample.peak_interval_ms,
            met = sample.met,
            "stage output"
        );
    }

    fn on_step(&mut self, step: &StepEvent) {
        debug!(
            time_ms = step.time_ms,
            interval_ms = step.interval_ms,
            mean_interval_ms = step.mean_interval_ms,
            met = step.met,
            weight = ?step.weight,
            "step counted"
        );
    }
}
