// ABOUTME: Step detection pipeline composing preprocessing, gating, smoothing, scoring and detection
// ABOUTME: Stage trait, topology selection and the synchronous push-based stage graph
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

//! Step Detection Pipeline
//!
//! Raw readings enter [`Pipeline::process`] and flow synchronously through
//! the stages selected by [`PipelineTopology`]:
//!
//! ```text
//! preprocess ─┬───────────────────────────────┬─> scoring -> detection -> post-process
//!             ├──────────────> smoothing ─────┤
//!             └─> motion gate -> smoothing ───┘
//! ```
//!
//! Each stage consumes one input and emits at most one output, so a single
//! reading cascades through zero or more stage firings and yields at most one
//! [`StepEvent`]. Windowed stages own fixed-capacity [`BoundedQueue`]s; nothing
//! on this path allocates.
//!
//! # Design Philosophy
//!
//! - **Explicit graph**: the topology is an enum chosen at construction, not
//!   a compile-time switch
//! - **Owned state**: each stage owns its buffers and running statistics, so
//!   several pipelines can run side by side
//! - **Side channel only**: observers see every stage output but cannot
//!   influence detection

pub mod detection;
pub mod energy;
pub mod filter;
pub mod motion_gate;
pub mod post_process;
pub mod preprocess;
pub mod queue;
pub mod scoring;

pub use detection::{DetectionStage, RunningStats};
pub use energy::CalorieAccumulator;
pub use filter::SmoothingFilter;
pub use motion_gate::MotionGate;
pub use post_process::PostProcessStage;
pub use preprocess::PreprocessStage;
pub use queue::BoundedQueue;
pub use scoring::ScoringStage;

use crate::config::TuningConfig;
use crate::observer::PipelineObserver;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use stepwise_core::{AccelReading, ConfigError, ConfigResult, Sample, StepEvent};
use tracing::debug;

/// One processing step of the pipeline
///
/// `deliver` consumes one input and returns the output to forward
/// downstream, if the stage fired. `reset` clears buffers and running state
/// but keeps tuning.
pub trait Stage {
    /// Accepted input
    type Input;
    /// Produced output
    type Output;

    /// Feed one input, returning the output to forward downstream
    fn deliver(
        &mut self,
        input: Self::Input,
        calories: &mut CalorieAccumulator,
    ) -> Option<Self::Output>;

    /// Clear buffers and running state, keeping tuning
    fn reset(&mut self);
}

/// Identifies the stage that produced an observer record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Magnitude derivation
    Preprocess,
    /// Peak-to-peak motion gate
    MotionGate,
    /// FIR smoothing
    Smoothing,
    /// Peakness scoring
    Scoring,
    /// Adaptive-threshold peak detection
    Detection,
}

impl StageKind {
    /// Stage name for logging
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Preprocess => "preprocess",
            Self::MotionGate => "motion_gate",
            Self::Smoothing => "smoothing",
            Self::Scoring => "scoring",
            Self::Detection => "detection",
        }
    }
}

/// Stage graph selected at construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineTopology {
    /// preprocess -> scoring -> detection -> post-process
    Direct,
    /// preprocess -> smoothing -> scoring -> detection -> post-process
    #[default]
    Filtered,
    /// preprocess -> motion gate -> smoothing -> scoring -> detection -> post-process
    MotionGated,
}

impl PipelineTopology {
    /// Topology name as accepted by `FromStr`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Filtered => "filtered",
            Self::MotionGated => "motion_gated",
        }
    }

    /// Whether the FIR stage is part of the graph
    #[must_use]
    pub const fn uses_filter(self) -> bool {
        matches!(self, Self::Filtered | Self::MotionGated)
    }

    /// Whether the motion gate is part of the graph
    #[must_use]
    pub const fn uses_motion_gate(self) -> bool {
        matches!(self, Self::MotionGated)
    }
}

impl fmt::Display for PipelineTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PipelineTopology {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "direct" | "unfiltered" => Ok(Self::Direct),
            "filtered" => Ok(Self::Filtered),
            "motion_gated" | "gated" => Ok(Self::MotionGated),
            other => Err(ConfigError::Parse(format!(
                "Unknown pipeline topology: '{other}'. Valid options: direct, filtered, motion_gated"
            ))),
        }
    }
}

/// The wired stage graph
#[derive(Debug, Clone)]
pub struct Pipeline {
    topology: PipelineTopology,
    preprocess: PreprocessStage,
    motion_gate: MotionGate,
    smoothing: SmoothingFilter,
    scoring: ScoringStage,
    detection: DetectionStage,
    post_process: PostProcessStage,
}

impl Pipeline {
    /// Build every stage from a tuning configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the window size or threshold pair is invalid
    pub fn new(tuning: &TuningConfig) -> ConfigResult<Self> {
        tuning.validate()?;
        debug!(topology = %tuning.topology, window_size = tuning.window_size, "Building step pipeline");
        Ok(Self {
            topology: tuning.topology,
            preprocess: PreprocessStage::new(tuning.counts_per_g),
            motion_gate: MotionGate::new(tuning.motion_threshold),
            smoothing: SmoothingFilter::new(),
            scoring: ScoringStage::new(tuning.window_size)?,
            detection: DetectionStage::new(tuning.threshold_int, tuning.threshold_frac)?,
            post_process: PostProcessStage::new(
                tuning.time_threshold_ms,
                tuning.reference_cadence_hz,
            ),
        })
    }

    /// Push one reading through the graph
    pub fn process(
        &mut self,
        reading: AccelReading,
        calories: &mut CalorieAccumulator,
        observer: &mut dyn PipelineObserver,
    ) -> Option<StepEvent> {
        let sample = Self::forward(
            &mut self.preprocess,
            reading,
            StageKind::Preprocess,
            calories,
            observer,
        )?;

        let sample = if self.topology.uses_motion_gate() {
            Self::forward(
                &mut self.motion_gate,
                sample,
                StageKind::MotionGate,
                calories,
                observer,
            )?
        } else {
            sample
        };

        let sample = if self.topology.uses_filter() {
            Self::forward(
                &mut self.smoothing,
                sample,
                StageKind::Smoothing,
                calories,
                observer,
            )?
        } else {
            sample
        };

        let score = Self::forward(
            &mut self.scoring,
            sample,
            StageKind::Scoring,
            calories,
            observer,
        )?;
        let peak = Self::forward(
            &mut self.detection,
            score,
            StageKind::Detection,
            calories,
            observer,
        )?;

        let step = self.post_process.deliver(peak, calories)?;
        observer.on_step(&step);
        Some(step)
    }

    fn forward<S>(
        stage: &mut S,
        input: S::Input,
        kind: StageKind,
        calories: &mut CalorieAccumulator,
        observer: &mut dyn PipelineObserver,
    ) -> Option<Sample>
    where
        S: Stage<Output = Sample>,
    {
        let output = stage.deliver(input, calories)?;
        observer.on_stage_output(kind, &output);
        Some(output)
    }

    /// Clear every buffer and all running state, keeping tuning
    pub fn reset(&mut self) {
        self.preprocess.reset();
        self.motion_gate.reset();
        self.smoothing.reset();
        self.scoring.reset();
        self.detection.reset();
        self.post_process.reset();
    }

    /// Active topology
    #[must_use]
    pub const fn topology(&self) -> PipelineTopology {
        self.topology
    }

    /// Milliseconds covered by the readings since the last reset
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.preprocess.elapsed_ms()
    }

    /// Detection statistics snapshot
    #[must_use]
    pub const fn detection_stats(&self) -> RunningStats {
        self.detection.stats()
    }

    /// Mean step interval tracked by post-processing (ms)
    #[must_use]
    pub const fn mean_step_interval_ms(&self) -> f64 {
        self.post_process.mean_interval_ms()
    }

    /// Resize the scoring window
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWindowSize` outside 2..=64
    pub fn set_window_size(&mut self, window_size: usize) -> ConfigResult<()> {
        self.scoring.set_window_size(window_size)
    }

    /// Replace the detection threshold pair
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidThreshold` for a negative multiplier or non-positive divisor
    pub fn set_detection_threshold(&mut self, whole: i32, frac: i32) -> ConfigResult<()> {
        self.detection.set_threshold(whole, frac)
    }

    /// Change the debounce interval
    pub fn set_time_threshold_ms(&mut self, time_threshold_ms: u64) {
        self.post_process.set_time_threshold_ms(time_threshold_ms);
    }

    /// Change the motion gate threshold
    pub fn set_motion_threshold(&mut self, threshold: i32) {
        self.motion_gate.set_threshold(threshold);
    }
}
