// ABOUTME: Main library entry point for the stepwise streaming pedometer engine
// ABOUTME: Exposes the step counter facade, pipeline stages, configuration and diagnostics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

#![deny(unsafe_code)]

//! # Stepwise
//!
//! A streaming pedometer engine. Timestamped 3-axis accelerometer readings go
//! in, debounced step events come out, along with running step count,
//! walking distance and calorie estimates.
//!
//! ## Features
//!
//! - **Fixed memory**: every stage window is a const-sized ring buffer
//! - **Online statistics**: mean and spread of the score stream are updated
//!   incrementally, never by revisiting history
//! - **Selectable topology**: direct, FIR-smoothed, or motion-gated pipelines
//! - **Diagnostics**: a side-channel observer receives every stage output
//!
//! ## Example
//!
//! ```
//! use stepwise::{StepCounter, SyntheticWalk, TuningConfig, UserProfile};
//!
//! let mut counter = StepCounter::new(UserProfile::default(), TuningConfig::default())?;
//! for reading in SyntheticWalk::default().readings() {
//!     counter.process_reading(reading);
//! }
//! assert!(counter.steps() > 0);
//! # Ok::<(), stepwise::ConfigError>(())
//! ```

/// Tuning configuration with environment overrides
pub mod config;

/// Step counter facade
pub mod counter;

/// Logging configuration for binaries
pub mod logging;

/// Diagnostic side channel
pub mod observer;

/// BMR and stride calculations
pub mod physiology;

/// Signal processing stages and the stage graph
pub mod pipeline;

/// Recorded stream replay and run summaries
pub mod replay;

/// Deterministic walking signals
pub mod synthetic;

pub use config::TuningConfig;
pub use counter::StepCounter;
pub use observer::{NoopObserver, PipelineObserver, TracingObserver};
pub use physiology::UserMetrics;
pub use pipeline::{PipelineTopology, RunningStats, StageKind};
pub use replay::{ReplayError, RunSummary};
pub use stepwise_core::{
    AccelReading, ConfigError, ConfigResult, Gender, Sample, StepEvent, StepWeight, UserProfile,
};
pub use synthetic::{SyntheticWalk, Waveform};
