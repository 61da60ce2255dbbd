// ABOUTME: Configuration module for pipeline tuning parameters
// ABOUTME: Defaults, environment overrides and validation of the detection thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

//! Configuration module for the step counting engine
//!
//! - **Tuning**: window size, detection thresholds, debounce interval, motion
//!   gate range, sensor scale and topology, overridable with `STEPWISE_*`
//!   environment variables

/// Pipeline tuning parameters
pub mod tuning;

pub use tuning::TuningConfig;
