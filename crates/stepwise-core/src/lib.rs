// ABOUTME: Core types and constants for the stepwise pedometer engine
// ABOUTME: Foundation crate with error handling, tuning defaults, and data models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

#![deny(unsafe_code)]

//! # Stepwise Core
//!
//! Foundation crate providing shared types and constants for the stepwise
//! pedometer engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Configuration and profile validation errors
//! - **constants**: Tuning defaults, physiology constants and MET breakpoints
//! - **models**: Accelerometer readings, pipeline samples, step events and user profiles

/// Configuration and validation error types
pub mod errors;

/// Tuning defaults and physiological constants organized by domain
pub mod constants;

/// Core data models (`AccelReading`, `Sample`, `StepEvent`, `UserProfile`)
pub mod models;

pub use errors::{ConfigError, ConfigResult};
pub use models::{AccelReading, Gender, Sample, StepEvent, StepWeight, UserProfile};
