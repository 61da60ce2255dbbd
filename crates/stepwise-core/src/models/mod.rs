// ABOUTME: Data models shared between the pipeline stages and the facade
// ABOUTME: Re-exports accelerometer readings, samples, step events and user profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

/// Accelerometer readings, pipeline samples and step events
pub mod sample;

/// User profile and gender
pub mod profile;

pub use profile::{Gender, UserProfile};
pub use sample::{AccelReading, Sample, StepEvent, StepWeight};
