// ABOUTME: Configuration error types for tuning and user profile validation
// ABOUTME: Defines error variants for invalid window sizes, thresholds, ranges and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

//! Configuration error types.
//!
//! The real-time sample path never returns errors. Everything that can be
//! rejected is rejected at a configuration boundary: tuning mutators,
//! environment loading and profile construction.

use std::env;
use thiserror::Error;

/// Result alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration-related errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Scoring window size outside the supported range
    #[error("Invalid window size {size}: must be between {min} and {max}")]
    InvalidWindowSize {
        /// Requested window size
        size: usize,
        /// Smallest accepted window
        min: usize,
        /// Largest accepted window (scoring buffer capacity)
        max: usize,
    },

    /// Detection threshold pair cannot be applied
    #[error("Invalid detection threshold ({whole}, {frac}): {reason}")]
    InvalidThreshold {
        /// Whole standard-deviation multiplier
        whole: i32,
        /// Standard-deviation divisor
        frac: i32,
        /// Why the pair was rejected
        reason: &'static str,
    },

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// User profile field outside the range the physiology formulas accept
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Environment variable access error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] env::VarError),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Create a profile validation error
    #[must_use]
    pub fn invalid_profile(message: impl Into<String>) -> Self {
        Self::InvalidProfile(message.into())
    }
}
