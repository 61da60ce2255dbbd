// ABOUTME: Tuning configuration for the step detection pipeline
// ABOUTME: Loads defaults, applies STEPWISE_* environment overrides and validates the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

//! Tuning Configuration
//!
//! Every parameter can be overridden via environment variables with the
//! `STEPWISE_` prefix:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `STEPWISE_TOPOLOGY` | `topology` |
//! | `STEPWISE_WINDOW_SIZE` | `window_size` |
//! | `STEPWISE_THRESHOLD_INT` | `threshold_int` |
//! | `STEPWISE_THRESHOLD_FRAC` | `threshold_frac` |
//! | `STEPWISE_TIME_THRESHOLD_MS` | `time_threshold_ms` |
//! | `STEPWISE_MOTION_THRESHOLD` | `motion_threshold` |
//! | `STEPWISE_COUNTS_PER_G` | `counts_per_g` |
//! | `STEPWISE_REFERENCE_CADENCE_HZ` | `reference_cadence_hz` |

use crate::pipeline::{DetectionStage, PipelineTopology, ScoringStage};
use serde::{Deserialize, Serialize};
use std::env::{self, VarError};
use std::str::FromStr;
use stepwise_core::constants::tuning::{
    DEFAULT_COUNTS_PER_G, DEFAULT_MOTION_THRESHOLD, DEFAULT_REFERENCE_CADENCE_HZ,
    DEFAULT_THRESHOLD_FRAC, DEFAULT_THRESHOLD_INT, DEFAULT_TIME_THRESHOLD_MS, DEFAULT_WINDOW_SIZE,
};
use stepwise_core::{ConfigError, ConfigResult};
use tracing::{debug, warn};

/// Pipeline tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    /// Stage graph
    pub topology: PipelineTopology,
    /// Scoring window length in samples
    pub window_size: usize,
    /// Whole standard-deviation multiplier of the detection threshold
    pub threshold_int: i32,
    /// Standard-deviation divisor of the detection threshold
    pub threshold_frac: i32,
    /// Minimum time between two counted steps (ms)
    pub time_threshold_ms: u64,
    /// Peak-to-peak range opening the motion gate
    pub motion_threshold: i32,
    /// Accelerometer counts per 1 g
    pub counts_per_g: i32,
    /// Cadence separating short and long steps (steps per second)
    pub reference_cadence_hz: f64,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            topology: PipelineTopology::default(),
            window_size: DEFAULT_WINDOW_SIZE,
            threshold_int: DEFAULT_THRESHOLD_INT,
            threshold_frac: DEFAULT_THRESHOLD_FRAC,
            time_threshold_ms: DEFAULT_TIME_THRESHOLD_MS,
            motion_threshold: DEFAULT_MOTION_THRESHOLD,
            counts_per_g: DEFAULT_COUNTS_PER_G,
            reference_cadence_hz: DEFAULT_REFERENCE_CADENCE_HZ,
        }
    }
}

impl TuningConfig {
    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> ConfigResult<Self> {
        let mut config = Self::default();
        config = config.apply_env_overrides()?;
        config.validate()?;
        debug!(?config, "Tuning configuration loaded");
        Ok(config)
    }

    /// Load configuration, falling back to defaults on any error
    #[must_use]
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!("Failed to load tuning config: {e}, using defaults");
            Self::default()
        })
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid
    pub fn validate(&self) -> ConfigResult<()> {
        ScoringStage::validate_window_size(self.window_size)?;
        DetectionStage::validate_threshold(self.threshold_int, self.threshold_frac)?;

        if self.motion_threshold < 0 {
            return Err(ConfigError::ValueOutOfRange(
                "motion_threshold must be >= 0",
            ));
        }

        if self.counts_per_g <= 0 {
            return Err(ConfigError::ValueOutOfRange("counts_per_g must be > 0"));
        }

        if !self.reference_cadence_hz.is_finite() || self.reference_cadence_hz <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "reference_cadence_hz must be a positive number",
            ));
        }

        Ok(())
    }

    /// Read an environment variable, treating an unset variable as no override
    fn read_env_var(env_var_name: &str) -> ConfigResult<Option<String>> {
        match env::var(env_var_name) {
            Ok(val) => Ok(Some(val)),
            Err(VarError::NotPresent) => Ok(None),
            Err(e) => {
                warn!(env_var_name, "Environment override is not valid unicode");
                Err(e.into())
            }
        }
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> ConfigResult<()> {
        if let Some(val) = Self::read_env_var(env_var_name)? {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}: '{val}'")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> ConfigResult<Self> {
        if let Some(val) = Self::read_env_var("STEPWISE_TOPOLOGY")? {
            self.topology = val.parse()?;
        }

        // Scoring and detection
        Self::apply_env_var("STEPWISE_WINDOW_SIZE", &mut self.window_size)?;
        Self::apply_env_var("STEPWISE_THRESHOLD_INT", &mut self.threshold_int)?;
        Self::apply_env_var("STEPWISE_THRESHOLD_FRAC", &mut self.threshold_frac)?;

        // Debounce and gating
        Self::apply_env_var("STEPWISE_TIME_THRESHOLD_MS", &mut self.time_threshold_ms)?;
        Self::apply_env_var("STEPWISE_MOTION_THRESHOLD", &mut self.motion_threshold)?;

        // Sensor and weighting
        Self::apply_env_var("STEPWISE_COUNTS_PER_G", &mut self.counts_per_g)?;
        Self::apply_env_var(
            "STEPWISE_REFERENCE_CADENCE_HZ",
            &mut self.reference_cadence_hz,
        )?;

        Ok(self)
    }
}
