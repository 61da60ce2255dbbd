// ABOUTME: Step counter facade owning the pipeline, the user profile, tuning and running counters
// ABOUTME: Single real-time entry point plus reset, accessor and tuning mutator operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

//! Step Counter
//!
//! [`StepCounter`] is the only type a host needs. Each instance owns its
//! whole pipeline state, so several counters can run side by side. The type
//! is `Send`; hosts sharing one across threads wrap it in a single mutex.

use crate::config::TuningConfig;
use crate::observer::{NoopObserver, PipelineObserver};
use crate::physiology::UserMetrics;
use crate::pipeline::{CalorieAccumulator, Pipeline, PipelineTopology, RunningStats};
use std::fmt;
use stepwise_core::constants::physiology::MS_PER_MINUTE;
use stepwise_core::{AccelReading, ConfigError, ConfigResult, StepEvent, UserProfile};
use tracing::{debug, info};

/// Streaming pedometer
pub struct StepCounter {
    pipeline: Pipeline,
    calories: CalorieAccumulator,
    profile: UserProfile,
    metrics: UserMetrics,
    tuning: TuningConfig,
    base_tuning: TuningConfig,
    steps: u64,
    met_minutes: f64,
    elapsed_before_reset_ms: u64,
    rate_origin_ms: u64,
    observer: Box<dyn PipelineObserver>,
}

impl fmt::Debug for StepCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepCounter")
            .field("pipeline", &self.pipeline)
            .field("calories", &self.calories)
            .field("profile", &self.profile)
            .field("metrics", &self.metrics)
            .field("tuning", &self.tuning)
            .field("base_tuning", &self.base_tuning)
            .field("steps", &self.steps)
            .field("met_minutes", &self.met_minutes)
            .field("elapsed_before_reset_ms", &self.elapsed_before_reset_ms)
            .field("rate_origin_ms", &self.rate_origin_ms)
            .finish_non_exhaustive()
    }
}

impl StepCounter {
    /// Build a counter for a profile and tuning
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the profile or the tuning is invalid
    pub fn new(profile: UserProfile, tuning: TuningConfig) -> ConfigResult<Self> {
        let metrics = UserMetrics::from_profile(&profile)?;
        let pipeline = Pipeline::new(&tuning)?;
        info!(
            topology = %tuning.topology,
            gender = %profile.gender,
            bmr_kcal_per_day = metrics.bmr_kcal_per_day,
            stride_m = metrics.stride_m,
            "Step counter initialized"
        );
        Ok(Self {
            pipeline,
            calories: CalorieAccumulator::new(metrics.bmr_per_ms),
            profile,
            metrics,
            base_tuning: tuning.clone(),
            tuning,
            steps: 0,
            met_minutes: 0.0,
            elapsed_before_reset_ms: 0,
            rate_origin_ms: 0,
            observer: Box::new(NoopObserver),
        })
    }

    /// Install a diagnostic observer
    #[must_use]
    pub fn with_observer(mut self, observer: impl PipelineObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Derive BMR and stride from a profile
    ///
    /// Counters keep their values; later calories and distance use the new
    /// rates.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidProfile`; the previous profile stays active
    pub fn init_user_data(&mut self, profile: UserProfile) -> ConfigResult<()> {
        let metrics = UserMetrics::from_profile(&profile)?;
        self.calories.set_bmr_per_ms(metrics.bmr_per_ms);
        self.profile = profile;
        self.metrics = metrics;
        debug!(
            bmr_kcal_per_day = metrics.bmr_kcal_per_day,
            stride_m = metrics.stride_m,
            "User data initialized"
        );
        Ok(())
    }

    /// Rebuild the pipeline from the construction-time tuning and start over
    ///
    /// Tuning changed through the mutators is discarded. Clears every buffer,
    /// all running statistics, the elapsed time and the step, distance and
    /// calorie counters, then applies `profile`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidProfile`; nothing is changed in that case
    pub fn init_algo(&mut self, profile: UserProfile) -> ConfigResult<()> {
        let metrics = UserMetrics::from_profile(&profile)?;
        self.pipeline = Pipeline::new(&self.base_tuning)?;
        self.tuning = self.base_tuning.clone();
        self.calories = CalorieAccumulator::new(metrics.bmr_per_ms);
        self.steps = 0;
        self.met_minutes = 0.0;
        self.elapsed_before_reset_ms = 0;
        self.rate_origin_ms = 0;
        self.init_user_data(profile)
    }

    /// Feed one accelerometer reading
    ///
    /// Returns the step counted on this reading, if any.
    pub fn process_sample(&mut self, time_ms: u64, x: i32, y: i32, z: i32) -> Option<StepEvent> {
        self.process_reading(AccelReading::new(time_ms, x, y, z))
    }

    /// Feed one accelerometer reading
    pub fn process_reading(&mut self, reading: AccelReading) -> Option<StepEvent> {
        let step = self
            .pipeline
            .process(reading, &mut self.calories, self.observer.as_mut())?;

        self.steps += 1;
        #[allow(clippy::cast_precision_loss)] // Safe: step intervals are far below 2^52 ms
        let minutes = step.interval_ms as f64 / MS_PER_MINUTE;
        self.met_minutes += f64::from(step.met) * minutes;
        Some(step)
    }

    /// Zero the step, distance and calorie counters
    ///
    /// Buffers, statistics and tuning are untouched.
    pub fn reset_steps(&mut self) {
        self.steps = 0;
        self.met_minutes = 0.0;
        self.calories.clear();
        self.elapsed_before_reset_ms = 0;
        self.rate_origin_ms = self.pipeline.elapsed_ms();
        debug!("Step counters reset");
    }

    /// Clear every buffer and all stage running state
    ///
    /// Profile, tuning and the counters are kept. Time walked so far keeps
    /// counting towards [`StepCounter::steps_per_sec`].
    pub fn reset_algo(&mut self) {
        self.elapsed_before_reset_ms = self.counted_elapsed_ms();
        self.rate_origin_ms = 0;
        self.pipeline.reset();
        debug!("Pipeline state reset");
    }

    /// Steps counted since the last counter reset
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Walking distance in meters (`steps × stride`)
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Safe: step counts stay far below 2^52
    pub fn distance(&self) -> f64 {
        self.steps as f64 * self.metrics.stride_m
    }

    /// Step calories: accumulated MET-minutes times the per-minute BMR
    #[must_use]
    pub fn calories(&self) -> f64 {
        self.met_minutes * self.metrics.bmr_per_minute
    }

    /// Accumulated MET-minutes of counted steps
    #[must_use]
    pub const fn met_minutes(&self) -> f64 {
        self.met_minutes
    }

    /// Energy accumulated by detection and the motion gate (kcal)
    #[must_use]
    pub const fn activity_kcal(&self) -> f64 {
        self.calories.total_kcal()
    }

    /// Stream time covered since the counters were last zeroed (ms)
    fn counted_elapsed_ms(&self) -> u64 {
        let current = self.pipeline.elapsed_ms().saturating_sub(self.rate_origin_ms);
        self.elapsed_before_reset_ms.saturating_add(current)
    }

    /// Steps per second over the stream time since the counters were last zeroed
    ///
    /// Time covered before a [`StepCounter::reset_algo`] is carried over.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Safe: counts and durations stay far below 2^52
    pub fn steps_per_sec(&self) -> f64 {
        let elapsed_ms = self.counted_elapsed_ms();
        if elapsed_ms == 0 {
            return 0.0;
        }
        self.steps as f64 / (elapsed_ms as f64 / 1000.0)
    }

    /// Mean interval between counted steps (ms)
    #[must_use]
    pub const fn mean_step_interval_ms(&self) -> f64 {
        self.pipeline.mean_step_interval_ms()
    }

    /// Detection statistics snapshot
    #[must_use]
    pub const fn detection_stats(&self) -> RunningStats {
        self.pipeline.detection_stats()
    }

    /// Active tuning
    #[must_use]
    pub const fn tuning(&self) -> &TuningConfig {
        &self.tuning
    }

    /// Active topology
    #[must_use]
    pub const fn topology(&self) -> PipelineTopology {
        self.pipeline.topology()
    }

    /// Active profile
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Rates derived from the active profile
    #[must_use]
    pub const fn metrics(&self) -> &UserMetrics {
        &self.metrics
    }

    /// Resize the scoring window
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWindowSize` outside 2..=64
    pub fn set_window_size(&mut self, window_size: usize) -> ConfigResult<()> {
        self.pipeline.set_window_size(window_size)?;
        self.tuning.window_size = window_size;
        Ok(())
    }

    /// Replace the detection threshold pair
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidThreshold` for a negative multiplier or non-positive divisor
    pub fn set_detection_threshold(&mut self, whole: i32, frac: i32) -> ConfigResult<()> {
        self.pipeline.set_detection_threshold(whole, frac)?;
        self.tuning.threshold_int = whole;
        self.tuning.threshold_frac = frac;
        Ok(())
    }

    /// Change the minimum time between steps (ms)
    pub fn set_time_threshold(&mut self, time_threshold_ms: u64) {
        self.pipeline.set_time_threshold_ms(time_threshold_ms);
        self.tuning.time_threshold_ms = time_threshold_ms;
    }

    /// Change the motion gate peak-to-peak threshold
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for a negative threshold
    pub fn set_motion_threshold(&mut self, threshold: i32) -> ConfigResult<()> {
        if threshold < 0 {
            return Err(ConfigError::ValueOutOfRange(
                "motion_threshold must be >= 0",
            ));
        }
        self.pipeline.set_motion_threshold(threshold);
        self.tuning.motion_threshold = threshold;
        Ok(())
    }
}
