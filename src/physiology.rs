// ABOUTME: Physiology calculations deriving basal metabolic rate and stride length from a user profile
// ABOUTME: Mifflin-St Jeor BMR with per-minute and per-millisecond rates plus height-based stride
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

use serde::{Deserialize, Serialize};
use stepwise_core::constants::physiology::{
    FEMALE_STRIDE_FACTOR, MALE_STRIDE_FACTOR, MIN_BMR_KCAL_PER_DAY, MINUTES_PER_DAY,
    MSJ_AGE_COEF, MSJ_FEMALE_CONSTANT, MSJ_HEIGHT_COEF, MSJ_MALE_CONSTANT, MSJ_WEIGHT_COEF,
    MS_PER_DAY,
};
use stepwise_core::{ConfigResult, Gender, UserProfile};

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_offset`
/// - Men: +5
/// - Women: -161
///
/// # Reference
/// Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
///
/// # Errors
///
/// Returns `ConfigError::InvalidProfile` if the profile is out of the validated ranges
pub fn calculate_mifflin_st_jeor(profile: &UserProfile) -> ConfigResult<f64> {
    profile.validate()?;

    let weight_component = MSJ_WEIGHT_COEF * profile.weight_kg;
    let height_component = MSJ_HEIGHT_COEF * profile.height_cm;
    let age_component = MSJ_AGE_COEF * f64::from(profile.age_years);

    let gender_constant = match profile.gender {
        Gender::Male => MSJ_MALE_CONSTANT,
        Gender::Female => MSJ_FEMALE_CONSTANT,
    };

    let bmr = weight_component + height_component + age_component + gender_constant;

    // Minimum 1000 kcal/day safety check
    Ok(bmr.max(MIN_BMR_KCAL_PER_DAY))
}

/// Stride length in meters
#[must_use]
pub fn stride_length_m(profile: &UserProfile) -> f64 {
    let factor = match profile.gender {
        Gender::Male => MALE_STRIDE_FACTOR,
        Gender::Female => FEMALE_STRIDE_FACTOR,
    };
    profile.height_cm / 100.0 * factor
}

/// Rates derived from a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserMetrics {
    /// Basal metabolic rate (kcal/day)
    pub bmr_kcal_per_day: f64,
    /// Basal metabolic rate (kcal/minute)
    pub bmr_per_minute: f64,
    /// Basal metabolic rate (kcal/ms)
    pub bmr_per_ms: f64,
    /// Stride length (m)
    pub stride_m: f64,
}

impl UserMetrics {
    /// Derive BMR rates and stride from a profile
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidProfile` if the profile is out of the validated ranges
    pub fn from_profile(profile: &UserProfile) -> ConfigResult<Self> {
        let bmr = calculate_mifflin_st_jeor(profile)?;
        Ok(Self {
            bmr_kcal_per_day: bmr,
            bmr_per_minute: bmr / MINUTES_PER_DAY,
            bmr_per_ms: bmr / MS_PER_DAY,
            stride_m: stride_length_m(profile),
        })
    }
}
