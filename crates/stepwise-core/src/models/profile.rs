// ABOUTME: User profile model used to scale pipeline outputs into calories and distance
// ABOUTME: Gender enumeration with lenient decoding and range-validated profile construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

use crate::errors::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Gender for BMR and stride calculations
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male gender (higher BMR, longer stride factor)
    #[default]
    Male,
    /// Female gender
    Female,
}

impl Gender {
    /// Decode a gender code
    ///
    /// `f`, `female`, `w` and `woman` (any case) decode to `Female`. Every
    /// other encoding, including the empty string, decodes to `Male`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        if ["f", "female", "w", "woman"]
            .iter()
            .any(|known| code.eq_ignore_ascii_case(known))
        {
            Self::Female
        } else {
            if !code.eq_ignore_ascii_case("m") && !code.eq_ignore_ascii_case("male") {
                debug!(code, "Unrecognised gender code, using male coefficients");
            }
            Self::Male
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body measurements of the wearer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Gender
    pub gender: Gender,
    /// Age in years
    pub age_years: u32,
    /// Height in centimeters
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
}

impl UserProfile {
    /// Create a validated profile
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidProfile` if age is outside 10-120 years or
    /// height/weight are not in (0, 300]
    pub fn new(
        gender: Gender,
        age_years: u32,
        height_cm: f64,
        weight_kg: f64,
    ) -> ConfigResult<Self> {
        let profile = Self {
            gender,
            age_years,
            height_cm,
            weight_kg,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check the ranges the physiology formulas are validated for
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidProfile` naming the first offending field
    pub fn validate(&self) -> ConfigResult<()> {
        if !(10..=120).contains(&self.age_years) {
            return Err(ConfigError::invalid_profile(format!(
                "Age must be between 10 and 120 years, got {}",
                self.age_years
            )));
        }
        if !(self.height_cm > 0.0 && self.height_cm <= 300.0) {
            return Err(ConfigError::invalid_profile(format!(
                "Height must be between 0 and 300 cm, got {}",
                self.height_cm
            )));
        }
        if !(self.weight_kg > 0.0 && self.weight_kg <= 300.0) {
            return Err(ConfigError::invalid_profile(format!(
                "Weight must be between 0 and 300 kg, got {}",
                self.weight_kg
            )));
        }
        Ok(())
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            age_years: 30,
            height_cm: 175.0,
            weight_kg: 70.0,
        }
    }
}
