// ABOUTME: Profile flags shared by every stepwise-cli command
// ABOUTME: Converts gender, age, height and weight arguments into a validated user profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

use clap::Args;
use stepwise::{ConfigResult, Gender, UserProfile};

/// Body measurements of the wearer
#[derive(Args)]
pub struct ProfileArgs {
    /// Gender code (m, f)
    #[arg(long, global = true, default_value = "m")]
    gender: String,

    /// Age in years
    #[arg(long, global = true, default_value = "30")]
    age: u32,

    /// Height in centimeters
    #[arg(long, global = true, default_value = "175")]
    height_cm: f64,

    /// Weight in kilograms
    #[arg(long, global = true, default_value = "70")]
    weight_kg: f64,
}

impl ProfileArgs {
    /// Validated profile
    pub fn to_profile(&self) -> ConfigResult<UserProfile> {
        UserProfile::new(
            Gender::from_code(&self.gender),
            self.age,
            self.height_cm,
            self.weight_kg,
        )
    }
}
