// ABOUTME: Helper modules for stepwise-cli
// ABOUTME: Profile flags, counter construction and summary output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

pub mod display;
pub mod profile;

use anyhow::Result;
use profile::ProfileArgs;
use stepwise::{PipelineTopology, StepCounter, TracingObserver, TuningConfig};

/// Build a counter from profile flags and environment tuning
pub fn build_counter(
    profile: &ProfileArgs,
    topology: Option<PipelineTopology>,
) -> Result<StepCounter> {
    let mut tuning = TuningConfig::load()?;
    if let Some(topology) = topology {
        tuning.topology = topology;
    }
    let counter = StepCounter::new(profile.to_profile()?, tuning)?.with_observer(TracingObserver);
    Ok(counter)
}
