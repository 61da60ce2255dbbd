// ABOUTME: Replay command feeding a recorded accelerometer CSV through the step counter
// ABOUTME: Reads the whole file, runs the pipeline and returns the run summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

use anyhow::{Context, Result};
use std::path::Path;
use stepwise::replay::{self, RunSummary};
use stepwise::StepCounter;
use tracing::info;

/// Replay `input` through `counter`
pub fn run(mut counter: StepCounter, input: &Path) -> Result<RunSummary> {
    let readings = replay::read_file(input)
        .with_context(|| format!("Failed to replay {}", input.display()))?;
    info!(path = %input.display(), samples = readings.len(), "Replaying recorded stream");
    Ok(replay::run(&mut counter, readings))
}
