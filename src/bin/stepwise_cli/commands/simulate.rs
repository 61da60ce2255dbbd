// ABOUTME: Simulate command running a synthetic spike walk through the step counter
// ABOUTME: Generates the walk from CLI parameters and returns the run summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

use stepwise::replay::{self, RunSummary};
use stepwise::{StepCounter, SyntheticWalk};
use tracing::info;

/// Run a synthetic walk through `counter`
pub fn run(
    mut counter: StepCounter,
    seconds: u64,
    step_period_ms: u64,
    sample_period_ms: u64,
    baseline: i32,
    spike: i32,
) -> RunSummary {
    let walk = SyntheticWalk::spikes(
        sample_period_ms,
        step_period_ms,
        baseline,
        spike,
        seconds.saturating_mul(1000),
    );
    info!(
        seconds,
        step_period_ms,
        samples = walk.len(),
        "Simulating synthetic walk"
    );
    replay::run(&mut counter, walk.readings())
}
