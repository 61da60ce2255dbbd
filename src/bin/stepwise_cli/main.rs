// ABOUTME: Stepwise CLI - replays recorded accelerometer streams and synthetic walks
// ABOUTME: Builds a step counter from profile flags and environment tuning, prints a JSON summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors
//!
//! Usage:
//! ```bash
//! # Replay a recorded stream (time,x,y,z per line)
//! stepwise-cli replay --input walk.csv
//!
//! # Replay with a female profile and the motion-gated pipeline
//! stepwise-cli replay --input walk.csv --gender f --height-cm 165 --topology motion_gated
//!
//! # Simulate two minutes of walking at two steps per second
//! stepwise-cli simulate --seconds 120 --step-period-ms 500
//!
//! # Log every counted step
//! stepwise-cli --verbose simulate
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use helpers::profile::ProfileArgs;
use std::path::PathBuf;
use stepwise::logging::LoggingConfig;
use stepwise::PipelineTopology;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "stepwise-cli",
    about = "Stepwise pedometer CLI",
    long_about = "Replay recorded accelerometer streams or synthetic walks through the step counting pipeline."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    profile: ProfileArgs,

    /// Pipeline topology override (direct, filtered, motion_gated)
    #[arg(long, global = true)]
    topology: Option<PipelineTopology>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Replay a recorded `time,x,y,z` stream
    Replay {
        /// Input file
        #[arg(long, short = 'i')]
        input: PathBuf,
    },

    /// Run a synthetic spike walk
    Simulate {
        /// Walk duration in seconds
        #[arg(long, default_value = "60")]
        seconds: u64,

        /// Time between steps (ms)
        #[arg(long, default_value = "500")]
        step_period_ms: u64,

        /// Time between readings (ms)
        #[arg(long, default_value = "20")]
        sample_period_ms: u64,

        /// Vertical reading on a step
        #[arg(long, default_value = "3000")]
        spike: i32,

        /// Vertical reading at rest
        #[arg(long, default_value = "1000")]
        baseline: i32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env().verbose(cli.verbose).init()?;
    debug!("Stepwise CLI");

    let counter = helpers::build_counter(&cli.profile, cli.topology)?;

    let summary = match cli.command {
        Command::Replay { input } => commands::replay::run(counter, &input)?,
        Command::Simulate {
            seconds,
            step_period_ms,
            sample_period_ms,
            spike,
            baseline,
        } => commands::simulate::run(
            counter,
            seconds,
            step_period_ms,
            sample_period_ms,
            baseline,
            spike,
        ),
    };

    helpers::display::print_summary(&summary)
}
