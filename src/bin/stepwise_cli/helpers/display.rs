// ABOUTME: Output formatting helpers for stepwise-cli
// ABOUTME: Prints the run summary as pretty JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

use anyhow::Result;
use stepwise::RunSummary;

/// Print a run summary as JSON
pub fn print_summary(summary: &RunSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
