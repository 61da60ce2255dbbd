// ABOUTME: Replay support reading recorded accelerometer CSV streams into the step counter
// ABOUTME: Line parser, file reader, and the serializable run summary printed by the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

//! Recorded stream replay.
//!
//! Input files hold one `time,x,y,z` reading per line. Blank lines and lines
//! starting with `#` are skipped; surrounding whitespace is ignored.

use crate::counter::StepCounter;
use crate::pipeline::PipelineTopology;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use stepwise_core::AccelReading;
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading a recorded stream
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Input could not be read
    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),

    /// A line is not a `time,x,y,z` record
    #[error("Line {line}: {message}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// What is wrong with the line
        message: String,
    },
}

/// Parse one input line
///
/// Returns `Ok(None)` for blank lines and comments.
///
/// # Errors
///
/// Returns `ReplayError::Malformed` if the line does not hold exactly four
/// integer fields
pub fn parse_line(line_number: usize, line: &str) -> Result<Option<AccelReading>, ReplayError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let malformed = |message: String| ReplayError::Malformed {
        line: line_number,
        message,
    };

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [time, x, y, z] = fields.as_slice() else {
        return Err(malformed(format!(
            "expected 4 fields (time,x,y,z), found {}",
            fields.len()
        )));
    };

    let time_ms = time
        .parse::<u64>()
        .map_err(|e| malformed(format!("invalid time '{time}': {e}")))?;
    let axis = |name: &str, value: &str| {
        value
            .parse::<i32>()
            .map_err(|e| malformed(format!("invalid {name} '{value}': {e}")))
    };

    Ok(Some(AccelReading::new(
        time_ms,
        axis("x", x)?,
        axis("y", y)?,
        axis("z", z)?,
    )))
}

/// Read every reading from a buffered source
///
/// # Errors
///
/// Returns the first I/O or parse failure
pub fn read_readings<R: BufRead>(reader: R) -> Result<Vec<AccelReading>, ReplayError> {
    let mut readings = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        if let Some(reading) = parse_line(index + 1, &line?)? {
            readings.push(reading);
        }
    }
    Ok(readings)
}

/// Read every reading from a file
///
/// # Errors
///
/// Returns the first I/O or parse failure
pub fn read_file(path: &Path) -> Result<Vec<AccelReading>, ReplayError> {
    let readings = read_readings(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), count = readings.len(), "Loaded recorded stream");
    Ok(readings)
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Stage graph used
    pub topology: PipelineTopology,
    /// Readings processed
    pub samples: u64,
    /// Steps counted
    pub steps: u64,
    /// Walking distance (m)
    pub distance_m: f64,
    /// Step calories (kcal)
    pub calories_kcal: f64,
    /// Detection and resting energy (kcal)
    pub activity_kcal: f64,
    /// Average cadence (steps/s)
    pub steps_per_sec: f64,
    /// Mean interval between steps (ms)
    pub mean_step_interval_ms: f64,
}

impl RunSummary {
    /// Snapshot a counter after `samples` readings
    #[must_use]
    pub fn from_counter(counter: &StepCounter, samples: u64) -> Self {
        Self {
            topology: counter.topology(),
            samples,
            steps: counter.steps(),
            distance_m: counter.distance(),
            calories_kcal: counter.calories(),
            activity_kcal: counter.activity_kcal(),
            steps_per_sec: counter.steps_per_sec(),
            mean_step_interval_ms: counter.mean_step_interval_ms(),
        }
    }
}

/// Feed readings through a counter and summarize the run
pub fn run<I>(counter: &mut StepCounter, readings: I) -> RunSummary
where
    I: IntoIterator<Item = AccelReading>,
{
    let mut samples = 0_u64;
    for reading in readings {
        counter.process_reading(reading);
        samples += 1;
    }
    RunSummary::from_counter(counter, samples)
}
