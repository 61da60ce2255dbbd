// ABOUTME: Tests for recorded stream parsing, file replay and run summaries
// ABOUTME: Uses temporary CSV files to exercise the replay path end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::io::{Cursor, Write};
use stepwise::replay::{self, parse_line, read_file, read_readings};
use stepwise::{
    AccelReading, PipelineTopology, ReplayError, RunSummary, StepCounter, SyntheticWalk,
    TuningConfig, UserProfile,
};
use tempfile::NamedTempFile;

fn direct_counter() -> StepCounter {
    let tuning = TuningConfig {
        topology: PipelineTopology::Direct,
        ..TuningConfig::default()
    };
    StepCounter::new(UserProfile::default(), tuning).unwrap()
}

#[test]
fn test_parse_line() {
    assert_eq!(
        parse_line(1, "120, -3, 4 ,1000").unwrap(),
        Some(AccelReading::new(120, -3, 4, 1000))
    );
    assert_eq!(parse_line(2, "").unwrap(), None);
    assert_eq!(parse_line(3, "   ").unwrap(), None);
    assert_eq!(parse_line(4, "# time,x,y,z").unwrap(), None);
}

#[test]
fn test_parse_line_errors() {
    let err = parse_line(7, "1,2,3").unwrap_err();
    assert!(matches!(err, ReplayError::Malformed { line: 7, .. }));
    assert!(err.to_string().contains("expected 4 fields"));

    let err = parse_line(8, "-5,0,0,0").unwrap_err();
    assert!(err.to_string().contains("invalid time"));

    let err = parse_line(9, "0,0,zero,0").unwrap_err();
    assert!(err.to_string().contains("invalid y"));
}

#[test]
fn test_read_readings_skips_comments() {
    let input = "# recorded at 50 Hz\n0,0,0,1000\n\n20,0,0,1010\n";
    let readings = read_readings(Cursor::new(input)).unwrap();
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[1].time_ms, 20);
}

#[test]
fn test_read_readings_reports_line_number() {
    let input = "0,0,0,1000\n# comment\nbad\n";
    let err = read_readings(Cursor::new(input)).unwrap_err();
    assert!(matches!(err, ReplayError::Malformed { line: 3, .. }));
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_file(&dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, ReplayError::Io(_)));
}

#[test]
fn test_file_replay_matches_live_run() {
    let walk = SyntheticWalk::spikes(20, 500, 1000, 3000, 20_000);

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# time,x,y,z").unwrap();
    for reading in walk.readings() {
        writeln!(
            file,
            "{},{},{},{}",
            reading.time_ms, reading.x, reading.y, reading.z
        )
        .unwrap();
    }
    file.flush().unwrap();

    let readings = read_file(file.path()).unwrap();
    assert_eq!(readings.len() as u64, walk.len());

    let replayed = replay::run(&mut direct_counter(), readings);
    let live = replay::run(&mut direct_counter(), walk.readings());
    assert_eq!(replayed, live);
    assert_eq!(replayed.steps, 38);
    assert_eq!(replayed.samples, 1001);
    assert_eq!(replayed.topology, PipelineTopology::Direct);
}

#[test]
fn test_summary_serializes_to_json() {
    let counter = direct_counter();
    let summary = RunSummary::from_counter(&counter, 0);
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["topology"], "direct");
    assert_eq!(json["steps"], 0);
    assert_eq!(json["distance_m"], 0.0);
}
