// ABOUTME: Tests for tuning configuration defaults, environment overrides and validation
// ABOUTME: Environment-mutating tests run serially to avoid cross-test interference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use serial_test::serial;
use std::env;
use stepwise::logging::{LogFormat, LoggingConfig};
use stepwise::{ConfigError, PipelineTopology, TuningConfig};

const TUNING_VARS: [&str; 8] = [
    "STEPWISE_TOPOLOGY",
    "STEPWISE_WINDOW_SIZE",
    "STEPWISE_THRESHOLD_INT",
    "STEPWISE_THRESHOLD_FRAC",
    "STEPWISE_TIME_THRESHOLD_MS",
    "STEPWISE_MOTION_THRESHOLD",
    "STEPWISE_COUNTS_PER_G",
    "STEPWISE_REFERENCE_CADENCE_HZ",
];

fn clear_tuning_env() {
    for name in TUNING_VARS {
        env::remove_var(name);
    }
}

#[test]
fn test_defaults() {
    let config = TuningConfig::default();
    assert_eq!(config.topology, PipelineTopology::Filtered);
    assert_eq!(config.window_size, 10);
    assert_eq!((config.threshold_int, config.threshold_frac), (0, 6));
    assert_eq!(config.time_threshold_ms, 300);
    assert_eq!(config.motion_threshold, 150);
    assert_eq!(config.counts_per_g, 1000);
    assert_eq!(config.reference_cadence_hz, 1.6);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_without_overrides_matches_defaults() {
    clear_tuning_env();
    assert_eq!(TuningConfig::load().unwrap(), TuningConfig::default());
}

#[test]
#[serial]
fn test_env_overrides() {
    clear_tuning_env();
    env::set_var("STEPWISE_TOPOLOGY", "Motion-Gated");
    env::set_var("STEPWISE_WINDOW_SIZE", "16");
    env::set_var("STEPWISE_THRESHOLD_INT", "1");
    env::set_var("STEPWISE_THRESHOLD_FRAC", " 4 ");
    env::set_var("STEPWISE_TIME_THRESHOLD_MS", "250");
    env::set_var("STEPWISE_MOTION_THRESHOLD", "200");
    env::set_var("STEPWISE_COUNTS_PER_G", "4096");
    env::set_var("STEPWISE_REFERENCE_CADENCE_HZ", "1.8");

    let config = TuningConfig::load().unwrap();
    clear_tuning_env();

    assert_eq!(config.topology, PipelineTopology::MotionGated);
    assert_eq!(config.window_size, 16);
    assert_eq!((config.threshold_int, config.threshold_frac), (1, 4));
    assert_eq!(config.time_threshold_ms, 250);
    assert_eq!(config.motion_threshold, 200);
    assert_eq!(config.counts_per_g, 4096);
    assert_eq!(config.reference_cadence_hz, 1.8);
}

#[test]
#[serial]
fn test_unparseable_override_is_rejected() {
    clear_tuning_env();
    env::set_var("STEPWISE_WINDOW_SIZE", "ten");
    let result = TuningConfig::load();
    clear_tuning_env();

    match result {
        Err(ConfigError::Parse(message)) => assert!(message.contains("STEPWISE_WINDOW_SIZE")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
#[serial]
fn test_non_unicode_override_is_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    clear_tuning_env();
    env::set_var(
        "STEPWISE_TIME_THRESHOLD_MS",
        OsStr::from_bytes(&[0x33, 0x30, 0xff]),
    );
    let result = TuningConfig::load();
    clear_tuning_env();
    assert!(matches!(
        result,
        Err(ConfigError::EnvVar(env::VarError::NotUnicode(_)))
    ));
}

#[test]
#[serial]
fn test_out_of_range_override_fails_validation() {
    clear_tuning_env();
    env::set_var("STEPWISE_WINDOW_SIZE", "100");
    let result = TuningConfig::load();
    clear_tuning_env();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidWindowSize { size: 100, .. })
    ));
}

#[test]
#[serial]
fn test_unknown_topology_is_rejected() {
    clear_tuning_env();
    env::set_var("STEPWISE_TOPOLOGY", "kalman");
    let result = TuningConfig::load();
    clear_tuning_env();
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
#[serial]
fn test_load_or_default_falls_back() {
    clear_tuning_env();
    env::set_var("STEPWISE_THRESHOLD_FRAC", "0");
    let config = TuningConfig::load_or_default();
    clear_tuning_env();
    assert_eq!(config, TuningConfig::default());
}

#[test]
fn test_validate_rejects_bad_values() {
    let with = |edit: fn(&mut TuningConfig)| {
        let mut config = TuningConfig::default();
        edit(&mut config);
        config.validate()
    };

    assert!(matches!(
        with(|c| c.threshold_int = -2),
        Err(ConfigError::InvalidThreshold { .. })
    ));
    assert!(matches!(
        with(|c| c.motion_threshold = -1),
        Err(ConfigError::ValueOutOfRange(_))
    ));
    assert!(matches!(
        with(|c| c.counts_per_g = 0),
        Err(ConfigError::ValueOutOfRange(_))
    ));
    assert!(matches!(
        with(|c| c.reference_cadence_hz = f64::NAN),
        Err(ConfigError::ValueOutOfRange(_))
    ));
}

#[test]
fn test_topology_parsing() {
    assert_eq!(
        "direct".parse::<PipelineTopology>().unwrap(),
        PipelineTopology::Direct
    );
    assert_eq!(
        "FILTERED".parse::<PipelineTopology>().unwrap(),
        PipelineTopology::Filtered
    );
    assert_eq!(
        "motion_gated".parse::<PipelineTopology>().unwrap(),
        PipelineTopology::MotionGated
    );
    assert!("".parse::<PipelineTopology>().is_err());
    assert_eq!(PipelineTopology::MotionGated.to_string(), "motion_gated");
}

#[test]
fn test_tuning_serde_fills_missing_fields() {
    let config: TuningConfig =
        serde_json::from_str(r#"{"topology": "direct", "window_size": 12}"#).unwrap();
    assert_eq!(config.topology, PipelineTopology::Direct);
    assert_eq!(config.window_size, 12);
    assert_eq!(config.time_threshold_ms, 300);
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("LOG_FORMAT", "json");
    env::set_var("RUST_LOG", "trace");
    let config = LoggingConfig::from_env();
    env::remove_var("LOG_FORMAT");
    env::remove_var("RUST_LOG");

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, "trace");
    assert_eq!(LoggingConfig::default().verbose(true).level, "debug");
    assert_eq!(LogFormat::from_name("anything"), LogFormat::Compact);
}
