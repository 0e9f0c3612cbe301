//! Session configuration loading: defaults, JSON overrides, and fail-closed
//! rejection of documents the engine must never see.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use valet_infra::config::{
    ConfigError, DEFAULT_INITIAL_ZONES, DEFAULT_RATE_PER_TICK, SessionConfig,
};

fn temp_config_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "valet_config_{tag}_{}_{}.json",
        std::process::id(),
        nanos
    ))
}

fn cleanup(path: &PathBuf) {
    let _ = fs::remove_file(path);
}

// --- Defaults ---

#[test]
fn test_defaults_when_document_is_empty_object() {
    let config = SessionConfig::from_json_str("{}").unwrap();
    assert_eq!(config, SessionConfig::default());
    assert_eq!(config.initial_zones, DEFAULT_INITIAL_ZONES);
    assert_eq!(config.rate_per_tick, DEFAULT_RATE_PER_TICK);
}

#[test]
fn test_partial_document_keeps_remaining_defaults() {
    let config = SessionConfig::from_json_str(r#"{"initial_zones": 3}"#).unwrap();
    assert_eq!(config.initial_zones, 3);
    assert_eq!(config.rate_per_tick, DEFAULT_RATE_PER_TICK);
}

#[test]
fn test_full_document_overrides_everything() {
    let config =
        SessionConfig::from_json_str(r#"{"initial_zones": 2, "rate_per_tick": 2.5}"#).unwrap();
    assert_eq!(
        config,
        SessionConfig {
            initial_zones: 2,
            rate_per_tick: 2.5,
        }
    );
}

// --- Fail-closed rejection ---

#[test]
fn test_unknown_field_is_rejected() {
    let err = SessionConfig::from_json_str(r#"{"initial_zones": 1, "rate": 2.0}"#)
        .expect_err("unknown field must not be ignored");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_malformed_document_is_rejected() {
    let err = SessionConfig::from_json_str("{not json").expect_err("malformed document");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_negative_rate_is_rejected_after_parsing() {
    let err = SessionConfig::from_json_str(r#"{"rate_per_tick": -1.0}"#)
        .expect_err("negative rate must fail closed");
    match err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "rate_per_tick"),
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn test_zero_rate_parses_fine() {
    let config = SessionConfig::from_json_str(r#"{"rate_per_tick": 0.0}"#).unwrap();
    assert_eq!(config.rate_per_tick, 0.0);
}

// --- File loading ---

#[test]
fn test_load_from_path_round_trip() {
    let path = temp_config_path("round_trip");
    fs::write(&path, r#"{"initial_zones": 4, "rate_per_tick": 0.25}"#).unwrap();

    let config = SessionConfig::load_from_path(&path).unwrap();
    assert_eq!(config.initial_zones, 4);
    assert_eq!(config.rate_per_tick, 0.25);

    cleanup(&path);
}

#[test]
fn test_missing_file_reports_io_error_with_path() {
    let path = temp_config_path("missing");
    let err = SessionConfig::load_from_path(&path).expect_err("file does not exist");
    match err {
        ConfigError::Io { path: reported, .. } => {
            assert!(reported.contains("valet_config_missing"));
        }
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn test_invalid_file_content_is_rejected() {
    let path = temp_config_path("invalid");
    fs::write(&path, r#"{"rate_per_tick": -2.0}"#).unwrap();

    let err = SessionConfig::load_from_path(&path).expect_err("negative rate in file");
    assert!(matches!(err, ConfigError::InvalidValue { .. }));

    cleanup(&path);
}
