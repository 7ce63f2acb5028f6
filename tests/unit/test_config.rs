//! Unit tests for the config module
//!
//! Tests cover:
//! - Loading from an explicit TOML file
//! - Validation errors and their exit codes
//! - Validation running after overrides, not during load

use std::io::Write;

use tickring::config::{Config, LogFormat};
use tickring::errors::{get_exit_code, EXIT_CONFIG_ERROR};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("failed to write temp config");
    file
}

#[test]
fn test_load_explicit_file() {
    let file = write_config(
        r#"
[server]
host = "127.0.0.1"
port = 8088

[history]
capacity = 25

[clock]
default_timezone = "Europe/Madrid"

[logging]
format = "json"
"#,
    );
    let config = Config::load(file.path().to_str()).unwrap();
    assert_eq!(config.bind_addr(), "127.0.0.1:8088");
    assert_eq!(config.history_capacity(), Some(25));
    assert_eq!(config.default_tz().unwrap(), chrono_tz::Europe::Madrid);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_load_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    assert!(Config::load(path.to_str()).is_err());
}

#[test]
fn test_load_invalid_toml_is_error() {
    let file = write_config("[server\nport = ");
    let err = Config::load(file.path().to_str()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_load_records_source_path() {
    let file = write_config("[server]\nport = 8089\n");
    let config = Config::load(file.path().to_str()).unwrap();
    assert_eq!(config.source(), file.path().to_str());
}

#[test]
fn test_zero_capacity_maps_to_config_exit_code() {
    let file = write_config("[history]\ncapacity = 0\n");
    let config = Config::load(file.path().to_str()).unwrap();
    let err = anyhow::Error::from(config.validate().unwrap_err());
    assert_eq!(get_exit_code(&err), EXIT_CONFIG_ERROR);
}

#[test]
fn test_zero_capacity_can_be_overridden_before_validation() {
    let file = write_config("[history]\ncapacity = 0\n");
    let mut config = Config::load(file.path().to_str()).unwrap();
    config.history.unbounded = true;
    assert!(config.validate().is_ok());
    assert_eq!(config.history_capacity(), None);
}

#[test]
fn test_unknown_timezone_maps_to_config_exit_code() {
    let file = write_config("[clock]\ndefault_timezone = \"Atlantis/Capital\"\n");
    let config = Config::load(file.path().to_str()).unwrap();
    let err = anyhow::Error::from(config.validate().unwrap_err());
    assert_eq!(get_exit_code(&err), EXIT_CONFIG_ERROR);
}
