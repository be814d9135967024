//! Integration tests for config file loading
//!
//! Covers explicit `--config` paths: missing files, malformed files, and
//! merging a file over compiled defaults.

use aqi_common::config::{load_toml_config, ConfigOverrides, ServiceConfig};
use aqi_common::Error;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Should create temp file");
    file.write_all(contents.as_bytes())
        .expect("Should write config");
    file
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let path = PathBuf::from("/nonexistent/aqi/config.toml");
    let result = load_toml_config(Some(&path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_explicit_file_is_loaded_and_merged() {
    let file = write_config(
        r#"
port = 7000
model_path = "/srv/aqi/model.json"

[openweather]
api_key = "abc123"
base_url = "https://api.example.test/"
timeout_secs = 2
"#,
    );

    let toml_config = load_toml_config(Some(file.path()))
        .expect("Should load config")
        .expect("Config should be present");
    let config = ServiceConfig::resolve(ConfigOverrides::default(), Some(toml_config))
        .expect("Should resolve");

    assert_eq!(config.port, 7000);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.model_path, PathBuf::from("/srv/aqi/model.json"));
    assert_eq!(config.openweather_api_key, "abc123");
    assert_eq!(config.openweather_base_url, "https://api.example.test");
    assert_eq!(config.http_timeout, Duration::from_secs(2));
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = write_config("port = \"not a number\"");
    let result = load_toml_config(Some(file.path()));
    match result {
        Err(Error::Config(msg)) => {
            assert!(msg.contains(&file.path().display().to_string()))
        }
        other => panic!("Expected config error, got {:?}", other),
    }
}

#[test]
fn test_empty_file_yields_defaults() {
    let file = write_config("");
    let toml_config = load_toml_config(Some(file.path())).unwrap();
    let config = ServiceConfig::resolve(ConfigOverrides::default(), toml_config).unwrap();
    assert_eq!(config.port, 5000);
}
