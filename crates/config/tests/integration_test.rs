//! Integration tests for layered configuration through the public API.
//!
//! These tests verify end-to-end resolution as an application would use it:
//! construct from a file, register defaults, then read through every layer.

use layered_config::constants::DEFAULT_ENV_SEPARATOR;
use layered_config::{ConfigError, Layer, LayeredConfig, MockEnv, ValueKind};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Test the full precedence chain: env > file > defaults > zero value
#[test]
fn test_full_precedence_chain() {
    let file = write_config(
        r#"{"server": {"host": "file.example.com", "port": 9000}, "log": {"level": "info"}}"#,
    );
    let mut config = LayeredConfig::new(file.path(), DEFAULT_ENV_SEPARATOR)
        .expect("config file should load")
        .with_env_source(MockEnv::from_pairs([("SERVER_PORT", "7000")]));
    config.set_default("server.port", 8000);
    config.set_default("server.timeout", Duration::from_secs(30));
    config.set_default("log.level", "warn");

    assert_eq!(config.get_int("server.port"), 7000);
    assert_eq!(config.get_string("server.host"), "file.example.com");
    assert_eq!(config.get_string("log.level"), "info");
    assert_eq!(config.get_duration("server.timeout"), Duration::from_secs(30));
    assert!(!config.get_bool("server.tls"));

    assert_eq!(config.resolve::<i32>("server.port").layer, Layer::Env);
    assert_eq!(config.resolve::<String>("server.host").layer, Layer::File);
    assert_eq!(config.resolve::<Duration>("server.timeout").layer, Layer::Default);
    assert_eq!(config.resolve::<bool>("server.tls").layer, Layer::Zero);
}

/// Test that construction errors carry the offending path
#[test]
fn test_construction_error_reports_path() {
    let file = write_config("{ invalid json }");
    let err = LayeredConfig::new(file.path(), "_").unwrap_err();

    assert!(matches!(err, ConfigError::FileParse { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

/// Test that a fully initialized config can be shared across threads
#[test]
fn test_shared_reads_across_threads() {
    let mut config = LayeredConfig::from_value(json!({"workers": 4}), "_")
        .unwrap()
        .with_env_source(MockEnv::new());
    config.set_default("queue.depth", 64);
    let config = Arc::new(config);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = Arc::clone(&config);
            std::thread::spawn(move || (config.get_int("workers"), config.get_int("queue.depth")))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), (4, 64));
    }
}

/// Test that the generic getter matches the typed getters
#[test]
fn test_generic_get_matches_typed_getters() {
    let config = LayeredConfig::from_value(json!({"a": {"b": 5, "c": ["x"]}}), "")
        .unwrap();

    assert_eq!(config.get::<i32>("a.b"), config.get_int("a.b"));
    assert_eq!(config.get::<Vec<String>>("a.c"), config.get_string_slice("a.c"));
    assert_eq!(
        <Vec<String> as layered_config::ConfigType>::KIND,
        ValueKind::StringSlice
    );
}
