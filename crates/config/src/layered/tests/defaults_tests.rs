//! Default registration and zero-value tests.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

use crate::env::MockEnv;
use crate::layered::{Layer, LayeredConfig};

fn empty_config() -> LayeredConfig<MockEnv> {
    LayeredConfig::new("", "_")
        .unwrap()
        .with_env_source(MockEnv::new())
}

#[test]
fn test_missing_values_return_zero_values() {
    let config = empty_config();

    assert_eq!(config.get_string("missing.key"), "");
    assert!(config.get_string_slice("missing.key").is_empty());
    assert!(config.get_map("missing.key").is_empty());
    assert!(config.get_string_map("missing.key").is_empty());
    assert_eq!(config.get_int("missing.key"), 0);
    assert_eq!(config.get_int64("missing.key"), 0);
    assert!(!config.get_bool("missing.key"));
    assert_eq!(config.get_time("missing.key"), DateTime::<Utc>::UNIX_EPOCH);
    assert_eq!(config.get_duration("missing.key"), Duration::ZERO);
    assert_eq!(config.resolve::<String>("missing.key").layer, Layer::Zero);
}

#[test]
fn test_set_default_then_get() {
    let mut config = empty_config();
    config.set_default("a.b.c", "x");

    assert_eq!(config.get_string("a.b.c"), "x");
}

#[test]
fn test_set_default_overwrites_previous_default() {
    let mut config = empty_config();
    config.set_default("server.port", 8000);
    config.set_default("server.port", 8001);

    assert_eq!(config.get_int("server.port"), 8001);
}

#[test]
fn test_defaults_of_every_kind_read_back() {
    let started = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let labels = HashMap::from([("team".to_string(), "core".to_string())]);
    let extra = HashMap::from([("retries".to_string(), json!(3))]);

    let mut config = empty_config();
    config.set_default("name", "svc".to_string());
    config.set_default("tags", vec!["a", "b"]);
    config.set_default("labels", labels.clone());
    config.set_default("extra", extra.clone());
    config.set_default("count", 7);
    config.set_default("big", 7_000_000_000i64);
    config.set_default("enabled", true);
    config.set_default("started", started);
    config.set_default("timeout", Duration::from_millis(1500));

    assert_eq!(config.get_string("name"), "svc");
    assert_eq!(config.get_string_slice("tags"), vec!["a", "b"]);
    assert_eq!(config.get_string_map("labels"), labels);
    assert_eq!(config.get_map("extra"), extra);
    assert_eq!(config.get_int("count"), 7);
    assert_eq!(config.get_int64("big"), 7_000_000_000);
    assert!(config.get_bool("enabled"));
    assert_eq!(config.get_time("started"), started);
    assert_eq!(config.get_duration("timeout"), Duration::from_millis(1500));
}

#[test]
fn test_time_defaults_outside_four_digit_years_read_back() {
    let far_future = Utc.with_ymd_and_hms(12000, 1, 1, 0, 0, 0).unwrap();
    let before_year_zero = Utc.with_ymd_and_hms(-5, 3, 4, 5, 6, 7).unwrap();

    let mut config = empty_config();
    config.set_default("future", far_future);
    config.set_default("past", before_year_zero);

    let future = config.resolve::<DateTime<Utc>>("future");
    assert_eq!(future.value, far_future);
    assert_eq!(future.layer, Layer::Default);
    assert_eq!(config.get_time("past"), before_year_zero);
}

#[test]
fn test_default_subtree_is_readable_as_map() {
    let mut config = empty_config();
    config.set_default("db.host", "localhost");
    config.set_default("db.port", 5432);

    let db = config.get_map("db");
    assert_eq!(db["host"], json!("localhost"));
    assert_eq!(db["port"], json!(5432));
}

#[test]
fn test_reads_do_not_mutate_layers() {
    let mut config = LayeredConfig::from_value(json!({"a": 1}), "_")
        .unwrap()
        .with_env_source(MockEnv::new());
    config.set_default("b", 2);
    let file_before = config.file_document().clone();
    let defaults_before = config.default_document().clone();

    let _ = config.get_int("a");
    let _ = config.get_int("b");
    let _ = config.get_string("missing.deep.key");

    assert_eq!(config.file_document(), &file_before);
    assert_eq!(config.default_document(), &defaults_before);
}

#[test]
fn test_int_default_is_readable_as_int64() {
    let mut config = empty_config();
    config.set_default("limit", 10);

    assert_eq!(config.get_int64("limit"), 10);
}
