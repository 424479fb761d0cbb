//! Value kinds and programmatic default values.
//!
//! Responsibilities:
//! - Name the read targets supported by the getters (`ValueKind`).
//! - Convert values passed to `set_default` into document nodes (`DefaultValue`).
//!
//! Does NOT handle:
//! - Coercing document nodes back into typed values (see `coerce.rs`).
//!
//! Invariants:
//! - Timestamps are stored as RFC 3339 strings in UTC. Years outside
//!   0000-9999 carry a sign (`+12000-01-01T00:00:00+00:00`), which RFC 3339
//!   cannot express.
//! - Durations are stored as humantime strings (`"1m 30s"`).
//! - Every `DefaultValue` reads back unchanged through the getter of its kind.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// The target types a configuration value can be read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    StringSlice,
    Map,
    StringMap,
    Int,
    Int64,
    Bool,
    Time,
    Duration,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::StringSlice => "string slice",
            ValueKind::Map => "map",
            ValueKind::StringMap => "string map",
            ValueKind::Int => "int",
            ValueKind::Int64 => "int64",
            ValueKind::Bool => "bool",
            ValueKind::Time => "time",
            ValueKind::Duration => "duration",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value that can be registered as a programmatic default.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    String(String),
    StringSlice(Vec<String>),
    Map(HashMap<String, Value>),
    StringMap(HashMap<String, String>),
    Int(i32),
    Int64(i64),
    Bool(bool),
    Time(DateTime<Utc>),
    Duration(Duration),
    /// An arbitrary JSON subtree, stored as given.
    Json(Value),
}

impl DefaultValue {
    /// Convert into the document node stored in the default layer.
    pub fn into_json(self) -> Value {
        match self {
            DefaultValue::String(s) => Value::String(s),
            DefaultValue::StringSlice(items) => {
                Value::Array(items.into_iter().map(Value::String).collect())
            }
            DefaultValue::Map(map) => Value::Object(map.into_iter().collect()),
            DefaultValue::StringMap(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect(),
            ),
            DefaultValue::Int(n) => Value::from(n),
            DefaultValue::Int64(n) => Value::from(n),
            DefaultValue::Bool(b) => Value::Bool(b),
            DefaultValue::Time(t) => Value::String(format_time(&t)),
            DefaultValue::Duration(d) => {
                Value::String(humantime::format_duration(d).to_string())
            }
            DefaultValue::Json(value) => value,
        }
    }
}

fn format_time(t: &DateTime<Utc>) -> String {
    if (0..=9999).contains(&t.year()) {
        t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    } else {
        t.format(crate::constants::EXTENDED_TIME_FORMAT).to_string()
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::String(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        DefaultValue::String(value)
    }
}

impl From<Vec<String>> for DefaultValue {
    fn from(value: Vec<String>) -> Self {
        DefaultValue::StringSlice(value)
    }
}

impl From<Vec<&str>> for DefaultValue {
    fn from(value: Vec<&str>) -> Self {
        DefaultValue::StringSlice(value.into_iter().map(String::from).collect())
    }
}

impl From<HashMap<String, Value>> for DefaultValue {
    fn from(value: HashMap<String, Value>) -> Self {
        DefaultValue::Map(value)
    }
}

impl From<HashMap<String, String>> for DefaultValue {
    fn from(value: HashMap<String, String>) -> Self {
        DefaultValue::StringMap(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        DefaultValue::Int(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        DefaultValue::Int64(value)
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for DefaultValue {
    fn from(value: DateTime<Utc>) -> Self {
        DefaultValue::Time(value)
    }
}

impl From<Duration> for DefaultValue {
    fn from(value: Duration) -> Self {
        DefaultValue::Duration(value)
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Json(value)
    }
}
