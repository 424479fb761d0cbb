//! Coercion of layer values into typed results.
//!
//! Responsibilities:
//! - Define `ConfigType`, the per-target coercion used by every getter.
//! - Coerce document nodes (file and default layers) into target types.
//! - Coerce raw environment strings into target types.
//!
//! Does NOT handle:
//! - Choosing which layer to read (see `layered.rs`).
//!
//! Invariants:
//! - Each target has exactly one document coercion and one environment coercion.
//! - Environment scalars are parsed directly first and then, failing that, as a
//!   JSON document, so both `30s` and `"30s"` are accepted.
//! - `CoerceError` messages never echo the raw input.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use crate::constants::{EXTENDED_TIME_FORMAT, STRING_SLICE_DELIMITER};
use crate::error::CoerceError;
use crate::value::ValueKind;

/// A type that configuration values can be read as.
///
/// `Default` supplies the zero value returned when every layer misses.
pub trait ConfigType: Default + Sized {
    const KIND: ValueKind;

    /// Coerce a node from the file or default document.
    fn from_json(value: &Value) -> Result<Self, CoerceError>;

    /// Coerce the raw string of an environment variable.
    ///
    /// The default treats the string as a serialized JSON document.
    fn from_env(raw: &str) -> Result<Self, CoerceError> {
        from_json_document(raw)
    }
}

fn from_json_document<T: ConfigType>(raw: &str) -> Result<T, CoerceError> {
    let document: Value = serde_json::from_str(raw).map_err(|e| {
        CoerceError::new(
            T::KIND,
            format!("not a JSON document (line {}, column {})", e.line(), e.column()),
        )
    })?;
    T::from_json(&document)
}

/// Parse an environment scalar directly, falling back to the JSON document form.
fn scalar_from_env<T: ConfigType>(
    raw: &str,
    direct: impl FnOnce(&str) -> Option<T>,
) -> Result<T, CoerceError> {
    match direct(raw.trim()) {
        Some(value) => Ok(value),
        None => from_json_document(raw),
    }
}

fn json_integer(kind: ValueKind, value: &Value) -> Result<i64, CoerceError> {
    let Value::Number(number) = value else {
        return Err(CoerceError::mismatch(kind, value));
    };
    number
        .as_i64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        })
        .ok_or_else(|| CoerceError::new(kind, "number is not a 64-bit integer"))
}

impl ConfigType for String {
    const KIND: ValueKind = ValueKind::String;

    fn from_json(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(CoerceError::mismatch(Self::KIND, other)),
        }
    }

    fn from_env(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_string())
    }
}

impl ConfigType for Vec<String> {
    const KIND: ValueKind = ValueKind::StringSlice;

    fn from_json(value: &Value) -> Result<Self, CoerceError> {
        let Value::Array(items) = value else {
            return Err(CoerceError::mismatch(Self::KIND, value));
        };
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(CoerceError::new(
                    Self::KIND,
                    format!("element is a {}", crate::error::json_type_name(other)),
                )),
            })
            .collect()
    }

    /// Accepts a JSON array (`["x","y"]`) or a plain delimited list (`x,y`).
    fn from_env(raw: &str) -> Result<Self, CoerceError> {
        if raw.trim_start().starts_with('[') {
            return from_json_document(raw);
        }
        Ok(raw
            .split(STRING_SLICE_DELIMITER)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect())
    }
}

impl ConfigType for HashMap<String, Value> {
    const KIND: ValueKind = ValueKind::Map;

    fn from_json(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Object(map) => Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            other => Err(CoerceError::mismatch(Self::KIND, other)),
        }
    }
}

impl ConfigType for HashMap<String, String> {
    const KIND: ValueKind = ValueKind::StringMap;

    fn from_json(value: &Value) -> Result<Self, CoerceError> {
        let Value::Object(map) = value else {
            return Err(CoerceError::mismatch(Self::KIND, value));
        };
        map.iter()
            .map(|(k, v)| match v {
                Value::String(s) => Ok((k.clone(), s.clone())),
                other => Err(CoerceError::new(
                    Self::KIND,
                    format!(
                        "value for key '{k}' is a {}",
                        crate::error::json_type_name(other)
                    ),
                )),
            })
            .collect()
    }
}

impl ConfigType for i32 {
    const KIND: ValueKind = ValueKind::Int;

    fn from_json(value: &Value) -> Result<Self, CoerceError> {
        let wide = json_integer(Self::KIND, value)?;
        i32::try_from(wide).map_err(|_| CoerceError::new(Self::KIND, "number out of range"))
    }

    fn from_env(raw: &str) -> Result<Self, CoerceError> {
        scalar_from_env(raw, |s| s.parse().ok())
    }
}

impl ConfigType for i64 {
    const KIND: ValueKind = ValueKind::Int64;

    fn from_json(value: &Value) -> Result<Self, CoerceError> {
        json_integer(Self::KIND, value)
    }

    fn from_env(raw: &str) -> Result<Self, CoerceError> {
        scalar_from_env(raw, |s| s.parse().ok())
    }
}

impl ConfigType for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_json(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(CoerceError::mismatch(Self::KIND, other)),
        }
    }

    fn from_env(raw: &str) -> Result<Self, CoerceError> {
        scalar_from_env(raw, |s| s.parse().ok())
    }
}

fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, EXTENDED_TIME_FORMAT))
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// The zero timestamp is the Unix epoch (`DateTime::<Utc>::default()`).
impl ConfigType for DateTime<Utc> {
    const KIND: ValueKind = ValueKind::Time;

    fn from_json(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::String(s) => {
                parse_time(s).ok_or_else(|| CoerceError::new(Self::KIND, "not an RFC 3339 timestamp"))
            }
            other => Err(CoerceError::mismatch(Self::KIND, other)),
        }
    }

    fn from_env(raw: &str) -> Result<Self, CoerceError> {
        scalar_from_env(raw, parse_time)
    }
}

fn parse_duration(s: &str) -> Option<Duration> {
    humantime::parse_duration(s)
        .ok()
        .or_else(|| s.parse::<u64>().ok().map(Duration::from_secs))
}

/// Durations are humantime strings (`"1h 30m"`) or whole seconds.
impl ConfigType for Duration {
    const KIND: ValueKind = ValueKind::Duration;

    fn from_json(value: &Value) -> Result<Self, CoerceError> {
        match value {
            Value::String(s) => parse_duration(s)
                .ok_or_else(|| CoerceError::new(Self::KIND, "not a duration such as \"30s\"")),
            Value::Number(n) => n
                .as_u64()
                .map(Duration::from_secs)
                .or_else(|| n.as_f64().and_then(|f| Duration::try_from_secs_f64(f).ok()))
                .ok_or_else(|| CoerceError::new(Self::KIND, "number of seconds is out of range")),
            other => Err(CoerceError::mismatch(Self::KIND, other)),
        }
    }

    fn from_env(raw: &str) -> Result<Self, CoerceError> {
        scalar_from_env(raw, parse_duration)
    }
}
