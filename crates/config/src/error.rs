//! Error types for the layered configuration.
//!
//! Responsibilities:
//! - Define the construction errors surfaced by `LayeredConfig` constructors.
//! - Define the per-layer coercion error consumed by the resolver.
//!
//! Does NOT handle:
//! - Read-path failures as caller-visible errors. Getters absorb every
//!   `CoerceError` and fall through to the next layer.
//!
//! Invariants:
//! - Error messages never include raw environment values, which may hold secrets.
//! - File errors always carry the offending path.

use std::path::PathBuf;
use thiserror::Error;

use crate::value::ValueKind;

/// Errors that can occur while constructing a `LayeredConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}")]
    FileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config file at {path} must contain a JSON object at the top level")]
    NotAnObject { path: PathBuf },

    #[error("Invalid configuration document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Configuration document must be a JSON object at the top level")]
    DocumentNotAnObject,
}

/// A value was present in a layer but could not be coerced to the requested type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot read {kind} value: {message}")]
pub struct CoerceError {
    pub kind: ValueKind,
    pub message: String,
}

impl CoerceError {
    pub fn new(kind: ValueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The node had a JSON type other than the one the target needs.
    pub(crate) fn mismatch(kind: ValueKind, found: &serde_json::Value) -> Self {
        Self::new(kind, format!("found {}", json_type_name(found)))
    }
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
