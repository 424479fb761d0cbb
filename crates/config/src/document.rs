//! Tree-shaped configuration documents.
//!
//! Responsibilities:
//! - Load the file layer from a JSON file or string.
//! - Look up nodes by key-path segments.
//! - Store nodes at key-path segments (default layer only).
//!
//! Does NOT handle:
//! - Coercing nodes into typed values (see `coerce.rs`).
//! - Merging documents. Each layer is consulted independently.
//!
//! Invariants:
//! - The root is always a JSON object.
//! - Lookups never modify the document.
//! - `set` replaces any non-object node it has to descend through with an object.

use serde_json::{Map, Value};
use std::path::Path;

use crate::error::ConfigError;

/// A JSON object tree addressed by key-path segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Map<String, Value>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a JSON object from `path`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::FileRead` if the file cannot be read.
    /// - `ConfigError::FileParse` if it is not valid JSON.
    /// - `ConfigError::NotAnObject` if the top-level value is not an object.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value =
            serde_json::from_str(&content).map_err(|source| ConfigError::FileParse {
                path: path.to_path_buf(),
                source,
            })?;
        let Value::Object(root) = value else {
            return Err(ConfigError::NotAnObject {
                path: path.to_path_buf(),
            });
        };

        tracing::info!(
            path = %path.display(),
            keys = root.len(),
            "Loaded configuration file"
        );
        Ok(Self { root })
    }

    /// Parse a JSON object from an in-memory string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Wrap an already-parsed JSON object.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(ConfigError::DocumentNotAnObject),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// The node at `segments`, if every segment names an object member.
    pub fn get(&self, segments: &[&str]) -> Option<&Value> {
        let (first, rest) = segments.split_first()?;
        rest.iter()
            .try_fold(self.root.get(*first)?, |node, segment| match node {
                Value::Object(map) => map.get(*segment),
                _ => None,
            })
    }

    /// Store `value` at `segments`, overwriting whatever was there.
    pub fn set(&mut self, segments: &[&str], value: Value) {
        insert_at(&mut self.root, segments, value);
    }
}

fn insert_at(map: &mut Map<String, Value>, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert(last.to_string(), value);
        }
        [first, rest @ ..] => match map.entry(first.to_string()).or_insert(Value::Null) {
            Value::Object(child) => insert_at(child, rest, value),
            other => {
                let mut child = Map::new();
                insert_at(&mut child, rest, value);
                *other = Value::Object(child);
            }
        },
    }
}
