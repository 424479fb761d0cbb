//! Environment variable access for the environment layer.
//!
//! Responsibilities:
//! - Abstract over where environment values come from (`EnvSource`).
//! - Read from the process environment (`StdEnv`) or an in-memory map (`MockEnv`).
//!
//! Does NOT handle:
//! - Deriving variable names from key paths (see `path.rs`).
//! - Coercing raw strings into typed values (see `coerce.rs`).
//!
//! Invariants:
//! - Access is read-only. Nothing in this crate sets or removes variables.
//! - A variable that is set to an empty string is still "set".
//! - Values that are not valid Unicode are treated as unset.

use std::collections::HashMap;

/// Source of environment variable values.
pub trait EnvSource {
    /// Get the value of an environment variable by name.
    fn get(&self, name: &str) -> Option<String>;
}

/// Environment source that reads from the actual process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
    fn get(&self, name: &str) -> Option<String> {
        env_var(name)
    }
}

/// Environment source backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock environment from an iterator of key-value pairs.
    pub fn from_pairs<I, K, V>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl EnvSource for MockEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Read a process environment variable, returning None if unset or not Unicode.
pub fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            tracing::debug!(var = key, "Ignoring environment variable with non-Unicode value");
            None
        }
    }
}
