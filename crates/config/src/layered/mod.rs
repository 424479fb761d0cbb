//! Layered configuration resolution.
//!
//! Responsibilities:
//! - Own the file layer (loaded once) and the default layer (`set_default`).
//! - Resolve a key path through the environment, file and default layers in order.
//! - Expose one typed getter per supported value kind.
//!
//! Does NOT handle:
//! - Parsing key paths (see `path.rs`) or coercing values (see `coerce.rs`).
//! - Writing anything back to the file or the environment.
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over file values, which take
//!   precedence over defaults.
//! - A layer whose value cannot be coerced is treated as a miss.
//! - Getters never fail; when every layer misses they return the zero value.
//! - `set_default` needs `&mut self`, so defaults are registered before the
//!   instance is shared for reading.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::coerce::ConfigType;
use crate::document::Document;
use crate::env::{EnvSource, StdEnv};
use crate::error::{CoerceError, ConfigError};
use crate::path::KeyPath;
use crate::value::DefaultValue;

/// The source a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Env,
    File,
    Default,
    /// No layer had a usable value; the target type's zero value was returned.
    Zero,
}

impl Layer {
    const LOOKUP_ORDER: [Layer; 3] = [Layer::Env, Layer::File, Layer::Default];

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Env => "env",
            Layer::File => "file",
            Layer::Default => "default",
            Layer::Zero => "zero",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved value together with the layer that supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub layer: Layer,
}

/// Configuration that resolves key paths through environment, file and default layers.
#[derive(Debug, Clone)]
pub struct LayeredConfig<E = StdEnv> {
    defaults: Document,
    file_values: Document,
    env_separator: String,
    env: E,
}

impl LayeredConfig<StdEnv> {
    /// Create a configuration backed by the process environment.
    ///
    /// An empty `file_path` means no configuration file. An empty
    /// `env_separator` disables environment variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `file_path` is non-empty and the file is missing,
    /// unreadable, not valid JSON, or not a JSON object.
    pub fn new(
        file_path: impl AsRef<Path>,
        env_separator: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let file_path = file_path.as_ref();
        let file_values = if file_path.as_os_str().is_empty() {
            Document::new()
        } else {
            Document::from_file(file_path)?
        };
        Ok(Self::with_file_layer(file_values, env_separator.into()))
    }

    /// Create a configuration whose file layer is parsed from a JSON string.
    pub fn from_json_str(json: &str, env_separator: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self::with_file_layer(
            Document::from_json_str(json)?,
            env_separator.into(),
        ))
    }

    /// Create a configuration whose file layer is an already-parsed JSON object.
    pub fn from_value(value: Value, env_separator: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self::with_file_layer(
            Document::from_value(value)?,
            env_separator.into(),
        ))
    }

    fn with_file_layer(file_values: Document, env_separator: String) -> Self {
        Self {
            defaults: Document::new(),
            file_values,
            env_separator,
            env: StdEnv,
        }
    }
}

impl<E: EnvSource> LayeredConfig<E> {
    /// Replace the environment backend, keeping both documents.
    pub fn with_env_source<F: EnvSource>(self, env: F) -> LayeredConfig<F> {
        LayeredConfig {
            defaults: self.defaults,
            file_values: self.file_values,
            env_separator: self.env_separator,
            env,
        }
    }

    /// Register a default at `path`, overwriting any default already there.
    pub fn set_default(&mut self, path: &str, value: impl Into<DefaultValue>) {
        let key = KeyPath::parse(path);
        self.defaults.set(key.segments(), value.into().into_json());
    }

    pub fn env_separator(&self) -> &str {
        &self.env_separator
    }

    /// The environment variable consulted for `path`, or `None` when disabled.
    pub fn env_var_name(&self, path: &str) -> Option<String> {
        KeyPath::parse(path).env_var_name(&self.env_separator)
    }

    pub fn file_document(&self) -> &Document {
        &self.file_values
    }

    pub fn default_document(&self) -> &Document {
        &self.defaults
    }

    /// Read `path` as `T`, falling back to `T::default()` when no layer has it.
    pub fn get<T: ConfigType>(&self, path: &str) -> T {
        self.resolve(path).value
    }

    /// Read `path` as `T` and report which layer supplied the value.
    pub fn resolve<T: ConfigType>(&self, path: &str) -> Resolved<T> {
        let key = KeyPath::parse(path);

        for layer in Layer::LOOKUP_ORDER {
            let attempt = match layer {
                Layer::Env => self.env_layer::<T>(&key),
                Layer::File => document_layer(&self.file_values, &key),
                Layer::Default => document_layer(&self.defaults, &key),
                Layer::Zero => None,
            };
            match attempt {
                Some(Ok(value)) => {
                    tracing::debug!(path, %layer, kind = %T::KIND, "Resolved configuration value");
                    return Resolved { value, layer };
                }
                Some(Err(error)) if layer == Layer::Env => {
                    let var = key.env_var_name(&self.env_separator).unwrap_or_default();
                    tracing::warn!(
                        path,
                        var = var.as_str(),
                        %error,
                        "Ignoring environment override that cannot be read, falling back"
                    );
                }
                Some(Err(error)) => {
                    tracing::debug!(path, %layer, %error, "Skipping configuration value");
                }
                None => {}
            }
        }

        tracing::debug!(path, kind = %T::KIND, "No configuration value found, using zero value");
        Resolved {
            value: T::default(),
            layer: Layer::Zero,
        }
    }

    fn env_layer<T: ConfigType>(&self, key: &KeyPath<'_>) -> Option<Result<T, CoerceError>> {
        let var = key.env_var_name(&self.env_separator)?;
        let raw = self.env.get(&var)?;
        Some(T::from_env(&raw))
    }

    pub fn get_string(&self, path: &str) -> String {
        self.get(path)
    }

    pub fn get_string_slice(&self, path: &str) -> Vec<String> {
        self.get(path)
    }

    pub fn get_map(&self, path: &str) -> HashMap<String, Value> {
        self.get(path)
    }

    pub fn get_string_map(&self, path: &str) -> HashMap<String, String> {
        self.get(path)
    }

    pub fn get_int(&self, path: &str) -> i32 {
        self.get(path)
    }

    pub fn get_int64(&self, path: &str) -> i64 {
        self.get(path)
    }

    pub fn get_bool(&self, path: &str) -> bool {
        self.get(path)
    }

    /// Zero value is the Unix epoch.
    pub fn get_time(&self, path: &str) -> DateTime<Utc> {
        self.get(path)
    }

    pub fn get_duration(&self, path: &str) -> Duration {
        self.get(path)
    }
}

fn document_layer<T: ConfigType>(
    document: &Document,
    key: &KeyPath<'_>,
) -> Option<Result<T, CoerceError>> {
    document.get(key.segments()).map(T::from_json)
}

#[cfg(test)]
mod tests;
