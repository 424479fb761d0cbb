//! Layered configuration access.
//!
//! This crate resolves configuration values for dotted key paths
//! (`"server.port"`) by consulting, in order, an environment variable derived
//! from the path (`SERVER_PORT`), a JSON configuration file loaded at
//! construction, and programmatic defaults. Reads never fail: when no layer
//! has a usable value the target type's zero value is returned.

pub mod coerce;
pub mod constants;
pub mod document;
pub mod env;
pub mod error;
mod layered;
pub mod path;
pub mod value;

pub use coerce::ConfigType;
pub use document::Document;
pub use env::{EnvSource, MockEnv, StdEnv, env_var};
pub use error::{CoerceError, ConfigError};
pub use layered::{Layer, LayeredConfig, Resolved};
pub use path::KeyPath;
pub use value::{DefaultValue, ValueKind};
