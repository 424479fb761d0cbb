//! Key-path parsing and environment variable name derivation.
//!
//! Responsibilities:
//! - Split a dotted key path (`"server.port"`) into document segments.
//! - Derive the environment variable name for a path (`SERVER_PORT`).
//!
//! Does NOT handle:
//! - Reading the environment (see `env.rs`).
//! - Walking documents (see `document.rs`).
//!
//! Invariants:
//! - Splitting is plain string splitting: `"a..b"` has an empty middle segment
//!   and `""` is a single empty segment.
//! - Each segment is upper-cased individually; the separator is used verbatim.
//!   A separator containing lowercase letters stays lowercase: `"db.host"`
//!   with `"-x-"` gives `DB-x-HOST`, not `DB-X-HOST`.
//! - An empty separator disables environment lookup entirely.

use std::fmt;

use crate::constants::PATH_DELIMITER;

/// A parsed key path addressing a location in a configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath<'a> {
    raw: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> KeyPath<'a> {
    pub fn parse(raw: &'a str) -> Self {
        Self {
            raw,
            segments: raw.split(PATH_DELIMITER).collect(),
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// Environment variable name for this path, or `None` when `separator` is empty.
    pub fn env_var_name(&self, separator: &str) -> Option<String> {
        if separator.is_empty() {
            return None;
        }
        let name = self
            .segments
            .iter()
            .map(|segment| segment.to_uppercase())
            .collect::<Vec<_>>()
            .join(separator);
        Some(name)
    }
}

impl fmt::Display for KeyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}
