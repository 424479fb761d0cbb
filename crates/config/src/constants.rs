//! Centralized constants for the layered configuration crate.
//!
//! This module contains the delimiters and conventions shared by key-path
//! parsing, environment name derivation and value coercion.

// =============================================================================
// Key Paths
// =============================================================================

/// Delimiter between segments of a key path (`"server.port"`).
pub const PATH_DELIMITER: char = '.';

/// Separator most applications use between upper-cased segments of an
/// environment variable name (`SERVER_PORT`).
pub const DEFAULT_ENV_SEPARATOR: &str = "_";

/// Separator that disables environment variable resolution.
pub const ENV_DISABLED: &str = "";

// =============================================================================
// Coercion
// =============================================================================

/// Timestamp format for years RFC 3339 cannot hold. `%Y` writes and accepts
/// a sign for years before 0000 or after 9999.
pub const EXTENDED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Delimiter for the plain-text list form of a string slice in the
/// environment (`"x,y,z"`).
pub const STRING_SLICE_DELIMITER: char = ',';
