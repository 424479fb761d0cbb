//! Tests for layered configuration resolution.
//!
//! Responsibilities:
//! - Test layer precedence (environment over file over defaults).
//! - Test default registration and zero-value fallback.
//! - Test environment name derivation against the real process environment.
//! - Test file loading at construction.
//!
//! Invariants:
//! - Tests that touch the process environment use `serial_test` and `env_lock()`.
//! - Other tests inject a `MockEnv` and never read the process environment.
//! - Temporary files are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod defaults_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
