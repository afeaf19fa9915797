//! Configuration structures and loading utilities.
//!
//! Every configuration struct exposes `from_env()` and a matching `Default`,
//! so tests can build configs directly while the binary reads the process
//! environment.

pub mod metrics;
pub mod places;
pub mod resilient_client;
pub mod security;
pub mod server;

pub use metrics::*;
pub use places::*;
pub use security::*;
pub use server::*;

use std::{env, str::FromStr};

/// Read and parse an environment variable, falling back to `default` when it
/// is unset or does not parse.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a boolean flag; only a case-insensitive `"true"` enables it.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

/// Read a string variable, treating empty or whitespace-only values as unset.
pub(crate) fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
