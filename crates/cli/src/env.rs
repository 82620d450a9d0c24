// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`vars`] submodule. `RUST_LOG` is read by the log filter directly.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `BARCTL_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(vars::BARCTL_CONFIG).ok().map(PathBuf::from)
}

/// Returns the decryption password from `BARCTL_CRYPT_PASSWORD`, if set and
/// not empty.
pub fn crypt_password() -> Option<String> {
    std::env::var(vars::BARCTL_CRYPT_PASSWORD)
        .ok()
        .filter(|v| !v.is_empty())
}

/// Returns `true` if `NO_COLOR=1`.
pub fn no_color() -> bool {
    std::env::var(vars::NO_COLOR).is_ok_and(|v| v == "1")
}

/// Returns `true` if `COLOR=1`.
pub fn force_color() -> bool {
    std::env::var(vars::COLOR).is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
