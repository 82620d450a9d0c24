// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server error codes.
//!
//! The server reports a numeric code with every command completion. The
//! full catalog lives on the server; the client only compares codes by value
//! and gives special treatment to the password-related ones.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric completion code of a server command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(pub u32);

impl ErrorCode {
    pub const NONE: ErrorCode = ErrorCode(0);
    pub const NO_CRYPT_PASSWORD: ErrorCode = ErrorCode(46);
    pub const INVALID_CRYPT_PASSWORD: ErrorCode = ErrorCode(47);
    pub const CORRUPT_DATA: ErrorCode = ErrorCode(78);

    pub fn is_ok(self) -> bool {
        self == ErrorCode::NONE
    }

    /// Codes after which supplying a decryption password may help.
    pub fn is_password_related(self) -> bool {
        matches!(
            self,
            ErrorCode::NO_CRYPT_PASSWORD
                | ErrorCode::INVALID_CRYPT_PASSWORD
                | ErrorCode::CORRUPT_DATA
        )
    }

    pub fn name(self) -> Option<&'static str> {
        match self {
            ErrorCode::NONE => Some("none"),
            ErrorCode::NO_CRYPT_PASSWORD => Some("no crypt password"),
            ErrorCode::INVALID_CRYPT_PASSWORD => Some("invalid crypt password"),
            ErrorCode::CORRUPT_DATA => Some("corrupt data"),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", self.0, name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        ErrorCode(code)
    }
}

#[cfg(test)]
#[path = "code_tests.rs"]
mod tests;
