// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for format compilation and line decoding.

use thiserror::Error;

/// All possible errors that can occur while compiling a format or decoding a line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The format specifier itself is malformed. This is a programming error
    /// in the caller and is reported when the format is compiled.
    #[error("malformed format '{format}' at {position}: {reason}")]
    Format {
        format: String,
        position: usize,
        reason: String,
    },

    #[error("line does not match format (stopped at offset {offset})")]
    Mismatch { offset: usize },

    #[error("invalid number '{token}' at offset {offset}")]
    InvalidNumber { token: String, offset: usize },

    #[error("'{value}' is not a constant of {enum_type}")]
    UnknownConstant { enum_type: String, value: String },

    #[error("field {index}: expected {expected}")]
    FieldType { index: usize, expected: &'static str },

    #[error("invalid value '{value}' for {what}")]
    InvalidValue { what: &'static str, value: String },
}

impl Error {
    /// Returns true for errors raised while compiling a format rather than
    /// while decoding a subject line.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::Format { .. })
    }

    /// Returns the subject offset at which decoding stopped, if known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Mismatch { offset } | Error::InvalidNumber { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    pub(crate) fn format(format: &str, position: usize, reason: impl Into<String>) -> Self {
        Error::Format {
            format: format.to_string(),
            position,
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for barctl-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
