// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use barctl_core::ErrorCode;
use thiserror::Error;

use crate::channel::ChannelError;

/// All possible errors that can occur in the barctl library.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}\n  hint: check the server address with 'barctl config show'")]
    Channel(#[from] ChannelError),

    #[error("protocol error: {0}")]
    Protocol(#[from] barctl_core::Error),

    #[error("server error {code}: {text}")]
    Server { code: ErrorCode, text: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("ui context closed")]
    UiClosed,

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("operation cancelled")]
    Cancelled,

    #[error("some restores failed: {restored} restored, {failed} failed")]
    PartialRestoreFailure { restored: usize, failed: usize },
}

impl Error {
    /// Server error from a failed command completion.
    pub fn server(code: ErrorCode, text: impl Into<String>) -> Self {
        Error::Server {
            code,
            text: text.into(),
        }
    }
}

/// A specialized Result type for barctl operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
