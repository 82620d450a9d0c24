// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Commands sent to the archiver server.
//!
//! Every command renders to a single text line. String arguments are quoted
//! with [`crate::escape::quote`]; `*` stands for "no filter".

use std::fmt;

use crate::escape::quote;
use crate::storage::{StateFilter, StorageId};

/// A command understood by the server.
#[derive(Clone, PartialEq, Eq)]
pub enum Command {
    /// List indexed storages.
    StorageList {
        max_count: u64,
        state: StateFilter,
        pattern: Option<String>,
    },

    /// List archive entries.
    EntriesList {
        max_count: u64,
        newest_only: bool,
        pattern: Option<String>,
    },

    /// Add a storage to the index.
    StorageAdd { name: String },

    /// Remove one storage (`id`) or every storage matching `state`.
    StorageRemove {
        state: StateFilter,
        id: Option<StorageId>,
    },

    /// Re-index one storage (`id`) or every storage matching `state`.
    StorageRefresh {
        state: StateFilter,
        id: Option<StorageId>,
    },

    /// Restore a storage, or a single entry of it.
    ///
    /// An empty `destination` restores in place.
    Restore {
        storage_name: String,
        destination: String,
        overwrite: bool,
        entry_name: Option<String>,
    },

    /// Register a decryption password with the session.
    DecryptPasswordAdd { password: String },

    /// Abort a running command.
    Abort { command_id: u64 },
}

impl Command {
    /// Creates a StorageList command.
    pub fn storage_list(max_count: u64, state: StateFilter, pattern: Option<String>) -> Self {
        Command::StorageList {
            max_count,
            state,
            pattern,
        }
    }

    /// Creates an EntriesList command.
    pub fn entries_list(max_count: u64, newest_only: bool, pattern: Option<String>) -> Self {
        Command::EntriesList {
            max_count,
            newest_only,
            pattern,
        }
    }

    /// Creates a Restore command.
    pub fn restore(
        storage_name: impl Into<String>,
        destination: impl Into<String>,
        overwrite: bool,
        entry_name: Option<String>,
    ) -> Self {
        Command::Restore {
            storage_name: storage_name.into(),
            destination: destination.into(),
            overwrite,
            entry_name,
        }
    }

    /// Creates a DecryptPasswordAdd command.
    pub fn decrypt_password_add(password: impl Into<String>) -> Self {
        Command::DecryptPasswordAdd {
            password: password.into(),
        }
    }

    /// Command keyword.
    pub fn name(&self) -> &'static str {
        match self {
            Command::StorageList { .. } => "INDEX_STORAGE_LIST",
            Command::EntriesList { .. } => "INDEX_ENTRIES_LIST",
            Command::StorageAdd { .. } => "INDEX_STORAGE_ADD",
            Command::StorageRemove { .. } => "INDEX_STORAGE_REMOVE",
            Command::StorageRefresh { .. } => "INDEX_STORAGE_REFRESH",
            Command::Restore { .. } => "RESTORE",
            Command::DecryptPasswordAdd { .. } => "DECRYPT_PASSWORD_ADD",
            Command::Abort { .. } => "ABORT",
        }
    }

    /// Wire form of the command.
    pub fn to_line(&self) -> String {
        match self {
            Command::StorageList {
                max_count,
                state,
                pattern,
            } => format!(
                "{} {} {} {}",
                self.name(),
                max_count,
                state.as_arg(),
                pattern_arg(pattern.as_deref())
            ),
            Command::EntriesList {
                max_count,
                newest_only,
                pattern,
            } => format!(
                "{} {} {} {}",
                self.name(),
                max_count,
                u8::from(*newest_only),
                pattern_arg(pattern.as_deref())
            ),
            Command::StorageAdd { name } => format!("{} {}", self.name(), quote(name)),
            Command::StorageRemove { state, id } | Command::StorageRefresh { state, id } => {
                format!("{} {} {}", self.name(), state.as_arg(), id.unwrap_or(0))
            }
            Command::Restore {
                storage_name,
                destination,
                overwrite,
                entry_name,
            } => {
                let mut line = format!(
                    "{} {} {} {}",
                    self.name(),
                    quote(storage_name),
                    quote(destination),
                    u8::from(*overwrite)
                );
                if let Some(entry) = entry_name {
                    line.push(' ');
                    line.push_str(&quote(entry));
                }
                line
            }
            Command::DecryptPasswordAdd { password } => {
                format!("{} {}", self.name(), quote(password))
            }
            Command::Abort { command_id } => format!("{} {}", self.name(), command_id),
        }
    }

    /// Wire form with secrets masked, for logs.
    pub fn redacted(&self) -> String {
        match self {
            Command::DecryptPasswordAdd { .. } => format!("{} \"***\"", self.name()),
            _ => self.to_line(),
        }
    }
}

fn pattern_arg(pattern: Option<&str>) -> String {
    match pattern {
        None | Some("") | Some("*") => "*".to_string(),
        Some(p) => quote(p),
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command({})", self.redacted())
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
