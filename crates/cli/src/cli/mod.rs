// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use crate::colors;
use crate::help;
use barctl_core::StateFilter;
use clap::{Parser, Subcommand, ValueEnum};

pub use args::{parse_state_filter, GlobalArgs, ListArgs, OutputFormat, StorageSelector};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser)]
#[command(name = "barctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse and restore archives through the index server")]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Which collection `watch` follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Collection {
    Storages,
    Entries,
}

#[derive(Subcommand)]
pub enum Command {
    // ─────────────────────────────────────────────────────────────────────────
    // Browse
    // ─────────────────────────────────────────────────────────────────────────
    /// List indexed storages
    #[command(after_help = colors::examples("\
Examples:
  barctl storages                     Newest storages
  barctl storages -n 5 --state error  Five storages that failed to index
  barctl storages 'daily-*' -o json   Matching storages as JSON"))]
    Storages {
        #[command(flatten)]
        list: ListArgs,

        /// Only storages in this index state
        #[arg(long, value_parser = parse_state_filter)]
        state: Option<StateFilter>,
    },

    /// List archive entries
    #[command(after_help = colors::examples("\
Examples:
  barctl entries '*.conf'             Entries ending in .conf
  barctl entries hosts --newest       Only the newest copy of each entry"))]
    Entries {
        #[command(flatten)]
        list: ListArgs,

        /// Only the newest copy of each entry
        #[arg(long)]
        newest: bool,
    },

    /// Follow storages or entries as they change
    ///
    /// Press Enter to refresh now. Typing a pattern before Enter replaces
    /// the current one; `*` clears it.
    Watch {
        /// What to follow
        #[arg(value_enum)]
        collection: Collection,

        /// Name pattern (`*` matches everything)
        pattern: Option<String>,

        /// Seconds between refreshes, overriding the config file
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,

        /// Maximum number of records to request
        #[arg(short = 'n', long)]
        max_count: Option<u64>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Manage
    // ─────────────────────────────────────────────────────────────────────────
    /// Add, remove or re-index storages
    Storage {
        #[command(subcommand)]
        action: StorageCommand,
    },

    /// Restore storages or entries
    #[command(after_help = colors::examples("\
Examples:
  barctl restore a.bar b.bar              Restore two storages in place
  barctl restore a.bar -d /tmp/out        Restore into /tmp/out
  barctl restore -s a.bar /etc/hosts      Restore one entry of a.bar"))]
    Restore {
        /// Storage names, or entry names when --storage is given
        #[arg(required = true, value_name = "TARGET", value_parser = non_empty_string)]
        targets: Vec<String>,

        /// Restore entries of this storage
        #[arg(short, long, value_parser = non_empty_string)]
        storage: Option<String>,

        /// Destination directory (default: original location)
        #[arg(short, long, value_name = "dir")]
        destination: Option<String>,

        /// Overwrite existing files
        #[arg(long)]
        overwrite: bool,
    },

    /// Show or create the client configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum StorageCommand {
    /// Add a storage to the index
    Add {
        /// Storage name, e.g. a file path or URL
        #[arg(value_parser = non_empty_string)]
        name: String,
    },

    /// Remove storages from the index
    Remove {
        #[command(flatten)]
        selector: StorageSelector,
    },

    /// Re-index storages
    Refresh {
        #[command(flatten)]
        selector: StorageSelector,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (password masked)
    Show,

    /// Print the config file location
    Path,

    /// Write a default config file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
