// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! These structs are used with `#[command(flatten)]` by the commands that
//! talk to the same kinds of things.

use std::path::PathBuf;

use barctl_core::{StateFilter, StorageId};
use clap::{Args, ValueEnum};

/// Output format for listing commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options accepted by every command.
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Config file to use instead of the default location
    #[arg(short = 'c', long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Server host, overriding the config file
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Server port, overriding the config file
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "path")]
    pub log_file: Option<PathBuf>,
}

/// Arguments shared by the listing commands.
#[derive(Args, Clone, Debug, Default)]
pub struct ListArgs {
    /// Name pattern (`*` matches everything)
    pub pattern: Option<String>,

    /// Maximum number of records to request
    #[arg(short = 'n', long)]
    pub max_count: Option<u64>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t)]
    pub output: OutputFormat,
}

/// Selects the storages an index command applies to.
#[derive(Args, Clone, Debug, Default)]
pub struct StorageSelector {
    /// Storage id
    #[arg(required_unless_present = "state")]
    pub id: Option<StorageId>,

    /// Apply to every storage in this index state instead
    #[arg(long, value_parser = parse_state_filter)]
    pub state: Option<StateFilter>,
}

impl StorageSelector {
    /// The state filter to send; an id alone matches any state.
    pub fn state_filter(&self) -> StateFilter {
        self.state.unwrap_or_default()
    }
}

/// Parse an index state name such as `ok` or `update_requested`, or `*`.
pub fn parse_state_filter(s: &str) -> Result<StateFilter, String> {
    s.to_ascii_uppercase()
        .parse::<StateFilter>()
        .map_err(|e| e.to_string())
}
