// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use super::load_config;
use crate::cli::{ConfigCommand, GlobalArgs};
use crate::config::Config;
use crate::error::{Error, Result};

/// Execute a config subcommand against the config file at `path`.
pub fn run(cmd: ConfigCommand, global: &GlobalArgs, path: &Path) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let config = load_config(global, path)?;
            print!("{}", show(&config)?);
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommand::Init { force } => {
            init(path, force)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

/// TOML of `config` with the password masked.
pub fn show(config: &Config) -> Result<String> {
    toml::to_string_pretty(&config.masked())
        .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))
}

/// Write a default config file at `path`.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to replace it)",
            path.display()
        )));
    }
    Config::default().save(path)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
