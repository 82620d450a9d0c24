// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod config;
pub mod list;
pub mod restore;
pub mod storage;
pub mod views;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::channel::{CommandChannel, TcpChannel};
use crate::cli::GlobalArgs;
use crate::config::Config;
use crate::error::Result;
use crate::ui::UiContext;

/// Config file named by `--config`, else the default location.
pub fn config_path(global: &GlobalArgs) -> Result<PathBuf> {
    match &global.config {
        Some(path) => Ok(path.clone()),
        None => Config::default_path(),
    }
}

/// Load the config at `path` (defaults when missing) and apply the
/// `--host`/`--port` overrides.
pub fn load_config(global: &GlobalArgs, path: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(path)?;
    if let Some(host) = &global.host {
        config.server.host = host.clone();
    }
    if let Some(port) = global.port {
        config.server.port = port;
    }
    Ok(config)
}

/// Everything a server command needs: the effective config, an open
/// channel and the UI context views run on.
pub struct Session {
    pub config: Config,
    pub channel: Arc<dyn CommandChannel>,
    pub ui: UiContext,
}

impl Session {
    /// Connect to the server named by `config`.
    pub async fn connect(config: Config, ui: UiContext) -> Result<Self> {
        let address = config.address();
        tracing::debug!(address = %address, "connecting");
        let channel = TcpChannel::connect(&address).await?;
        Ok(Session {
            config,
            channel: Arc::new(channel),
            ui,
        })
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
