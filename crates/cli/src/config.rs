// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration management.
//!
//! Configuration is stored in `config.toml` under the user config directory
//! (or at `$BARCTL_CONFIG`) and includes:
//! - `[server]`: address of the archiver server and an optional password
//! - `[sync]`: poll interval and list size of the background refresh
//! - `[restore]`: read timeout of restore transfers

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};
use crate::restore::RestoreSettings;
use crate::sync::SyncSettings;

const CONFIG_DIR_NAME: &str = "barctl";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub restore: RestoreConfig,
}

/// Archiver server connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Decryption password offered before prompting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
            password: None,
        }
    }
}

/// Background refresh of storage and entry lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Seconds between unprompted refresh passes (default: 10).
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Rows requested per pass when no trigger says otherwise (default: 100).
    #[serde(default = "default_max_count")]
    pub max_count: u64,
    /// Bounded wait for each result line in milliseconds (default: 250).
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            poll_interval_secs: default_poll_interval_secs(),
            max_count: default_max_count(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

/// Restore transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreConfig {
    /// Bounded wait for each progress line in milliseconds (default: 250).
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        RestoreConfig {
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    38523
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_max_count() -> u64 {
    100
}

fn default_read_timeout_ms() -> u64 {
    250
}

impl Config {
    /// Loads configuration from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Default location of the config file: `$BARCTL_CONFIG`, else
    /// `<config dir>/barctl/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::config_path() {
            return Ok(path);
        }
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::Config("cannot determine config directory".to_string()))
    }

    /// `host:port` of the server.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings {
            poll_interval: Duration::from_secs(self.sync.poll_interval_secs),
            max_count: self.sync.max_count,
            read_timeout: Duration::from_millis(self.sync.read_timeout_ms),
        }
    }

    pub fn restore_settings(&self) -> RestoreSettings {
        RestoreSettings {
            read_timeout: Duration::from_millis(self.restore.read_timeout_ms),
        }
    }

    /// Copy safe to print: the password is masked.
    pub fn masked(&self) -> Config {
        let mut config = self.clone();
        if config.server.password.is_some() {
            config.server.password = Some("********".to_string());
        }
        config
    }

    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(Error::Config("server.host must not be empty".to_string()));
        }
        if self.sync.poll_interval_secs == 0 {
            return Err(Error::Config(
                "sync.poll_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.sync.max_count == 0 {
            return Err(Error::Config("sync.max_count must be at least 1".to_string()));
        }
        if self.sync.read_timeout_ms == 0 {
            return Err(Error::Config(
                "sync.read_timeout_ms must be at least 1".to_string(),
            ));
        }
        if self.restore.read_timeout_ms == 0 {
            return Err(Error::Config(
                "restore.read_timeout_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
