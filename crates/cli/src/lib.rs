// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! barctl - command-line client for an archiver index server.
//!
//! The server keeps an index of backup storages and the entries inside them.
//! This crate lists and follows both collections, manages the index and runs
//! restores, all over the server's line-based command channel.
//!
//! # Main Components
//!
//! - [`channel`] - the command channel trait and its TCP implementation
//! - [`cache::LocalCache`] - identity-keyed mirror of a remote collection
//! - [`sync::RemoteCollectionSync`] - background worker keeping a cache current
//! - [`restore::TransferExecutor`] - sequential restores with password retry
//! - [`ui::UiContext`] - the single thread views run on
//! - [`Config`] - client configuration
//! - [`Error`] - Error types for all operations
//!
//! The command-line front end uses a subset of this API. Record tagging and
//! direct cache edits in [`cache::LocalCache`] are there for embedders
//! building interactive views; `barctl watch` drives
//! [`sync::SyncHandle::trigger`] from lines typed on stdin.
//!
//! # Listing storages
//!
//! ```rust,ignore
//! use barctl::cache::LocalCache;
//! use barctl::channel::TcpChannel;
//! use barctl::sync::{Filters, RemoteCollectionSync, StorageCollection};
//! use barctl::ui::UiContext;
//!
//! let channel = Arc::new(TcpChannel::connect("localhost:38523").await?);
//! let (ui, ui_thread) = UiContext::spawn()?;
//! let worker = RemoteCollectionSync::new(
//!     StorageCollection::new()?,
//!     channel,
//!     LocalCache::new(),
//!     ui,
//!     view,
//!     config.sync_settings(),
//! );
//! worker.refresh_once(&Filters::new(100), false).await?;
//! ```

mod cli;
pub mod colors;
mod commands;
mod display;
pub mod env;
pub mod help;

pub mod cache;
pub mod channel;
pub mod config;
pub mod error;
pub mod index;
pub mod restore;
pub mod sync;
pub mod ui;

#[cfg(test)]
mod test_helpers;

pub use cli::{
    Cli, Collection, Command, ConfigCommand, GlobalArgs, ListArgs, OutputFormat, StorageCommand,
    StorageSelector,
};
pub use config::Config;
pub use error::{Error, Result};

use commands::restore::RestoreOptions;
use commands::watch::WatchOptions;
use commands::Session;
use ui::UiContext;

/// Execute a parsed command line. This is the main entry point for library
/// users and provides a testable way to run commands without process
/// execution.
pub fn run(cli: Cli) -> Result<()> {
    let Cli { global, command } = cli;
    let path = commands::config_path(&global)?;

    if let Command::Config { action } = command {
        return commands::config::run(action, &global, &path);
    }

    let config = commands::load_config(&global, &path)?;
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Io(std::io::Error::other(format!("tokio: {}", e))))?;
    let (ui, ui_thread) = UiContext::spawn()?;

    let result = runtime.block_on(async move {
        let session = Session::connect(config, ui).await?;
        dispatch(&session, command).await
    });
    // Background tasks may still hold UI handles until the runtime is gone.
    drop(runtime);
    ui_thread.join()?;
    result
}

async fn dispatch(session: &Session, command: Command) -> Result<()> {
    match command {
        Command::Storages { list, state } => commands::list::storages(session, list, state).await,
        Command::Entries { list, newest } => commands::list::entries(session, list, newest).await,
        Command::Watch {
            collection,
            pattern,
            interval,
            max_count,
        } => {
            let options = WatchOptions {
                pattern,
                interval,
                max_count,
            };
            commands::watch::run(session, collection, options).await
        }
        Command::Storage { action } => commands::storage::run(session, action).await,
        Command::Restore {
            targets,
            storage,
            destination,
            overwrite,
        } => {
            let options = RestoreOptions {
                targets,
                storage,
                destination,
                overwrite,
            };
            commands::restore::run(session, options).await
        }
        Command::Config { .. } => Err(Error::InvalidInput(
            "config commands do not talk to the server".to_string(),
        )),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
