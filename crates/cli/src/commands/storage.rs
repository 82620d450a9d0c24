// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Session;
use crate::cli::{StorageCommand, StorageSelector};
use crate::error::Result;
use crate::index;

/// Execute a storage subcommand.
pub async fn run(session: &Session, cmd: StorageCommand) -> Result<()> {
    let wait = session.config.sync_settings().read_timeout;
    let channel = session.channel.as_ref();
    match cmd {
        StorageCommand::Add { name } => {
            index::add_storage(channel, &name, wait).await?;
            println!("Added {}", name);
        }
        StorageCommand::Remove { selector } => {
            index::remove_storage(channel, selector.state_filter(), selector.id, wait).await?;
            println!("Removed {}", describe(&selector));
        }
        StorageCommand::Refresh { selector } => {
            index::refresh_storage(channel, selector.state_filter(), selector.id, wait).await?;
            println!("Refresh requested for {}", describe(&selector));
        }
    }
    Ok(())
}

fn describe(selector: &StorageSelector) -> String {
    match selector.id {
        Some(id) => format!("storage {}", id),
        None => format!("storages in state {}", selector.state_filter().as_arg()),
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
