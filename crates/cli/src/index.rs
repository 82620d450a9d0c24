// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot index maintenance commands.

use std::time::Duration;

use barctl_core::{Command, StateFilter, StorageId};

use crate::channel::{run_command, CommandChannel};
use crate::error::{Error, Result};

/// Add a storage to the index.
pub async fn add_storage(
    channel: &dyn CommandChannel,
    name: &str,
    wait: Duration,
) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidInput("storage name must not be empty".to_string()));
    }
    run(
        channel,
        Command::StorageAdd {
            name: name.to_string(),
        },
        wait,
    )
    .await
}

/// Remove storage `id`, or every storage matching `state` when `id` is `None`.
pub async fn remove_storage(
    channel: &dyn CommandChannel,
    state: StateFilter,
    id: Option<StorageId>,
    wait: Duration,
) -> Result<()> {
    run(channel, Command::StorageRemove { state, id }, wait).await
}

/// Re-index storage `id`, or every storage matching `state` when `id` is `None`.
pub async fn refresh_storage(
    channel: &dyn CommandChannel,
    state: StateFilter,
    id: Option<StorageId>,
    wait: Duration,
) -> Result<()> {
    run(channel, Command::StorageRefresh { state, id }, wait).await
}

async fn run(channel: &dyn CommandChannel, command: Command, wait: Duration) -> Result<()> {
    tracing::debug!(command = %command, "index command");
    let output = run_command(channel, &command, wait).await?;
    if !output.completion.is_ok() {
        return Err(Error::server(output.completion.code, output.completion.text));
    }
    Ok(())
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
