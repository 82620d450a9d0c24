// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::future::Future;
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use barctl_core::{EntryRecord, StorageRecord};
use tokio::sync::mpsc;

use super::views::ListView;
use super::Session;
use crate::cache::LocalCache;
use crate::cli::{Collection, OutputFormat};
use crate::display;
use crate::error::Result;
use crate::sync::{
    CollectionKind, EntryCollection, RemoteCollectionSync, StorageCollection, SyncRequest,
};
use crate::ui::CollectionView;

/// Options of a `watch` run.
#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    pub pattern: Option<String>,
    pub interval: Option<u64>,
    pub max_count: Option<u64>,
}

/// Follow `collection` until Ctrl-C.
///
/// Each line read from stdin triggers a refresh; a non-empty line also
/// replaces the name pattern.
pub async fn run(session: &Session, collection: Collection, options: WatchOptions) -> Result<()> {
    let triggers = read_triggers();
    watch_until(session, collection, options, triggers, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// Follow `collection` until `stop` resolves, then shut the worker down.
///
/// Requests arriving on `triggers` are passed to the worker as
/// user-triggered refreshes.
pub async fn watch_until(
    session: &Session,
    collection: Collection,
    options: WatchOptions,
    triggers: mpsc::UnboundedReceiver<SyncRequest>,
    stop: impl Future<Output = ()>,
) -> Result<()> {
    let request = SyncRequest {
        max_count: options.max_count,
        pattern: options.pattern,
        ..Default::default()
    };
    let interval = options.interval;
    match collection {
        Collection::Storages => {
            let view =
                ListView::<StorageRecord>::new(OutputFormat::Text, display::format_storage_line)
                    .with_heading("storages");
            let kind = StorageCollection::new()?;
            follow(session, kind, Arc::new(view), request, interval, triggers, stop).await;
        }
        Collection::Entries => {
            let view = ListView::<EntryRecord>::new(OutputFormat::Text, display::format_entry_line)
                .with_heading("entries");
            let kind = EntryCollection::new()?;
            follow(session, kind, Arc::new(view), request, interval, triggers, stop).await;
        }
    }
    Ok(())
}

/// Turn one line typed by the user into a refresh request.
pub(crate) fn parse_trigger(line: &str) -> SyncRequest {
    let pattern = line.trim();
    SyncRequest {
        pattern: (!pattern.is_empty()).then(|| pattern.to_string()),
        ..Default::default()
    }
}

/// Read stdin on a plain thread so a pending read never holds up runtime
/// shutdown.
fn read_triggers() -> mpsc::UnboundedReceiver<SyncRequest> {
    let (tx, rx) = mpsc::unbounded_channel();
    let spawned = std::thread::Builder::new()
        .name("barctl-stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(parse_trigger(&line)).is_err() {
                    break;
                }
            }
        });
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "cannot read refresh requests from stdin");
    }
    rx
}

async fn follow<C: CollectionKind>(
    session: &Session,
    kind: C,
    view: Arc<dyn CollectionView<C::Record>>,
    request: SyncRequest,
    interval: Option<u64>,
    mut triggers: mpsc::UnboundedReceiver<SyncRequest>,
    stop: impl Future<Output = ()>,
) {
    let mut settings = session.config.sync_settings();
    if let Some(secs) = interval {
        settings.poll_interval = Duration::from_secs(secs);
    }
    let handle = RemoteCollectionSync::new(
        kind,
        Arc::clone(&session.channel),
        LocalCache::new(),
        session.ui.clone(),
        view,
        settings,
    )
    .with_request(request)
    .spawn();

    tokio::pin!(stop);
    loop {
        tokio::select! {
            _ = &mut stop => break,
            Some(request) = triggers.recv() => handle.trigger(request),
        }
    }
    tracing::debug!(collection = C::NAME, "stopping watch");
    handle.shutdown().await;
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
