// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use barctl_core::{EntryRecord, StateFilter, StorageRecord};

use super::views::ListView;
use super::Session;
use crate::cache::LocalCache;
use crate::cli::ListArgs;
use crate::display;
use crate::error::Result;
use crate::sync::{
    CollectionKind, EntryCollection, Filters, RemoteCollectionSync, StorageCollection, SyncRequest,
};
use crate::ui::CollectionView;

/// Print the storages matching `list` and `state` once.
pub async fn storages(session: &Session, list: ListArgs, state: Option<StateFilter>) -> Result<()> {
    let view = ListView::<StorageRecord>::new(list.output, display::format_storage_line);
    let request = SyncRequest {
        max_count: list.max_count,
        pattern: list.pattern,
        state_filter: state,
        newest_only: None,
    };
    refresh(session, StorageCollection::new()?, request, Arc::new(view)).await
}

/// Print the entries matching `list` once.
pub async fn entries(session: &Session, list: ListArgs, newest: bool) -> Result<()> {
    let view = ListView::<EntryRecord>::new(list.output, display::format_entry_line);
    let request = SyncRequest {
        max_count: list.max_count,
        pattern: list.pattern,
        state_filter: None,
        newest_only: Some(newest),
    };
    refresh(session, EntryCollection::new()?, request, Arc::new(view)).await
}

/// One pass of a fresh worker; the view prints what it publishes.
async fn refresh<C: CollectionKind>(
    session: &Session,
    kind: C,
    request: SyncRequest,
    view: Arc<dyn CollectionView<C::Record>>,
) -> Result<()> {
    let settings = session.config.sync_settings();
    let worker = RemoteCollectionSync::new(
        kind,
        Arc::clone(&session.channel),
        LocalCache::new(),
        session.ui.clone(),
        view,
        settings,
    );
    let mut filters = Filters::new(settings.max_count);
    filters.apply(request);
    let stats = worker.refresh_once(&filters, false).await?;
    tracing::debug!(collection = C::NAME, records = stats.inserted, "listed");
    Ok(())
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
