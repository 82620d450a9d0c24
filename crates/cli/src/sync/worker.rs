// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The sync worker.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::collection::CollectionKind;
use super::intent::{Filters, IntentCell, SyncRequest};
use super::SyncSettings;
use crate::cache::{LocalCache, ReconcileStats};
use crate::channel::{run_command, CommandChannel};
use crate::error::{Error, Result};
use crate::ui::{CollectionView, UiContext};

/// Keeps a [`LocalCache`] in step with one remote collection.
pub struct RemoteCollectionSync<C: CollectionKind> {
    kind: C,
    channel: Arc<dyn CommandChannel>,
    cache: LocalCache<C::Key, C::Record>,
    ui: UiContext,
    view: Arc<dyn CollectionView<C::Record>>,
    settings: SyncSettings,
    intent: Arc<IntentCell>,
}

impl<C: CollectionKind> RemoteCollectionSync<C> {
    pub fn new(
        kind: C,
        channel: Arc<dyn CommandChannel>,
        cache: LocalCache<C::Key, C::Record>,
        ui: UiContext,
        view: Arc<dyn CollectionView<C::Record>>,
        settings: SyncSettings,
    ) -> Self {
        RemoteCollectionSync {
            kind,
            channel,
            cache,
            ui,
            view,
            settings,
            intent: Arc::new(IntentCell::new()),
        }
    }

    pub fn cache(&self) -> &LocalCache<C::Key, C::Record> {
        &self.cache
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Queue `request` so the first pass of [`spawn`](Self::spawn) uses it.
    pub fn with_request(self, request: SyncRequest) -> Self {
        self.intent.post(request, false);
        self
    }

    /// Run one refresh pass with `filters`.
    ///
    /// Malformed lines are logged and skipped. When the server reports an
    /// error the records already received are kept, nothing is evicted and
    /// the server error is returned. The busy indicator is only driven for
    /// user-triggered passes.
    pub async fn refresh_once(
        &self,
        filters: &Filters,
        user_triggered: bool,
    ) -> Result<ReconcileStats> {
        if user_triggered {
            self.set_busy(true).await?;
        }
        let result = self.refresh(filters).await;
        if user_triggered {
            self.set_busy(false).await?;
        }
        result
    }

    async fn refresh(&self, filters: &Filters) -> Result<ReconcileStats> {
        let previous = self.cache.keys();
        let command = self.kind.query(filters);
        tracing::debug!(collection = C::NAME, command = %command, "refreshing");

        let output =
            run_command(self.channel.as_ref(), &command, self.settings.read_timeout).await?;

        let mut records = Vec::with_capacity(output.lines.len());
        for (index, line) in output.lines.iter().enumerate() {
            match self.kind.decode(line) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(
                    collection = C::NAME,
                    line_number = index + 1,
                    line = %line,
                    error = %e,
                    "skipping malformed line"
                ),
            }
        }

        let completed = output.completion.is_ok();
        let stats = self
            .cache
            .reconcile(&previous, records, C::key, C::merge, completed);
        if !completed {
            return Err(Error::server(output.completion.code, output.completion.text));
        }
        tracing::debug!(
            collection = C::NAME,
            inserted = stats.inserted,
            updated = stats.updated,
            evicted = stats.evicted,
            retained = stats.retained,
            "refresh complete"
        );

        self.publish().await?;
        Ok(stats)
    }

    async fn publish(&self) -> Result<()> {
        let records = self.cache.snapshot();
        let view = Arc::clone(&self.view);
        self.ui.run_and_wait(move || view.show(records)).await
    }

    async fn set_busy(&self, busy: bool) -> Result<()> {
        let view = Arc::clone(&self.view);
        self.ui.run_and_wait(move || view.set_busy(busy)).await
    }

    /// Start the worker on the current runtime. It refreshes immediately,
    /// then on every trigger and every poll interval until shut down.
    pub fn spawn(self) -> SyncHandle {
        let intent = Arc::clone(&self.intent);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(self.run(cancel.clone()));
        SyncHandle {
            intent,
            cancel,
            task,
        }
    }

    async fn run(self, cancel: CancellationToken) {
        let mut filters = Filters::new(self.settings.max_count);
        tracing::info!(collection = C::NAME, "sync worker started");

        loop {
            let user_triggered = match self.intent.take() {
                Some(intent) => {
                    filters.apply(intent.request);
                    intent.user_triggered
                }
                None => false,
            };

            tokio::select! {
                _ = cancel.cancelled() => break,
                result = self.refresh_once(&filters, user_triggered) => {
                    if let Err(e) = result {
                        tracing::warn!(collection = C::NAME, error = %e, "refresh failed");
                    }
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.wait_for_trigger() => {}
                _ = tokio::time::sleep(self.settings.poll_interval) => {}
            }
        }

        tracing::info!(collection = C::NAME, "sync worker stopped");
    }

    async fn wait_for_trigger(&self) {
        loop {
            self.intent.notified().await;
            // A wake can be left over from a trigger the last pass already took.
            if self.intent.is_pending() {
                return;
            }
        }
    }
}

/// Control handle of a running sync worker.
pub struct SyncHandle {
    intent: Arc<IntentCell>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Request a refresh on behalf of the user. Takes effect on the next pass.
    pub fn trigger(&self, request: SyncRequest) {
        self.intent.post(request, true);
    }

    /// Request a background refresh, without the busy indicator.
    pub fn poke(&self, request: SyncRequest) {
        self.intent.post(request, false);
    }

    /// Stop the worker and wait for it to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "sync worker did not stop cleanly");
        }
    }
}
