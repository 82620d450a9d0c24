// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! UI execution context.
//!
//! Views are only touched from one dedicated thread. Background tasks hand
//! it closures through [`UiContext`]; jobs run one at a time in the order
//! they were posted and are never dropped while the thread is alive.

use std::thread::{self, JoinHandle};

use barctl_core::{ErrorCode, RestoreProgress};
use tokio::sync::{mpsc, oneshot};

use crate::cache::CachedRecord;
use crate::error::{Error, Result};

type Job = Box<dyn FnOnce() + Send>;

/// Handle for posting work to the UI thread.
#[derive(Clone)]
pub struct UiContext {
    jobs: mpsc::UnboundedSender<Job>,
}

/// The UI thread itself; joined once every [`UiContext`] is dropped.
pub struct UiThread {
    handle: JoinHandle<()>,
}

impl UiContext {
    /// Start the UI thread.
    pub fn spawn() -> Result<(UiContext, UiThread)> {
        let (jobs, mut rx) = mpsc::unbounded_channel::<Job>();
        let handle = thread::Builder::new()
            .name("barctl-ui".into())
            .spawn(move || {
                while let Some(job) = rx.blocking_recv() {
                    job();
                }
                tracing::debug!("ui thread finished");
            })?;
        Ok((UiContext { jobs }, UiThread { handle }))
    }

    /// Run `f` on the UI thread and wait for its result.
    pub async fn run_and_wait<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.jobs
            .send(Box::new(move || {
                let _ = tx.send(f());
            }))
            .map_err(|_| Error::UiClosed)?;
        rx.await.map_err(|_| Error::UiClosed)
    }
}

impl UiThread {
    /// Wait for the thread to drain its queue and exit.
    pub fn join(self) -> Result<()> {
        self.handle.join().map_err(|_| Error::UiClosed)
    }
}

/// Presentation of one synchronized collection.
pub trait CollectionView<R>: Send + Sync {
    /// Replace the displayed rows with `records`.
    fn show(&self, records: Vec<CachedRecord<R>>);

    /// Toggle the busy indicator.
    fn set_busy(&self, busy: bool);
}

/// Presentation of a running restore batch.
pub trait ProgressView: Send + Sync {
    /// Item `index` (zero-based) of `count` is starting.
    fn item_started(&self, index: usize, count: usize, label: &str);

    fn progress(&self, progress: &RestoreProgress);

    /// The item failed for good; `code` is `None` for transport failures.
    fn item_failed(&self, label: &str, code: Option<ErrorCode>, text: &str);

    fn item_finished(&self, label: &str);
}

#[cfg(test)]
#[path = "ui_tests.rs"]
mod tests;
