// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential restore of storages and entries.
//!
//! Each target is restored with its own `RESTORE` command. A target that
//! fails for lack of a valid decryption password gets exactly one retry
//! after the user supplies a password. Cancellation aborts the running
//! command and skips the rest of the batch.

use std::sync::Arc;
use std::time::Duration;

use barctl_core::{Command, ErrorCode, RestoreProgressDecoder};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::channel::{run_command, ChannelError, CommandChannel, Completion, Reply};
use crate::error::Result;
use crate::ui::{ProgressView, UiContext};

/// Something to restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RestoreTarget {
    /// A whole storage.
    Storage { name: String },
    /// One entry of a storage.
    Entry {
        storage_name: String,
        entry_name: String,
    },
}

impl RestoreTarget {
    pub fn label(&self) -> String {
        match self {
            RestoreTarget::Storage { name } => name.clone(),
            RestoreTarget::Entry {
                storage_name,
                entry_name,
            } => format!("{storage_name}:{entry_name}"),
        }
    }

    pub fn command(&self, destination: &str, overwrite: bool) -> Command {
        match self {
            RestoreTarget::Storage { name } => {
                Command::restore(name.as_str(), destination, overwrite, None)
            }
            RestoreTarget::Entry {
                storage_name,
                entry_name,
            } => Command::restore(
                storage_name.as_str(),
                destination,
                overwrite,
                Some(entry_name.clone()),
            ),
        }
    }
}

/// A batch of targets sharing one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreJob {
    pub targets: Vec<RestoreTarget>,
    /// Destination directory; empty restores in place.
    pub destination: String,
    pub overwrite: bool,
}

/// Immutable restore parameters, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreSettings {
    /// Bounded wait for each progress line.
    pub read_timeout: Duration,
}

impl Default for RestoreSettings {
    fn default() -> Self {
        RestoreSettings {
            read_timeout: Duration::from_millis(250),
        }
    }
}

/// A target that could not be restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub label: String,
    /// Server error code; `None` when the channel failed.
    pub code: Option<ErrorCode>,
    pub text: String,
}

/// Outcome of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestoreReport {
    pub restored: Vec<String>,
    pub failed: Vec<ItemFailure>,
    pub cancelled: bool,
    /// Targets never finished because the batch stopped early.
    pub skipped: usize,
}

impl RestoreReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && !self.cancelled && self.skipped == 0
    }
}

/// Asks the user for a decryption password. Called on the UI thread.
pub trait PasswordProvider: Send + Sync {
    /// `None` when the user declines.
    fn prompt(&self, target: &str) -> Option<String>;
}

enum ItemOutcome {
    Restored,
    Failed { code: ErrorCode, text: String },
    Cancelled,
    ChannelFailed(String),
}

enum Transfer {
    Done(Completion),
    Cancelled,
}

/// Runs restore batches against the server.
pub struct TransferExecutor {
    channel: Arc<dyn CommandChannel>,
    passwords: Arc<dyn PasswordProvider>,
    ui: UiContext,
    view: Arc<dyn ProgressView>,
    settings: RestoreSettings,
    decoder: RestoreProgressDecoder,
}

impl TransferExecutor {
    pub fn new(
        channel: Arc<dyn CommandChannel>,
        passwords: Arc<dyn PasswordProvider>,
        ui: UiContext,
        view: Arc<dyn ProgressView>,
        settings: RestoreSettings,
    ) -> Result<Self> {
        Ok(TransferExecutor {
            channel,
            passwords,
            ui,
            view,
            settings,
            decoder: RestoreProgressDecoder::new()?,
        })
    }

    /// Run the batch on a background task.
    pub fn spawn(self, job: RestoreJob, cancel: CancellationToken) -> JoinHandle<RestoreReport> {
        tokio::spawn(async move { self.run(job, cancel).await })
    }

    /// Restore every target of `job` in order.
    pub async fn run(&self, job: RestoreJob, cancel: CancellationToken) -> RestoreReport {
        let count = job.targets.len();
        let mut report = RestoreReport::default();

        for (index, target) in job.targets.iter().enumerate() {
            if cancel.is_cancelled() {
                report.cancelled = true;
                report.skipped = count - index;
                break;
            }

            let label = target.label();
            tracing::info!(item = %label, index, count, "restoring");
            {
                let label = label.clone();
                self.notify(move |view| view.item_started(index, count, &label))
                    .await;
            }

            match self.restore_item(target, &label, &job, &cancel).await {
                ItemOutcome::Restored => {
                    let finished = label.clone();
                    self.notify(move |view| view.item_finished(&finished)).await;
                    report.restored.push(label);
                }
                ItemOutcome::Failed { code, text } => {
                    tracing::warn!(item = %label, %code, text = %text, "restore failed");
                    self.report_failure(&mut report, label, Some(code), text)
                        .await;
                }
                ItemOutcome::Cancelled => {
                    tracing::info!(item = %label, "restore cancelled");
                    report.cancelled = true;
                    report.skipped = count - index;
                    break;
                }
                ItemOutcome::ChannelFailed(text) => {
                    tracing::error!(item = %label, error = %text, "channel failed, stopping batch");
                    self.report_failure(&mut report, label, None, text).await;
                    report.skipped = count - index - 1;
                    break;
                }
            }
        }
        report
    }

    async fn restore_item(
        &self,
        target: &RestoreTarget,
        label: &str,
        job: &RestoreJob,
        cancel: &CancellationToken,
    ) -> ItemOutcome {
        let command = target.command(&job.destination, job.overwrite);
        let mut retried = false;

        loop {
            let completion = match self.transfer(&command, cancel).await {
                Ok(Transfer::Done(completion)) => completion,
                Ok(Transfer::Cancelled) => return ItemOutcome::Cancelled,
                Err(e) => return ItemOutcome::ChannelFailed(e.to_string()),
            };
            if completion.is_ok() {
                return ItemOutcome::Restored;
            }
            if retried || !completion.code.is_password_related() {
                return ItemOutcome::Failed {
                    code: completion.code,
                    text: completion.text,
                };
            }
            retried = true;

            let Some(password) = self.ask_password(label).await else {
                tracing::debug!(item = %label, "password prompt declined");
                return ItemOutcome::Failed {
                    code: completion.code,
                    text: completion.text,
                };
            };
            if cancel.is_cancelled() {
                return ItemOutcome::Cancelled;
            }
            let add = Command::decrypt_password_add(password);
            match run_command(self.channel.as_ref(), &add, self.settings.read_timeout).await {
                Ok(output) if output.completion.is_ok() => {}
                Ok(output) => {
                    return ItemOutcome::Failed {
                        code: output.completion.code,
                        text: output.completion.text,
                    }
                }
                Err(e) => return ItemOutcome::ChannelFailed(e.to_string()),
            }
            if cancel.is_cancelled() {
                return ItemOutcome::Cancelled;
            }
            tracing::debug!(item = %label, "retrying with new password");
        }
    }

    /// Issue `command` and follow its progress until it completes or
    /// `cancel` fires.
    async fn transfer(
        &self,
        command: &Command,
        cancel: &CancellationToken,
    ) -> std::result::Result<Transfer, ChannelError> {
        let mut stream = self.channel.execute(command).await?;
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                reply = stream.next_reply(self.settings.read_timeout) => Some(reply),
            };
            let Some(reply) = next else {
                if let Err(e) = stream.abort().await {
                    tracing::warn!(error = %e, "failed to abort restore");
                }
                return Ok(Transfer::Cancelled);
            };

            match reply? {
                Reply::Timeout => continue,
                Reply::Line(line) => match self.decoder.decode(&line) {
                    Ok(progress) => {
                        self.notify(move |view| view.progress(&progress)).await;
                    }
                    Err(e) => {
                        tracing::warn!(line = %line, error = %e, "skipping malformed progress line")
                    }
                },
                Reply::Done(completion) => return Ok(Transfer::Done(completion)),
            }
        }
    }

    async fn ask_password(&self, label: &str) -> Option<String> {
        let passwords = Arc::clone(&self.passwords);
        let label = label.to_string();
        match self.ui.run_and_wait(move || passwords.prompt(&label)).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "cannot prompt for password");
                None
            }
        }
    }

    async fn report_failure(
        &self,
        report: &mut RestoreReport,
        label: String,
        code: Option<ErrorCode>,
        text: String,
    ) {
        {
            let label = label.clone();
            let text = text.clone();
            self.notify(move |view| view.item_failed(&label, code, &text))
                .await;
        }
        report.failed.push(ItemFailure { label, code, text });
    }

    async fn notify<F>(&self, f: F)
    where
        F: FnOnce(&dyn ProgressView) + Send + 'static,
    {
        let view = Arc::clone(&self.view);
        if let Err(e) = self.ui.run_and_wait(move || f(view.as_ref())).await {
            tracing::warn!(error = %e, "progress update dropped");
        }
    }
}

#[cfg(test)]
#[path = "restore_tests.rs"]
mod tests;
