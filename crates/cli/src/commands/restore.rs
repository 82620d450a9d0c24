// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;

use super::views::TerminalProgress;
use super::Session;
use crate::display;
use crate::env;
use crate::error::{Error, Result};
use crate::restore::{PasswordProvider, RestoreJob, RestoreReport, RestoreTarget, TransferExecutor};
use crate::ui::ProgressView;

/// What the user asked to restore.
#[derive(Debug, Clone, Default)]
pub struct RestoreOptions {
    pub targets: Vec<String>,
    /// When set, `targets` are entry names of this storage.
    pub storage: Option<String>,
    pub destination: Option<String>,
    pub overwrite: bool,
}

impl RestoreOptions {
    pub fn into_job(self) -> RestoreJob {
        let targets = match self.storage {
            Some(storage_name) => self
                .targets
                .into_iter()
                .map(|entry_name| RestoreTarget::Entry {
                    storage_name: storage_name.clone(),
                    entry_name,
                })
                .collect(),
            None => self
                .targets
                .into_iter()
                .map(|name| RestoreTarget::Storage { name })
                .collect(),
        };
        RestoreJob {
            targets,
            destination: self.destination.unwrap_or_default(),
            overwrite: self.overwrite,
        }
    }
}

type PasswordReader = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Offers the preset password once, then asks on the terminal.
pub struct PromptPasswords {
    preset: Mutex<Option<String>>,
    read: PasswordReader,
}

impl PromptPasswords {
    pub fn new(preset: Option<String>, read: PasswordReader) -> Self {
        PromptPasswords {
            preset: Mutex::new(preset),
            read,
        }
    }

    /// Preset from `BARCTL_CRYPT_PASSWORD` or the config, then the terminal.
    pub fn terminal(session: &Session) -> Self {
        let preset = env::crypt_password().or_else(|| session.config.server.password.clone());
        Self::new(preset, Box::new(read_terminal))
    }
}

impl PasswordProvider for PromptPasswords {
    fn prompt(&self, target: &str) -> Option<String> {
        let preset = self
            .preset
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        preset.or_else(|| (self.read)(target))
    }
}

fn read_terminal(target: &str) -> Option<String> {
    match rpassword::prompt_password(format!("password for {target}: ")) {
        Ok(password) if !password.is_empty() => Some(password),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "cannot read password");
            None
        }
    }
}

/// Restore `options` with terminal progress; Ctrl-C cancels the batch.
pub async fn run(session: &Session, options: RestoreOptions) -> Result<()> {
    let passwords = Arc::new(PromptPasswords::terminal(session));
    let view = Arc::new(TerminalProgress::new());
    let stop = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };
    run_until(session, options.into_job(), passwords, view, stop).await
}

/// Run `job` until it finishes or `stop` resolves, then print the summary.
pub async fn run_until(
    session: &Session,
    job: RestoreJob,
    passwords: Arc<dyn PasswordProvider>,
    view: Arc<dyn ProgressView>,
    stop: impl Future<Output = ()>,
) -> Result<()> {
    let executor = TransferExecutor::new(
        Arc::clone(&session.channel),
        passwords,
        session.ui.clone(),
        view,
        session.config.restore_settings(),
    )?;
    let cancel = CancellationToken::new();
    let mut task = executor.spawn(job, cancel.clone());

    let report = tokio::select! {
        report = &mut task => report?,
        _ = stop => {
            tracing::info!("cancelling restore");
            cancel.cancel();
            task.await?
        }
    };

    for line in display::format_report(&report) {
        eprintln!("{}", line);
    }
    outcome(&report)
}

fn outcome(report: &RestoreReport) -> Result<()> {
    if report.cancelled {
        return Err(Error::Cancelled);
    }
    if !report.is_success() {
        return Err(Error::PartialRestoreFailure {
            restored: report.restored.len(),
            failed: report.failed.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "restore_tests.rs"]
mod tests;
