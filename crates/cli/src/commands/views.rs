// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal views driven from the UI thread.

use std::io::Write;

use barctl_core::{ErrorCode, RestoreProgress};
use serde::Serialize;

use crate::cache::CachedRecord;
use crate::cli::OutputFormat;
use crate::colors;
use crate::display;
use crate::error::Result;
use crate::ui::{CollectionView, ProgressView};

/// Renders one row of a collection.
pub type RowFormatter<R> = fn(&CachedRecord<R>, bool) -> String;

/// Prints each published snapshot to stdout.
pub struct ListView<R> {
    output: OutputFormat,
    colorize: bool,
    format_row: RowFormatter<R>,
    /// Collection name for a per-refresh heading; `None` prints rows only.
    heading: Option<&'static str>,
}

impl<R: Serialize> ListView<R> {
    pub fn new(output: OutputFormat, format_row: RowFormatter<R>) -> Self {
        ListView {
            output,
            colorize: output == OutputFormat::Text && colors::should_colorize(),
            format_row,
            heading: None,
        }
    }

    /// Print a heading with the record count and time before each snapshot.
    pub fn with_heading(mut self, collection: &'static str) -> Self {
        self.heading = Some(collection);
        self
    }

    /// Lines printed for `records`.
    pub fn render(&self, records: &[CachedRecord<R>]) -> Result<Vec<String>> {
        match self.output {
            OutputFormat::Json => Ok(vec![serde_json::to_string_pretty(records)?]),
            OutputFormat::Text => {
                let mut lines = Vec::with_capacity(records.len() + 1);
                if let Some(collection) = self.heading {
                    let heading = format!(
                        "{} {} at {}",
                        records.len(),
                        collection,
                        chrono::Local::now().format("%H:%M:%S")
                    );
                    lines.push(if self.colorize {
                        colors::header(&heading)
                    } else {
                        heading
                    });
                }
                lines.extend(records.iter().map(|r| (self.format_row)(r, self.colorize)));
                Ok(lines)
            }
        }
    }
}

impl<R: Serialize + Send + Sync> CollectionView<R> for ListView<R> {
    fn show(&self, records: Vec<CachedRecord<R>>) {
        match self.render(&records) {
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Err(e) => tracing::error!(error = %e, "failed to render records"),
        }
    }

    fn set_busy(&self, busy: bool) {
        tracing::debug!(busy, "refresh indicator");
    }
}

/// Reports restore progress on stderr.
#[derive(Default)]
pub struct TerminalProgress;

impl TerminalProgress {
    pub fn new() -> Self {
        TerminalProgress
    }
}

impl ProgressView for TerminalProgress {
    fn item_started(&self, index: usize, count: usize, label: &str) {
        eprintln!("[{}/{}] {}", index + 1, count, label);
    }

    fn progress(&self, progress: &RestoreProgress) {
        let mut err = std::io::stderr().lock();
        let _ = write!(err, "\r\x1b[2K{}", display::format_progress(progress));
        let _ = err.flush();
    }

    fn item_failed(&self, label: &str, code: Option<ErrorCode>, text: &str) {
        match code {
            Some(code) => eprintln!("\r\x1b[2Kfailed: {label}: error {code}: {text}"),
            None => eprintln!("\r\x1b[2Kfailed: {label}: {text}"),
        }
    }

    fn item_finished(&self, label: &str) {
        eprintln!("\r\x1b[2Krestored {label}");
    }
}

#[cfg(test)]
#[path = "views_tests.rs"]
mod tests;
