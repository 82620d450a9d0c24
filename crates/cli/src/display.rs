// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text rendering of storages, entries and restore progress.

use barctl_core::{EntryDetail, EntryRecord, RestoreProgress, StorageRecord};
use chrono::DateTime;

use crate::cache::CachedRecord;
use crate::colors;
use crate::restore::RestoreReport;

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Human-readable byte count, e.g. `4.0 KiB`.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Seconds since the epoch as `YYYY-MM-DD HH:MM` (UTC); `-` when out of range.
pub fn format_datetime(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn tag_mark(tagged: bool) -> char {
    if tagged {
        '*'
    } else {
        ' '
    }
}

/// One row of the storage list.
///
/// ```text
///     100  2023-11-14 22:13    4.0 KiB  OK               s3://a.bar
/// ```
pub fn format_storage_line(cached: &CachedRecord<StorageRecord>, colorize: bool) -> String {
    let storage = &cached.record;
    let state = format!("{:<16}", storage.state.as_str());
    let state = if colorize {
        colors::paint(colors::state_code(storage.state), &state)
    } else {
        state
    };
    let mut line = format!(
        "{} {:>6}  {}  {:>10}  {} {}",
        tag_mark(cached.tagged),
        storage.id,
        format_datetime(storage.datetime),
        format_size(storage.size),
        state,
        storage.name,
    );
    if !storage.error_message.is_empty() {
        let message = format!("({})", storage.error_message);
        line.push(' ');
        line.push_str(&if colorize {
            colors::context(&message)
        } else {
            message
        });
    }
    line
}

/// Modification time shown for an entry; images carry none and show the
/// storage time instead.
fn entry_datetime(entry: &EntryRecord) -> i64 {
    match &entry.detail {
        EntryDetail::File { datetime, .. }
        | EntryDetail::Directory { datetime, .. }
        | EntryDetail::Link { datetime, .. }
        | EntryDetail::Special { datetime, .. } => *datetime,
        EntryDetail::Image { .. } => entry.storage_datetime,
    }
}

/// One row of the entry list.
pub fn format_entry_line(cached: &CachedRecord<EntryRecord>, colorize: bool) -> String {
    let entry = &cached.record;
    let size = entry.detail.size().map(format_size).unwrap_or_default();
    let name = match &entry.detail {
        EntryDetail::Link { destination, .. } => format!("{} -> {}", entry.name, destination),
        _ => entry.name.clone(),
    };
    let storage = if colorize {
        colors::context(&entry.storage_name)
    } else {
        entry.storage_name.clone()
    };
    format!(
        "{} {:<9}  {}  {:>10}  {}  {}",
        tag_mark(cached.tagged),
        entry.entry_type().keyword(),
        format_datetime(entry_datetime(entry)),
        size,
        name,
        storage,
    )
}

/// Single-line progress of the running item.
pub fn format_progress(progress: &RestoreProgress) -> String {
    format!(
        "{:>5.1}%  {}  ({:.1}% of archive)",
        progress.fraction() * 100.0,
        progress.name,
        progress.archive_fraction() * 100.0,
    )
}

/// Closing summary of a restore batch.
pub fn format_report(report: &RestoreReport) -> Vec<String> {
    let mut lines = vec![format!(
        "restored {}, failed {}{}",
        report.restored.len(),
        report.failed.len(),
        if report.cancelled {
            format!(", cancelled ({} skipped)", report.skipped)
        } else if report.skipped > 0 {
            format!(", {} skipped", report.skipped)
        } else {
            String::new()
        }
    )];
    for failure in &report.failed {
        match failure.code {
            Some(code) => lines.push(format!(
                "  {}: error {}: {}",
                failure.label, code, failure.text
            )),
            None => lines.push(format!("  {}: {}", failure.label, failure.text)),
        }
    }
    lines
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
