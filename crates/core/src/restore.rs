// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Progress lines streamed by `RESTORE`.

use serde::Serialize;

use crate::error::Result;
use crate::scan::Format;

/// One progress report of a running restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreProgress {
    /// Bytes restored of the current entry.
    pub done_bytes: u64,
    pub total_bytes: u64,
    /// Bytes processed of the whole archive.
    pub archive_done_bytes: u64,
    pub archive_total_bytes: u64,
    /// Name of the entry being restored.
    pub name: String,
}

impl RestoreProgress {
    /// Completed share of the current entry, in `0.0..=1.0`; 0 when the
    /// total is unknown.
    pub fn fraction(&self) -> f64 {
        ratio(self.done_bytes, self.total_bytes)
    }

    /// Completed share of the whole archive.
    pub fn archive_fraction(&self) -> f64 {
        ratio(self.archive_done_bytes, self.archive_total_bytes)
    }
}

fn ratio(done: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (done as f64 / total as f64).clamp(0.0, 1.0)
    }
}

/// Decoder for `RESTORE` progress lines.
#[derive(Debug, Clone)]
pub struct RestoreProgressDecoder {
    format: Format,
}

impl RestoreProgressDecoder {
    pub const FORMAT: &'static str = "%ld %ld %ld %ld %S";

    pub fn new() -> Result<Self> {
        Ok(RestoreProgressDecoder {
            format: Format::compile(Self::FORMAT)?,
        })
    }

    pub fn decode(&self, line: &str) -> Result<RestoreProgress> {
        let fields = self.format.parse(line)?;
        let mut r = fields.reader();
        Ok(RestoreProgress {
            done_bytes: r.ulong()?,
            total_bytes: r.ulong()?,
            archive_done_bytes: r.ulong()?,
            archive_total_bytes: r.ulong()?,
            name: r.string()?,
        })
    }
}

#[cfg(test)]
#[path = "restore_tests.rs"]
mod tests;
