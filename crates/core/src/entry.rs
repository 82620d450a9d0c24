// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Archive entries (files, images, directories, links, special files)
//! reported by `INDEX_ENTRIES_LIST`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::scan::{FieldReader, Format};

/// Kind of an archive entry; also the leading keyword of its result line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    File,
    Image,
    Directory,
    Link,
    Special,
}

impl EntryType {
    pub const ALL: [EntryType; 5] = [
        EntryType::File,
        EntryType::Image,
        EntryType::Directory,
        EntryType::Link,
        EntryType::Special,
    ];

    /// Keyword used on the wire.
    pub fn keyword(&self) -> &'static str {
        match self {
            EntryType::File => "FILE",
            EntryType::Image => "IMAGE",
            EntryType::Directory => "DIRECTORY",
            EntryType::Link => "LINK",
            EntryType::Special => "SPECIAL",
        }
    }

    fn line_format(&self) -> &'static str {
        match self {
            EntryType::File => "FILE %S %ld %S %ld %ld %d %d %d %ld %ld",
            EntryType::Image => "IMAGE %S %ld %S %ld %ld %ld",
            EntryType::Directory => "DIRECTORY %S %ld %S %ld %d %d %d",
            EntryType::Link => "LINK %S %ld %S %S %ld %d %d %d",
            EntryType::Special => "SPECIAL %S %ld %S %ld %d %d %d",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword().to_lowercase())
    }
}

impl FromStr for EntryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        EntryType::ALL
            .into_iter()
            .find(|t| t.keyword().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidValue {
                what: "entry type",
                value: s.to_string(),
            })
    }
}

/// Ownership and permission bits shared by most entry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    pub user_id: i32,
    pub group_id: i32,
    pub permission: i32,
}

/// Per-kind fields of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryDetail {
    File {
        size: u64,
        datetime: i64,
        ownership: Ownership,
        fragment_offset: u64,
        fragment_size: u64,
    },
    Image {
        size: u64,
        block_offset: u64,
        block_count: u64,
    },
    Directory {
        datetime: i64,
        ownership: Ownership,
    },
    Link {
        destination: String,
        datetime: i64,
        ownership: Ownership,
    },
    Special {
        datetime: i64,
        ownership: Ownership,
    },
}

impl EntryDetail {
    pub fn entry_type(&self) -> EntryType {
        match self {
            EntryDetail::File { .. } => EntryType::File,
            EntryDetail::Image { .. } => EntryType::Image,
            EntryDetail::Directory { .. } => EntryType::Directory,
            EntryDetail::Link { .. } => EntryType::Link,
            EntryDetail::Special { .. } => EntryType::Special,
        }
    }

    /// Size in bytes, for the kinds that have one.
    pub fn size(&self) -> Option<u64> {
        match self {
            EntryDetail::File { size, .. } | EntryDetail::Image { size, .. } => Some(*size),
            _ => None,
        }
    }
}

/// Identity of an entry: storage, name and kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryKey {
    pub storage_name: String,
    pub name: String,
    pub entry_type: EntryType,
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.storage_name, self.name, self.entry_type)
    }
}

/// One archive entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub storage_name: String,
    /// Creation time of the containing storage, seconds since the epoch.
    pub storage_datetime: i64,
    pub name: String,
    pub detail: EntryDetail,
}

impl EntryRecord {
    pub fn entry_type(&self) -> EntryType {
        self.detail.entry_type()
    }

    pub fn key(&self) -> EntryKey {
        EntryKey {
            storage_name: self.storage_name.clone(),
            name: self.name.clone(),
            entry_type: self.entry_type(),
        }
    }

    /// Refresh the server-owned fields from a newer sighting of the same entry.
    pub fn update_from(&mut self, other: EntryRecord) {
        self.storage_datetime = other.storage_datetime;
        self.detail = other.detail;
    }
}

/// Decoder for `INDEX_ENTRIES_LIST` result lines.
#[derive(Debug, Clone)]
pub struct EntryLineDecoder {
    formats: Vec<(EntryType, Format)>,
}

impl EntryLineDecoder {
    pub fn new() -> Result<Self> {
        let formats = EntryType::ALL
            .into_iter()
            .map(|t| Format::compile(t.line_format()).map(|f| (t, f)))
            .collect::<Result<Vec<_>>>()?;
        Ok(EntryLineDecoder { formats })
    }

    /// Decode one line, picking the layout by its leading keyword.
    pub fn decode(&self, line: &str) -> Result<EntryRecord> {
        let keyword = line.split_whitespace().next().unwrap_or_default();
        let (entry_type, format) = self
            .formats
            .iter()
            .find(|(t, _)| t.keyword() == keyword)
            .ok_or(Error::Mismatch { offset: 0 })?;

        let fields = format.parse(line)?;
        let mut r = fields.reader();
        let storage_name = r.string()?;
        let storage_datetime = r.long()?;
        let name = r.string()?;
        let detail = match entry_type {
            EntryType::File => EntryDetail::File {
                size: r.ulong()?,
                datetime: r.long()?,
                ownership: ownership(&mut r)?,
                fragment_offset: r.ulong()?,
                fragment_size: r.ulong()?,
            },
            EntryType::Image => EntryDetail::Image {
                size: r.ulong()?,
                block_offset: r.ulong()?,
                block_count: r.ulong()?,
            },
            EntryType::Directory => EntryDetail::Directory {
                datetime: r.long()?,
                ownership: ownership(&mut r)?,
            },
            EntryType::Link => EntryDetail::Link {
                destination: r.string()?,
                datetime: r.long()?,
                ownership: ownership(&mut r)?,
            },
            EntryType::Special => EntryDetail::Special {
                datetime: r.long()?,
                ownership: ownership(&mut r)?,
            },
        };

        Ok(EntryRecord {
            storage_name,
            storage_datetime,
            name,
            detail,
        })
    }
}

fn ownership(r: &mut FieldReader<'_>) -> Result<Ownership> {
    Ok(Ownership {
        user_id: r.int()?,
        group_id: r.int()?,
        permission: r.int()?,
    })
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
