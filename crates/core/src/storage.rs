// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Archive storages known to the server index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::scan::{EnumDef, Format};

/// Server-assigned storage identifier.
pub type StorageId = i64;

/// Index state of a storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexState {
    None,
    Ok,
    Create,
    UpdateRequested,
    Update,
    Error,
}

impl IndexState {
    /// Constants as they appear on the wire, for `%{IndexState}S`.
    pub const ENUM: EnumDef = EnumDef::new(
        "IndexState",
        &["NONE", "OK", "CREATE", "UPDATE_REQUESTED", "UPDATE", "ERROR"],
    );

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexState::None => "NONE",
            IndexState::Ok => "OK",
            IndexState::Create => "CREATE",
            IndexState::UpdateRequested => "UPDATE_REQUESTED",
            IndexState::Update => "UPDATE",
            IndexState::Error => "ERROR",
        }
    }
}

impl fmt::Display for IndexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IndexState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(IndexState::None),
            "OK" => Ok(IndexState::Ok),
            "CREATE" => Ok(IndexState::Create),
            "UPDATE_REQUESTED" => Ok(IndexState::UpdateRequested),
            "UPDATE" => Ok(IndexState::Update),
            "ERROR" => Ok(IndexState::Error),
            _ => Err(Error::InvalidValue {
                what: "index state",
                value: s.to_string(),
            }),
        }
    }
}

/// Server-side predicate narrowing a storage query by index state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StateFilter {
    #[default]
    All,
    Only(IndexState),
}

impl StateFilter {
    /// Argument form: `*` for no filter, the state name otherwise.
    pub fn as_arg(&self) -> &'static str {
        match self {
            StateFilter::All => "*",
            StateFilter::Only(state) => state.as_str(),
        }
    }
}

impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_arg())
    }
}

impl FromStr for StateFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "*" => Ok(StateFilter::All),
            _ if s.eq_ignore_ascii_case("all") => Ok(StateFilter::All),
            _ => s.parse().map(StateFilter::Only),
        }
    }
}

/// One storage as reported by `INDEX_STORAGE_LIST`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRecord {
    pub id: StorageId,
    /// Creation time, seconds since the epoch.
    pub datetime: i64,
    /// Size in bytes.
    pub size: u64,
    pub state: IndexState,
    pub name: String,
    pub error_message: String,
}

impl StorageRecord {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.datetime, 0)
    }

    /// Refresh the server-owned fields from a newer sighting.
    pub fn update_from(&mut self, other: StorageRecord) {
        self.datetime = other.datetime;
        self.size = other.size;
        self.state = other.state;
        self.name = other.name;
        self.error_message = other.error_message;
    }
}

/// Decoder for `INDEX_STORAGE_LIST` result lines.
#[derive(Debug, Clone)]
pub struct StorageLineDecoder {
    format: Format,
}

impl StorageLineDecoder {
    pub const FORMAT: &'static str = "%ld %ld %ld %{IndexState}S %S %S";

    pub fn new() -> Result<Self> {
        Ok(StorageLineDecoder {
            format: Format::compile_with(Self::FORMAT, &[IndexState::ENUM])?,
        })
    }

    pub fn decode(&self, line: &str) -> Result<StorageRecord> {
        let fields = self.format.parse(line)?;
        let mut r = fields.reader();
        Ok(StorageRecord {
            id: r.long()?,
            datetime: r.long()?,
            size: r.ulong()?,
            state: r.parse("index state")?,
            name: r.string()?,
            error_message: r.string()?,
        })
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
