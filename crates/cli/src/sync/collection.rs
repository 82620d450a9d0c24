// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote collections the sync worker can mirror.

use std::fmt::Debug;

use barctl_core::{
    Command, EntryKey, EntryLineDecoder, EntryRecord, StorageId, StorageLineDecoder, StorageRecord,
};

use super::intent::Filters;

/// What the sync worker needs to know about one collection.
pub trait CollectionKind: Send + Sync + 'static {
    type Key: Ord + Clone + Debug + Send + Sync + 'static;
    type Record: Clone + Send + Sync + 'static;

    /// Name used in logs.
    const NAME: &'static str;

    /// Query returning the collection under `filters`.
    fn query(&self, filters: &Filters) -> Command;

    /// Decode one result line.
    fn decode(&self, line: &str) -> barctl_core::Result<Self::Record>;

    fn key(record: &Self::Record) -> Self::Key;

    /// Refresh `existing` with the fields of a newer sighting.
    fn merge(existing: &mut Self::Record, incoming: Self::Record);
}

/// Indexed storages, identified by id.
#[derive(Debug, Clone)]
pub struct StorageCollection {
    decoder: StorageLineDecoder,
}

impl StorageCollection {
    pub fn new() -> barctl_core::Result<Self> {
        Ok(StorageCollection {
            decoder: StorageLineDecoder::new()?,
        })
    }
}

impl CollectionKind for StorageCollection {
    type Key = StorageId;
    type Record = StorageRecord;

    const NAME: &'static str = "storages";

    fn query(&self, filters: &Filters) -> Command {
        Command::storage_list(
            filters.max_count,
            filters.state_filter,
            filters.pattern.clone(),
        )
    }

    fn decode(&self, line: &str) -> barctl_core::Result<StorageRecord> {
        self.decoder.decode(line)
    }

    fn key(record: &StorageRecord) -> StorageId {
        record.id
    }

    fn merge(existing: &mut StorageRecord, incoming: StorageRecord) {
        existing.update_from(incoming);
    }
}

/// Archive entries, identified by storage, name and type.
#[derive(Debug, Clone)]
pub struct EntryCollection {
    decoder: EntryLineDecoder,
}

impl EntryCollection {
    pub fn new() -> barctl_core::Result<Self> {
        Ok(EntryCollection {
            decoder: EntryLineDecoder::new()?,
        })
    }
}

impl CollectionKind for EntryCollection {
    type Key = EntryKey;
    type Record = EntryRecord;

    const NAME: &'static str = "entries";

    fn query(&self, filters: &Filters) -> Command {
        Command::entries_list(
            filters.max_count,
            filters.newest_only,
            filters.pattern.clone(),
        )
    }

    fn decode(&self, line: &str) -> barctl_core::Result<EntryRecord> {
        self.decoder.decode(line)
    }

    fn key(record: &EntryRecord) -> EntryKey {
        record.key()
    }

    fn merge(existing: &mut EntryRecord, incoming: EntryRecord) {
        existing.update_from(incoming);
    }
}
