// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Background synchronization of remote collections.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐ trigger ┌─────────────┐ query  ┌─────────────┐
//! │ SyncHandle  │────────►│   Worker    │───────►│   Server    │
//! │ (IntentCell)│         │ (per kind)  │◄───────│  (channel)  │
//! └─────────────┘         └─────────────┘ lines  └─────────────┘
//!                                │
//!                                ▼
//!                         ┌─────────────┐  show  ┌─────────────┐
//!                         │ LocalCache  │───────►│ UI context  │
//!                         └─────────────┘        └─────────────┘
//! ```
//!
//! # Features
//!
//! - One generic worker for storages and entries ([`CollectionKind`])
//! - Triggers coalesce into a single pending intent
//! - Periodic refresh on a fixed poll interval
//! - Soft delete: stale tagged records survive a refresh
//! - Explicit shutdown with join

mod collection;
mod intent;
mod worker;

use std::time::Duration;

pub use collection::{CollectionKind, EntryCollection, StorageCollection};
pub use intent::{Filters, Intent, IntentCell, SyncRequest};
pub use worker::{RemoteCollectionSync, SyncHandle};

/// Immutable sync parameters, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSettings {
    /// Time between unprompted passes.
    pub poll_interval: Duration,
    /// Rows requested when no trigger sets a count.
    pub max_count: u64,
    /// Bounded wait for each result line.
    pub read_timeout: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            poll_interval: Duration::from_secs(10),
            max_count: 100,
            read_timeout: Duration::from_millis(250),
        }
    }
}
