// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! barctl-core: protocol primitives for the barctl archiver client.
//!
//! This crate provides the line decoder, argument quoting, error codes and
//! the typed records and commands of the archiver server protocol. It does
//! no I/O.

pub mod code;
pub mod entry;
pub mod error;
pub mod escape;
pub mod protocol;
pub mod restore;
pub mod scan;
pub mod storage;

pub use code::ErrorCode;
pub use entry::{EntryDetail, EntryKey, EntryLineDecoder, EntryRecord, EntryType, Ownership};
pub use error::{Error, Result};
pub use escape::{escape, quote, unescape};
pub use protocol::Command;
pub use restore::{RestoreProgress, RestoreProgressDecoder};
pub use scan::{scan, scan_prefix, Fields, Format, Value};
pub use storage::{IndexState, StateFilter, StorageId, StorageLineDecoder, StorageRecord};
