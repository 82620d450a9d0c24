// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Local mirror of a remote collection.
//!
//! Records are keyed by their identity. Each record carries a serial number
//! assigned on first insertion and a `tagged` mark owned by the user; a
//! refresh never changes either of them.
//!
//! Tagging and the direct edits (`insert`, `remove`) are library API for
//! interactive front ends; the `barctl` commands only refresh and read.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// A cached record with its local bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachedRecord<R> {
    /// Insertion order, stable for the record's lifetime in the cache.
    pub serial: u64,
    pub tagged: bool,
    #[serde(flatten)]
    pub record: R,
}

/// Counts of one reconcile pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub inserted: usize,
    pub updated: usize,
    pub evicted: usize,
    /// Stale records kept because they are tagged.
    pub retained: usize,
}

struct CacheInner<K, R> {
    records: BTreeMap<K, CachedRecord<R>>,
    next_serial: u64,
}

/// Identity-keyed record cache shared between a sync worker and its readers.
pub struct LocalCache<K, R> {
    inner: Arc<Mutex<CacheInner<K, R>>>,
}

impl<K, R> Clone for LocalCache<K, R> {
    fn clone(&self) -> Self {
        LocalCache {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Ord + Clone, R: Clone> Default for LocalCache<K, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, R: Clone> LocalCache<K, R> {
    pub fn new() -> Self {
        LocalCache {
            inner: Arc::new(Mutex::new(CacheInner {
                records: BTreeMap::new(),
                next_serial: 1,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner<K, R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    pub fn keys(&self) -> BTreeSet<K> {
        self.lock().records.keys().cloned().collect()
    }

    pub fn get(&self, key: &K) -> Option<CachedRecord<R>> {
        self.lock().records.get(key).cloned()
    }

    /// All records ordered by serial.
    pub fn snapshot(&self) -> Vec<CachedRecord<R>> {
        let mut records: Vec<_> = self.lock().records.values().cloned().collect();
        records.sort_by_key(|r| r.serial);
        records
    }

    /// Insert `record`, or fold it into the existing one with `merge`.
    ///
    /// Returns true when the key was new.
    pub fn insert(&self, key: K, record: R, merge: impl FnOnce(&mut R, R)) -> bool {
        let mut inner = self.lock();
        inner.upsert(key, record, merge)
    }

    /// Set the tag mark; returns false when the key is unknown.
    pub fn set_tagged(&self, key: &K, tagged: bool) -> bool {
        match self.lock().records.get_mut(key) {
            Some(entry) => {
                entry.tagged = tagged;
                true
            }
            None => false,
        }
    }

    /// Flip the tag mark; returns the new mark, or `None` for unknown keys.
    pub fn toggle_tagged(&self, key: &K) -> Option<bool> {
        self.lock().records.get_mut(key).map(|entry| {
            entry.tagged = !entry.tagged;
            entry.tagged
        })
    }

    pub fn tagged_keys(&self) -> Vec<K> {
        self.lock()
            .records
            .iter()
            .filter(|(_, r)| r.tagged)
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn tagged_records(&self) -> Vec<CachedRecord<R>> {
        let mut records: Vec<_> = self
            .lock()
            .records
            .values()
            .filter(|r| r.tagged)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.serial);
        records
    }

    pub fn remove(&self, key: &K) -> Option<CachedRecord<R>> {
        self.lock().records.remove(key)
    }

    /// Fold one query result into the cache.
    ///
    /// Every incoming record is merged or inserted. With `evict`, keys in
    /// `previous` that were not confirmed by `incoming` are dropped unless
    /// tagged. Runs under a single lock.
    pub fn reconcile(
        &self,
        previous: &BTreeSet<K>,
        incoming: Vec<R>,
        key_of: impl Fn(&R) -> K,
        merge: impl Fn(&mut R, R),
        evict: bool,
    ) -> ReconcileStats {
        let mut inner = self.lock();
        let mut stats = ReconcileStats::default();
        let mut confirmed = BTreeSet::new();

        for record in incoming {
            let key = key_of(&record);
            confirmed.insert(key.clone());
            if inner.upsert(key, record, &merge) {
                stats.inserted += 1;
            } else {
                stats.updated += 1;
            }
        }

        if evict {
            for key in previous.difference(&confirmed) {
                match inner.records.get(key).map(|r| r.tagged) {
                    Some(true) => stats.retained += 1,
                    Some(false) => {
                        inner.records.remove(key);
                        stats.evicted += 1;
                    }
                    None => {}
                }
            }
        }
        stats
    }
}

impl<K: Ord, R> CacheInner<K, R> {
    fn upsert(&mut self, key: K, record: R, merge: impl FnOnce(&mut R, R)) -> bool {
        if let Some(existing) = self.records.get_mut(&key) {
            merge(&mut existing.record, record);
            return false;
        }
        let serial = self.next_serial;
        self.next_serial += 1;
        self.records.insert(
            key,
            CachedRecord {
                serial,
                tagged: false,
                record,
            },
        );
        true
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
