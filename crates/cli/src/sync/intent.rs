// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Refresh triggers and the filters they carry.

use std::sync::{Mutex, PoisonError};

use barctl_core::StateFilter;
use tokio::sync::futures::Notified;
use tokio::sync::Notify;

/// Filter changes requested by a trigger. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncRequest {
    pub max_count: Option<u64>,
    /// Name pattern; empty or `*` clears it.
    pub pattern: Option<String>,
    pub state_filter: Option<StateFilter>,
    pub newest_only: Option<bool>,
}

impl SyncRequest {
    /// Fold a later request into this one; its set fields win.
    pub fn merge(&mut self, later: SyncRequest) {
        if later.max_count.is_some() {
            self.max_count = later.max_count;
        }
        if later.pattern.is_some() {
            self.pattern = later.pattern;
        }
        if later.state_filter.is_some() {
            self.state_filter = later.state_filter;
        }
        if later.newest_only.is_some() {
            self.newest_only = later.newest_only;
        }
    }
}

/// Filters of the next query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub max_count: u64,
    pub pattern: Option<String>,
    pub state_filter: StateFilter,
    pub newest_only: bool,
}

impl Filters {
    /// No filters, returning at most `max_count` rows.
    pub fn new(max_count: u64) -> Self {
        Filters {
            max_count,
            pattern: None,
            state_filter: StateFilter::All,
            newest_only: false,
        }
    }

    pub fn apply(&mut self, request: SyncRequest) {
        if let Some(max_count) = request.max_count {
            self.max_count = max_count;
        }
        if let Some(pattern) = request.pattern {
            self.pattern = match pattern.as_str() {
                "" | "*" => None,
                _ => Some(pattern),
            };
        }
        if let Some(state_filter) = request.state_filter {
            self.state_filter = state_filter;
        }
        if let Some(newest_only) = request.newest_only {
            self.newest_only = newest_only;
        }
    }
}

/// A coalesced trigger taken by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub request: SyncRequest,
    /// True if any of the coalesced triggers came from the user.
    pub user_triggered: bool,
}

#[derive(Default)]
struct Pending {
    request: SyncRequest,
    user_triggered: bool,
    requested: bool,
}

/// Latest-intent cell: any number of triggers between two passes collapse
/// into one.
#[derive(Default)]
pub struct IntentCell {
    pending: Mutex<Pending>,
    notify: Notify,
}

impl IntentCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a trigger and wake the worker.
    pub fn post(&self, request: SyncRequest, user_triggered: bool) {
        {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            pending.request.merge(request);
            pending.user_triggered |= user_triggered;
            pending.requested = true;
        }
        self.notify.notify_one();
    }

    /// Take the pending intent, if any, leaving the cell empty.
    pub fn take(&self) -> Option<Intent> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if !pending.requested {
            return None;
        }
        let taken = std::mem::take(&mut *pending);
        Some(Intent {
            request: taken.request,
            user_triggered: taken.user_triggered,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requested
    }

    /// Resolves after the next [`post`](Self::post), or immediately if a
    /// post happened since the last wake.
    pub fn notified(&self) -> Notified<'_> {
        self.notify.notified()
    }
}
