// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn run_and_wait_returns_value() {
    let (ui, thread) = UiContext::spawn().unwrap();
    let name = ui
        .run_and_wait(|| thread::current().name().map(str::to_string))
        .await
        .unwrap();
    assert_eq!(name.as_deref(), Some("barctl-ui"));

    drop(ui);
    thread.join().unwrap();
}

#[tokio::test]
async fn jobs_run_in_posting_order() {
    let (ui, thread) = UiContext::spawn().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let mut waits = Vec::new();
    for i in 0..50 {
        let seen = Arc::clone(&seen);
        let ui = ui.clone();
        waits.push(async move { ui.run_and_wait(move || seen.lock().unwrap().push(i)).await });
    }
    // Futures post their job on first poll; poll them in order.
    for wait in waits {
        wait.await.unwrap();
    }

    assert_eq!(*seen.lock().unwrap(), (0..50).collect::<Vec<_>>());
    drop(ui);
    thread.join().unwrap();
}

#[tokio::test]
async fn clones_share_the_same_thread() {
    let (ui, thread) = UiContext::spawn().unwrap();
    let other = ui.clone();

    let a = ui.run_and_wait(|| thread::current().id()).await.unwrap();
    let b = other.run_and_wait(|| thread::current().id()).await.unwrap();
    assert_eq!(a, b);

    drop(ui);
    drop(other);
    thread.join().unwrap();
}

#[test]
fn thread_exits_when_all_contexts_drop() {
    let (ui, thread) = UiContext::spawn().unwrap();
    drop(ui);
    thread.join().unwrap();
}
