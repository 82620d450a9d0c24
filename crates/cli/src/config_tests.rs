// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::TempDir;
use yare::parameterized;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.address(), "localhost:38523");
    assert!(config.server.password.is_none());

    let sync = config.sync_settings();
    assert_eq!(sync.poll_interval, Duration::from_secs(10));
    assert_eq!(sync.max_count, 100);
    assert_eq!(sync.read_timeout, Duration::from_millis(250));
    assert_eq!(
        config.restore_settings().read_timeout,
        Duration::from_millis(250)
    );
}

#[test]
fn test_partial_file_fills_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(
        &path,
        "[server]\nhost = \"archive.lan\"\n\n[sync]\nmax_count = 20\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.address(), "archive.lan:38523");
    assert_eq!(config.sync.max_count, 20);
    assert_eq!(config.sync.poll_interval_secs, 10);
    assert_eq!(config.restore.read_timeout_ms, 250);
}

#[test]
fn test_save_and_load_roundtrip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.server.port = 4000;
    config.server.password = Some("hunter2".to_string());
    config.restore.read_timeout_ms = 1000;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_password_not_written_when_absent() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    Config::default().save(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("password"));
    assert!(content.contains("[server]"));
}

#[test]
fn test_load_or_default_missing_file() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_or_default(&temp.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_missing_file_is_error() {
    let temp = TempDir::new().unwrap();
    let err = Config::load(&temp.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}

#[parameterized(
    not_toml = { "this is = = not toml" },
    wrong_type = { "[server]\nport = \"high\"\n" },
    port_overflow = { "[server]\nport = 70000\n" },
    empty_host = { "[server]\nhost = \"\"\n" },
    zero_interval = { "[sync]\npoll_interval_secs = 0\n" },
    zero_max_count = { "[sync]\nmax_count = 0\n" },
    zero_sync_read_timeout = { "[sync]\nread_timeout_ms = 0\n" },
    zero_restore_read_timeout = { "[restore]\nread_timeout_ms = 0\n" },
)]
fn test_invalid_config(content: &str) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, content).unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {err:?}");
}

#[test]
fn test_masked_hides_password() {
    let mut config = Config::default();
    config.server.password = Some("hunter2".to_string());

    let masked = config.masked();
    assert_eq!(masked.server.password.as_deref(), Some("********"));
    assert_eq!(config.server.password.as_deref(), Some("hunter2"));
    assert!(Config::default().masked().server.password.is_none());
}
