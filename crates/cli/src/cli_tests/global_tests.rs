// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

#[test]
fn test_global_defaults() {
    let cli = parse(&["barctl", "storages"]).unwrap();
    assert!(cli.global.config.is_none());
    assert!(cli.global.host.is_none());
    assert!(cli.global.port.is_none());
    assert!(cli.global.log_file.is_none());
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = parse(&[
        "barctl",
        "storages",
        "--host",
        "backup.lan",
        "--port",
        "4000",
        "-c",
        "/tmp/b.toml",
        "--log-file",
        "/tmp/b.log",
    ])
    .unwrap();
    assert_eq!(cli.global.host.as_deref(), Some("backup.lan"));
    assert_eq!(cli.global.port, Some(4000));
    assert_eq!(cli.global.config, Some(PathBuf::from("/tmp/b.toml")));
    assert_eq!(cli.global.log_file, Some(PathBuf::from("/tmp/b.log")));
}

#[test]
fn test_invalid_port_rejected() {
    assert!(parse(&["barctl", "--port", "70000", "storages"]).is_err());
}

#[test]
fn test_subcommand_required() {
    assert!(parse(&["barctl"]).is_err());
}
