// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// `barctl` with its config pointed into `temp` and colors off.
pub fn barctl(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("barctl");
    cmd.env("BARCTL_CONFIG", temp.path().join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("BARCTL_CRYPT_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

/// A port nothing listens on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Serve one connection. Each `<id> <command>` line is answered with the
/// replies `handler` returns for the command, prefixed with the id. The
/// thread yields every received command once the client disconnects.
pub fn fake_server(handler: fn(&str) -> Vec<String>) -> (u16, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = thread::spawn(move || {
        let (socket, _) = listener.accept().unwrap();
        let mut writer = socket.try_clone().unwrap();
        let mut received = Vec::new();
        for line in BufReader::new(socket).lines() {
            let Ok(line) = line else { break };
            let (id, command) = line.split_once(' ').unwrap();
            received.push(command.to_string());
            for reply in handler(command) {
                if writeln!(writer, "{id} {reply}").is_err() {
                    return received;
                }
            }
        }
        received
    });
    (port, server)
}
