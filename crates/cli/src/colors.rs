// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal colors for help and list output.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

use barctl_core::IndexState;

use crate::env;

/// ANSI 256-color codes.
pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands/literals: light grey
    pub const LITERAL: u8 = 250;
    /// Defaults, hints, secondary columns: medium grey
    pub const CONTEXT: u8 = 245;
    /// Healthy index state
    pub const GOOD: u8 = 108;
    /// Index work in progress
    pub const BUSY: u8 = 179;
    /// Failed index state
    pub const BAD: u8 = 167;

    pub const RESET: &str = "\x1b[0m";
}

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    if env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Wrap `text` in a 256-color foreground sequence.
pub fn paint(code: u8, text: &str) -> String {
    format!("\x1b[38;5;{code}m{text}{}", codes::RESET)
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn literal(text: &str) -> String {
    paint(codes::LITERAL, text)
}

pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

/// Color code for an index state.
pub fn state_code(state: IndexState) -> u8 {
    match state {
        IndexState::Ok => codes::GOOD,
        IndexState::Error => codes::BAD,
        IndexState::Create | IndexState::UpdateRequested | IndexState::Update => codes::BUSY,
        IndexState::None => codes::CONTEXT,
    }
}

/// Colorize an examples block: `Title:` lines as headers, the command part
/// of `  command    description` lines as literals.
pub fn examples(text: &str) -> String {
    if should_colorize() {
        colorize_examples(text)
    } else {
        text.to_string()
    }
}

fn colorize_examples(text: &str) -> String {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            if trimmed.ends_with(':') && !trimmed.contains("  ") {
                return format!("{indent}{}", header(trimmed));
            }
            match trimmed.find("  ") {
                Some(end) => format!(
                    "{indent}{}{}",
                    literal(&trimmed[..end]),
                    &trimmed[end..]
                ),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
