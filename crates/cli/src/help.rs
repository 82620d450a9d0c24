// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// clap styles matching the list colors.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let fg = |code| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));

    Styles::styled()
        .header(fg(colors::codes::HEADER))
        .usage(fg(colors::codes::HEADER))
        .literal(fg(colors::codes::LITERAL))
        .placeholder(fg(colors::codes::CONTEXT))
        .valid(fg(colors::codes::CONTEXT))
        .error(fg(colors::codes::BAD))
}

/// Main help template with the command list ahead of the options.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands list shown before options in main help.
pub fn commands() -> String {
    format!(
        "\
{header_browse}
  {storages}    List indexed storages
  {entries}     List archive entries
  {watch}       Follow storages or entries as they change

{header_manage}
  {storage}     Add, remove or re-index storages
  {restore}     Restore storages or entries
  {config}      Show or create the client configuration
",
        header_browse = colors::header("Browse:"),
        header_manage = colors::header("Manage:"),
        storages = colors::literal("storages"),
        entries = colors::literal("entries"),
        watch = colors::literal("watch"),
        storage = colors::literal("storage"),
        restore = colors::literal("restore"),
        config = colors::literal("config"),
    )
}

/// Quickstart help shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  barctl config init                 Write a default config file
  barctl storages                    List indexed storages
  barctl entries '*.conf'            Find entries by name
  barctl restore a.bar -d /tmp/out   Restore a storage elsewhere",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
