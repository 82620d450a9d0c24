// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Quoting of protocol arguments.
//!
//! [`escape`] and [`unescape`] add and remove exactly one layer of quoting
//! plus backslash escaping. Line decoding with `%S` undoes [`escape`] as well.

/// Escape `value` for transmission.
///
/// Backslashes are doubled, `quote` (if any) is backslash-escaped, and
/// newline, carriage return and tab become `\n`, `\r` and `\t`. With
/// `add_quotes` the result is wrapped in `quote`.
pub fn escape(value: &str, quote: Option<char>, add_quotes: bool) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    let wrap = if add_quotes { quote } else { None };

    if let Some(q) = wrap {
        out.push(q);
    }
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if Some(c) == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    if let Some(q) = wrap {
        out.push(q);
    }
    out
}

/// Escape `value` as a double-quoted protocol argument.
pub fn quote(value: &str) -> String {
    escape(value, Some('"'), true)
}

/// Remove one layer of quotes (`"…"` or `'…'`) and resolve backslash escapes.
pub fn unescape(value: &str) -> String {
    let inner = strip_quotes(value);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(unescape_char(next)),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Character denoted by `\c`.
pub(crate) fn unescape_char(c: char) -> char {
    match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        other => other,
    }
}

fn strip_quotes(value: &str) -> &str {
    let mut chars = value.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return value;
    };
    if first != last || !matches!(first, '"' | '\'') {
        return value;
    }
    let inner = &value[first.len_utf8()..value.len() - last.len_utf8()];
    // A closing quote preceded by an odd number of backslashes is escaped.
    let trailing_backslashes = inner.chars().rev().take_while(|c| *c == '\\').count();
    if trailing_backslashes % 2 == 1 {
        return value;
    }
    inner
}

#[cfg(test)]
#[path = "escape_tests.rs"]
mod tests;
