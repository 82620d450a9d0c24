// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    plain = { "abc", Some('"'), true, "\"abc\"" },
    quote_escaped = { "a\"b", Some('"'), true, "\"a\\\"b\"" },
    single_quote = { "it's", Some('\''), true, "'it\\'s'" },
    other_quote_untouched = { "it's", Some('"'), true, "\"it's\"" },
    backslash_doubled = { "a\\b", None, false, "a\\\\b" },
    control_characters = { "x\ny\tz\r", Some('"'), false, "x\\ny\\tz\\r" },
    no_quote_no_wrap = { "a b", None, true, "a b" },
    empty = { "", Some('"'), true, "\"\"" },
)]
fn escape_cases(value: &str, quote_char: Option<char>, add_quotes: bool, expected: &str) {
    assert_eq!(escape(value, quote_char, add_quotes), expected);
}

#[test]
fn quote_uses_double_quotes() {
    assert_eq!(quote("my archive.bar"), "\"my archive.bar\"");
    assert_eq!(quote(""), "\"\"");
}

#[parameterized(
    double_quoted = { "\"a\\\"b\"", "a\"b" },
    single_quoted = { "'x'", "x" },
    unquoted_escapes = { "plain\\\\path", "plain\\path" },
    control_escapes = { "\"a\\tb\\nc\"", "a\tb\nc" },
    unbalanced = { "\"unbalanced", "\"unbalanced" },
    mismatched_quotes = { "\"x'", "\"x'" },
    escaped_closing_quote = { "\"ends\\\"", "\"ends\"" },
    even_backslashes_before_quote = { "\"ends\\\\\"", "ends\\" },
    lone_quote = { "\"", "\"" },
    trailing_backslash = { "a\\", "a\\" },
    only_one_layer = { "\"'x'\"", "'x'" },
)]
fn unescape_cases(value: &str, expected: &str) {
    assert_eq!(unescape(value), expected);
}

#[parameterized(
    plain = { "plain" },
    spaces = { "with some spaces" },
    quotes = { "say \"hi\" and 'bye'" },
    backslashes = { "C:\\dir\\file" },
    control = { "tab\there\nnewline\rreturn" },
    empty = { "" },
    unicode = { "ünïcödé ✓" },
)]
fn unescape_undoes_quote(original: &str) {
    assert_eq!(unescape(&quote(original)), original);
    assert_eq!(unescape(&escape(original, Some('\''), true)), original);
}
