// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! scanf-like decoding of protocol lines.
//!
//! A format is compiled once with [`Format::compile`] and then applied to
//! any number of lines:
//!
//! ```
//! use barctl_core::scan::Format;
//!
//! let format = Format::compile("%ld %S").unwrap();
//! let fields = format.parse("42 \"my archive.bar\"").unwrap();
//! let mut reader = fields.reader();
//! assert_eq!(reader.long().unwrap(), 42);
//! assert_eq!(reader.string().unwrap(), "my archive.bar");
//! ```
//!
//! Grammar of one specifier:
//! `%[flags][width][.precision][lengthmod][{EnumType}][quote]conversion`.

mod decode;
mod format;
mod value;

pub use format::{ConversionKind, EnumDef, Flags, Format, FormatToken, LengthClass};
pub use value::{FieldReader, Fields, Value};

use crate::error::Result;

/// Compile `spec` and decode `subject` with it, requiring an exact match.
pub fn scan(subject: &str, spec: &str) -> Result<Fields> {
    Format::compile(spec)?.parse(subject)
}

/// Compile `spec` and decode the beginning of `subject` with it.
///
/// Returns the fields and the byte offset where decoding stopped.
pub fn scan_prefix(subject: &str, spec: &str) -> Result<(Fields, usize)> {
    Format::compile(spec)?.parse_prefix(subject)
}
