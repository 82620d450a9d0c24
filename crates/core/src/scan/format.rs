// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Compilation of format specifiers.
//!
//! A format such as `%ld %{IndexState}S %S` is scanned once, left to right,
//! into a list of items: whitespace runs, literal characters and compiled
//! [`FormatToken`]s. Each token carries its [`ConversionKind`], so decoding
//! never has to look at the conversion character again.

use crate::error::{Error, Result};

/// An enumeration whose constants can be matched with `%{Name}s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDef {
    pub name: &'static str,
    pub constants: &'static [&'static str],
}

impl EnumDef {
    pub const fn new(name: &'static str, constants: &'static [&'static str]) -> Self {
        EnumDef { name, constants }
    }

    /// Look up a constant by its exact (case-sensitive) name.
    pub fn resolve(&self, token: &str) -> Option<&'static str> {
        self.constants.iter().copied().find(|c| *c == token)
    }
}

/// Flags accepted between `%` and the width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// `0`, accepted for symmetry with formatting, inert when decoding.
    pub zero_pad: bool,
    /// `-`, accepted for symmetry with formatting, inert when decoding.
    pub left_adjust: bool,
    /// ` ` or `+`: string fields may contain whitespace, and leading
    /// whitespace is not skipped.
    pub blank: bool,
    /// `*`: the field consumes the rest of the subject.
    pub greedy: bool,
}

/// Width class selected by the length modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthClass {
    /// No modifier, or `h`, `hh`, `j`, `z`, `t`.
    #[default]
    Default,
    /// `l`, `ll`, `q`.
    Long,
    /// `L`.
    Floating,
}

/// What a token extracts, resolved once at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// `d i u` (radix 10), `o` (8), `x X` (16).
    Integer { radix: u32 },
    /// `e E f F g G a A`.
    Float,
    /// `c`.
    Char,
    /// `s`, or `S` when `quote_aware`.
    Str { quote_aware: bool },
    /// `%{Name}s` / `%{Name}S`.
    Enum { def: EnumDef, quote_aware: bool },
    /// `y`.
    Bool,
    /// `%%`.
    Percent,
    /// `p` and `n`: consume nothing, produce nothing.
    Nothing,
}

/// Compiled view of one `%…` specifier.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatToken {
    pub flags: Flags,
    /// Maximum captured characters for string fields; 0 is unbounded.
    pub width: usize,
    pub precision: Option<usize>,
    pub length: LengthClass,
    /// Extra quote character written right before `s`/`S`.
    pub quote: Option<char>,
    pub conversion: char,
    pub kind: ConversionKind,
    /// Literal format character directly following the token; string
    /// extraction stops there.
    pub stop: Option<char>,
}

impl FormatToken {
    /// Name of the enumeration this token resolves against, if any.
    pub fn enum_type(&self) -> Option<&'static str> {
        match self.kind {
            ConversionKind::Enum { def, .. } => Some(def.name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Item {
    Space,
    Literal(char),
    Token(FormatToken),
}

/// A compiled format specifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Format {
    spec: String,
    pub(crate) items: Vec<Item>,
    pub(crate) quotes: Vec<char>,
}

impl Format {
    /// Compile a format that uses no enumerations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for a dangling `%`, an unknown conversion
    /// character, or an enum reference.
    pub fn compile(spec: &str) -> Result<Self> {
        Self::compile_with(spec, &[])
    }

    /// Compile a format, resolving `{Name}` references against `enums`.
    pub fn compile_with(spec: &str, enums: &[EnumDef]) -> Result<Self> {
        let chars: Vec<char> = spec.chars().collect();
        let mut items = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];
            if ch.is_whitespace() {
                while i < chars.len() && chars[i].is_whitespace() {
                    i += 1;
                }
                items.push(Item::Space);
            } else if ch == '%' {
                let (token, next) = compile_token(spec, &chars, i, enums)?;
                items.push(Item::Token(token));
                i = next;
            } else {
                items.push(Item::Literal(ch));
                i += 1;
            }
        }

        let stops: Vec<Option<char>> = (0..items.len())
            .map(|idx| match items.get(idx + 1) {
                Some(Item::Literal(c)) => Some(*c),
                Some(Item::Token(t)) if t.kind == ConversionKind::Percent => Some('%'),
                _ => None,
            })
            .collect();
        for (item, stop) in items.iter_mut().zip(stops) {
            if let Item::Token(token) = item {
                token.stop = stop;
            }
        }

        Ok(Format {
            spec: spec.to_string(),
            items,
            quotes: Vec::new(),
        })
    }

    /// Recognize `quotes` as opening/closing quote characters in every
    /// string field, in addition to quotes named by the format itself.
    pub fn with_quotes(mut self, quotes: &str) -> Self {
        self.quotes = quotes.chars().collect();
        self
    }

    /// The source specifier.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// Compiled tokens in order of appearance.
    pub fn tokens(&self) -> impl Iterator<Item = &FormatToken> {
        self.items.iter().filter_map(|item| match item {
            Item::Token(t) => Some(t),
            _ => None,
        })
    }
}

/// Compile the specifier starting at `chars[start] == '%'`.
///
/// Returns the token and the index just past its conversion character.
fn compile_token(
    spec: &str,
    chars: &[char],
    start: usize,
    enums: &[EnumDef],
) -> Result<(FormatToken, usize)> {
    let mut i = start + 1;
    let mut flags = Flags::default();

    while let Some(&c) = chars.get(i) {
        match c {
            '0' => flags.zero_pad = true,
            '-' => flags.left_adjust = true,
            ' ' | '+' => flags.blank = true,
            '*' => flags.greedy = true,
            '#' => {}
            _ => break,
        }
        i += 1;
    }

    let mut width = 0usize;
    while let Some(d) = chars.get(i).and_then(|c| c.to_digit(10)) {
        width = width.saturating_mul(10).saturating_add(d as usize);
        i += 1;
    }

    let mut precision = None;
    if chars.get(i) == Some(&'.') {
        i += 1;
        let mut p = 0usize;
        while let Some(d) = chars.get(i).and_then(|c| c.to_digit(10)) {
            p = p.saturating_mul(10).saturating_add(d as usize);
            i += 1;
        }
        precision = Some(p);
    }

    let mut length = LengthClass::Default;
    match chars.get(i) {
        Some('h') => {
            i += 1;
            if chars.get(i) == Some(&'h') {
                i += 1;
            }
        }
        Some('l') => {
            length = LengthClass::Long;
            i += 1;
            if chars.get(i) == Some(&'l') {
                i += 1;
            }
        }
        Some('q') => {
            length = LengthClass::Long;
            i += 1;
        }
        Some('L') => {
            length = LengthClass::Floating;
            i += 1;
        }
        Some('j' | 'z' | 't') => i += 1,
        _ => {}
    }

    let mut enum_def = None;
    if chars.get(i) == Some(&'{') {
        let name_start = i + 1;
        let close = chars[name_start..]
            .iter()
            .position(|c| *c == '}')
            .map(|offset| name_start + offset)
            .ok_or_else(|| Error::format(spec, i, "unterminated enum type"))?;
        let name: String = chars[name_start..close].iter().collect();
        let def = enums
            .iter()
            .find(|e| e.name == name)
            .copied()
            .ok_or_else(|| Error::format(spec, i, format!("unknown enum type '{name}'")))?;
        enum_def = Some(def);
        i = close + 1;
    }

    let mut quote = None;
    if let (Some(&q), Some('s' | 'S')) = (chars.get(i), chars.get(i + 1)) {
        if !q.is_alphanumeric() && q != '%' && !q.is_whitespace() {
            quote = Some(q);
            i += 1;
        }
    }

    let conversion = *chars
        .get(i)
        .ok_or_else(|| Error::format(spec, start, "dangling '%'"))?;

    let kind = match conversion {
        'd' | 'i' | 'u' => ConversionKind::Integer { radix: 10 },
        'o' => ConversionKind::Integer { radix: 8 },
        'x' | 'X' => ConversionKind::Integer { radix: 16 },
        'e' | 'E' | 'f' | 'F' | 'g' | 'G' | 'a' | 'A' => ConversionKind::Float,
        'c' => ConversionKind::Char,
        's' => ConversionKind::Str { quote_aware: false },
        'S' => ConversionKind::Str { quote_aware: true },
        'y' => ConversionKind::Bool,
        '%' => ConversionKind::Percent,
        'p' | 'n' => ConversionKind::Nothing,
        other => {
            return Err(Error::format(
                spec,
                i,
                format!("unknown conversion '{other}'"),
            ))
        }
    };

    let kind = match (enum_def, kind) {
        (None, kind) => kind,
        (Some(def), ConversionKind::Str { quote_aware }) => ConversionKind::Enum { def, quote_aware },
        (Some(def), _) => {
            return Err(Error::format(
                spec,
                i,
                format!("enum type '{}' requires a string conversion", def.name),
            ))
        }
    };

    Ok((
        FormatToken {
            flags,
            width,
            precision,
            length,
            quote,
            conversion,
            kind,
            stop: None,
        },
        i + 1,
    ))
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
