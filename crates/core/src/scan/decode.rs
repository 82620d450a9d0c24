// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Decoding of subject lines against a compiled [`Format`].

use crate::error::{Error, Result};
use crate::escape::unescape_char;

use super::format::{ConversionKind, Format, FormatToken, Item, LengthClass};
use super::value::{Fields, Value};

const STRING_QUOTES: [char; 2] = ['"', '\''];

impl Format {
    /// Decode `subject`, which must be consumed entirely (trailing
    /// whitespace aside).
    ///
    /// # Errors
    ///
    /// [`Error::Mismatch`] when the subject does not follow the format,
    /// [`Error::InvalidNumber`] for a malformed numeric field and
    /// [`Error::UnknownConstant`] for an enum token naming no constant.
    pub fn parse(&self, subject: &str) -> Result<Fields> {
        let mut scanner = Scanner::new(subject, &self.quotes);
        let fields = scanner.run(self)?;
        scanner.skip_whitespace();
        if !scanner.at_end() {
            return Err(Error::Mismatch {
                offset: scanner.byte_offset(),
            });
        }
        Ok(fields)
    }

    /// Decode the beginning of `subject`.
    ///
    /// Returns the fields and the byte offset just past the last consumed
    /// character; text after that offset is left untouched.
    pub fn parse_prefix(&self, subject: &str) -> Result<(Fields, usize)> {
        let mut scanner = Scanner::new(subject, &self.quotes);
        let fields = scanner.run(self)?;
        Ok((fields, scanner.byte_offset()))
    }

    /// Returns true if `subject` matches exactly.
    pub fn matches(&self, subject: &str) -> bool {
        self.parse(subject).is_ok()
    }
}

struct Scanner<'a> {
    subject: &'a str,
    chars: Vec<char>,
    pos: usize,
    quotes: &'a [char],
}

impl<'a> Scanner<'a> {
    fn new(subject: &'a str, quotes: &'a [char]) -> Self {
        Scanner {
            subject,
            chars: subject.chars().collect(),
            pos: 0,
            quotes,
        }
    }

    fn run(&mut self, format: &Format) -> Result<Fields> {
        let mut values = Vec::new();
        let mut previous: Option<&Item> = None;
        for item in &format.items {
            match item {
                Item::Space => self.skip_whitespace(),
                Item::Literal(c) => {
                    // Whitespace is only skipped where a literal run begins.
                    if !matches!(previous, Some(Item::Literal(_))) {
                        self.skip_whitespace();
                    }
                    self.expect(*c)?;
                }
                Item::Token(token) => {
                    if !token.flags.blank {
                        self.skip_whitespace();
                    }
                    if let Some(value) = self.token(token)? {
                        values.push(value);
                    }
                }
            }
            previous = Some(item);
        }
        Ok(Fields::from(values))
    }

    fn token(&mut self, token: &FormatToken) -> Result<Option<Value>> {
        let value = match token.kind {
            ConversionKind::Integer { radix } => Some(self.integer(radix, token.length)?),
            ConversionKind::Float => Some(self.float(token.length)?),
            ConversionKind::Char => {
                let c = self.peek().ok_or_else(|| self.mismatch())?;
                self.pos += 1;
                Some(Value::Char(c))
            }
            ConversionKind::Str { quote_aware } => {
                Some(Value::Str(self.string(token, quote_aware)?))
            }
            ConversionKind::Enum { def, quote_aware } => {
                let name = self.string(token, quote_aware)?;
                let constant = def.resolve(&name).ok_or_else(|| Error::UnknownConstant {
                    enum_type: def.name.to_string(),
                    value: name,
                })?;
                Some(Value::Enum(constant))
            }
            ConversionKind::Bool => {
                let start = self.pos;
                let word = self.string(token, false)?;
                match word.as_str() {
                    "1" | "true" | "yes" | "on" => Some(Value::Bool(true)),
                    "0" | "false" | "no" | "off" => Some(Value::Bool(false)),
                    _ => {
                        self.pos = start;
                        return Err(self.mismatch());
                    }
                }
            }
            ConversionKind::Percent => {
                self.expect('%')?;
                None
            }
            ConversionKind::Nothing => None,
        };
        Ok(value)
    }

    fn integer(&mut self, radix: u32, length: LengthClass) -> Result<Value> {
        let start = self.pos;
        let mut text = String::new();
        if let Some(sign @ ('+' | '-')) = self.peek() {
            text.push(sign);
            self.pos += 1;
        }
        if radix == 16
            && self.peek() == Some('0')
            && matches!(self.peek_at(1), Some('x' | 'X'))
            && self.peek_at(2).is_some_and(|c| c.is_digit(16))
        {
            self.pos += 2;
        }
        let digits_start = self.pos;
        while let Some(c) = self.peek().filter(|c| c.is_digit(radix)) {
            text.push(c);
            self.pos += 1;
        }
        if self.pos == digits_start {
            return Err(self.invalid_number(start));
        }

        let parsed = i64::from_str_radix(&text, radix).map_err(|_| self.invalid_number(start))?;
        match length {
            LengthClass::Long => Ok(Value::Long(parsed)),
            _ => i32::try_from(parsed)
                .map(Value::Int)
                .map_err(|_| self.invalid_number(start)),
        }
    }

    fn float(&mut self, length: LengthClass) -> Result<Value> {
        let start = self.pos;
        let mut text = String::new();
        if let Some(sign @ ('+' | '-')) = self.peek() {
            text.push(sign);
            self.pos += 1;
        }
        let mut digits = 0;
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits += 1;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
            } else {
                break;
            }
            text.push(c);
            self.pos += 1;
        }
        if digits == 0 {
            return Err(self.invalid_number(start));
        }

        let parsed: f64 = text.parse().map_err(|_| self.invalid_number(start))?;
        match length {
            LengthClass::Default => Ok(Value::Float(parsed as f32)),
            LengthClass::Long | LengthClass::Floating => Ok(Value::Double(parsed)),
        }
    }

    fn string(&mut self, token: &FormatToken, quote_aware: bool) -> Result<String> {
        let greedy = token.flags.greedy;
        if greedy && !quote_aware {
            let rest: String = self.chars[self.pos..].iter().collect();
            self.pos = self.chars.len();
            return Ok(rest);
        }
        if self.at_end() && !greedy {
            return Err(self.mismatch());
        }

        let blank = token.flags.blank || greedy;
        let stop = if greedy { None } else { token.stop };
        let is_quote = |c: char| {
            token.quote == Some(c)
                || self.quotes.contains(&c)
                || (quote_aware && STRING_QUOTES.contains(&c))
        };

        let mut out = String::new();
        let mut count = 0usize;
        let mut open: Option<char> = None;
        let mut pos = self.pos;

        while pos < self.chars.len() && (token.width == 0 || count < token.width) {
            let c = self.chars[pos];
            if c == '\\' && pos + 1 < self.chars.len() {
                out.push(unescape_char(self.chars[pos + 1]));
                count += 1;
                pos += 2;
                continue;
            }
            match open {
                Some(q) => {
                    if c == q {
                        open = None;
                    } else {
                        out.push(c);
                        count += 1;
                    }
                    pos += 1;
                }
                None => {
                    if is_quote(c) {
                        open = Some(c);
                        pos += 1;
                    } else if (!blank && c.is_whitespace()) || Some(c) == stop {
                        break;
                    } else {
                        out.push(c);
                        count += 1;
                        pos += 1;
                    }
                }
            }
        }

        if open.is_some() {
            return Err(Error::Mismatch {
                offset: self.byte_offset_of(pos),
            });
        }
        self.pos = pos;
        Ok(out)
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.mismatch())
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn byte_offset(&self) -> usize {
        self.byte_offset_of(self.pos)
    }

    fn byte_offset_of(&self, pos: usize) -> usize {
        self.subject
            .char_indices()
            .nth(pos)
            .map_or(self.subject.len(), |(b, _)| b)
    }

    fn mismatch(&self) -> Error {
        Error::Mismatch {
            offset: self.byte_offset(),
        }
    }

    fn invalid_number(&mut self, start: usize) -> Error {
        let token: String = self.chars[start..]
            .iter()
            .take_while(|c| !c.is_whitespace())
            .collect();
        let offset = self.byte_offset_of(start);
        self.pos = start;
        Error::InvalidNumber { token, offset }
    }
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
