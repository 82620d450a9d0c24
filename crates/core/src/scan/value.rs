// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Decoded field values.

use std::str::FromStr;

use crate::error::{Error, Result};

/// One decoded field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    Str(String),
    Bool(bool),
    /// Constant name resolved through an enum definition.
    Enum(&'static str),
}

/// Fields decoded from one line, in format order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    values: Vec<Value>,
}

impl Fields {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.values
    }

    /// Sequential typed access to the fields.
    pub fn reader(&self) -> FieldReader<'_> {
        FieldReader {
            values: &self.values,
            index: 0,
        }
    }
}

impl From<Vec<Value>> for Fields {
    fn from(values: Vec<Value>) -> Self {
        Fields { values }
    }
}

impl IntoIterator for Fields {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Cursor over [`Fields`] that converts each value to the requested type.
///
/// Every accessor consumes one field and fails with [`Error::FieldType`] if
/// the field is missing or has an incompatible type.
pub struct FieldReader<'a> {
    values: &'a [Value],
    index: usize,
}

impl<'a> FieldReader<'a> {
    fn next_value(&mut self, expected: &'static str) -> Result<&'a Value> {
        let index = self.index;
        let value = self
            .values
            .get(index)
            .ok_or(Error::FieldType { index, expected })?;
        self.index += 1;
        Ok(value)
    }

    fn type_error(&self, expected: &'static str) -> Error {
        Error::FieldType {
            index: self.index.saturating_sub(1),
            expected,
        }
    }

    pub fn int(&mut self) -> Result<i32> {
        match self.next_value("int")? {
            Value::Int(v) => Ok(*v),
            _ => Err(self.type_error("int")),
        }
    }

    /// Accepts both `%d` and `%ld` fields.
    pub fn long(&mut self) -> Result<i64> {
        match self.next_value("long")? {
            Value::Int(v) => Ok(i64::from(*v)),
            Value::Long(v) => Ok(*v),
            _ => Err(self.type_error("long")),
        }
    }

    pub fn uint(&mut self) -> Result<u32> {
        let v = self.long()?;
        u32::try_from(v).map_err(|_| self.type_error("unsigned int"))
    }

    pub fn ulong(&mut self) -> Result<u64> {
        let v = self.long()?;
        u64::try_from(v).map_err(|_| self.type_error("unsigned long"))
    }

    pub fn float(&mut self) -> Result<f32> {
        match self.next_value("float")? {
            Value::Float(v) => Ok(*v),
            _ => Err(self.type_error("float")),
        }
    }

    pub fn double(&mut self) -> Result<f64> {
        match self.next_value("double")? {
            Value::Float(v) => Ok(f64::from(*v)),
            Value::Double(v) => Ok(*v),
            _ => Err(self.type_error("double")),
        }
    }

    pub fn character(&mut self) -> Result<char> {
        match self.next_value("char")? {
            Value::Char(c) => Ok(*c),
            _ => Err(self.type_error("char")),
        }
    }

    pub fn boolean(&mut self) -> Result<bool> {
        match self.next_value("bool")? {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.type_error("bool")),
        }
    }

    pub fn string(&mut self) -> Result<String> {
        match self.next_value("string")? {
            Value::Str(s) => Ok(s.clone()),
            Value::Enum(name) => Ok((*name).to_string()),
            _ => Err(self.type_error("string")),
        }
    }

    pub fn enum_name(&mut self) -> Result<&'static str> {
        match self.next_value("enum")? {
            Value::Enum(name) => Ok(*name),
            _ => Err(self.type_error("enum")),
        }
    }

    /// Parse an enum field into a Rust type through its `FromStr` impl.
    pub fn parse<T: FromStr>(&mut self, what: &'static str) -> Result<T> {
        let name = self.string()?;
        name.parse().map_err(|_| Error::InvalidValue { what, value: name })
    }

    /// Number of fields not consumed yet.
    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.index)
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
