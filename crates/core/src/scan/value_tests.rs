// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::storage::IndexState;

fn fields(values: Vec<Value>) -> Fields {
    Fields::from(values)
}

#[test]
fn reader_consumes_fields_in_order() {
    let fields = fields(vec![
        Value::Int(-3),
        Value::Long(1 << 40),
        Value::Double(0.5),
        Value::Char('x'),
        Value::Bool(true),
        Value::Str("name".to_string()),
    ]);
    let mut r = fields.reader();
    assert_eq!(r.remaining(), 6);
    assert_eq!(r.int().unwrap(), -3);
    assert_eq!(r.long().unwrap(), 1 << 40);
    assert_eq!(r.double().unwrap(), 0.5);
    assert_eq!(r.character().unwrap(), 'x');
    assert!(r.boolean().unwrap());
    assert_eq!(r.string().unwrap(), "name");
    assert_eq!(r.remaining(), 0);
}

#[test]
fn long_accepts_int_fields() {
    let fields = fields(vec![Value::Int(7)]);
    assert_eq!(fields.reader().long().unwrap(), 7);
}

#[test]
fn int_rejects_long_fields() {
    let fields = fields(vec![Value::Long(7)]);
    assert_eq!(
        fields.reader().int().unwrap_err(),
        Error::FieldType {
            index: 0,
            expected: "int"
        }
    );
}

#[test]
fn double_accepts_float_fields() {
    let fields = fields(vec![Value::Float(1.5)]);
    assert_eq!(fields.reader().double().unwrap(), 1.5);
}

#[test]
fn unsigned_accessors_reject_negative_values() {
    let fields = fields(vec![Value::Long(-1), Value::Int(-1)]);
    let mut r = fields.reader();
    assert_eq!(
        r.ulong().unwrap_err(),
        Error::FieldType {
            index: 0,
            expected: "unsigned long"
        }
    );
    assert_eq!(
        r.uint().unwrap_err(),
        Error::FieldType {
            index: 1,
            expected: "unsigned int"
        }
    );
}

#[test]
fn reading_past_the_end_reports_missing_field() {
    let fields = fields(vec![Value::Int(1)]);
    let mut r = fields.reader();
    r.int().unwrap();
    assert_eq!(
        r.string().unwrap_err(),
        Error::FieldType {
            index: 1,
            expected: "string"
        }
    );
}

#[test]
fn string_accepts_enum_constants() {
    let fields = fields(vec![Value::Enum("OK"), Value::Enum("ERROR")]);
    let mut r = fields.reader();
    assert_eq!(r.string().unwrap(), "OK");
    assert_eq!(r.enum_name().unwrap(), "ERROR");
}

#[test]
fn enum_name_rejects_plain_strings() {
    let fields = fields(vec![Value::Str("OK".to_string())]);
    assert!(matches!(
        fields.reader().enum_name(),
        Err(Error::FieldType { index: 0, .. })
    ));
}

#[test]
fn parse_converts_through_from_str() {
    let fields = fields(vec![
        Value::Enum("UPDATE_REQUESTED"),
        Value::Str("bogus".to_string()),
    ]);
    let mut r = fields.reader();
    assert_eq!(
        r.parse::<IndexState>("index state").unwrap(),
        IndexState::UpdateRequested
    );
    assert_eq!(
        r.parse::<IndexState>("index state").unwrap_err(),
        Error::InvalidValue {
            what: "index state",
            value: "bogus".to_string()
        }
    );
}

#[test]
fn fields_expose_values() {
    let fields = fields(vec![Value::Int(1), Value::Bool(false)]);
    assert_eq!(fields.len(), 2);
    assert!(!fields.is_empty());
    assert_eq!(fields.get(1), Some(&Value::Bool(false)));
    assert_eq!(fields.get(2), None);
    assert_eq!(fields.iter().count(), 2);
    let collected: Vec<Value> = fields.into_iter().collect();
    assert_eq!(collected, vec![Value::Int(1), Value::Bool(false)]);
    assert!(Fields::default().is_empty());
}
