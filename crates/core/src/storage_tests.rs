// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn decoder() -> StorageLineDecoder {
    StorageLineDecoder::new().unwrap()
}

#[test]
fn decode_storage_line() {
    let record = decoder()
        .decode("100 1700000000 4096 OK \"s3://a.bar\" \"\"")
        .unwrap();
    assert_eq!(
        record,
        StorageRecord {
            id: 100,
            datetime: 1_700_000_000,
            size: 4096,
            state: IndexState::Ok,
            name: "s3://a.bar".to_string(),
            error_message: String::new(),
        }
    );
}

#[test]
fn decode_storage_line_with_error_message() {
    let record = decoder()
        .decode("101 1700000050 8192 ERROR \"/backup/my archive.bar\" \"read failed: \\\"timeout\\\"\"")
        .unwrap();
    assert_eq!(record.id, 101);
    assert_eq!(record.state, IndexState::Error);
    assert_eq!(record.name, "/backup/my archive.bar");
    assert_eq!(record.error_message, "read failed: \"timeout\"");
}

#[test]
fn decode_quoted_state() {
    let record = decoder()
        .decode("7 0 0 \"UPDATE_REQUESTED\" \"x\" \"\"")
        .unwrap();
    assert_eq!(record.state, IndexState::UpdateRequested);
}

#[test]
fn decode_rejects_unknown_state() {
    let err = decoder()
        .decode("100 1700000000 4096 BROKEN \"a\" \"\"")
        .unwrap_err();
    assert_eq!(
        err,
        Error::UnknownConstant {
            enum_type: "IndexState".to_string(),
            value: "BROKEN".to_string(),
        }
    );
}

#[test]
fn decode_rejects_negative_size() {
    let err = decoder().decode("1 0 -5 OK \"a\" \"\"").unwrap_err();
    assert!(matches!(err, Error::FieldType { index: 2, .. }));
}

#[parameterized(
    missing_field = { "100 1700000000 4096 OK \"a\"" },
    extra_field = { "100 1700000000 4096 OK \"a\" \"\" 9" },
    bad_number = { "x 1700000000 4096 OK \"a\" \"\"" },
    empty = { "" },
)]
fn decode_rejects_malformed_lines(line: &str) {
    assert!(decoder().decode(line).is_err());
}

#[test]
fn datetime_converts_epoch_seconds() {
    let record = decoder()
        .decode("100 1700000000 4096 OK \"a\" \"\"")
        .unwrap();
    assert_eq!(
        record.datetime().unwrap().to_rfc3339(),
        "2023-11-14T22:13:20+00:00"
    );
}

#[test]
fn update_from_keeps_id() {
    let mut record = decoder().decode("5 10 20 CREATE \"a\" \"\"").unwrap();
    let newer = decoder().decode("5 11 40 OK \"b\" \"\"").unwrap();
    record.update_from(newer);
    assert_eq!(record.id, 5);
    assert_eq!(record.datetime, 11);
    assert_eq!(record.size, 40);
    assert_eq!(record.state, IndexState::Ok);
    assert_eq!(record.name, "b");
}

#[parameterized(
    upper = { "OK", IndexState::Ok },
    lower = { "error", IndexState::Error },
    mixed = { "Update_Requested", IndexState::UpdateRequested },
)]
fn index_state_parses_case_insensitively(input: &str, expected: IndexState) {
    assert_eq!(input.parse::<IndexState>().unwrap(), expected);
}

#[test]
fn index_state_wire_names_match_enum_constants() {
    for state in [
        IndexState::None,
        IndexState::Ok,
        IndexState::Create,
        IndexState::UpdateRequested,
        IndexState::Update,
        IndexState::Error,
    ] {
        assert_eq!(IndexState::ENUM.resolve(state.as_str()), Some(state.as_str()));
        assert_eq!(state.to_string().parse::<IndexState>().unwrap(), state);
    }
}

#[parameterized(
    star = { "*", StateFilter::All },
    all = { "ALL", StateFilter::All },
    state = { "ok", StateFilter::Only(IndexState::Ok) },
)]
fn state_filter_parses(input: &str, expected: StateFilter) {
    assert_eq!(input.parse::<StateFilter>().unwrap(), expected);
}

#[test]
fn state_filter_rejects_unknown_names() {
    assert!("sometimes".parse::<StateFilter>().is_err());
}

#[test]
fn state_filter_argument_form() {
    assert_eq!(StateFilter::All.as_arg(), "*");
    assert_eq!(StateFilter::Only(IndexState::Error).as_arg(), "ERROR");
    assert_eq!(StateFilter::default(), StateFilter::All);
}
