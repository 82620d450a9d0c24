// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn decode(line: &str) -> Result<EntryRecord> {
    EntryLineDecoder::new().unwrap().decode(line)
}

const OWNER: Ownership = Ownership {
    user_id: 1000,
    group_id: 100,
    permission: 420,
};

#[test]
fn decode_file_entry() {
    let record = decode(
        "FILE \"s1.bar\" 1700000000 \"/home/a b.txt\" 1024 1699999999 1000 100 420 0 1024",
    )
    .unwrap();
    assert_eq!(record.storage_name, "s1.bar");
    assert_eq!(record.storage_datetime, 1_700_000_000);
    assert_eq!(record.name, "/home/a b.txt");
    assert_eq!(
        record.detail,
        EntryDetail::File {
            size: 1024,
            datetime: 1_699_999_999,
            ownership: OWNER,
            fragment_offset: 0,
            fragment_size: 1024,
        }
    );
    assert_eq!(record.detail.size(), Some(1024));
}

#[test]
fn decode_image_entry() {
    let record = decode("IMAGE \"img.bar\" 1700000000 \"/dev/sda1\" 4096 0 8").unwrap();
    assert_eq!(
        record.detail,
        EntryDetail::Image {
            size: 4096,
            block_offset: 0,
            block_count: 8,
        }
    );
}

#[test]
fn decode_directory_entry() {
    let record = decode("DIRECTORY \"s1.bar\" 1700000000 \"/home\" 1699999000 0 0 493").unwrap();
    assert_eq!(
        record.detail,
        EntryDetail::Directory {
            datetime: 1_699_999_000,
            ownership: Ownership {
                user_id: 0,
                group_id: 0,
                permission: 493,
            },
        }
    );
    assert_eq!(record.detail.size(), None);
}

#[test]
fn decode_link_entry() {
    let record =
        decode("LINK \"s1.bar\" 1700000000 \"/usr/lib/x.so\" \"x.so.1\" 1699999000 0 0 511")
            .unwrap();
    assert!(matches!(
        record.detail,
        EntryDetail::Link { ref destination, .. } if destination == "x.so.1"
    ));
}

#[test]
fn decode_special_entry() {
    let record = decode("SPECIAL \"s1.bar\" 1700000000 \"/dev/null\" 1699999000 0 0 438").unwrap();
    assert_eq!(record.entry_type(), EntryType::Special);
}

#[test]
fn decode_escaped_entry_name() {
    let record = decode("DIRECTORY \"s1.bar\" 1 \"dir/new\\nline \\\"q\\\"\" 2 0 0 493").unwrap();
    assert_eq!(record.name, "dir/new\nline \"q\"");
}

#[parameterized(
    unknown_keyword = { "SOCKET \"s1.bar\" 1 \"/x\" 2 0 0 493" },
    lowercase_keyword = { "file \"s1.bar\" 1 \"/x\" 1 2 0 0 420 0 1" },
    truncated = { "FILE \"s1.bar\" 1 \"/x\" 1" },
    empty = { "" },
)]
fn decode_rejects_malformed_lines(line: &str) {
    assert!(decode(line).is_err());
}

#[test]
fn key_distinguishes_type() {
    let dir = decode("DIRECTORY \"s\" 1 \"/x\" 2 0 0 493").unwrap();
    let special = decode("SPECIAL \"s\" 1 \"/x\" 2 0 0 438").unwrap();
    assert_ne!(dir.key(), special.key());
    assert_eq!(dir.key().to_string(), "s:/x (directory)");
}

#[test]
fn update_from_replaces_detail() {
    let mut record = decode("FILE \"s\" 1 \"/x\" 10 2 0 0 420 0 10").unwrap();
    let newer = decode("FILE \"s\" 5 \"/x\" 20 3 0 0 420 0 20").unwrap();
    record.update_from(newer);
    assert_eq!(record.storage_datetime, 5);
    assert_eq!(record.detail.size(), Some(20));
}

#[parameterized(
    file = { "file", EntryType::File },
    upper = { "IMAGE", EntryType::Image },
    link = { "Link", EntryType::Link },
)]
fn entry_type_from_str(input: &str, expected: EntryType) {
    assert_eq!(input.parse::<EntryType>().unwrap(), expected);
}

#[test]
fn entry_type_rejects_unknown() {
    assert!("socket".parse::<EntryType>().is_err());
}

#[test]
fn detail_serializes_with_type_tag() {
    let detail = EntryDetail::Image {
        size: 1,
        block_offset: 2,
        block_count: 3,
    };
    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json["type"], "image");
    assert_eq!(json["block_count"], 3);
}
