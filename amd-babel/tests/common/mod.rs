//! Shared helpers for loading and parsing memo fixtures.

#![allow(dead_code)]

use amd_babel::model::{Document, KeyTable};
use amd_babel::parser::Parser;
use chrono::NaiveDate;
use std::path::PathBuf;

static KEYS: KeyTable = KeyTable::standard();

/// Date used for memos without a `DATE` line, so output is stable.
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

pub fn parser() -> Parser<'static> {
    Parser::new(&KEYS).with_date(test_date())
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

pub fn parse(source: &str) -> Document {
    parser().parse(source).expect("memo should parse")
}

pub fn parse_fixture(name: &str) -> Document {
    parse(&load_fixture(name))
}

/// Minimal header with every required keyword, ending with `SUBJECT`.
pub fn memo_with_body(body: &str) -> String {
    format!(
        "ORGANIZATION_NAME=Test Unit\nAUTHOR=Jane Doe\nRANK=CPT\nBRANCH=EN\nSUBJECT=Test Subject\n\n{body}"
    )
}
