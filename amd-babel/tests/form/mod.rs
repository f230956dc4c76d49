//! JSON form payloads

use crate::common::{parse_fixture, test_date};
use amd_babel::formats::form::{FormFormat, FormValue, MemoForm};
use amd_babel::{Format, FormatError, ParseError};
use serde_json::json;

#[test]
fn test_fixtures_survive_the_form() {
    let format = FormFormat::with_date(test_date());
    for name in ["basic_mfr.Amd", "for_thru.Amd", "budget_table.Amd"] {
        let doc = parse_fixture(name);
        let json = format.serialize(&doc).unwrap();
        assert_eq!(format.parse(&json).unwrap(), doc, "{name} changed in the form");
    }
}

#[test]
fn test_form_uses_internal_names_and_plain_text() {
    let form = MemoForm::from_document(&parse_fixture("for_thru.Amd"));
    assert_eq!(
        form.fields.get("subject"),
        Some(&FormValue::Text("Request for *additional* collection assets".into()))
    );
    assert_eq!(
        form.fields.get("thru_unit_name"),
        Some(&FormValue::List(vec!["4th Infantry Division".into()]))
    );
    assert!(!form.fields.contains_key("authority"));
    assert!(form.text.contains("    - Current coverage is 60% of the named areas of interest.\n"));
}

#[test]
fn test_missing_required_fields() {
    let payload = json!({
        "unit_name": "A Co",
        "subject": "Test",
        "text": "- a"
    });
    let err = FormFormat::with_date(test_date())
        .parse(&payload.to_string())
        .unwrap_err();
    assert_eq!(
        err,
        FormatError::Parse(ParseError::MissingFields(vec!["AUTHOR", "RANK", "BRANCH"]))
    );
}

#[test]
fn test_unknown_field_is_rejected() {
    let payload = json!({
        "unit_name": "A Co",
        "author_name": "Jane Doe",
        "author_rank": "CPT",
        "author_branch": "EN",
        "subject": "Test",
        "colour": "green"
    });
    let err = FormFormat::with_date(test_date())
        .parse(&payload.to_string())
        .unwrap_err();
    assert!(err.to_string().contains("colour"));
}

#[test]
fn test_malformed_json() {
    let err = FormFormat::default().parse("{ not json").unwrap_err();
    assert!(matches!(err, FormatError::ParseError(_)));
}
