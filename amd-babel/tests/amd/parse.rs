use crate::common::{load_fixture, memo_with_body, parse, parse_fixture, parser};
use amd_babel::model::{MemoType, Node};
use amd_babel::ParseError;

fn item(text: &str) -> Node {
    Node::Item(text.to_string())
}

#[test]
fn test_example_scenario() {
    let doc = parse(&memo_with_body(
        "- Top level item\n    - Nested item one\n    - Nested item two\n- Second top level item\n",
    ));
    assert_eq!(doc.header.unit_name, "Test Unit");
    assert_eq!(doc.header.subject, "Test Subject");
    assert_eq!(
        doc.body,
        vec![
            item("Top level item"),
            Node::Group(vec![item("Nested item one"), item("Nested item two")]),
            item("Second top level item"),
        ]
    );
}

#[test]
fn test_indentation_fidelity() {
    let doc = parse(&memo_with_body("- a\n    - b\n        - c\n    - d\n- e\n"));
    assert_eq!(
        doc.body,
        vec![
            item("a"),
            Node::Group(vec![item("b"), Node::Group(vec![item("c")]), item("d")]),
            item("e"),
        ]
    );
}

#[test]
fn test_irregular_indentation_follows_first_seen_depths() {
    // 3 and 5 columns are two distinct levels even though neither is a multiple of 4
    let doc = parse(&memo_with_body("- a\n   - b\n     - c\n   - d\n"));
    assert_eq!(
        doc.body,
        vec![
            item("a"),
            Node::Group(vec![item("b"), Node::Group(vec![item("c")]), item("d")]),
        ]
    );
}

#[test]
fn test_missing_author() {
    let source = "ORGANIZATION_NAME = Test Unit\nRANK = CPT\nBRANCH = EN\nSUBJECT = Test\n- a\n";
    let err = parser().parse(source).unwrap_err();
    assert!(err.to_string().contains("AUTHOR"));
    assert_eq!(err, ParseError::MissingFields(vec!["AUTHOR"]));
}

#[test]
fn test_unknown_key() {
    let source = "FOO = bar\nORGANIZATION_NAME = Test Unit\nAUTHOR = Jane Doe\nRANK = CPT\nBRANCH = EN\nSUBJECT = Test\n";
    let err = parser().parse(source).unwrap_err();
    assert!(err.to_string().contains("FOO"));
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn test_missing_subject_explains_the_fix() {
    let err = parser()
        .parse("ORGANIZATION_NAME = Test Unit\n- a\n")
        .unwrap_err();
    assert_eq!(err, ParseError::MissingSubject);
    assert!(err.to_string().contains("SUBJECT ="));
}

#[test]
fn test_basic_fixture() {
    let doc = parse_fixture("basic_mfr.Amd");
    let header = &doc.header;
    assert_eq!(header.unit_street_address.as_deref(), Some("588 Wetzel Road"));
    assert_eq!(header.office_symbol.as_deref(), Some("ABC-DEF-GH"));
    assert_eq!(header.date, "13 June 2022");
    assert_eq!(header.author_title.as_deref(), Some("Maintenance Platoon Leader"));
    assert_eq!(header.effective_memo_type(), MemoType::ForRecord);
    assert_eq!(doc.item_count(), 6);
    assert_eq!(doc.body.len(), 4);
}

#[test]
fn test_for_thru_fixture() {
    let doc = parse_fixture("for_thru.Amd");
    let header = &doc.header;
    assert_eq!(header.effective_memo_type(), MemoType::Thru);
    let thru = header.thru_recipients.as_ref().unwrap();
    assert!(thru.is_single());
    assert_eq!(thru.recipients()[0].name, "4th Infantry Division");
    let for_block = header.for_recipients.as_ref().unwrap();
    assert_eq!(
        for_block.recipients()[0].address_line(),
        "III Armored Corps, 761st Tank Battalion Avenue, Fort Cavazos, TX 76544"
    );
    assert_eq!(header.enclosures, vec!["Threat summary", "Collection plan"]);
    assert_eq!(header.distros, vec!["S3"]);
    assert_eq!(header.cfs, vec!["Division G2"]);
    assert_eq!(header.suspense_date.as_deref(), Some("01 March 2024"));
    assert_eq!(header.subject, r"Request for \textit{additional} collection assets");
    assert_eq!(
        doc.body[1..],
        [
            item("Justification follows:"),
            Node::Group(vec![
                item(r"Current coverage is 60\% of the named areas of interest."),
                item(r"Weather degrades \uline{rotary wing} support."),
            ]),
            item("Point of contact is the undersigned."),
        ]
    );
}

#[test]
fn test_parse_is_deterministic() {
    let source = load_fixture("for_thru.Amd");
    assert_eq!(parser().parse(&source), parser().parse(&source));
}

#[test]
fn test_multiple_recipients_must_line_up() {
    let source = "ORGANIZATION_NAME = A\nAUTHOR = B\nRANK = CPT\nBRANCH = EN\n\
                  FOR_ORGANIZATION_NAME = X\nFOR_ORGANIZATION_NAME = Y\n\
                  FOR_ORGANIZATION_STREET_ADDRESS = 1 St\nFOR_ORGANIZATION_CITY_STATE_ZIP = Z\n\
                  SUBJECT = Test\n";
    let err = parser().parse(source).unwrap_err();
    assert!(err.to_string().contains("FOR_ORGANIZATION_NAME"));
}
