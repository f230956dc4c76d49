use crate::common::{memo_with_body, parse, parse_fixture};
use amd_babel::{write_memo, WriterRules};

fn assert_round_trip(source: &str) {
    let doc = parse(source);
    let written = write_memo(&doc, &WriterRules::default());
    assert_eq!(parse(&written), doc, "rewritten memo:\n{written}");
}

#[test]
fn test_fixtures_survive_a_rewrite() {
    for name in ["basic_mfr.Amd", "for_thru.Amd", "budget_table.Amd"] {
        let doc = parse_fixture(name);
        let written = write_memo(&doc, &WriterRules::default());
        assert_eq!(parse(&written), doc, "{name} changed after rewrite");
    }
}

#[test]
fn test_reserved_characters_and_emphasis() {
    assert_round_trip(&memo_with_body(
        "- Costs rose 15% & fuel is $3_50 #1\n- ***Urgent:*** see **para 2** and *annex {A}*\n- Path C:\\data ~ 2^3\n",
    ));
}

#[test]
fn test_continuation_paragraphs() {
    assert_round_trip(&memo_with_body(
        "- First paragraph.\nIt keeps going here.\n    - Nested.\n    Nested continuation.\n- Last.\n",
    ));
}

#[test]
fn test_nested_table() {
    assert_round_trip(&memo_with_body(
        "- Items:\n    - Detail\n    | a | b |\n    |---|---|\n    | 1 | 2 |\n- After\n",
    ));
}

#[test]
fn test_custom_indent_string() {
    let doc = parse_fixture("basic_mfr.Amd");
    let rules = WriterRules {
        indent_string: "\t".to_string(),
        ..WriterRules::default()
    };
    let written = write_memo(&doc, &rules);
    assert!(written.contains("\n\t- Thing one.\n"));
    assert!(written.contains("\n\t\t- Here is a sub sub item.\n"));
    assert_eq!(parse(&written), doc);
}

#[test]
fn test_header_comes_back_in_table_order() {
    let doc = parse_fixture("for_thru.Amd");
    let written = write_memo(&doc, &WriterRules::default());
    let keys: Vec<&str> = written
        .lines()
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.split_once(" = ").map(|(key, _)| key))
        .collect();
    assert_eq!(keys.first(), Some(&"ORGANIZATION_NAME"));
    assert_eq!(keys.last(), Some(&"SUBJECT"));
    assert!(written.contains("SUBJECT = Request for *additional* collection assets\n"));
}
