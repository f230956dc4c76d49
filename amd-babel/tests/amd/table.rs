use crate::common::{memo_with_body, parse, parse_fixture};
use amd_babel::model::Node;

#[test]
fn test_table_between_items() {
    let doc = parse_fixture("budget_table.Amd");
    assert_eq!(doc.body.len(), 3);
    assert_eq!(doc.body[0], Node::Item("The company requests the following items:".into()));
    let Node::Table(table) = &doc.body[1] else {
        panic!("expected a table, got {:?}", doc.body[1]);
    };
    assert_eq!(
        table.source,
        "| Item | Quantity | Cost |\n|:-----|:--------:|-----:|\n| Tape & cord | 20 | $40 |\n| Batteries | 100 | $85 |"
    );
    assert!(table.rendered.starts_with("\\begin{tabular}{|l|c|r|}\n\\hline\n"));
    assert!(table.rendered.contains("Item & Quantity & Cost \\\\ \\hline"));
    assert!(table.rendered.contains("Tape \\& cord & 20 & \\$40 \\\\ \\hline"));
    assert!(table.rendered.ends_with("\\end{tabular}"));
    assert_eq!(doc.body[2], Node::Item(r"Funds are available in the O\&M account.".into()));
}

#[test]
fn test_table_at_end_of_body() {
    let doc = parse(&memo_with_body("- a\n| x | y |\n|---|---|\n| 1 | 2 |\n"));
    assert_eq!(doc.body.len(), 2);
    assert!(matches!(&doc.body[1], Node::Table(table) if table.rendered.contains("x & y")));
}

#[test]
fn test_table_stays_in_its_group() {
    let doc = parse(&memo_with_body("- a\n    - b\n    | x | y |\n    |---|---|\n- c\n"));
    let Node::Group(children) = &doc.body[1] else {
        panic!("expected a group");
    };
    assert_eq!(children.len(), 2);
    assert!(matches!(children[1], Node::Table(_)));
}

#[test]
fn test_malformed_table_keeps_source() {
    let doc = parse(&memo_with_body("- a\n| x | y |\n| 1 | 2 | 3 |\n"));
    let Node::Table(table) = &doc.body[1] else {
        panic!("expected a table");
    };
    assert_eq!(table.source, "| x | y |\n| 1 | 2 | 3 |");
    assert_eq!(table.rendered, "");
}

#[test]
fn test_single_dash_line_with_pipes_is_an_item() {
    let doc = parse(&memo_with_body("- choose a | b | c\n"));
    assert_eq!(doc.body, vec![Node::Item("choose a | b | c".into())]);
}
