//! Tree view of a parsed memo, for debugging
//!
//! Prints the header assignments and the body outline with box-drawing
//! connectors, two columns per level of nesting:
//!
//! ```text
//! ⧉ Memo (MEMORANDUM FOR RECORD, 3 items)
//! ├─ ≔ Header
//! │ ├─ ◦ ORGANIZATION_NAME = 4th Engineer Battalion
//! │ └─ ◦ SUBJECT = Training
//! └─ ☰ Body
//!   ├─ • Top level item
//!   ├─ ☰ 1 item
//!   │ └─ • Nested item
//!   └─ ▦ Table (3 rows)
//! ```
//!
//! Labels are shown unescaped and truncated to [`LABEL_WIDTH`] characters.

use crate::error::FormatError;
use crate::escape::unescape;
use crate::format::Format;
use crate::model::{Document, Field, KeyTable, Node};

/// Longest label printed before truncation
pub const LABEL_WIDTH: usize = 40;

fn icon(kind: &str) -> &'static str {
    match kind {
        "Memo" => "⧉",
        "Header" => "≔",
        "Field" => "◦",
        "Body" => "☰",
        "Group" => "☰",
        "Item" => "•",
        "Table" => "▦",
        _ => "○",
    }
}

fn truncate(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        return label.to_string();
    }
    let mut short: String = label.chars().take(LABEL_WIDTH - 1).collect();
    short.push('…');
    short
}

fn connector(is_last: bool) -> (&'static str, &'static str) {
    if is_last {
        ("└─", "  ")
    } else {
        ("├─", "│ ")
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn format_nodes(nodes: &[Node], prefix: &str, output: &mut String) {
    for (index, node) in nodes.iter().enumerate() {
        let (branch, indent) = connector(index + 1 == nodes.len());
        match node {
            Node::Item(text) => {
                let label = unescape(text).replace("\n\n", " ¶ ");
                output.push_str(&format!(
                    "{prefix}{branch} {} {}\n",
                    icon("Item"),
                    truncate(&label)
                ));
            }
            Node::Group(children) => {
                output.push_str(&format!(
                    "{prefix}{branch} {} {}\n",
                    icon("Group"),
                    plural(children.len(), "item")
                ));
                format_nodes(children, &format!("{prefix}{indent}"), output);
            }
            Node::Table(table) => {
                let status = if table.rendered.is_empty() {
                    ", not rendered"
                } else {
                    ""
                };
                output.push_str(&format!(
                    "{prefix}{branch} {} Table ({}{status})\n",
                    icon("Table"),
                    plural(table.source.lines().count(), "row")
                ));
            }
        }
    }
}

pub fn to_tree_str(doc: &Document) -> String {
    let mut output = format!(
        "{} Memo ({}, {})\n",
        icon("Memo"),
        doc.header.effective_memo_type(),
        plural(doc.item_count(), "item")
    );

    let keys = KeyTable::standard();
    let assignments: Vec<(&str, &str)> = keys
        .specs()
        .iter()
        .filter(|spec| spec.field != Field::Subject)
        .chain(std::iter::once(Field::Subject.spec()))
        .flat_map(|spec| {
            doc.header
                .values(spec.field)
                .into_iter()
                .map(move |value| (spec.key, value))
        })
        .collect();

    output.push_str(&format!("├─ {} Header\n", icon("Header")));
    for (index, (key, value)) in assignments.iter().enumerate() {
        let (branch, _) = connector(index + 1 == assignments.len());
        output.push_str(&format!(
            "│ {branch} {} {}\n",
            icon("Field"),
            truncate(&format!("{key} = {}", unescape(value)))
        ));
    }

    output.push_str(&format!("└─ {} Body\n", icon("Body")));
    format_nodes(&doc.body, "  ", &mut output);
    output
}

/// Format implementation for the tree view
pub struct TreeFormat;

impl Format for TreeFormat {
    fn name(&self) -> &str {
        "tree"
    }

    fn description(&self) -> &str {
        "Visual tree of the parsed memo"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_tree_str(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use chrono::NaiveDate;

    #[test]
    fn test_tree_output() {
        let keys = KeyTable::standard();
        let doc = Parser::new(&keys)
            .with_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
            .parse(
                "ORGANIZATION_NAME = A Co\nAUTHOR = Jane Doe\nRANK = CPT\nBRANCH = IN\n\
                 SUBJECT = Range\n- First & only\n    - Nested\n| a | b |\n|---|---|\n",
            )
            .unwrap();
        insta::assert_snapshot!(to_tree_str(&doc).trim_end(), @r"
        ⧉ Memo (MEMORANDUM FOR RECORD, 2 items)
        ├─ ≔ Header
        │ ├─ ◦ ORGANIZATION_NAME = A Co
        │ ├─ ◦ DATE = 05 March 2024
        │ ├─ ◦ AUTHOR = Jane Doe
        │ ├─ ◦ RANK = CPT
        │ ├─ ◦ BRANCH = IN
        │ └─ ◦ SUBJECT = Range
        └─ ☰ Body
          ├─ • First & only
          └─ ☰ 2 items
            ├─ • Nested
            └─ ▦ Table (2 rows)
        ");
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let label = truncate(&"x".repeat(100));
        assert_eq!(label.chars().count(), LABEL_WIDTH);
        assert!(label.ends_with('…'));
    }
}
