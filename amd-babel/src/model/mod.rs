//! Document model shared by the parser and every output format
//!
//! A [`Document`] is a typed [`Header`] plus an ordered body of numbered
//! paragraphs. Nesting in the body is structural: a [`Node::Group`] holds the
//! sub-paragraphs of the item that precedes it, so the LaTeX writer only has
//! to open a nested `enumerate` per group.

pub mod fields;
pub mod header;

use serde::Serialize;

pub use fields::{Cardinality, Field, FieldSpec, KeyTable};
pub use header::{Header, HeaderFields, MemoType, Recipient, RecipientBlock};

/// A parsed memorandum
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub header: Header,
    pub body: Vec<Node>,
}

/// One entry of the memo body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Node {
    /// A numbered paragraph. Continuation paragraphs are joined with a blank line.
    Item(String),
    /// Sub-paragraphs nested one level below the preceding item
    Group(Vec<Node>),
    /// A pipe table
    Table(Table),
}

/// A pipe table as written and as rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Source rows, trimmed, one per line
    pub source: String,
    /// `tabular` environment, or empty when the rows are not a valid table
    pub rendered: String,
}

impl Document {
    /// Number of items at every depth
    pub fn item_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    Node::Item(_) => 1,
                    Node::Group(children) => count(children),
                    Node::Table(_) => 0,
                })
                .sum()
        }
        count(&self.body)
    }
}
