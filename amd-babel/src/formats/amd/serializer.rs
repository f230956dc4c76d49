//! Writes a [`Document`] back to Army Markdown
//!
//! Header values are unescaped so the output reads the way an author would
//! type it. `SUBJECT` is always the last header line because it is what ends
//! the header when the text is parsed again.

use super::writer_rules::WriterRules;
use crate::escape::unescape;
use crate::model::{Document, Field, KeyTable, Node};

pub struct AmdSerializer<'t> {
    rules: WriterRules,
    keys: &'t KeyTable,
    output: String,
    indent_level: usize,
}

impl<'t> AmdSerializer<'t> {
    pub fn new(rules: WriterRules, keys: &'t KeyTable) -> Self {
        Self {
            rules,
            keys,
            output: String::new(),
            indent_level: 0,
        }
    }

    pub fn serialize(mut self, doc: &Document) -> String {
        self.write_header(doc);
        if self.rules.blank_line_after_header {
            self.output.push('\n');
        }
        self.write_body(&doc.body);
        self.output
    }

    /// Body only, as used by the `text` member of a form
    pub fn serialize_body(mut self, body: &[Node]) -> String {
        self.write_body(body);
        self.output
    }

    fn indent(&self) -> String {
        self.rules.indent_string.repeat(self.indent_level)
    }

    fn write_line(&mut self, text: &str) {
        self.output.push_str(&self.indent());
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn write_header(&mut self, doc: &Document) {
        let fields = self
            .keys
            .specs()
            .iter()
            .filter(|spec| spec.field != Field::Subject)
            .chain(std::iter::once(Field::Subject.spec()));
        for spec in fields {
            for value in doc.header.values(spec.field) {
                self.output
                    .push_str(&format!("{} = {}\n", spec.key, unescape(value)));
            }
        }
    }

    fn write_body(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Item(text) => {
                    let mut paragraphs = text.split("\n\n");
                    if let Some(first) = paragraphs.next() {
                        self.write_line(&format!("- {}", unescape(first)));
                    }
                    for paragraph in paragraphs {
                        self.write_line(&unescape(paragraph));
                    }
                }
                Node::Group(children) => {
                    self.indent_level += 1;
                    self.write_body(children);
                    self.indent_level -= 1;
                }
                Node::Table(table) => {
                    for row in table.source.lines() {
                        self.write_line(row);
                    }
                }
            }
        }
    }
}
