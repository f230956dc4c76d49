//! Army Markdown format implementation
//!
//! Parsing delegates to [`crate::parser::Parser`]; serialization writes the
//! memo back out with [`AmdSerializer`], so a memo can be normalized by
//! converting it from `amd` to `amd`.

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::model::{Document, KeyTable};
use crate::parser::Parser;
use chrono::NaiveDate;
use std::collections::HashMap;

pub mod serializer;
pub mod writer_rules;

use serializer::AmdSerializer;
use writer_rules::WriterRules;

static KEYS: KeyTable = KeyTable::standard();

#[derive(Debug, Default, Clone)]
pub struct AmdFormat {
    rules: WriterRules,
    date: Option<NaiveDate>,
}

impl AmdFormat {
    pub fn new(rules: WriterRules) -> Self {
        Self { rules, date: None }
    }

    /// Date used for memos without a `DATE` line (defaults to today)
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    fn parser(&self) -> Parser<'static> {
        let parser = Parser::new(&KEYS);
        match self.date {
            Some(date) => parser.with_date(date),
            None => parser,
        }
    }
}

impl Format for AmdFormat {
    fn name(&self) -> &str {
        "amd"
    }

    fn description(&self) -> &str {
        "Army Markdown memorandum source"
    }

    fn file_extensions(&self) -> &[&str] {
        &["Amd", "amd"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(self.parser().parse(source)?)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(AmdSerializer::new(self.rules.clone(), &KEYS).serialize(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let mut rules = self.rules.clone();
        for (key, value) in options {
            match key.as_str() {
                "indent" => rules.indent_string = parse_indent(value)?,
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'amd' does not support --extra-{other}"
                    )))
                }
            }
        }
        Ok(SerializedDocument::Text(
            AmdSerializer::new(rules, &KEYS).serialize(doc),
        ))
    }
}

/// `--extra-indent 2` means two spaces; anything non-numeric is used verbatim.
fn parse_indent(value: &str) -> Result<String, FormatError> {
    if value.is_empty() {
        return Err(FormatError::SerializationError(
            "--extra-indent needs a value".to_string(),
        ));
    }
    Ok(match value.parse::<usize>() {
        Ok(width) => " ".repeat(width),
        Err(_) => value.to_string(),
    })
}
