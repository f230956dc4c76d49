//! Army Markdown parser
//!
//! A memo is a header of `KEY = value` lines followed by a body of dash
//! paragraphs. The header ends at the line assigning `SUBJECT`; everything
//! after it is body. Blank lines and lines starting with `#` are comments and
//! never reach either section.
//!
//! ```text
//! ORGANIZATION_NAME = 4th Engineer Battalion
//! AUTHOR = Jane Doe
//! RANK = CPT
//! BRANCH = EN
//! SUBJECT = Training Schedule
//!
//! - Soldiers will attend **mandatory** training.
//!     - Uniform is OCP.
//! ```

use chrono::{Local, NaiveDate};
use tracing::{debug, trace};

use crate::common::outline::OutlineBuilder;
use crate::common::table::{is_table_row, parse_table};
use crate::error::ParseError;
use crate::escape::escape;
use crate::model::{Document, Field, HeaderFields, KeyTable, MemoType, Node};

/// Format of `DATE` values, e.g. `05 March 2024`
pub const DATE_FORMAT: &str = "%d %B %Y";

/// A non-comment line and its 1-based position in the source
#[derive(Debug, Clone, Copy)]
struct SourceLine<'a> {
    number: usize,
    text: &'a str,
}

fn is_significant(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

fn significant_lines(source: &str) -> Vec<SourceLine<'_>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, text)| is_significant(text))
        .map(|(index, text)| SourceLine {
            number: index + 1,
            text,
        })
        .collect()
}

fn header_key(line: &str) -> Option<&str> {
    line.split_once('=').map(|(key, _)| key.trim())
}

/// Parser bound to a key table and the date used when `DATE` is absent
#[derive(Debug, Clone)]
pub struct Parser<'t> {
    keys: &'t KeyTable,
    date: String,
}

impl<'t> Parser<'t> {
    pub fn new(keys: &'t KeyTable) -> Self {
        Parser {
            keys,
            date: Local::now().date_naive().format(DATE_FORMAT).to_string(),
        }
    }

    /// Use `date` instead of today for memos without a `DATE` line.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date.format(DATE_FORMAT).to_string();
        self
    }

    pub fn parse(&self, source: &str) -> Result<Document, ParseError> {
        let lines = significant_lines(source);
        let subject = lines
            .iter()
            .position(|line| header_key(line.text) == Some(Field::Subject.key()))
            .ok_or(ParseError::MissingSubject)?;

        let mut fields = HeaderFields::new();
        for line in &lines[..=subject] {
            let Some((key, value)) = line.text.split_once('=') else {
                debug!(line = line.number, "ignoring header line without `=`");
                continue;
            };
            let key = key.trim();
            let spec = self.keys.by_key(key).ok_or_else(|| ParseError::UnknownKey {
                line: line.number,
                key: key.to_string(),
            })?;
            let value = value.trim();
            if spec.field == Field::MemoType && value.parse::<MemoType>().is_err() {
                return Err(ParseError::InvalidValue {
                    line: Some(line.number),
                    key: spec.key,
                    value: value.to_string(),
                });
            }
            trace!(line = line.number, key, "header assignment");
            fields.assign(spec, escape(value));
        }
        let header = fields.into_header(self.keys, &self.date)?;

        let body = parse_body(lines[subject + 1..].iter().map(|line| line.text));
        debug!(nodes = body.len(), "parsed memo body");
        Ok(Document { header, body })
    }
}

/// Build the paragraph outline from body lines.
///
/// Comment and blank lines are skipped here as well, so callers may pass raw
/// text such as the `text` field of a form.
pub fn parse_body<'a, I>(lines: I) -> Vec<Node>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut outline = OutlineBuilder::new();
    let mut table_rows: Vec<&'a str> = Vec::new();

    for line in lines.into_iter().filter(|line| is_significant(line)) {
        if is_table_row(line) {
            table_rows.push(line);
            continue;
        }
        if !table_rows.is_empty() {
            outline.push_table(parse_table(&table_rows));
            table_rows.clear();
        }

        let trimmed = line.trim_start();
        match trimmed.strip_prefix('-') {
            Some(rest) => {
                let depth = line.chars().count() - trimmed.chars().count();
                outline.push_item(depth, escape(rest.trim()));
            }
            None => outline.push_continuation(&escape(line.trim())),
        }
    }
    if !table_rows.is_empty() {
        outline.push_table(parse_table(&table_rows));
    }
    outline.finish()
}

/// Parse a memo with the standard key table, dated today when `DATE` is absent.
pub fn parse_memo(source: &str) -> Result<Document, ParseError> {
    Parser::new(&KeyTable::standard()).parse(source)
}
