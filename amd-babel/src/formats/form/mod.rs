//! Form payload: a memo as a flat JSON object
//!
//! Web forms and other tools exchange memos as one JSON object keyed by the
//! internal field names of the key table (`unit_name`, `for_unit_name`, ...)
//! plus `text`, the body in Army Markdown:
//!
//! ```json
//! {
//!   "unit_name": "4th Engineer Battalion",
//!   "author_name": "Jane Doe",
//!   "enclosures": ["Roster"],
//!   "text": "- Soldiers will attend training."
//! }
//! ```
//!
//! Values in the payload are plain author text; escaping happens on the way
//! into a [`Document`] and is undone on the way out.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::amd::serializer::AmdSerializer;
use super::amd::writer_rules::WriterRules;
use crate::error::{FormatError, ParseError};
use crate::escape::{escape, unescape};
use crate::format::Format;
use crate::model::{Cardinality, Document, HeaderFields, KeyTable};
use crate::parser::{parse_body, DATE_FORMAT};

static KEYS: KeyTable = KeyTable::standard();

/// One member of a form: a scalar field or a list field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    List(Vec<String>),
}

impl FormValue {
    fn into_values(self) -> Vec<String> {
        match self {
            FormValue::Text(text) => vec![text],
            FormValue::List(items) => items,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoForm {
    #[serde(flatten)]
    pub fields: BTreeMap<String, FormValue>,
    /// Memo body in Army Markdown
    #[serde(default)]
    pub text: String,
}

impl MemoForm {
    pub fn from_document(doc: &Document) -> Self {
        let mut fields = BTreeMap::new();
        for spec in KEYS.specs() {
            let values: Vec<String> = doc
                .header
                .values(spec.field)
                .into_iter()
                .map(unescape)
                .collect();
            let value = match spec.cardinality {
                Cardinality::Scalar => values.into_iter().next().map(FormValue::Text),
                Cardinality::List if values.is_empty() => None,
                Cardinality::List => Some(FormValue::List(values)),
            };
            if let Some(value) = value {
                fields.insert(spec.name.to_string(), value);
            }
        }
        let text = AmdSerializer::new(WriterRules::default(), &KEYS).serialize_body(&doc.body);
        MemoForm { fields, text }
    }

    /// Build a document, using `today` when the form has no `todays_date`.
    pub fn into_document(self, today: NaiveDate) -> Result<Document, FormatError> {
        let mut header = HeaderFields::new();
        for (name, value) in self.fields {
            let spec = KEYS.by_name(&name).ok_or_else(|| {
                FormatError::ParseError(format!("unknown form field `{name}`"))
            })?;
            for value in value.into_values() {
                if value.contains(|c: char| c == '\n' || c == '\r') {
                    return Err(ParseError::MultiLineValue { key: spec.key }.into());
                }
                header.assign(spec, escape(value.trim()));
            }
        }
        let header = header.into_header(&KEYS, &today.format(DATE_FORMAT).to_string())?;
        let body = parse_body(self.text.lines());
        Ok(Document { header, body })
    }
}

#[derive(Debug, Default, Clone)]
pub struct FormFormat {
    date: Option<NaiveDate>,
}

impl FormFormat {
    /// Date used for forms without `todays_date` (defaults to today)
    pub fn with_date(date: NaiveDate) -> Self {
        Self { date: Some(date) }
    }
}

impl Format for FormFormat {
    fn name(&self) -> &str {
        "form"
    }

    fn description(&self) -> &str {
        "Memo form payload (JSON)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let form: MemoForm =
            serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))?;
        let today = self.date.unwrap_or_else(|| Local::now().date_naive());
        form.into_document(today)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&MemoForm::from_document(doc))
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
