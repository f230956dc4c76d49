//! Format trait definition
//!
//! Every way of reading or writing a memo (Army Markdown, LaTeX, form JSON,
//! the debug tree, PDF) implements [`Format`], so the CLI can pick one by name
//! or file extension without knowing anything about it.

use crate::error::FormatError;
use crate::model::Document;
use std::collections::HashMap;

/// What a format hands back: text for everything except `pdf`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializedDocument {
    Text(String),
    Binary(Vec<u8>),
}

impl SerializedDocument {
    /// Bytes to write to an output file
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            SerializedDocument::Text(text) => text.into_bytes(),
            SerializedDocument::Binary(bytes) => bytes,
        }
    }
}

/// A representation a memo can be read from or written to
///
/// Only `name` is required. Readers override `supports_parsing` and `parse`,
/// writers override `supports_serialization` and `serialize`; the defaults
/// refuse the operation with [`FormatError::NotSupported`].
///
/// # Examples
///
/// ```ignore
/// struct Plain;
///
/// impl Format for Plain {
///     fn name(&self) -> &str {
///         "plain"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         Ok(doc.header.subject.clone())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// Name used by `--from` / `--to`
    fn name(&self) -> &str;

    /// One line shown by `amd --list-formats`
    fn description(&self) -> &str {
        ""
    }

    /// Extensions without the dot, matched case-insensitively by the registry
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize with the `--extra-*` options given on the command line.
    ///
    /// The default accepts no options and wraps [`Format::serialize`]. Formats
    /// with knobs (`amd`, `latex`) and binary formats (`pdf`) override it.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        if options.is_empty() {
            self.serialize(doc).map(SerializedDocument::Text)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' takes no --extra-* parameters (got {})",
                self.name(),
                options.keys().cloned().collect::<Vec<_>>().join(", ")
            )))
        }
    }
}
