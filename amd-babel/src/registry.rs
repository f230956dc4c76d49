//! Named formats for the `amd` front end
//!
//! Every input and output the toolchain knows (`amd`, `latex`, `pdf`, `form`,
//! `tree`) is a [`Format`] registered here under its name. The registry also
//! maps file extensions back to format names, so `memo.Amd` is read as Army
//! Markdown and `memo.json` as a form payload without a `--from` flag.

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::model::Document;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Formats keyed by name, kept sorted for listing
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// A registry with no formats
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// Add `format`, replacing any format registered under the same name.
    ///
    /// The CLI relies on replacement to swap in formats built from the
    /// user's configuration.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|format| format.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered formats in name order
    pub fn formats(&self) -> impl Iterator<Item = &dyn Format> {
        self.formats.values().map(|format| format.as_ref())
    }

    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// Name of the format owning the extension of `filename`.
    ///
    /// Extensions compare case-insensitively, so `MEMO.AMD` and `memo.Amd`
    /// both resolve to `amd`.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename).extension()?.to_str()?;
        self.formats()
            .find(|format| {
                format
                    .file_extensions()
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(extension))
            })
            .map(|format| format.name().to_string())
    }

    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let reader = self.get(format)?;
        if !reader.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' is output only"
            )));
        }
        reader.parse(source)
    }

    /// Serialize to text; binary formats such as `pdf` are rejected.
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        match self.serialize_with_options(doc, format, &HashMap::new())? {
            SerializedDocument::Text(text) => Ok(text),
            SerializedDocument::Binary(_) => Err(FormatError::SerializationError(format!(
                "Format '{format}' produces binary output; write it to a file"
            ))),
        }
    }

    /// Serialize with `--extra-*` options passed through to the format
    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let writer = self.get(format)?;
        if !writer.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' is input only"
            )));
        }
        writer.serialize_with_options(doc, options)
    }

    /// Every built-in format with default settings
    pub fn with_defaults() -> Self {
        use crate::formats::{AmdFormat, FormFormat, LatexFormat, TreeFormat};

        let mut registry = Self::new();
        registry.register(AmdFormat::default());
        registry.register(LatexFormat::default());
        registry.register(FormFormat::default());
        registry.register(TreeFormat);
        #[cfg(feature = "native-export")]
        registry.register(crate::formats::PdfFormat::default());
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
