//! LaTeX output for the `armymemo` document class
//!
//! # Element Mapping Table
//!
//! | Memo element          | LaTeX                                              |
//! |-----------------------|----------------------------------------------------|
//! | Organization lines    | `\address{...}` per present line                   |
//! | Author, rank, branch  | `\author{..}\rank{..}\branch{..}`                  |
//! | Office symbol         | `\officesymbol{...}`                               |
//! | Date                  | `\signaturedate{...}`                              |
//! | Subject               | `\subject{...}`                                    |
//! | One THRU recipient    | `\addmemoline{MEMORANDUM THRU name, street, csz}`  |
//! | Several THRU          | `\multimemothru{name, street, csz}` each           |
//! | FOR RECORD            | `\memoline{MEMORANDUM FOR RECORD}`                 |
//! | One FOR recipient     | `\memoline{MEMORANDUM FOR name, street, csz}`      |
//! | Several FOR           | `\multimemofor{name, street, csz}` each            |
//! | Enclosure/distro/cf   | `\addencl`, `\adddistro`, `\addcf` per entry       |
//! | Authority/title       | `\authority{...}`, `\title{...}`                   |
//! | Suspense date         | `\suspensedate{...}`                               |
//! | Item                  | `\item text`                                       |
//! | Group                 | nested `enumerate`                                 |
//! | Table                 | `tabular` inside `center`                          |
//!
//! When a THRU block is present, a single FOR recipient is introduced with a
//! bare `FOR` since the THRU line already says `MEMORANDUM`.
//!
//! Text in the model is already escaped, so the renderer emits it as-is. The
//! output only depends on the document and the [`RenderOptions`].

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::model::Document;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod renderer;

use renderer::LatexRenderer;

/// Document class used when nothing else is configured
pub const DEFAULT_DOCUMENT_CLASS: &str = "armymemo-notikz";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Argument of `\documentclass`
    pub document_class: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            document_class: DEFAULT_DOCUMENT_CLASS.to_string(),
        }
    }
}

impl RenderOptions {
    /// Apply `--extra-*` overrides understood by LaTeX output.
    ///
    /// Keys in `passthrough` are accepted and left for the caller.
    pub fn with_overrides(
        &self,
        options: &HashMap<String, String>,
        passthrough: &[&str],
    ) -> Result<Self, FormatError> {
        let mut resolved = self.clone();
        for (key, value) in options {
            match key.as_str() {
                "document-class" if !value.is_empty() => {
                    resolved.document_class = value.clone()
                }
                "document-class" => {
                    return Err(FormatError::SerializationError(
                        "--extra-document-class needs a value".to_string(),
                    ))
                }
                other if passthrough.contains(&other) => {}
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "LaTeX output does not support --extra-{other}"
                    )))
                }
            }
        }
        Ok(resolved)
    }
}

/// Render `doc` as LaTeX source.
pub fn render(doc: &Document, options: &RenderOptions) -> String {
    LatexRenderer::new(options).render(doc)
}

#[derive(Debug, Default, Clone)]
pub struct LatexFormat {
    options: RenderOptions,
}

impl LatexFormat {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl Format for LatexFormat {
    fn name(&self) -> &str {
        "latex"
    }

    fn description(&self) -> &str {
        "LaTeX source for the armymemo document class"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tex"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(render(doc, &self.options))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let resolved = self.options.with_overrides(options, &[])?;
        Ok(SerializedDocument::Text(render(doc, &resolved)))
    }
}
