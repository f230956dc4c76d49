//! Army Markdown: plain-text memorandums rendered as AR 25-50 LaTeX
//!
//!     This crate parses Army Markdown, a small key/value + dash-outline syntax for official
//!     memorandums, into a typed document model and renders it for the `armymemo` LaTeX class.
//!
//!     TLDR: for contributors:
//!         - Text in the model is always LaTeX-escaped. Escaping happens once, in the parser,
//!           and the Army Markdown writer is the only place that undoes it.
//!         - The header keywords live in one table (model/fields.rs). Parser, writer and form
//!           payloads all derive their lookups from it; never hardcode a keyword elsewhere.
//!         - Every output is a Format (format.rs), registered in registry.rs.
//!
//! Architecture
//!
//!     This is a pure lib, that is, it powers the amd cli but is shell agnostic: no code
//!     here prints, reads env vars for behavior, or assumes a terminal. The only exception is
//!     the pdf format, which shells out to a LaTeX engine.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # ParseError / FormatError
//!     ├── escape.rs               # inline escaper (escape / unescape)
//!     ├── parser.rs               # header + body parsing
//!     ├── check.rs                # advisory header lint
//!     ├── model                   # Document, Header, Node, key table
//!     ├── common
//!     │   ├── outline.rs          # indentation → nested groups
//!     │   └── table.rs            # pipe tables → tabular
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── amd                 # Army Markdown (parse + write)
//!     │   ├── latex               # LaTeX renderer
//!     │   ├── form                # JSON form payload
//!     │   ├── tree                # debug tree view
//!     │   └── pdf                 # lualatex export (native-export feature)
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # aggregator
//!     ├── common                  # shared helpers
//!     ├── fixtures                # sample memos (*.Amd)
//!     └── <area>/mod.rs            # amd, form, latex, pdf
//!
//!     Note that rust does not by default discover tests in subdirectories, so they are
//!     included from tests/lib.rs.
//!
//! Core Algorithms
//!
//!     The interesting part of the work is rebuilding paragraph nesting from indentation
//!     (common/outline.rs) and keeping escaping reversible (escape.rs). Both are exercised by
//!     the round-trip tests: parse(write(doc)) == doc and unescape(escape(s)) == s.

pub mod check;
pub mod common;
pub mod error;
pub mod escape;
pub mod format;
pub mod formats;
pub mod model;
pub mod parser;
pub mod registry;

pub use check::{check, Diagnostic};
pub use error::{FormatError, ParseError};
pub use escape::{escape, unescape};
pub use format::{Format, SerializedDocument};
pub use formats::latex::{render, RenderOptions};
pub use formats::amd::writer_rules::WriterRules;
pub use model::{Document, Header, KeyTable, MemoType, Node};
pub use parser::{parse_memo, Parser};
pub use registry::FormatRegistry;

/// Write `doc` back to Army Markdown.
pub fn write_memo(doc: &Document, rules: &WriterRules) -> String {
    formats::amd::serializer::AmdSerializer::new(rules.clone(), &KeyTable::standard())
        .serialize(doc)
}
