//! Error types for parsing and format operations
//!
//! Every message is meant to be shown to the memo author as-is, so the
//! variants name the exact line or keyword that needs fixing.

use thiserror::Error;

/// Errors raised while turning Army Markdown into a [`crate::model::Document`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No header line assigns `SUBJECT`, so the header/body split is unknown
    #[error(
        "memo is missing the keyword SUBJECT; add a line such as `SUBJECT = Your subject` \
         before the first paragraph"
    )]
    MissingSubject,

    /// A header line uses a keyword outside the key table
    #[error("line {line}: no such keyword `{key}`")]
    UnknownKey { line: usize, key: String },

    /// Required fields were never assigned (external key names)
    #[error("missing the following keys: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A keyword with a closed set of values got something else. `line` is
    /// known for Army Markdown sources and absent for form payloads.
    #[error(
        "{}`{value}` is not a valid value for {key}",
        .line.map(|n| format!("line {n}: ")).unwrap_or_default()
    )]
    InvalidValue {
        line: Option<usize>,
        key: &'static str,
        value: String,
    },

    /// A header value would not fit on its one `KEY = value` line
    #[error("{key} must be a single line of text")]
    MultiLineValue { key: &'static str },

    /// The name/address/city lists of a recipient block differ in length
    #[error(
        "{prefix}_ORGANIZATION_NAME, {prefix}_ORGANIZATION_STREET_ADDRESS and \
         {prefix}_ORGANIZATION_CITY_STATE_ZIP must be given the same number of times"
    )]
    MismatchedRecipients { prefix: &'static str },
}

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// The memo itself is invalid
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The input could not be decoded by the format (e.g. malformed JSON)
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}
