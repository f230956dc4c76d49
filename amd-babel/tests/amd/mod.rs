//! Army Markdown tests
//!
//! Parsing, writing and escaping of memo source.

mod escape;
mod parse;
mod round_trip;
mod table;
