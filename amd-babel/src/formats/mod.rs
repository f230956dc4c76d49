//! Format implementations
//!
//! This module contains every format that reads or writes a memo
//! [`crate::model::Document`].

pub mod amd;
pub mod form;
pub mod latex;
#[cfg(feature = "native-export")]
pub mod pdf;
pub mod tree;

pub use amd::AmdFormat;
pub use form::{FormFormat, MemoForm};
pub use latex::{LatexFormat, RenderOptions};
#[cfg(feature = "native-export")]
pub use pdf::PdfFormat;
pub use tree::TreeFormat;
