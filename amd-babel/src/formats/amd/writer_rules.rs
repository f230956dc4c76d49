use serde::{Deserialize, Serialize};

/// Layout choices for writing Army Markdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterRules {
    /// String repeated once per nesting level (usually 4 spaces)
    pub indent_string: String,

    /// Separate the header from the body with a blank line
    pub blank_line_after_header: bool,
}

impl Default for WriterRules {
    fn default() -> Self {
        Self {
            indent_string: "    ".to_string(),
            blank_line_after_header: true,
        }
    }
}
