//! Inline escaping between Army Markdown text and LaTeX
//!
//! [`escape`] runs three passes in a fixed order:
//!
//! 1. every backslash becomes `\textbackslash{}`;
//! 2. the reserved characters `& % $ # _ { } ~ ^` are escaped, leaving the
//!    `\textbackslash{}` tokens from the first pass intact;
//! 3. emphasis markers are replaced, longest first: `***x***` is underlined,
//!    `**x**` is bold and `*x*` is italic. Matching is non-greedy and never
//!    spans a newline.
//!
//! [`unescape`] undoes the passes in reverse, which is what the Army Markdown
//! writer needs to reproduce the text an author typed.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const BACKSLASH: &str = r"\textbackslash{}";
const TILDE: &str = r"\textasciitilde{}";
const CARET: &str = r"\textasciicircum{}";

/// Characters escaped by prefixing a backslash
const PREFIXED: &[char] = &['&', '%', '$', '#', '_', '{', '}'];

struct Emphasis {
    pattern: Regex,
    marker: &'static str,
    command: &'static str,
}

static EMPHASIS: Lazy<[Emphasis; 3]> = Lazy::new(|| {
    let emphasis = |pattern: &str, marker, command| Emphasis {
        pattern: Regex::new(pattern).expect("emphasis pattern is valid"),
        marker,
        command,
    };
    [
        emphasis(r"\*\*\*(.+?)\*\*\*", "***", "uline"),
        emphasis(r"\*\*(.+?)\*\*", "**", "textbf"),
        emphasis(r"\*(.+?)\*", "*", "textit"),
    ]
});

/// Convert author text into LaTeX-safe text.
pub fn escape(text: &str) -> String {
    let text = text.replace('\\', BACKSLASH);
    let mut text = escape_reserved(&text);
    for emphasis in EMPHASIS.iter() {
        let replaced = emphasis
            .pattern
            .replace_all(&text, |caps: &Captures| {
                format!("\\{}{{{}}}", emphasis.command, &caps[1])
            })
            .into_owned();
        text = replaced;
    }
    text
}

/// Recover author text from the output of [`escape`].
pub fn unescape(text: &str) -> String {
    let mut text = text.to_string();
    for emphasis in EMPHASIS.iter().rev() {
        text = unwrap_command(&text, emphasis.command, emphasis.marker);
    }
    unescape_reserved(&text).replace(BACKSLASH, "\\")
}

fn escape_reserved(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if rest.starts_with(BACKSLASH) {
            out.push_str(BACKSLASH);
            rest = &rest[BACKSLASH.len()..];
            continue;
        }
        match c {
            '~' => out.push_str(TILDE),
            '^' => out.push_str(CARET),
            c if PREFIXED.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}

fn unescape_reserved(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if c == '\\' {
            // backslash tokens are restored last
            if rest.starts_with(BACKSLASH) {
                out.push_str(BACKSLASH);
                rest = &rest[BACKSLASH.len()..];
                continue;
            }
            if let Some(after) = rest.strip_prefix(TILDE) {
                out.push('~');
                rest = after;
                continue;
            }
            if let Some(after) = rest.strip_prefix(CARET) {
                out.push('^');
                rest = after;
                continue;
            }
            if let Some(next) = rest[1..].chars().next().filter(|n| PREFIXED.contains(n)) {
                out.push(next);
                rest = &rest[1 + next.len_utf8()..];
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Replace `\command{body}` with `marker body marker`, matching braces.
fn unwrap_command(text: &str, command: &str, marker: &str) -> String {
    let opener = format!("\\{command}{{");
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(&opener) {
        let body_start = start + opener.len();
        match closing_brace(&rest[body_start..]) {
            Some(len) => {
                out.push_str(&rest[..start]);
                out.push_str(marker);
                out.push_str(&unwrap_command(
                    &rest[body_start..body_start + len],
                    command,
                    marker,
                ));
                out.push_str(marker);
                rest = &rest[body_start + len + 1..];
            }
            None => {
                out.push_str(&rest[..body_start]);
                rest = &rest[body_start..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Byte offset of the brace closing an already opened group.
fn closing_brace(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut chars = text.char_indices();
    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}
