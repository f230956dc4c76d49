//! Advisory lint for memos
//!
//! Problems found here never stop a memo from rendering; they are reported
//! by `amd check` so authors can fix them before the memo goes out. Header
//! findings carry the keyword they concern, body findings carry `BODY`.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::escape::unescape;
use crate::model::{Document, Field};

/// Branch abbreviations accepted in `BRANCH`
pub const ARMY_BRANCHES: &[&str] = &[
    "AG", "AD", "AR", "AV", "CM", "CA", "EN", "FA", "FI", "IN", "MS", "MI", "MP", "OD", "PO", "QM",
    "SC", "SF", "TC",
];

/// Rank abbreviations accepted in `RANK`, civilian titles included
pub const ARMY_RANKS: &[&str] = &[
    "PVT", "PV2", "PFC", "SPC", "CPL", "SGT", "SSG", "SFC", "MSG", "1SG", "SGM", "CSM", "SMA",
    "WO1", "CW2", "CW3", "CW4", "CW5", "2LT", "1LT", "CPT", "MAJ", "LTC", "COL", "BG", "MG",
    "LTG", "GEN", "GA", "MR", "MRS", "MS", "DR",
];

/// Longest subject that still reads well on one line
pub const SUBJECT_MAX_CHARS: usize = 150;

const BODY_KEY: &str = "BODY";

static OFFICE_SYMBOL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z]{2,5}(-[A-Z0-9]{1,4})*$").expect("office symbol pattern is valid")
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\d{2} (January|February|March|April|May|June|July|August|September|October|November|December) \d{4}$",
    )
    .expect("date pattern is valid")
});

/// One lint finding, tied to the header keyword it concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub key: &'static str,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

fn check_date(date: &str) -> Option<Diagnostic> {
    if DATE_PATTERN.is_match(date) {
        return None;
    }
    Some(Diagnostic {
        key: Field::Date.key(),
        message: format!("the entered date {date} does not conform to pattern ## Month ####"),
    })
}

fn check_branch(branch: &str) -> Option<Diagnostic> {
    if ARMY_BRANCHES.contains(&branch) {
        return None;
    }
    Some(Diagnostic {
        key: Field::AuthorBranch.key(),
        message: format!("{branch} is misspelled or not a valid Army branch"),
    })
}

fn check_rank(rank: &str) -> Option<Diagnostic> {
    if ARMY_RANKS.contains(&rank.to_ascii_uppercase().as_str()) {
        return None;
    }
    Some(Diagnostic {
        key: Field::AuthorRank.key(),
        message: format!("{rank} is not a recognized Army rank abbreviation"),
    })
}

fn check_office_symbol(symbol: &str) -> Option<Diagnostic> {
    if OFFICE_SYMBOL_PATTERN.is_match(symbol) {
        return None;
    }
    Some(Diagnostic {
        key: Field::OfficeSymbol.key(),
        message: format!(
            "{symbol} may not be in standard format (typically XXXX-XX-X, e.g. ATZB-CD-E)"
        ),
    })
}

fn check_subject(subject: &str) -> Vec<Diagnostic> {
    let mut found = Vec::new();
    let length = subject.chars().count();
    if length > SUBJECT_MAX_CHARS {
        found.push(Diagnostic {
            key: Field::Subject.key(),
            message: format!(
                "subject is {length} characters; keep it under {SUBJECT_MAX_CHARS} for readability"
            ),
        });
    }
    if !subject.chars().next().is_some_and(char::is_uppercase) {
        found.push(Diagnostic {
            key: Field::Subject.key(),
            message: "subject should start with a capital letter".to_string(),
        });
    }
    found
}

fn check_body(doc: &Document) -> Option<Diagnostic> {
    if !doc.body.is_empty() {
        return None;
    }
    Some(Diagnostic {
        key: BODY_KEY,
        message: "memo body content is required".to_string(),
    })
}

/// Lint `doc`, header keywords first in key table order, then the body.
pub fn check(doc: &Document) -> Vec<Diagnostic> {
    let header = &doc.header;
    let mut found: Vec<Diagnostic> = [
        header
            .office_symbol
            .as_deref()
            .and_then(|symbol| check_office_symbol(&unescape(symbol))),
        check_date(&unescape(&header.date)),
        check_rank(&unescape(&header.author_rank)),
        check_branch(&unescape(&header.author_branch)),
    ]
    .into_iter()
    .flatten()
    .collect();
    found.extend(check_subject(&unescape(&header.subject)));
    found.extend(check_body(doc));
    found
}
