//! Memo header: the typed view over the key/value preamble

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::fields::{Cardinality, Field, FieldSpec, KeyTable};
use crate::error::ParseError;

/// How the memo is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemoType {
    #[serde(rename = "MEMORANDUM FOR RECORD")]
    ForRecord,
    #[serde(rename = "MEMORANDUM FOR")]
    For,
    #[serde(rename = "MEMORANDUM THRU")]
    Thru,
}

impl MemoType {
    pub fn as_str(self) -> &'static str {
        match self {
            MemoType::ForRecord => "MEMORANDUM FOR RECORD",
            MemoType::For => "MEMORANDUM FOR",
            MemoType::Thru => "MEMORANDUM THRU",
        }
    }
}

impl fmt::Display for MemoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemoType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_uppercase().as_str() {
            "MEMORANDUM FOR RECORD" | "RECORD" => Ok(MemoType::ForRecord),
            "MEMORANDUM FOR" | "FOR" => Ok(MemoType::For),
            "MEMORANDUM THRU" | "THRU" => Ok(MemoType::Thru),
            _ => Err(ParseError::InvalidValue {
                line: None,
                key: Field::MemoType.key(),
                value: s.to_string(),
            }),
        }
    }
}

/// One addressee of a FOR or THRU line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    pub name: String,
    pub street_address: String,
    pub city_state_zip: String,
}

impl Recipient {
    /// `name, street, city` as it appears on a memo line
    pub fn address_line(&self) -> String {
        format!(
            "{}, {}, {}",
            self.name, self.street_address, self.city_state_zip
        )
    }
}

/// Ordered addressees of one kind. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecipientBlock {
    recipients: Vec<Recipient>,
}

impl RecipientBlock {
    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.recipients.len() == 1
    }

    /// Zip the three parallel keyword lists into addressees.
    fn from_lists(
        prefix: &'static str,
        names: Vec<String>,
        streets: Vec<String>,
        cities: Vec<String>,
    ) -> Result<Option<Self>, ParseError> {
        if names.is_empty() && streets.is_empty() && cities.is_empty() {
            return Ok(None);
        }
        if names.len() != streets.len() || names.len() != cities.len() {
            return Err(ParseError::MismatchedRecipients { prefix });
        }
        let recipients = names
            .into_iter()
            .zip(streets)
            .zip(cities)
            .map(|((name, street_address), city_state_zip)| Recipient {
                name,
                street_address,
                city_state_zip,
            })
            .collect();
        Ok(Some(RecipientBlock { recipients }))
    }
}

/// Header of a memorandum. Text values are already LaTeX-escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub unit_name: String,
    pub unit_street_address: Option<String>,
    pub unit_city_state_zip: Option<String>,
    pub office_symbol: Option<String>,
    pub date: String,
    pub author_name: String,
    pub author_rank: String,
    pub author_branch: String,
    pub author_title: Option<String>,
    /// Explicit `MEMO_TYPE`, if the author gave one
    pub memo_type: Option<MemoType>,
    pub subject: String,
    pub suspense_date: Option<String>,
    pub authority: Option<String>,
    pub for_recipients: Option<RecipientBlock>,
    pub thru_recipients: Option<RecipientBlock>,
    pub enclosures: Vec<String>,
    pub distros: Vec<String>,
    pub cfs: Vec<String>,
}

impl Header {
    /// The explicit memo type, or the one implied by the recipients
    pub fn effective_memo_type(&self) -> MemoType {
        if let Some(memo_type) = self.memo_type {
            return memo_type;
        }
        if self.thru_recipients.is_some() {
            MemoType::Thru
        } else if self.for_recipients.is_some() {
            MemoType::For
        } else {
            MemoType::ForRecord
        }
    }

    /// Values currently assigned to `field`, in keyword order
    pub fn values(&self, field: Field) -> Vec<&str> {
        fn column<'a>(
            block: &'a Option<RecipientBlock>,
            pick: fn(&'a Recipient) -> &'a str,
        ) -> Vec<&'a str> {
            block
                .iter()
                .flat_map(|b| b.recipients.iter().map(pick))
                .collect()
        }

        match field {
            Field::UnitName => vec![self.unit_name.as_str()],
            Field::UnitStreetAddress => self.unit_street_address.as_deref().into_iter().collect(),
            Field::UnitCityStateZip => self.unit_city_state_zip.as_deref().into_iter().collect(),
            Field::OfficeSymbol => self.office_symbol.as_deref().into_iter().collect(),
            Field::Date => vec![self.date.as_str()],
            Field::AuthorName => vec![self.author_name.as_str()],
            Field::AuthorRank => vec![self.author_rank.as_str()],
            Field::AuthorBranch => vec![self.author_branch.as_str()],
            Field::AuthorTitle => self.author_title.as_deref().into_iter().collect(),
            Field::MemoType => self.memo_type.map(MemoType::as_str).into_iter().collect(),
            Field::Subject => vec![self.subject.as_str()],
            Field::SuspenseDate => self.suspense_date.as_deref().into_iter().collect(),
            Field::Authority => self.authority.as_deref().into_iter().collect(),
            Field::ForUnitName => column(&self.for_recipients, |r| r.name.as_str()),
            Field::ForUnitStreetAddress => column(&self.for_recipients, |r| r.street_address.as_str()),
            Field::ForUnitCityStateZip => column(&self.for_recipients, |r| r.city_state_zip.as_str()),
            Field::ThruUnitName => column(&self.thru_recipients, |r| r.name.as_str()),
            Field::ThruUnitStreetAddress => column(&self.thru_recipients, |r| r.street_address.as_str()),
            Field::ThruUnitCityStateZip => column(&self.thru_recipients, |r| r.city_state_zip.as_str()),
            Field::Enclosures => self.enclosures.iter().map(String::as_str).collect(),
            Field::Distros => self.distros.iter().map(String::as_str).collect(),
            Field::Cfs => self.cfs.iter().map(String::as_str).collect(),
        }
    }
}

/// Collects keyword assignments before they are validated into a [`Header`].
#[derive(Debug, Clone, Default)]
pub struct HeaderFields {
    values: BTreeMap<Field, Vec<String>>,
}

impl HeaderFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one assignment: scalars keep the last value, lists append.
    pub fn assign(&mut self, spec: &FieldSpec, value: String) {
        let slot = self.values.entry(spec.field).or_default();
        if spec.cardinality == Cardinality::Scalar {
            slot.clear();
        }
        slot.push(value);
    }

    pub fn is_assigned(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    fn take_scalar(&mut self, field: Field) -> Option<String> {
        self.values.remove(&field).and_then(|mut v| v.pop())
    }

    fn take_list(&mut self, field: Field) -> Vec<String> {
        self.values.remove(&field).unwrap_or_default()
    }

    /// Validate the collected values. `today` fills in an absent `DATE`.
    pub fn into_header(mut self, keys: &KeyTable, today: &str) -> Result<Header, ParseError> {
        let missing: Vec<&'static str> = keys
            .required_keys()
            .filter(|key| keys.by_key(key).is_some_and(|spec| !self.is_assigned(spec.field)))
            .collect();
        if !missing.is_empty() {
            return Err(ParseError::MissingFields(missing));
        }

        let memo_type = self
            .take_scalar(Field::MemoType)
            .map(|value| value.parse::<MemoType>())
            .transpose()?;

        let for_recipients = RecipientBlock::from_lists(
            "FOR",
            self.take_list(Field::ForUnitName),
            self.take_list(Field::ForUnitStreetAddress),
            self.take_list(Field::ForUnitCityStateZip),
        )?;
        let thru_recipients = RecipientBlock::from_lists(
            "THRU",
            self.take_list(Field::ThruUnitName),
            self.take_list(Field::ThruUnitStreetAddress),
            self.take_list(Field::ThruUnitCityStateZip),
        )?;

        Ok(Header {
            unit_name: self.take_scalar(Field::UnitName).unwrap_or_default(),
            unit_street_address: self.take_scalar(Field::UnitStreetAddress),
            unit_city_state_zip: self.take_scalar(Field::UnitCityStateZip),
            office_symbol: self.take_scalar(Field::OfficeSymbol),
            date: self
                .take_scalar(Field::Date)
                .unwrap_or_else(|| today.to_string()),
            author_name: self.take_scalar(Field::AuthorName).unwrap_or_default(),
            author_rank: self.take_scalar(Field::AuthorRank).unwrap_or_default(),
            author_branch: self.take_scalar(Field::AuthorBranch).unwrap_or_default(),
            author_title: self.take_scalar(Field::AuthorTitle),
            memo_type,
            subject: self.take_scalar(Field::Subject).unwrap_or_default(),
            suspense_date: self.take_scalar(Field::SuspenseDate),
            authority: self.take_scalar(Field::Authority),
            for_recipients,
            thru_recipients,
            enclosures: self.take_list(Field::Enclosures),
            distros: self.take_list(Field::Distros),
            cfs: self.take_list(Field::Cfs),
        })
    }
}
