//! The header key table
//!
//! Every header field appears exactly once in [`FIELDS`], which records the
//! external keyword authors type (`ORGANIZATION_NAME`), the internal name used
//! by form payloads (`unit_name`), and whether the field holds one value or
//! accumulates a list. Lookups in both directions are derived from that single
//! table, so the parser, the writer and the form layer can never disagree.

/// A header field of a memorandum
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    UnitName,
    UnitStreetAddress,
    UnitCityStateZip,
    OfficeSymbol,
    Date,
    AuthorName,
    AuthorRank,
    AuthorBranch,
    AuthorTitle,
    MemoType,
    Subject,
    SuspenseDate,
    Authority,
    ForUnitName,
    ForUnitStreetAddress,
    ForUnitCityStateZip,
    ThruUnitName,
    ThruUnitStreetAddress,
    ThruUnitCityStateZip,
    Enclosures,
    Distros,
    Cfs,
}

/// Whether a keyword is assigned once or accumulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Later assignments replace earlier ones
    Scalar,
    /// Each assignment appends one entry
    List,
}

/// One row of the key table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    /// Keyword used in Army Markdown headers
    pub key: &'static str,
    /// Name used by form payloads
    pub name: &'static str,
    pub cardinality: Cardinality,
}

const fn scalar(field: Field, key: &'static str, name: &'static str) -> FieldSpec {
    FieldSpec {
        field,
        key,
        name,
        cardinality: Cardinality::Scalar,
    }
}

const fn list(field: Field, key: &'static str, name: &'static str) -> FieldSpec {
    FieldSpec {
        field,
        key,
        name,
        cardinality: Cardinality::List,
    }
}

/// The key table, in [`Field`] declaration order.
pub const FIELDS: &[FieldSpec] = &[
    scalar(Field::UnitName, "ORGANIZATION_NAME", "unit_name"),
    scalar(
        Field::UnitStreetAddress,
        "ORGANIZATION_STREET_ADDRESS",
        "unit_street_address",
    ),
    scalar(
        Field::UnitCityStateZip,
        "ORGANIZATION_CITY_STATE_ZIP",
        "unit_city_state_zip",
    ),
    scalar(Field::OfficeSymbol, "OFFICE_SYMBOL", "office_symbol"),
    scalar(Field::Date, "DATE", "todays_date"),
    scalar(Field::AuthorName, "AUTHOR", "author_name"),
    scalar(Field::AuthorRank, "RANK", "author_rank"),
    scalar(Field::AuthorBranch, "BRANCH", "author_branch"),
    scalar(Field::AuthorTitle, "TITLE", "author_title"),
    scalar(Field::MemoType, "MEMO_TYPE", "memo_type"),
    scalar(Field::Subject, "SUBJECT", "subject"),
    scalar(Field::SuspenseDate, "SUSPENSE", "suspense_date"),
    scalar(Field::Authority, "AUTHORITY", "authority"),
    list(Field::ForUnitName, "FOR_ORGANIZATION_NAME", "for_unit_name"),
    list(
        Field::ForUnitStreetAddress,
        "FOR_ORGANIZATION_STREET_ADDRESS",
        "for_unit_street_address",
    ),
    list(
        Field::ForUnitCityStateZip,
        "FOR_ORGANIZATION_CITY_STATE_ZIP",
        "for_unit_city_state_zip",
    ),
    list(Field::ThruUnitName, "THRU_ORGANIZATION_NAME", "thru_unit_name"),
    list(
        Field::ThruUnitStreetAddress,
        "THRU_ORGANIZATION_STREET_ADDRESS",
        "thru_unit_street_address",
    ),
    list(
        Field::ThruUnitCityStateZip,
        "THRU_ORGANIZATION_CITY_STATE_ZIP",
        "thru_unit_city_state_zip",
    ),
    list(Field::Enclosures, "ENCLOSURE", "enclosures"),
    list(Field::Distros, "DISTRO", "distros"),
    list(Field::Cfs, "CF", "cfs"),
];

/// Fields that may be left out of a memo without failing the parse.
pub const OPTIONAL_FIELDS: &[Field] = &[
    Field::UnitStreetAddress,
    Field::UnitCityStateZip,
    Field::OfficeSymbol,
    Field::Date,
    Field::AuthorTitle,
    Field::MemoType,
    Field::SuspenseDate,
    Field::Authority,
    Field::ForUnitName,
    Field::ForUnitStreetAddress,
    Field::ForUnitCityStateZip,
    Field::ThruUnitName,
    Field::ThruUnitStreetAddress,
    Field::ThruUnitCityStateZip,
    Field::Enclosures,
    Field::Distros,
    Field::Cfs,
];

impl Field {
    pub fn spec(self) -> &'static FieldSpec {
        &FIELDS[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.spec().key
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn cardinality(self) -> Cardinality {
        self.spec().cardinality
    }

    pub fn is_optional(self) -> bool {
        OPTIONAL_FIELDS.contains(&self)
    }
}

/// Read-only view over the key table, handed to the parser, the writer and
/// the form layer.
#[derive(Debug, Clone, Copy)]
pub struct KeyTable {
    specs: &'static [FieldSpec],
}

impl KeyTable {
    /// The keywords understood by every memo type
    pub const fn standard() -> Self {
        KeyTable { specs: FIELDS }
    }

    pub fn specs(&self) -> &'static [FieldSpec] {
        self.specs
    }

    /// Resolve an external keyword (`AUTHOR`)
    pub fn by_key(&self, key: &str) -> Option<&'static FieldSpec> {
        self.specs.iter().find(|spec| spec.key == key)
    }

    /// Resolve an internal form name (`author_name`)
    pub fn by_name(&self, name: &str) -> Option<&'static FieldSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// External keywords of every required field
    pub fn required_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs
            .iter()
            .filter(|spec| !spec.field.is_optional())
            .map(|spec| spec.key)
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::standard()
    }
}
