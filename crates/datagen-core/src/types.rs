//! Column type tags and output formatting options.
//!
//! These are the small closed vocabularies a schema is built from:
//! [`ColumnType`] names the generator a column uses, [`Delimiter`] and
//! [`QuoteChar`] control how the dataset file is written.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The type of a schema column.
///
/// Serialized by its upper-case name (`RANGED_INT`, `FULLNAME`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    Date,
    RangedInt,
    #[serde(rename = "FULLNAME")]
    FullName,
    Email,
    Text,
    Phone,
    Company,
    Job,
    Domain,
}

impl ColumnType {
    /// All column types, in presentation order.
    pub const ALL: [ColumnType; 9] = [
        ColumnType::Date,
        ColumnType::RangedInt,
        ColumnType::FullName,
        ColumnType::Email,
        ColumnType::Text,
        ColumnType::Phone,
        ColumnType::Company,
        ColumnType::Job,
        ColumnType::Domain,
    ];

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Date => "DATE",
            ColumnType::RangedInt => "RANGED_INT",
            ColumnType::FullName => "FULLNAME",
            ColumnType::Email => "EMAIL",
            ColumnType::Text => "TEXT",
            ColumnType::Phone => "PHONE",
            ColumnType::Company => "COMPANY",
            ColumnType::Job => "JOB",
            ColumnType::Domain => "DOMAIN",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Date => "Date field",
            ColumnType::RangedInt => "Ranged integer field",
            ColumnType::FullName => "Full name field",
            ColumnType::Email => "E-mail field",
            ColumnType::Text => "Text field",
            ColumnType::Phone => "Phone field",
            ColumnType::Company => "Company field",
            ColumnType::Job => "Job field",
            ColumnType::Domain => "Domain name field",
        }
    }

    /// Type-specific parameter fields a column of this type must carry.
    pub fn parameter_fields(&self) -> &'static [&'static str] {
        match self {
            ColumnType::RangedInt => &["lower_bound", "upper_bound"],
            ColumnType::Text => &["sentence_count"],
            _ => &[],
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing one of the option enums from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: '{value}' (expected one of: {expected})")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl FromStr for ColumnType {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ColumnType::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| ParseOptionError {
                kind: "column type",
                value: s.to_string(),
                expected: "DATE, RANGED_INT, FULLNAME, EMAIL, TEXT, PHONE, COMPANY, JOB, DOMAIN",
            })
    }
}

/// Field separator used in the generated file.
///
/// Serialized as the separator character itself. Parsing also accepts the
/// lower-case variant name, which is easier to write than a literal tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    Space,
    Pipe,
}

impl Delimiter {
    pub const ALL: [Delimiter; 5] = [
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Tab,
        Delimiter::Space,
        Delimiter::Pipe,
    ];

    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Space => ' ',
            Delimiter::Pipe => '|',
        }
    }

    pub fn as_byte(&self) -> u8 {
        self.as_char() as u8
    }

    fn name(&self) -> &'static str {
        match self {
            Delimiter::Comma => "comma",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Tab => "tab",
            Delimiter::Space => "space",
            Delimiter::Pipe => "pipe",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Delimiter::Comma => "Comma (,)",
            Delimiter::Semicolon => "Semicolon (;)",
            Delimiter::Tab => "Tab (\\t)",
            Delimiter::Space => "Space ( )",
            Delimiter::Pipe => "Pipe (|)",
        }
    }
}

impl FromStr for Delimiter {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "\\t" {
            return Ok(Delimiter::Tab);
        }
        Delimiter::ALL
            .into_iter()
            .find(|d| s == d.as_char().to_string() || s.eq_ignore_ascii_case(d.name()))
            .ok_or_else(|| ParseOptionError {
                kind: "delimiter",
                value: s.to_string(),
                expected: "',', ';', '\\t', ' ', '|'",
            })
    }
}

impl TryFrom<String> for Delimiter {
    type Error = ParseOptionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Delimiter> for String {
    fn from(d: Delimiter) -> Self {
        d.as_char().to_string()
    }
}

/// Quote character used to wrap fields that need escaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QuoteChar {
    #[default]
    Single,
    Double,
}

impl QuoteChar {
    pub fn as_char(&self) -> char {
        match self {
            QuoteChar::Single => '\'',
            QuoteChar::Double => '"',
        }
    }

    pub fn as_byte(&self) -> u8 {
        self.as_char() as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuoteChar::Single => "Single quote (')",
            QuoteChar::Double => "Double quote (\")",
        }
    }
}

impl FromStr for QuoteChar {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "'" => Ok(QuoteChar::Single),
            "\"" => Ok(QuoteChar::Double),
            _ if s.eq_ignore_ascii_case("single") => Ok(QuoteChar::Single),
            _ if s.eq_ignore_ascii_case("double") => Ok(QuoteChar::Double),
            _ => Err(ParseOptionError {
                kind: "quote character",
                value: s.to_string(),
                expected: "''', '\"'",
            }),
        }
    }
}

impl TryFrom<String> for QuoteChar {
    type Error = ParseOptionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QuoteChar> for String {
    fn from(q: QuoteChar) -> Self {
        q.as_char().to_string()
    }
}
