//! Canonical contact fields and source roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Column holding the constant record-type tag stamped on batch records.
pub const RECORD_TYPE_COLUMN: &str = "record_type";

/// A canonical contact field.
///
/// Every source column is reconciled onto one of these names (or passed
/// through untouched in lenient mode).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Profile URL.
    Link,
    FullName,
    Company,
    Position,
    Phone,
}

/// How a field's values are normalized before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Trimmed, lowercased, whitespace-collapsed text.
    Text,
    /// Digits only.
    Phone,
}

impl Field {
    /// All canonical fields in their canonical column order.
    pub const ALL: [Field; 5] = [
        Field::Link,
        Field::FullName,
        Field::Company,
        Field::Position,
        Field::Phone,
    ];

    /// Canonical column name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::FullName => "full_name",
            Self::Company => "company",
            Self::Position => "position",
            Self::Phone => "phone",
        }
    }

    /// Normalization kind for this field.
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Phone => FieldKind::Phone,
            _ => FieldKind::Text,
        }
    }

    /// Look up a canonical field by its exact canonical name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ConfigError::UnknownField(s.to_string()))
    }
}

/// Which of the three inputs a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRole {
    /// The working set to clean ("reparto").
    Batch,
    /// Exact-match exclusions ("lista negra").
    Blacklist,
    /// Previously contacted records ("deduplicador").
    History,
}

impl SourceRole {
    pub const ALL: [SourceRole; 3] = [Self::Batch, Self::Blacklist, Self::History];

    /// Operator-facing name, as the source files are called on the floor.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Batch => "Reparto",
            Self::Blacklist => "Lista negra",
            Self::History => "Deduplicador",
        }
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Batch => write!(f, "batch"),
            Self::Blacklist => write!(f, "blacklist"),
            Self::History => write!(f, "history"),
        }
    }
}
