//! Per-run configuration.
//!
//! [`DedupOptions`] is decided once, before any table is read, and passed
//! explicitly to every stage. Nothing in the pipeline infers matching or
//! schema behavior from the data itself.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::field::Field;

/// Prefix of the batch label stamped on every output row.
pub const DEFAULT_BATCH_LABEL_PREFIX: &str = "SALA";

/// Record-type tag stamped on batch records when none is configured.
pub const DEFAULT_RECORD_TYPE: &str = "LINKEDIN";

/// How a batch record is compared against an exclusion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Excluded only when one list record equals it on every key field.
    AllFields,
    /// Excluded when any single key field value occurs in the list's column.
    AnyField,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllFields => write!(f, "all_fields"),
            Self::AnyField => write!(f, "any_field"),
        }
    }
}

impl FromStr for MatchStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all_fields" => Ok(Self::AllFields),
            "any_field" => Ok(Self::AnyField),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Options controlling one dedup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupOptions {
    /// Strict: all canonical fields mandatory, unknown columns dropped.
    /// Lenient: only `link` mandatory, unknown columns passed through.
    pub strict_schema: bool,
    /// Fields compared by both exclusion stages. Never empty.
    pub key_fields: BTreeSet<Field>,
    /// Date used for sequence identifiers and the batch label.
    pub run_date: NaiveDate,
    /// Extra header aliases on top of the built-in legacy names.
    /// Keys are compared after header normalization.
    pub aliases: BTreeMap<String, Field>,
    pub blacklist_strategy: MatchStrategy,
    pub history_strategy: MatchStrategy,
    pub batch_label_prefix: String,
    pub record_type: String,
}

impl DedupOptions {
    /// Strict schema, all five fields as keys.
    pub fn strict(run_date: NaiveDate) -> Self {
        Self {
            strict_schema: true,
            key_fields: default_key_fields(true),
            run_date,
            aliases: BTreeMap::new(),
            blacklist_strategy: MatchStrategy::AllFields,
            history_strategy: MatchStrategy::AnyField,
            batch_label_prefix: DEFAULT_BATCH_LABEL_PREFIX.to_string(),
            record_type: DEFAULT_RECORD_TYPE.to_string(),
        }
    }

    /// Lenient schema, `link` as the only key.
    pub fn lenient(run_date: NaiveDate) -> Self {
        Self {
            strict_schema: false,
            key_fields: default_key_fields(false),
            ..Self::strict(run_date)
        }
    }

    /// Replace the key field set.
    pub fn with_key_fields<I>(mut self, fields: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Field>,
    {
        let key_fields: BTreeSet<Field> = fields.into_iter().collect();
        if key_fields.is_empty() {
            return Err(ConfigError::EmptyKeyFields);
        }
        self.key_fields = key_fields;
        Ok(self)
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>, field: Field) -> Self {
        self.aliases.insert(alias.into(), field);
        self
    }

    /// Canonical fields every source must provide.
    pub fn mandatory_fields(&self) -> Vec<Field> {
        if self.strict_schema {
            Field::ALL.to_vec()
        } else {
            vec![Field::Link]
        }
    }

    /// Label stamped on every output row, e.g. `SALA_2024-05-01`.
    pub fn batch_label(&self) -> String {
        format!(
            "{}_{}",
            self.batch_label_prefix,
            self.run_date.format("%Y-%m-%d")
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_fields.is_empty() {
            return Err(ConfigError::EmptyKeyFields);
        }
        Ok(())
    }
}

/// Key fields used when none are configured for the given schema mode.
pub fn default_key_fields(strict_schema: bool) -> BTreeSet<Field> {
    if strict_schema {
        Field::ALL.into_iter().collect()
    } else {
        BTreeSet::from([Field::Link])
    }
}

/// Parse a `YYYY-MM-DD` run date.
pub fn parse_run_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ConfigError::RunDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_strict_defaults() {
        let options = DedupOptions::strict(date());
        assert!(options.strict_schema);
        assert_eq!(options.key_fields.len(), 5);
        assert_eq!(options.mandatory_fields(), Field::ALL.to_vec());
        assert_eq!(options.blacklist_strategy, MatchStrategy::AllFields);
        assert_eq!(options.history_strategy, MatchStrategy::AnyField);
    }

    #[test]
    fn test_lenient_defaults() {
        let options = DedupOptions::lenient(date());
        assert!(!options.strict_schema);
        assert_eq!(options.key_fields, BTreeSet::from([Field::Link]));
        assert_eq!(options.mandatory_fields(), vec![Field::Link]);
    }

    #[test]
    fn test_empty_key_fields_rejected() {
        let result = DedupOptions::strict(date()).with_key_fields(Vec::new());
        assert!(matches!(result, Err(ConfigError::EmptyKeyFields)));
    }

    #[test]
    fn test_batch_label() {
        assert_eq!(DedupOptions::strict(date()).batch_label(), "SALA_2024-05-01");
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("any-field".parse::<MatchStrategy>().unwrap(), MatchStrategy::AnyField);
        assert_eq!(" ALL_FIELDS ".parse::<MatchStrategy>().unwrap(), MatchStrategy::AllFields);
        assert!("tuple".parse::<MatchStrategy>().is_err());
    }

    #[test]
    fn test_parse_run_date() {
        assert_eq!(parse_run_date("2024-05-01").unwrap(), date());
        assert!(matches!(
            parse_run_date("01/05/2024"),
            Err(ConfigError::RunDate(_))
        ));
    }
}
