//! TOML configuration file.
//!
//! ```toml
//! [schema]
//! strict = false
//!
//! [schema.aliases]
//! "perfil linkedin" = "link"
//!
//! [matching]
//! key_fields = ["link", "company"]
//! blacklist = "all_fields"
//! history = "any_field"
//!
//! [output]
//! run_date = "2024-05-01"
//! batch_label_prefix = "SALA"
//! record_type = "LINKEDIN"
//! ```
//!
//! Every value is optional. Command-line flags are layered on top with
//! [`DedupConfig::merge`] before the config is resolved into
//! [`DedupOptions`].

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::field::Field;
use crate::options::{DedupOptions, MatchStrategy, default_key_fields, parse_run_date};

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DedupConfig {
    pub schema: SchemaSection,
    pub matching: MatchingSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaSection {
    pub strict: Option<bool>,
    pub aliases: BTreeMap<String, Field>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MatchingSection {
    pub key_fields: Option<Vec<Field>>,
    pub blacklist: Option<MatchStrategy>,
    pub history: Option<MatchStrategy>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    /// `YYYY-MM-DD`, quoted.
    pub run_date: Option<String>,
    pub batch_label_prefix: Option<String>,
    pub record_type: Option<String>,
}

impl DedupConfig {
    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layer `overrides` on top of `self`; any value set in `overrides` wins.
    /// Alias tables are merged key by key.
    #[must_use]
    pub fn merge(mut self, overrides: DedupConfig) -> Self {
        if overrides.schema.strict.is_some() {
            self.schema.strict = overrides.schema.strict;
        }
        self.schema.aliases.extend(overrides.schema.aliases);
        if overrides.matching.key_fields.is_some() {
            self.matching.key_fields = overrides.matching.key_fields;
        }
        if overrides.matching.blacklist.is_some() {
            self.matching.blacklist = overrides.matching.blacklist;
        }
        if overrides.matching.history.is_some() {
            self.matching.history = overrides.matching.history;
        }
        if overrides.output.run_date.is_some() {
            self.output.run_date = overrides.output.run_date;
        }
        if overrides.output.batch_label_prefix.is_some() {
            self.output.batch_label_prefix = overrides.output.batch_label_prefix;
        }
        if overrides.output.record_type.is_some() {
            self.output.record_type = overrides.output.record_type;
        }
        self
    }

    /// Resolve into run options. `today` is used when no run date is set.
    ///
    /// Key fields default by schema mode: all five when strict (the
    /// default), `link` alone when lenient.
    pub fn resolve(self, today: NaiveDate) -> Result<DedupOptions, ConfigError> {
        let strict_schema = self.schema.strict.unwrap_or(true);
        let run_date = match self.output.run_date.as_deref() {
            Some(value) => parse_run_date(value)?,
            None => today,
        };

        let mut options = if strict_schema {
            DedupOptions::strict(run_date)
        } else {
            DedupOptions::lenient(run_date)
        };
        options.key_fields = match self.matching.key_fields {
            Some(fields) => fields.into_iter().collect(),
            None => default_key_fields(strict_schema),
        };
        options.aliases = self.schema.aliases;
        if let Some(strategy) = self.matching.blacklist {
            options.blacklist_strategy = strategy;
        }
        if let Some(strategy) = self.matching.history {
            options.history_strategy = strategy;
        }
        if let Some(prefix) = self.output.batch_label_prefix {
            options.batch_label_prefix = prefix;
        }
        if let Some(record_type) = self.output.record_type {
            options.record_type = record_type;
        }
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::io::Write;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_empty_config_resolves_to_strict_defaults() {
        let options = DedupConfig::default().resolve(today()).unwrap();
        assert_eq!(options, DedupOptions::strict(today()));
    }

    #[test]
    fn test_parse_full_config() {
        let config: DedupConfig = toml::from_str(
            r#"
            [schema]
            strict = false

            [schema.aliases]
            "perfil linkedin" = "link"

            [matching]
            key_fields = ["link", "company"]
            blacklist = "any_field"

            [output]
            run_date = "2023-12-24"
            batch_label_prefix = "TARDE"
            "#,
        )
        .unwrap();
        let options = config.resolve(today()).unwrap();

        assert!(!options.strict_schema);
        assert_eq!(
            options.key_fields,
            BTreeSet::from([Field::Link, Field::Company])
        );
        assert_eq!(options.aliases.get("perfil linkedin"), Some(&Field::Link));
        assert_eq!(options.blacklist_strategy, MatchStrategy::AnyField);
        assert_eq!(options.history_strategy, MatchStrategy::AnyField);
        assert_eq!(options.batch_label(), "TARDE_2023-12-24");
        assert_eq!(options.record_type, "LINKEDIN");
    }

    #[test]
    fn test_lenient_without_keys_defaults_to_link() {
        let config: DedupConfig = toml::from_str("[schema]\nstrict = false\n").unwrap();
        let options = config.resolve(today()).unwrap();
        assert_eq!(options.key_fields, BTreeSet::from([Field::Link]));
    }

    #[test]
    fn test_empty_key_fields_rejected() {
        let config: DedupConfig = toml::from_str("[matching]\nkey_fields = []\n").unwrap();
        assert!(matches!(
            config.resolve(today()),
            Err(ConfigError::EmptyKeyFields)
        ));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<DedupConfig, _> = toml::from_str("[filters]\nx = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_overrides_win() {
        let base: DedupConfig = toml::from_str(
            "[schema]\nstrict = false\n[output]\nrecord_type = \"WEB\"\n",
        )
        .unwrap();
        let mut overrides = DedupConfig::default();
        overrides.schema.strict = Some(true);
        overrides.output.run_date = Some("2024-01-02".to_string());

        let merged = base.merge(overrides);
        assert_eq!(merged.schema.strict, Some(true));
        assert_eq!(merged.output.record_type.as_deref(), Some("WEB"));
        assert_eq!(merged.output.run_date.as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn test_load_reports_path_on_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[schema\nstrict = ").unwrap();
        let err = DedupConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DedupConfig::load(Path::new("/nonexistent/dedup.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
