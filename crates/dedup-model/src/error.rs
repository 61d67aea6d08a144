//! Error types for the dedup data model.

use std::path::PathBuf;

use thiserror::Error;

use crate::field::SourceRole;

/// A source table cannot be reconciled onto the canonical field set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Mandatory canonical fields are absent after alias resolution.
    ///
    /// `fields` is sorted so the message is deterministic.
    #[error("{role}: missing mandatory columns: {}", fields.join(", "))]
    MissingFields {
        role: SourceRole,
        fields: Vec<String>,
    },
}

/// Invalid run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field name that is not one of the canonical fields.
    #[error("unknown canonical field '{0}'")]
    UnknownField(String),

    /// Matching needs at least one key field.
    #[error("key field set must not be empty")]
    EmptyKeyFields,

    /// Run date not in `YYYY-MM-DD` form.
    #[error("invalid run date '{0}': expected YYYY-MM-DD")]
    RunDate(String),

    /// Unknown match strategy name.
    #[error("unknown match strategy '{0}': expected all_fields or any_field")]
    UnknownStrategy(String),

    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::DedupConfig`].
    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_display() {
        let err = SchemaError::MissingFields {
            role: SourceRole::Blacklist,
            fields: vec!["company".to_string(), "phone".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "blacklist: missing mandatory columns: company, phone"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::RunDate("31/12/2024".to_string());
        assert_eq!(
            err.to_string(),
            "invalid run date '31/12/2024': expected YYYY-MM-DD"
        );
    }
}
