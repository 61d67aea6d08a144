//! Header alias resolution.

use std::collections::BTreeMap;

use dedup_ingest::normalize_header;
use dedup_model::{DedupOptions, Field};

/// Legacy column names used by the operators' spreadsheets.
pub const DEFAULT_ALIASES: [(&str, Field); 5] = [
    ("enlace", Field::Link),
    ("nombre", Field::FullName),
    ("empresa", Field::Company),
    ("puesto", Field::Position),
    ("telefono", Field::Phone),
];

/// Lookup from normalized header text to canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, Field>,
}

impl Default for AliasTable {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        for field in Field::ALL {
            entries.insert(field.as_str().to_string(), field);
        }
        for (alias, field) in DEFAULT_ALIASES {
            entries.insert(alias.to_string(), field);
        }
        Self { entries }
    }
}

impl AliasTable {
    /// Built-in aliases plus the ones configured for this run.
    ///
    /// Configured aliases are added on top; they may re-point a built-in
    /// legacy name but never a canonical name.
    pub fn from_options(options: &DedupOptions) -> Self {
        let mut table = Self::default();
        for (alias, field) in &options.aliases {
            table.insert(alias, *field);
        }
        table
    }

    /// Add an alias. Canonical field names always resolve to themselves.
    pub fn insert(&mut self, alias: &str, field: Field) {
        let key = normalize_header(alias);
        if key.is_empty() || Field::from_name(&key).is_some() {
            return;
        }
        self.entries.insert(key, field);
    }

    /// Canonical field for a raw header, if any.
    pub fn resolve(&self, header: &str) -> Option<Field> {
        self.entries.get(&normalize_header(header)).copied()
    }

    /// Every `(alias, field)` pair, sorted by alias.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Field)> {
        self.entries.iter().map(|(alias, field)| (alias.as_str(), *field))
    }

    /// Aliases that resolve to `field`, excluding its canonical name.
    pub fn aliases_for(&self, field: Field) -> Vec<&str> {
        self.iter()
            .filter(|(alias, target)| *target == field && *alias != field.as_str())
            .map(|(alias, _)| alias)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_defaults_resolve_legacy_and_canonical() {
        let table = AliasTable::default();
        assert_eq!(table.resolve("Enlace"), Some(Field::Link));
        assert_eq!(table.resolve("  TELEFONO "), Some(Field::Phone));
        assert_eq!(table.resolve("full_name"), Some(Field::FullName));
        assert_eq!(table.resolve("\u{feff}puesto"), Some(Field::Position));
        assert_eq!(table.resolve("email"), None);
    }

    #[test]
    fn test_configured_aliases() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let options = DedupOptions::strict(date)
            .with_alias("Perfil  LinkedIn", Field::Link)
            .with_alias("phone", Field::Company);
        let table = AliasTable::from_options(&options);

        assert_eq!(table.resolve("perfil linkedin"), Some(Field::Link));
        assert_eq!(table.resolve("phone"), Some(Field::Phone));
    }

    #[test]
    fn test_aliases_for() {
        let table = AliasTable::default();
        assert_eq!(table.aliases_for(Field::Company), vec!["empresa"]);
    }
}
