//! Record set normalization.

use dedup_model::{Field, Record, RecordSet};

use crate::value::normalize_value;

/// A record set whose canonical fields are all normalized.
///
/// Only [`normalize_record_set`] constructs one. Subsets and constant
/// pass-through columns keep the guarantee, so [`NormalizedSet::filter`]
/// and [`NormalizedSet::with_constant`] stay normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSet(RecordSet);

impl NormalizedSet {
    pub fn as_record_set(&self) -> &RecordSet {
        &self.0
    }

    pub fn into_record_set(self) -> RecordSet {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        self.0.records()
    }

    /// Records `keep` accepts, in their original order.
    #[must_use]
    pub fn filter<F>(&self, keep: F) -> NormalizedSet
    where
        F: FnMut(&Record) -> bool,
    {
        NormalizedSet(self.0.filter(keep))
    }

    /// Add a constant non-canonical column.
    ///
    /// Canonical columns are left alone, since the value would bypass
    /// normalization.
    #[must_use]
    pub fn with_constant(&self, column: &str, value: &str) -> NormalizedSet {
        if Field::from_name(column).is_some() {
            tracing::warn!(column, "refusing to overwrite a canonical field with a constant");
            return self.clone();
        }
        NormalizedSet(self.0.with_constant(column, value))
    }
}

impl AsRef<RecordSet> for NormalizedSet {
    fn as_ref(&self) -> &RecordSet {
        &self.0
    }
}

/// Normalize every canonical field of every record by its field kind.
///
/// Pass-through columns are copied untouched. The input set is not modified.
pub fn normalize_record_set(set: &RecordSet) -> NormalizedSet {
    let _span = tracing::info_span!("normalize", rows = set.len()).entered();

    let mut nulled = 0usize;
    let normalized = set.map_records(|record| {
        let mut out = record.clone();
        for field in Field::ALL {
            if !set.has_column(field.as_str()) {
                continue;
            }
            let raw = record.field(field);
            let value = raw.and_then(|raw| normalize_value(field.kind(), raw));
            if raw.is_some() && value.is_none() {
                nulled += 1;
            }
            out.set_field(field, value);
        }
        out
    });

    tracing::debug!(rows = normalized.len(), nulled, "normalized canonical fields");
    NormalizedSet(normalized)
}
