//! Stage implementations.

use std::collections::{BTreeSet, HashSet};

use dedup_model::{Field, MatchStrategy, Record, StageCounts};
use dedup_normalization::NormalizedSet;

/// Survivors of one exclusion stage plus its before/after counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    pub records: NormalizedSet,
    pub counts: StageCounts,
}

impl StageOutcome {
    fn new(before: usize, records: NormalizedSet) -> Self {
        let counts = StageCounts::new(before, records.len());
        Self { records, counts }
    }

    fn unchanged(batch: &NormalizedSet) -> Self {
        Self::new(batch.len(), batch.clone())
    }
}

/// Key tuple of a record, or `None` if any key field is null.
fn key_tuple<'a>(record: &'a Record, key_fields: &[Field]) -> Option<Vec<&'a str>> {
    key_fields.iter().map(|field| record.field(*field)).collect()
}

/// Drop batch records that equal some `list` record on every key field.
///
/// Records with a null key field always survive. An empty list is a no-op.
pub fn exclude_exact(
    batch: &NormalizedSet,
    list: &NormalizedSet,
    key_fields: &BTreeSet<Field>,
) -> StageOutcome {
    if list.is_empty() || key_fields.is_empty() {
        tracing::debug!(rows = batch.len(), "empty exclusion list, nothing removed");
        return StageOutcome::unchanged(batch);
    }

    let keys: Vec<Field> = key_fields.iter().copied().collect();
    let index: HashSet<Vec<&str>> = list
        .records()
        .iter()
        .filter_map(|record| key_tuple(record, &keys))
        .collect();

    let survivors = batch.filter(|record| {
        key_tuple(record, &keys).is_none_or(|tuple| !index.contains(&tuple))
    });
    let outcome = StageOutcome::new(batch.len(), survivors);
    tracing::debug!(
        before = outcome.counts.before,
        after = outcome.counts.after,
        list_keys = index.len(),
        "exact-match exclusion"
    );
    outcome
}

/// Drop batch records whose value for any key field occurs in the same
/// field of `list`.
///
/// Fields with no non-null values in `list` never match. An empty list is a
/// no-op.
pub fn exclude_any_field(
    batch: &NormalizedSet,
    list: &NormalizedSet,
    key_fields: &BTreeSet<Field>,
) -> StageOutcome {
    if list.is_empty() {
        tracing::debug!(rows = batch.len(), "empty exclusion list, nothing removed");
        return StageOutcome::unchanged(batch);
    }

    let indexes: Vec<(Field, HashSet<&str>)> = key_fields
        .iter()
        .map(|field| {
            let values: HashSet<&str> = list
                .records()
                .iter()
                .filter_map(|record| record.field(*field))
                .collect();
            (*field, values)
        })
        .filter(|(field, values)| {
            if values.is_empty() {
                tracing::debug!(field = %field, "no list values for field, skipped");
            }
            !values.is_empty()
        })
        .collect();

    let survivors = batch.filter(|record| {
        !indexes.iter().any(|(field, values)| {
            record
                .field(*field)
                .is_some_and(|value| values.contains(value))
        })
    });
    let outcome = StageOutcome::new(batch.len(), survivors);
    tracing::debug!(
        before = outcome.counts.before,
        after = outcome.counts.after,
        fields = indexes.len(),
        "any-field exclusion"
    );
    outcome
}

/// Run the exclusion matching `strategy`.
pub fn apply_strategy(
    strategy: MatchStrategy,
    batch: &NormalizedSet,
    list: &NormalizedSet,
    key_fields: &BTreeSet<Field>,
) -> StageOutcome {
    match strategy {
        MatchStrategy::AllFields => exclude_exact(batch, list, key_fields),
        MatchStrategy::AnyField => exclude_any_field(batch, list, key_fields),
    }
}
