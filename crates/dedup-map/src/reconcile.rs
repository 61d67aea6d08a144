//! Column reconciliation onto the canonical field set.

use std::collections::BTreeMap;

use dedup_ingest::RawTable;
use dedup_model::{DedupOptions, Field, Record, RecordSet, SchemaError, SourceRole};

use crate::aliases::AliasTable;

/// Where each output column comes from in the source row.
struct ColumnPlan {
    canonical: BTreeMap<Field, usize>,
    extras: Vec<(String, usize)>,
}

impl ColumnPlan {
    fn build(table: &RawTable, role: SourceRole, aliases: &AliasTable) -> Self {
        let mut canonical = BTreeMap::new();
        let mut extras: Vec<(String, usize)> = Vec::new();

        for (idx, header) in table.headers.iter().enumerate() {
            match aliases.resolve(header) {
                Some(field) => {
                    if canonical.contains_key(&field) {
                        tracing::warn!(
                            role = %role,
                            column = %header,
                            field = %field,
                            "duplicate column for canonical field, keeping the first"
                        );
                    } else {
                        canonical.insert(field, idx);
                    }
                }
                None => {
                    let name = header.trim().to_string();
                    let taken = Field::from_name(&name).is_some()
                        || extras.iter().any(|(existing, _)| *existing == name);
                    if taken {
                        tracing::warn!(role = %role, column = %header, "duplicate column dropped");
                    } else {
                        extras.push((name, idx));
                    }
                }
            }
        }

        Self { canonical, extras }
    }

    fn missing(&self, mandatory: &[Field]) -> Vec<String> {
        let mut missing: Vec<String> = mandatory
            .iter()
            .filter(|field| !self.canonical.contains_key(*field))
            .map(|field| field.as_str().to_string())
            .collect();
        missing.sort();
        missing
    }
}

/// Reconcile a source table onto the canonical fields.
///
/// Strict mode requires all canonical fields and drops every other column.
/// Lenient mode requires `link` only and keeps unknown columns after the
/// canonical ones, in source order. Canonical fields the source lacks are
/// added as null columns. A table without data rows reconciles to an empty
/// canonical set.
pub fn reconcile(
    table: &RawTable,
    role: SourceRole,
    options: &DedupOptions,
) -> Result<RecordSet, SchemaError> {
    let _span = tracing::info_span!("reconcile", role = %role).entered();

    if table.is_empty() {
        tracing::info!(role = %role, "source has no rows, treating as empty list");
        return Ok(RecordSet::canonical());
    }

    let aliases = AliasTable::from_options(options);
    let plan = ColumnPlan::build(table, role, &aliases);

    let missing = plan.missing(&options.mandatory_fields());
    if !missing.is_empty() {
        return Err(SchemaError::MissingFields {
            role,
            fields: missing,
        });
    }

    for field in Field::ALL {
        if !plan.canonical.contains_key(&field) {
            tracing::debug!(role = %role, field = %field, "optional field absent, filled with nulls");
        }
    }

    let mut columns: Vec<String> = Field::ALL.iter().map(|f| f.as_str().to_string()).collect();
    if options.strict_schema {
        if !plan.extras.is_empty() {
            tracing::debug!(
                role = %role,
                dropped = plan.extras.len(),
                "strict schema drops non-canonical columns"
            );
        }
    } else {
        columns.extend(plan.extras.iter().map(|(name, _)| name.clone()));
    }

    let records = table
        .rows
        .iter()
        .map(|row| {
            let mut record = Record::new();
            for (field, idx) in &plan.canonical {
                record.set_field(*field, row.get(*idx).cloned().flatten());
            }
            if !options.strict_schema {
                for (name, idx) in &plan.extras {
                    record.set(name.clone(), row.get(*idx).cloned().flatten());
                }
            }
            record
        })
        .collect();

    let set = RecordSet::with_records(columns, records);
    tracing::debug!(role = %role, rows = set.len(), columns = set.columns().len(), "reconciled");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn table(headers: &[&str], rows: &[&[Option<&str>]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| v.map(str::to_string)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_first_duplicate_wins() {
        let source = table(
            &["link", "Enlace"],
            &[&[Some("first"), Some("second")]],
        );
        let set = reconcile(&source, SourceRole::Batch, &DedupOptions::lenient(date())).unwrap();
        assert_eq!(set.records()[0].field(Field::Link), Some("first"));
    }

    #[test]
    fn test_missing_fields_sorted() {
        let source = table(&["nombre", "enlace"], &[&[Some("Ana"), Some("a/b")]]);
        let err = reconcile(&source, SourceRole::Blacklist, &DedupOptions::strict(date()))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingFields {
                role: SourceRole::Blacklist,
                fields: vec![
                    "company".to_string(),
                    "phone".to_string(),
                    "position".to_string(),
                ],
            }
        );
    }

    #[test]
    fn test_zero_rows_is_empty_canonical() {
        let source = table(&["whatever"], &[]);
        let set = reconcile(&source, SourceRole::History, &DedupOptions::strict(date())).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.columns(), RecordSet::canonical().columns());
    }
}
