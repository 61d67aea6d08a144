//! Output frame construction.

use polars::prelude::*;

use dedup_model::{Record, RecordSet};

use crate::columns::{OutputRule, RuleKind, output_rules};
use crate::context::OutputContext;
use crate::error::OutputError;

/// Project surviving records onto the output layout.
///
/// Returns one row per record in record order, with every
/// [`OUTPUT_COLUMNS`](crate::OUTPUT_COLUMNS) entry present as a string
/// column. Missing values are empty strings, never null.
pub fn format_output(
    records: &RecordSet,
    context: &OutputContext,
) -> Result<DataFrame, OutputError> {
    let _span = tracing::info_span!("format_output", rows = records.len()).entered();

    let rules = output_rules();
    let mut columns: Vec<Column> = Vec::with_capacity(rules.len());
    for rule in &rules {
        let series = execute_rule(records.records(), rule, context);
        columns.push(series.into_column());
    }

    let df = DataFrame::new(columns)?;
    tracing::debug!(rows = df.height(), columns = df.width(), "formatted output");
    Ok(df)
}

fn execute_rule(records: &[Record], rule: &OutputRule, context: &OutputContext) -> Series {
    let name = rule.column;
    let row_count = records.len();
    match rule.kind {
        RuleKind::CopyField(field) => {
            let values: Vec<&str> = records
                .iter()
                .map(|record| record.field(field).unwrap_or(""))
                .collect();
            Series::new(name.into(), values)
        }
        RuleKind::RecordType => {
            let values: Vec<&str> = records
                .iter()
                .map(|record| {
                    record
                        .get(dedup_model::RECORD_TYPE_COLUMN)
                        .unwrap_or(context.record_type.as_str())
                })
                .collect();
            Series::new(name.into(), values)
        }
        RuleKind::SequenceId => {
            let values: Vec<String> = (0..row_count).map(|idx| context.sequence_id(idx)).collect();
            Series::new(name.into(), values)
        }
        RuleKind::BatchLabel => {
            Series::new(name.into(), vec![context.batch_label.as_str(); row_count])
        }
        RuleKind::SearchDate => {
            let date = context.search_date();
            Series::new(name.into(), vec![date.as_str(); row_count])
        }
        RuleKind::Empty => Series::new(name.into(), vec![""; row_count]),
    }
}

/// Render a record set as a string frame with the set's own columns.
///
/// Nulls stay null so the intermediate file shows what normalization cleared.
pub fn record_set_to_frame(set: &RecordSet) -> Result<DataFrame, OutputError> {
    let columns: Vec<Column> = set
        .columns()
        .iter()
        .map(|name| {
            let values: Vec<Option<&str>> = set.column_values(name).collect();
            Series::new(name.as_str().into(), values).into_column()
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}
