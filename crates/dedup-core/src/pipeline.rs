//! The dedup run.

use polars::prelude::DataFrame;

use dedup_exclusion::apply_strategy;
use dedup_ingest::RawTable;
use dedup_map::reconcile;
use dedup_model::{
    DedupOptions, RECORD_TYPE_COLUMN, RunMetrics, SourceRole, Stage, StageCounts,
};
use dedup_normalization::{NormalizedSet, normalize_record_set};
use dedup_output::{OutputContext, format_output};

use crate::error::DedupError;
use crate::observer::{RunObserver, StageEvent};

/// The three source tables of a run, borrowed read-only.
#[derive(Debug, Clone, Copy)]
pub struct RunInputs<'a> {
    pub batch: &'a RawTable,
    pub blacklist: &'a RawTable,
    pub history: &'a RawTable,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Normalized batch, record type stamped, before any exclusion.
    pub batch: NormalizedSet,
    /// Batch after the blacklist stage.
    pub after_blacklist: NormalizedSet,
    /// Batch after both stages.
    pub final_records: NormalizedSet,
    /// Output frame for the dialer import.
    pub output: DataFrame,
    pub metrics: RunMetrics,
}

/// Run the full dedup pipeline.
///
/// Schema problems in any of the three sources abort before filtering.
/// Exclusion never fails; only reconciliation and output formatting can.
pub fn run(
    inputs: RunInputs<'_>,
    options: &DedupOptions,
    observer: &mut dyn RunObserver,
) -> Result<RunOutcome, DedupError> {
    options.validate()?;
    let _span = tracing::info_span!(
        "dedup_run",
        run_date = %options.run_date,
        strict = options.strict_schema,
    )
    .entered();

    let batch = reconcile(inputs.batch, SourceRole::Batch, options)?;
    let blacklist = reconcile(inputs.blacklist, SourceRole::Blacklist, options)?;
    let history = reconcile(inputs.history, SourceRole::History, options)?;
    observer.on_stage(&StageEvent::new(
        Stage::Reconcile,
        StageCounts::new(inputs.batch.len(), batch.len()),
    ));

    let batch = normalize_record_set(&batch).with_constant(RECORD_TYPE_COLUMN, &options.record_type);
    let blacklist = normalize_record_set(&blacklist);
    let history = normalize_record_set(&history);
    observer.on_stage(&StageEvent::new(
        Stage::Normalize,
        StageCounts::new(batch.len(), batch.len()),
    ));

    let stage_a = {
        let _span = tracing::info_span!("blacklist", strategy = %options.blacklist_strategy).entered();
        apply_strategy(options.blacklist_strategy, &batch, &blacklist, &options.key_fields)
    };
    observer.on_stage(&StageEvent::new(Stage::Blacklist, stage_a.counts));

    let stage_b = {
        let _span = tracing::info_span!("history", strategy = %options.history_strategy).entered();
        apply_strategy(
            options.history_strategy,
            &stage_a.records,
            &history,
            &options.key_fields,
        )
    };
    observer.on_stage(&StageEvent::new(Stage::History, stage_b.counts));

    let context = OutputContext::from_options(options);
    let output = format_output(stage_b.records.as_record_set(), &context)?;
    observer.on_stage(&StageEvent::new(
        Stage::Format,
        StageCounts::new(stage_b.records.len(), output.height()),
    ));

    let metrics = RunMetrics::from_stages(stage_a.counts, stage_b.counts);
    tracing::info!(
        initial = metrics.initial,
        removed_by_blacklist = metrics.removed_by_blacklist,
        removed_by_history = metrics.removed_by_history,
        final_count = metrics.final_count,
        "dedup run finished"
    );

    Ok(RunOutcome {
        batch,
        after_blacklist: stage_a.records,
        final_records: stage_b.records,
        output,
        metrics,
    })
}
