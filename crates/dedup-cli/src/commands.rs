use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::{Cell, CellAlignment, Table};
use tracing::{info, info_span};

use dedup_cli::pipeline::{
    OptionOverrides, OutputTargets, SourcePaths, WrittenOutputs, default_output_path,
    load_sources, resolve_options, write_outputs,
};
use dedup_core::{RecordingObserver, RunObserver, StageEvent, TracingObserver, run};
use dedup_map::AliasTable;
use dedup_model::{Field, FieldKind};
use dedup_output::{RuleKind, output_rules};

use crate::cli::RunArgs;
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell};
use crate::types::RunResult;

/// Logs each stage and keeps it for the summary.
#[derive(Default)]
struct CliObserver {
    tracing: TracingObserver,
    recording: RecordingObserver,
}

impl RunObserver for CliObserver {
    fn on_stage(&mut self, event: &StageEvent) {
        self.tracing.on_stage(event);
        self.recording.on_stage(event);
    }
}

pub fn run_fields() -> Result<()> {
    let aliases = AliasTable::default();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Accepted headers"),
    ]);
    apply_table_style(&mut table);
    for field in Field::ALL {
        let kind = match field.kind() {
            FieldKind::Text => "text",
            FieldKind::Phone => "phone",
        };
        let mut accepted = vec![field.as_str()];
        accepted.extend(aliases.aliases_for(field));
        table.add_row(vec![
            header_cell(field.as_str()),
            Cell::new(kind),
            Cell::new(accepted.join(", ")),
        ]);
    }
    println!("{table}");

    let mut columns = Table::new();
    columns.set_header(vec![
        header_cell("#"),
        header_cell("Output column"),
        header_cell("Filled from"),
    ]);
    apply_table_style(&mut columns);
    align_column(&mut columns, 0, CellAlignment::Right);
    for (index, rule) in output_rules().into_iter().enumerate() {
        let source = match rule.kind {
            RuleKind::CopyField(field) => Cell::new(field.as_str()),
            RuleKind::RecordType => Cell::new("record type"),
            RuleKind::SequenceId => Cell::new("run date + row number"),
            RuleKind::BatchLabel => Cell::new("batch label"),
            RuleKind::SearchDate => Cell::new("run date (DD/MM/YYYY)"),
            RuleKind::Empty => dim_cell("-"),
        };
        columns.add_row(vec![
            Cell::new(index + 1),
            Cell::new(rule.column),
            source,
        ]);
    }
    println!("{columns}");
    Ok(())
}

pub fn run_dedup(args: &RunArgs) -> Result<RunResult> {
    let overrides = OptionOverrides {
        config: args.config.clone(),
        strict: args.strict,
        lenient: args.lenient,
        key_fields: args.key_fields.clone(),
        run_date: args.run_date.clone(),
    };
    let options = resolve_options(&overrides, Local::now().date_naive())?;
    let run_span = info_span!("dedup", run_date = %options.run_date);
    let _run_guard = run_span.enter();

    let paths = SourcePaths {
        batch: args.batch.clone(),
        blacklist: args.blacklist.clone(),
        history: args.history.clone(),
    };
    let sources = load_sources(&paths)?;

    let mut observer = CliObserver::default();
    let outcome = run(sources.inputs(), &options, &mut observer).context("dedup run failed")?;

    let written = if args.dry_run {
        info!("dry run, skipping writes");
        WrittenOutputs::default()
    } else {
        let targets = OutputTargets {
            output: Some(
                args.output
                    .clone()
                    .unwrap_or_else(|| default_output_path(&args.batch)),
            ),
            intermediate: args.intermediate.clone(),
            metrics_json: args.metrics_json.clone(),
        };
        write_outputs(&outcome, options.run_date, &targets)?
    };

    Ok(RunResult {
        options,
        sources,
        outcome,
        stages: observer.recording.events,
        written,
        dry_run: args.dry_run,
        preview: args.preview,
    })
}
