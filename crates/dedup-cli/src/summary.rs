use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dedup_ingest::RawTable;
use dedup_model::{RecordSet, SourceRole};

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!(
        "Run date: {}  Batch label: {}",
        result.options.run_date.format("%Y-%m-%d"),
        result.options.batch_label()
    );
    println!(
        "Schema: {}  Key fields: {}",
        if result.options.strict_schema {
            "strict"
        } else {
            "lenient"
        },
        result
            .options
            .key_fields
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    if result.preview > 0 {
        for role in SourceRole::ALL {
            print_source_preview(role, result.sources.table(role), result.preview);
        }
    }

    print_stage_table(result);
    print_metrics_table(result);

    if result.preview > 0 && !result.outcome.final_records.is_empty() {
        println!();
        println!(
            "Contactos finales ({} filas, primeras {}):",
            result.outcome.final_records.len(),
            result.preview.min(result.outcome.final_records.len())
        );
        println!(
            "{}",
            record_preview(result.outcome.final_records.as_record_set(), result.preview)
        );
    }

    println!();
    if result.dry_run {
        println!("Dry run: no files written.");
        return;
    }
    print_written("Output", result.written.output.as_deref());
    print_written("Intermediate", result.written.intermediate.as_deref());
    print_written("Metrics", result.written.metrics_json.as_deref());
}

fn print_written(label: &str, path: Option<&Path>) {
    if let Some(path) = path {
        println!("{label}: {}", path.display());
    }
}

fn print_source_preview(role: SourceRole, table: &RawTable, rows: usize) {
    println!();
    println!("{} ({} filas):", role.display_name(), table.len());
    if table.headers.is_empty() {
        println!("  (empty)");
        return;
    }
    let mut preview = Table::new();
    preview.set_header(table.headers.iter().map(|h| header_cell(h)).collect::<Vec<_>>());
    apply_table_style(&mut preview);
    for row in table.head(rows) {
        preview.add_row(row.iter().map(|value| value_cell(value.as_deref())).collect::<Vec<_>>());
    }
    println!("{preview}");
}

fn record_preview(set: &RecordSet, rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(set.columns().iter().map(|c| header_cell(c)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for record in set.records().iter().take(rows) {
        table.add_row(
            set.columns()
                .iter()
                .map(|column| value_cell(record.get(column)))
                .collect::<Vec<_>>(),
        );
    }
    table
}

fn print_stage_table(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Before"),
        header_cell("After"),
        header_cell("Removed"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for event in &result.stages {
        table.add_row(vec![
            Cell::new(event.stage).fg(Color::Blue),
            Cell::new(event.before),
            Cell::new(event.after),
            count_cell(event.removed(), Color::Yellow),
        ]);
    }
    println!();
    println!("{table}");
}

fn print_metrics_table(result: &RunResult) {
    let metrics = &result.outcome.metrics;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Métrica"), header_cell("Filas")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Filas iniciales"), Cell::new(metrics.initial)]);
    table.add_row(vec![
        Cell::new("Eliminadas por Lista negra"),
        count_cell(metrics.removed_by_blacklist, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Eliminadas por Deduplicador"),
        count_cell(metrics.removed_by_history, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Filas finales")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(metrics.final_count)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn value_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
