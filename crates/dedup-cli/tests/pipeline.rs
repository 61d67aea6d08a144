//! End-to-end runs over files on disk.

use std::fs;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;
use serde_json::json;
use tempfile::TempDir;

use dedup_cli::pipeline::{
    OptionOverrides, OutputTargets, SourcePaths, load_sources, resolve_options, write_outputs,
};
use dedup_core::{TracingObserver, run};
use dedup_model::{Field, MatchStrategy, RunMetrics};
use dedup_output::OUTPUT_COLUMNS;

const LEGACY_HEADERS: [&str; 5] = ["enlace", "nombre", "empresa", "puesto", "telefono"];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
}

fn write_batch(path: &Path) {
    let rows = [
        LEGACY_HEADERS,
        ["in/ana", "Ana Ruiz", "Acme", "CTO", "600111222"],
        ["in/bob", "Bob", "Beta", "Dev", "600333444"],
        ["in/eva", "Eva", "Gamma", "CEO", "600555666"],
    ];
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            worksheet.write_string(r as u32, c as u16, *value).unwrap();
        }
    }
    workbook.save(path).unwrap();
}

fn fixture(dir: &TempDir) -> SourcePaths {
    let paths = SourcePaths {
        batch: dir.path().join("reparto.xlsx"),
        blacklist: dir.path().join("lista_negra.csv"),
        history: dir.path().join("deduplicador.csv"),
    };
    write_batch(&paths.batch);
    fs::write(
        &paths.blacklist,
        "enlace,nombre,empresa,puesto,telefono\nIN/ANA,ana  ruiz,ACME,cto,600-111-222\n",
    )
    .unwrap();
    fs::write(
        &paths.history,
        "link,full_name,company,position,phone\nin/zzz,Zed,Zeta,Ops,600 333 444\n",
    )
    .unwrap();
    paths
}

fn strict_overrides() -> OptionOverrides {
    OptionOverrides {
        run_date: Some("2024-05-01".to_string()),
        ..OptionOverrides::default()
    }
}

fn cell(value: &Data) -> String {
    match value {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

#[test]
fn run_writes_output_intermediate_and_metrics() {
    let dir = TempDir::new().unwrap();
    let paths = fixture(&dir);
    let options = resolve_options(&strict_overrides(), today()).unwrap();
    let sources = load_sources(&paths).unwrap();

    let outcome = run(sources.inputs(), &options, &mut TracingObserver).unwrap();
    assert_eq!(
        outcome.metrics,
        RunMetrics {
            initial: 3,
            removed_by_blacklist: 1,
            removed_by_history: 1,
            final_count: 1,
        }
    );

    let targets = OutputTargets {
        output: Some(dir.path().join("out").join("final.xlsx")),
        intermediate: Some(dir.path().join("out").join("deduplicado.csv")),
        metrics_json: Some(dir.path().join("out").join("metrics.json")),
    };
    let written = write_outputs(&outcome, options.run_date, &targets).unwrap();
    assert_eq!(written.output, targets.output);

    let mut workbook = open_workbook_auto(dir.path().join("out").join("final.xlsx")).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell).collect())
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].len(), OUTPUT_COLUMNS.len());
    let idx = |name: &str| OUTPUT_COLUMNS.iter().position(|c| *c == name).unwrap();
    assert_eq!(rows[1][idx("ENLACE LINKEDIN")], "in/eva");
    assert_eq!(rows[1][idx("Numero")], "600555666");
    assert_eq!(rows[1][idx("NUMERO DATO")], "010520240001");
    assert_eq!(rows[1][idx("Base de Datos")], "SALA_2024-05-01");

    let intermediate = fs::read_to_string(dir.path().join("out").join("deduplicado.csv")).unwrap();
    let lines: Vec<&str> = intermediate.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("link,full_name,company,position,phone"));
    assert!(lines[1].starts_with("in/bob,"));

    let metrics: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out").join("metrics.json")).unwrap())
            .unwrap();
    assert_eq!(
        metrics,
        json!({
            "run_date": "2024-05-01",
            "initial": 3,
            "removed_by_blacklist": 1,
            "removed_by_history": 1,
            "final_count": 1,
        })
    );
}

#[test]
fn skipped_targets_write_nothing() {
    let dir = TempDir::new().unwrap();
    let paths = fixture(&dir);
    let options = resolve_options(&strict_overrides(), today()).unwrap();
    let sources = load_sources(&paths).unwrap();
    let outcome = run(sources.inputs(), &options, &mut TracingObserver).unwrap();

    let written = write_outputs(&outcome, options.run_date, &OutputTargets::default()).unwrap();

    assert!(written.output.is_none());
    assert!(written.intermediate.is_none());
    assert!(written.metrics_json.is_none());
    let mut entries: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, vec!["deduplicador.csv", "lista_negra.csv", "reparto.xlsx"]);
}

#[test]
fn missing_source_names_its_role() {
    let dir = TempDir::new().unwrap();
    let mut paths = fixture(&dir);
    paths.blacklist = dir.path().join("no_such_file.csv");

    let error = load_sources(&paths).unwrap_err();

    let message = format!("{error:#}");
    assert!(message.contains("Lista negra"), "{message}");
    assert!(message.contains("no_such_file.csv"), "{message}");
}

#[test]
fn flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("dedup.toml");
    fs::write(
        &config,
        r#"
[schema]
strict = true

[matching]
key_fields = ["link", "company"]
history = "all_fields"

[output]
run_date = "2023-12-24"
"#,
    )
    .unwrap();

    let from_file = resolve_options(
        &OptionOverrides {
            config: Some(config.clone()),
            ..OptionOverrides::default()
        },
        today(),
    )
    .unwrap();
    assert!(from_file.strict_schema);
    assert_eq!(from_file.run_date, NaiveDate::from_ymd_opt(2023, 12, 24).unwrap());
    assert_eq!(from_file.history_strategy, MatchStrategy::AllFields);
    assert_eq!(from_file.key_fields.len(), 2);

    let overridden = resolve_options(
        &OptionOverrides {
            config: Some(config),
            strict: false,
            lenient: true,
            key_fields: vec![Field::Phone],
            run_date: Some("2024-05-01".to_string()),
        },
        today(),
    )
    .unwrap();
    assert!(!overridden.strict_schema);
    assert_eq!(overridden.key_fields.iter().copied().collect::<Vec<_>>(), vec![Field::Phone]);
    assert_eq!(overridden.run_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    assert_eq!(overridden.history_strategy, MatchStrategy::AllFields);
}

#[test]
fn bad_run_date_is_rejected() {
    let overrides = OptionOverrides {
        run_date: Some("01/05/2024".to_string()),
        ..OptionOverrides::default()
    };
    let error = resolve_options(&overrides, today()).unwrap_err();
    assert!(format!("{error:#}").contains("01/05/2024"));
}

#[test]
fn run_date_defaults_to_today() {
    let options = resolve_options(&OptionOverrides::default(), today()).unwrap();
    assert_eq!(options.run_date, today());
    assert!(options.strict_schema);
}

#[test]
fn strict_flag_overrides_lenient_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("dedup.toml");
    fs::write(&config, "[schema]\nstrict = false\n").unwrap();

    let from_file = resolve_options(
        &OptionOverrides {
            config: Some(config.clone()),
            ..OptionOverrides::default()
        },
        today(),
    )
    .unwrap();
    assert!(!from_file.strict_schema);

    let overridden = resolve_options(
        &OptionOverrides {
            config: Some(config),
            strict: true,
            ..OptionOverrides::default()
        },
        today(),
    )
    .unwrap();
    assert!(overridden.strict_schema);
    assert_eq!(overridden.key_fields.len(), Field::ALL.len());
}
