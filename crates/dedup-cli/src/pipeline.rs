//! File-level steps around a dedup run: loading sources, resolving
//! options, and writing the results.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, trace};

use dedup_core::{RunInputs, RunOutcome};
use dedup_ingest::{RawTable, read_table};
use dedup_model::{DedupConfig, DedupOptions, Field, MatchingSection, RunMetrics, SourceRole};
use dedup_output::{record_set_to_frame, write_table};

use crate::logging::redact_value;

/// File written next to the batch when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "contactos_reparto_final.xlsx";

/// Locations of the three source tables.
#[derive(Debug, Clone)]
pub struct SourcePaths {
    pub batch: PathBuf,
    pub blacklist: PathBuf,
    pub history: PathBuf,
}

impl SourcePaths {
    pub fn path(&self, role: SourceRole) -> &Path {
        match role {
            SourceRole::Batch => &self.batch,
            SourceRole::Blacklist => &self.blacklist,
            SourceRole::History => &self.history,
        }
    }
}

/// The three source tables, as read.
#[derive(Debug, Clone, Default)]
pub struct LoadedSources {
    pub batch: RawTable,
    pub blacklist: RawTable,
    pub history: RawTable,
}

impl LoadedSources {
    pub fn table(&self, role: SourceRole) -> &RawTable {
        match role {
            SourceRole::Batch => &self.batch,
            SourceRole::Blacklist => &self.blacklist,
            SourceRole::History => &self.history,
        }
    }

    pub fn inputs(&self) -> RunInputs<'_> {
        RunInputs {
            batch: &self.batch,
            blacklist: &self.blacklist,
            history: &self.history,
        }
    }
}

/// Read all three sources. The first failure stops the load.
pub fn load_sources(paths: &SourcePaths) -> Result<LoadedSources> {
    let mut sources = LoadedSources::default();
    for role in SourceRole::ALL {
        let path = paths.path(role);
        let table = read_table(path)
            .with_context(|| format!("read {} ({})", role.display_name(), path.display()))?;
        debug!(
            role = %role,
            path = %path.display(),
            rows = table.len(),
            columns = table.headers.len(),
            "source loaded"
        );
        log_first_row(role, &table);
        match role {
            SourceRole::Batch => sources.batch = table,
            SourceRole::Blacklist => sources.blacklist = table,
            SourceRole::History => sources.history = table,
        }
    }
    Ok(sources)
}

fn log_first_row(role: SourceRole, table: &RawTable) {
    let Some(row) = table.rows.first() else {
        return;
    };
    for (header, value) in table.headers.iter().zip(row) {
        trace!(
            role = %role,
            column = %header,
            value = redact_value(value.as_deref().unwrap_or_default()),
            "first row"
        );
    }
}

/// Option values given on the command line. Unset values fall back to the
/// config file, then to the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub config: Option<PathBuf>,
    pub strict: bool,
    pub lenient: bool,
    pub key_fields: Vec<Field>,
    pub run_date: Option<String>,
}

impl OptionOverrides {
    fn as_config(&self) -> DedupConfig {
        let mut config = DedupConfig::default();
        if self.strict {
            config.schema.strict = Some(true);
        } else if self.lenient {
            config.schema.strict = Some(false);
        }
        if !self.key_fields.is_empty() {
            config.matching = MatchingSection {
                key_fields: Some(self.key_fields.clone()),
                ..MatchingSection::default()
            };
        }
        config.output.run_date = self.run_date.clone();
        config
    }
}

/// Layer the overrides on the config file (if any) and resolve run options.
pub fn resolve_options(
    overrides: &OptionOverrides,
    today: NaiveDate,
) -> Result<DedupOptions> {
    let base = match &overrides.config {
        Some(path) => DedupConfig::load(path)?,
        None => DedupConfig::default(),
    };
    let options = base
        .merge(overrides.as_config())
        .resolve(today)
        .context("resolve run options")?;
    debug!(
        strict = options.strict_schema,
        key_fields = ?options.key_fields,
        run_date = %options.run_date,
        "options resolved"
    );
    Ok(options)
}

/// `contactos_reparto_final.xlsx` in the batch file's directory.
pub fn default_output_path(batch: &Path) -> PathBuf {
    batch
        .parent()
        .map(|dir| dir.join(DEFAULT_OUTPUT_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
}

/// Where each result of a run goes. `None` skips that file.
#[derive(Debug, Clone, Default)]
pub struct OutputTargets {
    pub output: Option<PathBuf>,
    pub intermediate: Option<PathBuf>,
    pub metrics_json: Option<PathBuf>,
}

/// Files actually written, in the same shape as [`OutputTargets`].
#[derive(Debug, Clone, Default)]
pub struct WrittenOutputs {
    pub output: Option<PathBuf>,
    pub intermediate: Option<PathBuf>,
    pub metrics_json: Option<PathBuf>,
}

/// Metrics file contents.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// `YYYY-MM-DD`
    pub run_date: String,
    #[serde(flatten)]
    pub metrics: RunMetrics,
}

impl MetricsReport {
    pub fn new(run_date: NaiveDate, metrics: RunMetrics) -> Self {
        Self {
            run_date: run_date.format("%Y-%m-%d").to_string(),
            metrics,
        }
    }
}

pub fn write_outputs(
    outcome: &RunOutcome,
    run_date: NaiveDate,
    targets: &OutputTargets,
) -> Result<WrittenOutputs> {
    let mut written = WrittenOutputs::default();
    if let Some(path) = &targets.intermediate {
        let frame = record_set_to_frame(outcome.after_blacklist.as_record_set())
            .context("build intermediate table")?;
        write_table(&frame, path)
            .with_context(|| format!("write intermediate table {}", path.display()))?;
        written.intermediate = Some(path.clone());
    }
    if let Some(path) = &targets.output {
        write_table(&outcome.output, path)
            .with_context(|| format!("write output {}", path.display()))?;
        written.output = Some(path.clone());
    }
    if let Some(path) = &targets.metrics_json {
        write_metrics_json(&MetricsReport::new(run_date, outcome.metrics), path)?;
        written.metrics_json = Some(path.clone());
    }
    Ok(written)
}

/// Write the metrics report as pretty-printed JSON.
pub fn write_metrics_json(report: &MetricsReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("serialize metrics")?;
    fs::write(path, json).with_context(|| format!("write metrics {}", path.display()))?;
    info!(path = %path.display(), "metrics written");
    Ok(())
}
