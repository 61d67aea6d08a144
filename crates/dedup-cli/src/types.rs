use dedup_cli::pipeline::{LoadedSources, WrittenOutputs};
use dedup_core::{RunOutcome, StageEvent};
use dedup_model::DedupOptions;

/// Everything `dedup run` reports after a successful run.
#[derive(Debug)]
pub struct RunResult {
    pub options: DedupOptions,
    pub sources: LoadedSources,
    pub outcome: RunOutcome,
    pub stages: Vec<StageEvent>,
    pub written: WrittenOutputs,
    pub dry_run: bool,
    /// Rows per preview table.
    pub preview: usize,
}
