//! Stage counts and run metrics.

use std::fmt;

use serde::Serialize;

/// A named step of the dedup run, used for observability events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Reconcile,
    Normalize,
    /// Stage A: blacklist exclusion.
    Blacklist,
    /// Stage B: historical exclusion.
    History,
    Format,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reconcile => write!(f, "reconcile"),
            Self::Normalize => write!(f, "normalize"),
            Self::Blacklist => write!(f, "blacklist"),
            Self::History => write!(f, "history"),
            Self::Format => write!(f, "format"),
        }
    }
}

/// Record counts before and after a stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    pub before: usize,
    pub after: usize,
}

impl StageCounts {
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    /// Records the stage removed.
    pub fn removed(&self) -> usize {
        self.before.saturating_sub(self.after)
    }
}

/// Row counts reported to the operator after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunMetrics {
    /// Batch rows entering the filters.
    pub initial: usize,
    pub removed_by_blacklist: usize,
    pub removed_by_history: usize,
    /// Rows written to the output.
    pub final_count: usize,
}

impl RunMetrics {
    /// Combine the two filter stages into run-level metrics.
    pub fn from_stages(blacklist: StageCounts, history: StageCounts) -> Self {
        Self {
            initial: blacklist.before,
            removed_by_blacklist: blacklist.removed(),
            removed_by_history: history.removed(),
            final_count: history.after,
        }
    }
}
