//! Contact dedup data model.
//!
//! Types shared by every stage of the dedup pipeline:
//!
//! - [`Field`]: the canonical field set every source is reconciled onto
//! - [`Record`] / [`RecordSet`]: ordered, uniformly shaped contact tables
//! - [`DedupOptions`] / [`DedupConfig`]: per-run configuration
//! - [`StageCounts`] / [`RunMetrics`]: before/after counts per filter stage
//! - [`SchemaError`] / [`ConfigError`]: model-level failures

pub mod config;
pub mod error;
pub mod field;
pub mod metrics;
pub mod options;
pub mod record;

pub use config::{DedupConfig, MatchingSection, OutputSection, SchemaSection};
pub use error::{ConfigError, SchemaError};
pub use field::{Field, FieldKind, RECORD_TYPE_COLUMN, SourceRole};
pub use metrics::{RunMetrics, Stage, StageCounts};
pub use options::{
    DEFAULT_BATCH_LABEL_PREFIX, DEFAULT_RECORD_TYPE, DedupOptions, MatchStrategy,
    default_key_fields, parse_run_date,
};
pub use record::{Record, RecordSet};
