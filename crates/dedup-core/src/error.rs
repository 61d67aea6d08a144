use thiserror::Error;

use dedup_model::{ConfigError, SchemaError};
use dedup_output::OutputError;

/// Why a dedup run stopped.
#[derive(Debug, Error)]
pub enum DedupError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("output formatting failed")]
    Output(#[from] OutputError),
}
