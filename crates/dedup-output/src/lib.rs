//! Output generation.
//!
//! Projects the surviving batch onto the fixed column layout the dialing
//! platform imports, and writes tables as XLSX or CSV.

mod columns;
mod context;
mod error;
mod executor;
mod writer;

pub use columns::{OUTPUT_COLUMNS, OutputRule, RuleKind, output_rules};
pub use context::OutputContext;
pub use error::OutputError;
pub use executor::{format_output, record_set_to_frame};
pub use writer::{OutputFormat, write_table};
