//! Schema reconciliation.
//!
//! Maps the header row of a [`RawTable`](dedup_ingest::RawTable) onto the
//! canonical contact fields, resolving legacy Spanish column names through an
//! [`AliasTable`], and produces a fully shaped
//! [`RecordSet`](dedup_model::RecordSet).

mod aliases;
mod reconcile;

pub use aliases::{AliasTable, DEFAULT_ALIASES};
pub use reconcile::reconcile;
