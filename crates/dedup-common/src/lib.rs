//! Shared utilities for the contact dedup crates.
//!
//! Cell values arrive from polars frames and spreadsheet readers in several
//! typed shapes; everything downstream of ingestion works on text, so the
//! helpers here render those shapes consistently.

pub mod values;

pub use values::{any_to_string, any_to_text, format_numeric};
