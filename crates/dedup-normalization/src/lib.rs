//! Contact field normalization.
//!
//! Every comparison in the exclusion stages runs on normalized values. This
//! crate owns the only way to build a [`NormalizedSet`], so a set that has
//! not been through [`normalize_record_set`] cannot reach a filter.
//!
//! - Text fields: trimmed, lowercased, whitespace runs collapsed; `nan`,
//!   `none`, `nat` and empty strings become null
//! - Phone fields: ASCII digits only; no digits means null

mod set;
mod value;

pub use set::{NormalizedSet, normalize_record_set};
pub use value::{normalize_phone, normalize_text, normalize_value};
