//! Exclusion stages.
//!
//! Two filters run in sequence over the normalized batch:
//!
//! 1. [`exclude_exact`]: drop records equal to a blacklist record on every
//!    key field (anti-join on the key tuple)
//! 2. [`exclude_any_field`]: drop records sharing any single key value with
//!    the history list
//!
//! Both only remove records; survivors keep their order and values. A null
//! key value never matches anything, including another null.

mod stage;

pub use stage::{StageOutcome, apply_strategy, exclude_any_field, exclude_exact};
