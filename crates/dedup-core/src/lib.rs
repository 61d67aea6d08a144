//! Dedup run orchestration.
//!
//! [`run`] takes the three raw tables and the run options and returns every
//! intermediate set along with the output frame and metrics:
//!
//! 1. reconcile each table onto the canonical fields
//! 2. normalize them and stamp the record type on the batch
//! 3. blacklist exclusion, then history exclusion
//! 4. project the survivors onto the output layout
//!
//! A [`RunObserver`] receives one [`StageEvent`] per stage.

mod error;
mod observer;
mod pipeline;

pub use error::DedupError;
pub use observer::{RecordingObserver, RunObserver, StageEvent, TracingObserver};
pub use pipeline::{RunInputs, RunOutcome, run};
