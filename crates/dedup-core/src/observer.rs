//! Stage observability.

use dedup_model::{Stage, StageCounts};

/// Record counts around one pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageEvent {
    pub stage: Stage,
    pub before: usize,
    pub after: usize,
}

impl StageEvent {
    pub fn new(stage: Stage, counts: StageCounts) -> Self {
        Self {
            stage,
            before: counts.before,
            after: counts.after,
        }
    }

    pub fn removed(&self) -> usize {
        self.before.saturating_sub(self.after)
    }
}

/// Receives stage events as a run progresses.
pub trait RunObserver {
    fn on_stage(&mut self, event: &StageEvent);
}

/// Logs every stage event at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn on_stage(&mut self, event: &StageEvent) {
        tracing::info!(
            stage = %event.stage,
            before = event.before,
            after = event.after,
            removed = event.removed(),
            "stage complete"
        );
    }
}

/// Keeps every event, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<StageEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The event for `stage`, if it was emitted.
    pub fn event(&self, stage: Stage) -> Option<&StageEvent> {
        self.events.iter().find(|event| event.stage == stage)
    }
}

impl RunObserver for RecordingObserver {
    fn on_stage(&mut self, event: &StageEvent) {
        self.events.push(*event);
    }
}
