//! In-flight answer coordination.
//!
//! One slot per logical answer region (page summary, current answer).
//! A slot holds at most one pending request; a second start is rejected,
//! not queued. Completions carry the generation stamp taken at start so
//! stale callbacks from superseded requests are discarded.

use harv_common::{HarvError, SlotKind};
use tracing::debug;

/// Lifecycle of one answer slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnswerSlot {
    #[default]
    Idle,
    Pending,
    Filled(String),
}

pub type Generation = u64;

#[derive(Debug, Default)]
struct SlotState {
    slot: AnswerSlot,
    generation: Generation,
}

#[derive(Debug, Default)]
pub struct TaskCoordinator {
    summary: SlotState,
    question: SlotState,
}

impl TaskCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self, kind: SlotKind) -> &SlotState {
        match kind {
            SlotKind::Summary => &self.summary,
            SlotKind::QuestionAnswer => &self.question,
        }
    }

    fn state_mut(&mut self, kind: SlotKind) -> &mut SlotState {
        match kind {
            SlotKind::Summary => &mut self.summary,
            SlotKind::QuestionAnswer => &mut self.question,
        }
    }

    /// Begin a request on a slot. Rejected while one is already pending.
    pub fn start(&mut self, kind: SlotKind) -> Result<Generation, HarvError> {
        let state = self.state_mut(kind);
        if state.slot == AnswerSlot::Pending {
            return Err(HarvError::SlotBusy(kind));
        }
        state.generation += 1;
        state.slot = AnswerSlot::Pending;
        debug!(slot = %kind, generation = state.generation, "slot started");
        Ok(state.generation)
    }

    /// Fill a pending slot. Returns false for stale or non-pending
    /// completions, which are ignored.
    pub fn complete(&mut self, kind: SlotKind, generation: Generation, content: String) -> bool {
        let state = self.state_mut(kind);
        if state.slot != AnswerSlot::Pending || state.generation != generation {
            debug!(slot = %kind, generation, current = state.generation, "stale completion discarded");
            return false;
        }
        state.slot = AnswerSlot::Filled(content);
        true
    }

    /// Reset a pending slot to idle. No error content is retained.
    /// Returns false for stale or non-pending failures.
    pub fn fail(&mut self, kind: SlotKind, generation: Generation) -> bool {
        let state = self.state_mut(kind);
        if state.slot != AnswerSlot::Pending || state.generation != generation {
            debug!(slot = %kind, generation, current = state.generation, "stale failure discarded");
            return false;
        }
        state.slot = AnswerSlot::Idle;
        true
    }

    /// Seed a slot with content restored from a prior session.
    /// Only applies when the slot is idle.
    pub fn restore(&mut self, kind: SlotKind, content: String) {
        let state = self.state_mut(kind);
        if state.slot == AnswerSlot::Idle {
            state.slot = AnswerSlot::Filled(content);
        }
    }

    pub fn is_pending(&self, kind: SlotKind) -> bool {
        self.state(kind).slot == AnswerSlot::Pending
    }

    pub fn content(&self, kind: SlotKind) -> Option<&str> {
        match &self.state(kind).slot {
            AnswerSlot::Filled(content) => Some(content),
            _ => None,
        }
    }
}
