use crate::tour::{ChecklistItem, Step, TourState};

/// UI-facing mirror of the engine state, updated by the controller's observers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TourView {
    pub is_active: bool,
    pub current_step: Option<Step>,
    pub step_index: usize,
    pub checklist: Vec<ChecklistItem>,
}

impl TourView {
    /// Take a full snapshot of `state`
    pub fn snapshot(state: &TourState) -> Self {
        Self {
            is_active: state.is_flow_active(),
            current_step: state.current_step().cloned(),
            step_index: state.current_step_index(),
            checklist: state.checklist(),
        }
    }

    /// Refresh the step position only
    pub fn refresh_step(&mut self, state: &TourState) {
        self.current_step = state.current_step().cloned();
        self.step_index = state.current_step_index();
    }

    /// The session ended (completed or skipped)
    pub fn close(&mut self) {
        self.is_active = false;
        self.current_step = None;
        self.checklist.clear();
    }

    /// Checklist progress as (completed, total)
    pub fn checklist_progress(&self) -> (usize, usize) {
        let done = self.checklist.iter().filter(|i| i.completed).count();
        (done, self.checklist.len())
    }

    /// Check if every checklist item is done (false for an empty checklist)
    pub fn checklist_done(&self) -> bool {
        let (done, total) = self.checklist_progress();
        total > 0 && done == total
    }
}
