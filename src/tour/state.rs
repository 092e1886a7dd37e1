//! Tour session state
//!
//! Tracks which flow is active, the current step within it, the steps the
//! user has advanced past, and checklist completion. Every query the UI needs
//! is answered here, so observers notified mid-command can read a consistent
//! view without touching the engine.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::flow::{ChecklistItem, Flow, Step};
use crate::config::TourConfig;

/// Mutable core of the engine plus the configuration it indexes into
#[derive(Debug, Clone)]
pub struct TourState {
    flows: Vec<Arc<Flow>>,
    help_indicators: Vec<String>,

    /// Index into `flows` of the active flow
    active_flow: Option<usize>,

    /// Zero-based; only meaningful while a flow is active
    current_step: usize,

    /// Steps advanced past in the current session
    completed_steps: HashSet<String>,

    /// Survives flow sessions; only `reset` clears it
    checklist_completion: HashMap<String, bool>,
}

impl TourState {
    /// Create an idle state over `config`
    pub fn new(config: TourConfig) -> Self {
        Self {
            flows: config.flows.into_iter().map(Arc::new).collect(),
            help_indicators: config.help_indicators,
            active_flow: None,
            current_step: 0,
            completed_steps: HashSet::new(),
            checklist_completion: HashMap::new(),
        }
    }

    pub(crate) fn find_flow(&self, flow_id: &str) -> Option<usize> {
        self.flows.iter().position(|f| f.id == flow_id)
    }

    pub(crate) fn flow_at(&self, index: usize) -> Arc<Flow> {
        Arc::clone(&self.flows[index])
    }

    pub(crate) fn active_flow_handle(&self) -> Option<Arc<Flow>> {
        self.active_flow.map(|i| self.flow_at(i))
    }

    /// Begin a new session at step 0, discarding any previous session's progress
    pub(crate) fn activate(&mut self, flow_index: usize) {
        self.active_flow = Some(flow_index);
        self.current_step = 0;
        self.completed_steps.clear();
    }

    /// End the session; completed steps are left for the next `activate`
    pub(crate) fn deactivate(&mut self) {
        self.active_flow = None;
        self.current_step = 0;
    }

    pub(crate) fn set_current_step(&mut self, index: usize) {
        self.current_step = index;
    }

    /// Mark a step as completed
    pub(crate) fn mark_step_completed(&mut self, step_id: &str) {
        self.completed_steps.insert(step_id.to_string());
    }

    pub(crate) fn mark_checklist_item(&mut self, item_id: &str) {
        self.checklist_completion.insert(item_id.to_string(), true);
    }

    /// Clear everything, including checklist completion
    pub(crate) fn clear(&mut self) {
        self.active_flow = None;
        self.current_step = 0;
        self.completed_steps.clear();
        self.checklist_completion.clear();
    }

    /// Get the active flow
    pub fn current_flow(&self) -> Option<&Flow> {
        self.active_flow.map(|i| self.flows[i].as_ref())
    }

    /// Id of the active flow
    pub fn active_flow_id(&self) -> Option<&str> {
        self.current_flow().map(|f| f.id.as_str())
    }

    /// Get the current step of the active flow
    pub fn current_step(&self) -> Option<&Step> {
        self.current_flow()
            .and_then(|flow| flow.step(self.current_step))
    }

    /// Get current step index
    pub fn current_step_index(&self) -> usize {
        self.current_step
    }

    /// Check if a flow is active
    pub fn is_flow_active(&self) -> bool {
        self.active_flow.is_some()
    }

    /// Snapshot of completed step ids (unordered)
    pub fn completed_steps(&self) -> Vec<String> {
        self.completed_steps.iter().cloned().collect()
    }

    /// Check if a step is completed
    pub fn is_step_completed(&self, step_id: &str) -> bool {
        self.completed_steps.contains(step_id)
    }

    /// Get number of completed steps
    pub fn completed_count(&self) -> usize {
        self.completed_steps.len()
    }

    /// Checklist of the active flow with live completion flags merged in.
    ///
    /// Empty when idle or when the active flow has no checklist.
    pub fn checklist(&self) -> Vec<ChecklistItem> {
        let Some(flow) = self.current_flow() else {
            return Vec::new();
        };

        flow.checklist_items()
            .iter()
            .map(|item| ChecklistItem {
                completed: self.is_checklist_item_completed(&item.id),
                ..item.clone()
            })
            .collect()
    }

    /// Raw completion flag, independent of the active flow
    pub fn is_checklist_item_completed(&self, item_id: &str) -> bool {
        self.checklist_completion
            .get(item_id)
            .copied()
            .unwrap_or(false)
    }

    /// Get total number of steps in the active flow (0 when idle)
    pub fn total_steps(&self) -> usize {
        self.current_flow().map_or(0, Flow::step_count)
    }

    /// Help indicator targets from configuration
    pub fn help_indicators(&self) -> &[String] {
        &self.help_indicators
    }

    /// All configured flows
    pub fn flows(&self) -> impl Iterator<Item = &Flow> {
        self.flows.iter().map(|f| f.as_ref())
    }
}
