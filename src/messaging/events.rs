/// Tour event types
///
/// Events represent things that have happened (past tense).
/// They are delivered to every observer registered for their kind.
use std::sync::Arc;
use std::time::Instant;

use crate::tour::{ChecklistItem, Flow, Step};

/// Event kinds, used as subscription keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    FlowStarted,
    FlowCompleted,
    FlowSkipped,
    StepChanged,
    ChecklistUpdated,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::FlowStarted,
        EventKind::FlowCompleted,
        EventKind::FlowSkipped,
        EventKind::StepChanged,
        EventKind::ChecklistUpdated,
    ];

    /// Stable snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::FlowStarted => "flow_started",
            EventKind::FlowCompleted => "flow_completed",
            EventKind::FlowSkipped => "flow_skipped",
            EventKind::StepChanged => "step_changed",
            EventKind::ChecklistUpdated => "checklist_updated",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific event data
#[derive(Debug, Clone)]
pub enum EventPayload {
    /// A flow session began at step 0
    FlowStarted { flow_id: String, flow: Arc<Flow> },

    /// The session advanced to `index`
    StepChanged {
        flow_id: String,
        index: usize,
        step: Step,
    },

    /// The last step was consumed
    FlowCompleted { flow_id: String },

    /// The session was abandoned
    FlowSkipped { flow_id: String },

    /// A checklist item was marked; `items` is the active flow's resolved checklist
    ChecklistUpdated {
        item_id: String,
        completed: bool,
        items: Vec<ChecklistItem>,
    },
}

/// Engine event with its capture time
#[derive(Debug, Clone)]
pub struct TourEvent {
    pub payload: EventPayload,
    pub timestamp: Instant,
}

impl TourEvent {
    /// Stamp a payload with the current time
    pub fn new(payload: EventPayload) -> Self {
        Self {
            payload,
            timestamp: Instant::now(),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self.payload {
            EventPayload::FlowStarted { .. } => EventKind::FlowStarted,
            EventPayload::StepChanged { .. } => EventKind::StepChanged,
            EventPayload::FlowCompleted { .. } => EventKind::FlowCompleted,
            EventPayload::FlowSkipped { .. } => EventKind::FlowSkipped,
            EventPayload::ChecklistUpdated { .. } => EventKind::ChecklistUpdated,
        }
    }

    /// Flow the event refers to, if any
    pub fn flow_id(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::FlowStarted { flow_id, .. }
            | EventPayload::StepChanged { flow_id, .. }
            | EventPayload::FlowCompleted { flow_id }
            | EventPayload::FlowSkipped { flow_id } => Some(flow_id),
            EventPayload::ChecklistUpdated { .. } => None,
        }
    }

    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match &self.payload {
            EventPayload::FlowStarted { flow, .. } => {
                format!("Flow started: {} ({} steps)", flow.name, flow.step_count())
            }
            EventPayload::StepChanged { index, step, .. } => {
                format!("Step {}: {}", index + 1, step.title)
            }
            EventPayload::FlowCompleted { flow_id } => format!("Flow completed: {}", flow_id),
            EventPayload::FlowSkipped { flow_id } => format!("Flow skipped: {}", flow_id),
            EventPayload::ChecklistUpdated { item_id, items, .. } => {
                let done = items.iter().filter(|i| i.completed).count();
                if items.is_empty() {
                    format!("Checklist item completed: {}", item_id)
                } else {
                    format!(
                        "Checklist item completed: {} ({}/{})",
                        item_id,
                        done,
                        items.len()
                    )
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_names() {
        let names: Vec<&str> = EventKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "flow_started",
                "flow_completed",
                "flow_skipped",
                "step_changed",
                "checklist_updated"
            ]
        );
    }

    #[test]
    fn test_event_kind_matches_payload() {
        let event = TourEvent::new(EventPayload::FlowSkipped {
            flow_id: "tour".to_string(),
        });
        assert_eq!(event.kind(), EventKind::FlowSkipped);
        assert_eq!(event.flow_id(), Some("tour"));

        let event = TourEvent::new(EventPayload::ChecklistUpdated {
            item_id: "x".to_string(),
            completed: true,
            items: Vec::new(),
        });
        assert_eq!(event.kind(), EventKind::ChecklistUpdated);
        assert_eq!(event.flow_id(), None);
    }

    #[test]
    fn test_event_description() {
        let event = TourEvent::new(EventPayload::FlowCompleted {
            flow_id: "dashboard-tour".to_string(),
        });
        assert_eq!(event.description(), "Flow completed: dashboard-tour");

        let mut item = ChecklistItem::new("analytics", "Review analytics");
        item.completed = true;
        let event = TourEvent::new(EventPayload::ChecklistUpdated {
            item_id: "analytics".to_string(),
            completed: true,
            items: vec![item, ChecklistItem::new("share-report", "Share")],
        });
        assert_eq!(
            event.description(),
            "Checklist item completed: analytics (1/2)"
        );
    }
}
