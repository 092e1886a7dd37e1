//! Tour flow definitions
//!
//! Static, immutable description of the guided flows: ordered steps and an
//! optional checklist. These types are deserialized straight from the tour
//! configuration file.

use serde::{Deserialize, Serialize};

/// Where a tooltip sits relative to its target anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    Top,
    Bottom,
    Left,
    Right,
    BottomLeft,
    BottomRight,
}

impl Placement {
    /// Get all placements
    pub const ALL: [Placement; 6] = [
        Placement::Top,
        Placement::Bottom,
        Placement::Left,
        Placement::Right,
        Placement::BottomLeft,
        Placement::BottomRight,
    ];

    /// Wire name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Top => "top",
            Placement::Bottom => "bottom",
            Placement::Left => "left",
            Placement::Right => "right",
            Placement::BottomLeft => "bottom-left",
            Placement::BottomRight => "bottom-right",
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Bottom
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single stop in a guided flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Unique within its flow
    pub id: String,

    /// Opaque anchor reference, resolved by the renderer
    pub target: String,

    pub title: String,

    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Placement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,

    /// Label for the action button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, alias = "gifUrl", skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl Step {
    /// Default label for the action button
    pub const DEFAULT_ACTION: &'static str = "Next";

    /// Create a step with only the required fields set
    pub fn new(
        id: impl Into<String>,
        target: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            target: target.into(),
            title: title.into(),
            content: content.into(),
            position: None,
            highlight: None,
            action: None,
            media_url: None,
        }
    }

    pub fn with_position(mut self, position: Placement) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_media_url(mut self, url: impl Into<String>) -> Self {
        self.media_url = Some(url.into());
        self
    }

    /// Placement hint, falling back to [`Placement::Bottom`]
    pub fn placement(&self) -> Placement {
        self.position.unwrap_or_default()
    }

    /// Whether the target should be visually emphasized
    pub fn is_highlighted(&self) -> bool {
        self.highlight.unwrap_or(false)
    }

    /// Action button label, falling back to "Next"
    pub fn action_label(&self) -> &str {
        self.action.as_deref().unwrap_or(Self::DEFAULT_ACTION)
    }
}

/// A task the user can complete independently of step order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Unique within its checklist
    pub id: String,

    pub label: String,

    #[serde(default)]
    pub target_element: String,

    /// Initial value in configuration; live value is tracked by the engine
    #[serde(default)]
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            target_element: String::new(),
            completed: false,
        }
    }

    pub fn with_target(mut self, target_element: impl Into<String>) -> Self {
        self.target_element = target_element.into();
        self
    }
}

/// Named, ordered sequence of steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    pub id: String,

    pub name: String,

    pub steps: Vec<Step>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<Vec<ChecklistItem>>,
}

impl Flow {
    /// Create a flow without a checklist
    pub fn new(id: impl Into<String>, name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            steps,
            checklist: None,
        }
    }

    /// Attach a checklist to the flow
    pub fn with_checklist(mut self, checklist: Vec<ChecklistItem>) -> Self {
        self.checklist = Some(checklist);
        self
    }

    /// Get total number of steps
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get the step at `index`
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Get the position of a step by id
    pub fn position_of(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == step_id)
    }

    /// Check if `index` is the last step
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.steps.len()
    }

    /// Checklist items as configured (empty if the flow has none)
    pub fn checklist_items(&self) -> &[ChecklistItem] {
        self.checklist.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_flow() -> Flow {
        Flow::new(
            "dashboard-tour",
            "Dashboard Tour",
            vec![
                Step::new("header", "#app-header", "Welcome", "Intro")
                    .with_position(Placement::Bottom)
                    .with_action("Start Tour")
                    .with_highlight(true),
                Step::new("analytics", "#nav-dashboard", "Analytics", "Metrics"),
            ],
        )
    }

    #[test]
    fn test_step_defaults() {
        let step = Step::new("a", "#a", "A", "body");
        assert_eq!(step.placement(), Placement::Bottom);
        assert!(!step.is_highlighted());
        assert_eq!(step.action_label(), "Next");
    }

    #[test]
    fn test_flow_navigation_helpers() {
        let flow = sample_flow();
        assert_eq!(flow.step_count(), 2);
        assert_eq!(flow.position_of("analytics"), Some(1));
        assert_eq!(flow.position_of("missing"), None);
        assert!(!flow.is_last(0));
        assert!(flow.is_last(1));
        assert!(flow.checklist_items().is_empty());
    }

    #[test]
    fn test_placement_wire_names() {
        for placement in Placement::ALL {
            let json = serde_json::to_string(&placement).unwrap();
            assert_eq!(json, format!("\"{}\"", placement.as_str()));
        }
    }

    #[test]
    fn test_step_deserializes_legacy_media_key() {
        let json = r##"{
            "id": "analytics",
            "target": "#nav-dashboard",
            "title": "Analytics Dashboard",
            "content": "View real-time metrics.",
            "position": "right",
            "gifUrl": "https://example.com/a.gif"
        }"##;

        let step: Step = serde_json::from_str(json).unwrap();
        assert_eq!(step.placement(), Placement::Right);
        assert_eq!(step.media_url.as_deref(), Some("https://example.com/a.gif"));
        assert_eq!(step.action, None);
    }

    #[test]
    fn test_checklist_item_uses_camel_case() {
        let json = r##"{"id": "data-source", "label": "Connect", "targetElement": "#sources", "completed": false}"##;
        let item: ChecklistItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.target_element, "#sources");
        assert!(!item.completed);
    }
}
