use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::tour::{ChecklistItem, Flow, Placement, Step};

/// Static tour configuration handed to the engine at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourConfig {
    /// Available flows, looked up by id
    #[serde(default)]
    pub flows: Vec<Flow>,

    /// Anchor references that carry a help badge, independent of any flow
    #[serde(default)]
    pub help_indicators: Vec<String>,
}

impl TourConfig {
    pub fn new(flows: Vec<Flow>) -> Self {
        Self {
            flows,
            help_indicators: Vec::new(),
        }
    }

    pub fn with_help_indicators(mut self, targets: Vec<String>) -> Self {
        self.help_indicators = targets;
        self
    }

    /// Find a flow by id
    pub fn flow(&self, flow_id: &str) -> Option<&Flow> {
        self.flows.iter().find(|f| f.id == flow_id)
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TourConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        let config = Self::from_json(&content)?;
        tracing::info!(
            "Loaded tour config from: {} ({} flows)",
            path.display(),
            config.flows.len()
        );
        Ok(config)
    }

    /// Save configuration to disk as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let save_failed = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source,
        };

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| save_failed(Box::new(e)))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| save_failed(Box::new(e)))?;
        fs::write(path, json).map_err(|e| save_failed(Box::new(e)))?;

        tracing::debug!("Saved tour config to: {}", path.display());
        Ok(())
    }

    /// Check identifier uniqueness across flows, steps and checklist items.
    ///
    /// Flows without steps are accepted here; the engine refuses to start them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut flow_ids = HashSet::new();

        for flow in &self.flows {
            if flow.id.is_empty() {
                return Err(ConfigError::EmptyFlowId);
            }
            if !flow_ids.insert(flow.id.as_str()) {
                return Err(ConfigError::DuplicateFlow(flow.id.clone()));
            }

            let mut step_ids = HashSet::new();
            for step in &flow.steps {
                if !step_ids.insert(step.id.as_str()) {
                    return Err(ConfigError::DuplicateStep {
                        flow: flow.id.clone(),
                        step: step.id.clone(),
                    });
                }
            }

            let mut item_ids = HashSet::new();
            for item in flow.checklist_items() {
                if !item_ids.insert(item.id.as_str()) {
                    return Err(ConfigError::DuplicateChecklistItem {
                        flow: flow.id.clone(),
                        item: item.id.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// The four-step dashboard walkthrough used by the demo.
    pub fn dashboard_demo() -> Self {
        let steps = vec![
            Step::new(
                "header",
                "#app-header",
                "Welcome to Dashboard",
                "This simulates a complex enterprise dashboard.",
            )
            .with_position(Placement::Bottom)
            .with_action("Start Tour")
            .with_highlight(true),
            Step::new(
                "analytics",
                "#nav-dashboard",
                "Analytics Dashboard",
                "View real-time metrics and KPIs.",
            )
            .with_position(Placement::Right)
            .with_action("Next"),
            Step::new(
                "quick-action",
                "#quick-action-btn",
                "Quick Actions",
                "Common tasks are one click away.",
            )
            .with_position(Placement::Bottom)
            .with_action("Next"),
            Step::new(
                "notifications",
                "#notifications-btn",
                "Notifications",
                "Stay updated with real-time alerts.",
            )
            .with_position(Placement::Bottom)
            .with_action("Finish"),
        ];

        let checklist = vec![
            ChecklistItem::new("data-source", "Connect a data source").with_target("#data-sources"),
            ChecklistItem::new("analytics", "Review analytics dashboard").with_target("#nav-dashboard"),
            ChecklistItem::new("team-member", "Grant access to a team member").with_target("#team"),
            ChecklistItem::new("share-report", "Share a report").with_target("#reports"),
        ];

        Self::new(vec![
            Flow::new("dashboard-tour", "Dashboard Tour", steps).with_checklist(checklist),
        ])
        .with_help_indicators(vec![
            "#data-sources".to_string(),
            "#team".to_string(),
            "#reports".to_string(),
        ])
    }
}
