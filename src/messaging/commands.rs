/// Command types for the tour engine
///
/// Commands represent requests to change tour state (imperative).
/// They are applied synchronously by the engine.
use thiserror::Error;

/// Tour commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourCommand {
    /// Start the flow with this id
    StartFlow { flow_id: String },

    /// Advance the active flow by one step
    NextStep,

    /// Abandon the active flow
    SkipFlow,

    /// Mark a checklist item as completed
    CompleteChecklistItem { item_id: String },

    /// Return to idle and forget all progress
    Reset,
}

/// Why a command left the engine untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IgnoreReason {
    #[error("flow not found: {0}")]
    FlowNotFound(String),

    #[error("no flow is active")]
    NoActiveFlow,

    #[error("flow has no steps: {0}")]
    FlowHasNoSteps(String),
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// State changed (and an event was emitted, except for reset)
    Applied,

    /// Silent no-op
    Ignored(IgnoreReason),
}

impl CommandOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CommandOutcome::Applied)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, CommandOutcome::Ignored(_))
    }

    pub fn reason(&self) -> Option<&IgnoreReason> {
        match self {
            CommandOutcome::Applied => None,
            CommandOutcome::Ignored(reason) => Some(reason),
        }
    }
}

impl TourCommand {
    /// Get a human-readable description of the command
    pub fn description(&self) -> String {
        match self {
            TourCommand::StartFlow { flow_id } => format!("Start flow: {}", flow_id),
            TourCommand::NextStep => "Next step".to_string(),
            TourCommand::SkipFlow => "Skip flow".to_string(),
            TourCommand::CompleteChecklistItem { item_id } => {
                format!("Complete checklist item: {}", item_id)
            }
            TourCommand::Reset => "Reset".to_string(),
        }
    }

    /// Parse the compact script form: `start:<flow>`, `next`, `skip`,
    /// `check:<item>`, `reset`
    pub fn parse(input: &str) -> Option<TourCommand> {
        let input = input.trim();
        match input.split_once(':') {
            Some(("start", flow_id)) if !flow_id.is_empty() => Some(TourCommand::StartFlow {
                flow_id: flow_id.to_string(),
            }),
            Some(("check", item_id)) if !item_id.is_empty() => {
                Some(TourCommand::CompleteChecklistItem {
                    item_id: item_id.to_string(),
                })
            }
            Some(_) => None,
            None => match input {
                "next" => Some(TourCommand::NextStep),
                "skip" => Some(TourCommand::SkipFlow),
                "reset" => Some(TourCommand::Reset),
                _ => None,
            },
        }
    }
}
