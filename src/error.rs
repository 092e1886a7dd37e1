use thiserror::Error;

/// Configuration errors using thiserror for structured error handling.
///
/// The engine itself never fails; these cover loading, saving and validating
/// the static tour definition before an engine is built from it.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load tour configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save tour configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid tour configuration JSON")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate flow id: {0}")]
    DuplicateFlow(String),

    #[error("Duplicate step id '{step}' in flow '{flow}'")]
    DuplicateStep { flow: String, step: String },

    #[error("Duplicate checklist item '{item}' in flow '{flow}'")]
    DuplicateChecklistItem { flow: String, item: String },

    #[error("Flow id must not be empty")]
    EmptyFlowId,
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
