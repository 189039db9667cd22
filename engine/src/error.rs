use thiserror::Error;
use uuid::Uuid;

// The calculation model never fails; these cover configuration, persistence
// and the input boundary.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Scenario store error: {0}")]
    StoreError(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(Uuid),

    // Saved scenarios are never updated in place
    #[error("Scenario {0} is already saved")]
    DuplicateScenario(Uuid),

    #[error("Unknown input field: '{0}'")]
    UnknownField(String),

    #[error("Invalid value '{value}' for input field '{field}'")]
    InvalidValue { field: String, value: String },
}
