use crate::relay::RelayError;

/// Error types for page controller operations
#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    /// Page configuration could not be used
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Root margin is not valid CSS box shorthand
    #[error("Invalid root margin `{input}`: {reason}")]
    InvalidRootMargin {
        /// Text that failed to parse
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// A required element is absent from the page
    #[error("Missing element: {0}")]
    MissingElement(String),

    /// Email relay failure
    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    /// A browser API call failed
    #[error("Browser API error: {0}")]
    Js(String),
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Config(err.to_string())
    }
}

/// Result type for page controller operations
pub type Result<T> = std::result::Result<T, FolioError>;
