//! GenAI error types

use thiserror::Error;

/// Errors that can occur while talking to the generative-AI service
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Service returned no content")]
    EmptyResponse,

    #[error("Response failed schema validation: {0}")]
    Schema(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Check if this is a transport-level failure (unreachable service or
    /// non-success status)
    pub fn is_transport(&self) -> bool {
        matches!(self, LlmError::Network(_) | LlmError::Api { .. })
    }

    /// Check if this is a malformed or schema-violating payload
    pub fn is_schema(&self) -> bool {
        matches!(self, LlmError::Schema(_) | LlmError::Json(_))
    }
}
