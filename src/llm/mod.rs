//! GenAI client module for Unstick
//!
//! Provides the client trait, the Gemini implementation, and shared types.

use std::sync::Arc;

use eyre::Result;
use tracing::debug;

mod client;
mod error;
mod gemini;
mod types;

pub use client::GenAiClient;
#[cfg(test)]
pub use client::mock;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use types::{FinishReason, GenerateRequest, GenerateResponse, TokenUsage};

use crate::config::LlmConfig;

/// Create a GenAI client based on the provider specified in config
///
/// Currently only "gemini" is supported.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn GenAiClient>> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "gemini" => {
            debug!("create_client: creating Gemini client");
            Ok(Arc::new(GeminiClient::from_config(config)?))
        }
        other => Err(eyre::eyre!("Unknown GenAI provider: '{}'. Supported: gemini", other)),
    }
}
