//! GenAiClient trait definition

use async_trait::async_trait;

use super::{GenerateRequest, GenerateResponse, LlmError};

/// Stateless generative-AI client - each call is independent
///
/// This is the core abstraction for talking to the text-generation service.
/// Implementations perform exactly one outbound request per call: no retry,
/// no caching, no side effects beyond the request itself.
#[async_trait]
pub trait GenAiClient: Send + Sync {
    /// Send a single generation request and wait for the full response
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;
}
