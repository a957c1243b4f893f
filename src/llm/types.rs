//! GenAI request/response types
//!
//! These model the Gemini generateContent API but stay provider-agnostic
//! enough to support other structured-output providers.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A generation request - everything needed for one structured call
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// System-level instruction (persona, tone, decomposition rules)
    pub system_instruction: String,

    /// The raw user content (the goal text)
    pub content: String,

    /// JSON schema the response must conform to
    ///
    /// When set, the service is asked for constrained generation rather than
    /// free-form text, so no prose-parsing step is needed on the way back.
    pub response_schema: Option<serde_json::Value>,

    /// Max tokens for the response (from config)
    pub max_output_tokens: u32,
}

impl GenerateRequest {
    /// Create a structured request with a response schema
    pub fn structured(
        system_instruction: impl Into<String>,
        content: impl Into<String>,
        response_schema: serde_json::Value,
        max_output_tokens: u32,
    ) -> Self {
        debug!(%max_output_tokens, "GenerateRequest::structured: called");
        Self {
            system_instruction: system_instruction.into(),
            content: content.into(),
            response_schema: Some(response_schema),
            max_output_tokens,
        }
    }
}

/// Response from a generation request
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Text content (the structured JSON payload, if any)
    pub text: Option<String>,

    /// Why the model stopped
    pub finish_reason: FinishReason,

    /// Token usage for diagnostics
    pub usage: TokenUsage,
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Other,
}

impl FinishReason {
    /// Parse from a Gemini API finishReason string
    pub fn from_gemini(s: &str) -> Self {
        debug!(%s, "FinishReason::from_gemini: called");
        match s {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::MaxTokens,
            "SAFETY" => FinishReason::Safety,
            _ => {
                debug!("FinishReason::from_gemini: unknown, defaulting to Other");
                FinishReason::Other
            }
        }
    }
}

/// Token usage for diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub response_tokens: u64,
}
