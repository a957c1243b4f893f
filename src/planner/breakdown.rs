//! BreakdownPlanner - LLM-driven decomposition of an overwhelming goal
//!
//! Takes a free-text goal and asks the GenAI service for a small set of
//! tiny, actionable steps plus an encouraging one-line vibe, using
//! structured output so no prose parsing is needed.

use std::sync::Arc;

use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::llm::{GenAiClient, GenerateRequest, LlmError};
use crate::prompts::{BreakdownContext, render_breakdown};

/// One step as returned by the service
///
/// No id and no completed flag here: those are added client-side when the
/// session materializes the checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDraft {
    /// Actionable step title (3-5 words)
    pub title: String,
    /// A tiny detail on how to do it
    pub description: String,
    /// A very short hype message
    pub motivation: String,
}

/// Full breakdown output from the service
///
/// Field names mirror the wire schema exactly (`overallVibe`, `steps`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownOutput {
    /// A short, encouraging sentence about the task
    #[serde(rename = "overallVibe")]
    pub overall_vibe: String,
    /// Ordered steps, smallest first
    pub steps: Vec<StepDraft>,
}

/// BreakdownPlanner turns a goal into a BreakdownOutput
pub struct BreakdownPlanner {
    llm: Arc<dyn GenAiClient>,
    system_prompt: String,
    max_output_tokens: u32,
}

impl BreakdownPlanner {
    /// Create a planner from configuration, rendering the system prompt
    pub fn from_config(llm: Arc<dyn GenAiClient>, config: &Config) -> Result<Self> {
        let context = BreakdownContext {
            min_steps: config.planner.min_steps,
            max_steps: config.planner.max_steps,
        };
        let system_prompt = render_breakdown(config.planner.prompt_file.as_deref(), &context)?;

        Ok(Self {
            llm,
            system_prompt,
            max_output_tokens: config.llm.max_output_tokens,
        })
    }

    /// Create a planner with an explicit system prompt
    pub fn new(llm: Arc<dyn GenAiClient>, system_prompt: impl Into<String>, max_output_tokens: u32) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
            max_output_tokens,
        }
    }

    /// Break a goal down into steps
    ///
    /// Exactly one service call per invocation; the caller decides whether
    /// to resubmit after a failure.
    pub async fn break_down(&self, goal: &str) -> Result<BreakdownOutput, LlmError> {
        debug!(goal_len = goal.len(), "break_down: called");

        let request = GenerateRequest::structured(
            self.system_prompt.clone(),
            goal.to_string(),
            response_schema(),
            self.max_output_tokens,
        );

        let response = self.llm.generate(request).await?;

        let Some(text) = response.text else {
            debug!("break_down: service returned no content");
            return Err(LlmError::EmptyResponse);
        };

        let output = parse_payload(&text)?;

        info!(
            step_count = output.steps.len(),
            prompt_tokens = response.usage.prompt_tokens,
            response_tokens = response.usage.response_tokens,
            "Goal broken down"
        );

        Ok(output)
    }
}

/// Parse and validate the structured payload
fn parse_payload(text: &str) -> Result<BreakdownOutput, LlmError> {
    let output: BreakdownOutput = serde_json::from_str(text)?;

    // Schema shape allows any number of items; an empty breakdown can never
    // reach the Success phase, so reject it here.
    if output.steps.is_empty() {
        return Err(LlmError::Schema("breakdown contains zero steps".to_string()));
    }

    Ok(output)
}

/// Response schema for constrained generation
///
/// Field names are part of the service contract: `overallVibe` and `steps`
/// with `title`/`description`/`motivation` per step, all required.
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "overallVibe": {
                "type": "STRING",
                "description": "A short, encouraging sentence about the task.",
            },
            "steps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {
                            "type": "STRING",
                            "description": "Actionable step title (3-5 words max).",
                        },
                        "description": {
                            "type": "STRING",
                            "description": "A tiny detail on how to do it.",
                        },
                        "motivation": {
                            "type": "STRING",
                            "description": "A very short hype message.",
                        },
                    },
                    "required": ["title", "description", "motivation"],
                },
            },
        },
        "required": ["overallVibe", "steps"],
    })
}
