//! Unstick - break overwhelming tasks into tiny, doable steps
//!
//! Unstick sends a free-text goal to a generative-AI service with a
//! structured-output schema and renders the returned breakdown as an
//! interactive terminal checklist.
//!
//! # Core concepts
//!
//! - **One request in flight**: a submit is refused while a request is
//!   loading, and late results from abandoned requests are discarded by a
//!   monotonic token ([`session::Session`])
//! - **Structured output**: the service is asked for schema-conforming
//!   JSON, so no prose parsing happens on the way back ([`planner`])
//! - **Single writer**: every state transition flows through the session's
//!   named operations; the UI only reads snapshots
//!
//! # Modules
//!
//! - [`llm`] - GenAI client trait and Gemini implementation
//! - [`planner`] - goal decomposition via structured generation
//! - [`session`] - the idle/loading/success/error state machine
//! - [`domain`] - step records and checklist progress math
//! - [`tui`] - ratatui checklist interface
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod planner;
pub mod prompts;
pub mod session;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, LlmConfig, PlannerConfig};
pub use domain::{Step, is_complete, progress_percent};
pub use llm::{GenAiClient, GeminiClient, GenerateRequest, GenerateResponse, LlmError};
pub use planner::{BreakdownOutput, BreakdownPlanner, StepDraft};
pub use session::{GENERIC_ERROR, Phase, RequestSeq, Session};
