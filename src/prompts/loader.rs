//! Prompt loader
//!
//! Renders prompt templates from files or embedded defaults with Handlebars.

use std::fs;
use std::path::Path;

use eyre::{Context, Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;

/// Template context for the breakdown system instruction
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownContext {
    /// Minimum number of steps to ask for
    pub min_steps: u8,
    /// Maximum number of steps to ask for
    pub max_steps: u8,
}

/// Render the breakdown system instruction
///
/// Uses the override file when given, otherwise the embedded template.
pub fn render_breakdown(override_file: Option<&Path>, context: &BreakdownContext) -> Result<String> {
    debug!(?override_file, ?context, "render_breakdown: called");
    let template = match override_file {
        Some(path) => {
            info!("Loading prompt template from {}", path.display());
            fs::read_to_string(path).context(format!("Failed to read prompt file {}", path.display()))?
        }
        None => embedded::get_embedded("breakdown")
            .ok_or_else(|| eyre!("Missing embedded breakdown template"))?
            .to_string(),
    };

    render(&template, context)
}

/// Render a Handlebars template with the given context
fn render<C: Serialize>(template: &str, context: &C) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars
        .render_template(template, context)
        .context("Failed to render prompt template")
}
