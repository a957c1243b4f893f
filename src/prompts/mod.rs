//! Prompt templates for Unstick

pub mod embedded;
mod loader;

pub use loader::{BreakdownContext, render_breakdown};
