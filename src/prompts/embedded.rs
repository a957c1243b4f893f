//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// System instruction template for the breakdown planner
pub const BREAKDOWN: &str = include_str!("../../prompts/breakdown.pmt");

/// Get an embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "breakdown" => Some(BREAKDOWN),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
