//! Goal breakdown planning

mod breakdown;

pub use breakdown::{BreakdownOutput, BreakdownPlanner, StepDraft};
