//! Step domain type and checklist progress math

use serde::{Deserialize, Serialize};

use super::id::generate_id;

/// A single actionable step in a breakdown
///
/// Steps are created in bulk when a breakdown succeeds. After that only the
/// `completed` flag changes, and the whole set is dropped on reset or
/// replaced by the next breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Client-generated ID, unique within this breakdown
    pub id: String,

    /// Actionable step title
    pub title: String,

    /// A tiny detail on how to do it
    pub description: String,

    /// Short hype message for this step
    pub motivation: String,

    /// Whether the user has checked this step off
    pub completed: bool,
}

impl Step {
    /// Create a new unchecked step with a fresh ID
    pub fn new(title: impl Into<String>, description: impl Into<String>, motivation: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: generate_id(&title),
            title,
            description: description.into(),
            motivation: motivation.into(),
            completed: false,
        }
    }
}

/// Percentage of completed steps, rounded to the nearest integer
///
/// Returns 0 for an empty slice. An empty checklist never reaches the
/// Success phase, but a divide-by-zero here must not take the UI down.
pub fn progress_percent(steps: &[Step]) -> u8 {
    if steps.is_empty() {
        return 0;
    }
    let completed = steps.iter().filter(|s| s.completed).count();
    ((completed as f64 / steps.len() as f64) * 100.0).round() as u8
}

/// True when every step of a non-empty checklist is checked off
pub fn is_complete(steps: &[Step]) -> bool {
    !steps.is_empty() && progress_percent(steps) == 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn step(completed: bool) -> Step {
        let mut s = Step::new("Make bed", "Pull the covers up", "Easy win 🙌");
        s.completed = completed;
        s
    }

    #[test]
    fn test_new_step_is_unchecked() {
        let s = Step::new("Pick up trash", "Grab a bag and sweep the floor", "You got this");
        assert!(!s.completed);
        assert!(s.id.contains("-step-"));
    }

    #[test]
    fn test_progress_empty_is_zero() {
        assert_eq!(progress_percent(&[]), 0);
        assert!(!is_complete(&[]));
    }

    #[test]
    fn test_progress_half() {
        let steps = vec![step(true), step(false)];
        assert_eq!(progress_percent(&steps), 50);
        assert!(!is_complete(&steps));
    }

    #[test]
    fn test_progress_rounds() {
        let steps = vec![step(true), step(false), step(false)];
        // 1/3 -> 33.33 -> 33
        assert_eq!(progress_percent(&steps), 33);
        let steps = vec![step(true), step(true), step(false)];
        // 2/3 -> 66.67 -> 67
        assert_eq!(progress_percent(&steps), 67);
    }

    #[test]
    fn test_single_step_zero_to_hundred() {
        let mut steps = vec![step(false)];
        assert_eq!(progress_percent(&steps), 0);
        steps[0].completed = true;
        assert_eq!(progress_percent(&steps), 100);
        assert!(is_complete(&steps));
    }

    proptest! {
        #[test]
        fn prop_progress_in_range(flags in proptest::collection::vec(any::<bool>(), 0..20)) {
            let steps: Vec<Step> = flags.iter().map(|&done| step(done)).collect();
            let pct = progress_percent(&steps);
            prop_assert!(pct <= 100);
        }

        #[test]
        fn prop_hundred_iff_all_done(flags in proptest::collection::vec(any::<bool>(), 1..20)) {
            let steps: Vec<Step> = flags.iter().map(|&done| step(done)).collect();
            let all_done = flags.iter().all(|&f| f);
            prop_assert_eq!(progress_percent(&steps) == 100, all_done);
            prop_assert_eq!(is_complete(&steps), all_done);
        }
    }
}
