//! Breakdown session state
//!
//! Pure state machine for the current breakdown. No rendering, no I/O: the
//! UI event loop is the single writer and drives every transition through
//! the named operations here. The async planner call lives outside; its
//! outcome re-enters through [`Session::complete`] with the request token
//! captured at submit time.

use tracing::{debug, error};

use crate::domain::{self, Step};
use crate::llm::LlmError;
use crate::planner::BreakdownOutput;

/// Fixed user-facing message for any failed breakdown
///
/// Deliberately vague; the underlying failure goes to the log only.
pub const GENERIC_ERROR: &str = "Oof, the AI tripped. Try again maybe?";

/// Token identifying one submit; completions carry it back
pub type RequestSeq = u64;

/// Which phase the session is in
///
/// Exactly one is active at any time. Success implies a non-empty step list,
/// Error implies a non-empty error message, Loading shows no error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// The single source of truth for the current breakdown
#[derive(Debug, Default)]
pub struct Session {
    phase: Phase,
    steps: Vec<Step>,
    vibe: String,
    error: String,
    /// Monotonically increasing request token; bumped on submit and reset
    /// so late completions from an abandoned request are discarded.
    seq: RequestSeq,
}

impl Session {
    /// Create a new idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a goal for breakdown
    ///
    /// Transitions to Loading and returns the request token the caller must
    /// capture for [`Session::complete`]. Returns None without any
    /// transition when a request is already in flight (concurrent submits
    /// are ignored by design) or when the goal is empty/whitespace-only
    /// (rejected before dispatch).
    pub fn submit(&mut self, goal: &str) -> Option<RequestSeq> {
        debug!(goal_len = goal.len(), phase = ?self.phase, "Session::submit: called");
        if self.phase == Phase::Loading {
            debug!("Session::submit: already loading, ignoring");
            return None;
        }
        if goal.trim().is_empty() {
            debug!("Session::submit: empty goal, rejecting before dispatch");
            return None;
        }

        self.seq += 1;
        self.error.clear();
        self.phase = Phase::Loading;
        Some(self.seq)
    }

    /// Apply the outcome of a breakdown request
    ///
    /// Only the completion matching the current token while Loading is
    /// applied; anything else arrived after a reset or a newer submit and
    /// is discarded silently.
    pub fn complete(&mut self, seq: RequestSeq, outcome: Result<BreakdownOutput, LlmError>) {
        debug!(%seq, current = %self.seq, phase = ?self.phase, "Session::complete: called");
        if seq != self.seq || self.phase != Phase::Loading {
            debug!(%seq, "Session::complete: stale result, discarding");
            return;
        }

        match outcome {
            Ok(output) => {
                self.steps = output
                    .steps
                    .into_iter()
                    .map(|d| Step::new(d.title, d.description, d.motivation))
                    .collect();
                self.vibe = output.overall_vibe;
                self.phase = Phase::Success;
            }
            Err(e) => {
                // Detail goes to the diagnostic channel only; the user sees
                // the fixed generic message.
                error!(error = %e, "Breakdown request failed");
                self.error = GENERIC_ERROR.to_string();
                self.phase = Phase::Error;
            }
        }
    }

    /// Flip the completed flag of the step with the given id
    ///
    /// Valid only in Success phase; a no-op otherwise. Completing every step
    /// is a derived display fact, not a phase change.
    pub fn toggle_step(&mut self, id: &str) {
        debug!(%id, phase = ?self.phase, "Session::toggle_step: called");
        if self.phase != Phase::Success {
            debug!("Session::toggle_step: not in Success phase, ignoring");
            return;
        }
        if let Some(step) = self.steps.iter_mut().find(|s| s.id == id) {
            step.completed = !step.completed;
        }
    }

    /// Clear everything and return to Idle, from any phase
    ///
    /// Also bumps the request token so an in-flight request, if any, lands
    /// as stale.
    pub fn reset(&mut self) {
        debug!(phase = ?self.phase, "Session::reset: called");
        self.steps.clear();
        self.vibe.clear();
        self.error.clear();
        self.seq += 1;
        self.phase = Phase::Idle;
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current steps, in service order
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Encouraging one-liner from the last successful breakdown
    pub fn vibe(&self) -> &str {
        &self.vibe
    }

    /// User-facing error message (non-empty only in Error phase)
    pub fn error_message(&self) -> &str {
        &self.error
    }

    /// Completed percentage of the current checklist
    pub fn progress_percent(&self) -> u8 {
        domain::progress_percent(&self.steps)
    }

    /// True when every step of a non-empty checklist is done
    pub fn is_complete(&self) -> bool {
        domain::is_complete(&self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::StepDraft;

    fn two_step_output() -> BreakdownOutput {
        BreakdownOutput {
            overall_vibe: "lowkey you got this".to_string(),
            steps: vec![
                StepDraft {
                    title: "Pick up trash".to_string(),
                    description: "Grab a bag and do a lap".to_string(),
                    motivation: "Easy start".to_string(),
                },
                StepDraft {
                    title: "Make bed".to_string(),
                    description: "Pull the covers up".to_string(),
                    motivation: "Almost done".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_submit_success_flow() {
        let mut session = Session::new();
        assert_eq!(session.phase(), Phase::Idle);

        let seq = session.submit("clean my room").unwrap();
        assert_eq!(session.phase(), Phase::Loading);
        assert!(session.error_message().is_empty());

        session.complete(seq, Ok(two_step_output()));

        assert_eq!(session.phase(), Phase::Success);
        assert_eq!(session.steps().len(), 2);
        assert_eq!(session.vibe(), "lowkey you got this");
        assert!(session.steps().iter().all(|s| !s.completed));

        // Ids are unique within the sequence
        assert_ne!(session.steps()[0].id, session.steps()[1].id);
    }

    #[test]
    fn test_submit_failure_flow() {
        let mut session = Session::new();
        let seq = session.submit("clean my room").unwrap();

        session.complete(seq, Err(LlmError::EmptyResponse));

        assert_eq!(session.phase(), Phase::Error);
        assert_eq!(session.error_message(), GENERIC_ERROR);
        // Steps unchanged from before the call (empty, submitted from Idle)
        assert!(session.steps().is_empty());
    }

    #[test]
    fn test_submit_rejected_while_loading() {
        let mut session = Session::new();
        let seq = session.submit("clean my room").unwrap();

        assert!(session.submit("another goal").is_none());
        assert_eq!(session.phase(), Phase::Loading);

        // The original request still applies
        session.complete(seq, Ok(two_step_output()));
        assert_eq!(session.phase(), Phase::Success);
    }

    #[test]
    fn test_submit_rejects_blank_goal() {
        let mut session = Session::new();
        assert!(session.submit("").is_none());
        assert!(session.submit("   \n\t ").is_none());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_stale_result_after_reset_is_discarded() {
        let mut session = Session::new();
        let seq = session.submit("clean my room").unwrap();

        session.reset();
        assert_eq!(session.phase(), Phase::Idle);

        // The old request resolves late; state must not change
        session.complete(seq, Ok(two_step_output()));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.steps().is_empty());
        assert!(session.vibe().is_empty());
    }

    #[test]
    fn test_stale_result_after_newer_submit_is_discarded() {
        let mut session = Session::new();
        let old_seq = session.submit("clean my room").unwrap();

        session.reset();
        let new_seq = session.submit("write my essay").unwrap();

        // The old request fails late; the newer one is still in flight
        session.complete(old_seq, Err(LlmError::EmptyResponse));
        assert_eq!(session.phase(), Phase::Loading);
        assert!(session.error_message().is_empty());

        // The newer request lands normally
        session.complete(new_seq, Ok(two_step_output()));
        assert_eq!(session.phase(), Phase::Success);
    }

    #[test]
    fn test_toggle_flips_exactly_one_step() {
        let mut session = Session::new();
        let seq = session.submit("clean my room").unwrap();
        session.complete(seq, Ok(two_step_output()));

        let id = session.steps()[0].id.clone();
        let order: Vec<String> = session.steps().iter().map(|s| s.title.clone()).collect();

        session.toggle_step(&id);
        assert!(session.steps()[0].completed);
        assert!(!session.steps()[1].completed);
        assert_eq!(session.phase(), Phase::Success);

        // Order unchanged
        let after: Vec<String> = session.steps().iter().map(|s| s.title.clone()).collect();
        assert_eq!(order, after);

        // Toggle back
        session.toggle_step(&id);
        assert!(!session.steps()[0].completed);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut session = Session::new();
        let seq = session.submit("clean my room").unwrap();
        session.complete(seq, Ok(two_step_output()));

        session.toggle_step("no-such-id");
        assert!(session.steps().iter().all(|s| !s.completed));
    }

    #[test]
    fn test_toggle_outside_success_is_noop() {
        let mut session = Session::new();
        session.toggle_step("anything");
        assert_eq!(session.phase(), Phase::Idle);

        session.submit("clean my room").unwrap();
        session.toggle_step("anything");
        assert_eq!(session.phase(), Phase::Loading);
    }

    #[test]
    fn test_completing_all_steps_keeps_success_phase() {
        let mut session = Session::new();
        let seq = session.submit("clean my room").unwrap();
        session.complete(seq, Ok(two_step_output()));

        let ids: Vec<String> = session.steps().iter().map(|s| s.id.clone()).collect();
        for id in &ids {
            session.toggle_step(id);
        }

        assert_eq!(session.progress_percent(), 100);
        assert!(session.is_complete());
        assert_eq!(session.phase(), Phase::Success);
    }

    #[test]
    fn test_single_step_progress_zero_to_hundred() {
        let mut session = Session::new();
        let seq = session.submit("just one thing").unwrap();
        session.complete(
            seq,
            Ok(BreakdownOutput {
                overall_vibe: "one and done".to_string(),
                steps: vec![StepDraft {
                    title: "Stand up".to_string(),
                    description: "Just stand".to_string(),
                    motivation: "Go".to_string(),
                }],
            }),
        );

        assert_eq!(session.progress_percent(), 0);
        let id = session.steps()[0].id.clone();
        session.toggle_step(&id);
        assert_eq!(session.progress_percent(), 100);
    }

    #[test]
    fn test_reset_from_every_phase() {
        // From Success
        let mut session = Session::new();
        let seq = session.submit("clean my room").unwrap();
        session.complete(seq, Ok(two_step_output()));
        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.steps().is_empty());
        assert!(session.vibe().is_empty());

        // From Error
        let seq = session.submit("clean my room").unwrap();
        session.complete(seq, Err(LlmError::EmptyResponse));
        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.error_message().is_empty());

        // From Loading
        session.submit("clean my room").unwrap();
        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_new_success_replaces_prior_steps() {
        let mut session = Session::new();
        let seq = session.submit("clean my room").unwrap();
        session.complete(seq, Ok(two_step_output()));
        let first_ids: Vec<String> = session.steps().iter().map(|s| s.id.clone()).collect();

        session.reset();
        let seq = session.submit("clean my room again").unwrap();
        session.complete(seq, Ok(two_step_output()));

        let second_ids: Vec<String> = session.steps().iter().map(|s| s.id.clone()).collect();
        assert_eq!(second_ids.len(), 2);
        // Fresh identifiers each time
        for id in &second_ids {
            assert!(!first_ids.contains(id));
        }
    }
}
