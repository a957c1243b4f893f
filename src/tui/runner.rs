//! TUI runner - main loop that owns the terminal
//!
//! The runner is responsible for:
//! - Rendering on every loop iteration
//! - Dispatching terminal events to App for handling
//! - Spawning the background planner task when a submit is handed off
//! - Applying the task's outcome through the session with the request
//!   token captured at submit time (late results land as stale)

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::llm::LlmError;
use crate::planner::{BreakdownOutput, BreakdownPlanner};
use crate::session::RequestSeq;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;

/// Outcome of one background breakdown request, tagged with its token
type RequestOutcome = (RequestSeq, Result<BreakdownOutput, LlmError>);

/// TUI runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
    /// Planner for breakdown requests
    planner: Arc<BreakdownPlanner>,
    /// Receiver for the in-flight request's outcome
    result_rx: Option<mpsc::Receiver<RequestOutcome>>,
    /// Handle to the background request task
    request_task: Option<JoinHandle<()>>,
}

impl TuiRunner {
    /// Create a new runner
    pub fn new(terminal: Tui, planner: Arc<BreakdownPlanner>) -> Self {
        debug!("TuiRunner::new: called");
        Self {
            app: App::new(),
            terminal,
            event_handler: EventHandler::new(Duration::from_millis(100)),
            planner,
            result_rx: None,
            request_task: None,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: entering main loop");
        loop {
            self.terminal.draw(|frame| views::render(&self.app, frame))?;

            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Tick => {
                            self.handle_tick();
                        }
                        Event::Key(key_event) => {
                            if self.app.handle_key(key_event) {
                                break;
                            }
                        }
                        Event::Resize(_, _) => {}
                    }
                }
                // Apply the request outcome as soon as it arrives
                Some((seq, outcome)) = async {
                    if let Some(rx) = &mut self.result_rx {
                        rx.recv().await
                    } else {
                        std::future::pending::<Option<RequestOutcome>>().await
                    }
                } => {
                    debug!(%seq, "TuiRunner::run: request outcome received");
                    self.app.session_mut().complete(seq, outcome);
                    self.result_rx = None;
                    self.request_task = None;
                }
            }

            if self.app.should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        debug!("TuiRunner::run: exiting");
        Ok(())
    }

    /// Handle tick event - spinner advance and pending submit handoff
    fn handle_tick(&mut self) {
        self.app.tick();

        if let Some(goal) = self.app.pending_submit.take() {
            self.start_request(&goal);
        }
    }

    /// Start a breakdown request (spawns background task)
    fn start_request(&mut self, goal: &str) {
        debug!(goal_len = goal.len(), "TuiRunner::start_request: called");

        // The session refuses concurrent submits and blank goals; nothing
        // to spawn when it does.
        let Some(seq) = self.app.session_mut().submit(goal) else {
            debug!("TuiRunner::start_request: submit refused, not spawning");
            return;
        };

        self.app.pick_loading_phrase();
        info!(%seq, "Breakdown request started");

        let (result_tx, result_rx) = mpsc::channel::<RequestOutcome>(1);
        self.result_rx = Some(result_rx);

        let planner = Arc::clone(&self.planner);
        let goal = goal.to_string();
        self.request_task = Some(tokio::spawn(async move {
            debug!(%seq, "request task started");
            let outcome = planner.break_down(&goal).await;
            // The receiver may be gone if the TUI exited; nothing to do then
            let _ = result_tx.send((seq, outcome)).await;
        }));
    }
}
