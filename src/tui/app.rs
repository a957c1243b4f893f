//! TUI application - event handling and UI state
//!
//! The App owns the breakdown Session plus UI-only state (input buffer,
//! list selection, help overlay). It does not render - that's the views
//! module - and it does not spawn tasks - that's the runner. Submits are
//! handed to the runner through `pending_submit`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::session::{Phase, Session};

/// Loading phrases shown while the request is in flight
pub const LOADING_PHRASES: &[&str] = &[
    "Analyzing vibes",
    "Breaking down the scary stuff",
    "Shrinking the mountain",
    "Finding the easy first step",
    "Untangling the knot",
    "Making it doable",
];

/// Suggestion chips shown while the input is empty (digits 1-3 fill them in)
pub const SUGGESTIONS: &[&str] = &[
    "I want to start a side project but feel overwhelmed.",
    "My room is messy and I don't know where to start.",
    "I have an essay due tomorrow and haven't started.",
];

/// TUI application
#[derive(Debug)]
pub struct App {
    /// Breakdown session (the single source of truth)
    session: Session,
    /// Goal input buffer
    pub input: String,
    /// Selected index in the step list
    pub selected: usize,
    /// Help overlay visible
    pub show_help: bool,
    /// Set when the main loop should exit
    pub should_quit: bool,
    /// Goal handed off to the runner for the next submit
    pub pending_submit: Option<String>,
    /// Randomly chosen phrase for the current loading screen
    pub loading_phrase: &'static str,
    /// Tick counter driving the loading spinner
    pub tick_count: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            input: String::new(),
            selected: 0,
            show_help: false,
            should_quit: false,
            pending_submit: None,
            loading_phrase: LOADING_PHRASES[0],
            tick_count: 0,
        }
    }

    /// Get reference to the session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get mutable reference to the session
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Advance the tick counter (spinner animation)
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl-C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return true;
        }

        if self.show_help {
            return self.handle_help_key(key);
        }

        match self.session.phase() {
            Phase::Idle => self.handle_input_key(key),
            Phase::Loading => self.handle_loading_key(key),
            Phase::Success => self.handle_list_key(key),
            Phase::Error => self.handle_error_key(key),
        }
    }

    /// Handle key while the help overlay is up
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return true;
            }
            _ => {
                // Any other key dismisses help
                self.show_help = false;
            }
        }
        false
    }

    /// Handle key in the goal input screen (Idle)
    fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                if !self.input.trim().is_empty() {
                    debug!(input_len = self.input.len(), "App: goal submitted");
                    self.pending_submit = Some(self.input.clone());
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => {
                if self.input.is_empty() {
                    self.should_quit = true;
                    return true;
                }
                self.input.clear();
            }
            // Digits fill a suggestion chip, but only into an empty buffer
            KeyCode::Char(c @ '1'..='3') if self.input.is_empty() => {
                let idx = (c as usize) - ('1' as usize);
                self.input = SUGGESTIONS[idx].to_string();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
            }
            _ => {}
        }
        false
    }

    /// Handle key while a request is in flight
    ///
    /// Submits are disabled here; the session ignores them defensively too.
    fn handle_loading_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return true;
        }
        false
    }

    /// Handle key in the checklist screen (Success)
    fn handle_list_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.session.steps().len().saturating_sub(1);
                self.selected = (self.selected + 1).min(max);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle_selected();
            }
            KeyCode::Char('n') | KeyCode::Char('r') => {
                self.start_over();
            }
            _ => {}
        }
        false
    }

    /// Handle key in the error screen
    fn handle_error_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Esc => {
                // Back to the input screen; the goal text is kept so the
                // user can resubmit or edit it
                self.session.reset();
            }
            _ => {}
        }
        false
    }

    /// Toggle the currently selected step
    fn toggle_selected(&mut self) {
        let Some(step) = self.session.steps().get(self.selected) else {
            return;
        };
        let id = step.id.clone();
        self.session.toggle_step(&id);
    }

    /// Clear the session and return to the input screen
    fn start_over(&mut self) {
        self.session.reset();
        self.input.clear();
        self.selected = 0;
    }

    /// Pick a fresh loading phrase (called when a submit is accepted)
    pub fn pick_loading_phrase(&mut self) {
        self.loading_phrase = LOADING_PHRASES.choose(&mut rand::rng()).copied().unwrap_or("Thinking");
    }
}
