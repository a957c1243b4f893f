//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Unstick - break overwhelming tasks into tiny steps
#[derive(Parser)]
#[command(
    name = "unstick",
    about = "Break overwhelming tasks into tiny, doable steps with a little AI help",
    version,
    after_help = "Logs are written to: ~/.local/share/unstick/logs/unstick.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Launch the interactive checklist TUI (default)
    Tui,

    /// Break a goal down once and print the steps
    Run {
        /// The overwhelming goal to break down
        #[arg(value_name = "GOAL")]
        goal: String,
    },
}
