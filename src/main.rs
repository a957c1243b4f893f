//! Unstick - break overwhelming tasks into tiny, doable steps
//!
//! CLI entry point for the checklist TUI and the one-shot mode.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use unstick::cli::{Cli, Command};
use unstick::config::Config;
use unstick::llm::create_client;
use unstick::planner::BreakdownPlanner;
use unstick::tui;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("unstick")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    // (the TUI owns the terminal)
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("unstick.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "Unstick loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        Some(Command::Run { goal }) => cmd_run(&config, &goal).await,
        Some(Command::Tui) | None => cmd_tui(&config).await,
    }
}

/// Launch the interactive checklist TUI
async fn cmd_tui(config: &Config) -> Result<()> {
    config.validate()?;

    let llm = create_client(&config.llm)?;
    let planner = Arc::new(BreakdownPlanner::from_config(llm, config)?);

    tui::run(planner).await
}

/// Break a goal down once and print the steps (non-interactive)
async fn cmd_run(config: &Config, goal: &str) -> Result<()> {
    config.validate()?;

    if goal.trim().is_empty() {
        eyre::bail!("Goal is empty. Tell me what you're stuck on.");
    }

    let llm = create_client(&config.llm)?;
    let planner = BreakdownPlanner::from_config(llm, config)?;

    println!("{}", "Breaking it down...".dimmed());

    let output = match planner.break_down(goal).await {
        Ok(output) => output,
        Err(e) => {
            // Detail goes to the log; the user gets the generic message
            tracing::error!(error = %e, "Breakdown request failed");
            eprintln!("{}", unstick::GENERIC_ERROR.red());
            std::process::exit(1);
        }
    };

    println!();
    println!("  {}", format!("\"{}\"", output.overall_vibe).cyan().italic());
    println!();

    for (idx, step) in output.steps.iter().enumerate() {
        println!("  {} {}", format!("{}.", idx + 1).yellow(), step.title.bold());
        println!("     {}", step.description);
        println!("     {}", format!("💡 {}", step.motivation).dimmed());
        println!();
    }

    Ok(())
}
