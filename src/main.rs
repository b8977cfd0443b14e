//! chalk - CLI entry point
//!
//! Wires logging, config, the plan fetcher and the playback orchestrator
//! together, then hands control to the TUI or the headless caption printer.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result, eyre};
use tracing::info;

use chalkboard::cli::Cli;
use chalkboard::config::Config;
use chalkboard::playback::{Orchestrator, PlaybackHandle, Status};
use chalkboard::{create_fetcher, tui};

fn setup_logging(verbose: bool) -> Result<()> {
    // Log to a file, not stdout/stderr - the TUI owns the terminal
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chalkboard")
        .join("logs");
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let log_file =
        fs::File::create(log_dir.join("chalkboard.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Headless mode has no prompt box, and the orchestrator drops blank
    // prompts without publishing anything to wait on, so reject them up front
    if cli.no_tui && !cli.prompt.as_deref().is_some_and(|p| !p.trim().is_empty()) {
        return Err(eyre!("a non-blank prompt is required with --no-tui"));
    }

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(ms) = cli.step_duration_ms {
        config.playback.step_duration_ms = ms;
    }
    config.validate()?;

    info!(
        provider = %config.llm.provider,
        model = %config.llm.model,
        step_duration_ms = config.playback.step_duration_ms,
        "chalk starting"
    );

    let fetcher = create_fetcher(&config.llm)?;
    let orchestrator = Orchestrator::new(config.playback.clone(), fetcher);
    let handle = orchestrator.handle();
    tokio::spawn(orchestrator.run());

    if cli.no_tui {
        // Non-blank by the check above
        let prompt = cli.prompt.unwrap_or_default();
        return run_headless(handle, prompt).await;
    }

    let terminal = tui::init()?;
    let result = tui::run(terminal, handle, cli.prompt).await;
    tui::restore()?;
    result
}

/// Print each caption as it becomes active, then exit on Done or Error
async fn run_headless(handle: PlaybackHandle, prompt: String) -> Result<()> {
    let mut snapshots = handle.subscribe();
    handle.submit(prompt).await?;

    let mut last_caption = String::new();
    loop {
        snapshots
            .changed()
            .await
            .map_err(|_| eyre!("playback ended unexpectedly"))?;
        let snapshot = snapshots.borrow_and_update().clone();

        if snapshot.caption != last_caption && !snapshot.caption.is_empty() {
            println!("{}", snapshot.caption);
            last_caption = snapshot.caption.clone();
        }

        match snapshot.status {
            Status::Done => break,
            Status::Error => {
                let message = snapshot
                    .error
                    .unwrap_or_else(|| "unknown failure".to_string());
                handle.shutdown().await.ok();
                return Err(eyre!(message));
            }
            _ => {}
        }
    }

    handle.shutdown().await.ok();
    Ok(())
}
