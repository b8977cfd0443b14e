//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

/// Ask for an explanation and watch it drawn on a whiteboard
#[derive(Debug, Parser)]
#[command(
    name = "chalk",
    version,
    about = "AI whiteboard explainer: animated chalk drawings with step-by-step captions"
)]
pub struct Cli {
    /// What to explain (opens an empty whiteboard when omitted)
    pub prompt: Option<String>,

    /// Config file path (default: .chalkboard.yml, then ~/.config/chalkboard/config.yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print captions to stdout instead of opening the TUI
    #[arg(long)]
    pub no_tui: bool,

    /// Override the per-step duration in milliseconds
    #[arg(long, value_name = "MS")]
    pub step_duration_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
