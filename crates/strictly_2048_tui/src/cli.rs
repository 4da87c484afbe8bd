//! Command-line interface for strictly_2048.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly 2048 - slide, merge, reach 2048
#[derive(Parser, Debug)]
#[command(name = "strictly_2048_tui")]
#[command(about = "Sliding-tile merge puzzle in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the settings file
    #[arg(short, long, default_value = "strictly_2048.toml")]
    pub config: PathBuf,

    /// Grid side length (overrides the settings file)
    #[arg(long)]
    pub size: Option<usize>,

    /// Seed for tile spawning; random if omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding the saved game and best score
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// File receiving log output
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal, resuming the saved game if there is one
    Play,

    /// Delete the saved game and the best score
    Reset,
}
