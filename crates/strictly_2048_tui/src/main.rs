//! Strictly 2048 - terminal entry point.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use strictly_2048::{GameManager, SeededRandom};
use strictly_2048_tui::{Cli, Command, JsonFileStore, KeyboardInput, Settings, TerminalPresenter};
use tracing::{error, info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load_or_default(&cli.config)?.with_overrides(&cli)?;

    init_tracing(settings.log_file())?;
    info!(config = %cli.config.display(), "Starting strictly_2048");

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(&settings, cli.seed),
        Command::Reset => reset(&settings),
    }
}

/// Logs go to a file so they never tear the board.
fn init_tracing(log_file: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[instrument(skip(settings))]
fn play(settings: &Settings, seed: Option<u64>) -> Result<()> {
    let store = JsonFileStore::new(settings.save_dir())?;
    let rng = seed.map_or_else(SeededRandom::from_entropy, SeededRandom::from_seed);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let outcome = GameManager::new(
        settings.game().clone(),
        TerminalPresenter::new(terminal),
        store,
        rng,
    )
    .map(|mut game| {
        game.run(KeyboardInput::new());
        info!(status = %game.status(), score = game.state().score(), "Session ended");
        if let Err(e) = game.presenter_mut().terminal_mut().show_cursor() {
            warn!(error = %e, "Failed to show cursor");
        }
    });

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    if let Err(e) = &outcome {
        error!(error = %e, "Failed to start game");
    }
    outcome?;
    Ok(())
}

#[instrument(skip(settings))]
fn reset(settings: &Settings) -> Result<()> {
    let mut store = JsonFileStore::new(settings.save_dir())?;
    store.reset()?;
    println!("Cleared saved game and best score in {}", store.dir().display());
    Ok(())
}
