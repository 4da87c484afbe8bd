//! Terminal front end for the strictly_2048 rules engine.
//!
//! Provides the pieces the `strictly_2048_tui` binary wires together: a
//! command line, a TOML settings file, a JSON file store for saves, keyboard
//! input, and a ratatui presenter.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod input;
mod presenter;
mod settings;
mod store;
mod ui;

pub use cli::{Cli, Command};
pub use input::{KeyAction, KeyboardInput, map_key};
pub use presenter::TerminalPresenter;
pub use settings::Settings;
pub use store::JsonFileStore;
pub use ui::{Banner, BoardView, draw};
