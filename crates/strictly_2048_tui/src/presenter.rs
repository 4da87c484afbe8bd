//! Presenter drawing the game into a ratatui terminal.

use crate::ui::{self, Banner, BoardView};
use ratatui::{Terminal, backend::Backend};
use strictly_2048::{Grid, Metadata, Presenter};
use tracing::{debug, instrument, warn};

/// Draws every state change into a terminal.
///
/// Generic over the backend so tests can render into a `TestBackend`.
pub struct TerminalPresenter<B: Backend> {
    terminal: Terminal<B>,
    view: BoardView,
}

impl<B: Backend> TerminalPresenter<B> {
    /// Wraps a terminal.
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            view: BoardView::default(),
        }
    }

    /// Returns what was last drawn.
    pub fn view(&self) -> &BoardView {
        &self.view
    }

    /// Returns the underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Returns the underlying terminal mutably, for teardown.
    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    fn redraw(&mut self) {
        let view = &self.view;
        if let Err(e) = self.terminal.draw(|frame| ui::draw(frame, view)) {
            warn!(error = ?e, "Failed to draw frame");
        }
    }
}

impl<B: Backend> Presenter for TerminalPresenter<B> {
    #[instrument(skip_all, fields(score = *metadata.score()))]
    fn render(&mut self, grid: &Grid, metadata: &Metadata) {
        self.view = BoardView {
            size: grid.size(),
            values: grid.values(),
            score: *metadata.score(),
            best_score: *metadata.best_score(),
            banner: Banner::for_metadata(metadata),
        };
        debug!(banner = ?self.view.banner, "Rendering board");
        self.redraw();
    }

    #[instrument(skip_all)]
    fn clear_overlay(&mut self) {
        self.view.banner = None;
        self.redraw();
    }
}
