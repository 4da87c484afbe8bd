//! The game manager: move resolution and game lifecycle.
//!
//! A [`GameManager`] owns the [`GameState`] and its three collaborators. Each
//! input is processed to completion before the next one: a move either
//! commits fully (grid mutated, tile spawned, state pushed) or changes
//! nothing at all.

use super::collaborators::{InputEvent, Presenter, Store};
use super::config::{ConfigError, GameConfig};
use super::contracts::MoveContract;
use super::position::{Direction, Position};
use super::random::RandomSource;
use super::rules::{self, FarthestPosition};
use super::state::{GameState, GameStatus, Metadata};
use super::tile::Tile;
use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

/// What a single move did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct MoveOutcome {
    /// True if at least one tile changed position.
    moved: bool,
    /// Sum of the values of the tiles created by merges.
    score_gained: u64,
    /// Cells where merges produced a new tile, in processing order.
    merges: Vec<Position>,
    /// The tile spawned after the move, if any.
    spawned: Option<Tile>,
}

impl MoveOutcome {
    /// Returns true if the move changed the grid.
    pub fn is_effective(&self) -> bool {
        self.moved
    }
}

/// Drives one game: owns its state and talks to the collaborators.
#[derive(Debug)]
pub struct GameManager<P, S, R> {
    config: GameConfig,
    state: GameState,
    presenter: P,
    store: S,
    rng: R,
}

impl<P, S, R> GameManager<P, S, R>
where
    P: Presenter,
    S: Store,
    R: RandomSource,
{
    /// Creates a manager and sets up the game.
    ///
    /// A game saved in `store` is resumed; otherwise a fresh one starts. The
    /// initial state is rendered before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` does not describe a playable game.
    #[instrument(skip_all, fields(size = config.size()))]
    pub fn new(config: GameConfig, presenter: P, store: S, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::empty(*config.size());
        let mut manager = Self {
            config,
            state,
            presenter,
            store,
            rng,
        };
        manager.setup();
        Ok(manager)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the status of the current game.
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    /// Returns true if moves are no longer accepted.
    pub fn is_terminated(&self) -> bool {
        self.state.is_terminated()
    }

    /// Returns the presentation sink.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Returns the presentation sink mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Returns the persistence store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Dispatches one input event.
    #[instrument(skip(self))]
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move(direction) => {
                self.make_move(direction);
            }
            InputEvent::Restart => self.restart(),
            InputEvent::KeepPlaying => self.keep_playing(),
        }
    }

    /// Processes events in arrival order until the source is exhausted.
    pub fn run<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            self.handle(event);
        }
    }

    /// Loads the saved game or starts a fresh one, then renders.
    #[instrument(skip(self))]
    fn setup(&mut self) {
        let restored = match self.store.load() {
            Ok(Some(snapshot)) => match GameState::from_snapshot(&snapshot) {
                Ok(state) => Some(state),
                Err(e) => {
                    warn!(error = %e, "Saved game is malformed; starting fresh");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Could not load saved game; starting fresh");
                None
            }
        };

        match restored {
            Some(state) => {
                info!(
                    score = state.score(),
                    size = state.grid().size(),
                    status = %state.status(),
                    "Resumed saved game"
                );
                self.state = state;
                self.actuate();
            }
            None => self.start_fresh(),
        }
    }

    /// Replaces the state with a fresh game, then renders.
    fn start_fresh(&mut self) {
        self.state = GameState::empty(*self.config.size());
        self.add_start_tiles();
        info!(size = self.config.size(), "Started fresh game");
        self.actuate();
    }

    /// Discards the current game and starts a fresh one.
    ///
    /// The saved game is never reloaded, even if clearing it fails.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!(score = self.state.score(), "Restarting game");
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Could not clear saved game");
        }
        self.presenter.clear_overlay();
        self.start_fresh();
    }

    /// Lets the player continue after reaching the winning tile.
    ///
    /// The grid is untouched; the updated flag is saved and rendered.
    #[instrument(skip(self))]
    pub fn keep_playing(&mut self) {
        info!(won = self.state.won(), "Keep playing");
        self.state.keep_playing = true;
        self.presenter.clear_overlay();
        self.actuate();
    }

    /// Applies a move given as a raw direction code (0 = up, 1 = right,
    /// 2 = down, 3 = left). Unknown codes are ignored.
    #[instrument(skip(self))]
    pub fn move_code(&mut self, code: u8) -> MoveOutcome {
        match Direction::try_from(code) {
            Ok(direction) => self.make_move(direction),
            Err(e) => {
                warn!(error = %e, "Ignoring invalid direction");
                MoveOutcome::default()
            }
        }
    }

    /// Slides every tile in `direction`, merging equal neighbours.
    ///
    /// A terminated game ignores the move entirely. A move that shifts no
    /// tile spawns nothing and pushes nothing to the collaborators.
    #[instrument(skip(self))]
    pub fn make_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.state.is_terminated() {
            debug!(status = %self.state.status(), "Game terminated; move ignored");
            return MoveOutcome::default();
        }

        #[cfg(debug_assertions)]
        let before = self.state.clone();

        let mut outcome = MoveOutcome::default();
        self.prepare_tiles();

        let traversals = rules::build_traversals(self.state.grid.size(), direction);
        for cell in traversals.positions() {
            let Some(tile) = self.state.grid.cell_content(cell).tile().cloned() else {
                continue;
            };

            let FarthestPosition { farthest, next } =
                rules::find_farthest_position(&self.state.grid, cell, direction);
            let merged = self
                .state
                .grid
                .cell_content(next)
                .tile()
                .filter(|other| other.can_merge_with(&tile) && !other.is_merged())
                .and_then(|target| Tile::merged(&tile, target));

            let tile_moved = match merged {
                Some(merged) => {
                    let value = merged.value();
                    self.state.grid.insert_tile(merged);
                    self.state.grid.remove_tile(&tile);

                    let mut mover = tile;
                    mover.update_position(next);

                    self.state.score = self.state.score.saturating_add(u64::from(value));
                    outcome.score_gained = outcome.score_gained.saturating_add(u64::from(value));
                    outcome.merges.push(next);
                    debug!(from = %cell, into = %next, value, "Merged tiles");

                    if value >= *self.config.winning_value() && !self.state.won {
                        info!(value, score = self.state.score, "Winning tile reached");
                        self.state.won = true;
                    }
                    mover.has_moved()
                }
                None => {
                    self.state.grid.move_tile(cell, farthest);
                    self.state
                        .grid
                        .cell_content(farthest)
                        .tile()
                        .is_some_and(Tile::has_moved)
                }
            };

            outcome.moved |= tile_moved;
        }

        if !outcome.moved {
            debug!(%direction, "Move changed nothing");
            return outcome;
        }

        outcome.spawned = self.add_random_tile();

        if !rules::moves_available(&self.state.grid) {
            info!(score = self.state.score, "Game over");
            self.state.over = true;
        }

        #[cfg(debug_assertions)]
        {
            let checked = MoveContract::post(&before, &self.state, &outcome);
            debug_assert!(checked.is_ok(), "Move postcondition failed: {:?}", checked);
        }

        debug!(
            %direction,
            score = self.state.score,
            gained = outcome.score_gained,
            merges = outcome.merges.len(),
            "Move applied"
        );
        self.actuate();
        outcome
    }

    /// Clears merge markers and records each tile's pre-move position.
    fn prepare_tiles(&mut self) {
        for tile in self.state.grid.tiles_mut() {
            tile.prepare_for_move();
        }
    }

    fn add_start_tiles(&mut self) {
        for _ in 0..*self.config.start_tiles() {
            self.add_random_tile();
        }
    }

    /// Spawns a 2 or a 4 on a random empty cell. Does nothing on a full grid.
    #[instrument(skip(self))]
    fn add_random_tile(&mut self) -> Option<Tile> {
        if !self.state.grid.cells_available() {
            debug!("Grid full; no tile spawned");
            return None;
        }

        let value = if self.rng.unit() < 1.0 - *self.config.four_probability() {
            2
        } else {
            4
        };
        let position = self.state.grid.random_available_cell(&mut self.rng)?;
        let tile = Tile::new(position, value);
        self.state.grid.insert_tile(tile.clone());
        debug!(%position, value, "Spawned tile");
        Some(tile)
    }

    /// Pushes the current state to the store and the presenter.
    ///
    /// Store failures are logged and otherwise ignored.
    #[instrument(skip(self))]
    fn actuate(&mut self) {
        let score = self.state.score;
        let mut best_score = self.store.best_score().unwrap_or_else(|e| {
            warn!(error = %e, "Could not read best score");
            0
        });
        if best_score < score {
            if let Err(e) = self.store.set_best_score(score) {
                warn!(error = %e, "Could not record best score");
            }
            best_score = score;
        }

        let persisted = if self.state.over {
            self.store.clear()
        } else {
            self.store.save(&self.state.to_snapshot())
        };
        if let Err(e) = persisted {
            warn!(error = %e, "Could not persist game");
        }

        let metadata = Metadata::new(
            score,
            self.state.over,
            self.state.won,
            best_score,
            self.state.is_terminated(),
        );
        self.presenter.render(&self.state.grid, &metadata);
    }
}
