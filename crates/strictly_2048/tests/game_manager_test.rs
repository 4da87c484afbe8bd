//! Tests for move resolution and the game lifecycle.

use serde_json::json;
use strictly_2048::{
    Direction, GameConfig, GameManager, GameStatus, Grid, InputEvent, MemoryStore, Metadata,
    Position, Presenter, ScriptedRandom, SeededRandom, Snapshot, Store, StoreError, Tile,
};

/// Presenter that remembers what it was asked to draw.
#[derive(Debug, Default)]
struct RecordingPresenter {
    renders: usize,
    overlay_clears: usize,
    last: Option<Metadata>,
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, _grid: &Grid, metadata: &Metadata) {
        self.renders += 1;
        self.last = Some(*metadata);
    }

    fn clear_overlay(&mut self) {
        self.overlay_clears += 1;
    }
}

/// In-memory store that counts writes.
#[derive(Debug, Default)]
struct RecordingStore {
    inner: MemoryStore,
    loads: usize,
    saves: usize,
    clears: usize,
    fail_loads: bool,
    fail_clears: bool,
}

impl RecordingStore {
    fn holding(snapshot: Snapshot) -> Self {
        Self {
            inner: MemoryStore::with_snapshot(snapshot, 0),
            ..Self::default()
        }
    }

    fn writes(&self) -> usize {
        self.saves + self.clears
    }
}

impl Store for RecordingStore {
    fn load(&mut self) -> Result<Option<Snapshot>, StoreError> {
        self.loads += 1;
        if self.fail_loads {
            return Err(StoreError::new("disk on fire"));
        }
        self.inner.load()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), StoreError> {
        self.saves += 1;
        self.inner.save(snapshot)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.clears += 1;
        if self.fail_clears {
            return Err(StoreError::new("read-only volume"));
        }
        self.inner.clear()
    }

    fn best_score(&self) -> Result<u64, StoreError> {
        self.inner.best_score()
    }

    fn set_best_score(&mut self, score: u64) -> Result<(), StoreError> {
        self.inner.set_best_score(score)
    }
}

type Manager = GameManager<RecordingPresenter, RecordingStore, ScriptedRandom>;

/// Builds a saved game from `(x, y, value)` tiles on a 4×4 grid.
fn saved_game(tiles: &[(i32, i32, u32)], score: u64, won: bool, keep_playing: bool) -> Snapshot {
    let mut cells = vec![vec![serde_json::Value::Null; 4]; 4];
    for &(x, y, value) in tiles {
        cells[x as usize][y as usize] = json!({ "x": x, "y": y, "value": value });
    }
    let value = json!({
        "grid": { "size": 4, "cells": cells },
        "score": score,
        "over": false,
        "won": won,
        "keepPlaying": keep_playing,
    });
    serde_json::from_value(value).expect("valid snapshot")
}

fn resume(tiles: &[(i32, i32, u32)]) -> Manager {
    resume_with(saved_game(tiles, 0, false, false), ScriptedRandom::first_cell_twos())
}

fn resume_with(snapshot: Snapshot, rng: ScriptedRandom) -> Manager {
    GameManager::new(
        GameConfig::default(),
        RecordingPresenter::default(),
        RecordingStore::holding(snapshot),
        rng,
    )
    .expect("default config is valid")
}

fn values(manager: &Manager) -> Vec<u32> {
    manager.state().grid().values()
}

fn value_at(manager: &Manager, x: i32, y: i32) -> Option<u32> {
    manager
        .state()
        .grid()
        .cell_content(Position::new(x, y))
        .tile()
        .map(Tile::value)
}

/// Tiles from a row-major layout; 0 marks an empty cell.
fn layout(rows: [[u32; 4]; 4]) -> Vec<(i32, i32, u32)> {
    let mut tiles = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            if value != 0 {
                tiles.push((x as i32, y as i32, value));
            }
        }
    }
    tiles
}

#[test]
fn test_tile_at_wall_is_not_an_effective_move() {
    let mut game = resume(&[(0, 0, 2)]);
    let saves = game.store().saves;
    let renders = game.presenter().renders;

    let outcome = game.make_move(Direction::Left);

    assert!(!outcome.is_effective());
    assert!(outcome.spawned().is_none());
    assert_eq!(game.state().grid().tiles().count(), 1);
    assert_eq!(game.store().saves, saves);
    assert_eq!(game.presenter().renders, renders);
}

#[test]
fn test_adjacent_pair_merges_and_spawns() {
    let mut game = resume(&[(0, 0, 2), (1, 0, 2)]);
    let saves = game.store().saves;

    let outcome = game.make_move(Direction::Left);

    assert!(outcome.is_effective());
    assert_eq!(value_at(&game, 0, 0), Some(4));
    assert_eq!(game.state().score(), 4);
    assert_eq!(outcome.merges(), &vec![Position::new(0, 0)]);
    assert_eq!(game.state().grid().tiles().count(), 2);
    assert!(!game.state().over());
    assert_eq!(game.store().saves, saves + 1);
}

#[test]
fn test_row_of_four_twos_makes_two_fours() {
    let mut game = resume(&[(0, 2, 2), (1, 2, 2), (2, 2, 2), (3, 2, 2)]);

    let outcome = game.make_move(Direction::Left);

    assert_eq!(value_at(&game, 0, 2), Some(4));
    assert_eq!(value_at(&game, 1, 2), Some(4));
    assert_eq!(value_at(&game, 2, 2), None);
    assert_eq!(value_at(&game, 3, 2), None);
    assert_eq!(*outcome.score_gained(), 8);
}

#[test]
fn test_row_of_four_twos_moving_right() {
    let mut game = resume(&[(0, 1, 2), (1, 1, 2), (2, 1, 2), (3, 1, 2)]);

    game.make_move(Direction::Right);

    assert_eq!(value_at(&game, 3, 1), Some(4));
    assert_eq!(value_at(&game, 2, 1), Some(4));
    assert_eq!(value_at(&game, 1, 1), None);
}

#[test]
fn test_column_merges_toward_leading_edge() {
    // 2 over 2 over 4: the 2s merge beside the 4 instead of chaining into an 8.
    let mut game = resume(&[(1, 0, 2), (1, 1, 2), (1, 3, 4)]);

    game.make_move(Direction::Down);

    assert_eq!(value_at(&game, 1, 3), Some(4));
    assert_eq!(value_at(&game, 1, 2), Some(4));
    assert_eq!(value_at(&game, 1, 1), None);
}

#[test]
fn test_three_equal_tiles_merge_leading_pair() {
    let mut game = resume(&[(0, 0, 8), (0, 1, 8), (0, 2, 8)]);

    game.make_move(Direction::Up);

    assert_eq!(value_at(&game, 0, 0), Some(16));
    assert_eq!(value_at(&game, 0, 1), Some(8));
}

#[test]
fn test_effective_move_spawns_exactly_one_tile_on_free_cell() {
    let tiles = [(3, 0, 2), (3, 1, 4), (0, 3, 8)];
    for seed in 0..20usize {
        let picks = vec![seed * 7 % 13];
        let units = vec![if seed % 3 == 0 { 0.95 } else { 0.3 }];
        let mut game = resume_with(
            saved_game(&tiles, 0, false, false),
            ScriptedRandom::new(picks, units),
        );
        let before = values(&game);
        let direction = Direction::all().nth(seed % 4).expect("four directions");

        let outcome = game.make_move(direction);
        if !outcome.is_effective() {
            continue;
        }

        let spawned = outcome.spawned().as_ref().expect("effective move spawns");
        assert!(spawned.value() == 2 || spawned.value() == 4);
        assert_eq!(game.state().grid().tiles().count(), tiles.len() + 1);

        // Removing the spawn leaves exactly the value that was there before.
        let mut without_spawn = values(&game);
        let index = spawned.position().y as usize * 4 + spawned.position().x as usize;
        assert_eq!(without_spawn[index], spawned.value());
        without_spawn[index] = 0;
        assert_eq!(
            without_spawn.iter().sum::<u32>(),
            before.iter().sum::<u32>()
        );
    }
}

#[test]
fn test_terminated_game_ignores_every_direction() {
    let mut game = resume_with(
        saved_game(&[(0, 0, 2048), (1, 0, 2)], 20_000, true, false),
        ScriptedRandom::first_cell_twos(),
    );
    assert_eq!(game.status(), GameStatus::Won);
    let before = game.state().clone();
    let writes = game.store().writes();
    let renders = game.presenter().renders;

    for direction in Direction::all() {
        let outcome = game.make_move(direction);
        assert!(!outcome.is_effective());
    }

    assert_eq!(game.state(), &before);
    assert_eq!(game.store().writes(), writes);
    assert_eq!(game.presenter().renders, renders);
}

#[test]
fn test_reaching_2048_wins_and_stays_won() {
    let mut game = resume(&[(0, 0, 1024), (1, 0, 1024)]);

    game.make_move(Direction::Left);

    assert!(game.state().won());
    assert!(game.is_terminated());
    assert_eq!(game.status(), GameStatus::Won);
    let last = game.presenter().last.expect("rendered");
    assert!(*last.won());
    assert!(*last.terminated());

    game.keep_playing();
    assert!(!game.is_terminated());
    assert!(game.presenter().overlay_clears >= 1);

    game.make_move(Direction::Right);
    game.make_move(Direction::Down);
    assert!(game.state().won());
    assert_eq!(game.status(), GameStatus::Playing);

    game.restart();
    assert!(!game.state().won());
    assert!(!game.state().keep_playing());
}

#[test]
fn test_keep_playing_is_saved() {
    let mut game = resume_with(
        saved_game(&[(0, 0, 2048)], 20_000, true, false),
        ScriptedRandom::first_cell_twos(),
    );

    game.handle(InputEvent::KeepPlaying);

    let saved = game.store().inner.snapshot().expect("saved");
    assert!(*saved.keep_playing());
    assert!(!*game.presenter().last.expect("rendered").terminated());
}

#[test]
fn test_game_over_detected_and_save_cleared() {
    // Only the bottom row can move; the 4 spawned into (3,3) leaves no pair.
    let tiles = layout([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [32, 64, 32, 16],
        [0, 2, 4, 8],
    ]);
    let mut game = resume_with(
        saved_game(&tiles, 100, false, false),
        ScriptedRandom::new(vec![0], vec![0.95]),
    );

    let outcome = game.make_move(Direction::Left);

    assert!(outcome.is_effective());
    assert_eq!(value_at(&game, 3, 3), Some(4));
    assert!(game.state().over());
    assert_eq!(game.status(), GameStatus::Over);
    assert!(game.store().inner.snapshot().is_none());
    assert!(game.store().clears >= 1);
    assert!(*game.presenter().last.expect("rendered").over());

    let writes = game.store().writes();
    game.make_move(Direction::Right);
    assert_eq!(game.store().writes(), writes);
}

#[test]
fn test_full_grid_with_pair_is_not_over() {
    // The spawned 4 lands under another 4: the grid is full but can merge.
    let tiles = layout([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [32, 64, 32, 4],
        [0, 2, 4, 8],
    ]);
    let mut game = resume_with(
        saved_game(&tiles, 0, false, false),
        ScriptedRandom::new(vec![0], vec![0.95]),
    );

    game.make_move(Direction::Left);

    assert!(!game.state().grid().cells_available());
    assert!(!game.state().over());
}

#[test]
fn test_restart_starts_fresh_game() {
    let mut game = resume(&[(0, 0, 64), (1, 0, 64)]);
    game.make_move(Direction::Left);
    assert_eq!(game.state().score(), 128);

    game.handle(InputEvent::Restart);

    assert_eq!(game.state().score(), 0);
    assert_eq!(game.state().grid().tiles().count(), 2);
    assert!(game.presenter().overlay_clears >= 1);
    assert!(game.store().clears >= 1);
    assert_eq!(game.store().best_score().expect("best"), 128);
    assert_eq!(*game.presenter().last.expect("rendered").best_score(), 128);
}

#[test]
fn test_restart_ignores_save_that_could_not_be_cleared() {
    let mut store =
        RecordingStore::holding(saved_game(&[(0, 0, 64), (1, 0, 64)], 0, false, false));
    store.fail_clears = true;
    let mut game = GameManager::new(
        GameConfig::default(),
        RecordingPresenter::default(),
        store,
        ScriptedRandom::first_cell_twos(),
    )
    .expect("valid config");
    game.make_move(Direction::Left);
    game.make_move(Direction::Right);
    let played = values(&game);
    assert_eq!(game.state().score(), 128);

    game.restart();

    assert_eq!(game.state().score(), 0);
    assert_eq!(game.state().grid().tiles().count(), 2);
    assert_ne!(values(&game), played);
    assert_eq!(game.store().loads, 1);
    assert_eq!(game.store().clears, 1);
    assert_eq!(game.presenter().last.expect("rendered").score(), &0);
}

#[test]
fn test_largest_tiles_slide_without_merging() {
    let top = 1u32 << 31;
    let mut game = resume(&[(1, 0, top), (3, 0, top)]);

    let outcome = game.make_move(Direction::Left);

    assert!(outcome.is_effective());
    assert!(outcome.merges().is_empty());
    assert_eq!(value_at(&game, 0, 0), Some(top));
    assert_eq!(value_at(&game, 1, 0), Some(top));
    assert_eq!(game.state().score(), 0);

    let outcome = game.make_move(Direction::Left);
    assert!(outcome.merges().is_empty());
    assert_eq!(value_at(&game, 0, 0), Some(top));
}

#[test]
fn test_score_saturates_instead_of_overflowing() {
    let mut game = resume_with(
        saved_game(&[(0, 0, 2), (1, 0, 2)], u64::MAX - 1, false, false),
        ScriptedRandom::first_cell_twos(),
    );

    let outcome = game.make_move(Direction::Left);

    assert_eq!(value_at(&game, 0, 0), Some(4));
    assert_eq!(*outcome.score_gained(), 4);
    assert_eq!(game.state().score(), u64::MAX);
}

#[test]
fn test_snapshot_round_trip_preserves_state() {
    let mut game = resume_with(
        saved_game(&[(0, 0, 2), (0, 1, 2), (3, 3, 16)], 40, false, false),
        ScriptedRandom::new(vec![3, 5, 1], vec![0.2, 0.97]),
    );
    game.run([
        InputEvent::Move(Direction::Up),
        InputEvent::Move(Direction::Left),
        InputEvent::Move(Direction::Down),
    ]);

    let snapshot = game.state().to_snapshot();
    let json = snapshot.to_json().expect("serializes");
    let restored = Snapshot::from_json(&json).expect("parses");
    assert_eq!(restored, snapshot);

    let resumed = resume_with(restored, ScriptedRandom::first_cell_twos());
    assert_eq!(values(&resumed), values(&game));
    assert_eq!(resumed.state().score(), game.state().score());
    assert_eq!(resumed.state().won(), game.state().won());
    assert_eq!(resumed.state().over(), game.state().over());
    assert_eq!(resumed.state().keep_playing(), game.state().keep_playing());
}

#[test]
fn test_malformed_save_falls_back_to_fresh_game() {
    let bad: Snapshot = serde_json::from_value(json!({
        "grid": { "size": 2, "cells": [[null], [null, null]] },
        "score": 10, "over": false, "won": false, "keepPlaying": false,
    }))
    .expect("shape is valid JSON");

    let game = resume_with(bad, ScriptedRandom::first_cell_twos());

    assert_eq!(game.state().score(), 0);
    assert_eq!(game.state().grid().size(), 4);
    assert_eq!(game.state().grid().tiles().count(), 2);
}

#[test]
fn test_failing_load_falls_back_to_fresh_game() {
    let store = RecordingStore {
        fail_loads: true,
        ..RecordingStore::default()
    };
    let game = GameManager::new(
        GameConfig::default(),
        RecordingPresenter::default(),
        store,
        ScriptedRandom::first_cell_twos(),
    )
    .expect("valid config");

    assert_eq!(game.store().loads, 1);
    assert_eq!(game.state().grid().tiles().count(), 2);
    assert_eq!(game.presenter().renders, 1);
}

#[test]
fn test_invalid_direction_code_changes_nothing() {
    let mut game = resume(&[(3, 3, 2)]);
    let before = game.state().clone();
    let writes = game.store().writes();

    let outcome = game.move_code(7);

    assert!(!outcome.is_effective());
    assert_eq!(game.state(), &before);
    assert_eq!(game.store().writes(), writes);

    let outcome = game.move_code(3);
    assert!(outcome.is_effective());
    assert_eq!(value_at(&game, 0, 3), Some(2));
}

#[test]
fn test_config_grid_size_respected() {
    let game = GameManager::new(
        GameConfig::default().with_size(6).with_start_tiles(3),
        RecordingPresenter::default(),
        RecordingStore::default(),
        SeededRandom::from_seed(5),
    )
    .expect("valid config");

    assert_eq!(game.state().grid().size(), 6);
    assert_eq!(game.state().grid().tiles().count(), 3);
}

#[test]
fn test_invalid_config_rejected() {
    let result = GameManager::new(
        GameConfig::default().with_size(0),
        RecordingPresenter::default(),
        RecordingStore::default(),
        ScriptedRandom::first_cell_twos(),
    );
    assert!(result.is_err());
}
