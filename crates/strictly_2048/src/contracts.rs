//! Postconditions of an effective move.
//!
//! Checked after every effective move in debug builds. A contract violation
//! means the move-resolution code is wrong, never that the player did
//! something invalid.

use super::game::MoveOutcome;
use super::grid::Grid;
use super::invariants::{GridInvariants, InvariantSet, InvariantViolation};
use super::state::GameState;
use tracing::{instrument, warn};

/// Contract relating the state before and after an effective move.
///
/// Postconditions:
/// - Score never decreases, and grows by exactly the reported gain
/// - `won` never reverts to false
/// - Merging conserves the tile total; only the spawned tile adds value
/// - Every grid invariant still holds
pub struct MoveContract;

fn tile_total(grid: &Grid) -> u64 {
    grid.tiles().map(|tile| u64::from(tile.value())).sum()
}

impl MoveContract {
    /// Checks every postcondition, collecting all violations.
    #[instrument(skip_all)]
    pub fn post(
        before: &GameState,
        after: &GameState,
        outcome: &MoveOutcome,
    ) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if after.score() < before.score() {
            violations.push(InvariantViolation::new("Score decreased"));
        } else if after.score() != before.score().saturating_add(*outcome.score_gained()) {
            violations.push(InvariantViolation::new("Score gain does not match merges"));
        }

        if before.won() && !after.won() {
            violations.push(InvariantViolation::new("Won flag reverted"));
        }

        let spawned = outcome
            .spawned()
            .as_ref()
            .map_or(0, |tile| u64::from(tile.value()));
        if tile_total(after.grid()) != tile_total(before.grid()) + spawned {
            violations.push(InvariantViolation::new("Tile total not conserved"));
        }

        if let Err(grid_violations) = GridInvariants::check_all(after.grid()) {
            violations.extend(grid_violations);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            warn!(count = violations.len(), "Move postconditions violated");
            Err(violations)
        }
    }
}
