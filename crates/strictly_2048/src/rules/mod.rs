//! Move-resolution rules.
//!
//! Pure functions over a [`Grid`](crate::Grid): the order cells are visited
//! in during a move, how far a tile slides, and whether any move remains.
//! They are kept apart from the game manager so they can be tested and
//! reasoned about without collaborators.

pub mod terminal;
pub mod traversal;

pub use terminal::{moves_available, tile_matches_available};
pub use traversal::{FarthestPosition, Traversals, build_traversals, find_farthest_position};
