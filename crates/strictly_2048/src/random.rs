//! Injectable randomness for tile spawning.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;

/// Source of the two random choices a spawn needs.
pub trait RandomSource {
    /// Returns a uniformly chosen index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Returns a uniformly chosen number in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }

    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

/// Pseudo-random source backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Creates a reproducible source from a seed.
    #[instrument]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from the operating system.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Deterministic source that replays fixed sequences.
///
/// Each sequence cycles once exhausted. An empty `picks` sequence always
/// picks index 0 and an empty `units` sequence always yields 0.0 (which
/// spawns a 2 under the default odds).
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    picks: Vec<usize>,
    units: Vec<f64>,
    pick_cursor: usize,
    unit_cursor: usize,
}

impl ScriptedRandom {
    /// Creates a source replaying `picks` for cell choices and `units` for
    /// value rolls.
    pub fn new(picks: Vec<usize>, units: Vec<f64>) -> Self {
        Self {
            picks,
            units,
            pick_cursor: 0,
            unit_cursor: 0,
        }
    }

    /// A source that always picks the first free cell and always rolls a 2.
    pub fn first_cell_twos() -> Self {
        Self::default()
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let value = self.picks[self.pick_cursor % self.picks.len()];
        self.pick_cursor += 1;
        value % len.max(1)
    }

    fn unit(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let value = self.units[self.unit_cursor % self.units.len()];
        self.unit_cursor += 1;
        value
    }
}
