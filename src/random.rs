//! Random sources for maze generation

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform integer draws over `[lo, hi)`.
///
/// Every random decision of the maze generator goes through this
/// primitive, so replacing the source replays the exact same maze.
pub trait RandomSource {
    /// Draw an integer from `lo` (inclusive) to `hi` (exclusive).
    ///
    /// Callers guarantee `lo < hi`.
    fn int_exclusive(&mut self, lo: usize, hi: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn int_exclusive(&mut self, lo: usize, hi: usize) -> usize {
        (**self).int_exclusive(lo, hi)
    }
}

/// Random source backed by a standard RNG, optionally seeded.
pub struct SeededRandom {
    random: StdRng,
}

impl SeededRandom {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }
}

impl RandomSource for SeededRandom {
    fn int_exclusive(&mut self, lo: usize, hi: usize) -> usize {
        self.random.gen_range(lo..hi)
    }
}

/// Replays a fixed sequence of draws, cycling when it runs out.
///
/// Each raw draw is folded into the requested range, so any sequence is
/// valid for any grid.
///
/// # Examples
/// ```
/// use corridor_maze::random::{RandomSource, ScriptedRandom};
///
/// let mut random = ScriptedRandom::new(vec![7, 2]);
/// assert_eq!(random.int_exclusive(0, 5), 2);
/// assert_eq!(random.int_exclusive(10, 20), 12);
/// assert_eq!(random.int_exclusive(0, 3), 1);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    draws: Vec<usize>,
    next: usize,
}

impl ScriptedRandom {
    /// An empty sequence always draws `lo`.
    pub fn new(draws: Vec<usize>) -> Self {
        Self { draws, next: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn int_exclusive(&mut self, lo: usize, hi: usize) -> usize {
        if self.draws.is_empty() {
            return lo;
        }
        let raw = self.draws[self.next % self.draws.len()];
        self.next += 1;
        lo + raw % (hi - lo)
    }
}
