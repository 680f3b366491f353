use crate::config_set::ConfigSet;
use crate::space::SearchSpace;

/// Draws configurations from the search-space prior directly into a [`ConfigSet`].
///
/// Used by [`TpeBandit`](super::TpeBandit) while warming up. Built lazily and
/// never persisted.
#[derive(Debug)]
pub struct PriorSampler {
    space: SearchSpace,
    rng: fastrand::Rng,
}

impl PriorSampler {
    /// Creates a prior sampler over `space` seeded with `seed`.
    #[must_use]
    pub fn new(space: &SearchSpace, seed: u64) -> Self {
        Self {
            space: space.clone(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Draws `n` configurations numbered `0..n`.
    pub fn draw(&mut self, n: usize) -> ConfigSet {
        let mut set = ConfigSet::empty(self.space.len());
        for idx in 0..n {
            let row = self.space.sample_row(&mut self.rng);
            set.push_row(idx, &row);
        }
        set
    }
}
