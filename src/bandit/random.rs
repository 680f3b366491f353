//! Random baseline bandit.

use parking_lot::Mutex;

use crate::bandit::Bandit;
use crate::error::{Error, Result};
use crate::history::History;
use crate::space::{Configuration, SearchSpace};

/// A baseline bandit that ignores the history and draws from the prior.
///
/// Every suggestion is an independent [`SearchSpace::sample`], so conditional
/// dimensions are only present when their parent activates them.
///
/// # Examples
///
/// ```
/// use parzen::bandit::random::RandomBandit;
/// use parzen::{Distribution, SearchSpace};
///
/// let mut space = SearchSpace::new();
/// space.add("x", Distribution::float(0.0, 1.0, false).unwrap()).unwrap();
///
/// // Create with default RNG
/// let bandit = RandomBandit::new(space.clone());
///
/// // Create with a fixed seed for reproducibility
/// let bandit = RandomBandit::with_seed(space, 42);
/// ```
pub struct RandomBandit {
    space: SearchSpace,
    rng: Mutex<fastrand::Rng>,
}

impl RandomBandit {
    /// Creates a random bandit with a default random seed.
    #[must_use]
    pub fn new(space: SearchSpace) -> Self {
        Self {
            space,
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Creates a random bandit with a fixed seed for reproducibility.
    #[must_use]
    pub fn with_seed(space: SearchSpace, seed: u64) -> Self {
        Self {
            space,
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }

    /// The search space suggestions are drawn from.
    #[must_use]
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }
}

impl Bandit for RandomBandit {
    fn suggest(&self, _history: &History, n: usize) -> Result<Vec<Configuration>> {
        if n == 0 {
            return Err(Error::ZeroSuggestions);
        }
        let mut rng = self.rng.lock();
        Ok((0..n).map(|_| self.space.sample(&mut rng)).collect())
    }
}
