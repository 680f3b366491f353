//! Bandit trait and implementations for suggesting configurations.

pub mod random;
pub mod tpe;

use crate::error::Result;
use crate::history::History;
use crate::space::Configuration;

/// A strategy that proposes the next configurations to evaluate.
///
/// Implementations receive the caller's full trial history on every call and
/// must return exactly `n` configurations that conform to their search space.
///
/// # Examples
///
/// ```
/// use parzen::bandit::Bandit;
/// use parzen::bandit::random::RandomBandit;
/// use parzen::{Distribution, History, SearchSpace};
///
/// let mut space = SearchSpace::new();
/// space.add("x", Distribution::float(-1.0, 1.0, false).unwrap()).unwrap();
///
/// let bandit = RandomBandit::with_seed(space, 3);
/// let configs = bandit.suggest(&History::new(), 4).unwrap();
/// assert_eq!(configs.len(), 4);
/// ```
pub trait Bandit: Send + Sync {
    /// Suggests `n` configurations given the trial history.
    ///
    /// # Errors
    ///
    /// Returns `Error::ZeroSuggestions` if `n` is zero, and propagates schema
    /// and length errors from the history.
    fn suggest(&self, history: &History, n: usize) -> Result<Vec<Configuration>>;
}
