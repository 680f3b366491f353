//! Density estimators used to model the good and bad regions of the search space.
//!
//! The TPE pipeline only relies on the [`DensityEstimator`] capability: fit a
//! model to prior + observations and draw from it, and score configurations
//! under a fitted model. Any implementation can be plugged into
//! [`TpeBandit`](crate::bandit::tpe::TpeBandit) in place of the shipped
//! [`IndependentParzenEstimator`].
//!
//! # Implementing an estimator
//!
//! ```
//! use parzen::estimator::{CompiledSpace, DensityEstimator, Posterior};
//! use parzen::{ConfigSet, Result};
//!
//! /// Ignores the observations and scores everything equally.
//! struct PriorOnly;
//!
//! impl DensityEstimator for PriorOnly {
//!     type Model = ();
//!
//!     fn posterior(
//!         &self,
//!         prior: &CompiledSpace,
//!         _observations: &ConfigSet,
//!         n_draws: usize,
//!         rng: &mut fastrand::Rng,
//!     ) -> Result<Posterior<()>> {
//!         let configs: Vec<_> = (0..n_draws).map(|_| prior.space().sample(rng)).collect();
//!         let samples = prior.space().to_config_set(&configs)?;
//!         Ok(Posterior { model: (), samples })
//!     }
//!
//!     fn log_likelihood(
//!         &self,
//!         _posterior: &Posterior<()>,
//!         _query: &ConfigSet,
//!         llik: Vec<f64>,
//!     ) -> Result<Vec<f64>> {
//!         Ok(llik)
//!     }
//! }
//! ```

mod parzen;
mod plan;

pub use parzen::{IndependentParzenEstimator, ParzenModel};
pub use plan::{CompiledSpace, DimensionPlan, NumericPlan};

use crate::config_set::ConfigSet;
use crate::error::Result;

/// A fitted model together with the configurations drawn from it.
#[derive(Clone, Debug)]
pub struct Posterior<M> {
    /// The fitted density.
    pub model: M,
    /// Draws from the fitted density, numbered `0..n_draws`.
    pub samples: ConfigSet,
}

/// Capability contract for the good and bad density models.
pub trait DensityEstimator: Send + Sync {
    /// The fitted density produced by [`posterior`](Self::posterior).
    type Model;

    /// Fits a model to the prior and `observations` and draws `n_draws`
    /// tree-structured configurations from it.
    ///
    /// Empty `observations` must fall back toward the prior.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMismatch` if `observations` does not match `prior`.
    fn posterior(
        &self,
        prior: &CompiledSpace,
        observations: &ConfigSet,
        n_draws: usize,
        rng: &mut fastrand::Rng,
    ) -> Result<Posterior<Self::Model>>;

    /// Adds the log-density of every configuration in `query` to `llik`.
    ///
    /// `llik[i]` accumulates the score of trial index `i` of `query`; dimensions
    /// that are inactive for a trial contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMismatch` if `query` does not match the model and
    /// `Error::LengthMismatch` if `llik` is too short for `query`.
    fn log_likelihood(
        &self,
        posterior: &Posterior<Self::Model>,
        query: &ConfigSet,
        llik: Vec<f64>,
    ) -> Result<Vec<f64>>;
}
