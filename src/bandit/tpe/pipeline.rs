//! The compiled good/bad density pipeline.
//!
//! A [`Pipeline`] is built once per search space and reused for every
//! model-based suggestion. Each [`run`](Pipeline::run) splits the completed
//! trials at the threshold, fits the good and bad estimators, draws candidates
//! from the good model and ranks them by `log l(x) - log g(x)`.

use core::cmp::Ordering;
use core::fmt;
use std::sync::Arc;

use crate::config_set::ConfigSet;
use crate::error::{Error, Result};
use crate::estimator::{CompiledSpace, DensityEstimator};
use crate::space::SearchSpace;

/// Offset added to the bandit seed to seed the pipeline's own RNG.
pub(crate) const PIPELINE_SEED_OFFSET: u64 = 9;

/// Result of one pipeline run.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// The kept candidates in ranking order, renumbered `0..n_to_keep`.
    pub best: ConfigSet,
    /// Candidate indices of `best`, best first.
    pub selected: Vec<usize>,
    /// Outcomes of the observations that fell below the threshold, in trial order.
    pub good_outcomes: Vec<f64>,
    /// Log expected-improvement score of every candidate.
    pub log_ei: Vec<f64>,
    /// Every candidate drawn from the good model, numbered `0..n_to_draw`.
    pub candidates: ConfigSet,
}

/// Reusable good/bad density routine over one compiled search space.
pub struct Pipeline<G, B> {
    prior: CompiledSpace,
    good: Arc<G>,
    bad: Arc<B>,
    rng: fastrand::Rng,
}

impl<G: DensityEstimator, B: DensityEstimator> Pipeline<G, B> {
    /// Compiles `space` and seeds the pipeline RNG with `seed + 9`.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMismatch` if the space has no dimensions.
    pub fn build(space: &SearchSpace, good: Arc<G>, bad: Arc<B>, seed: u64) -> Result<Self> {
        let prior = CompiledSpace::compile(space)?;
        Ok(Self {
            prior,
            good,
            bad,
            rng: fastrand::Rng::with_seed(seed.wrapping_add(PIPELINE_SEED_OFFSET)),
        })
    }

    /// The compiled prior.
    #[must_use]
    pub fn prior(&self) -> &CompiledSpace {
        &self.prior
    }

    /// Ranks `n_to_draw` candidates and keeps the best `n_to_keep`.
    ///
    /// `yvals[i]` is the outcome of trial index `i` of `observations`.
    /// Observations with `yvals[i] < y_thresh` form the good set, the rest the
    /// bad set; NaN outcomes belong to neither.
    ///
    /// # Errors
    ///
    /// Returns `Error::ZeroCandidates` if `n_to_draw` is zero,
    /// `Error::SchemaMismatch` if `observations` does not match the space, and
    /// `Error::LengthMismatch` if `yvals` is shorter than the observation index
    /// range or an estimator returns the wrong number of draws.
    pub fn run(
        &mut self,
        n_to_draw: usize,
        n_to_keep: usize,
        y_thresh: f64,
        yvals: &[f64],
        observations: &ConfigSet,
    ) -> Result<PipelineOutput> {
        if n_to_draw == 0 {
            return Err(Error::ZeroCandidates);
        }
        self.prior
            .check_dims(observations.n_dims(), "observation set")?;
        let bound = observations.index_bound();
        if yvals.len() < bound {
            return Err(Error::LengthMismatch {
                what: "outcomes",
                expected: bound,
                got: yvals.len(),
            });
        }

        let good_mask: Vec<bool> = yvals.iter().map(|&y| y < y_thresh).collect();
        let bad_mask: Vec<bool> = yvals.iter().map(|&y| y >= y_thresh).collect();
        let good_obs = observations.take(&good_mask)?;
        let bad_obs = observations.take(&bad_mask)?;
        let good_outcomes = good_obs.rows().into_iter().map(|i| yvals[i]).collect();

        let good_post = self
            .good
            .posterior(&self.prior, &good_obs, n_to_draw, &mut self.rng)?;
        let bad_post = self
            .bad
            .posterior(&self.prior, &bad_obs, n_to_draw, &mut self.rng)?;
        let candidates = good_post.samples.clone();
        if candidates.n_rows() != n_to_draw {
            return Err(Error::LengthMismatch {
                what: "posterior draws",
                expected: n_to_draw,
                got: candidates.n_rows(),
            });
        }

        let good_ll = self
            .good
            .log_likelihood(&good_post, &candidates, vec![0.0; n_to_draw])?;
        let bad_ll = self
            .bad
            .log_likelihood(&bad_post, &candidates, vec![0.0; n_to_draw])?;
        let log_ei: Vec<f64> = good_ll.iter().zip(&bad_ll).map(|(g, b)| g - b).collect();

        let selected = select_top(&log_ei, n_to_keep);
        let best = candidates.gather(&selected);
        Ok(PipelineOutput {
            best,
            selected,
            good_outcomes,
            log_ei,
            candidates,
        })
    }
}

impl<G, B> fmt::Debug for Pipeline<G, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("n_dims", &self.prior.n_dims())
            .finish_non_exhaustive()
    }
}

/// Indices of the `n_keep` highest scores, best first.
///
/// Equal scores keep ascending index order and NaN ranks after every number.
/// `n_keep` is clamped to `scores.len()`.
///
/// # Examples
///
/// ```
/// use parzen::bandit::tpe::select_top;
///
/// assert_eq!(select_top(&[0.5, 2.0, f64::NAN, 2.0], 3), vec![1, 3, 0]);
/// ```
#[must_use]
pub fn select_top(scores: &[f64], n_keep: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // stable sort, so ties stay in index order
    order.sort_by(|&a, &b| descending_nan_last(scores[a], scores[b]));
    order.truncate(n_keep);
    order
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
