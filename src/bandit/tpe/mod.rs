//! Tree-structured Parzen Estimator bandit.
//!
//! [`TpeBandit`] warms up with prior draws until enough trials have completed,
//! then on every call:
//!
//! 1. sorts the completed outcomes and picks a threshold `y*` at the
//!    `gamma` quantile (mean of the two outcomes at `floor(gamma * n)`),
//! 2. splits the completed configurations into good (`y < y*`) and bad sets,
//! 3. fits a density to each set and draws candidates from the good one,
//! 4. returns the candidates with the highest `log l(x) - log g(x)`.
//!
//! The fitted densities come from any [`DensityEstimator`]; the default for both
//! roles is [`IndependentParzenEstimator`].
//!
//! # Examples
//!
//! ```
//! use parzen::bandit::Bandit;
//! use parzen::bandit::tpe::TpeBandit;
//! use parzen::{Distribution, History, SearchSpace, TrialStatus};
//!
//! let mut space = SearchSpace::new();
//! space.add("x", Distribution::float(-5.0, 5.0, false).unwrap()).unwrap();
//!
//! let bandit = TpeBandit::builder(space.clone())
//!     .n_startup_jobs(10)
//!     .n_ei_candidates(64)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut history = History::new();
//! for _ in 0..20 {
//!     let config = bandit.suggest(&history, 1).unwrap().remove(0);
//!     let x = config.get("x").and_then(|v| v.as_f64()).unwrap();
//!     history
//!         .record(&space, TrialStatus::Ok, &config, Some((x - 1.0).powi(2)))
//!         .unwrap();
//! }
//! assert_eq!(history.n_ok(), 20);
//! ```
//!
//! ## Parallel workers with a constant liar
//!
//! ```
//! use parzen::bandit::tpe::{ConstantLiarStrategy, TpeBandit};
//! use parzen::{Distribution, SearchSpace};
//!
//! let mut space = SearchSpace::new();
//! space.add("x", Distribution::float(0.0, 1.0, false).unwrap()).unwrap();
//!
//! let bandit = TpeBandit::builder(space)
//!     .constant_liar(ConstantLiarStrategy::Worst)
//!     .build()
//!     .unwrap();
//! ```

mod gamma;
mod liar;
mod pipeline;
mod prior;
#[cfg(feature = "serde")]
mod snapshot;
mod threshold;

use core::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

pub use gamma::{FixedGamma, GammaStrategy, HyperoptGamma};
pub use liar::ConstantLiarStrategy;
pub use pipeline::{Pipeline, PipelineOutput, select_top};
pub use prior::PriorSampler;
#[cfg(feature = "serde")]
pub use snapshot::TpeBanditSnapshot;
pub use threshold::{Threshold, split_threshold};

use crate::bandit::Bandit;
use crate::config_set::ConfigSet;
use crate::error::{Error, Result};
use crate::estimator::{DensityEstimator, IndependentParzenEstimator};
use crate::event::{EventSink, SuggestEvent, TracingSink};
use crate::history::History;
use crate::space::{Configuration, SearchSpace};
use crate::types::TrialStatus;

/// Which kind of suggestion a call produces, decided from the history alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Fewer than `n_startup_jobs` completed trials; draw from the prior.
    Warmup,
    /// Enough completed trials to fit the good and bad densities.
    ModelBased,
}

/// TPE suggestion controller.
///
/// Holds two lazily built artifacts, a [`Pipeline`] and a [`PriorSampler`].
/// Both are created on first use, are never serialized, and are dropped by
/// [`Clone`], so a clone or a restored bandit rebuilds them on demand.
pub struct TpeBandit<G = IndependentParzenEstimator, B = IndependentParzenEstimator> {
    space: SearchSpace,
    good: Arc<G>,
    bad: Arc<B>,
    gamma_strategy: Box<dyn GammaStrategy>,
    n_startup_jobs: usize,
    n_ei_candidates: usize,
    seed: u64,
    constant_liar: ConstantLiarStrategy,
    sink: Arc<dyn EventSink>,
    pipeline: Mutex<Option<Pipeline<G, B>>>,
    prior_sampler: Mutex<Option<PriorSampler>>,
}

impl TpeBandit {
    /// Creates a builder over `space` with the default Parzen estimators.
    #[must_use]
    pub fn builder(space: SearchSpace) -> TpeBanditBuilder {
        TpeBanditBuilder::new(space)
    }
}

impl<G: DensityEstimator, B: DensityEstimator> TpeBandit<G, B> {
    /// The search space suggestions are drawn from.
    #[must_use]
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// The gamma strategy.
    #[must_use]
    pub fn gamma_strategy(&self) -> &dyn GammaStrategy {
        self.gamma_strategy.as_ref()
    }

    /// Completed trials required before model-based suggestions.
    #[must_use]
    pub fn n_startup_jobs(&self) -> usize {
        self.n_startup_jobs
    }

    /// Candidates drawn from the good density per call.
    #[must_use]
    pub fn n_ei_candidates(&self) -> usize {
        self.n_ei_candidates
    }

    /// The seed of the prior sampler and the pipeline.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// How running trials are treated.
    #[must_use]
    pub fn constant_liar(&self) -> ConstantLiarStrategy {
        self.constant_liar
    }

    /// Replaces the event sink.
    pub fn set_event_sink(&mut self, sink: impl EventSink + 'static) {
        self.sink = Arc::new(sink);
    }

    /// The phase a call with `n_ok` completed trials runs in.
    ///
    /// A history without completed trials always warms up.
    #[must_use]
    pub fn phase(&self, n_ok: usize) -> Phase {
        if n_ok == 0 || n_ok < self.n_startup_jobs {
            Phase::Warmup
        } else {
            Phase::ModelBased
        }
    }

    /// Whether the pipeline has been built.
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.pipeline.lock().is_some()
    }

    /// Suggests `n` configurations as a sparse set numbered `0..n`, best first.
    ///
    /// # Errors
    ///
    /// Returns `Error::ZeroSuggestions` if `n` is zero, `Error::SchemaMismatch`
    /// if the history was encoded for another schema, and
    /// `Error::LengthMismatch` if the completed outcomes do not cover the
    /// completed configurations.
    pub fn suggest_sparse(&self, history: &History, n: usize) -> Result<ConfigSet> {
        if n == 0 {
            return Err(Error::ZeroSuggestions);
        }
        let n_ok = history.n_ok();
        match self.phase(n_ok) {
            Phase::Warmup => {
                self.sink.emit(&SuggestEvent::WarmingUp {
                    n_ok,
                    n_startup_jobs: self.n_startup_jobs,
                });
                let mut guard = self.prior_sampler.lock();
                let sampler =
                    guard.get_or_insert_with(|| PriorSampler::new(&self.space, self.seed));
                Ok(sampler.draw(n))
            }
            Phase::ModelBased => self.suggest_from_model(history, n),
        }
    }

    fn suggest_from_model(&self, history: &History, n: usize) -> Result<ConfigSet> {
        let ok_outcomes = history.outcomes(TrialStatus::Ok);
        let ok_configs = history
            .configs(TrialStatus::Ok)
            .ok_or(Error::Internal("completed outcomes without configurations"))?;
        if ok_configs.n_dims() != self.space.len() {
            return Err(Error::SchemaMismatch(format!(
                "history has {} dimensions, search space has {}",
                ok_configs.n_dims(),
                self.space.len()
            )));
        }

        let n_ok = ok_outcomes.len();
        let sorted = threshold::sorted_outcomes(ok_outcomes);
        let threshold = split_threshold(&sorted, self.gamma_strategy.gamma(n_ok))
            .ok_or(Error::Internal("threshold over an empty history"))?;
        let n_good = sorted.iter().filter(|&&y| y < threshold.value).count();
        self.sink.emit(&SuggestEvent::Threshold {
            y_thresh: threshold.value,
            n_good,
            n_bad: n_ok - n_good,
        });
        self.sink
            .emit(&SuggestEvent::GoodScores(sorted[..n_good].to_vec()));

        let (observations, yvals) = self.with_pending(history, ok_configs, ok_outcomes)?;

        let n_to_draw = self.n_ei_candidates.max(n);
        self.sink.emit(&SuggestEvent::DrawingCandidates {
            n_candidates: n_to_draw,
        });

        let mut guard = self.pipeline.lock();
        if guard.is_none() {
            *guard = Some(Pipeline::build(
                &self.space,
                Arc::clone(&self.good),
                Arc::clone(&self.bad),
                self.seed,
            )?);
        }
        let pipeline = guard
            .as_mut()
            .ok_or(Error::Internal("pipeline missing after build"))?;
        let output = pipeline.run(n_to_draw, n, threshold.value, &yvals, &observations)?;

        self.sink.emit(&SuggestEvent::BestScores(
            output.selected.iter().map(|&i| output.log_ei[i]).collect(),
        ));
        Ok(output.best)
    }

    /// Appends running trials with an imputed outcome when a liar is configured.
    fn with_pending(
        &self,
        history: &History,
        ok_configs: &ConfigSet,
        ok_outcomes: &[f64],
    ) -> Result<(ConfigSet, Vec<f64>)> {
        let mut observations = ok_configs.clone();
        let mut yvals = ok_outcomes.to_vec();
        let n_running = history.len(TrialStatus::Running);
        let n_new = history.len(TrialStatus::New);

        let lie = self.constant_liar.impute(ok_outcomes);
        match (lie, history.configs(TrialStatus::Running)) {
            (Some(lie), Some(running)) if n_running > 0 => {
                let fresh = observations.extend(running)?;
                yvals.resize(fresh.end, lie);
                self.sink.emit(&SuggestEvent::PendingImputed {
                    n_pending: n_running,
                    lie,
                });
                if n_new > 0 {
                    self.sink
                        .emit(&SuggestEvent::PendingIgnored { n_pending: n_new });
                }
            }
            _ if n_running + n_new > 0 => {
                self.sink.emit(&SuggestEvent::PendingIgnored {
                    n_pending: n_running + n_new,
                });
            }
            _ => {}
        }
        Ok((observations, yvals))
    }
}

impl<G: DensityEstimator, B: DensityEstimator> Bandit for TpeBandit<G, B> {
    fn suggest(&self, history: &History, n: usize) -> Result<Vec<Configuration>> {
        let set = self.suggest_sparse(history, n)?;
        self.space.to_configurations(&set)
    }
}

impl<G, B> Clone for TpeBandit<G, B> {
    fn clone(&self) -> Self {
        Self {
            space: self.space.clone(),
            good: Arc::clone(&self.good),
            bad: Arc::clone(&self.bad),
            gamma_strategy: self.gamma_strategy.clone(),
            n_startup_jobs: self.n_startup_jobs,
            n_ei_candidates: self.n_ei_candidates,
            seed: self.seed,
            constant_liar: self.constant_liar,
            sink: Arc::clone(&self.sink),
            pipeline: Mutex::new(None),
            prior_sampler: Mutex::new(None),
        }
    }
}

impl<G, B> fmt::Debug for TpeBandit<G, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TpeBandit")
            .field("space", &self.space)
            .field("gamma_strategy", &self.gamma_strategy)
            .field("n_startup_jobs", &self.n_startup_jobs)
            .field("n_ei_candidates", &self.n_ei_candidates)
            .field("seed", &self.seed)
            .field("constant_liar", &self.constant_liar)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a [`TpeBandit`].
///
/// Validation is deferred to [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use parzen::bandit::tpe::{HyperoptGamma, TpeBandit};
/// use parzen::estimator::IndependentParzenEstimator;
/// use parzen::{Distribution, SearchSpace};
///
/// let mut space = SearchSpace::new();
/// space.add("lr", Distribution::float(1e-5, 1e-1, true).unwrap()).unwrap();
///
/// let bandit = TpeBandit::builder(space)
///     .gamma_strategy(HyperoptGamma::default())
///     .estimators(
///         IndependentParzenEstimator::with_prior_weight(2.0).unwrap(),
///         IndependentParzenEstimator::new(),
///     )
///     .n_startup_jobs(20)
///     .seed(7)
///     .build()
///     .unwrap();
/// assert_eq!(bandit.n_startup_jobs(), 20);
/// ```
pub struct TpeBanditBuilder<G = IndependentParzenEstimator, B = IndependentParzenEstimator> {
    space: SearchSpace,
    good: G,
    bad: B,
    gamma_strategy: Box<dyn GammaStrategy>,
    /// Raw gamma value for deferred validation (Some if `gamma()` was called)
    raw_gamma: Option<f64>,
    n_startup_jobs: usize,
    n_ei_candidates: usize,
    seed: Option<u64>,
    constant_liar: ConstantLiarStrategy,
    sink: Arc<dyn EventSink>,
}

impl TpeBanditBuilder {
    /// Creates a builder with default settings.
    ///
    /// Default settings:
    /// - gamma strategy: [`FixedGamma`] with gamma = 0.15
    /// - `n_startup_jobs`: 30
    /// - `n_ei_candidates`: 256
    /// - estimators: [`IndependentParzenEstimator`] for both densities
    /// - constant liar: [`ConstantLiarStrategy::None`]
    /// - event sink: [`TracingSink`]
    /// - seed: None (drawn at build time)
    #[must_use]
    pub fn new(space: SearchSpace) -> Self {
        Self {
            space,
            good: IndependentParzenEstimator::new(),
            bad: IndependentParzenEstimator::new(),
            gamma_strategy: Box::new(FixedGamma::default()),
            raw_gamma: None,
            n_startup_jobs: 30,
            n_ei_candidates: 256,
            seed: None,
            constant_liar: ConstantLiarStrategy::None,
            sink: Arc::new(TracingSink),
        }
    }
}

impl<G: DensityEstimator, B: DensityEstimator> TpeBanditBuilder<G, B> {
    /// Sets a fixed gamma, validated in [`build`](Self::build).
    #[must_use]
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.raw_gamma = Some(gamma);
        self
    }

    /// Sets a custom gamma strategy. Overridden by [`gamma`](Self::gamma).
    #[must_use]
    pub fn gamma_strategy<S: GammaStrategy + 'static>(mut self, strategy: S) -> Self {
        self.gamma_strategy = Box::new(strategy);
        self
    }

    /// Sets the number of completed trials needed before model-based suggestions.
    #[must_use]
    pub fn n_startup_jobs(mut self, n: usize) -> Self {
        self.n_startup_jobs = n;
        self
    }

    /// Sets the number of candidates drawn from the good density per call.
    #[must_use]
    pub fn n_ei_candidates(mut self, n: usize) -> Self {
        self.n_ei_candidates = n;
        self
    }

    /// Sets the seed for reproducible suggestions.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets how running trials are treated.
    #[must_use]
    pub fn constant_liar(mut self, strategy: ConstantLiarStrategy) -> Self {
        self.constant_liar = strategy;
        self
    }

    /// Sets the receiver of progress events.
    #[must_use]
    pub fn event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Replaces the good and bad density estimators.
    #[must_use]
    pub fn estimators<G2, B2>(self, good: G2, bad: B2) -> TpeBanditBuilder<G2, B2>
    where
        G2: DensityEstimator,
        B2: DensityEstimator,
    {
        TpeBanditBuilder {
            space: self.space,
            good,
            bad,
            gamma_strategy: self.gamma_strategy,
            raw_gamma: self.raw_gamma,
            n_startup_jobs: self.n_startup_jobs,
            n_ei_candidates: self.n_ei_candidates,
            seed: self.seed,
            constant_liar: self.constant_liar,
            sink: self.sink,
        }
    }

    /// Builds the bandit.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidGamma` if a gamma set with [`gamma`](Self::gamma)
    /// is not in (0.0, 1.0), `Error::ZeroCandidates` if `n_ei_candidates` is
    /// zero, and `Error::SchemaMismatch` if the search space is empty.
    pub fn build(self) -> Result<TpeBandit<G, B>> {
        let gamma_strategy: Box<dyn GammaStrategy> = if let Some(raw) = self.raw_gamma {
            Box::new(FixedGamma::new(raw)?)
        } else {
            self.gamma_strategy
        };
        if self.n_ei_candidates == 0 {
            return Err(Error::ZeroCandidates);
        }
        if self.space.is_empty() {
            return Err(Error::SchemaMismatch(
                "search space has no dimensions".to_string(),
            ));
        }

        let seed = self.seed.unwrap_or_else(|| fastrand::u64(..));
        trace_debug!(
            seed,
            n_startup_jobs = self.n_startup_jobs,
            n_ei_candidates = self.n_ei_candidates,
            "tpe bandit built"
        );
        Ok(TpeBandit {
            space: self.space,
            good: Arc::new(self.good),
            bad: Arc::new(self.bad),
            gamma_strategy,
            n_startup_jobs: self.n_startup_jobs,
            n_ei_candidates: self.n_ei_candidates,
            seed,
            constant_liar: self.constant_liar,
            sink: self.sink,
            pipeline: Mutex::new(None),
            prior_sampler: Mutex::new(None),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Distribution;
    use crate::param::ParamValue;

    fn space() -> SearchSpace {
        let mut space = SearchSpace::new();
        space.add("x", Distribution::float(0.0, 1.0, false).unwrap()).unwrap();
        space
    }

    fn history(n: usize) -> History {
        let space = space();
        let mut history = History::new();
        let mut rng = fastrand::Rng::with_seed(1);
        for _ in 0..n {
            let config = space.sample(&mut rng);
            let x = config.get("x").and_then(ParamValue::as_f64).unwrap();
            history
                .record(&space, TrialStatus::Ok, &config, Some((x - 0.3).powi(2)))
                .unwrap();
        }
        history
    }

    fn recorder() -> (Arc<Mutex<Vec<SuggestEvent>>>, impl EventSink + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |e: &SuggestEvent| seen.lock().push(e.clone())
        };
        (seen, sink)
    }

    #[test]
    fn test_builder_defaults() {
        let bandit = TpeBandit::builder(space()).build().unwrap();
        assert_eq!(bandit.n_startup_jobs(), 30);
        assert_eq!(bandit.n_ei_candidates(), 256);
        assert_eq!(bandit.constant_liar(), ConstantLiarStrategy::None);
        assert_eq!(bandit.gamma_strategy().fixed_value(), Some(0.15));
        assert!(!bandit.is_compiled());
    }

    #[test]
    fn test_builder_invalid_gamma() {
        let result = TpeBandit::builder(space()).gamma(1.5).build();
        assert!(matches!(result, Err(Error::InvalidGamma(_))));
    }

    #[test]
    fn test_builder_zero_candidates() {
        let result = TpeBandit::builder(space()).n_ei_candidates(0).build();
        assert!(matches!(result, Err(Error::ZeroCandidates)));
    }

    #[test]
    fn test_builder_empty_space() {
        let result = TpeBandit::builder(SearchSpace::new()).build();
        assert!(matches!(result, Err(Error::SchemaMismatch(_))));
    }

    #[test]
    fn test_phase_boundary() {
        let bandit = TpeBandit::builder(space()).build().unwrap();
        assert_eq!(bandit.phase(0), Phase::Warmup);
        assert_eq!(bandit.phase(29), Phase::Warmup);
        assert_eq!(bandit.phase(30), Phase::ModelBased);

        let eager = TpeBandit::builder(space()).n_startup_jobs(0).build().unwrap();
        assert_eq!(eager.phase(0), Phase::Warmup);
        assert_eq!(eager.phase(1), Phase::ModelBased);
    }

    #[test]
    fn test_warmup_emits_event_and_skips_pipeline() {
        let (seen, sink) = recorder();
        let bandit = TpeBandit::builder(space())
            .seed(3)
            .event_sink(sink)
            .build()
            .unwrap();
        let set = bandit.suggest_sparse(&history(29), 4).unwrap();
        assert_eq!(set.rows(), vec![0, 1, 2, 3]);
        assert!(!bandit.is_compiled());
        assert_eq!(
            *seen.lock(),
            vec![SuggestEvent::WarmingUp {
                n_ok: 29,
                n_startup_jobs: 30
            }]
        );
    }

    #[test]
    fn test_model_based_builds_pipeline_and_reports() {
        let (seen, sink) = recorder();
        let bandit = TpeBandit::builder(space())
            .seed(3)
            .n_ei_candidates(32)
            .event_sink(sink)
            .build()
            .unwrap();
        let set = bandit.suggest_sparse(&history(30), 3).unwrap();
        assert_eq!(set.n_rows(), 3);
        assert!(bandit.is_compiled());

        let events = seen.lock();
        assert!(matches!(
            events[0],
            SuggestEvent::Threshold {
                n_good: 5,
                n_bad: 25,
                ..
            }
        ));
        assert!(events.contains(&SuggestEvent::DrawingCandidates { n_candidates: 32 }));
        match events.last() {
            Some(SuggestEvent::BestScores(scores)) => {
                assert_eq!(scores.len(), 3);
                assert!(scores.windows(2).all(|w| w[0] >= w[1]));
            }
            other => panic!("expected best scores, got {other:?}"),
        }
    }

    #[test]
    fn test_draw_count_covers_large_requests() {
        let bandit = TpeBandit::builder(space())
            .seed(5)
            .n_ei_candidates(4)
            .build()
            .unwrap();
        let configs = bandit.suggest(&history(30), 10).unwrap();
        assert_eq!(configs.len(), 10);
    }

    #[test]
    fn test_zero_suggestions() {
        let bandit = TpeBandit::builder(space()).build().unwrap();
        assert!(matches!(
            bandit.suggest(&History::new(), 0),
            Err(Error::ZeroSuggestions)
        ));
    }

    #[test]
    fn test_pending_trials_ignored_by_default() {
        let (seen, sink) = recorder();
        let space = space();
        let bandit = TpeBandit::builder(space.clone())
            .seed(1)
            .n_startup_jobs(5)
            .event_sink(sink)
            .build()
            .unwrap();
        let mut history = history(10);
        let running: Configuration = [("x", ParamValue::Float(0.5))].into_iter().collect();
        history
            .record(&space, TrialStatus::Running, &running, None)
            .unwrap();
        bandit.suggest(&history, 1).unwrap();
        assert!(
            seen.lock()
                .contains(&SuggestEvent::PendingIgnored { n_pending: 1 })
        );
    }

    #[test]
    fn test_constant_liar_imputes_running() {
        let (seen, sink) = recorder();
        let space = space();
        let bandit = TpeBandit::builder(space.clone())
            .seed(1)
            .n_startup_jobs(5)
            .constant_liar(ConstantLiarStrategy::Custom(100.0))
            .event_sink(sink)
            .build()
            .unwrap();
        let mut history = history(10);
        let running: Configuration = [("x", ParamValue::Float(0.5))].into_iter().collect();
        for _ in 0..2 {
            history
                .record(&space, TrialStatus::Running, &running, None)
                .unwrap();
        }
        bandit.suggest(&history, 2).unwrap();
        assert!(seen.lock().contains(&SuggestEvent::PendingImputed {
            n_pending: 2,
            lie: 100.0
        }));
    }

    #[test]
    fn test_clone_drops_compiled_artifacts() {
        let bandit = TpeBandit::builder(space())
            .seed(2)
            .n_ei_candidates(16)
            .build()
            .unwrap();
        bandit.suggest(&history(30), 1).unwrap();
        assert!(bandit.is_compiled());

        let copy = bandit.clone();
        assert!(!copy.is_compiled());
        assert_eq!(copy.seed(), 2);
        copy.suggest(&history(30), 1).unwrap();
        assert!(copy.is_compiled());
    }

    #[test]
    fn test_history_schema_mismatch() {
        let mut other = space();
        other.add("y", Distribution::float(0.0, 1.0, false).unwrap()).unwrap();
        let bandit = TpeBandit::builder(other).n_startup_jobs(1).build().unwrap();
        let result = bandit.suggest(&history(3), 1);
        assert!(matches!(result, Err(Error::SchemaMismatch(_))));
    }
}
