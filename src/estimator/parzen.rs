//! Independent adaptive Parzen estimator.
//!
//! Every dimension is modelled on its own: numeric dimensions by a
//! [`ParzenMixture`] over internal space, categorical dimensions by smoothed
//! counts. Draws follow the tree structure of the search space, so a child is
//! sampled only when its parent's drawn choice activates it.

use crate::config_set::ConfigSet;
use crate::error::{Error, Result};
use crate::estimator::plan::{CompiledSpace, DimensionPlan, NumericPlan};
use crate::estimator::{DensityEstimator, Posterior};
use crate::kde::{ParzenMixture, pick_weighted};
use crate::param::ParamValue;

/// Fitted per-dimension density.
#[derive(Clone, Debug)]
enum DimensionModel {
    /// A zero-width dimension; every draw is this value.
    Constant(ParamValue),
    Mixture(ParzenMixture, NumericPlan),
    /// Choice probabilities.
    Categorical(Vec<f64>),
}

/// The fitted model of an [`IndependentParzenEstimator`].
#[derive(Clone, Debug)]
pub struct ParzenModel {
    dims: Vec<DimensionModel>,
}

/// Estimator fitting each dimension independently with an adaptive Parzen window.
///
/// The prior contributes one wide kernel (numeric dimensions) or a pseudo-count
/// per choice (categorical dimensions), weighted by `prior_weight`.
///
/// # Examples
///
/// ```
/// use parzen::estimator::IndependentParzenEstimator;
///
/// let estimator = IndependentParzenEstimator::new();
/// let heavier_prior = IndependentParzenEstimator::with_prior_weight(4.0).unwrap();
/// assert!((heavier_prior.prior_weight() - 4.0).abs() < f64::EPSILON);
/// # let _ = estimator;
/// ```
#[derive(Clone, Debug)]
pub struct IndependentParzenEstimator {
    prior_weight: f64,
}

impl IndependentParzenEstimator {
    /// Creates an estimator with prior weight 1.
    #[must_use]
    pub fn new() -> Self {
        Self { prior_weight: 1.0 }
    }

    /// Creates an estimator with a custom prior weight.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPriorWeight` if `prior_weight` is not positive and finite.
    pub fn with_prior_weight(prior_weight: f64) -> Result<Self> {
        if !(prior_weight.is_finite() && prior_weight > 0.0) {
            return Err(Error::InvalidPriorWeight(prior_weight));
        }
        Ok(Self { prior_weight })
    }

    /// The weight of the prior relative to one observation.
    #[must_use]
    pub fn prior_weight(&self) -> f64 {
        self.prior_weight
    }

    #[allow(clippy::cast_precision_loss)]
    fn fit_dimension(
        &self,
        plan: &DimensionPlan,
        values: &[ParamValue],
        dim: usize,
    ) -> Result<DimensionModel> {
        let mismatch = |v: &ParamValue| {
            Error::SchemaMismatch(format!("value {v:?} does not fit dimension {dim}"))
        };
        match plan {
            DimensionPlan::Numeric(p) if p.is_degenerate() => {
                Ok(DimensionModel::Constant(p.from_internal(p.low)))
            }
            DimensionPlan::Numeric(p) => {
                let internal = values
                    .iter()
                    .map(|v| {
                        p.to_internal(v)
                            .map(|x| x.clamp(p.low, p.high))
                            .ok_or_else(|| mismatch(v))
                    })
                    .collect::<Result<Vec<f64>>>()?;
                let mixture = ParzenMixture::fit(&internal, p.low, p.high, self.prior_weight);
                Ok(DimensionModel::Mixture(mixture, p.clone()))
            }
            DimensionPlan::Categorical { n_choices } => {
                let mut weights = vec![self.prior_weight; *n_choices];
                for v in values {
                    match v.as_categorical() {
                        Some(c) if c < *n_choices => weights[c] += 1.0,
                        _ => return Err(mismatch(v)),
                    }
                }
                let total: f64 = weights.iter().sum();
                Ok(DimensionModel::Categorical(
                    weights.into_iter().map(|w| w / total).collect(),
                ))
            }
        }
    }
}

impl Default for IndependentParzenEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl DensityEstimator for IndependentParzenEstimator {
    type Model = ParzenModel;

    fn posterior(
        &self,
        prior: &CompiledSpace,
        observations: &ConfigSet,
        n_draws: usize,
        rng: &mut fastrand::Rng,
    ) -> Result<Posterior<ParzenModel>> {
        prior.check_dims(observations.n_dims(), "observation set")?;

        let dims = prior
            .plans()
            .iter()
            .zip(observations.columns())
            .enumerate()
            .map(|(dim, (plan, column))| self.fit_dimension(plan, &column.vals, dim))
            .collect::<Result<Vec<_>>>()?;

        let space = prior.space();
        let mut samples = ConfigSet::empty(prior.n_dims());
        let mut row = vec![None; prior.n_dims()];
        for idx in 0..n_draws {
            row.fill(None);
            for (dim, model) in dims.iter().enumerate() {
                if !space.is_active(dim, &row) {
                    continue;
                }
                row[dim] = Some(match model {
                    DimensionModel::Constant(v) => *v,
                    DimensionModel::Mixture(m, p) => p.from_internal(m.sample(rng)),
                    DimensionModel::Categorical(probs) => {
                        ParamValue::Categorical(pick_weighted(probs, rng))
                    }
                });
            }
            samples.push_row(idx, &row);
        }

        Ok(Posterior {
            model: ParzenModel { dims },
            samples,
        })
    }

    fn log_likelihood(
        &self,
        posterior: &Posterior<ParzenModel>,
        query: &ConfigSet,
        mut llik: Vec<f64>,
    ) -> Result<Vec<f64>> {
        let dims = &posterior.model.dims;
        if query.n_dims() != dims.len() {
            return Err(Error::SchemaMismatch(format!(
                "query set has {} dimensions, model has {}",
                query.n_dims(),
                dims.len()
            )));
        }
        let bound = query.index_bound();
        if llik.len() < bound {
            return Err(Error::LengthMismatch {
                what: "log-likelihood baseline",
                expected: bound,
                got: llik.len(),
            });
        }

        for (dim, (model, column)) in dims.iter().zip(query.columns()).enumerate() {
            for (idx, value) in column.iter() {
                llik[idx] += match model {
                    DimensionModel::Constant(_) => 0.0,
                    DimensionModel::Mixture(m, plan) => {
                        // stepped and integer values score the mass of their rounding bucket
                        match plan.bucket(value) {
                            Some((a, b)) => m.log_mass(a, b),
                            None => {
                                let x = plan.to_internal(value).ok_or_else(|| {
                                    Error::SchemaMismatch(format!(
                                        "value {value:?} does not fit dimension {dim}"
                                    ))
                                })?;
                                m.log_pdf(x) + plan.log_jacobian(value)
                            }
                        }
                    }
                    DimensionModel::Categorical(probs) => {
                        let c = value
                            .as_categorical()
                            .filter(|&c| c < probs.len())
                            .ok_or_else(|| {
                                Error::SchemaMismatch(format!(
                                    "value {value:?} does not fit dimension {dim}"
                                ))
                            })?;
                        probs[c].ln()
                    }
                };
            }
        }
        Ok(llik)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Distribution;
    use crate::space::SearchSpace;

    fn tree_space() -> CompiledSpace {
        let mut space = SearchSpace::new();
        space.add("kind", Distribution::categorical(2).unwrap()).unwrap();
        space
            .add_conditional("x", Distribution::float(0.0, 1.0, false).unwrap(), "kind", &[0])
            .unwrap();
        space
            .add_conditional("n", Distribution::int(1, 5, false).unwrap(), "kind", &[1])
            .unwrap();
        CompiledSpace::compile(&space).unwrap()
    }

    #[test]
    fn test_invalid_prior_weight() {
        assert!(matches!(
            IndependentParzenEstimator::with_prior_weight(0.0),
            Err(Error::InvalidPriorWeight(_))
        ));
        assert!(IndependentParzenEstimator::with_prior_weight(f64::NAN).is_err());
    }

    #[test]
    fn test_posterior_from_empty_observations_follows_tree() {
        let prior = tree_space();
        let estimator = IndependentParzenEstimator::new();
        let mut rng = fastrand::Rng::with_seed(1);
        let post = estimator
            .posterior(&prior, &ConfigSet::empty(3), 50, &mut rng)
            .unwrap();

        assert_eq!(post.samples.rows(), (0..50).collect::<Vec<_>>());
        let configs = prior.space().to_configurations(&post.samples).unwrap();
        assert_eq!(configs.len(), 50);
        for config in &configs {
            prior.space().conforms(config).unwrap();
        }
    }

    #[test]
    fn test_posterior_rejects_schema_mismatch() {
        let prior = tree_space();
        let estimator = IndependentParzenEstimator::new();
        let mut rng = fastrand::Rng::with_seed(1);
        let result = estimator.posterior(&prior, &ConfigSet::empty(2), 5, &mut rng);
        assert!(matches!(result, Err(Error::SchemaMismatch(_))));
    }

    #[test]
    fn test_categorical_posterior_favours_observed_choice() {
        let prior = tree_space();
        let estimator = IndependentParzenEstimator::new();
        let obs = ConfigSet::from_lists(
            vec![(0..20).collect(), vec![], (0..20).collect()],
            vec![
                vec![ParamValue::Categorical(1); 20],
                vec![],
                vec![ParamValue::Int(3); 20],
            ],
        )
        .unwrap();
        let mut rng = fastrand::Rng::with_seed(9);
        let post = estimator.posterior(&prior, &obs, 200, &mut rng).unwrap();
        let ones = post
            .samples
            .column(0)
            .unwrap()
            .vals
            .iter()
            .filter(|v| **v == ParamValue::Categorical(1))
            .count();
        assert!(ones > 150, "choice 1 drawn only {ones} times out of 200");
    }

    #[test]
    fn test_log_likelihood_adds_to_baseline() {
        let prior = tree_space();
        let estimator = IndependentParzenEstimator::new();
        let mut rng = fastrand::Rng::with_seed(2);
        let post = estimator
            .posterior(&prior, &ConfigSet::empty(3), 10, &mut rng)
            .unwrap();

        let zeros = estimator
            .log_likelihood(&post, &post.samples, vec![0.0; 10])
            .unwrap();
        let shifted = estimator
            .log_likelihood(&post, &post.samples, vec![1.0; 10])
            .unwrap();
        for (z, s) in zeros.iter().zip(&shifted) {
            assert!(z.is_finite());
            assert!((s - z - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_log_likelihood_short_baseline() {
        let prior = tree_space();
        let estimator = IndependentParzenEstimator::new();
        let mut rng = fastrand::Rng::with_seed(2);
        let post = estimator
            .posterior(&prior, &ConfigSet::empty(3), 10, &mut rng)
            .unwrap();
        let result = estimator.log_likelihood(&post, &post.samples, vec![0.0; 3]);
        assert!(matches!(result, Err(Error::LengthMismatch { .. })));
    }

    #[test]
    fn test_log_likelihood_higher_near_observations() {
        let mut space = SearchSpace::new();
        space.add("x", Distribution::float(0.0, 1.0, false).unwrap()).unwrap();
        let prior = CompiledSpace::compile(&space).unwrap();
        let obs = ConfigSet::from_lists(
            vec![vec![0, 1, 2]],
            vec![vec![
                ParamValue::Float(0.29),
                ParamValue::Float(0.30),
                ParamValue::Float(0.31),
            ]],
        )
        .unwrap();
        let estimator = IndependentParzenEstimator::new();
        let mut rng = fastrand::Rng::with_seed(4);
        let post = estimator.posterior(&prior, &obs, 1, &mut rng).unwrap();

        let query = ConfigSet::from_lists(
            vec![vec![0, 1]],
            vec![vec![ParamValue::Float(0.3), ParamValue::Float(0.9)]],
        )
        .unwrap();
        let ll = estimator.log_likelihood(&post, &query, vec![0.0; 2]).unwrap();
        assert!(ll[0] > ll[1]);
    }
}
