//! Conditional search spaces and the configurations drawn from them.
//!
//! A [`SearchSpace`] is an ordered list of [`Dimension`]s. A dimension may carry
//! a [`Condition`] naming a categorical parent and the parent choices that
//! activate it; parents are always declared before their children, so walking
//! the dimensions in order visits every parent first.

use std::collections::BTreeMap;

use crate::config_set::ConfigSet;
use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::param::ParamValue;
use crate::rng_util;

/// Activation rule of a conditional dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    /// Index of the categorical parent dimension.
    pub parent: usize,
    /// Parent choices under which the dimension is active.
    pub choices: Vec<usize>,
}

/// One named knob of the search space.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    /// Unique name of the dimension.
    pub name: String,
    /// Prior distribution of the dimension.
    pub distribution: Distribution,
    /// `None` for dimensions that are always active.
    pub condition: Option<Condition>,
}

/// The active values of a single trial, keyed by dimension name.
///
/// Dimensions that were not active for the trial are absent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    values: BTreeMap<String, ParamValue>,
}

impl Configuration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a dimension, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) -> Option<ParamValue> {
        self.values.insert(name.into(), value)
    }

    /// Returns the value of a dimension if it was active.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Number of active dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no dimension is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<S: Into<String>> FromIterator<(S, ParamValue)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (S, ParamValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// An ordered, possibly conditional set of dimensions.
///
/// # Examples
///
/// ```
/// use parzen::{Distribution, SearchSpace};
///
/// let mut space = SearchSpace::new();
/// space.add("model", Distribution::categorical(2).unwrap()).unwrap();
/// space
///     .add_conditional("depth", Distribution::int(1, 8, false).unwrap(), "model", &[1])
///     .unwrap();
///
/// let mut rng = fastrand::Rng::with_seed(7);
/// let config = space.sample(&mut rng);
/// assert!(space.conforms(&config).is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchSpace {
    dimensions: Vec<Dimension>,
}

impl SearchSpace {
    /// Creates an empty search space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an always-active dimension and returns its index.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateDimension` if the name is taken.
    pub fn add(&mut self, name: impl Into<String>, distribution: Distribution) -> Result<usize> {
        self.push(name.into(), distribution, None)
    }

    /// Adds a dimension that is active only when `parent` takes one of `choices`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateDimension` if the name is taken and
    /// `Error::InvalidCondition` if the parent is unknown, not categorical, or
    /// the choices are empty or out of range.
    pub fn add_conditional(
        &mut self,
        name: impl Into<String>,
        distribution: Distribution,
        parent: &str,
        choices: &[usize],
    ) -> Result<usize> {
        let name = name.into();
        let invalid = |reason: String| Error::InvalidCondition {
            name: name.clone(),
            reason,
        };
        let parent_idx = self
            .position(parent)
            .ok_or_else(|| invalid(format!("unknown parent '{parent}'")))?;
        let Distribution::Categorical(d) = &self.dimensions[parent_idx].distribution else {
            return Err(invalid(format!("parent '{parent}' is not categorical")));
        };
        if choices.is_empty() {
            return Err(invalid("no activating choices".to_string()));
        }
        if let Some(c) = choices.iter().find(|&&c| c >= d.n_choices) {
            return Err(invalid(format!(
                "choice {c} out of range for {} choices",
                d.n_choices
            )));
        }
        let condition = Condition {
            parent: parent_idx,
            choices: choices.to_vec(),
        };
        self.push(name, distribution, Some(condition))
    }

    fn push(
        &mut self,
        name: String,
        distribution: Distribution,
        condition: Option<Condition>,
    ) -> Result<usize> {
        if self.position(&name).is_some() {
            return Err(Error::DuplicateDimension(name));
        }
        self.dimensions.push(Dimension {
            name,
            distribution,
            condition,
        });
        Ok(self.dimensions.len() - 1)
    }

    /// The dimensions in declaration order.
    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Number of dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Returns `true` if the space declares no dimensions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Index of the dimension called `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.dimensions.iter().position(|d| d.name == name)
    }

    /// Whether dimension `dim` is active given the values decided so far.
    ///
    /// `row` holds one slot per dimension; only the parent slot is consulted.
    #[must_use]
    pub fn is_active(&self, dim: usize, row: &[Option<ParamValue>]) -> bool {
        match &self.dimensions[dim].condition {
            None => true,
            Some(cond) => row
                .get(cond.parent)
                .copied()
                .flatten()
                .and_then(|v| v.as_categorical())
                .is_some_and(|c| cond.choices.contains(&c)),
        }
    }

    /// Draws one configuration from the prior.
    #[must_use]
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Configuration {
        let row = self.sample_row(rng);
        self.dimensions
            .iter()
            .zip(row)
            .filter_map(|(d, v)| v.map(|v| (d.name.clone(), v)))
            .collect()
    }

    /// Draws one prior configuration as a dense buffer of optional values.
    pub(crate) fn sample_row(&self, rng: &mut fastrand::Rng) -> Vec<Option<ParamValue>> {
        let mut row = vec![None; self.dimensions.len()];
        for dim in 0..self.dimensions.len() {
            if self.is_active(dim, &row) {
                row[dim] = Some(sample_prior(&self.dimensions[dim].distribution, rng));
            }
        }
        row
    }

    /// Checks that `config` names only known dimensions, that every value fits
    /// its distribution, and that exactly the active dimensions are present.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMismatch` describing the first violation.
    pub fn conforms(&self, config: &Configuration) -> Result<()> {
        self.dense_row(config).map(|_| ())
    }

    fn dense_row(&self, config: &Configuration) -> Result<Vec<Option<ParamValue>>> {
        if let Some((name, _)) = config.iter().find(|(n, _)| self.position(n).is_none()) {
            return Err(Error::SchemaMismatch(format!("unknown dimension '{name}'")));
        }
        let mut row = vec![None; self.dimensions.len()];
        for (dim, d) in self.dimensions.iter().enumerate() {
            let value = config.get(&d.name).copied();
            match (self.is_active(dim, &row), value) {
                (true, Some(v)) => {
                    if !d.distribution.contains(&v) {
                        return Err(Error::SchemaMismatch(format!(
                            "value {v:?} does not fit dimension '{}'",
                            d.name
                        )));
                    }
                    row[dim] = Some(v);
                }
                (true, None) => {
                    return Err(Error::SchemaMismatch(format!(
                        "active dimension '{}' is missing",
                        d.name
                    )));
                }
                (false, Some(_)) => {
                    return Err(Error::SchemaMismatch(format!(
                        "dimension '{}' is set but not active",
                        d.name
                    )));
                }
                (false, None) => {}
            }
        }
        Ok(row)
    }

    /// Encodes configurations as a sparse set; configuration `i` becomes trial `i`.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMismatch` if any configuration does not conform.
    pub fn to_config_set(&self, configs: &[Configuration]) -> Result<ConfigSet> {
        let mut set = ConfigSet::empty(self.dimensions.len());
        for (idx, config) in configs.iter().enumerate() {
            let row = self.dense_row(config)?;
            set.push_row(idx, &row);
        }
        Ok(set)
    }

    /// Decodes a sparse set into one configuration per trial, in trial-index order.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMismatch` if the set has a different number of dimensions.
    pub fn to_configurations(&self, set: &ConfigSet) -> Result<Vec<Configuration>> {
        if set.n_dims() != self.dimensions.len() {
            return Err(Error::SchemaMismatch(format!(
                "configuration set has {} dimensions, search space has {}",
                set.n_dims(),
                self.dimensions.len()
            )));
        }
        Ok(set
            .rows()
            .into_iter()
            .map(|idx| {
                set.row(idx)
                    .into_iter()
                    .map(|(dim, v)| (self.dimensions[dim].name.clone(), v))
                    .collect()
            })
            .collect())
    }
}

/// Samples uniformly from a prior distribution, respecting log scale and step.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn sample_prior(distribution: &Distribution, rng: &mut fastrand::Rng) -> ParamValue {
    match distribution {
        Distribution::Float(d) => {
            let value = if d.log_scale {
                rng_util::f64_range(rng, d.low.ln(), d.high.ln()).exp()
            } else if let Some(step) = d.step {
                let n_steps = ((d.high - d.low) / step).floor() as i64;
                let k = rng.i64(0..=n_steps);
                d.low + (k as f64) * step
            } else {
                rng_util::f64_range(rng, d.low, d.high)
            };
            ParamValue::Float(value.clamp(d.low, d.high))
        }
        Distribution::Int(d) => {
            let value = if d.log_scale {
                let log_value = rng_util::f64_range(rng, (d.low as f64).ln(), (d.high as f64).ln());
                (log_value.exp().round() as i64).clamp(d.low, d.high)
            } else if let Some(step) = d.step {
                let n_steps = (d.high - d.low) / step;
                d.low + rng.i64(0..=n_steps) * step
            } else {
                rng.i64(d.low..=d.high)
            };
            ParamValue::Int(value)
        }
        Distribution::Categorical(d) => ParamValue::Categorical(rng.usize(0..d.n_choices)),
    }
}
