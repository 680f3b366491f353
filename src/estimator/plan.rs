//! Search space compiled into the per-dimension form density estimators work in.

use crate::distribution::{Distribution, FloatDistribution, IntDistribution};
use crate::error::{Error, Result};
use crate::param::ParamValue;
use crate::space::SearchSpace;

#[derive(Clone, Debug, PartialEq)]
enum NumericKind {
    Float(FloatDistribution),
    Int(IntDistribution),
}

/// How a numeric dimension maps between parameter values and internal space.
///
/// Internal space is the log of the value for log-scaled dimensions and the
/// value itself otherwise. Integer and stepped dimensions are widened by half a
/// step on each side so every grid point owns an equal-width bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct NumericPlan {
    /// Lower internal-space bound.
    pub low: f64,
    /// Upper internal-space bound.
    pub high: f64,
    kind: NumericKind,
}

impl NumericPlan {
    #[allow(clippy::cast_precision_loss)]
    fn new(distribution: &Distribution) -> Option<Self> {
        let kind = match distribution {
            Distribution::Float(d) => NumericKind::Float(d.clone()),
            Distribution::Int(d) => NumericKind::Int(d.clone()),
            Distribution::Categorical(_) => return None,
        };
        let (low, high) = match &kind {
            NumericKind::Float(d) if d.log_scale => (d.low.ln(), d.high.ln()),
            NumericKind::Float(d) => match d.step {
                Some(q) => (d.low - 0.5 * q, d.high + 0.5 * q),
                None => (d.low, d.high),
            },
            NumericKind::Int(d) if d.log_scale => {
                ((d.low as f64 - 0.5).ln(), (d.high as f64 + 0.5).ln())
            }
            NumericKind::Int(d) => {
                let q = d.step.unwrap_or(1) as f64;
                (d.low as f64 - 0.5 * q, d.high as f64 + 0.5 * q)
            }
        };
        Some(Self { low, high, kind })
    }

    /// Returns `true` if the interval has zero width and every draw is the same value.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.high <= self.low
    }

    /// Maps a parameter value into internal space.
    #[must_use]
    pub fn to_internal(&self, value: &ParamValue) -> Option<f64> {
        let log_scale = match &self.kind {
            NumericKind::Float(d) => d.log_scale,
            NumericKind::Int(d) => d.log_scale,
        };
        let v = value.as_f64()?;
        Some(if log_scale { v.ln() } else { v })
    }

    /// Maps an internal-space draw back onto the dimension's value grid.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_internal(&self, x: f64) -> ParamValue {
        match &self.kind {
            NumericKind::Float(d) => {
                let v = if d.log_scale {
                    x.exp()
                } else if let Some(q) = d.step {
                    let last = ((d.high - d.low) / q).floor();
                    d.low + ((x - d.low) / q).round().clamp(0.0, last) * q
                } else {
                    x
                };
                ParamValue::Float(v.clamp(d.low, d.high))
            }
            NumericKind::Int(d) => {
                let v = if d.log_scale {
                    x.exp().round() as i64
                } else {
                    let q = d.step.unwrap_or(1);
                    let last = (d.high - d.low) / q;
                    let k = (((x - d.low as f64) / q as f64).round() as i64).clamp(0, last);
                    d.low + k * q
                };
                ParamValue::Int(v.clamp(d.low, d.high))
            }
        }
    }

    /// Internal-space bucket that rounds to `value`, or `None` for continuous dimensions.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn bucket(&self, value: &ParamValue) -> Option<(f64, f64)> {
        let v = value.as_f64()?;
        match &self.kind {
            NumericKind::Float(d) if d.log_scale => None,
            NumericKind::Float(d) => d.step.map(|q| (v - 0.5 * q, v + 0.5 * q)),
            NumericKind::Int(d) if d.log_scale => Some(((v - 0.5).ln(), (v + 0.5).ln())),
            NumericKind::Int(d) => {
                let q = d.step.unwrap_or(1) as f64;
                Some((v - 0.5 * q, v + 0.5 * q))
            }
        }
    }

    /// Log-Jacobian of the internal-space transform at `value`.
    ///
    /// Non-zero only for continuous log-scaled dimensions, where the density of
    /// the value is the internal density divided by the value.
    #[must_use]
    pub fn log_jacobian(&self, value: &ParamValue) -> f64 {
        match (&self.kind, value) {
            (NumericKind::Float(d), ParamValue::Float(v)) if d.log_scale => -v.ln(),
            _ => 0.0,
        }
    }
}

/// Per-dimension plan of a compiled search space.
#[derive(Clone, Debug, PartialEq)]
pub enum DimensionPlan {
    /// A float or integer dimension.
    Numeric(NumericPlan),
    /// A categorical dimension with `n_choices` choices.
    Categorical {
        /// Number of choices.
        n_choices: usize,
    },
}

/// A search space prepared once for repeated density fitting and scoring.
#[derive(Clone, Debug)]
pub struct CompiledSpace {
    space: SearchSpace,
    plans: Vec<DimensionPlan>,
}

impl CompiledSpace {
    /// Compiles `space`.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMismatch` if the space declares no dimensions.
    pub fn compile(space: &SearchSpace) -> Result<Self> {
        if space.is_empty() {
            return Err(Error::SchemaMismatch(
                "search space has no dimensions".to_string(),
            ));
        }
        let plans = space
            .dimensions()
            .iter()
            .map(|d| match &d.distribution {
                Distribution::Categorical(c) => Ok(DimensionPlan::Categorical {
                    n_choices: c.n_choices,
                }),
                other => NumericPlan::new(other)
                    .map(DimensionPlan::Numeric)
                    .ok_or(Error::Internal("numeric plan for a categorical dimension")),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            space: space.clone(),
            plans,
        })
    }

    /// The underlying search space.
    #[must_use]
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// Plans in dimension order.
    #[must_use]
    pub fn plans(&self) -> &[DimensionPlan] {
        &self.plans
    }

    /// Number of dimensions.
    #[must_use]
    pub fn n_dims(&self) -> usize {
        self.plans.len()
    }

    /// Fails with `Error::SchemaMismatch` unless `n_dims` matches the space.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn check_dims(&self, n_dims: usize, what: &str) -> Result<()> {
        if n_dims == self.plans.len() {
            Ok(())
        } else {
            Err(Error::SchemaMismatch(format!(
                "{what} has {n_dims} dimensions, search space has {}",
                self.plans.len()
            )))
        }
    }
}
