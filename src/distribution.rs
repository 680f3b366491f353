//! Prior distribution types for search-space dimensions.

use crate::error::{Error, Result};
use crate::param::ParamValue;

/// Distribution for floating-point dimensions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatDistribution {
    /// Lower bound (inclusive).
    pub low: f64,
    /// Upper bound (inclusive).
    pub high: f64,
    /// Whether to sample in log space.
    pub log_scale: bool,
    /// Optional step size for discretization.
    pub step: Option<f64>,
}

/// Distribution for integer dimensions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntDistribution {
    /// Lower bound (inclusive).
    pub low: i64,
    /// Upper bound (inclusive).
    pub high: i64,
    /// Whether to sample in log space.
    pub log_scale: bool,
    /// Optional step size for discretization.
    pub step: Option<i64>,
}

/// Distribution for categorical dimensions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoricalDistribution {
    /// Number of choices available.
    pub n_choices: usize,
}

/// Enum wrapping all prior distribution types.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distribution {
    /// A floating-point distribution.
    Float(FloatDistribution),
    /// An integer distribution.
    Int(IntDistribution),
    /// A categorical distribution.
    Categorical(CategoricalDistribution),
}

impl Distribution {
    /// Uniform (optionally log-uniform) float prior on `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBounds` if `low > high` or either bound is not finite,
    /// and `Error::InvalidLogBounds` if `log_scale` is set with `low <= 0`.
    pub fn float(low: f64, high: f64, log_scale: bool) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(Error::InvalidBounds { low, high });
        }
        if log_scale && low <= 0.0 {
            return Err(Error::InvalidLogBounds);
        }
        Ok(Self::Float(FloatDistribution {
            low,
            high,
            log_scale,
            step: None,
        }))
    }

    /// Quantized float prior on `[low, high]` with the given step.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBounds` for bad bounds and `Error::InvalidStep`
    /// if `step` is not positive.
    pub fn float_stepped(low: f64, high: f64, step: f64) -> Result<Self> {
        if step.is_nan() || step <= 0.0 {
            return Err(Error::InvalidStep);
        }
        match Self::float(low, high, false)? {
            Self::Float(mut d) => {
                d.step = Some(step);
                Ok(Self::Float(d))
            }
            _ => Err(Error::Internal("float constructor returned a non-float")),
        }
    }

    /// Integer prior on `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBounds` if `low > high` and `Error::InvalidLogBounds`
    /// if `log_scale` is set with `low < 1`.
    #[allow(clippy::cast_precision_loss)]
    pub fn int(low: i64, high: i64, log_scale: bool) -> Result<Self> {
        if low > high {
            return Err(Error::InvalidBounds {
                low: low as f64,
                high: high as f64,
            });
        }
        if log_scale && low < 1 {
            return Err(Error::InvalidLogBounds);
        }
        Ok(Self::Int(IntDistribution {
            low,
            high,
            log_scale,
            step: None,
        }))
    }

    /// Categorical prior over `n_choices` choices.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyChoices` if `n_choices` is zero.
    pub fn categorical(n_choices: usize) -> Result<Self> {
        if n_choices == 0 {
            return Err(Error::EmptyChoices);
        }
        Ok(Self::Categorical(CategoricalDistribution { n_choices }))
    }

    /// Returns `true` if `value` has the right variant and lies inside the bounds.
    #[must_use]
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (Self::Float(d), ParamValue::Float(v)) => *v >= d.low && *v <= d.high,
            (Self::Int(d), ParamValue::Int(v)) => *v >= d.low && *v <= d.high,
            (Self::Categorical(d), ParamValue::Categorical(i)) => *i < d.n_choices,
            _ => false,
        }
    }
}
