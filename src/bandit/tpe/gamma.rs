use core::fmt::Debug;

use crate::Error;

/// A strategy for choosing the fraction of completed trials treated as "good".
///
/// The threshold index is `floor(gamma * n)` over the `n` sorted outcomes,
/// so the returned value must lie in (0.0, 1.0).
///
/// # Examples
///
/// ```
/// use parzen::bandit::tpe::GammaStrategy;
///
/// #[derive(Debug, Clone)]
/// struct ConstantGamma(f64);
///
/// impl GammaStrategy for ConstantGamma {
///     fn gamma(&self, _n_trials: usize) -> f64 {
///         self.0
///     }
///
///     fn clone_box(&self) -> Box<dyn GammaStrategy> {
///         Box::new(self.clone())
///     }
/// }
/// ```
pub trait GammaStrategy: Send + Sync + Debug {
    /// Computes gamma for `n_trials` completed trials.
    fn gamma(&self, n_trials: usize) -> f64;

    /// Creates a boxed clone of this strategy.
    fn clone_box(&self) -> Box<dyn GammaStrategy>;

    /// The constant gamma, if this strategy does not depend on the trial count.
    ///
    /// Only constant strategies can be written into a snapshot.
    fn fixed_value(&self) -> Option<f64> {
        None
    }
}

impl Clone for Box<dyn GammaStrategy> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A gamma that never changes. The default, 0.15, keeps the best 15% as good.
///
/// # Examples
///
/// ```
/// use parzen::bandit::tpe::{FixedGamma, GammaStrategy};
///
/// let strategy = FixedGamma::new(0.25).unwrap();
/// assert!((strategy.gamma(1000) - 0.25).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedGamma {
    gamma: f64,
}

impl FixedGamma {
    /// Creates a fixed gamma strategy.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidGamma` if gamma is not in (0.0, 1.0).
    pub fn new(gamma: f64) -> crate::Result<Self> {
        // written so that NaN is rejected as well
        if !(gamma > 0.0 && gamma < 1.0) {
            return Err(Error::InvalidGamma(gamma));
        }
        Ok(Self { gamma })
    }

    /// Returns the fixed gamma value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.gamma
    }
}

impl Default for FixedGamma {
    fn default() -> Self {
        Self { gamma: 0.15 }
    }
}

impl GammaStrategy for FixedGamma {
    fn gamma(&self, _n_trials: usize) -> f64 {
        self.gamma
    }

    fn clone_box(&self) -> Box<dyn GammaStrategy> {
        Box::new(*self)
    }

    fn fixed_value(&self) -> Option<f64> {
        Some(self.gamma)
    }
}

/// Hyperopt-style gamma: `min(gamma_max, (gamma_base + 1) / n)`.
///
/// Keeps roughly `gamma_base + 1` good trials once the history is large.
///
/// # Examples
///
/// ```
/// use parzen::bandit::tpe::{GammaStrategy, HyperoptGamma};
///
/// let strategy = HyperoptGamma::new(24.0, 0.5).unwrap();
/// assert!(strategy.gamma(50) > strategy.gamma(200));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HyperoptGamma {
    gamma_base: f64,
    gamma_max: f64,
}

impl HyperoptGamma {
    /// Creates a Hyperopt-style gamma strategy.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidGamma` if `gamma_base` is negative or
    /// `gamma_max` is not in (0.0, 1.0).
    pub fn new(gamma_base: f64, gamma_max: f64) -> crate::Result<Self> {
        if gamma_base.is_nan() || gamma_base < 0.0 {
            return Err(Error::InvalidGamma(gamma_base));
        }
        if !(gamma_max > 0.0 && gamma_max < 1.0) {
            return Err(Error::InvalidGamma(gamma_max));
        }
        Ok(Self {
            gamma_base,
            gamma_max,
        })
    }

    /// Returns the gamma base value.
    #[must_use]
    pub fn gamma_base(&self) -> f64 {
        self.gamma_base
    }

    /// Returns the maximum gamma value.
    #[must_use]
    pub fn gamma_max(&self) -> f64 {
        self.gamma_max
    }
}

impl Default for HyperoptGamma {
    fn default() -> Self {
        Self {
            gamma_base: 24.0,
            gamma_max: 0.25,
        }
    }
}

impl GammaStrategy for HyperoptGamma {
    #[allow(clippy::cast_precision_loss)]
    fn gamma(&self, n_trials: usize) -> f64 {
        if n_trials == 0 {
            return self.gamma_max;
        }
        ((self.gamma_base + 1.0) / n_trials as f64).min(self.gamma_max)
    }

    fn clone_box(&self) -> Box<dyn GammaStrategy> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_gamma_default() {
        let strategy = FixedGamma::default();
        assert!((strategy.gamma(0) - 0.15).abs() < f64::EPSILON);
        assert!((strategy.gamma(100) - 0.15).abs() < f64::EPSILON);
        assert_eq!(strategy.fixed_value(), Some(0.15));
    }

    #[test]
    fn test_fixed_gamma_invalid() {
        assert!(FixedGamma::new(0.0).is_err());
        assert!(FixedGamma::new(1.0).is_err());
        assert!(FixedGamma::new(-0.1).is_err());
        assert!(FixedGamma::new(f64::NAN).is_err());
    }

    #[test]
    fn test_hyperopt_gamma() {
        let strategy = HyperoptGamma::default();
        assert!((strategy.gamma(0) - 0.25).abs() < f64::EPSILON);
        assert!((strategy.gamma(50) - 0.25).abs() < f64::EPSILON);
        assert!((strategy.gamma(200) - 0.125).abs() < f64::EPSILON);
        assert_eq!(strategy.fixed_value(), None);
    }

    #[test]
    fn test_hyperopt_gamma_invalid() {
        assert!(HyperoptGamma::new(-1.0, 0.25).is_err());
        assert!(HyperoptGamma::new(24.0, 1.0).is_err());
    }

    #[test]
    fn test_boxed_clone() {
        let boxed: Box<dyn GammaStrategy> = Box::new(FixedGamma::new(0.3).unwrap());
        let cloned = boxed.clone();
        assert!((cloned.gamma(7) - 0.3).abs() < f64::EPSILON);
    }
}
