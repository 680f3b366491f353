/// Strategy for imputing outcomes of running trials before the good/bad split.
///
/// When several trials are in flight, imputing a "lie" for each running trial
/// keeps consecutive suggestion calls from proposing the same region. Trials
/// with status `New` are never imputed.
///
/// # Variants
///
/// - `None`: No imputation; running trials are ignored (default)
/// - `Mean`: Impute the mean of completed outcomes
/// - `Best`: Impute the best (minimum) completed outcome
/// - `Worst`: Impute the worst (maximum) completed outcome
/// - `Custom(f64)`: Impute a specific value
///
/// # Examples
///
/// ```
/// use parzen::bandit::tpe::ConstantLiarStrategy;
///
/// let lie = ConstantLiarStrategy::Mean.impute(&[1.0, 2.0, 6.0]);
/// assert_eq!(lie, Some(3.0));
/// assert_eq!(ConstantLiarStrategy::None.impute(&[1.0]), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstantLiarStrategy {
    /// No imputation; running trials are ignored.
    #[default]
    None,
    /// Impute with the mean of completed outcomes.
    Mean,
    /// Impute with the best (minimum) completed outcome.
    Best,
    /// Impute with the worst (maximum) completed outcome.
    Worst,
    /// Impute with a specific user-provided value.
    Custom(f64),
}

impl ConstantLiarStrategy {
    /// The value to impute given the completed outcomes.
    ///
    /// Returns `None` for [`ConstantLiarStrategy::None`], and for the
    /// data-driven strategies when there are no finite completed outcomes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn impute(&self, ok_outcomes: &[f64]) -> Option<f64> {
        let finite = ok_outcomes.iter().copied().filter(|y| y.is_finite());
        match self {
            Self::None => None,
            Self::Custom(v) => Some(*v),
            Self::Mean => {
                let (sum, n) = finite.fold((0.0, 0_usize), |(s, n), y| (s + y, n + 1));
                (n > 0).then(|| sum / n as f64)
            }
            Self::Best => finite.reduce(f64::min),
            Self::Worst => finite.reduce(f64::max),
        }
    }
}
