//! Good/bad split of completed outcomes.

/// The boundary between good and bad outcomes.
///
/// Good outcomes are strictly below `value`; the rest are bad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threshold {
    /// The outcome value separating good from bad.
    pub value: f64,
    /// Position in the sorted outcomes where the threshold window starts.
    pub index: usize,
}

/// Computes the threshold over ascending `sorted` outcomes.
///
/// With `k = floor(gamma * n)` the threshold is the mean of `sorted[k..k + 2]`.
/// `k` is clamped to the last element and the window to the available data,
/// so any non-empty input yields a threshold. Returns `None` for empty input.
///
/// # Examples
///
/// ```
/// use parzen::bandit::tpe::split_threshold;
///
/// let sorted: Vec<f64> = (1..=10).map(f64::from).collect();
/// let threshold = split_threshold(&sorted, 0.15).unwrap();
/// assert_eq!(threshold.index, 1);
/// assert!((threshold.value - 2.5).abs() < 1e-12);
/// ```
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn split_threshold(sorted: &[f64], gamma: f64) -> Option<Threshold> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let k = ((gamma * n as f64).floor().max(0.0) as usize).min(n - 1);
    let window = &sorted[k..(k + 2).min(n)];
    let value = window.iter().sum::<f64>() / window.len() as f64;
    Some(Threshold { value, index: k })
}

/// Sorts outcomes ascending with NaN last.
pub(crate) fn sorted_outcomes(outcomes: &[f64]) -> Vec<f64> {
    let mut sorted = outcomes.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}
