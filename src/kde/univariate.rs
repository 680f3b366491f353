//! Adaptive Parzen estimator over a bounded interval.
//!
//! The density is a weighted mixture of Gaussians truncated to `[low, high]`:
//! one wide prior component centered on the interval plus one component per
//! observation whose width adapts to the spacing of its sorted neighbours.

/// Largest number of prior-width divisions used for the minimum kernel width.
const MAX_SIGMA_DIVISOR: f64 = 100.0;

/// Rejection-sampling attempts before falling back to clamping.
const MAX_REJECTIONS: usize = 64;

/// A truncated Gaussian mixture fit to observations in internal space.
///
/// # Examples
///
/// ```ignore
/// use crate::kde::ParzenMixture;
///
/// let mix = ParzenMixture::fit(&[0.2, 0.3, 0.8], 0.0, 1.0, 1.0);
/// assert!(mix.log_pdf(0.25) > mix.log_pdf(0.95));
///
/// let mut rng = fastrand::Rng::with_seed(1);
/// let x = mix.sample(&mut rng);
/// assert!((0.0..=1.0).contains(&x));
/// ```
#[derive(Clone, Debug)]
pub(crate) struct ParzenMixture {
    /// Component centers.
    mus: Vec<f64>,
    /// Component widths (standard deviations).
    sigmas: Vec<f64>,
    /// Normalized component weights.
    weights: Vec<f64>,
    /// Truncation mass of each component inside `[low, high]`.
    masses: Vec<f64>,
    low: f64,
    high: f64,
}

impl ParzenMixture {
    /// Fits the mixture to `observations`, which must lie in `[low, high]`.
    ///
    /// `low < high` is required. With no observations the mixture is the prior
    /// component alone.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn fit(observations: &[f64], low: f64, high: f64, prior_weight: f64) -> Self {
        let prior_mu = 0.5 * (low + high);
        let prior_sigma = high - low;

        // (mu, is_prior) sorted by mu; the prior sorts before equal observations
        let mut points: Vec<(f64, bool)> = observations.iter().map(|&x| (x, false)).collect();
        points.push((prior_mu, true));
        points.sort_by(|a, b| a.0.total_cmp(&b.0).then(b.1.cmp(&a.1)));

        let n = points.len();
        let min_sigma = prior_sigma / MAX_SIGMA_DIVISOR.min(n as f64 + 1.0);

        let mut mus = Vec::with_capacity(n);
        let mut sigmas = Vec::with_capacity(n);
        let mut weights = Vec::with_capacity(n);
        for (i, &(mu, is_prior)) in points.iter().enumerate() {
            let sigma = if is_prior {
                prior_sigma
            } else {
                let left = if i > 0 { mu - points[i - 1].0 } else { 0.0 };
                let right = if i + 1 < n { points[i + 1].0 - mu } else { 0.0 };
                left.max(right).clamp(min_sigma, prior_sigma)
            };
            mus.push(mu);
            sigmas.push(sigma);
            weights.push(if is_prior { prior_weight } else { 1.0 });
        }

        let total: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= total;
        }

        let masses = mus
            .iter()
            .zip(&sigmas)
            .map(|(&mu, &s)| norm_cdf((high - mu) / s) - norm_cdf((low - mu) / s))
            .collect();

        Self {
            mus,
            sigmas,
            weights,
            masses,
            low,
            high,
        }
    }

    /// Number of mixture components, including the prior.
    #[cfg(test)]
    pub(crate) fn n_components(&self) -> usize {
        self.mus.len()
    }

    /// Draws a value in `[low, high]`.
    ///
    /// A component is chosen by weight, then a Gaussian draw from it is
    /// rejected until it falls inside the bounds.
    pub(crate) fn sample(&self, rng: &mut fastrand::Rng) -> f64 {
        let k = pick_weighted(&self.weights, rng);
        let (mu, sigma) = (self.mus[k], self.sigmas[k]);
        for _ in 0..MAX_REJECTIONS {
            let x = mu + sigma * crate::rng_util::standard_normal(rng);
            if x >= self.low && x <= self.high {
                return x;
            }
        }
        mu.clamp(self.low, self.high)
    }

    /// Log-density at `x`.
    pub(crate) fn log_pdf(&self, x: f64) -> f64 {
        let terms: Vec<f64> = (0..self.mus.len())
            .map(|k| {
                let z = (x - self.mus[k]) / self.sigmas[k];
                self.weights[k].ln() + norm_pdf(z).ln() - self.sigmas[k].ln() - self.masses[k].ln()
            })
            .collect();
        log_sum_exp(&terms)
    }

    /// Log of the probability mass inside `[a, b]`, clipped to the bounds.
    pub(crate) fn log_mass(&self, a: f64, b: f64) -> f64 {
        let a = a.max(self.low);
        let b = b.min(self.high);
        let mass: f64 = (0..self.mus.len())
            .map(|k| {
                let (mu, s) = (self.mus[k], self.sigmas[k]);
                self.weights[k] * (norm_cdf((b - mu) / s) - norm_cdf((a - mu) / s)) / self.masses[k]
            })
            .sum();
        mass.max(f64::MIN_POSITIVE).ln()
    }
}

/// Index drawn with probability proportional to `weights`.
pub(crate) fn pick_weighted(weights: &[f64], rng: &mut fastrand::Rng) -> usize {
    let total: f64 = weights.iter().sum();
    let threshold = rng.f64() * total;
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }
    weights.len() - 1
}

fn log_sum_exp(terms: &[f64]) -> f64 {
    let max = terms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return max;
    }
    max + terms.iter().map(|t| (t - max).exp()).sum::<f64>().ln()
}

// ---------------------------------------------------------------------------
// Normal distribution helpers (Abramowitz-Stegun approximation)
// ---------------------------------------------------------------------------

/// Standard normal PDF.
fn norm_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal CDF (Abramowitz-Stegun rational approximation).
fn norm_cdf(x: f64) -> f64 {
    if x < -8.0 {
        return 0.0;
    }
    if x > 8.0 {
        return 1.0;
    }

    let abs_x = x.abs();
    let t = 1.0 / (1.0 + 0.231_641_9 * abs_x);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let poly = 0.319_381_530 * t - 0.356_563_782 * t2 + 1.781_477_937 * t3 - 1.821_255_978 * t4
        + 1.330_274_429 * t5;
    let cdf = 1.0 - norm_pdf(abs_x) * poly;

    if x >= 0.0 { cdf } else { 1.0 - cdf }
}
