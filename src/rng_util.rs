/// Generate a random `f64` in the range `[low, high)`.
#[inline]
pub(crate) fn f64_range(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

/// Draw from a standard normal using the Box-Muller transform.
pub(crate) fn standard_normal(rng: &mut fastrand::Rng) -> f64 {
    // 1 - u keeps the argument of ln in (0, 1]
    let u1 = 1.0 - rng.f64();
    let u2 = rng.f64();
    (-2.0 * u1.ln()).sqrt() * (2.0 * core::f64::consts::PI * u2).cos()
}
