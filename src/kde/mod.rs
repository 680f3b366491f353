//! Kernel density estimation for search-space dimensions.
//!
//! - `univariate` - Adaptive Parzen mixture of truncated Gaussians over one bounded dimension

mod univariate;

pub(crate) use univariate::{ParzenMixture, pick_weighted};
