#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Tree-structured Parzen Estimator suggestion engine for black-box
//! optimization over conditional search spaces.
//!
//! Given the history of tried configurations and their outcomes, a
//! [`Bandit`](bandit::Bandit) proposes the next configurations to evaluate.
//! [`TpeBandit`](bandit::tpe::TpeBandit) splits completed trials into good and
//! bad sets at a quantile threshold, fits a density to each, and returns the
//! candidates drawn from the good density with the highest likelihood ratio.
//! Evaluating the objective and storing trials is left to the caller.
//!
//! # Getting Started
//!
//! ```
//! use parzen::prelude::*;
//!
//! let mut space = SearchSpace::new();
//! space.add("x", Distribution::float(-10.0, 10.0, false)?)?;
//!
//! let bandit = TpeBandit::builder(space.clone())
//!     .n_startup_jobs(10)
//!     .seed(42)
//!     .build()?;
//!
//! let mut history = History::new();
//! for _ in 0..30 {
//!     for config in bandit.suggest(&history, 2)? {
//!         let x = config.get("x").and_then(ParamValue::as_f64).unwrap_or_default();
//!         history.record(&space, TrialStatus::Ok, &config, Some((x - 3.0).powi(2)))?;
//!     }
//! }
//! assert_eq!(history.n_ok(), 60);
//! # Ok::<(), parzen::Error>(())
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`SearchSpace`] | Ordered, possibly conditional dimensions with their priors. |
//! | [`Configuration`] | One trial's active values keyed by dimension name. |
//! | [`ConfigSet`] | Many configurations stored sparsely, one [`IdxsVals`] column per dimension. |
//! | [`History`] | Configurations and outcomes grouped by [`TrialStatus`]. |
//! | [`Bandit`](bandit::Bandit) | Strategy proposing the next configurations. |
//! | [`DensityEstimator`](estimator::DensityEstimator) | Pluggable good/bad density model. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on public types, [`TpeBandit::save`](bandit::tpe::TpeBandit::save)/[`load`](bandit::tpe::TpeBandit::load) | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) from the default [`TracingSink`](event::TracingSink) | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::warn!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($($arg:tt)*) => {};
}

pub mod bandit;
mod config_set;
mod distribution;
mod error;
pub mod estimator;
pub mod event;
mod history;
mod kde;
mod param;
mod rng_util;
mod space;
mod types;

pub use config_set::{ConfigSet, IdxsVals};
pub use distribution::{
    CategoricalDistribution, Distribution, FloatDistribution, IntDistribution,
};
pub use error::{Error, Result};
pub use history::{History, StatusGroup};
pub use param::ParamValue;
pub use space::{Condition, Configuration, Dimension, SearchSpace};
pub use types::TrialStatus;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use parzen::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bandit::Bandit;
    pub use crate::bandit::random::RandomBandit;
    #[cfg(feature = "serde")]
    pub use crate::bandit::tpe::TpeBanditSnapshot;
    pub use crate::bandit::tpe::{
        ConstantLiarStrategy, FixedGamma, GammaStrategy, HyperoptGamma, Phase, TpeBandit,
        TpeBanditBuilder,
    };
    pub use crate::config_set::{ConfigSet, IdxsVals};
    pub use crate::distribution::Distribution;
    pub use crate::error::{Error, Result};
    pub use crate::estimator::{DensityEstimator, IndependentParzenEstimator};
    pub use crate::event::{EventSink, SuggestEvent, TracingSink};
    pub use crate::history::History;
    pub use crate::param::ParamValue;
    pub use crate::space::{Configuration, SearchSpace};
    pub use crate::types::TrialStatus;
}
