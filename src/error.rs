#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the lower bound is greater than the upper bound.
    #[error("invalid bounds: low ({low}) must be less than or equal to high ({high})")]
    InvalidBounds {
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when log scale is used with non-positive bounds.
    #[error("invalid log bounds: low must be positive for log scale")]
    InvalidLogBounds,

    /// Returned when step size is not positive.
    #[error("invalid step: step must be positive")]
    InvalidStep,

    /// Returned when categorical choices are empty.
    #[error("categorical choices cannot be empty")]
    EmptyChoices,

    /// Returned when two dimensions of a search space share a name.
    #[error("duplicate dimension name '{0}'")]
    DuplicateDimension(String),

    /// Returned when a dimension's activation condition is malformed.
    #[error("invalid condition on '{name}': {reason}")]
    InvalidCondition {
        /// The name of the conditional dimension.
        name: String,
        /// Why the condition was rejected.
        reason: String,
    },

    /// Returned when data does not match the dimension schema it is combined with.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Returned when two sequences that must line up have different lengths.
    #[error("length mismatch in {what}: expected {expected}, got {got}")]
    LengthMismatch {
        /// What was being compared.
        what: &'static str,
        /// The expected length.
        expected: usize,
        /// The actual length.
        got: usize,
    },

    /// Returned when a dimension column lists the same trial index twice.
    #[error("trial index {idx} appears more than once in dimension {dim}")]
    DuplicateIndex {
        /// The dimension (column) position.
        dim: usize,
        /// The repeated trial index.
        idx: usize,
    },

    /// Returned when a completed trial is recorded without an outcome.
    #[error("trial with status Ok must carry an outcome")]
    MissingOutcome,

    /// Returned when gamma is not in the valid range (0.0, 1.0).
    #[error("invalid gamma: {0} must be in (0.0, 1.0)")]
    InvalidGamma(f64),

    /// Returned when the Parzen prior weight is not positive.
    #[error("invalid prior weight: {0} must be positive")]
    InvalidPriorWeight(f64),

    /// Returned when zero suggestions are requested.
    #[error("at least one suggestion must be requested")]
    ZeroSuggestions,

    /// Returned when the candidate pool size is zero.
    #[error("n_ei_candidates must be at least 1")]
    ZeroCandidates,

    /// Returned when an internal invariant is violated.
    #[error("internal error: {0}")]
    Internal(&'static str),

    /// Returned when a snapshot cannot be written or read.
    #[cfg(feature = "serde")]
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

pub type Result<T> = core::result::Result<T, Error>;
