//! Core types shared across the crate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The status of a trial as reported by the orchestrator.
///
/// Only [`TrialStatus::Ok`] outcomes feed the good/bad split. The other
/// statuses are carried so callers can hand over their whole history and so
/// pending trials can be imputed by a [`ConstantLiarStrategy`](crate::bandit::tpe::ConstantLiarStrategy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrialStatus {
    /// The trial was suggested but not started yet.
    New,
    /// The trial is currently being evaluated.
    Running,
    /// The trial completed and reported an outcome.
    Ok,
    /// The trial failed.
    Failed,
}
