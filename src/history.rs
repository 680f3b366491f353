//! Trial history partitioned by status.

use std::collections::BTreeMap;

use crate::config_set::ConfigSet;
use crate::error::{Error, Result};
use crate::space::{Configuration, SearchSpace};
use crate::types::TrialStatus;

/// The trials of one status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusGroup {
    /// The configurations, one trial index per trial.
    pub configs: ConfigSet,
    /// Outcomes indexed by trial index. Only kept for [`TrialStatus::Ok`].
    pub outcomes: Vec<f64>,
}

/// Configurations and outcomes handed to a bandit on every suggestion call.
///
/// The history is caller-owned and rebuilt from the caller's trial records;
/// bandits never keep it between calls.
///
/// # Examples
///
/// ```
/// use parzen::{Configuration, Distribution, History, ParamValue, SearchSpace, TrialStatus};
///
/// let mut space = SearchSpace::new();
/// space.add("x", Distribution::float(0.0, 1.0, false).unwrap()).unwrap();
///
/// let config: Configuration = [("x", ParamValue::Float(0.4))].into_iter().collect();
/// let mut history = History::new();
/// history.record(&space, TrialStatus::Ok, &config, Some(0.01)).unwrap();
/// history.record(&space, TrialStatus::Running, &config, None).unwrap();
///
/// assert_eq!(history.n_ok(), 1);
/// assert_eq!(history.outcomes(TrialStatus::Ok), &[0.01]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    groups: BTreeMap<TrialStatus, StatusGroup>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the trials of `status` with an already-encoded set.
    ///
    /// For [`TrialStatus::Ok`], `outcomes[i]` is the outcome of trial index `i`
    /// and must cover every trial index of `configs`. Outcomes of other
    /// statuses are discarded.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if `Ok` outcomes do not line up with the set.
    pub fn insert(
        &mut self,
        status: TrialStatus,
        configs: ConfigSet,
        outcomes: Vec<f64>,
    ) -> Result<()> {
        let outcomes = if status == TrialStatus::Ok {
            let bound = configs.index_bound();
            if outcomes.len() != bound {
                return Err(Error::LengthMismatch {
                    what: "ok outcomes",
                    expected: bound,
                    got: outcomes.len(),
                });
            }
            outcomes
        } else {
            Vec::new()
        };
        self.groups.insert(status, StatusGroup { configs, outcomes });
        Ok(())
    }

    /// Appends one trial.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMismatch` if `config` does not conform to `space`
    /// or the status group was built for another schema, and
    /// `Error::MissingOutcome` for an `Ok` trial without an outcome.
    pub fn record(
        &mut self,
        space: &SearchSpace,
        status: TrialStatus,
        config: &Configuration,
        outcome: Option<f64>,
    ) -> Result<()> {
        let encoded = space.to_config_set(core::slice::from_ref(config))?;
        let outcome = match (status, outcome) {
            (TrialStatus::Ok, None) => return Err(Error::MissingOutcome),
            (TrialStatus::Ok, Some(y)) => Some(y),
            _ => None,
        };
        let group = self.groups.entry(status).or_insert_with(|| StatusGroup {
            configs: ConfigSet::empty(space.len()),
            outcomes: Vec::new(),
        });
        group.configs.extend(&encoded)?;
        if let Some(y) = outcome {
            group.outcomes.push(y);
        }
        Ok(())
    }

    /// The trials of `status`, if any were recorded.
    #[must_use]
    pub fn group(&self, status: TrialStatus) -> Option<&StatusGroup> {
        self.groups.get(&status)
    }

    /// The configurations of `status`, if any were recorded.
    #[must_use]
    pub fn configs(&self, status: TrialStatus) -> Option<&ConfigSet> {
        self.groups.get(&status).map(|g| &g.configs)
    }

    /// Outcomes of `status`; empty unless `status` is `Ok`.
    #[must_use]
    pub fn outcomes(&self, status: TrialStatus) -> &[f64] {
        self.groups
            .get(&status)
            .map(|g| g.outcomes.as_slice())
            .unwrap_or_default()
    }

    /// Number of completed trials with an outcome.
    #[must_use]
    pub fn n_ok(&self) -> usize {
        self.outcomes(TrialStatus::Ok).len()
    }

    /// Number of trials recorded under `status`.
    #[must_use]
    pub fn len(&self, status: TrialStatus) -> usize {
        self.configs(status).map_or(0, ConfigSet::n_rows)
    }

    /// Returns `true` if no trial of any status was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(|g| g.configs.is_empty())
    }
}
