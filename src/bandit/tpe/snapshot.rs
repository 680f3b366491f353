use std::path::Path;

use super::{ConstantLiarStrategy, TpeBandit, TpeBanditBuilder};
use crate::error::{Error, Result};
use crate::estimator::DensityEstimator;
use crate::space::SearchSpace;

/// Current snapshot schema version.
const SNAPSHOT_VERSION: u32 = 1;

/// A serializable snapshot of a [`TpeBandit`]'s configuration.
///
/// # Schema versioning
///
/// The `version` field enables future schema evolution without breaking
/// existing files. The current version is `1`.
///
/// # Compiled state
///
/// The pipeline and prior sampler are **not** included. A restored bandit
/// rebuilds them on first use, and the estimators are supplied again to
/// [`TpeBandit::restore`]. The event sink reverts to the default
/// [`TracingSink`](crate::event::TracingSink).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TpeBanditSnapshot {
    /// Schema version for forward compatibility.
    pub version: u32,
    /// The search space.
    pub space: SearchSpace,
    /// The fixed gamma.
    pub gamma: f64,
    /// Completed trials required before model-based suggestions.
    pub n_startup_jobs: usize,
    /// Candidates drawn per call.
    pub n_ei_candidates: usize,
    /// Seed of the prior sampler and the pipeline.
    pub seed: u64,
    /// How running trials are treated.
    #[serde(default)]
    pub constant_liar: ConstantLiarStrategy,
}

impl<G: DensityEstimator, B: DensityEstimator> TpeBandit<G, B> {
    /// Captures the bandit's configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Snapshot` if the gamma strategy depends on the trial
    /// count, since only a fixed gamma can be stored.
    pub fn snapshot(&self) -> Result<TpeBanditSnapshot> {
        let gamma = self.gamma_strategy.fixed_value().ok_or_else(|| {
            Error::Snapshot(format!(
                "gamma strategy {:?} is not fixed and cannot be stored",
                self.gamma_strategy
            ))
        })?;
        Ok(TpeBanditSnapshot {
            version: SNAPSHOT_VERSION,
            space: self.space.clone(),
            gamma,
            n_startup_jobs: self.n_startup_jobs,
            n_ei_candidates: self.n_ei_candidates,
            seed: self.seed,
            constant_liar: self.constant_liar,
        })
    }

    /// Rebuilds a bandit from a snapshot and a pair of estimators.
    ///
    /// # Errors
    ///
    /// Returns `Error::Snapshot` for an unknown schema version and the
    /// builder's validation errors for invalid settings.
    pub fn restore(snapshot: TpeBanditSnapshot, good: G, bad: B) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(Error::Snapshot(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        TpeBanditBuilder::new(snapshot.space)
            .estimators(good, bad)
            .gamma(snapshot.gamma)
            .n_startup_jobs(snapshot.n_startup_jobs)
            .n_ei_candidates(snapshot.n_ei_candidates)
            .seed(snapshot.seed)
            .constant_liar(snapshot.constant_liar)
            .build()
    }

    /// Saves the snapshot to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Snapshot` if the snapshot cannot be taken or the file
    /// cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let snapshot = self.snapshot()?;

        // Atomic write: write to a temp file in the same directory, then rename.
        let parent = path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));
        let file = std::fs::File::create(&tmp_path).map_err(io_error)?;
        serde_json::to_writer_pretty(file, &snapshot)
            .map_err(|e| Error::Snapshot(e.to_string()))?;
        std::fs::rename(&tmp_path, path).map_err(io_error)
    }

    /// Loads a bandit from a JSON file written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns `Error::Snapshot` if the file cannot be read or parsed, and the
    /// errors of [`restore`](Self::restore).
    pub fn load(path: impl AsRef<Path>, good: G, bad: B) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(io_error)?;
        let snapshot: TpeBanditSnapshot =
            serde_json::from_reader(std::io::BufReader::new(file))
                .map_err(|e| Error::Snapshot(e.to_string()))?;
        Self::restore(snapshot, good, bad)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn io_error(e: std::io::Error) -> Error {
    Error::Snapshot(e.to_string())
}
