//! Sparse, per-dimension encoding of a batch of configurations.
//!
//! A [`ConfigSet`] stores one [`IdxsVals`] column per search-space dimension.
//! Each column records only the trials in which that dimension was active:
//! `idxs[j]` is a trial index and `vals[j]` the value used in that trial. A
//! dimension that was not active for a trial is simply absent from the column.
//!
//! All columns of one set share a single trial-index space, so trial `i` is the
//! union of every `(dim, vals[j])` with `idxs[j] == i`.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::Range;

use crate::error::{Error, Result};
use crate::param::ParamValue;

/// The active (trial index, value) pairs of one dimension.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdxsVals {
    /// Trial indices in which the dimension was active.
    pub idxs: Vec<usize>,
    /// Values used in those trials, aligned with `idxs`.
    pub vals: Vec<ParamValue>,
}

impl IdxsVals {
    /// Creates a column from aligned index and value lists.
    #[must_use]
    pub fn new(idxs: Vec<usize>, vals: Vec<ParamValue>) -> Self {
        Self { idxs, vals }
    }

    /// Number of active entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.idxs.len()
    }

    /// Returns `true` if the dimension is active in no trial.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.idxs.is_empty()
    }

    /// Iterates over `(trial index, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ParamValue)> {
        self.idxs.iter().copied().zip(self.vals.iter())
    }

    fn validate(&self, dim: usize) -> Result<()> {
        if self.idxs.len() != self.vals.len() {
            return Err(Error::LengthMismatch {
                what: "column idxs/vals",
                expected: self.idxs.len(),
                got: self.vals.len(),
            });
        }
        let mut seen = HashSet::with_capacity(self.idxs.len());
        for &idx in &self.idxs {
            if !seen.insert(idx) {
                return Err(Error::DuplicateIndex { dim, idx });
            }
        }
        Ok(())
    }
}

/// A sparse set of configurations over a fixed list of dimensions.
///
/// # Examples
///
/// ```
/// use parzen::ConfigSet;
/// use parzen::ParamValue;
///
/// // dimension 0 active in trials 0 and 1, dimension 1 only in trial 1
/// let set = ConfigSet::from_lists(
///     vec![vec![0, 1], vec![1]],
///     vec![
///         vec![ParamValue::Categorical(0), ParamValue::Categorical(1)],
///         vec![ParamValue::Float(0.5)],
///     ],
/// )
/// .unwrap();
///
/// let good = set.take(&[false, true]).unwrap();
/// assert_eq!(good.rows(), vec![1]);
/// assert_eq!(good.column(1).unwrap().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfigSet {
    columns: Vec<IdxsVals>,
}

impl ConfigSet {
    /// Creates a set with `n_dims` dimensions and no trials.
    #[must_use]
    pub fn empty(n_dims: usize) -> Self {
        Self {
            columns: vec![IdxsVals::default(); n_dims],
        }
    }

    /// Builds a set from already-formed columns.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if a column's `idxs` and `vals` differ in
    /// length, and `Error::DuplicateIndex` if a column repeats a trial index.
    pub fn from_columns(columns: Vec<IdxsVals>) -> Result<Self> {
        for (dim, column) in columns.iter().enumerate() {
            column.validate(dim)?;
        }
        Ok(Self { columns })
    }

    /// Builds a set from flat per-dimension index and value lists.
    ///
    /// This is the inverse of [`flatten`](Self::flatten).
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if the two lists disagree on the number
    /// of dimensions or any column is misaligned, and `Error::DuplicateIndex`
    /// if a column repeats a trial index.
    pub fn from_lists(idxs: Vec<Vec<usize>>, vals: Vec<Vec<ParamValue>>) -> Result<Self> {
        if idxs.len() != vals.len() {
            return Err(Error::LengthMismatch {
                what: "dimension lists",
                expected: idxs.len(),
                got: vals.len(),
            });
        }
        let columns = idxs
            .into_iter()
            .zip(vals)
            .map(|(i, v)| IdxsVals::new(i, v))
            .collect();
        Self::from_columns(columns)
    }

    /// Splits the set into per-dimension index lists and value lists.
    #[must_use]
    pub fn flatten(&self) -> (Vec<Vec<usize>>, Vec<Vec<ParamValue>>) {
        self.columns
            .iter()
            .map(|c| (c.idxs.clone(), c.vals.clone()))
            .unzip()
    }

    /// Number of dimensions in the schema.
    #[must_use]
    pub fn n_dims(&self) -> usize {
        self.columns.len()
    }

    /// The column of dimension `dim`, if it exists.
    #[must_use]
    pub fn column(&self, dim: usize) -> Option<&IdxsVals> {
        self.columns.get(dim)
    }

    /// All columns in dimension order.
    #[must_use]
    pub fn columns(&self) -> &[IdxsVals] {
        &self.columns
    }

    /// Sorted trial indices that appear in at least one column.
    #[must_use]
    pub fn rows(&self) -> Vec<usize> {
        let rows: BTreeSet<usize> = self
            .columns
            .iter()
            .flat_map(|c| c.idxs.iter().copied())
            .collect();
        rows.into_iter().collect()
    }

    /// Number of distinct trials in the set.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows().len()
    }

    /// One past the largest trial index, or 0 for an empty set.
    #[must_use]
    pub fn index_bound(&self) -> usize {
        self.columns
            .iter()
            .flat_map(|c| c.idxs.iter().copied())
            .max()
            .map_or(0, |m| m + 1)
    }

    /// Returns `true` if no dimension is active in any trial.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(IdxsVals::is_empty)
    }

    /// An empty set with the same dimensions as `self`.
    #[must_use]
    pub fn new_like_self(&self) -> Self {
        Self::empty(self.n_dims())
    }

    /// Keeps the entries whose trial index `i` has `mask[i] == true`.
    ///
    /// Trial indices are preserved, so taking with a mask and with its negation
    /// partitions the set.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if `mask` does not cover every trial index.
    pub fn take(&self, mask: &[bool]) -> Result<Self> {
        let bound = self.index_bound();
        if mask.len() < bound {
            return Err(Error::LengthMismatch {
                what: "take mask",
                expected: bound,
                got: mask.len(),
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let (idxs, vals) = c.iter().filter(|(i, _)| mask[*i]).map(|(i, v)| (i, *v)).unzip();
                IdxsVals { idxs, vals }
            })
            .collect();
        Ok(Self { columns })
    }

    /// Selects trials in the order given by `rows`, renumbering them `0..rows.len()`.
    ///
    /// Trial indices in `rows` that do not occur in the set produce empty rows.
    #[must_use]
    pub fn gather(&self, rows: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let lookup: HashMap<usize, ParamValue> = c.iter().map(|(i, v)| (i, *v)).collect();
                let mut out = IdxsVals::default();
                for (new_idx, old_idx) in rows.iter().enumerate() {
                    if let Some(v) = lookup.get(old_idx) {
                        out.idxs.push(new_idx);
                        out.vals.push(*v);
                    }
                }
                out
            })
            .collect();
        Self { columns }
    }

    /// Appends the trials of `other` under fresh trial indices.
    ///
    /// The trials of `other` are renumbered in ascending order of their old
    /// index, starting at [`index_bound`](Self::index_bound). Returns the range
    /// of indices that were assigned.
    ///
    /// # Errors
    ///
    /// Returns `Error::SchemaMismatch` if `other` has a different number of dimensions.
    pub fn extend(&mut self, other: &Self) -> Result<Range<usize>> {
        if other.n_dims() != self.n_dims() {
            return Err(Error::SchemaMismatch(format!(
                "cannot concatenate a set of {} dimensions onto one of {}",
                other.n_dims(),
                self.n_dims()
            )));
        }
        let offset = self.index_bound();
        let renumber: HashMap<usize, usize> = other
            .rows()
            .into_iter()
            .enumerate()
            .map(|(rank, old)| (old, offset + rank))
            .collect();
        for (dst, src) in self.columns.iter_mut().zip(&other.columns) {
            for (i, v) in src.iter() {
                dst.idxs.push(renumber[&i]);
                dst.vals.push(*v);
            }
        }
        Ok(offset..offset + renumber.len())
    }

    /// Values of trial `idx` as `(dimension, value)` pairs.
    #[must_use]
    pub fn row(&self, idx: usize) -> Vec<(usize, ParamValue)> {
        self.columns
            .iter()
            .enumerate()
            .filter_map(|(dim, c)| c.iter().find(|(i, _)| *i == idx).map(|(_, v)| (dim, *v)))
            .collect()
    }

    /// Appends one trial given as a dense buffer of optional values.
    pub(crate) fn push_row(&mut self, idx: usize, values: &[Option<ParamValue>]) {
        for (column, value) in self.columns.iter_mut().zip(values) {
            if let Some(v) = value {
                column.idxs.push(idx);
                column.vals.push(*v);
            }
        }
    }
}
