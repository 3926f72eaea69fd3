//! Observed trial data container.
//!
//! Purpose
//! -------
//! Provide a small, validated container for an observed trial matrix of
//! shape `(num_trials × n_time)` and cache the moments (`data_mean`,
//! `data_var`) that seed the stationary distribution of simulated trials.
//!
//! Key behaviors
//! -------------
//! - [`TrialData::new`] enforces non-emptiness, at least two timepoints per
//!   trial, finiteness of every entry, and non-zero overall variance.
//! - Moments are computed once at construction and never recomputed.
//!
//! Invariants & assumptions
//! ------------------------
//! - `data.nrows() >= 1` and `data.ncols() >= 2`.
//! - Every entry is finite.
//! - `var > 0`; `var` is the population variance (denominator `N`) over all
//!   entries, `mean` the grand mean.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path and each rejection branch.
use crate::timescales::errors::{TimescaleError, TimescaleResult};
use ndarray::{Array2, ArrayView2};

/// `TrialData` — validated observed trials plus cached moments.
///
/// Fields
/// ------
/// - `data`: `Array2<f64>`
///   Observed trials, one row per trial.
/// - `mean`: `f64`
///   Grand mean over all entries.
/// - `var`: `f64`
///   Population variance over all entries (strictly positive).
///
/// Performance
/// -----------
/// - Validation and moment computation are a single O(N) pass each.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialData {
    data: Array2<f64>,
    mean: f64,
    var: f64,
}

impl TrialData {
    /// Construct a validated [`TrialData`] instance from a raw trial matrix.
    ///
    /// Errors
    /// ------
    /// - `TimescaleError::NoTrials` when there are no rows.
    /// - `TimescaleError::TooFewTimepoints` when there are fewer than 2 columns.
    /// - `TimescaleError::NonFiniteData` on the first NaN/±∞ entry (row-major).
    /// - `TimescaleError::ZeroVarianceData` when all entries are equal.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_timescales::timescales::core::data::TrialData;
    /// let data = TrialData::new(array![[1.0, 3.0], [1.0, 3.0]]).unwrap();
    /// assert_eq!(data.mean(), 2.0);
    /// assert_eq!(data.var(), 1.0);
    /// ```
    pub fn new(data: Array2<f64>) -> TimescaleResult<Self> {
        let (n_trials, n_time) = data.dim();
        if n_trials == 0 {
            return Err(TimescaleError::NoTrials);
        }
        if n_time < 2 {
            return Err(TimescaleError::TooFewTimepoints { n_time });
        }

        for ((trial, index), &value) in data.indexed_iter() {
            if !value.is_finite() {
                return Err(TimescaleError::NonFiniteData { trial, index, value });
            }
        }

        let (mean, var) = grand_moments(data.view());
        if var <= 0.0 {
            return Err(TimescaleError::ZeroVarianceData);
        }

        Ok(TrialData { data, mean, var })
    }

    /// Read-only view of the trial matrix.
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Number of observed trials (rows).
    pub fn num_trials(&self) -> usize {
        self.data.nrows()
    }

    /// Number of timepoints per trial (columns).
    pub fn n_time(&self) -> usize {
        self.data.ncols()
    }

    /// Grand mean over all entries.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance over all entries.
    pub fn var(&self) -> f64 {
        self.var
    }
}

/// Assemble a `(rows.len() × n_time)` trial matrix from nested rows.
///
/// The row count is kept even when the rows are empty, so `[[], []]`
/// becomes a `2 × 0` matrix and [`TrialData::new`] reports
/// `TooFewTimepoints` rather than `NoTrials`.
///
/// Errors
/// ------
/// - `TimescaleError::RaggedTrials` when a row's length differs from the
///   first row's.
pub fn trials_from_rows(rows: Vec<Vec<f64>>) -> TimescaleResult<Array2<f64>> {
    let n_trials = rows.len();
    let n_time = rows.first().map_or(0, Vec::len);
    if let Some((trial, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_time) {
        return Err(TimescaleError::RaggedTrials { trial, expected: n_time, actual: row.len() });
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_trials, n_time), flat).map_err(|_| {
        TimescaleError::RaggedTrials { trial: 0, expected: n_time, actual: n_time }
    })
}

/// Grand mean and population variance of every entry in `data`.
///
/// Uses a two-pass computation; callers guarantee `data` is non-empty.
pub(crate) fn grand_moments(data: ArrayView2<'_, f64>) -> (f64, f64) {
    let n = data.len() as f64;
    let mean = data.sum() / n;
    let var = data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / n;
    (mean, var)
}
