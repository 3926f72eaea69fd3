//! summary — reduce trial matrices to summary statistics.
//!
//! Purpose
//! -------
//! Turn raw observed or simulated trials into the low-dimensional summaries
//! compared by ABC: either an autocorrelation vector ([`autocorr`]) or a
//! power spectral density with its frequency bins ([`psd`]).
//!
//! Key behaviors
//! -------------
//! - [`SummaryStats::compute`] dispatches on a [`SummaryMetric`] using the
//!   model's [`TimeGrid`] for the sampling rate.
//! - Both reducers average over trials, so summaries of trial matrices with
//!   different trial counts are directly comparable.
//!
//! Invariants & assumptions
//! ------------------------
//! - Summaries computed on the same grid with the same metric always have
//!   the same length and (for PSD) identical frequency axes.
//! - Reducers hold no shared state; concurrent calls are independent.
pub mod autocorr;
pub mod psd;

pub use self::autocorr::{autocorrelation, e_folding_time};
pub use self::psd::{peak_frequency, power_spectral_density};

use crate::timescales::{
    core::{grid::TimeGrid, options::SummaryMetric},
    errors::TimescaleResult,
};
use ndarray::{Array1, ArrayView1, ArrayView2};

/// `SummaryStats` — reduced representation of a trial matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryStats {
    /// Trial-averaged autocorrelation, `ac[0] == 1`.
    Autocorrelation(Array1<f64>),
    /// Trial-averaged one-sided PSD with its frequency bins (equal lengths).
    PowerSpectrum {
        /// Power per bin.
        psd: Array1<f64>,
        /// Bin frequencies.
        freqs: Array1<f64>,
    },
}

impl SummaryStats {
    /// Reduce `trials` according to `metric` on `grid`.
    ///
    /// Errors
    /// ------
    /// - Propagates the reducer's errors (see [`autocorrelation`] and
    ///   [`power_spectral_density`]).
    pub fn compute(
        metric: SummaryMetric, trials: ArrayView2<'_, f64>, grid: &TimeGrid,
    ) -> TimescaleResult<Self> {
        match metric {
            SummaryMetric::Autocorrelation { n_lags } => {
                Ok(SummaryStats::Autocorrelation(autocorrelation(trials, n_lags)?))
            }
            SummaryMetric::PowerSpectrum => {
                let (psd, freqs) = power_spectral_density(trials, grid.sampling_rate())?;
                Ok(SummaryStats::PowerSpectrum { psd, freqs })
            }
        }
    }

    /// The vector compared by distance functions (autocorrelation or PSD).
    pub fn values(&self) -> ArrayView1<'_, f64> {
        match self {
            SummaryStats::Autocorrelation(ac) => ac.view(),
            SummaryStats::PowerSpectrum { psd, .. } => psd.view(),
        }
    }

    /// Number of entries in [`values`](Self::values).
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// Whether the summary has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Peak frequency for spectral summaries; `None` for autocorrelation.
    pub fn peak_frequency(&self) -> Option<f64> {
        match self {
            SummaryStats::Autocorrelation(_) => None,
            SummaryStats::PowerSpectrum { psd, freqs } => peak_frequency(psd.view(), freqs.view()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    // Purpose
    // -------
    // `compute` dispatches on the metric and the accessors expose the
    // compared vector.
    fn compute_dispatches_on_metric() {
        // Arrange
        let grid = TimeGrid::new(0.5, 8.0).unwrap();
        let trials = Array2::from_shape_fn((2, grid.n_time), |(i, k)| ((k * (i + 2)) as f64).sin());

        // Act
        let ac =
            SummaryStats::compute(SummaryMetric::Autocorrelation { n_lags: 5 }, trials.view(), &grid)
                .unwrap();
        let ps = SummaryStats::compute(SummaryMetric::PowerSpectrum, trials.view(), &grid).unwrap();

        // Assert
        assert_eq!(ac.len(), 5);
        assert_eq!(ac.values()[0], 1.0);
        assert_eq!(ac.peak_frequency(), None);
        assert_eq!(ps.len(), grid.n_time / 2);
        assert!(ps.peak_frequency().is_some());
    }
}
