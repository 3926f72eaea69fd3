//! Time grid for simulated and observed trials.
//!
//! Purpose
//! -------
//! Provide a validated description of the sampling grid shared by observed
//! data and every simulated trial matrix: the sampling interval `dt`, the
//! total duration `T`, and the derived number of timepoints.
//!
//! Invariants & assumptions
//! ------------------------
//! - `dt` and `T` are finite and strictly positive.
//! - `n_time = round(T / dt)` and `n_time >= 2`.
//! - The grid is immutable after construction and `Copy`.
//!
//! Conventions
//! -----------
//! - Timepoint `k` sits at `t_k = k · dt` for `k = 0, …, n_time − 1`.
//! - Frequencies are reported in cycles per unit of `dt` (Hz when `dt` is in
//!   seconds).
use crate::timescales::errors::{TimescaleError, TimescaleResult};
use log::warn;

/// Relative tolerance below which `T / dt` is treated as an integer.
const GRID_ROUNDING_TOL: f64 = 1e-9;

/// `TimeGrid` — validated sampling grid `(dt, T, n_time)`.
///
/// Fields
/// ------
/// - `dt`: `f64`
///   Sampling interval; finite and > 0.
/// - `duration`: `f64`
///   Total duration `T`; finite and > 0.
/// - `n_time`: `usize`
///   Number of timepoints, `round(T / dt)`; at least 2.
///
/// Performance
/// -----------
/// - Construction is O(1); the type is `Copy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    /// Sampling interval.
    pub dt: f64,
    /// Total duration `T`.
    pub duration: f64,
    /// Number of timepoints per trial.
    pub n_time: usize,
}

impl TimeGrid {
    /// Construct a validated [`TimeGrid`].
    ///
    /// Parameters
    /// ----------
    /// - `dt`: `f64`
    ///   Sampling interval. Must be finite and strictly positive.
    /// - `duration`: `f64`
    ///   Total duration `T`. Must be finite and strictly positive.
    ///
    /// Returns
    /// -------
    /// `TimescaleResult<TimeGrid>`
    ///   - `Ok(TimeGrid)` with `n_time = round(T / dt)`.
    ///   - `Err(TimescaleError)` if validation fails.
    ///
    /// Errors
    /// ------
    /// - `TimescaleError::InvalidDt` / `TimescaleError::InvalidDuration`
    ///   Returned when `dt` or `T` is non-finite or ≤ 0.
    /// - `TimescaleError::GridTooShort`
    ///   Returned when `round(T / dt) < 2`.
    ///
    /// Notes
    /// -----
    /// - When `T / dt` is not an integer the grid is rounded and a warning is
    ///   logged; the stored `duration` is left as supplied.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_timescales::timescales::core::grid::TimeGrid;
    /// let grid = TimeGrid::new(0.01, 100.0).unwrap();
    /// assert_eq!(grid.n_time, 10_000);
    /// assert!((grid.sampling_rate() - 100.0).abs() < 1e-9);
    /// ```
    pub fn new(dt: f64, duration: f64) -> TimescaleResult<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(TimescaleError::InvalidDt { value: dt });
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TimescaleError::InvalidDuration { value: duration });
        }

        let ratio = duration / dt;
        let n_time = ratio.round() as usize;
        if n_time < 2 {
            return Err(TimescaleError::GridTooShort { n_time });
        }
        if (ratio - ratio.round()).abs() > GRID_ROUNDING_TOL * ratio {
            warn!("T / dt = {ratio} is not an integer; using {n_time} timepoints");
        }

        Ok(TimeGrid { dt, duration, n_time })
    }

    /// Sampling rate `1 / dt`.
    pub fn sampling_rate(&self) -> f64 {
        1.0 / self.dt
    }

    /// Spacing of periodogram frequency bins, `1 / (n_time · dt)`.
    pub fn frequency_resolution(&self) -> f64 {
        1.0 / (self.n_time as f64 * self.dt)
    }

    /// Nyquist frequency `1 / (2 dt)`.
    pub fn nyquist(&self) -> f64 {
        0.5 / self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Confirm the happy path derives `n_time = round(T / dt)`, including a
    // ratio that is only an integer up to floating-point error.
    fn new_rounds_ratio_to_nearest_integer() {
        // Act
        let grid = TimeGrid::new(0.1, 1.0).expect("valid grid");

        // Assert
        assert_eq!(grid.n_time, 10);
        assert!((grid.frequency_resolution() - 1.0).abs() < 1e-12);
        assert!((grid.nyquist() - 5.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Reject non-positive or non-finite grid parameters and grids that are
    // too short to hold a lag.
    fn new_rejects_invalid_inputs() {
        assert_eq!(TimeGrid::new(0.0, 1.0), Err(TimescaleError::InvalidDt { value: 0.0 }));
        assert_eq!(TimeGrid::new(0.1, -1.0), Err(TimescaleError::InvalidDuration { value: -1.0 }));
        assert!(matches!(TimeGrid::new(f64::NAN, 1.0), Err(TimescaleError::InvalidDt { .. })));
        assert_eq!(TimeGrid::new(1.0, 1.2), Err(TimescaleError::GridTooShort { n_time: 1 }));
    }
}
