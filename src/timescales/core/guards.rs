//! Simulation guards — fail loudly on corrupted simulated output.
//!
//! Purpose
//! -------
//! Provide a validated bound on the magnitude of simulated values and a
//! single scan that checks a trial matrix against it. Simulated trials that
//! contain NaN/±∞ or values beyond the bound are rejected with a typed error
//! instead of being passed on to summary statistics.
//!
//! Key behaviors
//! -------------
//! - [`SimGuards::new`] enforces a finite, strictly positive bound.
//! - [`check_trials`] reports the first offending entry in row-major order.
//!
//! Invariants & assumptions
//! ------------------------
//! - Guards never clamp. A tripped guard is always an error.
//! - For valid theta the exact OU update is bounded in distribution, so a
//!   tripped guard indicates a logic bug or an absurd `data_var`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction, a clean matrix, a NaN entry, and an
//!   out-of-bound entry.
use crate::timescales::errors::{TimescaleError, TimescaleResult};
use ndarray::ArrayView2;

/// Default absolute bound on simulated values.
pub const DEFAULT_MAX_ABS: f64 = 1e12;

/// SimGuards — magnitude bound for simulated trial values.
///
/// Fields
/// ------
/// - `max_abs`: `f64`
///   Largest admissible `|x|`; finite and > 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimGuards {
    /// Largest admissible absolute value.
    pub max_abs: f64,
}

impl SimGuards {
    /// Construct validated guards.
    ///
    /// Errors
    /// ------
    /// - `TimescaleError::InvalidGuard` when `max_abs` is non-finite or ≤ 0.
    pub fn new(max_abs: f64) -> TimescaleResult<Self> {
        if !max_abs.is_finite() || max_abs <= 0.0 {
            return Err(TimescaleError::InvalidGuard { value: max_abs });
        }
        Ok(SimGuards { max_abs })
    }
}

impl Default for SimGuards {
    fn default() -> Self {
        SimGuards { max_abs: DEFAULT_MAX_ABS }
    }
}

/// Check every simulated entry is finite and within `guards.max_abs`.
///
/// Errors
/// ------
/// - `TimescaleError::NonFiniteSimulation` on the first NaN/±∞.
/// - `TimescaleError::GuardExceeded` on the first `|x| > max_abs`.
pub fn check_trials(trials: ArrayView2<'_, f64>, guards: &SimGuards) -> TimescaleResult<()> {
    for ((trial, index), &value) in trials.indexed_iter() {
        if !value.is_finite() {
            return Err(TimescaleError::NonFiniteSimulation { trial, index, value });
        }
        if value.abs() > guards.max_abs {
            return Err(TimescaleError::GuardExceeded {
                trial,
                index,
                value,
                bound: guards.max_abs,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn new_rejects_non_positive_bounds() {
        assert!(SimGuards::new(10.0).is_ok());
        assert_eq!(SimGuards::new(0.0), Err(TimescaleError::InvalidGuard { value: 0.0 }));
        assert!(SimGuards::new(f64::INFINITY).is_err());
    }

    #[test]
    // Purpose
    // -------
    // A clean matrix passes; NaN and out-of-bound entries are reported with
    // their position.
    fn check_trials_reports_first_offender() {
        // Arrange
        let guards = SimGuards::new(5.0).unwrap();
        let clean = array![[0.0, 1.0], [-4.0, 4.9]];
        let with_nan = array![[0.0, 1.0], [f64::NAN, 0.0]];
        let too_big = array![[0.0, 6.0], [0.0, 0.0]];

        // Act & Assert
        assert!(check_trials(clean.view(), &guards).is_ok());
        assert!(matches!(
            check_trials(with_nan.view(), &guards),
            Err(TimescaleError::NonFiniteSimulation { trial: 1, index: 0, .. })
        ));
        assert!(matches!(
            check_trials(too_big.view(), &guards),
            Err(TimescaleError::GuardExceeded { trial: 0, index: 1, .. })
        ));
    }
}
