//! Validation helpers for model construction and parameter vectors.
//!
//! Purpose
//! -------
//! Centralize the checks shared by every model variant so that construction
//! and simulation entry points report the same `TimescaleError` variants:
//! theta length and per-parameter domains, the ABC tolerance, lag counts,
//! simulated trial counts, and agreement between observed data and grid.
//!
//! Conventions
//! -----------
//! - Functions return `TimescaleResult<()>` and never panic.
//! - Domain rules come from [`ParamDomain`]: timescales finite and > 0,
//!   frequencies finite, > 0 and below Nyquist, coefficients in `[0, 1]`.
use crate::timescales::{
    core::{
        grid::TimeGrid,
        params::{ModelKind, ParamDomain},
    },
    errors::{TimescaleError, TimescaleResult},
};
use ndarray::ArrayView1;

/// Validate a theta vector against the layout and domains of `kind`.
///
/// Errors
/// ------
/// - `TimescaleError::ThetaLengthMismatch` when `theta.len() != kind.n_params()`.
/// - `TimescaleError::InvalidTheta` on the first entry outside its domain.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_timescales::timescales::core::{grid::TimeGrid, params::ModelKind};
/// # use rust_timescales::timescales::core::validation::validate_theta;
/// let grid = TimeGrid::new(0.01, 10.0).unwrap();
/// assert!(validate_theta(ModelKind::OneTimescale, array![1.5].view(), &grid).is_ok());
/// assert!(validate_theta(ModelKind::OneTimescale, array![-1.0].view(), &grid).is_err());
/// ```
pub fn validate_theta(
    kind: ModelKind, theta: ArrayView1<'_, f64>, grid: &TimeGrid,
) -> TimescaleResult<()> {
    if theta.len() != kind.n_params() {
        return Err(TimescaleError::ThetaLengthMismatch {
            expected: kind.n_params(),
            actual: theta.len(),
        });
    }

    for ((&value, &name), &domain) in
        theta.iter().zip(kind.param_names()).zip(kind.param_domains())
    {
        let reason = match domain {
            ParamDomain::Timescale if !value.is_finite() || value <= 0.0 => {
                Some("timescale must be finite and > 0")
            }
            ParamDomain::Frequency if !value.is_finite() || value <= 0.0 => {
                Some("frequency must be finite and > 0")
            }
            ParamDomain::Frequency if value >= grid.nyquist() => {
                Some("frequency must be below the Nyquist frequency 1 / (2 dt)")
            }
            ParamDomain::Coefficient if !(0.0..=1.0).contains(&value) => {
                Some("coefficient must lie in [0, 1]")
            }
            _ => None,
        };
        if let Some(reason) = reason {
            return Err(TimescaleError::InvalidTheta { name, value, reason });
        }
    }
    Ok(())
}

/// Validate the ABC tolerance: finite and ≥ 0.
pub fn validate_epsilon(epsilon: f64) -> TimescaleResult<()> {
    if !epsilon.is_finite() || epsilon < 0.0 {
        return Err(TimescaleError::InvalidEpsilon { value: epsilon });
    }
    Ok(())
}

/// Validate `1 ≤ n_lags ≤ n_time`.
pub fn validate_n_lags(n_lags: usize, n_time: usize) -> TimescaleResult<()> {
    if n_lags == 0 || n_lags > n_time {
        return Err(TimescaleError::InvalidNLags { n_lags, n_time });
    }
    Ok(())
}

/// Validate the simulated trial count: at least one.
pub fn validate_num_trials(num_trials: usize) -> TimescaleResult<()> {
    if num_trials == 0 {
        return Err(TimescaleError::InvalidNumTrials { value: num_trials });
    }
    Ok(())
}

/// Validate that the observed trial width equals `grid.n_time`.
pub fn validate_data_width(n_time: usize, grid: &TimeGrid) -> TimescaleResult<()> {
    if n_time != grid.n_time {
        return Err(TimescaleError::DataShapeMismatch { expected: grid.n_time, actual: n_time });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn grid() -> TimeGrid {
        TimeGrid::new(0.01, 10.0).expect("valid grid")
    }

    #[test]
    // Purpose
    // -------
    // Check every domain rule of the oscillatory layout `[tau, f, c]`.
    //
    // Expect
    // ------
    // - A valid vector passes.
    // - Wrong length, non-positive tau, super-Nyquist frequency and
    //   out-of-range coefficient each fail with the parameter's name.
    fn validate_theta_enforces_domains() {
        let grid = grid();
        let kind = ModelKind::OneTimescaleAndOsc;

        assert!(validate_theta(kind, array![1.0, 0.5, 0.3].view(), &grid).is_ok());
        assert_eq!(
            validate_theta(kind, array![1.0].view(), &grid),
            Err(TimescaleError::ThetaLengthMismatch { expected: 3, actual: 1 })
        );
        assert!(matches!(
            validate_theta(kind, array![0.0, 0.5, 0.3].view(), &grid),
            Err(TimescaleError::InvalidTheta { name: "tau", .. })
        ));
        assert!(matches!(
            validate_theta(kind, array![1.0, 50.0, 0.3].view(), &grid),
            Err(TimescaleError::InvalidTheta { name: "frequency", .. })
        ));
        assert!(matches!(
            validate_theta(kind, array![1.0, 0.5, 1.5].view(), &grid),
            Err(TimescaleError::InvalidTheta { name: "coefficient", .. })
        ));
    }

    #[test]
    fn scalar_validators() {
        assert!(validate_epsilon(0.0).is_ok());
        assert!(validate_epsilon(-1e-3).is_err());
        assert!(validate_epsilon(f64::NAN).is_err());
        assert!(validate_n_lags(1, 10).is_ok());
        assert!(validate_n_lags(0, 10).is_err());
        assert!(validate_n_lags(11, 10).is_err());
        assert!(validate_num_trials(0).is_err());
        assert_eq!(
            validate_data_width(999, &grid()),
            Err(TimescaleError::DataShapeMismatch { expected: 1000, actual: 999 })
        );
    }
}
