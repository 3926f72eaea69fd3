//! Errors for OU timescale models (data validation, grid/prior checks,
//! parameter-vector checks, summary-statistic and numerical guard failures).
//!
//! This module defines a single model error type, [`TimescaleError`], used
//! across the Python-facing API and the internal Rust core. It implements
//! `Display`/`Error` and converts to `PyErr` for PyO3.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy). Trial matrices are indexed
//!   `(trial, timepoint)`.
//! - Grid quantities (`dt`, `T`) must be **strictly positive and finite**.
//! - Every failure is reported at the earliest point it can be detected:
//!   construction errors at model construction, theta errors at simulation
//!   entry, and numerical guard trips immediately after simulation.
//! - statrs distribution errors are normalized to
//!   [`TimescaleError::InvalidPriorParam`] with the offending family.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use statrs::distribution::{NormalError, UniformError};

/// Crate-wide result alias for operations that may produce [`TimescaleError`].
pub type TimescaleResult<T> = Result<T, TimescaleError>;

/// Unified error type for OU timescale modeling.
///
/// Covers observed-data validation, time-grid and option checks, prior
/// construction, theta validation, summary-statistic failures, and numerical
/// guards on simulated output. Implements `Display`/`Error` and converts to a
/// Python `ValueError` at PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum TimescaleError {
    // ---- Input/data validation ----
    /// Trial matrix has no rows.
    NoTrials,

    /// Trial matrix has fewer than two timepoints per trial.
    TooFewTimepoints { n_time: usize },

    /// An observed data point is NaN/±inf.
    NonFiniteData { trial: usize, index: usize, value: f64 },

    /// Observed data has zero variance across all entries.
    ZeroVarianceData,

    /// A nested trial sequence has rows of different lengths.
    RaggedTrials { trial: usize, expected: usize, actual: usize },

    /// Observed data width disagrees with `round(T / dt)`.
    DataShapeMismatch { expected: usize, actual: usize },

    // ---- Time grid / options ----
    /// `dt` must be finite and > 0.
    InvalidDt { value: f64 },

    /// `T` must be finite and > 0.
    InvalidDuration { value: f64 },

    /// `round(T / dt)` yields fewer than two timepoints.
    GridTooShort { n_time: usize },

    /// Tolerance epsilon must be finite and ≥ 0.
    InvalidEpsilon { value: f64 },

    /// Requested number of simulated trials must be ≥ 1.
    InvalidNumTrials { value: usize },

    /// `n_lags` must satisfy `1 ≤ n_lags ≤ n_time`.
    InvalidNLags { n_lags: usize, n_time: usize },

    /// Guard bound must be finite and > 0.
    InvalidGuard { value: f64 },

    /// A named option (summary, distance) is not recognised.
    InvalidOption { option: &'static str, name: String, reason: &'static str },

    // ---- Prior ----
    /// Prior length differs from the number of model parameters.
    PriorLengthMismatch { expected: usize, actual: usize },

    /// A prior component could not be built from the supplied parameters.
    InvalidPriorParam { family: &'static str, reason: &'static str },

    /// Informed prior could not locate a spectral peak in the observed data.
    NoSpectralPeak,

    // ---- Parameter vector ----
    /// Theta length differs from the number of model parameters.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// A theta entry violates its parameter domain.
    InvalidTheta { name: &'static str, value: f64, reason: &'static str },

    // ---- Summary statistics / distance ----
    /// A simulated or observed trial is constant, so autocorrelation is undefined.
    ZeroVarianceTrial { trial: usize },

    /// Two summary statistics have different kinds (autocorrelation vs PSD).
    SummaryKindMismatch,

    /// Two summary statistics have different lengths.
    SummaryLengthMismatch { left: usize, right: usize },

    /// Logarithmic distance found no pair of strictly positive entries.
    NoComparableBins,

    // ---- Numerical guards ----
    /// Simulation produced a non-finite value.
    NonFiniteSimulation { trial: usize, index: usize, value: f64 },

    /// Simulation produced a value beyond the configured guard bound.
    GuardExceeded { trial: usize, index: usize, value: f64, bound: f64 },
}

impl std::error::Error for TimescaleError {}

impl std::fmt::Display for TimescaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            TimescaleError::NoTrials => {
                write!(f, "Trial matrix must contain at least one trial.")
            }
            TimescaleError::TooFewTimepoints { n_time } => {
                write!(f, "Each trial needs at least 2 timepoints; got {n_time}.")
            }
            TimescaleError::NonFiniteData { trial, index, value } => {
                write!(f, "Data point at trial {trial}, index {index} is non-finite: {value}")
            }
            TimescaleError::ZeroVarianceData => {
                write!(f, "Observed data has zero variance.")
            }
            TimescaleError::RaggedTrials { trial, expected, actual } => {
                write!(f, "Trial {trial} has {actual} timepoints; the first trial has {expected}.")
            }
            TimescaleError::DataShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Observed data has {actual} timepoints per trial; round(T / dt) = {expected}."
                )
            }
            // ---- Time grid / options ----
            TimescaleError::InvalidDt { value } => {
                write!(f, "dt must be finite and > 0; got: {value}")
            }
            TimescaleError::InvalidDuration { value } => {
                write!(f, "T must be finite and > 0; got: {value}")
            }
            TimescaleError::GridTooShort { n_time } => {
                write!(f, "round(T / dt) must be at least 2; got {n_time}.")
            }
            TimescaleError::InvalidEpsilon { value } => {
                write!(f, "epsilon must be finite and >= 0; got: {value}")
            }
            TimescaleError::InvalidNumTrials { value } => {
                write!(f, "Number of trials must be >= 1; got {value}.")
            }
            TimescaleError::InvalidNLags { n_lags, n_time } => {
                write!(f, "n_lags must satisfy 1 <= n_lags <= {n_time}; got {n_lags}.")
            }
            TimescaleError::InvalidGuard { value } => {
                write!(f, "Guard bound must be finite and > 0; got: {value}")
            }
            TimescaleError::InvalidOption { option, name, reason } => {
                write!(f, "Invalid {option} {name:?}. {reason}")
            }
            // ---- Prior ----
            TimescaleError::PriorLengthMismatch { expected, actual } => {
                write!(f, "Prior has {actual} components; model expects {expected}.")
            }
            TimescaleError::InvalidPriorParam { family, reason } => {
                write!(f, "Invalid {family} prior parameters: {reason}")
            }
            TimescaleError::NoSpectralPeak => {
                write!(f, "Observed power spectrum has no usable peak for an informed prior.")
            }
            // ---- Parameter vector ----
            TimescaleError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta has length {actual}; model expects {expected}.")
            }
            TimescaleError::InvalidTheta { name, value, reason } => {
                write!(f, "Invalid {name} = {value}: {reason}")
            }
            // ---- Summary statistics / distance ----
            TimescaleError::ZeroVarianceTrial { trial } => {
                write!(f, "Trial {trial} is constant; autocorrelation is undefined.")
            }
            TimescaleError::SummaryKindMismatch => {
                write!(f, "Cannot compare autocorrelation with power spectrum statistics.")
            }
            TimescaleError::SummaryLengthMismatch { left, right } => {
                write!(f, "Summary statistics have different lengths: {left} vs {right}.")
            }
            TimescaleError::NoComparableBins => {
                write!(f, "No strictly positive bins to compare on a logarithmic scale.")
            }
            // ---- Numerical guards ----
            TimescaleError::NonFiniteSimulation { trial, index, value } => {
                write!(f, "Simulation produced non-finite value {value} at trial {trial}, index {index}.")
            }
            TimescaleError::GuardExceeded { trial, index, value, bound } => {
                write!(
                    f,
                    "Simulated value {value} at trial {trial}, index {index} exceeds guard bound {bound}."
                )
            }
        }
    }
}

impl From<NormalError> for TimescaleError {
    fn from(err: NormalError) -> Self {
        let reason = match err {
            NormalError::MeanInvalid => "mean must be finite",
            NormalError::StandardDeviationInvalid => "standard deviation must be finite and > 0",
            #[allow(unreachable_patterns)]
            _ => "invalid parameters",
        };
        TimescaleError::InvalidPriorParam { family: "Normal", reason }
    }
}

impl From<UniformError> for TimescaleError {
    fn from(err: UniformError) -> Self {
        let reason = match err {
            UniformError::MinInvalid => "lower bound must be finite",
            UniformError::MaxInvalid => "upper bound must be finite",
            UniformError::MaxNotGreaterThanMin => "upper bound must exceed lower bound",
            #[allow(unreachable_patterns)]
            _ => "invalid parameters",
        };
        TimescaleError::InvalidPriorParam { family: "Uniform", reason }
    }
}

#[cfg(feature = "python-bindings")]
impl From<TimescaleError> for PyErr {
    fn from(err: TimescaleError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
