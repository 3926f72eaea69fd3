//! Model and simulation options.
//!
//! Purpose
//! -------
//! Group the configuration knobs for timescale models into small, typed
//! structs: which summary statistic the model reduces trials to, which
//! distance compares them, how many trials each simulation produces, and how
//! the convenience simulation entry points seed and parallelise their work.
//!
//! Key behaviors
//! -------------
//! - [`SummaryMetric`] selects between an autocorrelation vector of `n_lags`
//!   lags and a trial-averaged power spectral density.
//! - [`SummaryChoice`] is the requested metric before the grid is known; an
//!   unset lag count resolves to `min(DEFAULT_N_LAGS, n_time)` in
//!   [`SummaryChoice::resolve`] and nowhere else.
//! - [`DistanceKind`] selects between a linear and a logarithmic mean squared
//!   difference.
//! - [`ModelOptions`] bundles both with an optional simulated trial count.
//!   `None` fields are resolved per model variant at construction time.
//! - [`SimOpts`] records RNG seeding and whether trials are simulated in
//!   parallel.
//!
//! Invariants & assumptions
//! ------------------------
//! - These types describe *intent*; numeric validation (e.g. `n_lags` against
//!   the time grid) is performed by the model constructors, which know the
//!   grid.
//!
//! Downstream usage
//! ----------------
//! - Build a [`ModelOptions`] (usually via `Default`) and pass it to a model
//!   constructor; pass a [`SimOpts`] to `simulate_summary` style helpers.
//! - [`SummaryChoice`] and [`DistanceKind`] implement `FromStr` for the
//!   Python keyword arguments.
use crate::timescales::errors::TimescaleError;
use std::str::FromStr;

/// Autocorrelation horizon used when no lag count is requested; capped at
/// the number of timepoints.
pub const DEFAULT_N_LAGS: usize = 200;

/// Summary statistic a model reduces trials to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMetric {
    /// Trial-averaged autocorrelation truncated to `n_lags` lags.
    Autocorrelation {
        /// Number of retained lags (lag 0 included).
        n_lags: usize,
    },
    /// Trial-averaged one-sided power spectral density (DC bin excluded).
    PowerSpectrum,
}

impl SummaryMetric {
    /// Number of retained lags, or `None` for spectral statistics.
    pub const fn n_lags(&self) -> Option<usize> {
        match self {
            SummaryMetric::Autocorrelation { n_lags } => Some(*n_lags),
            SummaryMetric::PowerSpectrum => None,
        }
    }

    /// Distance used when none is configured explicitly.
    pub const fn default_distance(&self) -> DistanceKind {
        match self {
            SummaryMetric::Autocorrelation { .. } => DistanceKind::Linear,
            SummaryMetric::PowerSpectrum => DistanceKind::Logarithmic,
        }
    }
}

/// Summary statistic requested by a caller, before the time grid is known.
///
/// Parsing
/// -------
/// `FromStr` is case-insensitive. `"autocorrelation"`, `"ac"` and `"acf"`
/// give `Autocorrelation { n_lags: None }`; `"psd"`, `"power_spectrum"` and
/// `"power_spectral_density"` give `PowerSpectrum`. Anything else returns
/// `TimescaleError::InvalidOption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryChoice {
    /// Autocorrelation with an explicit horizon, or the default horizon when `None`.
    Autocorrelation {
        /// Requested number of lags.
        n_lags: Option<usize>,
    },
    /// Trial-averaged one-sided power spectral density.
    PowerSpectrum,
}

impl SummaryChoice {
    /// Fix the metric against a grid of `n_time` timepoints.
    ///
    /// An unset lag count becomes `min(DEFAULT_N_LAGS, n_time)`. Explicit
    /// counts pass through untouched and are validated by the caller.
    pub fn resolve(self, n_time: usize) -> SummaryMetric {
        match self {
            SummaryChoice::Autocorrelation { n_lags } => SummaryMetric::Autocorrelation {
                n_lags: n_lags.unwrap_or(DEFAULT_N_LAGS.min(n_time)),
            },
            SummaryChoice::PowerSpectrum => SummaryMetric::PowerSpectrum,
        }
    }
}

impl From<SummaryMetric> for SummaryChoice {
    fn from(metric: SummaryMetric) -> Self {
        match metric {
            SummaryMetric::Autocorrelation { n_lags } => {
                SummaryChoice::Autocorrelation { n_lags: Some(n_lags) }
            }
            SummaryMetric::PowerSpectrum => SummaryChoice::PowerSpectrum,
        }
    }
}

impl FromStr for SummaryChoice {
    type Err = TimescaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "autocorrelation" | "ac" | "acf" => Ok(SummaryChoice::Autocorrelation { n_lags: None }),
            "psd" | "power_spectrum" | "power_spectral_density" => Ok(SummaryChoice::PowerSpectrum),
            _ => Err(TimescaleError::InvalidOption {
                option: "summary",
                name: s.to_string(),
                reason: "Valid options are 'autocorrelation' or 'psd'.",
            }),
        }
    }
}

/// Distance between two summary-statistic vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceKind {
    /// Mean squared difference.
    #[default]
    Linear,
    /// Mean squared difference of natural logarithms.
    ///
    /// Pairs with both entries non-positive are skipped. A pair with exactly
    /// one positive entry makes the distance `+∞`.
    Logarithmic,
}

impl FromStr for DistanceKind {
    type Err = TimescaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(DistanceKind::Linear),
            "logarithmic" | "log" => Ok(DistanceKind::Logarithmic),
            _ => Err(TimescaleError::InvalidOption {
                option: "distance",
                name: s.to_string(),
                reason: "Valid options are 'linear' or 'logarithmic'.",
            }),
        }
    }
}

/// ModelOptions — per-model configuration.
///
/// Fields
/// ------
/// - `num_trials`: `Option<usize>`
///   Number of trials produced by `generate_data`. `None` uses the number of
///   observed trials.
/// - `summary`: `Option<SummaryChoice>`
///   Summary statistic. `None` selects the variant default (autocorrelation
///   for timescale-only models, power spectrum for the oscillatory model).
///   An autocorrelation without a lag count uses the default horizon.
/// - `distance`: `Option<DistanceKind>`
///   Distance. `None` selects [`SummaryMetric::default_distance`].
///
/// Notes
/// -----
/// - `ModelOptions::default()` leaves every field as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModelOptions {
    /// Number of simulated trials per call.
    pub num_trials: Option<usize>,
    /// Summary statistic override.
    pub summary: Option<SummaryChoice>,
    /// Distance override.
    pub distance: Option<DistanceKind>,
}

impl ModelOptions {
    /// Construct a new [`ModelOptions`] instance.
    pub fn new(
        num_trials: Option<usize>, summary: Option<SummaryChoice>, distance: Option<DistanceKind>,
    ) -> ModelOptions {
        ModelOptions { num_trials, summary, distance }
    }

    /// Options that only override the autocorrelation horizon.
    pub fn with_n_lags(n_lags: usize) -> ModelOptions {
        ModelOptions {
            summary: Some(SummaryChoice::Autocorrelation { n_lags: Some(n_lags) }),
            ..ModelOptions::default()
        }
    }
}

/// SimOpts — seeding and scheduling for simulation helpers.
///
/// Fields
/// ------
/// - `seed`: `Option<u64>`
///   `Some(seed)` yields reproducible draws; `None` seeds from system entropy.
/// - `parallel`: `bool`
///   Simulate trials on the rayon thread pool. Results do not depend on this
///   flag for a fixed seed.
///
/// Notes
/// -----
/// - The default is `seed = None`, `parallel = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimOpts {
    /// Optional RNG seed for reproducibility.
    pub seed: Option<u64>,
    /// Whether trials are simulated in parallel.
    pub parallel: bool,
}

impl SimOpts {
    /// Construct a new [`SimOpts`] instance.
    pub fn new(seed: Option<u64>, parallel: bool) -> SimOpts {
        SimOpts { seed, parallel }
    }

    /// Reproducible options with the given seed.
    pub fn seeded(seed: u64) -> SimOpts {
        SimOpts { seed: Some(seed), ..SimOpts::default() }
    }
}

impl Default for SimOpts {
    fn default() -> Self {
        SimOpts { seed: None, parallel: true }
    }
}
