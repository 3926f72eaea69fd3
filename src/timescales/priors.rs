//! priors — prior distributions over model parameters.
//!
//! Purpose
//! -------
//! Represent the ordered sequence of one distribution per free parameter that
//! an ABC sampler draws proposals from, and provide the "informed" preset that
//! derives such a sequence from the observed data itself.
//!
//! Key behaviors
//! -------------
//! - [`ParamPrior`] wraps a statrs `Normal` or `Uniform` and exposes sampling
//!   (`rand::distributions::Distribution`) and log-density
//!   (`statrs::distribution::Continuous`).
//! - [`Prior::new`] accepts an explicit component list; [`Prior::informed`]
//!   builds the preset for a [`ModelKind`]:
//!
//! | parameter      | family  | location                      | spread                          |
//! |----------------|---------|-------------------------------|---------------------------------|
//! | `tau`          | Normal  | e-folding time of observed AC | `0.5 · location`                |
//! | `tau1`, `tau2` | Normal  | `tau_hat / 2`, `2 · tau_hat`  | `0.5 · location`                |
//! | `frequency`    | Normal  | observed PSD peak             | `max(0.25 · location, 1 / T)`   |
//! | `coefficient`  | Uniform | `[0, 1]`                      |                                 |
//!
//! Invariants & assumptions
//! ------------------------
//! - Normal components have unbounded support; a draw outside a parameter's
//!   domain (e.g. `tau ≤ 0`) is rejected by the model's theta validation and
//!   the sampler is expected to redraw.
//! - The informed tau estimate is bounded by the autocorrelation horizon
//!   (`n_time / 2` lags); a series that never decorrelates within it saturates
//!   there and a warning is logged.
use crate::timescales::{
    core::{data::TrialData, grid::TimeGrid, params::ModelKind},
    errors::{TimescaleError, TimescaleResult},
    summary::{autocorrelation, e_folding_time, peak_frequency, power_spectral_density},
};
use log::{debug, warn};
use ndarray::{Array1, ArrayView1};
use rand::Rng;
use rand::distributions::Distribution;
use statrs::distribution::{Continuous, Normal, Uniform};

/// Relative standard deviation of informed Normal timescale priors.
const INFORMED_TAU_REL_SD: f64 = 0.5;

/// Relative standard deviation of the informed Normal frequency prior.
const INFORMED_FREQ_REL_SD: f64 = 0.25;

/// Family tag of a prior component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorFamily {
    /// Gaussian.
    Normal,
    /// Continuous uniform.
    Uniform,
}

/// ParamPrior — distribution over a single parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamPrior {
    /// Gaussian with location `mean` and scale `std_dev`.
    Normal {
        /// Location.
        mean: f64,
        /// Scale; finite and > 0.
        std_dev: f64,
        /// Backing statrs distribution.
        dist: Normal,
    },
    /// Uniform on `[min, max]`.
    Uniform {
        /// Lower bound.
        min: f64,
        /// Upper bound; `> min`.
        max: f64,
        /// Backing statrs distribution.
        dist: Uniform,
    },
}

impl ParamPrior {
    /// Gaussian prior.
    ///
    /// Errors
    /// ------
    /// - `TimescaleError::InvalidPriorParam` when `mean` is non-finite or
    ///   `std_dev` is not finite and > 0.
    pub fn normal(mean: f64, std_dev: f64) -> TimescaleResult<Self> {
        if !mean.is_finite() {
            return Err(TimescaleError::InvalidPriorParam {
                family: "Normal",
                reason: "mean must be finite",
            });
        }
        let dist = Normal::new(mean, std_dev)?;
        Ok(ParamPrior::Normal { mean, std_dev, dist })
    }

    /// Uniform prior on `[min, max]`.
    ///
    /// Errors
    /// ------
    /// - `TimescaleError::InvalidPriorParam` when a bound is non-finite or
    ///   `max <= min`.
    pub fn uniform(min: f64, max: f64) -> TimescaleResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(TimescaleError::InvalidPriorParam {
                family: "Uniform",
                reason: "bounds must be finite",
            });
        }
        let dist = Uniform::new(min, max)?;
        Ok(ParamPrior::Uniform { min, max, dist })
    }

    /// Family of this component.
    pub fn family(&self) -> PriorFamily {
        match self {
            ParamPrior::Normal { .. } => PriorFamily::Normal,
            ParamPrior::Uniform { .. } => PriorFamily::Uniform,
        }
    }

    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            ParamPrior::Normal { dist, .. } => dist.sample(rng),
            ParamPrior::Uniform { dist, .. } => dist.sample(rng),
        }
    }

    /// Log-density at `x` (`-inf` outside the support).
    pub fn ln_pdf(&self, x: f64) -> f64 {
        match self {
            ParamPrior::Normal { dist, .. } => dist.ln_pdf(x),
            ParamPrior::Uniform { dist, .. } => dist.ln_pdf(x),
        }
    }
}

/// Prior — ordered prior components, one per theta entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Prior {
    components: Vec<ParamPrior>,
}

impl Prior {
    /// Explicit prior from caller-supplied components.
    ///
    /// Length is checked against a model at model construction, not here.
    pub fn new(components: Vec<ParamPrior>) -> Prior {
        Prior { components }
    }

    /// Informed prior for `kind`, derived from the observed `data` on `grid`.
    ///
    /// Errors
    /// ------
    /// - Errors from the autocorrelation and PSD reducers on degenerate data.
    /// - `TimescaleError::NoSpectralPeak` when the oscillatory preset finds no
    ///   finite PSD bin.
    /// - `TimescaleError::InvalidPriorParam` if a derived location is not
    ///   strictly positive.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::Array2;
    /// # use rust_timescales::timescales::core::{data::TrialData, grid::TimeGrid, params::ModelKind};
    /// # use rust_timescales::timescales::priors::{Prior, PriorFamily};
    /// let grid = TimeGrid::new(0.1, 20.0).unwrap();
    /// let data = TrialData::new(Array2::from_shape_fn((2, 200), |(i, k)| {
    ///     ((k + 7 * i) as f64 * 0.3).sin()
    /// }))
    /// .unwrap();
    /// let prior = Prior::informed(ModelKind::OneTimescaleAndOsc, &data, &grid).unwrap();
    /// let families: Vec<_> = prior.components().iter().map(|c| c.family()).collect();
    /// assert_eq!(families, [PriorFamily::Normal, PriorFamily::Normal, PriorFamily::Uniform]);
    /// ```
    pub fn informed(kind: ModelKind, data: &TrialData, grid: &TimeGrid) -> TimescaleResult<Prior> {
        let tau_hat = estimate_timescale(data, grid)?;
        let normal_around = |loc: f64| ParamPrior::normal(loc, INFORMED_TAU_REL_SD * loc);

        let components = match kind {
            ModelKind::OneTimescale => vec![normal_around(tau_hat)?],
            ModelKind::OneTimescaleAndOsc => {
                let f_hat = estimate_peak_frequency(data, grid)?;
                let f_sd = (INFORMED_FREQ_REL_SD * f_hat).max(grid.frequency_resolution());
                vec![
                    normal_around(tau_hat)?,
                    ParamPrior::normal(f_hat, f_sd)?,
                    ParamPrior::uniform(0.0, 1.0)?,
                ]
            }
            ModelKind::TwoTimescales => vec![
                normal_around(0.5 * tau_hat)?,
                normal_around(2.0 * tau_hat)?,
                ParamPrior::uniform(0.0, 1.0)?,
            ],
        };
        debug!("informed prior for {kind:?}: tau_hat = {tau_hat}, components = {components:?}");
        Ok(Prior { components })
    }

    /// Components in theta order.
    pub fn components(&self) -> &[ParamPrior] {
        &self.components
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the prior has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Draw a theta vector, one value per component.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Array1<f64> {
        self.components.iter().map(|c| c.sample(rng)).collect()
    }

    /// Joint log-density of independent components at `theta`.
    ///
    /// Errors
    /// ------
    /// - `TimescaleError::ThetaLengthMismatch` when lengths differ.
    pub fn ln_pdf(&self, theta: ArrayView1<'_, f64>) -> TimescaleResult<f64> {
        if theta.len() != self.components.len() {
            return Err(TimescaleError::ThetaLengthMismatch {
                expected: self.components.len(),
                actual: theta.len(),
            });
        }
        Ok(self.components.iter().zip(theta.iter()).map(|(c, &x)| c.ln_pdf(x)).sum())
    }
}

/// E-folding time of the observed autocorrelation, saturating at its horizon.
fn estimate_timescale(data: &TrialData, grid: &TimeGrid) -> TimescaleResult<f64> {
    let horizon = (data.n_time() / 2).max(2);
    let ac = autocorrelation(data.view(), horizon)?;
    match e_folding_time(&ac, grid.dt) {
        Some(tau) if tau > 0.0 => Ok(tau),
        Some(_) => Ok(grid.dt),
        None => {
            let tau = horizon as f64 * grid.dt;
            warn!("observed autocorrelation stays above 1/e for {horizon} lags; using tau = {tau}");
            Ok(tau)
        }
    }
}

/// Peak frequency of the observed PSD.
fn estimate_peak_frequency(data: &TrialData, grid: &TimeGrid) -> TimescaleResult<f64> {
    let (psd, freqs) = power_spectral_density(data.view(), grid.sampling_rate())?;
    peak_frequency(psd.view(), freqs.view()).ok_or(TimescaleError::NoSpectralPeak)
}
