//! simulation — synthetic trial generation for the model family.
//!
//! Purpose
//! -------
//! Generate trial matrices `(num_trials × n_time)` from the generative
//! processes behind each model variant, rescaled to a target mean and
//! variance, and guarded against corrupted output.
//!
//! Key behaviors
//! -------------
//! - [`ou`] implements the exact AR(1) discretisation of a standardised OU
//!   process; [`oscillation`] layers an oscillation or a second timescale on
//!   top of it.
//! - [`one_timescale`], [`one_timescale_and_osc`] and [`two_timescales`]
//!   validate theta, simulate standardised trials, map them to
//!   `mean + sqrt(var) · x`, and run [`check_trials`] before returning.
//! - [`generate`] dispatches on [`ModelKind`] for callers that hold a kind
//!   rather than a concrete model.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every trial draws from its own `StdRng`, seeded from the caller's RNG in
//!   trial order before any simulation starts. Results for a fixed caller
//!   seed are therefore identical whether trials run sequentially or on the
//!   rayon pool.
//! - No state is shared between calls; all functions are safe to invoke
//!   concurrently from multiple workers holding the same model.
//!
//! Downstream usage
//! ----------------
//! - Models build a [`SimTarget`] from their stored grid and moments and call
//!   the variant function matching their kind.
pub mod oscillation;
pub mod ou;

use crate::timescales::{
    core::{
        grid::TimeGrid,
        guards::{SimGuards, check_trials},
        params::ModelKind,
        validation::{validate_num_trials, validate_theta},
    },
    errors::{TimescaleError, TimescaleResult},
};
use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut1, Axis, Zip};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use self::{
    oscillation::{add_oscillation, mix_timescales},
    ou::standard_ou,
};

/// SimTarget — everything a simulation needs besides theta.
///
/// Fields
/// ------
/// - `grid`: [`TimeGrid`]
///   Sampling interval, duration and number of timepoints.
/// - `num_trials`: `usize`
///   Rows of the generated matrix; ≥ 1.
/// - `mean`, `var`: `f64`
///   Stationary mean and variance of the generated process; `var > 0`.
/// - `guards`: [`SimGuards`]
///   Bound checked on every simulated value.
/// - `parallel`: `bool`
///   Run trials on the rayon pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimTarget {
    /// Sampling grid.
    pub grid: TimeGrid,
    /// Number of simulated trials.
    pub num_trials: usize,
    /// Stationary mean.
    pub mean: f64,
    /// Stationary variance.
    pub var: f64,
    /// Output guards.
    pub guards: SimGuards,
    /// Trial-level parallelism.
    pub parallel: bool,
}

impl SimTarget {
    /// Construct a validated [`SimTarget`] from raw grid parameters.
    ///
    /// Errors
    /// ------
    /// - Grid errors from [`TimeGrid::new`] (`dt`, `T` non-positive).
    /// - `TimescaleError::InvalidNumTrials` when `num_trials == 0`.
    /// - `TimescaleError::InvalidTheta` when `mean` is non-finite or `var`
    ///   is not finite and > 0.
    pub fn new(
        dt: f64, duration: f64, num_trials: usize, mean: f64, var: f64,
    ) -> TimescaleResult<Self> {
        let grid = TimeGrid::new(dt, duration)?;
        SimTarget::on_grid(grid, num_trials, mean, var)
    }

    /// Construct a validated [`SimTarget`] on an existing grid.
    pub fn on_grid(grid: TimeGrid, num_trials: usize, mean: f64, var: f64) -> TimescaleResult<Self> {
        validate_num_trials(num_trials)?;
        if !mean.is_finite() {
            return Err(TimescaleError::InvalidTheta {
                name: "mean",
                value: mean,
                reason: "stationary mean must be finite",
            });
        }
        if !var.is_finite() || var <= 0.0 {
            return Err(TimescaleError::InvalidTheta {
                name: "variance",
                value: var,
                reason: "stationary variance must be finite and > 0",
            });
        }
        Ok(SimTarget { grid, num_trials, mean, var, guards: SimGuards::default(), parallel: true })
    }

    /// Replace the output guards.
    pub fn with_guards(self, guards: SimGuards) -> Self {
        SimTarget { guards, ..self }
    }

    /// Toggle trial-level parallelism.
    pub fn with_parallel(self, parallel: bool) -> Self {
        SimTarget { parallel, ..self }
    }
}

/// Simulate trials for a model of the given `kind`.
///
/// Errors
/// ------
/// - `TimescaleError::ThetaLengthMismatch` / `TimescaleError::InvalidTheta`
///   for a theta outside the layout or domains of `kind`.
/// - `TimescaleError::NonFiniteSimulation` / `TimescaleError::GuardExceeded`
///   when the output guard trips.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rand::{SeedableRng, rngs::StdRng};
/// # use rust_timescales::timescales::core::params::ModelKind;
/// # use rust_timescales::timescales::simulation::{SimTarget, generate};
/// let target = SimTarget::new(0.01, 10.0, 4, 0.0, 1.0).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// let trials = generate(ModelKind::OneTimescale, array![0.2].view(), &target, &mut rng).unwrap();
/// assert_eq!(trials.dim(), (4, 1000));
/// ```
pub fn generate<R: Rng + ?Sized>(
    kind: ModelKind, theta: ArrayView1<'_, f64>, target: &SimTarget, rng: &mut R,
) -> TimescaleResult<Array2<f64>> {
    validate_theta(kind, theta, &target.grid)?;
    match kind {
        ModelKind::OneTimescale => one_timescale(theta[0], target, rng),
        ModelKind::OneTimescaleAndOsc => {
            one_timescale_and_osc(theta[0], theta[1], theta[2], target, rng)
        }
        ModelKind::TwoTimescales => two_timescales(theta[0], theta[1], theta[2], target, rng),
    }
}

/// Single OU process with timescale `tau`.
pub fn one_timescale<R: Rng + ?Sized>(
    tau: f64, target: &SimTarget, rng: &mut R,
) -> TimescaleResult<Array2<f64>> {
    validate_theta(ModelKind::OneTimescale, ndarray::aview1(&[tau]), &target.grid)?;
    let (dt, n_time) = (target.grid.dt, target.grid.n_time);
    simulate_trials(target, rng, |trial_rng| standard_ou(tau, dt, n_time, trial_rng))
}

/// OU process with timescale `tau` plus a random-phase oscillation at
/// `frequency` carrying a `coefficient` share of the variance.
pub fn one_timescale_and_osc<R: Rng + ?Sized>(
    tau: f64, frequency: f64, coefficient: f64, target: &SimTarget, rng: &mut R,
) -> TimescaleResult<Array2<f64>> {
    let theta = [tau, frequency, coefficient];
    validate_theta(ModelKind::OneTimescaleAndOsc, ndarray::aview1(&theta), &target.grid)?;
    let (dt, n_time) = (target.grid.dt, target.grid.n_time);
    simulate_trials(target, rng, |trial_rng| {
        let base = standard_ou(tau, dt, n_time, trial_rng);
        add_oscillation(base, frequency, coefficient, dt, trial_rng)
    })
}

/// Mixture of two independent OU processes; `coefficient` is the variance
/// share of the `tau1` component.
pub fn two_timescales<R: Rng + ?Sized>(
    tau1: f64, tau2: f64, coefficient: f64, target: &SimTarget, rng: &mut R,
) -> TimescaleResult<Array2<f64>> {
    let theta = [tau1, tau2, coefficient];
    validate_theta(ModelKind::TwoTimescales, ndarray::aview1(&theta), &target.grid)?;
    let (dt, n_time) = (target.grid.dt, target.grid.n_time);
    simulate_trials(target, rng, |trial_rng| {
        let first = standard_ou(tau1, dt, n_time, trial_rng);
        let second = standard_ou(tau2, dt, n_time, trial_rng);
        mix_timescales(first, &second, coefficient)
    })
}

/// Fill a trial matrix row by row from `trial`, rescale, and guard it.
///
/// Each trial is rescaled straight into its row of the output, so only one
/// trial buffer per worker is alive next to the matrix.
fn simulate_trials<R, F>(target: &SimTarget, rng: &mut R, trial: F) -> TimescaleResult<Array2<f64>>
where
    R: Rng + ?Sized,
    F: Fn(&mut StdRng) -> Array1<f64> + Sync,
{
    let seeds: Vec<u64> = (0..target.num_trials).map(|_| rng.r#gen()).collect();
    let sd = target.var.sqrt();
    let fill = |(mut row, &seed): (ArrayViewMut1<f64>, &u64)| {
        let x = trial(&mut StdRng::seed_from_u64(seed));
        Zip::from(&mut row).and(&x).for_each(|dst, &v| *dst = target.mean + sd * v);
    };

    let mut out = Array2::<f64>::zeros((target.num_trials, target.grid.n_time));
    if target.parallel {
        out.axis_iter_mut(Axis(0)).into_par_iter().zip(seeds.par_iter()).for_each(fill);
    } else {
        out.axis_iter_mut(Axis(0)).zip(seeds.iter()).for_each(fill);
    }

    check_trials(out.view(), &target.guards)?;
    Ok(out)
}
