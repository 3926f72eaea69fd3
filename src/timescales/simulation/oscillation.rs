//! Additive components layered on standardised OU trajectories.
//!
//! Both helpers mix unit-variance components with weights `sqrt(c)` and
//! `sqrt(1 − c)`, so the result keeps unit stationary variance for every
//! `c ∈ [0, 1]`:
//!
//! - [`add_oscillation`]: `sqrt(1 − c) · x_t + sqrt(c) · √2 · sin(2π f t + φ)`
//!   with a random phase `φ ~ U[0, 2π)` drawn once per trial. The factor
//!   `√2` gives the sinusoid unit variance.
//! - [`mix_timescales`]: `sqrt(c) · x_t + sqrt(1 − c) · y_t` for two
//!   independent standardised OU trajectories.
use ndarray::{Array1, Zip};
use rand::Rng;
use std::f64::consts::{SQRT_2, TAU};

/// Superimpose a random-phase sinusoid of `frequency` onto `base`.
///
/// `coefficient` is the share of variance carried by the oscillation and is
/// assumed to lie in `[0, 1]` (validated by callers).
///
/// The sinusoid has a constant envelope. Theta carries no damping rate, and
/// a decaying envelope would make the trial non-stationary, so the rescale to
/// the observed variance would no longer hold along the trial. The damping
/// seen in the summaries comes from the OU share: the autocorrelation is
/// `(1 − c) e^{−t/τ} + c cos(2π f t)` and the spectrum peaks at `f`.
pub fn add_oscillation<R: Rng + ?Sized>(
    mut base: Array1<f64>, frequency: f64, coefficient: f64, dt: f64, rng: &mut R,
) -> Array1<f64> {
    let phase = rng.gen_range(0.0..TAU);
    let w_ou = (1.0 - coefficient).sqrt();
    let w_osc = coefficient.sqrt() * SQRT_2;
    let omega = TAU * frequency * dt;

    for (k, x) in base.iter_mut().enumerate() {
        *x = w_ou * *x + w_osc * (omega * k as f64 + phase).sin();
    }
    base
}

/// Mix two standardised trajectories with weights `sqrt(c)` and `sqrt(1 − c)`.
///
/// Both inputs must have the same length.
pub fn mix_timescales(mut first: Array1<f64>, second: &Array1<f64>, coefficient: f64) -> Array1<f64> {
    let w_first = coefficient.sqrt();
    let w_second = (1.0 - coefficient).sqrt();
    Zip::from(&mut first).and(second).for_each(|a, &b| *a = w_first * *a + w_second * b);
    first
}
