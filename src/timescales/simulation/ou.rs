//! Exact discretisation of the Ornstein–Uhlenbeck process.
//!
//! The OU process `dx = −x/τ dt + σ dW` has the exact transition
//!
//! ```text
//! x_{k+1} = a · x_k + sqrt(1 − a²) · z_k,   a = exp(−dt/τ),  z_k ~ N(0, 1)
//! ```
//!
//! for the standardised (zero-mean, unit stationary variance) process. Unlike
//! an Euler step this is unbiased for any `dt/τ`, and starting from
//! `x_0 ~ N(0, 1)` every sample is exactly stationary.
//!
//! `1 − a²` is evaluated as `−expm1(−2 dt/τ)`, which stays accurate when
//! `dt ≪ τ`.
use ndarray::Array1;
use rand::Rng;
use rand_distr::StandardNormal;

/// One standardised stationary OU trajectory of `n_time` samples.
///
/// Parameters
/// ----------
/// - `tau`: `f64`
///   Timescale; finite and > 0 (validated by callers).
/// - `dt`: `f64`
///   Sampling interval; finite and > 0 (validated by callers).
/// - `n_time`: `usize`
///   Number of samples.
/// - `rng`: `&mut R`
///   Source of Gaussian innovations.
///
/// Returns
/// -------
/// `Array1<f64>`
///   Trajectory with stationary mean 0 and variance 1.
pub fn standard_ou<R: Rng + ?Sized>(tau: f64, dt: f64, n_time: usize, rng: &mut R) -> Array1<f64> {
    let a = (-dt / tau).exp();
    let noise_sd = (-(-2.0 * dt / tau).exp_m1()).sqrt();

    let mut x = Array1::<f64>::zeros(n_time);
    let mut prev: f64 = rng.sample(StandardNormal);
    for (k, slot) in x.iter_mut().enumerate() {
        if k > 0 {
            let z: f64 = rng.sample(StandardNormal);
            prev = a * prev + noise_sd * z;
        }
        *slot = prev;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    // Purpose
    // -------
    // The exact update keeps unit stationary variance and reproduces the
    // lag-1 correlation exp(−dt/τ), even when dt is coarse relative to τ.
    //
    // Given
    // -----
    // - τ = 0.5, dt = 0.25 (dt/τ = 0.5, where Euler is visibly biased).
    // - A single long trajectory of 200 000 samples, fixed seed.
    //
    // Expect
    // ------
    // - Sample variance within 0.05 of 1.
    // - Lag-1 correlation within 0.02 of exp(−0.5).
    fn exact_update_matches_stationary_moments() {
        // Arrange
        let mut rng = StdRng::seed_from_u64(7);
        let (tau, dt, n) = (0.5, 0.25, 200_000);

        // Act
        let x = standard_ou(tau, dt, n, &mut rng);

        // Assert
        let mean = x.sum() / n as f64;
        let var = x.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        let lag1 = x
            .iter()
            .zip(x.iter().skip(1))
            .map(|(a, b)| (a - mean) * (b - mean))
            .sum::<f64>()
            / ((n - 1) as f64 * var);
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "var {var}");
        assert!((lag1 - (-dt / tau).exp()).abs() < 0.02, "lag1 {lag1}");
    }

    #[test]
    fn tiny_step_stays_finite() {
        let mut rng = StdRng::seed_from_u64(1);
        let x = standard_ou(1e6, 1e-6, 1000, &mut rng);
        assert!(x.iter().all(|v| v.is_finite()));
    }
}
