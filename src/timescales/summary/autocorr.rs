//! Trial-averaged autocorrelation via FFT.
//!
//! Purpose
//! -------
//! Reduce a trial matrix to the autocorrelation function averaged over
//! trials, truncated to `n_lags` lags. This is the summary statistic of the
//! timescale-only models.
//!
//! Key behaviors
//! -------------
//! - Each trial is demeaned by its own mean, zero-padded to the next power of
//!   two ≥ `2·n_time` (so circular wrap-around cannot alias lags), and its
//!   autocovariance obtained as `IFFT(|FFT(x)|²)`.
//! - Each trial's autocovariance is normalised by its lag-0 value before
//!   averaging, so every trial contributes equally regardless of amplitude.
//!
//! Invariants & assumptions
//! ------------------------
//! - The estimator uses the biased `1 / n` autocovariance, hence
//!   `|ρ̂_k| ≤ 1` for every lag and `ρ̂_0 = 1` exactly.
//! - A constant trial has no autocorrelation and is rejected.
//!
//! Performance
//! -----------
//! - O(num_trials · m log m) with `m = next_pow2(2 n_time)`; one scratch
//!   buffer is reused across trials. FFT plans are local to the call, so
//!   concurrent calls share no state.
use crate::timescales::{
    core::validation::validate_n_lags,
    errors::{TimescaleError, TimescaleResult},
};
use ndarray::{Array1, ArrayView2};
use rustfft::{FftPlanner, num_complex::Complex};

/// Trial-averaged autocorrelation for lags `0..n_lags`.
///
/// Parameters
/// ----------
/// - `trials`: `ArrayView2<f64>`
///   Trial matrix `(num_trials × n_time)` with at least one row.
/// - `n_lags`: `usize`
///   Number of lags to return; `1 ≤ n_lags ≤ n_time`.
///
/// Returns
/// -------
/// `TimescaleResult<Array1<f64>>`
///   Vector of length `n_lags` with `ac[0] == 1.0` and entries in `[-1, 1]`.
///
/// Errors
/// ------
/// - `TimescaleError::NoTrials` for an empty matrix.
/// - `TimescaleError::InvalidNLags` when `n_lags` is 0 or exceeds `n_time`.
/// - `TimescaleError::ZeroVarianceTrial` when a trial is constant.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_timescales::timescales::summary::autocorr::autocorrelation;
/// let trials = array![[1.0, -1.0, 1.0, -1.0, 1.0, -1.0]];
/// let ac = autocorrelation(trials.view(), 3).unwrap();
/// assert_eq!(ac[0], 1.0);
/// assert!(ac[1] < -0.5);
/// assert!(ac[2] > 0.5);
/// ```
pub fn autocorrelation(trials: ArrayView2<'_, f64>, n_lags: usize) -> TimescaleResult<Array1<f64>> {
    let (n_trials, n_time) = trials.dim();
    if n_trials == 0 {
        return Err(TimescaleError::NoTrials);
    }
    validate_n_lags(n_lags, n_time)?;

    let n_fft = (2 * n_time).next_power_of_two();
    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(n_fft);
    let inverse = planner.plan_fft_inverse(n_fft);

    let zero = Complex::new(0.0, 0.0);
    let mut buffer = vec![zero; n_fft];
    let mut acc = Array1::<f64>::zeros(n_lags);

    for (trial, row) in trials.outer_iter().enumerate() {
        let first = row[0];
        if row.iter().all(|&x| x == first) {
            return Err(TimescaleError::ZeroVarianceTrial { trial });
        }
        let mean = row.sum() / n_time as f64;

        for (slot, &x) in buffer.iter_mut().zip(row.iter()) {
            *slot = Complex::new(x - mean, 0.0);
        }
        buffer[n_time..].fill(zero);

        forward.process(&mut buffer);
        for v in buffer.iter_mut() {
            *v = Complex::new(v.norm_sqr(), 0.0);
        }
        inverse.process(&mut buffer);

        let lag0 = buffer[0].re;
        for (a, v) in acc.iter_mut().zip(&buffer[..n_lags]) {
            *a += v.re / lag0;
        }
    }

    acc /= n_trials as f64;
    // Roundoff only: the biased estimator is bounded by 1 in magnitude.
    acc.mapv_inplace(|r| r.clamp(-1.0, 1.0));
    Ok(acc)
}

/// Lag (in time units) at which `ac` first falls to `1/e`, linearly
/// interpolated between neighbouring lags.
///
/// Returns `None` when `ac` never reaches `1/e` within its horizon.
pub fn e_folding_time(ac: &Array1<f64>, dt: f64) -> Option<f64> {
    let threshold = (-1.0_f64).exp();
    ac.iter().zip(ac.iter().skip(1)).enumerate().find_map(|(k, (&prev, &next))| {
        (next <= threshold).then(|| {
            let frac = if prev > next { (prev - threshold) / (prev - next) } else { 0.0 };
            (k as f64 + frac) * dt
        })
    })
}
