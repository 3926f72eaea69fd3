//! Trial-averaged one-sided power spectral density.
//!
//! Purpose
//! -------
//! Reduce a trial matrix to its periodogram averaged over trials, together
//! with the matching frequency bins. This is the summary statistic of the
//! oscillatory model.
//!
//! Conventions
//! -----------
//! - Each trial is demeaned, so the DC bin carries no information and is
//!   dropped. Bins are `f_k = k · fs / n` for `k = 1, …, ⌊n/2⌋`.
//! - Density scaling: `P_k = 2 |X_k|² / (fs · n)`, except the Nyquist bin
//!   (even `n`) which is not doubled. With this scaling `Σ P_k · fs / n`
//!   equals the trial variance.
//!
//! Invariants & assumptions
//! ------------------------
//! - `psd.len() == freqs.len() == ⌊n_time / 2⌋ ≥ 1`.
//! - All entries are finite and ≥ 0 for finite input.
use crate::timescales::errors::{TimescaleError, TimescaleResult};
use ndarray::{Array1, ArrayView1, ArrayView2};
use rustfft::{FftPlanner, num_complex::Complex};

/// Trial-averaged one-sided power spectral density and its frequency bins.
///
/// Parameters
/// ----------
/// - `trials`: `ArrayView2<f64>`
///   Trial matrix `(num_trials × n_time)` with `num_trials ≥ 1`, `n_time ≥ 2`.
/// - `sampling_rate`: `f64`
///   Samples per unit time (`1 / dt`); finite and > 0.
///
/// Returns
/// -------
/// `TimescaleResult<(Array1<f64>, Array1<f64>)>`
///   `(psd, freqs)` of equal length `⌊n_time / 2⌋`.
///
/// Errors
/// ------
/// - `TimescaleError::NoTrials` / `TimescaleError::TooFewTimepoints` for a
///   degenerate matrix.
/// - `TimescaleError::InvalidDt` when `sampling_rate` is not finite and > 0
///   (reported as the equivalent `dt`).
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::Array2;
/// # use rust_timescales::timescales::summary::psd::{power_spectral_density, peak_frequency};
/// let fs = 10.0;
/// let trials = Array2::from_shape_fn((1, 100), |(_, k)| {
///     (2.0 * std::f64::consts::PI * 2.0 * k as f64 / fs).sin()
/// });
/// let (psd, freqs) = power_spectral_density(trials.view(), fs).unwrap();
/// assert_eq!(psd.len(), freqs.len());
/// assert!((peak_frequency(psd.view(), freqs.view()).unwrap() - 2.0).abs() < 1e-9);
/// ```
pub fn power_spectral_density(
    trials: ArrayView2<'_, f64>, sampling_rate: f64,
) -> TimescaleResult<(Array1<f64>, Array1<f64>)> {
    let (n_trials, n_time) = trials.dim();
    if n_trials == 0 {
        return Err(TimescaleError::NoTrials);
    }
    if n_time < 2 {
        return Err(TimescaleError::TooFewTimepoints { n_time });
    }
    if !sampling_rate.is_finite() || sampling_rate <= 0.0 {
        return Err(TimescaleError::InvalidDt { value: 1.0 / sampling_rate });
    }

    let n_bins = n_time / 2;
    let nyquist_bin = (n_time % 2 == 0).then_some(n_bins);
    let scale = 1.0 / (sampling_rate * n_time as f64);

    let fft = FftPlanner::<f64>::new().plan_fft_forward(n_time);
    let mut buffer = vec![Complex::new(0.0, 0.0); n_time];
    let mut psd = Array1::<f64>::zeros(n_bins);

    for row in trials.outer_iter() {
        let mean = row.sum() / n_time as f64;
        for (slot, &x) in buffer.iter_mut().zip(row.iter()) {
            *slot = Complex::new(x - mean, 0.0);
        }
        fft.process(&mut buffer);

        for (k, p) in (1..=n_bins).zip(psd.iter_mut()) {
            let one_sided = if Some(k) == nyquist_bin { 1.0 } else { 2.0 };
            *p += one_sided * scale * buffer[k].norm_sqr();
        }
    }

    psd /= n_trials as f64;
    let freqs = Array1::from_iter((1..=n_bins).map(|k| k as f64 * sampling_rate / n_time as f64));
    Ok((psd, freqs))
}

/// Frequency of the largest finite PSD bin, or `None` if there is none.
///
/// Ties resolve to the lowest frequency.
pub fn peak_frequency(psd: ArrayView1<'_, f64>, freqs: ArrayView1<'_, f64>) -> Option<f64> {
    psd.iter()
        .zip(freqs.iter())
        .filter(|(p, _)| p.is_finite())
        .fold(None, |best: Option<(f64, f64)>, (&p, &f)| match best {
            Some((bp, _)) if bp >= p => best,
            _ => Some((p, f)),
        })
        .map(|(_, f)| f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use std::f64::consts::PI;

    #[test]
    // Purpose
    // -------
    // With density scaling the integrated PSD equals the trial variance
    // (Parseval), for both even and odd lengths.
    //
    // Given
    // -----
    // - A deterministic irregular series, fs = 4.
    //
    // Expect
    // ------
    // - Σ P_k · fs / n equals the population variance to 1e-10.
    fn integrated_psd_equals_variance() {
        for n_time in [64_usize, 65] {
            // Arrange
            let fs = 4.0;
            let trials = Array2::from_shape_fn((1, n_time), |(_, k)| {
                let t = k as f64;
                (0.7 * t).sin() + 0.3 * (2.3 * t).cos() + 0.01 * t
            });
            let row = trials.row(0);
            let mean = row.sum() / n_time as f64;
            let var = row.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n_time as f64;

            // Act
            let (psd, freqs) = power_spectral_density(trials.view(), fs).unwrap();

            // Assert
            assert_eq!(psd.len(), n_time / 2);
            assert_eq!(freqs.len(), n_time / 2);
            let integrated = psd.sum() * fs / n_time as f64;
            assert!((integrated - var).abs() < 1e-10, "n = {n_time}: {integrated} vs {var}");
        }
    }

    #[test]
    // Purpose
    // -------
    // A pure sinusoid on a bin centre peaks at its own frequency, and the
    // frequency axis starts at fs / n.
    fn sinusoid_peaks_at_its_frequency() {
        // Arrange
        let fs = 20.0;
        let n_time = 400;
        let f0 = 1.5;
        let trials = Array2::from_shape_fn((3, n_time), |(i, k)| {
            (2.0 * PI * f0 * k as f64 / fs + i as f64).sin()
        });

        // Act
        let (psd, freqs) = power_spectral_density(trials.view(), fs).unwrap();

        // Assert
        assert!((freqs[0] - fs / n_time as f64).abs() < 1e-12);
        let peak = peak_frequency(psd.view(), freqs.view()).unwrap();
        assert!((peak - f0).abs() < 1e-9, "peak at {peak}");
        assert!(psd.iter().all(|p| p.is_finite() && *p >= 0.0));
    }

    #[test]
    fn rejects_invalid_sampling_rate() {
        let trials = Array2::from_shape_fn((1, 8), |(_, k)| k as f64);
        assert!(power_spectral_density(trials.view(), 0.0).is_err());
        assert!(power_spectral_density(trials.view(), f64::NAN).is_err());
    }

    #[test]
    fn peak_frequency_skips_non_finite_bins() {
        let psd = ndarray::array![1.0, f64::NAN, 3.0, 2.0];
        let freqs = ndarray::array![0.1, 0.2, 0.3, 0.4];
        assert_eq!(peak_frequency(psd.view(), freqs.view()), Some(0.3));
        let empty = ndarray::array![f64::NAN];
        assert_eq!(peak_frequency(empty.view(), ndarray::array![0.1].view()), None);
    }
}
