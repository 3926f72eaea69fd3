//! distance — dissimilarity between summary statistics.
//!
//! Purpose
//! -------
//! Provide the scalar distance an ABC sampler compares against epsilon.
//!
//! Key behaviors
//! -------------
//! - [`DistanceKind::Linear`]: mean of squared differences,
//!   `d = (1/n) Σ (a_i − b_i)²`.
//! - [`DistanceKind::Logarithmic`]: mean of squared log differences over the
//!   pairs where both entries are strictly positive,
//!   `d = (1/m) Σ (ln a_i − ln b_i)²`. Suited to PSDs, whose dynamic range
//!   spans orders of magnitude. A pair with exactly one positive entry is
//!   infinitely far apart on a log scale and makes `d = +∞`; pairs with both
//!   entries non-positive are skipped.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both summaries must be of the same kind and length; spectral summaries
//!   from the same grid share their frequency axis, so only the PSD values
//!   are compared.
//! - `d(a, a) = 0`, `d(a, b) = d(b, a)` and `d ≥ 0`. The linear distance
//!   is finite for finite input; the logarithmic one is finite whenever the
//!   two inputs agree on which entries are positive.
use crate::timescales::{
    core::options::DistanceKind,
    errors::{TimescaleError, TimescaleResult},
    summary::SummaryStats,
};
use ndarray::ArrayView1;

/// Distance between two summary statistics.
///
/// Errors
/// ------
/// - `TimescaleError::SummaryKindMismatch` when one is an autocorrelation and
///   the other a PSD.
/// - `TimescaleError::SummaryLengthMismatch` when lengths differ.
/// - `TimescaleError::NoComparableBins` when the logarithmic distance has no
///   strictly positive pair to compare.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_timescales::timescales::core::options::DistanceKind;
/// # use rust_timescales::timescales::distance::distance;
/// # use rust_timescales::timescales::summary::SummaryStats;
/// let a = SummaryStats::Autocorrelation(array![1.0, 0.5, 0.25]);
/// let b = SummaryStats::Autocorrelation(array![1.0, 0.4, 0.05]);
/// assert_eq!(distance(DistanceKind::Linear, &a, &a).unwrap(), 0.0);
/// assert!((distance(DistanceKind::Linear, &a, &b).unwrap() - 0.05 / 3.0).abs() < 1e-12);
/// ```
pub fn distance(kind: DistanceKind, a: &SummaryStats, b: &SummaryStats) -> TimescaleResult<f64> {
    match (a, b) {
        (SummaryStats::Autocorrelation(_), SummaryStats::Autocorrelation(_))
        | (SummaryStats::PowerSpectrum { .. }, SummaryStats::PowerSpectrum { .. }) => {}
        _ => return Err(TimescaleError::SummaryKindMismatch),
    }
    vector_distance(kind, a.values(), b.values())
}

/// Distance between two raw vectors of equal length.
///
/// Errors
/// ------
/// - `TimescaleError::SummaryLengthMismatch` when lengths differ.
/// - `TimescaleError::NoComparableBins` (logarithmic only, or empty input).
///
/// Returns `f64::INFINITY` for the logarithmic distance when some pair has
/// exactly one strictly positive entry.
pub fn vector_distance(
    kind: DistanceKind, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>,
) -> TimescaleResult<f64> {
    if a.len() != b.len() {
        return Err(TimescaleError::SummaryLengthMismatch { left: a.len(), right: b.len() });
    }

    let sign_mismatch = || a.iter().zip(b.iter()).any(|(&x, &y)| (x > 0.0) != (y > 0.0));
    if kind == DistanceKind::Logarithmic && sign_mismatch() {
        return Ok(f64::INFINITY);
    }

    let (sum, count) = match kind {
        DistanceKind::Linear => a
            .iter()
            .zip(b.iter())
            .fold((0.0, 0_usize), |(s, n), (x, y)| (s + (x - y) * (x - y), n + 1)),
        DistanceKind::Logarithmic => a
            .iter()
            .zip(b.iter())
            .filter(|&(&x, &y)| x > 0.0 && y > 0.0)
            .fold((0.0, 0_usize), |(s, n), (x, y)| {
                let d = x.ln() - y.ln();
                (s + d * d, n + 1)
            }),
    };

    if count == 0 {
        return Err(TimescaleError::NoComparableBins);
    }
    Ok(sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn psd(values: ndarray::Array1<f64>) -> SummaryStats {
        let freqs = ndarray::Array1::from_iter((1..=values.len()).map(|k| k as f64));
        SummaryStats::PowerSpectrum { psd: values, freqs }
    }

    #[test]
    // Purpose
    // -------
    // Both distances vanish on identical input, are symmetric, and are
    // strictly positive on distinct input.
    fn distances_are_zero_on_identity_and_symmetric() {
        // Arrange
        let a = psd(array![4.0, 2.0, 1.0, 0.5]);
        let b = psd(array![3.0, 2.5, 0.7, 0.1]);

        for kind in [DistanceKind::Linear, DistanceKind::Logarithmic] {
            // Act
            let d_aa = distance(kind, &a, &a).unwrap();
            let d_ab = distance(kind, &a, &b).unwrap();
            let d_ba = distance(kind, &b, &a).unwrap();

            // Assert
            assert!(d_aa.abs() < 1e-10);
            assert!(d_ab > d_aa);
            assert!((d_ab - d_ba).abs() < 1e-15);
        }
    }

    #[test]
    // Purpose
    // -------
    // The logarithmic distance skips pairs that are non-positive on both
    // sides and reports an error only when nothing is comparable.
    fn logarithmic_skips_non_positive_pairs() {
        let a = array![1.0, 0.0, std::f64::consts::E, 3.0];
        let b = array![1.0, -2.0, 1.0, 3.0];
        let d = vector_distance(DistanceKind::Logarithmic, a.view(), b.view()).unwrap();
        assert!((d - 1.0 / 3.0).abs() < 1e-12);

        let zeros = array![0.0, -1.0];
        assert_eq!(
            vector_distance(DistanceKind::Logarithmic, zeros.view(), zeros.view()),
            Err(TimescaleError::NoComparableBins)
        );
    }

    #[test]
    // Purpose
    // -------
    // Vectors that differ only where one side is non-positive must not be
    // at distance zero.
    //
    // Given
    // -----
    // - `[1, 0, 2]` against `[1, 7, 2]`.
    //
    // Expect
    // ------
    // - An infinite distance in both directions, which no finite epsilon
    //   accepts. The linear distance of the same pair stays finite.
    fn logarithmic_sign_mismatch_is_infinitely_far() {
        // Arrange
        let a = array![1.0, 0.0, 2.0];
        let b = array![1.0, 7.0, 2.0];

        // Act
        let d_ab = vector_distance(DistanceKind::Logarithmic, a.view(), b.view()).unwrap();
        let d_ba = vector_distance(DistanceKind::Logarithmic, b.view(), a.view()).unwrap();
        let linear = vector_distance(DistanceKind::Linear, a.view(), b.view()).unwrap();

        // Assert
        assert_eq!(d_ab, f64::INFINITY);
        assert_eq!(d_ba, f64::INFINITY);
        assert!((linear - 49.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn mismatched_inputs_are_rejected() {
        let ac = SummaryStats::Autocorrelation(array![1.0, 0.5]);
        let short = SummaryStats::Autocorrelation(array![1.0]);
        assert_eq!(
            distance(DistanceKind::Linear, &ac, &psd(array![1.0, 0.5])),
            Err(TimescaleError::SummaryKindMismatch)
        );
        assert_eq!(
            distance(DistanceKind::Linear, &ac, &short),
            Err(TimescaleError::SummaryLengthMismatch { left: 2, right: 1 })
        );
    }
}
