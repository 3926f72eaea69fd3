//! Integration tests for the timescale ABC models.
//!
//! Purpose
//! -------
//! - Validate the end-to-end path an ABC sampler takes: observed trials,
//!   model construction (explicit and informed priors), simulation at a
//!   proposed theta, reduction to summary statistics, distance, acceptance.
//! - Exercise realistic grids (`dt = 0.01`, `T = 100`) rather than toy sizes.
//!
//! Coverage
//! --------
//! - `timescales::models`: all three variants through `AbcModel` and
//!   `AnyModel`.
//! - `timescales::summary` / `timescales::distance`: autocorrelation and PSD
//!   summaries with their default distances.
//! - `timescales::priors`: informed prior families and prior sampling.
//!
//! Exclusions
//! ----------
//! - Low-level reducers, guards and validation routines are covered by unit
//!   tests next to their implementations.
//! - Python bindings are exercised from the Python package.
use ndarray::{Array2, array};
use rand::{SeedableRng, rngs::StdRng};
use rust_timescales::timescales::{
    models::PriorSource,
    prelude::*,
    simulation::{SimTarget, one_timescale, one_timescale_and_osc},
};

const DT: f64 = 0.01;
const T: f64 = 100.0;

/// Observed OU(τ = 1) trials with mean 2 and variance 1 on the shared grid.
fn observed_ou(num_trials: usize, seed: u64) -> Array2<f64> {
    let target = SimTarget::new(DT, T, num_trials, 2.0, 1.0).expect("valid target");
    one_timescale(1.0, &target, &mut StdRng::seed_from_u64(seed)).expect("simulation")
}

/// Observed OU(τ = 0.5) + 0.15 Hz oscillation trials on the shared grid.
fn observed_osc(num_trials: usize, seed: u64) -> Array2<f64> {
    let target = SimTarget::new(DT, T, num_trials, 0.0, 1.0).expect("valid target");
    one_timescale_and_osc(0.5, 0.15, 0.8, &target, &mut StdRng::seed_from_u64(seed))
        .expect("simulation")
}

fn tau_prior() -> Prior {
    Prior::new(vec![ParamPrior::uniform(0.01, 10.0).expect("valid prior")])
}

fn one_timescale_model(data: Array2<f64>) -> OneTimescaleModel {
    OneTimescaleModel::new(data, DT, T, 0.1, tau_prior(), ModelOptions::default())
        .expect("valid model")
}

fn osc_prior() -> Prior {
    Prior::new(vec![
        ParamPrior::uniform(0.01, 10.0).expect("valid prior"),
        ParamPrior::uniform(0.01, 5.0).expect("valid prior"),
        ParamPrior::uniform(0.0, 1.0).expect("valid prior"),
    ])
}

#[test]
// Purpose
// -------
// Simulated data have the model's shape, contain no NaN/Inf, and reach the
// stored mean and standard deviation.
//
// Given
// -----
// - Observed: 10 trials of OU(τ = 1), mean 2, variance 1.
// - Model simulating 50 trials per call at τ = 1.
//
// Expect
// ------
// - Shape (50, 10 000), all finite.
// - Grand mean within 0.1 of `data_mean`, standard deviation within 0.1 of
//   `sqrt(data_var)`.
fn generate_data_matches_shape_and_moments() {
    // Arrange
    let options = ModelOptions { num_trials: Some(50), ..ModelOptions::default() };
    let model = OneTimescaleModel::new(observed_ou(10, 1), DT, T, 0.1, tau_prior(), options)
        .expect("valid model");
    let mut rng = StdRng::seed_from_u64(2);

    // Act
    let sim = model.generate_data(array![1.0].view(), &mut rng).expect("simulation");

    // Assert
    assert_eq!(sim.dim(), (50, 10_000));
    assert!(sim.iter().all(|v| v.is_finite()));
    let n = sim.len() as f64;
    let mean = sim.sum() / n;
    let std = (sim.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    let base = model.base();
    assert!((mean - base.data_mean()).abs() < 0.1, "mean {mean} vs {}", base.data_mean());
    let data_sd = base.data_var().sqrt();
    assert!((std - data_sd).abs() < 0.1, "std {std} vs {data_sd}");
}

#[test]
// Purpose
// -------
// Autocorrelation summaries start at one and stay inside [-1, 1].
fn autocorrelation_summary_is_normalised() {
    // Arrange
    let model = one_timescale_model(observed_ou(10, 3));
    let mut rng = StdRng::seed_from_u64(4);

    // Act
    let stats = model.simulate_summary(array![1.0].view(), &mut rng).expect("summary");

    // Assert
    let SummaryStats::Autocorrelation(ac) = &stats else {
        panic!("expected an autocorrelation summary, got {stats:?}");
    };
    assert_eq!(ac.len(), 200);
    assert!((ac[0] - 1.0).abs() < 0.1);
    assert!(ac.iter().all(|v| v.abs() <= 1.0));
}

#[test]
// Purpose
// -------
// The model distance vanishes on identical summaries and is strictly larger
// for summaries simulated at different timescales.
fn distance_is_zero_on_identity_and_positive_otherwise() {
    // Arrange
    let model = one_timescale_model(observed_ou(10, 5));
    let mut rng = StdRng::seed_from_u64(6);
    let a = model.simulate_summary(array![0.5].view(), &mut rng).expect("summary");
    let b = model.simulate_summary(array![2.0].view(), &mut rng).expect("summary");

    // Act
    let d_aa = model.distance_function(&a, &a).expect("distance");
    let d_ab = model.distance_function(&a, &b).expect("distance");
    let d_ba = model.distance_function(&b, &a).expect("distance");

    // Assert
    assert!(d_aa.abs() < 1e-10);
    assert!(d_ab > d_aa);
    assert!((d_ab - d_ba).abs() < 1e-15);
}

#[test]
// Purpose
// -------
// Raising the oscillation frequency moves the PSD peak to a higher bin.
//
// Given
// -----
// - Oscillatory model with the default PSD summary on dt = 0.01, T = 100
//   (bin width 0.01 Hz).
// - θ = [0.5, 0.1, 0.9] vs θ = [0.5, 0.2, 0.9].
//
// Expect
// ------
// - Peaks at 0.1 Hz and 0.2 Hz respectively.
fn higher_frequency_moves_spectral_peak_up() {
    // Arrange
    let options = ModelOptions::default();
    let model = OneTimescaleAndOscModel::new(observed_osc(10, 7), DT, T, 1.0, osc_prior(), options)
        .expect("valid model");
    let mut rng = StdRng::seed_from_u64(8);

    // Act
    let low = model.simulate_summary(array![0.5, 0.1, 0.9].view(), &mut rng).expect("summary");
    let high = model.simulate_summary(array![0.5, 0.2, 0.9].view(), &mut rng).expect("summary");

    // Assert
    let f_low = low.peak_frequency().expect("spectral summary");
    let f_high = high.peak_frequency().expect("spectral summary");
    assert!(f_high > f_low, "peaks {f_low} -> {f_high}");
    assert!((f_low - 0.1).abs() < 1e-9);
    assert!((f_high - 0.2).abs() < 1e-9);
}

#[test]
// Purpose
// -------
// A longer timescale keeps the autocorrelation higher at a long lag.
//
// Expect
// ------
// - ac[100] (lag 1 s) for τ = 2 exceeds ac[100] for τ = 0.5.
fn longer_timescale_raises_long_lag_correlation() {
    // Arrange
    let model = one_timescale_model(observed_ou(10, 9));
    let mut rng = StdRng::seed_from_u64(10);

    // Act
    let slow = model.simulate_summary(array![2.0].view(), &mut rng).expect("summary");
    let fast = model.simulate_summary(array![0.5].view(), &mut rng).expect("summary");

    // Assert
    assert!(slow.values()[100] > fast.values()[100]);
}

#[test]
// Purpose
// -------
// Informed priors use Normal components for timescales and frequencies and
// a Uniform component for the mixing coefficient.
fn informed_priors_use_fixed_families() {
    use PriorFamily::{Normal, Uniform};

    let cases = [
        (ModelKind::OneTimescale, observed_ou(5, 11), vec![Normal]),
        (ModelKind::OneTimescaleAndOsc, observed_osc(5, 12), vec![Normal, Normal, Uniform]),
        (ModelKind::TwoTimescales, observed_ou(5, 13), vec![Normal, Normal, Uniform]),
    ];

    for (kind, data, expected) in cases {
        let model =
            AnyModel::build(kind, data, DT, T, 0.1, PriorSource::Informed, ModelOptions::default())
                .expect("valid model");
        let families: Vec<_> = model.prior().components().iter().map(ParamPrior::family).collect();
        assert_eq!(families, expected, "{kind:?}");
    }
}

#[test]
// Purpose
// -------
// The oscillatory informed prior is centred on the observed peak.
fn informed_frequency_prior_tracks_observed_peak() {
    let options = ModelOptions::default();
    let model = OneTimescaleAndOscModel::informed(observed_osc(10, 14), DT, T, 1.0, options)
        .expect("valid model");
    match &model.base().prior().components()[1] {
        ParamPrior::Normal { mean, std_dev, .. } => {
            assert!((mean - 0.15).abs() < 1e-9, "location {mean}");
            assert!(*std_dev >= 0.01);
        }
        other => panic!("expected Normal, got {other:?}"),
    }
}

#[test]
// Purpose
// -------
// Construction rejects malformed input instead of coercing it.
fn construction_errors_are_descriptive() {
    let data = observed_ou(2, 15);
    assert!(matches!(
        OneTimescaleModel::new(data.clone(), 0.0, T, 0.1, tau_prior(), ModelOptions::default()),
        Err(TimescaleError::InvalidDt { .. })
    ));
    assert!(matches!(
        OneTimescaleModel::new(data.clone(), DT, 50.0, 0.1, tau_prior(), ModelOptions::default()),
        Err(TimescaleError::DataShapeMismatch { expected: 5000, actual: 10_000 })
    ));
    assert!(matches!(
        OneTimescaleAndOscModel::new(data, DT, T, 0.1, tau_prior(), ModelOptions::default()),
        Err(TimescaleError::PriorLengthMismatch { expected: 3, actual: 1 })
    ));
}

#[test]
// Purpose
// -------
// One model shared by several threads yields the same draws as sequential
// use with the same seeds.
fn shared_model_is_deterministic_across_threads() {
    // Arrange
    let options = ModelOptions { num_trials: Some(4), ..ModelOptions::default() };
    let model = OneTimescaleModel::new(observed_ou(4, 16), DT, T, 0.1, tau_prior(), options)
        .expect("valid model");
    let seeds = [1_u64, 2, 3, 4];

    // Act
    let threaded: Vec<Array2<f64>> = std::thread::scope(|s| {
        let handles: Vec<_> = seeds
            .iter()
            .map(|&seed| {
                let model = &model;
                s.spawn(move || {
                    model.generate_data_with(array![0.8].view(), &SimOpts::seeded(seed))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().expect("thread").expect("simulation")).collect()
    });

    // Assert
    for (seed, sim) in seeds.iter().zip(&threaded) {
        let sequential = model
            .generate_data_with(array![0.8].view(), &SimOpts::new(Some(*seed), false))
            .expect("simulation");
        assert_eq!(sim, &sequential);
    }
}

#[test]
// Purpose
// -------
// A small rejection sampler driven only through `AbcModel` concentrates on
// the generating timescale.
//
// Given
// -----
// - Observed: 5 trials of OU(τ = 0.5) on dt = 0.05, T = 50.
// - Prior τ ~ U(0.05, 3); 300 proposals; autocorrelation over 40 lags.
//
// Expect
// ------
// - The 30 proposals closest to the observed summary average within 0.25
//   of 0.5.
fn rejection_sampler_recovers_timescale() {
    // Arrange
    let target = SimTarget::new(0.05, 50.0, 5, 0.0, 1.0).expect("valid target");
    let observed =
        one_timescale(0.5, &target, &mut StdRng::seed_from_u64(17)).expect("simulation");
    let prior = Prior::new(vec![ParamPrior::uniform(0.05, 3.0).expect("valid prior")]);
    let options = ModelOptions::with_n_lags(40);
    let model = OneTimescaleModel::new(observed, 0.05, 50.0, 0.01, prior, options)
        .expect("valid model");
    let mut rng = StdRng::seed_from_u64(18);

    // Act
    let mut draws: Vec<(f64, f64)> = (0..300)
        .map(|_| {
            let theta = model.base().prior().sample(&mut rng);
            let d = model.distance_to_observed(theta.view(), &mut rng).expect("distance");
            (d, theta[0])
        })
        .collect();
    draws.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Assert
    let best: Vec<f64> = draws.iter().take(30).map(|&(_, tau)| tau).collect();
    let posterior_mean = best.iter().sum::<f64>() / best.len() as f64;
    assert!((posterior_mean - 0.5).abs() < 0.25, "posterior mean {posterior_mean}");
}
