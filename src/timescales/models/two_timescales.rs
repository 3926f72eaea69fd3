//! Two-timescale model: theta = `[tau1, tau2, coefficient]`.
//!
//! Trials are `sqrt(c) · OU(tau1) + sqrt(1 − c) · OU(tau2)` with independent
//! components, reduced to their autocorrelation by default.
use crate::timescales::{
    core::{guards::SimGuards, options::ModelOptions, params::ModelKind},
    errors::TimescaleResult,
    models::{
        base::{ModelBase, PriorSource},
        traits::AbcModel,
    },
    priors::Prior,
};
use ndarray::Array2;

/// Mixture of two OU processes.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoTimescaleModel {
    base: ModelBase,
}

impl TwoTimescaleModel {
    /// Model with an explicit three-component prior over
    /// `[tau1, tau2, coefficient]`.
    pub fn new(
        data: Array2<f64>, dt: f64, duration: f64, epsilon: f64, prior: Prior,
        options: ModelOptions,
    ) -> TimescaleResult<Self> {
        let base = ModelBase::build(
            ModelKind::TwoTimescales,
            data,
            dt,
            duration,
            epsilon,
            PriorSource::Explicit(prior),
            options,
        )?;
        Ok(TwoTimescaleModel { base })
    }

    /// Model with the informed prior: Normal around half and twice the
    /// observed e-folding time, Uniform(0, 1) for the coefficient.
    pub fn informed(
        data: Array2<f64>, dt: f64, duration: f64, epsilon: f64, options: ModelOptions,
    ) -> TimescaleResult<Self> {
        let base = ModelBase::build(
            ModelKind::TwoTimescales,
            data,
            dt,
            duration,
            epsilon,
            PriorSource::Informed,
            options,
        )?;
        Ok(TwoTimescaleModel { base })
    }

    /// Replace the simulation guards.
    pub fn with_guards(self, guards: SimGuards) -> Self {
        TwoTimescaleModel { base: self.base.with_guards(guards) }
    }
}

impl AbcModel for TwoTimescaleModel {
    fn base(&self) -> &ModelBase {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timescales::{priors::ParamPrior, simulation::SimTarget, summary::SummaryStats};
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    // Purpose
    // -------
    // Shifting weight onto the slow component raises the autocorrelation at
    // long lags.
    //
    // Given
    // -----
    // - τ1 = 2 (slow), τ2 = 0.1 (fast) on dt = 0.05, T = 100, 20 trials.
    // - c = 0.9 vs c = 0.1.
    //
    // Expect
    // ------
    // - ac[40] (lag 2 s) larger for c = 0.9.
    fn slow_weight_raises_long_lag_correlation() {
        // Arrange
        let target = SimTarget::new(0.05, 100.0, 20, 0.0, 1.0).unwrap();
        let observed = crate::timescales::simulation::two_timescales(
            2.0,
            0.1,
            0.5,
            &target,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let prior = Prior::new(vec![
            ParamPrior::uniform(0.0, 5.0).unwrap(),
            ParamPrior::uniform(0.0, 5.0).unwrap(),
            ParamPrior::uniform(0.0, 1.0).unwrap(),
        ]);
        let options = ModelOptions { num_trials: Some(20), ..ModelOptions::with_n_lags(100) };
        let model = TwoTimescaleModel::new(observed, 0.05, 100.0, 0.1, prior, options).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        // Act
        let slow = model.simulate_summary(array![2.0, 0.1, 0.9].view(), &mut rng).unwrap();
        let fast = model.simulate_summary(array![2.0, 0.1, 0.1].view(), &mut rng).unwrap();

        // Assert
        match (slow, fast) {
            (SummaryStats::Autocorrelation(s), SummaryStats::Autocorrelation(f)) => {
                assert!(s[40] > f[40], "slow {} vs fast {}", s[40], f[40]);
            }
            other => panic!("expected autocorrelation summaries, got {other:?}"),
        }
    }
}
