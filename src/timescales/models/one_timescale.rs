//! Single-timescale model: theta = `[tau]`.
//!
//! Observed and simulated data are reduced to their trial-averaged
//! autocorrelation by default and compared with the linear distance.
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

/// OU process with one timescale.
#[derive(Debug, Clone, PartialEq)]
pub struct OneTimescaleModel {
    base: ModelBase,
}

impl OneTimescaleModel {
    /// Model with an explicit one-component prior.
    ///
    /// Errors
    /// ------
    /// See [`ModelBase::build`].
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::Array2;
    /// # use rand::{SeedableRng, rngs::StdRng};
    /// # use rust_timescales::timescales::core::options::ModelOptions;
    /// # use rust_timescales::timescales::models::{AbcModel, OneTimescaleModel};
    /// # use rust_timescales::timescales::priors::{ParamPrior, Prior};
    /// let data = Array2::from_shape_fn((2, 500), |(i, k)| ((k + i) as f64 * 0.05).sin());
    /// let prior = Prior::new(vec![ParamPrior::uniform(0.0, 10.0).unwrap()]);
    /// let model =
    ///     OneTimescaleModel::new(data, 0.01, 5.0, 0.1, prior, ModelOptions::default()).unwrap();
    /// let sim = model.generate_data(ndarray::array![0.5].view(), &mut StdRng::seed_from_u64(1)).unwrap();
    /// assert_eq!(sim.dim(), (2, 500));
    /// ```
    pub fn new(
        data: Array2<f64>, dt: f64, duration: f64, epsilon: f64, prior: Prior,
        options: ModelOptions,
    ) -> TimescaleResult<Self> {
        let base = ModelBase::build(
            ModelKind::OneTimescale,
            data,
            dt,
            duration,
            epsilon,
            PriorSource::Explicit(prior),
            options,
        )?;
        Ok(OneTimescaleModel { base })
    }

    /// Model with the informed prior `tau ~ Normal(tau_hat, tau_hat / 2)`.
    pub fn informed(
        data: Array2<f64>, dt: f64, duration: f64, epsilon: f64, options: ModelOptions,
    ) -> TimescaleResult<Self> {
        let base = ModelBase::build(
            ModelKind::OneTimescale,
            data,
            dt,
            duration,
            epsilon,
            PriorSource::Informed,
            options,
        )?;
        Ok(OneTimescaleModel { base })
    }

    /// Replace the simulation guards.
    pub fn with_guards(self, guards: SimGuards) -> Self {
        OneTimescaleModel { base: self.base.with_guards(guards) }
    }
}

impl AbcModel for OneTimescaleModel {
    fn base(&self) -> &ModelBase {
        &self.base
    }
}
