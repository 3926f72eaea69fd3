//! models — ABC-ready timescale models.
//!
//! Purpose
//! -------
//! Bundle observed trials, a prior, the observed summary statistic and the
//! ABC tolerance into immutable model objects, and expose the operations an
//! external ABC sampler needs: simulate at theta, reduce, compare, accept.
//!
//! Key behaviors
//! -------------
//! - [`AbcModel`] is the shared capability contract. Every operation is a
//!   provided method over the implementor's [`ModelBase`].
//! - [`OneTimescaleModel`], [`OneTimescaleAndOscModel`] and
//!   [`TwoTimescaleModel`] each offer two named constructors: `new` with an
//!   explicit [`Prior`] and `informed` with the data-derived preset.
//! - [`AnyModel`] selects a variant at runtime (used by the Python bindings).
//!
//! Invariants & assumptions
//! ------------------------
//! - All validation happens at construction; a constructed model is never
//!   mutated, so `&Model` can be shared freely across sampler threads.
//! - Simulated trials have shape `(num_trials, n_time)` on the same grid as
//!   the observed data, so simulated and observed summaries are comparable.
//!
//! Downstream usage
//! ----------------
//! - A sampler draws `theta = model.base().prior().sample(rng)`, calls
//!   [`AbcModel::distance_to_observed`] (or the three primitive operations)
//!   and keeps theta when [`AbcModel::accepts`] holds.
pub mod base;
pub mod one_timescale;
pub mod one_timescale_osc;
pub mod traits;
pub mod two_timescales;

pub use self::base::{DEFAULT_N_LAGS, ModelBase, PriorSource};
pub use self::one_timescale::OneTimescaleModel;
pub use self::one_timescale_osc::OneTimescaleAndOscModel;
pub use self::traits::AbcModel;
pub use self::two_timescales::TwoTimescaleModel;

use crate::timescales::{
    core::{options::ModelOptions, params::ModelKind},
    errors::TimescaleResult,
    priors::Prior,
};
use ndarray::Array2;

/// AnyModel — a model variant chosen at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyModel {
    /// Single timescale.
    OneTimescale(OneTimescaleModel),
    /// Timescale plus oscillation.
    OneTimescaleAndOsc(OneTimescaleAndOscModel),
    /// Two timescales.
    TwoTimescales(TwoTimescaleModel),
}

impl AnyModel {
    /// Construct the `kind` variant from an explicit or informed prior.
    pub fn build(
        kind: ModelKind, data: Array2<f64>, dt: f64, duration: f64, epsilon: f64,
        prior: PriorSource, options: ModelOptions,
    ) -> TimescaleResult<AnyModel> {
        Ok(match (kind, prior) {
            (ModelKind::OneTimescale, PriorSource::Explicit(p)) => AnyModel::OneTimescale(
                OneTimescaleModel::new(data, dt, duration, epsilon, p, options)?,
            ),
            (ModelKind::OneTimescale, PriorSource::Informed) => AnyModel::OneTimescale(
                OneTimescaleModel::informed(data, dt, duration, epsilon, options)?,
            ),
            (ModelKind::OneTimescaleAndOsc, PriorSource::Explicit(p)) => {
                AnyModel::OneTimescaleAndOsc(OneTimescaleAndOscModel::new(
                    data, dt, duration, epsilon, p, options,
                )?)
            }
            (ModelKind::OneTimescaleAndOsc, PriorSource::Informed) => {
                AnyModel::OneTimescaleAndOsc(OneTimescaleAndOscModel::informed(
                    data, dt, duration, epsilon, options,
                )?)
            }
            (ModelKind::TwoTimescales, PriorSource::Explicit(p)) => AnyModel::TwoTimescales(
                TwoTimescaleModel::new(data, dt, duration, epsilon, p, options)?,
            ),
            (ModelKind::TwoTimescales, PriorSource::Informed) => AnyModel::TwoTimescales(
                TwoTimescaleModel::informed(data, dt, duration, epsilon, options)?,
            ),
        })
    }

    /// Variant tag.
    pub fn kind(&self) -> ModelKind {
        self.base().kind()
    }

    /// The prior, for samplers holding an `AnyModel`.
    pub fn prior(&self) -> &Prior {
        self.base().prior()
    }
}

impl AbcModel for AnyModel {
    fn base(&self) -> &ModelBase {
        match self {
            AnyModel::OneTimescale(m) => m.base(),
            AnyModel::OneTimescaleAndOsc(m) => m.base(),
            AnyModel::TwoTimescales(m) => m.base(),
        }
    }
}

impl From<OneTimescaleModel> for AnyModel {
    fn from(model: OneTimescaleModel) -> Self {
        AnyModel::OneTimescale(model)
    }
}

impl From<OneTimescaleAndOscModel> for AnyModel {
    fn from(model: OneTimescaleAndOscModel) -> Self {
        AnyModel::OneTimescaleAndOsc(model)
    }
}

impl From<TwoTimescaleModel> for AnyModel {
    fn from(model: TwoTimescaleModel) -> Self {
        AnyModel::TwoTimescales(model)
    }
}
