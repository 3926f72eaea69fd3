//! timescales — Ornstein–Uhlenbeck timescale models for ABC inference.
//!
//! Purpose
//! -------
//! Provide the generative models, summary statistics and distances an
//! Approximate Bayesian Computation sampler needs to estimate intrinsic
//! timescales (and optionally an oscillation) from trial-structured time
//! series.
//!
//! Layout
//! ------
//! - [`core`]: validated inputs (trial data, time grid), options, parameter
//!   layouts, output guards and shared validation.
//! - [`priors`]: explicit and data-informed prior distributions.
//! - [`simulation`]: exact OU trial generation and mixing.
//! - [`summary`]: FFT-based autocorrelation and power spectral density.
//! - [`distance`]: linear and logarithmic summary distances.
//! - [`models`]: the [`models::AbcModel`] contract and its variants.
//! - [`errors`]: [`errors::TimescaleError`] and [`errors::TimescaleResult`].
pub mod core;
pub mod distance;
pub mod errors;
pub mod models;
pub mod priors;
pub mod simulation;
pub mod summary;

/// Common imports for driving a model from Rust.
pub mod prelude {
    pub use super::core::options::{
        DistanceKind, ModelOptions, SimOpts, SummaryChoice, SummaryMetric,
    };
    pub use super::core::params::ModelKind;
    pub use super::errors::{TimescaleError, TimescaleResult};
    pub use super::models::{
        AbcModel, AnyModel, OneTimescaleAndOscModel, OneTimescaleModel, TwoTimescaleModel,
    };
    pub use super::priors::{ParamPrior, Prior, PriorFamily};
    pub use super::summary::SummaryStats;
}
