//! core — validated inputs and configuration shared by every model.
//!
//! Purpose
//! -------
//! Collect the building blocks the models, simulators and reducers rely on:
//! the observed trial container, the sampling grid, parameter layouts,
//! options, simulation guards and the common validation routines.
//!
//! Key behaviors
//! -------------
//! - [`TrialData`] validates an observed `(num_trials × n_time)` matrix and
//!   caches its grand mean and population variance.
//! - [`TimeGrid`] fixes `n_time = round(T / dt)` and derives the sampling
//!   rate, frequency resolution and Nyquist frequency.
//! - [`ModelKind`] and [`ParamDomain`] describe each variant's theta layout.
//! - [`ModelOptions`], [`SummaryChoice`], [`SummaryMetric`], [`DistanceKind`]
//!   and [`SimOpts`] configure models and simulation calls.
//! - [`SimGuards`] and [`check_trials`] reject non-finite or runaway output.
//!
//! Invariants & assumptions
//! ------------------------
//! - Types in this module are plain values (`Copy` where small); nothing here
//!   holds interior mutability, so every type is `Send + Sync`.
//! - Validation reports [`TimescaleError`](crate::timescales::errors::TimescaleError)
//!   variants and never panics on user input.
pub mod data;
pub mod grid;
pub mod guards;
pub mod options;
pub mod params;
pub mod validation;

pub use self::data::{TrialData, trials_from_rows};
pub use self::grid::TimeGrid;
pub use self::guards::{DEFAULT_MAX_ABS, SimGuards, check_trials};
pub use self::options::{
    DEFAULT_N_LAGS, DistanceKind, ModelOptions, SimOpts, SummaryChoice, SummaryMetric,
};
pub use self::params::{ModelKind, ParamDomain};
pub use self::validation::{
    validate_data_width, validate_epsilon, validate_n_lags, validate_num_trials, validate_theta,
};
