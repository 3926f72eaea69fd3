//! Shared construction path and immutable state of every model variant.
//!
//! [`ModelBase::build`] is the single validation point: it checks the grid,
//! observed data, tolerance, options and prior, resolves option defaults for
//! the variant, and reduces the observed data to its summary statistic once.
//! Afterwards the bundle is only read.
use crate::timescales::{
    core::{
        data::TrialData,
        grid::TimeGrid,
        guards::SimGuards,
        options::{DistanceKind, ModelOptions, SummaryChoice, SummaryMetric},
        params::ModelKind,
        validation::{validate_data_width, validate_epsilon, validate_n_lags, validate_num_trials},
    },
    errors::{TimescaleError, TimescaleResult},
    priors::Prior,
    simulation::SimTarget,
    summary::SummaryStats,
};
use log::debug;
use ndarray::Array2;

pub use crate::timescales::core::options::DEFAULT_N_LAGS;

/// How a model obtains its prior.
#[derive(Debug, Clone, PartialEq)]
pub enum PriorSource {
    /// Caller-supplied components, checked against the variant's layout.
    Explicit(Prior),
    /// Preset derived from the observed data (see [`Prior::informed`]).
    Informed,
}

/// ModelBase — validated, immutable state shared by all variants.
///
/// Fields
/// ------
/// - `kind`: generative process and theta layout.
/// - `data`: observed trials with their grand mean and variance.
/// - `prior`: one component per theta entry.
/// - `observed`: summary statistic of `data`.
/// - `epsilon`: ABC tolerance, finite and ≥ 0.
/// - `grid`: sampling grid shared by observed and simulated data.
/// - `num_trials`: rows produced by each simulation.
/// - `summary`, `distance`: resolved metric and distance.
/// - `guards`: bound checked on simulated output.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelBase {
    kind: ModelKind,
    data: TrialData,
    prior: Prior,
    observed: SummaryStats,
    epsilon: f64,
    grid: TimeGrid,
    num_trials: usize,
    summary: SummaryMetric,
    distance: DistanceKind,
    guards: SimGuards,
}

impl ModelBase {
    /// Validate inputs and assemble the shared state for a `kind` model.
    ///
    /// Errors
    /// ------
    /// - Grid errors for non-positive or non-finite `dt` / `duration`.
    /// - Data errors for empty, non-finite or constant observations, and
    ///   `TimescaleError::DataShapeMismatch` when the trial width differs
    ///   from `round(duration / dt)`.
    /// - `TimescaleError::InvalidEpsilon`, `TimescaleError::InvalidNumTrials`
    ///   and `TimescaleError::InvalidNLags` for bad options.
    /// - `TimescaleError::PriorLengthMismatch` when an explicit prior does
    ///   not have one component per theta entry.
    /// - Reducer errors when the observed summary cannot be computed.
    pub fn build(
        kind: ModelKind, data: Array2<f64>, dt: f64, duration: f64, epsilon: f64,
        prior: PriorSource, options: ModelOptions,
    ) -> TimescaleResult<ModelBase> {
        let grid = TimeGrid::new(dt, duration)?;
        let data = TrialData::new(data)?;
        validate_data_width(data.n_time(), &grid)?;
        validate_epsilon(epsilon)?;

        let num_trials = options.num_trials.unwrap_or(data.num_trials());
        validate_num_trials(num_trials)?;

        let summary =
            options.summary.unwrap_or_else(|| default_summary(kind)).resolve(grid.n_time);
        if let Some(n_lags) = summary.n_lags() {
            validate_n_lags(n_lags, grid.n_time)?;
        }
        let distance = options.distance.unwrap_or(summary.default_distance());

        let prior = match prior {
            PriorSource::Explicit(prior) => prior,
            PriorSource::Informed => Prior::informed(kind, &data, &grid)?,
        };
        if prior.len() != kind.n_params() {
            return Err(TimescaleError::PriorLengthMismatch {
                expected: kind.n_params(),
                actual: prior.len(),
            });
        }

        let observed = SummaryStats::compute(summary, data.view(), &grid)?;
        debug!(
            "built {kind:?} model: {} x {} observed, epsilon = {epsilon}, {summary:?}, {distance:?}",
            data.num_trials(),
            grid.n_time
        );

        Ok(ModelBase {
            kind,
            data,
            prior,
            observed,
            epsilon,
            grid,
            num_trials,
            summary,
            distance,
            guards: SimGuards::default(),
        })
    }

    /// Replace the simulation guards.
    pub fn with_guards(self, guards: SimGuards) -> ModelBase {
        ModelBase { guards, ..self }
    }

    /// Simulation target derived from the stored grid, trial count and moments.
    pub fn target(&self, parallel: bool) -> SimTarget {
        SimTarget {
            grid: self.grid,
            num_trials: self.num_trials,
            mean: self.data.mean(),
            var: self.data.var(),
            guards: self.guards,
            parallel,
        }
    }

    /// Model variant.
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Observed trials.
    pub fn data(&self) -> &TrialData {
        &self.data
    }

    /// Prior over theta.
    pub fn prior(&self) -> &Prior {
        &self.prior
    }

    /// Summary statistic of the observed trials.
    pub fn observed(&self) -> &SummaryStats {
        &self.observed
    }

    /// ABC tolerance.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Sampling grid.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Trials per simulation.
    pub fn num_trials(&self) -> usize {
        self.num_trials
    }

    /// Grand mean of the observed data.
    pub fn data_mean(&self) -> f64 {
        self.data.mean()
    }

    /// Population variance of the observed data.
    pub fn data_var(&self) -> f64 {
        self.data.var()
    }

    /// Resolved summary metric.
    pub fn summary(&self) -> SummaryMetric {
        self.summary
    }

    /// Resolved distance.
    pub fn distance(&self) -> DistanceKind {
        self.distance
    }

    /// Autocorrelation horizon, or `None` for spectral summaries.
    pub fn n_lags(&self) -> Option<usize> {
        self.summary.n_lags()
    }

    /// Simulation guards.
    pub fn guards(&self) -> &SimGuards {
        &self.guards
    }
}

fn default_summary(kind: ModelKind) -> SummaryChoice {
    match kind {
        ModelKind::OneTimescaleAndOsc => SummaryChoice::PowerSpectrum,
        ModelKind::OneTimescale | ModelKind::TwoTimescales => {
            SummaryChoice::Autocorrelation { n_lags: None }
        }
    }
}
