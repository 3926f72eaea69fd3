//! The capability contract consumed by an external ABC sampler.
//!
//! A sampler proposes theta, calls [`AbcModel::generate_data`], reduces the
//! result with [`AbcModel::summary_stats`], compares it to the observed
//! summary with [`AbcModel::distance_function`] and keeps the proposal when
//! [`AbcModel::accepts`] holds. Implementors only expose their
//! [`ModelBase`]; every operation is provided on top of it.
use crate::timescales::{
    core::{options::SimOpts, validation::validate_data_width},
    distance::distance,
    errors::TimescaleResult,
    models::base::ModelBase,
    simulation::generate,
    summary::SummaryStats,
};
use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Shared operations of every timescale model.
///
/// All methods take `&self`; a model can be shared across sampler workers
/// (`Send + Sync`) and each call allocates its own buffers and RNG streams.
pub trait AbcModel: Send + Sync {
    /// Validated state of the model.
    fn base(&self) -> &ModelBase;

    /// Simulate `num_trials × n_time` trials at `theta`, rescaled to the
    /// observed mean and variance. Trials run on the rayon pool.
    ///
    /// Errors
    /// ------
    /// - `TimescaleError::ThetaLengthMismatch` / `TimescaleError::InvalidTheta`
    ///   for theta outside the variant's layout or domains.
    /// - `TimescaleError::NonFiniteSimulation` / `TimescaleError::GuardExceeded`
    ///   when the output guard trips.
    fn generate_data<R: Rng + ?Sized>(
        &self, theta: ArrayView1<'_, f64>, rng: &mut R,
    ) -> TimescaleResult<Array2<f64>>
    where
        Self: Sized,
    {
        let base = self.base();
        generate(base.kind(), theta, &base.target(true), rng)
    }

    /// [`generate_data`](Self::generate_data) seeded and scheduled by `opts`.
    ///
    /// `opts.seed = None` seeds from system entropy.
    fn generate_data_with(
        &self, theta: ArrayView1<'_, f64>, opts: &SimOpts,
    ) -> TimescaleResult<Array2<f64>> {
        let mut rng = match opts.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let base = self.base();
        generate(base.kind(), theta, &base.target(opts.parallel), &mut rng)
    }

    /// Reduce `trials` to the model's summary statistic.
    ///
    /// Errors
    /// ------
    /// - `TimescaleError::DataShapeMismatch` when the trial width is not the
    ///   model's `n_time`.
    /// - Reducer errors (no trials, zero-variance trial).
    fn summary_stats(&self, trials: ArrayView2<'_, f64>) -> TimescaleResult<SummaryStats> {
        let base = self.base();
        validate_data_width(trials.ncols(), base.grid())?;
        SummaryStats::compute(base.summary(), trials, base.grid())
    }

    /// Distance between two summaries under the model's distance kind.
    fn distance_function(&self, a: &SummaryStats, b: &SummaryStats) -> TimescaleResult<f64> {
        distance(self.base().distance(), a, b)
    }

    /// Summary statistic of the observed data, computed at construction.
    fn observed_summary(&self) -> &SummaryStats {
        self.base().observed()
    }

    /// ABC acceptance rule: `distance <= epsilon`. NaN is never accepted.
    fn accepts(&self, distance: f64) -> bool {
        distance <= self.base().epsilon()
    }

    /// Simulate at `theta` and reduce in one step.
    fn simulate_summary<R: Rng + ?Sized>(
        &self, theta: ArrayView1<'_, f64>, rng: &mut R,
    ) -> TimescaleResult<SummaryStats>
    where
        Self: Sized,
    {
        let trials = self.generate_data(theta, rng)?;
        self.summary_stats(trials.view())
    }

    /// Distance between the summary simulated at `theta` and the observed one.
    fn distance_to_observed<R: Rng + ?Sized>(
        &self, theta: ArrayView1<'_, f64>, rng: &mut R,
    ) -> TimescaleResult<f64>
    where
        Self: Sized,
    {
        let simulated = self.simulate_summary(theta, rng)?;
        self.distance_function(&simulated, self.observed_summary())
    }
}
