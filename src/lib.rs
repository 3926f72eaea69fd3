//! rust_timescales — ABC models for Ornstein–Uhlenbeck timescales, with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the timescale models to Python via the `_rust_timescales` extension module.
//! When the `python-bindings` feature is enabled, this module defines the
//! Python-facing `AbcModel` class and the `models` submodule.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`timescales`) as the public crate surface.
//! - Define the `#[pyclass]` wrapper and the `#[pymodule]` initializer for the
//!   `_rust_timescales` Python extension.
//! - Register the `models` submodule under `rust_timescales` so that
//!   dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in `timescales`; this file performs
//!   only FFI glue, input conversion and error mapping.
//! - Models are immutable and `Send + Sync`; simulation and reduction release
//!   the GIL while they run.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are `TimescaleError` values internally and are
//!   raised as `ValueError` at the PyO3 boundary.
//! - Summaries cross the boundary as a 1-D array (autocorrelation) or a
//!   `(psd, freqs)` tuple (power spectrum).
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on `timescales` (or its `prelude`) and
//!   ignore the items guarded by the `python-bindings` feature.
//! - A Python ABC sampler constructs a model once, then repeatedly draws
//!   theta, calls `generate_data`, `summary_stats` and `distance_function`,
//!   and keeps theta when `accepts(distance)` is true.

pub mod timescales;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use rand::{SeedableRng, rngs::StdRng};

#[cfg(feature = "python-bindings")]
use crate::{
    timescales::{
        core::{options::SimOpts, params::ModelKind},
        models::{AbcModel, AnyModel},
    },
    utils::{
        extract_model_options, extract_prior, extract_summary, extract_trials, extract_vector,
        prior_to_tuples, summary_into_py,
    },
};

/// AbcModel — Python-facing wrapper for the timescale model family.
///
/// Purpose
/// -------
/// Expose [`AnyModel`] to Python callers while preserving the Rust-side
/// validation and error handling.
///
/// Parameters
/// ----------
/// Constructed from Python via factory-style constructors:
/// - `AbcModel.one_timescale(data, dt, T, epsilon, prior, ...)`
/// - `AbcModel.one_timescale_and_osc(data, dt, T, epsilon, prior, ...)`
/// - `AbcModel.two_timescales(data, dt, T, epsilon, prior, ...)`
/// - `AbcModel(kind, data, dt, T, epsilon, prior, ...)` with `kind` one of
///   `"one_timescale"`, `"one_timescale_and_osc"`, `"two_timescales"`.
///
/// Common parameters:
/// - `data`: 2-D array-like `(num_trials, n_time)` with `n_time = round(T / dt)`.
/// - `prior`: `"informed"` or a list of `(family, a, b)` tuples.
/// - `num_trials`, `summary`, `n_lags`, `distance`: optional overrides
///   forwarded to [`ModelOptions`](crate::timescales::core::options::ModelOptions).
///
/// Notes
/// -----
/// - Native Rust callers should use the model types in
///   `timescales::models` directly.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "AbcModel", module = "rust_timescales.models", frozen)]
pub struct PyAbcModel {
    /// Underlying Rust model.
    inner: AnyModel,
}

#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
fn build_model(
    kind: ModelKind, data: &Bound<'_, PyAny>, dt: f64, duration: f64, epsilon: f64,
    prior: &Bound<'_, PyAny>, num_trials: Option<usize>, summary: Option<&str>,
    n_lags: Option<usize>, distance: Option<&str>,
) -> PyResult<PyAbcModel> {
    let trials = extract_trials(data)?;
    let prior = extract_prior(prior)?;
    let options = extract_model_options(num_trials, summary, n_lags, distance)?;
    let inner = AnyModel::build(kind, trials, dt, duration, epsilon, prior, options)?;
    Ok(PyAbcModel { inner })
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyAbcModel {
    #[new]
    #[pyo3(
        signature = (kind, data, dt, T, epsilon, prior, num_trials = None, summary = None, n_lags = None, distance = None),
        text_signature = "(kind, data, dt, T, epsilon, prior, /, num_trials=None, summary=None, \
                          n_lags=None, distance=None)"
    )]
    #[allow(non_snake_case, clippy::too_many_arguments)]
    pub fn new(
        kind: &str, data: &Bound<'_, PyAny>, dt: f64, T: f64, epsilon: f64,
        prior: &Bound<'_, PyAny>, num_trials: Option<usize>, summary: Option<&str>,
        n_lags: Option<usize>, distance: Option<&str>,
    ) -> PyResult<Self> {
        let kind = match kind.to_lowercase().as_str() {
            "one_timescale" => ModelKind::OneTimescale,
            "one_timescale_and_osc" => ModelKind::OneTimescaleAndOsc,
            "two_timescales" => ModelKind::TwoTimescales,
            other => {
                return Err(pyo3::exceptions::PyValueError::new_err(format!(
                    "invalid model kind {other:?} (expected 'one_timescale', \
                     'one_timescale_and_osc', or 'two_timescales')"
                )));
            }
        };
        build_model(kind, data, dt, T, epsilon, prior, num_trials, summary, n_lags, distance)
    }

    #[staticmethod]
    #[pyo3(
        signature = (data, dt, T, epsilon, prior, num_trials = None, summary = None, n_lags = None, distance = None),
        text_signature = "(data, dt, T, epsilon, prior, /, num_trials=None, summary=None, \
                          n_lags=None, distance=None)"
    )]
    #[allow(non_snake_case, clippy::too_many_arguments)]
    pub fn one_timescale(
        data: &Bound<'_, PyAny>, dt: f64, T: f64, epsilon: f64, prior: &Bound<'_, PyAny>,
        num_trials: Option<usize>, summary: Option<&str>, n_lags: Option<usize>,
        distance: Option<&str>,
    ) -> PyResult<Self> {
        let kind = ModelKind::OneTimescale;
        build_model(kind, data, dt, T, epsilon, prior, num_trials, summary, n_lags, distance)
    }

    #[staticmethod]
    #[pyo3(
        signature = (data, dt, T, epsilon, prior, num_trials = None, summary = None, n_lags = None, distance = None),
        text_signature = "(data, dt, T, epsilon, prior, /, num_trials=None, summary=None, \
                          n_lags=None, distance=None)"
    )]
    #[allow(non_snake_case, clippy::too_many_arguments)]
    pub fn one_timescale_and_osc(
        data: &Bound<'_, PyAny>, dt: f64, T: f64, epsilon: f64, prior: &Bound<'_, PyAny>,
        num_trials: Option<usize>, summary: Option<&str>, n_lags: Option<usize>,
        distance: Option<&str>,
    ) -> PyResult<Self> {
        let kind = ModelKind::OneTimescaleAndOsc;
        build_model(kind, data, dt, T, epsilon, prior, num_trials, summary, n_lags, distance)
    }

    #[staticmethod]
    #[pyo3(
        signature = (data, dt, T, epsilon, prior, num_trials = None, summary = None, n_lags = None, distance = None),
        text_signature = "(data, dt, T, epsilon, prior, /, num_trials=None, summary=None, \
                          n_lags=None, distance=None)"
    )]
    #[allow(non_snake_case, clippy::too_many_arguments)]
    pub fn two_timescales(
        data: &Bound<'_, PyAny>, dt: f64, T: f64, epsilon: f64, prior: &Bound<'_, PyAny>,
        num_trials: Option<usize>, summary: Option<&str>, n_lags: Option<usize>,
        distance: Option<&str>,
    ) -> PyResult<Self> {
        let kind = ModelKind::TwoTimescales;
        build_model(kind, data, dt, T, epsilon, prior, num_trials, summary, n_lags, distance)
    }

    /// Simulate trials at `theta`; `seed=None` draws from system entropy.
    #[pyo3(
        signature = (theta, seed = None, parallel = true),
        text_signature = "(self, theta, /, seed=None, parallel=True)"
    )]
    pub fn generate_data<'py>(
        &self, py: Python<'py>, theta: &Bound<'py, PyAny>, seed: Option<u64>, parallel: bool,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let theta = extract_vector(py, theta, "theta")?;
        let opts = SimOpts::new(seed, parallel);
        let trials = py.allow_threads(|| self.inner.generate_data_with(theta.view(), &opts))?;
        Ok(trials.into_pyarray(py))
    }

    /// Reduce a trial matrix to the model's summary statistic.
    pub fn summary_stats<'py>(
        &self, py: Python<'py>, data: &Bound<'py, PyAny>,
    ) -> PyResult<PyObject> {
        let trials = extract_trials(data)?;
        let stats = py.allow_threads(|| self.inner.summary_stats(trials.view()))?;
        summary_into_py(py, &stats)
    }

    /// Distance between two summaries returned by `summary_stats`.
    pub fn distance_function<'py>(
        &self, py: Python<'py>, a: &Bound<'py, PyAny>, b: &Bound<'py, PyAny>,
    ) -> PyResult<f64> {
        let a = extract_summary(py, a)?;
        let b = extract_summary(py, b)?;
        Ok(self.inner.distance_function(&a, &b)?)
    }

    /// Simulate at `theta` and return the distance to the observed summary.
    #[pyo3(signature = (theta, seed = None), text_signature = "(self, theta, /, seed=None)")]
    pub fn distance_to_observed<'py>(
        &self, py: Python<'py>, theta: &Bound<'py, PyAny>, seed: Option<u64>,
    ) -> PyResult<f64> {
        let theta = extract_vector(py, theta, "theta")?;
        let distance = py.allow_threads(|| {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            self.inner.distance_to_observed(theta.view(), &mut rng)
        })?;
        Ok(distance)
    }

    /// ABC acceptance rule `distance <= epsilon`.
    pub fn accepts(&self, distance: f64) -> bool {
        self.inner.accepts(distance)
    }

    /// Draw one theta from the prior.
    #[pyo3(signature = (seed = None), text_signature = "(self, /, seed=None)")]
    pub fn sample_prior(&self, seed: Option<u64>) -> Vec<f64> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.inner.prior().sample(&mut rng).to_vec()
    }

    /// Joint prior log-density at `theta`.
    pub fn prior_ln_pdf<'py>(&self, py: Python<'py>, theta: &Bound<'py, PyAny>) -> PyResult<f64> {
        let theta = extract_vector(py, theta, "theta")?;
        Ok(self.inner.prior().ln_pdf(theta.view())?)
    }

    #[getter]
    pub fn kind(&self) -> &'static str {
        match self.inner.kind() {
            ModelKind::OneTimescale => "one_timescale",
            ModelKind::OneTimescaleAndOsc => "one_timescale_and_osc",
            ModelKind::TwoTimescales => "two_timescales",
        }
    }

    #[getter]
    pub fn param_names(&self) -> Vec<&'static str> {
        self.inner.kind().param_names().to_vec()
    }

    #[getter]
    pub fn prior(&self) -> Vec<(&'static str, f64, f64)> {
        prior_to_tuples(self.inner.prior())
    }

    #[getter]
    pub fn epsilon(&self) -> f64 {
        self.inner.base().epsilon()
    }

    #[getter]
    pub fn dt(&self) -> f64 {
        self.inner.base().grid().dt
    }

    #[getter]
    pub fn duration(&self) -> f64 {
        self.inner.base().grid().duration
    }

    #[getter]
    pub fn n_time(&self) -> usize {
        self.inner.base().grid().n_time
    }

    #[getter]
    pub fn num_trials(&self) -> usize {
        self.inner.base().num_trials()
    }

    #[getter]
    pub fn data_mean(&self) -> f64 {
        self.inner.base().data_mean()
    }

    #[getter]
    pub fn data_var(&self) -> f64 {
        self.inner.base().data_var()
    }

    #[getter]
    pub fn n_lags(&self) -> Option<usize> {
        self.inner.base().n_lags()
    }

    #[getter]
    pub fn observed_summary(&self, py: Python<'_>) -> PyResult<PyObject> {
        summary_into_py(py, self.inner.observed_summary())
    }
}

/// _rust_timescales — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_timescales` Python module and register the `models`
/// submodule used by the public `rust_timescales` package.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
#[pyo3(name = "_rust_timescales")]
fn rust_timescales_py<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let models_mod = PyModule::new(_py, "models")?;
    models(_py, m, &models_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_timescales.models", models_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn models<'py>(
    _py: Python, rust_timescales: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyAbcModel>()?;
    rust_timescales.add_submodule(m)?;
    Ok(())
}
