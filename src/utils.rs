//! Conversions between Python objects and the Rust model types.
//!
//! Every helper accepts the loose inputs Python users pass around (numpy
//! arrays, pandas objects exposing `to_numpy`, nested sequences) and returns
//! owned `ndarray` containers or validated option structs. Errors are raised
//! as `TypeError` for unusable input types and `ValueError` for bad values.
#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::{PyAny, PyTuple},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Array → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
    PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
use crate::timescales::{
    core::data::trials_from_rows,
    core::options::{DistanceKind, ModelOptions, SummaryChoice},
    models::PriorSource,
    priors::{ParamPrior, Prior},
    summary::SummaryStats,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Owned 1-D vector (theta, summary values) from any 1-D array-like.
#[cfg(feature = "python-bindings")]
pub fn extract_vector<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>, what: &str,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{what} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(Array1::from(slice.to_vec()))
}

/// Owned trial matrix `(num_trials × n_time)` from a 2-D array-like.
///
/// Accepts a 2-D float64 ndarray, anything with `to_numpy()` (e.g. a
/// DataFrame), or a rectangular sequence of sequences.
#[cfg(feature = "python-bindings")]
pub fn extract_trials<'py>(raw: &Bound<'py, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr.as_array().to_owned());
    }

    if let Ok(obj) = raw.call_method("to_numpy", (false,), None) {
        if let Ok(arr) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(arr.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected a 2-D numpy.ndarray, DataFrame, or nested sequence of float64")
    })?;
    Ok(trials_from_rows(rows)?)
}

/// Prior from either the string `"informed"` or a sequence of
/// `(family, a, b)` tuples where family is `"normal"` (mean, std) or
/// `"uniform"` (low, high).
#[cfg(feature = "python-bindings")]
pub fn extract_prior<'py>(raw: &Bound<'py, PyAny>) -> PyResult<PriorSource> {
    if let Ok(selector) = raw.extract::<String>() {
        return match selector.to_lowercase().as_str() {
            "informed" => Ok(PriorSource::Informed),
            other => Err(PyValueError::new_err(format!(
                "invalid prior selector {other:?} (expected 'informed' or a list of (family, a, b))"
            ))),
        };
    }

    let specs: Vec<(String, f64, f64)> = raw.extract().map_err(|_| {
        PyTypeError::new_err("prior must be 'informed' or a sequence of (family, a, b) tuples")
    })?;
    let components = specs
        .into_iter()
        .map(|(family, a, b)| match family.to_lowercase().as_str() {
            "normal" | "gaussian" => Ok(ParamPrior::normal(a, b)?),
            "uniform" => Ok(ParamPrior::uniform(a, b)?),
            other => Err(PyValueError::new_err(format!(
                "invalid prior family {other:?} (expected 'normal' or 'uniform')"
            ))),
        })
        .collect::<PyResult<Vec<_>>>()?;
    Ok(PriorSource::Explicit(Prior::new(components)))
}

/// `(family, a, b)` tuples describing a prior, mirroring [`extract_prior`].
#[cfg(feature = "python-bindings")]
pub fn prior_to_tuples(prior: &Prior) -> Vec<(&'static str, f64, f64)> {
    prior
        .components()
        .iter()
        .map(|c| match c {
            ParamPrior::Normal { mean, std_dev, .. } => ("normal", *mean, *std_dev),
            ParamPrior::Uniform { min, max, .. } => ("uniform", *min, *max),
        })
        .collect()
}

/// Model options from keyword arguments.
///
/// `summary` is `"autocorrelation"` or `"psd"`; `n_lags` alone implies
/// autocorrelation. `distance` is `"linear"` or `"logarithmic"`. A missing
/// lag count is left for the model to resolve against its grid.
#[cfg(feature = "python-bindings")]
pub fn extract_model_options(
    num_trials: Option<usize>, summary: Option<&str>, n_lags: Option<usize>,
    distance: Option<&str>,
) -> PyResult<ModelOptions> {
    let summary = match (summary, n_lags) {
        (None, None) => None,
        (None, Some(n_lags)) => Some(SummaryChoice::Autocorrelation { n_lags: Some(n_lags) }),
        (Some(name), n_lags) => match (name.parse::<SummaryChoice>()?, n_lags) {
            (SummaryChoice::PowerSpectrum, Some(_)) => {
                return Err(PyValueError::new_err(
                    "n_lags only applies to summary='autocorrelation'",
                ));
            }
            (SummaryChoice::Autocorrelation { .. }, n_lags) => {
                Some(SummaryChoice::Autocorrelation { n_lags })
            }
            (choice, None) => Some(choice),
        },
    };
    let distance = distance.map(str::parse::<DistanceKind>).transpose()?;

    Ok(ModelOptions::new(num_trials, summary, distance))
}

/// Summary statistic from Python: a 1-D array is an autocorrelation, a
/// `(psd, freqs)` pair is a power spectrum.
#[cfg(feature = "python-bindings")]
pub fn extract_summary<'py>(py: Python<'py>, raw: &Bound<'py, PyAny>) -> PyResult<SummaryStats> {
    if let Ok(pair) = raw.downcast::<PyTuple>() {
        if pair.len() != 2 {
            return Err(PyValueError::new_err("a spectral summary must be a (psd, freqs) pair"));
        }
        let psd = extract_vector(py, &pair.get_item(0)?, "psd")?;
        let freqs = extract_vector(py, &pair.get_item(1)?, "freqs")?;
        if psd.len() != freqs.len() {
            return Err(PyValueError::new_err("psd and freqs must have the same length"));
        }
        return Ok(SummaryStats::PowerSpectrum { psd, freqs });
    }
    Ok(SummaryStats::Autocorrelation(extract_vector(py, raw, "autocorrelation")?))
}

/// Inverse of [`extract_summary`].
#[cfg(feature = "python-bindings")]
pub fn summary_into_py(py: Python<'_>, stats: &SummaryStats) -> PyResult<PyObject> {
    match stats {
        SummaryStats::Autocorrelation(ac) => Ok(ac.clone().into_pyarray(py).into_any().unbind()),
        SummaryStats::PowerSpectrum { psd, freqs } => {
            let items =
                [psd.clone().into_pyarray(py).into_any(), freqs.clone().into_pyarray(py).into_any()];
            Ok(PyTuple::new(py, items)?.into_any().unbind())
        }
    }
}
