//! Python-boundary helpers: array extraction and option parsing.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! is used by the `#[pyfunction]` wrappers in the crate root.
#[cfg(feature = "python-bindings")]
use ndarray::Array2;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::optimization::loglik_optimizer::{LineSearcher, MLEOptions, Method, Tolerances};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
    PyReadonlyArray2,
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
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a 2-D array-like (ndarray, DataFrame, or list of rows) into an
/// owned row-major matrix.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix(raw_data: &Bound<'_, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or sequence of float64 rows",
        )
    })?;
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != n_cols) {
        return Err(PyValueError::new_err("all rows of data must have the same length"));
    }
    Array2::from_shape_vec((n_rows, n_cols), rows.into_iter().flatten().collect())
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Copy an optional 1-D starting point into a `Vec<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_start<'py>(
    py: Python<'py>, start: Option<&Bound<'py, PyAny>>,
) -> PyResult<Option<Vec<f64>>> {
    let Some(raw) = start else {
        return Ok(None);
    };
    let arr = extract_f64_array(py, raw)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err("start must be a 1-D contiguous float64 array or sequence")
    })?;
    Ok(Some(slice.to_vec()))
}

/// Build [`MLEOptions`] from the keyword arguments of the `*_with`
/// Python functions. Unset fields take the Rust defaults.
#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn extract_mle_opts(
    method: Option<&str>, line_searcher: Option<&str>, tol_grad: Option<f64>,
    tol_size: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    step_size: Option<f64>, verbose: bool, lbfgs_mem: Option<usize>,
) -> PyResult<MLEOptions> {
    use std::str::FromStr;

    let defaults = MLEOptions::default();
    let defaults_tols = Tolerances::default();

    // Tolerances::new -> OptResult<Tolerances> -> PyErr
    let tols = Tolerances::new(
        tol_grad.or(defaults_tols.tol_grad),
        tol_size.or(defaults_tols.tol_size),
        tol_cost,
        max_iter.or(defaults_tols.max_iter),
    )?;

    let method = match method {
        Some(name) => Method::from_str(name)?,
        None => defaults.method,
    };
    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name)?,
        None => defaults.line_searcher,
    };

    let opts = MLEOptions::new(
        tols,
        method,
        ls,
        defaults.linesearch_tol,
        step_size.unwrap_or(defaults.step_size),
        verbose,
        lbfgs_mem,
    )?;

    Ok(opts)
}
