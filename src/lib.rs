//! rust_mle — maximum-likelihood estimation of discrete-choice and
//! link-count models, with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the estimation entry points to Python via the `_rust_mle`
//! extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules: `likelihoods` (Probit, Waring, Yule,
//!   Zipf and OLS negative log-likelihoods plus the `mle_*` entry points)
//!   and `optimization` (the simplex and quasi-Newton minimizer).
//! - Define the `MLEResult` `#[pyclass]`, the `mle_*` `#[pyfunction]`s and
//!   the `#[pymodule]` initializer when `python-bindings` is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion and error mapping.
//! - Python-visible results mirror [`OptimOutcome`](crate::optimization::loglik_optimizer::OptimOutcome)
//!   field for field.
//!
//! Conventions
//! -----------
//! - Data are 2-D, one row per observation; see `likelihoods::models` for
//!   each family's column layout.
//! - Errors from core Rust code are converted to Python `ValueError`s at
//!   the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Rust callers use `likelihoods::estimate::mle_*` or
//!   `optimization::loglik_optimizer::minimize` directly and can ignore the
//!   PyO3 items.
//! - The Python packaging layer imports `_rust_mle` and re-exports its
//!   functions.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   the integration test in `tests/`.

pub mod likelihoods;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    likelihoods::{
        estimate::{estimate, row_neg_log_likelihoods as row_nlls},
        models::{ModelFamily, Ols, Probit, Waring, Yule, Zipf},
    },
    optimization::loglik_optimizer::{OptimOutcome, Theta},
    utils::{extract_f64_matrix, extract_mle_opts, extract_start},
};

/// MLEResult — Python-facing view of an estimation outcome.
///
/// Purpose
/// -------
/// Expose the fitted parameters and optimizer diagnostics of an
/// [`OptimOutcome`] as read-only Python properties.
///
/// Fields
/// ------
/// - `inner`: [`OptimOutcome`]
///   Full optimizer result of the estimation call.
///
/// Notes
/// -----
/// - Instances are returned by the `mle_*` functions and are not created
///   directly by user code.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_mle")]
pub struct MLEResult {
    pub inner: OptimOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl MLEResult {
    #[getter]
    pub fn theta_hat(&self) -> Vec<f64> {
        self.inner.theta_hat.to_vec()
    }

    #[getter]
    pub fn neg_log_likelihood(&self) -> f64 {
        self.inner.neg_log_likelihood
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.status()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    pub fn metric(&self) -> Option<f64> {
        self.inner.metric
    }

    #[getter]
    pub fn fn_evals(&self) -> Vec<(String, u64)> {
        self.inner.fn_evals.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "MLEResult(theta_hat={:?}, neg_log_likelihood={}, converged={}, status={:?})",
            self.inner.theta_hat.to_vec(),
            self.inner.neg_log_likelihood,
            self.inner.converged,
            self.inner.status(),
        )
    }
}

/// Shared body of the `mle_*` Python functions.
#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
fn fit_family<'py, M: ModelFamily>(
    py: Python<'py>, model: &M, raw_data: &Bound<'py, PyAny>, start: Option<&Bound<'py, PyAny>>,
    default_method: &str, method: Option<&str>, step_size: f64, verbose: bool,
    line_searcher: Option<&str>, tol_grad: Option<f64>, tol_size: Option<f64>,
    tol_cost: Option<f64>, max_iter: Option<usize>, lbfgs_mem: Option<usize>,
) -> PyResult<MLEResult> {
    let data = extract_f64_matrix(raw_data)?;
    let start = extract_start(py, start)?;
    let opts = extract_mle_opts(
        Some(method.unwrap_or(default_method)),
        line_searcher,
        tol_grad,
        tol_size,
        tol_cost,
        max_iter,
        Some(step_size),
        verbose,
        lbfgs_mem,
    )?;
    let outcome = estimate(model, &data, start.as_deref(), &opts)?;
    Ok(MLEResult { inner: outcome })
}

/// Probit MLE. Column 0 of `data` is the 0/1 outcome, the rest covariates.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (
    data, start=None, step_size=0.01, verbose=false, method=None, line_searcher=None,
    tol_grad=None, tol_size=None, tol_cost=None, max_iter=None, lbfgs_mem=None
))]
#[allow(clippy::too_many_arguments)]
fn mle_probit<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, start: Option<&Bound<'py, PyAny>>, step_size: f64,
    verbose: bool, method: Option<&str>, line_searcher: Option<&str>, tol_grad: Option<f64>,
    tol_size: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    lbfgs_mem: Option<usize>,
) -> PyResult<MLEResult> {
    let model = Probit::new()?;
    fit_family(
        py, &model, data, start, "quasi-newton", method, step_size, verbose, line_searcher,
        tol_grad, tol_size, tol_cost, max_iter, lbfgs_mem,
    )
}

/// Waring MLE over `[b, a]`. Column k ≥ 1 of `data` holds counts with k links.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (
    data, start=None, step_size=0.01, verbose=false, method=None, line_searcher=None,
    tol_grad=None, tol_size=None, tol_cost=None, max_iter=None, lbfgs_mem=None
))]
#[allow(clippy::too_many_arguments)]
fn mle_waring<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, start: Option<&Bound<'py, PyAny>>, step_size: f64,
    verbose: bool, method: Option<&str>, line_searcher: Option<&str>, tol_grad: Option<f64>,
    tol_size: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    lbfgs_mem: Option<usize>,
) -> PyResult<MLEResult> {
    fit_family(
        py, &Waring::new(), data, start, "quasi-newton", method, step_size, verbose,
        line_searcher, tol_grad, tol_size, tol_cost, max_iter, lbfgs_mem,
    )
}

/// Yule MLE over `[b]`. Same data layout as Waring.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (
    data, start=None, step_size=0.01, verbose=false, method=None, line_searcher=None,
    tol_grad=None, tol_size=None, tol_cost=None, max_iter=None, lbfgs_mem=None
))]
#[allow(clippy::too_many_arguments)]
fn mle_yule<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, start: Option<&Bound<'py, PyAny>>, step_size: f64,
    verbose: bool, method: Option<&str>, line_searcher: Option<&str>, tol_grad: Option<f64>,
    tol_size: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    lbfgs_mem: Option<usize>,
) -> PyResult<MLEResult> {
    fit_family(
        py, &Yule::new(), data, start, "quasi-newton", method, step_size, verbose, line_searcher,
        tol_grad, tol_size, tol_cost, max_iter, lbfgs_mem,
    )
}

/// Zipf MLE over `[C]`. Column k ≥ 0 of `data` holds counts at rank k.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (
    data, start=None, step_size=0.01, verbose=false, method=None, line_searcher=None,
    tol_grad=None, tol_size=None, tol_cost=None, max_iter=None, lbfgs_mem=None
))]
#[allow(clippy::too_many_arguments)]
fn mle_zipf<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, start: Option<&Bound<'py, PyAny>>, step_size: f64,
    verbose: bool, method: Option<&str>, line_searcher: Option<&str>, tol_grad: Option<f64>,
    tol_size: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    lbfgs_mem: Option<usize>,
) -> PyResult<MLEResult> {
    fit_family(
        py, &Zipf::new(), data, start, "quasi-newton", method, step_size, verbose, line_searcher,
        tol_grad, tol_size, tol_cost, max_iter, lbfgs_mem,
    )
}

/// OLS by maximum likelihood. Column 0 of `data` is the dependent variable.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (
    data, start=None, step_size=1.0, verbose=false, method=None, line_searcher=None,
    tol_grad=None, tol_size=None, tol_cost=None, max_iter=None, lbfgs_mem=None
))]
#[allow(clippy::too_many_arguments)]
fn mle_ols<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, start: Option<&Bound<'py, PyAny>>, step_size: f64,
    verbose: bool, method: Option<&str>, line_searcher: Option<&str>, tol_grad: Option<f64>,
    tol_size: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    lbfgs_mem: Option<usize>,
) -> PyResult<MLEResult> {
    fit_family(
        py, &Ols::new(), data, start, "simplex", method, step_size, verbose, line_searcher,
        tol_grad, tol_size, tol_cost, max_iter, lbfgs_mem,
    )
}

/// Per-observation negative log-likelihood of `model` at `theta`.
///
/// `model` is one of `"probit"`, `"waring"`, `"yule"`, `"zipf"`, `"ols"`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (model, theta, data))]
fn row_neg_log_likelihoods<'py>(
    py: Python<'py>, model: &str, theta: &Bound<'py, PyAny>, data: &Bound<'py, PyAny>,
) -> PyResult<Vec<f64>> {
    let data = extract_f64_matrix(data)?;
    let theta = extract_start(py, Some(theta))?.map(Theta::from).unwrap_or_default();
    let rows = match model.to_lowercase().as_str() {
        "probit" => row_nlls(&Probit::new()?, &theta, &data)?,
        "waring" => row_nlls(&Waring::new(), &theta, &data)?,
        "yule" => row_nlls(&Yule::new(), &theta, &data)?,
        "zipf" => row_nlls(&Zipf::new(), &theta, &data)?,
        "ols" => row_nlls(&Ols::new(), &theta, &data)?,
        other => {
            return Err(PyValueError::new_err(format!(
                "invalid model {:?} (expected 'probit', 'waring', 'yule', 'zipf', or 'ols')",
                other
            )));
        }
    };
    Ok(rows.to_vec())
}

/// _rust_mle — PyO3 module initializer for the Python extension.
///
/// Registers the `MLEResult` class and the estimation functions. Invoked by
/// Python when importing the compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_mle<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<MLEResult>()?;
    m.add_function(wrap_pyfunction!(mle_probit, m)?)?;
    m.add_function(wrap_pyfunction!(mle_waring, m)?)?;
    m.add_function(wrap_pyfunction!(mle_yule, m)?)?;
    m.add_function(wrap_pyfunction!(mle_zipf, m)?)?;
    m.add_function(wrap_pyfunction!(mle_ols, m)?)?;
    m.add_function(wrap_pyfunction!(row_neg_log_likelihoods, m)?)?;
    Ok(())
}
