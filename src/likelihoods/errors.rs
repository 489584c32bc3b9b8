//! Errors for the likelihood models (data validation, starting points and
//! domain checks).
//!
//! [`ModelError`] is raised by the model layer and lifted into
//! [`OptError`](crate::optimization::errors::OptError) when it crosses into
//! the optimizer. Both convert to a Python `ValueError` behind the
//! `python-bindings` feature.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Count buckets must be finite and non-negative; Probit outcomes must be
//!   exactly `0` or `1`.
//! - Parameters outside a model's domain are *not* an error for the value
//!   function (it returns `+∞`); they only become
//!   [`ModelError::OutsideDomain`] when a gradient is requested there.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

/// Result alias for model-layer operations that may produce [`ModelError`].
pub type ModelResult<T> = Result<T, ModelError>;

/// Unified error type for the likelihood models.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Input/data validation ----
    /// Data matrix has zero rows or zero columns.
    EmptyData { rows: usize, cols: usize },

    /// Data matrix is too narrow for the model layout.
    TooFewColumns { model: &'static str, required: usize, found: usize },

    /// Data matrix is too short for the model (e.g. OLS needs a variance).
    TooFewRows { model: &'static str, required: usize, found: usize },

    /// A data point is NaN/±inf.
    NonFiniteData { row: usize, col: usize, value: f64 },

    /// Probit outcome is not 0 or 1.
    InvalidOutcome { row: usize, value: f64 },

    /// A count bucket is negative.
    NegativeCount { row: usize, col: usize, value: f64 },

    // ---- Parameters ----
    /// Starting point has the wrong number of parameters.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Starting point entries must be finite.
    InvalidThetaInput { index: usize, value: f64 },

    /// Parameter lies outside the region where the gradient is defined.
    OutsideDomain { param: &'static str, value: f64 },

    // ---- Special functions ----
    /// `statrs` rejected a distribution configuration.
    SpecialFunction { text: String },
}

impl std::error::Error for ModelError {}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            ModelError::EmptyData { rows, cols } => {
                write!(f, "Data matrix is empty: {rows} rows x {cols} columns")
            }
            ModelError::TooFewColumns { model, required, found } => {
                write!(f, "{model} needs at least {required} data columns, found {found}")
            }
            ModelError::TooFewRows { model, required, found } => {
                write!(f, "{model} needs at least {required} data rows, found {found}")
            }
            ModelError::NonFiniteData { row, col, value } => {
                write!(f, "Non-finite data at ({row}, {col}): {value}")
            }
            ModelError::InvalidOutcome { row, value } => {
                write!(f, "Invalid binary outcome at row {row}: {value}, must be 0 or 1")
            }
            ModelError::NegativeCount { row, col, value } => {
                write!(f, "Negative count at ({row}, {col}): {value}")
            }

            // ---- Parameters ----
            ModelError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            ModelError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            ModelError::OutsideDomain { param, value } => {
                write!(f, "Parameter {param} = {value} is outside the model domain")
            }

            // ---- Special functions ----
            ModelError::SpecialFunction { text } => {
                write!(f, "Special function error: {text}")
            }
        }
    }
}

/// Convert a [`ModelError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<ModelError> for PyErr {
    fn from(err: ModelError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
