//! optimization::errors — unified error surface for the MLE stack.
//!
//! Every fallible entry point in the optimizer and in the model layer
//! reports through [`OptError`]. Backend errors raised by `argmin` are
//! downcast into dedicated variants; model/data errors arrive through
//! `From<ModelError>`.
//!
//! Note that an objective value of `+∞` is *not* an error: models use it to
//! mark parameters outside their domain, and the solvers steer away from it.
use argmin::core::{ArgminError, Error};
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::likelihoods::errors::ModelError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Gradient requested at a point where the objective is `+∞`.
    OutsideDomain {
        param: &'static str,
        value: f64,
    },

    // ---- MLEOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Simplex size tolerance needs to be positive and finite.
    InvalidTolSize {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Line-search sufficient decrease parameter must lie in (0, 1).
    InvalidLineSearchTol {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// Initial simplex step must be finite and positive.
    InvalidStepSize {
        step: f64,
        reason: &'static str,
    },

    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// Invalid minimization method name.
    InvalidMethod {
        name: String,
        reason: &'static str,
    },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Cost function ----
    /// Cost function returned NaN.
    NaNCost,

    // ---- Starting point ----
    /// Starting point has no entries.
    EmptyTheta,
    /// Starting point length differs from the model's parameter count.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },
    /// Starting point must have finite values.
    InvalidThetaInput {
        index: usize,
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Theta hat is missing
    MissingThetaHat,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Model / data errors ----
    /// Data matrix has no rows or no columns.
    EmptyData {
        rows: usize,
        cols: usize,
    },
    /// Data matrix has fewer columns than the model needs.
    TooFewColumns {
        model: &'static str,
        required: usize,
        found: usize,
    },
    /// Data matrix has fewer rows than the model needs.
    TooFewRows {
        model: &'static str,
        required: usize,
        found: usize,
    },
    /// A data entry is NaN/±inf.
    NonFiniteData {
        row: usize,
        col: usize,
        value: f64,
    },
    /// Binary outcome column holds something other than 0 or 1.
    InvalidOutcome {
        row: usize,
        value: f64,
    },
    /// Count buckets must be non-negative.
    NegativeCount {
        row: usize,
        col: usize,
        value: f64,
    },
    /// Special-function provider rejected its configuration.
    SpecialFunction {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }
            OptError::OutsideDomain { param, value } => {
                write!(f, "Gradient undefined: parameter {param} = {value} is outside the model domain")
            }

            // ---- MLEOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolSize { tol, reason } => {
                write!(f, "Invalid simplex size tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidLineSearchTol { tol, reason } => {
                write!(f, "Invalid line-search tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidStepSize { step, reason } => {
                write!(f, "Invalid step size {step}: {reason}")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidMethod { name, reason } => {
                write!(f, "Invalid minimization method '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Cost function ----
            OptError::NaNCost => {
                write!(f, "Cost function returned NaN")
            }

            // ---- Starting point ----
            OptError::EmptyTheta => {
                write!(f, "Starting point must have at least one parameter")
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Model / data errors ----
            OptError::EmptyData { rows, cols } => {
                write!(f, "Data matrix is empty: {rows} rows x {cols} columns")
            }
            OptError::TooFewColumns { model, required, found } => {
                write!(f, "{model} needs at least {required} data columns, found {found}")
            }
            OptError::TooFewRows { model, required, found } => {
                write!(f, "{model} needs at least {required} data rows, found {found}")
            }
            OptError::NonFiniteData { row, col, value } => {
                write!(f, "Non-finite data at ({row}, {col}): {value}")
            }
            OptError::InvalidOutcome { row, value } => {
                write!(f, "Invalid binary outcome at row {row}: {value}, must be 0 or 1")
            }
            OptError::NegativeCount { row, col, value } => {
                write!(f, "Negative count at ({row}, {col}): {value}")
            }
            OptError::SpecialFunction { text } => {
                write!(f, "Special function error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<ModelError> for OptError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::EmptyData { rows, cols } => OptError::EmptyData { rows, cols },
            ModelError::TooFewColumns { model, required, found } => {
                OptError::TooFewColumns { model, required, found }
            }
            ModelError::TooFewRows { model, required, found } => {
                OptError::TooFewRows { model, required, found }
            }
            ModelError::NonFiniteData { row, col, value } => {
                OptError::NonFiniteData { row, col, value }
            }
            ModelError::InvalidOutcome { row, value } => OptError::InvalidOutcome { row, value },
            ModelError::NegativeCount { row, col, value } => {
                OptError::NegativeCount { row, col, value }
            }
            ModelError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            ModelError::InvalidThetaInput { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
            ModelError::OutsideDomain { param, value } => OptError::OutsideDomain { param, value },
            ModelError::SpecialFunction { text } => OptError::SpecialFunction { text },
        }
    }
}

/// Convert an [`OptError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<OptError> for PyErr {
    fn from(err: OptError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
