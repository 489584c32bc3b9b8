//! Data-matrix and starting-point validation for the likelihood models.
//!
//! Purpose
//! -------
//! Check caller-supplied inputs once, at the boundary, so the model
//! evaluators can assume a well-formed matrix and parameter vector.
//!
//! Key behaviors
//! -------------
//! - [`validate_matrix`]: non-empty, wide and long enough, all finite.
//! - [`validate_binary_outcome`]: Probit outcome column holds only 0 or 1.
//! - [`validate_counts`]: count buckets are non-negative.
//! - [`validate_theta`]: parameter vector has the expected length and
//!   finite entries.
//!
//! Conventions
//! -----------
//! - Rows are observations, columns are variables or count buckets.
//! - Indices in errors are 0-based.
use crate::likelihoods::errors::{ModelError, ModelResult};
use ndarray::{Array2, ArrayView1};

/// Validate the overall shape and finiteness of a data matrix.
///
/// # Errors
/// - [`ModelError::EmptyData`] if there are no rows or no columns.
/// - [`ModelError::TooFewColumns`] / [`ModelError::TooFewRows`] when the
///   matrix is smaller than `min_cols` × `min_rows`.
/// - [`ModelError::NonFiniteData`] for the first NaN/±∞ entry.
pub fn validate_matrix(
    data: &Array2<f64>, model: &'static str, min_cols: usize, min_rows: usize,
) -> ModelResult<()> {
    let (rows, cols) = data.dim();
    if rows == 0 || cols == 0 {
        return Err(ModelError::EmptyData { rows, cols });
    }
    if cols < min_cols {
        return Err(ModelError::TooFewColumns { model, required: min_cols, found: cols });
    }
    if rows < min_rows {
        return Err(ModelError::TooFewRows { model, required: min_rows, found: rows });
    }
    for ((row, col), &value) in data.indexed_iter() {
        if !value.is_finite() {
            return Err(ModelError::NonFiniteData { row, col, value });
        }
    }
    Ok(())
}

/// Validate that column 0 holds only `0.0` or `1.0`.
///
/// # Errors
/// [`ModelError::InvalidOutcome`] for the first other value.
pub fn validate_binary_outcome(data: &Array2<f64>) -> ModelResult<()> {
    for (row, &value) in data.column(0).iter().enumerate() {
        if value != 0.0 && value != 1.0 {
            return Err(ModelError::InvalidOutcome { row, value });
        }
    }
    Ok(())
}

/// Validate that every count bucket from `first_col` on is non-negative.
///
/// # Errors
/// [`ModelError::NegativeCount`] for the first negative entry.
pub fn validate_counts(data: &Array2<f64>, first_col: usize) -> ModelResult<()> {
    for ((row, col), &value) in data.indexed_iter() {
        if col >= first_col && value < 0.0 {
            return Err(ModelError::NegativeCount { row, col, value });
        }
    }
    Ok(())
}

/// Validate a parameter vector against the model's parameter count.
///
/// # Errors
/// - [`ModelError::ThetaLengthMismatch`] if `theta.len() != expected`.
/// - [`ModelError::InvalidThetaInput`] for the first non-finite entry.
pub fn validate_theta(theta: ArrayView1<f64>, expected: usize) -> ModelResult<()> {
    if theta.len() != expected {
        return Err(ModelError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(ModelError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}
