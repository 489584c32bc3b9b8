//! Validation helpers for negative log-likelihood minimization.
//!
//! This module centralizes common consistency checks used across the
//! optimizer interface:
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_size`],
//!   [`verify_tol_cost`] ensure numeric tolerances are finite and strictly
//!   positive when provided; [`verify_linesearch_tol`] keeps the
//!   sufficient-decrease constant inside `(0, 1)`.
//! - **Step size**: [`verify_step_size`] guards the initial simplex edge.
//! - **Starting point**: [`validate_theta0`] checks length and finiteness.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Parameter estimates**: [`validate_theta_hat`] ensures a candidate
//!   `theta_hat` exists and contains only finite values.
//! - **Objective values**: [`validate_value`] rejects `NaN` but lets `+∞`
//!   through, since `+∞` marks infeasible parameters.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`OptError`] variants.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta},
};

/// Validate the optional gradient‐norm tolerance.
///
/// - Accepts `None` (the default tolerance applies).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional simplex-size tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolSize`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_size(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolSize { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolSize { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost‐change tolerance (for convergence).
///
/// - Accepts `None` (no stopping rule on cost change).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the line-search sufficient-decrease constant.
///
/// # Errors
/// Returns [`OptError::InvalidLineSearchTol`] unless `0 < tol < 1`.
pub fn verify_linesearch_tol(tol: f64) -> OptResult<()> {
    if !tol.is_finite() || tol <= 0.0 || tol >= 1.0 {
        return Err(OptError::InvalidLineSearchTol {
            tol,
            reason: "Line-search tolerance must lie strictly between 0 and 1.",
        });
    }
    Ok(())
}

/// Validate the initial simplex step.
///
/// # Errors
/// Returns [`OptError::InvalidStepSize`] if `step` is non-finite or ≤ 0.0.
pub fn verify_step_size(step: f64) -> OptResult<()> {
    if !step.is_finite() {
        return Err(OptError::InvalidStepSize { step, reason: "Step size must be finite." });
    }
    if step <= 0.0 {
        return Err(OptError::InvalidStepSize { step, reason: "Step size must be positive." });
    }
    Ok(())
}

/// Validate a starting point against the expected parameter count.
///
/// # Errors
/// - [`OptError::EmptyTheta`] if `theta0` has no entries.
/// - [`OptError::ThetaLengthMismatch`] if `theta0.len() != dim`.
/// - [`OptError::InvalidThetaInput`] for the first non-finite entry.
pub fn validate_theta0(theta0: &Theta, dim: usize) -> OptResult<()> {
    if theta0.is_empty() {
        return Err(OptError::EmptyTheta);
    }
    if theta0.len() != dim {
        return Err(OptError::ThetaLengthMismatch { expected: dim, actual: theta0.len() });
    }
    for (index, &value) in theta0.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// Checks:
/// - `grad.len() == dim`
/// - every element is finite (`NaN` or `±∞` are rejected)
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// Accepts only a present vector with all **finite** entries.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate an objective value.
///
/// `+∞` (infeasible) and `−∞` are passed through; only `NaN` is rejected.
///
/// # Errors
/// Returns [`OptError::NaNCost`] if the value is `NaN`.
pub fn validate_value(value: f64) -> OptResult<()> {
    if value.is_nan() {
        return Err(OptError::NaNCost);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Boundary handling of the tolerance and step validators.
    // - Starting-point and gradient shape/finiteness checks.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The line-search constant must be strictly inside (0, 1).
    //
    // Given
    // -----
    // - Values 0, 1, NaN and 1e-4.
    //
    // Expect
    // ------
    // - Only 1e-4 is accepted.
    fn linesearch_tol_bounds() {
        assert!(verify_linesearch_tol(0.0).is_err());
        assert!(verify_linesearch_tol(1.0).is_err());
        assert!(verify_linesearch_tol(f64::NAN).is_err());
        assert!(verify_linesearch_tol(1e-4).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Step sizes must be finite and positive.
    //
    // Given
    // -----
    // - Steps -0.1, +∞ and 0.01.
    //
    // Expect
    // ------
    // - Errors for the first two, success for 0.01.
    fn step_size_bounds() {
        assert!(matches!(verify_step_size(-0.1), Err(OptError::InvalidStepSize { .. })));
        assert!(matches!(verify_step_size(f64::INFINITY), Err(OptError::InvalidStepSize { .. })));
        assert!(verify_step_size(0.01).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Starting points are checked for emptiness, then length, then
    // finiteness.
    //
    // Given
    // -----
    // - An empty vector (even when 0 parameters are "expected").
    // - A length-1 vector where 2 is expected; a length-2 vector with NaN.
    //
    // Expect
    // ------
    // - `EmptyTheta`, `ThetaLengthMismatch`, then `InvalidThetaInput { index: 1 }`.
    fn theta0_length_and_finiteness() {
        assert_eq!(validate_theta0(&Theta::zeros(0), 0), Err(OptError::EmptyTheta));
        assert_eq!(validate_theta0(&Theta::zeros(0), 2), Err(OptError::EmptyTheta));
        assert_eq!(
            validate_theta0(&array![1.0], 2),
            Err(OptError::ThetaLengthMismatch { expected: 2, actual: 1 })
        );
        assert!(matches!(
            validate_theta0(&array![1.0, f64::NAN], 2),
            Err(OptError::InvalidThetaInput { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Gradients with the wrong length or non-finite entries are rejected.
    //
    // Given
    // -----
    // - A length-3 gradient for dim 2; a gradient holding `+∞`.
    //
    // Expect
    // ------
    // - `GradientDimMismatch` and `InvalidGradient` respectively.
    fn grad_validation() {
        assert!(matches!(
            validate_grad(&array![0.0, 0.0, 0.0], 2),
            Err(OptError::GradientDimMismatch { expected: 2, found: 3 })
        ));
        assert!(matches!(
            validate_grad(&array![0.0, f64::INFINITY], 2),
            Err(OptError::InvalidGradient { index: 1, .. })
        ));
    }
}
