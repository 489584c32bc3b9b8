//! Linear regression under normally distributed errors.
//!
//! Purpose
//! -------
//! Negative log-likelihood of a linear model with an intercept. With
//! `θ = [θ_0, θ_1, …, θ_p]` and regressors in columns `1..=p`:
//!
//! `e_i = θ_0 + Σ_{j ≥ 1} θ_j x_ij − y_i`
//!
//! `NLL(θ) = −Σ_i ln φ_σ(e_i)`, with `σ` the sample standard deviation of
//! the residuals (denominator `n − 1`).
//!
//! Key behaviors
//! -------------
//! - No analytic gradient: gradient requests fall back to finite
//!   differences in the optimizer.
//! - A degenerate residual spread (`σ` zero or non-finite) returns `+∞`.
//! - Column 0 doubles as the intercept slot: its value is the outcome `y`,
//!   and `θ_0` multiplies an implicit constant `1`.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least two rows, so `σ` is defined.
//! - The minimizer is the least-squares fit.
use crate::{
    likelihoods::{
        core::{normal_ln_pdf, validate_matrix},
        errors::ModelResult,
        models::{ModelFamily, expect_len},
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Cost, NegLogLikelihood, Theta},
    },
};
use ndarray::{Array1, Array2, s};

/// OLS negative log-likelihood over `θ` with one entry per data column.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ols;

impl Ols {
    pub fn new() -> Self {
        Self
    }

    /// Residuals `e = θ_0 + X θ_{1..} − y`.
    ///
    /// # Panics
    /// If `θ` does not have one entry per data column.
    pub fn residuals(theta: &Theta, data: &Array2<f64>) -> Array1<f64> {
        let fitted = data.slice(s![.., 1..]).dot(&theta.slice(s![1..])) + theta[0];
        fitted - &data.column(0)
    }

    /// Residuals and their spread, or `None` when `σ` is degenerate.
    fn residuals_and_sigma(theta: &Theta, data: &Array2<f64>) -> Option<(Array1<f64>, f64)> {
        let errors = Self::residuals(theta, data);
        let sigma = errors.std(1.0);
        if sigma.is_finite() && sigma > 0.0 { Some((errors, sigma)) } else { None }
    }
}

impl ModelFamily for Ols {
    const NAME: &'static str = "ols";

    fn n_params(&self, data: &Array2<f64>) -> usize {
        data.ncols()
    }

    fn validate_data(&self, data: &Array2<f64>) -> ModelResult<()> {
        validate_matrix(data, Self::NAME, 1, 2)
    }

    fn row_values(&self, theta: &Theta, data: &Array2<f64>) -> OptResult<Array1<f64>> {
        expect_len(theta, self.n_params(data))?;
        let Some((errors, sigma)) = Self::residuals_and_sigma(theta, data) else {
            return Ok(Array1::from_elem(data.nrows(), f64::INFINITY));
        };
        let mut out = Array1::zeros(errors.len());
        for (slot, &e) in out.iter_mut().zip(errors.iter()) {
            *slot = -normal_ln_pdf(e, sigma)?;
        }
        Ok(out)
    }
}

impl NegLogLikelihood for Ols {
    type Data = Array2<f64>;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        expect_len(theta, self.n_params(data))?;
        let Some((errors, sigma)) = Self::residuals_and_sigma(theta, data) else {
            return Ok(f64::INFINITY);
        };
        let mut total = 0.0;
        for &e in errors.iter() {
            total += normal_ln_pdf(e, sigma)?;
        }
        Ok(-total)
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        Ok(self.validate(theta, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The value against the closed-form normal log density.
    // - The degenerate-σ guard.
    // - Per-row contributions summing to the total.
    // - The missing analytic gradient.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Reproduce `NLL = n ln σ + Σ e²/(2σ²) + (n/2) ln 2π` by hand.
    //
    // Given
    // -----
    // - y = [1, 3, 2, 5], x = [0, 1, 2, 3], θ = [0.5, 1].
    //
    // Expect
    // ------
    // - Agreement to 1e-12.
    fn value_matches_closed_form() {
        // Arrange
        let data = array![[1.0, 0.0], [3.0, 1.0], [2.0, 2.0], [5.0, 3.0]];
        let theta = array![0.5, 1.0];
        let errors = [-0.5, -1.5, 0.5, -1.5];
        let n = errors.len() as f64;
        let mean = errors.iter().sum::<f64>() / n;
        let var = errors.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let sigma = var.sqrt();
        let expected = n * sigma.ln()
            + errors.iter().map(|e| e * e).sum::<f64>() / (2.0 * var)
            + 0.5 * n * (2.0 * std::f64::consts::PI).ln();

        // Act
        let v = Ols.value(&theta, &data).unwrap();

        // Assert
        assert_eq!(Ols::residuals(&theta, &data).to_vec(), errors.to_vec());
        assert_relative_eq!(v, expected, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A perfect fit has zero residual spread, which is treated as infeasible.
    //
    // Given
    // -----
    // - y = 1 + 2x exactly and θ = [1, 2].
    //
    // Expect
    // ------
    // - `+∞` for the value and every row.
    fn perfect_fit_is_infeasible() {
        let data = array![[1.0, 0.0], [3.0, 1.0], [5.0, 2.0]];
        let theta = array![1.0, 2.0];

        assert_eq!(Ols.value(&theta, &data).unwrap(), f64::INFINITY);
        assert!(Ols.row_values(&theta, &data).unwrap().iter().all(|v| *v == f64::INFINITY));
    }

    #[test]
    // Purpose
    // -------
    // Row contributions share the sample σ and add up to the total.
    //
    // Given
    // -----
    // - The data from the closed-form test.
    //
    // Expect
    // ------
    // - Σ rows = value.
    fn row_values_sum_to_total() {
        let data = array![[1.0, 0.0], [3.0, 1.0], [2.0, 2.0], [5.0, 3.0]];
        let theta = array![0.2, 1.1];

        let rows = Ols.row_values(&theta, &data).unwrap();

        assert_eq!(rows.len(), 4);
        assert_relative_eq!(rows.sum(), Ols.value(&theta, &data).unwrap(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // OLS has no analytic gradient and one row is too few.
    //
    // Given
    // -----
    // - A valid θ; a single-row data matrix.
    //
    // Expect
    // ------
    // - `GradientNotImplemented`; `TooFewRows` from `check`.
    fn no_gradient_and_row_minimum() {
        let data = array![[1.0, 0.0], [3.0, 1.0]];
        assert!(matches!(
            Ols.grad(&array![0.0, 0.0], &data),
            Err(OptError::GradientNotImplemented)
        ));
        assert!(matches!(
            Ols.check(&array![0.0, 0.0], &array![[1.0, 0.0]]),
            Err(OptError::TooFewRows { required: 2, found: 1, .. })
        ));
    }
}
