//! Probit model for a binary outcome.
//!
//! Purpose
//! -------
//! Negative log-likelihood and gradient of the probit model with linear
//! predictor `η_i = Σ_j θ_j x_ij`:
//!
//! `NLL(θ) = −Σ_{y_i = 0} ln Φ(η_i) − Σ_{y_i = 1} ln(1 − Φ(η_i))`
//!
//! `∂NLL/∂θ_j = −Σ_{y_i = 0} x_ij φ(η_i)/Φ(η_i) − Σ_{y_i = 1} x_ij φ(η_i)/(Φ(η_i) − 1)`
//!
//! Key behaviors
//! -------------
//! - `1 − Φ(η)` is evaluated as `Φ(−η)` to keep the upper tail accurate.
//! - `ln Φ` and `φ/Φ` come from the tail-safe [`StdNormal`] helpers, so
//!   value and gradient stay finite however far a line search overshoots.
//! - The linear predictor lives in a per-call [`ProbitScratch`] buffer.
//!   `value_and_grad` fills it once and uses it for both quantities, so
//!   concurrent or repeated estimations never share predictor state.
//! - The model is unconstrained: there is no domain guard, and every finite
//!   `θ` has a finite value and gradient.
//!
//! Conventions
//! -----------
//! - Column 0 is the outcome, columns `1..` the covariates; `θ` has one
//!   entry per covariate (include a constant column for an intercept).
use crate::{
    likelihoods::{
        core::{StdNormal, validate_binary_outcome, validate_matrix},
        errors::ModelResult,
        models::{ModelFamily, expect_len},
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Cost, Grad, NegLogLikelihood, Theta},
    },
};
use ndarray::{Array1, Array2, s};

/// Linear predictor `η = X θ`, one entry per observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbitScratch {
    pub eta: Array1<f64>,
}

impl ProbitScratch {
    /// Compute `η = X θ` with `X = data[.., 1..]`.
    ///
    /// # Panics
    /// If `θ` does not have one entry per covariate column.
    pub fn compute(theta: &Theta, data: &Array2<f64>) -> Self {
        Self { eta: data.slice(s![.., 1..]).dot(theta) }
    }
}

/// Probit negative log-likelihood.
#[derive(Debug, Clone, Copy)]
pub struct Probit {
    normal: StdNormal,
}

impl Probit {
    pub fn new() -> ModelResult<Self> {
        Ok(Self { normal: StdNormal::new()? })
    }

    /// `NLL` from a filled predictor buffer.
    pub fn value_from(&self, scratch: &ProbitScratch, data: &Array2<f64>) -> Cost {
        let mut total = 0.0;
        for (&y, &eta) in data.column(0).iter().zip(scratch.eta.iter()) {
            total += if y == 0.0 { self.normal.ln_cdf(eta) } else { self.normal.ln_cdf(-eta) };
        }
        -total
    }

    /// Gradient from a filled predictor buffer.
    pub fn grad_from(&self, scratch: &ProbitScratch, data: &Array2<f64>) -> Grad {
        let mut grad = Array1::zeros(data.ncols() - 1);
        for (row, &eta) in data.rows().into_iter().zip(scratch.eta.iter()) {
            // φ/Φ for y = 0, φ/(Φ − 1) = −φ(−η)/Φ(−η) for y = 1
            let weight = if row[0] == 0.0 {
                self.normal.inverse_mills(eta)
            } else {
                -self.normal.inverse_mills(-eta)
            };
            grad.scaled_add(-weight, &row.slice(s![1..]));
        }
        grad
    }
}

impl ModelFamily for Probit {
    const NAME: &'static str = "probit";

    fn n_params(&self, data: &Array2<f64>) -> usize {
        data.ncols().saturating_sub(1)
    }

    fn validate_data(&self, data: &Array2<f64>) -> ModelResult<()> {
        validate_matrix(data, Self::NAME, 2, 1)?;
        validate_binary_outcome(data)
    }
}

impl NegLogLikelihood for Probit {
    type Data = Array2<f64>;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        expect_len(theta, self.n_params(data))?;
        Ok(self.value_from(&ProbitScratch::compute(theta, data), data))
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        Ok(self.validate(theta, data)?)
    }

    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        expect_len(theta, self.n_params(data))?;
        Ok(self.grad_from(&ProbitScratch::compute(theta, data), data))
    }

    fn value_and_grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<(Cost, Option<Grad>)> {
        expect_len(theta, self.n_params(data))?;
        let scratch = ProbitScratch::compute(theta, data);
        let value = self.value_from(&scratch, data);
        if !value.is_finite() {
            return Ok((value, None));
        }
        Ok((value, Some(self.grad_from(&scratch, data))))
    }
}
