//! Zipf model for rank-count data.
//!
//! Purpose
//! -------
//! Negative log-likelihood of `P(k) ∝ ln C · C^{−k}` with a single parameter
//! `θ = [C]`. A count `c` in column `k ≥ 0` means "`c` observations at rank `k`":
//!
//! `NLL(C) = −Σ_{i, k} c_ik (ln ln C − k ln C)`
//!
//! `∂NLL/∂C = −Σ_{i, k} c_ik (1/ln C − k) / C`
//!
//! Key behaviors
//! -------------
//! - Domain guard: `C ≤ 1` or non-finite returns `+∞`.
//! - Every row and every column contributes, including column 0.
//! - With `n = Σ c` and `s = Σ c·k`, the minimizer is `C = exp(n / s)`.
use crate::{
    likelihoods::{
        core::{validate_counts, validate_matrix},
        errors::{ModelError, ModelResult},
        models::{ModelFamily, expect_len, nonzero_counts},
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Cost, Grad, NegLogLikelihood, Theta},
    },
};
use ndarray::{Array2, array};

/// Zipf negative log-likelihood over `θ = [C]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zipf;

impl Zipf {
    pub fn new() -> Self {
        Self
    }
}

impl ModelFamily for Zipf {
    const NAME: &'static str = "zipf";

    fn n_params(&self, _data: &Array2<f64>) -> usize {
        1
    }

    fn validate_data(&self, data: &Array2<f64>) -> ModelResult<()> {
        validate_matrix(data, Self::NAME, 1, 1)?;
        validate_counts(data, 0)
    }
}

impl NegLogLikelihood for Zipf {
    type Data = Array2<f64>;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        expect_len(theta, 1)?;
        let c = theta[0];
        if !c.is_finite() || c <= 1.0 {
            return Ok(f64::INFINITY);
        }
        let ln_c = c.ln();
        let ln_ln_c = ln_c.ln();
        let ll: f64 = nonzero_counts(data, 0).map(|(k, n)| n * (ln_ln_c - k * ln_c)).sum();
        Ok(-ll)
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        Ok(self.validate(theta, data)?)
    }

    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        expect_len(theta, 1)?;
        let c = theta[0];
        if !c.is_finite() || c <= 1.0 {
            return Err(ModelError::OutsideDomain { param: "C", value: c }.into());
        }
        let inv_ln_c = 1.0 / c.ln();
        let d_c: f64 = nonzero_counts(data, 0).map(|(k, n)| n * (inv_ln_c - k) / c).sum();
        Ok(array![-d_c])
    }
}
