//! Yule model: the one-parameter Waring special case `a = 0`.
//!
//! `ℓ_k(b) = ln(b − 1) + ln Γ(k) + ln Γ(b) − ln Γ(k + b)` for a count in
//! column `k ≥ 1`; `ln Γ(k)` is zero at `k = 1`. The domain is `b > 2`.
//!
//! `∂NLL/∂b = −Σ c [1/(b − 1) + ψ(b) − ψ(k + b)]`
use crate::{
    likelihoods::{
        core::{digamma, ln_gamma, validate_counts, validate_matrix},
        errors::{ModelError, ModelResult},
        models::{ModelFamily, expect_len, nonzero_counts},
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Cost, Grad, NegLogLikelihood, Theta},
    },
};
use ndarray::{Array2, array};

/// Yule negative log-likelihood over `θ = [b]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yule;

impl Yule {
    pub fn new() -> Self {
        Self
    }
}

fn feasible(b: f64) -> bool {
    b.is_finite() && b > 2.0
}

impl ModelFamily for Yule {
    const NAME: &'static str = "yule";

    fn n_params(&self, _data: &Array2<f64>) -> usize {
        1
    }

    fn validate_data(&self, data: &Array2<f64>) -> ModelResult<()> {
        validate_matrix(data, Self::NAME, 2, 1)?;
        validate_counts(data, 1)
    }
}

impl NegLogLikelihood for Yule {
    type Data = Array2<f64>;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        expect_len(theta, 1)?;
        let b = theta[0];
        if !feasible(b) {
            return Ok(f64::INFINITY);
        }
        let shared = (b - 1.0).ln() + ln_gamma(b);
        let ll: f64 = nonzero_counts(data, 1)
            .map(|(k, c)| {
                let ln_k = if k > 1.0 { ln_gamma(k) } else { 0.0 };
                c * (shared + ln_k - ln_gamma(k + b))
            })
            .sum();
        Ok(-ll)
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        Ok(self.validate(theta, data)?)
    }

    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        expect_len(theta, 1)?;
        let b = theta[0];
        if !feasible(b) {
            return Err(ModelError::OutsideDomain { param: "b", value: b }.into());
        }
        let shared = 1.0 / (b - 1.0) + digamma(b);
        let d_b: f64 = nonzero_counts(data, 1).map(|(k, c)| c * (shared - digamma(k + b))).sum();
        Ok(array![-d_b])
    }
}
