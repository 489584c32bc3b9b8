//! Waring model for link-count data.
//!
//! Purpose
//! -------
//! Negative log-likelihood of the Waring distribution with parameters
//! `θ = [b, a]`, where a count `c` in column `k ≥ 1` means "`c`
//! observations with `k` links":
//!
//! `ℓ_k(b, a) = ln(b − 1) + ln Γ(k + a) + ln Γ(b + a) − ln Γ(a + 1) − ln Γ(k + a + b)`
//!
//! `NLL(b, a) = −Σ_{i, k ≥ 1} c_ik · ℓ_k(b, a)`
//!
//! Key behaviors
//! -------------
//! - Domain guard: `b ≤ 2`, `a ≤ −1` or a non-finite entry returns `+∞`.
//! - Analytic gradient, ordered like `θ`:
//!   - `∂/∂b = −Σ c [1/(b − 1) + ψ(b + a) − ψ(k + a + b)]`
//!   - `∂/∂a = −Σ c [ψ(k + a) + ψ(b + a) − ψ(a + 1) − ψ(k + a + b)]`
//! - Column 0 is ignored; zero counts are skipped.
//!
//! Invariants & assumptions
//! ------------------------
//! - With `a = 0` the value equals the Yule value at the same `b`.
//! - Requesting the gradient outside the domain is an
//!   [`OutsideDomain`](crate::optimization::errors::OptError::OutsideDomain) error.
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

/// Waring negative log-likelihood over `θ = [b, a]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Waring;

impl Waring {
    pub fn new() -> Self {
        Self
    }

    /// `Err` with the offending parameter if `(b, a)` is outside the domain.
    fn check_domain(b: f64, a: f64) -> ModelResult<()> {
        if !b.is_finite() || b <= 2.0 {
            return Err(ModelError::OutsideDomain { param: "b", value: b });
        }
        if !a.is_finite() || a <= -1.0 {
            return Err(ModelError::OutsideDomain { param: "a", value: a });
        }
        Ok(())
    }
}

impl ModelFamily for Waring {
    const NAME: &'static str = "waring";

    fn n_params(&self, _data: &Array2<f64>) -> usize {
        2
    }

    fn validate_data(&self, data: &Array2<f64>) -> ModelResult<()> {
        validate_matrix(data, Self::NAME, 2, 1)?;
        validate_counts(data, 1)
    }
}

impl NegLogLikelihood for Waring {
    type Data = Array2<f64>;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        expect_len(theta, 2)?;
        let (b, a) = (theta[0], theta[1]);
        if Self::check_domain(b, a).is_err() {
            return Ok(f64::INFINITY);
        }
        let shared = (b - 1.0).ln() + ln_gamma(b + a) - ln_gamma(a + 1.0);
        let ll: f64 = nonzero_counts(data, 1)
            .map(|(k, c)| c * (shared + ln_gamma(k + a) - ln_gamma(k + a + b)))
            .sum();
        Ok(-ll)
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        Ok(self.validate(theta, data)?)
    }

    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        expect_len(theta, 2)?;
        let (b, a) = (theta[0], theta[1]);
        Self::check_domain(b, a)?;
        let inv_b_less_1 = 1.0 / (b - 1.0);
        let psi_b_a = digamma(b + a);
        let psi_a_1 = digamma(a + 1.0);
        let (mut d_b, mut d_a) = (0.0, 0.0);
        for (k, c) in nonzero_counts(data, 1) {
            let psi_k_a_b = digamma(k + a + b);
            d_b += c * (inv_b_less_1 + psi_b_a - psi_k_a_b);
            d_a += c * (digamma(k + a) + psi_b_a - psi_a_1 - psi_k_a_b);
        }
        Ok(array![-d_b, -d_a])
    }
}
