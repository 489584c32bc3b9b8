//! Special functions used by the likelihood models.
//!
//! Thin wrappers over `statrs` so every model calls the same log-gamma,
//! digamma and standard-normal routines. Arguments are assumed to be inside
//! each function's domain; the models check their domain guards first.
//!
//! `ln Φ` and the inverse Mills ratio `φ/Φ` switch to the asymptotic
//! expansion of the lower tail below [`LOWER_TAIL`], where `Φ` itself
//! underflows; both stay finite for every finite argument.
use crate::likelihoods::errors::{ModelError, ModelResult};
use statrs::{
    distribution::{Continuous, ContinuousCDF, Normal},
    function::gamma,
};

/// `ln Γ(x)` for `x > 0`.
#[inline]
pub fn ln_gamma(x: f64) -> f64 {
    gamma::ln_gamma(x)
}

/// Digamma `ψ(x) = d/dx ln Γ(x)` for `x > 0`.
#[inline]
pub fn digamma(x: f64) -> f64 {
    gamma::digamma(x)
}

/// Below this point `ln Φ` and `φ/Φ` use the tail expansion.
pub const LOWER_TAIL: f64 = -30.0;

/// `Φ(x) (−x) / φ(x)` for `x ≪ 0`, truncated after the `x⁻⁸` term.
#[inline]
fn tail_series(x: f64) -> f64 {
    let r = 1.0 / (x * x);
    1.0 - r * (1.0 - r * (3.0 - r * (15.0 - 105.0 * r)))
}

/// Standard normal distribution `N(0, 1)` and a few helpers on top of it.
#[derive(Debug, Clone, Copy)]
pub struct StdNormal(Normal);

impl StdNormal {
    /// Build the standard normal.
    ///
    /// # Errors
    /// [`ModelError::SpecialFunction`] if `statrs` rejects the parameters.
    pub fn new() -> ModelResult<Self> {
        Normal::new(0.0, 1.0)
            .map(StdNormal)
            .map_err(|e| ModelError::SpecialFunction { text: e.to_string() })
    }

    /// `Φ(x)`.
    #[inline]
    pub fn cdf(&self, x: f64) -> f64 {
        self.0.cdf(x)
    }

    /// `φ(x)`.
    #[inline]
    pub fn pdf(&self, x: f64) -> f64 {
        self.0.pdf(x)
    }

    /// `ln Φ(x)`.
    pub fn ln_cdf(&self, x: f64) -> f64 {
        if x > 0.0 {
            (-self.cdf(-x)).ln_1p()
        } else if x > LOWER_TAIL {
            self.cdf(x).ln()
        } else {
            self.0.ln_pdf(x) - (-x).ln() + tail_series(x).ln()
        }
    }

    /// Inverse Mills ratio `φ(x)/Φ(x)`.
    pub fn inverse_mills(&self, x: f64) -> f64 {
        if x > LOWER_TAIL {
            self.pdf(x) / self.cdf(x)
        } else {
            -x / tail_series(x)
        }
    }
}

/// `ln φ_σ(e)`: log density of `N(0, σ²)` at `e`.
///
/// # Errors
/// [`ModelError::SpecialFunction`] if `sigma` is not a valid standard deviation.
pub fn normal_ln_pdf(e: f64, sigma: f64) -> ModelResult<f64> {
    let normal =
        Normal::new(0.0, sigma).map_err(|e| ModelError::SpecialFunction { text: e.to_string() })?;
    Ok(normal.ln_pdf(e))
}
