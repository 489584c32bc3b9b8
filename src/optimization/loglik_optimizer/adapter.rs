//! Adapter that exposes a user `NegLogLikelihood` as an `argmin` problem.
//!
//! The model already returns the quantity to minimize, so the cost is
//! `NLL(θ)` as-is and analytic gradients are passed through unchanged. If a
//! gradient is not provided, we finite-difference the cost closure.
//!
//! Two construction modes:
//! - [`ArgMinAdapter::new`]: `cost` calls `value`, `gradient` calls `grad`.
//! - [`ArgMinAdapter::fused`]: `cost` calls `value_and_grad` once and keeps the
//!   gradient for the next `gradient` request at the same `θ`. Models whose
//!   value and gradient share work (Probit) go through this path.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::fd_gradient,
        traits::NegLogLikelihood,
        types::{Cost, Grad, Theta},
        validation::{validate_grad, validate_value},
    },
};
use argmin::core::{CostFunction, Error, Gradient};

/// Bridges a user `NegLogLikelihood` to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns `NLL(θ)`; `+∞` is passed through so line
///   searches can back away from infeasible points, `NaN` is an error.
/// - `Gradient::gradient` returns:
///   - the analytic gradient if the user provides one, or
///   - a finite-difference gradient of the cost.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: NegLogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
    fused: bool,
    cached: RefCell<Option<(Theta, Grad)>>,
}

impl<'a, F: NegLogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `NLL(θ)`.
    ///
    /// In fused mode the gradient computed alongside the value is cached
    /// for a subsequent `gradient(θ)` call.
    ///
    /// # Errors
    /// - `NaNCost` if the value is `NaN`.
    /// - Propagates any `OptError` from the user’s `value` via `?`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = if self.fused {
            let (value, grad) = self.f.value_and_grad(theta, self.data)?;
            *self.cached.borrow_mut() = grad.map(|g| (theta.clone(), g));
            value
        } else {
            self.f.value(theta, self.data)?
        };
        validate_value(output)?;
        Ok(output)
    }
}

impl<'a, F: NegLogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// Behavior:
    /// - A cached fused gradient for the same `θ` is returned directly.
    /// - If the user implements `grad(θ, data)`, it is validated and returned.
    /// - Otherwise, a finite-difference gradient of the cost is computed via
    ///   [`fd_gradient`] (central first, forward as fallback).
    ///
    /// # Errors
    /// - Propagates user errors from `grad` (non-`GradientNotImplemented`),
    ///   including `OutsideDomain`.
    /// - Propagates any error raised by cost evaluations performed during FD.
    /// - Returns validation errors if the gradient has wrong dimension or
    ///   non-finite entries.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        if let Some(g) = self.take_cached(theta) {
            validate_grad(&g, dim)?;
            return Ok(g);
        }
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g)
            }
            Err(OptError::GradientNotImplemented) => Ok(fd_gradient(self.f, theta, self.data)?),
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: NegLogLikelihood> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `NegLogLikelihood` and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data, fused: false, cached: RefCell::new(None) }
    }

    /// Construct an adapter whose `cost` goes through `value_and_grad`.
    pub fn fused(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data, fused: true, cached: RefCell::new(None) }
    }

    fn take_cached(&self, theta: &Theta) -> Option<Grad> {
        let mut slot = self.cached.borrow_mut();
        match slot.as_ref() {
            Some((at, _)) if at == theta => slot.take().map(|(_, g)| g),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use approx::assert_relative_eq;
    use ndarray::array;
    use std::cell::Cell;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Pass-through of values and analytic gradients (no sign flip).
    // - The finite-difference fallback when `grad` is not implemented.
    // - Fused mode reusing the gradient from `value_and_grad`.
    // - `+∞` costs passing through and `NaN` costs being rejected.
    // -------------------------------------------------------------------------

    /// NLL(θ) = Σ (θ_i − 1)², with an optional analytic gradient and a counter
    /// of gradient calls.
    struct Bowl {
        analytic: bool,
        grad_calls: Cell<usize>,
    }

    impl NegLogLikelihood for Bowl {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<Cost> {
            if theta[0] > 10.0 {
                return Ok(f64::INFINITY);
            }
            Ok(theta.mapv(|t| (t - 1.0).powi(2)).sum())
        }

        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _: &()) -> OptResult<Grad> {
            if !self.analytic {
                return Err(OptError::GradientNotImplemented);
            }
            self.grad_calls.set(self.grad_calls.get() + 1);
            Ok(theta.mapv(|t| 2.0 * (t - 1.0)))
        }
    }

    struct Broken;

    impl NegLogLikelihood for Broken {
        type Data = ();
        fn value(&self, _: &Theta, _: &()) -> OptResult<Cost> {
            Ok(f64::NAN)
        }
        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // Cost and analytic gradient are passed through without any sign change.
    //
    // Given
    // -----
    // - `Bowl` with an analytic gradient at θ = [3, 0].
    //
    // Expect
    // ------
    // - cost = 4 + 1 = 5 and gradient = [4, −2].
    fn analytic_path_passes_values_through() {
        // Arrange
        let f = Bowl { analytic: true, grad_calls: Cell::new(0) };
        let adapter = ArgMinAdapter::new(&f, &());
        let theta = array![3.0, 0.0];

        // Act
        let c = adapter.cost(&theta).unwrap();
        let g = adapter.gradient(&theta).unwrap();

        // Assert
        assert_relative_eq!(c, 5.0);
        assert_relative_eq!(g[0], 4.0);
        assert_relative_eq!(g[1], -2.0);
    }

    #[test]
    // Purpose
    // -------
    // Missing analytic gradients fall back to finite differences.
    //
    // Given
    // -----
    // - `Bowl` without an analytic gradient at θ = [3, 0].
    //
    // Expect
    // ------
    // - FD gradient ≈ [4, −2].
    fn fd_fallback_when_gradient_missing() {
        // Arrange
        let f = Bowl { analytic: false, grad_calls: Cell::new(0) };
        let adapter = ArgMinAdapter::new(&f, &());

        // Act
        let g = adapter.gradient(&array![3.0, 0.0]).unwrap();

        // Assert
        assert_relative_eq!(g[0], 4.0, epsilon = 1e-5);
        assert_relative_eq!(g[1], -2.0, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Fused mode computes the gradient once, inside `cost`.
    //
    // Given
    // -----
    // - A fused adapter over `Bowl`; `cost` then `gradient` at the same θ.
    //
    // Expect
    // ------
    // - Exactly one call to `grad`; the second `gradient` call at a new θ
    //   computes afresh.
    fn fused_mode_reuses_gradient() {
        // Arrange
        let f = Bowl { analytic: true, grad_calls: Cell::new(0) };
        let adapter = ArgMinAdapter::fused(&f, &());
        let theta = array![2.0, 2.0];

        // Act
        adapter.cost(&theta).unwrap();
        let g = adapter.gradient(&theta).unwrap();

        // Assert
        assert_eq!(f.grad_calls.get(), 1);
        assert_relative_eq!(g[0], 2.0);

        adapter.gradient(&array![1.0, 1.0]).unwrap();
        assert_eq!(f.grad_calls.get(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Infeasible points report `+∞`; `NaN` is rejected.
    //
    // Given
    // -----
    // - `Bowl` at θ[0] > 10 and the always-NaN `Broken` model.
    //
    // Expect
    // ------
    // - `Ok(+∞)` for `Bowl`, `OptError::NaNCost` for `Broken`.
    fn infinity_passes_and_nan_fails() {
        let f = Bowl { analytic: true, grad_calls: Cell::new(0) };
        let adapter = ArgMinAdapter::fused(&f, &());
        assert_eq!(adapter.cost(&array![11.0, 0.0]).unwrap(), f64::INFINITY);
        assert_eq!(f.grad_calls.get(), 0);

        let broken = ArgMinAdapter::new(&Broken, &());
        let err = broken.cost(&array![0.0]).unwrap_err();
        assert_eq!(OptError::from(err), OptError::NaNCost);
    }
}
