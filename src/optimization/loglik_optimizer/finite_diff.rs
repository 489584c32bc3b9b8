//! loglik_optimizer::finite_diff — finite-difference gradients of an NLL.
//!
//! Purpose
//! -------
//! Provide finite-difference gradient approximations around a parameter
//! vector, with error capture and validation, so that models without an
//! analytic gradient (OLS, user models) still work with the quasi-Newton
//! path and the rest of the optimizer does not depend directly on the
//! `finitediff` API.
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`] differentiates `NegLogLikelihood::value` with central
//!   differences and falls back to forward differences when the central
//!   stencil fails (an evaluation error or a non-finite entry, typically
//!   because a probe crossed the domain boundary and returned `+∞`).
//! - [`run_fd_diff`] is the forward-difference leg with error capture.
//!
//! Invariants & assumptions
//! ------------------------
//! - Any error raised by the objective during differencing is routed into a
//!   shared `closure_err` cell and surfaced as an [`OptError`].
//! - Gradients returned from this module satisfy [`validate_grad`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover the quadratic happy path, closure-error propagation,
//!   and the central → forward fallback next to a domain boundary.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{Grad, Theta, traits::NegLogLikelihood, validation::validate_grad},
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// fd_gradient — finite-difference gradient of `f.value(·, data)` at `theta`.
///
/// Central differences are tried first. If an evaluation failed or the
/// result does not validate, forward differences are tried once and that
/// result (or error) is returned.
///
/// # Errors
/// - Any `OptError` raised by `f.value` during differencing.
/// - `GradientDimMismatch` / `InvalidGradient` if the forward-difference
///   gradient fails validation.
pub fn fd_gradient<F: NegLogLikelihood>(f: &F, theta: &Theta, data: &F::Data) -> OptResult<Grad> {
    let closure_err: RefCell<Option<Error>> = RefCell::new(None);
    let cost_func = |theta: &Theta| -> f64 {
        match f.value(theta, data) {
            Ok(val) => val,
            Err(e) => {
                let mut slot = closure_err.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e.into());
                }
                f64::NAN
            }
        }
    };
    let fd_grad = theta.central_diff(&cost_func);
    if closure_err.borrow().is_some() {
        return run_fd_diff(theta, &cost_func, &closure_err);
    }
    match validate_grad(&fd_grad, theta.len()) {
        Ok(()) => Ok(fd_grad),
        Err(_) => run_fd_diff(theta, &cost_func, &closure_err),
    }
}

/// run_fd_diff — forward-difference gradient with error capture and validation.
///
/// Parameters
/// ----------
/// - `theta`: point at which the gradient is approximated; its length is
///   the expected gradient dimension.
/// - `func`: objective closure. It is assumed to route evaluation errors
///   into `closure_err` and return `NaN` in that case.
/// - `closure_err`: shared cell for an error raised inside `func`. Cleared
///   on entry and inspected after the FD call.
///
/// Errors
/// ------
/// - The error captured in `closure_err`, converted into `OptError`.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}
