//! loglik_optimizer — negative log-likelihood minimizer with two strategies.
//!
//! Purpose
//! -------
//! Provide one optimization layer for **minimizing negative
//! log-likelihoods** `NLL(θ)` from Rust or Python. Callers implement a single
//! trait, [`NegLogLikelihood`], and invoke [`minimize`] to run either a
//! derivative-free Nelder–Mead simplex or an Argmin-backed L-BFGS search,
//! with configurable tolerances, budgets and finite-difference fallbacks.
//!
//! Key behaviors
//! -------------
//! - Expose a single, user-facing entrypoint [`minimize`] that:
//!   - validates the initial guess with [`NegLogLikelihood::check`],
//!   - selects [`simplex::SimplexSearch`] or [`quasi_newton::QuasiNewtonSearch`]
//!     (L-BFGS built via [`builders`]) based on [`Method`] and [`LineSearcher`],
//!   - drives it with the shared loop [`run::run_search`], and
//!   - normalizes results into an [`OptimOutcome`].
//! - Bridge models into Argmin via [`adapter::ArgMinAdapter`], including a
//!   fused mode that reuses `value_and_grad` work.
//! - Provide finite-difference gradients in [`finite_diff`] when analytic
//!   derivatives are missing.
//! - Centralize configuration ([`Tolerances`], [`MLEOptions`]) and
//!   validation logic ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Models return the **negative** log-likelihood; nothing in the optimizer
//!   flips signs.
//! - `+∞` from a model means "outside the domain" and is a control signal,
//!   not an error. `NaN` is an error.
//! - Non-convergence never produces `Err`: it is reported through
//!   [`OptimOutcome::converged`] and [`Termination`].
//!
//! Conventions
//! -----------
//! - Parameters live in [`Theta`] (`Array1<f64>`); gradients in [`Grad`].
//! - Errors bubble up as [`OptResult<T>`](crate::optimization::errors::OptResult);
//!   this module and its children never intentionally panic or use `unsafe`.
//! - The only I/O is the stderr diagnostics written by [`run::run_search`].
//!
//! Downstream usage
//! ----------------
//! - Model code implements [`NegLogLikelihood`] and calls [`minimize`] with
//!   a model instance, a starting [`Theta`], a data payload and
//!   [`MLEOptions`].
//! - The estimation entry points in `likelihoods::estimate` are thin wrappers
//!   over [`minimize`].
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover:
//!   - gradient handling and fused caching in [`adapter`],
//!   - solver construction in [`builders`],
//!   - the loop's stopping rules in [`run`],
//!   - Nelder–Mead moves in [`simplex`] and L-BFGS stepping in
//!     [`quasi_newton`],
//!   - configuration and outcome invariants in [`traits`].

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod quasi_newton;
pub mod run;
pub mod simplex;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{
    LineSearcher, MLEOptions, Method, NegLogLikelihood, OptimOutcome, Termination, Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_mle::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{
        LineSearcher, MLEOptions, Method, NegLogLikelihood, OptimOutcome, Termination, Tolerances,
    };
    pub use super::types::{Cost, Grad, Theta};
}
