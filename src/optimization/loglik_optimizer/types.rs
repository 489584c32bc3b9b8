//! loglik_optimizer::types — shared numeric aliases, constants and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types, default constants and `argmin` solver
//! aliases used by the negative log-likelihood minimizer, so the rest of the
//! optimizer stays agnostic to `ndarray` and `argmin` generics.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for parameter vectors, gradients and scalar
//!   costs (`Theta`, `Grad`, `Cost`).
//! - Provide the map type for function-evaluation counters (`FnEvalMap`).
//! - Fix the default stopping constants of both strategies
//!   ([`MAX_ITERATIONS`], [`MAX_ITERATIONS_W_D`], [`DEFAULT_TOL_SIZE`],
//!   [`DEFAULT_TOL_GRAD`]) and of the line search ([`DEFAULT_LINESEARCH_TOL`]).
//! - Expose pre-wired L-BFGS aliases for each supported line search.
//!
//! Invariants & assumptions
//! ------------------------
//! - All optimizer vectors are `ndarray` containers over `f64`.
//! - `Cost` is always a **negative** log-likelihood; no sign flips happen
//!   anywhere in the optimizer.
//!
//! Testing notes
//! -------------
//! - This module only defines aliases and constants; it is exercised by the
//!   builder, strategy and driver tests.
use argmin::{
    core::IterState,
    solver::{
        linesearch::{
            BacktrackingLineSearch, HagerZhangLineSearch, MoreThuenteLineSearch,
            condition::ArmijoCondition,
        },
        quasinewton::LBFGS,
    },
};
use ndarray::Array1;
use std::collections::HashMap;

/// Parameter vector `θ`.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical parameter type
/// throughout the optimizer.
pub type Theta = Array1<f64>;

/// Gradient vector `∇NLL(θ)`, same shape as `Theta`.
pub type Grad = Array1<f64>;

/// Scalar objective: the negative log-likelihood `NLL(θ) = −ℓ(θ)`.
pub type Cost = f64;

/// Function-evaluation counters.
///
/// Maps counter names (`"cost_count"`, `"gradient_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Iteration budget of the derivative-free simplex search.
pub const MAX_ITERATIONS: usize = 500;

/// Iteration budget of the gradient-based quasi-Newton search.
pub const MAX_ITERATIONS_W_D: usize = 500;

/// Simplex size below which the derivative-free search has converged.
pub const DEFAULT_TOL_SIZE: f64 = 1e-3;

/// Gradient norm below which the quasi-Newton search has converged.
pub const DEFAULT_TOL_GRAD: f64 = 1e-4;

/// Sufficient-decrease parameter of the line search.
pub const DEFAULT_LINESEARCH_TOL: f64 = 1e-4;

/// First trial step length of the expanding (Wolfe-type) line searches.
///
/// `argmin`'s L-BFGS hands each iteration a fresh copy of the configured
/// line search, so this scale applies to every iteration, not just the first.
pub const DEFAULT_LINESEARCH_STEP: f64 = 1e-3;

/// Step-length shrink factor of the backtracking line search.
pub const DEFAULT_BACKTRACK_RHO: f64 = 0.5;

/// Default initial simplex edge length.
pub const DEFAULT_STEP_SIZE: f64 = 0.01;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// State type `argmin` threads through the L-BFGS iterations.
pub type QuasiNewtonState = IterState<Theta, Grad, (), (), (), Cost>;

/// Backtracking line search with the Armijo condition.
pub type BacktrackingLS = BacktrackingLineSearch<Theta, Grad, ArmijoCondition<Cost>, Cost>;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the backtracking line search.
pub type LbfgsBacktracking = LBFGS<BacktrackingLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
