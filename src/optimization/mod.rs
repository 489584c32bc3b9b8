//! optimization — negative log-likelihood minimization and its error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting: a generic
//! minimizer over negative log-likelihoods with a derivative-free and a
//! gradient-based strategy, and a single error/result surface. Callers
//! implement a likelihood, choose options, and obtain fitted parameters and
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **minimizing** `NLL(θ)`
//!   (`loglik_optimizer`), including configuration of strategies and
//!   stopping criteria.
//! - Normalize configuration issues, numerical failures, model/data errors
//!   and backend solver errors into a single enum (`errors::OptError`) with
//!   a common result alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - Parameters and gradients are `ndarray`-based aliases (`Theta`, `Grad`).
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors or model-specific error enums.
//!
//! Downstream usage
//! ----------------
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`.

pub mod errors;
pub mod loglik_optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_mle::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
}
