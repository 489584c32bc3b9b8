//! likelihoods — model families and estimation entry points.
//!
//! Purpose
//! -------
//! Define the negative log-likelihoods this crate estimates and the
//! functions that fit them to data.
//!
//! Key behaviors
//! -------------
//! - [`models`]: Probit, Waring, Yule, Zipf and OLS, each a
//!   [`NegLogLikelihood`](crate::optimization::loglik_optimizer::NegLogLikelihood)
//!   plus [`ModelFamily`](models::ModelFamily) for data checks.
//! - [`estimate`]: `mle_*` entry points and per-row contributions.
//! - [`core`]: shared validation and special functions.
//! - [`errors`]: [`ModelError`](errors::ModelError), lifted into
//!   `OptError` at the optimizer boundary.
//!
//! Invariants & assumptions
//! ------------------------
//! - Model values are `+∞` outside the parameter domain and finite inside.
//! - No model keeps state between calls.

pub mod core;
pub mod errors;
pub mod estimate;
pub mod models;

pub use self::estimate::{
    estimate, mle_ols, mle_ols_with, mle_probit, mle_probit_with, mle_waring, mle_waring_with,
    mle_yule, mle_yule_with, mle_zipf, mle_zipf_with, row_neg_log_likelihoods,
};
pub use self::models::{ModelFamily, Ols, Probit, Waring, Yule, Zipf};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_mle::likelihoods::prelude::*;
//
// to import the models and entry points in a single line.

pub mod prelude {
    pub use super::errors::{ModelError, ModelResult};
    pub use super::estimate::*;
    pub use super::models::{ModelFamily, Ols, Probit, Waring, Yule, Zipf};
}
