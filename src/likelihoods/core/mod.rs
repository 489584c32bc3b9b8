//! core — shared building blocks for the likelihood models.
//!
//! - [`data`]: validation of data matrices and parameter vectors.
//! - [`special`]: log-gamma, digamma and normal-distribution helpers.

pub mod data;
pub mod special;

pub use self::data::{validate_binary_outcome, validate_counts, validate_matrix, validate_theta};
pub use self::special::{StdNormal, digamma, ln_gamma, normal_ln_pdf};
