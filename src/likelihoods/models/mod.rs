//! models — negative log-likelihoods for the supported families.
//!
//! Every family implements [`NegLogLikelihood`] over a row-major data matrix
//! and [`ModelFamily`], which adds the data checks and parameter count the
//! estimation entry points need.
//!
//! | family   | θ                     | data layout                                   |
//! |----------|-----------------------|-----------------------------------------------|
//! | Probit   | `cols − 1` slopes     | col 0 outcome (0/1), cols 1.. covariates      |
//! | Waring   | `[b, a]`              | col k ≥ 1 = count with k links, col 0 ignored |
//! | Yule     | `[b]`                 | same as Waring                                |
//! | Zipf     | `[C]`                 | col k ≥ 0 = count for rank k                  |
//! | OLS      | `cols` coefficients   | col 0 dependent, cols 1.. regressors          |
use crate::{
    likelihoods::{
        core::validate_theta,
        errors::{ModelError, ModelResult},
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{NegLogLikelihood, Theta},
    },
};
use ndarray::{Array1, Array2, s};

pub mod ols;
pub mod probit;
pub mod waring;
pub mod yule;
pub mod zipf;

pub use self::ols::Ols;
pub use self::probit::{Probit, ProbitScratch};
pub use self::waring::Waring;
pub use self::yule::Yule;
pub use self::zipf::Zipf;

/// A likelihood family that estimates from a data matrix.
pub trait ModelFamily: NegLogLikelihood<Data = Array2<f64>> {
    /// Family name used in error messages and diagnostics.
    const NAME: &'static str;

    /// Number of free parameters for this data set.
    fn n_params(&self, data: &Array2<f64>) -> usize;

    /// Check the data matrix layout and contents.
    fn validate_data(&self, data: &Array2<f64>) -> ModelResult<()>;

    /// Check data and a parameter vector together.
    fn validate(&self, theta: &Theta, data: &Array2<f64>) -> ModelResult<()> {
        self.validate_data(data)?;
        validate_theta(theta.view(), self.n_params(data))
    }

    /// Negative log-likelihood contributed by each row.
    ///
    /// The default evaluates every row as a one-row data set. Models whose
    /// likelihood depends on a whole-sample statistic override this.
    fn row_values(&self, theta: &Theta, data: &Array2<f64>) -> OptResult<Array1<f64>> {
        let mut out = Array1::zeros(data.nrows());
        for (i, slot) in out.iter_mut().enumerate() {
            let row = data.slice(s![i..i + 1, ..]).to_owned();
            *slot = self.value(theta, &row)?;
        }
        Ok(out)
    }
}

/// `ThetaLengthMismatch` unless `theta` has exactly `expected` entries.
/// Every family runs it at the top of `value` and `grad`.
pub(crate) fn expect_len(theta: &Theta, expected: usize) -> OptResult<()> {
    if theta.len() != expected {
        return Err(ModelError::ThetaLengthMismatch { expected, actual: theta.len() }.into());
    }
    Ok(())
}

/// Iterate over `(k, count)` for every non-zero count in columns `first_col..`.
pub(crate) fn nonzero_counts(
    data: &Array2<f64>, first_col: usize,
) -> impl Iterator<Item = (f64, f64)> + '_ {
    data.rows().into_iter().flat_map(move |row| {
        row.into_iter()
            .enumerate()
            .skip(first_col)
            .filter(|(_, c)| **c != 0.0)
            .map(|(k, &c)| (k as f64, c))
    })
}
