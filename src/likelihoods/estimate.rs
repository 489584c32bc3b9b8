//! Estimation entry points: fit a model family to a data matrix.
//!
//! Purpose
//! -------
//! Wrap [`minimize`] with the per-family conventions: build the model,
//! validate the data, derive the parameter count and starting point, and
//! choose the search strategy.
//!
//! Key behaviors
//! -------------
//! - `mle_probit`, `mle_waring`, `mle_yule`, `mle_zipf` run the
//!   gradient-based quasi-Newton search (L-BFGS, backtracking line search).
//!   Their `step_size` argument is accepted for a uniform signature and is
//!   not used by that search.
//! - `mle_ols` runs the derivative-free simplex search with the given
//!   initial step.
//! - `mle_*_with` variants take a full [`MLEOptions`].
//! - A `None` start is the zero vector of the family's parameter count.
//!   For the count families zero is outside the domain, so callers should
//!   pass a feasible start (e.g. `b = 3` for Yule, `C = 1.5` for Zipf).
//! - [`row_neg_log_likelihoods`] returns per-observation contributions at a
//!   given `θ`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Entry points hold no state between calls; repeated estimation on the
//!   same inputs gives the same outcome.
//! - Invalid data or starting points are `Err`; non-convergence is reported
//!   in the [`OptimOutcome`].
use crate::{
    likelihoods::models::{ModelFamily, Ols, Probit, Waring, Yule, Zipf},
    optimization::{
        errors::OptResult,
        loglik_optimizer::{MLEOptions, OptimOutcome, Theta, minimize},
    },
};
use ndarray::{Array1, Array2};

/// Fit `model` to `data` from `start` (zeros when `None`).
///
/// # Errors
/// - Data errors from [`ModelFamily::validate_data`].
/// - Starting-point errors from [`NegLogLikelihood::check`](crate::optimization::loglik_optimizer::NegLogLikelihood::check).
/// - Option errors from [`minimize`].
pub fn estimate<M: ModelFamily>(
    model: &M, data: &Array2<f64>, start: Option<&[f64]>, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    model.validate_data(data)?;
    let theta0 = match start {
        Some(values) => Theta::from(values.to_vec()),
        None => Theta::zeros(model.n_params(data)),
    };
    minimize(model, theta0, data, opts)
}

/// Negative log-likelihood of each observation (row) at `theta`.
///
/// # Errors
/// - Data and parameter-length errors from the model's `check`.
pub fn row_neg_log_likelihoods<M: ModelFamily>(
    model: &M, theta: &Theta, data: &Array2<f64>,
) -> OptResult<Array1<f64>> {
    model.check(theta, data)?;
    model.row_values(theta, data)
}

/// Probit MLE with the quasi-Newton search.
pub fn mle_probit(
    data: &Array2<f64>, start: Option<&[f64]>, _step_size: f64, verbose: bool,
) -> OptResult<OptimOutcome> {
    mle_probit_with(data, start, &MLEOptions::quasi_newton(verbose))
}

pub fn mle_probit_with(
    data: &Array2<f64>, start: Option<&[f64]>, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    estimate(&Probit::new()?, data, start, opts)
}

/// Waring MLE over `[b, a]` with the quasi-Newton search.
pub fn mle_waring(
    data: &Array2<f64>, start: Option<&[f64]>, _step_size: f64, verbose: bool,
) -> OptResult<OptimOutcome> {
    mle_waring_with(data, start, &MLEOptions::quasi_newton(verbose))
}

pub fn mle_waring_with(
    data: &Array2<f64>, start: Option<&[f64]>, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    estimate(&Waring::new(), data, start, opts)
}

/// Yule MLE over `[b]` with the quasi-Newton search.
pub fn mle_yule(
    data: &Array2<f64>, start: Option<&[f64]>, _step_size: f64, verbose: bool,
) -> OptResult<OptimOutcome> {
    mle_yule_with(data, start, &MLEOptions::quasi_newton(verbose))
}

pub fn mle_yule_with(
    data: &Array2<f64>, start: Option<&[f64]>, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    estimate(&Yule::new(), data, start, opts)
}

/// Zipf MLE over `[C]` with the quasi-Newton search.
pub fn mle_zipf(
    data: &Array2<f64>, start: Option<&[f64]>, _step_size: f64, verbose: bool,
) -> OptResult<OptimOutcome> {
    mle_zipf_with(data, start, &MLEOptions::quasi_newton(verbose))
}

pub fn mle_zipf_with(
    data: &Array2<f64>, start: Option<&[f64]>, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    estimate(&Zipf::new(), data, start, opts)
}

/// OLS by maximum likelihood with the simplex search.
///
/// # Errors
/// - [`OptError::InvalidStepSize`](crate::optimization::errors::OptError::InvalidStepSize)
///   if `step_size` is non-finite or not positive.
pub fn mle_ols(
    data: &Array2<f64>, start: Option<&[f64]>, step_size: f64, verbose: bool,
) -> OptResult<OptimOutcome> {
    mle_ols_with(data, start, &MLEOptions::simplex(step_size, verbose)?)
}

pub fn mle_ols_with(
    data: &Array2<f64>, start: Option<&[f64]>, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    estimate(&Ols::new(), data, start, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        loglik_optimizer::{NegLogLikelihood, Termination},
    };
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Closed-form optima (Zipf, Probit with a constant covariate, OLS).
    // - A plausible Yule estimate on a heavy-tailed sample.
    // - Agreement between the simplex and quasi-Newton searches.
    // - Idempotence of repeated estimation.
    // - Per-row contributions.
    // - Input errors surfacing as `Err`.
    // -------------------------------------------------------------------------

    fn probit_sample() -> Array2<f64> {
        let x = [-2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0, 2.5];
        let y = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0];
        let mut data = Array2::zeros((x.len(), 3));
        for i in 0..x.len() {
            data[[i, 0]] = y[i];
            data[[i, 1]] = 1.0;
            data[[i, 2]] = x[i];
        }
        data
    }

    #[test]
    // Purpose
    // -------
    // Zipf reaches its closed-form optimum `C = exp(n / Σ c·k)`.
    //
    // Given
    // -----
    // - Counts [0, 5, 3, 2] (mean rank 1.7), start C = 1.5.
    //
    // Expect
    // ------
    // - Converged with Ĉ ≈ exp(1/1.7) ≈ 1.8009.
    fn zipf_reaches_closed_form() {
        // Arrange
        let data = array![[0.0, 5.0, 3.0, 2.0]];

        // Act
        let out = mle_zipf(&data, Some(&[1.5]), 0.01, false).unwrap();

        // Assert
        assert!(out.converged, "{}", out.status());
        assert_relative_eq!(out.theta_hat[0], (1.0_f64 / 1.7).exp(), epsilon = 1e-4);
        assert_relative_eq!(out.theta_hat[0], 1.8009, epsilon = 1e-3);
    }

    #[test]
    // Purpose
    // -------
    // Probit with only a constant covariate matches the sample proportion.
    //
    // Given
    // -----
    // - Three outcomes 0 and one outcome 1, all with x = 1.
    //
    // Expect
    // ------
    // - Φ(θ̂) = 3/4, i.e. θ̂ ≈ 0.6744897.
    fn probit_constant_covariate_matches_proportion() {
        let data = array![[0.0, 1.0], [0.0, 1.0], [0.0, 1.0], [1.0, 1.0]];

        let out = mle_probit(&data, None, 0.01, false).unwrap();

        assert!(out.converged, "{}", out.status());
        assert_relative_eq!(out.theta_hat[0], 0.674_489_75, epsilon = 1e-3);
    }

    #[test]
    // Purpose
    // -------
    // Yule on a heavy-tailed link-count sample lands in a plausible range.
    //
    // Given
    // -----
    // - Counts [667, 167, 67, 33, 19] for k = 1..5, start b = 3.
    //
    // Expect
    // ------
    // - Converged, b̂ ∈ (2.5, 4.5) and a finite NLL.
    fn yule_estimate_is_plausible() {
        let data = array![[0.0, 667.0, 167.0, 67.0, 33.0, 19.0]];

        let out = mle_yule(&data, Some(&[3.0]), 0.01, false).unwrap();

        assert!(out.converged, "{}", out.status());
        assert!(out.theta_hat[0] > 2.5 && out.theta_hat[0] < 4.5, "b̂ = {}", out.theta_hat[0]);
        assert!(out.neg_log_likelihood.is_finite());
    }

    #[test]
    // Purpose
    // -------
    // The two searches reach the same optimum on a convex problem.
    //
    // Given
    // -----
    // - Non-separable Probit data with intercept and slope.
    //
    // Expect
    // ------
    // - Optimal NLLs agree within 1e-3.
    fn simplex_and_quasi_newton_agree() {
        // Arrange
        let data = probit_sample();
        let simplex = MLEOptions::simplex(1.0, false).unwrap();

        // Act
        let qn = mle_probit(&data, None, 0.01, false).unwrap();
        let nm = mle_probit_with(&data, None, &simplex).unwrap();

        // Assert
        assert!(qn.converged && nm.converged);
        assert!((qn.neg_log_likelihood - nm.neg_log_likelihood).abs() < 1e-3);
    }

    #[test]
    // Purpose
    // -------
    // Repeated estimation on identical inputs gives identical results.
    //
    // Given
    // -----
    // - The Probit sample estimated twice.
    //
    // Expect
    // ------
    // - Equal θ̂, NLL and iteration counts.
    fn repeated_estimation_is_idempotent() {
        let data = probit_sample();

        let first = mle_probit(&data, None, 0.01, false).unwrap();
        let second = mle_probit(&data, None, 0.01, false).unwrap();

        assert_eq!(first.theta_hat, second.theta_hat);
        assert_eq!(first.neg_log_likelihood, second.neg_log_likelihood);
        assert_eq!(first.iterations, second.iterations);
    }

    #[test]
    // Purpose
    // -------
    // The OLS likelihood is maximized at the least-squares fit.
    //
    // Given
    // -----
    // - y = 1 + 2x + fixed noise for x = 0..9, simplex step 1.
    //
    // Expect
    // ------
    // - θ̂ within 1e-2 of the normal-equation solution.
    fn ols_matches_least_squares() {
        // Arrange
        let noise = [0.3, -0.2, 0.1, -0.4, 0.2, 0.0, -0.1, 0.4, -0.3, 0.2];
        let mut data = Array2::zeros((noise.len(), 2));
        for (i, e) in noise.iter().enumerate() {
            let x = i as f64;
            data[[i, 0]] = 1.0 + 2.0 * x + e;
            data[[i, 1]] = x;
        }
        let x = data.column(1).to_owned();
        let y = data.column(0).to_owned();
        let (x_bar, y_bar) = (x.mean().unwrap(), y.mean().unwrap());
        let slope = (&x - x_bar).dot(&(&y - y_bar)) / (&x - x_bar).dot(&(&x - x_bar));
        let intercept = y_bar - slope * x_bar;

        // Act
        let out = mle_ols(&data, None, 1.0, false).unwrap();

        // Assert
        assert!(out.converged, "{}", out.status());
        assert_relative_eq!(out.theta_hat[0], intercept, epsilon = 1e-2);
        assert_relative_eq!(out.theta_hat[1], slope, epsilon = 1e-2);
    }

    #[test]
    // Purpose
    // -------
    // Per-row contributions add up to the model value.
    //
    // Given
    // -----
    // - The Probit sample at θ = [0.1, 0.5].
    //
    // Expect
    // ------
    // - One entry per row; the sum equals `Probit::value`.
    fn row_contributions_sum_to_value() {
        let data = probit_sample();
        let theta = array![0.1, 0.5];
        let probit = Probit::new().unwrap();

        let rows = row_neg_log_likelihoods(&probit, &theta, &data).unwrap();

        assert_eq!(rows.len(), data.nrows());
        assert_relative_eq!(rows.sum(), probit.value(&theta, &data).unwrap(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Bad inputs are errors, not outcomes.
    //
    // Given
    // -----
    // - Empty data, a start of the wrong length, a negative count, a
    //   non-finite start and a zero simplex step.
    //
    // Expect
    // ------
    // - The matching `OptError` for each.
    fn invalid_inputs_are_errors() {
        let empty = Array2::<f64>::zeros((0, 2));
        assert!(matches!(mle_probit(&empty, None, 0.01, false), Err(OptError::EmptyData { .. })));

        let counts = array![[0.0, 5.0, 3.0]];
        assert!(matches!(
            mle_waring(&counts, Some(&[3.0]), 0.01, false),
            Err(OptError::ThetaLengthMismatch { expected: 2, actual: 1 })
        ));

        let negative = array![[0.0, 5.0, -3.0]];
        assert!(matches!(
            mle_yule(&negative, Some(&[3.0]), 0.01, false),
            Err(OptError::NegativeCount { row: 0, col: 2, .. })
        ));

        assert!(matches!(
            mle_zipf(&counts, Some(&[f64::NAN]), 0.01, false),
            Err(OptError::InvalidThetaInput { index: 0, .. })
        ));

        let ols = array![[1.0, 0.0], [2.0, 1.0], [2.5, 2.0]];
        assert!(matches!(mle_ols(&ols, None, 0.0, false), Err(OptError::InvalidStepSize { .. })));
    }

    #[test]
    // Purpose
    // -------
    // A start outside the domain ends as a step failure with `+∞`, not an
    // error.
    //
    // Given
    // -----
    // - Yule data with the default zero start.
    //
    // Expect
    // ------
    // - Not converged, `StepFailed`, θ̂ = [0], NLL = +∞.
    fn infeasible_default_start_is_reported() {
        let data = array![[0.0, 10.0, 4.0]];

        let out = mle_yule(&data, None, 0.01, false).unwrap();

        assert!(!out.converged);
        assert!(matches!(out.termination, Termination::StepFailed(_)));
        assert_eq!(out.theta_hat, array![0.0]);
        assert_eq!(out.neg_log_likelihood, f64::INFINITY);
    }
}
