//! High-level entry point for minimizing a user-provided `NegLogLikelihood`.
//!
//! This picks the strategy from `opts.method` (simplex, or L-BFGS with the
//! chosen line search), wraps the model for that strategy and delegates the
//! iterations to `run_search`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        builders::{
            build_optimizer_backtracking, build_optimizer_hager_zhang, build_optimizer_more_thuente,
        },
        quasi_newton::QuasiNewtonSearch,
        run::run_search,
        simplex::SimplexSearch,
        traits::{LineSearcher, MLEOptions, Method, NegLogLikelihood},
        validation::{validate_theta0, verify_step_size},
    },
};

/// Minimize a negative log-likelihood `NLL(θ)` from `theta0`.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`, then
///   rejects an empty or non-finite `theta0`.
/// - [`Method::Simplex`]: Nelder–Mead with initial edge `opts.step_size`,
///   converged when the simplex size drops below `opts.tols.size()`.
/// - [`Method::QuasiNewton`]: L-BFGS with **Backtracking**, **More–Thuente** or
///   **Hager–Zhang** line search per `opts.line_searcher`, converged when the
///   gradient norm drops below `opts.tols.grad()`.
/// - Non-convergence and step failures are reported in the outcome, not as
///   errors.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - `EmptyTheta` / `InvalidThetaInput` for an empty or non-finite `theta0`.
/// - `InvalidStepSize` for a non-finite or non-positive simplex step.
/// - Propagates builder errors from `build_optimizer_*`.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_mle::optimization::errors::OptResult;
/// use rust_mle::optimization::loglik_optimizer::{minimize, MLEOptions, NegLogLikelihood, Theta};
///
/// struct Bowl;
/// impl NegLogLikelihood for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = minimize(&Bowl, array![0.1, -0.2, 0.3], &(), &MLEOptions::default())?;
/// println!("θ̂ = {}", out.theta_hat);
/// # Ok::<(), rust_mle::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: NegLogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    validate_theta0(&theta0, theta0.len())?;
    let tol_grad = opts.tols.grad();
    match opts.method {
        Method::Simplex => {
            verify_step_size(opts.step_size)?;
            let search = SimplexSearch::new(f, data, theta0, opts.step_size, opts.tols.size());
            run_search(search, f, data, opts)
        }
        Method::QuasiNewton => match opts.line_searcher {
            LineSearcher::Backtracking => {
                let solver = build_optimizer_backtracking(opts)?;
                run_search(QuasiNewtonSearch::new(f, data, theta0, solver, tol_grad), f, data, opts)
            }
            LineSearcher::MoreThuente => {
                let solver = build_optimizer_more_thuente(opts)?;
                run_search(QuasiNewtonSearch::new(f, data, theta0, solver, tol_grad), f, data, opts)
            }
            LineSearcher::HagerZhang => {
                let solver = build_optimizer_hager_zhang(opts)?;
                run_search(QuasiNewtonSearch::new(f, data, theta0, solver, tol_grad), f, data, opts)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        loglik_optimizer::{Cost, Termination},
    };
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the checks `minimize` makes before any search starts,
    // and dispatch to both strategies.
    // -------------------------------------------------------------------------

    /// Constant objective that accepts every starting point.
    struct Zero;

    impl NegLogLikelihood for Zero {
        type Data = ();
        fn value(&self, _: &Theta, _: &()) -> OptResult<Cost> {
            Ok(0.0)
        }
        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // An empty starting point is a precondition error for either strategy,
    // not a panic inside the search.
    //
    // Given
    // -----
    // - `Zero` with `θ0 = []`, simplex and quasi-Newton options.
    //
    // Expect
    // ------
    // - `Err(OptError::EmptyTheta)` in both cases.
    fn empty_theta0_is_rejected() {
        // Arrange
        let simplex = MLEOptions::simplex(0.1, false).unwrap();
        let quasi_newton = MLEOptions::default();

        // Act
        let by_simplex = minimize(&Zero, Theta::zeros(0), &(), &simplex);
        let by_quasi_newton = minimize(&Zero, Theta::zeros(0), &(), &quasi_newton);

        // Assert
        assert_eq!(by_simplex.unwrap_err(), OptError::EmptyTheta);
        assert_eq!(by_quasi_newton.unwrap_err(), OptError::EmptyTheta);
    }

    #[test]
    // Purpose
    // -------
    // Non-finite starting values and bad simplex steps are rejected up front.
    //
    // Given
    // -----
    // - `θ0 = [1, ∞]` with default options.
    // - A valid `θ0` with simplex options whose step was set to 0 after
    //   construction.
    //
    // Expect
    // ------
    // - `InvalidThetaInput { index: 1 }` and `InvalidStepSize`.
    fn invalid_start_and_step_are_rejected() {
        let out = minimize(&Zero, array![1.0, f64::INFINITY], &(), &MLEOptions::default());
        assert!(matches!(out, Err(OptError::InvalidThetaInput { index: 1, .. })));

        let mut opts = MLEOptions::simplex(0.1, false).unwrap();
        opts.step_size = 0.0;
        let out = minimize(&Zero, array![1.0], &(), &opts);
        assert!(matches!(out, Err(OptError::InvalidStepSize { .. })));
    }

    #[test]
    // Purpose
    // -------
    // A one-parameter start runs to completion under both strategies.
    //
    // Given
    // -----
    // - `Zero` from `θ0 = [0.5]`.
    //
    // Expect
    // ------
    // - Both outcomes keep NLL = 0 and report a termination, not an error.
    fn single_parameter_runs_under_both_strategies() {
        let simplex = minimize(&Zero, array![0.5], &(), &MLEOptions::simplex(0.1, false).unwrap());
        let quasi_newton = minimize(&Zero, array![0.5], &(), &MLEOptions::default());

        for out in [simplex.unwrap(), quasi_newton.unwrap()] {
            assert_eq!(out.neg_log_likelihood, 0.0);
            assert!(matches!(
                out.termination,
                Termination::Converged | Termination::MaxIterReached | Termination::StepFailed(_)
            ));
        }
    }
}
