//! Public API surface for negative log-likelihood minimization.
//!
//! - [`NegLogLikelihood`]: trait every model implements.
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`Method`]: derivative-free simplex or gradient-based quasi-Newton.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`Termination`] and [`OptimOutcome`]: normalized result of [`minimize`](super::minimize).
//!
//! Convention: models return the **negative** log-likelihood `NLL(θ) = −ℓ(θ)`
//! and, when available, its gradient `∇NLL(θ)`. The optimizer minimizes it
//! as-is. A value of `+∞` marks parameters outside the model domain.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        types::{
            DEFAULT_LINESEARCH_TOL, DEFAULT_STEP_SIZE, DEFAULT_TOL_GRAD, DEFAULT_TOL_SIZE,
            MAX_ITERATIONS, MAX_ITERATIONS_W_D,
        },
        validation::{
            validate_theta_hat, validate_value, verify_linesearch_tol, verify_step_size,
            verify_tol_cost, verify_tol_grad, verify_tol_size,
        },
    },
};
use std::str::FromStr;

/// User-implemented negative log-likelihood interface.
///
/// - `type Data`: per-model data carried into every call.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `NLL(θ)`. Return
///   `Ok(f64::INFINITY)` for parameters outside the model domain; reserve
///   `Err` for genuine failures.
/// - `check(&Theta, &Data) -> OptResult<()>`: reject malformed `θ`/`data`
///   pairs (wrong length, bad data). Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic `∇NLL(θ)`. If not
///   implemented, robust finite differences are used automatically.
/// - `value_and_grad(&Theta, &Data)`: both at once. Override when value and
///   gradient share intermediate work. The gradient is `None` where it is not
///   available (outside the domain, or not implemented).
pub trait NegLogLikelihood {
    type Data;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }

    fn value_and_grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<(Cost, Option<Grad>)> {
        let value = self.value(theta, data)?;
        if !value.is_finite() {
            return Ok((value, None));
        }
        match self.grad(theta, data) {
            Ok(g) => Ok((value, Some(g))),
            Err(OptError::GradientNotImplemented) => Ok((value, None)),
            Err(e) => Err(e),
        }
    }
}

/// Minimization strategy.
///
/// Parsing accepts case-insensitive `"simplex"` / `"nelder-mead"` and
/// `"quasi-newton"` / `"lbfgs"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Derivative-free Nelder–Mead simplex search.
    Simplex,
    /// Gradient-based L-BFGS search.
    QuasiNewton,
}

impl FromStr for Method {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simplex" | "nelder-mead" | "neldermead" => Ok(Method::Simplex),
            "quasi-newton" | "quasinewton" | "lbfgs" => Ok(Method::QuasiNewton),
            _ => Err(OptError::InvalidMethod {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'simplex' or 'quasi-newton'.",
            }),
        }
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Variants:
/// - `Backtracking`: Armijo backtracking. Only evaluates gradients at
///   accepted points, so it never asks for a gradient outside the domain.
/// - `MoreThuente`: More–Thuente line search.
/// - `HagerZhang`: Hager–Zhang line search.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"Backtracking"`, `"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    Backtracking,
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "backtracking" => Ok(LineSearcher::Backtracking),
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'Backtracking', 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — stopping rules and iteration budget.
/// - `method: Method` — simplex or quasi-Newton.
/// - `line_searcher: LineSearcher` — line search used by L-BFGS.
/// - `linesearch_tol: f64` — sufficient-decrease constant `c1` of the line search.
/// - `step_size: f64` — edge length of the initial simplex (same in every
///   dimension). Ignored by the quasi-Newton path.
/// - `verbose: bool` — print per-iteration progress to stderr.
/// - `lbfgs_mem: Option<usize>` — L-BFGS history size (`None` uses 7).
///
/// Default:
/// - `tols`: `Tolerances::default()`
/// - `method`: `QuasiNewton`, `line_searcher`: `Backtracking`
/// - `linesearch_tol`: `1e-4`, `step_size`: `0.01`
/// - `verbose`: `false`, `lbfgs_mem`: `None`
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub method: Method,
    pub line_searcher: LineSearcher,
    pub linesearch_tol: f64,
    pub step_size: f64,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// Create a validated set of optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    /// - [`OptError::InvalidLineSearchTol`] unless `0 < linesearch_tol < 1`.
    /// - [`OptError::InvalidStepSize`] if `step_size` is non-finite or ≤ 0.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tols: Tolerances, method: Method, line_searcher: LineSearcher, linesearch_tol: f64,
        step_size: f64, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        verify_linesearch_tol(linesearch_tol)?;
        verify_step_size(step_size)?;
        Ok(Self { tols, method, line_searcher, linesearch_tol, step_size, verbose, lbfgs_mem })
    }

    /// Options for the simplex path with the given initial step.
    pub fn simplex(step_size: f64, verbose: bool) -> OptResult<Self> {
        let defaults = Self::default();
        Self::new(
            Tolerances::new(None, Some(DEFAULT_TOL_SIZE), None, Some(MAX_ITERATIONS))?,
            Method::Simplex,
            defaults.line_searcher,
            defaults.linesearch_tol,
            step_size,
            verbose,
            None,
        )
    }

    /// Options for the quasi-Newton path with the default line search.
    pub fn quasi_newton(verbose: bool) -> Self {
        Self { verbose, ..Self::default() }
    }

    /// Iteration budget in effect (falls back to [`MAX_ITERATIONS_W_D`]).
    pub fn max_iter(&self) -> usize {
        self.tols.max_iter.unwrap_or(MAX_ITERATIONS_W_D)
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            method: Method::QuasiNewton,
            line_searcher: LineSearcher::Backtracking,
            linesearch_tol: DEFAULT_LINESEARCH_TOL,
            step_size: DEFAULT_STEP_SIZE,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: quasi-Newton stops when `‖∇NLL‖` falls below this.
/// - `tol_size`: simplex stops when its size falls below this.
/// - `tol_cost`: either strategy stops when the best cost changes by less
///   than this between iterations.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None`; a missing strategy tolerance falls back to
/// the defaults ([`DEFAULT_TOL_GRAD`], [`DEFAULT_TOL_SIZE`]) and a missing
/// budget to [`MAX_ITERATIONS_W_D`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_size: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolSize`] /
    ///   [`OptError::InvalidTolCost`] for non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_size: Option<f64>, tol_cost: Option<f64>,
        max_iter: Option<usize>,
    ) -> OptResult<Self> {
        verify_tol_grad(tol_grad)?;
        verify_tol_size(tol_size)?;
        verify_tol_cost(tol_cost)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_size, tol_cost, max_iter })
    }

    /// Gradient-norm tolerance in effect.
    pub fn grad(&self) -> f64 {
        self.tol_grad.unwrap_or(DEFAULT_TOL_GRAD)
    }

    /// Simplex-size tolerance in effect.
    pub fn size(&self) -> f64 {
        self.tol_size.unwrap_or(DEFAULT_TOL_SIZE)
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            tol_grad: Some(DEFAULT_TOL_GRAD),
            tol_size: Some(DEFAULT_TOL_SIZE),
            tol_cost: None,
            max_iter: Some(MAX_ITERATIONS_W_D),
        }
    }
}

/// Why the search loop stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum Termination {
    /// The convergence metric fell below its tolerance.
    Converged,
    /// The iteration budget ran out first.
    MaxIterReached,
    /// A step could not proceed; carries the reason.
    StepFailed(String),
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::Converged => write!(f, "Converged"),
            Termination::MaxIterReached => write!(f, "Maximum number of iterations reached"),
            Termination::StepFailed(reason) => write!(f, "Step failed: {reason}"),
        }
    }
}

/// Canonical result returned by `minimize` and every estimation entry point.
///
/// - `theta_hat`: best parameter vector found (freshly allocated).
/// - `neg_log_likelihood`: `NLL(θ̂)`, re-evaluated once at `theta_hat`. May be
///   `+∞` if the search never left an infeasible starting point.
/// - `converged`: `true` only for [`Termination::Converged`].
/// - `termination`: why the loop stopped.
/// - `iterations`: number of completed iterations.
/// - `fn_evals`: evaluation counters (`cost_count`, `gradient_count`).
/// - `metric`: last convergence metric (simplex size or gradient norm).
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub neg_log_likelihood: f64,
    pub converged: bool,
    pub termination: Termination,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub metric: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from the driver's final state.
    ///
    /// # Errors
    /// - Propagates validation errors for `theta_hat` (missing or non-finite)
    ///   or for a NaN `neg_log_likelihood`.
    pub fn new(
        theta_hat_opt: Option<Theta>, neg_log_likelihood: f64, termination: Termination,
        iterations: usize, fn_evals: FnEvalMap, metric: Option<f64>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(neg_log_likelihood)?;
        let converged = termination == Termination::Converged;
        Ok(Self {
            theta_hat,
            neg_log_likelihood,
            converged,
            termination,
            iterations,
            fn_evals,
            metric,
        })
    }

    /// Human-readable termination status.
    pub fn status(&self) -> String {
        self.termination.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation in `Tolerances::new` and `MLEOptions::new`.
    // - `FromStr` for `LineSearcher` and `Method`.
    // - Defaults carrying the documented stopping constants.
    // - `OptimOutcome::new` mapping of termination to `converged`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Defaults reproduce the documented stopping constants.
    //
    // Given
    // -----
    // - `MLEOptions::default()`.
    //
    // Expect
    // ------
    // - Gradient tol 1e-4, size tol 1e-3, budget 500, quasi-Newton with
    //   backtracking and line-search tol 1e-4.
    fn defaults_match_documented_constants() {
        // Act
        let opts = MLEOptions::default();

        // Assert
        assert_eq!(opts.tols.grad(), 1e-4);
        assert_eq!(opts.tols.size(), 1e-3);
        assert_eq!(opts.max_iter(), 500);
        assert_eq!(opts.method, Method::QuasiNewton);
        assert_eq!(opts.line_searcher, LineSearcher::Backtracking);
        assert_eq!(opts.linesearch_tol, 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Invalid tolerances and budgets are rejected eagerly.
    //
    // Given
    // -----
    // - Negative gradient tol, NaN size tol, zero budget.
    //
    // Expect
    // ------
    // - The matching `OptError` variant for each.
    fn tolerances_reject_invalid_values() {
        assert!(matches!(
            Tolerances::new(Some(-1.0), None, None, None),
            Err(OptError::InvalidTolGrad { .. })
        ));
        assert!(matches!(
            Tolerances::new(None, Some(f64::NAN), None, None),
            Err(OptError::InvalidTolSize { .. })
        ));
        assert!(matches!(
            Tolerances::new(None, None, None, Some(0)),
            Err(OptError::InvalidMaxIter { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `MLEOptions::new` validates memory, line-search tol and step size.
    //
    // Given
    // -----
    // - Zero L-BFGS memory; line-search tol of 1.0; zero step.
    //
    // Expect
    // ------
    // - `InvalidLBFGSMem`, `InvalidLineSearchTol`, `InvalidStepSize`.
    fn mle_options_reject_invalid_values() {
        let tols = Tolerances::default();
        let (qn, nm, bt) = (Method::QuasiNewton, Method::Simplex, LineSearcher::Backtracking);
        assert!(matches!(
            MLEOptions::new(tols, qn, bt, 1e-4, 0.1, false, Some(0)),
            Err(OptError::InvalidLBFGSMem { .. })
        ));
        assert!(matches!(
            MLEOptions::new(tols, qn, bt, 1.0, 0.1, false, None),
            Err(OptError::InvalidLineSearchTol { .. })
        ));
        assert!(matches!(
            MLEOptions::new(tols, nm, bt, 1e-4, 0.0, false, None),
            Err(OptError::InvalidStepSize { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Name parsing is case-insensitive and rejects unknown names.
    //
    // Given
    // -----
    // - Mixed-case method and line-search names plus one bogus name.
    //
    // Expect
    // ------
    // - Correct variants; `InvalidLineSearch` / `InvalidMethod` for the bogus ones.
    fn names_parse_case_insensitively() {
        assert_eq!("HAGERZHANG".parse::<LineSearcher>().unwrap(), LineSearcher::HagerZhang);
        assert_eq!("backTracking".parse::<LineSearcher>().unwrap(), LineSearcher::Backtracking);
        assert_eq!("Nelder-Mead".parse::<Method>().unwrap(), Method::Simplex);
        assert_eq!("LBFGS".parse::<Method>().unwrap(), Method::QuasiNewton);
        assert!(matches!(
            "bisection".parse::<LineSearcher>(),
            Err(OptError::InvalidLineSearch { .. })
        ));
        assert!(matches!("annealing".parse::<Method>(), Err(OptError::InvalidMethod { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Only a converged termination sets `converged`; budget exhaustion does not
    // make the outcome an error.
    //
    // Given
    // -----
    // - A finite `theta_hat` with `MaxIterReached`.
    //
    // Expect
    // ------
    // - `Ok(outcome)` with `converged == false` and a readable status.
    fn outcome_reports_non_convergence_without_error() {
        // Act
        let out = OptimOutcome::new(
            Some(array![1.0, 2.0]),
            3.5,
            Termination::MaxIterReached,
            500,
            FnEvalMap::new(),
            Some(0.2),
        )
        .expect("finite outcome should validate");

        // Assert
        assert!(!out.converged);
        assert_eq!(out.status(), "Maximum number of iterations reached");
    }

    #[test]
    // Purpose
    // -------
    // An infinite objective at the returned point is allowed; NaN is not.
    //
    // Given
    // -----
    // - Outcomes with `+∞` and `NaN` values.
    //
    // Expect
    // ------
    // - `Ok` for `+∞`, `Err(NaNCost)` for `NaN`.
    fn outcome_accepts_infinity_but_not_nan() {
        let inf = OptimOutcome::new(
            Some(array![0.0]),
            f64::INFINITY,
            Termination::StepFailed("infeasible start".to_string()),
            0,
            FnEvalMap::new(),
            None,
        );
        assert!(inf.is_ok());

        let nan = OptimOutcome::new(
            Some(array![0.0]),
            f64::NAN,
            Termination::Converged,
            1,
            FnEvalMap::new(),
            None,
        );
        assert_eq!(nan, Err(OptError::NaNCost));
    }
}
