//! Shared iterate / test / budget loop for every search strategy.
//!
//! Both strategies ([`SimplexSearch`](super::simplex::SimplexSearch) and
//! [`QuasiNewtonSearch`](super::quasi_newton::QuasiNewtonSearch)) only supply
//! a step and a convergence metric through [`SearchStrategy`]; stopping
//! rules, diagnostics and the final [`OptimOutcome`] are handled here once.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Cost, FnEvalMap, Theta,
        traits::{MLEOptions, NegLogLikelihood, OptimOutcome, Termination},
    },
};

/// One iterative minimizer, advanced one step at a time by [`run_search`].
pub trait SearchStrategy {
    /// Short name used in diagnostics.
    const NAME: &'static str;
    /// Label of the convergence metric in diagnostics.
    const METRIC: &'static str;

    /// Evaluate the starting configuration. An error here is a step failure.
    fn start(&mut self) -> OptResult<()>;

    /// Advance one iteration.
    fn step(&mut self) -> OptResult<()>;

    /// Current convergence metric, if one is available yet.
    fn metric(&self) -> Option<f64>;

    /// Threshold below which [`metric`](Self::metric) means convergence.
    fn tolerance(&self) -> f64;

    /// Best point found so far and its cost.
    fn best(&self) -> (&Theta, Cost);

    /// Evaluation counters.
    fn fn_evals(&self) -> FnEvalMap;
}

/// Drive `strategy` until it converges, fails, or exhausts the budget.
///
/// # Behavior
/// - `start()` failing ends the run immediately with
///   [`Termination::StepFailed`] and the starting point as the result.
/// - For `iter in 1..=max_iter`: `step()`; an error stops the loop with
///   `StepFailed(reason)` and keeps the best point so far. Then the loop
///   stops with [`Termination::Converged`] when `metric() < tolerance()`, or
///   when `opts.tols.tol_cost` is set and the best cost moved by less than it.
/// - Budget exhaustion yields [`Termination::MaxIterReached`] and a
///   diagnostic line on stderr; it is never an error.
/// - With `opts.verbose`, the initial `NLL(θ0)` and one line per iteration
///   (iteration, best θ, objective, metric) are written to stderr.
/// - The returned `neg_log_likelihood` is re-evaluated once at `theta_hat`
///   via `f.value`.
///
/// # Errors
/// - Propagates errors from the final re-evaluation and from
///   [`OptimOutcome::new`] validation. Step errors are *not* propagated.
pub fn run_search<F, S>(
    mut strategy: S, f: &F, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome>
where
    F: NegLogLikelihood,
    S: SearchStrategy,
{
    let max_iter = opts.max_iter();
    let tolerance = strategy.tolerance();
    let mut iterations = 0;
    let mut termination = Termination::MaxIterReached;

    match strategy.start() {
        Err(e) => termination = Termination::StepFailed(e.to_string()),
        Ok(()) => {
            let mut prev_cost = strategy.best().1;
            if opts.verbose {
                eprintln!("{}: NLL(theta0) = {prev_cost:.6}", S::NAME);
            }
            for iter in 1..=max_iter {
                if let Err(e) = strategy.step() {
                    termination = Termination::StepFailed(e.to_string());
                    break;
                }
                iterations = iter;
                let metric = strategy.metric();
                let (theta, cost) = strategy.best();
                if opts.verbose {
                    log_iteration::<S>(iter, theta, cost, metric);
                }
                if metric.is_some_and(|m| m < tolerance) {
                    termination = Termination::Converged;
                    break;
                }
                if let Some(tol_cost) = opts.tols.tol_cost {
                    if (prev_cost - cost).abs() < tol_cost {
                        termination = Termination::Converged;
                        break;
                    }
                }
                prev_cost = cost;
            }
        }
    }

    match &termination {
        Termination::MaxIterReached => {
            eprintln!("{}: minimum not found after {max_iter} iterations", S::NAME);
        }
        Termination::Converged if opts.verbose => {
            eprintln!("{}: minimum found after {iterations} iterations", S::NAME);
        }
        Termination::StepFailed(reason) if opts.verbose => {
            eprintln!("{}: stopped after {iterations} iterations: {reason}", S::NAME);
        }
        _ => {}
    }

    let theta_hat = strategy.best().0.clone();
    let neg_log_likelihood = f.value(&theta_hat, data)?;
    OptimOutcome::new(
        Some(theta_hat),
        neg_log_likelihood,
        termination,
        iterations,
        strategy.fn_evals(),
        strategy.metric(),
    )
}

// ---- Helper Methods ----

fn log_iteration<S: SearchStrategy>(iter: usize, theta: &Theta, cost: Cost, metric: Option<f64>) {
    let metric = metric.map(|m| format!("{m:.6e}")).unwrap_or_else(|| "n/a".to_string());
    eprintln!(
        "{} iter {iter:>4}: theta = {theta:.6}, NLL = {cost:.6}, {} = {metric}",
        S::NAME,
        S::METRIC
    );
}
