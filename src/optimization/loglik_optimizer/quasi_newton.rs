//! loglik_optimizer::quasi_newton — gradient-based L-BFGS search.
//!
//! Purpose
//! -------
//! Run an `argmin` L-BFGS solver one iteration at a time so the shared
//! driver loop ([`run_search`](super::run::run_search)) owns stopping rules,
//! budgets and diagnostics.
//!
//! Key behaviors
//! -------------
//! - The model is wrapped in a fused [`ArgMinAdapter`], so models that
//!   override `value_and_grad` share work between value and gradient.
//! - `start` calls `Solver::init` (cost and gradient at `θ0`); `step` calls
//!   `Solver::next_iter` on a clone-protected state, then updates best-so-far
//!   bookkeeping and evaluation counters the way `argmin`'s `Executor` does.
//! - L-BFGS reports a failed line search as `Ok` with a terminated state
//!   (and no parameter vector). `step` turns that into an error carrying
//!   the line search's reason, so it is not counted as an iteration.
//! - The convergence metric is the L2 norm of the current gradient.
//!
//! Invariants & assumptions
//! ------------------------
//! - A failing `init` or `next_iter` leaves the last valid state in place;
//!   the best point is tracked independently of `argmin`'s state.
//! - A gradient request at an infeasible point (`OutsideDomain`) surfaces as
//!   a step failure, never as a panic.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Theta, adapter::ArgMinAdapter, run::SearchStrategy,
        traits::NegLogLikelihood, types::QuasiNewtonState,
    },
};
use argmin::core::{Problem, Solver, State};
use argmin_math::ArgminL2Norm;

/// L-BFGS search state over a borrowed model and data set.
///
/// `S` is any `argmin` solver over [`QuasiNewtonState`]; in practice one of
/// the aliases built by [`builders`](super::builders).
pub struct QuasiNewtonSearch<'a, F: NegLogLikelihood, S> {
    problem: Problem<ArgMinAdapter<'a, F>>,
    solver: S,
    state: Option<QuasiNewtonState>,
    best_param: Theta,
    best_cost: Cost,
    tol_grad: f64,
}

impl<'a, F, S> QuasiNewtonSearch<'a, F, S>
where
    F: NegLogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, QuasiNewtonState>,
{
    /// Prepare a search from `theta0`. Nothing is evaluated until
    /// [`SearchStrategy::start`].
    pub fn new(f: &'a F, data: &'a F::Data, theta0: Theta, solver: S, tol_grad: f64) -> Self {
        Self {
            problem: Problem::new(ArgMinAdapter::fused(f, data)),
            solver,
            state: Some(QuasiNewtonState::new().param(theta0.clone())),
            best_param: theta0,
            best_cost: f64::INFINITY,
            tol_grad,
        }
    }

    fn take_state(&mut self) -> OptResult<QuasiNewtonState> {
        self.state.take().ok_or_else(|| OptError::NotInitialized {
            text: "quasi-Newton state missing after a failed iteration".to_string(),
        })
    }

    /// `ConditionViolated` with `argmin`'s reason if the solver gave up.
    fn check_terminated(state: &QuasiNewtonState) -> OptResult<()> {
        if !state.terminated() {
            return Ok(());
        }
        let text = match state.get_termination_reason() {
            Some(reason) => reason.to_string(),
            None => state.get_termination_status().to_string(),
        };
        Err(OptError::ConditionViolated { text })
    }

    fn record(&mut self, mut state: QuasiNewtonState) {
        state.func_counts(&self.problem);
        let cost = state.get_cost();
        if cost < self.best_cost {
            if let Some(param) = state.get_param() {
                self.best_param = param.clone();
                self.best_cost = cost;
            }
        }
        self.state = Some(state);
    }
}

impl<'a, F, S> SearchStrategy for QuasiNewtonSearch<'a, F, S>
where
    F: NegLogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, QuasiNewtonState>,
{
    const NAME: &'static str = "quasi-newton";
    const METRIC: &'static str = "|grad|";

    fn start(&mut self) -> OptResult<()> {
        let state = self.take_state()?;
        let backup = state.clone();
        match self.solver.init(&mut self.problem, state) {
            Ok((mut state, _)) => {
                state.update();
                self.record(state);
                Ok(())
            }
            Err(e) => {
                self.state = Some(backup);
                Err(e.into())
            }
        }
    }

    fn step(&mut self) -> OptResult<()> {
        let state = self.take_state()?;
        let backup = state.clone();
        let result = self
            .solver
            .next_iter(&mut self.problem, state)
            .map_err(OptError::from)
            .and_then(|(state, _)| Self::check_terminated(&state).map(|()| state));
        match result {
            Ok(mut state) => {
                state.update();
                state.increment_iter();
                self.record(state);
                Ok(())
            }
            Err(e) => {
                self.state = Some(backup);
                Err(e)
            }
        }
    }

    fn metric(&self) -> Option<f64> {
        self.state.as_ref().and_then(|s| s.get_gradient()).map(|g| g.l2_norm())
    }

    fn tolerance(&self) -> f64 {
        self.tol_grad
    }

    fn best(&self) -> (&Theta, Cost) {
        (&self.best_param, self.best_cost)
    }

    fn fn_evals(&self) -> FnEvalMap {
        self.state.as_ref().map(|s| s.get_func_counts().clone()).unwrap_or_default()
    }
}
