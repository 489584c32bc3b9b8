//! loglik_optimizer::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the L-BFGS solvers used by the
//! quasi-Newton strategy. These helpers hide Argmin’s generic wiring and
//! apply crate-level options (line-search constant, memory size) so that
//! higher-level code can request a configured solver without touching
//! Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Construct L-BFGS solvers with Backtracking (Armijo), More–Thuente or
//!   Hager–Zhang line search based on crate-level aliases.
//! - Wire `opts.linesearch_tol` into the sufficient-decrease constant of
//!   the chosen line search.
//! - Start More–Thuente and Hager–Zhang from a short trial step
//!   ([`DEFAULT_LINESEARCH_STEP`]); both extrapolate from there. Backtracking
//!   can only shorten a step, so it keeps argmin's unit first trial.
//! - Leave the initial parameter vector, stopping rules and iteration
//!   budget to the driver loop, keeping these builders side-effect free.
//!
//! Invariants & assumptions
//! ------------------------
//! - All solvers operate on the canonical numeric types [`Theta`], [`Grad`]
//!   and [`Cost`].
//! - The L-BFGS memory (`m`) is either provided via `opts.lbfgs_mem` or
//!   defaults to [`DEFAULT_LBFGS_MEM`].
//! - Argmin’s own tolerance checks are not configured: convergence is
//!   decided by the driver from the gradient norm.
//!
//! Conventions
//! -----------
//! - Any invalid line-search constant rejected by Argmin is surfaced as an
//!   [`OptError`](crate::optimization::errors::OptError) through
//!   `From<argmin::core::Error>`.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each builder accepts default and explicit
//!   memory and that out-of-range constants are reported as errors.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            BacktrackingLS, DEFAULT_BACKTRACK_RHO, DEFAULT_LBFGS_MEM, DEFAULT_LINESEARCH_STEP,
            HagerZhangLS, LbfgsBacktracking, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS,
        },
    },
};
use argmin::solver::linesearch::{LineSearch, condition::ArmijoCondition};

/// Curvature constant shared by the Wolfe-type line searches.
const WOLFE_CURVATURE: f64 = 0.9;

/// build_optimizer_backtracking — construct L-BFGS with Armijo backtracking.
///
/// Purpose
/// -------
/// Default quasi-Newton solver. Backtracking evaluates only the cost at
/// trial points, so a trial step that leaves the model domain (cost `+∞`)
/// is simply shortened until it lands back inside.
///
/// Parameters
/// ----------
/// - `opts`: `&MLEOptions`
///   - `opts.linesearch_tol`: Armijo constant `c1`.
///   - `opts.lbfgs_mem`: optional history size (`m`).
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`) when Argmin rejects the
///   Armijo constant or the shrink factor.
pub fn build_optimizer_backtracking(opts: &MLEOptions) -> OptResult<LbfgsBacktracking> {
    let condition = ArmijoCondition::new(opts.linesearch_tol)?;
    let backtracking = BacktrackingLS::new(condition).rho(DEFAULT_BACKTRACK_RHO)?;
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    Ok(LbfgsBacktracking::new(backtracking, mem))
}

/// build_optimizer_more_thuente — construct L-BFGS with More–Thuente line search.
///
/// Parameters
/// ----------
/// - `opts`: `&MLEOptions`
///   - `opts.linesearch_tol`: sufficient-decrease constant `c1`
///     (curvature constant fixed at 0.9).
///   - `opts.lbfgs_mem`: optional history size (`m`).
///
/// The first trial step is [`DEFAULT_LINESEARCH_STEP`].
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`) when `with_c` rejects the
///   constants.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mut more_thuente = MoreThuenteLS::new().with_c(opts.linesearch_tol, WOLFE_CURVATURE)?;
    more_thuente.initial_step_length(DEFAULT_LINESEARCH_STEP)?;
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    Ok(LbfgsMoreThuente::new(more_thuente, mem))
}

/// build_optimizer_hager_zhang — construct L-BFGS with Hager–Zhang line search.
///
/// Parameters
/// ----------
/// - `opts`: `&MLEOptions`
///   - `opts.linesearch_tol`: `delta` of the approximate Wolfe conditions.
///     `sigma` is fixed at 0.9 and argmin requires `0 < delta ≤ sigma`, so
///     `delta` above 0.9 is rejected.
///   - `opts.lbfgs_mem`: optional history size (`m`).
///
/// The first trial step is [`DEFAULT_LINESEARCH_STEP`].
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`) when
///   `with_delta_sigma` rejects the constants.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mut hager_zhang =
        HagerZhangLS::new().with_delta_sigma(opts.linesearch_tol, WOLFE_CURVATURE)?;
    hager_zhang.initial_step_length(DEFAULT_LINESEARCH_STEP)?;
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    Ok(LbfgsHagerZhang::new(hager_zhang, mem))
}
