//! High-level entry point for minimizing a user-provided [`Objective`].
//!
//! This validates the starting point, selects an L-BFGS solver with either
//! Hager–Zhang or More–Thuente line search, wraps the objective in an
//! `ArgMinAdapter`, and delegates the run to `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        MinimizeOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, MinimizeOptions, Objective},
    },
};

/// Minimize `f(x)` from `x0` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(x0, data)`.
/// - Builds an L-BFGS solver according to `opts.line_searcher`.
/// - Runs exactly once; there is no retry on failure.
///
/// # Errors
/// - Any error from `f.check`.
/// - Builder errors from `build_optimizer_*`.
/// - Runtime errors from `run_lbfgs` (objective failures, line-search
///   failures).
///
/// Non-convergence is **not** an error: inspect
/// [`MinimizeOutcome::converged`] and [`MinimizeOutcome::status`].
///
/// # Example
/// ```
/// use ndarray::array;
/// use scheduled_minimize::optimization::prelude::*;
///
/// struct Parabola;
///
/// impl Objective for Parabola {
///     type Data = ();
///     fn value(&self, x: &Theta, _: &()) -> OptResult<Cost> {
///         Ok((x[0] - 1.5).powi(2))
///     }
/// }
///
/// let out = minimize(&Parabola, array![0.0], &(), &MinimizeOptions::default())?;
/// assert!(out.converged);
/// assert!((out.x[0] - 1.5).abs() < 1e-4);
/// # Ok::<(), OptError>(())
/// ```
pub fn minimize<F: Objective>(
    f: &F, x0: Theta, data: &F::Data, opts: &MinimizeOptions,
) -> OptResult<MinimizeOutcome> {
    f.check(&x0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(x0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(x0, opts, problem, solver)
        }
    }
}
