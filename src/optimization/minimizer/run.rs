//! Execution helper that runs an `argmin` solver on an [`Objective`] and
//! returns a crate-friendly [`MinimizeOutcome`].
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        MinimizeOptions, MinimizeOutcome, Objective, Theta, adapter::ArgMinAdapter,
        finite_diff::compute_hessian, types::Grad,
    },
};
use argmin::core::{CostFunction, Executor, Gradient, State};
use argmin_math::ArgminL2Norm;
use tracing::{debug, warn};

/// Run an `argmin` optimization for an objective problem.
///
/// Shared by both line-search variants. Wires the adapted problem, the solver,
/// `x0`, optional `max_iters`, and (behind `obs_slog`, when `opts.verbose`)
/// argmin's terminal observer; then converts the final state into a
/// [`MinimizeOutcome`]. When `opts.hessian` is set, a finite-difference
/// Hessian is attached; a failure there is logged and the outcome is kept.
///
/// # Errors
/// - argmin runtime errors (objective failures, line-search failures) via
///   `From<argmin::core::Error>`.
/// - Validation errors while constructing the outcome.
pub fn run_lbfgs<'a, F, S>(
    x0: Theta, opts: &MinimizeOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<MinimizeOutcome>
where
    F: Objective,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    if opts.verbose {
        log_initial_state(&x0, &problem)?;
    }
    let hessian_problem = ArgMinAdapter::new(problem.f, problem.data);
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(x0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    let outcome = MinimizeOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )?;
    debug!(iterations = outcome.iterations, status = %outcome.status, "solver finished");

    if !opts.hessian {
        return Ok(outcome);
    }
    let grad_fn = |x: &Theta| hessian_problem.gradient(x).unwrap_or_else(|_| x.mapv(|_| f64::NAN));
    match compute_hessian(&grad_fn, &outcome.x) {
        Ok(hessian) => Ok(outcome.with_hessian(hessian)),
        Err(err) => {
            warn!(error = %err, "hessian at solution unavailable");
            Ok(outcome)
        }
    }
}

// ---- Helper Methods ----

fn log_initial_state<F>(x0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: Objective,
{
    let f0 = problem.cost(x0)?;
    match problem.gradient(x0) {
        Ok(g) => debug!(f_x0 = f0, grad_norm = g.l2_norm(), "initial state"),
        Err(_) => debug!(f_x0 = f0, "initial state"),
    }
    Ok(())
}
