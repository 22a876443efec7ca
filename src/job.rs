//! job — the single composed call every trigger invokes.
//!
//! Minimize the static [`objective`](crate::optimization::objective::objective)
//! from a fixed initial guess and hand back the outcome. Nothing here logs the
//! result or decides what non-convergence means; the trigger handler does.
use ndarray::Array1;
use tracing::instrument;

use crate::optimization::{
    errors::OptResult,
    minimizer::{MinimizeOptions, MinimizeOutcome, Theta, minimize},
    objective::QuadraticBowl,
};

/// Starting point used by scheduled runs.
pub const DEFAULT_X0: f64 = 0.0;

/// Inputs of one minimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct JobConfig {
    pub x0: Theta,
    pub options: MinimizeOptions,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            x0: Array1::from_elem(1, DEFAULT_X0),
            options: MinimizeOptions::default().with_hessian(true),
        }
    }
}

/// Run the scheduled minimization with the default configuration.
pub fn run_minimization() -> OptResult<MinimizeOutcome> {
    run_minimization_with(&JobConfig::default())
}

/// Run the minimization with an explicit starting point and options.
///
/// # Errors
/// Propagates any [`OptError`](crate::optimization::errors::OptError) from
/// the minimizer.
#[instrument(level = "debug", skip_all, fields(dim = config.x0.len()))]
pub fn run_minimization_with(config: &JobConfig) -> OptResult<MinimizeOutcome> {
    minimize(&QuadraticBowl, config.x0.clone(), &(), &config.options)
}
