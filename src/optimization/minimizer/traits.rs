//! Public API surface for unconstrained minimization.
//!
//! - [`Objective`]: trait implemented by anything that can be minimized.
//! - [`MinimizeOptions`] and [`Tolerances`]: validated optimizer configuration.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`MinimizeOutcome`]: normalized result returned by [`minimize`](super::minimize).
//!
//! Convention: the objective value *is* the cost argmin minimizes; analytic
//! gradients, when supplied, are `∇f(x)` with no sign change.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        types::{Cost, FnEvalMap, Grad, Hessian, Theta},
        validation::{
            validate_initial_guess, validate_solution, validate_value, verify_tol_cost,
            verify_tol_grad,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::{collections::BTreeMap, fmt, str::FromStr};

/// User-implemented objective interface.
///
/// - `type Data`: payload carried into `value`/`grad`/`check`; `()` for
///   static objectives.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `f(x)`. Return a
///   descriptive `OptError` for inputs outside the objective's domain.
///
/// Optional:
/// - `check(&Theta, &Data)`: reject an unusable starting point. Called once
///   before optimization; defaults to [`validate_initial_guess`].
/// - `grad(&Theta, &Data)`: analytic gradient `∇f(x)`. When not implemented,
///   finite differences are used automatically.
pub trait Objective {
    type Data: 'static;

    // Required methods
    fn value(&self, x: &Theta, data: &Self::Data) -> OptResult<Cost>;

    // Optional methods
    fn check(&self, x: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_initial_guess(x)
    }

    fn grad(&self, _x: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Parses case-insensitively from `"MoreThuente"` / `"HagerZhang"`; unknown
/// names return `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances`: numerical tolerances and iteration limits.
/// - `line_searcher: LineSearcher`: line-search algorithm used by L-BFGS.
/// - `verbose: bool`: logs the starting state and, with the `obs_slog`
///   feature, attaches argmin's per-iteration observer.
/// - `lbfgs_mem: Option<usize>`: history size; `None` uses
///   [`DEFAULT_LBFGS_MEM`](super::DEFAULT_LBFGS_MEM).
/// - `hessian: bool`: compute a finite-difference Hessian at the solution.
///
/// Default:
/// - `tols`: `tol_grad = 1e-6`, `tol_cost = None`, `max_iter = 300`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`, `lbfgs_mem`: `None`, `hessian`: `false`
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
    pub hessian: bool,
}

impl MinimizeOptions {
    /// Create a new set of optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose: false, lbfgs_mem, hessian: false })
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_hessian(mut self, hessian: bool) -> Self {
        self.hessian = hessian;
        self
    }
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(300) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
            hessian: false,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// At least one of the three must be provided (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `minimize`.
///
/// - `x`: best parameter vector found.
/// - `value`: objective value at `x`.
/// - `converged`: `true` only when the solver stopped on its own convergence
///   test or hit a target cost. Running out of iterations is *not*
///   convergence.
/// - `status`: human-readable termination status.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: argmin's counters, e.g. `cost_count`, `gradient_count`.
/// - `grad_norm`: norm of the last available gradient, if present.
/// - `hessian`: finite-difference Hessian at `x` when requested.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeOutcome {
    pub x: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
    pub hessian: Option<Hessian>,
}

impl MinimizeOutcome {
    /// Build a validated [`MinimizeOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - Propagates validation errors for `x` or `value`.
    pub fn new(
        x: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let x = validate_solution(x)?;
        validate_value(value)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                (converged, format!("{reason:?}"))
            }
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { x, value, converged, status, iterations, fn_evals, grad_norm, hessian: None })
    }

    /// Attach a curvature diagnostic computed after the run.
    pub fn with_hessian(mut self, hessian: Hessian) -> Self {
        self.hessian = Some(hessian);
        self
    }
}

impl fmt::Display for MinimizeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x: Vec<String> = self.x.iter().map(|v| format!("{v:.6}")).collect();
        write!(
            f,
            "x=[{}], value={:.6}, converged={}, status={}, iterations={}",
            x.join(", "),
            self.value,
            self.converged,
            self.status,
            self.iterations
        )?;
        let counts: BTreeMap<_, _> = self.fn_evals.iter().collect();
        for (name, count) in counts {
            write!(f, ", {name}={count}")?;
        }
        if let Some(norm) = self.grad_norm {
            write!(f, ", grad_norm={norm:.3e}")?;
        }
        Ok(())
    }
}
