//! minimizer — argmin-powered unconstrained minimization.
//!
//! Purpose
//! -------
//! Provide a small, validated layer over argmin's L-BFGS. Callers implement
//! [`Objective`] and call [`minimize`] with a starting point and
//! [`MinimizeOptions`]; they get back a [`MinimizeOutcome`] and never touch
//! argmin types.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] exposes an objective as an argmin
//!   `CostFunction + Gradient`, finite-differencing when no analytic
//!   gradient is implemented.
//! - [`builders`] construct L-BFGS with the configured line search and
//!   tolerances; [`run::run_lbfgs`] executes it and normalizes the state.
//! - [`finite_diff`] and [`validation`] hold derivative helpers and shared
//!   guards.
//!
//! Invariants & assumptions
//! ------------------------
//! - Objectives report domain problems as [`OptError`](crate::optimization::errors::OptError),
//!   never panics.
//! - Options are validated on construction; the solver layer trusts them.
//! - A run is a single attempt. Non-convergence is data on the outcome.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover adapter gradients, builder wiring,
//!   finite differences, validation guards, and outcome mapping.
//! - `tests/` exercises the composed job end to end.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{LineSearcher, MinimizeOptions, MinimizeOutcome, Objective, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{LineSearcher, MinimizeOptions, MinimizeOutcome, Objective, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
