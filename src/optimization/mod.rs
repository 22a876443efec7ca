//! optimization — minimizer, static objective, and unified error surface.
//!
//! Purpose
//! -------
//! Provide everything the scheduled job needs to run one minimization: an
//! argmin-backed L-BFGS layer (`minimizer`), the fixed objective it is
//! pointed at (`objective`), and a single error enum (`errors::OptError`)
//! with its result alias.
//!
//! Conventions
//! -----------
//! - Parameters, gradients and Hessians are `ndarray` aliases (`Theta`,
//!   `Grad`, `Hessian`).
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw argmin errors.
//! - This layer only emits `debug!`/`warn!` diagnostics; reporting results
//!   is the trigger layer's job.

pub mod errors;
pub mod minimizer;
pub mod objective;

pub use self::errors::{OptError, OptResult};

// Downstream code can write
//
//     use scheduled_minimize::optimization::prelude::*;
//
// to import the main optimization surface in a single line.
pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::minimizer::prelude::*;
    pub use super::objective::{QuadraticBowl, objective};
}
