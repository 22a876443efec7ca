//! optimization::objective — the job's static objective function.
//!
//! The scheduled job minimizes a fixed placeholder: a shifted convex bowl
//! `f(x) = Σ (xᵢ − 2)² + 1`, whose unique minimum is `1.0` at `xᵢ = 2`.
//! It is pure and deterministic; a scalar problem is a length-1 `Theta`.
use crate::optimization::{
    errors::OptResult,
    minimizer::{Cost, Grad, Objective, Theta},
};

/// Coordinate of the minimum along every axis.
pub const BOWL_CENTER: f64 = 2.0;

/// Objective value at the minimum.
pub const BOWL_FLOOR: f64 = 1.0;

/// Evaluate the placeholder objective at `x`.
pub fn objective(x: &Theta) -> f64 {
    x.iter().map(|&xi| (xi - BOWL_CENTER).powi(2)).sum::<f64>() + BOWL_FLOOR
}

/// [`objective`] exposed to the minimizer.
///
/// No analytic gradient is provided, so the minimizer differentiates it
/// numerically, the same way it treats any black-box objective.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticBowl;

impl Objective for QuadraticBowl {
    type Data = ();

    fn value(&self, x: &Theta, _data: &()) -> OptResult<Cost> {
        Ok(objective(x))
    }
}

/// Closed-form gradient, used by tests to check the numerical one.
pub fn objective_grad(x: &Theta) -> Grad {
    x.mapv(|xi| 2.0 * (xi - BOWL_CENTER))
}
