//! minimizer::finite_diff — finite-difference gradient and Hessian helpers.
//!
//! Purpose
//! -------
//! Provide validated finite-difference derivatives so the adapter and the
//! post-run diagnostics never call the `finitediff` API directly.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward-difference gradient with error capture.
//! - [`compute_hessian`]: central-difference Hessian of a gradient function,
//!   falling back to forward differences when validation fails, then
//!   symmetrized.
//!
//! Invariants & assumptions
//! ------------------------
//! - Any error raised by the objective while differencing is routed into the
//!   shared `closure_err` cell and treated as a hard failure.
//! - Returned gradients and Hessians satisfy [`validate_grad`] and
//!   [`validate_hessian`].
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        types::{Grad, Hessian, Theta},
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient with error capture and validation.
///
/// `func` must write any evaluation error into `closure_err` and return
/// `NaN`; this helper clears the cell on entry and inspects it afterwards.
///
/// # Errors
/// - The captured error, converted into `OptError`.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}

/// Finite-difference Hessian of a gradient function at `theta`.
///
/// Central differences are tried first; a validation failure there falls back
/// to forward differences, whose validation result is the one surfaced.
///
/// # Errors
/// - `OptError::HessianDimMismatch` / `OptError::InvalidHessian` when the
///   forward-difference fallback also fails validation.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut cent_hess = theta.central_hessian(f);
    match validate_hessian(&cent_hess, dim) {
        Ok(_) => {
            symmetrize_hess(&mut cent_hess);
            Ok(cent_hess)
        }
        Err(_) => {
            let mut forward_hess = theta.forward_hessian(f);
            validate_hessian(&forward_hess, dim)?;
            symmetrize_hess(&mut forward_hess);
            Ok(forward_hess)
        }
    }
}

// ---- Helper methods ----

/// Average each off-diagonal pair in place; the diagonal is untouched.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use argmin::core::ArgminError;
    use ndarray::{Array1, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forward-difference gradient computation with and without closure errors.
    // - Validation failures for non-finite gradients.
    // - Finite-difference Hessian construction, symmetry, and validation.
    //
    // They intentionally DO NOT cover end-to-end optimizer behavior.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `run_fd_diff` approximates the gradient of a shifted
    // quadratic.
    //
    // Given
    // -----
    // - `theta = [0, 1]` and `f(x) = Σ (xᵢ - 2)²`.
    //
    // Expect
    // ------
    // - A gradient close to `2 (x - 2) = [-4, -2]`.
    fn run_fd_diff_quadratic_returns_valid_gradient() {
        // Arrange
        let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| x.mapv(|v| (v - 2.0).powi(2)).sum();

        // Act
        let grad = run_fd_diff(&theta, &f, &closure_err)
            .expect("Gradient for quadratic should be computed successfully");

        // Assert
        assert_eq!(grad.len(), theta.len());
        assert!((grad[0] + 4.0).abs() < 1e-4);
        assert!((grad[1] + 2.0).abs() < 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that `run_fd_diff` propagates an error captured in `closure_err`.
    //
    // Given
    // -----
    // - A closure that stores an `ArgminError` and returns `NaN`.
    //
    // Expect
    // ------
    // - `Err(OptError::NotImplemented { .. })`.
    fn run_fd_diff_closure_error_is_propagated() {
        // Arrange
        let theta: Theta = Array1::from(vec![1.0_f64]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            let argmin_err = ArgminError::NotImplemented { text: "fd test".to_string() };
            closure_err.replace(Some(argmin_err.into()));
            f64::NAN
        };

        // Act
        let result = run_fd_diff(&theta, &f, &closure_err);

        // Assert
        match result {
            Err(OptError::NotImplemented { text }) => assert_eq!(text, "fd test"),
            other => panic!("Unexpected result from closure error: {other:?}"),
        }
    }

    #[test]
    fn run_fd_diff_non_finite_gradient_yields_invalidgradient_error() {
        let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_x: &Theta| f64::NAN;

        let result = run_fd_diff(&theta, &f, &closure_err);

        assert!(matches!(result, Err(OptError::InvalidGradient { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Verify that `compute_hessian` recovers `2 I` for `f(x) = ||x||²`.
    //
    // Given
    // -----
    // - Gradient function `g(x) = 2x` at `x = [1, 2]`.
    //
    // Expect
    // ------
    // - A symmetric 2x2 matrix close to `diag(2, 2)`.
    fn compute_hessian_quadratic_returns_symmetric_matrix() {
        // Arrange
        let theta: Theta = Array1::from(vec![1.0_f64, 2.0]);
        let grad_fn = |theta: &Theta| theta.mapv(|x| 2.0 * x);

        // Act
        let hess = compute_hessian(&grad_fn, &theta)
            .expect("Hessian for quadratic gradient should be computed successfully");

        // Assert
        assert_eq!(hess.shape(), &[2, 2]);
        assert_eq!(hess[[0, 1]], hess[[1, 0]]);
        assert!((hess[[0, 0]] - 2.0).abs() < 1e-6);
        assert!(hess[[0, 1]].abs() < 1e-6);
    }

    #[test]
    fn compute_hessian_non_finite_entries_yield_invalidhessian_error() {
        let theta: Theta = Array1::from(vec![0.0_f64]);
        let grad_fn = |_theta: &Theta| Array1::from(vec![f64::NAN]);

        let result = compute_hessian(&grad_fn, &theta);

        assert!(matches!(result, Err(OptError::InvalidHessian { .. })));
    }

    #[test]
    fn symmetrize_hess_makes_matrix_symmetric() {
        let mut h: Hessian = Array2::from_shape_vec((2, 2), vec![1.0_f64, 2.0, 0.0, 3.0]).unwrap();

        symmetrize_hess(&mut h);

        assert_eq!(h[[0, 0]], 1.0);
        assert_eq!(h[[1, 1]], 3.0);
        assert_eq!(h[[0, 1]], 1.0);
        assert_eq!(h[[1, 0]], 1.0);
    }
}
