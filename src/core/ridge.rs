//! core/ridge.rs — ridge regression via the singular value decomposition.
//!
//! Fits w minimizing ||y − Aw||² + α²||w||² on column-centered data. The SVD
//! route keeps the solve well-conditioned for any α > 0: each singular value
//! σ becomes σ/(σ² + α²) in the pseudo-inverse.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrainError {
    #[error("insufficient data: {0}")]
    InsufficientData(&'static str),
    #[error("SVD failed to converge")]
    SvdFailed,
}

/// Result of a ridge fit: coefficients, intercept, and the ℓ2 norm of the
/// training residual.
#[derive(Clone, Debug)]
pub struct RidgeFit {
    pub coef: DVector<f64>,
    pub intercept: f64,
    pub residual: f64,
}

/// Fit ridge coefficients for `a` (one sample per row) against targets `y`.
///
/// α = 0 turns this into plain least squares and fails on a rank-deficient
/// design matrix; any α > 0 always produces a solution.
pub fn fit(a: &DMatrix<f64>, y: &DVector<f64>, alpha: f64) -> Result<RidgeFit, TrainError> {
    let (rows, cols) = a.shape();
    if rows == 0 || cols == 0 {
        return Err(TrainError::InsufficientData("empty design matrix"));
    }
    if y.len() != rows {
        return Err(TrainError::InsufficientData(
            "target length does not match sample count",
        ));
    }

    // Center columns and targets; the offsets come back as the intercept.
    let col_means = a.row_mean();
    let mut centered = a.clone();
    for (j, mut col) in centered.column_iter_mut().enumerate() {
        col.add_scalar_mut(-col_means[j]);
    }
    let y_mean = y.mean();
    let y_centered = y.add_scalar(-y_mean);

    let svd = centered.svd(true, true);
    let u = svd.u.as_ref().ok_or(TrainError::SvdFailed)?;
    let v_t = svd.v_t.as_ref().ok_or(TrainError::SvdFailed)?;
    let sigma = &svd.singular_values;

    if alpha == 0.0 {
        let sigma_max = sigma.max();
        if sigma.iter().any(|&s| s <= 1e-12 * sigma_max.max(1e-300)) {
            return Err(TrainError::InsufficientData(
                "design matrix is singular at alpha = 0",
            ));
        }
    }

    // σ → σ/(σ² + α²), the regularized pseudo-inverse spectrum.
    let filtered = DVector::from_iterator(
        sigma.len(),
        sigma.iter().map(|&s| s / (s * s + alpha * alpha)),
    );

    let coef = v_t.transpose() * DMatrix::from_diagonal(&filtered) * u.transpose() * y_centered;
    let intercept = y_mean - col_means.transpose().dot(&coef);
    let residual = (y - (a * &coef).add_scalar(intercept)).norm();

    Ok(RidgeFit {
        coef,
        intercept,
        residual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_system_is_recovered() {
        // y = 2*x0 - 3*x1 + 1, no noise.
        let a = DMatrix::from_row_slice(
            4,
            2,
            &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, -1.0],
        );
        let y = DVector::from_row_slice(&[3.0, -2.0, 0.0, 8.0]);
        let fit = fit(&a, &y, 0.0).unwrap();
        assert!((fit.coef[0] - 2.0).abs() < 1e-9, "coef {:?}", fit.coef);
        assert!((fit.coef[1] + 3.0).abs() < 1e-9);
        assert!((fit.intercept - 1.0).abs() < 1e-9);
        assert!(fit.residual < 1e-9);
    }

    #[test]
    fn regularization_shrinks_coefficients() {
        let a = DMatrix::from_row_slice(4, 1, &[-1.5, -0.5, 0.5, 1.5]);
        let y = DVector::from_row_slice(&[-3.0, -1.0, 1.0, 3.0]);
        let exact = fit(&a, &y, 0.0).unwrap();
        let ridged = fit(&a, &y, 1.0).unwrap();
        assert!((exact.coef[0] - 2.0).abs() < 1e-9);
        assert!(ridged.coef[0] > 0.0);
        assert!(ridged.coef[0] < exact.coef[0]);
    }

    #[test]
    fn empty_and_mismatched_input_fail() {
        let empty = DMatrix::<f64>::zeros(0, 3);
        let y0 = DVector::<f64>::zeros(0);
        assert!(matches!(
            fit(&empty, &y0, 1.0),
            Err(TrainError::InsufficientData(_))
        ));

        let a = DMatrix::from_row_slice(2, 1, &[1.0, 2.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            fit(&a, &y, 1.0),
            Err(TrainError::InsufficientData(_))
        ));
    }

    #[test]
    fn singular_design_fails_only_without_regularization() {
        // Two identical columns: rank deficient after centering.
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            fit(&a, &y, 0.0),
            Err(TrainError::InsufficientData(_))
        ));
        assert!(fit(&a, &y, 1.0).is_ok());
    }

    #[test]
    fn fitting_twice_is_identical() {
        let a = DMatrix::from_row_slice(3, 2, &[0.1, 0.9, 0.4, 0.2, 0.8, 0.5]);
        let y = DVector::from_row_slice(&[1.0, 0.0, 0.5]);
        let first = fit(&a, &y, 1.0).unwrap();
        let second = fit(&a, &y, 1.0).unwrap();
        assert_eq!(first.coef, second.coef);
        assert_eq!(first.intercept, second.intercept);
    }
}
