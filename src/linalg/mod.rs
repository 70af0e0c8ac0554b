#![allow(non_snake_case)]

//! Linear algebra support for covariance checks.

pub mod cholesky;
pub mod rcond;

use nalgebra::{Matrix2, RealField};

use crate::error::{FilterError, Result};

/**
 * Checks a the reciprocal condition number is >= 0
 * IEC 559 NaN values are never true
 */
pub fn check_non_negativ<N: RealField>(rcond: N, message: &'static str) -> Result<N> {
    if rcond >= N::zero() {
        Ok(rcond)
    } else {
        Err(FilterError::InvalidCovariance(message))
    }
}

/// Checks a 2x2 covariance is finite, symmetric and PSD.
///
/// Return: the reciprocal condition number of the covariance.
pub fn check_covariance<N: RealField>(X: &Matrix2<N>) -> Result<N> {
    if X.iter().any(|x| !x.is_finite()) {
        return Err(FilterError::InvalidCovariance("X not finite"));
    }
    let scale = X[(0, 0)].abs() + X[(1, 1)].abs() + N::one();
    let tol: N = nalgebra::convert(1e-12);
    if (X[(0, 1)] - X[(1, 0)]).abs() > tol * scale {
        return Err(FilterError::InvalidCovariance("X not symmetric"));
    }
    check_non_negativ(cholesky::UdUrcond(X), "X not PSD")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covariance_checks() {
        assert!(check_covariance(&Matrix2::new(0.01, 0.0, 0.0, 0.001)).is_ok());
        assert_eq!(
            check_covariance(&Matrix2::new(0.01, 0.002, 0.0, 0.001)),
            Err(FilterError::InvalidCovariance("X not symmetric"))
        );
        assert_eq!(
            check_covariance(&Matrix2::new(0.01, 0.0, 0.0, -0.001)),
            Err(FilterError::InvalidCovariance("X not PSD"))
        );
        assert_eq!(
            check_covariance(&Matrix2::new(f64::INFINITY, 0.0, 0.0, 1.0)),
            Err(FilterError::InvalidCovariance("X not finite"))
        );
    }
}
