#![allow(non_snake_case)]

//! Modified Cholesky factorisation.
//!
//! UdU' factorisation of positive semi-definite matrices. Where:
//! U is unit upper triangular
//! d is diagonal
//!
//! Storage:
//! UD format of UdU' factor
//! strict_upper_triangle(UD) = strict_upper_triangle(U), diagonal(UD) = d, strict_lower_triangle(UD) ignored

use nalgebra as na;
use na::{allocator::Allocator, DefaultAllocator};
use na::{DimName, MatrixN, RealField};

use super::rcond;

/// In place modified upper triangular Cholesky factor of a positive definite or semi-definite matrix M.
///
/// Reference: A+G p.218 Upper Cholesky algorithm modified for UdU'
///
/// Input: M, strict lower triangle of M is ignored in computation
///
/// Output: M as UdU' factor
///
/// Return: reciprocal condition number, -1 if negative, 0 if semi-definite (including zero)
pub fn UdUfactor<N: RealField, D: DimName>(M: &mut MatrixN<N, D>) -> N
where
    DefaultAllocator: Allocator<N, D, D>,
{
    let n = M.nrows();
    for j in (0..n).rev() {
        let mut d = M[(j, j)];

        if d > N::zero() {
            // Positive definite
            d = N::one() / d;

            for i in 0..j {
                let e = M[(i, j)];
                M[(i, j)] = d * e;
                for k in 0..=i {
                    let t = e * M[(k, j)];
                    M[(k, i)] -= t;
                }
            }
        } else if d == N::zero() {
            // Possibly semi-definite, check not negative
            for i in 0..j {
                if M[(i, j)] != N::zero() {
                    return N::one().neg();
                }
            }
        } else {
            // Negative
            return N::one().neg();
        }
    }

    rcond::rcond_symetric(M)
}

/// Reciprocal condition number of a PSD matrix from its UdU' factor, the matrix is not modified.
pub fn UdUrcond<N: RealField, D: DimName>(X: &MatrixN<N, D>) -> N
where
    DefaultAllocator: Allocator<N, D, D>,
{
    let mut UD = X.clone();
    UdUfactor(&mut UD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix2;

    #[test]
    fn factor_pd() {
        let X = Matrix2::new(2.0, 1.0, 1.0, 1.0);
        let mut UD = X;
        let rcond = UdUfactor(&mut UD);
        assert!(rcond > 0.0);
        // d = [2 - 1*1/1, 1], U(0,1) = 1
        approx::assert_relative_eq!(UD[(1, 1)], 1.0);
        approx::assert_relative_eq!(UD[(0, 1)], 1.0);
        approx::assert_relative_eq!(UD[(0, 0)], 1.0);
    }

    #[test]
    fn factor_semi_definite() {
        assert_eq!(UdUrcond(&Matrix2::new(1.0, 0.0, 0.0, 0.0)), 0.0);
        assert_eq!(UdUrcond(&Matrix2::new(1.0, 1.0, 1.0, 1.0)), 0.0);
    }

    #[test]
    fn factor_negative() {
        assert!(UdUrcond(&Matrix2::new(1.0, 2.0, 2.0, 1.0)) < 0.0);
        assert!(UdUrcond(&Matrix2::new(-1.0, 0.0, 0.0, 1.0)) < 0.0);
        assert!(UdUrcond(&Matrix2::new(1.0, 1.0, 1.0, 0.0)) < 0.0);
    }
}
