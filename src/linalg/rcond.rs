use nalgebra::{allocator::Allocator, DefaultAllocator, Dim, MatrixMN, RealField};

/**
 * Numerical comparison of reciprocal condition numbers
 *  Required for checking covariance matrices before filtering
 */

/* Estimate the reciprocal condition number of the diagonal of a matrix for inversion.
 *
 * The Condition Number is defined from a matrix norm.
 *  Choose max element of the diagonal as the norm of the original matrix.
 *  Assume this norm for inverse matrix is min element.
 *  Therefore rcond = min/max
 *
 * Note:
 *  Defined to be 0 for semi-definite and 0 for an empty matrix
 *  Defined to be 0 for max and min infinite
 *  Defined to be <0 for negative matrix (diagonal element a value < 0)
 *  Defined to be <0 with any NaN element
 *
 *  By definition rcond <= 1 as min<=max
 */
pub fn rcond_symetric<N: RealField, R: Dim, C: Dim>(sm: &MatrixMN<N, R, C>) -> N
where
    DefaultAllocator: Allocator<N, R, C>,
{
    // Special case an empty matrix
    let n = sm.nrows().min(sm.ncols());
    if n == 0 {
        N::zero()
    } else {
        let mut mind = sm[(0, 0)];
        let mut maxd = mind;

        for i in 0..n {
            let d = sm[(i, i)];
            if d != d {
                // NaN
                mind = N::one().neg();
                break;
            }
            if d < mind {
                mind = d;
            }
            if d > maxd {
                maxd = d;
            }
        }

        rcond_min_max(mind, maxd)
    }
}

fn rcond_min_max<N: RealField>(mind: N, maxd: N) -> N {
    if mind < N::zero() {
        // matrix is negative
        mind // mind < 0 but does not represent a rcond
    } else {
        // mind may still be -0, this is progated into rcond
        debug_assert!(mind <= maxd);

        let rcond = mind / maxd; // rcond from min/max norm
        if rcond != rcond {
            // NaN, singular due to (mind == maxd) == (zero or infinity)
            N::zero()
        } else {
            rcond
        }
    }
}
