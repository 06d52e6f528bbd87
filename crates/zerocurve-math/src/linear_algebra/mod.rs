//! Linear algebra utilities.
//!
//! Two solvers cover every system built during curve construction:
//! the Thomas sweep for the tridiagonal natural-spline system and Gaussian
//! elimination with partial pivoting for the dense Smith-Wilson kernel.

use crate::error::{MathError, MathResult};
use crate::tolerances::{PIVOT_FLOOR, TRIDIAGONAL_PIVOT_FLOOR};
use nalgebra::{DMatrix, DVector};

/// Solves a tridiagonal system of equations efficiently.
///
/// The system has the form:
/// ```text
/// | b[0]  c[0]   0    ...   0      | | x[0]   |   | d[0]   |
/// | a[0]  b[1]  c[1]  ...   0      | | x[1]   |   | d[1]   |
/// |  0    a[1]  b[2]  ...   0      | | x[2]   | = | d[2]   |
/// | ...   ...   ...   ...  ...     | | ...    |   | ...    |
/// |  0     0     0   a[n-2] b[n-1] | | x[n-1] |   | d[n-1] |
/// ```
///
/// # Arguments
///
/// * `a` - Lower diagonal (length n-1)
/// * `b` - Main diagonal (length n)
/// * `c` - Upper diagonal (length n-1)
/// * `d` - Right-hand side (length n)
///
/// # Returns
///
/// Solution vector x.
pub fn solve_tridiagonal(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> MathResult<Vec<f64>> {
    let n = b.len();

    if n == 0 {
        return Ok(vec![]);
    }

    if a.len() != n - 1 || c.len() != n - 1 || d.len() != n {
        return Err(MathError::invalid_input(
            "Tridiagonal system has inconsistent dimensions",
        ));
    }

    if b[0].abs() < TRIDIAGONAL_PIVOT_FLOOR {
        return Err(MathError::SingularMatrix);
    }

    // Forward sweep
    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    if n > 1 {
        c_prime[0] = c[0] / b[0];
    }
    d_prime[0] = d[0] / b[0];

    for i in 1..n {
        let denom = b[i] - a[i - 1] * c_prime[i - 1];
        if denom.abs() < TRIDIAGONAL_PIVOT_FLOOR {
            return Err(MathError::SingularMatrix);
        }

        if i < n - 1 {
            c_prime[i] = c[i] / denom;
        }
        d_prime[i] = (d[i] - a[i - 1] * d_prime[i - 1]) / denom;
    }

    // Back substitution
    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];

    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }

    Ok(x)
}

/// Solves `Ax = b` by Gaussian elimination with partial pivoting.
///
/// At each step the row with the largest remaining entry in the pivot column
/// is swapped into place. Pivots smaller than [`PIVOT_FLOOR`] in magnitude are
/// replaced by `±PIVOT_FLOOR` rather than rejected, so near-singular kernels
/// still yield a (large) finite solution.
pub fn solve_linear_system(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<DVector<f64>> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(MathError::invalid_input("Matrix must be square"));
    }
    if n != b.len() {
        return Err(MathError::DimensionMismatch {
            rows1: n,
            cols1: n,
            rows2: b.len(),
            cols2: 1,
        });
    }

    let mut m = a.clone();
    let mut rhs = b.clone();

    for k in 0..n {
        // Partial pivoting
        let mut pivot_row = k;
        let mut pivot_abs = m[(k, k)].abs();
        for i in k + 1..n {
            if m[(i, k)].abs() > pivot_abs {
                pivot_abs = m[(i, k)].abs();
                pivot_row = i;
            }
        }
        if pivot_row != k {
            m.swap_rows(k, pivot_row);
            rhs.swap_rows(k, pivot_row);
        }

        let pivot = floor_pivot(m[(k, k)]);
        m[(k, k)] = pivot;

        for i in k + 1..n {
            let factor = m[(i, k)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in k..n {
                m[(i, j)] -= factor * m[(k, j)];
            }
            rhs[i] -= factor * rhs[k];
        }
    }

    // Back substitution
    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut sum = rhs[i];
        for j in i + 1..n {
            sum -= m[(i, j)] * x[j];
        }
        x[i] = sum / m[(i, i)];
    }

    Ok(x)
}

fn floor_pivot(pivot: f64) -> f64 {
    if pivot.abs() >= PIVOT_FLOOR {
        pivot
    } else if pivot < 0.0 {
        -PIVOT_FLOOR
    } else {
        PIVOT_FLOOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tridiagonal_simple() {
        // Simple 3x3 system
        let a = vec![1.0, 1.0];
        let b = vec![2.0, 2.0, 2.0];
        let c = vec![1.0, 1.0];
        let d = vec![1.0, 2.0, 3.0];

        let x = solve_tridiagonal(&a, &b, &c, &d).unwrap();

        // Verify solution
        assert_relative_eq!(b[0] * x[0] + c[0] * x[1], d[0], epsilon = 1e-10);
        assert_relative_eq!(
            a[0] * x[0] + b[1] * x[1] + c[1] * x[2],
            d[1],
            epsilon = 1e-10
        );
        assert_relative_eq!(a[1] * x[1] + b[2] * x[2], d[2], epsilon = 1e-10);
    }

    #[test]
    fn test_tridiagonal_single_equation() {
        let x = solve_tridiagonal(&[], &[4.0], &[], &[2.0]).unwrap();
        assert_eq!(x.len(), 1);
        assert_relative_eq!(x[0], 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_tridiagonal_vanishing_pivot_is_singular() {
        let leading = solve_tridiagonal(&[1.0], &[1e-16, 2.0], &[1.0], &[1.0, 1.0]);
        assert!(matches!(leading, Err(MathError::SingularMatrix)));

        // Second pivot: 1 - 1 * (1 / 1) = 0.
        let inner = solve_tridiagonal(&[1.0], &[1.0, 1.0], &[1.0], &[1.0, 2.0]);
        assert!(matches!(inner, Err(MathError::SingularMatrix)));

        let x = solve_tridiagonal(&[], &[1e-14], &[], &[1e-14]).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tridiagonal_dimension_mismatch() {
        assert!(solve_tridiagonal(&[1.0], &[2.0, 2.0], &[], &[1.0, 1.0]).is_err());
    }

    #[test]
    fn test_solve_linear_system() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![5.0, 5.0]);

        let x = solve_linear_system(&a, &b).unwrap();

        assert_relative_eq!(x[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_solve_needs_pivoting() {
        // Zero in the leading position forces a row swap
        let a = DMatrix::from_row_slice(3, 3, &[0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let expected = DVector::from_vec(vec![1.0, -1.0, 2.0]);
        let b = &a * &expected;

        let x = solve_linear_system(&a, &b).unwrap();

        for i in 0..3 {
            assert_relative_eq!(x[i], expected[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_singular_system_is_floored() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);

        let x = solve_linear_system(&a, &b).unwrap();

        assert!(x.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![5.0, 5.0, 1.0]);

        assert!(matches!(
            solve_linear_system(&a, &b),
            Err(MathError::DimensionMismatch { .. })
        ));
    }
}
