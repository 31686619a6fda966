//! Symmetric-matrix routines backing the OLS solver.
//!
//! The normal-equations matrix X'X is symmetric, so its inverse is
//! computed through a Jacobi eigendecomposition: stable, dependency-free
//! and more than fast enough for regressor counts in the single digits.
//! Rank deficiency shows up as an eigenvalue at numerical zero and is
//! surfaced as an error rather than inverted through.

use crate::error::{ModelError, Result};
use ndarray::{Array1, Array2};

/// Maximum Jacobi rotations before giving up on convergence.
const MAX_ROTATIONS: usize = 1000;

/// Off-diagonal magnitude below which the matrix counts as diagonal.
const CONVERGENCE_TOL: f64 = 1e-12;

/// Eigenvalues and eigenvectors of a symmetric matrix.
#[derive(Debug, Clone)]
pub struct SymmetricEigen {
    /// Eigenvalues, descending.
    pub values: Array1<f64>,
    /// Eigenvectors; column `j` pairs with `values[j]`.
    pub vectors: Array2<f64>,
}

/// Jacobi eigendecomposition of a symmetric matrix.
pub fn symmetric_eigen(matrix: &Array2<f64>) -> Result<SymmetricEigen> {
    let n = matrix.nrows();
    if n != matrix.ncols() {
        return Err(ModelError::DimensionMismatch {
            expected: n,
            actual: matrix.ncols(),
        });
    }

    let mut a = matrix.clone();
    let mut v = Array2::<f64>::eye(n);

    for _ in 0..MAX_ROTATIONS {
        let (p, q, pivot) = largest_off_diagonal(&a);
        if pivot.abs() < CONVERGENCE_TOL {
            break;
        }
        rotate(&mut a, &mut v, p, q);
    }

    let mut values = Array1::<f64>::zeros(n);
    for i in 0..n {
        values[i] = a[[i, i]];
    }

    // Order eigenpairs descending by eigenvalue.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        values[j]
            .partial_cmp(&values[i])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let sorted_values = order.iter().map(|&i| values[i]).collect();
    let mut sorted_vectors = Array2::<f64>::zeros((n, n));
    for (new_col, &old_col) in order.iter().enumerate() {
        sorted_vectors.column_mut(new_col).assign(&v.column(old_col));
    }

    Ok(SymmetricEigen {
        values: sorted_values,
        vectors: sorted_vectors,
    })
}

/// Invert a symmetric positive-definite matrix.
///
/// Fails with [`ModelError::RankDeficient`] when the smallest eigenvalue
/// is at or below `rank_tol` relative to the largest, which is exactly
/// the collinear/under-determined regressor case.
pub fn invert_symmetric(matrix: &Array2<f64>, rank_tol: f64) -> Result<Array2<f64>> {
    let eigen = symmetric_eigen(matrix)?;
    let n = eigen.values.len();

    let max_eig = eigen.values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min_eig = eigen.values.iter().cloned().fold(f64::INFINITY, f64::min);
    if max_eig <= 0.0 || min_eig <= rank_tol * max_eig {
        return Err(ModelError::RankDeficient);
    }

    // Inverse = V * diag(1/lambda) * V'.
    let mut inverse = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += eigen.vectors[[i, k]] * eigen.vectors[[j, k]] / eigen.values[k];
            }
            inverse[[i, j]] = sum;
        }
    }
    Ok(inverse)
}

fn largest_off_diagonal(matrix: &Array2<f64>) -> (usize, usize, f64) {
    let n = matrix.nrows();
    if n < 2 {
        return (0, 0, 0.0);
    }
    let mut p = 0;
    let mut q = 1;
    let mut max_abs = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            if matrix[[i, j]].abs() > max_abs {
                max_abs = matrix[[i, j]].abs();
                p = i;
                q = j;
            }
        }
    }
    (p, q, matrix[[p, q]])
}

/// One Jacobi rotation zeroing element (p, q).
fn rotate(a: &mut Array2<f64>, v: &mut Array2<f64>, p: usize, q: usize) {
    let apq = a[[p, q]];
    if apq.abs() < 1e-15 {
        return;
    }
    let tau = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
    let t = if tau >= 0.0 {
        1.0 / (tau + (1.0 + tau * tau).sqrt())
    } else {
        -1.0 / (-tau + (1.0 + tau * tau).sqrt())
    };
    let c = 1.0 / (1.0 + t * t).sqrt();
    let s = t * c;

    let n = a.nrows();
    let app = a[[p, p]];
    let aqq = a[[q, q]];
    a[[p, p]] = c * c * app - 2.0 * c * s * apq + s * s * aqq;
    a[[q, q]] = s * s * app + 2.0 * c * s * apq + c * c * aqq;
    a[[p, q]] = 0.0;
    a[[q, p]] = 0.0;

    for i in 0..n {
        if i != p && i != q {
            let aip = a[[i, p]];
            let aiq = a[[i, q]];
            a[[i, p]] = c * aip - s * aiq;
            a[[p, i]] = a[[i, p]];
            a[[i, q]] = s * aip + c * aiq;
            a[[q, i]] = a[[i, q]];
        }
    }
    for i in 0..n {
        let vip = v[[i, p]];
        let viq = v[[i, q]];
        v[[i, p]] = c * vip - s * viq;
        v[[i, q]] = s * vip + c * viq;
    }
}
