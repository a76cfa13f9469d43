//! A small numerically-stable linear solver used by `closure` to invert
//! `I - P_L`. We roll our own LU decomposition with partial pivoting over
//! `ndarray::Array2<f64>` rather than pulling in a LAPACK-backed crate: the
//! matrices here are `|V| x |V|`, typically tiny (tens to low hundreds of
//! non-terminals), so a dependency-free direct solver is both simpler and
//! entirely sufficient.

use ndarray::Array2;

/// Raised when a matrix has no (numerically reliable) inverse: a zero pivot
/// remains after partial pivoting, which for `I - P_L` means the grammar's
/// left-corner spectral radius is >= 1 and its derivations never converge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingularMatrix;

/// Below this magnitude a pivot is treated as zero.
const PIVOT_EPS: f64 = 1e-12;

/// Invert a square matrix via Gauss-Jordan elimination with partial
/// pivoting. Returns `Err(SingularMatrix)` rather than producing `NaN`/`inf`
/// when no usable pivot can be found for some column.
pub fn invert(m: &Array2<f64>) -> Result<Array2<f64>, SingularMatrix> {
    let n = m.nrows();
    assert_eq!(n, m.ncols(), "invert: matrix must be square");

    // Augment [m | I] and row-reduce the left half to I.
    let mut aug = Array2::<f64>::zeros((n, 2 * n));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = m[[i, j]];
        }
        aug[[i, n + i]] = 1.0;
    }

    for col in 0..n {
        // Partial pivot: the largest-magnitude entry at or below the
        // diagonal in this column.
        let mut pivot_row = col;
        let mut pivot_val = aug[[col, col]].abs();
        for row in (col + 1)..n {
            let v = aug[[row, col]].abs();
            if v > pivot_val {
                pivot_val = v;
                pivot_row = row;
            }
        }
        if pivot_val < PIVOT_EPS {
            return Err(SingularMatrix);
        }
        if pivot_row != col {
            for j in 0..2 * n {
                aug.swap([col, j], [pivot_row, j]);
            }
        }

        let pivot = aug[[col, col]];
        for j in 0..2 * n {
            aug[[col, j]] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for j in 0..2 * n {
                let sub = factor * aug[[col, j]];
                aug[[row, j]] -= sub;
            }
        }
    }

    let mut inv = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            inv[[i, j]] = aug[[i, n + j]];
        }
    }
    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn inverts_identity() {
        let id = Array2::<f64>::eye(3);
        let inv = invert(&id).unwrap();
        assert_eq!(inv, id);
    }

    #[test]
    fn inverts_grammar_a_left_corner_closure() {
        // I - P for Grammar A (see tests/seed_grammars.rs): E must equal
        // [[1, 1, 0.5], [0, 1, 0.5], [0, 0, 1]].
        let p = array![[0.0, 0.0, 0.0], [0.0, 0.0, 0.5], [0.0, 0.0, 0.0]];
        let id = Array2::<f64>::eye(3);
        let e = invert(&(&id - &p)).unwrap();
        let expect = array![[1.0, 1.0, 0.5], [0.0, 1.0, 0.5], [0.0, 0.0, 1.0]];
        for i in 0..3 {
            for j in 0..3 {
                assert!((e[[i, j]] - expect[[i, j]]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn rejects_singular_matrix() {
        let m = array![[1.0, 1.0], [1.0, 1.0]];
        assert_eq!(invert(&m), Err(SingularMatrix));
    }

    #[test]
    fn rejects_non_convergent_left_corner() {
        // S -> S S (1): P[S,S] = 1, so I - P is singular.
        let p = array![[1.0]];
        let id = Array2::<f64>::eye(1);
        assert_eq!(invert(&(&id - &p)), Err(SingularMatrix));
    }
}
