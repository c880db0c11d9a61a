//! Determinants by recursive cofactor expansion
//!
//! Expansion is along row 0 and costs O(n!). Systems are bounded by
//! [`crate::config::SolverConfig::max_size`] so this stays cheap, and it lets
//! Cramer traces show the expansion terms exactly as written on a board.

use ndarray::{Array2, Axis};
use serde::Serialize;

/// Remove row `row` and column `col`.
pub fn minor(m: &Array2<f64>, row: usize, col: usize) -> Array2<f64> {
    let rows: Vec<usize> = (0..m.nrows()).filter(|&i| i != row).collect();
    let cols: Vec<usize> = (0..m.ncols()).filter(|&j| j != col).collect();
    m.select(Axis(0), &rows).select(Axis(1), &cols)
}

/// Determinant of a square matrix.
///
/// The empty matrix has determinant 1.
pub fn determinant(m: &Array2<f64>) -> f64 {
    debug_assert_eq!(m.nrows(), m.ncols(), "determinant needs a square matrix");
    match m.nrows() {
        0 => 1.0,
        1 => m[[0, 0]],
        2 => m[[0, 0]] * m[[1, 1]] - m[[0, 1]] * m[[1, 0]],
        n => (0..n)
            .map(|j| cofactor_sign(j) * m[[0, j]] * determinant(&minor(m, 0, j)))
            .sum(),
    }
}

/// One term `(-1)^j · M[0][j] · det(minor(M, 0, j))` of the expansion along row 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CofactorTerm {
    /// Column of the expanded entry
    pub column: usize,
    /// `+1` or `-1`
    pub sign: f64,
    /// `M[0][column]`
    pub entry: f64,
    /// Determinant of the minor
    pub minor_determinant: f64,
}

impl CofactorTerm {
    /// Contribution of this term to the determinant.
    pub fn value(&self) -> f64 {
        self.sign * self.entry * self.minor_determinant
    }
}

/// First-level cofactor expansion along row 0.
///
/// Summing [`CofactorTerm::value`] in order reproduces [`determinant`] bit for
/// bit for `n >= 3`.
pub fn cofactor_expansion(m: &Array2<f64>) -> Vec<CofactorTerm> {
    (0..m.ncols())
        .map(|j| CofactorTerm {
            column: j,
            sign: cofactor_sign(j),
            entry: m[[0, j]],
            minor_determinant: determinant(&minor(m, 0, j)),
        })
        .collect()
}

#[inline]
fn cofactor_sign(j: usize) -> f64 {
    if j % 2 == 0 { 1.0 } else { -1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_base_cases() {
        assert_eq!(determinant(&array![[4.0]]), 4.0);
        assert_eq!(determinant(&array![[2.0, 3.0], [1.0, -1.0]]), -5.0);
    }

    #[test]
    fn test_minor() {
        let m = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        assert_eq!(minor(&m, 0, 1), array![[4.0, 6.0], [7.0, 9.0]]);
        assert_eq!(minor(&m, 2, 2), array![[1.0, 2.0], [4.0, 5.0]]);
    }

    #[test]
    fn test_three_by_three() {
        let m = array![[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]];
        assert_relative_eq!(determinant(&m), -1.0, epsilon = 1e-12);

        let singular = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        assert_relative_eq!(determinant(&singular), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_identity_four_by_four() {
        let m = Array2::<f64>::eye(4);
        assert_eq!(determinant(&m), 1.0);
    }

    #[test]
    fn test_expansion_matches_determinant() {
        let m = array![[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]];
        let terms = cofactor_expansion(&m);
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[1].sign, -1.0);
        let sum: f64 = terms.iter().map(CofactorTerm::value).sum();
        assert_eq!(sum, determinant(&m));
    }
}
