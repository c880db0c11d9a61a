//! Square linear system `A·x = b` over named variables

use crate::error::{MatrixError, Result};
use crate::kernel::format::format_value;
use ndarray::{Array1, Array2};

/// A parsed or directly entered square system.
///
/// Row `i` of `a` and entry `i` of `b` come from equation `i`; column `j`
/// belongs to `variables[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    /// Ordered unknowns, one per column
    pub variables: Vec<char>,
    /// Coefficient matrix
    pub a: Array2<f64>,
    /// Right-hand side
    pub b: Array1<f64>,
}

impl LinearSystem {
    /// Build from already-shaped arrays.
    pub fn new(variables: Vec<char>, a: Array2<f64>, b: Array1<f64>) -> Result<Self> {
        let n = variables.len();
        if n == 0 {
            return Err(MatrixError::Empty);
        }
        if a.nrows() != a.ncols() {
            return Err(MatrixError::NotSquare {
                rows: a.nrows(),
                cols: a.ncols(),
            });
        }
        if a.nrows() != n {
            return Err(MatrixError::DimensionMismatch {
                expected: n,
                got: a.nrows(),
            });
        }
        if b.len() != n {
            return Err(MatrixError::DimensionMismatch {
                expected: n,
                got: b.len(),
            });
        }
        Ok(Self { variables, a, b })
    }

    /// Build from a coefficient grid and constant column, as typed into the calculator.
    pub fn from_rows(variables: Vec<char>, rows: &[Vec<f64>], constants: &[f64]) -> Result<Self> {
        let n = variables.len();
        if rows.len() != n {
            return Err(MatrixError::DimensionMismatch {
                expected: n,
                got: rows.len(),
            });
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != n) {
            return Err(MatrixError::DimensionMismatch {
                expected: n,
                got: bad.len(),
            });
        }
        let a = Array2::from_shape_fn((n, n), |(i, j)| rows[i][j]);
        Self::new(variables, a, Array1::from(constants.to_vec()))
    }

    /// Default variable names for a system of `n` unknowns.
    ///
    /// `x, y, z` followed by `d, e, f, g, h`, then the rest of the alphabet.
    pub fn default_variables(n: usize) -> Vec<char> {
        const PREFERRED: [char; 8] = ['x', 'y', 'z', 'd', 'e', 'f', 'g', 'h'];
        PREFERRED
            .iter()
            .copied()
            .chain(('a'..='w').filter(|c| !PREFERRED.contains(c)))
            .take(n)
            .collect()
    }

    /// Number of unknowns.
    pub fn size(&self) -> usize {
        self.variables.len()
    }

    /// Split into `(A, b)`.
    pub fn into_parts(self) -> (Array2<f64>, Array1<f64>) {
        (self.a, self.b)
    }

    /// Render equation `row` back to text, e.g. `2x + 3y = 7`.
    ///
    /// Zero coefficients are omitted; a row of zeros renders as `0`.
    pub fn equation_text(&self, row: usize) -> String {
        let mut lhs = String::new();
        for (j, &var) in self.variables.iter().enumerate() {
            let c = self.a[[row, j]];
            if c == 0.0 {
                continue;
            }
            let magnitude = c.abs();
            let coef = if magnitude == 1.0 {
                String::new()
            } else {
                format_value(magnitude)
            };
            if lhs.is_empty() {
                if c < 0.0 {
                    lhs.push('-');
                }
            } else {
                lhs.push_str(if c < 0.0 { " - " } else { " + " });
            }
            lhs.push_str(&coef);
            lhs.push(var);
        }
        if lhs.is_empty() {
            lhs.push('0');
        }
        format!("{} = {}", lhs, format_value(self.b[row]))
    }

    /// Every equation rendered with [`Self::equation_text`].
    pub fn equations_text(&self) -> Vec<String> {
        (0..self.size()).map(|i| self.equation_text(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_equation_text() {
        let sys = LinearSystem::new(
            vec!['x', 'y', 'z'],
            array![[2.0, 3.0, 0.0], [1.0, -1.0, -0.5], [0.0, 0.0, 0.0]],
            array![7.0, 1.0, 0.0],
        )
        .unwrap();
        assert_eq!(sys.equation_text(0), "2x + 3y = 7");
        assert_eq!(sys.equation_text(1), "x - y - 0.5z = 1");
        assert_eq!(sys.equation_text(2), "0 = 0");
    }

    #[test]
    fn test_leading_negative_term() {
        let sys = LinearSystem::new(
            vec!['x', 'y'],
            array![[-1.0, 4.0], [-2.5, 0.0]],
            array![3.0, -1.0],
        )
        .unwrap();
        assert_eq!(sys.equation_text(0), "-x + 4y = 3");
        assert_eq!(sys.equation_text(1), "-2.5x = -1");
    }

    #[test]
    fn test_from_rows_validates_shape() {
        let ok = LinearSystem::from_rows(
            vec!['x', 'y'],
            &[vec![1.0, 2.0], vec![3.0, 4.0]],
            &[5.0, 6.0],
        );
        assert!(ok.is_ok());

        let ragged = LinearSystem::from_rows(
            vec!['x', 'y'],
            &[vec![1.0, 2.0], vec![3.0]],
            &[5.0, 6.0],
        );
        assert_eq!(
            ragged.unwrap_err(),
            MatrixError::DimensionMismatch {
                expected: 2,
                got: 1
            }
        );

        let short_b = LinearSystem::from_rows(
            vec!['x', 'y'],
            &[vec![1.0, 2.0], vec![3.0, 4.0]],
            &[5.0],
        );
        assert!(short_b.is_err());
    }

    #[test]
    fn test_into_parts() {
        let sys = LinearSystem::from_rows(vec!['x'], &[vec![4.0]], &[8.0]).unwrap();
        let (a, b) = sys.into_parts();
        assert_eq!(a, array![[4.0]]);
        assert_eq!(b, array![8.0]);
    }

    #[test]
    fn test_default_variables() {
        assert_eq!(LinearSystem::default_variables(3), vec!['x', 'y', 'z']);
        assert_eq!(
            LinearSystem::default_variables(8),
            vec!['x', 'y', 'z', 'd', 'e', 'f', 'g', 'h']
        );
        assert_eq!(LinearSystem::default_variables(9)[8], 'a');
    }
}
