//! Elementary row operations and partial pivoting
//!
//! Every operation mutates the matrix in place and returns a [`RowOp`]
//! describing what was done, which callers push into the trace.

use crate::kernel::format::format_fixed;
use ndarray::Array2;
use serde::Serialize;

/// Record of one elementary row operation (row indices are 0-based).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RowOp {
    /// `R_first <-> R_second`
    Swap {
        /// Upper row
        first: usize,
        /// Row exchanged with it
        second: usize,
    },
    /// `R_row <- factor * R_row`
    Scale {
        /// Scaled row
        row: usize,
        /// Multiplier
        factor: f64,
    },
    /// `R_target <- R_target + factor * R_source`
    AddScaled {
        /// Modified row
        target: usize,
        /// Row added to it
        source: usize,
        /// Multiplier applied to `source`
        factor: f64,
    },
}

impl RowOp {
    /// Board notation with 1-based row labels, e.g. `R2 <- R2 - 0.5·R1`.
    pub fn describe(&self, precision: usize) -> String {
        match *self {
            RowOp::Swap { first, second } => format!("R{} <-> R{}", first + 1, second + 1),
            RowOp::Scale { row, factor } => format!(
                "R{} <- {}·R{}",
                row + 1,
                format_fixed(factor, precision),
                row + 1
            ),
            RowOp::AddScaled {
                target,
                source,
                factor,
            } => {
                let (sign, magnitude) = if factor < 0.0 {
                    ('-', -factor)
                } else {
                    ('+', factor)
                };
                format!(
                    "R{} <- R{} {} {}·R{}",
                    target + 1,
                    target + 1,
                    sign,
                    format_fixed(magnitude, precision),
                    source + 1
                )
            }
        }
    }
}

/// Exchange rows `i` and `j`.
pub fn swap_rows(m: &mut Array2<f64>, i: usize, j: usize) -> RowOp {
    if i != j {
        for c in 0..m.ncols() {
            m.swap([i, c], [j, c]);
        }
    }
    RowOp::Swap {
        first: i,
        second: j,
    }
}

/// Multiply row `i` by `factor`.
pub fn scale_row(m: &mut Array2<f64>, i: usize, factor: f64) -> RowOp {
    m.row_mut(i).mapv_inplace(|v| v * factor);
    RowOp::Scale { row: i, factor }
}

/// Add `factor` times row `source` to row `target`.
pub fn add_scaled_row(m: &mut Array2<f64>, target: usize, source: usize, factor: f64) -> RowOp {
    debug_assert_ne!(target, source, "source and target rows must differ");
    let src = m.row(source).to_owned();
    m.row_mut(target).scaled_add(factor, &src);
    RowOp::AddScaled {
        target,
        source,
        factor,
    }
}

/// Row at or below `from_row` with the largest `|m[row][col]|`.
///
/// Linear scan from `from_row` downwards; ties keep the lowest row index.
/// Returns the row and the magnitude of its entry.
pub fn partial_pivot(m: &Array2<f64>, col: usize, from_row: usize) -> (usize, f64) {
    let mut max_row = from_row;
    let mut max_val = m[[from_row, col]].abs();
    for i in (from_row + 1)..m.nrows() {
        let val = m[[i, col]].abs();
        if val > max_val {
            max_val = val;
            max_row = i;
        }
    }
    (max_row, max_val)
}

/// Singularity test shared by every solver.
#[inline]
pub fn is_zero(v: f64, epsilon: f64) -> bool {
    v.abs() < epsilon
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_swap() {
        let mut m = array![[1.0, 2.0], [3.0, 4.0]];
        let op = swap_rows(&mut m, 0, 1);
        assert_eq!(m, array![[3.0, 4.0], [1.0, 2.0]]);
        assert_eq!(op, RowOp::Swap { first: 0, second: 1 });
        assert_eq!(op.describe(2), "R1 <-> R2");
    }

    #[test]
    fn test_scale_and_add() {
        let mut m = array![[2.0, 4.0, 6.0], [1.0, 1.0, 1.0]];
        scale_row(&mut m, 0, 0.5);
        assert_eq!(m.row(0).to_vec(), vec![1.0, 2.0, 3.0]);

        let op = add_scaled_row(&mut m, 1, 0, -1.0);
        assert_eq!(m.row(1).to_vec(), vec![0.0, -1.0, -2.0]);
        assert_eq!(op.describe(1), "R2 <- R2 - 1.0·R1");
    }

    #[test]
    fn test_pivot_prefers_largest_then_lowest_index() {
        let m = array![[1.0, 0.0], [-3.0, 0.0], [3.0, 0.0]];
        assert_eq!(partial_pivot(&m, 0, 0), (1, 3.0));
        assert_eq!(partial_pivot(&m, 0, 2), (2, 3.0));
        assert_eq!(partial_pivot(&m, 1, 0), (0, 0.0));
    }

    #[test]
    fn test_is_zero() {
        assert!(is_zero(1e-11, 1e-10));
        assert!(is_zero(-1e-11, 1e-10));
        assert!(!is_zero(1e-9, 1e-10));
    }
}
