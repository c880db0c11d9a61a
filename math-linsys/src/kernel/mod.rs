//! Numeric primitives shared by every solver
//!
//! - [`determinant`]: recursive cofactor expansion, with [`minor`] extraction
//! - [`swap_rows`], [`scale_row`], [`add_scaled_row`]: in-place row operations
//! - [`partial_pivot`]: largest-magnitude pivot search
//! - [`format`]: bracket and LaTeX rendering for trace output

mod determinant;
pub mod format;
mod row_ops;

pub use determinant::{CofactorTerm, cofactor_expansion, determinant, minor};
pub use row_ops::{RowOp, add_scaled_row, is_zero, partial_pivot, scale_row, swap_rows};

use ndarray::{Array1, Array2, s};

/// Build the augmented matrix `[A | b]`.
pub fn augment(a: &Array2<f64>, b: &Array1<f64>) -> Array2<f64> {
    let n = a.ncols();
    let mut ab = Array2::zeros((a.nrows(), n + 1));
    ab.slice_mut(s![.., ..n]).assign(a);
    ab.column_mut(n).assign(b);
    ab
}

/// `A` with column `col` replaced by `b`.
pub fn replace_column(a: &Array2<f64>, col: usize, b: &Array1<f64>) -> Array2<f64> {
    let mut out = a.clone();
    out.column_mut(col).assign(b);
    out
}

/// Inverse by Gauss-Jordan elimination on `[A | I]` with partial pivoting.
///
/// Returns `None` when a pivot falls below `epsilon`.
pub fn inverse(a: &Array2<f64>, epsilon: f64) -> Option<Array2<f64>> {
    let n = a.nrows();
    debug_assert_eq!(n, a.ncols(), "inverse needs a square matrix");

    let mut work = Array2::zeros((n, 2 * n));
    work.slice_mut(s![.., ..n]).assign(a);
    work.slice_mut(s![.., n..]).assign(&Array2::<f64>::eye(n));

    for col in 0..n {
        let (pivot_row, magnitude) = partial_pivot(&work, col, col);
        if is_zero(magnitude, epsilon) {
            return None;
        }
        swap_rows(&mut work, col, pivot_row);
        let pivot = work[[col, col]];
        scale_row(&mut work, col, 1.0 / pivot);
        for row in 0..n {
            if row != col {
                let factor = work[[row, col]];
                if factor != 0.0 {
                    add_scaled_row(&mut work, row, col, -factor);
                }
            }
        }
    }

    Some(work.slice(s![.., n..]).to_owned())
}
