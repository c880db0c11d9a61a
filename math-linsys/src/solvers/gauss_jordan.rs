//! Gauss-Jordan elimination
//!
//! Each pivot row is normalized to a leading 1 and its column is cleared in
//! every other row, so the left block of `[A | b]` becomes the identity and
//! the solution is the last column.

use crate::config::SolverConfig;
use crate::kernel::{add_scaled_row, augment, is_zero, partial_pivot, scale_row, swap_rows};
use crate::result::{Singularity, Solution, SolveResult, Stage};
use crate::solvers::no_unique_solution;
use crate::system::LinearSystem;
use crate::trace::Trace;

/// Solve `system` by Gauss-Jordan elimination.
pub fn solve(system: &LinearSystem, config: &SolverConfig) -> SolveResult {
    let n = system.size();

    let mut trace = Trace::new(config.precision);
    trace.system(system);

    let mut ab = augment(&system.a, &system.b);
    trace.augmented("Augmented matrix [A | b]", &ab);

    for i in 0..n {
        let (pivot_row, magnitude) = partial_pivot(&ab, i, i);
        if is_zero(magnitude, config.epsilon) {
            return no_unique_solution(
                trace,
                Singularity::ZeroPivot {
                    column: i,
                    pivot: ab[[pivot_row, i]],
                    stage: Stage::Elimination,
                },
            );
        }
        if pivot_row != i {
            log::debug!("column {}: pivot row {} swapped up", i, pivot_row);
            let op = swap_rows(&mut ab, i, pivot_row);
            trace.row_operation(op, &ab);
        }

        let pivot = ab[[i, i]];
        if pivot != 1.0 {
            let op = scale_row(&mut ab, i, 1.0 / pivot);
            ab[[i, i]] = 1.0;
            trace.row_operation(op, &ab);
        }

        for k in 0..n {
            let factor = ab[[k, i]];
            if k == i || factor == 0.0 {
                continue;
            }
            let op = add_scaled_row(&mut ab, k, i, -factor);
            ab[[k, i]] = 0.0;
            trace.row_operation(op, &ab);
        }
    }
    trace.augmented("Reduced row echelon form", &ab);

    let x = ab.column(n).to_owned();
    trace.solution(&system.variables, &x);
    SolveResult::Success {
        solution: Solution {
            variables: system.variables.clone(),
            values: x,
        },
        trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::RowOp;
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array2, array, s};

    fn system(a: Array2<f64>, b: Array1<f64>) -> LinearSystem {
        let vars = LinearSystem::default_variables(a.nrows());
        LinearSystem::new(vars, a, b).unwrap()
    }

    #[test]
    fn test_two_by_two_trace() {
        let sys = system(array![[2.0, 3.0], [1.0, -1.0]], array![7.0, 1.0]);
        let result = solve(&sys, &SolverConfig::default());
        assert_eq!(result.solution().unwrap().values, array![2.0, 1.0]);

        let ops: Vec<RowOp> = result.trace().unwrap().row_operations().copied().collect();
        assert_eq!(
            ops,
            vec![
                RowOp::Scale {
                    row: 0,
                    factor: 0.5
                },
                RowOp::AddScaled {
                    target: 1,
                    source: 0,
                    factor: -1.0
                },
                RowOp::Scale {
                    row: 1,
                    factor: -0.4
                },
                RowOp::AddScaled {
                    target: 0,
                    source: 1,
                    factor: -1.5
                },
            ]
        );
        let lines = result.trace().unwrap().lines();
        assert_eq!(lines[2], "R1 <- 0.500000·R1: [[1, 1.5 | 3.5], [1, -1 | 1]]");
    }

    #[test]
    fn test_left_block_is_identity() {
        let sys = system(
            array![[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]],
            array![8.0, -11.0, -3.0],
        );
        let result = solve(&sys, &SolverConfig::default());
        let x = &result.solution().unwrap().values;
        assert_relative_eq!(x[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-10);
        assert_relative_eq!(x[2], -1.0, epsilon = 1e-10);

        let trace = result.trace().unwrap();
        let final_step = &trace.steps()[trace.len() - 2];
        let rref = match &final_step.kind {
            crate::trace::StepKind::Augmented { matrix } => {
                Array2::from_shape_fn((3, 4), |(i, j)| matrix[i][j])
            }
            other => panic!("expected augmented matrix, got {other:?}"),
        };
        assert_eq!(rref.slice(s![.., ..3]), Array2::<f64>::eye(3));
    }

    #[test]
    fn test_singular() {
        let sys = system(array![[1.0, 2.0], [2.0, 4.0]], array![3.0, 6.0]);
        let result = solve(&sys, &SolverConfig::default());
        assert!(result.is_no_unique_solution());
        assert!(matches!(
            result.singularity(),
            Some(Singularity::ZeroPivot { column: 1, .. })
        ));
    }
}
