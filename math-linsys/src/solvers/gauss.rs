//! Gaussian elimination with partial pivoting
//!
//! Forward elimination brings `[A | b]` to upper triangular form, then back
//! substitution computes `x_i = (c_i - Σ_{j>i} u_ij·x_j) / u_ii` from the
//! last row up.

use crate::config::SolverConfig;
use crate::kernel::{add_scaled_row, augment, is_zero, partial_pivot, swap_rows};
use crate::result::{Singularity, Solution, SolveResult, Stage};
use crate::solvers::no_unique_solution;
use crate::system::LinearSystem;
use crate::trace::Trace;
use ndarray::Array1;

/// Solve `system` by Gaussian elimination.
pub fn solve(system: &LinearSystem, config: &SolverConfig) -> SolveResult {
    let n = system.size();
    let eps = config.epsilon;

    let mut trace = Trace::new(config.precision);
    trace.system(system);

    let mut ab = augment(&system.a, &system.b);
    trace.augmented("Augmented matrix [A | b]", &ab);

    for i in 0..n {
        let (pivot_row, magnitude) = partial_pivot(&ab, i, i);
        if is_zero(magnitude, eps) {
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
        for k in (i + 1)..n {
            let factor = ab[[k, i]] / pivot;
            if factor == 0.0 {
                continue;
            }
            let op = add_scaled_row(&mut ab, k, i, -factor);
            // exact zero below the pivot, not rounding residue
            ab[[k, i]] = 0.0;
            trace.row_operation(op, &ab);
        }
    }
    trace.augmented("Upper triangular form", &ab);

    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let pivot = ab[[i, i]];
        if is_zero(pivot, eps) {
            return no_unique_solution(
                trace,
                Singularity::ZeroPivot {
                    column: i,
                    pivot,
                    stage: Stage::BackSubstitution,
                },
            );
        }
        let constant = ab[[i, n]];
        let subtracted: f64 = ((i + 1)..n).map(|j| ab[[i, j]] * x[j]).sum();
        x[i] = (constant - subtracted) / pivot;
        trace.back_substitution(system.variables[i], i, constant, subtracted, pivot, x[i]);
    }

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
    use crate::trace::StepKind;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    fn system(a: Array2<f64>, b: Array1<f64>) -> LinearSystem {
        let vars = LinearSystem::default_variables(a.nrows());
        LinearSystem::new(vars, a, b).unwrap()
    }

    #[test]
    fn test_two_by_two_trace() {
        let sys = system(array![[2.0, 3.0], [1.0, -1.0]], array![7.0, 1.0]);
        let result = solve(&sys, &SolverConfig::default());
        assert_eq!(result.solution().unwrap().values, array![2.0, 1.0]);

        let lines = result.trace().unwrap().lines();
        assert_eq!(
            lines,
            vec![
                "Solve the system: 2x + 3y = 7, x - y = 1",
                "Augmented matrix [A | b]: [[2, 3 | 7], [1, -1 | 1]]",
                "R2 <- R2 - 0.500000·R1: [[2, 3 | 7], [0, -2.5 | -2.5]]",
                "Upper triangular form: [[2, 3 | 7], [0, -2.5 | -2.5]]",
                "y = (-2.500000 - 0.000000) / -2.500000 = 1.000000",
                "x = (7.000000 - 3.000000) / 2.000000 = 2.000000",
                "Solution: x = 2.000000, y = 1.000000",
            ]
        );
    }

    #[test]
    fn test_pivot_swap_is_recorded() {
        let sys = system(array![[0.0, 1.0], [1.0, 0.0]], array![1.0, 1.0]);
        let result = solve(&sys, &SolverConfig::default());
        assert_eq!(result.solution().unwrap().values, array![1.0, 1.0]);

        let trace = result.trace().unwrap();
        let ops: Vec<&RowOp> = trace.row_operations().collect();
        assert_eq!(ops, vec![&RowOp::Swap { first: 0, second: 1 }]);
    }

    #[test]
    fn test_three_by_three() {
        let sys = system(
            array![[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]],
            array![8.0, -11.0, -3.0],
        );
        let result = solve(&sys, &SolverConfig::default());
        let x = &result.solution().unwrap().values;
        assert_relative_eq!(x[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-10);
        assert_relative_eq!(x[2], -1.0, epsilon = 1e-10);

        // entries below each pivot end up exactly zero
        let last = result
            .trace()
            .unwrap()
            .steps()
            .iter()
            .rev()
            .find_map(|s| match &s.kind {
                StepKind::Augmented { matrix } => Some(matrix.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(last[1][0], 0.0);
        assert_eq!(last[2][0], 0.0);
        assert_eq!(last[2][1], 0.0);
    }

    #[test]
    fn test_singular() {
        let sys = system(array![[1.0, 2.0], [2.0, 4.0]], array![3.0, 6.0]);
        let result = solve(&sys, &SolverConfig::default());
        assert_eq!(
            result.singularity(),
            Some(&Singularity::ZeroPivot {
                column: 1,
                pivot: 0.0,
                stage: Stage::Elimination,
            })
        );
        // partial trace is kept: setup, swap, elimination, failure
        let lines = result.trace().unwrap().lines();
        assert_eq!(lines.len(), 5);
        assert!(lines[4].starts_with("No unique solution: zero pivot encountered"));
    }
}
