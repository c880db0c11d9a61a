//! Cramer's Rule
//!
//! `x_k = det(A_k) / det(A)`, where `A_k` is `A` with column `k` replaced
//! by `b`. Variables are handled in column order.

use crate::config::SolverConfig;
use crate::kernel::{cofactor_expansion, determinant, is_zero, replace_column};
use crate::result::{Singularity, Solution, SolveResult};
use crate::solvers::no_unique_solution;
use crate::system::LinearSystem;
use crate::trace::Trace;
use ndarray::Array1;

/// Solve `system` by Cramer's Rule.
///
/// Trace: system, `A`, `b`, `det(A)` (expanded by cofactors for `n >= 3`
/// when enabled), then per variable `A_k`, `det(A_k)` and the quotient.
pub fn solve(system: &LinearSystem, config: &SolverConfig) -> SolveResult {
    let n = system.size();
    let a = &system.a;
    let b = &system.b;

    let mut trace = Trace::new(config.precision);
    trace.system(system);
    trace.matrix("A", a);
    trace.vector("b", b);

    let det_a = determinant(a);
    if config.expand_cofactors && n >= 3 {
        trace.cofactor_expansion("det(A)", cofactor_expansion(a), det_a);
    } else {
        trace.determinant("det(A)", det_a);
    }

    if is_zero(det_a, config.epsilon) {
        return no_unique_solution(
            trace,
            Singularity::ZeroDeterminant {
                determinant: det_a,
            },
        );
    }

    let mut x = Array1::zeros(n);
    for (k, &var) in system.variables.iter().enumerate() {
        let a_k = replace_column(a, k, b);
        let label = format!("A_{var}");
        trace.matrix(&label, &a_k);

        let det_k = determinant(&a_k);
        trace.determinant(&format!("det({label})"), det_k);

        x[k] = det_k / det_a;
        trace.quotient(var, det_k, det_a, x[k]);
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
    use crate::trace::StepKind;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn system(a: ndarray::Array2<f64>, b: Array1<f64>) -> LinearSystem {
        let vars = LinearSystem::default_variables(a.nrows());
        LinearSystem::new(vars, a, b).unwrap()
    }

    #[test]
    fn test_two_by_two() {
        let sys = system(array![[2.0, 3.0], [1.0, -1.0]], array![7.0, 1.0]);
        let result = solve(&sys, &SolverConfig::default());
        let sol = result.solution().unwrap();
        assert_relative_eq!(sol.values[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(sol.values[1], 1.0, epsilon = 1e-12);

        let lines = result.trace().unwrap().lines();
        assert_eq!(lines[0], "Solve the system: 2x + 3y = 7, x - y = 1");
        assert_eq!(lines[1], "A = [[2, 3], [1, -1]]");
        assert_eq!(lines[2], "b = [7, 1]");
        assert_eq!(lines[3], "det(A) = -5.000000");
        assert_eq!(lines[4], "A_x = [[7, 3], [1, -1]]");
        assert_eq!(lines[5], "det(A_x) = -10.000000");
        assert_eq!(
            lines[6],
            "x = det(A_x) / det(A) = -10.000000 / -5.000000 = 2.000000"
        );
        assert_eq!(lines[7], "A_y = [[2, 7], [1, 1]]");
        assert_eq!(
            *lines.last().unwrap(),
            "Solution: x = 2.000000, y = 1.000000"
        );
    }

    #[test]
    fn test_three_by_three_records_expansion() {
        let sys = system(
            array![[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]],
            array![8.0, -11.0, -3.0],
        );
        let result = solve(&sys, &SolverConfig::default());
        let sol = result.solution().unwrap();
        assert_relative_eq!(sol.values[0], 2.0, epsilon = 1e-9);
        assert_relative_eq!(sol.values[1], 3.0, epsilon = 1e-9);
        assert_relative_eq!(sol.values[2], -1.0, epsilon = 1e-9);

        let steps = result.trace().unwrap().steps();
        assert!(matches!(
            &steps[3].kind,
            StepKind::CofactorExpansion { terms, .. } if terms.len() == 3
        ));
    }

    #[test]
    fn test_expansion_can_be_disabled() {
        let sys = system(ndarray::Array2::eye(3), array![1.0, 2.0, 3.0]);
        let config = SolverConfig::builder()
            .expand_cofactors(false)
            .build()
            .unwrap();
        let result = solve(&sys, &config);
        let steps = result.trace().unwrap().steps();
        assert!(matches!(&steps[3].kind, StepKind::Determinant { .. }));
    }

    #[test]
    fn test_singular() {
        let sys = system(array![[1.0, 2.0], [2.0, 4.0]], array![3.0, 6.0]);
        let result = solve(&sys, &SolverConfig::default());
        assert!(result.is_no_unique_solution());
        assert!(matches!(
            result.singularity(),
            Some(Singularity::ZeroDeterminant { .. })
        ));
        let lines = result.trace().unwrap().lines();
        assert_eq!(
            *lines.last().unwrap(),
            "No unique solution: determinant is zero"
        );
        // stops right after det(A)
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_single_unknown() {
        let sys = system(array![[5.0]], array![10.0]);
        let result = solve(&sys, &SolverConfig::default());
        assert_eq!(result.solution().unwrap().values, array![2.0]);
    }
}
