//! LU decomposition (Doolittle, no pivoting)
//!
//! Factors `A = L·U` with a unit lower triangular `L`, then solves `L·y = b`
//! by forward substitution and `U·x = y` by back substitution.
//!
//! Rows are never exchanged, so a zero on the diagonal of `U` stops the
//! method even when a row swap would have avoided it.

use crate::config::SolverConfig;
use crate::kernel::is_zero;
use crate::result::{Singularity, Solution, SolveResult, Stage};
use crate::solvers::no_unique_solution;
use crate::system::LinearSystem;
use crate::trace::Trace;
use ndarray::{Array1, Array2};

/// Solve `system` by LU decomposition.
pub fn solve(system: &LinearSystem, config: &SolverConfig) -> SolveResult {
    let n = system.size();
    let a = &system.a;
    let b = &system.b;
    let eps = config.epsilon;

    let mut trace = Trace::new(config.precision);
    trace.system(system);
    trace.matrix("A", a);
    trace.vector("b", b);

    let mut l = Array2::<f64>::zeros((n, n));
    let mut u = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        l[[i, i]] = 1.0;
        for j in i..n {
            let sum: f64 = (0..i).map(|k| l[[i, k]] * u[[k, j]]).sum();
            u[[i, j]] = a[[i, j]] - sum;
        }

        let pivot = u[[i, i]];
        if is_zero(pivot, eps) {
            trace.matrix("L (partial)", &l);
            trace.matrix("U (partial)", &u);
            return no_unique_solution(
                trace,
                Singularity::ZeroPivot {
                    column: i,
                    pivot,
                    stage: Stage::Decomposition,
                },
            );
        }

        for j in (i + 1)..n {
            let sum: f64 = (0..i).map(|k| l[[j, k]] * u[[k, i]]).sum();
            l[[j, i]] = (a[[j, i]] - sum) / pivot;
        }
    }
    trace.matrix("L", &l);
    trace.matrix("U", &u);

    // L·y = b, L has a unit diagonal
    let mut y = Array1::<f64>::zeros(n);
    for i in 0..n {
        let sum: f64 = (0..i).map(|k| l[[i, k]] * y[k]).sum();
        y[i] = b[i] - sum;
    }
    trace.vector("y", &y);

    // U·x = y
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let pivot = u[[i, i]];
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
        let sum: f64 = ((i + 1)..n).map(|j| u[[i, j]] * x[j]).sum();
        x[i] = (y[i] - sum) / pivot;
    }
    trace.vector("x", &x);

    trace.solution(&system.variables, &x);
    SolveResult::Success {
        solution: Solution {
            variables: system.variables.clone(),
            values: x,
        },
        trace,
    }
}
