//! Step-by-step solvers for small linear systems
//!
//! This crate parses equations such as `2x + 3y = 7` into `A·x = b` and solves
//! them with one of four classroom methods, recording every intermediate step
//! so the work can be shown on a board.
//!
//! # Features
//!
//! - **Parser**: signed, implicit and accumulated coefficients over named variables
//! - **Solvers**: Cramer's Rule, Gauss elimination (partial pivoting),
//!   Gauss-Jordan, LU decomposition (Doolittle, no pivoting)
//! - **Trace**: structured and rendered steps for each solve
//! - **Calculator**: determinant, inverse, product and sum of matrices
//! - **Practice**: seedable random systems
//! - **Comparison**: all four methods on one system (rayon behind `parallel`)
//!
//! # Example
//!
//! ```
//! use math_linsys::{Method, solve};
//!
//! let result = solve(&["2x + 3y = 7", "x - y = 1"], &['x', 'y'], Method::GaussElimination);
//! let solution = result.solution().unwrap();
//! assert!((solution.get('x').unwrap() - 2.0).abs() < 1e-9);
//! assert!((solution.get('y').unwrap() - 1.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculator;
pub mod config;
pub mod error;
pub mod kernel;
pub mod parallel;
pub mod parser;
pub mod random;
pub mod result;
pub mod solvers;
pub mod system;
pub mod trace;

pub use calculator::{CalculatorResult, CalculatorValue, MatrixOperation, compute};
pub use config::{ConfigFormat, SolverConfig, SolverConfigBuilder, load_config, save_config};
pub use error::{ConfigError, MatrixError, ParseError, Result};
pub use parallel::{MethodComparison, compare_methods, solve_batch};
pub use parser::{parse, parse_equation, parse_system};
pub use result::{Singularity, Solution, SolveResult, Stage};
pub use solvers::{Method, solve_system};
pub use system::LinearSystem;
pub use trace::{StepKind, Trace, TraceStep};

/// Parse and solve `equations` over `variables` with default settings.
pub fn solve<S: AsRef<str>>(equations: &[S], variables: &[char], method: Method) -> SolveResult {
    solve_with_config(equations, variables, method, &SolverConfig::default())
}

/// Parse and solve `equations` over `variables`.
///
/// Parse and shape errors come back as [`SolveResult::ParseError`] before any
/// solver runs.
pub fn solve_with_config<S: AsRef<str>>(
    equations: &[S],
    variables: &[char],
    method: Method,
    config: &SolverConfig,
) -> SolveResult {
    match parse_system(equations, variables) {
        Ok(system) => solve_system(&system, method, config),
        Err(e) => {
            log::debug!("{}: {}", method.title(), e);
            SolveResult::ParseError(e)
        }
    }
}
