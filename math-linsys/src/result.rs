//! Uniform output of every solver

use crate::error::ParseError;
use crate::kernel::format::format_fixed;
use crate::trace::Trace;
use ndarray::Array1;
use serde::Serialize;
use std::fmt;

/// Phase of an algorithm in which a zero pivot was met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Forward elimination (Gauss, Gauss-Jordan)
    Elimination,
    /// Doolittle factorization (LU)
    Decomposition,
    /// Back substitution
    BackSubstitution,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Elimination => "elimination",
            Stage::Decomposition => "decomposition",
            Stage::BackSubstitution => "back substitution",
        };
        f.write_str(name)
    }
}

/// Why a method could not produce a unique solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Singularity {
    /// `|det(A)|` fell below the tolerance
    ZeroDeterminant {
        /// Rejected value of `det(A)`
        determinant: f64,
    },
    /// A pivot fell below the tolerance
    ZeroPivot {
        /// 0-based pivot column
        column: usize,
        /// Pivot value that was rejected
        pivot: f64,
        /// Phase in which it happened
        stage: Stage,
    },
}

impl fmt::Display for Singularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Singularity::ZeroDeterminant { .. } => write!(f, "determinant is zero"),
            Singularity::ZeroPivot { column, stage, .. } => write!(
                f,
                "zero pivot encountered in column {} during {}",
                column + 1,
                stage
            ),
        }
    }
}

/// Unique solution, one value per variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Variables in column order
    pub variables: Vec<char>,
    /// Values in the same order
    pub values: Array1<f64>,
}

impl Solution {
    /// Value of `variable`, if it is part of the system.
    pub fn get(&self, variable: char) -> Option<f64> {
        self.variables
            .iter()
            .position(|&v| v == variable)
            .map(|i| self.values[i])
    }

    /// `(variable, value)` pairs in column order.
    pub fn assignments(&self) -> Vec<(char, f64)> {
        self.variables
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .collect()
    }

    /// `x = 2.000000, y = 1.000000` with `precision` decimals.
    pub fn display(&self, precision: usize) -> String {
        self.assignments()
            .iter()
            .map(|(v, x)| format!("{} = {}", v, format_fixed(*x, precision)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Outcome of a solve request.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveResult {
    /// Unique solution and the full derivation
    Success {
        /// Values of the unknowns
        solution: Solution,
        /// Every step of the derivation
        trace: Trace,
    },
    /// The method detected a singular (or, for LU, unpivotable) system;
    /// `trace` holds every step up to the point of failure
    NoUniqueSolution {
        /// Where and why the method stopped
        reason: Singularity,
        /// Steps performed before stopping
        trace: Trace,
    },
    /// The input never reached a solver
    ParseError(ParseError),
}

impl SolveResult {
    /// Returns `true` for [`SolveResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, SolveResult::Success { .. })
    }

    /// Returns `true` for [`SolveResult::NoUniqueSolution`].
    pub fn is_no_unique_solution(&self) -> bool {
        matches!(self, SolveResult::NoUniqueSolution { .. })
    }

    /// Returns `true` for [`SolveResult::ParseError`].
    pub fn is_parse_error(&self) -> bool {
        matches!(self, SolveResult::ParseError(_))
    }

    /// The solution, on success.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveResult::Success { solution, .. } => Some(solution),
            _ => None,
        }
    }

    /// The trace; parse errors have none.
    pub fn trace(&self) -> Option<&Trace> {
        match self {
            SolveResult::Success { trace, .. } | SolveResult::NoUniqueSolution { trace, .. } => {
                Some(trace)
            }
            SolveResult::ParseError(_) => None,
        }
    }

    /// The singularity reason, if the method failed numerically.
    pub fn singularity(&self) -> Option<&Singularity> {
        match self {
            SolveResult::NoUniqueSolution { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// The parse error, if the input was rejected.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            SolveResult::ParseError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for SolveResult {
    fn from(err: ParseError) -> Self {
        SolveResult::ParseError(err)
    }
}
