//! Step-by-step solvers for square linear systems
//!
//! Four independent methods share the `(A, b) -> SolveResult` contract:
//! - [`cramer`]: Cramer's Rule by cofactor determinants
//! - [`gauss`]: Gaussian elimination with partial pivoting and back substitution
//! - [`gauss_jordan`]: Gauss-Jordan reduction to the identity
//! - [`lu`]: Doolittle LU decomposition without pivoting
//!
//! LU does not pivot, so it reports [`SolveResult::NoUniqueSolution`] on some
//! systems that the elimination methods solve (e.g. a zero leading entry).

pub mod cramer;
pub mod gauss;
pub mod gauss_jordan;
pub mod lu;

use crate::config::SolverConfig;
use crate::error::ParseError;
use crate::result::{Singularity, SolveResult};
use crate::system::LinearSystem;
use crate::trace::Trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// Solution method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Cramer's Rule
    CramersRule,
    /// Gaussian elimination with back substitution
    GaussElimination,
    /// Gauss-Jordan elimination
    GaussJordan,
    /// LU decomposition (Doolittle, no pivoting)
    LuDecomposition,
}

impl Method {
    /// Every method, in lesson order.
    pub const ALL: [Method; 4] = [
        Method::CramersRule,
        Method::GaussElimination,
        Method::GaussJordan,
        Method::LuDecomposition,
    ];

    /// Stable identifier (`cramers-rule`, `gauss-elimination`, ...).
    pub fn id(&self) -> &'static str {
        match self {
            Method::CramersRule => "cramers-rule",
            Method::GaussElimination => "gauss-elimination",
            Method::GaussJordan => "gauss-jordan",
            Method::LuDecomposition => "lu-decomposition",
        }
    }

    /// Human-readable name.
    pub fn title(&self) -> &'static str {
        match self {
            Method::CramersRule => "Cramer's Rule",
            Method::GaussElimination => "Gauss Elimination",
            Method::GaussJordan => "Gauss-Jordan",
            Method::LuDecomposition => "LU Decomposition",
        }
    }

    /// Run this method on `system`.
    ///
    /// The size bound of `config` is not checked here; see [`solve_system`].
    pub fn run(&self, system: &LinearSystem, config: &SolverConfig) -> SolveResult {
        match self {
            Method::CramersRule => cramer::solve(system, config),
            Method::GaussElimination => gauss::solve(system, config),
            Method::GaussJordan => gauss_jordan::solve(system, config),
            Method::LuDecomposition => lu::solve(system, config),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Method {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let t = s.trim().to_lowercase();
        match t.as_str() {
            "cramers-rule" | "cramers_rule" | "cramer" | "cramers" => Ok(Method::CramersRule),
            "gauss-elimination" | "gauss_elimination" | "gauss" => Ok(Method::GaussElimination),
            "gauss-jordan" | "gauss_jordan" | "jordan" => Ok(Method::GaussJordan),
            "lu-decomposition" | "lu_decomposition" | "lu" => Ok(Method::LuDecomposition),
            _ => Err(format!("unknown method: {}", s)),
        }
    }
}

/// Solve an already-numeric system with `method`.
///
/// Systems larger than `config.max_size` are rejected before any solver runs.
pub fn solve_system(system: &LinearSystem, method: Method, config: &SolverConfig) -> SolveResult {
    let n = system.size();
    if n > config.max_size {
        return SolveResult::ParseError(ParseError::SystemTooLarge {
            size: n,
            max: config.max_size,
        });
    }

    let start = Instant::now();
    let result = method.run(system, config);
    log::info!(
        "{}: {}x{} system, {} in {:.3}ms",
        method.title(),
        n,
        n,
        if result.is_success() {
            "solved"
        } else {
            "no unique solution"
        },
        start.elapsed().as_secs_f64() * 1000.0
    );
    result
}

/// Close a trace on a numeric failure.
pub(crate) fn no_unique_solution(mut trace: Trace, reason: Singularity) -> SolveResult {
    log::debug!("stopping: {}", reason);
    trace.failure(&reason.to_string());
    SolveResult::NoUniqueSolution { reason, trace }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_method_ids_roundtrip() {
        for method in Method::ALL {
            assert_eq!(method.id().parse::<Method>().unwrap(), method);
            assert_eq!(method.to_string(), method.id());
        }
        assert_eq!("LU".parse::<Method>().unwrap(), Method::LuDecomposition);
        assert!("simplex".parse::<Method>().is_err());
    }

    #[test]
    fn test_method_serde_ids() {
        let json = serde_json::to_string(&Method::GaussJordan).unwrap();
        assert_eq!(json, "\"gauss-jordan\"");
        let back: Method = serde_json::from_str("\"cramers-rule\"").unwrap();
        assert_eq!(back, Method::CramersRule);
    }

    #[test]
    fn test_size_bound() {
        let n = 3;
        let system = LinearSystem::new(
            LinearSystem::default_variables(n),
            ndarray::Array2::eye(n),
            ndarray::Array1::ones(n),
        )
        .unwrap();
        let config = SolverConfig::builder().max_size(2).build().unwrap();
        let result = solve_system(&system, Method::GaussElimination, &config);
        assert_eq!(
            result.parse_error(),
            Some(&ParseError::SystemTooLarge { size: 3, max: 2 })
        );
    }

    #[test]
    fn test_every_method_on_a_diagonal_system() {
        let system = LinearSystem::new(
            vec!['x', 'y'],
            array![[2.0, 0.0], [0.0, 4.0]],
            array![2.0, 2.0],
        )
        .unwrap();
        let config = SolverConfig::default();
        for method in Method::ALL {
            let result = solve_system(&system, method, &config);
            let sol = result.solution().expect("diagonal system is solvable");
            assert_eq!(sol.values, array![1.0, 0.5], "{method}");
        }
    }
}
