//! Parallel utilities with feature-gated implementations
//!
//! Solves are pure functions of their input, so independent systems (or the
//! four methods on one system) run on rayon's pool when the `parallel`
//! feature is enabled, and sequentially otherwise.

use crate::config::SolverConfig;
use crate::result::SolveResult;
use crate::solvers::{Method, solve_system};
use crate::system::LinearSystem;

/// Component-wise tolerance under which two methods agree.
pub const AGREEMENT_TOLERANCE: f64 = 1e-6;

/// Check if parallel processing is available
#[cfg(feature = "parallel")]
pub fn is_parallel_available() -> bool {
    true
}

/// Check if parallel processing is available
#[cfg(not(feature = "parallel"))]
pub fn is_parallel_available() -> bool {
    false
}

/// Parallel map over a slice
#[cfg(feature = "parallel")]
pub fn parallel_map<T, U, F>(data: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    use rayon::prelude::*;
    data.par_iter().map(f).collect()
}

/// Sequential map (fallback when parallel is not available)
#[cfg(not(feature = "parallel"))]
pub fn parallel_map<T, U, F>(data: &[T], f: F) -> Vec<U>
where
    F: Fn(&T) -> U,
{
    data.iter().map(f).collect()
}

/// Every method's result on one system.
#[derive(Debug, Clone)]
pub struct MethodComparison {
    /// Results in [`Method::ALL`] order
    pub results: Vec<(Method, SolveResult)>,
}

impl MethodComparison {
    /// Result of `method`.
    pub fn get(&self, method: Method) -> Option<&SolveResult> {
        self.results
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, r)| r)
    }

    /// Methods that produced a solution.
    pub fn solved_by(&self) -> Vec<Method> {
        self.results
            .iter()
            .filter(|(_, r)| r.is_success())
            .map(|(m, _)| *m)
            .collect()
    }

    /// Largest component-wise difference between any two successful methods.
    ///
    /// `None` when fewer than two methods succeeded.
    pub fn max_deviation(&self) -> Option<f64> {
        let solutions: Vec<_> = self
            .results
            .iter()
            .filter_map(|(_, r)| r.solution())
            .collect();
        if solutions.len() < 2 {
            return None;
        }
        let mut worst = 0.0_f64;
        for (i, s) in solutions.iter().enumerate() {
            for t in &solutions[i + 1..] {
                for (p, q) in s.values.iter().zip(t.values.iter()) {
                    worst = worst.max((p - q).abs());
                }
            }
        }
        Some(worst)
    }

    /// Whether every successful method agrees within [`AGREEMENT_TOLERANCE`].
    pub fn agree(&self) -> bool {
        self.max_deviation().is_none_or(|d| d <= AGREEMENT_TOLERANCE)
    }
}

/// Run all four methods on `system`.
pub fn compare_methods(system: &LinearSystem, config: &SolverConfig) -> MethodComparison {
    let results = parallel_map(&Method::ALL[..], |&method| {
        (method, solve_system(system, method, config))
    });
    let comparison = MethodComparison { results };
    if !comparison.agree() {
        log::warn!(
            "methods disagree on a {}x{} system (max deviation {:?})",
            system.size(),
            system.size(),
            comparison.max_deviation()
        );
    }
    comparison
}

/// Solve many independent systems with one method.
pub fn solve_batch(
    systems: &[LinearSystem],
    method: Method,
    config: &SolverConfig,
) -> Vec<SolveResult> {
    parallel_map(systems, |system| solve_system(system, method, config))
}
