//! JSON request/response contract of the `calculate` endpoint
//!
//! Request:
//!
//! ```json
//! {"method": "gauss-elimination", "equations": ["2x + 3y = 7", "x - y = 1"], "variables": ["x", "y"]}
//! ```
//!
//! `variables` may be omitted, in which case [`LinearSystem::default_variables`]
//! is used for the number of equations. The response always carries `success`,
//! the echoed `method` and a tagged `result`.
//!
//! No HTTP server lives here; any transport can hand the body to
//! [`handle_calculate_json`].

use crate::config::SolverConfig;
use crate::result::{Singularity, SolveResult};
use crate::solvers::Method;
use crate::system::LinearSystem;
use crate::trace::TraceStep;
use serde::{Deserialize, Serialize};

/// Body of a calculate request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalculateRequest {
    /// Solution method (`cramers-rule`, `gauss-elimination`, `gauss-jordan`, `lu-decomposition`)
    pub method: Method,
    /// Equation strings, one per row
    pub equations: Vec<String>,
    /// Ordered unknowns
    #[serde(default)]
    pub variables: Option<Vec<char>>,
}

/// One `variable = value` pair of a solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    /// Unknown
    pub variable: char,
    /// Its value
    pub value: f64,
}

/// Outcome carried in [`CalculateResponse::result`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculateOutcome {
    /// Unique solution with its worked steps
    Solved {
        /// Values in column order
        solution: Vec<Assignment>,
        /// Worked steps
        steps: Vec<TraceStep>,
    },
    /// Numeric failure, with the steps performed up to it
    NoUniqueSolution {
        /// Structured reason
        reason: Singularity,
        /// `No unique solution: <reason>`
        message: String,
        /// Steps up to the failure
        steps: Vec<TraceStep>,
    },
    /// Malformed request or equations
    Error {
        /// Parse or decoding error message
        message: String,
    },
}

/// Body of a calculate response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculateResponse {
    /// True only for [`CalculateOutcome::Solved`]
    pub success: bool,
    /// Method from the request, `None` when the request could not be read
    pub method: Option<Method>,
    /// Solution, failure or error
    pub result: CalculateOutcome,
}

impl CalculateResponse {
    fn from_solve(method: Method, result: SolveResult) -> Self {
        let outcome = match result {
            SolveResult::Success { solution, trace } => CalculateOutcome::Solved {
                solution: solution
                    .assignments()
                    .into_iter()
                    .map(|(variable, value)| Assignment { variable, value })
                    .collect(),
                steps: trace.steps().to_vec(),
            },
            SolveResult::NoUniqueSolution { reason, trace } => {
                CalculateOutcome::NoUniqueSolution {
                    message: format!("No unique solution: {}", reason),
                    reason,
                    steps: trace.steps().to_vec(),
                }
            }
            SolveResult::ParseError(e) => CalculateOutcome::Error {
                message: e.to_string(),
            },
        };
        Self {
            success: matches!(outcome, CalculateOutcome::Solved { .. }),
            method: Some(method),
            result: outcome,
        }
    }

    fn rejected(message: String) -> Self {
        Self {
            success: false,
            method: None,
            result: CalculateOutcome::Error { message },
        }
    }
}

/// Solve the system described by `request`.
pub fn handle_calculate(request: &CalculateRequest, config: &SolverConfig) -> CalculateResponse {
    let variables = match &request.variables {
        Some(v) => v.clone(),
        None => LinearSystem::default_variables(request.equations.len()),
    };
    let result =
        crate::solve_with_config(request.equations.as_slice(), &variables, request.method, config);
    CalculateResponse::from_solve(request.method, result)
}

/// Decode a JSON request, solve it and encode the response.
///
/// Undecodable bodies produce an error response rather than an `Err`.
pub fn handle_calculate_json(body: &str, config: &SolverConfig) -> String {
    let response = match serde_json::from_str::<CalculateRequest>(body) {
        Ok(request) => handle_calculate(&request, config),
        Err(e) => {
            log::debug!("rejecting request: {}", e);
            CalculateResponse::rejected(format!("Invalid request: {}", e))
        }
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        serde_json::json!({
            "success": false,
            "method": response.method,
            "result": {"status": "error", "message": e.to_string()},
        })
        .to_string()
    })
}
