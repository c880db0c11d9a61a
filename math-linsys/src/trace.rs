//! Step trace of a worked solution
//!
//! A [`Trace`] is appended to while an algorithm runs, one [`TraceStep`] per
//! board statement. Each step keeps the structured data (matrix snapshot,
//! rows involved, factor) next to its pre-rendered text line, so a
//! presentation layer can typeset it without recomputing anything.

use crate::kernel::format::{
    format_augmented, format_fixed, format_matrix, format_value, format_vector,
};
use crate::kernel::{CofactorTerm, RowOp};
use crate::system::LinearSystem;
use ndarray::{Array1, Array2};
use serde::Serialize;

/// Row-major copy of a matrix taken when the step was recorded.
pub type MatrixSnapshot = Vec<Vec<f64>>;

fn snapshot(m: &Array2<f64>) -> MatrixSnapshot {
    m.rows().into_iter().map(|r| r.to_vec()).collect()
}

/// Structured content of a trace step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    /// The equations being solved
    System {
        /// Each equation rendered back to text
        equations: Vec<String>,
    },
    /// A named matrix (`A`, `A_x`, `L`, `U`)
    Matrix {
        /// Name shown on the board
        label: String,
        /// Entries at the time of the step
        matrix: MatrixSnapshot,
    },
    /// Augmented matrix `[A | b]`
    Augmented {
        /// Entries at the time of the step, `b` in the last column
        matrix: MatrixSnapshot,
    },
    /// A named vector (`b`, `y`, `x`)
    Vector {
        /// Name shown on the board
        label: String,
        /// Entries
        values: Vec<f64>,
    },
    /// A determinant value
    Determinant {
        /// `det(A)`, `det(A_x)`, ...
        label: String,
        /// Its value
        value: f64,
    },
    /// First-level cofactor expansion of a determinant
    CofactorExpansion {
        /// `det(A)`
        label: String,
        /// One term per column of row 0
        terms: Vec<CofactorTerm>,
        /// Sum of the terms
        value: f64,
    },
    /// Row operation and the augmented matrix right after it
    RowOperation {
        /// What was done
        op: RowOp,
        /// Augmented matrix after the operation
        matrix: MatrixSnapshot,
    },
    /// Cramer quotient `x_k = det(A_k) / det(A)`
    Quotient {
        /// Unknown being solved for
        variable: char,
        /// `det(A_k)`
        numerator: f64,
        /// `det(A)`
        denominator: f64,
        /// Resulting value
        value: f64,
    },
    /// Back-substitution `x_i = (c_i - Σ_{j>i} u_ij·x_j) / u_ii`
    BackSubstitution {
        /// Unknown being solved for
        variable: char,
        /// 0-based row of the triangular system
        row: usize,
        /// `c_i`
        constant: f64,
        /// `Σ_{j>i} u_ij·x_j`
        subtracted: f64,
        /// `u_ii`
        pivot: f64,
        /// Resulting value
        value: f64,
    },
    /// Final assignment of every variable
    Solution {
        /// `(variable, value)` in column order
        assignments: Vec<(char, f64)>,
    },
    /// Why the method stopped without a unique solution
    Failure {
        /// Rendered [`crate::Singularity`]
        reason: String,
    },
    /// Free-form remark
    Note {
        /// Remark text
        message: String,
    },
}

/// One display-ready statement of the trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    /// Structured content
    #[serde(flatten)]
    pub kind: StepKind,
    /// Rendered statement
    pub text: String,
}

/// Ordered log of steps for one solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    precision: usize,
    steps: Vec<TraceStep>,
}

impl Trace {
    /// Empty trace rendering scalars with `precision` decimals.
    pub fn new(precision: usize) -> Self {
        Self {
            precision,
            steps: Vec::new(),
        }
    }

    /// Recorded steps, in execution order.
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Rendered text of every step.
    pub fn lines(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.text.as_str()).collect()
    }

    /// Iterate over the recorded row operations.
    pub fn row_operations(&self) -> impl Iterator<Item = &RowOp> {
        self.steps.iter().filter_map(|s| match &s.kind {
            StepKind::RowOperation { op, .. } => Some(op),
            _ => None,
        })
    }

    fn fixed(&self, v: f64) -> String {
        format_fixed(v, self.precision)
    }

    fn push(&mut self, kind: StepKind, text: String) {
        self.steps.push(TraceStep { kind, text });
    }

    /// Record the equations of `system`.
    pub fn system(&mut self, system: &LinearSystem) {
        let equations = system.equations_text();
        let text = format!("Solve the system: {}", equations.join(", "));
        self.push(StepKind::System { equations }, text);
    }

    /// Record a named matrix.
    pub fn matrix(&mut self, label: &str, m: &Array2<f64>) {
        let text = format!("{} = {}", label, format_matrix(m));
        self.push(
            StepKind::Matrix {
                label: label.to_string(),
                matrix: snapshot(m),
            },
            text,
        );
    }

    /// Record the augmented matrix with a caption.
    pub fn augmented(&mut self, caption: &str, m: &Array2<f64>) {
        let text = format!("{}: {}", caption, format_augmented(m));
        self.push(
            StepKind::Augmented {
                matrix: snapshot(m),
            },
            text,
        );
    }

    /// Record a named vector.
    pub fn vector(&mut self, label: &str, v: &Array1<f64>) {
        let text = format!("{} = {}", label, format_vector(v));
        self.push(
            StepKind::Vector {
                label: label.to_string(),
                values: v.to_vec(),
            },
            text,
        );
    }

    /// Record a determinant value.
    pub fn determinant(&mut self, label: &str, value: f64) {
        let text = format!("{} = {}", label, self.fixed(value));
        self.push(
            StepKind::Determinant {
                label: label.to_string(),
                value,
            },
            text,
        );
    }

    /// Record a cofactor expansion `det = Σ ±a_0j·det(M_0j)`.
    pub fn cofactor_expansion(&mut self, label: &str, terms: Vec<CofactorTerm>, value: f64) {
        let mut expr = String::new();
        for (k, term) in terms.iter().enumerate() {
            let entry = if term.entry < 0.0 {
                format!("({})", format_value(term.entry))
            } else {
                format_value(term.entry)
            };
            let op = match (k, term.sign < 0.0) {
                (0, false) => "",
                (0, true) => "-",
                (_, false) => " + ",
                (_, true) => " - ",
            };
            expr.push_str(&format!(
                "{}{}·({})",
                op,
                entry,
                self.fixed(term.minor_determinant)
            ));
        }
        let text = format!("{} = {} = {}", label, expr, self.fixed(value));
        self.push(
            StepKind::CofactorExpansion {
                label: label.to_string(),
                terms,
                value,
            },
            text,
        );
    }

    /// Record a row operation on an augmented matrix and the result.
    pub fn row_operation(&mut self, op: RowOp, m: &Array2<f64>) {
        let text = format!("{}: {}", op.describe(self.precision), format_augmented(m));
        self.push(
            StepKind::RowOperation {
                op,
                matrix: snapshot(m),
            },
            text,
        );
    }

    /// Record a Cramer quotient.
    pub fn quotient(&mut self, variable: char, numerator: f64, denominator: f64, value: f64) {
        let text = format!(
            "{v} = det(A_{v}) / det(A) = {} / {} = {}",
            self.fixed(numerator),
            self.fixed(denominator),
            self.fixed(value),
            v = variable
        );
        self.push(
            StepKind::Quotient {
                variable,
                numerator,
                denominator,
                value,
            },
            text,
        );
    }

    /// Record one back-substitution assignment.
    pub fn back_substitution(
        &mut self,
        variable: char,
        row: usize,
        constant: f64,
        subtracted: f64,
        pivot: f64,
        value: f64,
    ) {
        let text = format!(
            "{} = ({} - {}) / {} = {}",
            variable,
            self.fixed(constant),
            self.fixed(subtracted),
            self.fixed(pivot),
            self.fixed(value)
        );
        self.push(
            StepKind::BackSubstitution {
                variable,
                row,
                constant,
                subtracted,
                pivot,
                value,
            },
            text,
        );
    }

    /// Record the final answer.
    pub fn solution(&mut self, variables: &[char], x: &Array1<f64>) {
        let assignments: Vec<(char, f64)> = variables.iter().copied().zip(x.iter().copied()).collect();
        let parts: Vec<String> = assignments
            .iter()
            .map(|(v, val)| format!("{} = {}", v, self.fixed(*val)))
            .collect();
        let text = format!("Solution: {}", parts.join(", "));
        self.push(StepKind::Solution { assignments }, text);
    }

    /// Record why no unique solution exists.
    pub fn failure(&mut self, reason: &str) {
        let text = format!("No unique solution: {reason}");
        self.push(
            StepKind::Failure {
                reason: reason.to_string(),
            },
            text,
        );
    }

    /// Record a free-form remark.
    pub fn note(&mut self, message: &str) {
        self.push(
            StepKind::Note {
                message: message.to_string(),
            },
            message.to_string(),
        );
    }
}
