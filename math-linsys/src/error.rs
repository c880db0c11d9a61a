//! Error types for equation parsing, matrix input and configuration.
//!
//! Numeric failures of the solvers (singular systems, zero pivots) are not
//! errors: they are reported as [`crate::SolveResult::NoUniqueSolution`]
//! together with the partial trace.

use thiserror::Error;

/// Errors raised while turning equation text into a linear system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The equation does not contain exactly one `=`.
    #[error("Invalid equation: {0}")]
    InvalidEquation(String),

    /// A term references a letter that is not in the variable list.
    #[error("Unknown variable: {0}")]
    UnknownVariable(char),

    /// The right-hand side is not a finite floating-point literal.
    #[error("Invalid constant: {0}")]
    InvalidConstant(String),

    /// The left-hand side contains text that is not a `[sign][coefficient]<variable>` term.
    #[error("Invalid term: {0}")]
    InvalidTerm(String),

    /// Number of equations differs from the number of variables.
    #[error("expected {expected} equations (one per variable), got {got}")]
    EquationCount {
        /// Number of variables
        expected: usize,
        /// Number of equations supplied
        got: usize,
    },

    /// The variable list is empty or names the same symbol twice.
    #[error("invalid variable list: {0}")]
    InvalidVariables(String),

    /// System exceeds the configured maximum size.
    #[error("system of size {size} exceeds the maximum supported size {max}")]
    SystemTooLarge {
        /// Requested system size
        size: usize,
        /// Configured maximum
        max: usize,
    },
}

impl ParseError {
    /// Returns `true` if the error concerns the text of a single equation.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            ParseError::InvalidEquation(_)
                | ParseError::InvalidConstant(_)
                | ParseError::InvalidTerm(_)
        )
    }

    /// Returns `true` if the error is about the shape of the system rather than its text.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            ParseError::EquationCount { .. }
                | ParseError::InvalidVariables(_)
                | ParseError::SystemTooLarge { .. }
        )
    }
}

/// Errors for numeric matrix input and the matrix calculator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// Matrix dimensions do not fit the operation.
    #[error("Matrix dimensions mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        got: usize,
    },

    /// The operation needs a square matrix.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Row count
        rows: usize,
        /// Column count
        cols: usize,
    },

    /// The matrix is singular (determinant or pivot below tolerance).
    #[error("Matrix is singular or nearly singular")]
    Singular,

    /// The operation needs a second operand.
    #[error("operation '{0}' requires a second matrix")]
    MissingOperand(String),

    /// Matrix has no rows.
    #[error("matrix is empty")]
    Empty,

    /// Matrix is larger than the configured bound.
    #[error("matrix of size {size} exceeds the maximum supported size {max}")]
    TooLarge {
        /// Matrix size
        size: usize,
        /// Configured maximum
        max: usize,
    },
}

/// A specialized `Result` type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Serialization error
    #[error("Serialize error: {0}")]
    SerializeError(String),

    /// File extension is neither `.json` nor `.toml`
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A field holds a value the solvers cannot work with
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        let err = ParseError::InvalidEquation("2x + 3y".to_string());
        assert_eq!(err.to_string(), "Invalid equation: 2x + 3y");

        let err = ParseError::UnknownVariable('z');
        assert_eq!(err.to_string(), "Unknown variable: z");
    }

    #[test]
    fn test_parse_error_categories() {
        assert!(ParseError::InvalidConstant("abc".into()).is_syntax_error());
        assert!(!ParseError::UnknownVariable('q').is_syntax_error());
        assert!(ParseError::SystemTooLarge { size: 9, max: 8 }.is_shape_error());
        assert!(!ParseError::InvalidTerm("*".into()).is_shape_error());
    }

    #[test]
    fn test_matrix_error_display() {
        let err = MatrixError::DimensionMismatch {
            expected: 3,
            got: 2,
        };
        assert_eq!(
            err.to_string(),
            "Matrix dimensions mismatch: expected 3, got 2"
        );
    }
}
