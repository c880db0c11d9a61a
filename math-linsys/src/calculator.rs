//! Matrix calculator: determinant, inverse, product and sum with a short trace

use crate::config::SolverConfig;
use crate::error::{MatrixError, Result};
use crate::kernel::{cofactor_expansion, determinant, inverse, is_zero};
use crate::trace::Trace;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calculator operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatrixOperation {
    /// `det(A)`
    Determinant,
    /// `A^-1`
    Inverse,
    /// `A × B`
    Multiplication,
    /// `A + B`
    Addition,
}

impl MatrixOperation {
    /// Whether a second matrix `B` is needed.
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            MatrixOperation::Multiplication | MatrixOperation::Addition
        )
    }
}

impl fmt::Display for MatrixOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatrixOperation::Determinant => "determinant",
            MatrixOperation::Inverse => "inverse",
            MatrixOperation::Multiplication => "multiplication",
            MatrixOperation::Addition => "addition",
        };
        f.write_str(name)
    }
}

impl FromStr for MatrixOperation {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "determinant" | "det" => Ok(MatrixOperation::Determinant),
            "inverse" | "inv" => Ok(MatrixOperation::Inverse),
            "multiplication" | "multiply" | "mul" => Ok(MatrixOperation::Multiplication),
            "addition" | "add" => Ok(MatrixOperation::Addition),
            _ => Err(format!("unknown matrix operation: {}", s)),
        }
    }
}

/// Scalar or matrix produced by an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorValue {
    /// Determinant
    Scalar(f64),
    /// Inverse, product or sum
    Matrix(Array2<f64>),
}

/// Result of [`compute`].
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorResult {
    /// Operation performed
    pub operation: MatrixOperation,
    /// Its value
    pub value: CalculatorValue,
    /// Worked steps
    pub trace: Trace,
}

/// Apply `operation` to `a` (and `b` for binary operations).
pub fn compute(
    operation: MatrixOperation,
    a: &Array2<f64>,
    b: Option<&Array2<f64>>,
    config: &SolverConfig,
) -> Result<CalculatorResult> {
    if a.is_empty() {
        return Err(MatrixError::Empty);
    }
    let mut trace = Trace::new(config.precision);
    trace.matrix("A", a);

    let value = match operation {
        MatrixOperation::Determinant => {
            check_square(a, config)?;
            let det = determinant(a);
            if config.expand_cofactors && a.nrows() >= 3 {
                trace.cofactor_expansion("det(A)", cofactor_expansion(a), det);
            } else {
                trace.determinant("det(A)", det);
            }
            CalculatorValue::Scalar(det)
        }
        MatrixOperation::Inverse => {
            check_square(a, config)?;
            let det = determinant(a);
            trace.determinant("det(A)", det);
            if is_zero(det, config.epsilon) {
                return Err(MatrixError::Singular);
            }
            let inv = inverse(a, config.epsilon).ok_or(MatrixError::Singular)?;
            trace.matrix("A^-1", &inv);
            CalculatorValue::Matrix(inv)
        }
        MatrixOperation::Multiplication => {
            let b = second_operand(operation, b)?;
            if a.ncols() != b.nrows() {
                return Err(MatrixError::DimensionMismatch {
                    expected: a.ncols(),
                    got: b.nrows(),
                });
            }
            trace.matrix("B", b);
            let product = a.dot(b);
            trace.matrix("A × B", &product);
            CalculatorValue::Matrix(product)
        }
        MatrixOperation::Addition => {
            let b = second_operand(operation, b)?;
            if a.dim() != b.dim() {
                let (expected, got) = if a.nrows() != b.nrows() {
                    (a.nrows(), b.nrows())
                } else {
                    (a.ncols(), b.ncols())
                };
                return Err(MatrixError::DimensionMismatch { expected, got });
            }
            trace.matrix("B", b);
            let sum = a + b;
            trace.matrix("A + B", &sum);
            CalculatorValue::Matrix(sum)
        }
    };

    Ok(CalculatorResult {
        operation,
        value,
        trace,
    })
}

fn check_square(a: &Array2<f64>, config: &SolverConfig) -> Result<()> {
    if a.nrows() != a.ncols() {
        return Err(MatrixError::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    if a.nrows() > config.max_size {
        return Err(MatrixError::TooLarge {
            size: a.nrows(),
            max: config.max_size,
        });
    }
    Ok(())
}

fn second_operand(
    operation: MatrixOperation,
    b: Option<&Array2<f64>>,
) -> Result<&Array2<f64>> {
    b.ok_or_else(|| MatrixError::MissingOperand(operation.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_determinant() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let res = compute(MatrixOperation::Determinant, &a, None, &SolverConfig::default())
            .unwrap();
        assert_eq!(res.value, CalculatorValue::Scalar(-2.0));
        assert_eq!(res.trace.lines(), vec!["A = [[1, 2], [3, 4]]", "det(A) = -2.000000"]);
    }

    #[test]
    fn test_inverse() {
        let a = array![[4.0, 7.0], [2.0, 6.0]];
        let res =
            compute(MatrixOperation::Inverse, &a, None, &SolverConfig::default()).unwrap();
        let CalculatorValue::Matrix(inv) = res.value else {
            panic!("inverse must be a matrix");
        };
        assert_relative_eq!(inv[[0, 0]], 0.6, epsilon = 1e-12);
        assert_relative_eq!(inv[[0, 1]], -0.7, epsilon = 1e-12);
        assert_relative_eq!(inv[[1, 0]], -0.2, epsilon = 1e-12);
        assert_relative_eq!(inv[[1, 1]], 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_of_singular_matrix() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let err =
            compute(MatrixOperation::Inverse, &a, None, &SolverConfig::default()).unwrap_err();
        assert_eq!(err, MatrixError::Singular);
    }

    #[test]
    fn test_binary_operations() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[0.0, 1.0], [1.0, 0.0]];
        let config = SolverConfig::default();

        let product = compute(MatrixOperation::Multiplication, &a, Some(&b), &config).unwrap();
        assert_eq!(
            product.value,
            CalculatorValue::Matrix(array![[2.0, 1.0], [4.0, 3.0]])
        );

        let sum = compute(MatrixOperation::Addition, &a, Some(&b), &config).unwrap();
        assert_eq!(
            sum.value,
            CalculatorValue::Matrix(array![[1.0, 3.0], [4.0, 4.0]])
        );
        assert_eq!(sum.trace.lines()[2], "A + B = [[1, 3], [4, 4]]");
    }

    #[test]
    fn test_operand_errors() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let config = SolverConfig::default();
        assert_eq!(
            compute(MatrixOperation::Addition, &a, None, &config).unwrap_err(),
            MatrixError::MissingOperand("addition".to_string())
        );
        assert_eq!(
            compute(MatrixOperation::Determinant, &a, None, &config).unwrap_err(),
            MatrixError::NotSquare { rows: 2, cols: 3 }
        );
        assert!(matches!(
            compute(MatrixOperation::Multiplication, &a, Some(&a), &config),
            Err(MatrixError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(
            "det".parse::<MatrixOperation>().unwrap(),
            MatrixOperation::Determinant
        );
        assert!(MatrixOperation::Addition.is_binary());
        assert!(!MatrixOperation::Inverse.is_binary());
    }
}
