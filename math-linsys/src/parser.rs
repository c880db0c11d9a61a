//! Equation parser
//!
//! Turns lines such as `2x + 3y = 7` into rows of the coefficient matrix.
//! A term is `[sign][coefficient]<variable>`: a missing coefficient means 1,
//! a bare `-` means -1, and repeated variables accumulate (`2x + 3x = 5`
//! gives 5 for `x`). Variables that do not appear get coefficient 0.

use crate::error::ParseError;
use crate::system::LinearSystem;
use ndarray::{Array1, Array2};
use regex::Regex;
use std::sync::LazyLock;

static TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<sign>[+-]?)(?P<coef>\d+(?:\.\d*)?|\.\d+)?(?P<var>[A-Za-z])")
        .expect("term pattern is valid")
});

/// Parse one equation into its coefficient row and constant.
pub fn parse_equation(equation: &str, variables: &[char]) -> Result<(Vec<f64>, f64), ParseError> {
    let compact: String = equation.chars().filter(|c| !c.is_whitespace()).collect();

    let mut sides = compact.split('=');
    let (lhs, rhs) = match (sides.next(), sides.next(), sides.next()) {
        (Some(lhs), Some(rhs), None) if !lhs.is_empty() => (lhs, rhs),
        _ => return Err(ParseError::InvalidEquation(equation.trim().to_string())),
    };

    let mut row = vec![0.0; variables.len()];
    let mut cursor = 0;
    for caps in TERM.captures_iter(lhs) {
        let Some(whole) = caps.get(0) else { continue };
        let sign = caps.name("sign").map_or("", |m| m.as_str());

        // terms must be contiguous, and every term after the first needs a sign
        if whole.start() != cursor || (cursor > 0 && sign.is_empty()) {
            let end = if whole.start() > cursor {
                whole.start()
            } else {
                whole.end()
            };
            return Err(ParseError::InvalidTerm(lhs[cursor..end].to_string()));
        }
        cursor = whole.end();

        let var = caps
            .name("var")
            .and_then(|m| m.as_str().chars().next())
            .ok_or_else(|| ParseError::InvalidTerm(whole.as_str().to_string()))?;
        let index = variables
            .iter()
            .position(|&v| v == var)
            .ok_or(ParseError::UnknownVariable(var))?;

        let magnitude = match caps.name("coef") {
            Some(m) => m
                .as_str()
                .parse::<f64>()
                .ok()
                .filter(|c| c.is_finite())
                .ok_or_else(|| ParseError::InvalidTerm(whole.as_str().to_string()))?,
            None => 1.0,
        };
        row[index] += if sign == "-" { -magnitude } else { magnitude };
    }
    if cursor != lhs.len() {
        return Err(ParseError::InvalidTerm(lhs[cursor..].to_string()));
    }

    let constant = rhs
        .parse::<f64>()
        .ok()
        .filter(|c| c.is_finite())
        .ok_or_else(|| ParseError::InvalidConstant(rhs.to_string()))?;

    Ok((row, constant))
}

/// Parse equations into `(A, b)`, one row per equation.
///
/// The number of equations is not checked against the number of variables;
/// see [`parse_system`] for the checked variant.
pub fn parse<S: AsRef<str>>(
    equations: &[S],
    variables: &[char],
) -> Result<(Array2<f64>, Array1<f64>), ParseError> {
    let n = variables.len();
    let mut a = Array2::zeros((equations.len(), n));
    let mut b = Array1::zeros(equations.len());
    for (i, equation) in equations.iter().enumerate() {
        let (row, constant) = parse_equation(equation.as_ref(), variables)?;
        a.row_mut(i).assign(&Array1::from(row));
        b[i] = constant;
    }
    log::debug!("parsed {} equations over {} variables", equations.len(), n);
    Ok((a, b))
}

/// Parse a square system and check its shape.
pub fn parse_system<S: AsRef<str>>(
    equations: &[S],
    variables: &[char],
) -> Result<LinearSystem, ParseError> {
    check_variables(variables)?;
    if equations.len() != variables.len() {
        return Err(ParseError::EquationCount {
            expected: variables.len(),
            got: equations.len(),
        });
    }
    let (a, b) = parse(equations, variables)?;
    Ok(LinearSystem {
        variables: variables.to_vec(),
        a,
        b,
    })
}

fn check_variables(variables: &[char]) -> Result<(), ParseError> {
    if variables.is_empty() {
        return Err(ParseError::InvalidVariables(
            "at least one variable is required".to_string(),
        ));
    }
    for (i, v) in variables.iter().enumerate() {
        if !v.is_ascii_alphabetic() {
            return Err(ParseError::InvalidVariables(format!(
                "'{v}' is not a single letter"
            )));
        }
        if variables[..i].contains(v) {
            return Err(ParseError::InvalidVariables(format!("'{v}' appears twice")));
        }
    }
    Ok(())
}
