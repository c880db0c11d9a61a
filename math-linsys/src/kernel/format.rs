//! Text rendering of scalars, vectors and matrices for trace output
//!
//! Matrix and vector renderings use Rust's shortest round-trip float
//! formatting, so every number in the string parses back to the stored value.
//! Scalars in annotations use a fixed number of decimals.

use ndarray::{Array1, Array2};

/// Round-trip rendering of a single value (`2`, `-0.5`, `0.1`).
pub fn format_value(v: f64) -> String {
    // -0.0 prints as "-0"
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

/// Fixed-decimals rendering used in annotations (`2.000000`).
pub fn format_fixed(v: f64, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => s,
    }
}

/// Bracket notation: `[7, 1]`.
pub fn format_vector(v: &Array1<f64>) -> String {
    let items: Vec<String> = v.iter().map(|&x| format_value(x)).collect();
    format!("[{}]", items.join(", "))
}

/// Bracket notation: `[[2, 3], [1, -1]]`.
pub fn format_matrix(m: &Array2<f64>) -> String {
    let rows: Vec<String> = m
        .rows()
        .into_iter()
        .map(|row| {
            let items: Vec<String> = row.iter().map(|&x| format_value(x)).collect();
            format!("[{}]", items.join(", "))
        })
        .collect();
    format!("[{}]", rows.join(", "))
}

/// Augmented matrix with the last column split off: `[[2, 3 | 7], [1, -1 | 1]]`.
pub fn format_augmented(m: &Array2<f64>) -> String {
    let cols = m.ncols();
    let rows: Vec<String> = m
        .rows()
        .into_iter()
        .map(|row| {
            let left: Vec<String> = row
                .iter()
                .take(cols.saturating_sub(1))
                .map(|&x| format_value(x))
                .collect();
            let right = cols
                .checked_sub(1)
                .and_then(|c| row.get(c))
                .map(|&x| format_value(x))
                .unwrap_or_default();
            format!("[{} | {}]", left.join(", "), right)
        })
        .collect();
    format!("[{}]", rows.join(", "))
}

/// LaTeX `bmatrix` rendering, as typeset by the lesson pages.
pub fn format_matrix_latex(m: &Array2<f64>) -> String {
    let rows: Vec<String> = m
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|&x| format_value(x))
                .collect::<Vec<_>>()
                .join(" & ")
        })
        .collect();
    format!("\\begin{{bmatrix}} {} \\end{{bmatrix}}", rows.join(" \\\\ "))
}

/// LaTeX rendering of an augmented matrix with a vertical bar before the last column.
pub fn format_augmented_latex(m: &Array2<f64>) -> String {
    let layout = format!("{}|c", "c".repeat(m.ncols().saturating_sub(1)));
    let rows: Vec<String> = m
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|&x| format_value(x))
                .collect::<Vec<_>>()
                .join(" & ")
        })
        .collect();
    format!(
        "\\left[\\begin{{array}}{{{layout}}} {} \\end{{array}}\\right]",
        rows.join(" \\\\ ")
    )
}
