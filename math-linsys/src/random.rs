//! Random practice systems
//!
//! Coefficients and constants are integers in `[-10, 10]`, as produced by the
//! calculator's "random values" button.

use crate::error::{MatrixError, Result};
use crate::kernel::inverse;
use crate::system::LinearSystem;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Smallest generated entry.
pub const MIN_ENTRY: i32 = -10;
/// Largest generated entry.
pub const MAX_ENTRY: i32 = 10;

const MAX_ATTEMPTS: usize = 1000;

/// System with uniformly random integer `A` and `b`. May be singular.
pub fn random_system<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<LinearSystem> {
    let a = Array2::from_shape_simple_fn((size, size), || entry(rng));
    let b = Array1::from_shape_simple_fn(size, || entry(rng));
    LinearSystem::new(LinearSystem::default_variables(size), a, b)
}

/// Reproducible [`random_system`].
pub fn random_system_seeded(size: usize, seed: u64) -> Result<LinearSystem> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_system(size, &mut rng)
}

/// Non-singular system whose unique solution is an integer vector in `[-5, 5]`.
///
/// `A` is redrawn until elimination finds every pivot at or above `epsilon`
/// (O(n³) per draw, unlike the cofactor determinant); `b = A·x`.
pub fn practice_system<R: Rng + ?Sized>(
    size: usize,
    epsilon: f64,
    rng: &mut R,
) -> Result<(LinearSystem, Array1<f64>)> {
    if size == 0 {
        return Err(MatrixError::Empty);
    }
    for _ in 0..MAX_ATTEMPTS {
        let a = Array2::from_shape_simple_fn((size, size), || entry(rng));
        if inverse(&a, epsilon).is_none() {
            continue;
        }
        let x = Array1::from_shape_simple_fn(size, || f64::from(rng.random_range(-5_i32..=5)));
        let b = a.dot(&x);
        let system = LinearSystem::new(LinearSystem::default_variables(size), a, b)?;
        return Ok((system, x));
    }
    log::warn!(
        "no non-singular {}x{} matrix after {} draws",
        size,
        size,
        MAX_ATTEMPTS
    );
    Err(MatrixError::Singular)
}

fn entry<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.random_range(MIN_ENTRY..=MAX_ENTRY))
}
