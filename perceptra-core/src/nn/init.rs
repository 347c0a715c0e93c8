//! Weight initialization.
//!
//! The scheme is the Kaiming-style uniform used by common `Linear`
//! implementations: both weights and biases are drawn from
//! `U(-1/sqrt(fan_in), +1/sqrt(fan_in))`. Given the same seeded RNG the
//! produced tensors are identical run to run.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::tensor::Tensor;

/// Tensor of the given shape drawn from `U(-bound, +bound)` with
/// `bound = 1 / sqrt(fan_in)`.
pub fn kaiming_uniform<R: Rng>(shape: &[usize], fan_in: usize, rng: &mut R) -> Tensor {
    debug_assert!(fan_in > 0);
    let bound = 1.0 / (fan_in as f32).sqrt();
    let dist = Uniform::new_inclusive(-bound, bound);
    let numel: usize = shape.iter().product();
    let data = (0..numel).map(|_| dist.sample(rng)).collect();
    Tensor::from_raw(data, shape.to_vec())
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
