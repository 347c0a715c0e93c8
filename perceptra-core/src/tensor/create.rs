//! Tensor creation helpers.

use rand::Rng;
use rand_distr::StandardNormal;

use super::Tensor;

/// Tensor filled with zeros.
pub fn zeros(shape: &[usize]) -> Tensor {
    full(shape, 0.0)
}

/// Tensor filled with ones.
pub fn ones(shape: &[usize]) -> Tensor {
    full(shape, 1.0)
}

/// Tensor filled with `value`.
pub fn full(shape: &[usize], value: f32) -> Tensor {
    let numel: usize = shape.iter().product();
    Tensor::from_raw(vec![value; numel], shape.to_vec())
}

/// Zero tensor with the same shape as `reference`.
pub fn zeros_like(reference: &Tensor) -> Tensor {
    zeros(reference.shape())
}

/// Tensor of samples drawn from the standard normal distribution.
///
/// Deterministic given the state of `rng`; pass a seeded generator for
/// reproducible values.
pub fn randn<R: Rng>(shape: &[usize], rng: &mut R) -> Tensor {
    let numel: usize = shape.iter().product();
    let data = (0..numel)
        .map(|_| rng.sample::<f32, _>(StandardNormal))
        .collect();
    Tensor::from_raw(data, shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
