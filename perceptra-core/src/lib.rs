//! # Perceptra Core
//!
//! Building blocks for training small feed-forward classifiers: a dense
//! `f32` [`Tensor`], layers with an explicit forward/backward interface,
//! a negative log-likelihood loss, SGD, and the [`train::Trainer`] that
//! orchestrates the whole loop.
//!
//! There is no implicit computation graph: every layer exposes
//! `forward(inputs) -> outputs` and `backward(output_gradient) ->
//! input_gradient`, and the training loop threads gradient tensors
//! through them explicitly.

pub mod error;
pub mod model;
pub mod nn;
pub mod optim;
pub mod tensor;
pub mod train;
pub mod utils;

// Re-export the types callers touch on every line.
pub use error::PerceptraError;
pub use tensor::Tensor;
