//! Optimizers for training networks.
//!
//! This module provides the `Optimizer` trait and the stochastic
//! gradient descent implementation used by the training loop.

pub mod optimizer_trait;
pub mod sgd;

pub use optimizer_trait::Optimizer;
pub use sgd::Sgd;
