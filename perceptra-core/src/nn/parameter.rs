use crate::error::PerceptraError;
use crate::tensor::{create, Tensor};

/// A learnable tensor together with its gradient storage.
///
/// The gradient contract is explicit: [`Parameter::accumulate_grad`] adds
/// into the stored gradient, and [`Parameter::reset_grad`] zeroes it.
/// Accumulation never resets implicitly, so callers that skip the reset
/// between training steps will fold stale gradients into the next update.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: Option<String>,
    value: Tensor,
    grad: Tensor,
}

impl Parameter {
    /// Creates a Parameter around `value` with zeroed gradient storage.
    pub fn new(value: Tensor, name: Option<String>) -> Self {
        let grad = create::zeros_like(&value);
        Parameter { name, value, grad }
    }

    pub fn new_unnamed(value: Tensor) -> Self {
        Self::new(value, None)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    pub fn value(&self) -> &Tensor {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Tensor {
        &mut self.value
    }

    pub fn grad(&self) -> &Tensor {
        &self.grad
    }

    /// Splits the borrow so optimizers can read the gradient while
    /// mutating the value in one pass.
    pub fn value_and_grad(&mut self) -> (&mut Tensor, &Tensor) {
        (&mut self.value, &self.grad)
    }

    /// Adds `delta` into the stored gradient.
    ///
    /// # Errors
    ///
    /// [`PerceptraError::GradientAccumulationShapeMismatch`] if `delta`
    /// has a different shape than the parameter value.
    pub fn accumulate_grad(&mut self, delta: &Tensor) -> Result<(), PerceptraError> {
        if delta.shape() != self.value.shape() {
            return Err(PerceptraError::GradientAccumulationShapeMismatch {
                expected: self.value.shape().to_vec(),
                actual: delta.shape().to_vec(),
            });
        }
        for (g, d) in self.grad.data_mut().iter_mut().zip(delta.data()) {
            *g += *d;
        }
        Ok(())
    }

    /// Zeroes the stored gradient.
    pub fn reset_grad(&mut self) {
        self.grad.data_mut().fill(0.0);
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
