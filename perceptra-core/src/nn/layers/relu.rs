use crate::error::PerceptraError;
use crate::nn::module::Layer;
use crate::tensor::Tensor;

/// Layer that applies the Rectified Linear Unit activation elementwise.
///
/// This layer has no learnable parameters.
#[derive(Debug, Default)]
pub struct ReLU {
    cached_input: Option<Tensor>,
}

impl ReLU {
    /// Creates a new ReLU layer.
    pub fn new() -> Self {
        ReLU { cached_input: None }
    }
}

impl Layer for ReLU {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, PerceptraError> {
        let mut output = input.clone();
        for v in output.data_mut() {
            if *v < 0.0 {
                *v = 0.0;
            }
        }
        self.cached_input = Some(input.clone());
        Ok(output)
    }

    fn backward(&mut self, upstream: &Tensor) -> Result<Tensor, PerceptraError> {
        let input = self
            .cached_input
            .take()
            .ok_or_else(|| PerceptraError::BackwardBeforeForward {
                layer: "ReLU".to_string(),
            })?;
        if upstream.shape() != input.shape() {
            return Err(PerceptraError::ShapeMismatch {
                expected: input.shape().to_vec(),
                actual: upstream.shape().to_vec(),
                operation: "ReLU::backward".to_string(),
            });
        }
        let mut grad = upstream.clone();
        for (g, x) in grad.data_mut().iter_mut().zip(input.data()) {
            if *x <= 0.0 {
                *g = 0.0;
            }
        }
        Ok(grad)
    }
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
