use crate::error::PerceptraError;
use crate::nn::module::Layer;
use crate::tensor::Tensor;

/// Row-wise log-softmax: `y = x - log Σ exp(x)`.
///
/// Works in the log domain throughout. The row maximum is subtracted
/// before exponentiation so large scores cannot overflow, and the output
/// rows exponentiate-and-sum to 1 within floating-point tolerance.
#[derive(Debug, Default)]
pub struct LogSoftmax {
    cached_output: Option<Tensor>,
}

impl LogSoftmax {
    pub fn new() -> Self {
        LogSoftmax {
            cached_output: None,
        }
    }
}

impl Layer for LogSoftmax {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, PerceptraError> {
        if input.rank() != 2 {
            return Err(PerceptraError::RankMismatch {
                expected: 2,
                actual: input.rank(),
                operation: "LogSoftmax::forward".to_string(),
            });
        }
        let (batch, classes) = (input.shape()[0], input.shape()[1]);
        if classes == 0 {
            return Err(PerceptraError::EmptyBatch {
                operation: "LogSoftmax::forward".to_string(),
            });
        }

        let mut output = input.clone();
        let data = output.data_mut();
        for b in 0..batch {
            let row = &mut data[b * classes..(b + 1) * classes];
            let max = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            let mut sum = 0.0f32;
            for v in row.iter() {
                sum += (*v - max).exp();
            }
            let log_sum_exp = max + sum.ln();
            for v in row.iter_mut() {
                *v -= log_sum_exp;
            }
        }

        self.cached_output = Some(output.clone());
        Ok(output)
    }

    fn backward(&mut self, upstream: &Tensor) -> Result<Tensor, PerceptraError> {
        let output = self
            .cached_output
            .take()
            .ok_or_else(|| PerceptraError::BackwardBeforeForward {
                layer: "LogSoftmax".to_string(),
            })?;
        if upstream.shape() != output.shape() {
            return Err(PerceptraError::ShapeMismatch {
                expected: output.shape().to_vec(),
                actual: upstream.shape().to_vec(),
                operation: "LogSoftmax::backward".to_string(),
            });
        }
        let (batch, classes) = (output.shape()[0], output.shape()[1]);

        // dL/dx_j = g_j - softmax_j * Σ_k g_k, with softmax = exp(output).
        let mut grad = upstream.clone();
        let grad_data = grad.data_mut();
        for b in 0..batch {
            let out_row = output.row(b);
            let grad_row = &mut grad_data[b * classes..(b + 1) * classes];
            let upstream_sum: f32 = grad_row.iter().sum();
            for (g, o) in grad_row.iter_mut().zip(out_row) {
                *g -= o.exp() * upstream_sum;
            }
        }
        Ok(grad)
    }
}

#[cfg(test)]
#[path = "log_softmax_test.rs"]
mod tests;
