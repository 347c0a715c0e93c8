use crate::error::PerceptraError;
use crate::tensor::{create, Tensor};

/// Mean negative log-likelihood over integer class labels.
///
/// Expects `log_probs` of shape `[batch, num_classes]` in the log domain
/// (the output of a log-softmax) and one label per row. The loss is
/// `-mean(log_probs[i, labels[i]])`.
#[derive(Debug, Default, Clone)]
pub struct NllLoss;

impl NllLoss {
    pub fn new() -> Self {
        NllLoss
    }

    /// Computes the scalar loss for a batch.
    ///
    /// # Errors
    ///
    /// * [`PerceptraError::RankMismatch`] / [`PerceptraError::ShapeMismatch`]
    ///   when `log_probs` is not `[batch, classes]` or the label count
    ///   disagrees with the batch size.
    /// * [`PerceptraError::InvalidLabel`] when a label falls outside
    ///   `[0, num_classes)`.
    /// * [`PerceptraError::NumericInstability`] when a selected
    ///   log-probability is not finite; the context names the offending
    ///   sample row.
    pub fn calculate(&self, log_probs: &Tensor, labels: &[i64]) -> Result<f32, PerceptraError> {
        let (batch, classes) = Self::validate(log_probs, labels, "NllLoss::calculate")?;

        let mut total = 0.0f32;
        for (i, &label) in labels.iter().enumerate() {
            let log_prob = log_probs.data()[i * classes + label as usize];
            if !log_prob.is_finite() {
                return Err(PerceptraError::NumericInstability {
                    context: format!("log-probability of sample {} in NllLoss::calculate", i),
                    batch_index: None,
                });
            }
            total += log_prob;
        }
        Ok(-(total / batch as f32))
    }

    /// Gradient of the loss with respect to `log_probs`: `-1/batch` at
    /// each row's true class, zero elsewhere.
    pub fn gradient(&self, log_probs: &Tensor, labels: &[i64]) -> Result<Tensor, PerceptraError> {
        let (batch, classes) = Self::validate(log_probs, labels, "NllLoss::gradient")?;

        let mut grad = create::zeros(log_probs.shape());
        let scale = -1.0 / batch as f32;
        let grad_data = grad.data_mut();
        for (i, &label) in labels.iter().enumerate() {
            grad_data[i * classes + label as usize] = scale;
        }
        Ok(grad)
    }

    fn validate(
        log_probs: &Tensor,
        labels: &[i64],
        operation: &str,
    ) -> Result<(usize, usize), PerceptraError> {
        if log_probs.rank() != 2 {
            return Err(PerceptraError::RankMismatch {
                expected: 2,
                actual: log_probs.rank(),
                operation: operation.to_string(),
            });
        }
        let (batch, classes) = (log_probs.shape()[0], log_probs.shape()[1]);
        if labels.len() != batch {
            return Err(PerceptraError::ShapeMismatch {
                expected: vec![batch],
                actual: vec![labels.len()],
                operation: operation.to_string(),
            });
        }
        if batch == 0 {
            return Err(PerceptraError::EmptyBatch {
                operation: operation.to_string(),
            });
        }
        for &label in labels {
            if label < 0 || label >= classes as i64 {
                return Err(PerceptraError::InvalidLabel {
                    label,
                    num_classes: classes,
                });
            }
        }
        Ok((batch, classes))
    }
}

#[cfg(test)]
#[path = "nll_test.rs"]
mod tests;
