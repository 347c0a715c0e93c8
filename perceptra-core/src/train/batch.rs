use crate::error::PerceptraError;
use crate::tensor::Tensor;

/// One batch of labeled samples, handed from the data source to the
/// training loop.
///
/// Ownership transfers on handoff: the producer must not keep a mutable
/// alias of the underlying buffers, and the loop never observes a
/// partially filled batch.
#[derive(Debug, Clone)]
pub struct Batch {
    /// Inputs of shape `[batch_size, input_dim]`.
    pub inputs: Tensor,
    /// One integer class label per input row. Signed so that malformed
    /// values (e.g. `-1`) survive until the loss rejects them instead of
    /// wrapping silently.
    pub labels: Vec<i64>,
}

impl Batch {
    /// # Errors
    ///
    /// [`PerceptraError::RankMismatch`] unless `inputs` is rank 2;
    /// [`PerceptraError::ShapeMismatch`] unless there is exactly one
    /// label per input row.
    pub fn new(inputs: Tensor, labels: Vec<i64>) -> Result<Self, PerceptraError> {
        if inputs.rank() != 2 {
            return Err(PerceptraError::RankMismatch {
                expected: 2,
                actual: inputs.rank(),
                operation: "Batch::new".to_string(),
            });
        }
        if inputs.shape()[0] != labels.len() {
            return Err(PerceptraError::ShapeMismatch {
                expected: vec![inputs.shape()[0]],
                actual: vec![labels.len()],
                operation: "Batch::new".to_string(),
            });
        }
        Ok(Batch { inputs, labels })
    }

    /// Number of samples in the batch.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// The data-loading collaborator seen from the training loop.
///
/// `next_batch` returning `None` signals epoch exhaustion; that is the
/// normal epoch-boundary condition, not an error. Item errors (shape
/// problems, bad reads) surface through the inner `Result`.
pub trait BatchSource {
    /// The next batch of the current epoch, or `None` when the epoch is
    /// exhausted.
    fn next_batch(&mut self) -> Option<Result<Batch, PerceptraError>>;

    /// Starts a new pass over the data, reshuffling if the source is
    /// configured to do so.
    fn start_epoch(&mut self);
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
