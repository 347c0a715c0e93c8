//! Classification metrics for evaluation.

use crate::error::PerceptraError;
use crate::tensor::Tensor;

/// Number of rows whose argmax matches the label.
///
/// Applies the same validation as the loss: shapes must agree and every
/// label must be a valid class index.
pub fn correct_predictions(log_probs: &Tensor, labels: &[i64]) -> Result<usize, PerceptraError> {
    if log_probs.rank() != 2 {
        return Err(PerceptraError::RankMismatch {
            expected: 2,
            actual: log_probs.rank(),
            operation: "correct_predictions".to_string(),
        });
    }
    let (batch, classes) = (log_probs.shape()[0], log_probs.shape()[1]);
    if labels.len() != batch {
        return Err(PerceptraError::ShapeMismatch {
            expected: vec![batch],
            actual: vec![labels.len()],
            operation: "correct_predictions".to_string(),
        });
    }

    let mut correct = 0usize;
    for (i, &label) in labels.iter().enumerate() {
        if label < 0 || label >= classes as i64 {
            return Err(PerceptraError::InvalidLabel {
                label,
                num_classes: classes,
            });
        }
        if argmax(log_probs.row(i)) == label as usize {
            correct += 1;
        }
    }
    Ok(correct)
}

/// Fraction of correctly classified rows, in `[0, 1]`.
pub fn accuracy(log_probs: &Tensor, labels: &[i64]) -> Result<f32, PerceptraError> {
    if labels.is_empty() {
        return Err(PerceptraError::EmptyBatch {
            operation: "accuracy".to_string(),
        });
    }
    let correct = correct_predictions(log_probs, labels)?;
    Ok(correct as f32 / labels.len() as f32)
}

fn argmax(row: &[f32]) -> usize {
    let mut best = 0usize;
    for (i, &v) in row.iter().enumerate() {
        if v > row[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
