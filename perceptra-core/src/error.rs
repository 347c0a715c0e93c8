use thiserror::Error;

/// Custom error type for the Perceptra framework.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum PerceptraError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Rank mismatch: expected rank {expected}, got rank {actual} during operation {operation}")]
    RankMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Invalid label {label}: labels must lie in [0, {num_classes})")]
    InvalidLabel { label: i64, num_classes: usize },

    #[error("Numeric instability in {context} (batch index {batch_index:?}): value is not finite")]
    NumericInstability {
        context: String,
        batch_index: Option<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreation { data_len: usize, shape: Vec<usize> },

    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid configuration for {parameter}: {reason}")]
    InvalidConfig { parameter: String, reason: String },

    #[error("Backward called on {layer} without a preceding forward pass")]
    BackwardBeforeForward { layer: String },

    #[error("Shape mismatch during gradient accumulation: expected {expected:?}, got {actual:?}")]
    GradientAccumulationShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("{operation} received an empty set of samples")]
    EmptyBatch { operation: String },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl PerceptraError {
    /// Attaches the training-step index to an instability report that
    /// lacks one. Other variants pass through untouched.
    pub fn with_batch_index(self, batch_index: usize) -> Self {
        match self {
            PerceptraError::NumericInstability {
                context,
                batch_index: None,
            } => PerceptraError::NumericInstability {
                context,
                batch_index: Some(batch_index),
            },
            other => other,
        }
    }
}
