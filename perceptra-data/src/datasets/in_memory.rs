use perceptra_core::PerceptraError;

use crate::dataset::Dataset;

/// A labeled dataset held entirely in memory.
///
/// Features are stored as one flat row-major buffer with a fixed stride
/// of `feature_dim` values per sample; `get` clones the requested row so
/// the caller never aliases the backing storage.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    features: Vec<f32>,
    labels: Vec<i64>,
    feature_dim: usize,
}

impl InMemoryDataset {
    /// Creates a dataset from a flat feature buffer and one label per row.
    ///
    /// # Errors
    ///
    /// [`PerceptraError::InvalidConfig`] if `feature_dim` is zero;
    /// [`PerceptraError::ShapeMismatch`] if `features.len()` is not
    /// `labels.len() * feature_dim`.
    pub fn new(
        features: Vec<f32>,
        labels: Vec<i64>,
        feature_dim: usize,
    ) -> Result<Self, PerceptraError> {
        if feature_dim == 0 {
            return Err(PerceptraError::InvalidConfig {
                parameter: "feature_dim".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if features.len() != labels.len() * feature_dim {
            return Err(PerceptraError::ShapeMismatch {
                expected: vec![labels.len(), feature_dim],
                actual: vec![features.len()],
                operation: "InMemoryDataset::new".to_string(),
            });
        }
        Ok(InMemoryDataset {
            features,
            labels,
            feature_dim,
        })
    }

    /// Number of values per sample row.
    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }

    /// The label of row `index` without cloning the features.
    ///
    /// # Errors
    ///
    /// [`PerceptraError::IndexOutOfBounds`] for an invalid index.
    pub fn label(&self, index: usize) -> Result<i64, PerceptraError> {
        self.labels
            .get(index)
            .copied()
            .ok_or(PerceptraError::IndexOutOfBounds {
                index,
                len: self.labels.len(),
            })
    }
}

impl Dataset for InMemoryDataset {
    type Item = (Vec<f32>, i64);

    fn get(&self, index: usize) -> Result<Self::Item, PerceptraError> {
        if index >= self.labels.len() {
            return Err(PerceptraError::IndexOutOfBounds {
                index,
                len: self.labels.len(),
            });
        }
        let start = index * self.feature_dim;
        let row = self.features[start..start + self.feature_dim].to_vec();
        Ok((row, self.labels[index]))
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
#[path = "in_memory_test.rs"]
mod tests;
