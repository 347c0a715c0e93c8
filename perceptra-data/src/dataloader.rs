//! # DataLoader
//!
//! Batches (feature row, label) samples from a [`Dataset`] into the
//! contiguous `[batch, features]` tensors the training loop consumes.
//! The visit order per epoch comes from a [`Sampler`]; an optional
//! [`Normalize`] is applied value by value during collation.
//!
//! Every batch is collated into freshly allocated storage, so the
//! training loop owns its batches outright and never shares a buffer
//! with the loader.
//!
//! The loader is both an `Iterator` over `Result<Batch, _>` and a
//! [`BatchSource`], so it plugs directly into
//! `perceptra_core::train::Trainer`.

use log::debug;

use perceptra_core::train::{Batch, BatchSource};
use perceptra_core::{PerceptraError, Tensor};

use crate::dataset::Dataset;
use crate::samplers::Sampler;
use crate::transform::Normalize;

/// Generic loader over a dataset of (feature row, label) pairs.
pub struct DataLoader<D, S>
where
    D: Dataset<Item = (Vec<f32>, i64)>,
    S: Sampler,
{
    dataset: D,
    batch_size: usize,
    sampler: S,
    /// If `true`, a trailing batch smaller than `batch_size` is dropped.
    drop_last: bool,
    normalize: Option<Normalize>,
    feature_dim: usize,
    indices: Box<dyn Iterator<Item = usize> + Send>,
}

impl<D, S> std::fmt::Debug for DataLoader<D, S>
where
    D: Dataset<Item = (Vec<f32>, i64)>,
    S: Sampler,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataLoader")
            .field("batch_size", &self.batch_size)
            .field("drop_last", &self.drop_last)
            .field("normalize", &self.normalize)
            .field("feature_dim", &self.feature_dim)
            .finish_non_exhaustive()
    }
}

impl<D, S> DataLoader<D, S>
where
    D: Dataset<Item = (Vec<f32>, i64)>,
    S: Sampler,
{
    /// Creates a loader and positions it at the start of its first epoch.
    ///
    /// The expected feature width is taken from the dataset's first
    /// sample; every collated sample is validated against it.
    ///
    /// # Errors
    ///
    /// [`PerceptraError::InvalidConfig`] if `batch_size` is zero or the
    /// first sample has no features; [`PerceptraError::EmptyBatch`] if
    /// the dataset is empty.
    pub fn new(
        dataset: D,
        batch_size: usize,
        mut sampler: S,
        drop_last: bool,
    ) -> Result<Self, PerceptraError> {
        if batch_size == 0 {
            return Err(PerceptraError::InvalidConfig {
                parameter: "batch_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if dataset.is_empty() {
            return Err(PerceptraError::EmptyBatch {
                operation: "DataLoader::new".to_string(),
            });
        }
        let (first_row, _) = dataset.get(0)?;
        if first_row.is_empty() {
            return Err(PerceptraError::InvalidConfig {
                parameter: "feature_dim".to_string(),
                reason: "dataset samples have no features".to_string(),
            });
        }
        let indices = sampler.iter(dataset.len());
        Ok(DataLoader {
            feature_dim: first_row.len(),
            dataset,
            batch_size,
            sampler,
            drop_last,
            normalize: None,
            indices,
        })
    }

    /// Applies `normalize` to every feature value during collation.
    pub fn with_normalize(mut self, normalize: Normalize) -> Self {
        self.normalize = Some(normalize);
        self
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Feature width every collated sample must have.
    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }

    /// Number of batches one epoch yields.
    pub fn batches_per_epoch(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            samples.div_ceil(self.batch_size)
        }
    }

    fn collate(&mut self) -> Option<Result<Batch, PerceptraError>> {
        let mut features = Vec::with_capacity(self.batch_size * self.feature_dim);
        let mut labels: Vec<i64> = Vec::with_capacity(self.batch_size);

        while labels.len() < self.batch_size {
            let index = match self.indices.next() {
                Some(index) => index,
                None => break,
            };
            let (row, label) = match self.dataset.get(index) {
                Ok(item) => item,
                Err(err) => return Some(Err(err)),
            };
            if row.len() != self.feature_dim {
                return Some(Err(PerceptraError::ShapeMismatch {
                    expected: vec![self.feature_dim],
                    actual: vec![row.len()],
                    operation: format!("DataLoader collate (sample {})", index),
                }));
            }
            match self.normalize {
                Some(normalize) => features.extend(row.iter().map(|&v| normalize.apply(v))),
                None => features.extend_from_slice(&row),
            }
            labels.push(label);
        }

        if labels.is_empty() || (self.drop_last && labels.len() < self.batch_size) {
            return None;
        }
        let rows = labels.len();
        let batch = Tensor::new(features, vec![rows, self.feature_dim])
            .and_then(|inputs| Batch::new(inputs, labels));
        Some(batch)
    }
}

impl<D, S> Iterator for DataLoader<D, S>
where
    D: Dataset<Item = (Vec<f32>, i64)>,
    S: Sampler,
{
    type Item = Result<Batch, PerceptraError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.collate()
    }
}

impl<D, S> BatchSource for DataLoader<D, S>
where
    D: Dataset<Item = (Vec<f32>, i64)>,
    S: Sampler,
{
    fn next_batch(&mut self) -> Option<Result<Batch, PerceptraError>> {
        self.collate()
    }

    fn start_epoch(&mut self) {
        debug!(
            "starting epoch: {} samples in batches of {}",
            self.dataset.len(),
            self.batch_size
        );
        self.indices = self.sampler.iter(self.dataset.len());
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
