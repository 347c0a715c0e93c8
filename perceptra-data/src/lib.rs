//! # Perceptra Data
//!
//! The data-loading side of Perceptra: indexed [`Dataset`]s, [`samplers`]
//! that decide the visit order, per-pixel [`transform::Normalize`], and
//! the [`DataLoader`] that collates samples into the contiguous batches
//! the training loop consumes.
//!
//! The loader implements `perceptra_core::train::BatchSource`, so a
//! `Trainer` can pull batches from it directly:
//!
//! ```rust
//! use perceptra_core::train::{Trainer, TrainingConfig};
//! use perceptra_data::{synthetic_digits, DataLoader, SequentialSampler};
//!
//! # fn main() -> Result<(), perceptra_core::PerceptraError> {
//! let config = TrainingConfig {
//!     layer_widths: vec![16, 12, 4],
//!     ..TrainingConfig::default()
//! };
//! let dataset = synthetic_digits(128, 16, 4, 0.05, 7)?;
//! let mut loader = DataLoader::new(dataset, config.batch_size, SequentialSampler::new(), false)?;
//! let mut trainer = Trainer::from_config(&config)?;
//! let report = trainer.fit(&mut loader)?;
//! assert!(!report.epoch_losses.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod dataloader;
pub mod dataset;
pub mod datasets;
pub mod samplers;
pub mod transform;

// Re-export main components
pub use dataloader::DataLoader;
pub use dataset::Dataset;
pub use datasets::{synthetic_digits, InMemoryDataset};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
pub use transform::Normalize;
