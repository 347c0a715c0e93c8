//! The training loop and its collaborators.
//!
//! [`Trainer`] drives the forward / loss / backward / update cycle over
//! batches pulled from a [`BatchSource`]. The loop is single-threaded
//! and strictly sequential: each step's parameter update completes
//! before the next step's forward pass reads the same parameters.

pub mod batch;
pub mod config;
pub mod metrics;
pub mod trainer;

pub use batch::{Batch, BatchSource};
pub use config::TrainingConfig;
pub use trainer::{EpochStats, EvalReport, StopHandle, TrainReport, Trainer};
