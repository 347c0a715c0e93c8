use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};

use crate::error::PerceptraError;
use crate::model::Sequential;
use crate::nn::module::Layer;
use crate::nn::NllLoss;
use crate::optim::{Optimizer, Sgd};
use crate::train::batch::{Batch, BatchSource};
use crate::train::config::TrainingConfig;
use crate::train::metrics;

/// Shared flag for requesting a cooperative stop.
///
/// A requested stop takes effect at the next batch-step boundary; steps
/// in flight always run to completion.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        StopHandle(Arc::new(AtomicBool::new(false)))
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn stop_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Running loss average for one epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpochStats {
    total_loss: f64,
    batches: usize,
}

impl EpochStats {
    pub fn record(&mut self, loss: f32) {
        self.total_loss += f64::from(loss);
        self.batches += 1;
    }

    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Mean loss over the batches recorded so far; 0 before any batch.
    pub fn running_average(&self) -> f32 {
        if self.batches == 0 {
            0.0
        } else {
            (self.total_loss / self.batches as f64) as f32
        }
    }
}

/// Summary of a completed (or stopped) training run.
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// Running-average loss per completed epoch, in order.
    pub epoch_losses: Vec<f32>,
    /// Loss of the very first processed batch, if any batch ran.
    pub first_batch_loss: Option<f32>,
    pub batches_seen: usize,
    pub stopped_early: bool,
}

/// Evaluation summary over a data source.
#[derive(Debug, Clone, Copy)]
pub struct EvalReport {
    pub mean_loss: f32,
    pub accuracy: f32,
}

/// Orchestrates the forward / loss / backward / update cycle.
///
/// Per step, in order: reset every parameter gradient, forward the batch
/// through the network, compute the loss, propagate the loss gradient
/// backward, apply one optimizer step, record the scalar loss. Failures
/// are never retried; any error aborts the run and surfaces to the
/// caller.
#[derive(Debug)]
pub struct Trainer {
    network: Sequential,
    optimizer: Sgd,
    loss: NllLoss,
    epochs: usize,
    stop: StopHandle,
    log_every: usize,
}

impl Trainer {
    pub fn new(network: Sequential, optimizer: Sgd, epochs: usize) -> Result<Self, PerceptraError> {
        if epochs == 0 {
            return Err(PerceptraError::InvalidConfig {
                parameter: "epochs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Trainer {
            network,
            optimizer,
            loss: NllLoss::new(),
            epochs,
            stop: StopHandle::new(),
            log_every: 100,
        })
    }

    /// Builds network and optimizer from `config` and wraps them.
    pub fn from_config(config: &TrainingConfig) -> Result<Self, PerceptraError> {
        let (network, optimizer) = config.build()?;
        Self::new(network, optimizer, config.epochs)
    }

    /// Handle for requesting a stop from outside the loop.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn network(&self) -> &Sequential {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Sequential {
        &mut self.network
    }

    /// Runs the configured number of epochs over `source`.
    ///
    /// Epoch exhaustion (`next_batch` returning `None`) is the normal
    /// boundary signal; every other failure aborts immediately.
    pub fn fit<S: BatchSource>(&mut self, source: &mut S) -> Result<TrainReport, PerceptraError> {
        let mut epoch_losses = Vec::with_capacity(self.epochs);
        let mut first_batch_loss = None;
        let mut batches_seen = 0usize;
        let mut stopped_early = false;

        for epoch in 0..self.epochs {
            source.start_epoch();
            let mut stats = EpochStats::default();

            loop {
                // Stop requests are honored only between steps.
                if self.stop.stop_requested() {
                    stopped_early = true;
                    break;
                }
                let batch = match source.next_batch() {
                    Some(next) => next?,
                    None => break,
                };
                let loss = self.train_step(&batch, batches_seen)?;
                if first_batch_loss.is_none() {
                    first_batch_loss = Some(loss);
                }
                stats.record(loss);
                batches_seen += 1;
                if batches_seen % self.log_every == 0 {
                    debug!(
                        "epoch {} batch {}: loss {:.6} (running avg {:.6})",
                        epoch + 1,
                        stats.batches(),
                        loss,
                        stats.running_average()
                    );
                }
            }

            if stats.batches() > 0 {
                epoch_losses.push(stats.running_average());
            }
            info!(
                "epoch {}/{}: {} batches, running average loss {:.6}",
                epoch + 1,
                self.epochs,
                stats.batches(),
                stats.running_average()
            );
            if stopped_early {
                info!(
                    "stop requested; halting after {} batches of epoch {}",
                    stats.batches(),
                    epoch + 1
                );
                break;
            }
        }

        Ok(TrainReport {
            epoch_losses,
            first_batch_loss,
            batches_seen,
            stopped_early,
        })
    }

    /// One full training step on `batch`. `batch_index` only labels
    /// error reports.
    fn train_step(&mut self, batch: &Batch, batch_index: usize) -> Result<f32, PerceptraError> {
        // Gradient storage accumulates across backward passes; it must be
        // cleared before every cycle, not just after failed ones.
        self.optimizer.zero_grad(&mut self.network.parameters_mut());

        let log_probs = self.network.forward(&batch.inputs)?;
        let loss = self
            .loss
            .calculate(&log_probs, &batch.labels)
            .map_err(|err| err.with_batch_index(batch_index))?;
        if !loss.is_finite() {
            return Err(PerceptraError::NumericInstability {
                context: "batch loss".to_string(),
                batch_index: Some(batch_index),
            });
        }

        let loss_grad = self.loss.gradient(&log_probs, &batch.labels)?;
        self.network.backward(&loss_grad)?;
        self.optimizer.step(&mut self.network.parameters_mut())?;
        Ok(loss)
    }

    /// Mean loss and accuracy over one pass of `source`, without
    /// touching any parameter.
    pub fn evaluate<S: BatchSource>(
        &mut self,
        source: &mut S,
    ) -> Result<EvalReport, PerceptraError> {
        source.start_epoch();
        let mut total_loss = 0.0f64;
        let mut batches = 0usize;
        let mut correct = 0usize;
        let mut samples = 0usize;

        loop {
            let batch = match source.next_batch() {
                Some(next) => next?,
                None => break,
            };
            let log_probs = self.network.forward(&batch.inputs)?;
            total_loss += f64::from(self.loss.calculate(&log_probs, &batch.labels)?);
            correct += metrics::correct_predictions(&log_probs, &batch.labels)?;
            samples += batch.len();
            batches += 1;
        }

        if batches == 0 {
            return Err(PerceptraError::EmptyBatch {
                operation: "Trainer::evaluate".to_string(),
            });
        }
        Ok(EvalReport {
            mean_loss: (total_loss / batches as f64) as f32,
            accuracy: correct as f32 / samples as f32,
        })
    }
}

#[cfg(test)]
#[path = "trainer_test.rs"]
mod tests;
