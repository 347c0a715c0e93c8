use crate::error::PerceptraError;
use crate::model::{feed_forward, Sequential};
use crate::optim::Sgd;

/// Everything the training run is parameterized by.
///
/// `layer_widths` lists the network widths from input dimension to class
/// count (for digit images: first 784, last 10).
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub learning_rate: f32,
    pub batch_size: usize,
    pub layer_widths: Vec<usize>,
    /// Seed for parameter initialization.
    pub seed: u64,
    pub momentum: f32,
    pub weight_decay: f32,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            epochs: 1,
            learning_rate: 0.003,
            batch_size: 64,
            layer_widths: vec![784, 128, 64, 10],
            seed: 42,
            momentum: 0.0,
            weight_decay: 0.0,
        }
    }
}

impl TrainingConfig {
    /// # Errors
    ///
    /// [`PerceptraError::InvalidConfig`] for any non-positive count, a
    /// non-positive or non-finite learning rate, or malformed widths.
    pub fn validate(&self) -> Result<(), PerceptraError> {
        if self.epochs == 0 {
            return Err(PerceptraError::InvalidConfig {
                parameter: "epochs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.batch_size == 0 {
            return Err(PerceptraError::InvalidConfig {
                parameter: "batch_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(PerceptraError::InvalidConfig {
                parameter: "learning_rate".to_string(),
                reason: format!(
                    "must be a positive finite number, got {}",
                    self.learning_rate
                ),
            });
        }
        if self.layer_widths.len() < 2 {
            return Err(PerceptraError::InvalidConfig {
                parameter: "layer_widths".to_string(),
                reason: "need at least an input and an output width".to_string(),
            });
        }
        if self.layer_widths.iter().any(|&w| w == 0) {
            return Err(PerceptraError::InvalidConfig {
                parameter: "layer_widths".to_string(),
                reason: "all layer widths must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Input dimension expected by the network.
    pub fn input_dim(&self) -> usize {
        *self.layer_widths.first().unwrap_or(&0)
    }

    /// Number of output classes.
    pub fn num_classes(&self) -> usize {
        *self.layer_widths.last().unwrap_or(&0)
    }

    /// Builds the network and optimizer described by this config.
    pub fn build(&self) -> Result<(Sequential, Sgd), PerceptraError> {
        self.validate()?;
        let network = feed_forward(&self.layer_widths, self.seed)?;
        let optimizer = Sgd::with_options(self.learning_rate, self.momentum, self.weight_decay)?;
        Ok((network, optimizer))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
