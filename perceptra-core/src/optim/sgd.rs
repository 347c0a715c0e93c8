use log::warn;

use crate::error::PerceptraError;
use crate::nn::parameter::Parameter;
use crate::optim::optimizer_trait::Optimizer;

/// Stochastic gradient descent.
///
/// The base update is `param -= lr * grad`. Optional momentum keeps a
/// velocity buffer per parameter; optional weight decay adds an L2
/// penalty term to the gradient before the update.
#[derive(Debug)]
pub struct Sgd {
    lr: f32,
    momentum: f32,
    weight_decay: f32,
    // Velocity buffers, one per parameter slot, sized lazily on the
    // first step.
    velocity: Vec<Vec<f32>>,
}

impl Sgd {
    /// Plain SGD with the given learning rate.
    pub fn new(lr: f32) -> Result<Self, PerceptraError> {
        Self::with_options(lr, 0.0, 0.0)
    }

    /// SGD with momentum and weight decay.
    ///
    /// # Errors
    ///
    /// [`PerceptraError::InvalidConfig`] unless `lr` is positive and
    /// finite, `momentum` lies in `[0, 1)` and `weight_decay` is
    /// non-negative.
    pub fn with_options(lr: f32, momentum: f32, weight_decay: f32) -> Result<Self, PerceptraError> {
        if !(lr.is_finite() && lr > 0.0) {
            return Err(PerceptraError::InvalidConfig {
                parameter: "learning_rate".to_string(),
                reason: format!("must be a positive finite number, got {}", lr),
            });
        }
        if !(0.0..1.0).contains(&momentum) {
            return Err(PerceptraError::InvalidConfig {
                parameter: "momentum".to_string(),
                reason: format!("must lie in [0, 1), got {}", momentum),
            });
        }
        if !(weight_decay.is_finite() && weight_decay >= 0.0) {
            return Err(PerceptraError::InvalidConfig {
                parameter: "weight_decay".to_string(),
                reason: format!("must be non-negative and finite, got {}", weight_decay),
            });
        }
        Ok(Sgd {
            lr,
            momentum,
            weight_decay,
            velocity: Vec::new(),
        })
    }

    pub fn learning_rate(&self) -> f32 {
        self.lr
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, params: &mut [&mut Parameter]) -> Result<(), PerceptraError> {
        if self.momentum != 0.0 && self.velocity.len() != params.len() {
            if !self.velocity.is_empty() {
                warn!(
                    "SGD momentum buffers rebuilt: parameter count changed from {} to {}",
                    self.velocity.len(),
                    params.len()
                );
            }
            self.velocity = params
                .iter()
                .map(|p| vec![0.0f32; p.grad().numel()])
                .collect();
        }

        for (slot, param) in params.iter_mut().enumerate() {
            let (value, grad) = param.value_and_grad();
            if self.momentum != 0.0 {
                let buffer = &mut self.velocity[slot];
                if buffer.len() != grad.numel() {
                    return Err(PerceptraError::InternalError(format!(
                        "SGD momentum buffer for slot {} has length {}, parameter has {}",
                        slot,
                        buffer.len(),
                        grad.numel()
                    )));
                }
                for ((v, g), m) in value
                    .data_mut()
                    .iter_mut()
                    .zip(grad.data())
                    .zip(buffer.iter_mut())
                {
                    let mut direction = *g;
                    if self.weight_decay != 0.0 {
                        direction += self.weight_decay * *v;
                    }
                    *m = self.momentum * *m + direction;
                    *v -= self.lr * *m;
                }
            } else {
                for (v, g) in value.data_mut().iter_mut().zip(grad.data()) {
                    let mut direction = *g;
                    if self.weight_decay != 0.0 {
                        direction += self.weight_decay * *v;
                    }
                    *v -= self.lr * direction;
                }
            }
        }
        Ok(())
    }

    fn zero_grad(&mut self, params: &mut [&mut Parameter]) {
        for param in params.iter_mut() {
            param.reset_grad();
        }
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
