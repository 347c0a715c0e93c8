//! Numerical verification of analytic gradients.
//!
//! Central differences: each parameter element is nudged by ±epsilon,
//! the loss is re-evaluated, and the slope is compared against the
//! gradient produced by the explicit backward pass. Intended for tests
//! on small models; the cost is two forward passes per element.

use approx::relative_eq;
use thiserror::Error;

use crate::error::PerceptraError;
use crate::model::Sequential;
use crate::nn::module::Layer;
use crate::nn::NllLoss;
use crate::tensor::Tensor;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient mismatch for parameter '{parameter}' element {element_index}: analytical {analytical}, numerical {numerical}")]
    GradientMismatch {
        parameter: String,
        element_index: usize,
        analytical: f32,
        numerical: f32,
    },

    #[error("Numerical gradient is not finite for parameter '{parameter}' element {element_index} (loss+ {loss_plus}, loss- {loss_minus})")]
    NumericalGradNotFinite {
        parameter: String,
        element_index: usize,
        loss_plus: f32,
        loss_minus: f32,
    },

    #[error("Model evaluation failed during gradient check: {0}")]
    EvalError(#[from] PerceptraError),
}

/// Checks every parameter gradient of `network` on one batch.
///
/// `perturbation` is the epsilon of the central difference and
/// `tolerance` is used both as the absolute and the relative bound for
/// the comparison. The model must be smooth at the evaluation point;
/// kinked activations (ReLU at zero) can produce spurious mismatches.
pub fn check_model_gradients(
    network: &mut Sequential,
    loss: &NllLoss,
    inputs: &Tensor,
    labels: &[i64],
    perturbation: f32,
    tolerance: f32,
) -> Result<(), GradCheckError> {
    // Analytic pass.
    for param in network.parameters_mut() {
        param.reset_grad();
    }
    let log_probs = network.forward(inputs)?;
    let loss_grad = loss.gradient(&log_probs, labels)?;
    network.backward(&loss_grad)?;

    let names: Vec<String> = network
        .named_parameters()
        .iter()
        .map(|(name, _)| name.clone())
        .collect();
    let analytic: Vec<Vec<f32>> = network
        .parameters()
        .iter()
        .map(|p| p.grad().data().to_vec())
        .collect();

    for (param_index, grads) in analytic.iter().enumerate() {
        for element_index in 0..grads.len() {
            let original = {
                let params = network.parameters();
                params[param_index].value().data()[element_index]
            };

            set_element(network, param_index, element_index, original + perturbation);
            let loss_plus = eval_loss(network, loss, inputs, labels)?;

            set_element(network, param_index, element_index, original - perturbation);
            let loss_minus = eval_loss(network, loss, inputs, labels)?;

            set_element(network, param_index, element_index, original);

            let numerical = (loss_plus - loss_minus) / (2.0 * perturbation);
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNotFinite {
                    parameter: names[param_index].clone(),
                    element_index,
                    loss_plus,
                    loss_minus,
                });
            }

            let analytical = grads[element_index];
            if !relative_eq!(
                analytical,
                numerical,
                epsilon = tolerance,
                max_relative = tolerance
            ) {
                return Err(GradCheckError::GradientMismatch {
                    parameter: names[param_index].clone(),
                    element_index,
                    analytical,
                    numerical,
                });
            }
        }
    }
    Ok(())
}

fn set_element(network: &mut Sequential, param_index: usize, element_index: usize, value: f32) {
    let mut params = network.parameters_mut();
    params[param_index].value_mut().data_mut()[element_index] = value;
}

fn eval_loss(
    network: &mut Sequential,
    loss: &NllLoss,
    inputs: &Tensor,
    labels: &[i64],
) -> Result<f32, PerceptraError> {
    let log_probs = network.forward(inputs)?;
    loss.calculate(&log_probs, labels)
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
