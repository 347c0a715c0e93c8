use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::PerceptraError;
use crate::nn::layers::{Linear, LogSoftmax, ReLU};
use crate::nn::module::Layer;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;

/// An ordered container of layers.
///
/// `forward` runs the layers front to back; `backward` runs them back to
/// front, threading the gradient tensor through each one.
#[derive(Debug, Default)]
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
    names: Vec<String>,
}

impl Sequential {
    pub fn new() -> Self {
        Sequential {
            layers: Vec::new(),
            names: Vec::new(),
        }
    }

    pub fn add_layer(&mut self, name: &str, layer: Box<dyn Layer>) {
        self.layers.push(layer);
        self.names.push(name.to_string());
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Layer for Sequential {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, PerceptraError> {
        let mut current = input.clone();
        for layer in &mut self.layers {
            current = layer.forward(&current)?;
        }
        Ok(current)
    }

    fn backward(&mut self, upstream: &Tensor) -> Result<Tensor, PerceptraError> {
        let mut current = upstream.clone();
        for layer in self.layers.iter_mut().rev() {
            current = layer.backward(&current)?;
        }
        Ok(current)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        self.layers
            .iter_mut()
            .flat_map(|l| l.parameters_mut())
            .collect()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        let mut params = Vec::new();
        for (name, layer) in self.names.iter().zip(&self.layers) {
            for (param_name, param) in layer.named_parameters() {
                params.push((format!("{}.{}", name, param_name), param));
            }
        }
        params
    }
}

/// Builds the classifier network for a list of layer widths.
///
/// `widths[0]` is the input dimension and `widths[last]` the class count.
/// Hidden transitions get a ReLU; the final linear layer feeds a
/// log-softmax so the network emits log-probabilities, never renormalized
/// probabilities. All parameters are initialized from `seed`.
///
/// # Errors
///
/// [`PerceptraError::InvalidConfig`] unless at least two widths are given
/// and every width is positive.
pub fn feed_forward(widths: &[usize], seed: u64) -> Result<Sequential, PerceptraError> {
    if widths.len() < 2 {
        return Err(PerceptraError::InvalidConfig {
            parameter: "layer_widths".to_string(),
            reason: format!(
                "need an input and an output width, got {} entries",
                widths.len()
            ),
        });
    }
    if widths.iter().any(|&w| w == 0) {
        return Err(PerceptraError::InvalidConfig {
            parameter: "layer_widths".to_string(),
            reason: "all layer widths must be positive".to_string(),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut model = Sequential::new();
    let hidden_transitions = widths.len() - 2;
    for (i, pair) in widths.windows(2).enumerate() {
        let linear = Linear::new(pair[0], pair[1], true, &mut rng)?;
        model.add_layer(&format!("fc{}", i + 1), Box::new(linear));
        if i < hidden_transitions {
            model.add_layer(&format!("relu{}", i + 1), Box::new(ReLU::new()));
        }
    }
    model.add_layer("log_softmax", Box::new(LogSoftmax::new()));
    Ok(model)
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
