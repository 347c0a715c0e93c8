use rand::Rng;

use crate::error::PerceptraError;
use crate::nn::init;
use crate::nn::module::Layer;
use crate::nn::parameter::Parameter;
use crate::tensor::{create, Tensor};

/// Applies an affine transform to the incoming data: `y = x·Wᵀ + b`.
///
/// `W` has shape `[out_features, in_features]` and `b` has shape
/// `[out_features]`. Both are initialized from
/// `U(-1/sqrt(in_features), +1/sqrt(in_features))` (see [`crate::nn::init`]),
/// so construction is reproducible given a seeded RNG.
#[derive(Debug)]
pub struct Linear {
    weight: Parameter,
    bias: Option<Parameter>,
    in_features: usize,
    out_features: usize,
    cached_input: Option<Tensor>,
}

impl Linear {
    /// Creates a new Linear layer with randomly initialized parameters.
    ///
    /// # Arguments
    ///
    /// * `in_features` - Size of each input sample.
    /// * `out_features` - Size of each output sample.
    /// * `has_bias` - If `true`, the layer will learn an additive bias.
    /// * `rng` - Seeded generator used for initialization.
    pub fn new<R: Rng>(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
        rng: &mut R,
    ) -> Result<Self, PerceptraError> {
        Self::check_features(in_features, out_features)?;
        let weight = Parameter::new(
            init::kaiming_uniform(&[out_features, in_features], in_features, rng),
            Some("weight".to_string()),
        );
        let bias = if has_bias {
            Some(Parameter::new(
                init::kaiming_uniform(&[out_features], in_features, rng),
                Some("bias".to_string()),
            ))
        } else {
            None
        };
        Ok(Linear {
            weight,
            bias,
            in_features,
            out_features,
            cached_input: None,
        })
    }

    /// Creates a Linear layer with all-zero weights and bias.
    ///
    /// With zero parameters every class receives the same score, which is
    /// useful as a neutral starting point in tests and diagnostics.
    pub fn zeroed(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
    ) -> Result<Self, PerceptraError> {
        Self::check_features(in_features, out_features)?;
        let weight = Parameter::new(
            create::zeros(&[out_features, in_features]),
            Some("weight".to_string()),
        );
        let bias = if has_bias {
            Some(Parameter::new(
                create::zeros(&[out_features]),
                Some("bias".to_string()),
            ))
        } else {
            None
        };
        Ok(Linear {
            weight,
            bias,
            in_features,
            out_features,
            cached_input: None,
        })
    }

    fn check_features(in_features: usize, out_features: usize) -> Result<(), PerceptraError> {
        if in_features == 0 {
            return Err(PerceptraError::InvalidConfig {
                parameter: "in_features".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if out_features == 0 {
            return Err(PerceptraError::InvalidConfig {
                parameter: "out_features".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl Layer for Linear {
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, PerceptraError> {
        if input.rank() != 2 {
            return Err(PerceptraError::RankMismatch {
                expected: 2,
                actual: input.rank(),
                operation: "Linear::forward".to_string(),
            });
        }
        let batch = input.shape()[0];
        if input.shape()[1] != self.in_features {
            return Err(PerceptraError::ShapeMismatch {
                expected: vec![batch, self.in_features],
                actual: input.shape().to_vec(),
                operation: "Linear::forward".to_string(),
            });
        }

        // y = x · Wᵀ, then broadcast the bias over the batch dimension.
        let mut output = input.matmul(&self.weight.value().transpose()?)?;
        if let Some(ref bias) = self.bias {
            let out_data = output.data_mut();
            let bias_data = bias.value().data();
            for b in 0..batch {
                let row = &mut out_data[b * self.out_features..(b + 1) * self.out_features];
                for (o, bv) in row.iter_mut().zip(bias_data) {
                    *o += *bv;
                }
            }
        }

        self.cached_input = Some(input.clone());
        Ok(output)
    }

    fn backward(&mut self, upstream: &Tensor) -> Result<Tensor, PerceptraError> {
        let input = self
            .cached_input
            .take()
            .ok_or_else(|| PerceptraError::BackwardBeforeForward {
                layer: "Linear".to_string(),
            })?;
        let batch = input.shape()[0];
        if upstream.shape() != [batch, self.out_features].as_slice() {
            return Err(PerceptraError::ShapeMismatch {
                expected: vec![batch, self.out_features],
                actual: upstream.shape().to_vec(),
                operation: "Linear::backward".to_string(),
            });
        }

        // dL/dW = upstreamᵀ · x, dL/db = Σ_batch upstream, dL/dx = upstream · W.
        let grad_weight = upstream.transpose()?.matmul(&input)?;
        self.weight.accumulate_grad(&grad_weight)?;
        if let Some(ref mut bias) = self.bias {
            let grad_bias = upstream.sum_rows()?;
            bias.accumulate_grad(&grad_bias)?;
        }
        upstream.matmul(self.weight.value())
    }

    fn parameters(&self) -> Vec<&Parameter> {
        let mut params = vec![&self.weight];
        if let Some(ref bias) = self.bias {
            params.push(bias);
        }
        params
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        let mut params = vec![&mut self.weight];
        if let Some(ref mut bias) = self.bias {
            params.push(bias);
        }
        params
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        let mut params = vec![("weight".to_string(), &self.weight)];
        if let Some(ref bias) = self.bias {
            params.push(("bias".to_string(), bias));
        }
        params
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
