use crate::error::PerceptraError;
use crate::nn::parameter::Parameter;
use crate::tensor::Tensor;

/// The base trait for all network layers.
///
/// Layers expose reverse-mode differentiation as explicit data flow:
/// `forward` computes the output and caches whatever the gradient
/// computation needs, `backward` consumes that cache, accumulates
/// parameter gradients through [`Parameter::accumulate_grad`], and
/// returns the gradient with respect to the layer's input.
pub trait Layer: std::fmt::Debug + Send + Sync {
    /// Performs a forward pass.
    ///
    /// # Errors
    ///
    /// Returns a `PerceptraError` if the input shape does not match what
    /// the layer expects.
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, PerceptraError>;

    /// Propagates `upstream` (the gradient of the loss with respect to
    /// this layer's output) back through the layer.
    ///
    /// Consumes the activation cached by the most recent `forward`.
    ///
    /// # Errors
    ///
    /// [`PerceptraError::BackwardBeforeForward`] if no cached forward
    /// pass is available, or a shape error if `upstream` does not match
    /// the cached output shape.
    fn backward(&mut self, upstream: &Tensor) -> Result<Tensor, PerceptraError>;

    /// The layer's learnable parameters. Empty for stateless layers.
    fn parameters(&self) -> Vec<&Parameter> {
        Vec::new()
    }

    /// Mutable access to the learnable parameters, in the same order as
    /// [`Layer::parameters`].
    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        Vec::new()
    }

    /// Parameters along with their names (e.g. `"weight"`, `"bias"`).
    fn named_parameters(&self) -> Vec<(String, &Parameter)> {
        Vec::new()
    }
}
