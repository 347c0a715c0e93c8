use crate::error::PerceptraError;
use crate::nn::parameter::Parameter;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers update parameters in place from their accumulated
/// gradients. They borrow the parameter set per call rather than owning
/// it, so the network remains the single owner of its parameters.
pub trait Optimizer {
    /// Performs a single optimization step over `params`.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the step was successful, or a `PerceptraError`
    /// otherwise.
    fn step(&mut self, params: &mut [&mut Parameter]) -> Result<(), PerceptraError>;

    /// Clears the gradients of `params`.
    ///
    /// Called before the backward pass of every training iteration:
    /// gradient storage accumulates by design, so skipping this folds
    /// stale gradients from the previous step into the next update.
    fn zero_grad(&mut self, params: &mut [&mut Parameter]);
}
