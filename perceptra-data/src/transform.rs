//! Per-pixel normalization applied at collation time.

use perceptra_core::PerceptraError;

/// Mean of the MNIST training pixels after scaling to `[0, 1]`.
pub const MNIST_MEAN: f32 = 0.1307;
/// Standard deviation of the MNIST training pixels after scaling to `[0, 1]`.
pub const MNIST_STD: f32 = 0.3081;

/// Shifts and scales each value: `(x - mean) / std`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    mean: f32,
    std: f32,
}

impl Normalize {
    /// # Errors
    ///
    /// [`PerceptraError::InvalidConfig`] unless `mean` is finite and
    /// `std` is positive and finite.
    pub fn new(mean: f32, std: f32) -> Result<Self, PerceptraError> {
        if !mean.is_finite() {
            return Err(PerceptraError::InvalidConfig {
                parameter: "mean".to_string(),
                reason: format!("must be finite, got {}", mean),
            });
        }
        if !(std.is_finite() && std > 0.0) {
            return Err(PerceptraError::InvalidConfig {
                parameter: "std".to_string(),
                reason: format!("must be a positive finite number, got {}", std),
            });
        }
        Ok(Normalize { mean, std })
    }

    /// The standard MNIST normalization constants.
    pub fn mnist() -> Self {
        // Constants are compile-time valid, so this cannot fail.
        Normalize {
            mean: MNIST_MEAN,
            std: MNIST_STD,
        }
    }

    pub fn mean(&self) -> f32 {
        self.mean
    }

    pub fn std(&self) -> f32 {
        self.std
    }

    /// Normalizes a single value.
    pub fn apply(&self, value: f32) -> f32 {
        (value - self.mean) / self.std
    }
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
