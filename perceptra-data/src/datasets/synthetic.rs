//! Synthetic digit-like data for demos and end-to-end tests.

use perceptra_core::PerceptraError;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use super::InMemoryDataset;

/// Generates a labeled dataset of noisy class templates.
///
/// One fixed template per class is drawn from `U(0, 1)`, and each sample
/// is its class template plus Gaussian noise of standard deviation
/// `noise_std`, clamped back into `[0, 1]` so the values behave like
/// pixel intensities. Labels are assigned round-robin, so the classes
/// are balanced. The whole dataset is a deterministic function of
/// `seed`.
///
/// # Errors
///
/// [`PerceptraError::InvalidConfig`] if any count is zero or `noise_std`
/// is negative or not finite.
pub fn synthetic_digits(
    samples: usize,
    feature_dim: usize,
    num_classes: usize,
    noise_std: f32,
    seed: u64,
) -> Result<InMemoryDataset, PerceptraError> {
    if samples == 0 {
        return Err(PerceptraError::InvalidConfig {
            parameter: "samples".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if feature_dim == 0 {
        return Err(PerceptraError::InvalidConfig {
            parameter: "feature_dim".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if num_classes == 0 {
        return Err(PerceptraError::InvalidConfig {
            parameter: "num_classes".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if !(noise_std.is_finite() && noise_std >= 0.0) {
        return Err(PerceptraError::InvalidConfig {
            parameter: "noise_std".to_string(),
            reason: format!("must be non-negative and finite, got {}", noise_std),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let pixel = Uniform::new_inclusive(0.0f32, 1.0);
    let templates: Vec<Vec<f32>> = (0..num_classes)
        .map(|_| (0..feature_dim).map(|_| pixel.sample(&mut rng)).collect())
        .collect();

    let mut features = Vec::with_capacity(samples * feature_dim);
    let mut labels = Vec::with_capacity(samples);
    for s in 0..samples {
        let class = s % num_classes;
        for &t in &templates[class] {
            let noise: f32 = rng.sample(StandardNormal);
            features.push((t + noise_std * noise).clamp(0.0, 1.0));
        }
        labels.push(class as i64);
    }

    InMemoryDataset::new(features, labels, feature_dim)
}

#[cfg(test)]
#[path = "synthetic_test.rs"]
mod tests;
