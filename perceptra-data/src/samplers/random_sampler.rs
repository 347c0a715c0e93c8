use super::traits::Sampler;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt::Debug;

/// A sampler that visits every index exactly once per epoch, in a
/// shuffled order.
///
/// The generator is seeded at construction and advances across epochs:
/// two samplers built with the same seed replay the same sequence of
/// epoch orderings, while successive epochs of one sampler differ from
/// each other.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    /// Creates a `RandomSampler` whose shuffles are a deterministic
    /// function of `seed`.
    pub fn with_seed(seed: u64) -> Self {
        RandomSampler {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Sampler for RandomSampler {
    fn iter(&mut self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send> {
        let mut indices: Vec<usize> = (0..dataset_len).collect();
        indices.shuffle(&mut self.rng);
        Box::new(indices.into_iter())
    }

    fn len(&self, dataset_len: usize) -> usize {
        dataset_len
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
