use std::fmt::Debug;

/// A Sampler trait that defines how to iterate over indices of a dataset.
///
/// Samplers are used by `DataLoader` to generate the sequence of indices
/// to fetch from a `Dataset` during one epoch. Stateful samplers (e.g.
/// shuffling ones) may return a different sequence on every call while
/// remaining a deterministic function of their construction seed.
pub trait Sampler: Debug + Send {
    /// Returns an iterator over the indices of one epoch.
    ///
    /// # Arguments
    ///
    /// * `dataset_len` - The total number of items in the dataset.
    fn iter(&mut self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send>;

    /// Returns the number of indices one epoch will yield.
    fn len(&self, dataset_len: usize) -> usize;
}
