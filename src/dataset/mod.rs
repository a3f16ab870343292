use crate::Result;

mod faces;
mod label;
pub use faces::*;
pub use label::*;

/// Finite, index-addressable collection of samples.
pub trait Dataset {
    type Sample;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample at `index`, valid for `index < self.len()`.
    fn get(&self, index: usize) -> Result<Self::Sample>;

    fn class_name(&self, num: usize) -> Option<String>;
}
