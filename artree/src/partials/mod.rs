use crate::keys::KeyTrait;

pub mod vector_partial;

/// The run of key bytes a node consumes between its parent's dispatch byte and itself.
pub trait Partial: AsRef<[u8]> + Clone + Default {
    /// Returns a partial up to `length` bytes.
    fn partial_before(&self, length: usize) -> Self;
    /// Returns a partial from `start` onwards.
    fn partial_after(&self, start: usize) -> Self;
    /// Returns the byte at `pos`.
    fn at(&self, pos: usize) -> u8;
    /// Returns the length of the partial.
    fn len(&self) -> usize;
    /// Returns true if the partial is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns the length of the common prefix between `self` and `key` from `at_depth` on.
    fn prefix_length_key<K>(&self, key: &K, at_depth: usize) -> usize
    where
        K: KeyTrait<PartialType = Self>,
    {
        self.prefix_length_slice(&key.as_ref()[at_depth..])
    }
    /// Returns the length of the common prefix between `self` and `slice`.
    fn prefix_length_slice(&self, slice: &[u8]) -> usize {
        self.as_ref()
            .iter()
            .zip(slice)
            .take_while(|(a, b)| a == b)
            .count()
    }
    fn to_slice(&self) -> &[u8] {
        self.as_ref()
    }
}
