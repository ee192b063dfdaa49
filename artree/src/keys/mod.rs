use crate::partials::Partial;

pub mod vector_key;

/// A complete search key: an immutable byte string.
pub trait KeyTrait: Clone + AsRef<[u8]> {
    type PartialType: Partial;

    fn new_from_slice(data: &[u8]) -> Self;
    fn at(&self, pos: usize) -> u8 {
        self.as_ref()[pos]
    }
    /// Number of bytes left once `at_depth` bytes have been consumed.
    fn length_at(&self, at_depth: usize) -> usize {
        self.as_ref().len() - at_depth
    }
    /// The unconsumed tail of the key, as a node partial.
    fn to_partial(&self, at_depth: usize) -> Self::PartialType;
    fn matches_slice(&self, slice: &[u8]) -> bool {
        self.as_ref() == slice
    }
}
