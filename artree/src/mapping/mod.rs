//! Child tables for the inner node shapes, keyed by a single byte.

pub mod direct_mapping;
pub mod indexed_mapping;
pub mod sorted_keyed_mapping;

/// Byte-keyed child storage with a fixed capacity of `NUM_CHILDREN`.
///
/// `add_child` expects a key that is not yet present and a mapping that is not full; collision
/// handling and promotion to a wider mapping are the owning node's job.
pub trait NodeMapping<N, const NUM_CHILDREN: usize> {
    fn add_child(&mut self, key: u8, node: N);
    fn seek_child(&self, key: u8) -> Option<&N>;
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N>;
    fn num_children(&self) -> usize;
    fn width(&self) -> usize {
        NUM_CHILDREN
    }
    fn is_full(&self) -> bool {
        self.num_children() >= self.width()
    }
}
