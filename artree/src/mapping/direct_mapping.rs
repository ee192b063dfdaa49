use crate::mapping::NodeMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::utils::bitarray::BitArray;
use crate::utils::bitset::{Bitset64, BitsetTrait};

/// One slot per possible key byte. Never fills up past what a byte can address.
pub struct DirectMapping<N> {
    pub(crate) children: Box<BitArray<N, 256, Bitset64<4>>>,
    num_children: usize,
}

impl<N> Default for DirectMapping<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> DirectMapping<N> {
    pub fn new() -> Self {
        Self {
            children: Box::new(BitArray::new()),
            num_children: 0,
        }
    }

    /// Steal every child of an indexed mapping. `im` is left empty.
    pub fn from_indexed<const WIDTH: usize, FromBitset: BitsetTrait>(
        im: &mut IndexedMapping<N, WIDTH, FromBitset>,
    ) -> Self {
        let mut new_mapping = DirectMapping::<N>::new();
        for (key, child) in im.take_children() {
            new_mapping.add_child(key, child);
        }
        new_mapping
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        self.children.iter().map(|(key, node)| (key as u8, node))
    }
}

impl<N> NodeMapping<N, 256> for DirectMapping<N> {
    #[inline]
    fn add_child(&mut self, key: u8, node: N) {
        if self.children.set(key as usize, node).is_none() {
            self.num_children += 1;
        }
    }

    #[inline]
    fn seek_child(&self, key: u8) -> Option<&N> {
        self.children.get(key as usize)
    }

    #[inline]
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        self.children.get_mut(key as usize)
    }

    #[inline]
    fn num_children(&self) -> usize {
        self.num_children
    }
}

impl<N: Clone> Clone for DirectMapping<N> {
    fn clone(&self) -> Self {
        Self {
            children: self.children.clone(),
            num_children: self.num_children,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::mapping::NodeMapping;
    use crate::mapping::indexed_mapping::IndexedMapping;
    use crate::utils::bitset::Bitset64;

    #[test]
    fn direct_mapping_test() {
        let mut dm = super::DirectMapping::new();
        for i in 0..=255u8 {
            dm.add_child(i, i);
            assert_eq!(*dm.seek_child(i).unwrap(), i);
        }
        assert_eq!(dm.num_children(), 256);
        assert!(dm.is_full());
        assert_eq!(dm.iter().count(), 256);
    }

    #[test]
    fn from_indexed_keeps_everything() {
        let mut im = IndexedMapping::<u16, 48, Bitset64<1>>::new();
        for i in 0..48u8 {
            im.add_child(255 - i, i as u16);
        }
        let dm = super::DirectMapping::from_indexed(&mut im);
        assert_eq!(im.num_children, 0);
        assert_eq!(dm.num_children(), 48);
        for i in 0..48u8 {
            assert_eq!(dm.seek_child(255 - i), Some(&(i as u16)));
        }
        assert!(dm.seek_child(0).is_none());
    }
}
