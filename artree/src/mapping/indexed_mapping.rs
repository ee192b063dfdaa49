use std::mem::MaybeUninit;

use crate::mapping::NodeMapping;
use crate::mapping::sorted_keyed_mapping::SortedKeyedMapping;
use crate::utils::bitarray::BitArray;
use crate::utils::bitset::{Bitset64, BitsetTrait};

// A 256-entry index from key byte to slot, plus a dense array of WIDTH child slots.
pub struct IndexedMapping<N, const WIDTH: usize, Bitset: BitsetTrait> {
    child_ptr_indexes: Box<BitArray<u8, 256, Bitset64<4>>>,
    children: Box<BitArray<N, WIDTH, Bitset>>,
    pub(crate) num_children: u8,
}

impl<N, const WIDTH: usize, Bitset: BitsetTrait> Default for IndexedMapping<N, WIDTH, Bitset> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize, Bitset: BitsetTrait> IndexedMapping<N, WIDTH, Bitset> {
    pub fn new() -> Self {
        Self {
            child_ptr_indexes: Box::new(BitArray::new()),
            children: Box::new(BitArray::new()),
            num_children: 0,
        }
    }

    /// Steal every child of a sorted mapping. `km` is left empty.
    pub fn from_sorted_keyed<const KM_WIDTH: usize>(
        km: &mut SortedKeyedMapping<N, KM_WIDTH>,
    ) -> Self {
        assert!(km.num_children as usize <= WIDTH);
        let mut im: IndexedMapping<N, WIDTH, Bitset> = IndexedMapping::new();
        let num_children = km.num_children as usize;
        // Zeroed first so `km` never believes it owns a slot that has been moved out.
        km.num_children = 0;
        for i in 0..num_children {
            let stolen = std::mem::replace(&mut km.children[i], MaybeUninit::uninit());
            im.add_child(km.keys[i], unsafe { stolen.assume_init() });
        }
        km.keys = [255; KM_WIDTH];
        im
    }

    /// Move every child out, in ascending key order. The mapping is left empty.
    pub(crate) fn take_children(&mut self) -> Vec<(u8, N)> {
        let indexed: Vec<(usize, u8)> = self
            .child_ptr_indexes
            .iter()
            .map(|(key, pos)| (key, *pos))
            .collect();
        self.child_ptr_indexes.clear();
        self.num_children = 0;

        indexed
            .into_iter()
            .filter_map(|(key, pos)| {
                let child = self.children.erase(pos as usize)?;
                Some((key as u8, child))
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        self.child_ptr_indexes
            .iter()
            .map(move |(key, pos)| (key as u8, &self.children[*pos as usize]))
    }
}

impl<N, const WIDTH: usize, Bitset: BitsetTrait> NodeMapping<N, WIDTH>
    for IndexedMapping<N, WIDTH, Bitset>
{
    fn add_child(&mut self, key: u8, node: N) {
        debug_assert!(!self.child_ptr_indexes.check(key as usize));
        let Some(pos) = self.children.first_free_pos() else {
            panic!("add_child: no space left");
        };
        self.child_ptr_indexes.set(key as usize, pos as u8);
        self.children.set(pos, node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let pos = self.child_ptr_indexes.get(key as usize)?;
        self.children.get(*pos as usize)
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let pos = self.child_ptr_indexes.get(key as usize)?;
        self.children.get_mut(*pos as usize)
    }

    fn num_children(&self) -> usize {
        self.num_children as usize
    }
}

impl<N: Clone, const WIDTH: usize, Bitset: BitsetTrait> Clone
    for IndexedMapping<N, WIDTH, Bitset>
{
    fn clone(&self) -> Self {
        let mut new = IndexedMapping::new();
        for (key, child) in self.iter() {
            new.add_child(key, child.clone());
        }
        new
    }
}
