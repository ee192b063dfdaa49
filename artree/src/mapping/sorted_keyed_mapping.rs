use std::mem::MaybeUninit;

use crate::mapping::NodeMapping;
use crate::utils::u8_keys::{
    u8_keys_find_insert_position_sorted, u8_keys_find_key_position_sorted,
};

/// Maps a key to a node, using a sorted array of keys and a corresponding array of nodes.
/// The first `num_children` positions are occupied; everything past that is padded with 255.
/// Lookups are linear for small widths and SIMD-assisted for 16. Inserts shift the tail right
/// so that keys stay in ascending unsigned order, which is what Node4 and Node16 promise.
pub struct SortedKeyedMapping<N, const WIDTH: usize> {
    pub(crate) keys: [u8; WIDTH],
    pub(crate) children: Box<[MaybeUninit<N>; WIDTH]>,
    pub(crate) num_children: u8,
}

impl<N, const WIDTH: usize> Default for SortedKeyedMapping<N, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize> SortedKeyedMapping<N, WIDTH> {
    #[inline]
    pub fn new() -> Self {
        Self {
            keys: [255; WIDTH],
            children: Box::new([const { MaybeUninit::uninit() }; WIDTH]),
            num_children: 0,
        }
    }

    /// Steal every child of a narrower mapping. `km` is left empty.
    pub fn from_resized<const OLD_WIDTH: usize>(km: &mut SortedKeyedMapping<N, OLD_WIDTH>) -> Self {
        assert!(km.num_children as usize <= WIDTH);
        let mut new = SortedKeyedMapping::new();
        for i in 0..km.num_children as usize {
            new.keys[i] = km.keys[i];
            new.children[i] = std::mem::replace(&mut km.children[i], MaybeUninit::uninit());
        }
        new.num_children = km.num_children;
        km.num_children = 0;
        km.keys = [255; OLD_WIDTH];
        new
    }

    /// Key bytes in use, ascending.
    #[inline]
    pub fn keys(&self) -> &[u8] {
        &self.keys[..self.num_children as usize]
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        (0..self.num_children as usize)
            .map(move |i| (self.keys[i], unsafe { self.children[i].assume_init_ref() }))
    }
}

impl<N, const WIDTH: usize> NodeMapping<N, WIDTH> for SortedKeyedMapping<N, WIDTH> {
    #[inline]
    fn add_child(&mut self, key: u8, node: N) {
        let num_children = self.num_children as usize;
        assert!(num_children < WIDTH, "add_child: no space left");
        debug_assert!(self.seek_child(key).is_none());

        let idx = u8_keys_find_insert_position_sorted::<WIDTH>(key, &self.keys, num_children);
        for i in (idx..num_children).rev() {
            self.keys[i + 1] = self.keys[i];
            self.children[i + 1] = std::mem::replace(&mut self.children[i], MaybeUninit::uninit());
        }
        self.keys[idx] = key;
        self.children[idx].write(node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let idx =
            u8_keys_find_key_position_sorted::<WIDTH>(key, &self.keys, self.num_children as usize)?;
        Some(unsafe { self.children[idx].assume_init_ref() })
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let idx =
            u8_keys_find_key_position_sorted::<WIDTH>(key, &self.keys, self.num_children as usize)?;
        Some(unsafe { self.children[idx].assume_init_mut() })
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        self.num_children as usize
    }
}

impl<N: Clone, const WIDTH: usize> Clone for SortedKeyedMapping<N, WIDTH> {
    fn clone(&self) -> Self {
        let mut new = SortedKeyedMapping::new();
        for (i, (key, child)) in self.iter().enumerate() {
            new.keys[i] = key;
            new.children[i].write(child.clone());
            // Bumped per child so a panicking clone only drops what was written.
            new.num_children += 1;
        }
        new
    }
}

impl<N, const WIDTH: usize> Drop for SortedKeyedMapping<N, WIDTH> {
    fn drop(&mut self) {
        for value in &mut self.children[..self.num_children as usize] {
            unsafe { value.assume_init_drop() }
        }
        self.num_children = 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::mapping::NodeMapping;
    use crate::mapping::sorted_keyed_mapping::SortedKeyedMapping;

    #[test]
    fn test_add_seek() {
        let mut node = SortedKeyedMapping::<u8, 4>::new();
        node.add_child(1, 1);
        node.add_child(2, 2);
        node.add_child(3, 3);
        node.add_child(4, 4);
        assert_eq!(node.num_children(), 4);
        assert!(node.is_full());
        assert_eq!(node.seek_child(1), Some(&1));
        assert_eq!(node.seek_child(2), Some(&2));
        assert_eq!(node.seek_child(3), Some(&3));
        assert_eq!(node.seek_child(4), Some(&4));
        assert_eq!(node.seek_child(5), None);
        assert_eq!(node.seek_child_mut(1), Some(&mut 1));
        assert_eq!(node.seek_child_mut(4), Some(&mut 4));
        assert_eq!(node.seek_child_mut(5), None);
    }

    #[test]
    fn test_keys_stay_sorted() {
        let mut node = SortedKeyedMapping::<u8, 16>::new();
        for k in [200u8, 3, 255, 128, 0, 127, 64] {
            node.add_child(k, k);
        }
        assert_eq!(node.keys(), &[0, 3, 64, 127, 128, 200, 255]);
        for (k, v) in node.iter() {
            assert_eq!(k, *v);
        }
        assert_eq!(node.seek_child(255), Some(&255));
    }

    #[test]
    fn test_resize_steals_children() {
        let mut small = SortedKeyedMapping::<String, 4>::new();
        for k in [9u8, 1, 5, 7] {
            small.add_child(k, k.to_string());
        }
        let mut big = SortedKeyedMapping::<String, 16>::from_resized(&mut small);
        assert_eq!(small.num_children(), 0);
        assert_eq!(big.keys(), &[1, 5, 7, 9]);
        big.add_child(6, "6".to_string());
        assert_eq!(big.keys(), &[1, 5, 6, 7, 9]);
        assert_eq!(big.seek_child(7).map(String::as_str), Some("7"));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut node = SortedKeyedMapping::<Vec<u8>, 4>::new();
        node.add_child(2, vec![2]);
        node.add_child(1, vec![1]);
        let mut copy = node.clone();
        copy.seek_child_mut(1).unwrap().push(42);
        assert_eq!(node.seek_child(1), Some(&vec![1]));
        assert_eq!(copy.seek_child(1), Some(&vec![1, 42]));
        assert_eq!(copy.keys(), node.keys());
    }

    #[test]
    // Verify that the memory width of the node is nice and compact.
    fn test_memory_width() {
        // num_children = 1
        // keys = 4
        // children array ptr = 8
        // total = 13 pads out to 16
        assert_eq!(std::mem::size_of::<SortedKeyedMapping<Box<u8>, 4>>(), 16);

        // num_children + 16 key bytes + children ptr, padded to 32.
        assert_eq!(std::mem::size_of::<SortedKeyedMapping<Box<u8>, 16>>(), 32);
    }
}
