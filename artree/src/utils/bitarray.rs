use std::mem::MaybeUninit;
use std::ops::Index;

use crate::utils::bitset::BitsetTrait;

/// Fixed-size slot storage where occupancy is tracked by a bitset instead of `Option` tags.
/// `BitsetType` must have at least `RANGE_WIDTH` bits of capacity.
pub struct BitArray<X, const RANGE_WIDTH: usize, BitsetType: BitsetTrait> {
    bitset: BitsetType,
    storage: [MaybeUninit<X>; RANGE_WIDTH],
}

impl<X, const RANGE_WIDTH: usize, BitsetType: BitsetTrait> BitArray<X, RANGE_WIDTH, BitsetType> {
    pub fn new() -> Self {
        let bitset = BitsetType::default();
        assert!(bitset.capacity() >= RANGE_WIDTH);

        Self {
            bitset,
            storage: [const { MaybeUninit::uninit() }; RANGE_WIDTH],
        }
    }

    #[inline]
    pub fn first_free_pos(&self) -> Option<usize> {
        self.bitset
            .first_empty()
            .filter(|pos| *pos < RANGE_WIDTH)
    }

    #[inline]
    pub fn check(&self, pos: usize) -> bool {
        pos < RANGE_WIDTH && self.bitset.check(pos)
    }

    #[inline]
    pub fn get(&self, pos: usize) -> Option<&X> {
        assert!(pos < RANGE_WIDTH);
        if self.bitset.check(pos) {
            Some(unsafe { self.storage[pos].assume_init_ref() })
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut X> {
        assert!(pos < RANGE_WIDTH);
        if self.bitset.check(pos) {
            Some(unsafe { self.storage[pos].assume_init_mut() })
        } else {
            None
        }
    }

    /// Stores `x` at `pos`, handing back whatever was there before.
    #[inline]
    pub fn set(&mut self, pos: usize, x: X) -> Option<X> {
        let old = self.erase(pos);
        self.storage[pos].write(x);
        self.bitset.set(pos);
        old
    }

    #[inline]
    pub fn erase(&mut self, pos: usize) -> Option<X> {
        assert!(pos < RANGE_WIDTH);
        if !self.bitset.check(pos) {
            return None;
        }
        self.bitset.unset(pos);
        let old = std::mem::replace(&mut self.storage[pos], MaybeUninit::uninit());
        Some(unsafe { old.assume_init() })
    }

    pub fn clear(&mut self) {
        for i in 0..RANGE_WIDTH {
            if self.bitset.check(i) {
                unsafe { self.storage[i].assume_init_drop() }
            }
        }
        self.bitset.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bitset.is_empty()
    }

    pub fn size(&self) -> usize {
        self.bitset.size()
    }

    pub fn iter_keys(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        (0..RANGE_WIDTH).filter(|pos| self.bitset.check(*pos))
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &X)> {
        self.storage.iter().enumerate().filter_map(|(pos, x)| {
            if self.bitset.check(pos) {
                Some((pos, unsafe { x.assume_init_ref() }))
            } else {
                None
            }
        })
    }
}

impl<X, const RANGE_WIDTH: usize, BitsetType: BitsetTrait> Default
    for BitArray<X, RANGE_WIDTH, BitsetType>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<X: Clone, const RANGE_WIDTH: usize, BitsetType: BitsetTrait> Clone
    for BitArray<X, RANGE_WIDTH, BitsetType>
{
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        for (pos, x) in self.iter() {
            copy.set(pos, x.clone());
        }
        copy
    }
}

impl<X, const RANGE_WIDTH: usize, BitsetType: BitsetTrait> Index<usize>
    for BitArray<X, RANGE_WIDTH, BitsetType>
{
    type Output = X;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(x) => x,
            None => panic!("BitArray index {index} is vacant"),
        }
    }
}

impl<X, const RANGE_WIDTH: usize, BitsetType: BitsetTrait> Drop
    for BitArray<X, RANGE_WIDTH, BitsetType>
{
    fn drop(&mut self) {
        self.clear();
    }
}
