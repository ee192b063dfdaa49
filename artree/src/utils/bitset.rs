use num_traits::PrimInt;

/// Occupancy tracking for fixed-width slot arrays.
pub trait BitsetTrait: Default {
    fn first_empty(&self) -> Option<usize>;
    fn set(&mut self, pos: usize);
    fn unset(&mut self, pos: usize);
    fn check(&self, pos: usize) -> bool;
    fn clear(&mut self);
    fn is_empty(&self) -> bool;
    fn size(&self) -> usize;
    fn capacity(&self) -> usize;
}

// TODO: SHIFT and STORAGE_WIDTH can be derived from BIT_WIDTH and a range width once
// generic_const_exprs lands in stable.
pub struct Bitset<
    StorageType,
    const BIT_WIDTH: usize,
    const SHIFT: usize,
    const STORAGE_WIDTH: usize,
> where
    StorageType: PrimInt,
{
    bitset: [StorageType; STORAGE_WIDTH],
}

impl<StorageType, const BIT_WIDTH: usize, const SHIFT: usize, const STORAGE_WIDTH: usize>
    Bitset<StorageType, BIT_WIDTH, SHIFT, STORAGE_WIDTH>
where
    StorageType: PrimInt,
{
    pub fn new() -> Self {
        Self {
            bitset: [StorageType::zero(); STORAGE_WIDTH],
        }
    }

    /// Positions of all set bits, ascending.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bitset.iter().enumerate().flat_map(|(i, b)| {
            (0..BIT_WIDTH).filter_map(move |j| {
                if (*b & (StorageType::one() << j)).is_zero() {
                    None
                } else {
                    Some((i << SHIFT) + j)
                }
            })
        })
    }
}

impl<StorageType, const BIT_WIDTH: usize, const SHIFT: usize, const STORAGE_WIDTH: usize>
    BitsetTrait for Bitset<StorageType, BIT_WIDTH, SHIFT, STORAGE_WIDTH>
where
    StorageType: PrimInt,
{
    fn first_empty(&self) -> Option<usize> {
        for (i, b) in self.bitset.iter().enumerate() {
            if b.is_zero() {
                return Some(i << SHIFT);
            }
            if *b != StorageType::max_value() {
                return Some((i << SHIFT) + (!*b).trailing_zeros() as usize);
            }
        }
        None
    }

    #[inline]
    fn set(&mut self, pos: usize) {
        assert!(pos < STORAGE_WIDTH * BIT_WIDTH);
        let shift = StorageType::one() << (pos % BIT_WIDTH);
        self.bitset[pos >> SHIFT] = self.bitset[pos >> SHIFT] | shift;
    }

    #[inline]
    fn unset(&mut self, pos: usize) {
        assert!(pos < STORAGE_WIDTH * BIT_WIDTH);
        let shift = StorageType::one() << (pos % BIT_WIDTH);
        self.bitset[pos >> SHIFT] = self.bitset[pos >> SHIFT] & !shift;
    }

    #[inline]
    fn check(&self, pos: usize) -> bool {
        assert!(pos < STORAGE_WIDTH * BIT_WIDTH);
        let shift = StorageType::one() << (pos % BIT_WIDTH);
        !(self.bitset[pos >> SHIFT] & shift).is_zero()
    }

    #[inline]
    fn clear(&mut self) {
        self.bitset.fill(StorageType::zero());
    }

    fn is_empty(&self) -> bool {
        self.bitset.iter().all(|x| x.is_zero())
    }

    fn size(&self) -> usize {
        self.bitset.iter().map(|x| x.count_ones() as usize).sum()
    }

    fn capacity(&self) -> usize {
        STORAGE_WIDTH * BIT_WIDTH
    }
}

impl<StorageType, const BIT_WIDTH: usize, const SHIFT: usize, const STORAGE_WIDTH: usize> Default
    for Bitset<StorageType, BIT_WIDTH, SHIFT, STORAGE_WIDTH>
where
    StorageType: PrimInt,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<StorageType, const BIT_WIDTH: usize, const SHIFT: usize, const STORAGE_WIDTH: usize> Clone
    for Bitset<StorageType, BIT_WIDTH, SHIFT, STORAGE_WIDTH>
where
    StorageType: PrimInt,
{
    fn clone(&self) -> Self {
        Self {
            bitset: self.bitset,
        }
    }
}

pub type Bitset64<const STORAGE_WIDTH_U64: usize> = Bitset<u64, 64, 6, STORAGE_WIDTH_U64>;
pub type Bitset32<const STORAGE_WIDTH_U32: usize> = Bitset<u32, 32, 5, STORAGE_WIDTH_U32>;
pub type Bitset16<const STORAGE_WIDTH_U16: usize> = Bitset<u16, 16, 4, STORAGE_WIDTH_U16>;
pub type Bitset8<const STORAGE_WIDTH_U8: usize> = Bitset<u8, 8, 3, STORAGE_WIDTH_U8>;
