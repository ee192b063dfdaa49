//! Key-byte lookups over the sorted parallel arrays of Node4 / Node16.
//!
//! Only the first `num_children` entries of `keys` are meaningful. With the `simd_keys`
//! feature, 16-wide arrays are scanned with a single SSE2 / NEON compare.

#[cfg(all(feature = "simd_keys", target_arch = "x86_64", target_feature = "sse2"))]
#[inline]
fn x86_64_sse_find_key_16(key: u8, keys: &[u8; 16], num_children: usize) -> Option<usize> {
    use std::arch::x86_64::{
        __m128i, _mm_cmpeq_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi8,
    };

    let bitfield = unsafe {
        let key_vec = _mm_set1_epi8(key as i8);
        let results = _mm_cmpeq_epi8(key_vec, _mm_loadu_si128(keys.as_ptr() as *const __m128i));
        let mask = (1 << num_children) - 1;
        _mm_movemask_epi8(results) & mask
    };
    if bitfield != 0 {
        return Some(bitfield.trailing_zeros() as usize);
    }
    None
}

#[cfg(all(feature = "simd_keys", target_arch = "x86_64", target_feature = "sse2"))]
#[inline]
fn x86_64_sse_seek_insert_pos_16(key: u8, keys: &[u8; 16], num_children: usize) -> Option<usize> {
    use std::arch::x86_64::{
        __m128i, _mm_cmplt_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi8,
        _mm_xor_si128,
    };

    let bitfield = unsafe {
        // SSE2 only has signed byte compares; flipping the sign bit on both sides turns them
        // into unsigned ones.
        let flip = _mm_set1_epi8(i8::MIN);
        let cmp_vec = _mm_xor_si128(_mm_set1_epi8(key as i8), flip);
        let node_keys =
            _mm_xor_si128(_mm_loadu_si128(keys.as_ptr() as *const __m128i), flip);
        let cmp = _mm_cmplt_epi8(cmp_vec, node_keys);
        let mask = (1 << num_children) - 1;
        _mm_movemask_epi8(cmp) & mask
    };

    if bitfield != 0 {
        return Some(bitfield.trailing_zeros() as usize);
    }
    None
}

// NEON has no movemask; narrow each 8-bit lane to 4 bits and read the result as a u64.
#[cfg(all(feature = "simd_keys", target_arch = "aarch64", target_feature = "neon"))]
#[inline]
fn aarch64_neon_first_match(cmp_vec: std::arch::aarch64::uint8x16_t) -> Option<usize> {
    use std::arch::aarch64::*;
    let matches = unsafe {
        let eq_mask = vreinterpretq_u16_u8(cmp_vec);
        let res = vshrn_n_u16::<4>(eq_mask);
        vget_lane_u64::<0>(vreinterpret_u64_u8(res))
    };
    if matches == 0 {
        return None;
    }
    Some((matches.trailing_zeros() >> 2) as usize)
}

#[cfg(all(feature = "simd_keys", target_arch = "aarch64", target_feature = "neon"))]
#[inline]
fn aarch64_neon_find_key(key: u8, keys: &[u8; 16], num_children: usize) -> Option<usize> {
    use std::arch::aarch64::*;
    let cmp_vec = unsafe { vceqq_u8(vdupq_n_u8(key), vld1q_u8(keys.as_ptr())) };
    aarch64_neon_first_match(cmp_vec).filter(|idx| *idx < num_children)
}

#[cfg(all(feature = "simd_keys", target_arch = "aarch64", target_feature = "neon"))]
#[inline]
fn aarch64_neon_seek_insert_pos(key: u8, keys: &[u8; 16], num_children: usize) -> Option<usize> {
    use std::arch::aarch64::*;
    let cmp_vec = unsafe { vcltq_u8(vdupq_n_u8(key), vld1q_u8(keys.as_ptr())) };
    aarch64_neon_first_match(cmp_vec).filter(|idx| *idx < num_children)
}

fn binary_find_key(key: u8, keys: &[u8], num_children: usize) -> Option<usize> {
    keys[..num_children].binary_search(&key).ok()
}

/// Position of `key` among the first `num_children` sorted entries of `keys`.
#[allow(unreachable_code)]
pub fn u8_keys_find_key_position_sorted<const WIDTH: usize>(
    key: u8,
    keys: &[u8; WIDTH],
    num_children: usize,
) -> Option<usize> {
    debug_assert!(num_children <= WIDTH);

    // Width 4 and under, just use linear search.
    if WIDTH <= 4 {
        return (0..num_children).find(|&i| keys[i] == key);
    }

    if WIDTH == 16 {
        let keys16 = keys.as_ptr() as *const [u8; 16];

        #[cfg(all(feature = "simd_keys", target_arch = "x86_64", target_feature = "sse2"))]
        {
            return x86_64_sse_find_key_16(key, unsafe { &*keys16 }, num_children);
        }

        #[cfg(all(feature = "simd_keys", target_arch = "aarch64", target_feature = "neon"))]
        {
            return aarch64_neon_find_key(key, unsafe { &*keys16 }, num_children);
        }

        let _ = keys16;
    }

    binary_find_key(key, keys, num_children)
}

/// Index at which `key` must be inserted to keep the first `num_children` entries sorted.
/// The caller is responsible for checking that `key` is not already present.
#[allow(unreachable_code)]
pub fn u8_keys_find_insert_position_sorted<const WIDTH: usize>(
    key: u8,
    keys: &[u8; WIDTH],
    num_children: usize,
) -> usize {
    debug_assert!(num_children <= WIDTH);

    if WIDTH == 16 {
        let keys16 = keys.as_ptr() as *const [u8; 16];

        #[cfg(all(feature = "simd_keys", target_arch = "x86_64", target_feature = "sse2"))]
        {
            return x86_64_sse_seek_insert_pos_16(key, unsafe { &*keys16 }, num_children)
                .unwrap_or(num_children);
        }

        #[cfg(all(feature = "simd_keys", target_arch = "aarch64", target_feature = "neon"))]
        {
            return aarch64_neon_seek_insert_pos(key, unsafe { &*keys16 }, num_children)
                .unwrap_or(num_children);
        }

        let _ = keys16;
    }

    keys[..num_children].partition_point(|k| *k < key)
}
