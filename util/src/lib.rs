//! Word-level bit manipulation helpers shared by the bit matrix crates.

#![cfg_attr(not(test), no_std)]

/// Masks selecting every other group of `1, 2, 4, 8, 16` bits, lowest group first.
#[rustfmt::skip]
const SWAP_MASKS: [u64; 5] = [
    0x5555_5555_5555_5555,
    0x3333_3333_3333_3333,
    0x0F0F_0F0F_0F0F_0F0F,
    0x00FF_00FF_00FF_00FF,
    0x0000_FFFF_0000_FFFF,
];

/// Swap each group of `width` bits selected by `mask` with its neighbouring group.
#[inline(always)]
const fn swap_groups(x: u64, mask: u64, width: u32) -> u64 {
    ((x & mask) << width) | ((x >> width) & mask)
}

/// Number of bytes needed to hold `n_bits` packed bits, i.e. `ceil(n_bits / 8)`.
///
/// This is the minimal row stride of a packed bit matrix with `n_bits` columns.
#[must_use]
#[inline]
pub const fn bits_to_bytes(n_bits: usize) -> usize {
    n_bits.div_ceil(8)
}

/// Reverse the order of all 64 bits of `x`, so bit 63 becomes bit 0 and so on.
///
/// Butterfly network: swap adjacent 1-bit groups, then 2-, 4-, 8- and 16-bit
/// groups, and finally the two 32-bit halves.
#[must_use]
#[inline]
pub const fn bit_reverse_u64(x: u64) -> u64 {
    let x = swap_groups(x, SWAP_MASKS[0], 1);
    let x = swap_groups(x, SWAP_MASKS[1], 2);
    let x = swap_groups(x, SWAP_MASKS[2], 4);
    let x = swap_groups(x, SWAP_MASKS[3], 8);
    let x = swap_groups(x, SWAP_MASKS[4], 16);
    x.rotate_left(32)
}

/// Reverse the bit order inside each of the eight bytes of `x`, leaving the
/// byte order untouched.
///
/// These are the first three stages of [`bit_reverse_u64`]: enough to mirror an
/// 8-bit group, but no stage moves a bit across a byte boundary.
#[must_use]
#[inline]
pub const fn bit_reverse_bytes_u64(x: u64) -> u64 {
    let x = swap_groups(x, SWAP_MASKS[0], 1);
    let x = swap_groups(x, SWAP_MASKS[1], 2);
    swap_groups(x, SWAP_MASKS[2], 4)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn test_bits_to_bytes() {
        assert_eq!(bits_to_bytes(0), 0);
        assert_eq!(bits_to_bytes(1), 1);
        assert_eq!(bits_to_bytes(8), 1);
        assert_eq!(bits_to_bytes(9), 2);
        assert_eq!(bits_to_bytes(64), 8);
        assert_eq!(bits_to_bytes(65), 9);
        assert_eq!(bits_to_bytes(1 << 20), 1 << 17);
    }

    #[test]
    fn test_bit_reverse_u64_fixed() {
        assert_eq!(bit_reverse_u64(0), 0);
        assert_eq!(bit_reverse_u64(1), 1 << 63);
        assert_eq!(bit_reverse_u64(1 << 63), 1);
        assert_eq!(bit_reverse_u64(u64::MAX), u64::MAX);
        assert_eq!(bit_reverse_u64(0x0000_0000_FFFF_FFFF), 0xFFFF_FFFF_0000_0000);
        assert_eq!(bit_reverse_u64(0x0123_4567_89AB_CDEF), 0xF7B3_D591_E6A2_C480);
    }

    #[test]
    fn test_bit_reverse_bytes_u64_fixed() {
        assert_eq!(bit_reverse_bytes_u64(0), 0);
        assert_eq!(bit_reverse_bytes_u64(0x01), 0x80);
        assert_eq!(bit_reverse_bytes_u64(0x8000_0000_0000_0001), 0x0100_0000_0000_0080);
        assert_eq!(bit_reverse_bytes_u64(0x0123_4567_89AB_CDEF), 0x80C4_A2E6_91D5_B3F7);
    }

    #[test]
    fn test_bit_reverse_u64_matches_core() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..1000 {
            let x: u64 = rng.random();
            assert_eq!(bit_reverse_u64(x), x.reverse_bits());
        }
    }

    #[test]
    fn test_reverse_then_byte_reverse_is_byte_swap() {
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..1000 {
            let x: u64 = rng.random();
            assert_eq!(bit_reverse_bytes_u64(bit_reverse_u64(x)), x.swap_bytes());
        }
    }

    proptest! {
        #[test]
        fn proptest_bit_reverse_u64_involution(x in any::<u64>()) {
            prop_assert_eq!(bit_reverse_u64(bit_reverse_u64(x)), x);
        }

        #[test]
        fn proptest_bit_reverse_bytes_u64_involution(x in any::<u64>()) {
            prop_assert_eq!(bit_reverse_bytes_u64(bit_reverse_bytes_u64(x)), x);
        }

        #[test]
        fn proptest_bit_reverse_bytes_u64_stays_in_byte(x in any::<u64>(), g in 0..8usize) {
            // Output byte `g` depends on input byte `g` only.
            let isolated = x & (0xFF << (8 * g));
            let out = bit_reverse_bytes_u64(x).to_le_bytes()[g];
            prop_assert_eq!(bit_reverse_bytes_u64(isolated).to_le_bytes()[g], out);
            prop_assert_eq!(out, x.to_le_bytes()[g].reverse_bits());
        }
    }
}
