//! Addressing and in-place rotation of `64 × 64` bit blocks.
//!
//! A block row is the [`BLOCK_BYTES`] bytes at the block's column offset, read
//! as a little-endian `u64`. With the most-significant-bit-first packing used
//! for matrix columns, column `c` of a block row lives at word bit
//! `8 * (c / 8) + 7 - c % 8`.

use snail_util::{bit_reverse_bytes_u64, bit_reverse_u64};

/// Side length of a block, in bits.
pub const BLOCK_SIZE: usize = 64;

/// Number of bytes one block row spans.
pub const BLOCK_BYTES: usize = BLOCK_SIZE / 8;

/// Byte offset of the top-left corner of block `(block_i, block_j)` in a matrix
/// whose rows are `row_stride` bytes apart.
#[must_use]
#[inline]
pub const fn block_offset(block_i: usize, block_j: usize, row_stride: usize) -> usize {
    block_i * BLOCK_SIZE * row_stride + block_j * BLOCK_BYTES
}

/// Read the 64 rows of the block starting at `block[0]`.
///
/// # Panics
/// Panics if `block` is shorter than `63 * row_stride + BLOCK_BYTES`.
#[must_use]
pub fn load_block(block: &[u8], row_stride: usize) -> [u64; BLOCK_SIZE] {
    core::array::from_fn(|r| {
        let start = r * row_stride;
        let mut bytes = [0; BLOCK_BYTES];
        bytes.copy_from_slice(&block[start..start + BLOCK_BYTES]);
        u64::from_le_bytes(bytes)
    })
}

/// Write `rows` back over the block starting at `block[0]`.
///
/// Only the [`BLOCK_BYTES`] bytes of each of the 64 rows are written.
///
/// # Panics
/// Panics if `block` is shorter than `63 * row_stride + BLOCK_BYTES`.
pub fn store_block(block: &mut [u8], row_stride: usize, rows: &[u64; BLOCK_SIZE]) {
    for (r, row) in rows.iter().enumerate() {
        let start = r * row_stride;
        block[start..start + BLOCK_BYTES].copy_from_slice(&row.to_le_bytes());
    }
}

/// Transpose 64 words viewed as a `64 × 64` bit matrix whose column `c` is word bit `63 - c`.
///
/// After the call, bit `63 - c` of `rows[i]` holds what bit `63 - i` of `rows[c]` held.
///
/// See Hacker's Delight, Second Edition, Henry S. Warren Jr., Chapter 7.3
/// Transpose of a Bit Matrix. Each round swaps the off-diagonal `j × j`
/// sub-blocks of every `2j × 2j` tile, for `j = 32, 16, ..., 1`.
#[inline]
pub fn transpose_block_words(rows: &mut [u64; BLOCK_SIZE]) {
    let mut j = BLOCK_SIZE / 2;
    let mut mask: u64 = 0x0000_0000_FFFF_FFFF;
    while j != 0 {
        // `k` walks the indices whose bit `j` is clear; `k | j` is its partner.
        let mut k = 0;
        while k < BLOCK_SIZE {
            let t = (rows[k] ^ (rows[k | j] >> j)) & mask;
            rows[k] ^= t;
            rows[k | j] ^= t << j;
            k = ((k | j) + 1) & !j;
        }
        j >>= 1;
        mask ^= mask << j;
    }
}

/// Rotate the block held in `rows` 90 degrees clockwise.
///
/// In matrix coordinates the result satisfies `rotated[i][j] == original[63 - j][i]`.
pub fn rotate_block_words(rows: &mut [u64; BLOCK_SIZE]) {
    // Mirror each row at byte granularity: the byte order of the word is
    // reversed while the bits inside each byte keep their order.
    for row in rows.iter_mut() {
        *row = bit_reverse_bytes_u64(bit_reverse_u64(*row));
    }
    transpose_block_words(rows);
    for row in rows.iter_mut() {
        *row = bit_reverse_bytes_u64(*row);
    }
}

/// Rotate, in place, the block whose top-left byte is `block[0]`.
///
/// Nothing outside the block's 64 rows of [`BLOCK_BYTES`] bytes is written.
///
/// # Panics
/// Panics if `block` is shorter than `63 * row_stride + BLOCK_BYTES`.
pub fn rotate_block(block: &mut [u8], row_stride: usize) {
    debug_assert!(row_stride >= BLOCK_BYTES);
    let mut rows = load_block(block, row_stride);
    rotate_block_words(&mut rows);
    store_block(block, row_stride, &rows);
}
