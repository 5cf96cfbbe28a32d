//! Whole-matrix rotation: 4-cycle block relocation followed by in-block rotation.

use snail_util::bits_to_bytes;
use tracing::{debug_span, instrument};

use crate::block::{BLOCK_BYTES, BLOCK_SIZE, block_offset, rotate_block};
use crate::{RotateError, RotateResult};

/// Position of a block within the 4-cycle that a quarter turn permutes.
///
/// A clockwise turn carries the block at `A` to `B`, `B` to `C`, `C` to `D`
/// and `D` back to `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleRole {
    A,
    B,
    C,
    D,
}

impl CycleRole {
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// The role whose block moves into this role's grid cell.
    #[must_use]
    pub const fn source(self) -> Self {
        match self {
            Self::A => Self::D,
            Self::B => Self::A,
            Self::C => Self::B,
            Self::D => Self::C,
        }
    }
}

/// Four grid cells of a `num_blocks × num_blocks` block grid related by quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCycle {
    /// Grid row of the `A` block.
    pub block_i: usize,
    /// Grid column of the `A` block.
    pub block_j: usize,
    pub num_blocks: usize,
}

impl BlockCycle {
    /// Grid coordinates `(row, column)` of the block playing `role`.
    #[must_use]
    pub const fn position(&self, role: CycleRole) -> (usize, usize) {
        let last = self.num_blocks - 1;
        let (i, j) = (self.block_i, self.block_j);
        match role {
            CycleRole::A => (i, j),
            CycleRole::B => (j, last - i),
            CycleRole::C => (last - i, last - j),
            CycleRole::D => (last - j, i),
        }
    }

    #[must_use]
    pub fn positions(&self) -> [(usize, usize); 4] {
        CycleRole::ALL.map(|role| self.position(role))
    }

    /// Move each of the four blocks one step along the cycle, row by row.
    ///
    /// Block contents are copied byte for byte; their bits are not rotated.
    ///
    /// # Panics
    /// Panics if any of the four blocks extends past the end of `buf`.
    pub fn relocate(&self, buf: &mut [u8], row_stride: usize) {
        let offsets = self.positions().map(|(i, j)| block_offset(i, j, row_stride));
        for r in 0..BLOCK_SIZE {
            let at = |role: CycleRole| offsets[role as usize] + r * row_stride;

            let mut scratch = [0; BLOCK_BYTES];
            scratch.copy_from_slice(&buf[at(CycleRole::A)..at(CycleRole::A) + BLOCK_BYTES]);
            for dst in [CycleRole::A, CycleRole::D, CycleRole::C] {
                let src = at(dst.source());
                buf.copy_within(src..src + BLOCK_BYTES, at(dst));
            }
            buf[at(CycleRole::B)..at(CycleRole::B) + BLOCK_BYTES].copy_from_slice(&scratch);
        }
    }
}

/// Every 4-cycle of a `num_blocks × num_blocks` grid, each exactly once.
///
/// `A` ranges over the first `ceil(num_blocks / 2)` rows and the first
/// `floor(num_blocks / 2)` columns. For odd grids the centre block is a fixed
/// point of the quarter turn and belongs to no cycle.
pub fn block_cycles(num_blocks: usize) -> impl Iterator<Item = BlockCycle> {
    (0..num_blocks.div_ceil(2)).flat_map(move |block_i| {
        (0..num_blocks / 2).map(move |block_j| BlockCycle {
            block_i,
            block_j,
            num_blocks,
        })
    })
}

/// Check that `len` bytes can hold an `n × n` bit matrix with rows `row_stride` bytes apart.
///
/// The last row only needs its packed bits, not a full stride.
pub fn validate_layout(len: usize, n: usize, row_stride: usize) -> RotateResult<()> {
    if n == 0 || n % BLOCK_SIZE != 0 {
        return Err(RotateError::InvalidDimension { n });
    }
    let min = bits_to_bytes(n);
    if row_stride < min {
        return Err(RotateError::StrideTooSmall { row_stride, min });
    }
    let required = (n - 1).saturating_mul(row_stride).saturating_add(min);
    if len < required {
        return Err(RotateError::BufferTooSmall { len, required });
    }
    Ok(())
}

/// Rotate the `n × n` bit matrix in `buf` 90 degrees clockwise, in place.
///
/// Rows are packed with no padding, i.e. `row_stride = ceil(n / 8)`. After the
/// call, bit `(i, j)` holds what bit `(n - 1 - j, i)` held before.
///
/// # Errors
/// Fails without modifying `buf` if `n` is not a positive multiple of 64 or
/// `buf` is too short for the matrix.
pub fn rotate_bit_matrix(buf: &mut [u8], n: usize) -> RotateResult<()> {
    rotate_bit_matrix_with_stride(buf, n, bits_to_bytes(n))
}

/// Like [`rotate_bit_matrix`], for rows `row_stride` bytes apart.
///
/// Padding bytes past the packed bits of each row are left untouched.
///
/// # Errors
/// Fails without modifying `buf` if `n` is not a positive multiple of 64,
/// `row_stride` is shorter than a row, or `buf` is too short for the matrix.
pub fn rotate_bit_matrix_with_stride(
    buf: &mut [u8],
    n: usize,
    row_stride: usize,
) -> RotateResult<()> {
    validate_layout(buf.len(), n, row_stride)?;
    rotate_validated(buf, n, row_stride);
    Ok(())
}

/// Rotation driver for a layout [`validate_layout`] has accepted.
#[instrument(skip_all, fields(n = n, row_stride = row_stride))]
pub(crate) fn rotate_validated(buf: &mut [u8], n: usize, row_stride: usize) {
    let num_blocks = n / BLOCK_SIZE;
    if num_blocks == 1 {
        rotate_block(buf, row_stride);
        return;
    }

    // All blocks must sit at their final grid cells before any is rotated.
    debug_span!("relocate blocks", num_blocks).in_scope(|| {
        for cycle in block_cycles(num_blocks) {
            cycle.relocate(buf, row_stride);
        }
    });
    debug_span!("rotate blocks", num_blocks)
        .in_scope(|| rotate_all_blocks(buf, num_blocks, row_stride));
}

#[cfg(not(feature = "parallel"))]
fn rotate_all_blocks(buf: &mut [u8], num_blocks: usize, row_stride: usize) {
    for block_i in 0..num_blocks {
        for block_j in 0..num_blocks {
            rotate_block(&mut buf[block_offset(block_i, block_j, row_stride)..], row_stride);
        }
    }
}

#[cfg(feature = "parallel")]
fn rotate_all_blocks(buf: &mut [u8], num_blocks: usize, row_stride: usize) {
    use rayon::prelude::*;

    // Each band of 64 rows holds one row of blocks and no other band's bytes.
    buf.par_chunks_mut(BLOCK_SIZE * row_stride)
        .take(num_blocks)
        .for_each(|band| {
            for block_j in 0..num_blocks {
                rotate_block(&mut band[block_offset(0, block_j, row_stride)..], row_stride);
            }
        });
}
