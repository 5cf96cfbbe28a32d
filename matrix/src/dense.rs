use alloc::vec;
use alloc::vec::Vec;

use rand::Rng;
use snail_util::bits_to_bytes;

use crate::rotate::{rotate_validated, validate_layout};
use crate::{RotateResult, naive};

/// Read bit `(row, col)` of a packed matrix with rows `row_stride` bytes apart.
///
/// Column `col % 8 == 0` is the most significant bit of its byte.
#[must_use]
#[inline]
pub fn get_bit(bytes: &[u8], row_stride: usize, row: usize, col: usize) -> bool {
    (bytes[row * row_stride + col / 8] >> (7 - col % 8)) & 1 == 1
}

/// Overwrite bit `(row, col)` of a packed matrix; see [`get_bit`] for the layout.
#[inline]
pub fn set_bit(bytes: &mut [u8], row_stride: usize, row: usize, col: usize, value: bool) {
    let mask = 0x80 >> (col % 8);
    let byte = &mut bytes[row * row_stride + col / 8];
    if value {
        *byte |= mask;
    } else {
        *byte &= !mask;
    }
}

/// An owned `n × n` bit matrix, rows packed eight bits per byte and `row_stride` bytes apart.
///
/// Equality compares the packed bits only; padding bytes are ignored.
#[derive(Clone, Debug)]
pub struct BitMatrix {
    n: usize,
    row_stride: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// An all-zero matrix with unpadded rows.
    pub fn zeros(n: usize) -> RotateResult<Self> {
        Self::zeros_with_stride(n, bits_to_bytes(n))
    }

    /// An all-zero matrix whose rows are `row_stride` bytes apart.
    pub fn zeros_with_stride(n: usize, row_stride: usize) -> RotateResult<Self> {
        validate_layout(n * row_stride, n, row_stride)?;
        Ok(Self {
            n,
            row_stride,
            data: vec![0; n * row_stride],
        })
    }

    /// Wrap an existing buffer.
    ///
    /// `data` may be shorter than `n * row_stride` by the padding of the last row.
    pub fn from_bytes(n: usize, row_stride: usize, data: Vec<u8>) -> RotateResult<Self> {
        validate_layout(data.len(), n, row_stride)?;
        Ok(Self {
            n,
            row_stride,
            data,
        })
    }

    /// Build a matrix with bit `(row, col)` set to `f(row, col)`.
    pub fn from_fn<F>(n: usize, mut f: F) -> RotateResult<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut mat = Self::zeros(n)?;
        for row in 0..n {
            for col in 0..n {
                if f(row, col) {
                    mat.set(row, col, true);
                }
            }
        }
        Ok(mat)
    }

    /// A matrix of uniformly random bits.
    pub fn rand<R: Rng>(rng: &mut R, n: usize) -> RotateResult<Self> {
        let mut mat = Self::zeros(n)?;
        rng.fill(&mut mat.data[..]);
        Ok(mat)
    }

    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    #[must_use]
    pub const fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// # Panics
    /// Panics if `row` or `col` is not below [`Self::n`].
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.n && col < self.n, "({row}, {col}) out of bounds");
        get_bit(&self.data, self.row_stride, row, col)
    }

    /// # Panics
    /// Panics if `row` or `col` is not below [`Self::n`].
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        assert!(row < self.n && col < self.n, "({row}, {col}) out of bounds");
        set_bit(&mut self.data, self.row_stride, row, col, value);
    }

    /// Packed bits of row `r`, without padding.
    #[must_use]
    pub fn row(&self, r: usize) -> &[u8] {
        let start = r * self.row_stride;
        &self.data[start..start + bits_to_bytes(self.n)]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.n).map(|r| self.row(r))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Raw buffer including padding.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Rotate the matrix 90 degrees clockwise in place.
    pub fn rotate(&mut self) {
        rotate_validated(&mut self.data, self.n, self.row_stride);
    }

    /// Rotated copy computed bit by bit, with the same row stride.
    #[must_use]
    pub fn rotated_naive(&self) -> Self {
        let mut out = Self {
            n: self.n,
            row_stride: self.row_stride,
            data: vec![0; self.data.len()],
        };
        naive::rotate_naive_validated(&self.data, &mut out.data, self.n, self.row_stride);
        out
    }
}

impl PartialEq for BitMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.n == other.n && self.rows().eq(other.rows())
    }
}

impl Eq for BitMatrix {}
