//! Bit-by-bit reference rotation.

use crate::RotateResult;
use crate::dense::{get_bit, set_bit};
use crate::rotate::validate_layout;

/// Write the clockwise rotation of `src` into `dst`, one bit at a time:
/// `dst[i][j] = src[n - 1 - j][i]`.
///
/// Both buffers use the same layout. Padding bytes of `dst` are not written.
///
/// # Errors
/// Fails without writing if either buffer cannot hold the layout.
pub fn rotate_naive(src: &[u8], dst: &mut [u8], n: usize, row_stride: usize) -> RotateResult<()> {
    validate_layout(src.len(), n, row_stride)?;
    validate_layout(dst.len(), n, row_stride)?;
    rotate_naive_validated(src, dst, n, row_stride);
    Ok(())
}

pub(crate) fn rotate_naive_validated(src: &[u8], dst: &mut [u8], n: usize, row_stride: usize) {
    for i in 0..n {
        for j in 0..n {
            let bit = get_bit(src, row_stride, n - 1 - j, i);
            set_bit(dst, row_stride, i, j, bit);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::RotateError;

    #[test]
    fn test_rotate_naive_corners() {
        let n = 64;
        let mut src = vec![0u8; n * 8];
        // Top-left and bottom-left corners.
        set_bit(&mut src, 8, 0, 0, true);
        set_bit(&mut src, 8, 63, 0, true);
        let mut dst = vec![0u8; n * 8];
        rotate_naive(&src, &mut dst, n, 8).unwrap();
        for i in 0..n {
            for j in 0..n {
                let expected = (i, j) == (0, 63) || (i, j) == (0, 0);
                assert_eq!(get_bit(&dst, 8, i, j), expected, "({i}, {j})");
            }
        }
    }

    #[test]
    fn test_rotate_naive_rejects_short_dst() {
        let src = vec![0u8; 64 * 8];
        let mut dst = vec![0u8; 64 * 8 - 1];
        assert_eq!(
            rotate_naive(&src, &mut dst, 64, 8),
            Err(RotateError::BufferTooSmall {
                len: 64 * 8 - 1,
                required: 64 * 8
            })
        );
    }
}
