//! Layout errors reported before a matrix buffer is touched.

use thiserror::Error;

/// Reasons a buffer cannot be rotated as an `n × n` bit matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RotateError {
    /// The bit width is zero or not a multiple of the 64-bit block size.
    #[error("matrix dimension {n} is not a positive multiple of 64")]
    InvalidDimension {
        /// Requested width and height in bits.
        n: usize,
    },

    /// Rows are closer together than one row of packed bits.
    #[error("row stride of {row_stride} bytes is smaller than the {min} bytes a row needs")]
    StrideTooSmall { row_stride: usize, min: usize },

    /// The buffer ends before the last row does.
    #[error("buffer holds {len} bytes but the matrix layout needs {required}")]
    BufferTooSmall { len: usize, required: usize },
}

/// Result type alias for matrix operations.
pub type RotateResult<T> = core::result::Result<T, RotateError>;
