//! In-place 90 degree rotation of square bit matrices.
//!
//! A matrix of `n × n` bits is stored row-major, eight bits per byte, with the
//! leftmost column of each byte in its most significant bit. Rows are
//! `row_stride` bytes apart, where `row_stride` is at least
//! [`bits_to_bytes(n)`](snail_util::bits_to_bytes).
//!
//! The rotation tiles the matrix into `64 × 64` blocks. Blocks are first moved
//! to their rotated grid positions in 4-cycles, then each block is rotated in
//! registers with a butterfly transpose (see [`block`]).

#![no_std]

extern crate alloc;

pub mod block;
pub mod dense;
mod error;
pub mod naive;
pub mod rotate;

pub use error::*;
pub use rotate::{rotate_bit_matrix, rotate_bit_matrix_with_stride};
