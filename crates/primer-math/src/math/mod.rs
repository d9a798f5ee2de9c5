//! Vector and matrix arithmetic.
//!
//! `Vector` is a fixed-length sequence of reals and `Matrix` a row-major
//! rectangle of them. Pairwise operations check lengths and fail with
//! [`MathError::LengthMismatch`](crate::error::MathError) instead of
//! truncating.
pub mod matrix;
pub mod vector;

pub use matrix::{get_col, get_row, identity_matrix, make_matrix, shape, Matrix};
pub use vector::{
    add, distance, dot, magnitude, scalar_multiply, squared_distance, subtract, sum_of_squares,
    vector_mean, vector_sum, Vector,
};
