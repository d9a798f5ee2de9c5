//! primer-math: the numeric core of an introductory data-science primer.
//!
//! This crate provides vector and matrix arithmetic, uniform/normal/beta
//! distributions, descriptive statistics, normal-approximation hypothesis
//! tests, gradient descent (exact or finite-difference gradients, batch,
//! mini-batch and stochastic loops), and small data-cleaning helpers.
//!
//! Every routine is a pure function over its inputs except where a random
//! source is passed explicitly. Precondition violations are reported as
//! [`error::MathError`] rather than producing NaN.
pub mod config;
pub mod data;
pub mod error;
pub mod gradient_descent;
pub mod hypothesis;
pub mod math;
pub mod preprocessing;
pub mod probability;
pub mod rng;
pub mod stats;

pub use error::{MathError, Result};
pub use math::{Matrix, Vector};
