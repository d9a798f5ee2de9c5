//! Example programs built on `primer-math`.
//!
//! Each command computes a small report struct that `main` prints, so the
//! computations can be tested without running the binary.
pub mod commands;
pub mod util;
