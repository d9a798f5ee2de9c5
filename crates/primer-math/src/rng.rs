//! Explicit random sources.
//!
//! Every routine that needs randomness takes `&mut impl Rng`; tests seed a
//! generator for reproducible runs.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded generator when `seed` is given, entropy-seeded otherwise.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
