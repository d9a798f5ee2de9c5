use primer_math::probability::{kid_experiment, KidCounts};
use primer_math::rng::create_rng;

/// Simulates `trials` two-child families.
pub fn run_kids(trials: u32, seed: Option<u64>) -> KidCounts {
    let mut rng = create_rng(seed);
    kid_experiment(trials, &mut rng)
}
