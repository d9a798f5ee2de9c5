//! Minimise `sum_of_squares` from a random start in `[-10, 10]^dim`.
use anyhow::Result;
use rand::Rng;

use primer_math::gradient_descent::{minimize, sum_of_squares_gradient, EstimatedGradient, DEFAULT_H};
use primer_math::math::{magnitude, sum_of_squares, Vector};
use primer_math::rng::create_rng;
use primer_math::MathError;

#[derive(Debug, Clone)]
pub struct DescentReport {
    pub start: Vector,
    pub end: Vector,
    pub distance_to_origin: f64,
}

pub fn run_descent(
    dim: usize,
    iterations: usize,
    step_size: f64,
    estimated: bool,
    seed: Option<u64>,
) -> Result<DescentReport> {
    let mut rng = create_rng(seed);
    let start: Vector = (0..dim).map(|_| rng.gen_range(-10.0..=10.0)).collect();
    let end = if estimated {
        let gradient = EstimatedGradient::new(|v: &Vector| sum_of_squares(v), DEFAULT_H);
        minimize(&gradient, start.clone(), step_size, iterations)?
    } else {
        let gradient = |v: &Vector| Ok::<Vector, MathError>(sum_of_squares_gradient(v));
        minimize(&gradient, start.clone(), step_size, iterations)?
    };
    log::info!("Descended from {} to {}", start, end);
    Ok(DescentReport {
        distance_to_origin: magnitude(&end),
        start,
        end,
    })
}
