//! Two-sided test of a coin's bias using the normal approximation to the
//! binomial.
use anyhow::Result;
use serde::Serialize;

use primer_math::hypothesis::{
    normal_approximation_to_binomial, normal_probability_between, normal_two_sided_bounds,
    two_sided_p_value,
};

#[derive(Debug, Clone, Serialize)]
pub struct HypothesisReport {
    pub mu: f64,
    pub sigma: f64,
    /// Acceptance region at the requested significance.
    pub lower: f64,
    pub upper: f64,
    /// With continuity correction of 0.5 toward the mean.
    pub p_value: f64,
    pub reject: bool,
    /// Power against `alt_p`, when given.
    pub power: Option<f64>,
}

pub fn run_hypothesis(
    trials: u64,
    p: f64,
    observed: f64,
    significance: f64,
    alt_p: Option<f64>,
) -> Result<HypothesisReport> {
    let null = normal_approximation_to_binomial(trials, p)?;
    let (lower, upper) = normal_two_sided_bounds(1.0 - significance, null.mu(), null.sigma())?;

    let corrected = if observed > null.mu() {
        observed - 0.5
    } else if observed < null.mu() {
        observed + 0.5
    } else {
        observed
    };
    let p_value = two_sided_p_value(corrected, null.mu(), null.sigma())?;

    let power = match alt_p {
        Some(alt_p) => {
            let alt = normal_approximation_to_binomial(trials, alt_p)?;
            Some(1.0 - normal_probability_between(lower, upper, alt.mu(), alt.sigma())?)
        }
        None => None,
    };

    Ok(HypothesisReport {
        mu: null.mu(),
        sigma: null.sigma(),
        lower,
        upper,
        p_value,
        reject: p_value < significance,
        power,
    })
}
