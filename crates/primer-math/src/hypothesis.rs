//! Normal-approximation hypothesis tests, A/B testing and the beta
//! distribution used for Bayesian inference on a proportion.

use statrs::function::beta::ln_beta;

use crate::error::{MathError, Result};
use crate::probability::{check_probability, Normal, DEFAULT_TOLERANCE};

/// Normal distribution matching `Binomial(n, p)`: `mu = n p`,
/// `sigma = sqrt(n p (1 - p))`.
pub fn normal_approximation_to_binomial(n: u64, p: f64) -> Result<Normal> {
    check_probability(p)?;
    let n = n as f64;
    Normal::new(n * p, (n * p * (1.0 - p)).sqrt())
}

/// Probability that `N(mu, sigma)` lies below `hi`.
pub fn normal_probability_below(hi: f64, mu: f64, sigma: f64) -> Result<f64> {
    Ok(Normal::new(mu, sigma)?.cdf(hi))
}

pub fn normal_probability_above(lo: f64, mu: f64, sigma: f64) -> Result<f64> {
    Ok(1.0 - Normal::new(mu, sigma)?.cdf(lo))
}

pub fn normal_probability_between(lo: f64, hi: f64, mu: f64, sigma: f64) -> Result<f64> {
    let normal = Normal::new(mu, sigma)?;
    Ok(normal.cdf(hi) - normal.cdf(lo))
}

pub fn normal_probability_outside(lo: f64, hi: f64, mu: f64, sigma: f64) -> Result<f64> {
    Ok(1.0 - normal_probability_between(lo, hi, mu, sigma)?)
}

/// `z` such that `P(Z <= z) = probability`.
pub fn normal_upper_bound(probability: f64, mu: f64, sigma: f64) -> Result<f64> {
    Normal::new(mu, sigma)?.inverse_cdf(probability, DEFAULT_TOLERANCE)
}

/// `z` such that `P(Z >= z) = probability`.
pub fn normal_lower_bound(probability: f64, mu: f64, sigma: f64) -> Result<f64> {
    check_probability(probability)?;
    Normal::new(mu, sigma)?.inverse_cdf(1.0 - probability, DEFAULT_TOLERANCE)
}

/// Bounds symmetric about the mean that contain `probability` of the mass.
///
/// The excluded mass is split evenly between the two tails.
pub fn normal_two_sided_bounds(probability: f64, mu: f64, sigma: f64) -> Result<(f64, f64)> {
    check_probability(probability)?;
    let tail_probability = (1.0 - probability) / 2.0;
    let upper = normal_lower_bound(tail_probability, mu, sigma)?;
    let lower = normal_upper_bound(tail_probability, mu, sigma)?;
    Ok((lower, upper))
}

/// Probability of a value at least as extreme as `x` under `N(mu, sigma)`,
/// counting both tails.
pub fn two_sided_p_value(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    if x >= mu {
        Ok(2.0 * normal_probability_above(x, mu, sigma)?)
    } else {
        Ok(2.0 * normal_probability_below(x, mu, sigma)?)
    }
}

pub fn upper_p_value(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    normal_probability_above(x, mu, sigma)
}

pub fn lower_p_value(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    normal_probability_below(x, mu, sigma)
}

/// Estimated success rate and its standard error from `successes` out of `n`.
pub fn estimated_parameters(n: u64, successes: u64) -> Result<(f64, f64)> {
    if n == 0 {
        return Err(MathError::EmptyInput("estimated_parameters"));
    }
    if successes > n {
        return Err(MathError::invalid(format!(
            "successes ({}) exceed trials ({})",
            successes, n
        )));
    }
    let p = successes as f64 / n as f64;
    let sigma = (p * (1.0 - p) / n as f64).sqrt();
    Ok((p, sigma))
}

/// Standardised difference between two independently estimated proportions.
pub fn a_b_test_statistic(n_a: u64, successes_a: u64, n_b: u64, successes_b: u64) -> Result<f64> {
    let (p_a, sigma_a) = estimated_parameters(n_a, successes_a)?;
    let (p_b, sigma_b) = estimated_parameters(n_b, successes_b)?;
    let denominator = (sigma_a * sigma_a + sigma_b * sigma_b).sqrt();
    if denominator == 0.0 {
        return Err(MathError::invalid(
            "both samples have zero variance; the statistic is undefined",
        ));
    }
    Ok((p_b - p_a) / denominator)
}

fn check_shape(alpha: f64, beta: f64) -> Result<()> {
    if !(alpha > 0.0 && beta > 0.0) || !alpha.is_finite() || !beta.is_finite() {
        return Err(MathError::invalid(format!(
            "beta shape parameters must be positive and finite, got ({}, {})",
            alpha, beta
        )));
    }
    Ok(())
}

/// Beta function, the normalising constant of the beta distribution.
///
/// Evaluated as `exp(ln B(alpha, beta))`, so large shapes underflow towards
/// zero instead of overflowing the gamma terms.
pub fn b(alpha: f64, beta: f64) -> Result<f64> {
    check_shape(alpha, beta)?;
    Ok(ln_beta(alpha, beta).exp())
}

/// Density of `Beta(alpha, beta)`; zero outside `(0, 1)`.
pub fn beta_pdf(x: f64, alpha: f64, beta: f64) -> Result<f64> {
    check_shape(alpha, beta)?;
    if x <= 0.0 || x >= 1.0 {
        return Ok(0.0);
    }
    let ln_density = (alpha - 1.0) * x.ln() + (beta - 1.0) * (1.0 - x).ln() - ln_beta(alpha, beta);
    Ok(ln_density.exp())
}
