use std::collections::HashMap;

use crate::error::{check_len, MathError, Result};
use crate::math::vector::{dot, sum_of_squares, Vector};

fn non_empty(xs: &[f64], what: &'static str) -> Result<()> {
    if xs.is_empty() {
        return Err(MathError::EmptyInput(what));
    }
    Ok(())
}

fn sorted(xs: &[f64]) -> Vec<f64> {
    let mut out = xs.to_vec();
    out.sort_unstable_by(f64::total_cmp);
    out
}

/// Arithmetic mean.
pub fn mean(xs: &[f64]) -> Result<f64> {
    non_empty(xs, "mean")?;
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Middle element for odd-length input, mean of the two middle elements
/// otherwise.
pub fn median(xs: &[f64]) -> Result<f64> {
    non_empty(xs, "median")?;
    let s = sorted(xs);
    let mid = s.len() / 2;
    if s.len() % 2 == 0 {
        Ok((s[mid - 1] + s[mid]) / 2.0)
    } else {
        Ok(s[mid])
    }
}

/// Value below which a fraction `p` of the data lies.
///
/// Uses the element at index `floor(p * n)` of the sorted data; `p = 1`
/// returns the maximum.
pub fn quantile(xs: &[f64], p: f64) -> Result<f64> {
    non_empty(xs, "quantile")?;
    if !(0.0..=1.0).contains(&p) {
        return Err(MathError::invalid(format!(
            "quantile must lie in [0, 1], got {}",
            p
        )));
    }
    let s = sorted(xs);
    let idx = ((p * s.len() as f64) as usize).min(s.len() - 1);
    Ok(s[idx])
}

/// All most-frequent values, ascending.
pub fn mode(xs: &[f64]) -> Result<Vec<f64>> {
    non_empty(xs, "mode")?;
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for &x in xs {
        // normalise -0.0 so it counts with 0.0
        let key = if x == 0.0 { 0f64.to_bits() } else { x.to_bits() };
        *counts.entry(key).or_insert(0) += 1;
    }
    let max_count = counts.values().copied().max().unwrap_or(0);
    let modes: Vec<f64> = counts
        .into_iter()
        .filter(|&(_, count)| count == max_count)
        .map(|(bits, _)| f64::from_bits(bits))
        .collect();
    Ok(sorted(&modes))
}

pub fn data_range(xs: &[f64]) -> Result<f64> {
    non_empty(xs, "data_range")?;
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    Ok(max - min)
}

/// Shifts `xs` so that it has mean zero.
pub fn de_mean(xs: &[f64]) -> Result<Vector> {
    let x_bar = mean(xs)?;
    Ok(xs.iter().map(|x| x - x_bar).collect())
}

/// Sample variance (divides by `n - 1`).
pub fn variance(xs: &[f64]) -> Result<f64> {
    if xs.len() < 2 {
        return Err(MathError::invalid(format!(
            "variance requires at least two elements, got {}",
            xs.len()
        )));
    }
    let deviations = de_mean(xs)?;
    Ok(sum_of_squares(&deviations) / (xs.len() - 1) as f64)
}

pub fn standard_deviation(xs: &[f64]) -> Result<f64> {
    Ok(variance(xs)?.sqrt())
}

/// Difference between the 75th and 25th percentile.
pub fn interquartile_range(xs: &[f64]) -> Result<f64> {
    Ok(quantile(xs, 0.75)? - quantile(xs, 0.25)?)
}

/// Sample covariance of two equal-length series.
pub fn covariance(xs: &[f64], ys: &[f64]) -> Result<f64> {
    check_len(xs.len(), ys.len())?;
    if xs.len() < 2 {
        return Err(MathError::invalid(format!(
            "covariance requires at least two elements, got {}",
            xs.len()
        )));
    }
    Ok(dot(&de_mean(xs)?, &de_mean(ys)?)? / (xs.len() - 1) as f64)
}

/// Pearson correlation; 0 when either series has no variation.
pub fn correlation(xs: &[f64], ys: &[f64]) -> Result<f64> {
    let cov = covariance(xs, ys)?;
    let stdev_x = standard_deviation(xs)?;
    let stdev_y = standard_deviation(ys)?;
    if stdev_x > 0.0 && stdev_y > 0.0 {
        Ok(cov / stdev_x / stdev_y)
    } else {
        Ok(0.0)
    }
}

/// Summary of a sample, as printed by the `describe` example.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: Vec<f64>,
    pub range: f64,
    pub interquartile_range: f64,
    /// `None` for a single observation.
    pub standard_deviation: Option<f64>,
}

pub fn describe(xs: &[f64]) -> Result<Summary> {
    Ok(Summary {
        count: xs.len(),
        mean: mean(xs)?,
        median: median(xs)?,
        mode: mode(xs)?,
        range: data_range(xs)?,
        interquartile_range: interquartile_range(xs)?,
        standard_deviation: standard_deviation(xs).ok(),
    })
}
