//! Column standardisation for a dataset of equal-length vectors.
//!
//! [`fit_scaler`] records each column's mean and standard deviation;
//! [`rescale`] and [`rescale_in_place`] map every column to mean 0 and
//! standard deviation 1. Columns with no spread are left unchanged.

use crate::error::{check_len, MathError, Result};
use crate::math::vector::{vector_mean, Vector};
use crate::stats::standard_deviation;

/// Per-column mean and standard deviation.
#[derive(Clone, Debug, PartialEq)]
pub struct Scaler {
    pub means: Vector,
    pub stdevs: Vector,
}

impl Scaler {
    /// Standardises one row. Columns with zero deviation pass through.
    pub fn transform(&self, row: &Vector) -> Result<Vector> {
        let mut out = row.clone();
        self.transform_in_place(&mut out)?;
        Ok(out)
    }

    pub fn transform_in_place(&self, row: &mut Vector) -> Result<()> {
        check_len(self.means.len(), row.len())?;
        for (i, value) in row.iter_mut().enumerate() {
            if self.stdevs[i] > 0.0 {
                *value = (*value - self.means[i]) / self.stdevs[i];
            }
        }
        Ok(())
    }
}

/// Fits a `Scaler` from rows of equal length. Needs at least two rows for
/// the sample deviation.
pub fn fit_scaler(data: &[Vector]) -> Result<Scaler> {
    if data.len() < 2 {
        return Err(MathError::invalid(format!(
            "scaling requires at least two rows, got {}",
            data.len()
        )));
    }
    let means = vector_mean(data)?;
    let dim = means.len();

    let mut stdevs = Vec::with_capacity(dim);
    for col in 0..dim {
        let column: Vec<f64> = data.iter().map(|row| row[col]).collect();
        let sd = standard_deviation(&column)?;
        if sd == 0.0 {
            log::warn!("Column {} has zero standard deviation; leaving it unscaled", col);
        }
        stdevs.push(sd);
    }

    Ok(Scaler {
        means,
        stdevs: Vector::from(stdevs),
    })
}

/// Per-column `(means, standard deviations)`.
pub fn scale(data: &[Vector]) -> Result<(Vector, Vector)> {
    let sc = fit_scaler(data)?;
    Ok((sc.means, sc.stdevs))
}

/// Returns a standardised copy of `data`.
pub fn rescale(data: &[Vector]) -> Result<Vec<Vector>> {
    let sc = fit_scaler(data)?;
    data.iter().map(|row| sc.transform(row)).collect()
}

/// Standardises `data` in place.
pub fn rescale_in_place(data: &mut [Vector]) -> Result<()> {
    let sc = fit_scaler(data)?;
    for row in data.iter_mut() {
        sc.transform_in_place(row)?;
    }
    Ok(())
}
