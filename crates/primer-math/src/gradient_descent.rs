//! Gradient descent: finite-difference gradient estimates, the update step,
//! and batch / mini-batch / stochastic training of a one-feature linear
//! model.
//!
//! Exact and estimated gradients share the [`GradientFn`] interface so a
//! caller can swap one for the other. Every loop runs for a fixed number of
//! iterations; there is no convergence test.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{Strategy, TrainingConfig};
use crate::error::{check_len, MathError, Result};
use crate::math::vector::{add, scalar_multiply, vector_mean, Vector};
use crate::rng::create_rng;

/// Default step used by [`estimate_gradient`].
pub const DEFAULT_H: f64 = 1e-4;

/// Maps a point to the gradient of some objective at that point.
pub trait GradientFn {
    fn gradient(&self, v: &Vector) -> Result<Vector>;
}

impl<F> GradientFn for F
where
    F: Fn(&Vector) -> Result<Vector>,
{
    fn gradient(&self, v: &Vector) -> Result<Vector> {
        self(v)
    }
}

/// Gradient of a scalar objective estimated by forward differences.
pub struct EstimatedGradient<F> {
    objective: F,
    h: f64,
}

impl<F> EstimatedGradient<F>
where
    F: Fn(&Vector) -> f64,
{
    pub fn new(objective: F, h: f64) -> Self {
        Self { objective, h }
    }
}

impl<F> GradientFn for EstimatedGradient<F>
where
    F: Fn(&Vector) -> f64,
{
    fn gradient(&self, v: &Vector) -> Result<Vector> {
        estimate_gradient(&self.objective, v, self.h)
    }
}

fn check_h(h: f64) -> Result<()> {
    if h == 0.0 || !h.is_finite() {
        return Err(MathError::invalid(format!(
            "difference step must be finite and non-zero, got {}",
            h
        )));
    }
    Ok(())
}

/// `(f(x + h) - f(x)) / h`
pub fn difference_quotient<F>(f: F, x: f64, h: f64) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    check_h(h)?;
    Ok((f(x + h) - f(x)) / h)
}

/// Difference quotient of `f` at `v` moving only coordinate `i`.
pub fn partial_difference_quotient<F>(f: F, v: &Vector, i: usize, h: f64) -> Result<f64>
where
    F: Fn(&Vector) -> f64,
{
    check_h(h)?;
    let mut w = v.clone();
    if i >= w.len() {
        return Err(MathError::IndexOutOfRange {
            index: i,
            len: w.len(),
        });
    }
    w[i] += h;
    Ok((f(&w) - f(v)) / h)
}

/// One partial difference quotient per coordinate: `d` extra evaluations of
/// `f` plus one at `v` each.
pub fn estimate_gradient<F>(f: F, v: &Vector, h: f64) -> Result<Vector>
where
    F: Fn(&Vector) -> f64,
{
    (0..v.len())
        .map(|i| partial_difference_quotient(&f, v, i, h))
        .collect::<Result<Vec<f64>>>()
        .map(Vector::from)
}

/// Moves `step_size` along `gradient` from `v`.
pub fn gradient_step(v: &Vector, gradient: &Vector, step_size: f64) -> Result<Vector> {
    check_len(v.len(), gradient.len())?;
    add(v, &scalar_multiply(step_size, gradient))
}

/// Exact gradient of `sum_of_squares`.
pub fn sum_of_squares_gradient(v: &Vector) -> Vector {
    v.mapv(|x| 2.0 * x)
}

/// Applies `iterations` steps of `step_size` along `gradient_fn`.
///
/// A negative `step_size` descends.
pub fn minimize<G>(gradient_fn: &G, start: Vector, step_size: f64, iterations: usize) -> Result<Vector>
where
    G: GradientFn + ?Sized,
{
    let mut v = start;
    for iteration in 0..iterations {
        let grad = gradient_fn.gradient(&v)?;
        v = gradient_step(&v, &grad, step_size)?;
        log::trace!("iteration {}: {}", iteration, v);
    }
    Ok(v)
}

/// Gradient of the squared error of `theta = [slope, intercept]` on one
/// example.
pub fn linear_gradient(x: f64, y: f64, theta: &Vector) -> Result<Vector> {
    check_len(2, theta.len())?;
    let (slope, intercept) = (theta[0], theta[1]);
    let predicted = slope * x + intercept;
    let error = predicted - y;
    Ok(Vector::from(vec![2.0 * error * x, 2.0 * error]))
}

/// Contiguous slices of a dataset, visited in (optionally shuffled) order of
/// their start offsets. The last batch may be short.
pub struct MiniBatches<'a, T> {
    dataset: &'a [T],
    batch_size: usize,
    starts: std::vec::IntoIter<usize>,
}

impl<'a, T> Iterator for MiniBatches<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.starts.next()?;
        let end = (start + self.batch_size).min(self.dataset.len());
        Some(&self.dataset[start..end])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.starts.size_hint()
    }
}

impl<T> ExactSizeIterator for MiniBatches<'_, T> {}

pub fn mini_batches<'a, T, R>(
    dataset: &'a [T],
    batch_size: usize,
    shuffle: bool,
    rng: &mut R,
) -> Result<MiniBatches<'a, T>>
where
    R: Rng + ?Sized,
{
    if batch_size == 0 {
        return Err(MathError::invalid("batch_size must be at least 1"));
    }
    let mut starts: Vec<usize> = (0..dataset.len()).step_by(batch_size).collect();
    if shuffle {
        starts.shuffle(rng);
    }
    Ok(MiniBatches {
        dataset,
        batch_size,
        starts: starts.into_iter(),
    })
}

/// `y = slope * x + intercept` fitted by gradient descent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LinearRegression {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearRegression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn theta(&self) -> Vector {
        Vector::from(vec![self.slope, self.intercept])
    }

    /// Fits using a generator seeded from `config.seed`.
    pub fn fit(inputs: &[(f64, f64)], config: &TrainingConfig) -> Result<Self> {
        let mut rng = create_rng(config.seed);
        Self::fit_with_rng(inputs, config, &mut rng)
    }

    /// Starts from a uniform random `theta` in `[-1, 1]^2` and runs
    /// `config.epochs` epochs of the configured strategy.
    pub fn fit_with_rng<R>(inputs: &[(f64, f64)], config: &TrainingConfig, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        if inputs.is_empty() {
            return Err(MathError::EmptyInput("LinearRegression::fit"));
        }
        if !(config.learning_rate > 0.0) {
            return Err(MathError::invalid(format!(
                "learning_rate must be positive, got {}",
                config.learning_rate
            )));
        }
        if let Strategy::MiniBatch { batch_size: 0, .. } = config.strategy {
            return Err(MathError::invalid("batch_size must be at least 1"));
        }

        let mut theta = Vector::from(vec![rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)]);
        let step = -config.learning_rate;

        log::info!(
            "Fitting linear model on {} examples: strategy={}, epochs={}, learning_rate={}",
            inputs.len(),
            config.strategy.name(),
            config.epochs,
            config.learning_rate
        );

        for epoch in 0..config.epochs {
            match config.strategy {
                Strategy::Batch => {
                    let grad = mean_gradient(inputs, &theta)?;
                    theta = gradient_step(&theta, &grad, step)?;
                }
                Strategy::MiniBatch {
                    batch_size,
                    shuffle,
                } => {
                    for batch in mini_batches(inputs, batch_size, shuffle, rng)? {
                        let grad = mean_gradient(batch, &theta)?;
                        theta = gradient_step(&theta, &grad, step)?;
                    }
                }
                Strategy::Stochastic => {
                    for &(x, y) in inputs {
                        let grad = linear_gradient(x, y, &theta)?;
                        theta = gradient_step(&theta, &grad, step)?;
                    }
                }
            }
            log::debug!("epoch {}: theta = {}", epoch, theta);
        }

        let fitted = LinearRegression {
            slope: theta[0],
            intercept: theta[1],
        };
        log::info!(
            "Fitted slope = {:.4}, intercept = {:.4}",
            fitted.slope,
            fitted.intercept
        );
        Ok(fitted)
    }
}

fn mean_gradient(batch: &[(f64, f64)], theta: &Vector) -> Result<Vector> {
    let grads = batch
        .iter()
        .map(|&(x, y)| linear_gradient(x, y, theta))
        .collect::<Result<Vec<Vector>>>()?;
    vector_mean(&grads)
}
