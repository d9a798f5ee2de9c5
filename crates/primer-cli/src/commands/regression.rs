//! Fit `y = slope * x + intercept` on noiseless synthetic data.
use std::path::Path;
use std::str::FromStr;

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use primer_math::config::{Strategy, TrainingConfig};
use primer_math::gradient_descent::LinearRegression;

use crate::util::load_json_config;

/// Synthetic dataset plus the training settings used to fit it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegressionConfig {
    pub training: TrainingConfig,
    pub slope: f64,
    pub intercept: f64,
    /// Inputs are the integers in `x_min..x_max`.
    pub x_min: i64,
    pub x_max: i64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            training: TrainingConfig::default(),
            slope: 20.0,
            intercept: 5.0,
            x_min: -50,
            x_max: 50,
        }
    }
}

impl RegressionConfig {
    pub fn inputs(&self) -> Vec<(f64, f64)> {
        (self.x_min..self.x_max)
            .map(|x| {
                let x = x as f64;
                (x, self.slope * x + self.intercept)
            })
            .collect()
    }

    /// Switches the training strategy by name. Naming the strategy already
    /// configured is a no-op, so a mini-batch config keeps its batch size and
    /// shuffle flag.
    pub fn override_strategy(&mut self, name: &str) -> Result<()> {
        let strategy = Strategy::from_str(name).map_err(anyhow::Error::msg)?;
        if strategy.name() != self.training.strategy.name() {
            self.training.strategy = strategy;
        }
        Ok(())
    }
}

pub fn load_regression_config<P: AsRef<Path>>(path: P) -> Result<RegressionConfig> {
    load_json_config(path)
}

pub fn run_regression(config: &RegressionConfig) -> Result<LinearRegression> {
    ensure!(
        config.x_min < config.x_max,
        "x_min ({}) must be below x_max ({})",
        config.x_min,
        config.x_max
    );
    Ok(LinearRegression::fit(&config.inputs(), &config.training)?)
}
