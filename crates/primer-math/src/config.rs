use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Settings shared by the gradient-descent training loops.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub epochs: usize,

    /// Seed for the starting point and batch shuffling. `None` draws from
    /// entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(flatten)]
    pub strategy: Strategy,
}

/// How much of the dataset contributes to each gradient step.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "strategy")]
pub enum Strategy {
    /// One step per epoch using the mean gradient of every example.
    Batch,
    /// One step per batch of `batch_size` contiguous examples.
    MiniBatch { batch_size: usize, shuffle: bool },
    /// One step per example.
    Stochastic,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Batch
    }
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Batch => "batch",
            Strategy::MiniBatch { .. } => "minibatch",
            Strategy::Stochastic => "stochastic",
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "batch" => Ok(Strategy::Batch),
            "minibatch" | "mini-batch" | "mini_batch" => Ok(Strategy::MiniBatch {
                batch_size: 20,
                shuffle: true,
            }),
            "stochastic" | "sgd" => Ok(Strategy::Stochastic),
            _ => Err(format!(
                "Unknown training strategy: {}. Expected one of batch, minibatch, stochastic",
                s
            )),
        }
    }
}

impl TrainingConfig {
    pub fn new(learning_rate: f64, epochs: usize, strategy: Strategy) -> Self {
        Self {
            learning_rate,
            epochs,
            seed: None,
            strategy,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            epochs: 5000,
            seed: None,
            strategy: Strategy::Batch,
        }
    }
}
