//! Uniform and normal distributions, inverse-CDF search and Bernoulli
//! sampling.
//!
//! `erf` comes from `statrs`; everything else is closed form. Normal
//! parameters are validated once in [`Normal::new`] and the free functions
//! delegate to it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::function::erf::erf;

use crate::error::{MathError, Result};

/// Default bracket width at which [`inverse_normal_cdf`] stops.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

const SQRT_TWO_PI: f64 = 2.506_628_274_631_000_7;

/// Bracket searched by the inverse CDF, in standard units.
const Z_BRACKET: (f64, f64) = (-10.0, 10.0);

/// Density of the uniform distribution on `[0, 1)`.
pub fn uniform_pdf(x: f64) -> f64 {
    if (0.0..1.0).contains(&x) {
        1.0
    } else {
        0.0
    }
}

/// Probability that a uniform random variable is `<= x`.
pub fn uniform_cdf(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else if x < 1.0 {
        x
    } else {
        1.0
    }
}

/// Normal distribution `N(mu, sigma)` with `sigma > 0`.
///
/// Deserialization goes through [`Normal::new`], so a stored
/// `{"mu": .., "sigma": ..}` with a non-positive sigma is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NormalParams")]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

#[derive(Deserialize)]
struct NormalParams {
    mu: f64,
    sigma: f64,
}

impl TryFrom<NormalParams> for Normal {
    type Error = MathError;

    fn try_from(params: NormalParams) -> Result<Self> {
        Normal::new(params.mu, params.sigma)
    }
}

impl Normal {
    pub const STANDARD: Normal = Normal { mu: 0.0, sigma: 1.0 };

    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        if !(sigma > 0.0) || !sigma.is_finite() {
            return Err(MathError::invalid(format!(
                "sigma must be positive and finite, got {}",
                sigma
            )));
        }
        if !mu.is_finite() {
            return Err(MathError::invalid(format!("mu must be finite, got {}", mu)));
        }
        Ok(Self { mu, sigma })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn pdf(&self, x: f64) -> f64 {
        let z = x - self.mu;
        (-z * z / 2.0 / (self.sigma * self.sigma)).exp() / (SQRT_TWO_PI * self.sigma)
    }

    pub fn cdf(&self, x: f64) -> f64 {
        (1.0 + erf((x - self.mu) / std::f64::consts::SQRT_2 / self.sigma)) / 2.0
    }

    /// Finds `x` with `cdf(x) ≈ p` by bisection on the standard normal and
    /// rescaling the result.
    ///
    /// `p = 0` and `p = 1` map to the edges of the `[-10, 10]` bracket. The
    /// standard cdf already rounds to 1.0 above z ≈ 8.3, so the upper edge is
    /// returned directly rather than searched for.
    pub fn inverse_cdf(&self, p: f64, tolerance: f64) -> Result<f64> {
        check_probability(p)?;
        if !(tolerance > 0.0) {
            return Err(MathError::invalid(format!(
                "tolerance must be positive, got {}",
                tolerance
            )));
        }

        if p == 1.0 {
            return Ok(self.mu + self.sigma * Z_BRACKET.1);
        }

        let (mut low_z, mut hi_z) = Z_BRACKET;
        let mut mid_z = (low_z + hi_z) / 2.0;
        while hi_z - low_z > tolerance {
            mid_z = (low_z + hi_z) / 2.0;
            if Normal::STANDARD.cdf(mid_z) < p {
                low_z = mid_z;
            } else {
                hi_z = mid_z;
            }
        }
        Ok(self.mu + self.sigma * mid_z)
    }
}

impl Default for Normal {
    fn default() -> Self {
        Normal::STANDARD
    }
}

pub(crate) fn check_probability(p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(MathError::invalid(format!(
            "probability must lie in [0, 1], got {}",
            p
        )));
    }
    Ok(())
}

pub fn normal_pdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    Ok(Normal::new(mu, sigma)?.pdf(x))
}

pub fn normal_cdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    Ok(Normal::new(mu, sigma)?.cdf(x))
}

pub fn inverse_normal_cdf(p: f64, mu: f64, sigma: f64, tolerance: f64) -> Result<f64> {
    Normal::new(mu, sigma)?.inverse_cdf(p, tolerance)
}

/// 1 with probability `p`, otherwise 0.
pub fn bernoulli_trial<R: Rng + ?Sized>(p: f64, rng: &mut R) -> Result<u32> {
    check_probability(p)?;
    Ok(u32::from(rng.gen::<f64>() < p))
}

/// Sum of `n` independent Bernoulli(`p`) trials.
pub fn binomial<R: Rng + ?Sized>(n: u32, p: f64, rng: &mut R) -> Result<u32> {
    check_probability(p)?;
    Ok((0..n).map(|_| u32::from(rng.gen::<f64>() < p)).sum())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kid {
    Boy,
    Girl,
}

pub fn random_kid<R: Rng + ?Sized>(rng: &mut R) -> Kid {
    if rng.gen::<bool>() {
        Kid::Girl
    } else {
        Kid::Boy
    }
}

/// Tallies from the two-children conditional-probability experiment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct KidCounts {
    pub both_girls: u32,
    pub older_girl: u32,
    pub either_girl: u32,
}

impl KidCounts {
    /// `P(both girls | older is a girl)`, about 1/2.
    pub fn both_given_older(&self) -> Option<f64> {
        ratio(self.both_girls, self.older_girl)
    }

    /// `P(both girls | at least one girl)`, about 1/3.
    pub fn both_given_either(&self) -> Option<f64> {
        ratio(self.both_girls, self.either_girl)
    }
}

fn ratio(num: u32, den: u32) -> Option<f64> {
    (den > 0).then(|| num as f64 / den as f64)
}

/// Samples `trials` families of two children.
pub fn kid_experiment<R: Rng + ?Sized>(trials: u32, rng: &mut R) -> KidCounts {
    let mut counts = KidCounts::default();
    for _ in 0..trials {
        let younger = random_kid(rng);
        let older = random_kid(rng);
        if older == Kid::Girl {
            counts.older_girl += 1;
        }
        if older == Kid::Girl && younger == Kid::Girl {
            counts.both_girls += 1;
        }
        if older == Kid::Girl || younger == Kid::Girl {
            counts.either_girl += 1;
        }
    }
    counts
}
