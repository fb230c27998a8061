//! Generator parameters and their validation.

use coverset_core::{Cost, GenerateError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One provider class of the tiered model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProviderClass {
    /// Share of providers in this class, in `[0, 1]`.
    pub ratio: f64,
    /// Base per-element coverage probability of the class, in `[0, 1]`.
    pub coverage: f64,
}

/// The three-class market used by default: a few wide providers, more
/// medium ones, and many narrow ones.
pub const DEFAULT_CLASSES: [ProviderClass; 3] = [
    ProviderClass {
        ratio: 0.2,
        coverage: 0.8,
    },
    ProviderClass {
        ratio: 0.3,
        coverage: 0.4,
    },
    ProviderClass {
        ratio: 0.5,
        coverage: 0.1,
    },
];

/// How per-provider edge probabilities are drawn.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "kind"))]
pub enum CoverageDistribution {
    /// Every edge independently with the coverage probability.
    Bernoulli,
    /// Probability scaled by a `Beta(exponent, 1)` factor per provider, so
    /// few providers cover a lot.
    PowerLaw {
        /// Power-distribution exponent, greater than zero.
        exponent: f64,
    },
    /// Probability scaled by a `LogNormal(0, sigma)` factor per provider,
    /// capped at one.
    LogNormal {
        /// Standard deviation of the underlying normal, at least zero.
        sigma: f64,
    },
    /// Providers split into classes with their own base coverage, perturbed
    /// by normal noise. Costs grow with degree and class coverage.
    Tiered {
        /// Classes in assignment order.
        classes: Vec<ProviderClass>,
        /// Standard deviation of the per-provider noise.
        variation: f64,
    },
}

impl CoverageDistribution {
    /// The tiered model with [`DEFAULT_CLASSES`] and noise `0.1`.
    #[must_use]
    pub fn default_tiered() -> Self {
        Self::Tiered {
            classes: DEFAULT_CLASSES.to_vec(),
            variation: 0.1,
        }
    }
}

/// Configuration for [`SyntheticGenerator`](crate::SyntheticGenerator).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratorConfig {
    /// Overall edge probability, in `[0, 1]`.
    pub coverage_probability: f64,
    /// Lowest provider cost.
    pub min_cost: Cost,
    /// Highest uniform provider cost, and the scale of tiered costs.
    pub max_cost: Cost,
    /// Seed for the generator's `ChaCha8Rng`.
    pub seed: u64,
    /// Edge probability model.
    pub distribution: CoverageDistribution,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            coverage_probability: 0.3,
            min_cost: 1,
            max_cost: 10,
            seed: 0,
            distribution: CoverageDistribution::Bernoulli,
        }
    }
}

impl GeneratorConfig {
    /// Check every parameter range.
    ///
    /// # Errors
    /// Returns [`GenerateError::InvalidParameter`] naming the first
    /// offending parameter.
    pub fn validate(&self) -> Result<(), GenerateError> {
        unit_interval("coverage_probability", self.coverage_probability)?;
        if self.min_cost > self.max_cost {
            return Err(invalid(
                "min_cost",
                format!(
                    "minimum cost {} exceeds maximum cost {}",
                    self.min_cost, self.max_cost
                ),
            ));
        }
        match &self.distribution {
            CoverageDistribution::Bernoulli => Ok(()),
            CoverageDistribution::PowerLaw { exponent } => {
                if exponent.is_finite() && *exponent > 0.0 {
                    Ok(())
                } else {
                    Err(invalid("exponent", format!("expected > 0, got {exponent}")))
                }
            }
            CoverageDistribution::LogNormal { sigma } => non_negative("sigma", *sigma),
            CoverageDistribution::Tiered { classes, variation } => {
                if classes.is_empty() {
                    return Err(invalid("classes", "at least one class is required".to_owned()));
                }
                for class in classes {
                    unit_interval("class ratio", class.ratio)?;
                    unit_interval("class coverage", class.coverage)?;
                }
                non_negative("variation", *variation)
            }
        }
    }
}

pub(crate) const fn invalid(name: &'static str, reason: String) -> GenerateError {
    GenerateError::InvalidParameter { name, reason }
}

fn unit_interval(name: &'static str, value: f64) -> Result<(), GenerateError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(name, format!("expected a value in [0, 1], got {value}")))
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), GenerateError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("expected a finite value >= 0, got {value}")))
    }
}
