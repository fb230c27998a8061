//! Seeded synthetic instances over a location × timestep grid.

use coverset_core::{
    Cost, CoverageInstance, ElementId, GenerateError, GridShape, InstanceGenerator, ProviderId,
};
use log::debug;
use rand::distributions::{Bernoulli, Distribution};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Beta, LogNormal, Normal};

use crate::config::{CoverageDistribution, GeneratorConfig, ProviderClass, invalid};

/// Random instance supplier driven by a [`GeneratorConfig`].
///
/// Every call to [`InstanceGenerator::generate`] reseeds a `ChaCha8Rng` from
/// the configured seed, so equal configurations always produce equal
/// instances.
///
/// # Examples
/// ```
/// use coverset_core::{GridShape, InstanceGenerator};
/// use coverset_generator::{GeneratorConfig, SyntheticGenerator};
///
/// # fn main() -> Result<(), coverset_core::GenerateError> {
/// let generator = SyntheticGenerator::new(GeneratorConfig { seed: 7, ..GeneratorConfig::default() })?;
/// let instance = generator.generate(GridShape::new(4, 3), 5)?;
/// assert_eq!(instance.element_count(), 12);
/// assert_eq!(instance.provider_count(), 5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    config: GeneratorConfig,
}

/// Edge probability and tiered base coverage of one provider.
struct ProviderDraw {
    probability: f64,
    base_coverage: Option<f64>,
}

impl SyntheticGenerator {
    /// Validate `config` and wrap it.
    ///
    /// # Errors
    /// Returns [`GenerateError::InvalidParameter`] for out-of-range
    /// parameters.
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "edge probabilities are scaled by sampled factors"
    )]
    fn draw_providers(
        &self,
        providers: usize,
        rng: &mut ChaCha8Rng,
    ) -> Result<Vec<ProviderDraw>, GenerateError> {
        let scale = self.config.coverage_probability;
        match &self.config.distribution {
            CoverageDistribution::Bernoulli => Ok((0..providers)
                .map(|_| ProviderDraw {
                    probability: scale,
                    base_coverage: None,
                })
                .collect()),
            CoverageDistribution::PowerLaw { exponent } => {
                let skew = Beta::new(*exponent, 1.0)
                    .map_err(|err| invalid("exponent", err.to_string()))?;
                Ok((0..providers)
                    .map(|_| ProviderDraw {
                        probability: scale * skew.sample(rng),
                        base_coverage: None,
                    })
                    .collect())
            }
            CoverageDistribution::LogNormal { sigma } => {
                let skew = LogNormal::new(0.0, *sigma)
                    .map_err(|err| invalid("sigma", err.to_string()))?;
                Ok((0..providers)
                    .map(|_| ProviderDraw {
                        probability: (scale * skew.sample(rng)).min(1.0),
                        base_coverage: None,
                    })
                    .collect())
            }
            CoverageDistribution::Tiered { classes, variation } => {
                let noise = Normal::new(0.0, *variation)
                    .map_err(|err| invalid("variation", err.to_string()))?;
                Ok(class_assignment(classes, providers)
                    .into_iter()
                    .map(|class| ProviderDraw {
                        probability: (class.coverage + noise.sample(rng)).clamp(0.0, 1.0)
                            * scale,
                        base_coverage: Some(class.coverage),
                    })
                    .collect())
            }
        }
    }

    fn uniform_cost(&self, rng: &mut ChaCha8Rng) -> Cost {
        rng.gen_range(self.config.min_cost..=self.config.max_cost)
    }

    /// `min + trunc(degree / elements * (1 + base) * (max - min))`.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "tiered costs scale with the normalised degree"
    )]
    fn tiered_cost(&self, degree: usize, elements: u64, base_coverage: f64) -> Cost {
        if elements == 0 {
            return self.config.min_cost;
        }
        let spread = (self.config.max_cost - self.config.min_cost) as f64;
        let normalised = degree as f64 / elements as f64;
        let premium = (normalised * (1.0 + base_coverage) * spread) as Cost;
        self.config.min_cost.saturating_add(premium)
    }
}

/// Class of each provider, in order: `ceil(n * ratio)` providers per class,
/// truncated to `n` overall. Providers left over when the ratios sum below
/// one join the last class.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "class sizes are rounded-up shares of the provider count"
)]
fn class_assignment(classes: &[ProviderClass], providers: usize) -> Vec<ProviderClass> {
    let mut assigned = Vec::with_capacity(providers);
    for class in classes {
        let share = (providers as f64 * class.ratio).ceil() as usize;
        let room = providers.saturating_sub(assigned.len());
        assigned.extend(std::iter::repeat_n(*class, share.min(room)));
    }
    if let Some(last) = classes.last() {
        let room = providers.saturating_sub(assigned.len());
        assigned.extend(std::iter::repeat_n(*last, room));
    }
    assigned
}

impl InstanceGenerator for SyntheticGenerator {
    fn generate(
        &self,
        shape: GridShape,
        providers: usize,
    ) -> Result<CoverageInstance, GenerateError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let draws = self.draw_providers(providers, &mut rng)?;
        let elements: Vec<ElementId> = shape.elements().collect();
        debug!(
            "generating {providers} providers over {} elements with {:?}",
            elements.len(),
            self.config.distribution
        );

        let mut builder = CoverageInstance::builder().elements(elements.iter().copied());
        for (draw, raw_id) in draws.into_iter().zip(0_u64..) {
            let provider = ProviderId::new(raw_id);
            let edge = Bernoulli::new(draw.probability)
                .map_err(|err| invalid("coverage_probability", err.to_string()))?;
            let covered: Vec<ElementId> = elements
                .iter()
                .copied()
                .filter(|_| edge.sample(&mut rng))
                .collect();
            let cost = match draw.base_coverage {
                Some(base) => self.tiered_cost(covered.len(), shape.element_count(), base),
                None => self.uniform_cost(&mut rng),
            };
            builder = builder.provider(provider, cost).covers_all(provider, covered);
        }
        Ok(builder.build()?)
    }
}
