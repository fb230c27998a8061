//! Property tests for `SyntheticGenerator`.

use coverset_core::{GridShape, InstanceGenerator};
use coverset_generator::{CoverageDistribution, GeneratorConfig, SyntheticGenerator};
use proptest::prelude::*;

fn distribution_strategy() -> impl Strategy<Value = CoverageDistribution> {
    prop_oneof![
        Just(CoverageDistribution::Bernoulli),
        (0.1_f64..3.0).prop_map(|exponent| CoverageDistribution::PowerLaw { exponent }),
        (0.0_f64..2.0).prop_map(|sigma| CoverageDistribution::LogNormal { sigma }),
        Just(CoverageDistribution::default_tiered()),
    ]
}

fn config_strategy() -> impl Strategy<Value = GeneratorConfig> {
    (any::<u64>(), 0.0_f64..=1.0, 0_u64..5, 0_u64..20, distribution_strategy()).prop_map(
        |(seed, coverage_probability, min_cost, extra, distribution)| GeneratorConfig {
            coverage_probability,
            min_cost,
            max_cost: min_cost + extra,
            seed,
            distribution,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the requested grid and provider count are honoured.
    #[test]
    fn shape_and_provider_count_are_exact(
        config in config_strategy(),
        locations in 1_u64..6,
        timesteps in 1_u64..6,
        providers in 0_usize..12,
    ) {
        let generator = SyntheticGenerator::new(config).expect("valid configuration");
        let shape = GridShape::new(locations, timesteps);
        let instance = generator.generate(shape, providers).expect("valid instance");
        prop_assert_eq!(instance.element_count() as u64, shape.element_count());
        prop_assert_eq!(instance.provider_count(), providers);
    }

    /// Property: equal seeds give equal instances.
    #[test]
    fn generation_is_reproducible(config in config_strategy()) {
        let generator = SyntheticGenerator::new(config).expect("valid configuration");
        let shape = GridShape::new(3, 4);
        let first = generator.generate(shape, 8).expect("valid instance");
        let second = generator.generate(shape, 8).expect("valid instance");
        prop_assert_eq!(first, second);
    }
}
