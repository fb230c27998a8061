//! Default-feature smoke tests for the `coverset` facade.
#![cfg(all(feature = "serde", feature = "solver-lp", feature = "generator"))]
#![expect(
    clippy::expect_used,
    reason = "tests surface failures through expect messages"
)]

use coverset::{
    BruteForceSolver, CoverSolver, CoverageInstance, ExactIlpSolver, GeneratorConfig,
    GoodLpBackend, GridShape, InstanceDocument, InstanceGenerator, SyntheticGenerator,
};
use rstest::rstest;

fn generated() -> CoverageInstance {
    let generator = SyntheticGenerator::new(GeneratorConfig {
        coverage_probability: 0.6,
        seed: 7,
        ..GeneratorConfig::default()
    })
    .expect("valid generator config");
    generator
        .generate(GridShape::new(3, 2), 6)
        .expect("generated instance")
}

#[rstest]
fn generated_instances_solve_through_the_lp_backend() {
    let instance = generated();
    let target = instance.coverable_elements();

    let exact = BruteForceSolver::new()
        .solve(&instance, &target)
        .expect("coverable target");
    let ilp = ExactIlpSolver::new(GoodLpBackend::new())
        .solve(&instance, &target)
        .expect("ilp solves the coverable target");
    assert_eq!(ilp.cost, exact.cost);
}

#[rstest]
fn generated_instances_round_trip_through_documents() {
    let instance = generated();
    let document = InstanceDocument::from(instance.clone());
    let loaded = CoverageInstance::try_from(document).expect("document stays valid");
    assert_eq!(loaded, instance);
}
