#![expect(
    clippy::expect_used,
    reason = "invariant tests use expect for readable failures"
)]

//! Invariants of the model-based solvers on generated instances.
//!
//! # Invariants tested
//!
//! - **Exactness:** the ILP optimum equals the exhaustive optimum.
//! - **Lower bound:** no approximate solver beats the exhaustive optimum.
//! - **Tradeoff monotonicity:** raising `lambda` never increases the
//!   uncovered count and never lowers acquisition cost.
//! - **Rounding coverage:** more trials leave fewer elements uncovered.

use std::collections::BTreeSet;

use coverset_core::test_support::instance_from_rows;
use coverset_core::{
    BruteForceSolver, CoverSolver, CoverageInstance, ExactIlpSolver, GreedySolver, GridShape,
    InstanceGenerator, RelaxationConfig, RelaxationRoundingSolver, TradeoffFormulator,
};
use coverset_generator::{CoverageDistribution, GeneratorConfig, SyntheticGenerator};
use coverset_solver_lp::GoodLpBackend;
use rstest::rstest;

/// Penalties swept by the tradeoff experiments.
const LAMBDAS: [f64; 9] = [0.01, 0.05, 0.1, 0.25, 0.5, 0.75, 1.0, 5.0, 10.0];

fn generated(seed: u64, distribution: CoverageDistribution, providers: usize) -> CoverageInstance {
    SyntheticGenerator::new(GeneratorConfig {
        coverage_probability: 0.3,
        seed,
        distribution,
        ..GeneratorConfig::default()
    })
    .and_then(|generator| generator.generate(GridShape::new(4, 3), providers))
    .expect("valid generated instance")
}

#[rstest]
#[case(1, CoverageDistribution::Bernoulli)]
#[case(2, CoverageDistribution::Bernoulli)]
#[case(3, CoverageDistribution::PowerLaw { exponent: 0.5 })]
#[case(4, CoverageDistribution::LogNormal { sigma: 1.0 })]
#[case(5, CoverageDistribution::default_tiered())]
fn ilp_matches_exhaustive_optimum(#[case] seed: u64, #[case] distribution: CoverageDistribution) {
    let instance = generated(seed, distribution, 10);
    let target = instance.coverable_elements();
    let exact = BruteForceSolver::new()
        .solve(&instance, &target)
        .expect("coverable target");
    let ilp = ExactIlpSolver::new(GoodLpBackend::new())
        .solve(&instance, &target)
        .expect("coverable target");
    assert_eq!(ilp.cost, exact.cost);
    assert_eq!(ilp.uncovered(&instance, &target), Ok(BTreeSet::new()));
}

#[rstest]
#[case(11)]
#[case(12)]
#[case(13)]
fn approximate_solvers_never_beat_the_optimum(#[case] seed: u64) {
    let instance = generated(seed, CoverageDistribution::Bernoulli, 12);
    let target = instance.coverable_elements();
    let optimum = BruteForceSolver::new()
        .solve(&instance, &target)
        .expect("coverable target")
        .cost;
    let solvers: Vec<Box<dyn CoverSolver>> = vec![
        Box::new(GreedySolver::degree()),
        Box::new(GreedySolver::cost()),
        Box::new(GreedySolver::ratio()),
        Box::new(RelaxationRoundingSolver::with_config(
            GoodLpBackend::new(),
            RelaxationConfig {
                trials: None,
                seed,
            },
        )),
    ];
    for solver in &solvers {
        let solution = solver.solve(&instance, &target).expect("solver runs");
        let feasible = solution
            .uncovered(&instance, &target)
            .expect("known providers")
            .is_empty();
        if feasible {
            assert!(
                solution.cost >= optimum,
                "{} found cost {} below optimum {optimum}",
                solver.name(),
                solution.cost
            );
        }
    }
}

#[rstest]
#[case(21)]
#[case(22)]
#[case(23)]
fn tradeoff_is_monotone_in_lambda(#[case] seed: u64) {
    let instance = generated(seed, CoverageDistribution::default_tiered(), 8);
    let target = instance.elements().clone();
    let formulator = TradeoffFormulator::new(GoodLpBackend::new());

    let mut previous: Option<(usize, u64)> = None;
    for lambda in LAMBDAS {
        let result = formulator
            .solve_tradeoff(&instance, &target, lambda)
            .expect("tradeoff model is always feasible");
        let current = (result.uncovered.len(), result.solution.cost);
        if let Some((uncovered, cost)) = previous {
            assert!(current.0 <= uncovered, "uncovered grew at lambda {lambda}");
            assert!(current.1 >= cost, "cost fell at lambda {lambda}");
        }
        previous = Some(current);
    }
}

#[rstest]
fn tradeoff_buys_more_providers_as_penalty_grows() {
    // Disjoint coverage: each provider is bought once lambda * degree > cost.
    let instance = instance_from_rows(&[(1, 1, &[1]), (2, 3, &[2, 3]), (3, 8, &[4, 5])], &[]);
    let formulator = TradeoffFormulator::new(GoodLpBackend::new());
    let counts: Vec<usize> = [0.4, 1.2, 2.0, 5.0]
        .into_iter()
        .map(|lambda| {
            formulator
                .solve_tradeoff(&instance, instance.elements(), lambda)
                .expect("tradeoff model is always feasible")
                .solution
                .selected
                .len()
        })
        .collect();
    assert_eq!(counts, vec![0, 1, 2, 3]);
}

#[rstest]
#[case(31)]
#[case(32)]
fn more_trials_leave_fewer_elements_uncovered(#[case] instance_seed: u64) {
    let instance = generated(instance_seed, CoverageDistribution::Bernoulli, 15);
    let target = instance.coverable_elements();
    let uncovered_with = |trials: usize| -> usize {
        (0..40)
            .map(|seed| {
                RelaxationRoundingSolver::with_config(
                    GoodLpBackend::new(),
                    RelaxationConfig {
                        trials: Some(trials),
                        seed,
                    },
                )
                .solve(&instance, &target)
                .and_then(|solution| Ok(solution.uncovered(&instance, &target)?))
                .expect("relaxation runs")
                .len()
            })
            .sum()
    };

    let single = uncovered_with(1);
    let many = uncovered_with(32);
    assert!(many <= single, "32 trials left {many}, one trial left {single}");
    assert_eq!(many, 0);
}
