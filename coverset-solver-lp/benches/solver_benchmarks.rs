//! Criterion benchmarks for the cover solvers.
//!
//! Measures solve time across problem sizes (20, 50, 100 providers) for the
//! greedy family and the two model-backed solvers, all on the same seeded
//! tiered-market instances.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package coverset-solver-lp
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use coverset_core::{
    CoverSolver, ExactIlpSolver, GreedyOrder, GreedySolver, RelaxationConfig,
    RelaxationRoundingSolver,
};
use coverset_solver_lp::GoodLpBackend;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};


use bench_support::{BENCHMARK_SEED, tiered_instance};

/// Provider counts to benchmark.
const PROBLEM_SIZES: &[usize] = &[20, 50, 100];

fn solvers() -> Vec<Box<dyn CoverSolver>> {
    let mut solvers: Vec<Box<dyn CoverSolver>> = GreedyOrder::ALL
        .into_iter()
        .map(|order| Box::new(GreedySolver::new(order)) as Box<dyn CoverSolver>)
        .collect();
    solvers.push(Box::new(ExactIlpSolver::new(GoodLpBackend::new())));
    solvers.push(Box::new(RelaxationRoundingSolver::with_config(
        GoodLpBackend::new(),
        RelaxationConfig {
            trials: None,
            seed: BENCHMARK_SEED,
        },
    )));
    solvers
}

/// Benchmark every solver on each problem size.
///
/// Instances are generated outside the measured loop; only `solve` is timed.
fn bench_solve_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_time");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));

    let solvers = solvers();
    for &size in PROBLEM_SIZES {
        let Some(instance) = tiered_instance(size, BENCHMARK_SEED) else {
            continue;
        };
        let target = instance.coverable_elements();
        let throughput_size = u64::try_from(size).unwrap_or(u64::MAX);
        group.throughput(Throughput::Elements(throughput_size));
        for solver in &solvers {
            group.bench_with_input(BenchmarkId::new(solver.name(), size), &size, |b, _| {
                b.iter(|| {
                    #[expect(
                        clippy::let_underscore_must_use,
                        reason = "Benchmarking solve performance, result is intentionally discarded"
                    )]
                    let _ = solver.solve(&instance, &target);
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_solve_times);
criterion_main!(benches);
