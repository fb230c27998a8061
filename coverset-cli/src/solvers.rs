//! Solver selection and timed execution.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use clap::ValueEnum;
use coverset_core::{
    BruteForceConfig, BruteForceSolver, CoverSolver, CoverageInstance, DEFAULT_PROVIDER_LIMIT,
    ElementId, ExactIlpSolver, GreedySolver, RelaxationConfig, RelaxationRoundingSolver,
    Solution, TradeoffConfig, TradeoffFormulator,
};
use coverset_solver_lp::GoodLpBackend;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{ARG_LAMBDA, ARG_TRIALS, CliError};

/// Solvers selectable with `--solver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum SolverKind {
    /// Exhaustive search.
    BruteForce,
    /// Static greedy by descending degree.
    GreedyDegree,
    /// Static greedy by ascending cost.
    GreedyCost,
    /// Static greedy by ascending cost per element.
    GreedyRatio,
    /// LP relaxation with randomised rounding.
    LpRounding,
    /// Exact integer program.
    Ilp,
    /// Penalised cost/uncoverage model.
    Tradeoff,
}

impl SolverKind {
    /// Solvers run by `compare` after the exact baseline.
    pub(crate) const APPROXIMATIONS: [Self; 5] = [
        Self::GreedyDegree,
        Self::GreedyCost,
        Self::GreedyRatio,
        Self::LpRounding,
        Self::Tradeoff,
    ];
}

/// Parameters applied when building a solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SolverParams {
    pub(crate) lambda: f64,
    pub(crate) trials: Option<usize>,
    pub(crate) seed: u64,
    pub(crate) provider_limit: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            lambda: TradeoffConfig::default().lambda,
            trials: None,
            seed: 0,
            provider_limit: DEFAULT_PROVIDER_LIMIT,
        }
    }
}

impl SolverParams {
    /// Reject penalties and trial counts the solvers would refuse, before
    /// any instance is loaded.
    pub(crate) fn validated(self) -> Result<Self, CliError> {
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(CliError::InvalidArgument {
                field: ARG_LAMBDA,
                reason: format!("expected a finite non-negative penalty, got {}", self.lambda),
            });
        }
        if self.trials == Some(0) {
            return Err(CliError::InvalidArgument {
                field: ARG_TRIALS,
                reason: "at least one trial per provider is required".to_owned(),
            });
        }
        Ok(self)
    }
}

/// Builds solvers for a command invocation.
pub(crate) trait SolverFactory {
    fn build(&self, kind: SolverKind, params: &SolverParams)
    -> Result<Box<dyn CoverSolver>, CliError>;
}

/// Builds the in-tree solvers over the `good_lp` backend.
pub(crate) struct DefaultSolverFactory;

impl SolverFactory for DefaultSolverFactory {
    fn build(
        &self,
        kind: SolverKind,
        params: &SolverParams,
    ) -> Result<Box<dyn CoverSolver>, CliError> {
        let solver: Box<dyn CoverSolver> = match kind {
            SolverKind::BruteForce => Box::new(BruteForceSolver::with_config(BruteForceConfig {
                provider_limit: params.provider_limit,
            })),
            SolverKind::GreedyDegree => Box::new(GreedySolver::degree()),
            SolverKind::GreedyCost => Box::new(GreedySolver::cost()),
            SolverKind::GreedyRatio => Box::new(GreedySolver::ratio()),
            SolverKind::LpRounding => Box::new(RelaxationRoundingSolver::with_config(
                GoodLpBackend::new(),
                RelaxationConfig {
                    trials: params.trials,
                    seed: params.seed,
                },
            )),
            SolverKind::Ilp => Box::new(ExactIlpSolver::new(GoodLpBackend::new())),
            SolverKind::Tradeoff => Box::new(TradeoffFormulator::with_config(
                GoodLpBackend::new(),
                TradeoffConfig {
                    lambda: params.lambda,
                },
            )),
        };
        Ok(solver)
    }
}

/// A solution with the wall-clock time its solve took.
#[derive(Debug, Clone)]
pub(crate) struct TimedSolution {
    pub(crate) solver: &'static str,
    pub(crate) solution: Solution,
    pub(crate) elapsed: Duration,
}

/// Run `solver` on `target`, timing the call.
pub(crate) fn timed_solve(
    solver: &dyn CoverSolver,
    instance: &CoverageInstance,
    target: &BTreeSet<ElementId>,
) -> Result<TimedSolution, CliError> {
    let started = Instant::now();
    let solution = solver
        .solve(instance, target)
        .map_err(|source| CliError::Solve {
            solver: solver.name(),
            source,
        })?;
    let elapsed = started.elapsed();
    debug!("{} finished in {elapsed:?}", solver.name());
    Ok(TimedSolution {
        solver: solver.name(),
        solution,
        elapsed,
    })
}
