//! Facade crate for the coverset set-cover toolkit.
//!
//! This crate re-exports the core data model and solvers and exposes the
//! `good_lp` backend and the synthetic generator behind feature flags.

#![forbid(unsafe_code)]

pub use coverset_core::{
    BruteForceConfig, BruteForceSolver, Cost, CoverSolver, CoverageInstance,
    CoverageInstanceBuilder, DEFAULT_PROVIDER_LIMIT, ElementId, EntityRef, ExactIlpSolver,
    GenerateError, GreedyOrder, GreedySolver, GridShape, InstanceError, InstanceGenerator,
    ProviderId, RelaxationConfig, RelaxationRoundingSolver, Solution, SolutionStatus, SolveError,
    TradeoffConfig, TradeoffFormulator, TradeoffSolution, default_trials, model, round_fractional,
};

#[cfg(feature = "serde")]
pub use coverset_core::{InstanceDocument, ProviderDocument};

#[cfg(feature = "solver-lp")]
pub use coverset_solver_lp::GoodLpBackend;

#[cfg(feature = "generator")]
pub use coverset_generator::{
    CoverageDistribution, GeneratorConfig, ProviderClass, SyntheticGenerator,
};
