//! Core model and solvers for weighted minimum set cover.
//!
//! A [`CoverageInstance`] describes elements that need coverage, providers
//! with fixed acquisition costs, and which provider covers which element.
//! Every solver implements [`CoverSolver`] and returns a [`Solution`] whose
//! [`SolutionStatus`] states how far the result was verified:
//!
//! - [`BruteForceSolver`] enumerates every provider subset (exact, small
//!   instances only);
//! - [`GreedySolver`] walks a static degree, cost or cost-per-element order;
//! - [`RelaxationRoundingSolver`] rounds an LP relaxation by repeated
//!   Bernoulli trials;
//! - [`ExactIlpSolver`] solves the set-cover integer program;
//! - [`TradeoffFormulator`] trades acquisition cost against a per-element
//!   uncoverage penalty.
//!
//! The model-based solvers describe their programs with the types in
//! [`model`] and delegate solving to any [`ModelBackend`](model::ModelBackend).

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod brute_force;
mod formulation;
mod generator;
mod greedy;
mod ids;
mod ilp;
mod instance;
pub mod model;
mod relaxation;
mod solution;
mod solver;
mod tradeoff;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use brute_force::{BruteForceConfig, BruteForceSolver, DEFAULT_PROVIDER_LIMIT};
pub use generator::{GenerateError, GridShape, InstanceGenerator};
pub use greedy::{GreedyOrder, GreedySolver};
pub use ids::{Cost, ElementId, EntityRef, ProviderId};
pub use ilp::ExactIlpSolver;
#[cfg(feature = "serde")]
pub use instance::{InstanceDocument, ProviderDocument};
pub use instance::{CoverageInstance, CoverageInstanceBuilder, InstanceError};
pub use relaxation::{RelaxationConfig, RelaxationRoundingSolver, default_trials, round_fractional};
pub use solution::{Solution, SolutionStatus, TradeoffSolution};
pub use solver::{CoverSolver, SolveError};
pub use tradeoff::{TradeoffConfig, TradeoffFormulator};
