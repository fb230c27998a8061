//! Command-line interface for running coverset solvers.
//!
//! `coverset solve` runs one solver on a loaded or generated instance;
//! `coverset compare` runs every solver against an exact baseline. Options
//! layer from CLI flags, `COVERSET_*` environment variables and
//! configuration files through `ortho_config`.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod compare;
mod error;
mod fs;
mod report;
mod solve;
mod solvers;
mod source;

pub use error::CliError;

use compare::CompareArgs;
use solve::SolveArgs;

pub(crate) const ARG_SOLVER: &str = "solver";
pub(crate) const ARG_INSTANCE: &str = "instance";
pub(crate) const ARG_LOCATIONS: &str = "locations";
pub(crate) const ARG_TIMESTEPS: &str = "timesteps";
pub(crate) const ARG_PROVIDERS: &str = "providers";
pub(crate) const ARG_COVERAGE_PROB: &str = "coverage-prob";
pub(crate) const ARG_DISTRIBUTION: &str = "distribution";
pub(crate) const ARG_SKEW: &str = "skew";
pub(crate) const ARG_MIN_COST: &str = "min-cost";
pub(crate) const ARG_MAX_COST: &str = "max-cost";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ARG_LAMBDA: &str = "lambda";
pub(crate) const ARG_TRIALS: &str = "trials";
pub(crate) const ARG_DETAILS: &str = "details";
pub(crate) const ARG_EXACT_LIMIT: &str = "exact-limit";

pub(crate) const ENV_SOLVE_SOLVER: &str = "COVERSET_CMDS_SOLVE_SOLVER";
pub(crate) const ENV_SOLVE_LOCATIONS: &str = "COVERSET_CMDS_SOLVE_LOCATIONS";
pub(crate) const ENV_SOLVE_TIMESTEPS: &str = "COVERSET_CMDS_SOLVE_TIMESTEPS";
pub(crate) const ENV_SOLVE_PROVIDERS: &str = "COVERSET_CMDS_SOLVE_PROVIDERS";
pub(crate) const ENV_COMPARE_LOCATIONS: &str = "COVERSET_CMDS_COMPARE_LOCATIONS";
pub(crate) const ENV_COMPARE_TIMESTEPS: &str = "COVERSET_CMDS_COMPARE_TIMESTEPS";
pub(crate) const ENV_COMPARE_PROVIDERS: &str = "COVERSET_CMDS_COMPARE_PROVIDERS";

/// Run the coverset CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when parsing, configuration, instance loading or
/// solving fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Solve(args) => solve::run_solve(args),
        Command::Compare(args) => compare::run_compare(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "coverset",
    about = "Weighted set-cover solvers for provider selection",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve one instance with one solver.
    Solve(SolveArgs),
    /// Compare every solver against an exact baseline.
    Compare(CompareArgs),
}

#[cfg(test)]
mod tests;
