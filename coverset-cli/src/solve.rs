//! Solve command implementation for the coverset CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::report::{SolveReport, write_report};
use crate::solvers::{DefaultSolverFactory, SolverFactory, SolverKind, SolverParams, timed_solve};
use crate::source::{DistributionKind, GeneratorFlags, GridEnv, InstanceSource};
use crate::{
    ARG_COVERAGE_PROB, ARG_DETAILS, ARG_DISTRIBUTION, ARG_INSTANCE, ARG_LAMBDA, ARG_LOCATIONS,
    ARG_MAX_COST, ARG_MIN_COST, ARG_PROVIDERS, ARG_SEED, ARG_SKEW, ARG_SOLVER, ARG_TIMESTEPS,
    ARG_TRIALS, CliError, ENV_SOLVE_LOCATIONS, ENV_SOLVE_PROVIDERS, ENV_SOLVE_SOLVER,
    ENV_SOLVE_TIMESTEPS,
};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Solve a coverage instance with one solver. The instance is \
                 either loaded from a JSON document with --instance or drawn \
                 from the synthetic generator. Every element of the instance \
                 is targeted; the report lists the selection, its cost and \
                 how much of the target it covers.",
    about = "Solve a coverage instance with one solver"
)]
#[ortho_config(prefix = "COVERSET")]
pub(crate) struct SolveArgs {
    /// Solver to run.
    #[arg(long = ARG_SOLVER, value_enum)]
    #[serde(default)]
    pub(crate) solver: Option<SolverKind>,
    /// Path to a JSON instance document.
    #[arg(long = ARG_INSTANCE, value_name = "path")]
    #[serde(default)]
    pub(crate) instance: Option<Utf8PathBuf>,
    /// Number of locations in the generated grid.
    #[arg(long = ARG_LOCATIONS)]
    #[serde(default)]
    pub(crate) locations: Option<u64>,
    /// Number of timesteps in the generated grid.
    #[arg(long = ARG_TIMESTEPS)]
    #[serde(default)]
    pub(crate) timesteps: Option<u64>,
    /// Number of generated providers.
    #[arg(long = ARG_PROVIDERS)]
    #[serde(default)]
    pub(crate) providers: Option<usize>,
    /// Edge probability of the generator.
    #[arg(long = ARG_COVERAGE_PROB)]
    #[serde(default)]
    pub(crate) coverage_prob: Option<f64>,
    /// Edge distribution of the generator.
    #[arg(long = ARG_DISTRIBUTION, value_enum)]
    #[serde(default)]
    pub(crate) distribution: Option<DistributionKind>,
    /// Shape parameter of the distribution (exponent, sigma or class noise).
    #[arg(long = ARG_SKEW)]
    #[serde(default)]
    pub(crate) skew: Option<f64>,
    /// Lowest generated provider cost.
    #[arg(long = ARG_MIN_COST)]
    #[serde(default)]
    pub(crate) min_cost: Option<u64>,
    /// Highest generated provider cost.
    #[arg(long = ARG_MAX_COST)]
    #[serde(default)]
    pub(crate) max_cost: Option<u64>,
    /// Seed for the generator and the rounding solver.
    #[arg(long = ARG_SEED)]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Uncoverage penalty of the tradeoff solver.
    #[arg(long = ARG_LAMBDA)]
    #[serde(default)]
    pub(crate) lambda: Option<f64>,
    /// Rounding trials of the LP rounding solver.
    #[arg(long = ARG_TRIALS)]
    #[serde(default)]
    pub(crate) trials: Option<usize>,
    /// Include per-element coverage details in the report.
    #[arg(long = ARG_DETAILS)]
    #[serde(default)]
    pub(crate) details: bool,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolveConfig {
    pub(crate) solver: SolverKind,
    pub(crate) source: InstanceSource,
    pub(crate) params: SolverParams,
    pub(crate) details: bool,
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let solver = args.solver.ok_or(CliError::MissingArgument {
            field: ARG_SOLVER,
            env: ENV_SOLVE_SOLVER,
        })?;
        let defaults = SolverParams::default();
        let params = SolverParams {
            lambda: args.lambda.unwrap_or(defaults.lambda),
            trials: args.trials,
            seed: args.seed.unwrap_or(defaults.seed),
            provider_limit: defaults.provider_limit,
        }
        .validated()?;
        let flags = GeneratorFlags {
            locations: args.locations,
            timesteps: args.timesteps,
            providers: args.providers,
            coverage_prob: args.coverage_prob,
            distribution: args.distribution,
            skew: args.skew,
            min_cost: args.min_cost,
            max_cost: args.max_cost,
            seed: args.seed,
        };
        let source = flags.into_source(
            args.instance,
            &GridEnv {
                locations: ENV_SOLVE_LOCATIONS,
                timesteps: ENV_SOLVE_TIMESTEPS,
                providers: ENV_SOLVE_PROVIDERS,
            },
        )?;
        Ok(Self {
            solver,
            source,
            params,
            details: args.details,
        })
    }
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_solve_with(args, &DefaultSolverFactory, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    factory: &dyn SolverFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_solve(&config, factory)?;
    write_report(writer, &report)
}

pub(super) fn execute_solve(
    config: &SolveConfig,
    factory: &dyn SolverFactory,
) -> Result<SolveReport, CliError> {
    config.source.validate()?;
    let instance = config.source.load()?;
    let target = instance.elements().clone();
    let solver = factory.build(config.solver, &config.params)?;
    let run = timed_solve(solver.as_ref(), &instance, &target)?;
    SolveReport::new(run, &instance, &target, config.details)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
