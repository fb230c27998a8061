//! Compare command: every solver against an exact baseline on one instance.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use coverset_core::DEFAULT_PROVIDER_LIMIT;
use log::{debug, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::report::{CompareReport, CompareRow, SolveReport, write_report};
use crate::solvers::{DefaultSolverFactory, SolverFactory, SolverKind, SolverParams, timed_solve};
use crate::source::{DistributionKind, GeneratorFlags, GridEnv, InstanceSource};
use crate::{
    ARG_COVERAGE_PROB, ARG_DISTRIBUTION, ARG_EXACT_LIMIT, ARG_INSTANCE, ARG_LAMBDA,
    ARG_LOCATIONS, ARG_MAX_COST, ARG_MIN_COST, ARG_PROVIDERS, ARG_SEED, ARG_SKEW, ARG_TIMESTEPS,
    ARG_TRIALS, CliError, ENV_COMPARE_LOCATIONS, ENV_COMPARE_PROVIDERS, ENV_COMPARE_TIMESTEPS,
};

/// Largest provider count solved exhaustively by default.
const DEFAULT_EXACT_LIMIT: usize = 20;

/// CLI arguments for the `compare` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Run the exact baseline and every approximate solver on one \
                 instance. Brute force is the baseline while the provider \
                 count is within --exact-limit; larger instances use the ILP. \
                 Elements no provider covers are left out of the target.",
    about = "Compare every solver against an exact baseline"
)]
#[ortho_config(prefix = "COVERSET")]
pub(crate) struct CompareArgs {
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
    /// Largest provider count solved by brute force.
    #[arg(long = ARG_EXACT_LIMIT)]
    #[serde(default)]
    pub(crate) exact_limit: Option<usize>,
}

impl CompareArgs {
    pub(crate) fn into_config(self) -> Result<CompareConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CompareConfig::try_from(merged)
    }
}

/// Resolved `compare` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CompareConfig {
    pub(crate) source: InstanceSource,
    pub(crate) params: SolverParams,
}

impl TryFrom<CompareArgs> for CompareConfig {
    type Error = CliError;

    fn try_from(args: CompareArgs) -> Result<Self, Self::Error> {
        let defaults = SolverParams::default();
        let params = SolverParams {
            lambda: args.lambda.unwrap_or(defaults.lambda),
            trials: args.trials,
            seed: args.seed.unwrap_or(defaults.seed),
            provider_limit: args
                .exact_limit
                .unwrap_or(DEFAULT_EXACT_LIMIT)
                .min(DEFAULT_PROVIDER_LIMIT),
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
                locations: ENV_COMPARE_LOCATIONS,
                timesteps: ENV_COMPARE_TIMESTEPS,
                providers: ENV_COMPARE_PROVIDERS,
            },
        )?;
        Ok(Self { source, params })
    }
}

pub(super) fn run_compare(args: CompareArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_compare_with(args, &DefaultSolverFactory, &mut stdout)
}

pub(super) fn run_compare_with(
    args: CompareArgs,
    factory: &dyn SolverFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_compare(&config, factory)?;
    write_report(writer, &report)
}

pub(super) fn execute_compare(
    config: &CompareConfig,
    factory: &dyn SolverFactory,
) -> Result<CompareReport, CliError> {
    config.source.validate()?;
    let instance = config.source.load()?;
    let target = instance.coverable_elements();
    let uncoverable = instance.element_count().saturating_sub(target.len());
    if uncoverable > 0 {
        warn!("{uncoverable} elements have no covering provider and are left out");
    }

    let baseline = if instance.provider_count() <= config.params.provider_limit {
        SolverKind::BruteForce
    } else {
        SolverKind::Ilp
    };
    debug!(
        "comparing {} providers against {baseline:?}",
        instance.provider_count()
    );

    let exact_solver = factory.build(baseline, &config.params)?;
    let exact = SolveReport::new(
        timed_solve(exact_solver.as_ref(), &instance, &target)?,
        &instance,
        &target,
        false,
    )?;
    let optimum = exact.cost;
    let baseline_name = exact.solver.clone();

    let mut rows = vec![CompareRow::from_report(exact, optimum)];
    for kind in SolverKind::APPROXIMATIONS {
        let solver = factory.build(kind, &config.params)?;
        let run = timed_solve(solver.as_ref(), &instance, &target)?;
        rows.push(CompareRow::from_report(
            SolveReport::new(run, &instance, &target, false)?,
            optimum,
        ));
    }

    Ok(CompareReport {
        elements: instance.element_count(),
        providers: instance.provider_count(),
        uncoverable,
        baseline: baseline_name,
        optimum,
        rows,
    })
}
