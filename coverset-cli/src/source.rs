//! Where a command's instance comes from: a JSON document or the generator.

use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use clap::ValueEnum;
use coverset_core::{CoverageInstance, GridShape, InstanceGenerator};
use coverset_generator::{CoverageDistribution, DEFAULT_CLASSES, GeneratorConfig, SyntheticGenerator};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{ARG_INSTANCE, CliError};

/// Edge distribution selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum DistributionKind {
    /// Independent edges with the coverage probability.
    #[default]
    Bernoulli,
    /// Beta-skewed per-provider probability.
    PowerLaw,
    /// Lognormal-skewed per-provider probability.
    Lognormal,
    /// Three provider classes with degree-derived costs.
    Tiered,
}

impl DistributionKind {
    /// Default shape parameter: the exponent, sigma or class noise.
    const fn default_skew(self) -> f64 {
        match self {
            Self::Bernoulli | Self::Lognormal => 1.0,
            Self::PowerLaw => 0.5,
            Self::Tiered => 0.1,
        }
    }

    pub(crate) fn into_distribution(self, skew: Option<f64>) -> CoverageDistribution {
        let shape = skew.unwrap_or_else(|| self.default_skew());
        match self {
            Self::Bernoulli => CoverageDistribution::Bernoulli,
            Self::PowerLaw => CoverageDistribution::PowerLaw { exponent: shape },
            Self::Lognormal => CoverageDistribution::LogNormal { sigma: shape },
            Self::Tiered => CoverageDistribution::Tiered {
                classes: DEFAULT_CLASSES.to_vec(),
                variation: shape,
            },
        }
    }
}

/// Resolved instance origin.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum InstanceSource {
    /// Load an instance document from disk.
    File(Utf8PathBuf),
    /// Draw a synthetic instance.
    Generated {
        /// Grid of elements.
        shape: GridShape,
        /// Number of providers.
        providers: usize,
        /// Generator parameters.
        config: GeneratorConfig,
    },
}

impl InstanceSource {
    /// Check that a file source names an existing regular file.
    pub(crate) fn validate(&self) -> Result<(), CliError> {
        match self {
            Self::File(path) => require_existing(path, ARG_INSTANCE),
            Self::Generated { .. } => Ok(()),
        }
    }

    /// Produce the instance.
    pub(crate) fn load(&self) -> Result<CoverageInstance, CliError> {
        match self {
            Self::File(path) => load_instance(path),
            Self::Generated {
                shape,
                providers,
                config,
            } => {
                debug!("generating instance with seed {}", config.seed);
                let generator = SyntheticGenerator::new(config.clone())?;
                Ok(generator.generate(*shape, *providers)?)
            }
        }
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::OpenInstance {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Loads a JSON instance document from disk.
pub(crate) fn load_instance(path: &Utf8Path) -> Result<CoverageInstance, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInstance {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseInstance {
        path: path.to_path_buf(),
        source,
    })
}

/// Generator flags shared by both commands, after configuration merging.
#[derive(Debug, Clone, Default)]
pub(crate) struct GeneratorFlags {
    pub(crate) locations: Option<u64>,
    pub(crate) timesteps: Option<u64>,
    pub(crate) providers: Option<usize>,
    pub(crate) coverage_prob: Option<f64>,
    pub(crate) distribution: Option<DistributionKind>,
    pub(crate) skew: Option<f64>,
    pub(crate) min_cost: Option<u64>,
    pub(crate) max_cost: Option<u64>,
    pub(crate) seed: Option<u64>,
}

/// Environment variable names for the required grid flags.
pub(crate) struct GridEnv {
    pub(crate) locations: &'static str,
    pub(crate) timesteps: &'static str,
    pub(crate) providers: &'static str,
}

impl GeneratorFlags {
    /// Resolve the instance source: `instance` wins over generator flags,
    /// which then need the full grid and provider count.
    pub(crate) fn into_source(
        self,
        instance: Option<Utf8PathBuf>,
        env: &GridEnv,
    ) -> Result<InstanceSource, CliError> {
        if let Some(path) = instance {
            return Ok(InstanceSource::File(path));
        }
        let locations = self.locations.ok_or(CliError::MissingArgument {
            field: crate::ARG_LOCATIONS,
            env: env.locations,
        })?;
        let timesteps = self.timesteps.ok_or(CliError::MissingArgument {
            field: crate::ARG_TIMESTEPS,
            env: env.timesteps,
        })?;
        let providers = self.providers.ok_or(CliError::MissingArgument {
            field: crate::ARG_PROVIDERS,
            env: env.providers,
        })?;
        let defaults = GeneratorConfig::default();
        let config = GeneratorConfig {
            coverage_probability: self
                .coverage_prob
                .unwrap_or(defaults.coverage_probability),
            min_cost: self.min_cost.unwrap_or(defaults.min_cost),
            max_cost: self.max_cost.unwrap_or(defaults.max_cost),
            seed: self.seed.unwrap_or(defaults.seed),
            distribution: self
                .distribution
                .unwrap_or_default()
                .into_distribution(self.skew),
        };
        Ok(InstanceSource::Generated {
            shape: GridShape::new(locations, timesteps),
            providers,
            config,
        })
    }
}
