//! Error types emitted by the coverset CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use coverset_core::{GenerateError, SolveError};
use thiserror::Error;

/// Errors emitted by the coverset CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// An option value is outside the range its solver accepts.
    #[error("invalid --{field}: {reason}")]
    InvalidArgument {
        /// Long flag of the rejected option.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Long flag naming the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Long flag naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// Opening or inspecting the instance file failed.
    #[error("failed to open instance at {path:?}: {source}")]
    OpenInstance {
        /// Instance path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The instance file is not a valid instance document.
    #[error("failed to parse instance JSON at {path:?}: {source}")]
    ParseInstance {
        /// Instance path.
        path: Utf8PathBuf,
        /// Decoding failure, including dangling references.
        #[source]
        source: serde_json::Error,
    },
    /// Generating a synthetic instance failed.
    #[error("failed to generate instance: {0}")]
    Generate(#[from] GenerateError),
    /// A solver rejected the instance or failed.
    #[error("{solver} failed: {source}")]
    Solve {
        /// Name of the failing solver.
        solver: &'static str,
        /// Solver failure.
        #[source]
        source: SolveError,
    },
    /// Serialising a report failed.
    #[error("failed to serialise report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing a report failed.
    #[error("failed to write report: {0}")]
    WriteReport(#[source] std::io::Error),
}
