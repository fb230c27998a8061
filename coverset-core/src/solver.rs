use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::BackendError;
use crate::{CoverageInstance, ElementId, EntityRef, InstanceError, Solution};

/// Errors returned by [`CoverSolver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The target set or a selection names an entity outside the instance.
    #[error("{0} is not part of the coverage instance")]
    UnknownEntity(EntityRef),
    /// No provider subset covers the whole target set.
    #[error("no provider selection covers the target set")]
    Infeasible,
    /// Exhaustive search was refused because the instance is too large.
    #[error("{providers} providers exceed the exhaustive search limit of {limit}")]
    InstanceTooLarge {
        /// Providers in the instance.
        providers: usize,
        /// Configured ceiling.
        limit: usize,
    },
    /// A solver parameter was out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// The LP/MIP backend failed for a reason other than infeasibility.
    #[error("solver backend failed")]
    Backend(#[source] BackendError),
}

impl From<InstanceError> for SolveError {
    fn from(err: InstanceError) -> Self {
        match err {
            InstanceError::UnknownEntity(entity) => Self::UnknownEntity(entity),
            InstanceError::DuplicateProvider(provider) => Self::InvalidParameter {
                name: "instance",
                reason: format!("provider {provider} was declared more than once"),
            },
        }
    }
}

impl From<BackendError> for SolveError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Infeasible => Self::Infeasible,
            other => Self::Backend(other),
        }
    }
}

/// Select providers covering a target element set.
///
/// Implementations must not panic on bad input: foreign target elements are
/// reported as [`SolveError::UnknownEntity`]. Solvers must be `Send + Sync`
/// so one value can serve concurrent solves; every call owns its working
/// state.
pub trait CoverSolver: Send + Sync {
    /// Short identifier used in reports.
    fn name(&self) -> &'static str;

    /// Select providers covering `target`.
    ///
    /// # Errors
    /// Returns [`SolveError`] when the target is malformed, no cover exists
    /// (exact solvers only), or a backend fails.
    fn solve(
        &self,
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<Solution, SolveError>;
}
