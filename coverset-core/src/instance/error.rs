use thiserror::Error;

use crate::{EntityRef, ProviderId};

/// Errors raised while building or querying a
/// [`CoverageInstance`](crate::CoverageInstance).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    /// A provider or element is not part of the instance.
    #[error("{0} is not part of the coverage instance")]
    UnknownEntity(EntityRef),
    /// The same provider was declared more than once.
    #[error("provider {0} was declared more than once")]
    DuplicateProvider(ProviderId),
}
