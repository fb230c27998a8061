//! Interface for synthetic instance suppliers.

use thiserror::Error;

use crate::{CoverageInstance, ElementId, InstanceError};

/// Size of a location × timestep element grid.
///
/// # Examples
/// ```
/// use coverset_core::{ElementId, GridShape};
///
/// let shape = GridShape::new(2, 3);
/// assert_eq!(shape.element_count(), 6);
/// assert_eq!(shape.elements().last(), Some(ElementId::new(5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Number of locations.
    pub locations: u64,
    /// Number of timesteps per location.
    pub timesteps: u64,
}

impl GridShape {
    /// Construct a grid shape.
    #[must_use]
    pub const fn new(locations: u64, timesteps: u64) -> Self {
        Self {
            locations,
            timesteps,
        }
    }

    /// Number of grid cells.
    #[must_use]
    pub const fn element_count(self) -> u64 {
        self.locations.saturating_mul(self.timesteps)
    }

    /// Every cell, location-major.
    pub fn elements(self) -> impl Iterator<Item = ElementId> {
        (0..self.locations).flat_map(move |location| {
            (0..self.timesteps)
                .map(move |timestep| ElementId::from_grid(location, timestep, self.timesteps))
        })
    }
}

/// Errors returned by [`InstanceGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A generator parameter was out of range.
    #[error("invalid generator parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// The generated data failed instance validation.
    #[error("generated instance is invalid")]
    Instance(#[from] InstanceError),
}

/// Supplies coverage instances over a grid of elements.
///
/// Solvers are agnostic to the distribution behind an instance; they only
/// rely on the [`CoverageInstance`] invariants.
pub trait InstanceGenerator {
    /// Generate an instance with `providers` providers over `shape`.
    ///
    /// # Errors
    /// Returns [`GenerateError`] when parameters are invalid.
    fn generate(
        &self,
        shape: GridShape,
        providers: usize,
    ) -> Result<CoverageInstance, GenerateError>;
}
