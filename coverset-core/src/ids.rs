//! Identifiers for the two sides of the coverage graph.
//!
//! Elements and providers are plain integer newtypes. Ordering follows the
//! wrapped integer, which gives every solver a deterministic tie-break.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Acquisition cost of a provider.
///
/// Costs are unsigned, so the non-negativity invariant holds by construction.
pub type Cost = u64;

/// A demand unit that must be covered.
///
/// # Examples
/// ```
/// use coverset_core::ElementId;
///
/// let element = ElementId::from_grid(2, 3, 10);
/// assert_eq!(element, ElementId::new(23));
/// assert_eq!(element.to_string(), "e23");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Identifier of the `(location, timestep)` cell in a grid with
    /// `timesteps` columns.
    #[must_use]
    pub const fn from_grid(location: u64, timestep: u64, timesteps: u64) -> Self {
        Self(location * timesteps + timestep)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A candidate resource that covers elements at a fixed cost.
///
/// # Examples
/// ```
/// use coverset_core::ProviderId;
///
/// assert!(ProviderId::new(1) < ProviderId::new(2));
/// assert_eq!(ProviderId::new(7).to_string(), "p7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ProviderId(u64);

impl ProviderId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Reference to either side of the coverage graph, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    /// An element identifier.
    Element(ElementId),
    /// A provider identifier.
    Provider(ProviderId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(id) => write!(f, "element {id}"),
            Self::Provider(id) => write!(f, "provider {id}"),
        }
    }
}
