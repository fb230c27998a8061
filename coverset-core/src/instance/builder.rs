//! Incremental construction of a [`CoverageInstance`].

use std::collections::{BTreeMap, BTreeSet};

use super::{CoverageInstance, InstanceError};
use crate::{Cost, ElementId, EntityRef, ProviderId};

/// Collects elements, providers and coverage edges before validation.
///
/// Nothing is checked until [`CoverageInstanceBuilder::build`], so edges may
/// be added before the entities they mention.
///
/// # Examples
/// ```
/// use coverset_core::{CoverageInstance, ElementId, ProviderId};
///
/// # fn main() -> Result<(), coverset_core::InstanceError> {
/// let instance = CoverageInstance::builder()
///     .element(ElementId::new(1))
///     .provider(ProviderId::new(1), 4)
///     .covers(ProviderId::new(1), ElementId::new(1))
///     .build()?;
/// assert_eq!(instance.cost_of(ProviderId::new(1))?, 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoverageInstanceBuilder {
    elements: BTreeSet<ElementId>,
    providers: Vec<(ProviderId, Cost)>,
    edges: Vec<(ProviderId, ElementId)>,
}

impl CoverageInstanceBuilder {
    /// Start an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an element.
    #[must_use]
    pub fn element(mut self, element: ElementId) -> Self {
        self.elements.insert(element);
        self
    }

    /// Declare several elements at once.
    #[must_use]
    pub fn elements<I>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = ElementId>,
    {
        self.elements.extend(elements);
        self
    }

    /// Declare a provider with its acquisition cost.
    #[must_use]
    pub fn provider(mut self, provider: ProviderId, cost: Cost) -> Self {
        self.providers.push((provider, cost));
        self
    }

    /// Record that `provider` covers `element`.
    #[must_use]
    pub fn covers(mut self, provider: ProviderId, element: ElementId) -> Self {
        self.edges.push((provider, element));
        self
    }

    /// Record that `provider` covers every element in `elements`.
    #[must_use]
    pub fn covers_all<I>(mut self, provider: ProviderId, elements: I) -> Self
    where
        I: IntoIterator<Item = ElementId>,
    {
        self.edges
            .extend(elements.into_iter().map(|element| (provider, element)));
        self
    }

    /// Validate the collected data and freeze it into an instance.
    ///
    /// # Errors
    /// Returns [`InstanceError::DuplicateProvider`] when a provider was
    /// declared twice and [`InstanceError::UnknownEntity`] when an edge
    /// mentions an undeclared provider or element.
    pub fn build(self) -> Result<CoverageInstance, InstanceError> {
        let mut costs = BTreeMap::new();
        for (provider, cost) in self.providers {
            if costs.insert(provider, cost).is_some() {
                return Err(InstanceError::DuplicateProvider(provider));
            }
        }

        let mut coverage: BTreeMap<ProviderId, BTreeSet<ElementId>> = costs
            .keys()
            .map(|provider| (*provider, BTreeSet::new()))
            .collect();
        for (provider, element) in self.edges {
            if !self.elements.contains(&element) {
                return Err(InstanceError::UnknownEntity(EntityRef::Element(element)));
            }
            let covered = coverage
                .get_mut(&provider)
                .ok_or(InstanceError::UnknownEntity(EntityRef::Provider(provider)))?;
            covered.insert(element);
        }

        Ok(CoverageInstance::from_parts(self.elements, costs, coverage))
    }
}
