//! The bipartite coverage model shared by every solver.
//!
//! A [`CoverageInstance`] holds the element set, provider costs, and the
//! coverage relation. The provider → elements view is computed once at
//! construction; the element → providers view is derived on demand for
//! reporting. Instances are immutable after [`CoverageInstanceBuilder::build`].

mod builder;
#[cfg(feature = "serde")]
mod document;
mod error;

use std::collections::{BTreeMap, BTreeSet};

pub use builder::CoverageInstanceBuilder;
#[cfg(feature = "serde")]
pub use document::{InstanceDocument, ProviderDocument};
pub use error::InstanceError;

use crate::{Cost, ElementId, EntityRef, ProviderId};

/// Elements, providers with costs, and which provider covers which element.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use coverset_core::{CoverageInstance, ElementId, ProviderId};
///
/// # fn main() -> Result<(), coverset_core::InstanceError> {
/// let (e1, e2) = (ElementId::new(1), ElementId::new(2));
/// let (p1, p2) = (ProviderId::new(1), ProviderId::new(2));
/// let instance = CoverageInstance::builder()
///     .elements([e1, e2])
///     .provider(p1, 1)
///     .provider(p2, 1)
///     .covers(p1, e1)
///     .covers_all(p2, [e1, e2])
///     .build()?;
///
/// assert_eq!(instance.coverage_of(p2)?.len(), 2);
/// assert_eq!(instance.covering_providers_of(e1)?, BTreeSet::from([p1, p2]));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "InstanceDocument", into = "InstanceDocument")
)]
pub struct CoverageInstance {
    elements: BTreeSet<ElementId>,
    costs: BTreeMap<ProviderId, Cost>,
    coverage: BTreeMap<ProviderId, BTreeSet<ElementId>>,
}

impl CoverageInstance {
    /// Start building an instance.
    #[must_use]
    pub fn builder() -> CoverageInstanceBuilder {
        CoverageInstanceBuilder::new()
    }

    pub(crate) const fn from_parts(
        elements: BTreeSet<ElementId>,
        costs: BTreeMap<ProviderId, Cost>,
        coverage: BTreeMap<ProviderId, BTreeSet<ElementId>>,
    ) -> Self {
        Self {
            elements,
            costs,
            coverage,
        }
    }

    /// All declared elements in ascending order.
    #[must_use]
    pub const fn elements(&self) -> &BTreeSet<ElementId> {
        &self.elements
    }

    /// All declared providers in ascending order.
    pub fn providers(&self) -> impl ExactSizeIterator<Item = ProviderId> + '_ {
        self.costs.keys().copied()
    }

    /// Number of declared elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of declared providers.
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.costs.len()
    }

    /// Providers with their cost and coverage, in ascending provider order.
    pub fn provider_entries(
        &self,
    ) -> impl Iterator<Item = (ProviderId, Cost, &BTreeSet<ElementId>)> + '_ {
        self.coverage.iter().filter_map(|(provider, covered)| {
            self.costs
                .get(provider)
                .map(|cost| (*provider, *cost, covered))
        })
    }

    /// Acquisition cost of `provider`.
    ///
    /// # Errors
    /// Returns [`InstanceError::UnknownEntity`] for an undeclared provider.
    pub fn cost_of(&self, provider: ProviderId) -> Result<Cost, InstanceError> {
        self.costs
            .get(&provider)
            .copied()
            .ok_or(InstanceError::UnknownEntity(EntityRef::Provider(provider)))
    }

    /// Elements covered by `provider`.
    ///
    /// # Errors
    /// Returns [`InstanceError::UnknownEntity`] for an undeclared provider.
    pub fn coverage_of(&self, provider: ProviderId) -> Result<&BTreeSet<ElementId>, InstanceError> {
        self.coverage
            .get(&provider)
            .ok_or(InstanceError::UnknownEntity(EntityRef::Provider(provider)))
    }

    /// Number of elements covered by `provider`.
    ///
    /// # Errors
    /// Returns [`InstanceError::UnknownEntity`] for an undeclared provider.
    pub fn degree_of(&self, provider: ProviderId) -> Result<usize, InstanceError> {
        self.coverage_of(provider).map(BTreeSet::len)
    }

    /// Providers covering `element`.
    ///
    /// # Errors
    /// Returns [`InstanceError::UnknownEntity`] for an undeclared element.
    pub fn covering_providers_of(
        &self,
        element: ElementId,
    ) -> Result<BTreeSet<ProviderId>, InstanceError> {
        if !self.elements.contains(&element) {
            return Err(InstanceError::UnknownEntity(EntityRef::Element(element)));
        }
        Ok(self
            .coverage
            .iter()
            .filter(|(_, covered)| covered.contains(&element))
            .map(|(provider, _)| *provider)
            .collect())
    }

    /// Elements covered by at least one provider.
    ///
    /// This is the conventional target set: uncoverable elements can never
    /// be satisfied by any selection.
    #[must_use]
    pub fn coverable_elements(&self) -> BTreeSet<ElementId> {
        self.coverage.values().flatten().copied().collect()
    }

    /// Elements no provider covers.
    #[must_use]
    pub fn uncoverable_elements(&self) -> BTreeSet<ElementId> {
        let coverable = self.coverable_elements();
        self.elements.difference(&coverable).copied().collect()
    }

    /// Union of the elements covered by `selection`.
    ///
    /// # Errors
    /// Returns [`InstanceError::UnknownEntity`] when `selection` names an
    /// undeclared provider.
    pub fn covered_by(
        &self,
        selection: &BTreeSet<ProviderId>,
    ) -> Result<BTreeSet<ElementId>, InstanceError> {
        let mut covered = BTreeSet::new();
        for provider in selection {
            covered.extend(self.coverage_of(*provider)?.iter().copied());
        }
        Ok(covered)
    }

    /// Summed cost of `selection`.
    ///
    /// # Errors
    /// Returns [`InstanceError::UnknownEntity`] when `selection` names an
    /// undeclared provider.
    pub fn total_cost(&self, selection: &BTreeSet<ProviderId>) -> Result<Cost, InstanceError> {
        selection.iter().try_fold(0, |total: Cost, provider| {
            self.cost_of(*provider).map(|cost| total.saturating_add(cost))
        })
    }

    /// For every element covered by `selection`, the selected providers
    /// covering it.
    ///
    /// # Errors
    /// Returns [`InstanceError::UnknownEntity`] when `selection` names an
    /// undeclared provider.
    pub fn coverage_details(
        &self,
        selection: &BTreeSet<ProviderId>,
    ) -> Result<BTreeMap<ElementId, BTreeSet<ProviderId>>, InstanceError> {
        let mut details: BTreeMap<ElementId, BTreeSet<ProviderId>> = BTreeMap::new();
        for provider in selection {
            for element in self.coverage_of(*provider)? {
                details.entry(*element).or_default().insert(*provider);
            }
        }
        Ok(details)
    }

    /// Ensure every element of `target` belongs to the instance.
    ///
    /// # Errors
    /// Returns [`InstanceError::UnknownEntity`] naming the first foreign
    /// element.
    pub fn check_target(&self, target: &BTreeSet<ElementId>) -> Result<(), InstanceError> {
        match target.difference(&self.elements).next() {
            Some(element) => Err(InstanceError::UnknownEntity(EntityRef::Element(*element))),
            None => Ok(()),
        }
    }

    /// Share of `reference` covered by `selection`, as a percentage.
    ///
    /// An empty reference set counts as fully covered.
    ///
    /// # Errors
    /// Returns [`InstanceError::UnknownEntity`] when `selection` names an
    /// undeclared provider.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "coverage percentages are reporting values"
    )]
    pub fn coverage_percentage(
        &self,
        selection: &BTreeSet<ProviderId>,
        reference: &BTreeSet<ElementId>,
    ) -> Result<f64, InstanceError> {
        if reference.is_empty() {
            return Ok(100.0);
        }
        let covered = self.covered_by(selection)?;
        let hit = reference.intersection(&covered).count();
        Ok(100.0 * hit as f64 / reference.len() as f64)
    }
}
