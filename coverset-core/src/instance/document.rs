//! Flat JSON representation of a [`CoverageInstance`].
//!
//! Loading always goes back through [`CoverageInstanceBuilder`], so a
//! document with dangling references is rejected rather than trusted.

use serde::{Deserialize, Serialize};

use super::{CoverageInstance, CoverageInstanceBuilder, InstanceError};
use crate::{Cost, ElementId, ProviderId};

/// Serialisable form of a [`CoverageInstance`].
///
/// # Examples
/// ```
/// use coverset_core::CoverageInstance;
///
/// # fn main() -> Result<(), serde_json::Error> {
/// let json = r#"{
///     "elements": [1, 2],
///     "providers": [
///         { "id": 1, "cost": 1, "covers": [1] },
///         { "id": 2, "cost": 1, "covers": [1, 2] }
///     ]
/// }"#;
/// let instance: CoverageInstance = serde_json::from_str(json)?;
/// assert_eq!(instance.provider_count(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceDocument {
    /// Declared elements.
    pub elements: Vec<ElementId>,
    /// Declared providers with their coverage.
    pub providers: Vec<ProviderDocument>,
}

/// One provider entry of an [`InstanceDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDocument {
    /// Provider identifier.
    pub id: ProviderId,
    /// Acquisition cost.
    pub cost: Cost,
    /// Elements the provider covers.
    #[serde(default)]
    pub covers: Vec<ElementId>,
}

impl TryFrom<InstanceDocument> for CoverageInstance {
    type Error = InstanceError;

    fn try_from(document: InstanceDocument) -> Result<Self, Self::Error> {
        document
            .providers
            .into_iter()
            .fold(
                CoverageInstanceBuilder::new().elements(document.elements),
                |builder, provider| {
                    builder
                        .provider(provider.id, provider.cost)
                        .covers_all(provider.id, provider.covers)
                },
            )
            .build()
    }
}

impl From<CoverageInstance> for InstanceDocument {
    fn from(instance: CoverageInstance) -> Self {
        let providers = instance
            .provider_entries()
            .map(|(id, cost, covered)| ProviderDocument {
                id,
                cost,
                covers: covered.iter().copied().collect(),
            })
            .collect();
        Self {
            elements: instance.elements().iter().copied().collect(),
            providers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityRef;
    use crate::test_support::{e, p, two_provider_instance};
    use rstest::rstest;

    #[rstest]
    fn json_document_preserves_the_instance() {
        let instance = two_provider_instance();
        let json = serde_json::to_string(&instance).expect("serialise instance");
        let loaded: CoverageInstance = serde_json::from_str(&json).expect("parse instance");
        assert_eq!(loaded, instance);
    }

    #[rstest]
    fn dangling_coverage_is_rejected_on_load() {
        let document = InstanceDocument {
            elements: vec![e(1)],
            providers: vec![ProviderDocument {
                id: p(1),
                cost: 2,
                covers: vec![e(3)],
            }],
        };
        let err = CoverageInstance::try_from(document).expect_err("e3 undeclared");
        assert_eq!(err, InstanceError::UnknownEntity(EntityRef::Element(e(3))));
    }
}
