//! Fixtures and scripted backends shared by unit and behaviour tests.
//!
//! Gated behind the `test-support` feature (and `cfg(test)`).

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Assignment, BackendError, LinearModel, ModelBackend};
use crate::{CoverageInstance, ElementId, ProviderId};

/// Shorthand for [`ElementId::new`].
#[must_use]
pub const fn e(raw: u64) -> ElementId {
    ElementId::new(raw)
}

/// Shorthand for [`ProviderId::new`].
#[must_use]
pub const fn p(raw: u64) -> ProviderId {
    ProviderId::new(raw)
}

/// Build an instance from `(provider, cost, covered elements)` rows.
///
/// Every element mentioned by a row is declared, plus `extra_elements`.
#[must_use]
pub fn instance_from_rows(rows: &[(u64, u64, &[u64])], extra_elements: &[u64]) -> CoverageInstance {
    let mut elements: BTreeSet<ElementId> = extra_elements.iter().copied().map(e).collect();
    let mut costs = BTreeMap::new();
    let mut coverage = BTreeMap::new();
    for (provider, cost, covered) in rows {
        let covered: BTreeSet<ElementId> = covered.iter().copied().map(e).collect();
        elements.extend(covered.iter().copied());
        costs.insert(p(*provider), *cost);
        coverage.insert(p(*provider), covered);
    }
    CoverageInstance::from_parts(elements, costs, coverage)
}

/// `e1, e2`; `p1` (cost 1) covers `e1`, `p2` (cost 1) covers both.
#[must_use]
pub fn two_provider_instance() -> CoverageInstance {
    instance_from_rows(&[(1, 1, &[1]), (2, 1, &[1, 2])], &[])
}

/// `p0` costs nothing and covers nothing; `p1` (cost 5) covers `e1, e2`.
#[must_use]
pub fn zero_coverage_instance() -> CoverageInstance {
    instance_from_rows(&[(0, 0, &[]), (1, 5, &[1, 2])], &[])
}

/// A [`ModelBackend`] answering every model with a fixed assignment.
///
/// Models whose variable count differs from the assignment length fail with
/// [`BackendError::Failed`].
#[derive(Debug, Clone)]
pub struct FixedAssignmentBackend {
    assignment: Assignment,
}

impl FixedAssignmentBackend {
    /// Create a backend returning `assignment`.
    #[must_use]
    pub const fn new(assignment: Assignment) -> Self {
        Self { assignment }
    }
}

impl ModelBackend for FixedAssignmentBackend {
    fn solve_model(&self, model: &LinearModel) -> Result<Assignment, BackendError> {
        let expected = model.variables().len();
        if expected != self.assignment.len() {
            return Err(BackendError::Failed(format!(
                "dimension mismatch: model has {expected} variables, assignment has {}",
                self.assignment.len()
            )));
        }
        Ok(self.assignment.clone())
    }
}

/// A [`ModelBackend`] failing every call with the same error.
#[derive(Debug, Clone)]
pub struct FailingBackend {
    error: BackendError,
}

impl FailingBackend {
    /// Create a backend that always returns `error`.
    #[must_use]
    pub const fn new(error: BackendError) -> Self {
        Self { error }
    }
}

impl ModelBackend for FailingBackend {
    fn solve_model(&self, _model: &LinearModel) -> Result<Assignment, BackendError> {
        Err(self.error.clone())
    }
}
