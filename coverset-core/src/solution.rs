//! Solver outputs.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CoverageInstance, Cost, ElementId, InstanceError, ProviderId};

/// How much a [`Solution`] has been checked.
///
/// Approximate solvers return a best effort; the status tells callers
/// whether they still need to verify coverage themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "kind"))]
pub enum SolutionStatus {
    /// Proven minimum-cost feasible selection.
    Optimal,
    /// Coverage of the target verified; optimality not claimed.
    Feasible,
    /// Coverage checked and found incomplete.
    PartialCover {
        /// Target elements no selected provider covers.
        uncovered: BTreeSet<ElementId>,
    },
    /// Coverage was not checked.
    Unverified,
    /// Optimum of the penalised cost/uncoverage objective.
    Tradeoff,
}

/// A selected provider set and its acquisition cost.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use coverset_core::{ProviderId, Solution, SolutionStatus};
///
/// let solution = Solution::new(BTreeSet::from([ProviderId::new(2)]), 1, SolutionStatus::Optimal);
/// assert_eq!(solution.cost, 1);
/// assert!(solution.is_feasible());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// Chosen providers in ascending order.
    pub selected: BTreeSet<ProviderId>,
    /// Sum of the chosen providers' costs.
    pub cost: Cost,
    /// Verification state of the selection.
    pub status: SolutionStatus,
}

impl Solution {
    /// Bundle a selection with its cost and status.
    #[must_use]
    pub const fn new(selected: BTreeSet<ProviderId>, cost: Cost, status: SolutionStatus) -> Self {
        Self {
            selected,
            cost,
            status,
        }
    }

    /// The empty selection with cost zero.
    #[must_use]
    pub const fn empty(status: SolutionStatus) -> Self {
        Self::new(BTreeSet::new(), 0, status)
    }

    /// Whether the solver itself verified full coverage of the target.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        matches!(self.status, SolutionStatus::Optimal | SolutionStatus::Feasible)
    }

    /// Target elements the selection leaves uncovered.
    ///
    /// Use this to check [`SolutionStatus::Unverified`] and
    /// [`SolutionStatus::Tradeoff`] results.
    ///
    /// # Errors
    /// Returns [`InstanceError::UnknownEntity`] when the selection names a
    /// provider outside `instance`.
    pub fn uncovered(
        &self,
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<BTreeSet<ElementId>, InstanceError> {
        let covered = instance.covered_by(&self.selected)?;
        Ok(target.difference(&covered).copied().collect())
    }
}

/// Result of the cost/uncoverage tradeoff model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TradeoffSolution {
    /// Selected providers with their acquisition cost. The penalty term is
    /// not part of `solution.cost`.
    pub solution: Solution,
    /// Target elements whose uncoverage indicator is set.
    pub uncovered: BTreeSet<ElementId>,
    /// Acquisition cost plus `lambda` times the uncovered count.
    pub objective: f64,
}
