//! Static-priority greedy covers.
//!
//! Each variant fixes a provider visitation order once, then walks it while
//! shrinking a residual set of uncovered target elements. A provider is kept
//! only when it removes at least one residual element. Priorities are never
//! recomputed against the shrinking residual set; that keeps the pass at
//! `O(P log P)` plus the coverage scan, at the price of a weaker
//! approximation than the textbook marginal-gain greedy.

use std::cmp::{Ordering, Reverse};
use std::collections::BTreeSet;

use log::{debug, warn};

use crate::{
    CoverSolver, CoverageInstance, Cost, ElementId, ProviderId, Solution, SolutionStatus,
    SolveError,
};

/// Provider visitation order of a [`GreedySolver`].
///
/// Ties always fall back to ascending [`ProviderId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GreedyOrder {
    /// Largest total coverage first.
    Degree,
    /// Cheapest first.
    Cost,
    /// Lowest cost per covered element first; zero-coverage providers are
    /// dropped from the order.
    Ratio,
}

impl GreedyOrder {
    /// Every variant, in reporting order.
    pub const ALL: [Self; 3] = [Self::Degree, Self::Cost, Self::Ratio];
}

/// Greedy cover with a fixed visitation order.
///
/// Greedy never fails on uncoverable target elements: they stay in the
/// residual set and the result carries [`SolutionStatus::PartialCover`].
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use coverset_core::{CoverSolver, CoverageInstance, ElementId, GreedySolver, ProviderId};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
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
/// let by_cost = GreedySolver::cost().solve(&instance, instance.elements())?;
/// assert_eq!(by_cost.selected, BTreeSet::from([p1, p2]));
/// assert_eq!(by_cost.cost, 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedySolver {
    order: GreedyOrder,
}

type Entry<'a> = (ProviderId, Cost, &'a BTreeSet<ElementId>);

impl GreedySolver {
    /// Construct a solver for `order`.
    #[must_use]
    pub const fn new(order: GreedyOrder) -> Self {
        Self { order }
    }

    /// Decreasing coverage cardinality.
    #[must_use]
    pub const fn degree() -> Self {
        Self::new(GreedyOrder::Degree)
    }

    /// Increasing cost.
    #[must_use]
    pub const fn cost() -> Self {
        Self::new(GreedyOrder::Cost)
    }

    /// Increasing cost per covered element.
    #[must_use]
    pub const fn ratio() -> Self {
        Self::new(GreedyOrder::Ratio)
    }

    /// The configured visitation order.
    #[must_use]
    pub const fn order(&self) -> GreedyOrder {
        self.order
    }

    /// Providers in the order this variant visits them.
    #[must_use]
    pub fn visitation_order(&self, instance: &CoverageInstance) -> Vec<ProviderId> {
        self.ordered_entries(instance)
            .into_iter()
            .map(|(provider, _, _)| provider)
            .collect()
    }

    fn ordered_entries<'a>(&self, instance: &'a CoverageInstance) -> Vec<Entry<'a>> {
        // Entries arrive in ascending id order and the sorts are stable.
        let mut entries: Vec<Entry<'a>> = instance.provider_entries().collect();
        match self.order {
            GreedyOrder::Degree => {
                entries.sort_by_key(|(_, _, covered)| Reverse(covered.len()));
            }
            GreedyOrder::Cost => entries.sort_by_key(|(_, cost, _)| *cost),
            GreedyOrder::Ratio => {
                entries.retain(|(_, _, covered)| !covered.is_empty());
                entries.sort_by(|lhs, rhs| compare_ratio(*lhs, *rhs));
            }
        }
        entries
    }
}

/// Compare `cost / degree` exactly by cross-multiplying in `u128`.
fn compare_ratio(lhs: Entry<'_>, rhs: Entry<'_>) -> Ordering {
    let (_, lhs_cost, lhs_covered) = lhs;
    let (_, rhs_cost, rhs_covered) = rhs;
    let lhs_scaled = u128::from(lhs_cost) * rhs_covered.len() as u128;
    let rhs_scaled = u128::from(rhs_cost) * lhs_covered.len() as u128;
    lhs_scaled.cmp(&rhs_scaled)
}

impl CoverSolver for GreedySolver {
    fn name(&self) -> &'static str {
        match self.order {
            GreedyOrder::Degree => "greedy-degree",
            GreedyOrder::Cost => "greedy-cost",
            GreedyOrder::Ratio => "greedy-ratio",
        }
    }

    fn solve(
        &self,
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<Solution, SolveError> {
        instance.check_target(target)?;
        let order = self.ordered_entries(instance);
        debug!("{} visiting {} providers", self.name(), order.len());

        let mut residual = target.clone();
        let mut selected = BTreeSet::new();
        let mut cost: Cost = 0;
        for (provider, provider_cost, covered) in order {
            if residual.is_empty() {
                break;
            }
            let before = residual.len();
            residual.retain(|element| !covered.contains(element));
            if residual.len() < before {
                selected.insert(provider);
                cost = cost.saturating_add(provider_cost);
            }
        }

        let status = if residual.is_empty() {
            SolutionStatus::Feasible
        } else {
            warn!(
                "{} left {} target elements uncovered",
                self.name(),
                residual.len()
            );
            SolutionStatus::PartialCover {
                uncovered: residual,
            }
        };
        Ok(Solution::new(selected, cost, status))
    }
}
