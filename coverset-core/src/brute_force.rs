//! Exhaustive minimum-cost cover search.
//!
//! Every non-empty provider subset is enumerated in increasing size, so the
//! solver is only usable on small instances. It serves as the ground-truth
//! oracle the approximate solvers are measured against.

use std::collections::BTreeSet;

use itertools::Itertools;
use log::debug;

use crate::{
    CoverSolver, CoverageInstance, Cost, ElementId, ProviderId, Solution, SolutionStatus,
    SolveError,
};

/// Provider ceiling applied by [`BruteForceConfig::default`].
pub const DEFAULT_PROVIDER_LIMIT: usize = 24;

/// Configuration for [`BruteForceSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BruteForceConfig {
    /// Largest provider count the solver agrees to enumerate.
    pub provider_limit: usize,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self {
            provider_limit: DEFAULT_PROVIDER_LIMIT,
        }
    }
}

/// Exact solver enumerating all `2^n - 1` provider subsets.
///
/// [`CoverSolver::solve`] only enumerates providers that cover part of the
/// target, and the provider ceiling applies to those. [`Self::all_feasible`]
/// enumerates every provider. Providers are taken in ascending id order and subsets are visited by
/// size, then lexicographically. Only strictly cheaper covers replace the
/// incumbent, so the first cheapest subset found is returned.
///
/// # Examples
/// ```
/// use coverset_core::{BruteForceSolver, CoverSolver, CoverageInstance, ElementId, ProviderId};
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
/// let solution = BruteForceSolver::new().solve(&instance, instance.elements())?;
/// assert_eq!(solution.selected.into_iter().collect::<Vec<_>>(), vec![p2]);
/// assert_eq!(solution.cost, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct BruteForceSolver {
    config: BruteForceConfig,
}

/// A provider's cost and its coverage restricted to the target set.
type Candidate = (ProviderId, Cost, BTreeSet<ElementId>);

impl BruteForceSolver {
    /// Construct a solver with the default provider ceiling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: BruteForceConfig) -> Self {
        Self { config }
    }

    /// Every feasible subset, cheapest first.
    ///
    /// Equal-cost subsets keep enumeration order. Each entry is marked
    /// [`SolutionStatus::Feasible`]; an empty target yields the single empty
    /// selection.
    ///
    /// # Errors
    /// Returns [`SolveError::UnknownEntity`] for foreign target elements and
    /// [`SolveError::InstanceTooLarge`] when the instance has more providers
    /// than the ceiling.
    pub fn all_feasible(
        &self,
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<Vec<Solution>, SolveError> {
        instance.check_target(target)?;
        if target.is_empty() {
            return Ok(vec![Solution::empty(SolutionStatus::Feasible)]);
        }
        let candidates = self.candidates(instance, target)?;
        let mut feasible: Vec<Solution> = feasible_subsets(&candidates, target.len())
            .map(|(selected, cost)| Solution::new(selected, cost, SolutionStatus::Feasible))
            .collect();
        feasible.sort_by_key(|solution| solution.cost);
        debug!("brute force found {} feasible subsets", feasible.len());
        Ok(feasible)
    }

    fn candidates(
        &self,
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<Vec<Candidate>, SolveError> {
        let candidates: Vec<Candidate> = instance
            .provider_entries()
            .map(|(provider, cost, covered)| {
                (
                    provider,
                    cost,
                    covered.intersection(target).copied().collect(),
                )
            })
            .collect();
        self.check_limit(candidates.len())?;
        debug!(
            "brute force enumerating subsets of {} providers for {} target elements",
            candidates.len(),
            target.len()
        );
        Ok(candidates)
    }

    /// Candidates that cover at least one target element.
    ///
    /// A provider with no target coverage never belongs to a strictly
    /// cheapest cover, so the minimum search leaves it out of the `2^n`
    /// enumeration and out of the provider ceiling.
    fn useful_candidates(
        &self,
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<Vec<Candidate>, SolveError> {
        let candidates: Vec<Candidate> = instance
            .provider_entries()
            .filter_map(|(provider, cost, covered)| {
                let restricted: BTreeSet<ElementId> =
                    covered.intersection(target).copied().collect();
                (!restricted.is_empty()).then_some((provider, cost, restricted))
            })
            .collect();
        self.check_limit(candidates.len())?;
        debug!(
            "brute force enumerating subsets of {} of {} providers for {} target elements",
            candidates.len(),
            instance.provider_count(),
            target.len()
        );
        Ok(candidates)
    }

    const fn check_limit(&self, providers: usize) -> Result<(), SolveError> {
        if providers > self.config.provider_limit {
            return Err(SolveError::InstanceTooLarge {
                providers,
                limit: self.config.provider_limit,
            });
        }
        Ok(())
    }
}

/// Subsets whose restricted coverage reaches `target_len` elements.
fn feasible_subsets(
    candidates: &[Candidate],
    target_len: usize,
) -> impl Iterator<Item = (BTreeSet<ProviderId>, Cost)> + '_ {
    (1..=candidates.len())
        .flat_map(move |size| candidates.iter().combinations(size))
        .filter_map(move |subset| {
            let mut covered: BTreeSet<ElementId> = BTreeSet::new();
            for (_, _, restricted) in &subset {
                covered.extend(restricted.iter().copied());
            }
            (covered.len() == target_len).then(|| {
                let cost = subset
                    .iter()
                    .fold(0, |total: Cost, (_, cost, _)| total.saturating_add(*cost));
                let selected = subset.iter().map(|(provider, _, _)| *provider).collect();
                (selected, cost)
            })
        })
}

impl CoverSolver for BruteForceSolver {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn solve(
        &self,
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<Solution, SolveError> {
        instance.check_target(target)?;
        if target.is_empty() {
            return Ok(Solution::empty(SolutionStatus::Optimal));
        }
        let candidates = self.useful_candidates(instance, target)?;

        let mut best: Option<(BTreeSet<ProviderId>, Cost)> = None;
        for (selected, cost) in feasible_subsets(&candidates, target.len()) {
            if best.as_ref().is_none_or(|(_, incumbent)| cost < *incumbent) {
                best = Some((selected, cost));
            }
        }

        best.map(|(selected, cost)| Solution::new(selected, cost, SolutionStatus::Optimal))
            .ok_or(SolveError::Infeasible)
    }
}
