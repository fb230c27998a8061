//! Exact weighted set cover as a binary integer program.

use std::collections::BTreeSet;

use log::debug;

use crate::formulation::{ProviderVars, ensure_coverable, unit_sum};
use crate::model::{Comparison, LinearModel, ModelBackend, Sense, VarDomain};
use crate::{CoverSolver, CoverageInstance, ElementId, Solution, SolutionStatus, SolveError};

/// Exact solver delegating the set-cover ILP to a [`ModelBackend`].
///
/// The model has one binary per provider, minimises total cost and requires
/// every target element to be covered at least once. Unlike
/// [`BruteForceSolver`](crate::BruteForceSolver) it has no provider ceiling,
/// so it is the exact baseline for larger instances.
#[derive(Debug, Clone)]
pub struct ExactIlpSolver<B> {
    backend: B,
}

impl<B: ModelBackend> ExactIlpSolver<B> {
    /// Construct a solver over `backend`.
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Build the ILP for `target`, failing fast on uncoverable elements.
    ///
    /// # Errors
    /// Returns [`SolveError::UnknownEntity`] for foreign target elements and
    /// [`SolveError::Infeasible`] when an element has no covering provider.
    pub fn formulate(
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<LinearModel, SolveError> {
        Ok(Self::build(instance, target)?.0)
    }

    fn build(
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<(LinearModel, ProviderVars), SolveError> {
        instance.check_target(target)?;
        let mut model = LinearModel::new("set-cover", Sense::Minimise);
        let providers = ProviderVars::declare(&mut model, instance, VarDomain::Binary);
        let covering = providers.covering_vars(instance, target);
        ensure_coverable(&covering)?;
        model.set_objective(providers.cost_expr());
        for vars in covering.values() {
            model.add_constraint(unit_sum(vars), Comparison::GreaterEq, 1.0);
        }
        Ok((model, providers))
    }
}

impl<B: ModelBackend> CoverSolver for ExactIlpSolver<B> {
    fn name(&self) -> &'static str {
        "ilp"
    }

    fn solve(
        &self,
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<Solution, SolveError> {
        if target.is_empty() {
            instance.check_target(target)?;
            return Ok(Solution::empty(SolutionStatus::Optimal));
        }
        let (model, providers) = Self::build(instance, target)?;
        debug!(
            "solving set-cover ILP with {} variables and {} constraints",
            model.variables().len(),
            model.constraints().len()
        );
        let assignment = self.backend.solve_model(&model)?;
        let selected = providers.selected(&assignment);
        let cost = instance.total_cost(&selected)?;
        Ok(Solution::new(selected, cost, SolutionStatus::Optimal))
    }
}
