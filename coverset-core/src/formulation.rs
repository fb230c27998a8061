//! Building blocks shared by the model-based solvers.

use std::collections::{BTreeMap, BTreeSet};

use log::warn;

use crate::model::{Assignment, LinearExpr, LinearModel, VarDomain, VarId};
use crate::{CoverageInstance, Cost, ElementId, ProviderId, SolveError};

/// Selection threshold for binary variables read back from a backend.
const SELECTED: f64 = 0.5;

/// One decision variable per provider, in ascending provider order.
pub(crate) struct ProviderVars {
    entries: Vec<(ProviderId, Cost, VarId)>,
}

impl ProviderVars {
    pub(crate) fn declare(
        model: &mut LinearModel,
        instance: &CoverageInstance,
        domain: VarDomain,
    ) -> Self {
        let entries = instance
            .provider_entries()
            .map(|(provider, cost, _)| {
                let var = model.add_variable(format!("x_{provider}"), domain);
                (provider, cost, var)
            })
            .collect();
        Self { entries }
    }

    /// `sum(cost_p * x_p)`.
    #[expect(
        clippy::cast_precision_loss,
        reason = "LP objectives are floating point"
    )]
    pub(crate) fn cost_expr(&self) -> LinearExpr {
        self.entries
            .iter()
            .map(|(_, cost, var)| (*var, *cost as f64))
            .collect()
    }

    /// For each target element, the variables of providers covering it.
    pub(crate) fn covering_vars(
        &self,
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> BTreeMap<ElementId, Vec<VarId>> {
        let mut covering: BTreeMap<ElementId, Vec<VarId>> =
            target.iter().map(|element| (*element, Vec::new())).collect();
        for ((_, _, covered), (_, _, var)) in instance.provider_entries().zip(&self.entries) {
            for element in covered.intersection(target) {
                if let Some(vars) = covering.get_mut(element) {
                    vars.push(*var);
                }
            }
        }
        covering
    }

    /// Raw values per provider.
    pub(crate) fn values(&self, assignment: &Assignment) -> Vec<(ProviderId, f64)> {
        self.entries
            .iter()
            .map(|(provider, _, var)| (*provider, assignment.value(*var).unwrap_or(0.0)))
            .collect()
    }

    /// Providers whose binary variable is set.
    pub(crate) fn selected(&self, assignment: &Assignment) -> BTreeSet<ProviderId> {
        self.values(assignment)
            .into_iter()
            .filter(|(_, value)| *value >= SELECTED)
            .map(|(provider, _)| provider)
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Whether a binary indicator read back from a backend is set.
pub(crate) fn is_set(assignment: &Assignment, var: VarId) -> bool {
    assignment.value(var).is_some_and(|value| value >= SELECTED)
}

/// Sum of the listed variables with unit coefficients.
pub(crate) fn unit_sum(vars: &[VarId]) -> LinearExpr {
    vars.iter().map(|var| (*var, 1.0)).collect()
}

/// Fail with [`SolveError::Infeasible`] when a target element has no
/// covering provider.
pub(crate) fn ensure_coverable(
    covering: &BTreeMap<ElementId, Vec<VarId>>,
) -> Result<(), SolveError> {
    match covering.iter().find(|(_, vars)| vars.is_empty()) {
        Some((element, _)) => {
            warn!("target element {element} has no covering provider");
            Err(SolveError::Infeasible)
        }
        None => Ok(()),
    }
}
