//! Cost versus uncoverage as one penalised mixed-integer program.
//!
//! For every target element `e` the model carries an integer count
//! `y_e = sum(x_p : p covers e)` and a binary indicator `q_e` tied to it by
//! the big-M pair `y_e <= M(1 - q_e)` and `y_e >= 1 - q_e`, with `M` the
//! provider count. `q_e` is therefore one exactly when `e` is left uncovered,
//! and the objective `sum(c_p x_p) + lambda * sum(q_e)` prices each such
//! element at `lambda`.

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::formulation::{ProviderVars, is_set, unit_sum};
use crate::model::{Comparison, LinearExpr, LinearModel, ModelBackend, Sense, VarDomain, VarId};
use crate::{
    CoverSolver, CoverageInstance, ElementId, Solution, SolutionStatus, SolveError,
    TradeoffSolution,
};

/// Configuration for [`TradeoffFormulator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeoffConfig {
    /// Penalty per uncovered target element.
    pub lambda: f64,
}

impl Default for TradeoffConfig {
    fn default() -> Self {
        Self { lambda: 1.0 }
    }
}

/// Solver for the penalised cost/uncoverage model.
///
/// Small `lambda` favours buying nothing; as `lambda` grows past every
/// provider cost the optimum converges on the exact set cover.
#[derive(Debug, Clone)]
pub struct TradeoffFormulator<B> {
    backend: B,
    config: TradeoffConfig,
}

struct TradeoffModel {
    model: LinearModel,
    providers: ProviderVars,
    indicators: Vec<(ElementId, VarId)>,
}

impl<B: ModelBackend> TradeoffFormulator<B> {
    /// Construct a formulator with the default penalty.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, TradeoffConfig::default())
    }

    /// Construct a formulator with explicit configuration.
    pub const fn with_config(backend: B, config: TradeoffConfig) -> Self {
        Self { backend, config }
    }

    /// Build the penalised model for `target` and `lambda`.
    ///
    /// # Errors
    /// Returns [`SolveError::InvalidParameter`] for a negative or non-finite
    /// `lambda` and [`SolveError::UnknownEntity`] for foreign target
    /// elements.
    pub fn formulate(
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
        lambda: f64,
    ) -> Result<LinearModel, SolveError> {
        validate_lambda(lambda)?;
        instance.check_target(target)?;
        Ok(Self::build(instance, target, lambda).model)
    }

    /// Solve the penalised model with an explicit `lambda`.
    ///
    /// `lambda == 0` returns the empty selection without consulting the
    /// backend: buying nothing is then always optimal.
    ///
    /// # Errors
    /// Returns [`SolveError::InvalidParameter`] for a negative or non-finite
    /// `lambda`, [`SolveError::UnknownEntity`] for foreign target elements,
    /// and backend failures as [`SolveError::Backend`].
    pub fn solve_tradeoff(
        &self,
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
        lambda: f64,
    ) -> Result<TradeoffSolution, SolveError> {
        validate_lambda(lambda)?;
        instance.check_target(target)?;
        if lambda <= 0.0 || target.is_empty() {
            if !target.is_empty() {
                warn!("zero uncoverage penalty: selecting no providers");
            }
            return Ok(TradeoffSolution {
                solution: Solution::empty(SolutionStatus::Tradeoff),
                uncovered: target.clone(),
                objective: 0.0,
            });
        }

        let TradeoffModel {
            model,
            providers,
            indicators,
        } = Self::build(instance, target, lambda);
        debug!(
            "solving tradeoff model with lambda {lambda}: {} variables, {} constraints",
            model.variables().len(),
            model.constraints().len()
        );
        let assignment = self.backend.solve_model(&model)?;

        let selected = providers.selected(&assignment);
        let cost = instance.total_cost(&selected)?;
        let uncovered = indicators
            .iter()
            .filter(|(_, indicator)| is_set(&assignment, *indicator))
            .map(|(element, _)| *element)
            .collect();
        Ok(TradeoffSolution {
            solution: Solution::new(selected, cost, SolutionStatus::Tradeoff),
            uncovered,
            objective: model.evaluate(&assignment),
        })
    }

    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        reason = "provider counts are far below the f64 and i64 limits"
    )]
    fn build(
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
        lambda: f64,
    ) -> TradeoffModel {
        let mut model = LinearModel::new("coverage-tradeoff", Sense::Minimise);
        let providers = ProviderVars::declare(&mut model, instance, VarDomain::Binary);
        let big_m = providers.len();
        let covering = providers.covering_vars(instance, target);

        let mut objective = providers.cost_expr();
        let mut indicators = Vec::with_capacity(covering.len());
        for (element, vars) in &covering {
            let count = model.add_variable(
                format!("y_{element}"),
                VarDomain::Integer {
                    lower: 0,
                    upper: big_m as i64,
                },
            );
            let indicator = model.add_variable(format!("q_{element}"), VarDomain::Binary);

            let mut balance = LinearExpr::new().with_term(count, 1.0);
            for var in vars {
                balance.add_term(*var, -1.0);
            }
            model.add_constraint(balance, Comparison::Equal, 0.0);
            model.add_constraint(
                LinearExpr::new()
                    .with_term(count, 1.0)
                    .with_term(indicator, big_m as f64),
                Comparison::LessEq,
                big_m as f64,
            );
            model.add_constraint(
                unit_sum(&[count, indicator]),
                Comparison::GreaterEq,
                1.0,
            );

            objective.add_term(indicator, lambda);
            indicators.push((*element, indicator));
        }
        model.set_objective(objective);

        TradeoffModel {
            model,
            providers,
            indicators,
        }
    }
}

fn validate_lambda(lambda: f64) -> Result<(), SolveError> {
    if lambda.is_finite() && lambda >= 0.0 {
        Ok(())
    } else {
        Err(SolveError::InvalidParameter {
            name: "lambda",
            reason: format!("expected a finite non-negative penalty, got {lambda}"),
        })
    }
}

impl<B: ModelBackend> CoverSolver for TradeoffFormulator<B> {
    fn name(&self) -> &'static str {
        "tradeoff"
    }

    fn solve(
        &self,
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<Solution, SolveError> {
        self.solve_tradeoff(instance, target, self.config.lambda)
            .map(|tradeoff| tradeoff.solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assignment, BackendError};
    use crate::test_support::{FailingBackend, FixedAssignmentBackend, e, p, two_provider_instance};
    use rstest::rstest;

    #[rstest]
    fn zero_lambda_selects_nothing_without_backend() {
        let instance = two_provider_instance();
        let formulator = TradeoffFormulator::new(FailingBackend::new(BackendError::TimedOut));
        let result = formulator
            .solve_tradeoff(&instance, instance.elements(), 0.0)
            .expect("short-circuits");
        assert!(result.solution.selected.is_empty());
        assert_eq!(result.solution.cost, 0);
        assert_eq!(&result.uncovered, instance.elements());
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_invalid_lambda(#[case] lambda: f64) {
        let instance = two_provider_instance();
        let formulator = TradeoffFormulator::new(FailingBackend::new(BackendError::TimedOut));
        let err = formulator
            .solve_tradeoff(&instance, instance.elements(), lambda)
            .expect_err("invalid lambda");
        assert!(matches!(
            err,
            SolveError::InvalidParameter { name: "lambda", .. }
        ));
    }

    #[rstest]
    fn model_shape_matches_big_m_formulation() {
        let instance = two_provider_instance();
        let model = TradeoffFormulator::<FailingBackend>::formulate(
            &instance,
            instance.elements(),
            2.0,
        )
        .expect("valid lambda");
        // two providers, plus a count and an indicator per element
        assert_eq!(model.variables().len(), 6);
        assert_eq!(model.constraints().len(), 6);
        let count_bounds = model.variables().get(2).map(|var| var.domain);
        assert_eq!(
            count_bounds,
            Some(VarDomain::Integer {
                lower: 0,
                upper: 2
            })
        );
    }

    #[rstest]
    #[expect(clippy::float_cmp, reason = "objective is an exact small integer sum")]
    fn extracts_selection_indicators_and_objective() {
        let instance = two_provider_instance();
        // x1, x2, y_e1, q_e1, y_e2, q_e2
        let backend = FixedAssignmentBackend::new(Assignment::from_values(vec![
            1.0, 0.0, 1.0, 0.0, 0.0, 1.0,
        ]));
        let result = TradeoffFormulator::new(backend)
            .solve_tradeoff(&instance, instance.elements(), 3.0)
            .expect("backend answers");
        assert_eq!(result.solution.selected, BTreeSet::from([p(1)]));
        assert_eq!(result.solution.cost, 1);
        assert_eq!(result.uncovered, BTreeSet::from([e(2)]));
        assert_eq!(result.objective, 4.0);
    }
}
