//! `GoodLpBackend` implementation backed by `good_lp` and `microlp`.

use std::time::Instant;

use coverset_core::model::{
    Assignment, BackendError, Comparison, LinearExpr, LinearModel, ModelBackend, Sense, VarDomain,
    Variable as ModelVariable,
};
use good_lp::{
    Constraint, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable,
    VariableDefinition, microlp, variable,
};

/// Solves [`LinearModel`]s with the `microlp` engine through `good_lp`.
///
/// The backend is stateless; one value can serve any number of solves.
///
/// # Examples
/// ```
/// use coverset_core::model::{Comparison, LinearExpr, LinearModel, ModelBackend, Sense, VarDomain};
/// use coverset_solver_lp::GoodLpBackend;
///
/// # fn main() -> Result<(), coverset_core::model::BackendError> {
/// let mut model = LinearModel::new("pick-one", Sense::Minimise);
/// let x = model.add_variable("x", VarDomain::Binary);
/// let y = model.add_variable("y", VarDomain::Binary);
/// model.set_objective(LinearExpr::new().with_term(x, 3.0).with_term(y, 2.0));
/// model.add_constraint(
///     LinearExpr::new().with_term(x, 1.0).with_term(y, 1.0),
///     Comparison::GreaterEq,
///     1.0,
/// );
///
/// let assignment = GoodLpBackend::new().solve_model(&model)?;
/// assert!(assignment.value(y).is_some_and(|value| value > 0.5));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpBackend;

impl GoodLpBackend {
    /// Construct the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ModelBackend for GoodLpBackend {
    fn solve_model(&self, model: &LinearModel) -> Result<Assignment, BackendError> {
        let started_at = Instant::now();
        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = model
            .variables()
            .iter()
            .map(|definition| vars.add(variable_definition(definition)))
            .collect();

        let objective = expression(model.objective(), &handles)?;
        let unsolved = match model.sense() {
            Sense::Minimise => vars.minimise(objective),
            Sense::Maximise => vars.maximise(objective),
        };
        let mut problem = unsolved.using(microlp);
        for constraint in model.constraints() {
            let lhs = expression(&constraint.expr, &handles)?;
            problem = problem.with(compare(lhs, constraint.comparison, constraint.rhs));
        }

        let solution = problem.solve().map_err(backend_error)?;
        log::debug!(
            "microlp solved `{}` ({} variables, {} constraints) in {:?}",
            model.name(),
            handles.len(),
            model.constraints().len(),
            started_at.elapsed()
        );
        Ok(Assignment::from_values(
            handles.iter().map(|handle| solution.value(*handle)).collect(),
        ))
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integer bounds in set-cover models are small"
)]
fn variable_definition(definition: &ModelVariable) -> VariableDefinition {
    let named = variable().name(definition.name.clone());
    match definition.domain {
        VarDomain::Continuous { lower, upper } => named.min(lower).max(upper),
        VarDomain::Binary => named.binary(),
        VarDomain::Integer { lower, upper } => {
            named.integer().min(lower as f64).max(upper as f64)
        }
    }
}

fn expression(expr: &LinearExpr, handles: &[Variable]) -> Result<Expression, BackendError> {
    let mut translated = Expression::from(expr.constant_value());
    for (var, coefficient) in expr.terms() {
        let handle = handles.get(var.index()).ok_or_else(|| {
            BackendError::Failed(format!("expression references undeclared variable {var}"))
        })?;
        translated.add_mul(*coefficient, *handle);
    }
    Ok(translated)
}

fn compare(lhs: Expression, comparison: Comparison, rhs: f64) -> Constraint {
    match comparison {
        Comparison::LessEq => lhs.leq(rhs),
        Comparison::GreaterEq => lhs.geq(rhs),
        Comparison::Equal => lhs.eq(rhs),
    }
}

fn backend_error(err: ResolutionError) -> BackendError {
    match err {
        ResolutionError::Infeasible => BackendError::Infeasible,
        ResolutionError::Unbounded => BackendError::Unbounded,
        other => BackendError::Failed(other.to_string()),
    }
}

#[cfg(test)]
mod tests;
