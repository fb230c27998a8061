//! Tests for the `GoodLpBackend`.

use super::*;
use rstest::{fixture, rstest};

const TOLERANCE: f64 = 1e-6;

#[fixture]
fn backend() -> GoodLpBackend {
    GoodLpBackend::new()
}

#[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
fn close(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|value| (value - expected).abs() < TOLERANCE)
}

#[rstest]
fn continuous_relaxation_reaches_fractional_optimum(backend: GoodLpBackend) {
    let mut model = LinearModel::new("fractional", Sense::Minimise);
    let x = model.add_variable(
        "x",
        VarDomain::Continuous {
            lower: 0.0,
            upper: 1.0,
        },
    );
    let y = model.add_variable(
        "y",
        VarDomain::Continuous {
            lower: 0.0,
            upper: 1.0,
        },
    );
    model.set_objective(LinearExpr::new().with_term(x, 1.0).with_term(y, 1.0));
    model.add_constraint(
        LinearExpr::new().with_term(x, 1.0).with_term(y, 1.0),
        Comparison::GreaterEq,
        1.5,
    );

    let assignment = backend.solve_model(&model).expect("feasible model");
    assert!(close(Some(model.evaluate(&assignment)), 1.5));
}

#[rstest]
fn maximise_respects_upper_constraint(backend: GoodLpBackend) {
    let mut model = LinearModel::new("cap", Sense::Maximise);
    let x = model.add_variable(
        "x",
        VarDomain::Continuous {
            lower: 0.0,
            upper: 10.0,
        },
    );
    model.set_objective(LinearExpr::new().with_term(x, 1.0));
    model.add_constraint(LinearExpr::new().with_term(x, 1.0), Comparison::LessEq, 0.75);

    let assignment = backend.solve_model(&model).expect("feasible model");
    assert!(close(assignment.value(x), 0.75));
}

#[rstest]
fn integer_domain_rounds_up_to_whole_values(backend: GoodLpBackend) {
    let mut model = LinearModel::new("integral", Sense::Minimise);
    let y = model.add_variable("y", VarDomain::Integer { lower: 0, upper: 5 });
    model.set_objective(LinearExpr::new().with_term(y, 1.0));
    model.add_constraint(LinearExpr::new().with_term(y, 1.0), Comparison::GreaterEq, 1.5);

    let assignment = backend.solve_model(&model).expect("feasible model");
    assert!(close(assignment.value(y), 2.0));
}

#[rstest]
fn equality_constraints_bind(backend: GoodLpBackend) {
    let mut model = LinearModel::new("balance", Sense::Minimise);
    let a = model.add_variable("a", VarDomain::Binary);
    let b = model.add_variable("b", VarDomain::Binary);
    let count = model.add_variable("count", VarDomain::Integer { lower: 0, upper: 2 });
    model.set_objective(LinearExpr::new().with_term(a, 1.0).with_term(b, 3.0));
    model.add_constraint(
        LinearExpr::new()
            .with_term(count, 1.0)
            .with_term(a, -1.0)
            .with_term(b, -1.0),
        Comparison::Equal,
        0.0,
    );
    model.add_constraint(LinearExpr::new().with_term(count, 1.0), Comparison::GreaterEq, 2.0);

    let assignment = backend.solve_model(&model).expect("feasible model");
    assert!(close(assignment.value(a), 1.0));
    assert!(close(assignment.value(b), 1.0));
    assert!(close(Some(model.evaluate(&assignment)), 4.0));
}

#[rstest]
fn infeasible_models_are_reported(backend: GoodLpBackend) {
    let mut model = LinearModel::new("impossible", Sense::Minimise);
    let x = model.add_variable("x", VarDomain::Binary);
    model.add_constraint(LinearExpr::new().with_term(x, 1.0), Comparison::GreaterEq, 2.0);

    let err = backend.solve_model(&model).expect_err("x cannot reach 2");
    assert_eq!(err, BackendError::Infeasible);
}

#[rstest]
fn unbounded_models_are_reported(backend: GoodLpBackend) {
    let mut model = LinearModel::new("open", Sense::Maximise);
    let x = model.add_variable(
        "x",
        VarDomain::Continuous {
            lower: 0.0,
            upper: f64::INFINITY,
        },
    );
    model.set_objective(LinearExpr::new().with_term(x, 1.0));

    let err = backend.solve_model(&model).expect_err("x grows without bound");
    assert_eq!(err, BackendError::Unbounded);
}

#[rstest]
fn foreign_variables_are_rejected(backend: GoodLpBackend) {
    let mut other = LinearModel::new("other", Sense::Minimise);
    let _ = other.add_variable("a", VarDomain::Binary);
    let foreign = other.add_variable("b", VarDomain::Binary);

    let mut model = LinearModel::new("small", Sense::Minimise);
    let _ = model.add_variable("only", VarDomain::Binary);
    model.set_objective(LinearExpr::new().with_term(foreign, 1.0));

    let err = backend.solve_model(&model).expect_err("x1 is undeclared");
    assert!(matches!(err, BackendError::Failed(_)));
}
