//! Solver-agnostic description of linear and mixed-integer programs.
//!
//! Formulations in this crate build a [`LinearModel`] and hand it to a
//! [`ModelBackend`]; the backend returns an [`Assignment`] or a
//! [`BackendError`]. Swapping LP/MIP engines therefore never touches the
//! formulation code.

mod backend;
mod expr;

pub use backend::{Assignment, BackendError, ModelBackend};
pub use expr::{LinearExpr, VarId};

/// Domain of a model variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarDomain {
    /// Real-valued within `[lower, upper]`.
    Continuous {
        /// Inclusive lower bound.
        lower: f64,
        /// Inclusive upper bound.
        upper: f64,
    },
    /// Either zero or one.
    Binary,
    /// Whole numbers within `[lower, upper]`.
    Integer {
        /// Inclusive lower bound.
        lower: i64,
        /// Inclusive upper bound.
        upper: i64,
    },
}

/// A declared variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Human-readable name, used in backend diagnostics.
    pub name: String,
    /// Allowed values.
    pub domain: VarDomain,
}

/// Relation between a constraint's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `expr <= rhs`.
    LessEq,
    /// `expr >= rhs`.
    GreaterEq,
    /// `expr == rhs`.
    Equal,
}

/// Direction of optimisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Minimise the objective.
    Minimise,
    /// Maximise the objective.
    Maximise,
}

/// A linear constraint `expr <cmp> rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Relation to the right-hand side.
    pub comparison: Comparison,
    /// Right-hand side constant.
    pub rhs: f64,
}

/// Variables, a linear objective and linear constraints.
///
/// # Examples
/// ```
/// use coverset_core::model::{Assignment, Comparison, LinearExpr, LinearModel, Sense, VarDomain};
///
/// let mut model = LinearModel::new("cover", Sense::Minimise);
/// let x = model.add_variable("x", VarDomain::Binary);
/// let y = model.add_variable("y", VarDomain::Binary);
/// model.set_objective(LinearExpr::new().with_term(x, 3.0).with_term(y, 2.0));
/// model.add_constraint(LinearExpr::new().with_term(x, 1.0).with_term(y, 1.0), Comparison::GreaterEq, 1.0);
///
/// let assignment = Assignment::from_values(vec![0.0, 1.0]);
/// assert_eq!(model.evaluate(&assignment), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    name: String,
    variables: Vec<Variable>,
    objective: LinearExpr,
    sense: Sense,
    constraints: Vec<Constraint>,
}

impl LinearModel {
    /// Start an empty model with a zero objective.
    #[must_use]
    pub fn new(name: impl Into<String>, sense: Sense) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            objective: LinearExpr::new(),
            sense,
            constraints: Vec::new(),
        }
    }

    /// Declare a variable and return its handle.
    pub fn add_variable(&mut self, name: impl Into<String>, domain: VarDomain) -> VarId {
        let id = VarId::new(self.variables.len());
        self.variables.push(Variable {
            name: name.into(),
            domain,
        });
        id
    }

    /// Replace the objective.
    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Append the constraint `expr <comparison> rhs`.
    pub fn add_constraint(&mut self, expr: LinearExpr, comparison: Comparison, rhs: f64) {
        self.constraints.push(Constraint {
            expr,
            comparison,
            rhs,
        });
    }

    /// Model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared variables; a [`VarId`] indexes into this slice.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The objective expression.
    #[must_use]
    pub const fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Direction of optimisation.
    #[must_use]
    pub const fn sense(&self) -> Sense {
        self.sense
    }

    /// Declared constraints.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Objective value of `assignment`.
    #[must_use]
    pub fn evaluate(&self, assignment: &Assignment) -> f64 {
        self.objective.evaluate(assignment)
    }
}
