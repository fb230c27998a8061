//! The boundary to external LP/MIP solvers.

use thiserror::Error;

use super::{LinearModel, VarId};

/// Errors reported by a [`ModelBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// No assignment satisfies the constraints.
    #[error("model is infeasible")]
    Infeasible,
    /// The objective can be improved without bound.
    #[error("model is unbounded")]
    Unbounded,
    /// The backend gave up before proving an optimum.
    #[error("backend timed out")]
    TimedOut,
    /// Any other backend failure.
    #[error("backend failed: {0}")]
    Failed(String),
}

/// Optimal variable values returned by a backend, one per declared variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
}

impl Assignment {
    /// Wrap values listed in variable declaration order.
    #[must_use]
    pub const fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Value of `var`, or `None` when the assignment is too short.
    #[must_use]
    pub fn value(&self, var: VarId) -> Option<f64> {
        self.values.get(var.index()).copied()
    }

    /// All values in declaration order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no variable is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Solves a [`LinearModel`] to optimality.
///
/// Any backend honouring variable domains, constraint comparisons and
/// objective sense is interchangeable. Implementations must be `Send + Sync`
/// so solvers holding them stay shareable across threads.
pub trait ModelBackend: Send + Sync {
    /// Solve `model`, returning one value per declared variable.
    ///
    /// # Errors
    /// Returns a [`BackendError`] describing why no optimum was produced.
    fn solve_model(&self, model: &LinearModel) -> Result<Assignment, BackendError>;
}

impl<B: ModelBackend + ?Sized> ModelBackend for &B {
    fn solve_model(&self, model: &LinearModel) -> Result<Assignment, BackendError> {
        (**self).solve_model(model)
    }
}
