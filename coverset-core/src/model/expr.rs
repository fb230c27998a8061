//! Linear expressions over model variables.

use std::fmt;

use super::Assignment;

/// Handle to a variable declared in a [`LinearModel`](super::LinearModel).
///
/// Handles are dense indices in declaration order, so backends can map them
/// onto their own variable vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the variable in declaration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A sum of weighted variables plus a constant.
///
/// # Examples
/// ```
/// use coverset_core::model::{LinearExpr, LinearModel, Sense, VarDomain};
///
/// let mut model = LinearModel::new("demo", Sense::Minimise);
/// let x = model.add_variable("x", VarDomain::Binary);
/// let expr = LinearExpr::constant(1.0).with_term(x, 2.0);
/// assert_eq!(expr.terms(), &[(x, 2.0)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    /// The zero expression.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An expression holding only `value`.
    #[must_use]
    pub const fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// Append `coefficient * var` and return the expression.
    #[must_use]
    pub fn with_term(mut self, var: VarId, coefficient: f64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    /// Append `coefficient * var` in place.
    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    /// Weighted terms in insertion order. A variable may appear twice.
    #[must_use]
    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    /// The constant offset.
    #[must_use]
    pub const fn constant_value(&self) -> f64 {
        self.constant
    }

    /// Value of the expression under `assignment`.
    ///
    /// Variables missing from the assignment count as zero.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "linear expressions are evaluated in floating point"
    )]
    pub fn evaluate(&self, assignment: &Assignment) -> f64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, (var, coefficient)| {
                acc + coefficient * assignment.value(*var).unwrap_or(0.0)
            })
    }
}

impl FromIterator<(VarId, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
            constant: 0.0,
        }
    }
}
