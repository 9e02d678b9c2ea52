//! Single-edge boundary condition types.

use std::fmt;

/// Value attached to a boundary condition: one number for the whole edge or
/// one number per edge node.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeValue {
    /// Same value along the whole edge.
    Uniform(f64),
    /// One value per node along the edge (left/right: `ny`, bottom/top: `nx`).
    Profile(Vec<f64>),
}

impl EdgeValue {
    /// Value at `position` along the edge, `None` past the end of a profile.
    #[inline]
    pub fn at(&self, position: usize) -> Option<f64> {
        match self {
            EdgeValue::Uniform(v) => Some(*v),
            EdgeValue::Profile(values) => values.get(position).copied(),
        }
    }

    /// Number of values in a profile, `None` for a uniform value.
    pub fn profile_len(&self) -> Option<usize> {
        match self {
            EdgeValue::Uniform(_) => None,
            EdgeValue::Profile(values) => Some(values.len()),
        }
    }

    /// Whether every value is exactly zero.
    pub fn is_zero(&self) -> bool {
        match self {
            EdgeValue::Uniform(v) => *v == 0.0,
            EdgeValue::Profile(values) => values.iter().all(|&v| v == 0.0),
        }
    }

    /// Whether every value is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            EdgeValue::Uniform(v) => v.is_finite(),
            EdgeValue::Profile(values) => values.iter().all(|v| v.is_finite()),
        }
    }
}

impl Default for EdgeValue {
    fn default() -> Self {
        EdgeValue::Uniform(0.0)
    }
}

impl From<f64> for EdgeValue {
    fn from(value: f64) -> Self {
        EdgeValue::Uniform(value)
    }
}

impl From<Vec<f64>> for EdgeValue {
    fn from(values: Vec<f64>) -> Self {
        EdgeValue::Profile(values)
    }
}

impl From<&[f64]> for EdgeValue {
    fn from(values: &[f64]) -> Self {
        EdgeValue::Profile(values.to_vec())
    }
}

/// Boundary condition on one edge.
///
/// Only zero-flux Neumann conditions have defined behaviour. A non-zero
/// Neumann value is accepted but treated as no-flow; a warning is logged
/// when the owning [`BoundaryConditionSet`](super::BoundaryConditionSet)
/// is validated.
#[derive(Clone, Debug, PartialEq)]
pub enum BoundaryCondition {
    /// Fixed head.
    Dirichlet(EdgeValue),
    /// Fixed flux across the edge.
    Neumann(EdgeValue),
}

impl BoundaryCondition {
    /// Fixed-head condition.
    pub fn dirichlet(value: impl Into<EdgeValue>) -> Self {
        BoundaryCondition::Dirichlet(value.into())
    }

    /// Fixed-flux condition.
    pub fn neumann(value: impl Into<EdgeValue>) -> Self {
        BoundaryCondition::Neumann(value.into())
    }

    /// Zero-flux (no-flow) condition.
    pub fn no_flux() -> Self {
        BoundaryCondition::Neumann(EdgeValue::Uniform(0.0))
    }

    /// Whether this is a fixed-head condition.
    pub fn is_dirichlet(&self) -> bool {
        matches!(self, BoundaryCondition::Dirichlet(_))
    }

    /// The attached value.
    pub fn value(&self) -> &EdgeValue {
        match self {
            BoundaryCondition::Dirichlet(v) | BoundaryCondition::Neumann(v) => v,
        }
    }

    /// Fixed head at `position` along the edge, `None` for Neumann edges.
    #[inline]
    pub fn fixed_head(&self, position: usize) -> Option<f64> {
        match self {
            BoundaryCondition::Dirichlet(v) => v.at(position),
            BoundaryCondition::Neumann(_) => None,
        }
    }
}

impl Default for BoundaryCondition {
    fn default() -> Self {
        Self::no_flux()
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, value) = match self {
            BoundaryCondition::Dirichlet(v) => ("Dirichlet", v),
            BoundaryCondition::Neumann(v) => ("Neumann", v),
        };
        match value {
            EdgeValue::Uniform(v) => write!(f, "{}({})", kind, v),
            EdgeValue::Profile(values) => write!(f, "{}([{} values])", kind, values.len()),
        }
    }
}
