//! Boundary condition set for the four grid edges and the per-node resolver.

use super::BoundaryCondition;
use crate::error::{GroundwaterError, Result};
use crate::field::Field2D;
use crate::types::{Edge, Grid2D, SideBoundaries};

/// Boundary conditions for all four edges.
///
/// Edges that are never set default to no-flow (`Neumann(0)`).
///
/// # Corner precedence
///
/// A corner node belongs to two edges. [`resolve`](Self::resolve) checks
/// edges in the order left, right, bottom, top and returns the first
/// Dirichlet match, so left/right values win over bottom/top values.
///
/// # Example
///
/// ```
/// use gw_rs::boundary::{BoundaryCondition, BoundaryConditionSet};
/// use gw_rs::types::Grid2D;
///
/// let grid = Grid2D::new(4.0, 3.0, 5, 4).unwrap();
/// let bcs = BoundaryConditionSet::no_flux()
///     .with_left(BoundaryCondition::dirichlet(20.0))
///     .with_bottom(BoundaryCondition::dirichlet(5.0));
///
/// assert_eq!(bcs.resolve(&grid, 0, 0), Some(20.0)); // corner: left wins
/// assert_eq!(bcs.resolve(&grid, 0, 2), Some(5.0));
/// assert_eq!(bcs.resolve(&grid, 2, 4), None);       // right edge is no-flow
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundaryConditionSet {
    edges: SideBoundaries<BoundaryCondition>,
}

impl BoundaryConditionSet {
    /// All four edges no-flow.
    pub fn no_flux() -> Self {
        Self::default()
    }

    /// Build from explicit per-edge conditions.
    pub fn new(edges: SideBoundaries<BoundaryCondition>) -> Self {
        Self { edges }
    }

    /// Replace the condition on one edge.
    pub fn with_edge(mut self, edge: Edge, condition: BoundaryCondition) -> Self {
        *self.edges.get_mut(edge) = condition;
        self
    }

    /// Set the left edge (column `j = 0`).
    pub fn with_left(self, condition: BoundaryCondition) -> Self {
        self.with_edge(Edge::Left, condition)
    }

    /// Set the right edge (column `j = nx - 1`).
    pub fn with_right(self, condition: BoundaryCondition) -> Self {
        self.with_edge(Edge::Right, condition)
    }

    /// Set the bottom edge (row `i = 0`).
    pub fn with_bottom(self, condition: BoundaryCondition) -> Self {
        self.with_edge(Edge::Bottom, condition)
    }

    /// Set the top edge (row `i = ny - 1`).
    pub fn with_top(self, condition: BoundaryCondition) -> Self {
        self.with_edge(Edge::Top, condition)
    }

    /// Condition on one edge.
    pub fn edge(&self, edge: Edge) -> &BoundaryCondition {
        self.edges.get(edge)
    }

    /// All edge conditions.
    pub fn edges(&self) -> &SideBoundaries<BoundaryCondition> {
        &self.edges
    }

    /// Whether any edge carries a fixed head.
    pub fn has_dirichlet(&self) -> bool {
        self.edges.iter().any(|(_, bc)| bc.is_dirichlet())
    }

    /// Check profile lengths and values against `grid`.
    ///
    /// Non-zero Neumann values are not an error; they are logged and treated
    /// as no-flow.
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::Configuration`] if a profile length does
    /// not match the edge node count or a value is not finite.
    pub fn validate(&self, grid: &Grid2D) -> Result<()> {
        for (edge, bc) in self.edges.iter() {
            let value = bc.value();
            if let Some(len) = value.profile_len() {
                let expected = edge.node_count(grid);
                if len != expected {
                    return Err(GroundwaterError::config(format!(
                        "{} boundary profile has {} values, edge has {} nodes",
                        edge, len, expected
                    )));
                }
            }
            if !value.is_finite() {
                return Err(GroundwaterError::config(format!(
                    "{} boundary value must be finite",
                    edge
                )));
            }
            if !bc.is_dirichlet() && !value.is_zero() {
                log::warn!(
                    "{} boundary: non-zero Neumann flux is not supported, treating as no-flow",
                    edge
                );
            }
        }
        Ok(())
    }

    /// Fixed head for node `(i, j)`, or `None` if no Dirichlet edge owns it.
    ///
    /// Interior nodes always resolve to `None`.
    #[inline]
    pub fn resolve(&self, grid: &Grid2D, i: usize, j: usize) -> Option<f64> {
        if !grid.is_boundary(i, j) {
            return None;
        }
        Edge::RESOLUTION_ORDER.into_iter().find_map(|edge| {
            if edge.contains(grid, i, j) {
                self.edges.get(edge).fixed_head(edge.position(i, j))
            } else {
                None
            }
        })
    }

    /// Overwrite every Dirichlet node of `head` with its fixed value.
    pub fn apply_dirichlet(&self, grid: &Grid2D, head: &mut Field2D) {
        if !self.has_dirichlet() {
            return;
        }
        let (ny, nx) = grid.shape();
        for i in 0..ny {
            for j in 0..nx {
                if !grid.is_boundary(i, j) {
                    continue;
                }
                if let Some(value) = self.resolve(grid, i, j) {
                    head.set(i, j, value);
                }
            }
        }
    }
}

impl From<SideBoundaries<BoundaryCondition>> for BoundaryConditionSet {
    fn from(edges: SideBoundaries<BoundaryCondition>) -> Self {
        Self::new(edges)
    }
}
