//! Per-edge values with named fields.
//!
//! Provides a fixed four-slot container for anything specified per domain
//! edge, so callers never rely on array index conventions.

use std::fmt;

use super::Grid2D;

/// One of the four edges of a rectangular grid.
///
/// Orientation follows the row-major field layout:
/// - `Left`: column `j = 0`
/// - `Right`: column `j = nx - 1`
/// - `Bottom`: row `i = 0`
/// - `Top`: row `i = ny - 1`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

impl Edge {
    /// Order in which edges claim corner nodes: left/right before bottom/top.
    pub const RESOLUTION_ORDER: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Bottom, Edge::Top];

    /// Lower-case name of the edge.
    pub fn name(self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
            Edge::Top => "top",
        }
    }

    /// Number of grid nodes along this edge.
    #[inline]
    pub fn node_count(self, grid: &Grid2D) -> usize {
        match self {
            Edge::Left | Edge::Right => grid.ny(),
            Edge::Bottom | Edge::Top => grid.nx(),
        }
    }

    /// Whether node `(i, j)` lies on this edge.
    #[inline]
    pub fn contains(self, grid: &Grid2D, i: usize, j: usize) -> bool {
        match self {
            Edge::Left => j == 0,
            Edge::Right => j == grid.nx() - 1,
            Edge::Bottom => i == 0,
            Edge::Top => i == grid.ny() - 1,
        }
    }

    /// Position of node `(i, j)` along this edge (row for left/right, column for bottom/top).
    #[inline]
    pub fn position(self, i: usize, j: usize) -> usize {
        match self {
            Edge::Left | Edge::Right => i,
            Edge::Bottom | Edge::Top => j,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Values with one named field per grid edge.
///
/// # Example
///
/// ```
/// use gw_rs::types::{Edge, SideBoundaries};
///
/// let sides = SideBoundaries::new(1, 2, 3, 4);
/// assert_eq!(sides.left, 1);
/// assert_eq!(*sides.get(Edge::Top), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideBoundaries<T> {
    /// Left edge (x = 0)
    pub left: T,
    /// Right edge (x = Lx)
    pub right: T,
    /// Bottom edge (y = 0)
    pub bottom: T,
    /// Top edge (y = Ly)
    pub top: T,
}

impl<T> SideBoundaries<T> {
    /// Create with explicit values. Order: left, right, bottom, top.
    pub fn new(left: T, right: T, bottom: T, top: T) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Create with the same value on all edges.
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            left: value.clone(),
            right: value.clone(),
            bottom: value.clone(),
            top: value,
        }
    }

    /// Value for an edge.
    pub fn get(&self, edge: Edge) -> &T {
        match edge {
            Edge::Left => &self.left,
            Edge::Right => &self.right,
            Edge::Bottom => &self.bottom,
            Edge::Top => &self.top,
        }
    }

    /// Mutable value for an edge.
    pub fn get_mut(&mut self, edge: Edge) -> &mut T {
        match edge {
            Edge::Left => &mut self.left,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
            Edge::Top => &mut self.top,
        }
    }

    /// Iterate over `(edge, value)` in resolution order: left, right, bottom, top.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, &T)> {
        Edge::RESOLUTION_ORDER
            .into_iter()
            .map(move |edge| (edge, self.get(edge)))
    }
}

impl<T: Default> Default for SideBoundaries<T> {
    fn default() -> Self {
        Self {
            left: T::default(),
            right: T::default(),
            bottom: T::default(),
            top: T::default(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for SideBoundaries<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L:{} R:{} B:{} T:{}",
            self.left, self.right, self.bottom, self.top
        )
    }
}
