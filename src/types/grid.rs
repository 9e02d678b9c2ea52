//! Structured 2D grid geometry.

use std::fmt;

use crate::error::{GroundwaterError, Result};

/// Node-centred structured grid over a rectangle `[0, lx] × [0, ly]`.
///
/// Nodes sit on both domain edges, so the spacing is `lx / (nx - 1)` and
/// `ly / (ny - 1)`. Fields on the grid are stored row-major with shape
/// `(ny, nx)`: row `i` runs along y, column `j` along x, and the flat node
/// index is `i * nx + j`.
///
/// # Example
///
/// ```
/// use gw_rs::types::Grid2D;
///
/// let grid = Grid2D::new(4.0, 3.0, 5, 4).unwrap();
/// assert_eq!(grid.dx(), 1.0);
/// assert_eq!(grid.dy(), 1.0);
/// assert_eq!(grid.n_nodes(), 20);
/// assert_eq!(grid.node_index(2, 3), 13);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid2D {
    lx: f64,
    ly: f64,
    nx: usize,
    ny: usize,
}

impl Grid2D {
    /// Create a grid, validating extents and node counts.
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::Configuration`] if `nx < 2`, `ny < 2`,
    /// or either extent is not a positive finite number.
    pub fn new(lx: f64, ly: f64, nx: usize, ny: usize) -> Result<Self> {
        if nx < 2 {
            return Err(GroundwaterError::config(format!(
                "nx must be >= 2, got {}",
                nx
            )));
        }
        if ny < 2 {
            return Err(GroundwaterError::config(format!(
                "ny must be >= 2, got {}",
                ny
            )));
        }
        if !(lx.is_finite() && lx > 0.0) {
            return Err(GroundwaterError::config(format!(
                "Lx must be positive, got {}",
                lx
            )));
        }
        if !(ly.is_finite() && ly > 0.0) {
            return Err(GroundwaterError::config(format!(
                "Ly must be positive, got {}",
                ly
            )));
        }
        Ok(Self { lx, ly, nx, ny })
    }

    /// Physical extent in x.
    #[inline]
    pub fn lx(&self) -> f64 {
        self.lx
    }

    /// Physical extent in y.
    #[inline]
    pub fn ly(&self) -> f64 {
        self.ly
    }

    /// Number of nodes in x (columns).
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of nodes in y (rows).
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Node spacing in x.
    #[inline]
    pub fn dx(&self) -> f64 {
        self.lx / (self.nx - 1) as f64
    }

    /// Node spacing in y.
    #[inline]
    pub fn dy(&self) -> f64 {
        self.ly / (self.ny - 1) as f64
    }

    /// Total number of nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nx * self.ny
    }

    /// Field shape as `(ny, nx)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Flat row-major index of node `(i, j)`.
    #[inline]
    pub fn node_index(&self, i: usize, j: usize) -> usize {
        i * self.nx + j
    }

    /// Whether `(i, j)` lies on the outer ring of the grid.
    #[inline]
    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i == self.ny - 1 || j == self.nx - 1
    }

    /// x-coordinate of column `j`.
    #[inline]
    pub fn x(&self, j: usize) -> f64 {
        j as f64 * self.dx()
    }

    /// y-coordinate of row `i`.
    #[inline]
    pub fn y(&self, i: usize) -> f64 {
        i as f64 * self.dy()
    }

    /// Area represented by a single node (`dx * dy`).
    #[inline]
    pub fn cell_area(&self) -> f64 {
        self.dx() * self.dy()
    }
}

impl fmt::Display for Grid2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}×{} nodes over {}×{} (dx={:.4}, dy={:.4})",
            self.nx,
            self.ny,
            self.lx,
            self.ly,
            self.dx(),
            self.dy()
        )
    }
}
