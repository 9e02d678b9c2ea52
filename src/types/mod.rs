//! Grid geometry and per-edge containers.
//!
//! # Example
//!
//! ```
//! use gw_rs::types::{Edge, Grid2D, SideBoundaries};
//!
//! let grid = Grid2D::new(100.0, 50.0, 101, 51).unwrap();
//! assert_eq!(grid.shape(), (51, 101));
//!
//! let widths = SideBoundaries::uniform(1.0);
//! assert_eq!(*widths.get(Edge::Left), 1.0);
//! ```

mod grid;
mod sides;

pub use grid::Grid2D;
pub use sides::{Edge, SideBoundaries};
