//! Time-stepping driver for transient groundwater flow.
//!
//! This module ties together:
//! - A [`TransientProblem`] (grid, K, S, initial head, boundaries, sources)
//! - A [`Method`] selecting the implicit or explicit stepper
//! - Run controls ([`SimulationConfig`]) and step callbacks
//!
//! [`solve_2d_transient`] is the one-call entry point that builds all of
//! the above from plain arguments.
//!
//! # Example
//! ```
//! use gw_rs::boundary::{BoundaryCondition, BoundaryConditionSet};
//! use gw_rs::field::Field2D;
//! use gw_rs::simulation::{Method, solve_2d_transient};
//! use gw_rs::source::SourceTerm;
//!
//! let bcs = BoundaryConditionSet::no_flux()
//!     .with_left(BoundaryCondition::dirichlet(20.0))
//!     .with_right(BoundaryCondition::dirichlet(10.0));
//!
//! let history = solve_2d_transient(
//!     10.0, 0.001,          // K, S
//!     4.0, 3.0, 5, 4,       // Lx, Ly, nx, ny
//!     1.0, 10,              // dt, nt
//!     Field2D::filled(4, 5, 15.0),
//!     bcs,
//!     SourceTerm::None,
//!     Method::Implicit,
//! )
//! .unwrap();
//!
//! assert_eq!(history.len(), 11);
//! ```

mod history;
mod problem;
mod runner;

pub use history::HeadHistory;
pub use problem::{Method, TransientProblem};
pub use runner::{SimulationConfig, SimulationResult, TransientSimulation};

use crate::boundary::BoundaryConditionSet;
use crate::error::Result;
use crate::field::{AquiferProperties, Field2D, FieldInput};
use crate::source::SourceTerm;
use crate::types::Grid2D;

/// Solve the transient 2D groundwater flow equation on a rectangle.
///
/// `k` and `s` may be scalars or full `(ny, nx)` fields. Returns `nt + 1`
/// head fields; entry 0 is `initial_head`.
///
/// # Errors
///
/// - [`Configuration`](crate::GroundwaterError::Configuration) for invalid
///   grid, timestep, field or boundary input, before any step runs
/// - [`LinearSystem`](crate::GroundwaterError::LinearSystem) if an implicit
///   solve fails
#[allow(clippy::too_many_arguments)]
pub fn solve_2d_transient(
    k: impl Into<FieldInput>,
    s: impl Into<FieldInput>,
    lx: f64,
    ly: f64,
    nx: usize,
    ny: usize,
    dt: f64,
    nt: usize,
    initial_head: Field2D,
    boundary_conditions: BoundaryConditionSet,
    source: SourceTerm,
    method: Method,
) -> Result<HeadHistory> {
    let grid = Grid2D::new(lx, ly, nx, ny)?;
    let properties = AquiferProperties::new(&grid, k, s)?;
    let problem = TransientProblem::new(properties, dt, nt, initial_head)?
        .with_boundary_conditions(boundary_conditions)?
        .with_source(source)?;

    let result = TransientSimulation::new(&problem, method).run()?;
    Ok(result.history)
}
