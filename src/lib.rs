//! # gw-rs
//!
//! A finite-difference solver for transient two-dimensional groundwater flow:
//!
//! ```text
//! S ∂h/∂t = ∇·(K ∇h) + Q
//! ```
//!
//! on a rectangular, node-centred grid with heterogeneous conductivity `K`
//! and specific storage `S`.
//!
//! This crate provides:
//! - Grid geometry and row-major head fields
//! - Per-edge Dirichlet / no-flow boundary conditions
//! - Constant or time-varying source terms
//! - Implicit (backward Euler, sparse LU) and explicit (forward Euler) steppers
//! - A time-stepping driver with run limits and step callbacks
//! - Drawdown and water-balance post-processing
//!
//! # Example
//!
//! ```
//! use gw_rs::{BoundaryCondition, BoundaryConditionSet, Field2D, Method, SourceTerm};
//! use gw_rs::{compute_drawdown, solve_2d_transient};
//!
//! let h0 = Field2D::filled(4, 5, 15.0);
//! let bcs = BoundaryConditionSet::no_flux()
//!     .with_left(BoundaryCondition::dirichlet(20.0))
//!     .with_right(BoundaryCondition::dirichlet(10.0));
//!
//! let history = solve_2d_transient(
//!     10.0, 0.001, 4.0, 3.0, 5, 4, 1.0, 10, h0.clone(), bcs, SourceTerm::None, Method::Implicit,
//! )
//! .unwrap();
//!
//! let drawdown = compute_drawdown(&history, &h0).unwrap();
//! assert_eq!(drawdown.len(), 11);
//! ```

pub mod analysis;
pub mod boundary;
pub mod error;
pub mod field;
pub mod simulation;
pub mod solver;
pub mod source;
pub mod types;

// Re-export main types for convenience
pub use analysis::{WaterBalance, compute_drawdown};
pub use boundary::{BoundaryCondition, BoundaryConditionSet, EdgeValue};
pub use error::{GroundwaterError, Result};
pub use field::{AquiferProperties, Field2D, FieldInput};
pub use simulation::{
    HeadHistory, Method, SimulationConfig, SimulationResult, TransientProblem,
    TransientSimulation, solve_2d_transient,
};
pub use solver::{
    ExplicitSolver, FlowSystem, HeadStepper, ImplicitSolver, StabilityNumbers, StabilityWarning,
    check_explicit_stability,
};
pub use source::SourceTerm;
pub use types::{Edge, Grid2D, SideBoundaries};
