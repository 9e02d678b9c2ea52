//! Boundary conditions for the groundwater flow equation.
//!
//! Each of the four grid edges carries either a fixed head (Dirichlet) or a
//! fixed flux (Neumann). The set resolves, for any node on the outer ring,
//! whether its equation is replaced by a fixed head.
//!
//! | Condition | Implicit scheme | Explicit scheme |
//! |-----------|-----------------|-----------------|
//! | `Dirichlet(v)` | Row becomes `h = v` | Node set to `v` after the stencil pass |
//! | `Neumann(0)` | Row keeps only existing neighbours | Stencil keeps only existing neighbours |
//!
//! # Limitations
//!
//! Non-zero Neumann values (specified inflow/outflow) are carried by the
//! types but have no flux-injection formula; they behave as no-flow and a
//! warning is logged during validation.

mod condition;
mod set;

pub use condition::{BoundaryCondition, EdgeValue};
pub use set::BoundaryConditionSet;
