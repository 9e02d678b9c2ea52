//! Time-step solvers for the transient groundwater flow equation.
//!
//! ```text
//! S ∂h/∂t = ∇·(K ∇h) + Q
//! ```
//!
//! # Submodules
//!
//! - [`implicit`]: backward Euler, one sparse direct solve per step
//! - [`explicit`]: forward Euler stencil update
//! - [`stability`]: stability bound for the explicit scheme
//!
//! Both schemes implement [`HeadStepper`], which advances a head field by
//! one step given the source slice for that step.

pub mod explicit;
pub mod implicit;
pub mod stability;

pub use explicit::ExplicitSolver;
pub use implicit::{ImplicitSolver, LinearSystem, TripletBuilder, solve_sparse};
pub use stability::{
    EXPLICIT_STABILITY_LIMIT, StabilityNumbers, StabilityWarning, check_explicit_stability,
};

use crate::boundary::BoundaryConditionSet;
use crate::error::{GroundwaterError, Result};
use crate::field::{AquiferProperties, Field2D};
use crate::types::Grid2D;

/// Read-only view of everything a step needs besides the head and source.
///
/// Only constructible through [`FlowSystem::new`], which checks that the
/// three parts describe the same grid.
#[derive(Clone, Copy, Debug)]
pub struct FlowSystem<'a> {
    pub(crate) grid: &'a Grid2D,
    pub(crate) properties: &'a AquiferProperties,
    pub(crate) boundaries: &'a BoundaryConditionSet,
}

impl<'a> FlowSystem<'a> {
    /// Bundle grid, properties and boundary conditions.
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::Configuration`] if the properties were
    /// built for a different grid or a boundary profile does not fit `grid`.
    pub fn new(
        grid: &'a Grid2D,
        properties: &'a AquiferProperties,
        boundaries: &'a BoundaryConditionSet,
    ) -> Result<Self> {
        if properties.grid() != grid {
            return Err(GroundwaterError::config(format!(
                "properties defined on {}, solver grid is {}",
                properties.grid(),
                grid
            )));
        }
        boundaries.validate(grid)?;
        Ok(Self::validated(grid, properties, boundaries))
    }

    /// Bundle parts that were already checked against each other.
    pub(crate) fn validated(
        grid: &'a Grid2D,
        properties: &'a AquiferProperties,
        boundaries: &'a BoundaryConditionSet,
    ) -> Self {
        Self {
            grid,
            properties,
            boundaries,
        }
    }

    /// Grid geometry.
    pub fn grid(&self) -> &'a Grid2D {
        self.grid
    }

    /// Conductivity and storage.
    pub fn properties(&self) -> &'a AquiferProperties {
        self.properties
    }

    /// Edge conditions.
    pub fn boundaries(&self) -> &'a BoundaryConditionSet {
        self.boundaries
    }
}

/// A scheme that advances the head field by one time step.
pub trait HeadStepper: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Time step size.
    fn dt(&self) -> f64;

    /// Compute the head after one step.
    ///
    /// # Arguments
    /// * `head` - Head at the start of the step (not modified)
    /// * `source` - Source slice for this step, `None` for zero
    /// * `step` - Zero-based step number, used in diagnostics
    fn step(&self, head: &Field2D, source: Option<&Field2D>, step: usize) -> Result<Field2D>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryCondition;

    #[test]
    fn test_rejects_short_profile() {
        let grid = Grid2D::new(4.0, 3.0, 5, 4).unwrap();
        let props = AquiferProperties::new(&grid, 1.0, 1.0).unwrap();
        let bcs = BoundaryConditionSet::no_flux()
            .with_left(BoundaryCondition::dirichlet(vec![1.0, 2.0]));

        let err = FlowSystem::new(&grid, &props, &bcs).unwrap_err();
        assert!(matches!(err, GroundwaterError::Configuration(_)));
    }

    #[test]
    fn test_rejects_properties_on_other_grid() {
        let grid = Grid2D::new(4.0, 3.0, 5, 4).unwrap();
        let other = Grid2D::new(4.0, 3.0, 4, 5).unwrap();
        let props = AquiferProperties::new(&other, 1.0, 1.0).unwrap();
        let bcs = BoundaryConditionSet::no_flux();

        let err = FlowSystem::new(&grid, &props, &bcs).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_accessors() {
        let grid = Grid2D::new(4.0, 3.0, 5, 4).unwrap();
        let props = AquiferProperties::new(&grid, 2.0, 1.0).unwrap();
        let bcs = BoundaryConditionSet::no_flux().with_top(BoundaryCondition::dirichlet(1.0));

        let system = FlowSystem::new(&grid, &props, &bcs).unwrap();
        assert_eq!(system.grid(), &grid);
        assert_eq!(system.properties().max_conductivity(), 2.0);
        assert!(system.boundaries().has_dirichlet());
    }
}
