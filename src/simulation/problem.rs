//! Problem definition for a transient run: grid, properties, timestep,
//! initial head, boundary conditions and sources.

use std::fmt;
use std::str::FromStr;

use crate::boundary::BoundaryConditionSet;
use crate::error::{GroundwaterError, Result};
use crate::field::{AquiferProperties, Field2D};
use crate::solver::FlowSystem;
use crate::source::SourceTerm;
use crate::types::Grid2D;

/// Time integration scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Method {
    /// Backward Euler with a sparse direct solve. Unconditionally stable.
    #[default]
    Implicit,
    /// Forward Euler stencil update. Conditionally stable.
    Explicit,
}

impl Method {
    /// Lower-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Method::Implicit => "implicit",
            Method::Explicit => "explicit",
        }
    }
}

impl FromStr for Method {
    type Err = GroundwaterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "implicit" => Ok(Method::Implicit),
            "explicit" => Ok(Method::Explicit),
            other => Err(GroundwaterError::InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything that defines a transient solve.
///
/// All inputs are validated by [`TransientProblem::new`] and the `with_*`
/// setters, so a constructed problem is always runnable.
///
/// # Example
///
/// ```
/// use gw_rs::boundary::{BoundaryCondition, BoundaryConditionSet};
/// use gw_rs::field::{AquiferProperties, Field2D};
/// use gw_rs::simulation::TransientProblem;
/// use gw_rs::types::Grid2D;
///
/// let grid = Grid2D::new(4.0, 3.0, 5, 4).unwrap();
/// let props = AquiferProperties::new(&grid, 10.0, 0.001).unwrap();
/// let problem = TransientProblem::new(props, 1.0, 10, Field2D::filled_on(&grid, 15.0))
///     .unwrap()
///     .with_boundary_conditions(
///         BoundaryConditionSet::no_flux()
///             .with_left(BoundaryCondition::dirichlet(20.0))
///             .with_right(BoundaryCondition::dirichlet(10.0)),
///     )
///     .unwrap();
///
/// assert_eq!(problem.nt(), 10);
/// ```
#[derive(Clone, Debug)]
pub struct TransientProblem {
    grid: Grid2D,
    properties: AquiferProperties,
    dt: f64,
    nt: usize,
    initial_head: Field2D,
    boundaries: BoundaryConditionSet,
    source: SourceTerm,
}

impl TransientProblem {
    /// Create a problem with no-flow boundaries and no source.
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::Configuration`] if `dt` is not a positive
    /// finite number, `nt == 0`, or the initial head does not match the grid
    /// or contains non-finite values.
    pub fn new(
        properties: AquiferProperties,
        dt: f64,
        nt: usize,
        initial_head: Field2D,
    ) -> Result<Self> {
        let grid = *properties.grid();
        if !(dt.is_finite() && dt > 0.0) {
            return Err(GroundwaterError::config(format!(
                "dt must be positive, got {}",
                dt
            )));
        }
        if nt < 1 {
            return Err(GroundwaterError::config("nt must be >= 1, got 0"));
        }
        if initial_head.shape() != grid.shape() {
            return Err(GroundwaterError::config(format!(
                "initial head has shape {:?}, grid expects {:?}",
                initial_head.shape(),
                grid.shape()
            )));
        }
        if !initial_head.all_finite() {
            return Err(GroundwaterError::config(
                "initial head contains non-finite values",
            ));
        }

        Ok(Self {
            grid,
            properties,
            dt,
            nt,
            initial_head,
            boundaries: BoundaryConditionSet::default(),
            source: SourceTerm::None,
        })
    }

    /// Set the boundary conditions.
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::Configuration`] if a profile does not fit
    /// the grid.
    pub fn with_boundary_conditions(mut self, boundaries: BoundaryConditionSet) -> Result<Self> {
        boundaries.validate(&self.grid)?;
        self.boundaries = boundaries;
        Ok(self)
    }

    /// Set the source term.
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::Configuration`] for wrong shapes or a
    /// time series shorter than `nt`.
    pub fn with_source(mut self, source: impl Into<SourceTerm>) -> Result<Self> {
        let source = source.into();
        source.validate(&self.grid, self.nt)?;
        self.source = source;
        Ok(self)
    }

    /// Grid geometry.
    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }

    /// Conductivity and storage.
    pub fn properties(&self) -> &AquiferProperties {
        &self.properties
    }

    /// Timestep.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of steps.
    pub fn nt(&self) -> usize {
        self.nt
    }

    /// Initial head.
    pub fn initial_head(&self) -> &Field2D {
        &self.initial_head
    }

    /// Boundary conditions.
    pub fn boundaries(&self) -> &BoundaryConditionSet {
        &self.boundaries
    }

    /// Source term.
    pub fn source(&self) -> &SourceTerm {
        &self.source
    }

    /// Borrowed view for the step solvers.
    pub fn flow_system(&self) -> FlowSystem<'_> {
        FlowSystem::validated(&self.grid, &self.properties, &self.boundaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryCondition;

    fn props() -> AquiferProperties {
        let grid = Grid2D::new(4.0, 3.0, 5, 4).unwrap();
        AquiferProperties::new(&grid, 1.0, 1.0).unwrap()
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("implicit".parse::<Method>().unwrap(), Method::Implicit);
        assert_eq!("explicit".parse::<Method>().unwrap(), Method::Explicit);
        assert_eq!(Method::default(), Method::Implicit);

        let err = "crank-nicolson".parse::<Method>().unwrap_err();
        assert_eq!(err, GroundwaterError::InvalidMethod("crank-nicolson".into()));
        assert!("Implicit".parse::<Method>().is_err());
    }

    #[test]
    fn test_method_display_round_trip() {
        for method in [Method::Implicit, Method::Explicit] {
            assert_eq!(method.to_string().parse::<Method>().unwrap(), method);
        }
    }

    #[test]
    fn test_rejects_bad_timestep() {
        let h0 = Field2D::zeros(4, 5);
        assert!(TransientProblem::new(props(), 0.0, 10, h0.clone()).is_err());
        assert!(TransientProblem::new(props(), -1.0, 10, h0.clone()).is_err());
        assert!(TransientProblem::new(props(), f64::INFINITY, 10, h0.clone()).is_err());
        assert!(TransientProblem::new(props(), 1.0, 0, h0).is_err());
    }

    #[test]
    fn test_rejects_initial_head_shape() {
        let err = TransientProblem::new(props(), 1.0, 1, Field2D::zeros(5, 4)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_builder_validates_inputs() {
        let problem = TransientProblem::new(props(), 1.0, 3, Field2D::zeros(4, 5)).unwrap();

        let bad_bcs = BoundaryConditionSet::no_flux()
            .with_top(BoundaryCondition::dirichlet(vec![1.0; 4]));
        assert!(problem.clone().with_boundary_conditions(bad_bcs).is_err());

        let short_series = vec![Field2D::zeros(4, 5); 2];
        assert!(problem.clone().with_source(short_series).is_err());

        let ok = problem.with_source(Field2D::zeros(4, 5)).unwrap();
        assert!(matches!(ok.source(), SourceTerm::Constant(_)));
    }
}
