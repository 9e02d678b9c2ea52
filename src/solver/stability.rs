//! Stability diagnostics for the explicit scheme.
//!
//! The forward Euler update of the diffusion equation is stable when
//!
//! ```text
//! α_x + α_y ≤ 1/2,   α_x = max(K) dt / (min(S) dx²),   α_y = max(K) dt / (min(S) dy²)
//! ```
//!
//! Exceeding the bound is advisory: the run continues and a
//! [`StabilityWarning`] is logged and returned with the results.

use std::fmt;

use crate::field::AquiferProperties;
use crate::types::Grid2D;

/// Upper bound on `α_x + α_y` for the explicit scheme.
pub const EXPLICIT_STABILITY_LIMIT: f64 = 0.5;

/// Diffusion numbers of the explicit scheme in each direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityNumbers {
    /// `max(K) dt / (min(S) dx²)`
    pub alpha_x: f64,
    /// `max(K) dt / (min(S) dy²)`
    pub alpha_y: f64,
}

impl StabilityNumbers {
    /// Compute the diffusion numbers for a timestep.
    pub fn compute(grid: &Grid2D, properties: &AquiferProperties, dt: f64) -> Self {
        let diffusivity = properties.max_conductivity() / properties.min_storage();
        let dx = grid.dx();
        let dy = grid.dy();
        Self {
            alpha_x: diffusivity * dt / (dx * dx),
            alpha_y: diffusivity * dt / (dy * dy),
        }
    }

    /// `α_x + α_y`.
    #[inline]
    pub fn total(&self) -> f64 {
        self.alpha_x + self.alpha_y
    }

    /// Whether the bound holds.
    #[inline]
    pub fn is_stable(&self) -> bool {
        self.total() <= EXPLICIT_STABILITY_LIMIT
    }

    /// Largest timestep that satisfies the bound.
    pub fn max_stable_dt(grid: &Grid2D, properties: &AquiferProperties) -> f64 {
        let per_unit_dt = Self::compute(grid, properties, 1.0).total();
        EXPLICIT_STABILITY_LIMIT / per_unit_dt
    }
}

/// Advisory notices raised while stepping. None of these stop a run.
#[derive(Debug, Clone, PartialEq)]
pub enum StabilityWarning {
    /// Explicit scheme timestep exceeds the stability bound.
    ExplicitCriterion {
        alpha_x: f64,
        alpha_y: f64,
        limit: f64,
    },
    /// Head contains NaN or infinite values after a step.
    NonFiniteHead { step: usize, count: usize },
}

impl fmt::Display for StabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitCriterion {
                alpha_x,
                alpha_y,
                limit,
            } => write!(
                f,
                "Explicit scheme may be unstable: alpha_x + alpha_y = {:.4} + {:.4} = {:.4} > {}",
                alpha_x,
                alpha_y,
                alpha_x + alpha_y,
                limit
            ),
            Self::NonFiniteHead { step, count } => {
                write!(f, "{} non-finite head values after step {}", count, step)
            }
        }
    }
}

/// Check the explicit bound for `dt`, logging and returning a warning when exceeded.
///
/// # Example
///
/// ```
/// use gw_rs::field::AquiferProperties;
/// use gw_rs::solver::check_explicit_stability;
/// use gw_rs::types::Grid2D;
///
/// let grid = Grid2D::new(10.0, 10.0, 11, 11).unwrap();
/// let props = AquiferProperties::new(&grid, 1.0, 1.0).unwrap();
///
/// assert!(check_explicit_stability(&grid, &props, 0.2).is_none());
/// assert!(check_explicit_stability(&grid, &props, 0.3).is_some());
/// ```
pub fn check_explicit_stability(
    grid: &Grid2D,
    properties: &AquiferProperties,
    dt: f64,
) -> Option<StabilityWarning> {
    let numbers = StabilityNumbers::compute(grid, properties, dt);
    if numbers.is_stable() {
        return None;
    }
    let warning = StabilityWarning::ExplicitCriterion {
        alpha_x: numbers.alpha_x,
        alpha_y: numbers.alpha_y,
        limit: EXPLICIT_STABILITY_LIMIT,
    };
    log::warn!(
        "{} (max stable dt = {:.3e})",
        warning,
        StabilityNumbers::max_stable_dt(grid, properties)
    );
    Some(warning)
}
