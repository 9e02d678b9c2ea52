//! Aquifer properties: hydraulic conductivity K and storage coefficient S.

use super::Field2D;
use crate::error::{GroundwaterError, Result};
use crate::types::Grid2D;

/// A material property given either as a single value or as a full grid.
///
/// Uniform values are broadcast once, when [`AquiferProperties`] is built.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldInput {
    /// Same value at every node.
    Uniform(f64),
    /// One value per node, shape `(ny, nx)`.
    Grid(Field2D),
}

impl FieldInput {
    /// Resolve to a dense field on `grid`, checking shape and positivity.
    ///
    /// `name` is used in error messages.
    pub fn into_field(self, grid: &Grid2D, name: &str) -> Result<Field2D> {
        let field = match self {
            FieldInput::Uniform(value) => Field2D::filled_on(grid, value),
            FieldInput::Grid(field) => {
                if field.shape() != grid.shape() {
                    return Err(GroundwaterError::config(format!(
                        "{} field has shape {:?}, grid expects {:?}",
                        name,
                        field.shape(),
                        grid.shape()
                    )));
                }
                field
            }
        };

        if let Some(bad) = field
            .as_slice()
            .iter()
            .find(|v| !(v.is_finite() && **v > 0.0))
        {
            return Err(GroundwaterError::config(format!(
                "{} must be positive and finite everywhere, found {}",
                name, bad
            )));
        }
        Ok(field)
    }
}

impl From<f64> for FieldInput {
    fn from(value: f64) -> Self {
        FieldInput::Uniform(value)
    }
}

impl From<Field2D> for FieldInput {
    fn from(field: Field2D) -> Self {
        FieldInput::Grid(field)
    }
}

/// Inter-node conductance: arithmetic mean of the two K values over the squared spacing.
#[inline]
pub fn arithmetic_conductance(k_a: f64, k_b: f64, spacing: f64) -> f64 {
    0.5 * (k_a + k_b) / (spacing * spacing)
}

/// Dense conductivity and storage fields for one grid.
///
/// Both fields are validated (positive, finite, correct shape) at
/// construction and read-only afterwards.
///
/// # Example
///
/// ```
/// use gw_rs::field::{AquiferProperties, Field2D};
/// use gw_rs::types::Grid2D;
///
/// let grid = Grid2D::new(4.0, 3.0, 5, 4).unwrap();
/// let k = Field2D::from_fn(4, 5, |_, j| if j < 2 { 10.0 } else { 1.0 });
/// let props = AquiferProperties::new(&grid, k, 1e-3).unwrap();
///
/// assert_eq!(props.storage().get(2, 2), 1e-3);
/// assert_eq!(props.max_conductivity(), 10.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AquiferProperties {
    grid: Grid2D,
    conductivity: Field2D,
    storage: Field2D,
}

impl AquiferProperties {
    /// Build properties from uniform values or full grids.
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::Configuration`] for shape mismatches or
    /// non-positive values.
    pub fn new(
        grid: &Grid2D,
        conductivity: impl Into<FieldInput>,
        storage: impl Into<FieldInput>,
    ) -> Result<Self> {
        Ok(Self {
            grid: *grid,
            conductivity: conductivity.into().into_field(grid, "K")?,
            storage: storage.into().into_field(grid, "S")?,
        })
    }

    /// Grid these properties are defined on.
    #[inline]
    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }

    /// Hydraulic conductivity K.
    #[inline]
    pub fn conductivity(&self) -> &Field2D {
        &self.conductivity
    }

    /// Storage coefficient S.
    #[inline]
    pub fn storage(&self) -> &Field2D {
        &self.storage
    }

    /// Largest K in the domain.
    pub fn max_conductivity(&self) -> f64 {
        self.conductivity.max()
    }

    /// Smallest S in the domain.
    pub fn min_storage(&self) -> f64 {
        self.storage.min()
    }

    /// Conductance between nodes `(i, j)` and `(i, j + 1)`.
    #[inline]
    pub fn conductance_x(&self, i: usize, j: usize) -> f64 {
        arithmetic_conductance(
            self.conductivity.get(i, j),
            self.conductivity.get(i, j + 1),
            self.grid.dx(),
        )
    }

    /// Conductance between nodes `(i, j)` and `(i + 1, j)`.
    #[inline]
    pub fn conductance_y(&self, i: usize, j: usize) -> f64 {
        arithmetic_conductance(
            self.conductivity.get(i, j),
            self.conductivity.get(i + 1, j),
            self.grid.dy(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid2D {
        Grid2D::new(4.0, 3.0, 5, 4).unwrap()
    }

    #[test]
    fn test_uniform_broadcast() {
        let props = AquiferProperties::new(&grid(), 10.0, 0.001).unwrap();
        assert_eq!(props.conductivity().shape(), (4, 5));
        assert!(props.conductivity().as_slice().iter().all(|&k| k == 10.0));
        assert!(props.storage().as_slice().iter().all(|&s| s == 0.001));
    }

    #[test]
    fn test_arithmetic_mean_not_harmonic() {
        // K contrast of 1 : 9 across the first x-face
        let k = Field2D::from_fn(4, 5, |_, j| if j == 0 { 1.0 } else { 9.0 });
        let props = AquiferProperties::new(&grid(), k, 1.0).unwrap();

        // Arithmetic mean 5.0 (harmonic would be 1.8), dx = 1
        assert!((props.conductance_x(0, 0) - 5.0).abs() < 1e-12);
        assert!((props.conductance_x(0, 1) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_conductance_uses_squared_spacing() {
        let grid = Grid2D::new(4.0, 1.0, 3, 5).unwrap(); // dx = 2, dy = 0.25
        let props = AquiferProperties::new(&grid, 2.0, 1.0).unwrap();
        assert!((props.conductance_x(0, 0) - 0.5).abs() < 1e-12);
        assert!((props.conductance_y(0, 0) - 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        assert!(AquiferProperties::new(&grid(), 0.0, 1.0).is_err());
        assert!(AquiferProperties::new(&grid(), 1.0, -1.0).is_err());
        assert!(AquiferProperties::new(&grid(), f64::NAN, 1.0).is_err());

        let mut k = Field2D::filled(4, 5, 1.0);
        k.set(2, 2, 0.0);
        let err = AquiferProperties::new(&grid(), k, 1.0).unwrap_err();
        assert!(err.to_string().contains("K must be positive"));
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let k = Field2D::filled(5, 4, 1.0);
        let err = AquiferProperties::new(&grid(), k, 1.0).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_extremes() {
        let s = Field2D::from_fn(4, 5, |i, _| 1e-3 * (i + 1) as f64);
        let props = AquiferProperties::new(&grid(), 3.0, s).unwrap();
        assert_eq!(props.max_conductivity(), 3.0);
        assert_eq!(props.min_storage(), 1e-3);
    }
}
