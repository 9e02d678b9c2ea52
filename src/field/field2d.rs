//! Dense 2D scalar field on a structured grid.

use std::ops::{Index, IndexMut};

use crate::error::{GroundwaterError, Result};
use crate::types::Grid2D;

/// Dense `ny × nx` field stored row-major.
///
/// Used for head, conductivity, storage and source values. Layout:
/// `data[i * nx + j]` for row `i` (y direction) and column `j` (x direction).
#[derive(Clone, Debug, PartialEq)]
pub struct Field2D {
    data: Vec<f64>,
    ny: usize,
    nx: usize,
}

impl Field2D {
    /// Zero field of shape `(ny, nx)`.
    pub fn zeros(ny: usize, nx: usize) -> Self {
        Self::filled(ny, nx, 0.0)
    }

    /// Constant field of shape `(ny, nx)`.
    pub fn filled(ny: usize, nx: usize, value: f64) -> Self {
        Self {
            data: vec![value; ny * nx],
            ny,
            nx,
        }
    }

    /// Zero field matching a grid.
    pub fn zeros_on(grid: &Grid2D) -> Self {
        Self::zeros(grid.ny(), grid.nx())
    }

    /// Constant field matching a grid.
    pub fn filled_on(grid: &Grid2D, value: f64) -> Self {
        Self::filled(grid.ny(), grid.nx(), value)
    }

    /// Build a field from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::Configuration`] if `data.len() != ny * nx`.
    pub fn from_vec(ny: usize, nx: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != ny * nx {
            return Err(GroundwaterError::config(format!(
                "expected {} values for a {}x{} field, got {}",
                ny * nx,
                ny,
                nx,
                data.len()
            )));
        }
        Ok(Self { data, ny, nx })
    }

    /// Build a field from nested rows (`rows[i][j]`).
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::ShapeMismatch`] if rows are ragged.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let ny = rows.len();
        let nx = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != nx) {
            return Err(GroundwaterError::ShapeMismatch {
                expected: (ny, nx),
                actual: (ny, bad.len()),
            });
        }
        Ok(Self {
            data: rows.concat(),
            ny,
            nx,
        })
    }

    /// Initialize a field from a function of `(i, j)`.
    pub fn from_fn<F>(ny: usize, nx: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(ny * nx);
        for i in 0..ny {
            for j in 0..nx {
                data.push(f(i, j));
            }
        }
        Self { data, ny, nx }
    }

    /// Initialize a field from a function of physical coordinates `(x, y)`.
    pub fn from_coordinates<F>(grid: &Grid2D, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        Self::from_fn(grid.ny(), grid.nx(), |i, j| f(grid.x(j), grid.y(i)))
    }

    /// Shape as `(ny, nx)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Number of rows.
    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of columns.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Total number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.nx + j]
    }

    /// Set the value at `(i, j)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.nx + j] = value;
    }

    /// Row-major values.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable row-major values.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the field, returning its row-major values.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Values of row `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.nx;
        &self.data[start..start + self.nx]
    }

    /// Values of column `j`, copied.
    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.ny).map(|i| self.get(i, j)).collect()
    }

    /// Minimum value.
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Maximum value.
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Arithmetic mean of all values.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Whether every value is finite.
    pub fn all_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Check that this field has shape `(ny, nx)`.
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::ShapeMismatch`] otherwise.
    pub fn ensure_shape(&self, expected: (usize, usize)) -> Result<()> {
        if self.shape() != expected {
            return Err(GroundwaterError::ShapeMismatch {
                expected,
                actual: self.shape(),
            });
        }
        Ok(())
    }

    /// Elementwise `self - other`.
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::ShapeMismatch`] if shapes differ.
    pub fn difference(&self, other: &Field2D) -> Result<Field2D> {
        other.ensure_shape(self.shape())?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a - b)
            .collect();
        Ok(Self {
            data,
            ny: self.ny,
            nx: self.nx,
        })
    }

    /// Largest absolute elementwise difference to another field of the same shape.
    pub fn max_abs_diff(&self, other: &Field2D) -> Result<f64> {
        other.ensure_shape(self.shape())?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max))
    }
}

impl Index<(usize, usize)> for Field2D {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.nx + j]
    }
}

impl IndexMut<(usize, usize)> for Field2D {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.nx + j]
    }
}
