//! Storage bookkeeping over a head history.
//!
//! Each node is treated as a cell of area `dx * dy`:
//!
//! ```text
//! V(t)  = Σ S[i,j] h[t][i,j] dx dy
//! ΔV(t) = Σ S[i,j] (h[t] - h[t-1])[i,j] dx dy
//! ```
//!
//! With no-flow boundaries and no sources, ΔV stays at round-off level for
//! the implicit scheme.

use std::fmt;

use crate::error::Result;
use crate::field::{AquiferProperties, Field2D};

/// Water volume held in storage for one head field.
///
/// # Errors
///
/// Returns [`GroundwaterError::ShapeMismatch`](crate::GroundwaterError::ShapeMismatch)
/// if `head` does not match the property grid.
pub fn stored_volume(properties: &AquiferProperties, head: &Field2D) -> Result<f64> {
    let storage = properties.storage();
    head.ensure_shape(storage.shape())?;

    let weighted: f64 = storage
        .as_slice()
        .iter()
        .zip(head.as_slice())
        .map(|(s, h)| s * h)
        .sum();
    Ok(weighted * properties.grid().cell_area())
}

/// Change in stored volume from `previous` to `next`.
///
/// # Errors
///
/// Returns [`GroundwaterError::ShapeMismatch`](crate::GroundwaterError::ShapeMismatch)
/// on any shape mismatch.
pub fn storage_change(
    properties: &AquiferProperties,
    previous: &Field2D,
    next: &Field2D,
) -> Result<f64> {
    let delta = next.difference(previous)?;
    stored_volume(properties, &delta)
}

/// Stored volume and storage change for every entry of a history.
#[derive(Clone, Debug, PartialEq)]
pub struct WaterBalance {
    /// `volumes[t]` is the stored volume after `t` steps.
    pub volumes: Vec<f64>,
    /// `changes[t]` is the storage change during step `t + 1`.
    pub changes: Vec<f64>,
}

impl WaterBalance {
    /// Compute the balance over a history (entry 0 = initial head).
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::ShapeMismatch`](crate::GroundwaterError::ShapeMismatch)
    /// if any entry does not match the property grid.
    pub fn compute(properties: &AquiferProperties, history: &[Field2D]) -> Result<Self> {
        let volumes = history
            .iter()
            .map(|h| stored_volume(properties, h))
            .collect::<Result<Vec<_>>>()?;
        let changes = volumes.windows(2).map(|w| w[1] - w[0]).collect();
        Ok(Self { volumes, changes })
    }

    /// Net change between the first and last entries.
    pub fn net_change(&self) -> f64 {
        match (self.volumes.first(), self.volumes.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// Largest per-step storage change in magnitude.
    pub fn max_abs_change(&self) -> f64 {
        self.changes.iter().map(|c| c.abs()).fold(0.0, f64::max)
    }

    /// Net change relative to the initial volume.
    ///
    /// Returns the absolute change when the initial volume is zero.
    pub fn relative_change(&self) -> f64 {
        let initial = self.volumes.first().copied().unwrap_or(0.0);
        if initial.abs() > f64::EPSILON {
            self.net_change() / initial.abs()
        } else {
            self.net_change()
        }
    }
}

impl fmt::Display for WaterBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Water balance ({} steps)", self.changes.len())?;
        if let (Some(first), Some(last)) = (self.volumes.first(), self.volumes.last()) {
            writeln!(f, "  Initial volume: {:.6e}", first)?;
            writeln!(f, "  Final volume:   {:.6e}", last)?;
        }
        write!(f, "  Max |dV| per step: {:.3e}", self.max_abs_change())
    }
}
