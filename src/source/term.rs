//! Volumetric source/sink term Q.

use crate::error::{GroundwaterError, Result};
use crate::field::Field2D;
use crate::types::Grid2D;

/// Source term Q in `S ∂h/∂t = ∇·(K∇h) + Q`.
///
/// Positive values recharge the aquifer, negative values are pumping.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SourceTerm {
    /// Zero everywhere, every step.
    #[default]
    None,
    /// Same field for every step.
    Constant(Field2D),
    /// One field per step; entry `t` is used for step `t`.
    TimeVarying(Vec<Field2D>),
}

impl SourceTerm {
    /// Field to use for step `step`, or `None` for a zero source.
    ///
    /// A time series with no entry for `step` also yields `None`;
    /// [`validate`](Self::validate) rejects series shorter than the run.
    #[inline]
    pub fn slice(&self, step: usize) -> Option<&Field2D> {
        match self {
            SourceTerm::None => None,
            SourceTerm::Constant(field) => Some(field),
            SourceTerm::TimeVarying(fields) => fields.get(step),
        }
    }

    /// Check shapes against `grid` and the time series length against `nt`.
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::Configuration`] for a wrong shape, a
    /// series with fewer than `nt` entries, or non-finite values.
    pub fn validate(&self, grid: &Grid2D, nt: usize) -> Result<()> {
        let fields: &[Field2D] = match self {
            SourceTerm::None => &[],
            SourceTerm::Constant(field) => std::slice::from_ref(field),
            SourceTerm::TimeVarying(fields) => {
                if fields.len() < nt {
                    return Err(GroundwaterError::config(format!(
                        "time-varying source has {} fields, need at least nt = {}",
                        fields.len(),
                        nt
                    )));
                }
                fields
            }
        };

        for (t, field) in fields.iter().enumerate() {
            if field.shape() != grid.shape() {
                return Err(GroundwaterError::config(format!(
                    "source field {} has shape {:?}, grid expects {:?}",
                    t,
                    field.shape(),
                    grid.shape()
                )));
            }
            if !field.all_finite() {
                return Err(GroundwaterError::config(format!(
                    "source field {} contains non-finite values",
                    t
                )));
            }
        }
        Ok(())
    }

    /// Whether this source is identically absent.
    pub fn is_none(&self) -> bool {
        matches!(self, SourceTerm::None)
    }
}

impl From<Field2D> for SourceTerm {
    fn from(field: Field2D) -> Self {
        SourceTerm::Constant(field)
    }
}

impl From<Vec<Field2D>> for SourceTerm {
    fn from(fields: Vec<Field2D>) -> Self {
        SourceTerm::TimeVarying(fields)
    }
}

impl From<Option<Field2D>> for SourceTerm {
    fn from(field: Option<Field2D>) -> Self {
        field.map_or(SourceTerm::None, SourceTerm::Constant)
    }
}
