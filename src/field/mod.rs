//! Field model: dense 2D fields and aquifer properties.
//!
//! - [`Field2D`]: row-major `ny × nx` storage for head, K, S and Q
//! - [`FieldInput`]: uniform scalar or full grid, broadcast once
//! - [`AquiferProperties`]: validated K and S with inter-node conductances

mod field2d;
mod properties;

pub use field2d::Field2D;
pub use properties::{AquiferProperties, FieldInput, arithmetic_conductance};
