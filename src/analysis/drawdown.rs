//! Drawdown: `initial - h[t]` for every entry of a head history.

use crate::error::Result;
use crate::field::Field2D;

/// Drawdown of each history entry relative to `initial`.
///
/// Positive values mean the head has fallen. The output has one field per
/// history entry, in the same order.
///
/// # Errors
///
/// Returns [`GroundwaterError::ShapeMismatch`](crate::GroundwaterError::ShapeMismatch)
/// if any entry's shape differs from `initial`.
///
/// # Example
///
/// ```
/// use gw_rs::analysis::compute_drawdown;
/// use gw_rs::field::Field2D;
///
/// let h0 = Field2D::filled(2, 3, 10.0);
/// let history = vec![h0.clone(), Field2D::filled(2, 3, 9.5)];
/// let dd = compute_drawdown(&history, &h0).unwrap();
/// assert_eq!(dd[0].max(), 0.0);
/// assert_eq!(dd[1].get(1, 2), 0.5);
/// ```
pub fn compute_drawdown(history: &[Field2D], initial: &Field2D) -> Result<Vec<Field2D>> {
    history.iter().map(|h| initial.difference(h)).collect()
}
