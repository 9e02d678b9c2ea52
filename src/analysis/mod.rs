//! Post-processing of head histories.
//!
//! - [`compute_drawdown`]: head decline relative to the initial state
//! - [`WaterBalance`]: stored volume and per-step storage change
//!
//! Both operate on a completed history and never touch the solver state.

mod drawdown;
mod water_balance;

pub use drawdown::compute_drawdown;
pub use water_balance::{WaterBalance, storage_change, stored_volume};
