//! Source terms (recharge, pumping) for the groundwater flow equation.

mod term;

pub use term::SourceTerm;
