//! sp-loadfactor: per-class, per-month load factors.
//!
//! Values come from a layered set of inputs:
//! - year 1: ramp-up values entered month by month, never capped
//! - year 2+: targeted yearly value x seasonality, rounded, capped per class
//! - any month: sparse per-route overrides, which win over everything

pub mod engine;
pub mod inputs;
pub mod overrides;

pub use engine::{
    CellSource, LoadFactorCell, LoadFactorRow, RAMP_UP_MONTHS, clear_override, compute_base,
    compute_displayed, grid, set_override,
};
pub use inputs::{DEFAULT_MAX_LOAD_FACTOR, LoadFactorInputs};
pub use overrides::{OverrideEntry, OverrideKey, OverrideTable};
