//! sp-period: period representation and mode transitions.
//!
//! A study's planning period is either a calendar range or a number of
//! simulation years laid out from a synthetic epoch. Switching between the two
//! rewrites the period and the date fields of every date-bearing entity, and
//! keeps what was there before as a snapshot so that switching back is
//! lossless.

pub mod adapter;
pub mod controller;

pub use adapter::{
    DateBearing, DatedCollections, EntityDates, ModeSnapshot, SnapshotSet, restore, snapshot,
};
pub use controller::{
    EPOCH_YEAR, MAX_SIMULATION_YEARS, PeriodSnapshots, PeriodState, SwitchParams, set_period,
    set_simulation_years, switch_mode, synthetic_range, to_dates, to_duration,
};

pub use sp_timeline::PeriodMode;

pub type PeriodResult<T> = Result<T, PeriodError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PeriodError {
    #[error("Invalid period: {reason}")]
    InvalidPeriod { reason: String },

    #[error("Operation requires {expected} mode but the period is in {actual} mode")]
    ModeMismatch {
        expected: PeriodMode,
        actual: PeriodMode,
    },
}
