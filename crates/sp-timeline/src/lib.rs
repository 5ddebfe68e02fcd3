//! sp-timeline: month sequences for a planning period.
//!
//! The timeline is the column axis of every time-indexed grid. It is derived
//! purely from the period boundaries and the presentation mode, so callers can
//! regenerate it on every edit.

pub mod index;
pub mod mode;
pub mod range;

pub use index::{
    Timeline, TimelineColumn, YearColumn, generate, month_count, month_in_year, relative_label,
    year_index_of, year_key,
};
pub use mode::PeriodMode;
pub use range::DateRange;
