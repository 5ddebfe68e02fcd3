//! sp-core: stable foundation for skyplan.
//!
//! Contains:
//! - month (calendar month keys + ISO-8601 boundary encoding)
//! - numeric (percent rounding + float helpers)
//! - ids (route and cabin class identifiers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod month;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{SpError, SpResult};
pub use ids::*;
pub use month::MonthKey;
pub use numeric::*;
