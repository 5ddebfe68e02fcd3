//! Shared application service layer for skyplan.
//!
//! This crate provides a unified interface for the CLI and embedding UIs,
//! centralizing study management, period switching, load-factor queries and
//! override editing.

pub mod error;
pub mod load_factor_service;
pub mod period_service;
pub mod persist;
pub mod session;
pub mod study_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use load_factor_service::{
    clear_study_override, delete_route, displayed_value, remove_cabin_class, route_grid,
    set_study_override,
};
pub use period_service::{
    set_study_period, set_study_years, study_timeline, switch_study_mode, timeline_columns,
};
pub use persist::{study_digest, SaveObserver, StudyFormat};
pub use session::{StudyObserver, StudySession};
pub use study_service::{
    get_route, list_routes, load_study, save_study, summarize, validate_study, RouteSummary,
    StudySummary,
};
