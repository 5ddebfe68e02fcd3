//! Study loading, saving, validation, and introspection.

use std::path::Path;

use sp_core::RouteId;
use sp_project::{RouteEntry, Study};
use sp_timeline::PeriodMode;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::persist::StudyFormat;

/// Summary of a study for display.
#[derive(Debug, Clone)]
pub struct StudySummary {
    pub name: String,
    pub version: u32,
    pub mode: PeriodMode,
    /// Period as `YYYY-MM..YYYY-MM`, or `None` while unset.
    pub period: Option<String>,
    pub simulation_years: Option<u32>,
    pub month_count: usize,
    pub class_count: usize,
    pub fleet_count: usize,
    pub route_count: usize,
    pub override_count: usize,
}

/// Summary of a route for listing.
#[derive(Debug, Clone)]
pub struct RouteSummary {
    pub id: String,
    pub label: String,
    pub weekly_frequency: u32,
    pub override_entries: usize,
}

/// Load a study from a YAML or JSON file, chosen by extension.
///
/// The document is migrated to the latest version and validated.
pub fn load_study(path: &Path) -> AppResult<Study> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::StudyFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let study = match StudyFormat::from_path(path) {
        StudyFormat::Json => sp_project::from_json_str(&content)?,
        StudyFormat::Yaml => sp_project::from_yaml_str(&content)?,
    };

    info!(path = %path.display(), name = %study.name, "study loaded");
    Ok(study)
}

/// Validate and save a study to a YAML or JSON file, chosen by extension.
pub fn save_study(path: &Path, study: &Study) -> AppResult<()> {
    validate_study(study)?;
    let content = StudyFormat::from_path(path).render(study)?;

    std::fs::write(path, content).map_err(|e| AppError::StudyFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(path = %path.display(), name = %study.name, "study saved");
    Ok(())
}

/// Validate study structure and references.
pub fn validate_study(study: &Study) -> AppResult<()> {
    sp_project::validate_study(study)?;
    Ok(())
}

pub fn summarize(study: &Study) -> StudySummary {
    let range = study.period.range();
    StudySummary {
        name: study.name.clone(),
        version: study.version,
        mode: study.period.mode,
        period: range.map(|r| format!("{}..{}", r.start(), r.end())),
        simulation_years: study.period.simulation_years,
        month_count: range.map(|r| r.month_count() as usize).unwrap_or(0),
        class_count: study.cabin_classes.len(),
        fleet_count: study.fleet.len(),
        route_count: study.routes.len(),
        override_count: study.overrides.len(),
    }
}

/// List all routes in the study with summaries.
pub fn list_routes(study: &Study) -> Vec<RouteSummary> {
    study
        .routes
        .iter()
        .map(|route| RouteSummary {
            id: route.id.to_string(),
            label: route.label(),
            weekly_frequency: route.weekly_frequency,
            override_entries: study
                .overrides
                .iter()
                .filter(|(key, _)| key.route_id == route.id)
                .count(),
        })
        .collect()
}

/// Get a specific route by ID.
pub fn get_route<'a>(study: &'a Study, route_id: &str) -> AppResult<&'a RouteEntry> {
    study
        .route(&RouteId::from(route_id))
        .ok_or_else(|| AppError::RouteNotFound(route_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::MonthKey;
    use sp_project::RouteEntry;
    use sp_timeline::DateRange;

    fn sample() -> Study {
        let range = DateRange::new(MonthKey::new(2026, 1), MonthKey::new(2027, 12)).unwrap();
        let mut study = Study::new("Network 2026", range);
        let mut route = RouteEntry::new("LHR", "JFK", range);
        route.id = RouteId::from("r-1");
        study.routes.push(route);
        study
    }

    #[test]
    fn summary_counts() {
        let summary = summarize(&sample());
        assert_eq!(summary.name, "Network 2026");
        assert_eq!(summary.mode, PeriodMode::Dates);
        assert_eq!(summary.period.as_deref(), Some("2026-01..2027-12"));
        assert_eq!(summary.month_count, 24);
        assert_eq!(summary.route_count, 1);
        assert_eq!(summary.class_count, 4);
        assert_eq!(summary.override_count, 0);
    }

    #[test]
    fn get_route_by_id() {
        let study = sample();
        assert_eq!(get_route(&study, "r-1").unwrap().origin, "LHR");
        assert!(matches!(
            get_route(&study, "missing"),
            Err(AppError::RouteNotFound(id)) if id == "missing"
        ));
    }

    #[test]
    fn list_routes_labels() {
        let routes = list_routes(&sample());
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].id, "r-1");
        assert_eq!(routes[0].override_entries, 0);
    }
}
