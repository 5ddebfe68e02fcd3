//! Load-factor queries, override editing and route/class removal.

use sp_core::{ensure_finite, ClassCode, MonthKey, Real, RouteId};
use sp_loadfactor::LoadFactorRow;
use sp_period::DateBearing;
use sp_project::{RouteEntry, Study};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::period_service::study_timeline;

fn require_route(study: &Study, route_id: &str) -> AppResult<RouteId> {
    let route_id = RouteId::from(route_id);
    if study.route(&route_id).is_none() {
        return Err(AppError::RouteNotFound(route_id.to_string()));
    }
    Ok(route_id)
}

fn require_class(study: &Study, class: &str) -> AppResult<ClassCode> {
    let class = ClassCode::from(class);
    if !study.has_class(&class) {
        return Err(AppError::ClassNotFound(class.to_string()));
    }
    Ok(class)
}

/// Value shown for one route, class and month.
pub fn displayed_value(
    study: &Study,
    route_id: &str,
    class: &str,
    key: MonthKey,
) -> AppResult<Real> {
    let route_id = require_route(study, route_id)?;
    let class = require_class(study, class)?;
    let timeline = study_timeline(study)?;
    Ok(sp_loadfactor::compute_displayed(
        &route_id,
        &class,
        key,
        &study.load_factors,
        &study.overrides,
        &timeline,
    ))
}

/// Full grid for a route: one row per configured cabin class.
pub fn route_grid(study: &Study, route_id: &str) -> AppResult<Vec<LoadFactorRow>> {
    let route_id = require_route(study, route_id)?;
    let timeline = study_timeline(study)?;
    Ok(sp_loadfactor::grid(
        &route_id,
        &study.cabin_classes,
        &study.load_factors,
        &study.overrides,
        &timeline,
    ))
}

/// Set an override for an existing route, configured class and a month
/// inside the active timeline.
pub fn set_study_override(
    study: &Study,
    route_id: &str,
    class: &str,
    key: MonthKey,
    value: Real,
) -> AppResult<Study> {
    let route_id = require_route(study, route_id)?;
    let class = require_class(study, class)?;
    let value = ensure_finite(value, "override value")?;
    if value < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "override value must be non-negative, got {value}"
        )));
    }
    let timeline = study_timeline(study)?;
    if !timeline.contains(key) {
        return Err(AppError::InvalidInput(format!(
            "month {key} is outside the study period"
        )));
    }

    Ok(Study {
        overrides: sp_loadfactor::set_override(&study.overrides, &route_id, &class, key, value),
        ..study.clone()
    })
}

/// Remove an override. Clearing a month that has none is not an error.
pub fn clear_study_override(
    study: &Study,
    route_id: &str,
    class: &str,
    key: MonthKey,
) -> AppResult<Study> {
    let route_id = RouteId::from(route_id);
    let class = ClassCode::from(class);
    Ok(Study {
        overrides: sp_loadfactor::clear_override(&study.overrides, &route_id, &class, key),
        ..study.clone()
    })
}

/// Delete a route along with its overrides and snapshot entries.
pub fn delete_route(study: &Study, route_id: &str) -> AppResult<Study> {
    let route_id = require_route(study, route_id)?;
    let mut next = study.clone();
    next.routes.retain(|r| r.id != route_id);
    let pruned = next.overrides.remove_route(&route_id);
    next.snapshots
        .forget_entity(RouteEntry::COLLECTION, route_id.as_str());
    info!(route = %route_id, pruned, "route deleted");
    Ok(next)
}

/// Remove a cabin class from the study, along with its load-factor tables,
/// overrides and fleet seat counts.
pub fn remove_cabin_class(study: &Study, class: &str) -> AppResult<Study> {
    let class = require_class(study, class)?;
    if study.cabin_classes.len() == 1 {
        return Err(AppError::InvalidInput(format!(
            "cannot remove {class}: a study needs at least one cabin class"
        )));
    }
    let mut next = study.clone();
    next.cabin_classes.retain(|c| c != &class);
    next.load_factors.remove_class(&class);
    let pruned = next.overrides.retain_classes(&next.cabin_classes);
    for aircraft in &mut next.fleet {
        aircraft.seats.remove(&class);
    }
    debug!(class = %class, pruned, "cabin class removed");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_timeline::DateRange;

    fn month(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m)
    }

    fn study() -> Study {
        let range = DateRange::new(month(2026, 1), month(2027, 12)).unwrap();
        let mut study = Study::new("s", range);
        for id in ["r-1", "r-2"] {
            let mut route = RouteEntry::new("LHR", "JFK", range);
            route.id = RouteId::from(id);
            study.routes.push(route);
        }
        study
            .load_factors
            .set_targeted(ClassCode::from("Y"), 2, 80.0);
        study
    }

    #[test]
    fn override_wins_and_clears() {
        let s = study();
        assert_eq!(displayed_value(&s, "r-1", "Y", month(2027, 1)).unwrap(), 80.0);

        let with = set_study_override(&s, "r-1", "Y", month(2027, 1), 99.5).unwrap();
        assert_eq!(displayed_value(&with, "r-1", "Y", month(2027, 1)).unwrap(), 99.5);
        assert_eq!(displayed_value(&with, "r-2", "Y", month(2027, 1)).unwrap(), 80.0);

        let cleared = clear_study_override(&with, "r-1", "Y", month(2027, 1)).unwrap();
        assert!(cleared.overrides.is_empty());
        assert_eq!(
            displayed_value(&cleared, "r-1", "Y", month(2027, 1)).unwrap(),
            80.0
        );
    }

    #[test]
    fn override_rejects_bad_input() {
        let s = study();
        assert!(matches!(
            set_study_override(&s, "nope", "Y", month(2026, 1), 50.0),
            Err(AppError::RouteNotFound(_))
        ));
        assert!(matches!(
            set_study_override(&s, "r-1", "PY", month(2026, 1), 50.0),
            Err(AppError::ClassNotFound(_))
        ));
        assert!(matches!(
            set_study_override(&s, "r-1", "Y", month(2030, 1), 50.0),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            set_study_override(&s, "r-1", "Y", month(2026, 1), f64::NAN),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            set_study_override(&s, "r-1", "Y", month(2026, 1), -1.0),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn delete_route_prunes_overrides() {
        let s = set_study_override(&study(), "r-1", "Y", month(2026, 5), 60.0).unwrap();
        let s = set_study_override(&s, "r-2", "J", month(2026, 5), 70.0).unwrap();

        let next = delete_route(&s, "r-1").unwrap();
        assert_eq!(next.routes.len(), 1);
        assert_eq!(next.overrides.len(), 1);
        assert!(next
            .overrides
            .iter()
            .all(|(key, _)| key.route_id.as_str() == "r-2"));
        sp_project::validate_study(&next).unwrap();

        assert!(matches!(
            delete_route(&next, "r-1"),
            Err(AppError::RouteNotFound(_))
        ));
    }

    #[test]
    fn grid_rows_follow_cabin_classes() {
        let rows = route_grid(&study(), "r-1").unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.cells.len() == 24));
    }

    #[test]
    fn remove_class_cleans_tables() {
        let s = set_study_override(&study(), "r-1", "Y", month(2026, 5), 60.0).unwrap();
        let next = remove_cabin_class(&s, "Y").unwrap();
        assert!(!next.has_class(&ClassCode::from("Y")));
        assert!(next.overrides.is_empty());
        assert!(!next.load_factors.classes().contains(&ClassCode::from("Y")));
        sp_project::validate_study(&next).unwrap();
    }
}
