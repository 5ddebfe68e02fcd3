//! Study validation logic.

use crate::schema::{FleetEntry, PeriodDef, RouteEntry, Study};
use sp_core::{ClassCode, MonthKey, Real};
use sp_period::{MAX_SIMULATION_YEARS, synthetic_range};
use sp_timeline::PeriodMode;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Override for route '{route_id}' class '{class}' has no owner ({reason})")]
    OrphanOverride {
        route_id: String,
        class: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_study(study: &Study) -> Result<(), ValidationError> {
    if study.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: study.version,
        });
    }

    validate_period(&study.period)?;

    let mut classes = HashSet::new();
    for class in &study.cabin_classes {
        if class.as_str().trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "cabin_classes".to_string(),
                value: format!("{class:?}"),
                reason: "class code must not be empty".to_string(),
            });
        }
        if !classes.insert(class) {
            return Err(ValidationError::DuplicateId {
                id: class.to_string(),
                context: "cabin_classes".to_string(),
            });
        }
    }

    let mut fleet_ids = HashSet::new();
    for entry in &study.fleet {
        if !fleet_ids.insert(&entry.id) {
            return Err(ValidationError::DuplicateId {
                id: entry.id.clone(),
                context: "fleet".to_string(),
            });
        }
        validate_fleet_entry(entry)?;
    }

    let mut route_ids = HashSet::new();
    for route in &study.routes {
        if !route_ids.insert(&route.id) {
            return Err(ValidationError::DuplicateId {
                id: route.id.to_string(),
                context: "routes".to_string(),
            });
        }
        validate_route(route)?;
    }

    validate_load_factors(study)?;

    for (key, values) in study.overrides.iter() {
        if !route_ids.contains(&key.route_id) {
            return Err(ValidationError::OrphanOverride {
                route_id: key.route_id.to_string(),
                class: key.class.to_string(),
                reason: "route does not exist".to_string(),
            });
        }
        if !study.has_class(&key.class) {
            return Err(ValidationError::OrphanOverride {
                route_id: key.route_id.to_string(),
                class: key.class.to_string(),
                reason: "cabin class is not configured".to_string(),
            });
        }
        for (month, value) in values {
            validate_percent(
                &format!("override {}/{} {}", key.route_id, key.class, month),
                *value,
            )?;
        }
    }

    Ok(())
}

fn validate_period(period: &PeriodDef) -> Result<(), ValidationError> {
    match period.mode {
        PeriodMode::Dates => match (period.start_date, period.end_date) {
            (Some(start), Some(end)) if start > end => Err(ValidationError::InvalidValue {
                field: "period".to_string(),
                value: format!("{start} .. {end}"),
                reason: "start_date must not be after end_date".to_string(),
            }),
            (Some(_), None) | (None, Some(_)) => Err(ValidationError::InvalidValue {
                field: "period".to_string(),
                value: format!("{:?} .. {:?}", period.start_date, period.end_date),
                reason: "start_date and end_date must be set together".to_string(),
            }),
            _ => Ok(()),
        },
        PeriodMode::Duration => {
            let years = period.simulation_years.unwrap_or(0);
            let Some(synthetic) = synthetic_range(years) else {
                return Err(ValidationError::InvalidValue {
                    field: "period simulation_years".to_string(),
                    value: years.to_string(),
                    reason: format!(
                        "duration mode needs 1..={MAX_SIMULATION_YEARS} simulation years"
                    ),
                });
            };
            if period.range() != Some(synthetic) {
                return Err(ValidationError::InvalidValue {
                    field: "period".to_string(),
                    value: format!("{:?} .. {:?}", period.start_date, period.end_date),
                    reason: format!(
                        "duration mode period must span {} .. {}",
                        synthetic.start(),
                        synthetic.end()
                    ),
                });
            }
            Ok(())
        }
    }
}

fn validate_fleet_entry(entry: &FleetEntry) -> Result<(), ValidationError> {
    if entry.id.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("fleet entry '{}' id", entry.aircraft_type),
            value: String::new(),
            reason: "id must not be empty".to_string(),
        });
    }
    validate_ordered(
        &format!("fleet entry '{}'", entry.id),
        entry.enter_in_service,
        entry.retirement,
    )
}

fn validate_route(route: &RouteEntry) -> Result<(), ValidationError> {
    if route.id.as_str().trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("route '{}' id", route.label()),
            value: String::new(),
            reason: "id must not be empty".to_string(),
        });
    }
    validate_ordered(
        &format!("route '{}'", route.id),
        route.start_date,
        route.end_date,
    )
}

fn validate_load_factors(study: &Study) -> Result<(), ValidationError> {
    let inputs = &study.load_factors;

    for (class, months) in &inputs.ramp_up {
        validate_class_reference(study, class, "load_factors ramp_up")?;
        for (month, value) in months {
            validate_percent(&format!("ramp_up {class} {month}"), *value)?;
        }
    }

    for (class, years) in &inputs.targeted_yearly {
        validate_class_reference(study, class, "load_factors targeted_yearly")?;
        for (year, value) in years {
            let year_index = year.strip_prefix('Y').and_then(|n| n.parse::<u32>().ok());
            if !matches!(year_index, Some(n) if n >= 2) {
                return Err(ValidationError::InvalidValue {
                    field: format!("targeted_yearly {class}"),
                    value: year.clone(),
                    reason: "year keys are Y2, Y3, ...".to_string(),
                });
            }
            validate_percent(&format!("targeted_yearly {class} {year}"), *value)?;
        }
    }

    for (month, pct) in &inputs.seasonality {
        if !(1..=12).any(|m| MonthKey::new(2000, m).abbrev() == month) {
            return Err(ValidationError::InvalidValue {
                field: "seasonality".to_string(),
                value: month.clone(),
                reason: "keys are three-letter month names (Jan .. Dec)".to_string(),
            });
        }
        validate_percent(&format!("seasonality {month}"), *pct)?;
    }

    for (class, cap) in &inputs.max_load_factor {
        if !cap.is_finite() || *cap <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("max_load_factor {class}"),
                value: cap.to_string(),
                reason: "must be positive and finite".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_class_reference(
    study: &Study,
    class: &ClassCode,
    context: &str,
) -> Result<(), ValidationError> {
    if study.cabin_classes.is_empty() || study.has_class(class) {
        Ok(())
    } else {
        Err(ValidationError::MissingReference {
            id: class.to_string(),
            context: context.to_string(),
        })
    }
}

fn validate_ordered(
    context: &str,
    start: Option<MonthKey>,
    end: Option<MonthKey>,
) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        return Err(ValidationError::InvalidValue {
            field: format!("{context} dates"),
            value: format!("{start} .. {end}"),
            reason: "start must not be after end".to_string(),
        });
    }
    Ok(())
}

fn validate_percent(field: &str, value: Real) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be non-negative and finite".to_string(),
        });
    }
    Ok(())
}
