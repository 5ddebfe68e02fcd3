//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Study;
use sp_period::EPOCH_YEAR;
use sp_timeline::PeriodMode;

pub const LATEST_VERSION: u32 = 2;

pub fn migrate_to_latest(mut study: Study) -> Result<Study, ProjectError> {
    while study.version < LATEST_VERSION {
        study = migrate_one_version(study)?;
    }
    Ok(study)
}

fn migrate_one_version(study: Study) -> Result<Study, ProjectError> {
    match study.version {
        0 => migrate_v0_to_v1(study),
        1 => migrate_v1_to_v2(study),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

fn migrate_v0_to_v1(mut study: Study) -> Result<Study, ProjectError> {
    study.version = 1;
    Ok(study)
}

/// v2 adds the explicit cabin class list and always stores the year count of
/// duration-mode studies.
fn migrate_v1_to_v2(mut study: Study) -> Result<Study, ProjectError> {
    if study.cabin_classes.is_empty() {
        study.cabin_classes = study.load_factors.classes();
    }

    if study.period.mode == PeriodMode::Duration && study.period.simulation_years.is_none() {
        let end = study.period.end_date.ok_or_else(|| ProjectError::Migration {
            what: "duration-mode study has neither simulation_years nor end_date".to_string(),
        })?;
        let years = end.year() - EPOCH_YEAR + 1;
        if years < 1 {
            return Err(ProjectError::Migration {
                what: format!("duration-mode end_date {end} precedes the synthetic epoch"),
            });
        }
        study.period.simulation_years = Some(years as u32);
    }

    study.version = 2;
    Ok(study)
}
