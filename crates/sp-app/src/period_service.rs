//! Period mode switching and timeline queries on a whole study.

use sp_period::{PeriodMode, SwitchParams};
use sp_project::Study;
use sp_timeline::{DateRange, Timeline, TimelineColumn, YearColumn};
use tracing::warn;

use crate::error::{AppError, AppResult};

/// Switch the study's period mode, rewriting entity dates through the
/// snapshot controller. The input study is never modified.
pub fn switch_study_mode(
    study: &Study,
    target: PeriodMode,
    params: SwitchParams,
) -> AppResult<Study> {
    let state = study.period_state();
    let next = sp_period::switch_mode(&state, target, params).inspect_err(|e| {
        warn!(study = %study.name, requested = %target, error = %e, "mode switch rejected");
    })?;
    Ok(study.with_period_state(next))
}

/// Change the number of simulation years (duration mode only).
pub fn set_study_years(study: &Study, simulation_years: u32) -> AppResult<Study> {
    let next = sp_period::set_simulation_years(&study.period_state(), simulation_years)
        .inspect_err(|e| {
            warn!(study = %study.name, simulation_years, error = %e, "year change rejected");
        })?;
    Ok(study.with_period_state(next))
}

/// Replace the calendar period (dates mode only).
pub fn set_study_period(study: &Study, period: DateRange) -> AppResult<Study> {
    let next = sp_period::set_period(&study.period_state(), period).inspect_err(|e| {
        warn!(study = %study.name, error = %e, "period change rejected");
    })?;
    Ok(study.with_period_state(next))
}

/// Active timeline of the study.
pub fn study_timeline(study: &Study) -> AppResult<Timeline> {
    study.timeline().ok_or(AppError::PeriodUnset)
}

/// Month and year column descriptors for grid headers.
pub fn timeline_columns(study: &Study) -> AppResult<(Vec<TimelineColumn>, Vec<YearColumn>)> {
    let timeline = study_timeline(study)?;
    Ok((timeline.columns(), timeline.year_columns(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::MonthKey;

    fn study() -> Study {
        let range = DateRange::new(MonthKey::new(2026, 1), MonthKey::new(2027, 12)).unwrap();
        Study::new("s", range)
    }

    #[test]
    fn switch_to_duration_and_back() {
        let original = study();
        let duration = switch_study_mode(
            &original,
            PeriodMode::Duration,
            SwitchParams {
                simulation_years: Some(3),
                period: None,
            },
        )
        .unwrap();
        assert_eq!(duration.period.mode, PeriodMode::Duration);
        assert_eq!(duration.period.start_date, Some(MonthKey::new(2000, 1)));
        assert_eq!(duration.period.end_date, Some(MonthKey::new(2002, 12)));

        let back =
            switch_study_mode(&duration, PeriodMode::Dates, SwitchParams::default()).unwrap();
        assert_eq!(back.period.range(), original.period.range());
    }

    #[test]
    fn duration_without_years_is_rejected() {
        let original = study();
        let err = switch_study_mode(&original, PeriodMode::Duration, SwitchParams::default())
            .unwrap_err();
        assert!(matches!(err, AppError::Period(_)));
        assert_eq!(original.period.mode, PeriodMode::Dates);
    }

    #[test]
    fn set_years_requires_duration_mode() {
        assert!(matches!(
            set_study_years(&study(), 2),
            Err(AppError::Period(_))
        ));
    }

    #[test]
    fn columns_cover_every_month() {
        let (months, years) = timeline_columns(&study()).unwrap();
        assert_eq!(months.len(), 24);
        assert_eq!(months[0].label, "Jan 2026");
        assert_eq!(years.len(), 2);
    }

    #[test]
    fn unset_period_has_no_timeline() {
        let mut s = study();
        s.period.start_date = None;
        s.period.end_date = None;
        assert!(matches!(study_timeline(&s), Err(AppError::PeriodUnset)));
    }
}
