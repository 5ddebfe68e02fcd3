//! Period mode transitions.
//!
//! [`PeriodState`] is a plain value. Every operation here borrows the current
//! state and returns a complete new one, so a failed transition leaves the
//! caller's state exactly as it was.

use serde::{Deserialize, Serialize};
use sp_core::MonthKey;
use sp_timeline::{DateRange, PeriodMode, Timeline};
use tracing::debug;

use crate::adapter::{DatedCollections, EntityDates, SnapshotSet};
use crate::{PeriodError, PeriodResult};

/// First year of the synthetic calendar used in duration mode.
pub const EPOCH_YEAR: i32 = 2000;

/// Longest simulation. The synthetic end year stays at four digits so the
/// period survives an ISO-8601 round trip through the study file.
pub const MAX_SIMULATION_YEARS: u32 = 8000;

/// Synthetic period for `simulation_years` whole years, `None` outside
/// `1..=MAX_SIMULATION_YEARS`.
pub fn synthetic_range(simulation_years: u32) -> Option<DateRange> {
    if !(1..=MAX_SIMULATION_YEARS).contains(&simulation_years) {
        return None;
    }
    let end_year = i32::try_from(simulation_years)
        .ok()?
        .checked_add(EPOCH_YEAR - 1)?;
    DateRange::new(MonthKey::new(EPOCH_YEAR, 1), MonthKey::new(end_year, 12))
}

/// Restore points captured when leaving a mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PeriodSnapshots {
    /// Entity dates as they were in dates mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<SnapshotSet>,
    /// Entity dates as they were in duration mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<SnapshotSet>,
    /// Calendar period boundaries as they were in dates mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<DateRange>,
}

impl PeriodSnapshots {
    /// Drop an entity from both entity snapshots.
    pub fn forget_entity(&mut self, collection: &str, entity_id: &str) {
        for set in [&mut self.dates, &mut self.duration].into_iter().flatten() {
            set.remove_entity(collection, entity_id);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodState<C> {
    pub mode: PeriodMode,
    /// Live period. In duration mode this is the synthetic range.
    pub period: Option<DateRange>,
    /// Live in duration mode, kept as the restore value in dates mode.
    pub simulation_years: Option<u32>,
    pub entities: C,
    pub snapshots: PeriodSnapshots,
}

impl<C: DatedCollections> PeriodState<C> {
    pub fn with_dates(period: Option<DateRange>, entities: C) -> Self {
        Self {
            mode: PeriodMode::Dates,
            period,
            simulation_years: None,
            entities,
            snapshots: PeriodSnapshots::default(),
        }
    }

    pub fn with_duration(simulation_years: u32, entities: C) -> PeriodResult<Self> {
        let period =
            synthetic_range(simulation_years).ok_or_else(|| invalid_years(simulation_years))?;
        Ok(Self {
            mode: PeriodMode::Duration,
            period: Some(period),
            simulation_years: Some(simulation_years),
            entities,
            snapshots: PeriodSnapshots::default(),
        })
    }

    /// Timeline of the live period, `None` while the period is unset.
    pub fn timeline(&self) -> Option<Timeline> {
        self.period.map(|range| Timeline::new(range, self.mode))
    }
}

/// Parameters for [`switch_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwitchParams {
    /// Years for duration mode. Falls back to the state's remembered value.
    pub simulation_years: Option<u32>,
    /// Calendar period to use when returning to dates mode for the first time.
    pub period: Option<DateRange>,
}

/// Move `state` to `target` mode. Asking for the current mode is a no-op.
pub fn switch_mode<C: DatedCollections>(
    state: &PeriodState<C>,
    target: PeriodMode,
    params: SwitchParams,
) -> PeriodResult<PeriodState<C>> {
    if state.mode == target {
        debug!(mode = %target, "period already in requested mode");
        return Ok(state.clone());
    }
    match target {
        PeriodMode::Duration => {
            let years = params
                .simulation_years
                .or(state.simulation_years)
                .ok_or_else(|| PeriodError::InvalidPeriod {
                    reason: "simulation years are required for duration mode".to_string(),
                })?;
            to_duration(state, years)
        }
        PeriodMode::Dates => to_dates(state, params.period),
    }
}

/// Dates -> duration.
///
/// The calendar period and entity dates are captured first; entities are then
/// restored from the previous duration snapshot, or placed at the synthetic
/// start with any end date clamped into the synthetic range.
pub fn to_duration<C: DatedCollections>(
    state: &PeriodState<C>,
    simulation_years: u32,
) -> PeriodResult<PeriodState<C>> {
    require_mode(state, PeriodMode::Dates)?;
    let synthetic =
        synthetic_range(simulation_years).ok_or_else(|| invalid_years(simulation_years))?;

    let mut snapshots = state.snapshots.clone();
    snapshots.period = state.period;
    snapshots.dates = Some(state.entities.snapshot_all());

    let fallback = |dates: EntityDates| EntityDates {
        start: Some(synthetic.start()),
        end: dates.end.map(|end| synthetic.clamp(end)),
    };
    let entities = state
        .entities
        .restore_all(state.snapshots.duration.as_ref(), &fallback);

    debug!(
        simulation_years,
        restored_from_snapshot = state.snapshots.duration.is_some(),
        "switched period to duration mode"
    );

    Ok(PeriodState {
        mode: PeriodMode::Duration,
        period: Some(synthetic),
        simulation_years: Some(simulation_years),
        entities,
        snapshots,
    })
}

/// Duration -> dates.
///
/// The calendar period comes back from its snapshot; `first_period` is only
/// used when no snapshot exists yet. If neither is available the period stays
/// unset and entities missing from the dates snapshot keep their current
/// dates.
pub fn to_dates<C: DatedCollections>(
    state: &PeriodState<C>,
    first_period: Option<DateRange>,
) -> PeriodResult<PeriodState<C>> {
    require_mode(state, PeriodMode::Duration)?;

    let mut snapshots = state.snapshots.clone();
    snapshots.duration = Some(state.entities.snapshot_all());

    let period = state.snapshots.period.or(first_period);
    let fallback = |dates: EntityDates| match period {
        Some(range) => EntityDates {
            start: Some(range.start()),
            end: dates.end.map(|_| range.end()),
        },
        None => dates,
    };
    let entities = state
        .entities
        .restore_all(state.snapshots.dates.as_ref(), &fallback);

    debug!(
        period_restored = state.snapshots.period.is_some(),
        period_set = period.is_some(),
        "switched period to dates mode"
    );

    Ok(PeriodState {
        mode: PeriodMode::Dates,
        period,
        simulation_years: state.simulation_years,
        entities,
        snapshots,
    })
}

/// Change the year count while in duration mode.
///
/// Only the synthetic end moves; snapshots and entity dates are untouched.
pub fn set_simulation_years<C: DatedCollections>(
    state: &PeriodState<C>,
    simulation_years: u32,
) -> PeriodResult<PeriodState<C>> {
    require_mode(state, PeriodMode::Duration)?;
    let synthetic =
        synthetic_range(simulation_years).ok_or_else(|| invalid_years(simulation_years))?;
    debug!(simulation_years, "simulation years changed");
    Ok(PeriodState {
        period: Some(synthetic),
        simulation_years: Some(simulation_years),
        ..state.clone()
    })
}

/// Replace the calendar period while in dates mode.
pub fn set_period<C: DatedCollections>(
    state: &PeriodState<C>,
    period: DateRange,
) -> PeriodResult<PeriodState<C>> {
    require_mode(state, PeriodMode::Dates)?;
    debug!(start = %period.start(), end = %period.end(), "calendar period changed");
    Ok(PeriodState {
        period: Some(period),
        ..state.clone()
    })
}

fn require_mode<C>(state: &PeriodState<C>, expected: PeriodMode) -> PeriodResult<()> {
    if state.mode == expected {
        Ok(())
    } else {
        Err(PeriodError::ModeMismatch {
            expected,
            actual: state.mode,
        })
    }
}

fn invalid_years(simulation_years: u32) -> PeriodError {
    PeriodError::InvalidPeriod {
        reason: format!(
            "simulation years must be within 1..={MAX_SIMULATION_YEARS} (got {simulation_years})"
        ),
    }
}
