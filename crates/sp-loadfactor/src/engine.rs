//! Load-factor computation.

use serde::Serialize;
use sp_core::{ClassCode, MonthKey, Real, RouteId, apply_percent, round_half_up};
use sp_timeline::{Timeline, year_index_of};

use crate::inputs::LoadFactorInputs;
use crate::overrides::OverrideTable;

/// Months at the start of the period covered by ramp-up values.
pub const RAMP_UP_MONTHS: u32 = 12;

/// Where a displayed value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellSource {
    RampUp,
    Targeted,
    Override,
    /// Month outside the active timeline.
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadFactorCell {
    pub key: MonthKey,
    pub value: Real,
    pub source: CellSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadFactorRow {
    pub class: ClassCode,
    pub cells: Vec<LoadFactorCell>,
}

fn base_with_source(
    class: &ClassCode,
    key: MonthKey,
    inputs: &LoadFactorInputs,
    timeline: &Timeline,
) -> (Real, CellSource) {
    let Some(month_index) = timeline.month_index(key) else {
        return (0.0, CellSource::OutOfRange);
    };

    if month_index <= RAMP_UP_MONTHS {
        let value = inputs.ramp_up_value(class, key).unwrap_or(0.0);
        return (value, CellSource::RampUp);
    }

    let targeted = inputs
        .targeted_value(class, year_index_of(month_index))
        .unwrap_or(0.0);
    let raw = round_half_up(apply_percent(targeted, inputs.seasonality_pct(key)));
    (raw.min(inputs.cap(class)), CellSource::Targeted)
}

/// Computed load factor for one class and month, ignoring overrides.
///
/// Year 1 returns the ramp-up value as entered. Later years return
/// `round(target x seasonality / 100)` capped at the class maximum. Months
/// outside the timeline yield 0.
pub fn compute_base(
    class: &ClassCode,
    key: MonthKey,
    inputs: &LoadFactorInputs,
    timeline: &Timeline,
) -> Real {
    base_with_source(class, key, inputs, timeline).0
}

/// Value shown in the grid: the override if one exists, else the computed value.
///
/// Overrides are not capped.
pub fn compute_displayed(
    route_id: &RouteId,
    class: &ClassCode,
    key: MonthKey,
    inputs: &LoadFactorInputs,
    overrides: &OverrideTable,
    timeline: &Timeline,
) -> Real {
    overrides
        .get(route_id, class, key)
        .unwrap_or_else(|| compute_base(class, key, inputs, timeline))
}

/// Copy of `table` with the override set.
pub fn set_override(
    table: &OverrideTable,
    route_id: &RouteId,
    class: &ClassCode,
    key: MonthKey,
    value: Real,
) -> OverrideTable {
    let mut next = table.clone();
    next.set(route_id.clone(), class.clone(), key, value);
    next
}

/// Copy of `table` with the override removed (and its entry, if now empty).
pub fn clear_override(
    table: &OverrideTable,
    route_id: &RouteId,
    class: &ClassCode,
    key: MonthKey,
) -> OverrideTable {
    let mut next = table.clone();
    next.clear(route_id, class, key);
    next
}

/// One row per class with a cell per timeline month.
pub fn grid(
    route_id: &RouteId,
    classes: &[ClassCode],
    inputs: &LoadFactorInputs,
    overrides: &OverrideTable,
    timeline: &Timeline,
) -> Vec<LoadFactorRow> {
    classes
        .iter()
        .map(|class| {
            let cells = timeline
                .keys()
                .map(|key| match overrides.get(route_id, class, key) {
                    Some(value) => LoadFactorCell {
                        key,
                        value,
                        source: CellSource::Override,
                    },
                    None => {
                        let (value, source) = base_with_source(class, key, inputs, timeline);
                        LoadFactorCell { key, value, source }
                    }
                })
                .collect();
            LoadFactorRow {
                class: class.clone(),
                cells,
            }
        })
        .collect()
}
