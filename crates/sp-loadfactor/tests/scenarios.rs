use chrono::Month;
use proptest::prelude::*;
use sp_core::{ClassCode, MonthKey, RouteId};
use sp_loadfactor::{
    LoadFactorInputs, OverrideTable, clear_override, compute_base, compute_displayed,
    set_override,
};
use sp_timeline::{DateRange, PeriodMode, Timeline};

fn timeline_2026(years: i32) -> Timeline {
    let range =
        DateRange::new(MonthKey::new(2026, 1), MonthKey::new(2026 + years - 1, 12)).unwrap();
    Timeline::new(range, PeriodMode::Dates)
}

#[test]
fn ramp_up_is_used_verbatim() {
    let y = ClassCode::new("Y");
    let mut inputs = LoadFactorInputs::empty();
    inputs.set_ramp_up(y.clone(), MonthKey::new(2026, 3), 40.0);
    inputs.set_seasonality(Month::March, 10.0);
    inputs.set_max_load_factor(y.clone(), 20.0);

    let value = compute_base(&y, MonthKey::new(2026, 3), &inputs, &timeline_2026(2));
    assert_eq!(value, 40.0);
}

#[test]
fn targeted_value_with_seasonality_is_capped() {
    let y = ClassCode::new("Y");
    let mut inputs = LoadFactorInputs::empty();
    inputs.set_targeted(y.clone(), 2, 80.0);
    inputs.set_seasonality(Month::July, 130.0);
    inputs.set_max_load_factor(y.clone(), 90.0);

    let july_year_two = MonthKey::new(2027, 7);
    assert_eq!(compute_base(&y, july_year_two, &inputs, &timeline_2026(2)), 90.0);

    // Uncapped the same inputs would give round(80 * 130 / 100) = 104.
    inputs.set_max_load_factor(y.clone(), 110.0);
    assert_eq!(compute_base(&y, july_year_two, &inputs, &timeline_2026(2)), 104.0);
}

#[test]
fn seasonality_result_is_rounded() {
    let j = ClassCode::new("J");
    let mut inputs = LoadFactorInputs::empty();
    inputs.set_targeted(j.clone(), 2, 75.0);
    inputs.set_seasonality(Month::February, 93.0);
    // 75 * 93 / 100 = 69.75
    assert_eq!(compute_base(&j, MonthKey::new(2027, 2), &inputs, &timeline_2026(3)), 70.0);
}

#[test]
fn relative_timeline_uses_synthetic_calendar_months() {
    let y = ClassCode::new("Y");
    let mut inputs = LoadFactorInputs::empty();
    inputs.set_targeted(y.clone(), 2, 80.0);
    inputs.set_seasonality(Month::July, 110.0);
    let range = DateRange::new(MonthKey::new(2000, 1), MonthKey::new(2002, 12)).unwrap();
    let timeline = Timeline::new(range, PeriodMode::Duration);
    assert_eq!(compute_base(&y, MonthKey::new(2001, 7), &inputs, &timeline), 88.0);
}

#[test]
fn override_wins_then_reverts() {
    let y = ClassCode::new("Y");
    let route = RouteId::new("BRU-JFK");
    let key = MonthKey::new(2027, 7);
    let timeline = timeline_2026(2);
    let mut inputs = LoadFactorInputs::empty();
    inputs.set_targeted(y.clone(), 2, 80.0);

    let empty = OverrideTable::new();
    let with = set_override(&empty, &route, &y, key, 55.0);
    assert!(empty.is_empty(), "input table is not modified");
    assert_eq!(compute_displayed(&route, &y, key, &inputs, &with, &timeline), 55.0);

    let without = clear_override(&with, &route, &y, key);
    assert_eq!(
        compute_displayed(&route, &y, key, &inputs, &without, &timeline),
        compute_base(&y, key, &inputs, &timeline)
    );
    assert!(without.is_empty());
}

proptest! {
    #[test]
    fn computed_values_respect_cap_after_year_one(
        target in 0.0_f64..150.0,
        season in 0.0_f64..200.0,
        cap in 1.0_f64..100.0,
        month_offset in 12_i64..60,
    ) {
        let y = ClassCode::new("Y");
        let timeline = timeline_2026(5);
        let key = MonthKey::new(2026, 1).offset(month_offset);
        let mut inputs = LoadFactorInputs::empty();
        for year in 2..=5 {
            inputs.set_targeted(y.clone(), year, target);
        }
        inputs.seasonality.insert(key.abbrev().to_string(), season);
        inputs.set_max_load_factor(y.clone(), cap);

        prop_assert!(compute_base(&y, key, &inputs, &timeline) <= cap);
    }

    #[test]
    fn ramp_up_is_never_capped(
        value in 0.0_f64..150.0,
        cap in 1.0_f64..100.0,
        month_offset in 0_i64..12,
    ) {
        let y = ClassCode::new("Y");
        let timeline = timeline_2026(2);
        let key = MonthKey::new(2026, 1).offset(month_offset);
        let mut inputs = LoadFactorInputs::empty();
        inputs.set_ramp_up(y.clone(), key, value);
        inputs.set_max_load_factor(y.clone(), cap);

        prop_assert_eq!(compute_base(&y, key, &inputs, &timeline), value);
    }

    #[test]
    fn override_round_trip(value in -10.0_f64..250.0, month_offset in 0_i64..24) {
        let y = ClassCode::new("Y");
        let route = RouteId::new("r");
        let timeline = timeline_2026(2);
        let key = MonthKey::new(2026, 1).offset(month_offset);
        let mut inputs = LoadFactorInputs::default();
        inputs.set_targeted(y.clone(), 2, 85.0);
        inputs.set_ramp_up(y.clone(), key, 33.0);

        let table = set_override(&OverrideTable::new(), &route, &y, key, value);
        prop_assert_eq!(compute_displayed(&route, &y, key, &inputs, &table, &timeline), value);

        let cleared = clear_override(&table, &route, &y, key);
        prop_assert!(cleared.is_empty());
        prop_assert_eq!(
            compute_displayed(&route, &y, key, &inputs, &cleared, &timeline),
            compute_base(&y, key, &inputs, &timeline)
        );
    }
}
