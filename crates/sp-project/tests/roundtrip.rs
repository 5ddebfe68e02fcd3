use sp_core::{ClassCode, MonthKey};
use sp_period::to_duration;
use sp_project::schema::*;
use sp_project::{from_yaml_str, load_json, load_yaml, save_json, save_yaml, validate_study};
use sp_timeline::DateRange;

fn sample_study() -> Study {
    let period = DateRange::new(MonthKey::new(2026, 1), MonthKey::new(2028, 12)).unwrap();
    let mut study = Study::new("Transatlantic expansion", period);

    let mut aircraft = FleetEntry::new("A330-900", MonthKey::new(2026, 3));
    aircraft.registration = Some("OO-SFA".to_string());
    aircraft.seats.insert(ClassCode::new("J"), 30);
    aircraft.seats.insert(ClassCode::new("Y"), 258);
    aircraft.retirement = Some(MonthKey::new(2034, 12));
    study.fleet.push(aircraft);

    let mut route = RouteEntry::new("BRU", "JFK", period);
    route.weekly_frequency = 7;
    study.routes.push(route);

    let y = ClassCode::new("Y");
    study
        .load_factors
        .set_ramp_up(y.clone(), MonthKey::new(2026, 1), 62.0);
    study.load_factors.set_targeted(y.clone(), 2, 82.0);
    let route_id = study.routes[0].id.clone();
    study
        .overrides
        .set(route_id, y, MonthKey::new(2027, 8), 91.0);
    study
}

#[test]
fn roundtrip_yaml_sample_study() {
    let study = sample_study();
    validate_study(&study).unwrap();

    let path = std::env::temp_dir().join("sp_project_roundtrip_sample.yaml");
    save_yaml(&path, &study).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(study, loaded);
}

#[test]
fn roundtrip_json_after_mode_switch() {
    let study = sample_study();
    let switched = study.with_period_state(to_duration(&study.period_state(), 3).unwrap());
    validate_study(&switched).unwrap();

    let path = std::env::temp_dir().join("sp_project_roundtrip_switched.json");
    save_json(&path, &switched).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(switched, loaded);
    assert!(loaded.snapshots.dates.is_some());
    assert_eq!(loaded.snapshots.period, study.period.range());
}

#[test]
fn dates_are_written_as_iso_strings() {
    let study = sample_study();
    let yaml = serde_yaml::to_string(&study).unwrap();
    assert!(yaml.contains("start_date:"));
    assert!(yaml.contains("2026-01-01"));
    assert!(yaml.contains("2026-03-01"));
}

#[test]
fn minimal_document_gets_defaults() {
    let yaml = r#"
version: 2
name: Minimal
period:
  mode: dates
  start_date: "2026-01-15"
  end_date: "2026-12-31"
"#;
    let study = from_yaml_str(yaml).unwrap();
    assert_eq!(study.period.start_date, Some(MonthKey::new(2026, 1)));
    assert_eq!(study.timeline().unwrap().len(), 12);
    assert_eq!(study.load_factors.cap(&ClassCode::new("Y")), 98.0);
    assert!(study.overrides.is_empty());
}

#[test]
fn version_one_document_is_migrated() {
    let yaml = r#"
version: 1
name: Legacy
period:
  mode: duration
  start_date: "2000-01-01"
  end_date: "2002-12-01"
load_factors:
  targeted_yearly:
    Y:
      Y2: 80
"#;
    let study = from_yaml_str(yaml).unwrap();
    assert_eq!(study.version, 2);
    assert_eq!(study.period.simulation_years, Some(3));
    assert!(study.has_class(&ClassCode::new("Y")));
}
