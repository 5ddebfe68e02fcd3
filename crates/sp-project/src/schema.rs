//! Study schema definitions.

use serde::{Deserialize, Serialize};
use sp_core::month::iso_date;
use sp_core::{ClassCode, MonthKey, RouteId};
use sp_loadfactor::{DEFAULT_MAX_LOAD_FACTOR, LoadFactorInputs, OverrideTable};
use sp_period::PeriodSnapshots;
use sp_timeline::{DateRange, PeriodMode};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Study {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub period: PeriodDef,
    #[serde(default)]
    pub cabin_classes: Vec<ClassCode>,
    #[serde(default)]
    pub fleet: Vec<FleetEntry>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub load_factors: LoadFactorInputs,
    #[serde(default)]
    pub overrides: OverrideTable,
    #[serde(default)]
    pub snapshots: PeriodSnapshots,
}

impl Study {
    /// Empty study over a calendar period with the default cabin classes.
    pub fn new(name: impl Into<String>, period: DateRange) -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: name.into(),
            period: PeriodDef::dates(period),
            cabin_classes: DEFAULT_MAX_LOAD_FACTOR
                .iter()
                .map(|(class, _)| ClassCode::new(*class))
                .collect(),
            fleet: vec![],
            routes: vec![],
            load_factors: LoadFactorInputs::default(),
            overrides: OverrideTable::new(),
            snapshots: PeriodSnapshots::default(),
        }
    }

    pub fn route(&self, route_id: &RouteId) -> Option<&RouteEntry> {
        self.routes.iter().find(|r| &r.id == route_id)
    }

    pub fn has_class(&self, class: &ClassCode) -> bool {
        self.cabin_classes.contains(class)
    }
}

/// Persisted period state. Which fields are live depends on `mode`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PeriodDef {
    #[serde(default)]
    pub mode: PeriodMode,
    #[serde(
        default,
        with = "iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<MonthKey>,
    #[serde(
        default,
        with = "iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<MonthKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_years: Option<u32>,
}

impl PeriodDef {
    pub fn dates(range: DateRange) -> Self {
        Self {
            mode: PeriodMode::Dates,
            start_date: Some(range.start()),
            end_date: Some(range.end()),
            simulation_years: None,
        }
    }

    /// The boundaries as a range, `None` if unset or inverted.
    pub fn range(&self) -> Option<DateRange> {
        DateRange::new(self.start_date?, self.end_date?)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    #[default]
    Owned,
    OperatingLease,
    FinanceLease,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FleetEntry {
    pub id: String,
    pub aircraft_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    /// Seats per cabin class.
    #[serde(default)]
    pub seats: BTreeMap<ClassCode, u32>,
    #[serde(default)]
    pub ownership: Ownership,
    #[serde(default, with = "iso_date::option")]
    pub enter_in_service: Option<MonthKey>,
    #[serde(
        default,
        with = "iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub retirement: Option<MonthKey>,
}

impl FleetEntry {
    pub fn new(aircraft_type: impl Into<String>, enter_in_service: MonthKey) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            aircraft_type: aircraft_type.into(),
            registration: None,
            seats: BTreeMap::new(),
            ownership: Ownership::default(),
            enter_in_service: Some(enter_in_service),
            retirement: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteEntry {
    pub id: RouteId,
    pub origin: String,
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_type: Option<String>,
    #[serde(default)]
    pub weekly_frequency: u32,
    #[serde(default, with = "iso_date::option")]
    pub start_date: Option<MonthKey>,
    #[serde(default, with = "iso_date::option")]
    pub end_date: Option<MonthKey>,
}

impl RouteEntry {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        period: DateRange,
    ) -> Self {
        Self {
            id: RouteId::new(uuid::Uuid::new_v4().to_string()),
            origin: origin.into(),
            destination: destination.into(),
            aircraft_type: None,
            weekly_frequency: 0,
            start_date: Some(period.start()),
            end_date: Some(period.end()),
        }
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.origin, self.destination)
    }
}
