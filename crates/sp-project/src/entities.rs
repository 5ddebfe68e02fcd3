//! Bridges between the study document and the period controller.

use sp_period::{
    DateBearing, DatedCollections, EntityDates, PeriodState, SnapshotSet, restore, snapshot,
};
use sp_timeline::Timeline;

use crate::schema::{FleetEntry, PeriodDef, RouteEntry, Study};

impl DateBearing for FleetEntry {
    const COLLECTION: &'static str = "fleet";

    fn entity_id(&self) -> &str {
        &self.id
    }

    fn dates(&self) -> EntityDates {
        EntityDates::new(self.enter_in_service, self.retirement)
    }

    fn with_dates(&self, dates: EntityDates) -> Self {
        Self {
            enter_in_service: dates.start,
            retirement: dates.end,
            ..self.clone()
        }
    }
}

impl DateBearing for RouteEntry {
    const COLLECTION: &'static str = "routes";

    fn entity_id(&self) -> &str {
        self.id.as_str()
    }

    fn dates(&self) -> EntityDates {
        EntityDates::new(self.start_date, self.end_date)
    }

    fn with_dates(&self, dates: EntityDates) -> Self {
        Self {
            start_date: dates.start,
            end_date: dates.end,
            ..self.clone()
        }
    }
}

/// Every date-bearing collection of a study.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudyEntities {
    pub fleet: Vec<FleetEntry>,
    pub routes: Vec<RouteEntry>,
}

impl DatedCollections for StudyEntities {
    fn snapshot_all(&self) -> SnapshotSet {
        let mut set = SnapshotSet::default();
        set.insert(FleetEntry::COLLECTION, snapshot(&self.fleet));
        set.insert(RouteEntry::COLLECTION, snapshot(&self.routes));
        set
    }

    fn restore_all(
        &self,
        snapshots: Option<&SnapshotSet>,
        fallback: &dyn Fn(EntityDates) -> EntityDates,
    ) -> Self {
        let fleet_snap = snapshots.and_then(|s| s.collection(FleetEntry::COLLECTION));
        let route_snap = snapshots.and_then(|s| s.collection(RouteEntry::COLLECTION));
        Self {
            fleet: restore(&self.fleet, fleet_snap, |e| fallback(e.dates())),
            routes: restore(&self.routes, route_snap, |e| fallback(e.dates())),
        }
    }
}

impl Study {
    /// Controller view of the study's period, entities and snapshots.
    pub fn period_state(&self) -> PeriodState<StudyEntities> {
        PeriodState {
            mode: self.period.mode,
            period: self.period.range(),
            simulation_years: self.period.simulation_years,
            entities: StudyEntities {
                fleet: self.fleet.clone(),
                routes: self.routes.clone(),
            },
            snapshots: self.snapshots.clone(),
        }
    }

    /// Copy of the study carrying a controller state produced by a transition.
    pub fn with_period_state(&self, state: PeriodState<StudyEntities>) -> Self {
        Self {
            period: PeriodDef {
                mode: state.mode,
                start_date: state.period.map(|r| r.start()),
                end_date: state.period.map(|r| r.end()),
                simulation_years: state.simulation_years,
            },
            fleet: state.entities.fleet,
            routes: state.entities.routes,
            snapshots: state.snapshots,
            ..self.clone()
        }
    }

    pub fn timeline(&self) -> Option<Timeline> {
        self.period
            .range()
            .map(|range| Timeline::new(range, self.period.mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::MonthKey;
    use sp_period::to_duration;
    use sp_timeline::{DateRange, PeriodMode};

    fn study() -> Study {
        let period = DateRange::new(MonthKey::new(2026, 1), MonthKey::new(2028, 12)).unwrap();
        let mut study = Study::new("Test", period);
        let mut aircraft = FleetEntry::new("A320neo", MonthKey::new(2026, 4));
        aircraft.retirement = Some(MonthKey::new(2031, 3));
        study.fleet.push(aircraft);
        study.routes.push(RouteEntry::new("BRU", "JFK", period));
        study
    }

    #[test]
    fn period_state_round_trips_through_study() {
        let study = study();
        let state = study.period_state();
        assert_eq!(study.with_period_state(state), study);
    }

    #[test]
    fn transition_rewrites_both_collections() {
        let study = study();
        let next = study.with_period_state(to_duration(&study.period_state(), 2).unwrap());

        assert_eq!(next.period.mode, PeriodMode::Duration);
        assert_eq!(next.period.start_date, Some(MonthKey::new(2000, 1)));
        assert_eq!(next.period.end_date, Some(MonthKey::new(2001, 12)));
        assert_eq!(next.fleet[0].enter_in_service, Some(MonthKey::new(2000, 1)));
        assert_eq!(next.fleet[0].retirement, Some(MonthKey::new(2001, 12)));
        assert_eq!(next.routes[0].start_date, Some(MonthKey::new(2000, 1)));
        assert_eq!(next.fleet[0].aircraft_type, "A320neo");

        let dates = next.snapshots.dates.as_ref().unwrap();
        assert!(dates.collection("fleet").is_some());
        assert!(dates.collection("routes").is_some());
        assert_eq!(next.timeline().unwrap().len(), 24);
    }
}
