//! Date snapshots for entity collections.
//!
//! Entities expose at most two period-bound dates through [`DateBearing`].
//! The adapter captures those dates per entity id and writes them back later,
//! supplying fallback values for entities the snapshot has never seen.

use serde::{Deserialize, Serialize};
use sp_core::MonthKey;
use sp_core::month::iso_date;
use std::collections::BTreeMap;

/// The period-bound dates of one entity.
///
/// Fleet entries map enter-in-service/retirement here, route entries their
/// start/end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityDates {
    #[serde(default, with = "iso_date::option")]
    pub start: Option<MonthKey>,
    #[serde(default, with = "iso_date::option")]
    pub end: Option<MonthKey>,
}

impl EntityDates {
    pub fn new(start: Option<MonthKey>, end: Option<MonthKey>) -> Self {
        Self { start, end }
    }
}

/// A record whose dates follow the planning period.
pub trait DateBearing: Clone {
    /// Name of the collection this entity lives in, used to key snapshots.
    const COLLECTION: &'static str;

    fn entity_id(&self) -> &str;

    fn dates(&self) -> EntityDates;

    /// Copy of `self` with the given dates; every other field is kept.
    fn with_dates(&self, dates: EntityDates) -> Self;
}

/// Entity id -> dates, captured when leaving a mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeSnapshot(BTreeMap<String, EntityDates>);

impl ModeSnapshot {
    pub fn get(&self, entity_id: &str) -> Option<&EntityDates> {
        self.0.get(entity_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EntityDates)> {
        self.0.iter().map(|(id, dates)| (id.as_str(), dates))
    }

    /// Forget an entity, e.g. after it was deleted.
    pub fn remove(&mut self, entity_id: &str) -> Option<EntityDates> {
        self.0.remove(entity_id)
    }
}

impl FromIterator<(String, EntityDates)> for ModeSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, EntityDates)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One [`ModeSnapshot`] per named collection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotSet(BTreeMap<String, ModeSnapshot>);

impl SnapshotSet {
    pub fn collection(&self, name: &str) -> Option<&ModeSnapshot> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, snapshot: ModeSnapshot) {
        self.0.insert(name.into(), snapshot);
    }

    pub fn remove_entity(&mut self, collection: &str, entity_id: &str) {
        if let Some(snapshot) = self.0.get_mut(collection) {
            snapshot.remove(entity_id);
        }
    }

    pub fn collections(&self) -> impl Iterator<Item = (&str, &ModeSnapshot)> {
        self.0.iter().map(|(name, snap)| (name.as_str(), snap))
    }
}

/// Capture the dates of every entity.
pub fn snapshot<E: DateBearing>(entities: &[E]) -> ModeSnapshot {
    entities
        .iter()
        .map(|e| (e.entity_id().to_string(), e.dates()))
        .collect()
}

/// Write dates back from `snapshot`, using `fallback` for entities it lacks.
///
/// Order, count and non-date fields of `entities` are preserved.
pub fn restore<E, F>(entities: &[E], snapshot: Option<&ModeSnapshot>, fallback: F) -> Vec<E>
where
    E: DateBearing,
    F: Fn(&E) -> EntityDates,
{
    entities
        .iter()
        .map(|entity| {
            let dates = snapshot
                .and_then(|s| s.get(entity.entity_id()).copied())
                .unwrap_or_else(|| fallback(entity));
            entity.with_dates(dates)
        })
        .collect()
}

/// A group of entity collections snapshotted and restored together.
pub trait DatedCollections: Clone {
    fn snapshot_all(&self) -> SnapshotSet;

    fn restore_all(
        &self,
        snapshots: Option<&SnapshotSet>,
        fallback: &dyn Fn(EntityDates) -> EntityDates,
    ) -> Self;
}

impl<E: DateBearing> DatedCollections for Vec<E> {
    fn snapshot_all(&self) -> SnapshotSet {
        let mut set = SnapshotSet::default();
        set.insert(E::COLLECTION, snapshot(self));
        set
    }

    fn restore_all(
        &self,
        snapshots: Option<&SnapshotSet>,
        fallback: &dyn Fn(EntityDates) -> EntityDates,
    ) -> Self {
        let snap = snapshots.and_then(|s| s.collection(E::COLLECTION));
        restore(self, snap, |e| fallback(e.dates()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Aircraft {
        id: String,
        tail: String,
        dates: EntityDates,
    }

    impl DateBearing for Aircraft {
        const COLLECTION: &'static str = "fleet";

        fn entity_id(&self) -> &str {
            &self.id
        }

        fn dates(&self) -> EntityDates {
            self.dates
        }

        fn with_dates(&self, dates: EntityDates) -> Self {
            Self {
                dates,
                ..self.clone()
            }
        }
    }

    fn aircraft(id: &str, start: MonthKey) -> Aircraft {
        Aircraft {
            id: id.to_string(),
            tail: format!("OO-{id}"),
            dates: EntityDates::new(Some(start), None),
        }
    }

    #[test]
    fn restore_prefers_snapshot_then_fallback() {
        let a = aircraft("a", MonthKey::new(2026, 1));
        let b = aircraft("b", MonthKey::new(2026, 2));
        let snap = snapshot(&[a.clone()]);

        let moved = vec![
            a.with_dates(EntityDates::new(Some(MonthKey::new(2000, 1)), None)),
            b.clone(),
        ];
        let fallback = EntityDates::new(Some(MonthKey::new(2000, 5)), None);
        let restored = restore(&moved, Some(&snap), |_| fallback);

        assert_eq!(restored.len(), 2);
        assert_eq!(restored[0], a);
        assert_eq!(restored[1].dates, fallback);
        assert_eq!(restored[1].tail, b.tail);
    }

    #[test]
    fn restore_without_snapshot_uses_fallback_for_all() {
        let fleet = vec![
            aircraft("a", MonthKey::new(2026, 1)),
            aircraft("b", MonthKey::new(2027, 1)),
        ];
        let restored = restore(&fleet, None, |e| EntityDates::new(e.dates.start, e.dates.start));
        for (before, after) in fleet.iter().zip(&restored) {
            assert_eq!(after.id, before.id);
            assert_eq!(after.dates.end, before.dates.start);
        }
    }

    #[test]
    fn collection_snapshot_is_keyed_by_name() {
        let fleet = vec![aircraft("a", MonthKey::new(2026, 1))];
        let set = fleet.snapshot_all();
        assert_eq!(set.collection("fleet").map(ModeSnapshot::len), Some(1));
        assert!(set.collection("routes").is_none());
    }

    #[test]
    fn snapshot_serializes_as_plain_maps() {
        let fleet = vec![aircraft("a", MonthKey::new(2026, 3))];
        let json = serde_json::to_string(&fleet.snapshot_all()).unwrap();
        assert_eq!(json, r#"{"fleet":{"a":{"start":"2026-03-01","end":null}}}"#);
        let back: SnapshotSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fleet.snapshot_all());
    }
}
