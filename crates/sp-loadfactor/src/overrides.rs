//! Sparse manual load-factor overrides.
//!
//! Keyed by (route, class); each entry maps months to values. An entry whose
//! last month is cleared is removed, so the table never holds empty entries.
//! On the wire the table is a list of `{ route_id, class, values }` objects.

use serde::{Deserialize, Serialize};
use sp_core::{ClassCode, MonthKey, Real, RouteId};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverrideKey {
    pub route_id: RouteId,
    pub class: ClassCode,
}

impl OverrideKey {
    pub fn new(route_id: RouteId, class: ClassCode) -> Self {
        Self { route_id, class }
    }
}

/// Wire form of one table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub route_id: RouteId,
    pub class: ClassCode,
    #[serde(default)]
    pub values: BTreeMap<MonthKey, Real>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<OverrideEntry>", into = "Vec<OverrideEntry>")]
pub struct OverrideTable {
    entries: BTreeMap<OverrideKey, BTreeMap<MonthKey, Real>>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, route_id: &RouteId, class: &ClassCode, key: MonthKey) -> Option<Real> {
        self.entry(route_id, class)?.get(&key).copied()
    }

    pub fn entry(
        &self,
        route_id: &RouteId,
        class: &ClassCode,
    ) -> Option<&BTreeMap<MonthKey, Real>> {
        self.entries
            .get(&OverrideKey::new(route_id.clone(), class.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OverrideKey, &BTreeMap<MonthKey, Real>)> {
        self.entries.iter()
    }

    /// Insert or replace one month, creating the entry if needed.
    pub fn set(&mut self, route_id: RouteId, class: ClassCode, key: MonthKey, value: Real) {
        debug!(route = %route_id, class = %class, month = %key, value, "override set");
        self.entries
            .entry(OverrideKey::new(route_id, class))
            .or_default()
            .insert(key, value);
    }

    /// Remove one month, dropping the entry once it is empty.
    pub fn clear(&mut self, route_id: &RouteId, class: &ClassCode, key: MonthKey) -> Option<Real> {
        let entry_key = OverrideKey::new(route_id.clone(), class.clone());
        let values = self.entries.get_mut(&entry_key)?;
        let removed = values.remove(&key);
        if values.is_empty() {
            self.entries.remove(&entry_key);
        }
        debug!(
            route = %route_id,
            class = %class,
            month = %key,
            removed = removed.is_some(),
            "override cleared"
        );
        removed
    }

    /// Drop every entry of a route. Returns the number of entries removed.
    pub fn remove_route(&mut self, route_id: &RouteId) -> usize {
        self.retain(|key| &key.route_id != route_id)
    }

    /// Keep only entries whose key satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&OverrideKey) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| keep(key));
        before - self.entries.len()
    }

    /// Drop entries for classes not in `classes`.
    pub fn retain_classes(&mut self, classes: &[ClassCode]) -> usize {
        self.retain(|key| classes.contains(&key.class))
    }
}

impl From<Vec<OverrideEntry>> for OverrideTable {
    fn from(list: Vec<OverrideEntry>) -> Self {
        let mut entries: BTreeMap<OverrideKey, BTreeMap<MonthKey, Real>> = BTreeMap::new();
        for entry in list {
            if entry.values.is_empty() {
                continue;
            }
            entries
                .entry(OverrideKey::new(entry.route_id, entry.class))
                .or_default()
                .extend(entry.values);
        }
        Self { entries }
    }
}

impl From<OverrideTable> for Vec<OverrideEntry> {
    fn from(table: OverrideTable) -> Self {
        table
            .entries
            .into_iter()
            .map(|(key, values)| OverrideEntry {
                route_id: key.route_id,
                class: key.class,
                values,
            })
            .collect()
    }
}
