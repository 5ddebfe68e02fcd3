//! Load-factor input tables.

use chrono::Month;
use serde::{Deserialize, Serialize};
use sp_core::month::month_abbrev;
use sp_core::{ClassCode, FULL_PERCENT, MonthKey, Real};
use sp_timeline::year_key;
use std::collections::BTreeMap;

/// Cap applied to new studies, per cabin class code.
///
/// Classes without an entry in [`LoadFactorInputs::max_load_factor`] are
/// capped at 100 percent.
pub const DEFAULT_MAX_LOAD_FACTOR: [(&str, Real); 4] =
    [("F", 90.0), ("J", 93.0), ("W", 95.0), ("Y", 98.0)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadFactorInputs {
    /// Direct values for the first twelve months of the period.
    #[serde(default)]
    pub ramp_up: BTreeMap<ClassCode, BTreeMap<MonthKey, Real>>,
    /// Target percent per class and simulation year ("Y2", "Y3", ...).
    #[serde(default)]
    pub targeted_yearly: BTreeMap<ClassCode, BTreeMap<String, Real>>,
    /// Multiplier percent per calendar month ("Jan" .. "Dec").
    #[serde(default)]
    pub seasonality: BTreeMap<String, Real>,
    /// Upper bound percent per class for computed values.
    #[serde(default)]
    pub max_load_factor: BTreeMap<ClassCode, Real>,
}

impl Default for LoadFactorInputs {
    fn default() -> Self {
        Self {
            ramp_up: BTreeMap::new(),
            targeted_yearly: BTreeMap::new(),
            seasonality: BTreeMap::new(),
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR
                .iter()
                .map(|(class, cap)| (ClassCode::new(*class), *cap))
                .collect(),
        }
    }
}

impl LoadFactorInputs {
    /// Inputs with no tables at all, not even the default caps.
    pub fn empty() -> Self {
        Self {
            max_load_factor: BTreeMap::new(),
            ..Self::default()
        }
    }

    pub fn ramp_up_value(&self, class: &ClassCode, key: MonthKey) -> Option<Real> {
        self.ramp_up.get(class)?.get(&key).copied()
    }

    pub fn targeted_value(&self, class: &ClassCode, year_index: u32) -> Option<Real> {
        self.targeted_yearly
            .get(class)?
            .get(&year_key(year_index))
            .copied()
    }

    pub fn seasonality_pct(&self, key: MonthKey) -> Real {
        self.seasonality
            .get(key.abbrev())
            .copied()
            .unwrap_or(FULL_PERCENT)
    }

    pub fn cap(&self, class: &ClassCode) -> Real {
        self.max_load_factor
            .get(class)
            .copied()
            .unwrap_or(FULL_PERCENT)
    }

    pub fn set_ramp_up(&mut self, class: ClassCode, key: MonthKey, value: Real) {
        self.ramp_up.entry(class).or_default().insert(key, value);
    }

    pub fn set_targeted(&mut self, class: ClassCode, year_index: u32, value: Real) {
        self.targeted_yearly
            .entry(class)
            .or_default()
            .insert(year_key(year_index), value);
    }

    pub fn set_seasonality(&mut self, month: Month, pct: Real) {
        self.seasonality
            .insert(month_abbrev(month).to_string(), pct);
    }

    pub fn set_max_load_factor(&mut self, class: ClassCode, cap: Real) {
        self.max_load_factor.insert(class, cap);
    }

    /// Drop every table row for `class`. Returns true if anything was removed.
    pub fn remove_class(&mut self, class: &ClassCode) -> bool {
        let ramp_up = self.ramp_up.remove(class).is_some();
        let targeted = self.targeted_yearly.remove(class).is_some();
        let cap = self.max_load_factor.remove(class).is_some();
        ramp_up || targeted || cap
    }

    /// Every class code mentioned by any table.
    pub fn classes(&self) -> Vec<ClassCode> {
        let mut classes: Vec<ClassCode> = self
            .ramp_up
            .keys()
            .chain(self.targeted_yearly.keys())
            .chain(self.max_load_factor.keys())
            .cloned()
            .collect();
        classes.sort();
        classes.dedup();
        classes
    }
}
