//! Month column generation.

use serde::Serialize;
use sp_core::MonthKey;

use crate::{DateRange, PeriodMode};

/// One month column of a time-indexed grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineColumn {
    pub key: MonthKey,
    pub label: String,
    /// 1-based position within the period.
    pub month_index: u32,
    /// 1-based simulation year containing this month.
    pub year_index: u32,
}

/// One simulation-year column ("Y2", "Y3", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearColumn {
    pub key: String,
    pub label: String,
    pub year_index: u32,
}

/// Inclusive month count between `start` and `end`, 0 when inverted.
pub fn month_count(start: MonthKey, end: MonthKey) -> u32 {
    DateRange::new(start, end).map_or(0, |r| r.month_count())
}

pub fn year_index_of(month_index: u32) -> u32 {
    assert!(month_index >= 1, "month index is 1-based");
    month_index.div_ceil(12)
}

pub fn month_in_year(month_index: u32) -> u32 {
    assert!(month_index >= 1, "month index is 1-based");
    (month_index - 1) % 12 + 1
}

/// "M{monthInYear} Y{yearIndex}".
pub fn relative_label(month_index: u32) -> String {
    format!(
        "M{} Y{}",
        month_in_year(month_index),
        year_index_of(month_index)
    )
}

/// Key of a simulation year in per-year tables.
pub fn year_key(year_index: u32) -> String {
    format!("Y{year_index}")
}

/// Month columns from `start` to `end` inclusive.
///
/// An inverted range yields no columns.
pub fn generate(start: MonthKey, end: MonthKey, mode: PeriodMode) -> Vec<TimelineColumn> {
    match DateRange::new(start, end) {
        Some(range) => Timeline::new(range, mode).columns(),
        None => Vec::new(),
    }
}

/// The active timeline: a validated period plus its presentation mode.
///
/// The period is a non-inverted [`DateRange`], so a timeline holds at least
/// one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    range: DateRange,
    mode: PeriodMode,
}

impl Timeline {
    pub fn new(range: DateRange, mode: PeriodMode) -> Self {
        Self { range, mode }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn mode(&self) -> PeriodMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.range.month_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: MonthKey) -> bool {
        self.range.contains(key)
    }

    pub fn month_index(&self, key: MonthKey) -> Option<u32> {
        self.range.month_index(key)
    }

    pub fn year_index(&self, key: MonthKey) -> Option<u32> {
        self.month_index(key).map(year_index_of)
    }

    pub fn year_count(&self) -> u32 {
        year_index_of(self.range.month_count())
    }

    pub fn label(&self, key: MonthKey) -> Option<String> {
        let month_index = self.month_index(key)?;
        Some(match self.mode {
            PeriodMode::Dates => key.calendar_label(),
            PeriodMode::Duration => relative_label(month_index),
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.range.months()
    }

    pub fn columns(&self) -> Vec<TimelineColumn> {
        self.keys()
            .enumerate()
            .map(|(i, key)| {
                let month_index = i as u32 + 1;
                let label = match self.mode {
                    PeriodMode::Dates => key.calendar_label(),
                    PeriodMode::Duration => relative_label(month_index),
                };
                TimelineColumn {
                    key,
                    label,
                    month_index,
                    year_index: year_index_of(month_index),
                }
            })
            .collect()
    }

    /// Per-year columns starting at `first_year` (the targeted-yearly table
    /// starts at year 2, year 1 being covered by the ramp-up).
    pub fn year_columns(&self, first_year: u32) -> Vec<YearColumn> {
        let first_year = first_year.max(1);
        (first_year..=self.year_count())
            .map(|year_index| {
                let label = match self.mode {
                    PeriodMode::Duration => year_key(year_index),
                    PeriodMode::Dates => {
                        let first = self.range.start().offset((year_index as i64 - 1) * 12);
                        let last = self.range.clamp(first.offset(11));
                        format!(
                            "{} ({} - {})",
                            year_key(year_index),
                            first.calendar_label(),
                            last.calendar_label()
                        )
                    }
                };
                YearColumn {
                    key: year_key(year_index),
                    label,
                    year_index,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_arithmetic() {
        assert_eq!(year_index_of(1), 1);
        assert_eq!(year_index_of(12), 1);
        assert_eq!(year_index_of(13), 2);
        assert_eq!(month_in_year(12), 12);
        assert_eq!(month_in_year(13), 1);
        assert_eq!(relative_label(19), "M7 Y2");
    }

    #[test]
    fn inverted_range_is_empty() {
        let cols = generate(
            MonthKey::new(2027, 1),
            MonthKey::new(2026, 12),
            PeriodMode::Dates,
        );
        assert!(cols.is_empty());
        assert_eq!(month_count(MonthKey::new(2027, 1), MonthKey::new(2026, 12)), 0);
    }

    #[test]
    fn single_month_timeline_is_not_empty() {
        let key = MonthKey::new(2026, 5);
        let timeline = Timeline::new(DateRange::new(key, key).unwrap(), PeriodMode::Dates);
        assert_eq!(timeline.len(), 1);
        assert!(!timeline.is_empty());
        assert_eq!(timeline.columns().len(), timeline.len());
    }

    #[test]
    fn labels_follow_mode() {
        let range = DateRange::new(MonthKey::new(2026, 11), MonthKey::new(2027, 2)).unwrap();
        let dates = Timeline::new(range, PeriodMode::Dates);
        let duration = Timeline::new(range, PeriodMode::Duration);

        let labels: Vec<_> = dates.columns().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, ["Nov 2026", "Dec 2026", "Jan 2027", "Feb 2027"]);

        let labels: Vec<_> = duration.columns().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, ["M1 Y1", "M2 Y1", "M3 Y1", "M4 Y1"]);
        assert_eq!(duration.label(MonthKey::new(2027, 1)).as_deref(), Some("M3 Y1"));
        assert_eq!(duration.label(MonthKey::new(2027, 3)), None);
    }

    #[test]
    fn year_columns_skip_ramp_up_year() {
        let range = DateRange::new(MonthKey::new(2026, 4), MonthKey::new(2028, 6)).unwrap();
        let timeline = Timeline::new(range, PeriodMode::Dates);
        let cols = timeline.year_columns(2);
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].key, "Y2");
        assert_eq!(cols[0].label, "Y2 (Apr 2027 - Mar 2028)");
        assert_eq!(cols[1].label, "Y3 (Apr 2028 - Jun 2028)");

        let relative = Timeline::new(range, PeriodMode::Duration).year_columns(2);
        assert_eq!(relative[1].label, "Y3");
    }
}
