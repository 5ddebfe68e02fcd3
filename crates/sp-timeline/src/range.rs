//! Validated period boundaries.

use serde::{Deserialize, Serialize};
use sp_core::month::iso_date;
use sp_core::{MonthKey, SpError, SpResult};

/// Inclusive month range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRangeDef", into = "DateRangeDef")]
pub struct DateRange {
    start: MonthKey,
    end: MonthKey,
}

#[derive(Serialize, Deserialize)]
struct DateRangeDef {
    #[serde(with = "iso_date")]
    start_date: MonthKey,
    #[serde(with = "iso_date")]
    end_date: MonthKey,
}

impl DateRange {
    /// Returns `None` when `start` is after `end`.
    pub fn new(start: MonthKey, end: MonthKey) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn try_new(start: MonthKey, end: MonthKey) -> SpResult<Self> {
        Self::new(start, end).ok_or(SpError::InvalidArg {
            what: "period start must not be after period end",
        })
    }

    pub fn start(&self) -> MonthKey {
        self.start
    }

    pub fn end(&self) -> MonthKey {
        self.end
    }

    /// Inclusive number of months, always at least one. Saturates at
    /// `u32::MAX` for spans no timeline can index.
    pub fn month_count(&self) -> u32 {
        u32::try_from(self.start.months_until(self.end) + 1).unwrap_or(u32::MAX)
    }

    pub fn contains(&self, key: MonthKey) -> bool {
        self.start <= key && key <= self.end
    }

    pub fn clamp(&self, key: MonthKey) -> MonthKey {
        key.clamp(self.start, self.end)
    }

    /// 1-based position of `key`, `None` outside the range.
    pub fn month_index(&self, key: MonthKey) -> Option<u32> {
        if self.contains(key) {
            Some((self.start.months_until(key) + 1) as u32)
        } else {
            None
        }
    }

    pub fn months(&self) -> impl Iterator<Item = MonthKey> + '_ {
        (0..self.month_count() as i64).map(|i| self.start.offset(i))
    }
}

impl TryFrom<DateRangeDef> for DateRange {
    type Error = SpError;

    fn try_from(def: DateRangeDef) -> Result<Self, Self::Error> {
        DateRange::try_new(def.start_date, def.end_date)
    }
}

impl From<DateRange> for DateRangeDef {
    fn from(range: DateRange) -> Self {
        Self {
            start_date: range.start,
            end_date: range.end,
        }
    }
}
