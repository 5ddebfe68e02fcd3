//! Calendar month keys.
//!
//! A [`MonthKey`] identifies one calendar month independently of how the
//! planning period is presented. Keys are totally ordered and map 1:1 onto a
//! contiguous month ordinal, which is what timeline and load-factor code index
//! by.
//!
//! Boundary encodings:
//! - map keys and `Display`: `YYYY-MM`
//! - period and entity date fields: ISO-8601 date `YYYY-MM-01` (see [`iso_date`])

use chrono::{Datelike, Month, NaiveDate};
use core::fmt;
use core::str::FromStr;

use crate::{SpError, SpResult};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u8,
}

impl MonthKey {
    /// Build a key from a year and a 1-based month.
    ///
    /// Panics when `month` is outside 1..=12; callers holding user input go
    /// through [`MonthKey::try_new`] or [`MonthKey::parse`] instead.
    pub fn new(year: i32, month: u32) -> Self {
        assert!(
            (1..=12).contains(&month),
            "month ordinal out of range: {month}"
        );
        Self {
            year,
            month: month as u8,
        }
    }

    pub fn try_new(year: i32, month: u32) -> SpResult<Self> {
        if (1..=12).contains(&month) {
            Ok(Self::new(year, month))
        } else {
            Err(SpError::InvalidMonth {
                input: format!("{year}-{month}"),
                reason: "month must be within 1..=12",
            })
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// 1-based calendar month.
    pub fn month(self) -> u32 {
        self.month as u32
    }

    /// Contiguous month number: consecutive months differ by exactly one.
    pub fn ordinal(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: (ordinal.rem_euclid(12) + 1) as u8,
        }
    }

    pub fn offset(self, months: i64) -> Self {
        Self::from_ordinal(self.ordinal() + months)
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(self, other: MonthKey) -> i64 {
        other.ordinal() - self.ordinal()
    }

    pub fn calendar_month(self) -> Month {
        // month is always within 1..=12
        Month::try_from(self.month).unwrap_or(Month::January)
    }

    /// Three-letter English month name ("Jan" .. "Dec").
    pub fn abbrev(self) -> &'static str {
        month_abbrev(self.calendar_month())
    }

    /// "Mon YYYY" rendering used by calendar-mode grids.
    pub fn calendar_label(self) -> String {
        format!("{} {}", self.abbrev(), self.year)
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month(), 1)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// ISO-8601 date of the first day of the month.
    pub fn to_iso_date(self) -> String {
        format!("{:04}-{:02}-01", self.year, self.month)
    }

    /// Accepts `YYYY-MM`, an ISO-8601 date, or an ISO-8601 timestamp.
    /// Day and time components are discarded.
    pub fn parse(input: &str) -> SpResult<Self> {
        let trimmed = input.trim();
        let date_part = trimmed.split('T').next().unwrap_or(trimmed);
        let parsed = if date_part.len() <= 7 {
            NaiveDate::parse_from_str(&format!("{date_part}-01"), "%Y-%m-%d")
        } else {
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        };
        parsed
            .map(Self::from_date)
            .map_err(|_| SpError::InvalidMonth {
                input: input.to_string(),
                reason: "expected YYYY-MM or an ISO-8601 date",
            })
    }
}

/// Three-letter English name of a calendar month.
pub fn month_abbrev(month: Month) -> &'static str {
    &month.name()[..3]
}

impl fmt::Debug for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MonthKey({self})")
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = SpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MonthKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MonthKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        MonthKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde helper writing a [`MonthKey`] as an ISO-8601 date.
///
/// ```ignore
/// #[serde(with = "sp_core::month::iso_date")]
/// pub start_date: MonthKey,
/// ```
#[cfg(feature = "serde")]
pub mod iso_date {
    use super::MonthKey;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(key: &MonthKey, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&key.to_iso_date())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<MonthKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        MonthKey::parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Same encoding for optional fields; pair with `#[serde(default)]`.
    pub mod option {
        use super::MonthKey;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(key: &Option<MonthKey>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match key {
                Some(key) => serializer.serialize_some(&key.to_iso_date()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<MonthKey>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if !raw.trim().is_empty() => MonthKey::parse(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_round_trip() {
        for key in [
            MonthKey::new(2000, 1),
            MonthKey::new(2026, 12),
            MonthKey::new(1999, 7),
        ] {
            assert_eq!(MonthKey::from_ordinal(key.ordinal()), key);
        }
    }

    #[test]
    fn offset_crosses_year_boundaries() {
        let key = MonthKey::new(2026, 11);
        assert_eq!(key.offset(2), MonthKey::new(2027, 1));
        assert_eq!(key.offset(-11), MonthKey::new(2025, 12));
        assert_eq!(key.months_until(MonthKey::new(2027, 12)), 13);
    }

    #[test]
    fn labels() {
        let key = MonthKey::new(2026, 7);
        assert_eq!(key.abbrev(), "Jul");
        assert_eq!(key.calendar_label(), "Jul 2026");
        assert_eq!(key.to_string(), "2026-07");
        assert_eq!(key.to_iso_date(), "2026-07-01");
    }

    #[test]
    fn parse_accepts_boundary_formats() {
        let expected = MonthKey::new(2026, 3);
        assert_eq!(MonthKey::parse("2026-03").unwrap(), expected);
        assert_eq!(MonthKey::parse("2026-03-17").unwrap(), expected);
        assert_eq!(
            MonthKey::parse("2026-03-01T00:00:00.000Z").unwrap(),
            expected
        );
        assert_eq!("2026-03".parse::<MonthKey>().unwrap(), expected);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(MonthKey::parse("2026-13").is_err());
        assert!(MonthKey::parse("March 2026").is_err());
        assert!(MonthKey::parse("").is_err());
    }

    #[test]
    fn try_new_rejects_zero_month() {
        assert!(MonthKey::try_new(2026, 0).is_err());
        assert!(MonthKey::try_new(2026, 12).is_ok());
    }

    #[test]
    #[should_panic(expected = "month ordinal out of range")]
    fn new_panics_on_bad_month() {
        let _ = MonthKey::new(2026, 13);
    }
}
