use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::field::{Field, FieldSet};
use crate::prelude::*;

/// Error returned when text is not an ISO `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid date: {0}")]
pub struct InvalidDate(pub String);

/// A complete proleptic Gregorian calendar date produced by resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
#[display(fmt = "{_0}")]
pub struct ResolvedDate(NaiveDate);

impl ResolvedDate {
    /// Creates a date from year, month and day, or `None` if no such date
    /// exists.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Returns the year (may be zero or negative)
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month (1..=12)
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day of month
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The year, month and day-of-month fields that resolve back to this date.
    pub fn to_fields(&self) -> FieldSet {
        [
            (Field::Year, i64::from(self.year())),
            (Field::Month, i64::from(self.month())),
            (Field::DayOfMonth, i64::from(self.day())),
        ]
        .into_iter()
        .collect()
    }
}

impl FromStr for ResolvedDate {
    type Err = InvalidDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<NaiveDate>()
            .map(Self)
            .map_err(|_| InvalidDate(s.to_owned()))
    }
}

impl serde::Serialize for ResolvedDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ResolvedDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
