//! Temporal field kinds and the sparse set of raw values collected while
//! parsing.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::consts::{
    MAX_DAY_OF_MONTH, MAX_DAY_OF_YEAR, MAX_WEEK_OF_MONTH, MAX_WEEK_OF_WEEK_BASED_YEAR,
    MAX_WEEK_OF_YEAR, MAX_YEAR, MIN_YEAR,
};
use crate::prelude::*;
use crate::week::WeekDefinition;

/// A date field that a pattern letter can produce.
///
/// `DayOfWeek` and the week fields are relative to a [`WeekDefinition`];
/// the rest are plain ISO calendar fields.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    /// Proleptic year (`u`)
    #[display(fmt = "year")]
    Year,
    /// Year within the common era (`y`)
    #[display(fmt = "year-of-era")]
    YearOfEra,
    /// Month of year (`M`, `L`)
    #[display(fmt = "month")]
    Month,
    /// Day of month (`d`)
    #[display(fmt = "day-of-month")]
    DayOfMonth,
    /// Day of year (`D`)
    #[display(fmt = "day-of-year")]
    DayOfYear,
    /// ISO day-of-week, Monday = 1 (`E`)
    #[display(fmt = "iso-day-of-week")]
    IsoDayOfWeek,
    /// Localized day-of-week, the locale's first day = 1 (`e`, `c`)
    #[display(fmt = "day-of-week")]
    DayOfWeek,
    /// Localized week of month (`W`)
    #[display(fmt = "week-of-month")]
    WeekOfMonth,
    /// Localized week of calendar year
    #[display(fmt = "week-of-year")]
    WeekOfYear,
    /// Localized week of week-based year (`w`)
    #[display(fmt = "week-of-week-based-year")]
    WeekOfWeekBasedYear,
    /// Localized week-based year (`Y`)
    #[display(fmt = "week-based-year")]
    WeekBasedYear,
}

impl Field {
    /// Outer bounds of valid values, ignoring the month or year at hand.
    pub const fn range(self) -> (i64, i64) {
        match self {
            Self::Year | Self::WeekBasedYear => (MIN_YEAR, MAX_YEAR),
            Self::YearOfEra => (1, MAX_YEAR + 1),
            Self::Month => (1, 12),
            Self::DayOfMonth => (1, MAX_DAY_OF_MONTH),
            Self::DayOfYear => (1, MAX_DAY_OF_YEAR),
            Self::IsoDayOfWeek | Self::DayOfWeek => (1, 7),
            Self::WeekOfMonth => (0, MAX_WEEK_OF_MONTH),
            Self::WeekOfYear => (0, MAX_WEEK_OF_YEAR),
            Self::WeekOfWeekBasedYear => (1, MAX_WEEK_OF_WEEK_BASED_YEAR),
        }
    }

    /// Whether the value depends on a week definition.
    pub const fn is_localized(self) -> bool {
        matches!(
            self,
            Self::DayOfWeek
                | Self::WeekOfMonth
                | Self::WeekOfYear
                | Self::WeekOfWeekBasedYear
                | Self::WeekBasedYear
        )
    }

    /// The value this field takes for `date` under `week_def`.
    pub fn value_of(self, date: NaiveDate, week_def: &WeekDefinition) -> i64 {
        match self {
            Self::Year => i64::from(date.year()),
            Self::YearOfEra => {
                let year = i64::from(date.year());
                if year >= 1 { year } else { 1 - year }
            },
            Self::Month => i64::from(date.month()),
            Self::DayOfMonth => i64::from(date.day()),
            Self::DayOfYear => i64::from(date.ordinal()),
            Self::IsoDayOfWeek => i64::from(date.weekday().number_from_monday()),
            Self::DayOfWeek => i64::from(week_def.localized_day_of_week(date.weekday())),
            Self::WeekOfMonth => week_def.week_of_month(date),
            Self::WeekOfYear => week_def.week_of_year(date),
            Self::WeekOfWeekBasedYear => week_def.week_of_week_based_year(date),
            Self::WeekBasedYear => week_def.week_based_year(date),
        }
    }
}

/// Error returned when a field is set twice with different values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Conflict found: {field} {existing} differs from {new}")]
pub struct FieldConflict {
    pub field: Field,
    pub existing: i64,
    pub new: i64,
}

/// Sparse mapping from field to raw, unvalidated value.
///
/// Absent and zero are distinct: `get` returns `None` only for fields that
/// were never set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet {
    values: BTreeMap<Field, i64>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<i64> {
        self.values.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Sets `field` unless it already holds a different value.
    ///
    /// # Errors
    /// Returns `FieldConflict` if the field is present with another value;
    /// the set is left unchanged.
    pub fn set(&mut self, field: Field, value: i64) -> Result<(), FieldConflict> {
        match self.values.entry(field) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            },
            btree_map::Entry::Occupied(entry) if *entry.get() == value => Ok(()),
            btree_map::Entry::Occupied(entry) => Err(FieldConflict {
                field,
                existing: *entry.get(),
                new: value,
            }),
        }
    }

    /// Builder form of [`set`](Self::set).
    ///
    /// # Errors
    /// Returns `FieldConflict` if the field is present with another value.
    pub fn with(mut self, field: Field, value: i64) -> Result<Self, FieldConflict> {
        self.set(field, value)?;
        Ok(self)
    }

    pub fn remove(&mut self, field: Field) -> Option<i64> {
        self.values.remove(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fields and values in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, i64)> + '_ {
        self.values.iter().map(|(field, value)| (*field, *value))
    }
}

impl FromIterator<(Field, i64)> for FieldSet {
    /// Later values replace earlier ones for the same field.
    fn from_iter<I: IntoIterator<Item = (Field, i64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}={value}")?;
        }
        f.write_str("}")
    }
}
