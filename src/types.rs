use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, DAYS_IN_MONTH, DECEMBER, FEBRUARY,
    FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_MINIMAL_DAYS, MIN_MINIMAL_DAYS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// Error returned when a "minimal days in first week" value is outside `1..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid minimal days in first week: {0} (must be {MIN_MINIMAL_DAYS}-{MAX_MINIMAL_DAYS})")]
pub struct InvalidMinimalDays(pub u8);

/// Minimal number of days of a new year (or month) that must fall in a week
/// for that week to count as week 1.
/// Uses `NonZeroU8` internally, so 0 is not a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MinimalDays(NonZeroU8);

impl MinimalDays {
    /// A single day of the new year is enough (US style)
    pub const ONE: Self = Self(NonZeroU8::MIN);
    /// Most of the week must belong to the new year (ISO 8601)
    pub const FOUR: Self = Self(NonZeroU8::MIN.saturating_add(3));

    /// Creates a new value, validating that it's in `1..=7`
    ///
    /// # Errors
    /// Returns `InvalidMinimalDays` if the value is 0 or > 7.
    pub fn new(value: u8) -> Result<Self, InvalidMinimalDays> {
        let non_zero = NonZeroU8::new(value).ok_or(InvalidMinimalDays(value))?;
        if value > MAX_MINIMAL_DAYS {
            return Err(InvalidMinimalDays(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for MinimalDays {
    type Error = InvalidMinimalDays;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MinimalDays> for u8 {
    fn from(days: MinimalDays) -> Self {
        days.0.get()
    }
}

impl fmt::Display for MinimalDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Helper functions

/// Proleptic Gregorian leap year rule, valid for negative years too.
pub const fn is_leap_year(year: i64) -> bool {
    (year.rem_euclid(LEAP_YEAR_CYCLE) == 0 && year.rem_euclid(CENTURY_CYCLE) != 0)
        || year.rem_euclid(GREGORIAN_CYCLE) == 0
}

pub const fn days_in_year(year: i64) -> i64 {
    if is_leap_year(year) {
        DAYS_IN_LEAP_YEAR
    } else {
        DAYS_IN_COMMON_YEAR
    }
}

pub const fn days_in_month(year: i64, month: u32) -> u32 {
    debug_assert!(month != 0 && month <= DECEMBER);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
