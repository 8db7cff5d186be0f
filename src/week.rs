//! Localized week numbering.
//!
//! A [`WeekDefinition`] fixes which weekday starts a week and how many days
//! of a new year (or month) a week needs to count as week 1. Everything else
//! in this module is arithmetic derived from those two values: the localized
//! day-of-week, week-of-month, week-of-year, and the week-based year whose
//! boundaries follow whole weeks rather than January 1.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_PER_WEEK, JANUARY};
use crate::locale::Locale;
use crate::types::{MinimalDays, days_in_year};

/// Week numbering rules of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekDefinition {
    first_day_of_week: Weekday,
    minimal_days: MinimalDays,
}

impl WeekDefinition {
    /// ISO 8601: Monday start, four days in week 1
    pub const ISO: Self = Self::new(Weekday::Mon, MinimalDays::FOUR);
    /// Sunday start, one day in week 1 (United States)
    pub const SUNDAY_START: Self = Self::new(Weekday::Sun, MinimalDays::ONE);

    pub const fn new(first_day_of_week: Weekday, minimal_days: MinimalDays) -> Self {
        Self {
            first_day_of_week,
            minimal_days,
        }
    }

    /// Looks up the week rules of a locale.
    pub fn of_locale(locale: &Locale) -> Self {
        let (first_day_of_week, minimal_days) = locale.week_rules();
        Self::new(first_day_of_week, minimal_days)
    }

    pub const fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    pub const fn minimal_days(&self) -> MinimalDays {
        self.minimal_days
    }

    /// Day-of-week numbered from the locale's first day (1..=7).
    pub fn localized_day_of_week(&self, weekday: Weekday) -> u32 {
        let iso = weekday.num_days_from_monday();
        let first = self.first_day_of_week.num_days_from_monday();
        (iso + 7 - first) % 7 + 1
    }

    /// Inverse of [`localized_day_of_week`](Self::localized_day_of_week);
    /// the value wraps modulo 7.
    pub fn weekday_from_localized(&self, localized: i64) -> Weekday {
        let first = i64::from(self.first_day_of_week.num_days_from_monday());
        iso_weekday(first + localized.rem_euclid(DAYS_PER_WEEK) + DAYS_PER_WEEK - 1)
    }

    /// Week of the month containing `date`; 0 for days before week 1.
    pub fn week_of_month(&self, date: NaiveDate) -> i64 {
        let dow = i64::from(self.localized_day_of_week(date.weekday()));
        let dom = i64::from(date.day());
        let offset = self.start_of_week_offset(dom, dow);
        compute_week(offset, dom)
    }

    /// Week of the calendar year containing `date`; 0 for days before week 1.
    pub fn week_of_year(&self, date: NaiveDate) -> i64 {
        let dow = i64::from(self.localized_day_of_week(date.weekday()));
        let doy = i64::from(date.ordinal());
        let offset = self.start_of_week_offset(doy, dow);
        compute_week(offset, doy)
    }

    /// Week of the week-based year containing `date` (1..=53).
    pub fn week_of_week_based_year(&self, date: NaiveDate) -> i64 {
        let (_, week) = self.week_date(date);
        week
    }

    /// Week-based year containing `date`; may differ from the calendar
    /// year in the first and last days of a year.
    pub fn week_based_year(&self, date: NaiveDate) -> i64 {
        let (year, _) = self.week_date(date);
        year
    }

    /// Number of weeks in the week-based year `year` (52 or 53).
    pub fn weeks_in_week_based_year(&self, year: i64) -> i64 {
        let jan1_dow = self.localized_day_of_week(jan1_weekday(year));
        let offset = self.start_of_week_offset(1, i64::from(jan1_dow));
        self.new_year_week(offset, year) - 1
    }

    /// First day of week 1 of the week-based year `year`. This may fall in
    /// December of the previous calendar year.
    pub fn first_day_of_week_based_year(&self, year: i64) -> Option<NaiveDate> {
        let jan1 = ymd(year, JANUARY, 1)?;
        let jan1_dow = i64::from(self.localized_day_of_week(jan1.weekday()));
        let offset = self.start_of_week_offset(1, jan1_dow);
        plus_days(jan1, -offset)
    }

    /// Date of localized day `dow` in week `week` of week-based year `year`.
    ///
    /// `week` is clamped to the last week of that year so the result stays
    /// inside it; `dow` is taken as given (1..=7 expected).
    pub fn date_of_week_based_year(&self, year: i64, week: i64, dow: i64) -> Option<NaiveDate> {
        let week = week.min(self.weeks_in_week_based_year(year));
        let start = self.first_day_of_week_based_year(year)?;
        shift(start, week.checked_sub(1)?, dow.checked_sub(1)?)
    }

    /// Offset from day 1 of a period to the first day of its week 1, given
    /// the localized day-of-week `dow` of day number `day` of the period.
    /// Positive when week 1 starts after day 1.
    pub(crate) fn start_of_week_offset(&self, day: i64, dow: i64) -> i64 {
        let week_start = (day - dow).rem_euclid(DAYS_PER_WEEK);
        if week_start + 1 > i64::from(self.minimal_days.get()) {
            DAYS_PER_WEEK - week_start
        } else {
            -week_start
        }
    }

    fn new_year_week(&self, offset: i64, year: i64) -> i64 {
        compute_week(
            offset,
            days_in_year(year) + i64::from(self.minimal_days.get()),
        )
    }

    fn week_date(&self, date: NaiveDate) -> (i64, i64) {
        let year = i64::from(date.year());
        let dow = i64::from(self.localized_day_of_week(date.weekday()));
        let doy = i64::from(date.ordinal());
        let offset = self.start_of_week_offset(doy, dow);
        let week = compute_week(offset, doy);
        if week == 0 {
            // Belongs to the last week of the previous week-based year
            return (year - 1, self.weeks_in_week_based_year(year - 1));
        }
        let new_year_week = self.new_year_week(offset, year);
        if week >= new_year_week {
            (year + 1, week - new_year_week + 1)
        } else {
            (year, week)
        }
    }
}

impl Default for WeekDefinition {
    fn default() -> Self {
        Self::ISO
    }
}

impl fmt::Display for WeekDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WeekDefinition[{}, {}]",
            self.first_day_of_week, self.minimal_days
        )
    }
}

pub(crate) const fn compute_week(offset: i64, day: i64) -> i64 {
    (DAYS_PER_WEEK + offset + (day - 1)).div_euclid(DAYS_PER_WEEK)
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Weekday from days since Monday, wrapping modulo 7.
pub(crate) fn iso_weekday(days_from_monday: i64) -> Weekday {
    let index = usize::try_from(days_from_monday.rem_euclid(DAYS_PER_WEEK)).unwrap_or_default();
    WEEKDAYS[index]
}

/// Weekday of January 1 of any proleptic year, without building a date.
fn jan1_weekday(year: i64) -> Weekday {
    // Days from 0001-01-01 (a Monday) to January 1 of `year`, modulo 7;
    // 365 is one more than a multiple of 7, so each year shifts one weekday
    let y = year.wrapping_sub(1);
    let days = y.rem_euclid(DAYS_PER_WEEK) + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400);
    iso_weekday(days)
}

pub(crate) fn ymd(year: i64, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// `date` moved by `weeks` whole weeks plus `days` days; `None` on overflow.
pub(crate) fn shift(date: NaiveDate, weeks: i64, days: i64) -> Option<NaiveDate> {
    plus_days(date, weeks.checked_mul(DAYS_PER_WEEK)?.checked_add(days)?)
}

pub(crate) fn plus_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}
