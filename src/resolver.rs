//! Turns a [`FieldSet`] into a calendar date.
//!
//! Resolution runs in two phases. Plain calendar fields go first: year of
//! era becomes a proleptic year, then year/month/day-of-month or
//! year/day-of-year produce a date directly. If they don't, the localized
//! week fields are tried against the [`WeekDefinition`] passed in:
//!
//! - year + month + week-of-month + day-of-week
//! - year + week-of-year + day-of-week
//! - week-based-year + week-of-week-based-year + day-of-week
//!
//! Whatever fields remain once a date is found are cross-checked against
//! it. A field combination that determines no date is not an error: the
//! caller gets [`Resolution::Insufficient`] with the raw fields.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::consts::JANUARY;
use crate::date::ResolvedDate;
use crate::field::{Field, FieldConflict, FieldSet};
use crate::prelude::*;
use crate::types::days_in_month;
use crate::week::{WeekDefinition, iso_weekday, plus_days, shift, ymd};

/// How strictly out-of-range or overflowing values are treated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResolverStyle {
    /// Values must be valid and the result must stay in the named month or year
    #[display(fmt = "strict")]
    Strict,
    /// Values must be in range; day-of-month is clamped to the month length
    /// and week 53 to the last week of the year
    #[default]
    #[display(fmt = "smart")]
    Smart,
    /// Out-of-range values roll over into neighbouring periods
    #[display(fmt = "lenient")]
    Lenient,
}

/// Error type for field combinations that are present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A field value is outside the range allowed for it.
    #[error("Invalid value for {field}: {value} (valid values {min} - {max})")]
    ValueOutOfRange {
        field: Field,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Two fields that map to the same value disagree.
    #[error(transparent)]
    FieldConflict(#[from] FieldConflict),

    /// A field left over after resolution disagrees with the date.
    #[error("Conflict found: {field} {parsed} differs from {field} {resolved} derived from {date}")]
    DateConflict {
        field: Field,
        parsed: i64,
        resolved: i64,
        date: ResolvedDate,
    },

    /// Strict resolution produced a date outside the requested period.
    #[error("Strict mode rejected resolved date {date}: {reason}")]
    StrictRejected {
        date: ResolvedDate,
        reason: &'static str,
    },

    /// The date would fall outside the representable calendar.
    #[error("Resolved date is outside the supported range")]
    DateOutOfRange,
}

/// Outcome of a successful resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Resolution {
    /// The fields determine this date.
    Date(ResolvedDate),
    /// The fields are consistent but do not determine a date; these are the
    /// fields as given.
    Insufficient(FieldSet),
}

impl Resolution {
    pub const fn date(&self) -> Option<ResolvedDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Insufficient(_) => None,
        }
    }

    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Date(_))
    }
}

/// Resolves `fields` into a date using `week_def` for every localized field.
///
/// Pure: `fields` is not modified, and the same inputs always give the same
/// output.
///
/// # Errors
/// Returns `ResolveError` when a value is out of range for `style`, when
/// fields contradict each other or the resolved date, or when the date is
/// not representable.
///
/// # Examples
///
/// ```
/// use week_fields::{Field, FieldSet, ResolverStyle, WeekDefinition, resolve};
///
/// // Saturday (day 7 of a Sunday-first week) of week 52 of week-based year 2008
/// let fields: FieldSet = [
///     (Field::WeekBasedYear, 2008),
///     (Field::WeekOfWeekBasedYear, 52),
///     (Field::DayOfWeek, 7),
/// ]
/// .into_iter()
/// .collect();
///
/// let resolution = resolve(&WeekDefinition::SUNDAY_START, &fields, ResolverStyle::Smart).unwrap();
/// assert_eq!(resolution.date().unwrap().to_string(), "2008-12-27");
/// ```
pub fn resolve(
    week_def: &WeekDefinition,
    fields: &FieldSet,
    style: ResolverStyle,
) -> Result<Resolution, ResolveError> {
    Resolver {
        week_def,
        style,
        fields: fields.clone(),
    }
    .run()
    .map(|date| match date {
        Some(date) => Resolution::Date(ResolvedDate::from(date)),
        None => Resolution::Insufficient(fields.clone()),
    })
}

struct Resolver<'a> {
    week_def: &'a WeekDefinition,
    style: ResolverStyle,
    /// Working copy; fields are removed as they are consumed
    fields: FieldSet,
}

impl Resolver<'_> {
    fn run(mut self) -> Result<Option<NaiveDate>, ResolveError> {
        self.resolve_year_of_era()?;
        let mut date = self.resolve_calendar_date()?;
        let dow = self.resolve_day_of_week()?;
        if date.is_none() {
            if let Some(dow) = dow {
                date = self.resolve_week_date(dow)?;
            }
        }
        if let Some(date) = date {
            self.cross_check(date)?;
        }
        Ok(date)
    }

    fn lenient(&self) -> bool {
        self.style == ResolverStyle::Lenient
    }

    fn resolve_year_of_era(&mut self) -> Result<(), ResolveError> {
        let Some(year_of_era) = self.fields.get(Field::YearOfEra) else {
            return Ok(());
        };
        // Without an era, strict mode will not assume the common era; the
        // value stays behind and is only cross-checked
        if self.style == ResolverStyle::Strict {
            return Ok(());
        }
        if !self.lenient() {
            check_range(Field::YearOfEra, year_of_era)?;
        }
        self.fields.remove(Field::YearOfEra);
        self.fields.set(Field::Year, year_of_era)?;
        Ok(())
    }

    fn resolve_calendar_date(&mut self) -> Result<Option<NaiveDate>, ResolveError> {
        let Some(year) = self.fields.get(Field::Year) else {
            return Ok(None);
        };
        check_range(Field::Year, year)?;

        if let (Some(month), Some(day)) = (
            self.fields.get(Field::Month),
            self.fields.get(Field::DayOfMonth),
        ) {
            let date = self.resolve_ymd(year, month, day)?;
            self.consume(&[Field::Year, Field::Month, Field::DayOfMonth]);
            return Ok(Some(date));
        }

        if let Some(day_of_year) = self.fields.get(Field::DayOfYear) {
            let date = self.resolve_yd(year, day_of_year)?;
            self.consume(&[Field::Year, Field::DayOfYear]);
            return Ok(Some(date));
        }

        Ok(None)
    }

    fn resolve_ymd(&self, year: i64, month: i64, day: i64) -> Result<NaiveDate, ResolveError> {
        if self.lenient() {
            let first = ymd(year, JANUARY, 1).ok_or(ResolveError::DateOutOfRange)?;
            return plus_months(first, month.checked_sub(1))
                .and_then(|date| plus_days(date, day.checked_sub(1)?))
                .ok_or(ResolveError::DateOutOfRange);
        }

        let month = to_u32(check_range(Field::Month, month)?);
        let day = to_u32(check_range(Field::DayOfMonth, day)?);
        let length = days_in_month(year, month);
        let day = if day <= length {
            day
        } else if self.style == ResolverStyle::Smart {
            length
        } else {
            return Err(ResolveError::ValueOutOfRange {
                field: Field::DayOfMonth,
                value: i64::from(day),
                min: 1,
                max: i64::from(length),
            });
        };
        ymd(year, month, day).ok_or(ResolveError::DateOutOfRange)
    }

    fn resolve_yd(&self, year: i64, day_of_year: i64) -> Result<NaiveDate, ResolveError> {
        let first = ymd(year, JANUARY, 1).ok_or(ResolveError::DateOutOfRange)?;
        if self.lenient() {
            return day_of_year
                .checked_sub(1)
                .and_then(|days| plus_days(first, days))
                .ok_or(ResolveError::DateOutOfRange);
        }

        check_range(Field::DayOfYear, day_of_year)?;
        let length = crate::types::days_in_year(year);
        if day_of_year > length {
            return Err(ResolveError::ValueOutOfRange {
                field: Field::DayOfYear,
                value: day_of_year,
                min: 1,
                max: length,
            });
        }
        plus_days(first, day_of_year - 1).ok_or(ResolveError::DateOutOfRange)
    }

    /// Converts the localized day-of-week into an ISO one (so a resolved date
    /// can be cross-checked against it) and returns the localized value
    /// the week arithmetic works with.
    fn resolve_day_of_week(&mut self) -> Result<Option<i64>, ResolveError> {
        if let Some(localized) = self.fields.remove(Field::DayOfWeek) {
            if !self.lenient() {
                check_range(Field::DayOfWeek, localized)?;
            }
            let weekday = self.week_def.weekday_from_localized(localized);
            self.fields
                .set(Field::IsoDayOfWeek, i64::from(weekday.number_from_monday()))
                .map_err(|conflict| FieldConflict {
                    field: Field::DayOfWeek,
                    ..conflict
                })?;
            return Ok(Some(localized));
        }

        let Some(iso) = self.fields.get(Field::IsoDayOfWeek) else {
            return Ok(None);
        };
        if !self.lenient() {
            check_range(Field::IsoDayOfWeek, iso)?;
        }
        let weekday = iso_weekday(iso.wrapping_sub(1));
        Ok(Some(i64::from(self.week_def.localized_day_of_week(weekday))))
    }

    fn resolve_week_date(&mut self, dow: i64) -> Result<Option<NaiveDate>, ResolveError> {
        if let Some(year) = self.fields.get(Field::Year) {
            if let (Some(month), Some(week)) = (
                self.fields.get(Field::Month),
                self.fields.get(Field::WeekOfMonth),
            ) {
                let date = self.resolve_week_of_month(year, month, week, dow)?;
                self.consume(&[
                    Field::Year,
                    Field::Month,
                    Field::WeekOfMonth,
                    Field::IsoDayOfWeek,
                ]);
                return Ok(Some(date));
            }
            if let Some(week) = self.fields.get(Field::WeekOfYear) {
                let date = self.resolve_week_of_year(year, week, dow)?;
                self.consume(&[Field::Year, Field::WeekOfYear, Field::IsoDayOfWeek]);
                return Ok(Some(date));
            }
        }

        if let (Some(year), Some(week)) = (
            self.fields.get(Field::WeekBasedYear),
            self.fields.get(Field::WeekOfWeekBasedYear),
        ) {
            let date = self.resolve_week_based_year(year, week, dow)?;
            self.consume(&[
                Field::WeekBasedYear,
                Field::WeekOfWeekBasedYear,
                Field::IsoDayOfWeek,
            ]);
            return Ok(Some(date));
        }

        Ok(None)
    }

    fn resolve_week_of_month(
        &self,
        year: i64,
        month: i64,
        week: i64,
        dow: i64,
    ) -> Result<NaiveDate, ResolveError> {
        let first = if self.lenient() {
            let jan1 = ymd(year, JANUARY, 1).ok_or(ResolveError::DateOutOfRange)?;
            plus_months(jan1, month.checked_sub(1)).ok_or(ResolveError::DateOutOfRange)?
        } else {
            let month = to_u32(check_range(Field::Month, month)?);
            check_range(Field::WeekOfMonth, week)?;
            ymd(year, month, 1).ok_or(ResolveError::DateOutOfRange)?
        };

        let date = self.anchored(first, week, self.week_def.week_of_month(first), dow)?;
        if self.style == ResolverStyle::Strict && i64::from(date.month()) != month {
            return Err(ResolveError::StrictRejected {
                date: date.into(),
                reason: "date is in a different month",
            });
        }
        Ok(date)
    }

    fn resolve_week_of_year(&self, year: i64, week: i64, dow: i64) -> Result<NaiveDate, ResolveError> {
        if !self.lenient() {
            check_range(Field::WeekOfYear, week)?;
        }
        let first = ymd(year, JANUARY, 1).ok_or(ResolveError::DateOutOfRange)?;
        let date = self.anchored(first, week, self.week_def.week_of_year(first), dow)?;
        if self.style == ResolverStyle::Strict && i64::from(date.year()) != year {
            return Err(ResolveError::StrictRejected {
                date: date.into(),
                reason: "date is in a different year",
            });
        }
        Ok(date)
    }

    fn resolve_week_based_year(
        &self,
        year: i64,
        week: i64,
        dow: i64,
    ) -> Result<NaiveDate, ResolveError> {
        check_range(Field::WeekBasedYear, year)?;

        if self.lenient() {
            let start = self
                .week_def
                .first_day_of_week_based_year(year)
                .ok_or(ResolveError::DateOutOfRange)?;
            let weeks = week.checked_sub(1).ok_or(ResolveError::DateOutOfRange)?;
            let days = dow.checked_sub(1).ok_or(ResolveError::DateOutOfRange)?;
            return shift(start, weeks, days).ok_or(ResolveError::DateOutOfRange);
        }

        check_range(Field::WeekOfWeekBasedYear, week)?;
        let weeks_in_year = self.week_def.weeks_in_week_based_year(year);
        if self.style == ResolverStyle::Strict && week > weeks_in_year {
            return Err(ResolveError::ValueOutOfRange {
                field: Field::WeekOfWeekBasedYear,
                value: week,
                min: 1,
                max: weeks_in_year,
            });
        }

        let date = self
            .week_def
            .date_of_week_based_year(year, week, dow)
            .ok_or(ResolveError::DateOutOfRange)?;
        if self.style == ResolverStyle::Strict && self.week_def.week_based_year(date) != year {
            return Err(ResolveError::StrictRejected {
                date: date.into(),
                reason: "date is in a different week-based year",
            });
        }
        Ok(date)
    }

    /// `anchor` moved to localized day `dow` of week `week`, where
    /// `anchor_week` is the week number of the anchor itself.
    fn anchored(
        &self,
        anchor: NaiveDate,
        week: i64,
        anchor_week: i64,
        dow: i64,
    ) -> Result<NaiveDate, ResolveError> {
        let anchor_dow = i64::from(self.week_def.localized_day_of_week(anchor.weekday()));
        week.checked_sub(anchor_week)
            .zip(dow.checked_sub(anchor_dow))
            .and_then(|(weeks, days)| shift(anchor, weeks, days))
            .ok_or(ResolveError::DateOutOfRange)
    }

    fn consume(&mut self, fields: &[Field]) {
        for field in fields {
            self.fields.remove(*field);
        }
    }

    fn cross_check(&self, date: NaiveDate) -> Result<(), ResolveError> {
        for (field, parsed) in self.fields.iter() {
            let resolved = field.value_of(date, self.week_def);
            if resolved != parsed {
                return Err(ResolveError::DateConflict {
                    field,
                    parsed,
                    resolved,
                    date: date.into(),
                });
            }
        }
        Ok(())
    }
}

fn check_range(field: Field, value: i64) -> Result<i64, ResolveError> {
    let (min, max) = field.range();
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ResolveError::ValueOutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Only called on values `check_range` accepted, which all fit a `u32`.
fn to_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

fn plus_months(date: NaiveDate, months: Option<i64>) -> Option<NaiveDate> {
    let months = months?;
    let count = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(count)
    } else {
        date.checked_sub_months(count)
    }
}
