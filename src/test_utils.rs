use chrono::{NaiveDate, Weekday};

use crate::date::ResolvedDate;
use crate::field::{Field, FieldSet};
use crate::types::MinimalDays;
use crate::week::WeekDefinition;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn resolved(year: i32, month: u32, day: u32) -> ResolvedDate {
    ResolvedDate::from(date(year, month, day))
}

pub fn week_def(first_day_of_week: Weekday, minimal_days: u8) -> WeekDefinition {
    WeekDefinition::new(first_day_of_week, MinimalDays::new(minimal_days).unwrap())
}

pub fn fields(values: &[(Field, i64)]) -> FieldSet {
    values.iter().copied().collect()
}
