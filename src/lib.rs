//! Locale-aware week fields for dates.
//!
//! Text is parsed against a letter pattern (`"Y-ww-e"`, `"e W M y"`) into
//! raw fields, and the fields are resolved into a calendar date under the
//! week rules of a locale: which weekday starts the week and how many days
//! of January make week 1.
//!
//! ```
//! use week_fields::{DateFormatter, Locale};
//!
//! let formatter = DateFormatter::of_pattern("Y-w-e", &Locale::us()).unwrap();
//! // Sunday of week 1 of week-based year 2008 is still in December 2007
//! assert_eq!(formatter.parse("2008-01-1").unwrap().to_string(), "2007-12-30");
//! ```

mod config;
mod consts;
mod date;
mod error;
mod field;
mod format;
mod locale;
mod pattern;
mod prelude;
mod resolver;
mod types;
mod week;

#[cfg(test)]
mod test_utils;

pub use config::FormatterConfig;
pub use consts::*;
pub use date::{InvalidDate, ResolvedDate};
pub use error::{ConfigurationError, Error, ParseError};
pub use field::{Field, FieldConflict, FieldSet};
pub use format::{DateFormatter, FormatError, ParsedFields, PartialParse};
pub use locale::{Locale, LocaleError, TextStyle, WORLD_REGION, region_week_rules};
pub use pattern::{Item, NumberItem, Pattern, PatternError};
pub use resolver::{ResolveError, Resolution, ResolverStyle, resolve};
pub use types::{InvalidMinimalDays, MinimalDays, days_in_month, days_in_year, is_leap_year};
pub use week::WeekDefinition;

/// Re-exported so callers can name weekdays without depending on chrono.
pub use chrono::Weekday;
