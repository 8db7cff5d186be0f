/// Number of days in a week
pub const DAYS_PER_WEEK: i64 = 7;

/// Smallest valid "minimal days in first week"
pub const MIN_MINIMAL_DAYS: u8 = 1;
/// Largest valid "minimal days in first week"
pub const MAX_MINIMAL_DAYS: u8 = 7;

/// Smallest year accepted by the resolver (proleptic, may be negative)
pub const MIN_YEAR: i64 = -999_999_999;
/// Largest year accepted by the resolver
pub const MAX_YEAR: i64 = 999_999_999;

/// Month number for January
pub const JANUARY: u32 = 1;
/// Month number for February
pub const FEBRUARY: u32 = 2;
/// Month number for December
pub const DECEMBER: u32 = 12;
/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u32 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
/// Largest day-of-month in any month
pub const MAX_DAY_OF_MONTH: i64 = 31;
/// Largest day-of-year in a leap year
pub const MAX_DAY_OF_YEAR: i64 = 366;

/// Largest week-of-month a localized week definition can produce
pub const MAX_WEEK_OF_MONTH: i64 = 6;
/// Largest week-of-year a localized week definition can produce
pub const MAX_WEEK_OF_YEAR: i64 = 54;
/// Largest week-of-week-based-year (long years have 53 weeks)
pub const MAX_WEEK_OF_WEEK_BASED_YEAR: i64 = 53;

/// Days in a common year
pub const DAYS_IN_COMMON_YEAR: i64 = 365;
/// Days in a leap year
pub const DAYS_IN_LEAP_YEAR: i64 = 366;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Base year for two-digit (`yy`, `YY`) years: `13` parses as 2013
pub const REDUCED_YEAR_BASE: i64 = 2000;
/// Width of a reduced two-digit year
pub const REDUCED_YEAR_WIDTH: usize = 2;

/// Widest numeric field accepted by the parser (fits an `i64`)
pub const MAX_NUMERIC_WIDTH: usize = 19;

/// Quote character used for pattern literals
pub const QUOTE: char = '\'';
/// Opens an optional pattern section
pub const OPTIONAL_START: char = '[';
/// Closes an optional pattern section
pub const OPTIONAL_END: char = ']';
/// Characters reserved for future pattern syntax
pub const RESERVED_PATTERN_CHARS: [char; 3] = ['#', '{', '}'];
