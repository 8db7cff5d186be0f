//! Printing and parsing dates with a compiled [`Pattern`].
//!
//! Parsing happens in two steps. [`DateFormatter::parse_unresolved`] only
//! reads text into a [`FieldSet`]; [`resolve`](crate::resolve) then turns
//! the fields into a date using the formatter's week definition. Keeping
//! the steps apart lets callers inspect raw week fields that do not (yet)
//! name a day.

use crate::date::ResolvedDate;
use crate::error::{Error, ParseError};
use crate::field::{Field, FieldSet};
use crate::locale::{Locale, TextStyle};
use crate::pattern::{Item, NumberItem, Pattern, PatternError};
use crate::resolver::{Resolution, ResolverStyle, resolve};
use crate::week::WeekDefinition;

/// Error type for printing a date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Field {field} value {value} exceeds the maximum print width of {width}")]
    ValueTooWide { field: Field, value: i64, width: usize },

    #[error("Field {field} value {value} cannot be negative")]
    NegativeValue { field: Field, value: i64 },
}

/// Fields read from text, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFields {
    pub fields: FieldSet,
    /// Byte offset just past the last character consumed
    pub end: usize,
}

/// Fields read from text plus the date they resolve to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialParse {
    pub fields: FieldSet,
    pub end: usize,
    pub date: Option<ResolvedDate>,
}

/// Formats and parses dates according to a pattern and a locale.
///
/// Immutable once built; share it freely.
///
/// # Examples
///
/// ```
/// use week_fields::{DateFormatter, Locale};
///
/// let formatter = DateFormatter::of_pattern("e W M y", &Locale::us()).unwrap();
/// let date = formatter.parse("6 2 7 2012").unwrap();
/// assert_eq!(date.to_string(), "2012-07-13");
/// assert_eq!(formatter.format(&date).unwrap(), "6 2 7 2012");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    pattern: Pattern,
    locale: Locale,
    week_def: WeekDefinition,
    style: ResolverStyle,
}

impl DateFormatter {
    /// Compiles `pattern` for `locale`, taking week rules from the locale.
    ///
    /// # Errors
    /// Returns `PatternError` if the pattern does not compile.
    pub fn of_pattern(pattern: &str, locale: &Locale) -> Result<Self, PatternError> {
        Ok(Self::new(Pattern::compile(pattern)?, locale))
    }

    pub fn new(pattern: Pattern, locale: &Locale) -> Self {
        Self {
            pattern,
            locale: locale.clone(),
            week_def: WeekDefinition::of_locale(locale),
            style: ResolverStyle::default(),
        }
    }

    /// Replaces the locale's week rules.
    #[must_use]
    pub fn with_week_definition(mut self, week_def: WeekDefinition) -> Self {
        self.week_def = week_def;
        self
    }

    #[must_use]
    pub fn with_resolver_style(mut self, style: ResolverStyle) -> Self {
        self.style = style;
        self
    }

    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    pub const fn week_definition(&self) -> &WeekDefinition {
        &self.week_def
    }

    pub const fn resolver_style(&self) -> ResolverStyle {
        self.style
    }

    /// Reads `text` from byte offset `start` into raw fields, without
    /// resolving them. Text after the pattern's last item is left alone.
    ///
    /// # Errors
    /// Returns `ParseError` carrying the offset where the text stopped
    /// matching, or where a field was given two different values.
    pub fn parse_unresolved(&self, text: &str, start: usize) -> Result<ParsedFields, ParseError> {
        if start > text.len() || !text.is_char_boundary(start) {
            return Err(ParseError::IndexOutOfBounds {
                index: start,
                len: text.len(),
            });
        }
        let mut parser = Parser {
            text,
            pos: start,
            fields: FieldSet::new(),
            locale: &self.locale,
        };
        parser.parse_items(self.pattern.items())?;
        Ok(ParsedFields {
            fields: parser.fields,
            end: parser.pos,
        })
    }

    /// Parses from `start` and resolves what was read, if the fields are
    /// enough for a date.
    ///
    /// # Errors
    /// Returns `Error::Parse` for malformed text and `Error::Resolve` for
    /// fields that are invalid or contradict each other.
    pub fn parse_partial(&self, text: &str, start: usize) -> Result<PartialParse, Error> {
        let ParsedFields { fields, end } = self.parse_unresolved(text, start)?;
        let date = resolve(&self.week_def, &fields, self.style)?.date();
        Ok(PartialParse { fields, end, date })
    }

    /// Parses the whole of `text` into a date.
    ///
    /// # Errors
    /// Returns `Error::Parse` for malformed or trailing text,
    /// `Error::Resolve` for invalid fields and `Error::Unresolved` when the
    /// fields do not determine a date.
    pub fn parse(&self, text: &str) -> Result<ResolvedDate, Error> {
        let ParsedFields { fields, end } = self.parse_unresolved(text, 0)?;
        if end != text.len() {
            return Err(ParseError::TrailingText { index: end }.into());
        }
        match resolve(&self.week_def, &fields, self.style)? {
            Resolution::Date(date) => Ok(date),
            Resolution::Insufficient(fields) => Err(Error::Unresolved(fields)),
        }
    }

    /// Prints `date` using the pattern, the locale's names and the
    /// formatter's week definition.
    ///
    /// # Errors
    /// Returns `FormatError` when a value does not fit its item.
    pub fn format(&self, date: &ResolvedDate) -> Result<String, FormatError> {
        let mut out = String::new();
        self.format_items(self.pattern.items(), date, &mut out)?;
        Ok(out)
    }

    fn format_items(
        &self,
        items: &[Item],
        date: &ResolvedDate,
        out: &mut String,
    ) -> Result<(), FormatError> {
        for item in items {
            match item {
                Item::Literal(literal) => out.push_str(literal),
                Item::Number(number) => {
                    let value = self.value(number.field, date);
                    out.push_str(&format_number(number, value)?);
                },
                Item::ReducedYear { field, .. } => {
                    let value = self.value(*field, date);
                    out.push_str(&format!("{:02}", value.rem_euclid(100)));
                },
                Item::Text { field, style } => {
                    let value = self.value(*field, date);
                    match self.name(*field, *style, value) {
                        Some(name) => out.push_str(name),
                        None => out.push_str(&value.to_string()),
                    }
                },
                Item::Optional(inner) => self.format_items(inner, date, out)?,
            }
        }
        Ok(())
    }

    fn value(&self, field: Field, date: &ResolvedDate) -> i64 {
        field.value_of(date.as_naive(), &self.week_def)
    }

    fn name(&self, field: Field, style: TextStyle, value: i64) -> Option<&'static str> {
        let names = text_names(&self.locale, field, style)?;
        let index = usize::try_from(value.checked_sub(1)?).ok()?;
        names.get(index).copied()
    }
}

fn format_number(item: &NumberItem, value: i64) -> Result<String, FormatError> {
    if value < 0 && !item.signed {
        return Err(FormatError::NegativeValue {
            field: item.field,
            value,
        });
    }
    let digits = format!("{:0width$}", value.unsigned_abs(), width = item.min_width);
    if digits.len() > item.max_width {
        return Err(FormatError::ValueTooWide {
            field: item.field,
            value,
            width: item.max_width,
        });
    }
    Ok(if value < 0 { format!("-{digits}") } else { digits })
}

/// Month names for `Month`, Monday-first weekday names for `IsoDayOfWeek`.
fn text_names(locale: &Locale, field: Field, style: TextStyle) -> Option<&'static [&'static str]> {
    match field {
        Field::Month => Some(locale.month_names(style).as_slice()),
        Field::IsoDayOfWeek => Some(locale.weekday_names(style).as_slice()),
        _ => None,
    }
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
    fields: FieldSet,
    locale: &'a Locale,
}

impl<'a> Parser<'a> {
    fn parse_items(&mut self, items: &[Item]) -> Result<(), ParseError> {
        for item in items {
            match item {
                Item::Literal(literal) => self.parse_literal(literal)?,
                Item::Number(number) => {
                    let start = self.pos;
                    let value = self.parse_number(number)?;
                    self.store(number.field, value, start)?;
                },
                Item::ReducedYear { field, base } => {
                    let start = self.pos;
                    let value = self.parse_reduced(*base)?;
                    self.store(*field, value, start)?;
                },
                Item::Text { field, style } => {
                    let start = self.pos;
                    let value = self.parse_text(*field, *style)?;
                    self.store(*field, value, start)?;
                },
                Item::Optional(inner) => {
                    let (pos, fields) = (self.pos, self.fields.clone());
                    if self.parse_items(inner).is_err() {
                        self.pos = pos;
                        self.fields = fields;
                    }
                },
            }
        }
        Ok(())
    }

    fn rest(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or_default()
    }

    fn mismatch(&self, expected: impl Into<String>) -> ParseError {
        ParseError::Mismatch {
            index: self.pos,
            expected: expected.into(),
        }
    }

    fn store(&mut self, field: Field, value: i64, start: usize) -> Result<(), ParseError> {
        self.fields
            .set(field, value)
            .map_err(|conflict| ParseError::Conflict {
                index: start,
                field,
                existing: conflict.existing,
                parsed: conflict.new,
            })
    }

    fn parse_literal(&mut self, literal: &str) -> Result<(), ParseError> {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else {
            Err(self.mismatch(format!("{literal:?}")))
        }
    }

    /// Reads an optionally signed run of ASCII digits. A variable-width item
    /// stops early enough to leave `reserved` digits for the fixed-width
    /// items after it.
    fn parse_number(&mut self, item: &NumberItem) -> Result<i64, ParseError> {
        let rest = self.rest();
        let (negative, sign_len) = match rest.as_bytes().first() {
            Some(b'-') if item.signed => (true, 1),
            Some(b'+') if item.signed => (false, 1),
            _ => (false, 0),
        };
        let available = rest[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
        let count = available
            .saturating_sub(item.reserved)
            .min(item.max_width)
            .max(item.min_width.min(available));
        if count < item.min_width || count == 0 {
            return Err(self.mismatch(digits_description(item)));
        }

        let digits = &rest[sign_len..sign_len + count];
        let value = digits
            .parse::<i64>()
            .map_err(|_| self.mismatch("a number that fits in 64 bits"))?;
        self.pos += sign_len + count;
        Ok(if negative { -value } else { value })
    }

    /// Exactly two digits, added to `base`.
    fn parse_reduced(&mut self, base: i64) -> Result<i64, ParseError> {
        let rest = self.rest().as_bytes();
        match rest {
            [tens @ b'0'..=b'9', ones @ b'0'..=b'9', ..] => {
                let value = i64::from(tens - b'0') * 10 + i64::from(ones - b'0');
                self.pos += 2;
                Ok(base + value)
            },
            _ => Err(self.mismatch("2 digits")),
        }
    }

    /// Longest matching locale name, or failing that a plain number.
    fn parse_text(&mut self, field: Field, style: TextStyle) -> Result<i64, ParseError> {
        let rest = self.rest();
        let mut best: Option<(usize, &str)> = None;
        for (i, name) in text_names(self.locale, field, style)
            .unwrap_or_default()
            .iter()
            .copied()
            .enumerate()
        {
            if rest.starts_with(name) && best.is_none_or(|(_, found)| name.len() > found.len()) {
                best = Some((i, name));
            }
        }

        if let Some((index, name)) = best {
            self.pos += name.len();
            return i64::try_from(index + 1).map_err(|_| self.mismatch("a name"));
        }

        let number = NumberItem {
            field,
            min_width: 1,
            max_width: 2,
            signed: false,
            reserved: 0,
        };
        self.parse_number(&number)
            .map_err(|_| self.mismatch(format!("a {style} {field} name or number")))
    }
}

fn digits_description(item: &NumberItem) -> String {
    if item.is_fixed_width() {
        format!("{} digits", item.min_width)
    } else {
        format!("{} to {} digits", item.min_width, item.max_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolveError;
    use crate::test_utils::{fields, resolved};
    use chrono::Weekday;
    use proptest::prelude::*;

    fn us(pattern: &str) -> DateFormatter {
        DateFormatter::of_pattern(pattern, &Locale::us()).unwrap()
    }

    #[test]
    fn test_parse_single_week_fields() {
        struct TestCase {
            pattern: &'static str,
            text: &'static str,
            field: Field,
            end: usize,
            value: i64,
        }

        let cases = [
            TestCase {
                pattern: "e",
                text: "6",
                field: Field::DayOfWeek,
                end: 1,
                value: 6,
            },
            TestCase {
                pattern: "W",
                text: "3",
                field: Field::WeekOfMonth,
                end: 1,
                value: 3,
            },
            TestCase {
                pattern: "w",
                text: "29",
                field: Field::WeekOfWeekBasedYear,
                end: 2,
                value: 29,
            },
            TestCase {
                pattern: "ww",
                text: "29",
                field: Field::WeekOfWeekBasedYear,
                end: 2,
                value: 29,
            },
            TestCase {
                pattern: "Y",
                text: "2013",
                field: Field::WeekBasedYear,
                end: 4,
                value: 2013,
            },
            TestCase {
                pattern: "YY",
                text: "13",
                field: Field::WeekBasedYear,
                end: 2,
                value: 2013,
            },
            TestCase {
                pattern: "YYYY",
                text: "2013",
                field: Field::WeekBasedYear,
                end: 4,
                value: 2013,
            },
        ];

        for case in &cases {
            let parsed = us(case.pattern).parse_unresolved(case.text, 0).unwrap();
            assert_eq!(parsed.end, case.end, "pattern {:?}", case.pattern);
            assert_eq!(
                parsed.fields.get(case.field),
                Some(case.value),
                "pattern {:?}",
                case.pattern
            );
        }
    }

    #[test]
    fn test_parse_week_of_month_dates() {
        struct TestCase {
            pattern: &'static str,
            text: &'static str,
            end: usize,
            expected: ResolvedDate,
        }

        let cases = [
            TestCase {
                pattern: "e W M y",
                text: "1 1 1 2012",
                end: 10,
                expected: resolved(2012, 1, 1),
            },
            TestCase {
                pattern: "e W M y",
                text: "1 2 1 2012",
                end: 10,
                expected: resolved(2012, 1, 8),
            },
            TestCase {
                pattern: "e W M y",
                text: "2 2 1 2012",
                end: 10,
                expected: resolved(2012, 1, 9),
            },
            TestCase {
                pattern: "e W M y",
                text: "3 2 1 2012",
                end: 10,
                expected: resolved(2012, 1, 10),
            },
            TestCase {
                pattern: "e W M y",
                text: "1 3 1 2012",
                end: 10,
                expected: resolved(2012, 1, 15),
            },
            TestCase {
                pattern: "e W M y",
                text: "2 3 1 2012",
                end: 10,
                expected: resolved(2012, 1, 16),
            },
            TestCase {
                pattern: "e W M y",
                text: "6 2 1 2012",
                end: 10,
                expected: resolved(2012, 1, 13),
            },
            TestCase {
                pattern: "e W M y",
                text: "6 2 7 2012",
                end: 10,
                expected: resolved(2012, 7, 13),
            },
            TestCase {
                pattern: "'Date: 'y-MM', day-of-week: 'e', week-of-month: 'W",
                text: "Date: 2012-07, day-of-week: 6, week-of-month: 3",
                end: 47,
                expected: resolved(2012, 7, 20),
            },
        ];

        for case in &cases {
            let formatter = us(case.pattern);
            let parsed = formatter.parse_unresolved(case.text, 0).unwrap();
            assert_eq!(parsed.end, case.end, "text {:?}", case.text);
            assert!(parsed.fields.contains(Field::YearOfEra));
            assert!(parsed.fields.contains(Field::DayOfWeek));
            assert!(parsed.fields.contains(Field::WeekOfMonth));
            assert_eq!(
                formatter.parse(case.text),
                Ok(case.expected),
                "text {:?}",
                case.text
            );
        }
    }

    #[test]
    fn test_parse_week_based_year_dates() {
        struct TestCase {
            pattern: &'static str,
            text: &'static str,
            end: usize,
            expected: ResolvedDate,
        }

        let cases = [
            TestCase {
                pattern: "e w Y",
                text: "6 29 2012",
                end: 9,
                expected: resolved(2012, 7, 20),
            },
            TestCase {
                pattern: "'Date: 'Y', day-of-week: 'e', week-of-year: 'w",
                text: "Date: 2012, day-of-week: 6, week-of-year: 29",
                end: 44,
                expected: resolved(2012, 7, 20),
            },
            TestCase {
                pattern: "Y-w-e",
                text: "2008-01-1",
                end: 9,
                expected: resolved(2007, 12, 30),
            },
            TestCase {
                pattern: "Y-w-e",
                text: "2008-52-1",
                end: 9,
                expected: resolved(2008, 12, 21),
            },
            TestCase {
                pattern: "Y-w-e",
                text: "2008-52-7",
                end: 9,
                expected: resolved(2008, 12, 27),
            },
            TestCase {
                pattern: "Y-w-e",
                text: "2009-01-01",
                end: 10,
                expected: resolved(2008, 12, 28),
            },
            TestCase {
                pattern: "Y-w-e",
                text: "2009-01-04",
                end: 10,
                expected: resolved(2008, 12, 31),
            },
            TestCase {
                pattern: "Y-w-e",
                text: "2009-01-05",
                end: 10,
                expected: resolved(2009, 1, 1),
            },
        ];

        for case in &cases {
            let formatter = us(case.pattern);
            let parsed = formatter.parse_unresolved(case.text, 0).unwrap();
            assert_eq!(parsed.end, case.end, "text {:?}", case.text);
            assert_eq!(
                parsed.fields.contains(Field::DayOfWeek),
                case.pattern.contains('e')
            );
            assert_eq!(
                parsed.fields.contains(Field::WeekOfWeekBasedYear),
                case.pattern.contains('w')
            );
            assert_eq!(
                parsed.fields.contains(Field::WeekBasedYear),
                case.pattern.contains('Y')
            );
            assert_eq!(
                formatter.parse(case.text),
                Ok(case.expected),
                "text {:?}",
                case.text
            );
        }
    }

    #[test]
    fn test_parse_from_offset() {
        let formatter = us("w");
        let parsed = formatter.parse_unresolved("week 29!", 5).unwrap();
        assert_eq!(parsed.end, 7);
        assert_eq!(parsed.fields.get(Field::WeekOfWeekBasedYear), Some(29));

        assert_eq!(
            formatter.parse_unresolved("29", 3),
            Err(ParseError::IndexOutOfBounds { index: 3, len: 2 })
        );
    }

    #[test]
    fn test_parse_error_indices() {
        struct TestCase {
            pattern: &'static str,
            text: &'static str,
            index: usize,
        }

        let cases = [
            TestCase {
                pattern: "e",
                text: "x",
                index: 0,
            },
            TestCase {
                pattern: "Y-w-e",
                text: "2008/52-1",
                index: 4,
            },
            TestCase {
                pattern: "ww",
                text: "2",
                index: 0,
            },
            TestCase {
                pattern: "YY",
                text: "1x",
                index: 0,
            },
            TestCase {
                pattern: "'Date: 'Y",
                text: "Data: 2012",
                index: 0,
            },
        ];

        for case in &cases {
            let error = us(case.pattern)
                .parse_unresolved(case.text, 0)
                .unwrap_err();
            assert_eq!(error.index(), case.index, "{error}");
        }
    }

    #[test]
    fn test_trailing_text_is_rejected_by_parse() {
        let formatter = us("e w Y");
        assert_eq!(
            formatter.parse("6 29 2012 extra"),
            Err(Error::Parse(ParseError::TrailingText { index: 9 }))
        );
        // parse_unresolved stops where the pattern ends
        assert_eq!(formatter.parse_unresolved("6 29 2012 extra", 0).map(|p| p.end), Ok(9));
    }

    #[test]
    fn test_repeated_field_conflict() {
        let formatter = us("e '('e')'");
        assert_eq!(
            formatter.parse_unresolved("6 (4)", 0),
            Err(ParseError::Conflict {
                index: 3,
                field: Field::DayOfWeek,
                existing: 6,
                parsed: 4
            })
        );
        assert!(formatter.parse_unresolved("6 (6)", 0).is_ok());
    }

    #[test]
    fn test_insufficient_and_invalid_fields() {
        let formatter = us("w Y");
        let expected = fields(&[(Field::WeekOfWeekBasedYear, 29), (Field::WeekBasedYear, 2012)]);
        assert_eq!(
            formatter.parse("29 2012"),
            Err(Error::Unresolved(expected.clone()))
        );
        assert_eq!(
            formatter.parse_partial("29 2012", 0),
            Ok(PartialParse {
                fields: expected,
                end: 7,
                date: None
            })
        );

        let out_of_range = us("e w Y").parse("9 29 2012");
        assert!(matches!(
            out_of_range,
            Err(Error::Resolve(ResolveError::ValueOutOfRange {
                field: Field::DayOfWeek,
                value: 9,
                ..
            }))
        ));
    }

    #[test]
    fn test_parse_partial_resolves_prefix() {
        let partial = us("Y-w-e").parse_partial("2009-01-5 and more", 0).unwrap();
        assert_eq!(partial.end, 9);
        assert_eq!(partial.date, Some(resolved(2009, 1, 1)));
    }

    #[test]
    fn test_monday_first_locale() {
        let formatter = DateFormatter::of_pattern("Y-w-e", &Locale::uk()).unwrap();
        let date = formatter.parse("2009-01-7").unwrap();
        assert_eq!(date.weekday(), Weekday::Sun);
        assert_eq!(date, resolved(2009, 1, 4));
    }

    #[test]
    fn test_week_definition_override() {
        let formatter = us("Y-w-e").with_week_definition(WeekDefinition::ISO);
        assert_eq!(formatter.parse("2010-01-1"), Ok(resolved(2010, 1, 4)));
        assert_eq!(formatter.week_definition(), &WeekDefinition::ISO);
    }

    #[test]
    fn test_resolver_style_is_applied() {
        let smart = us("Y-w-e");
        assert_eq!(smart.parse("2008-53-1"), Ok(resolved(2008, 12, 21)));
        let strict = us("Y-w-e").with_resolver_style(ResolverStyle::Strict);
        assert!(matches!(strict.parse("2008-53-1"), Err(Error::Resolve(_))));
    }

    #[test]
    fn test_text_fields() {
        let formatter = us("EEEE, MMMM d, u");
        let date = resolved(2012, 7, 13);
        assert_eq!(formatter.format(&date).unwrap(), "Friday, July 13, 2012");
        assert_eq!(formatter.parse("Friday, July 13, 2012"), Ok(date));
        // Numbers stand in for names
        assert_eq!(formatter.parse("5, 7 13, 2012"), Ok(date));

        let short = us("d MMM u");
        assert_eq!(short.format(&date).unwrap(), "13 Jul 2012");
        assert_eq!(short.parse("13 Jul 2012"), Ok(date));

        let french = DateFormatter::of_pattern("EEEE d MMMM u", &Locale::france()).unwrap();
        assert_eq!(french.format(&date).unwrap(), "vendredi 13 juillet 2012");
    }

    #[test]
    fn test_name_matching() {
        let formatter = us("MMMM u");
        assert_eq!(
            formatter.parse_unresolved("March 2012", 0).map(|p| p.fields.get(Field::Month)),
            Ok(Some(3))
        );
        // Names are case-sensitive
        assert!(formatter.parse_unresolved("march 2012", 0).is_err());
        // Narrow names repeat; the first month with that letter wins
        let narrow = us("MMMMM u");
        assert_eq!(
            narrow.parse_unresolved("J 2012", 0).map(|p| p.fields.get(Field::Month)),
            Ok(Some(1))
        );
    }

    #[test]
    fn test_optional_section() {
        let formatter = us("u-MM[-dd]");
        assert_eq!(formatter.parse("2012-07-13"), Ok(resolved(2012, 7, 13)));
        let partial = formatter.parse_unresolved("2012-07", 0).unwrap();
        assert_eq!(partial.end, 7);
        assert!(!partial.fields.contains(Field::DayOfMonth));
        // A half-matched optional section leaves nothing behind
        let partial = formatter.parse_unresolved("2012-07-x", 0).unwrap();
        assert_eq!(partial.end, 7);
    }

    #[test]
    fn test_adjacent_numbers() {
        let formatter = us("uuuuMMdd");
        assert_eq!(formatter.parse("20120713"), Ok(resolved(2012, 7, 13)));
        assert_eq!(formatter.format(&resolved(2012, 7, 13)).unwrap(), "20120713");
    }

    #[test]
    fn test_signed_years() {
        let formatter = us("u-MM-dd");
        let date = resolved(-44, 3, 15);
        assert_eq!(formatter.format(&date).unwrap(), "-44-03-15");
        assert_eq!(formatter.parse("-44-03-15"), Ok(date));
    }

    #[test]
    fn test_format_errors() {
        let formatter = us("YYYY");
        assert!(matches!(
            formatter.format(&resolved(12345, 6, 1)),
            Err(FormatError::ValueTooWide {
                field: Field::WeekBasedYear,
                width: 4,
                ..
            })
        ));
        assert_eq!(formatter.format(&resolved(2013, 6, 1)).unwrap(), "2013");
        assert_eq!(us("YY").format(&resolved(2013, 6, 1)).unwrap(), "13");
    }

    #[test]
    fn test_format_week_fields() {
        let date = resolved(2008, 12, 28);
        assert_eq!(us("Y-ww-e").format(&date).unwrap(), "2009-01-1");
        assert_eq!(us("e W").format(&resolved(2012, 7, 13)).unwrap(), "6 2");
    }

    fn any_date() -> impl Strategy<Value = ResolvedDate> {
        (1900i32..2100, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| ResolvedDate::new(y, m, d).unwrap_or_else(|| resolved(2000, 1, 1)))
    }

    proptest! {
        #[test]
        fn prop_week_based_round_trip(date in any_date()) {
            for locale in [Locale::us(), Locale::uk(), Locale::france()] {
                let formatter = DateFormatter::of_pattern("Y-ww-e", &locale).unwrap();
                let text = formatter.format(&date).unwrap();
                prop_assert_eq!(formatter.parse(&text), Ok(date), "{} {}", locale, text);
            }
        }

        #[test]
        fn prop_week_of_month_round_trip(date in any_date()) {
            let formatter = us("e W M u");
            let text = formatter.format(&date).unwrap();
            prop_assert_eq!(formatter.parse(&text), Ok(date), "{}", text);
        }

        #[test]
        fn prop_parse_is_idempotent(date in any_date()) {
            let formatter = us("e w Y");
            let text = formatter.format(&date).unwrap();
            let first = formatter.parse(&text);
            let second = formatter.parse(&text);
            prop_assert_eq!(first, second);
        }
    }
}
