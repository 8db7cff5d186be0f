//! Compiles letter patterns such as `"e W M y"` or `"'Date: 'Y-ww"` into
//! the items the formatter prints and parses.

use std::str::FromStr;

use crate::consts::{
    MAX_NUMERIC_WIDTH, OPTIONAL_END, OPTIONAL_START, QUOTE, REDUCED_YEAR_BASE, REDUCED_YEAR_WIDTH,
    RESERVED_PATTERN_CHARS,
};
use crate::field::Field;
use crate::locale::TextStyle;

/// Error type for pattern compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Unsupported pattern letter '{letter}' at index {index}")]
    UnsupportedLetter { letter: char, index: usize },

    #[error("Too many pattern letters: '{letter}' repeated {count} times")]
    TooManyLetters { letter: char, count: usize },

    #[error("Reserved pattern character '{character}' at index {index}")]
    ReservedCharacter { character: char, index: usize },

    #[error("Unterminated quote starting at index {0}")]
    UnterminatedQuote(usize),

    #[error("Unbalanced optional section at index {0}")]
    UnbalancedOptional(usize),
}

/// A numeric field printed and parsed as ASCII digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberItem {
    pub field: Field,
    pub min_width: usize,
    pub max_width: usize,
    /// Accepts a leading `-` or `+`
    pub signed: bool,
    /// Digits left for adjacent fixed-width items that follow this one
    pub reserved: usize,
}

impl NumberItem {
    const fn new(field: Field, min_width: usize, max_width: usize) -> Self {
        Self {
            field,
            min_width,
            max_width,
            signed: false,
            reserved: 0,
        }
    }

    const fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    pub const fn is_fixed_width(&self) -> bool {
        self.min_width == self.max_width
    }
}

/// One compiled pattern element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Literal(String),
    Number(NumberItem),
    /// Two-digit year within the century starting at `base`
    ReducedYear { field: Field, base: i64 },
    /// Month or weekday name
    Text { field: Field, style: TextStyle },
    /// Section that is skipped, not failed, when the text does not match
    Optional(Vec<Item>),
}

impl Item {
    /// Width of the item when it is numeric and fixed-width.
    const fn fixed_numeric_width(&self) -> Option<usize> {
        match self {
            Self::Number(number) if number.is_fixed_width() => Some(number.min_width),
            Self::ReducedYear { .. } => Some(REDUCED_YEAR_WIDTH),
            _ => None,
        }
    }
}

/// A compiled date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    items: Vec<Item>,
}

impl Pattern {
    /// Compiles a pattern string.
    ///
    /// # Errors
    /// Returns `PatternError` for unknown or over-repeated letters, reserved
    /// characters, unterminated quotes and unbalanced `[`/`]`.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let chars: Vec<(usize, char)> = pattern.char_indices().collect();
        // Stack of open optional sections; the bottom entry is the top level
        let mut sections: Vec<(usize, Vec<Item>)> = vec![(0, Vec::new())];
        let mut pos = 0;

        while let Some(&(index, c)) = chars.get(pos) {
            if c.is_ascii_alphabetic() {
                let count = chars[pos..].iter().take_while(|(_, next)| *next == c).count();
                push_item(&mut sections, letter_item(c, count, index)?);
                pos += count;
            } else if c == QUOTE {
                let (literal, next) = quoted_literal(&chars, pos)?;
                push_literal(&mut sections, &literal);
                pos = next;
            } else if c == OPTIONAL_START {
                sections.push((index, Vec::new()));
                pos += 1;
            } else if c == OPTIONAL_END {
                if sections.len() < 2 {
                    return Err(PatternError::UnbalancedOptional(index));
                }
                if let Some((_, items)) = sections.pop() {
                    push_item(&mut sections, Item::Optional(items));
                }
                pos += 1;
            } else if RESERVED_PATTERN_CHARS.contains(&c) {
                return Err(PatternError::ReservedCharacter {
                    character: c,
                    index,
                });
            } else {
                push_literal(&mut sections, c.encode_utf8(&mut [0; 4]));
                pos += 1;
            }
        }

        if sections.len() > 1 {
            let open = sections.last().map_or(0, |(index, _)| *index);
            return Err(PatternError::UnbalancedOptional(open));
        }
        let mut items = sections.pop().map(|(_, items)| items).unwrap_or_default();
        reserve_adjacent_widths(&mut items);

        Ok(Self {
            source: pattern.to_owned(),
            items,
        })
    }

    /// The pattern text this was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Whether any item, optional or not, produces `field`.
    pub fn contains_field(&self, field: Field) -> bool {
        fn walk(items: &[Item], field: Field) -> bool {
            items.iter().any(|item| match item {
                Item::Number(number) => number.field == field,
                Item::ReducedYear { field: f, .. } | Item::Text { field: f, .. } => *f == field,
                Item::Optional(inner) => walk(inner, field),
                Item::Literal(_) => false,
            })
        }
        walk(&self.items, field)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

fn push_item(sections: &mut [(usize, Vec<Item>)], item: Item) {
    if let Some((_, items)) = sections.last_mut() {
        items.push(item);
    }
}

/// Appends literal text, merging with a preceding literal.
fn push_literal(sections: &mut [(usize, Vec<Item>)], text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some((_, items)) = sections.last_mut() {
        if let Some(Item::Literal(existing)) = items.last_mut() {
            existing.push_str(text);
        } else {
            items.push(Item::Literal(text.to_owned()));
        }
    }
}

/// Reads a quoted literal starting at the opening quote; `''` is a quote.
/// Returns the literal and the index just past the closing quote.
fn quoted_literal(chars: &[(usize, char)], start: usize) -> Result<(String, usize), PatternError> {
    let mut literal = String::new();
    let mut pos = start + 1;
    if matches!(chars.get(pos), Some((_, QUOTE))) {
        literal.push(QUOTE);
        return Ok((literal, pos + 1));
    }
    loop {
        match chars.get(pos) {
            None => return Err(PatternError::UnterminatedQuote(chars[start].0)),
            Some((_, QUOTE)) => {
                if matches!(chars.get(pos + 1), Some((_, QUOTE))) {
                    literal.push(QUOTE);
                    pos += 2;
                } else {
                    return Ok((literal, pos + 1));
                }
            },
            Some((_, c)) => {
                literal.push(*c);
                pos += 1;
            },
        }
    }
}

fn letter_item(letter: char, count: usize, index: usize) -> Result<Item, PatternError> {
    let too_many = || PatternError::TooManyLetters { letter, count };
    let item = match letter {
        'y' => year_item(Field::YearOfEra, count, false),
        'u' => year_item(Field::Year, count, true),
        'Y' => match count {
            2 => reduced_year(Field::WeekBasedYear),
            1 | 3 => Item::Number(NumberItem::new(Field::WeekBasedYear, count, MAX_NUMERIC_WIDTH).signed()),
            _ => Item::Number(NumberItem::new(Field::WeekBasedYear, count, count).signed()),
        },
        'M' | 'L' => match count {
            1 => number(Field::Month, 1, MAX_NUMERIC_WIDTH),
            2 => number(Field::Month, 2, 2),
            3..=5 => text(Field::Month, count),
            _ => return Err(too_many()),
        },
        'd' => match count {
            1 => number(Field::DayOfMonth, 1, MAX_NUMERIC_WIDTH),
            2 => number(Field::DayOfMonth, 2, 2),
            _ => return Err(too_many()),
        },
        'D' => match count {
            1 => number(Field::DayOfYear, 1, MAX_NUMERIC_WIDTH),
            2 => number(Field::DayOfYear, 2, 3),
            3 => number(Field::DayOfYear, 3, 3),
            _ => return Err(too_many()),
        },
        'E' => match count {
            1..=3 => text(Field::IsoDayOfWeek, 3),
            4 | 5 => text(Field::IsoDayOfWeek, count),
            _ => return Err(too_many()),
        },
        'e' => match count {
            1 => number(Field::DayOfWeek, 1, 2),
            2 => number(Field::DayOfWeek, 2, 2),
            3..=5 => text(Field::IsoDayOfWeek, count),
            _ => return Err(too_many()),
        },
        'c' => match count {
            1 => number(Field::DayOfWeek, 1, 2),
            3..=5 => text(Field::IsoDayOfWeek, count),
            _ => return Err(too_many()),
        },
        'w' => match count {
            1 => number(Field::WeekOfWeekBasedYear, 1, 2),
            2 => number(Field::WeekOfWeekBasedYear, 2, 2),
            _ => return Err(too_many()),
        },
        'W' => match count {
            1 => number(Field::WeekOfMonth, 1, 2),
            _ => return Err(too_many()),
        },
        _ => return Err(PatternError::UnsupportedLetter { letter, index }),
    };
    Ok(item)
}

const fn number(field: Field, min_width: usize, max_width: usize) -> Item {
    Item::Number(NumberItem::new(field, min_width, max_width))
}

const fn reduced_year(field: Field) -> Item {
    Item::ReducedYear {
        field,
        base: REDUCED_YEAR_BASE,
    }
}

/// `MMM`/`EEE` short, four letters full, five letters narrow.
const fn text(field: Field, count: usize) -> Item {
    let style = match count {
        4 => TextStyle::Full,
        5 => TextStyle::Narrow,
        _ => TextStyle::Short,
    };
    Item::Text { field, style }
}

fn year_item(field: Field, count: usize, signed: bool) -> Item {
    if count == 2 {
        return reduced_year(field);
    }
    let number = NumberItem::new(field, count, MAX_NUMERIC_WIDTH);
    Item::Number(if signed { number.signed() } else { number })
}

/// Lets a variable-width number leave room for the fixed-width numbers that
/// directly follow it, so `"yyyyMMdd"`-style patterns parse `"20120713"`.
fn reserve_adjacent_widths(items: &mut [Item]) {
    for i in 0..items.len() {
        if let Item::Optional(inner) = &mut items[i] {
            reserve_adjacent_widths(inner);
            continue;
        }
        let reserved: usize = items[i + 1..]
            .iter()
            .map_while(Item::fixed_numeric_width)
            .sum();
        if let Item::Number(number) = &mut items[i] {
            if !number.is_fixed_width() {
                number.reserved = reserved;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(pattern: &str) -> Vec<Item> {
        Pattern::compile(pattern).unwrap().items().to_vec()
    }

    #[test]
    fn test_week_field_letters() {
        assert_eq!(items("e"), vec![number(Field::DayOfWeek, 1, 2)]);
        assert_eq!(items("W"), vec![number(Field::WeekOfMonth, 1, 2)]);
        assert_eq!(items("w"), vec![number(Field::WeekOfWeekBasedYear, 1, 2)]);
        assert_eq!(items("ww"), vec![number(Field::WeekOfWeekBasedYear, 2, 2)]);
        assert_eq!(items("YY"), vec![reduced_year(Field::WeekBasedYear)]);
        assert_eq!(
            items("YYYY"),
            vec![Item::Number(NumberItem::new(Field::WeekBasedYear, 4, 4).signed())]
        );
        assert_eq!(
            items("Y"),
            vec![Item::Number(
                NumberItem::new(Field::WeekBasedYear, 1, MAX_NUMERIC_WIDTH).signed()
            )]
        );
    }

    #[test]
    fn test_literals_and_quotes() {
        assert_eq!(
            items("'Date: 'y-MM"),
            vec![
                Item::Literal("Date: ".to_owned()),
                number(Field::YearOfEra, 1, MAX_NUMERIC_WIDTH),
                Item::Literal("-".to_owned()),
                number(Field::Month, 2, 2),
            ]
        );
        assert_eq!(items("''"), vec![Item::Literal("'".to_owned())]);
        assert_eq!(items("'o''clock'"), vec![Item::Literal("o'clock".to_owned())]);
        assert_eq!(
            items("e W"),
            vec![
                number(Field::DayOfWeek, 1, 2),
                Item::Literal(" ".to_owned()),
                number(Field::WeekOfMonth, 1, 2),
            ]
        );
    }

    #[test]
    fn test_text_letters() {
        assert_eq!(
            items("MMM"),
            vec![Item::Text {
                field: Field::Month,
                style: TextStyle::Short
            }]
        );
        assert_eq!(
            items("EEEE"),
            vec![Item::Text {
                field: Field::IsoDayOfWeek,
                style: TextStyle::Full
            }]
        );
        assert_eq!(
            items("eeeee"),
            vec![Item::Text {
                field: Field::IsoDayOfWeek,
                style: TextStyle::Narrow
            }]
        );
    }

    #[test]
    fn test_optional_sections() {
        assert_eq!(
            items("y[-MM]"),
            vec![
                number(Field::YearOfEra, 1, MAX_NUMERIC_WIDTH),
                Item::Optional(vec![
                    Item::Literal("-".to_owned()),
                    number(Field::Month, 2, 2)
                ]),
            ]
        );
        assert_eq!(
            Pattern::compile("y[-MM"),
            Err(PatternError::UnbalancedOptional(1))
        );
        assert_eq!(
            Pattern::compile("y]"),
            Err(PatternError::UnbalancedOptional(1))
        );
    }

    #[test]
    fn test_adjacent_value_reservation() {
        let compiled = items("yyyyMMdd");
        let Item::Number(year) = compiled[0] else {
            panic!("expected a number item, got {:?}", compiled[0]);
        };
        assert_eq!(year.reserved, 4);

        // A literal breaks adjacency
        let compiled = items("y-MMdd");
        let Item::Number(year) = compiled[0] else {
            panic!("expected a number item, got {:?}", compiled[0]);
        };
        assert_eq!(year.reserved, 0);
    }

    #[test]
    fn test_compile_errors() {
        struct TestCase {
            pattern: &'static str,
            expected: PatternError,
        }

        let cases = [
            TestCase {
                pattern: "WW",
                expected: PatternError::TooManyLetters {
                    letter: 'W',
                    count: 2,
                },
            },
            TestCase {
                pattern: "www",
                expected: PatternError::TooManyLetters {
                    letter: 'w',
                    count: 3,
                },
            },
            TestCase {
                pattern: "y-HH",
                expected: PatternError::UnsupportedLetter {
                    letter: 'H',
                    index: 2,
                },
            },
            TestCase {
                pattern: "y#",
                expected: PatternError::ReservedCharacter {
                    character: '#',
                    index: 1,
                },
            },
            TestCase {
                pattern: "y 'abc",
                expected: PatternError::UnterminatedQuote(2),
            },
        ];

        for case in &cases {
            assert_eq!(
                Pattern::compile(case.pattern),
                Err(case.expected.clone()),
                "pattern {:?}",
                case.pattern
            );
        }
    }

    #[test]
    fn test_contains_field() {
        let pattern: Pattern = "Y-w[-e]".parse().unwrap();
        assert!(pattern.contains_field(Field::WeekBasedYear));
        assert!(pattern.contains_field(Field::DayOfWeek));
        assert!(!pattern.contains_field(Field::WeekOfMonth));
        assert_eq!(pattern.as_str(), "Y-w[-e]");
    }
}
