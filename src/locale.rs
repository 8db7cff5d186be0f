//! Locale identifiers and the locale data the formatter needs: CLDR week
//! rules per region and month/weekday names for a few languages.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use crate::types::MinimalDays;

/// Region used when neither the locale nor the likely-region table names one
pub const WORLD_REGION: &str = "001";

/// Error type for locale identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    #[error("Empty locale identifier")]
    Empty,

    #[error("Invalid language subtag: {0}")]
    InvalidLanguage(String),

    #[error("Invalid region subtag: {0}")]
    InvalidRegion(String),
}

/// Width of month and weekday names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    /// `MMMM`, `EEEE`: "January", "Monday"
    #[display(fmt = "full")]
    Full,
    /// `MMM`, `E`: "Jan", "Mon"
    #[display(fmt = "short")]
    Short,
    /// `MMMMM`, `EEEEE`: "J", "M"
    #[display(fmt = "narrow")]
    Narrow,
}

/// A language with an optional region, e.g. `en`, `en-US`, `fr_FR`.
///
/// Only the language and region subtags are kept; script, variant and
/// extension subtags are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Creates a locale from a language and an optional region.
    ///
    /// # Errors
    /// Returns `LocaleError` if either subtag is malformed.
    pub fn new(language: &str, region: Option<&str>) -> Result<Self, LocaleError> {
        let language = normalize_language(language)?;
        let region = region.map(normalize_region).transpose()?;
        Ok(Self { language, region })
    }

    /// English without a region (resolves week rules through `US`)
    pub fn english() -> Self {
        Self::known("en", None)
    }

    /// `en-US`: weeks start on Sunday, one day makes week 1
    pub fn us() -> Self {
        Self::known("en", Some("US"))
    }

    /// `en-GB`: weeks start on Monday, four days make week 1
    pub fn uk() -> Self {
        Self::known("en", Some("GB"))
    }

    /// `fr-FR`
    pub fn france() -> Self {
        Self::known("fr", Some("FR"))
    }

    /// `de-DE`
    pub fn germany() -> Self {
        Self::known("de", Some("DE"))
    }

    fn known(language: &str, region: Option<&str>) -> Self {
        Self {
            language: language.to_owned(),
            region: region.map(str::to_owned),
        }
    }

    /// Lowercase language subtag
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Uppercase region subtag, if one was given
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The region whose conventions apply: the explicit region, else the
    /// language's most likely region, else the world region `001`.
    pub fn effective_region(&self) -> &str {
        self.region
            .as_deref()
            .or_else(|| likely_region(&self.language))
            .unwrap_or(WORLD_REGION)
    }

    /// First day of week and minimal days in first week for this locale.
    pub fn week_rules(&self) -> (Weekday, MinimalDays) {
        region_week_rules(self.effective_region())
    }

    /// Month names, January first.
    pub fn month_names(&self, style: TextStyle) -> &'static [&'static str; 12] {
        let symbols = self.symbols();
        match style {
            TextStyle::Full => &symbols.months_full,
            TextStyle::Short => &symbols.months_short,
            TextStyle::Narrow => &symbols.months_narrow,
        }
    }

    /// Weekday names, Monday first.
    pub fn weekday_names(&self, style: TextStyle) -> &'static [&'static str; 7] {
        let symbols = self.symbols();
        match style {
            TextStyle::Full => &symbols.weekdays_full,
            TextStyle::Short => &symbols.weekdays_short,
            TextStyle::Narrow => &symbols.weekdays_narrow,
        }
    }

    fn symbols(&self) -> &'static TextSymbols {
        match self.language.as_str() {
            "fr" => &FRENCH,
            "de" => &GERMAN,
            _ => &ENGLISH,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{region}", self.language),
            None => write!(f, "{}", self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LocaleError::Empty);
        }

        let mut subtags = trimmed.split(['-', '_']);
        let language = normalize_language(subtags.next().unwrap_or_default())?;

        let mut region = None;
        for subtag in subtags {
            let is_script = subtag.len() == 4 && subtag.bytes().all(|b| b.is_ascii_alphabetic());
            if is_script {
                continue;
            }
            region = Some(normalize_region(subtag)?);
            break;
        }

        Ok(Self { language, region })
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn normalize_language(subtag: &str) -> Result<String, LocaleError> {
    let valid = (2..=3).contains(&subtag.len()) && subtag.bytes().all(|b| b.is_ascii_alphabetic());
    if !valid {
        return Err(LocaleError::InvalidLanguage(subtag.to_owned()));
    }
    Ok(subtag.to_ascii_lowercase())
}

fn normalize_region(subtag: &str) -> Result<String, LocaleError> {
    let alpha = subtag.len() == 2 && subtag.bytes().all(|b| b.is_ascii_alphabetic());
    let numeric = subtag.len() == 3 && subtag.bytes().all(|b| b.is_ascii_digit());
    if !alpha && !numeric {
        return Err(LocaleError::InvalidRegion(subtag.to_owned()));
    }
    Ok(subtag.to_ascii_uppercase())
}

// CLDR weekData: regions whose week starts on Sunday
const SUNDAY_FIRST_REGIONS: &[&str] = &[
    "AG", "AS", "BD", "BR", "BS", "BT", "BW", "BZ", "CA", "CN", "CO", "DM", "DO", "ET", "GT", "GU",
    "HK", "HN", "ID", "IL", "IN", "JM", "JP", "KE", "KH", "KR", "LA", "MH", "MM", "MO", "MT", "MX",
    "MZ", "NI", "NP", "PA", "PE", "PH", "PK", "PR", "PT", "PY", "SA", "SG", "SV", "TH", "TT", "TW",
    "UM", "US", "VE", "VI", "WS", "YE", "ZA", "ZW",
];

// CLDR weekData: regions whose week starts on Saturday
const SATURDAY_FIRST_REGIONS: &[&str] = &[
    "AE", "AF", "BH", "DJ", "DZ", "EG", "IQ", "IR", "JO", "KW", "LY", "OM", "QA", "SD", "SY",
];

// CLDR weekData: regions where week 1 needs at least four days
const FOUR_DAY_REGIONS: &[&str] = &[
    "AD", "AN", "AT", "AX", "BE", "BG", "CH", "CZ", "DE", "DK", "EE", "ES", "FI", "FJ", "FO", "FR",
    "GB", "GF", "GG", "GI", "GP", "GR", "HU", "IE", "IM", "IS", "IT", "JE", "LI", "LT", "LU", "MC",
    "MQ", "NL", "NO", "PL", "RE", "RU", "SE", "SJ", "SK", "SM", "VA",
];

/// Week rules for an uppercase region code; unknown regions follow the
/// world default (Monday, one day).
pub fn region_week_rules(region: &str) -> (Weekday, MinimalDays) {
    let first_day = if SUNDAY_FIRST_REGIONS.contains(&region) {
        Weekday::Sun
    } else if SATURDAY_FIRST_REGIONS.contains(&region) {
        Weekday::Sat
    } else if region == "MV" {
        Weekday::Fri
    } else {
        Weekday::Mon
    };

    let minimal_days = if FOUR_DAY_REGIONS.contains(&region) {
        MinimalDays::FOUR
    } else {
        MinimalDays::ONE
    };

    (first_day, minimal_days)
}

fn likely_region(language: &str) -> Option<&'static str> {
    let region = match language {
        "ar" => "EG",
        "da" => "DK",
        "de" => "DE",
        "en" => "US",
        "es" => "ES",
        "fi" => "FI",
        "fr" => "FR",
        "he" => "IL",
        "hi" => "IN",
        "it" => "IT",
        "ja" => "JP",
        "ko" => "KR",
        "nb" | "nn" | "no" => "NO",
        "nl" => "NL",
        "pl" => "PL",
        "pt" => "BR",
        "ru" => "RU",
        "sv" => "SE",
        "th" => "TH",
        "tr" => "TR",
        "zh" => "CN",
        _ => return None,
    };
    Some(region)
}

struct TextSymbols {
    months_full: [&'static str; 12],
    months_short: [&'static str; 12],
    months_narrow: [&'static str; 12],
    weekdays_full: [&'static str; 7],
    weekdays_short: [&'static str; 7],
    weekdays_narrow: [&'static str; 7],
}

const MONTHS_NARROW: [&str; 12] = ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"];

static ENGLISH: TextSymbols = TextSymbols {
    months_full: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    months_short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    months_narrow: MONTHS_NARROW,
    weekdays_full: [
        "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
    ],
    weekdays_short: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    weekdays_narrow: ["M", "T", "W", "T", "F", "S", "S"],
};

static FRENCH: TextSymbols = TextSymbols {
    months_full: [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
        "octobre", "novembre", "décembre",
    ],
    months_short: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
        "déc.",
    ],
    months_narrow: MONTHS_NARROW,
    weekdays_full: ["lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche"],
    weekdays_short: ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."],
    weekdays_narrow: ["L", "M", "M", "J", "V", "S", "D"],
};

static GERMAN: TextSymbols = TextSymbols {
    months_full: [
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
        "Oktober", "November", "Dezember",
    ],
    months_short: [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
        "Dez.",
    ],
    months_narrow: MONTHS_NARROW,
    weekdays_full: [
        "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag",
    ],
    weekdays_short: ["Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa.", "So."],
    weekdays_narrow: ["M", "D", "M", "D", "F", "S", "S"],
};
