//! Serde-loadable formatter settings.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::format::DateFormatter;
use crate::locale::Locale;
use crate::resolver::ResolverStyle;
use crate::types::MinimalDays;
use crate::week::WeekDefinition;

/// Settings for building a [`DateFormatter`].
///
/// Only `pattern` is required. Week rules come from `locale` unless
/// `first_day_of_week` or `minimal_days` override them.
///
/// ```
/// use week_fields::FormatterConfig;
///
/// let config = FormatterConfig::from_json(
///     r#"{ "pattern": "Y-ww-e", "locale": "en-GB", "first_day_of_week": "Sun" }"#,
/// )
/// .unwrap();
/// let formatter = config.build().unwrap();
/// assert_eq!(formatter.week_definition().minimal_days().get(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatterConfig {
    pub pattern: String,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub resolver_style: ResolverStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_day_of_week: Option<Weekday>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimal_days: Option<u8>,
}

impl FormatterConfig {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            locale: Locale::default(),
            resolver_style: ResolverStyle::default(),
            first_day_of_week: None,
            minimal_days: None,
        }
    }

    /// Reads settings from a JSON document.
    ///
    /// # Errors
    /// Returns `ConfigurationError` wrapping the JSON error.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(ConfigurationError::from_cause)
    }

    /// Week rules after applying the overrides to the locale's rules.
    ///
    /// # Errors
    /// Returns `ConfigurationError` if `minimal_days` is outside `1..=7`.
    pub fn week_definition(&self) -> Result<WeekDefinition, ConfigurationError> {
        let locale_rules = WeekDefinition::of_locale(&self.locale);
        let first_day_of_week = self
            .first_day_of_week
            .unwrap_or_else(|| locale_rules.first_day_of_week());
        let minimal_days = match self.minimal_days {
            Some(days) => MinimalDays::new(days).map_err(|err| {
                ConfigurationError::with_message_and_cause("invalid minimal_days", err)
            })?,
            None => locale_rules.minimal_days(),
        };
        Ok(WeekDefinition::new(first_day_of_week, minimal_days))
    }

    /// Compiles the pattern and builds the formatter.
    ///
    /// # Errors
    /// Returns `ConfigurationError` for an empty or invalid pattern and for
    /// invalid week rules; the underlying error is kept as the cause.
    pub fn build(&self) -> Result<DateFormatter, ConfigurationError> {
        if self.pattern.is_empty() {
            return Err(ConfigurationError::with_message("pattern is empty"));
        }
        let week_def = self.week_definition()?;
        let formatter = DateFormatter::of_pattern(&self.pattern, &self.locale).map_err(|err| {
            ConfigurationError::with_message_and_cause(
                format!("invalid pattern {:?}", self.pattern),
                err,
            )
        })?;
        Ok(formatter
            .with_week_definition(week_def)
            .with_resolver_style(self.resolver_style))
    }
}

impl TryFrom<&FormatterConfig> for DateFormatter {
    type Error = ConfigurationError;

    fn try_from(config: &FormatterConfig) -> Result<Self, Self::Error> {
        config.build()
    }
}
