use std::error::Error as StdError;
use std::fmt;

use crate::field::{Field, FieldSet};
use crate::prelude::*;
use crate::resolver::ResolveError;

/// Error raised while reading text against a pattern.
///
/// Every variant carries the byte offset at which parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Text could not be parsed at index {index}: expected {expected}")]
    Mismatch { index: usize, expected: String },
    #[display(
        fmt = "Conflict found at index {index}: {field} {existing} differs from {field} {parsed}"
    )]
    Conflict {
        index: usize,
        field: Field,
        existing: i64,
        parsed: i64,
    },
    #[display(fmt = "Text has unparsed characters at index {index}")]
    TrailingText { index: usize },
    #[display(fmt = "Start index {index} is outside the text (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// Byte offset in the input where the error was detected.
    pub const fn index(&self) -> usize {
        match self {
            Self::Mismatch { index, .. }
            | Self::Conflict { index, .. }
            | Self::TrailingText { index }
            | Self::IndexOutOfBounds { index, .. } => *index,
        }
    }
}

/// Error returned by [`DateFormatter::parse`](crate::DateFormatter::parse).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The text parsed, but its fields do not determine a date.
    #[error("Unable to obtain a date from {0}")]
    Unresolved(FieldSet),
}

type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// A configuration problem, with an optional message and an optional
/// underlying cause.
///
/// Construction never validates and never fails.
#[derive(Debug, Default)]
pub struct ConfigurationError {
    message: Option<String>,
    cause: Option<Cause>,
}

impl ConfigurationError {
    /// No message and no cause.
    pub const fn new() -> Self {
        Self {
            message: None,
            cause: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            cause: None,
        }
    }

    pub fn with_message_and_cause(message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        Self {
            message: Some(message.into()),
            cause: Some(cause.into()),
        }
    }

    /// Wraps `cause`, taking the message from its `Display` output.
    pub fn from_cause(cause: impl Into<Cause>) -> Self {
        let cause = cause.into();
        Self {
            message: Some(cause.to_string()),
            cause: Some(cause),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "Configuration error: {message}"),
            None => f.write_str("Configuration error"),
        }
    }
}

impl StdError for ConfigurationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}
