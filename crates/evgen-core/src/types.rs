//! Core type definitions with validation.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The default event duration was zero.
    #[error("default duration must be at least 1 minute")]
    ZeroDefaultDuration,

    /// Invalid severity value.
    #[error("invalid severity: {value}")]
    InvalidSeverity { value: String },
}

/// Parser configuration.
///
/// Passed by value into every parse call and never mutated by the parser.
/// Changing any field means building a new config and reparsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParserConfig {
    /// Duration used when a detail line gives none. Always positive.
    default_duration_minutes: u32,

    /// Idle minutes between the end of one event and an auto-sequenced start.
    gap_minutes: u32,

    /// IANA-style zone label. Display only; never applied to timestamps.
    timezone: String,

    /// Report malformed headers and unrecognized detail lines as warnings.
    emit_warnings: bool,
}

impl ParserConfig {
    /// Creates a new config after validation.
    pub fn new(
        default_duration_minutes: u32,
        gap_minutes: u32,
        timezone: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if default_duration_minutes == 0 {
            return Err(ValidationError::ZeroDefaultDuration);
        }
        Ok(Self {
            default_duration_minutes,
            gap_minutes,
            timezone: timezone.into(),
            emit_warnings: false,
        })
    }

    /// Returns a copy with warning reporting switched on or off.
    #[must_use]
    pub fn with_warnings(mut self, emit_warnings: bool) -> Self {
        self.emit_warnings = emit_warnings;
        self
    }

    pub const fn default_duration_minutes(&self) -> u32 {
        self.default_duration_minutes
    }

    pub const fn gap_minutes(&self) -> u32 {
        self.gap_minutes
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub const fn emit_warnings(&self) -> bool {
        self.emit_warnings
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: 5,
            gap_minutes: 1,
            timezone: "UTC".to_string(),
            emit_warnings: false,
        }
    }
}

/// One event built from a header line and its detail line.
///
/// `start_time` stays `None` until the resolver fills it in, unless the
/// detail line carried an explicit date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionalEvent {
    pub grade: String,
    pub title: String,
    pub artist: String,
    pub description: String,
    /// Local wall-clock start.
    pub start_time: Option<NaiveDateTime>,
    pub duration_minutes: u32,
    /// Header and detail line as typed, for display only.
    pub source_text: String,
}

impl ProvisionalEvent {
    /// Start plus duration, once the start is known.
    ///
    /// Returns `None` if the end falls outside the representable range.
    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.start_time?
            .checked_add_signed(Duration::minutes(i64::from(self.duration_minutes)))
    }

    /// Calendar summary line: `"<grade> | <title>"`.
    pub fn summary(&self) -> String {
        format!("{} | {}", self.grade, self.title)
    }

    /// Calendar description: the artist, then the description if any.
    pub fn calendar_description(&self) -> String {
        if self.description.is_empty() {
            self.artist.clone()
        } else {
            format!("{} - {}", self.artist, self.description)
        }
    }
}

/// How serious a parse warning is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            _ => Err(ValidationError::InvalidSeverity {
                value: s.to_string(),
            }),
        }
    }
}

/// A recoverable anomaly found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    /// 1-based line number in the input text.
    pub line_number: usize,
    pub message: String,
    pub severity: Severity,
}

/// Output of a parse call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Events in input order.
    pub events: Vec<ProvisionalEvent>,
    pub warnings: Vec<ParseWarning>,
}
