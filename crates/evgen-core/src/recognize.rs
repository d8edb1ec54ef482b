//! Detail line recognition.
//!
//! A detail line holds either an explicit start (in one of several date
//! layouts) or a bare duration such as `1h30m`. Each layout is a separate
//! [`DetailRecognizer`]; a [`RecognizerChain`] tries them in a fixed order
//! and the first match wins.
//!
//! # Standard order
//!
//! 1. Pure duration: `5m`, `1h`, `1h30m`
//! 2. ISO timestamp: `2024-10-30T05:00:00`
//! 3. Date and time: `2024-10-30 05:00`
//! 4. Named month, 12-hour clock: `Oct 30 05:00am` (current year)
//! 5. Slash date: `10/30/2024 05:00` (month first)
//! 6. Dot date: `30.10.2024 05:00` (day first)
//! 7. Fallback: RFC 3339, RFC 2822 and a few common layouts
//!
//! The duration check runs first so `30m` can never be read as a date.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Days, Duration, Local, Months, NaiveDate, NaiveDateTime};
use regex::{Captures, Regex};

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[mh](\d+m)?$").unwrap());
static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)h").unwrap());
static MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)m").unwrap());

static ISO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})$").unwrap()
});
static DATE_SPACE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})\s+(\d{2}):(\d{2})$").unwrap());
static NAMED_MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z]+)\s+(\d+)\s+(\d+):(\d+)(am|pm)$").unwrap()
});
static SLASH_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})\s+(\d{1,2}):(\d{2})$").unwrap()
});
static DOT_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4})\s+(\d{1,2}):(\d{2})$").unwrap()
});

/// Month names are matched on their first three letters.
const MONTH_PREFIXES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Layouts tried by [`Fallback`] that carry a time of day.
const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d %Y %H:%M",
    "%d %B %Y %H:%M",
    "%a %b %d %Y %H:%M:%S",
];

/// Date-only layouts tried by [`Fallback`]; these resolve to midnight.
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// What a detail line turned out to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recognition {
    /// An explicit local wall-clock start.
    Start(NaiveDateTime),
    /// A duration in minutes, with no start.
    Duration(u32),
}

/// One strategy for reading a detail line.
///
/// `line` is already trimmed and non-empty. `now` is the parse clock, used
/// by layouts that leave out the year.
pub trait DetailRecognizer: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Returns a match, or `None` to let the next strategy try.
    fn recognize(&self, line: &str, now: NaiveDateTime) -> Option<Recognition>;
}

/// Ordered list of recognizers; the first match wins.
pub struct RecognizerChain {
    recognizers: Vec<Box<dyn DetailRecognizer>>,
}

impl RecognizerChain {
    /// An empty chain that recognizes nothing.
    pub fn empty() -> Self {
        Self {
            recognizers: Vec::new(),
        }
    }

    /// The built-in strategies in their standard precedence.
    pub fn standard() -> Self {
        Self::empty()
            .with(PureDuration)
            .with(IsoTimestamp)
            .with(DateSpaceTime)
            .with(NamedMonth)
            .with(SlashDate)
            .with(DotDate)
            .with(Fallback)
    }

    /// Appends a strategy after the existing ones.
    #[must_use]
    pub fn with(mut self, recognizer: impl DetailRecognizer + 'static) -> Self {
        self.recognizers.push(Box::new(recognizer));
        self
    }

    /// Names of the strategies, in the order they are tried.
    pub fn names(&self) -> Vec<&'static str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    /// Runs the strategies in order against a detail line.
    pub fn recognize(&self, line: &str, now: NaiveDateTime) -> Option<Recognition> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        self.recognizers.iter().find_map(|recognizer| {
            let recognition = recognizer.recognize(line, now)?;
            tracing::trace!(
                recognizer = recognizer.name(),
                ?recognition,
                "detail line matched"
            );
            Some(recognition)
        })
    }
}

impl Default for RecognizerChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RecognizerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// The shared standard chain.
pub(crate) static STANDARD_CHAIN: LazyLock<RecognizerChain> =
    LazyLock::new(RecognizerChain::standard);

/// Recognizes a detail line with the standard chain.
pub fn recognize(line: &str, now: NaiveDateTime) -> Option<Recognition> {
    STANDARD_CHAIN.recognize(line, now)
}

/// Bare durations: `5m`, `1h`, `1h30m`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PureDuration;

impl DetailRecognizer for PureDuration {
    fn name(&self) -> &'static str {
        "duration"
    }

    fn recognize(&self, line: &str, _now: NaiveDateTime) -> Option<Recognition> {
        if !DURATION_RE.is_match(line) {
            return None;
        }
        parse_duration(line).map(Recognition::Duration)
    }
}

/// Total minutes in a duration token. `None` on overflow.
fn parse_duration(token: &str) -> Option<u32> {
    let hours = match HOURS_RE.captures(token) {
        Some(caps) => field::<u32>(&caps, 1)?,
        None => 0,
    };
    let minutes = match MINUTES_RE.captures(token) {
        Some(caps) => field::<u32>(&caps, 1)?,
        None => 0,
    };
    hours.checked_mul(60)?.checked_add(minutes)
}

/// `YYYY-MM-DDTHH:MM:SS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoTimestamp;

impl DetailRecognizer for IsoTimestamp {
    fn name(&self) -> &'static str {
        "iso"
    }

    fn recognize(&self, line: &str, _now: NaiveDateTime) -> Option<Recognition> {
        let caps = ISO_RE.captures(line)?;
        wall_clock(
            field(&caps, 1)?,
            field(&caps, 2)?,
            field(&caps, 3)?,
            field(&caps, 4)?,
            field(&caps, 5)?,
            field(&caps, 6)?,
        )
        .map(Recognition::Start)
    }
}

/// `YYYY-MM-DD HH:MM`, 24-hour.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateSpaceTime;

impl DetailRecognizer for DateSpaceTime {
    fn name(&self) -> &'static str {
        "date-space-time"
    }

    fn recognize(&self, line: &str, _now: NaiveDateTime) -> Option<Recognition> {
        let caps = DATE_SPACE_TIME_RE.captures(line)?;
        wall_clock(
            field(&caps, 1)?,
            field(&caps, 2)?,
            field(&caps, 3)?,
            field(&caps, 4)?,
            field(&caps, 5)?,
            0,
        )
        .map(Recognition::Start)
    }
}

/// `<Month> <Day> <H>:<MM><am|pm>` in the current year.
///
/// Any spelling that starts with a month's first three letters is accepted,
/// in any case: `Oct`, `October`, `Sept`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamedMonth;

impl DetailRecognizer for NamedMonth {
    fn name(&self) -> &'static str {
        "named-month"
    }

    fn recognize(&self, line: &str, now: NaiveDateTime) -> Option<Recognition> {
        let caps = NAMED_MONTH_RE.captures(line)?;
        let month = month_number(&caps[1])?;
        let is_pm = caps[5].eq_ignore_ascii_case("pm");

        let mut hour: u32 = field(&caps, 3)?;
        if is_pm && hour < 12 {
            hour += 12;
        }
        if !is_pm && hour == 12 {
            hour = 0;
        }

        wall_clock(
            now.year(),
            month,
            field(&caps, 2)?,
            hour,
            field(&caps, 4)?,
            0,
        )
        .map(Recognition::Start)
    }
}

/// `MM/DD/YYYY HH:MM`, 24-hour.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlashDate;

impl DetailRecognizer for SlashDate {
    fn name(&self) -> &'static str {
        "slash-date"
    }

    fn recognize(&self, line: &str, _now: NaiveDateTime) -> Option<Recognition> {
        let caps = SLASH_DATE_RE.captures(line)?;
        wall_clock(
            field(&caps, 3)?,
            field(&caps, 1)?,
            field(&caps, 2)?,
            field(&caps, 4)?,
            field(&caps, 5)?,
            0,
        )
        .map(Recognition::Start)
    }
}

/// `DD.MM.YYYY HH:MM`, 24-hour.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotDate;

impl DetailRecognizer for DotDate {
    fn name(&self) -> &'static str {
        "dot-date"
    }

    fn recognize(&self, line: &str, _now: NaiveDateTime) -> Option<Recognition> {
        let caps = DOT_DATE_RE.captures(line)?;
        wall_clock(
            field(&caps, 3)?,
            field(&caps, 2)?,
            field(&caps, 1)?,
            field(&caps, 4)?,
            field(&caps, 5)?,
            0,
        )
        .map(Recognition::Start)
    }
}

/// Last resort: zoned timestamps converted to local time, then a fixed list
/// of naive layouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fallback;

impl DetailRecognizer for Fallback {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn recognize(&self, line: &str, _now: NaiveDateTime) -> Option<Recognition> {
        let zoned = DateTime::parse_from_rfc3339(line)
            .or_else(|_| DateTime::parse_from_rfc2822(line))
            .ok()
            .map(|dt| dt.with_timezone(&Local).naive_local());

        zoned
            .or_else(|| {
                FALLBACK_DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(line, fmt).ok())
            })
            .or_else(|| {
                FALLBACK_DATE_FORMATS.iter().find_map(|fmt| {
                    NaiveDate::parse_from_str(line, fmt)
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                })
            })
            .map(Recognition::Start)
    }
}

/// 1-based month number for a month name.
fn month_number(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?.to_ascii_lowercase();
    let index = MONTH_PREFIXES.iter().position(|month| *month == prefix)?;
    u32::try_from(index + 1).ok()
}

/// Parses capture group `index`. Fails on digit runs too long for `T`.
fn field<T: FromStr>(caps: &Captures<'_>, index: usize) -> Option<T> {
    caps.get(index)?.as_str().parse().ok()
}

/// Builds a wall-clock timestamp from typed fields.
///
/// Out-of-range fields carry into the next unit: day 30 of February is
/// March 1st, month 13 is January of the following year, hour 25 is 1am the
/// next day. Month 0 and day 0 step back one. Only a result outside the
/// representable range gives `None`.
fn wall_clock(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<NaiveDateTime> {
    let january = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let first_of_month = match month.checked_sub(1) {
        Some(months) => january.checked_add_months(Months::new(months))?,
        None => january.checked_sub_months(Months::new(1))?,
    };
    let date = match day.checked_sub(1) {
        Some(days) => first_of_month.checked_add_days(Days::new(u64::from(days)))?,
        None => first_of_month.checked_sub_days(Days::new(1))?,
    };

    let time_of_day = Duration::hours(i64::from(hour))
        + Duration::minutes(i64::from(minute))
        + Duration::seconds(i64::from(second));
    date.and_hms_opt(0, 0, 0)?.checked_add_signed(time_of_day)
}
