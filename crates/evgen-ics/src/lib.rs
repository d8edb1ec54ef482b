//! iCalendar export for parsed schedules.
//!
//! Each event becomes one `VEVENT` inside a single `VCALENDAR`. Timestamps
//! are written as floating local times (`20241030T050000`): no `Z` suffix and
//! no zone conversion, so calendar clients show the times exactly as typed.
//!
//! | Property      | Value                                      |
//! |---------------|--------------------------------------------|
//! | `UID`         | fresh UUID v4                              |
//! | `DTSTAMP`     | export time                                |
//! | `DTSTART`     | resolved start                             |
//! | `DTEND`       | start + duration                           |
//! | `SUMMARY`     | `<grade> \| <title>`                       |
//! | `DESCRIPTION` | `<artist>` or `<artist> - <description>`   |

use chrono::{Local, NaiveDateTime};
use evgen_core::ProvisionalEvent;
use icalendar::{Calendar, Component, Event};
use thiserror::Error;
use uuid::Uuid;

/// Floating local date-time, RFC 5545 basic format.
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Export errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// An event reached the exporter without a start time.
    #[error("event {index} ({summary}) has no start time")]
    Unscheduled { index: usize, summary: String },

    /// Start plus duration is past the last representable date.
    #[error("event {index} ({summary}) ends out of range")]
    EndOutOfRange { index: usize, summary: String },
}

/// Renders events as an iCalendar document stamped with the local time.
pub fn to_ics(events: &[ProvisionalEvent]) -> Result<String, ExportError> {
    to_ics_at(events, Local::now().naive_local())
}

/// Renders events as an iCalendar document with an explicit `DTSTAMP`.
pub fn to_ics_at(events: &[ProvisionalEvent], stamp: NaiveDateTime) -> Result<String, ExportError> {
    let mut calendar = Calendar::new();
    for (index, event) in events.iter().enumerate() {
        calendar.push(to_vevent(index, event, stamp)?);
    }

    tracing::debug!(events = events.len(), "rendered calendar");
    Ok(calendar.to_string())
}

fn to_vevent(
    index: usize,
    event: &ProvisionalEvent,
    stamp: NaiveDateTime,
) -> Result<Event, ExportError> {
    let summary = event.summary();
    let Some(start) = event.start_time else {
        return Err(ExportError::Unscheduled { index, summary });
    };
    let Some(end) = event.end_time() else {
        return Err(ExportError::EndOutOfRange { index, summary });
    };

    Ok(Event::new()
        .uid(&Uuid::new_v4().to_string())
        .add_property("DTSTAMP", format_timestamp(stamp))
        .add_property("DTSTART", format_timestamp(start))
        .add_property("DTEND", format_timestamp(end))
        .summary(&summary)
        .description(&event.calendar_description())
        .done())
}

/// Formats a wall-clock time as `YYYYMMDDTHHMMSS`.
pub fn format_timestamp(time: NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}
