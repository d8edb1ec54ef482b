//! Preview command: shows the events the way they will be exported.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use evgen_core::{ParseResult, ParserConfig, ProvisionalEvent};

/// Parses `text` and writes a human-readable preview or JSON.
pub fn run<W: Write>(
    writer: &mut W,
    text: &str,
    config: &ParserConfig,
    now: NaiveDateTime,
    json: bool,
) -> Result<()> {
    let result = evgen_core::parse_at(text, config, now);

    if json {
        let output =
            serde_json::to_string_pretty(&result).context("failed to serialize events")?;
        writeln!(writer, "{output}")?;
    } else {
        write!(writer, "{}", format_preview(&result, config))?;
    }

    Ok(())
}

/// Renders the preview text.
pub fn format_preview(result: &ParseResult, config: &ParserConfig) -> String {
    let mut output = String::new();

    writeln!(output, "Timezone: {}", config.timezone()).unwrap();

    if !result.warnings.is_empty() {
        writeln!(output).unwrap();
        for warning in &result.warnings {
            writeln!(
                output,
                "Line {}: {} ({})",
                warning.line_number, warning.message, warning.severity
            )
            .unwrap();
        }
    }

    writeln!(output).unwrap();
    if result.events.is_empty() {
        writeln!(output, "No events found.").unwrap();
        return output;
    }

    for (index, event) in result.events.iter().enumerate() {
        if index > 0 {
            writeln!(output).unwrap();
        }
        write_event(&mut output, index + 1, event);
    }

    output
}

fn write_event(output: &mut String, position: usize, event: &ProvisionalEvent) {
    writeln!(output, "{position}. {}", heading(event)).unwrap();
    if !event.artist.is_empty() {
        writeln!(output, "   {}", event.artist).unwrap();
    }
    if !event.description.is_empty() {
        writeln!(output, "   {}", event.description).unwrap();
    }
    let start = event
        .start_time
        .map_or_else(|| "unscheduled".to_string(), format_start);
    writeln!(output, "   {start} ({} min)", event.duration_minutes).unwrap();
}

/// The summary, or the typed header when the header had too few fields.
fn heading(event: &ProvisionalEvent) -> String {
    if event.grade.is_empty() && event.title.is_empty() && event.artist.is_empty() {
        event
            .source_text
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    } else {
        event.summary()
    }
}

/// Formats a start time like `Wed, Oct 30, 2024, 5:00 AM`.
pub fn format_start(start: NaiveDateTime) -> String {
    start.format("%a, %b %-d, %Y, %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use insta::assert_snapshot;

    use super::*;

    const SCHEDULE: &str = "\
Festival day two

A | Test Performance | Artist | Info
    2024-10-30 05:00

B | Another Event | Second Artist |
    30m

C | Late Set | Third Artist | Encore | maybe
    1h30m
";

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 29)
            .unwrap()
            .and_hms_opt(21, 3, 0)
            .unwrap()
    }

    fn config() -> ParserConfig {
        ParserConfig::new(5, 1, "Europe/Berlin").unwrap()
    }

    #[test]
    fn format_start_uses_twelve_hour_clock() {
        let start = NaiveDate::from_ymd_opt(2024, 10, 30)
            .unwrap()
            .and_hms_opt(17, 45, 0)
            .unwrap();
        assert_eq!(format_start(start), "Wed, Oct 30, 2024, 5:45 PM");
    }

    #[test]
    fn preview_lists_events_in_order() {
        let mut output = Vec::new();
        run(&mut output, SCHEDULE, &config(), now(), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Timezone: Europe/Berlin

        1. A | Test Performance
           Artist
           Info
           Wed, Oct 30, 2024, 5:00 AM (5 min)

        2. B | Another Event
           Second Artist
           Wed, Oct 30, 2024, 5:06 AM (30 min)

        3. C | Late Set
           Third Artist
           Encore | maybe
           Wed, Oct 30, 2024, 5:37 AM (90 min)
        ");
    }

    #[test]
    fn preview_shows_warnings_first() {
        let config = config().with_warnings(true);
        let mut output = Vec::new();
        run(&mut output, "A | Opening | Band\nsoon", &config, now(), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r#"
        Timezone: Europe/Berlin

        Line 2: unrecognized date or duration "soon"; using default duration (warning)

        1. A | Opening
           Band
           Tue, Oct 29, 2024, 9:05 PM (5 min)
        "#);
    }

    #[test]
    fn preview_reports_short_header() {
        let config = config().with_warnings(true);
        let mut output = Vec::new();
        run(&mut output, "A | B\n5m", &config, now(), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Timezone: Europe/Berlin

        Line 1: expected at least 3 fields (grade | title | artist), found 2 (error)

        1. A | B
           Tue, Oct 29, 2024, 9:05 PM (5 min)
        ");
    }

    #[test]
    fn preview_without_events() {
        let mut output = Vec::new();
        run(&mut output, "just some notes\n", &config(), now(), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Timezone: Europe/Berlin

        No events found.
        ");
    }

    #[test]
    fn json_output() {
        let mut output = Vec::new();
        run(&mut output, SCHEDULE, &config(), now(), true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let events = value["events"].as_array().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["title"], "Test Performance");
        assert_eq!(events[0]["start_time"], "2024-10-30T05:00:00");
        assert_eq!(events[1]["start_time"], "2024-10-30T05:06:00");
        assert_eq!(events[2]["duration_minutes"], 90);
        assert_eq!(value["warnings"].as_array().unwrap().len(), 0);
    }
}
