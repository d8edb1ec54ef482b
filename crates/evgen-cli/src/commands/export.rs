//! Export command: writes the schedule as an iCalendar file.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use evgen_core::ParserConfig;

/// Parses `text` and writes the calendar to `output`, or to `writer` when
/// no output path is given.
pub fn run<W: Write>(
    writer: &mut W,
    text: &str,
    config: &ParserConfig,
    now: NaiveDateTime,
    output: Option<&Path>,
) -> Result<()> {
    let result = evgen_core::parse_at(text, config, now);
    if result.events.is_empty() {
        bail!("no events to export");
    }

    let ics = evgen_ics::to_ics_at(&result.events, now).context("failed to build calendar")?;

    match output {
        Some(path) => {
            std::fs::write(path, &ics)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(
                events = result.events.len(),
                path = %path.display(),
                "exported calendar"
            );
        }
        None => writer.write_all(ics.as_bytes())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 29)
            .unwrap()
            .and_hms_opt(21, 3, 0)
            .unwrap()
    }

    #[test]
    fn writes_calendar_to_writer() {
        let mut output = Vec::new();
        let text = "A | Test Performance | Test Artist | Test Info\n2024-10-30 05:00\n";
        run(&mut output, text, &ParserConfig::default(), now(), None).unwrap();

        let ics = String::from_utf8(output).unwrap();
        assert!(ics.contains("SUMMARY:A | Test Performance"));
        assert!(ics.contains("DESCRIPTION:Test Artist - Test Info"));
        assert!(ics.contains("DTSTART:20241030T050000"));
        assert!(ics.contains("DTEND:20241030T050500"));
        assert!(ics.contains("DTSTAMP:20241029T210300"));
    }

    #[test]
    fn writes_calendar_to_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("events.ics");
        let mut stdout = Vec::new();

        run(
            &mut stdout,
            "A | One | X\n30m\nB | Two | Y\n",
            &ParserConfig::default(),
            now(),
            Some(&path),
        )
        .unwrap();

        assert!(stdout.is_empty());
        let ics = std::fs::read_to_string(&path).unwrap();
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert!(ics.contains("DTSTART:20241029T210500"));
        assert!(ics.contains("DTEND:20241029T213500"));
        assert!(ics.contains("DTSTART:20241029T213600"));
    }

    #[test]
    fn refuses_empty_schedule() {
        let mut output = Vec::new();
        let err = run(&mut output, "notes only", &ParserConfig::default(), now(), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "no events to export");
        assert!(output.is_empty());
    }
}
