//! Line classification and event extraction.
//!
//! A header line is any non-blank line containing `|`. The line right after
//! a header is its detail line and is consumed with it, whatever it holds.
//! Every other line is ignored.

use chrono::NaiveDateTime;

use crate::recognize::{Recognition, RecognizerChain};
use crate::types::{ParseResult, ParseWarning, ParserConfig, ProvisionalEvent, Severity};

/// Minimum `|`-separated fields for a usable header.
const MIN_HEADER_FIELDS: usize = 3;

/// Textual fields of a header line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    pub grade: String,
    pub title: String,
    pub artist: String,
    /// Everything after the third `|`, with later pipes kept verbatim.
    pub description: String,
}

/// Splits a header line into its fields.
///
/// Returns `None` when the line has fewer than three fields.
pub fn split_header(line: &str) -> Option<HeaderFields> {
    let mut parts = line.trim().splitn(MIN_HEADER_FIELDS + 1, '|');
    let grade = parts.next()?.trim();
    let title = parts.next()?.trim();
    let artist = parts.next()?.trim();
    let description = parts.next().map_or("", str::trim);

    Some(HeaderFields {
        grade: grade.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        description: description.to_string(),
    })
}

/// Whether a line opens an event.
pub fn is_header(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.contains('|')
}

/// Position of one header line and its detail line, as 0-based indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LinePair {
    pub header: usize,
    /// `None` when the header is the last line.
    pub detail: Option<usize>,
}

/// Pairs each header with the line that follows it, in input order.
pub(crate) fn pair_lines(lines: &[&str]) -> Vec<LinePair> {
    let mut pairs = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        if !is_header(lines[index]) {
            index += 1;
            continue;
        }

        let detail = (index + 1 < lines.len()).then_some(index + 1);
        pairs.push(LinePair {
            header: index,
            detail,
        });
        index += 2;
    }

    pairs
}

/// Builds provisional events from the text. Start times are left unset
/// unless a detail line carries an explicit date.
pub(crate) fn extract_events(
    text: &str,
    config: &ParserConfig,
    chain: &RecognizerChain,
    now: NaiveDateTime,
) -> ParseResult {
    let lines: Vec<&str> = text.lines().collect();
    let mut result = ParseResult::default();

    for pair in pair_lines(&lines) {
        let header = lines[pair.header].trim();
        let detail = pair.detail.map_or("", |index| lines[index]);
        let header_line_number = pair.header + 1;

        let fields = split_header(header).unwrap_or_else(|| {
            let found = header.split('|').count();
            tracing::debug!(
                line = header_line_number,
                found,
                "header has too few fields"
            );
            if config.emit_warnings() {
                result.warnings.push(ParseWarning {
                    line_number: header_line_number,
                    message: format!(
                        "expected at least {MIN_HEADER_FIELDS} fields (grade | title | artist), found {found}"
                    ),
                    severity: Severity::Error,
                });
            }
            HeaderFields::default()
        });

        let recognition = chain.recognize(detail, now);
        if recognition.is_none() && !detail.trim().is_empty() {
            tracing::debug!(
                line = header_line_number + 1,
                detail = detail.trim(),
                "unrecognized detail line"
            );
            if config.emit_warnings() {
                result.warnings.push(ParseWarning {
                    line_number: header_line_number + 1,
                    message: format!(
                        "unrecognized date or duration \"{}\"; using default duration",
                        detail.trim()
                    ),
                    severity: Severity::Warning,
                });
            }
        }

        let (start_time, duration) = match recognition {
            Some(Recognition::Start(start)) => (Some(start), None),
            Some(Recognition::Duration(minutes)) => (None, Some(minutes)),
            None => (None, None),
        };

        result.events.push(ProvisionalEvent {
            grade: fields.grade,
            title: fields.title,
            artist: fields.artist,
            description: fields.description,
            start_time,
            duration_minutes: duration
                .filter(|minutes| *minutes > 0)
                .unwrap_or_else(|| config.default_duration_minutes()),
            source_text: format!("{header}\n{detail}"),
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike};

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn extract(text: &str) -> ParseResult {
        extract_events(
            text,
            &ParserConfig::default(),
            &RecognizerChain::standard(),
            now(),
        )
    }

    #[test]
    fn split_header_maps_fields() {
        let fields = split_header("A | Test Performance | Artist | Info").unwrap();
        assert_eq!(
            fields,
            HeaderFields {
                grade: "A".to_string(),
                title: "Test Performance".to_string(),
                artist: "Artist".to_string(),
                description: "Info".to_string(),
            }
        );
    }

    #[test]
    fn split_header_keeps_later_pipes_in_description() {
        let fields = split_header("A | Event | Artist | Part 1 | Part 2 | Part 3").unwrap();
        assert_eq!(fields.description, "Part 1 | Part 2 | Part 3");
    }

    #[test]
    fn split_header_three_fields_has_empty_description() {
        let fields = split_header("A | B | C").unwrap();
        assert_eq!(fields.artist, "C");
        assert_eq!(fields.description, "");

        let trailing = split_header("A | Event | Artist |").unwrap();
        assert_eq!(trailing.description, "");
    }

    #[test]
    fn split_header_only_pipes() {
        let fields = split_header("|||||").unwrap();
        assert_eq!(fields.grade, "");
        assert_eq!(fields.description, "||");
    }

    #[test]
    fn split_header_rejects_short_headers() {
        assert_eq!(split_header("A | B"), None);
        assert_eq!(split_header("|"), None);
    }

    #[test]
    fn is_header_requires_pipe() {
        assert!(is_header("  A | B  "));
        assert!(!is_header("Invalid Line"));
        assert!(!is_header("   "));
    }

    #[test]
    fn pair_lines_consumes_line_after_header() {
        let lines = ["note", "A | B | C", "A | D | E", "", "F | G | H"];
        assert_eq!(
            pair_lines(&lines),
            vec![
                LinePair {
                    header: 1,
                    detail: Some(2),
                },
                LinePair {
                    header: 4,
                    detail: None,
                },
            ]
        );
    }

    #[test]
    fn short_header_still_yields_event() {
        let result = extract("A | B\n5m");
        assert_eq!(result.events.len(), 1);
        let event = &result.events[0];
        assert_eq!(event.grade, "");
        assert_eq!(event.title, "");
        assert_eq!(event.artist, "");
        assert_eq!(event.description, "");
        assert_eq!(event.duration_minutes, 5);
        assert_eq!(event.source_text, "A | B\n5m");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn explicit_start_is_kept() {
        let result = extract("A | Test Performance | Artist | Info\n    Oct 30 05:00am");
        let event = &result.events[0];
        let start = event.start_time.unwrap();
        assert_eq!((start.hour(), start.minute()), (5, 0));
        assert_eq!(event.duration_minutes, 5);
        assert_eq!(
            event.source_text,
            "A | Test Performance | Artist | Info\n    Oct 30 05:00am"
        );
    }

    #[test]
    fn duration_overrides_default() {
        let result = extract("B | Another Event | Artist | Info\n    30m");
        let event = &result.events[0];
        assert_eq!(event.start_time, None);
        assert_eq!(event.duration_minutes, 30);
    }

    #[test]
    fn zero_duration_falls_back_to_default() {
        let result = extract("A | B | C\n0m");
        assert_eq!(result.events[0].duration_minutes, 5);
        assert_eq!(result.events[0].start_time, None);
    }

    #[test]
    fn header_as_last_line_has_empty_detail() {
        let result = extract("A | B | C");
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].source_text, "A | B | C\n");
        assert_eq!(result.events[0].start_time, None);
    }

    #[test]
    fn header_in_detail_position_is_consumed() {
        let result = extract("A | First | X\nB | Second | Y\nC | Third | Z\n5m");
        let titles: Vec<_> = result.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Third"]);
    }

    #[test]
    fn silent_by_default() {
        let result = extract("A | B\nwhenever");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn warnings_when_enabled() {
        let config = ParserConfig::default().with_warnings(true);
        let result = extract_events(
            "intro\nA | B\nwhenever\n\nC | D | E\n5m\nF | G | H\n",
            &config,
            &RecognizerChain::standard(),
            now(),
        );

        assert_eq!(result.events.len(), 3);
        assert_eq!(
            result.warnings,
            vec![
                ParseWarning {
                    line_number: 2,
                    message: "expected at least 3 fields (grade | title | artist), found 2"
                        .to_string(),
                    severity: Severity::Error,
                },
                ParseWarning {
                    line_number: 3,
                    message: "unrecognized date or duration \"whenever\"; using default duration"
                        .to_string(),
                    severity: Severity::Warning,
                },
            ]
        );
    }
}
