//! Parse entry points.

use chrono::{Local, NaiveDateTime};

use crate::classify::extract_events;
use crate::recognize::{RecognizerChain, STANDARD_CHAIN};
use crate::resolve::resolve_start_times;
use crate::types::{ParseResult, ParserConfig};

/// Parses schedule text into resolved events, using the local wall clock.
pub fn parse(text: &str, config: &ParserConfig) -> ParseResult {
    parse_at(text, config, Local::now().naive_local())
}

/// Parses schedule text with an explicit clock.
///
/// `now` seeds the running clock and supplies the year for dates typed
/// without one. Identical inputs always give identical output.
pub fn parse_at(text: &str, config: &ParserConfig, now: NaiveDateTime) -> ParseResult {
    parse_with(text, config, &STANDARD_CHAIN, now)
}

/// Parses schedule text with a custom recognizer chain.
pub fn parse_with(
    text: &str,
    config: &ParserConfig,
    chain: &RecognizerChain,
    now: NaiveDateTime,
) -> ParseResult {
    let mut result = extract_events(text, config, chain, now);
    resolve_start_times(&mut result.events, config, now);

    tracing::debug!(
        events = result.events.len(),
        warnings = result.warnings.len(),
        "parsed schedule"
    );
    result
}
