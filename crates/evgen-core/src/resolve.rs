//! Start time resolution.
//!
//! Events without an explicit start are placed on a running clock. The clock
//! starts at "now" rounded up to a 5-minute mark and, after every event, is
//! reset to that event's start plus its duration plus the configured gap.
//!
//! The reset uses each event's own start, explicit or not. An early explicit
//! date therefore pulls the next auto-placed event back with it.

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::types::{ParserConfig, ProvisionalEvent};

/// Rounds the minute up to the next multiple of 5 and drops seconds.
///
/// Only the minute field is rounded: `10:05:30` becomes `10:05:00`.
pub fn round_up_to_five_minutes(now: NaiveDateTime) -> NaiveDateTime {
    let minute = now.minute();
    let rounded = minute.div_ceil(5) * 5;
    let offset = Duration::minutes(i64::from(rounded - minute))
        - Duration::seconds(i64::from(now.second()))
        - Duration::nanoseconds(i64::from(now.nanosecond()));
    now.checked_add_signed(offset)
        .unwrap_or(NaiveDateTime::MAX)
}

/// Fills in missing start times, in order, without reordering.
pub fn resolve_start_times(
    events: &mut [ProvisionalEvent],
    config: &ParserConfig,
    now: NaiveDateTime,
) {
    let mut clock = round_up_to_five_minutes(now);

    for event in events.iter_mut() {
        let start = *event.start_time.get_or_insert(clock);
        let advance = Duration::minutes(
            i64::from(event.duration_minutes) + i64::from(config.gap_minutes()),
        );
        clock = start.checked_add_signed(advance).unwrap_or_else(|| {
            tracing::warn!(%start, "schedule clock overflowed");
            NaiveDateTime::MAX
        });
    }
}
