//! Per-event duration, including events that run past midnight.

use super::{DurationRecord, Event, InvalidEventError};
use chrono::{NaiveDateTime, TimeDelta};
use log::trace;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Start and end instants of an event after midnight rollover.
///
/// An end that reads earlier than the start is moved forward by exactly one
/// day. Only a single midnight is ever assumed.
pub fn resolve_span(event: &Event) -> Result<(NaiveDateTime, NaiveDateTime), InvalidEventError> {
    let start = event.start()?;
    let mut end = event.end()?;
    if end < start {
        end += TimeDelta::days(1);
    }
    if end < start {
        return Err(InvalidEventError::EndBeforeStart {
            start: start.to_string(),
            end: event.end()?.to_string(),
        });
    }
    let span = end - start;
    if span > TimeDelta::days(1) {
        return Err(InvalidEventError::ExceedsDay { minutes: span.num_minutes() });
    }
    Ok((start, end))
}

/// Duration of `event` in fractional hours.
pub fn compute_duration(event: &Event) -> Result<f64, InvalidEventError> {
    let (start, end) = resolve_span(event)?;
    let hours = hours_between(start, end);
    trace!("{} -> {} = {:.2}h", start, end, hours);
    Ok(hours)
}

pub(super) fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_seconds() as f64 / SECONDS_PER_HOUR
}

/// Duration of every event, failing on the first invalid one.
pub fn duration_records(events: &[Event]) -> Result<Vec<DurationRecord<'_>>, InvalidEventError> {
    events
        .iter()
        .map(|event| compute_duration(event).map(|hours| DurationRecord { event, hours }))
        .collect()
}
