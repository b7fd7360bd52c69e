//! Grouped duration totals that drive the dashboard charts.
//
// Each aggregate validates the whole input before summing anything, so a
// single bad event yields an error and never a partial map.

use super::calendar_duration::{hours_between, resolve_span};
use super::{DateRange, DayAttribution, Event, InvalidEventError, UncategorizedPolicy};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Total hours per category label.
///
/// An event with several labels adds its full duration to each of them, so
/// the values do not sum to the time actually spent when labels overlap.
pub fn aggregate_by_category(
    events: &[Event],
    uncategorized: &UncategorizedPolicy,
) -> Result<BTreeMap<String, f64>, InvalidEventError> {
    let spans = spans(events)?;
    let mut totals = BTreeMap::new();
    let mut skipped = 0usize;

    for (event, span) in events.iter().zip(spans) {
        let hours = hours_between(span.0, span.1);
        if event.categories.is_empty() {
            match uncategorized {
                UncategorizedPolicy::Exclude => skipped += 1,
                UncategorizedPolicy::Bucket(label) => {
                    *totals.entry(label.clone()).or_insert(0.0) += hours;
                }
            }
            continue;
        }
        for label in &event.categories {
            *totals.entry(label.clone()).or_insert(0.0) += hours;
        }
    }

    if skipped > 0 {
        debug!("Left {} uncategorized events out of the category totals", skipped);
    }
    Ok(totals)
}

/// Total hours per day of `range`. Every day of the range is present.
///
/// Hours that land on days outside the range are dropped.
pub fn aggregate_by_date(
    events: &[Event],
    range: &DateRange,
    attribution: DayAttribution,
) -> Result<BTreeMap<NaiveDate, f64>, InvalidEventError> {
    let totals = date_totals(events, range, attribution)?;
    debug!("Aggregated {} events over {} days", events.len(), range.len());
    Ok(totals)
}

/// [`aggregate_by_date`] over any borrowed selection of events.
pub(crate) fn date_totals<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    range: &DateRange,
    attribution: DayAttribution,
) -> Result<BTreeMap<NaiveDate, f64>, InvalidEventError> {
    let spans = spans(events)?;
    let mut totals: BTreeMap<NaiveDate, f64> = range.iter().map(|day| (day, 0.0)).collect();

    let mut credit = |day: NaiveDate, hours: f64| {
        if let Some(total) = totals.get_mut(&day) {
            *total += hours;
        }
    };

    for (start, end) in spans {
        match attribution {
            DayAttribution::StartDate => credit(start.date(), hours_between(start, end)),
            DayAttribution::ProportionalSplit => {
                if end.date() == start.date() {
                    credit(start.date(), hours_between(start, end));
                } else {
                    // At most one midnight lies inside a resolved span.
                    let midnight = end.date().and_time(NaiveTime::MIN);
                    credit(start.date(), hours_between(start, midnight));
                    credit(end.date(), hours_between(midnight, end));
                }
            }
        }
    }

    Ok(totals)
}

/// Total hours per ISO-8601 week number of each event's start date.
///
/// With `fill`, every week number in it appears even when no event falls
/// in it.
pub fn aggregate_by_iso_week(
    events: &[Event],
    fill: Option<RangeInclusive<u32>>,
) -> Result<BTreeMap<u32, f64>, InvalidEventError> {
    iso_week_totals(events, fill)
}

/// [`aggregate_by_iso_week`] over any borrowed selection of events.
pub(crate) fn iso_week_totals<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    fill: Option<RangeInclusive<u32>>,
) -> Result<BTreeMap<u32, f64>, InvalidEventError> {
    let spans = spans(events)?;
    let mut totals: BTreeMap<u32, f64> =
        fill.into_iter().flatten().map(|week| (week, 0.0)).collect();

    for (start, end) in spans {
        *totals.entry(start.iso_week().week()).or_insert(0.0) += hours_between(start, end);
    }
    Ok(totals)
}

fn spans<'a>(
    events: impl IntoIterator<Item = &'a Event>,
) -> Result<Vec<(NaiveDateTime, NaiveDateTime)>, InvalidEventError> {
    events.into_iter().map(resolve_span).collect()
}
