//! Chart-ready views built on top of the calendar aggregates.

use crate::calendar::{
    date_totals, duration_records, iso_week_totals, DateRange, DayAttribution, Event,
    InvalidEventError,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Week range shown by the weekly overview when nothing else is chosen.
pub const DEFAULT_WEEK_RANGE: RangeInclusive<u32> = 1..=52;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub weeks: BTreeMap<u32, f64>,
    pub total_hours: f64,
    /// Mean over the weeks that have any events; `None` when none do.
    pub average_hours: Option<f64>,
}

/// One square of the activity heatmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    /// ISO year owning `iso_week`; differs from the calendar year near New Year.
    pub iso_year: i32,
    pub iso_week: u32,
    /// 0 is Monday.
    pub weekday: u32,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub label: String,
    pub hours: f64,
    /// Share of the summed category totals, 0-100.
    pub percent: f64,
}

/// Events whose start date falls in an ISO week within `weeks`.
pub fn filter_weeks(events: &[Event], weeks: RangeInclusive<u32>) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| {
            event.start_date.is_some_and(|date| weeks.contains(&date.iso_week().week()))
        })
        .collect()
}

pub fn events_in_category<'a>(events: &'a [Event], label: &str) -> Vec<&'a Event> {
    events.iter().filter(|event| event.has_category(label)).collect()
}

/// Weekly totals for the events in `weeks`, with total and average hours.
///
/// Every event is checked, including those outside `weeks`.
pub fn weekly_summary(
    events: &[Event],
    weeks: RangeInclusive<u32>,
) -> Result<WeeklySummary, InvalidEventError> {
    duration_records(events)?;
    let weeks = iso_week_totals(filter_weeks(events, weeks), None)?;
    let total_hours: f64 = weeks.values().sum();
    let average_hours = (!weeks.is_empty()).then(|| total_hours / weeks.len() as f64);
    Ok(WeeklySummary { weeks, total_hours, average_hours })
}

/// One cell per day of `range` with the hours spent on `label`.
///
/// Every event is checked, including those in other categories.
pub fn heatmap_cells(
    events: &[Event],
    label: &str,
    range: &DateRange,
    attribution: DayAttribution,
) -> Result<Vec<HeatmapCell>, InvalidEventError> {
    duration_records(events)?;
    let daily = date_totals(events_in_category(events, label), range, attribution)?;
    Ok(daily
        .into_iter()
        .map(|(date, hours)| HeatmapCell {
            date,
            iso_year: date.iso_week().year(),
            iso_week: date.iso_week().week(),
            weekday: date.weekday().num_days_from_monday(),
            hours,
        })
        .collect())
}

/// Category totals as pie slices, largest first.
pub fn category_shares(totals: &BTreeMap<String, f64>) -> Vec<CategoryShare> {
    let sum: f64 = totals.values().sum();
    let mut shares: Vec<CategoryShare> = totals
        .iter()
        .map(|(label, hours)| CategoryShare {
            label: label.clone(),
            hours: *hours,
            percent: if sum > 0.0 { hours / sum * 100.0 } else { 0.0 },
        })
        .collect();
    shares.sort_by(|a, b| b.hours.total_cmp(&a.hours).then_with(|| a.label.cmp(&b.label)));
    shares
}
