//! Event model shared by the engine, the importer and the reports.

use super::calendar_validation::{parse_date, parse_time};
use super::{EventField, InvalidEventError};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// A single calendar appointment.
///
/// Date and time halves are kept apart because that is how calendar tables
/// deliver them; a `None` half is reported as missing by
/// [`compute_duration`](super::compute_duration).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub subject: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    pub categories: BTreeSet<String>,
}

impl Event {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start_date: Some(start.date()),
            start_time: Some(start.time()),
            end_date: Some(end.date()),
            end_time: Some(end.time()),
            ..Self::default()
        }
    }

    /// Build an event from the four text fields of a calendar table.
    ///
    /// Blank fields stay `None`; anything else must parse.
    pub fn from_text(
        start_date: &str,
        start_time: &str,
        end_date: &str,
        end_time: &str,
    ) -> Result<Self, InvalidEventError> {
        Ok(Self {
            start_date: parse_date(start_date, EventField::StartDate)?,
            start_time: parse_time(start_time, EventField::StartTime)?,
            end_date: parse_date(end_date, EventField::EndDate)?,
            end_time: parse_time(end_time, EventField::EndTime)?,
            ..Self::default()
        })
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_category(mut self, label: impl Into<String>) -> Self {
        self.categories.insert(label.into());
        self
    }

    pub fn has_category(&self, label: &str) -> bool {
        self.categories.contains(label)
    }

    pub fn start(&self) -> Result<NaiveDateTime, InvalidEventError> {
        let date = self.start_date.ok_or(InvalidEventError::MissingField(EventField::StartDate))?;
        let time = self.start_time.ok_or(InvalidEventError::MissingField(EventField::StartTime))?;
        Ok(date.and_time(time))
    }

    pub fn end(&self) -> Result<NaiveDateTime, InvalidEventError> {
        let date = self.end_date.ok_or(InvalidEventError::MissingField(EventField::EndDate))?;
        let time = self.end_time.ok_or(InvalidEventError::MissingField(EventField::EndTime))?;
        Ok(date.and_time(time))
    }
}

/// Duration of one event in hours. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationRecord<'a> {
    pub event: &'a Event,
    pub hours: f64,
}

/// Inclusive, contiguous run of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    first: NaiveDate,
    last: NaiveDate,
}

impl DateRange {
    /// A range with `last` before `first` is empty.
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self { first, last }
    }

    /// Every day of `year`, or `None` when chrono cannot represent it.
    pub fn year(year: i32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(Self { first, last })
    }

    pub fn first(&self) -> NaiveDate {
        self.first
    }

    pub fn last(&self) -> NaiveDate {
        self.last
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    pub fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first).num_days() as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last;
        std::iter::successors(Some(self.first), |day| day.checked_add_days(Days::new(1)))
            .take_while(move |day| *day <= last)
    }
}

/// What [`aggregate_by_category`](super::aggregate_by_category) does with
/// events that carry no category label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UncategorizedPolicy {
    #[default]
    Exclude,
    Bucket(String),
}

impl UncategorizedPolicy {
    pub fn bucket() -> Self {
        UncategorizedPolicy::Bucket(DEFAULT_UNCATEGORIZED_LABEL.to_string())
    }
}

/// Which day a midnight-crossing event's hours are credited to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayAttribution {
    /// All hours go to the start date.
    #[default]
    StartDate,
    /// Hours before midnight go to the start date, the rest to the next day.
    #[serde(alias = "proportional")]
    ProportionalSplit,
}
