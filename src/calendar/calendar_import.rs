//! CSV import and export of event tables.
//
// Two layouts are understood. The dashboard table splits every instant into
// `Start Date` / `Start Time` columns (day-first dates), while the calendar
// exporter writes `Start` / `End` timestamps. Both carry a comma-joined
// `Categories` cell.

use super::calendar_validation::{parse_timestamp, split_categories};
use super::{Event, EventField};
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

const DATE_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Deserialize)]
struct EventRow {
    #[serde(rename = "Subject", default)]
    subject: Option<String>,
    #[serde(rename = "Start Date", default)]
    start_date: Option<String>,
    #[serde(rename = "Start Time", default)]
    start_time: Option<String>,
    #[serde(rename = "End Date", default)]
    end_date: Option<String>,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Start", default)]
    start: Option<String>,
    #[serde(rename = "End", default)]
    end: Option<String>,
    #[serde(rename = "Location", default)]
    location: Option<String>,
    #[serde(rename = "Categories", default)]
    categories: Option<String>,
}

#[derive(Debug, Serialize)]
struct DashboardRow<'a> {
    #[serde(rename = "Subject")]
    subject: &'a str,
    #[serde(rename = "Start Date")]
    start_date: String,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Date")]
    end_date: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Categories")]
    categories: String,
}

impl EventRow {
    fn into_event(self) -> Result<Event, super::InvalidEventError> {
        let mut event = if self.start.is_some() || self.end.is_some() {
            let start = parse_timestamp(text(&self.start), EventField::StartDate)?;
            let end = parse_timestamp(text(&self.end), EventField::EndDate)?;
            Event {
                start_date: start.map(|s| s.date()),
                start_time: start.map(|s| s.time()),
                end_date: end.map(|e| e.date()),
                end_time: end.map(|e| e.time()),
                ..Event::default()
            }
        } else {
            Event::from_text(
                text(&self.start_date),
                text(&self.start_time),
                text(&self.end_date),
                text(&self.end_time),
            )?
        };
        event.subject = non_blank(self.subject);
        event.location = non_blank(self.location);
        event.categories = split_categories(text(&self.categories));
        Ok(event)
    }
}

fn text(cell: &Option<String>) -> &str {
    cell.as_deref().unwrap_or("")
}

fn non_blank(cell: Option<String>) -> Option<String> {
    cell.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Read events from CSV with a header row.
///
/// Blank date/time cells are kept as missing fields; text that does not
/// parse fails with the row number attached.
pub fn read_events<R: Read>(reader: R) -> Result<Vec<Event>> {
    let mut csv_reader =
        csv::ReaderBuilder::new().trim(csv::Trim::All).flexible(true).from_reader(reader);
    let mut events = Vec::new();

    for (index, record) in csv_reader.deserialize::<EventRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let row = record.with_context(|| format!("Failed to read CSV row {}", line))?;
        let event = row.into_event().with_context(|| format!("Invalid event on row {}", line))?;
        debug!("Row {}: {:?} {:?}", line, event.subject, event.categories);
        events.push(event);
    }

    Ok(events)
}

/// Load events from a CSV file on disk.
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let events = read_events(file).with_context(|| format!("Failed to import {}", path.display()))?;
    info!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Write events in the dashboard layout.
pub fn write_events<W: Write>(writer: W, events: &[Event]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for event in events {
        let row = DashboardRow {
            subject: event.subject.as_deref().unwrap_or(""),
            start_date: event.start_date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default(),
            start_time: event.start_time.map(|t| t.format(TIME_FORMAT).to_string()).unwrap_or_default(),
            end_date: event.end_date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default(),
            end_time: event.end_time.map(|t| t.format(TIME_FORMAT).to_string()).unwrap_or_default(),
            location: event.location.as_deref().unwrap_or(""),
            categories: event.categories.iter().cloned().collect::<Vec<_>>().join(", "),
        };
        csv_writer.serialize(row).context("Failed to write event row")?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Save events to a CSV file, replacing any existing file.
pub fn save_events(path: &Path, events: &[Event]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_events(file, events)
        .with_context(|| format!("Failed to save events to {}", path.display()))?;
    info!("Saved {} events to {}", events.len(), path.display());
    Ok(())
}
