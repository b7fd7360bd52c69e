//! Parsing and validation of event date/time text.
//
// Calendar exports disagree on formats: the dashboard table uses day-first
// dates with seconds, the exporter writes ISO timestamps without seconds.

use super::{EventField, InvalidEventError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeSet;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a calendar date. Blank input yields `Ok(None)`.
pub fn parse_date(text: &str, field: EventField) -> Result<Option<NaiveDate>, InvalidEventError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .map(Some)
        .ok_or_else(|| malformed(field, text))
}

/// Parse a clock time, with or without seconds. Blank input yields `Ok(None)`.
pub fn parse_time(text: &str, field: EventField) -> Result<Option<NaiveTime>, InvalidEventError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
        .map(Some)
        .ok_or_else(|| malformed(field, text))
}

/// Parse a combined timestamp such as `2024-03-01 09:30`.
///
/// `field` should name the date half; a failure is reported against it.
pub fn parse_timestamp(
    text: &str,
    field: EventField,
) -> Result<Option<NaiveDateTime>, InvalidEventError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(Some)
        .ok_or_else(|| malformed(field, text))
}

/// Split a comma-separated category cell into trimmed, non-empty labels.
pub fn split_categories(cell: &str) -> BTreeSet<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

fn malformed(field: EventField, text: &str) -> InvalidEventError {
    InvalidEventError::Malformed { field, value: text.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 7);
        assert_eq!(parse_date("2024-03-07", EventField::StartDate).unwrap(), expected);
        assert_eq!(parse_date("07/03/2024", EventField::StartDate).unwrap(), expected);
        assert_eq!(parse_date("   ", EventField::StartDate).unwrap(), None);
        assert!(parse_date("2024-13-40", EventField::StartDate).is_err());
    }

    #[test]
    fn test_parse_time_formats() {
        let expected = NaiveTime::from_hms_opt(23, 5, 0);
        assert_eq!(parse_time("23:05", EventField::EndTime).unwrap(), expected);
        assert_eq!(parse_time("23:05:00", EventField::EndTime).unwrap(), expected);
        assert_eq!(parse_time("", EventField::EndTime).unwrap(), None);

        match parse_time("25:99", EventField::EndTime) {
            Err(InvalidEventError::Malformed { field, value }) => {
                assert_eq!(field, EventField::EndTime);
                assert_eq!(value, "25:99");
            }
            other => panic!("Expected malformed end time, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_timestamp() {
        let parsed = parse_timestamp("2024-01-31 22:15", EventField::StartDate).unwrap().unwrap();
        assert_eq!(parsed.to_string(), "2024-01-31 22:15:00");
        assert!(parse_timestamp("yesterday", EventField::StartDate).is_err());
    }

    #[test]
    fn test_split_categories() {
        let labels = split_categories(" Work, Reading ,, Work ");
        assert_eq!(labels.len(), 2);
        assert!(labels.contains("Work"));
        assert!(labels.contains("Reading"));
        assert!(split_categories("").is_empty());
    }
}
