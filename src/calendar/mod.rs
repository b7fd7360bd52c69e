//! Duration and aggregation engine for calendar events.
//
// Everything in here is pure computation over borrowed events. Reading and
// writing event tables lives in `calendar_import`; rendering lives outside
// this crate.

mod calendar_aggregate;
mod calendar_duration;
mod calendar_import;
mod calendar_types;
mod calendar_validation;

pub use calendar_aggregate::*;
pub use calendar_duration::*;
pub use calendar_import::*;
pub use calendar_types::*;
pub use calendar_validation::*;

/// Error raised when an event's date/time fields cannot produce a duration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidEventError {
    #[error("Event is missing its {0}")]
    MissingField(EventField),
    #[error("Invalid {field}: '{value}'")]
    Malformed { field: EventField, value: String },
    #[error("Event ends at {end} which is before its start at {start}, even after midnight rollover")]
    EndBeforeStart { start: String, end: String },
    #[error("Event lasts {minutes} minutes which exceeds 24 hours")]
    ExceedsDay { minutes: i64 },
}

/// Names the date/time field an [`InvalidEventError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    StartDate,
    StartTime,
    EndDate,
    EndTime,
}

impl std::fmt::Display for EventField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventField::StartDate => "start date",
            EventField::StartTime => "start time",
            EventField::EndDate => "end date",
            EventField::EndTime => "end time",
        };
        f.write_str(name)
    }
}
