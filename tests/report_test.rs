use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use test_case::test_case;
use timedash::report::{events_in_category, filter_weeks, heatmap_cells, weekly_summary};
use timedash::calendar::EventField;
use timedash::{DateRange, DayAttribution, Event, InvalidEventError};

fn event(sd: &str, st: &str, ed: &str, et: &str, label: &str) -> Event {
    Event::from_text(sd, st, ed, et).unwrap().with_category(label)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn year_of_events() -> Vec<Event> {
    vec![
        event("2024-01-03", "07:00", "2024-01-03", "08:00", "Exercise"),
        event("2024-01-03", "09:00", "2024-01-03", "17:00", "Work"),
        event("2024-01-05", "07:00", "2024-01-05", "08:30", "Exercise"),
        event("2024-06-12", "18:00", "2024-06-12", "19:00", "Exercise"),
        event("2024-12-30", "22:00", "2024-12-31", "00:30", "Reading"),
    ]
}

#[test_case(1..=1, 4 ; "week one includes december thirtieth")]
#[test_case(2..=23, 0 ; "quiet stretch")]
#[test_case(24..=24, 1 ; "june")]
#[test_case(25..=53, 0 ; "second half")]
#[test_case(1..=52, 5 ; "default range")]
fn filter_weeks_counts(weeks: std::ops::RangeInclusive<u32>, expected: usize) {
    let events = year_of_events();
    assert_eq!(filter_weeks(&events, weeks).len(), expected);
}

#[test]
fn weekly_summary_totals_and_average() {
    let events = year_of_events();
    let summary = weekly_summary(&events, 1..=52).unwrap();
    assert_eq!(summary.weeks.keys().copied().collect::<Vec<_>>(), vec![1, 24]);
    // 2024-12-30 is a Monday in ISO week 1 of 2025 and shares its key.
    assert_eq!(summary.weeks[&1], 13.0);
    assert_eq!(summary.total_hours, 14.0);
    assert_eq!(summary.average_hours, Some(7.0));
}

#[test]
fn heatmap_has_one_cell_per_day() {
    let events = year_of_events();
    let range = DateRange::year(2024).unwrap();
    let cells = heatmap_cells(&events, "Exercise", &range, DayAttribution::StartDate).unwrap();

    assert_eq!(cells.len(), 366);
    let active: Vec<_> = cells.iter().filter(|c| c.hours > 0.0).collect();
    assert_eq!(active.len(), 3);

    // Wednesday 3 January 2024
    assert_eq!(active[0].date, day(2024, 1, 3));
    assert_eq!(active[0].iso_year, 2024);
    assert_eq!(active[0].iso_week, 1);
    assert_eq!(active[0].weekday, 2);
    assert_eq!(active[0].hours, 1.0);
    assert_eq!(active[1].hours, 1.5);
}

#[test]
fn heatmap_for_unknown_category_is_all_zero() {
    let range = DateRange::new(day(2024, 1, 1), day(2024, 1, 7));
    let cells =
        heatmap_cells(&year_of_events(), "Gardening", &range, DayAttribution::StartDate).unwrap();
    assert_eq!(cells.len(), 7);
    assert!(cells.iter().all(|c| c.hours == 0.0));
    assert_eq!(cells[6].weekday, 6);
}

#[test]
fn heatmap_split_moves_hours_past_midnight() {
    let range = DateRange::new(day(2024, 12, 30), day(2024, 12, 31));
    let cells =
        heatmap_cells(&year_of_events(), "Reading", &range, DayAttribution::ProportionalSplit)
            .unwrap();
    assert_eq!(cells.iter().map(|c| c.hours).collect::<Vec<_>>(), vec![2.0, 0.5]);
}

#[test]
fn category_filter_is_exact_label_match() {
    let events = year_of_events();
    assert_eq!(events_in_category(&events, "Exercise").len(), 3);
    assert!(events_in_category(&events, "exercise").is_empty());
}

#[test]
fn heatmap_cells_carry_the_iso_year() {
    let range = DateRange::new(day(2024, 12, 29), day(2024, 12, 31));
    let cells =
        heatmap_cells(&year_of_events(), "Reading", &range, DayAttribution::StartDate).unwrap();
    let keys: Vec<(i32, u32)> = cells.iter().map(|c| (c.iso_year, c.iso_week)).collect();
    assert_eq!(keys, vec![(2024, 52), (2025, 1), (2025, 1)]);
}

#[test]
fn weekly_summary_rejects_invalid_event_outside_selected_weeks() {
    let mut events = year_of_events();
    // No start date, so no week could select it.
    events.push(Event::from_text("", "09:00", "2024-01-02", "10:00").unwrap().with_category("Work"));

    let result = weekly_summary(&events, 1..=52);
    assert_eq!(result, Err(InvalidEventError::MissingField(EventField::StartDate)));
}

#[test]
fn weekly_summary_rejects_oversized_event_in_unselected_week() {
    let mut events = year_of_events();
    events.push(event("2024-06-12", "08:00", "2024-06-14", "08:00", "Work"));

    let result = weekly_summary(&events, 1..=1);
    assert_eq!(result, Err(InvalidEventError::ExceedsDay { minutes: 48 * 60 }));
}

#[test]
fn heatmap_rejects_invalid_event_in_another_category() {
    let events = vec![
        event("2024-01-03", "09:00", "2024-01-03", "17:00", "Work"),
        event("2024-01-01", "00:00", "2024-01-04", "00:00", "Sleep"),
    ];
    let range = DateRange::year(2024).unwrap();

    let result = heatmap_cells(&events, "Work", &range, DayAttribution::StartDate);
    assert_eq!(result, Err(InvalidEventError::ExceedsDay { minutes: 72 * 60 }));
}
