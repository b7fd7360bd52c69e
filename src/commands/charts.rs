use super::{print_json, CommandContext};
use crate::calendar::{
    aggregate_by_category, aggregate_by_date, duration_records, DateRange, DayAttribution,
    UncategorizedPolicy,
};
use crate::cli::InputArgs;
use crate::report::{category_shares, heatmap_cells, weekly_summary, HeatmapCell};
use anyhow::{anyhow, Result};
use log::info;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct EventDuration<'a> {
    subject: Option<&'a str>,
    start: String,
    categories: Vec<&'a str>,
    hours: f64,
}

#[derive(Debug, Serialize)]
struct CategoryRow<'a> {
    label: &'a str,
    hours: f64,
    percent: f64,
    color: Option<&'a str>,
}

pub fn list_events(ctx: &CommandContext, input: &InputArgs) -> Result<()> {
    let events = ctx.load_events(input)?;
    let records = duration_records(&events)?;

    let rows: Vec<EventDuration> = records
        .iter()
        .map(|record| EventDuration {
            subject: record.event.subject.as_deref(),
            start: record.event.start().map(|s| s.to_string()).unwrap_or_default(),
            categories: record.event.categories.iter().map(String::as_str).collect(),
            hours: record.hours,
        })
        .collect();

    if input.json {
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No events found.");
        return Ok(());
    }
    for row in &rows {
        println!(
            "{:<19}  {:>6.2}h  {}  [{}]",
            row.start,
            row.hours,
            row.subject.unwrap_or("(untitled)"),
            row.categories.join(", ")
        );
    }
    Ok(())
}

pub fn show_categories(ctx: &CommandContext, input: &InputArgs, bucket: bool) -> Result<()> {
    let events = ctx.load_events(input)?;
    let policy = if bucket {
        UncategorizedPolicy::Bucket(ctx.config.aggregation.uncategorized_label.clone())
    } else {
        ctx.config.aggregation.uncategorized_policy()
    };
    let totals = aggregate_by_category(&events, &policy)?;
    let shares = category_shares(&totals);

    let rows: Vec<CategoryRow> = shares
        .iter()
        .map(|share| CategoryRow {
            label: &share.label,
            hours: share.hours,
            percent: share.percent,
            color: ctx.config.categories.color_for(&share.label),
        })
        .collect();

    if input.json {
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No category data available.");
        return Ok(());
    }
    println!("Time Spent by Category:");
    for row in &rows {
        println!(
            "  {:<24} {:>8.2}h  {:>5.1}%  {}",
            row.label,
            row.hours,
            row.percent,
            row.color.unwrap_or("-")
        );
    }
    Ok(())
}

pub fn show_daily(
    ctx: &CommandContext,
    input: &InputArgs,
    year: Option<i32>,
    split: bool,
) -> Result<()> {
    let events = ctx.load_events(input)?;
    let range = year_range(ctx.year(year))?;
    let attribution =
        if split { DayAttribution::ProportionalSplit } else { ctx.config.aggregation.day_attribution };
    let daily = aggregate_by_date(&events, &range, attribution)?;

    if input.json {
        return print_json(&daily);
    }
    let active = daily.values().filter(|hours| **hours > 0.0).count();
    info!("{} of {} days have recorded time", active, daily.len());
    for (date, hours) in daily.iter().filter(|(_, hours)| **hours > 0.0) {
        println!("{}  {:>6.2}h", date, hours);
    }
    Ok(())
}

pub fn show_heatmap(
    ctx: &CommandContext,
    input: &InputArgs,
    category: &str,
    year: Option<i32>,
) -> Result<()> {
    let events = ctx.load_events(input)?;
    let range = year_range(ctx.year(year))?;
    let cells = heatmap_cells(&events, category, &range, ctx.config.aggregation.day_attribution)?;

    if input.json {
        return print_json(&cells);
    }
    if cells.iter().all(|cell| cell.hours == 0.0) {
        println!("No activity data available for the selected category.");
        return Ok(());
    }

    println!("Activity Heatmap for {}", category);
    let columns = heatmap_columns(&cells);
    for (weekday, name) in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"].iter().enumerate() {
        let mut line = String::with_capacity(columns.len() + 4);
        line.push_str(name);
        line.push(' ');
        for &(iso_year, iso_week) in &columns {
            let hours = cells
                .iter()
                .filter(|cell| {
                    cell.weekday == weekday as u32
                        && cell.iso_year == iso_year
                        && cell.iso_week == iso_week
                })
                .map(|cell| cell.hours)
                .sum::<f64>();
            line.push(shade(hours));
        }
        println!("{}", line);
    }
    Ok(())
}

pub fn show_weeks(
    ctx: &CommandContext,
    input: &InputArgs,
    from: Option<u32>,
    to: Option<u32>,
) -> Result<()> {
    let events = ctx.load_events(input)?;
    let configured = ctx.config.week_range();
    let weeks = from.unwrap_or(*configured.start())..=to.unwrap_or(*configured.end());
    let summary = weekly_summary(&events, weeks)?;

    if input.json {
        return print_json(&summary);
    }
    if summary.weeks.is_empty() {
        println!("No data available for the selected weeks.");
    } else {
        println!("Weekly Time Spent:");
        for (week, hours) in &summary.weeks {
            println!("  Week {:>2}  {:>7.2}h", week, hours);
        }
    }
    println!("Total Hours Spent: {:.2} hours", summary.total_hours);
    match summary.average_hours {
        Some(avg) => println!("Average Hours per Week: {:.2} hours", avg),
        None => println!("Average Hours per Week: n/a"),
    }
    Ok(())
}

/// Distinct (ISO year, ISO week) columns in date order. Late-December days
/// in week 1 of the next ISO year get their own trailing column.
fn heatmap_columns(cells: &[HeatmapCell]) -> Vec<(i32, u32)> {
    let mut columns: Vec<(i32, u32)> =
        cells.iter().map(|cell| (cell.iso_year, cell.iso_week)).collect();
    columns.dedup();
    columns
}

fn year_range(year: i32) -> Result<DateRange> {
    DateRange::year(year).ok_or_else(|| anyhow!("Year {} is out of range", year))
}

fn shade(hours: f64) -> char {
    match hours {
        h if h <= 0.0 => '.',
        h if h < 1.0 => '-',
        h if h < 3.0 => '+',
        h if h < 6.0 => '*',
        _ => '#',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_levels() {
        assert_eq!(shade(0.0), '.');
        assert_eq!(shade(0.5), '-');
        assert_eq!(shade(2.0), '+');
        assert_eq!(shade(5.9), '*');
        assert_eq!(shade(12.0), '#');
    }

    #[test]
    fn test_heatmap_columns_separate_iso_years() {
        let events = vec![crate::calendar::Event::from_text(
            "2024-12-30",
            "08:00",
            "2024-12-30",
            "09:00",
        )
        .unwrap()
        .with_category("Work")];
        let range = DateRange::year(2024).unwrap();
        let cells = heatmap_cells(&events, "Work", &range, DayAttribution::StartDate).unwrap();
        let columns = heatmap_columns(&cells);

        assert_eq!(columns.len(), 53);
        assert_eq!(columns.first(), Some(&(2024, 1)));
        assert_eq!(columns.last(), Some(&(2025, 1)));
        assert_eq!(columns.iter().filter(|(_, week)| *week == 1).count(), 2);
    }

    #[test]
    fn test_year_range_rejects_unrepresentable_year() {
        assert!(year_range(2024).is_ok());
        assert!(year_range(i32::MAX).is_err());
    }
}
