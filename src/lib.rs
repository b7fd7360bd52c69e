pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod report;

use anyhow::Result;
use log::*;

pub fn run(cli: cli::Cli) -> Result<()> {
    debug!("Running {:?}", cli.command);
    commands::run(cli)
}

pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

// Re-export commonly used types
pub use calendar::{
    aggregate_by_category, aggregate_by_date, aggregate_by_iso_week, compute_duration,
    duration_records, DateRange, DayAttribution, DurationRecord, Event, InvalidEventError,
    UncategorizedPolicy,
};
pub use config::Config;
