use crate::calendar::{self, compute_duration, Event};
use crate::cli::{Cli, Commands, InputArgs};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local};
use log::{debug, warn};
use serde::Serialize;
use std::path::PathBuf;

pub mod charts;
pub mod config;

/// Everything a handler needs besides its own arguments.
pub struct CommandContext {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub skip_invalid: bool,
}

impl CommandContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) if path.exists() => Config::load_from(path)?,
            Some(path) => {
                debug!("Config file {} not found, using defaults", path.display());
                Config::default()
            }
            None => Config::load()?,
        };
        Ok(Self { config, config_path: cli.config.clone(), skip_invalid: cli.skip_invalid })
    }

    /// Load events named on the command line, or from the configured data file.
    pub fn load_events(&self, input: &InputArgs) -> Result<Vec<Event>> {
        let path = input
            .file
            .clone()
            .or_else(|| self.config.dashboard.data_file.clone())
            .ok_or_else(|| anyhow!("No event file given and no data_file configured"))?;
        let events = calendar::load_events(&path)?;
        if self.skip_invalid {
            Ok(drop_invalid(events))
        } else {
            Ok(events)
        }
    }

    pub fn year(&self, requested: Option<i32>) -> i32 {
        requested.or(self.config.dashboard.default_year).unwrap_or_else(|| Local::now().year())
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let ctx = CommandContext::from_cli(&cli)?;
    match cli.command {
        Commands::Events(input) => charts::list_events(&ctx, &input),
        Commands::Categories { input, bucket_uncategorized } => {
            charts::show_categories(&ctx, &input, bucket_uncategorized)
        }
        Commands::Daily { input, year, split } => charts::show_daily(&ctx, &input, year, split),
        Commands::Heatmap { input, category, year } => {
            charts::show_heatmap(&ctx, &input, &category, year)
        }
        Commands::Weeks { input, from, to } => charts::show_weeks(&ctx, &input, from, to),
        Commands::Config { action } => config::handle_config_command(&ctx, action),
    }
}

/// Remove events the engine would reject, logging each one.
pub fn drop_invalid(events: Vec<Event>) -> Vec<Event> {
    let before = events.len();
    let kept: Vec<Event> = events
        .into_iter()
        .filter(|event| match compute_duration(event) {
            Ok(_) => true,
            Err(e) => {
                warn!("Skipping event {:?}: {}", event.subject.as_deref().unwrap_or("(untitled)"), e);
                false
            }
        })
        .collect();
    if kept.len() < before {
        warn!("Skipped {} of {} events", before - kept.len(), before);
    }
    kept
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_invalid_keeps_good_events() {
        let good = Event::from_text("2024-01-01", "09:00", "2024-01-01", "10:00").unwrap();
        let missing = Event::from_text("2024-01-01", "", "2024-01-01", "10:00").unwrap();
        let too_long = Event::from_text("2024-01-01", "09:00", "2024-01-04", "10:00").unwrap();
        let kept = drop_invalid(vec![good.clone(), missing, too_long]);
        assert_eq!(kept, vec![good]);
    }

    #[test]
    fn test_year_fallbacks() {
        let mut ctx = CommandContext { config: Config::default(), config_path: None, skip_invalid: false };
        assert_eq!(ctx.year(Some(2021)), 2021);
        ctx.config.dashboard.default_year = Some(2024);
        assert_eq!(ctx.year(None), 2024);
        ctx.config.dashboard.default_year = None;
        assert_eq!(ctx.year(None), Local::now().year());
    }
}
