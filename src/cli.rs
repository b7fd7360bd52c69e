use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// timedash - personal time dashboard built from calendar exports
#[derive(Debug, Parser)]
#[command(name = "timedash")]
#[command(about = "Durations and chart data from exported calendar appointments", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use this config file instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Drop events whose duration cannot be computed instead of failing
    #[arg(long, global = true)]
    pub skip_invalid: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every event with its duration in hours
    Events(InputArgs),

    /// Hours per category (pie chart data)
    #[command(alias = "pie")]
    Categories {
        #[command(flatten)]
        input: InputArgs,

        /// Count events without categories under the configured label
        #[arg(long)]
        bucket_uncategorized: bool,
    },

    /// Hours per day of a year, zero-filled
    Daily {
        #[command(flatten)]
        input: InputArgs,

        /// Year to cover (defaults to the configured year, then the current one)
        #[arg(long)]
        year: Option<i32>,

        /// Split midnight-crossing events between both days
        #[arg(long)]
        split: bool,
    },

    /// Daily activity grid for one category
    Heatmap {
        #[command(flatten)]
        input: InputArgs,

        /// Category label to show
        #[arg(long, short)]
        category: String,

        #[arg(long)]
        year: Option<i32>,
    },

    /// Hours per ISO week with total and weekly average
    #[command(alias = "weekly")]
    Weeks {
        #[command(flatten)]
        input: InputArgs,

        /// First ISO week to include
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=53))]
        from: Option<u32>,

        /// Last ISO week to include
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=53))]
        to: Option<u32>,
    },

    /// View or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// CSV file with events (defaults to the configured data file)
    pub file: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigActions {
    /// Display the current configuration
    Show,
    /// Write the default configuration if none exists
    Init,
}
