use super::CommandContext;
use crate::cli::ConfigActions;
use crate::config::{get_config_path, Config};
use anyhow::Result;
use log::info;

pub fn handle_config_command(ctx: &CommandContext, action: ConfigActions) -> Result<()> {
    match action {
        ConfigActions::Show => {
            show_config(&ctx.config);
            Ok(())
        }
        ConfigActions::Init => {
            let path = match &ctx.config_path {
                Some(path) => path.clone(),
                None => get_config_path()?,
            };
            if path.exists() {
                println!("Config already exists at {}", path.display());
                return Ok(());
            }
            Config::default().save_to(&path)?;
            info!("Wrote default config to {}", path.display());
            println!("Created {}", path.display());
            Ok(())
        }
    }
}

fn show_config(config: &Config) {
    println!("\nCurrent Configuration:");
    println!("\nDashboard Settings:");
    match config.dashboard.default_year {
        Some(year) => println!("  Default Year: {}", year),
        None => println!("  Default Year: current year"),
    }
    println!(
        "  Data File: {}",
        config.dashboard.data_file.as_ref().map_or("None".to_string(), |p| p.display().to_string())
    );
    println!(
        "  Week Range: {}-{}",
        config.dashboard.week_range_start, config.dashboard.week_range_end
    );
    println!("\nAggregation Settings:");
    println!("  Uncategorized Events: {:?}", config.aggregation.uncategorized);
    println!("  Uncategorized Label: {}", config.aggregation.uncategorized_label);
    println!("  Day Attribution: {:?}", config.aggregation.day_attribution);
    println!("\nCategory Colors:");
    if config.categories.colors.is_empty() {
        println!("  None");
    }
    for (label, color) in &config.categories.colors {
        println!("  {}: {}", label, color);
    }
}
