use crate::calendar::{DayAttribution, UncategorizedPolicy, DEFAULT_UNCATEGORIZED_LABEL};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
    #[serde(default)]
    pub categories: CategoryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub default_year: Option<i32>,
    pub data_file: Option<PathBuf>,
    pub week_range_start: u32,
    pub week_range_end: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { default_year: None, data_file: None, week_range_start: 1, week_range_end: 52 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UncategorizedMode {
    #[default]
    Exclude,
    Bucket,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub uncategorized: UncategorizedMode,
    pub uncategorized_label: String,
    pub day_attribution: DayAttribution,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            uncategorized: UncategorizedMode::Exclude,
            uncategorized_label: DEFAULT_UNCATEGORIZED_LABEL.to_string(),
            day_attribution: DayAttribution::StartDate,
        }
    }
}

impl AggregationConfig {
    pub fn uncategorized_policy(&self) -> UncategorizedPolicy {
        match self.uncategorized {
            UncategorizedMode::Exclude => UncategorizedPolicy::Exclude,
            UncategorizedMode::Bucket => {
                UncategorizedPolicy::Bucket(self.uncategorized_label.clone())
            }
        }
    }
}

/// Colours handed to whatever draws the charts, keyed by category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    pub colors: BTreeMap<String, String>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        let colors = [
            ("Work", "#b05a69"),
            ("Sleep", "lightgrey"),
            ("Reading", "#d66871"),
            ("Family", "#5aca91"),
            ("Friends", "orange"),
            ("Exercise", "red"),
            ("Break", "#ec6ab9"),
            ("Other", "#63d2d9"),
        ];
        Self {
            colors: colors.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }
}

impl CategoryConfig {
    pub fn color_for(&self, label: &str) -> Option<&str> {
        self.colors.get(label).map(String::as_str)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        // If config doesn't exist, create default
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn week_range(&self) -> std::ops::RangeInclusive<u32> {
        self.dashboard.week_range_start..=self.dashboard.week_range_end
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "timedash", "timedash")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.dashboard.default_year, None);
        assert_eq!(config.week_range(), 1..=52);
        assert_eq!(config.aggregation.uncategorized_policy(), UncategorizedPolicy::Exclude);
        assert_eq!(config.aggregation.day_attribution, DayAttribution::StartDate);
        assert_eq!(config.categories.color_for("Work"), Some("#b05a69"));
    }

    #[test]
    fn test_config_save_load() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.dashboard.default_year = Some(2024);
        config.aggregation.uncategorized = UncategorizedMode::Bucket;
        config.aggregation.day_attribution = DayAttribution::ProportionalSplit;
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        assert_eq!(loaded.aggregation.uncategorized_policy(), UncategorizedPolicy::bucket());

        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[aggregation]\nday_attribution = \"proportional\"\n\n[categories.colors]\nDeep = \"navy\"\n",
        )?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.aggregation.day_attribution, DayAttribution::ProportionalSplit);
        assert_eq!(loaded.aggregation.uncategorized_label, "Uncategorized");
        assert_eq!(loaded.dashboard.week_range_end, 52);
        assert_eq!(loaded.categories.color_for("Deep"), Some("navy"));
        assert_eq!(loaded.categories.color_for("Work"), None);

        Ok(())
    }
}
