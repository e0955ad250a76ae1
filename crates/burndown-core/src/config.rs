use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::BurndownError;

/// File name of the per-project config, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "burndown.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub milestone: MilestoneConfig,
    #[serde(default)]
    pub input: InputConfig,
}

/// Which milestone to report on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneConfig {
    /// Milestone title used to filter the export.
    #[serde(default)]
    pub title: Option<String>,
    /// Quoted `"YYYY-MM-DD"` date the milestone started.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Path to the issue export, relative to the project root.
    #[serde(default)]
    pub items: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

/// Settings for one `report` run after merging flags over config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub start_date: NaiveDate,
    pub milestone: Option<String>,
    /// `None` means read the export from stdin.
    pub items: Option<PathBuf>,
}

/// Values given on the command line; each wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct ReportOverrides {
    pub start_date: Option<NaiveDate>,
    pub milestone: Option<String>,
    pub items: Option<PathBuf>,
}

fn parse_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<T>(&content).map_err(|err| {
        BurndownError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
        .into()
    })
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(PROJECT_CONFIG_FILE);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no project config, using defaults");
        return Ok(ProjectConfig::default());
    }

    parse_toml(&path)
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("burndown/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    parse_toml(&path)
}

/// Merge command-line overrides over the project config.
///
/// A relative `items` path from the config file resolves against
/// `project_root`; a path given on the command line is used as is, and `-`
/// selects stdin.
///
/// # Errors
///
/// Returns [`BurndownError::MissingStartDate`] when neither source names a
/// start date.
pub fn resolve_report_settings(
    project_root: &Path,
    config: &ProjectConfig,
    overrides: ReportOverrides,
) -> Result<ReportSettings, BurndownError> {
    let start_date = overrides
        .start_date
        .or(config.milestone.start_date)
        .ok_or(BurndownError::MissingStartDate)?;

    let milestone = overrides.milestone.or_else(|| config.milestone.title.clone());

    let items = match overrides.items {
        Some(path) if path.as_os_str() == "-" => None,
        Some(path) => Some(path),
        None => config.input.items.as_ref().map(|p| project_root.join(p)),
    };

    Ok(ReportSettings {
        start_date,
        milestone,
        items,
    })
}
