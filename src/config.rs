use crate::dashboard::logic::{AggregationOptions, Category, LoadOptions};
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "laureate-dashboard";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV source loaded at startup
    pub data_path: PathBuf,
    /// Category shown before the user picks one
    pub default_category: Category,
    /// Number of `affiliation_N` columns in the source
    pub affiliation_slots: usize,
    pub top_countries: usize,
    pub top_affiliations: usize,
    /// Write rotating log files in addition to the console
    pub file_logging: bool,
    /// Overrides the platform log directory
    pub log_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let aggregation = AggregationOptions::default();
        Self {
            data_path: PathBuf::from("assets/nobel_prize_corrected.csv"),
            default_category: Category::EconomicSciences,
            affiliation_slots: LoadOptions::default().affiliation_slots,
            top_countries: aggregation.top_countries,
            top_affiliations: aggregation.top_affiliations,
            file_logging: true,
            log_dir: None,
        }
    }
}

impl DashboardConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            affiliation_slots: self.affiliation_slots,
        }
    }

    pub fn aggregation_options(&self) -> AggregationOptions {
        AggregationOptions {
            top_countries: self.top_countries,
            top_affiliations: self.top_affiliations,
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.json"))
}

/// Reads a config file that the user asked for explicitly.
///
/// # Errors
///
/// Returns [`DashboardError::Config`] if the file is unreadable or invalid.
pub fn load_config_from(path: &Path) -> Result<DashboardConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DashboardError::Config(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| DashboardError::Config(format!("{}: {e}", path.display())))
}

/// Config plus the reason defaults replaced the file, if they did.
///
/// Config is read before logging exists, so the caller reports `fallback`
/// once a subscriber is installed.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: DashboardConfig,
    pub fallback: Option<DashboardError>,
}

impl LoadedConfig {
    fn defaults(fallback: Option<DashboardError>) -> Self {
        Self {
            config: DashboardConfig::default(),
            fallback,
        }
    }
}

/// Reads the config at the platform location, falling back to defaults.
pub fn load_config() -> LoadedConfig {
    load_config_or_default(get_config_path().as_deref())
}

/// A missing file silently yields defaults; an unreadable one yields defaults
/// plus the error in [`LoadedConfig::fallback`].
pub fn load_config_or_default(path: Option<&Path>) -> LoadedConfig {
    let Some(path) = path.filter(|p| p.exists()) else {
        return LoadedConfig::defaults(None);
    };

    match load_config_from(path) {
        Ok(config) => LoadedConfig {
            config,
            fallback: None,
        },
        Err(e) => LoadedConfig::defaults(Some(e)),
    }
}

/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config(config: &DashboardConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
