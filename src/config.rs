use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::analyzer::hot_fields::DEFAULT_SAMPLE_LIMIT;
use crate::filter::RecordFilter;
use crate::model::ConfigError;

/// Scoring knobs; unset targets and salary bandwidth are derived from the dataset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HotFieldsConfig {
    pub target_salary: Option<f64>,
    pub target_exp: Option<f64>,
    pub sigma_salary: Option<f64>,
    pub sigma_exp: f64,
    pub top_k: usize,
    pub sample_limit_per_field: usize,
}

impl Default for HotFieldsConfig {
    fn default() -> Self {
        Self {
            target_salary: None,
            target_exp: None,
            sigma_salary: None,
            sigma_exp: 2.0,
            top_k: 10,
            sample_limit_per_field: DEFAULT_SAMPLE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Forecasting service URL; forecasting is disabled when absent.
    pub endpoint: Option<String>,
    pub horizon_days: u32,
    pub timeout_seconds: u64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            horizon_days: 90,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset_path: String,
    pub filters: RecordFilter,
    pub hot_fields: HotFieldsConfig,
    pub forecast: ForecastConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: "clean_jobs.csv".to_string(),
            filters: RecordFilter::default(),
            hot_fields: HotFieldsConfig::default(),
            forecast: ForecastConfig::default(),
        }
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Loads `path` when it exists, otherwise falls back to built-in defaults.
///
/// An explicitly requested file that is missing is still an error.
pub fn load_or_default(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None if Path::new("config.json").exists() => load_config("config.json"),
        None => {
            info!("No config.json found, using defaults");
            Ok(AppConfig::default())
        }
    }
}
