use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::core::{distance::EARTH_RADIUS_MILES, matcher::DEFAULT_TIERS, Matcher};
use crate::models::ScoreMode;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

fn default_input_path() -> PathBuf { PathBuf::from("resources/colleges.csv") }

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
    #[serde(default)]
    pub summary_path: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
            summary_path: None,
        }
    }
}

fn default_report_path() -> PathBuf { PathBuf::from("output/grouping.txt") }

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MatchingSettings {
    #[validate(length(min = 1), custom(function = "validate_tiers"))]
    #[serde(default = "default_tiers")]
    pub tiers: Vec<f64>,
    #[validate(range(min = 1.0))]
    #[serde(default = "default_earth_radius")]
    pub earth_radius: f64,
    #[validate(length(min = 1))]
    #[serde(default = "default_unit_label")]
    pub unit_label: String,
    #[serde(default)]
    pub score_mode: ScoreMode,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            earth_radius: default_earth_radius(),
            unit_label: default_unit_label(),
            score_mode: ScoreMode::default(),
        }
    }
}

impl MatchingSettings {
    /// Build a matcher from these settings
    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.tiers.clone(), self.earth_radius, self.score_mode)
    }
}

fn default_tiers() -> Vec<f64> { DEFAULT_TIERS.to_vec() }
fn default_earth_radius() -> f64 { EARTH_RADIUS_MILES }
fn default_unit_label() -> String { "miles".to_string() }

/// Tiers must be positive, finite and strictly increasing
#[allow(clippy::ptr_arg)]
fn validate_tiers(tiers: &Vec<f64>) -> Result<(), ValidationError> {
    if tiers.iter().any(|t| !t.is_finite() || *t <= 0.0) {
        return Err(ValidationError::new("tier_not_positive"));
    }
    if tiers.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ValidationError::new("tiers_not_increasing"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with XREF__)
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., XREF__MATCHING__SCORE_MODE -> matching.score_mode
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    fn finish(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the settings that the pipeline relies on
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.matching.validate()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("XREF")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("matching.tiers")
        .try_parsing(true)
}
