//! Configuration management for `TrailBuddy`
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and validates every setting before the assistant starts.

use crate::TrailBuddyError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sample configuration shipped with the crate, used when nothing else is found
pub const DEFAULT_CONFIG_FILE: &str = "config/default.toml";

/// Root configuration structure for `TrailBuddy`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailBuddyConfig {
    /// Text completion (Gemini) settings
    pub llm: LlmConfig,
    /// Weather API settings
    pub weather: WeatherConfig,
    /// Points-of-interest API settings
    pub places: PlacesConfig,
    /// Trail dataset settings
    pub catalog: CatalogConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Text completion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier sent with every completion request
    pub model: String,
    /// Base URL of the generative language API
    pub base_url: String,
    /// Upper bound on generated tokens per reply
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

/// Weather API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL for the Open-Meteo API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Points-of-interest API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// Overpass interpreter endpoint
    pub base_url: String,
    /// Search radius around a trail in meters
    pub radius_m: u32,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Trail dataset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path of the trails CSV file
    pub path: String,
    /// Maximum number of trails a filter returns
    pub max_results: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_llm_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_llm_max_output_tokens() -> u32 {
    500
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_places_base_url() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_places_radius() -> u32 {
    20_000
}

fn default_timeout() -> u32 {
    30
}

fn default_catalog_path() -> String {
    "data/trails.csv".to_string()
}

fn default_max_results() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_llm_model(),
            base_url: default_llm_base_url(),
            max_output_tokens: default_llm_max_output_tokens(),
            timeout_seconds: default_timeout(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: default_places_base_url(),
            radius_m: default_places_radius(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            max_results: default_max_results(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TrailBuddyConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.or_else(Self::find_config_file);

        if let Some(config_file) = config_file.filter(|path| path.exists()) {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // e.g. TRAILBUDDY_LLM__MODEL=gemini-2.5-flash
        builder = builder.add_source(
            Environment::with_prefix("TRAILBUDDY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TrailBuddyConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trailbuddy").join("config.toml"))
    }

    /// First existing file out of the user config, `./config.toml` and the
    /// bundled `./config/default.toml`
    #[must_use]
    pub fn find_config_file() -> Option<PathBuf> {
        Self::get_config_path()
            .into_iter()
            .chain([PathBuf::from("config.toml"), PathBuf::from(DEFAULT_CONFIG_FILE)])
            .find(|path| path.exists())
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.llm.model.is_empty() {
            self.llm.model = default_llm_model();
        }
        if self.llm.base_url.is_empty() {
            self.llm.base_url = default_llm_base_url();
        }
        if self.llm.max_output_tokens == 0 {
            self.llm.max_output_tokens = default_llm_max_output_tokens();
        }
        if self.llm.timeout_seconds == 0 {
            self.llm.timeout_seconds = default_timeout();
        }
        if self.llm.api_key_env.is_empty() {
            self.llm.api_key_env = default_api_key_env();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_timeout();
        }
        if self.places.base_url.is_empty() {
            self.places.base_url = default_places_base_url();
        }
        if self.places.radius_m == 0 {
            self.places.radius_m = default_places_radius();
        }
        if self.places.timeout_seconds == 0 {
            self.places.timeout_seconds = default_timeout();
        }
        if self.catalog.path.is_empty() {
            self.catalog.path = default_catalog_path();
        }
        if self.catalog.max_results == 0 {
            self.catalog.max_results = default_max_results();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        let timeouts = [
            ("LLM", self.llm.timeout_seconds),
            ("Weather", self.weather.timeout_seconds),
            ("Places", self.places.timeout_seconds),
        ];
        for (name, timeout) in timeouts {
            if timeout > 300 {
                return Err(TrailBuddyError::config(format!(
                    "{name} API timeout cannot exceed 300 seconds"
                ))
                .into());
            }
        }

        if !(1..=50_000).contains(&self.places.radius_m) {
            return Err(
                TrailBuddyError::config("Places search radius must be between 1 and 50000 m").into(),
            );
        }

        if !(1..=100).contains(&self.catalog.max_results) {
            return Err(
                TrailBuddyError::config("Catalog max results must be between 1 and 100").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TrailBuddyError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TrailBuddyError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("LLM", &self.llm.base_url),
            ("Weather", &self.weather.base_url),
            ("Places", &self.places.base_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TrailBuddyError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
