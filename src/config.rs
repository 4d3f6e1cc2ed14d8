use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;

/// Default location of the recipe API
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Loader configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Base URL of the recipe API, without the `/api/recipe` path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. No timeout when unset or 0.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl LoaderConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_LOADER__ prefix
    /// 2. recipe_loader.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_LOADER__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Parse configuration from an in-memory TOML document
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

/// Load configuration from file and environment variables
///
/// See [`LoaderConfig::load`] for the precedence rules.
pub fn load_config() -> Result<LoaderConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe_loader").required(false))
        // Use double underscore as separator: RECIPE_LOADER__TIMEOUT
        .add_source(
            Environment::with_prefix("RECIPE_LOADER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
